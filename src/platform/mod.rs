pub mod telegram;

#[cfg(test)]
pub mod fake;

use anyhow::Result;
use async_trait::async_trait;

use crate::keyboard::WebAppKeyboard;
use crate::render::Markup;

/// A text message received from the chat platform
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    /// Platform-specific user ID of the sender
    pub sender_id: u64,
    /// Chat the reply goes to
    pub chat_id: i64,
    /// The message text
    pub text: String,
}

/// Outbound side of the chat platform. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait ChatSender: Send + Sync {
    /// Sends an image by URL with `caption` and the web app keyboard attached.
    async fn send_photo(
        &self,
        chat_id: i64,
        image_url: &str,
        caption: &str,
        markup: Markup,
        keyboard: &WebAppKeyboard,
    ) -> Result<()>;

    /// Sends a text message, optionally with the web app keyboard attached.
    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        markup: Markup,
        keyboard: Option<&WebAppKeyboard>,
    ) -> Result<()>;
}
