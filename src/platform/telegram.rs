use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, InputFile, ParseMode, WebAppInfo};
use teloxide::update_listeners::Polling;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::Config;
use crate::dispatch;
use crate::keyboard::WebAppKeyboard;
use crate::platform::{ChatSender, IncomingMessage};
use crate::render::Markup;

/// Long-poll window for `getUpdates`
const POLL_TIMEOUT: Duration = Duration::from_secs(20);

/// Teloxide-based implementation of [`ChatSender`].
pub struct TelegramSender {
    bot: Bot,
}

impl TelegramSender {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

fn inline_keyboard(keyboard: &WebAppKeyboard) -> Result<InlineKeyboardMarkup> {
    let url = Url::parse(&keyboard.url)
        .with_context(|| format!("Invalid web app URL: {}", keyboard.url))?;
    Ok(InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::web_app(keyboard.label.clone(), WebAppInfo { url }),
    ]]))
}

fn parse_mode(markup: Markup) -> Option<ParseMode> {
    match markup {
        Markup::Html => Some(ParseMode::Html),
        Markup::Plain => None,
    }
}

#[async_trait]
impl ChatSender for TelegramSender {
    async fn send_photo(
        &self,
        chat_id: i64,
        image_url: &str,
        caption: &str,
        markup: Markup,
        keyboard: &WebAppKeyboard,
    ) -> Result<()> {
        let image = Url::parse(image_url)
            .with_context(|| format!("Invalid image URL: {}", image_url))?;

        let mut request = self
            .bot
            .send_photo(ChatId(chat_id), InputFile::url(image))
            .caption(caption)
            .reply_markup(inline_keyboard(keyboard)?);
        if let Some(mode) = parse_mode(markup) {
            request = request.parse_mode(mode);
        }

        request.await.context("Failed to send photo")?;
        Ok(())
    }

    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        markup: Markup,
        keyboard: Option<&WebAppKeyboard>,
    ) -> Result<()> {
        let mut request = self.bot.send_message(ChatId(chat_id), text);
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(inline_keyboard(keyboard)?);
        }
        if let Some(mode) = parse_mode(markup) {
            request = request.parse_mode(mode);
        }

        request.await.context("Failed to send message")?;
        Ok(())
    }
}

/// Run the Telegram bot: announce identity, then long-poll until stopped.
pub async fn run(config: Arc<Config>) -> Result<()> {
    let bot = Bot::new(&config.bot_token);

    let me = bot
        .get_me()
        .await
        .context("Failed to query bot identity (is BOT_TOKEN valid?)")?;
    info!("Bot @{} is running!", me.username());

    let listener = Polling::builder(bot.clone())
        .timeout(POLL_TIMEOUT)
        .delete_webhook()
        .await
        .build();

    let handler = Update::filter_message().endpoint(handle_message);

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![config])
        // One key for every update: handle them strictly in arrival order.
        .distribution_function(|_| Some(()))
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd.id);
        })
        .error_handler(LoggingErrorHandler::with_custom_text("telegram"))
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;

    info!("Bot stopped");
    Ok(())
}

async fn handle_message(bot: Bot, msg: Message, config: Arc<Config>) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        debug!("Ignoring message without sender in chat {}", msg.chat.id);
        return Ok(());
    };

    let Some(text) = msg.text() else {
        debug!("Ignoring non-text message from {}", user.id);
        return Ok(());
    };

    let incoming = IncomingMessage {
        sender_id: user.id.0,
        chat_id: msg.chat.id.0,
        text: text.to_string(),
    };

    debug!(
        "Message from user {} in chat {}: {}",
        incoming.sender_id, incoming.chat_id, incoming.text
    );

    let sender = TelegramSender::new(bot);
    dispatch::handle(&sender, &config, &incoming).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_keyboard_has_single_web_app_button() {
        let markup = inline_keyboard(&WebAppKeyboard {
            label: "Open".to_string(),
            url: "https://app.example?ref=abc".to_string(),
        })
        .unwrap();

        assert_eq!(markup.inline_keyboard.len(), 1);
        assert_eq!(markup.inline_keyboard[0].len(), 1);
        assert_eq!(markup.inline_keyboard[0][0].text, "Open");
    }

    #[test]
    fn test_invalid_keyboard_url_is_an_error() {
        let result = inline_keyboard(&WebAppKeyboard {
            label: "Open".to_string(),
            url: "not a url".to_string(),
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_mode_mapping() {
        assert_eq!(parse_mode(Markup::Html), Some(ParseMode::Html));
        assert_eq!(parse_mode(Markup::Plain), None);
    }
}
