use anyhow::Result;
use tracing::warn;

use crate::keyboard::WebAppKeyboard;
use crate::platform::ChatSender;
use crate::render::Markup;

/// A fully built reply, owned by the update that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub body: String,
    pub markup: Markup,
    pub keyboard: WebAppKeyboard,
    pub image_url: Option<String>,
}

/// Outbound method for a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method<'a> {
    Photo(&'a str),
    Text,
}

impl<'a> Method<'a> {
    pub fn preferred(payload: &'a Payload) -> Self {
        match payload.image_url.as_deref() {
            Some(url) => Method::Photo(url),
            None => Method::Text,
        }
    }

    /// Next method to try after this one failed. Text is terminal.
    pub fn downgrade(self) -> Option<Method<'a>> {
        match self {
            Method::Photo(_) => Some(Method::Text),
            Method::Text => None,
        }
    }
}

/// How a payload ended up being delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivered {
    Photo,
    Text,
    /// The photo send failed and the same body went out as text.
    TextFallback,
}

async fn send<S: ChatSender + ?Sized>(
    sender: &S,
    chat_id: i64,
    payload: &Payload,
    method: Method<'_>,
) -> Result<()> {
    match method {
        Method::Photo(image_url) => {
            sender
                .send_photo(
                    chat_id,
                    image_url,
                    &payload.body,
                    payload.markup,
                    &payload.keyboard,
                )
                .await
        }
        Method::Text => {
            sender
                .send_text(chat_id, &payload.body, payload.markup, Some(&payload.keyboard))
                .await
        }
    }
}

/// Deliver `payload`, downgrading from photo to text at most once.
///
/// Makes one outbound call on success and two when the photo path fails.
/// A failure of the last method is returned to the caller.
pub async fn deliver<S: ChatSender + ?Sized>(
    sender: &S,
    chat_id: i64,
    payload: &Payload,
) -> Result<Delivered> {
    let mut method = Method::preferred(payload);
    let mut downgraded = false;

    loop {
        match send(sender, chat_id, payload, method).await {
            Ok(()) => {
                return Ok(match method {
                    Method::Photo(_) => Delivered::Photo,
                    Method::Text if downgraded => Delivered::TextFallback,
                    Method::Text => Delivered::Text,
                });
            }
            Err(e) => match method.downgrade() {
                Some(next) => {
                    warn!("Could not send image, sending text only: {:#}", e);
                    method = next;
                    downgraded = true;
                }
                None => return Err(e),
            },
        }
    }
}
