use anyhow::Result;
use tracing::{error, info};

use crate::config::Config;
use crate::delivery::{self, Payload};
use crate::keyboard::build_keyboard;
use crate::platform::{ChatSender, IncomingMessage};
use crate::render::{render, Markup, Template, APOLOGY_TEXT};

/// Every kind of message the bot answers. `Other` is the catch-all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start { referral: Option<String> },
    Help,
    Info,
    Other,
}

impl Command {
    /// Classify a message by its first token, ignoring any `@botname` suffix.
    pub fn parse(text: &str) -> Self {
        let mut tokens = text.split_whitespace();
        let Some(head) = tokens.next() else {
            return Command::Other;
        };
        let name = head.split('@').next().unwrap_or(head);

        match name {
            "/start" => Command::Start {
                referral: tokens.next().map(str::to_string),
            },
            "/help" => Command::Help,
            "/info" => Command::Info,
            _ => Command::Other,
        }
    }
}

/// Build the reply for a command. Only `/start` carries an image.
pub fn respond(command: &Command, config: &Config) -> Payload {
    let (template, code, image_url) = match command {
        Command::Start {
            referral: Some(code),
        } => (
            Template::StartReferred(code),
            Some(code.as_str()),
            Some(config.image_url.clone()),
        ),
        Command::Start { referral: None } => {
            (Template::StartPlain, None, Some(config.image_url.clone()))
        }
        Command::Help => (Template::Help, None, None),
        Command::Info => (Template::Info, None, None),
        Command::Other => (Template::Fallback, None, None),
    };

    let rendered = render(template);
    Payload {
        body: rendered.body,
        markup: rendered.markup,
        keyboard: build_keyboard(&config.webapp_url, rendered.button_label, code),
        image_url,
    }
}

/// Handle one incoming message end-to-end.
///
/// A failure while answering `/start` is logged and replaced by the apology text.
/// Failures from the other commands are returned to the caller.
pub async fn handle<S: ChatSender + ?Sized>(
    sender: &S,
    config: &Config,
    msg: &IncomingMessage,
) -> Result<()> {
    let command = Command::parse(&msg.text);

    match &command {
        Command::Start { referral } => {
            info!(
                "User {} started bot with referral code: {}",
                msg.sender_id,
                referral.as_deref().unwrap_or("none")
            );

            let payload = respond(&command, config);
            if let Err(e) = delivery::deliver(sender, msg.chat_id, &payload).await {
                error!("Error handling start command: {:#}", e);
                sender
                    .send_text(msg.chat_id, APOLOGY_TEXT, Markup::Plain, None)
                    .await?;
            }
        }
        Command::Help | Command::Info | Command::Other => {
            let payload = respond(&command, config);
            delivery::deliver(sender, msg.chat_id, &payload).await?;
        }
    }

    Ok(())
}
