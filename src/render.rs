use teloxide::utils::html;

/// How the chat client should interpret a message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    Html,
    Plain,
}

/// One of the fixed reply templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template<'a> {
    StartPlain,
    StartReferred(&'a str),
    Help,
    Info,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub body: String,
    pub button_label: &'static str,
    pub markup: Markup,
}

pub const LABEL_OPEN_APP: &str = "🚀 Open Staking App";
pub const LABEL_OPEN_APP_INVITED: &str = "🚀 Open Staking App (You were invited!)";
pub const LABEL_START_STAKING: &str = "🚀 Start Staking Now";

pub const APOLOGY_TEXT: &str = "❌ Sorry, something went wrong. Please try again later.";

const START_PLAIN: &str = "🎉 Welcome to tccUSDT Staking!\n\
\n\
💰 Earn up to 2.6% daily returns\n\
🤝 Get referral rewards\n\
🔒 Secure and reliable\n\
\n\
Click the button below to start staking!";

const START_REFERRED_HEAD: &str = "🎉 Welcome to tccUSDT Staking!\n\
\n\
You've been invited by someone to join our staking platform!\n\
\n\
💰 Earn up to 2.6% daily returns\n\
🤝 Get referral rewards\n\
🔒 Secure and reliable\n\
\n\
Click the button below to start staking with your referral bonus!\n\
\n\
Referral Code: ";

const HELP: &str = "🤖 tccUSDT Staking Bot Commands:\n\
\n\
/start - Open the staking app\n\
/help - Show this help message\n\
/info - Get platform information\n\
\n\
💡 To invite friends, share your referral link from the app!";

const INFO: &str = "📊 tccUSDT Staking Platform Info:\n\
\n\
💰 Daily Returns: Up to 2.6%\n\
🔒 Security: Industry-standard protection\n\
🤝 Referral System: 5-level commission structure\n\
⏰ Claim Frequency: Every 24 hours\n\
💎 Token: tccUSDT (0.65 USDT rate)\n\
\n\
Start staking today and earn passive income!";

const FALLBACK: &str =
    "👋 Hi! Use the button below to access the staking app, or type /help for commands:";

/// Render a template into its body text and button label.
///
/// Start bodies are HTML; the referral code is escaped before it lands inside `<code>`.
pub fn render(template: Template<'_>) -> Rendered {
    match template {
        Template::StartPlain => Rendered {
            body: START_PLAIN.to_string(),
            button_label: LABEL_OPEN_APP,
            markup: Markup::Html,
        },
        Template::StartReferred(code) => Rendered {
            body: format!("{}<code>{}</code>", START_REFERRED_HEAD, html::escape(code)),
            button_label: LABEL_OPEN_APP_INVITED,
            markup: Markup::Html,
        },
        Template::Help => Rendered {
            body: HELP.to_string(),
            button_label: LABEL_OPEN_APP,
            markup: Markup::Plain,
        },
        Template::Info => Rendered {
            body: INFO.to_string(),
            button_label: LABEL_START_STAKING,
            markup: Markup::Plain,
        },
        Template::Fallback => Rendered {
            body: FALLBACK.to_string(),
            button_label: LABEL_OPEN_APP,
            markup: Markup::Plain,
        },
    }
}
