/// Query parameter the web app reads the referral code from.
pub const REF_PARAM: &str = "ref";

/// A keyboard holding exactly one button that opens the web app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebAppKeyboard {
    pub label: String,
    pub url: String,
}

/// `base_url`, or `base_url?ref=<code>` with the code percent-encoded.
pub fn target_url(base_url: &str, code: Option<&str>) -> String {
    match code {
        Some(code) => format!("{}?{}={}", base_url, REF_PARAM, urlencoding::encode(code)),
        None => base_url.to_string(),
    }
}

pub fn build_keyboard(base_url: &str, label: &str, code: Option<&str>) -> WebAppKeyboard {
    WebAppKeyboard {
        label: label.to_string(),
        url: target_url(base_url, code),
    }
}
