use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
pub const DEFAULT_WEBAPP_URL: &str = "https://staking-five-pi.vercel.app";
pub const DEFAULT_IMAGE_URL: &str = "https://i.ibb.co/s9DmmLZP/photo-2025-09-02-20-30-24.jpg";

pub const ENV_BOT_TOKEN: &str = "BOT_TOKEN";
pub const ENV_WEBAPP_URL: &str = "WEBAPP_URL";
pub const ENV_IMAGE_URL: &str = "IMAGE_URL";

/// Optional on-disk configuration; every field can be overridden by the environment.
#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    #[serde(default)]
    bot: BotSection,
}

#[derive(Debug, Deserialize, Default)]
struct BotSection {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    webapp_url: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
}

impl FileConfig {
    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

/// Process-wide settings, resolved once at startup and read-only afterwards.
#[derive(Clone)]
pub struct Config {
    pub bot_token: String,
    pub webapp_url: String,
    pub image_url: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &"<redacted>")
            .field("webapp_url", &self.webapp_url)
            .field("image_url", &self.image_url)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    /// Load from an optional TOML file, then apply the process environment on top.
    ///
    /// An explicit `path` must exist. Without one, `config.toml` is read only if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => FileConfig::read(path)?,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    FileConfig::read(default)?
                } else {
                    FileConfig::default()
                }
            }
        };

        Self::resolve(file, |key| std::env::var(key).ok())
    }

    fn resolve<F>(file: FileConfig, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |key: &str, from_file: Option<String>| {
            non_empty(lookup(key)).or_else(|| non_empty(from_file))
        };

        let Some(bot_token) = pick(ENV_BOT_TOKEN, file.bot.token) else {
            bail!("{} environment variable is required", ENV_BOT_TOKEN);
        };

        Ok(Self {
            bot_token,
            webapp_url: pick(ENV_WEBAPP_URL, file.bot.webapp_url)
                .unwrap_or_else(|| DEFAULT_WEBAPP_URL.to_string()),
            image_url: pick(ENV_IMAGE_URL, file.bot.image_url)
                .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string()),
        })
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            bot_token: "123:test".to_string(),
            webapp_url: "https://app.example".to_string(),
            image_url: "https://img.example/logo.jpg".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_token_is_an_error() {
        let err = Config::resolve(FileConfig::default(), env(&[])).unwrap_err();
        assert!(err.to_string().contains("BOT_TOKEN"));
    }

    #[test]
    fn test_blank_token_counts_as_missing() {
        let result = Config::resolve(FileConfig::default(), env(&[("BOT_TOKEN", "   ")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults_apply_when_only_token_set() {
        let config = Config::resolve(FileConfig::default(), env(&[("BOT_TOKEN", "abc")])).unwrap();
        assert_eq!(config.bot_token, "abc");
        assert_eq!(config.webapp_url, DEFAULT_WEBAPP_URL);
        assert_eq!(config.image_url, DEFAULT_IMAGE_URL);
    }

    #[test]
    fn test_environment_overrides_file() {
        let file: FileConfig = toml::from_str(
            r#"
            [bot]
            token = "from-file"
            webapp_url = "https://file.example"
            image_url = "https://file.example/img.png"
            "#,
        )
        .unwrap();

        let config = Config::resolve(
            file,
            env(&[("BOT_TOKEN", "from-env"), ("WEBAPP_URL", "https://env.example")]),
        )
        .unwrap();

        assert_eq!(config.bot_token, "from-env");
        assert_eq!(config.webapp_url, "https://env.example");
        assert_eq!(config.image_url, "https://file.example/img.png");
    }

    #[test]
    fn test_token_from_file_alone_is_enough() {
        let file: FileConfig = toml::from_str("[bot]\ntoken = \"file-token\"\n").unwrap();
        let config = Config::resolve(file, env(&[])).unwrap();
        assert_eq!(config.bot_token, "file-token");
    }

    #[test]
    fn test_explicit_missing_file_fails() {
        let result = Config::load(Some(Path::new("/nonexistent/staking-bot.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let out = format!("{:?}", Config::for_tests());
        assert!(!out.contains("123:test"));
        assert!(out.contains("<redacted>"));
    }
}
