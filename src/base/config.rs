//! Load configuration via `config` crate with env-override support.

use std::{ops::Deref, path::Path, sync::Arc};

use anyhow::anyhow;
use serde::Deserialize;

use crate::base::templates;

use super::types::Res;

/// Default configuration document, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "podcastbot.conf";

/// Prefix for environment overrides (e.g. `PODCASTBOT_GH_PASSWORD`).
pub const ENV_PREFIX: &str = "PODCASTBOT";

/// Default User-Agent sent to both providers.
fn default_user_agent() -> String {
    templates::DEFAULT_USER_AGENT.to_string()
}

/// Default Reddit web base, used for OAuth and permalinks.
fn default_reddit_web_base() -> String {
    "https://www.reddit.com".to_string()
}

/// Default Reddit OAuth API base.
fn default_reddit_api_base() -> String {
    "https://oauth.reddit.com".to_string()
}

/// Default GitHub REST API base.
fn default_github_api_base() -> String {
    "https://api.github.com".to_string()
}

/// Domain used for the profile link in issue bodies.
fn default_profile_domain() -> String {
    "reddit.com".to_string()
}

/// Default per-request timeout in seconds.
fn default_request_timeout_secs() -> u64 {
    30
}

/// Configuration for the bot.
#[derive(Debug, Clone)]
pub struct Config {
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl From<ConfigInner> for Config {
    fn from(inner: ConfigInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConfigInner {
    /// Reddit account name (`USERNAME`).
    pub username: String,
    /// Reddit account password (`PASSWORD`).
    pub password: String,
    /// Reddit script app client id (`CLIENT_ID`).
    #[serde(default)]
    pub client_id: String,
    /// Reddit script app client secret (`CLIENT_SECRET`).
    #[serde(default)]
    pub client_secret: String,
    /// GitHub login (`GH_USERNAME`).
    pub gh_username: String,
    /// GitHub password or personal access token (`GH_PASSWORD`).
    pub gh_password: String,
    /// Owner of the repository issues are filed against (`REPO_OWNER`).
    pub repo_owner: String,
    /// Repository issues are filed against (`REPOSITORY`).
    pub repository: String,
    /// Whether to reply on Reddit with the issue link (`REPLY`).
    #[serde(default)]
    pub reply: bool,
    /// Footer appended to every reply (`REPLY_POSTFIX`).
    #[serde(default)]
    pub reply_postfix: String,
    /// User-Agent for outbound requests (`USER_AGENT`).
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Reddit web base (`REDDIT_WEB_BASE`).
    #[serde(default = "default_reddit_web_base")]
    pub reddit_web_base: String,
    /// Reddit OAuth API base (`REDDIT_API_BASE`).
    #[serde(default = "default_reddit_api_base")]
    pub reddit_api_base: String,
    /// GitHub API base (`GITHUB_API_BASE`).
    #[serde(default = "default_github_api_base")]
    pub github_api_base: String,
    /// Domain used for profile links in issue bodies (`PROFILE_DOMAIN`).
    #[serde(default = "default_profile_domain")]
    pub profile_domain: String,
    /// Timeout applied to every remote call (`REQUEST_TIMEOUT_SECS`).
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load the YAML document at `path` (or [`DEFAULT_CONFIG_PATH`]) with
    /// `PODCASTBOT_*` environment overrides on top.
    ///
    /// A missing document is an error.
    pub fn load(explicit_path: Option<&Path>) -> Res<Self> {
        let path = explicit_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));

        if !path.exists() {
            return Err(anyhow!("Configuration file `{}` not found.", path.display()));
        }

        let cfg = config::Config::builder()
            .add_source(config::File::from(path.to_path_buf()).format(config::FileFormat::Yaml))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;

        let result = Config {
            inner: Arc::new(cfg.try_deserialize()?),
        };

        result.validate()?;

        Ok(result)
    }

    /// Reject documents that parse but cannot drive a run.
    pub fn validate(&self) -> Res<()> {
        let required = [
            ("username", &self.username),
            ("password", &self.password),
            ("gh_username", &self.gh_username),
            ("gh_password", &self.gh_password),
            ("repo_owner", &self.repo_owner),
            ("repository", &self.repository),
        ];

        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(anyhow!("Configuration key `{key}` must not be empty."));
            }
        }

        if self.request_timeout_secs == 0 {
            return Err(anyhow!("Request timeout must be at least one second."));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn complete() -> ConfigInner {
        ConfigInner {
            username: "podcastbot".into(),
            password: "hunter2".into(),
            gh_username: "octocat".into(),
            gh_password: "ghp_token".into(),
            repo_owner: "sysadmin".into(),
            repository: "podcast".into(),
            request_timeout_secs: 30,
            ..Default::default()
        }
    }

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("podcast-bot-{}-{name}.conf", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn complete_config_validates() {
        assert!(Config::from(complete()).validate().is_ok());
    }

    #[test]
    fn empty_required_key_is_rejected() {
        let config = Config::from(ConfigInner { gh_password: "  ".into(), ..complete() });

        let err = config.validate().unwrap_err();

        assert!(err.to_string().contains("gh_password"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = Config::from(ConfigInner { request_timeout_secs: 0, ..complete() });

        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let missing = std::env::temp_dir().join("podcast-bot-does-not-exist.conf");

        assert!(Config::load(Some(missing.as_path())).is_err());
    }

    #[test]
    fn yaml_document_loads_with_defaults() {
        let path = write_temp(
            "ok",
            "username: podcastbot\npassword: hunter2\ngh_username: octocat\ngh_password: token\nrepo_owner: sysadmin\nrepository: podcast\nreply: true\n",
        );

        let config = Config::load(Some(path.as_path())).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.username, "podcastbot");
        assert!(config.reply);
        assert_eq!(config.reply_postfix, "");
        assert_eq!(config.github_api_base, "https://api.github.com");
        assert_eq!(config.profile_domain, "reddit.com");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn malformed_document_is_an_error() {
        let path = write_temp("bad", "username: [unterminated\n");

        let result = Config::load(Some(path.as_path()));
        std::fs::remove_file(&path).unwrap();

        assert!(result.is_err());
    }
}
