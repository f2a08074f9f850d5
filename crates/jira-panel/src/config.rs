use anyhow::{anyhow, Result};
use directories::{BaseDirs, ProjectDirs};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_NAME: &str = "jira-panel";
const LOCAL_CONFIG_FILE_NAME: &str = "jira-panel.toml";
pub const ENV_PREFIX: &str = "JIRA_PANEL_";

/// Panel configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Netscape cookie jar the workspace resolver reads
    pub cookies: Option<PathBuf>,
    /// Explicit workspace URL; bypasses the resolver
    pub base_url: Option<String>,
    /// HTTP timeout in seconds
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cookies: None,
            base_url: None,
            timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        let explicit_path = config_path.as_deref();
        if let Some(path) = explicit_path {
            if !path.exists() {
                return Err(anyhow!("Config file not found: {}", path.display()));
            }
        }

        for path in config_paths(explicit_path) {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX));

        figment
            .extract()
            .map_err(|e| anyhow!("Failed to load config: {}", e))
    }

    pub fn merge_with_cli(&mut self, cli_cookies: Option<PathBuf>, cli_base_url: Option<String>) {
        if let Some(cookies) = cli_cookies {
            self.cookies = Some(cookies);
        }
        if let Some(base_url) = cli_base_url {
            self.base_url = Some(base_url);
        }
    }

    /// Workspace discovery needs either an explicit URL or a cookie jar
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_none() && self.cookies.is_none() {
            return Err(anyhow!(
                "No Jira session configured. Set --cookies, {}COOKIES env var, or config file (or pass --base-url)",
                ENV_PREFIX
            ));
        }
        if self.timeout_secs == 0 {
            return Err(anyhow!("timeout_secs must be greater than zero"));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Candidate config files in merge order (later files override earlier ones)
pub fn config_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(path) = explicit {
        paths.push(path.to_path_buf());
        return paths;
    }

    if let Some(path) = get_project_config_path() {
        push_unique(&mut paths, path);
    }
    if let Some(path) = get_xdg_config_path() {
        push_unique(&mut paths, path);
    }
    if let Some(path) = get_local_config_path() {
        push_unique(&mut paths, path);
    }

    paths
}

fn push_unique(paths: &mut Vec<PathBuf>, path: PathBuf) {
    if !paths.contains(&path) {
        paths.push(path);
    }
}

fn get_project_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|d| d.config_dir().join("config.toml"))
}

fn get_xdg_config_path() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(dir).join(APP_NAME).join("config.toml"));
    }

    BaseDirs::new().map(|dirs| {
        dirs.home_dir()
            .join(".config")
            .join(APP_NAME)
            .join("config.toml")
    })
}

fn get_local_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|dir| dir.join(LOCAL_CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_values_override_config() {
        let mut config = Config {
            cookies: Some(PathBuf::from("/from/file.txt")),
            base_url: None,
            timeout_secs: 30,
        };
        config.merge_with_cli(None, Some("https://acme.atlassian.net".to_string()));
        assert_eq!(config.cookies, Some(PathBuf::from("/from/file.txt")));
        assert_eq!(config.base_url.as_deref(), Some("https://acme.atlassian.net"));
    }

    #[test]
    fn validate_requires_a_session_source() {
        assert!(Config::default().validate().is_err());

        let config = Config {
            base_url: Some("https://acme.atlassian.net".to_string()),
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn explicit_path_is_the_only_candidate() {
        let path = Path::new("/tmp/panel.toml");
        assert_eq!(config_paths(Some(path)), vec![path.to_path_buf()]);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = Config::load(Some(PathBuf::from("/nonexistent/jira-panel.toml"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn explicit_file_is_loaded() {
        let dir = std::env::temp_dir().join(format!("jira-panel-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(
            &path,
            "cookies = \"/home/me/cookies.txt\"\ntimeout_secs = 5\n",
        )
        .unwrap();

        let config = Config::load(Some(path)).unwrap();
        assert_eq!(config.cookies, Some(PathBuf::from("/home/me/cookies.txt")));
        assert_eq!(config.timeout(), Duration::from_secs(5));

        std::fs::remove_dir_all(&dir).ok();
    }
}
