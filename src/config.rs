use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub wordpress: WpConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub log_level: Option<String>,
}

/// Connection settings for the remote WordPress site, read once at
/// startup and passed to the HTTP client at construction.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WpConfig {
    /// Site base URL; the REST namespace prefix is appended per request.
    pub base_url: String,
    /// Account username. Empty disables authentication.
    pub username: String,
    /// Application password generated in the WordPress admin UI.
    pub app_password: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                log_level: Some("info".to_string()),
            },
            wordpress: WpConfig {
                base_url: "http://localhost:8080".to_string(),
                username: String::new(),
                app_password: String::new(),
                timeout_seconds: Some(30),
            },
        }
    }
}

impl Settings {
    /// Layered load: defaults, then an optional TOML file, then
    /// environment variables. Environment wins.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&Settings::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path));
        } else {
            for candidate in ["wp-mcp.toml", "config/wp-mcp.toml"] {
                if std::path::Path::new(candidate).exists() {
                    builder = builder.add_source(config::File::with_name(candidate));
                    break;
                }
            }
        }

        let mut settings: Settings = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        if let Ok(url) = std::env::var("WP_BASE_URL") {
            settings.wordpress.base_url = url;
        }
        if let Ok(username) = std::env::var("WP_USERNAME") {
            settings.wordpress.username = username;
        }
        if let Ok(password) = std::env::var("WP_APP_PASSWORD") {
            settings.wordpress.app_password = password;
        }

        Ok(settings)
    }

    /// Write a commented sample configuration next to the binary.
    pub fn generate_sample_config() -> Result<()> {
        let sample = Settings {
            server: ServerConfig {
                log_level: Some("info".to_string()),
            },
            wordpress: WpConfig {
                base_url: "https://your-wordpress-site.com".to_string(),
                username: "your_username".to_string(),
                app_password: "your_application_password".to_string(),
                timeout_seconds: Some(30),
            },
        };

        let toml_content = toml::to_string_pretty(&sample)?;

        let sample_content = format!(
            r#"# wp-mcp configuration file
#
# Save this file as wp-mcp.toml. Environment variables override file
# values: WP_BASE_URL, WP_USERNAME, WP_APP_PASSWORD.

{}
# [wordpress]
# base_url = WordPress site URL
# username = WordPress account username
# app_password = Application Password (generated in the admin UI under
#   Users > Profile > Application Passwords)
# timeout_seconds = per-request timeout
#
# Leaving username and app_password empty sends unauthenticated requests.
"#,
            toml_content
        );

        std::fs::write("wp-mcp.toml.example", sample_content)?;
        eprintln!("Wrote sample configuration to wp-mcp.toml.example");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_unauthenticated_localhost() {
        let settings = Settings::default();
        assert_eq!(settings.wordpress.base_url, "http://localhost:8080");
        assert!(settings.wordpress.username.is_empty());
        assert!(settings.wordpress.app_password.is_empty());
    }
}
