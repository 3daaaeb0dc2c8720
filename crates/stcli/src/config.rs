//! CLI configuration: TOML profiles with flag and environment overrides.
//!
//! A profile supplies a token and optional base URL; the `--token` and
//! `--url` flags (and their environment variables) always win over the
//! profile's values.

use std::collections::HashMap;
use std::path::PathBuf;

use figment::Figment;
use figment::providers::{Format, Toml};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use stcli_api::{ApiClient, TransportConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// On-disk configuration file shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub default_profile: Option<String>,

    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

/// One named connection profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    pub token: Option<String>,
    pub url: Option<String>,
}

/// Path to the configuration file.
pub fn config_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "stcli")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from(".stcli/config.toml"))
}

/// Load configuration, treating a missing or unreadable file as empty.
pub fn load_config_or_default() -> Config {
    let path = config_path();
    match Figment::new().merge(Toml::file(&path)).extract() {
        Ok(config) => config,
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "no usable config file");
            Config::default()
        }
    }
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build an authenticated API client from flags, env, and config.
pub fn build_client(global: &GlobalOpts) -> Result<ApiClient, CliError> {
    let config = load_config_or_default();
    let profile_name = active_profile_name(global, &config);
    let profile = config.profiles.get(&profile_name);

    let token = global
        .token
        .clone()
        .or_else(|| profile.and_then(|p| p.token.clone()))
        .ok_or_else(|| CliError::MissingToken {
            profile: profile_name,
            config_path: config_path().display().to_string(),
        })?;

    let url = global
        .url
        .clone()
        .or_else(|| profile.and_then(|p| p.url.clone()))
        .unwrap_or_else(|| stcli_api::DEFAULT_BASE_URL.to_owned());

    let client = ApiClient::from_token(
        &url,
        &SecretString::from(token),
        &TransportConfig::default(),
    )?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global_with_profile(profile: Option<&str>) -> GlobalOpts {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            global: GlobalOpts,
        }

        let mut argv = vec!["stcli".to_string()];
        if let Some(name) = profile {
            argv.push("--profile".into());
            argv.push(name.into());
        }
        Wrapper::parse_from(argv).global
    }

    #[test]
    fn profile_name_resolution_order() {
        let mut config = Config::default();
        assert_eq!(
            active_profile_name(&global_with_profile(None), &config),
            "default"
        );

        config.default_profile = Some("home".into());
        assert_eq!(
            active_profile_name(&global_with_profile(None), &config),
            "home"
        );

        assert_eq!(
            active_profile_name(&global_with_profile(Some("work")), &config),
            "work"
        );
    }

    #[test]
    fn config_parses_profiles_table() {
        let config: Config = toml::from_str(
            r#"
            default_profile = "home"

            [profiles.home]
            token = "tok-1"

            [profiles.staging]
            token = "tok-2"
            url = "https://staging.example.com"
            "#,
        )
        .unwrap();
        assert_eq!(config.default_profile.as_deref(), Some("home"));
        assert_eq!(
            config.profiles["staging"].url.as_deref(),
            Some("https://staging.example.com")
        );
    }
}
