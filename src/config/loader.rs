// Configuration loader
// Loads settings from ~/.helpdesk-router/config.toml, with the API key
// falling back to environment variables

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::provider::ProviderKind;
use super::settings::Config;
use crate::errors::{api_key_missing_error, config_parse_error};

/// Default config location
pub fn default_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".helpdesk-router").join("config.toml"))
}

/// Load configuration from the given file (or the default location) and
/// fill in the API key from the environment when the file has none
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };

    let mut config = match try_load_from_file(&config_path)? {
        Some(config) => config,
        None if path.is_some() => {
            bail!("Config file not found: {}", config_path.display());
        }
        None => Config::default(),
    };

    if !config.provider.has_api_key() {
        apply_env_api_key(&mut config, |name| std::env::var(name).ok());
    }

    if !config.provider.has_api_key() {
        bail!(api_key_missing_error(&config_path.display().to_string()));
    }

    Ok(config)
}

/// Parse a config file without resolving the API key
pub fn try_load_from_file(path: &Path) -> Result<Option<Config>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config: Config = toml::from_str(&contents).map_err(|e| {
        anyhow::anyhow!(config_parse_error(&path.display().to_string(), &e.to_string()))
    })?;

    Ok(Some(config))
}

/// Take the key for the configured provider from the environment; with no
/// file-level provider choice, a lone OPENAI_API_KEY switches the backend
fn apply_env_api_key(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    let configured = config.provider.kind;
    let candidates = match configured {
        ProviderKind::Gemini => [ProviderKind::Gemini, ProviderKind::OpenAI],
        ProviderKind::OpenAI => [ProviderKind::OpenAI, ProviderKind::Gemini],
    };

    for kind in candidates {
        if kind != configured && config.provider.model.is_some() {
            // A pinned model only makes sense for the configured provider
            continue;
        }
        if let Some(key) = lookup(kind.api_key_env()) {
            if !key.trim().is_empty() {
                config.provider.kind = kind;
                config.provider.api_key = key;
                config.provider.api_key_from_env = true;
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_file_with_key() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [provider]
            kind = "gemini"
            api_key = "AI-test"
            model = "gemini-2.0-flash"

            [metrics]
            history_capacity = 50
            "#
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.provider.api_key, "AI-test");
        assert_eq!(config.provider.model.as_deref(), Some("gemini-2.0-flash"));
        assert_eq!(config.metrics.history_capacity, 50);
    }

    #[test]
    fn test_file_key_is_not_marked_as_env() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[provider]\napi_key = \"AI-file\"").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert!(!config.provider.api_key_from_env);
    }

    #[test]
    fn test_env_key_is_recorded() {
        let mut config = Config::default();
        apply_env_api_key(&mut config, |name| {
            (name == "GEMINI_API_KEY").then(|| "AI-env".to_string())
        });

        assert_eq!(config.provider.kind, ProviderKind::Gemini);
        assert_eq!(config.provider.api_key, "AI-env");
        assert!(config.provider.api_key_from_env);
    }

    #[test]
    fn test_lone_openai_env_key_switches_provider() {
        let mut config = Config::default();
        apply_env_api_key(&mut config, |name| {
            (name == "OPENAI_API_KEY").then(|| "sk-env".to_string())
        });

        assert_eq!(config.provider.kind, ProviderKind::OpenAI);
        assert!(config.provider.api_key_from_env);
    }

    #[test]
    fn test_blank_env_key_is_ignored() {
        let mut config = Config::default();
        apply_env_api_key(&mut config, |_| Some("   ".to_string()));

        assert!(!config.provider.has_api_key());
        assert!(!config.provider.api_key_from_env);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_config(Some(&missing)).is_err());
    }

    #[test]
    fn test_invalid_toml_reports_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[provider\nkind = ").unwrap();

        let err = try_load_from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
