use std::{env, time::Duration};

use anyhow::{Context, Result};

/// Default Mistral model: free tier, fast, good enough for extraction.
pub const DEFAULT_MODEL: &str = "mistral-small-latest";

/// Default language passed to the weather provider for descriptions.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Fixed deadline for the weather call. No retries, a single try only.
pub const WEATHER_TIMEOUT: Duration = Duration::from_secs(5);

/// Runtime configuration, loaded from the process environment.
///
/// Both API keys are secrets and are never stored on disk by this crate;
/// the server loads a local `.env` file before calling [`Config::from_env`].
#[derive(Debug, Clone)]
pub struct Config {
    pub mistral_api_key: String,
    pub openweather_api_key: String,
    /// Mistral model id, e.g. "mistral-small-latest".
    pub model: String,
    /// Two-letter language code for weather descriptions.
    pub language: String,
}

impl Config {
    /// Load configuration from the environment, refusing to proceed if either
    /// API key is missing.
    pub fn from_env() -> Result<Self> {
        let mistral_api_key = require_env("MISTRAL_API_KEY")?;
        let openweather_api_key = require_env("OPENWEATHER_API_KEY")?;

        let model = env::var("MISTRAL_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let language = env::var("WEATHER_LANG").unwrap_or_else(|_| DEFAULT_LANGUAGE.to_string());

        Ok(Self { mistral_api_key, openweather_api_key, model, language })
    }
}

fn require_env(name: &str) -> Result<String> {
    let value = env::var(name).with_context(|| {
        format!(
            "Missing required environment variable {name}.\n\
             Hint: copy .env.example to .env and fill in your API keys."
        )
    })?;

    if value.trim().is_empty() {
        anyhow::bail!("Environment variable {name} is set but empty.");
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Serialized via a lock: `from_env` reads process-global state.
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    /// Sets or unsets one variable and restores its previous value on drop,
    /// so a failed assertion cannot leak state into other tests.
    struct EnvVarGuard {
        name: &'static str,
        previous: Option<String>,
    }

    impl EnvVarGuard {
        fn set(name: &'static str, value: &str) -> Self {
            let previous = env::var(name).ok();
            unsafe { env::set_var(name, value) };
            Self { name, previous }
        }

        fn unset(name: &'static str) -> Self {
            let previous = env::var(name).ok();
            unsafe { env::remove_var(name) };
            Self { name, previous }
        }
    }

    impl Drop for EnvVarGuard {
        fn drop(&mut self) {
            unsafe {
                match &self.previous {
                    Some(value) => env::set_var(self.name, value),
                    None => env::remove_var(self.name),
                }
            }
        }
    }

    #[test]
    fn from_env_errors_when_keys_missing() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _mistral = EnvVarGuard::unset("MISTRAL_API_KEY");
        let _weather = EnvVarGuard::unset("OPENWEATHER_API_KEY");

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("MISTRAL_API_KEY"));
    }

    #[test]
    fn from_env_applies_defaults() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _mistral = EnvVarGuard::set("MISTRAL_API_KEY", "mistral-key");
        let _weather = EnvVarGuard::set("OPENWEATHER_API_KEY", "weather-key");
        let _model = EnvVarGuard::unset("MISTRAL_MODEL");
        let _lang = EnvVarGuard::unset("WEATHER_LANG");

        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.model, DEFAULT_MODEL);
        assert_eq!(cfg.language, DEFAULT_LANGUAGE);
    }
}
