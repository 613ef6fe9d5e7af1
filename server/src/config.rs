use std::{env, fmt::Display, fs::read_to_string, str::FromStr};

use tracing::{info, warn};

pub struct Config {
    pub port: u16,
    pub redis_url: String,
    pub mail: MailConfig,
}

pub struct MailConfig {
    pub mode: MailMode,
    pub endpoint: String,
    pub api_key: String,
    pub to: String,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MailMode {
    /// POST the message to a mail relay API.
    Http,
    /// Log-only delivery, no mail leaves the process.
    Simulated,
}

impl FromStr for MailMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "http" => Ok(Self::Http),
            "simulated" => Ok(Self::Simulated),
            other => Err(format!("unknown mail mode: {other}")),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let mode: MailMode = try_load("MAIL_MODE", "simulated");

        // The relay key is only needed when we actually talk to a relay.
        let api_key = match mode {
            MailMode::Http => read_secret("MAIL_API_KEY"),
            MailMode::Simulated => String::new(),
        };

        Self {
            port: try_load("RUST_PORT", "8080"),
            redis_url: try_load("REDIS_URL", "redis://127.0.0.1:6379"),
            mail: mail_config(
                mode,
                env::var("MAIL_ENDPOINT").ok(),
                api_key,
                try_load("MAIL_TO", "mkhontonationalunion@gmail.com"),
            ),
        }
    }
}

/// In `http` mode the relay endpoint is mandatory; there is no sensible
/// default to fall back to.
fn mail_config(mode: MailMode, endpoint: Option<String>, api_key: String, to: String) -> MailConfig {
    let endpoint = match mode {
        MailMode::Http => {
            if endpoint.is_none() {
                warn!("MAIL_ENDPOINT is required when MAIL_MODE=http");
            }
            endpoint.expect("Environment misconfigured!")
        }
        MailMode::Simulated => endpoint.unwrap_or_default(),
    };

    MailConfig {
        mode,
        endpoint,
        api_key,
        to,
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

fn read_secret(secret_name: &str) -> String {
    let path = format!("/run/secrets/{secret_name}");

    read_to_string(&path)
        .map(|s| s.trim().to_string())
        .or_else(|e| {
            warn!("Failed to read {secret_name} from file: {e}");
            env::var(secret_name)
        })
        .map_err(|e| {
            warn!("{secret_name} not set: {e}");
        })
        .expect("Secrets misconfigured!")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_mode_uses_the_given_endpoint() {
        let config = mail_config(
            MailMode::Http,
            Some("https://relay.example/send".to_string()),
            "key".to_string(),
            "desk@example.org".to_string(),
        );

        assert_eq!(config.endpoint, "https://relay.example/send");
        assert_eq!(config.mode, MailMode::Http);
    }

    #[test]
    #[should_panic(expected = "Environment misconfigured!")]
    fn http_mode_without_endpoint_panics() {
        mail_config(
            MailMode::Http,
            None,
            "key".to_string(),
            "desk@example.org".to_string(),
        );
    }

    #[test]
    fn simulated_mode_needs_no_endpoint() {
        let config = mail_config(
            MailMode::Simulated,
            None,
            String::new(),
            "desk@example.org".to_string(),
        );

        assert!(config.endpoint.is_empty());
        assert_eq!(config.mode, MailMode::Simulated);
    }

    #[test]
    fn mail_mode_parses_known_values_only() {
        assert_eq!("http".parse::<MailMode>().unwrap(), MailMode::Http);
        assert_eq!("simulated".parse::<MailMode>().unwrap(), MailMode::Simulated);
        assert!("smtp".parse::<MailMode>().is_err());
    }
}
