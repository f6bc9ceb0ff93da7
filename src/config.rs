use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

/// Which submission path the site uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    /// Loopback host names mean the site is served from a developer machine.
    pub fn from_host(host: &str) -> Self {
        match host.trim().to_ascii_lowercase().as_str() {
            "localhost" | "127.0.0.1" | "::1" | "[::1]" => Environment::Development,
            _ => Environment::Production,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionNames {
    pub applications: String,
    pub tickets: String,
    pub contact_intents: String,
}

impl Default for CollectionNames {
    fn default() -> Self {
        Self {
            applications: "vip_applications".to_string(),
            tickets: "tickets".to_string(),
            contact_intents: "contact_intents".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub telegram_url: String,
    pub whatsapp_url: String,
    pub prefill_message: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            telegram_url: "https://t.me/TaurusBetTelegram".to_string(),
            whatsapp_url: "https://wa.me/0783798669".to_string(),
            prefill_message:
                "Salut Taurus, je veux rejoindre le VIP via le Mid Ticket (Celsius / 40€ résiliable)."
                    .to_string(),
        }
    }
}

/// Public identity of the Firebase project used as the production sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirebaseProject {
    pub project_id: String,
    pub api_key: String,
    pub storage_bucket: String,
}

/// Everything the site needs to know about its surroundings, built once at start-up
/// and handed down to the components that need it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunnelConfig {
    pub relay_endpoint: String,
    pub environment: Environment,
    pub invite_url: String,
    pub storage_folder: String,
    pub collections: CollectionNames,
    pub contact: ContactConfig,
    pub firebase: Option<FirebaseProject>,
}

impl Default for FunnelConfig {
    fn default() -> Self {
        Self {
            relay_endpoint: "https://httpbin.org/post".to_string(),
            environment: Environment::Production,
            invite_url: "https://t.me/+Ltq0JPVy73E0ZTU0".to_string(),
            storage_folder: "ticket_images".to_string(),
            collections: CollectionNames::default(),
            contact: ContactConfig::default(),
            firebase: None,
        }
    }
}

impl FunnelConfig {
    /// Default configuration with the environment derived from the page host.
    pub fn for_host(host: &str) -> Self {
        Self {
            environment: Environment::from_host(host),
            ..Self::default()
        }
    }

    /// Parses a (possibly partial) JSON override; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: FunnelConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let urls = [
            ("relay_endpoint", &self.relay_endpoint),
            ("invite_url", &self.invite_url),
            ("contact.telegram_url", &self.contact.telegram_url),
            ("contact.whatsapp_url", &self.contact.whatsapp_url),
        ];
        for (field, value) in urls {
            Url::parse(value).map_err(|e| ConfigError::InvalidUrl {
                field,
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_host() {
        assert_eq!(Environment::from_host("localhost"), Environment::Development);
        assert_eq!(Environment::from_host("127.0.0.1"), Environment::Development);
        assert_eq!(Environment::from_host("[::1]"), Environment::Development);
        assert_eq!(Environment::from_host("LOCALHOST"), Environment::Development);
        assert_eq!(Environment::from_host("taurusbet.fr"), Environment::Production);
        assert_eq!(Environment::from_host(""), Environment::Production);
    }

    #[test]
    fn test_for_host_keeps_defaults() {
        let config = FunnelConfig::for_host("localhost");
        assert!(config.is_development());
        assert_eq!(config.collections.tickets, "tickets");
        assert_eq!(config.storage_folder, "ticket_images");
        assert!(config.firebase.is_none());
    }

    #[test]
    fn test_partial_json_override() {
        let config = FunnelConfig::from_json(
            r#"{
                "invite_url": "https://t.me/+example",
                "collections": { "tickets": "tickets_staging" },
                "firebase": { "project_id": "demo", "api_key": "key", "storage_bucket": "demo.appspot.com" }
            }"#,
        )
        .unwrap();
        assert_eq!(config.invite_url, "https://t.me/+example");
        assert_eq!(config.collections.tickets, "tickets_staging");
        assert_eq!(config.collections.applications, "vip_applications");
        assert_eq!(config.firebase.unwrap().project_id, "demo");
        assert_eq!(config.environment, Environment::Production);
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let err = FunnelConfig::from_json(r#"{ "relay_endpoint": "not a url" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { field: "relay_endpoint", .. }));
    }
}
