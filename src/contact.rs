use serde::Serialize;
use url::Url;

use crate::config::ContactConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactChannel {
    Telegram,
    Whatsapp,
}

impl ContactChannel {
    pub fn label(&self) -> &'static str {
        match self {
            ContactChannel::Telegram => "Telegram",
            ContactChannel::Whatsapp => "WhatsApp",
        }
    }
}

/// Analytics record of a click on an outbound contact link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContactIntent {
    pub channel: ContactChannel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactLink {
    pub channel: ContactChannel,
    pub href: String,
}

/// `base` with the canned message appended as the `text` query parameter.
/// Falls back to the bare base link if it does not parse as a URL.
pub fn prefilled_link(base: &str, message: &str) -> String {
    match Url::parse(base) {
        Ok(mut url) => {
            if !message.is_empty() {
                url.query_pairs_mut().append_pair("text", message);
            }
            url.to_string()
        }
        Err(e) => {
            tracing::warn!("Invalid contact link {}: {}", base, e);
            base.to_string()
        }
    }
}

pub fn contact_links(config: &ContactConfig) -> Vec<ContactLink> {
    vec![
        ContactLink {
            channel: ContactChannel::Telegram,
            href: prefilled_link(&config.telegram_url, &config.prefill_message),
        },
        ContactLink {
            channel: ContactChannel::Whatsapp,
            href: prefilled_link(&config.whatsapp_url, &config.prefill_message),
        },
    ]
}
