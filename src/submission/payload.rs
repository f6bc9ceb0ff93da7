use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const TICKET_KIND: &str = "ticket_submission";
pub const APPLICATION_KIND: &str = "vip_application";
pub const CONTACT_INTENT_KIND: &str = "contact_intent";

/// VIP offer the visitor applies for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketTier {
    Low,
    Mid,
    High,
}

impl TicketTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketTier::Low => "low",
            TicketTier::Mid => "mid",
            TicketTier::High => "high",
        }
    }

    /// Tier of an offer card, from its class list.
    pub fn from_card_classes(classes: &str) -> Option<Self> {
        classes.split_whitespace().find_map(|class| match class {
            "ticket-decouverte" => Some(TicketTier::Low),
            "ticket-taurus" => Some(TicketTier::Mid),
            "ticket-taurus-plus" => Some(TicketTier::High),
            _ => None,
        })
    }

    pub fn header(&self) -> &'static str {
        match self {
            TicketTier::Low => "Ticket Découverte",
            TicketTier::Mid => "Ticket Taurus",
            TicketTier::High => "Ticket Taurus +",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            TicketTier::Low => "Envoyer et rejoindre",
            TicketTier::Mid => "Contacte moi pour recevoir ton maillot et rejoindre le VIP",
            TicketTier::High => "Mon mail",
        }
    }

    /// Tenure, frequency and motivation are only asked below the top tier.
    pub fn shows_profile_fields(&self) -> bool {
        !matches!(self, TicketTier::High)
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            TicketTier::Low => "Inscription réussie ! Redirection...",
            TicketTier::Mid => "Merci ! Nous vous contacterons pour votre maillot et votre accès VIP.",
            TicketTier::High => "Merci ! Je te réponds dans les jours qui suivent.",
        }
    }
}

impl fmt::Display for TicketTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTier(pub String);

impl fmt::Display for UnknownTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown ticket tier: {}", self.0)
    }
}

impl std::error::Error for UnknownTier {}

impl FromStr for TicketTier {
    type Err = UnknownTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "low" => Ok(TicketTier::Low),
            "mid" => Ok(TicketTier::Mid),
            "high" => Ok(TicketTier::High),
            other => Err(UnknownTier(other.to_string())),
        }
    }
}

/// Raw values of the application form, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationForm {
    pub email: String,
    pub anciennete: String,
    pub frequence: String,
    pub why: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPayload {
    pub ticket_type: TicketTier,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anciennete: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub why: Option<String>,
}

impl ApplicationPayload {
    pub fn from_form(tier: TicketTier, form: &ApplicationForm) -> Self {
        let profile = |value: &str| tier.shows_profile_fields().then(|| value.trim().to_string());
        Self {
            ticket_type: tier,
            email: form.email.trim().to_string(),
            anciennete: profile(&form.anciennete),
            frequence: profile(&form.frequence),
            why: profile(&form.why),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageAttachment {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        let content_type = content_type.into();
        Self {
            file_name: file_name.into(),
            content_type: if content_type.is_empty() {
                "application/octet-stream".to_string()
            } else {
                content_type
            },
            bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketPayload {
    pub pseudo: String,
    pub comment: String,
    pub image: Option<ImageAttachment>,
}

impl TicketPayload {
    pub fn new(pseudo: &str, comment: &str, image: Option<ImageAttachment>) -> Self {
        Self {
            pseudo: pseudo.trim().to_string(),
            comment: comment.trim().to_string(),
            image,
        }
    }

    /// Document fields written to the store once the image (if any) is uploaded.
    pub fn document(&self, image_url: &str) -> Value {
        serde_json::json!({
            "pseudo": self.pseudo,
            "comment": self.comment,
            "imageUrl": image_url,
            "type": TICKET_KIND,
        })
    }
}

/// Serializes `payload` and adds the `type` discriminator expected downstream.
pub fn tagged<T: Serialize>(kind: &str, payload: &T) -> Result<Value, serde_json::Error> {
    let mut value = serde_json::to_value(payload)?;
    if let Value::Object(map) = &mut value {
        map.insert("type".to_string(), Value::String(kind.to_string()));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form() -> ApplicationForm {
        ApplicationForm {
            email: "  fan@example.com ".to_string(),
            anciennete: "1-3 ans".to_string(),
            frequence: " hebdo".to_string(),
            why: "  Je veux progresser  ".to_string(),
        }
    }

    #[test]
    fn test_tier_parsing() {
        assert_eq!("mid".parse::<TicketTier>(), Ok(TicketTier::Mid));
        assert!("vip".parse::<TicketTier>().is_err());
        assert_eq!(TicketTier::from_card_classes("ticket ticket-taurus-plus"), Some(TicketTier::High));
        assert_eq!(TicketTier::from_card_classes("ticket ticket-decouverte"), Some(TicketTier::Low));
        assert_eq!(TicketTier::from_card_classes("ticket"), None);
    }

    #[test]
    fn test_low_application_keeps_profile_fields() {
        let payload = ApplicationPayload::from_form(TicketTier::Low, &form());
        let value = tagged(APPLICATION_KIND, &payload).unwrap();
        assert_eq!(
            value,
            json!({
                "ticketType": "low",
                "email": "fan@example.com",
                "anciennete": "1-3 ans",
                "frequence": "hebdo",
                "why": "Je veux progresser",
                "type": "vip_application"
            })
        );
    }

    #[test]
    fn test_high_application_drops_profile_fields() {
        let payload = ApplicationPayload::from_form(TicketTier::High, &form());
        assert_eq!(payload.anciennete, None);
        let value = tagged(APPLICATION_KIND, &payload).unwrap();
        assert_eq!(
            value,
            json!({ "ticketType": "high", "email": "fan@example.com", "type": "vip_application" })
        );
    }

    #[test]
    fn test_ticket_document() {
        let ticket = TicketPayload::new(" Taurus75 ", " PSG - OM 1N ", None);
        assert_eq!(
            ticket.document(""),
            json!({ "pseudo": "Taurus75", "comment": "PSG - OM 1N", "imageUrl": "", "type": "ticket_submission" })
        );
    }

    #[test]
    fn test_attachment_default_content_type() {
        let image = ImageAttachment::new("ticket.png", "", vec![1, 2, 3]);
        assert_eq!(image.content_type, "application/octet-stream");
    }
}
