use thiserror::Error;

/// Classification of a failure reported by the document store or blob storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendErrorCode {
    PermissionDenied,
    Unauthenticated,
    Other(String),
}

impl BackendErrorCode {
    /// Maps a REST `status` string (e.g. `PERMISSION_DENIED`) and the HTTP status
    /// code to a classification. The explicit status wins over the HTTP code.
    pub fn classify(status: Option<&str>, http_status: u16) -> Self {
        match status {
            Some("PERMISSION_DENIED") => BackendErrorCode::PermissionDenied,
            Some("UNAUTHENTICATED") => BackendErrorCode::Unauthenticated,
            Some(other) if !other.is_empty() => BackendErrorCode::Other(other.to_string()),
            _ => match http_status {
                403 => BackendErrorCode::PermissionDenied,
                401 => BackendErrorCode::Unauthenticated,
                code => BackendErrorCode::Other(format!("HTTP_{}", code)),
            },
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmissionError {
    #[error("Firebase non initialisé")]
    BackendUnavailable,
    #[error("{0}")]
    Transport(String),
    #[error("Erreur lors de l'envoi vers le serveur de test (HTTP {0})")]
    RelayRejected(u16),
    #[error("{message}")]
    Backend {
        code: BackendErrorCode,
        message: String,
    },
    #[error("Impossible d'encoder les données : {0}")]
    Encoding(String),
}

impl SubmissionError {
    /// Status line shown under a form when a submission fails.
    pub fn user_message(&self) -> String {
        match self {
            SubmissionError::BackendUnavailable => {
                "Erreur : Firebase non initialisé. Veuillez recharger la page.".to_string()
            }
            SubmissionError::Backend { code: BackendErrorCode::PermissionDenied, .. } => {
                "Erreur : Permissions Firebase insuffisantes. Vérifiez les règles Firestore/Storage."
                    .to_string()
            }
            SubmissionError::Backend { code: BackendErrorCode::Unauthenticated, .. } => {
                "Erreur : Authentification requise. Configurez les règles Firebase pour autoriser l'accès public."
                    .to_string()
            }
            other => format!("Erreur : {}", other),
        }
    }
}

impl From<serde_json::Error> for SubmissionError {
    fn from(e: serde_json::Error) -> Self {
        SubmissionError::Encoding(e.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Failed to write key {key}: {reason}")]
    Write { key: String, reason: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid URL for {field}: {reason}")]
    InvalidUrl { field: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_prefers_rest_status() {
        assert_eq!(
            BackendErrorCode::classify(Some("PERMISSION_DENIED"), 400),
            BackendErrorCode::PermissionDenied
        );
        assert_eq!(
            BackendErrorCode::classify(Some("UNAUTHENTICATED"), 403),
            BackendErrorCode::Unauthenticated
        );
        assert_eq!(
            BackendErrorCode::classify(Some("NOT_FOUND"), 404),
            BackendErrorCode::Other("NOT_FOUND".to_string())
        );
    }

    #[test]
    fn test_classify_falls_back_to_http_status() {
        assert_eq!(BackendErrorCode::classify(None, 403), BackendErrorCode::PermissionDenied);
        assert_eq!(BackendErrorCode::classify(Some(""), 401), BackendErrorCode::Unauthenticated);
        assert_eq!(
            BackendErrorCode::classify(None, 500),
            BackendErrorCode::Other("HTTP_500".to_string())
        );
    }

    #[test]
    fn test_user_messages() {
        let denied = SubmissionError::Backend {
            code: BackendErrorCode::PermissionDenied,
            message: "Missing or insufficient permissions.".to_string(),
        };
        assert!(denied.user_message().contains("Permissions Firebase insuffisantes"));

        let unauth = SubmissionError::Backend {
            code: BackendErrorCode::Unauthenticated,
            message: "Request had invalid authentication credentials.".to_string(),
        };
        assert!(unauth.user_message().contains("Authentification requise"));

        let network = SubmissionError::Transport("Failed to fetch".to_string());
        assert_eq!(network.user_message(), "Erreur : Failed to fetch");

        assert!(SubmissionError::BackendUnavailable
            .user_message()
            .contains("Veuillez recharger la page"));
    }
}
