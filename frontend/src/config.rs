use taurus_funnel::config::FirebaseProject;
use taurus_funnel::{Environment, FunnelConfig};

/// Site configuration: compiled-in overrides, with the environment picked from the page host.
pub fn load() -> FunnelConfig {
    let host = web_sys::window()
        .and_then(|w| w.location().hostname().ok())
        .unwrap_or_default();

    let mut config = match option_env!("TAURUS_FUNNEL_CONFIG") {
        Some(json) => FunnelConfig::from_json(json).unwrap_or_else(|e| {
            log::error!("Ignoring TAURUS_FUNNEL_CONFIG: {}", e);
            FunnelConfig::default()
        }),
        None => FunnelConfig::default(),
    };
    config.environment = Environment::from_host(&host);
    if config.firebase.is_none() {
        config.firebase = firebase_from_env();
    }

    log::info!(
        "Funnel configured for {} ({:?})",
        if host.is_empty() { "<unknown host>" } else { &host },
        config.environment
    );
    config
}

fn firebase_from_env() -> Option<FirebaseProject> {
    Some(FirebaseProject {
        project_id: option_env!("TAURUS_FIREBASE_PROJECT_ID")?.to_string(),
        api_key: option_env!("TAURUS_FIREBASE_API_KEY")?.to_string(),
        storage_bucket: option_env!("TAURUS_FIREBASE_STORAGE_BUCKET")?.to_string(),
    })
}
