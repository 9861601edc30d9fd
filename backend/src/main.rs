//! Backend entry-point: wires the offer source, caches, and REST endpoints.

use std::env;
use std::sync::Arc;

use actix_web::cookie::Key;
use actix_web::web;
use mockable::DefaultClock;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::domain::auth::AccountRegistry;
use backend::domain::ports::OfferSource;
use backend::domain::{CatalogueService, TagCache};
use backend::inbound::http::health::HealthState;
use backend::inbound::http::state::AppState;
use backend::outbound::offers::OffersHttpSource;
use backend::server::{AppConfig, create_server, spawn_tag_refresh};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::from_env();
    let key = session_key()?;

    let source: Arc<dyn OfferSource> = Arc::new(
        OffersHttpSource::new(config.offers_base_url.clone())
            .map_err(|e| std::io::Error::other(format!("offer source client failed: {e}")))?,
    );
    let clock = Arc::new(DefaultClock);
    let tags = Arc::new(TagCache::new(
        Arc::clone(&source),
        clock.clone(),
        config.tag_ttl,
    ));
    let app_state = web::Data::new(AppState::new(
        CatalogueService::new(source),
        Arc::clone(&tags),
        Arc::new(AccountRegistry::new(clock)),
    ));

    spawn_tag_refresh(tags, config.tag_refresh_interval);

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, app_state, key, &config)?.await
}

/// Read the session key from `SESSION_KEY_FILE`, or generate a temporary
/// one when explicitly allowed (always allowed in debug builds).
fn session_key() -> std::io::Result<Key> {
    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )))
            }
        }
    }
}
