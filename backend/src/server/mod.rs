//! Server construction and middleware wiring.

mod config;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, HttpServer, web};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::debug;
use utoipa::OpenApi;

use crate::ApiDoc;
use crate::domain::TagCache;
use crate::inbound::http::auth::{
    forgot_password, get_profile, login, logout, register, reset_password, update_profile,
};
use crate::inbound::http::filters::{delete_filters, get_filters, put_filters};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::products::{
    catalogue_version, list_categories, list_products, product_detail, product_suggestions,
};
use crate::inbound::http::state::AppState;
use crate::inbound::http::tags::{invalidate_tags, popular_tags};

/// Session cookie lifetime.
const SESSION_TTL_HOURS: i64 = 2;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    app_state: web::Data<AppState>,
    key: Key,
    cookie_secure: bool,
}

async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        app_state,
        key,
        cookie_secure,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(
            PersistentSession::default()
                .session_ttl(actix_web::cookie::time::Duration::hours(SESSION_TTL_HOURS)),
        )
        .build();

    // Suggestions must register before the `{id}` matcher.
    let api = web::scope("/api/v1")
        .wrap(session)
        .service(product_suggestions)
        .service(list_products)
        .service(product_detail)
        .service(list_categories)
        .service(catalogue_version)
        .service(popular_tags)
        .service(invalidate_tags)
        .service(get_filters)
        .service(put_filters)
        .service(delete_filters)
        .service(register)
        .service(login)
        .service(logout)
        .service(get_profile)
        .service(update_profile)
        .service(forgot_password)
        .service(reset_password);

    App::new()
        .app_data(health_state)
        .app_data(app_state)
        .service(api)
        .service(ready)
        .service(live)
        .route("/api-docs/openapi.json", web::get().to(openapi_json))
}

/// Construct the HTTP server and mark readiness once it is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    app_state: web::Data<AppState>,
    key: Key,
    config: &AppConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let cookie_secure = config.cookie_secure;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            app_state: app_state.clone(),
            key: key.clone(),
            cookie_secure,
        })
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

/// Spawn the periodic tag refresh task.
///
/// The cadence is jittered by up to 10% so a fleet of instances does not
/// hammer the offers endpoint in lockstep. A refresh racing a forced one
/// is benign: both recompute the same idempotent table.
pub fn spawn_tag_refresh(cache: Arc<TagCache>, every: Duration) {
    let mut rng = SmallRng::from_entropy();
    let jitter = rng.gen_range(0..=every.as_secs().max(1) / 10);
    let period = every + Duration::from_secs(jitter);

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // The first tick fires immediately; skip it, the cache warms lazily.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            debug!("periodic tag refresh");
            let _ = cache.refresh().await;
        }
    });
}
