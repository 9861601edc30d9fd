//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] aggregates every HTTP endpoint and the schemas their payloads
//! reference. The generated document is served from
//! `GET /api-docs/openapi.json` for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::auth::{AccountProfile, NewAccount, ProfileUpdate};
use crate::domain::criteria::{CategoryFilter, FilterCriteria};
use crate::domain::product::{
    Category, Condition, Currency, PriceType, Product, ProductImage, ProductStats,
    SellerSnapshot, Status,
};
use crate::domain::{Country, SortKey};
use crate::inbound::http::auth::{ForgotPasswordRequest, LoginRequest, ResetPasswordRequest};
use crate::inbound::http::error::MessageResponse;
use crate::inbound::http::filters::FilterStateResponse;
use crate::inbound::http::products::{CatalogueVersion, CategoryOption, ProductPageResponse};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the marketplace catalogue API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Marketplace catalogue API",
        description = "Product browsing, filtering, popular tags, and session authentication.",
        license(name = "MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::products::list_products,
        crate::inbound::http::products::product_suggestions,
        crate::inbound::http::products::product_detail,
        crate::inbound::http::products::list_categories,
        crate::inbound::http::products::catalogue_version,
        crate::inbound::http::tags::popular_tags,
        crate::inbound::http::tags::invalidate_tags,
        crate::inbound::http::filters::get_filters,
        crate::inbound::http::filters::put_filters,
        crate::inbound::http::filters::delete_filters,
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::get_profile,
        crate::inbound::http::auth::update_profile,
        crate::inbound::http::auth::forgot_password,
        crate::inbound::http::auth::reset_password,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Product,
        ProductImage,
        ProductStats,
        SellerSnapshot,
        Category,
        Condition,
        Currency,
        PriceType,
        Status,
        Country,
        SortKey,
        FilterCriteria,
        CategoryFilter,
        ProductPageResponse,
        CategoryOption,
        CatalogueVersion,
        FilterStateResponse,
        MessageResponse,
        AccountProfile,
        NewAccount,
        ProfileUpdate,
        LoginRequest,
        ForgotPasswordRequest,
        ResetPasswordRequest,
    )),
    tags(
        (name = "products", description = "Catalogue browsing and search"),
        (name = "tags", description = "Popular tag cache"),
        (name = "filters", description = "Session-persisted filter state"),
        (name = "auth", description = "Accounts and sessions"),
        (name = "health", description = "Orchestration probes")
    )
)]
pub struct ApiDoc;
