//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint, the schema wrappers from
//! [`crate::inbound::http::schemas`], and the bearer token security scheme.
//! Swagger UI serves it at `/docs` in debug builds.

use crate::inbound::http::cards::CardRequest;
use crate::inbound::http::schemas::{CardSchema, ErrorCodeSchema, ErrorSchema, UserSchema};
use crate::inbound::http::users::{
    AvatarRequest, ProfilePatchRequest, SigninRequest, SigninResponse, SignupRequest,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer security scheme in the document.
pub const BEARER_SCHEME: &str = "BearerToken";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token returned by POST /signin."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Mesto backend API",
        description = "Profiles and shared cards with bearer-token authentication."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::users::signup,
        crate::inbound::http::users::signin,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_profile,
        crate::inbound::http::users::update_avatar,
        crate::inbound::http::cards::list_cards,
        crate::inbound::http::cards::create_card,
        crate::inbound::http::cards::get_card,
        crate::inbound::http::cards::delete_card,
        crate::inbound::http::cards::like_card,
        crate::inbound::http::cards::unlike_card,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        CardSchema,
        ErrorSchema,
        ErrorCodeSchema,
        SignupRequest,
        SigninRequest,
        SigninResponse,
        ProfilePatchRequest,
        AvatarRequest,
        CardRequest,
    )),
    tags(
        (name = "users", description = "Accounts and profiles"),
        (name = "cards", description = "Shared cards and likes"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
