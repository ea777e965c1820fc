//! Account and profile handlers.
//!
//! ```text
//! POST /signup {"email":"ada@example.com","password":"secret1","name":"Ada"}
//! POST /signin {"email":"ada@example.com","password":"secret1"}
//! GET /users
//! GET /users/me
//! GET /users/{userId}
//! PATCH /users/me {"about":"Analyst"}
//! PATCH /users/me/avatar {"avatar":"https://example.com/ada.png"}
//! ```
//!
//! Everything except `/signup` and `/signin` requires a bearer token.

use actix_web::{HttpResponse, get, patch, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{
    AvatarUrl, LoginCredentials, LoginValidationError, ProfileUpdate, Registration, SignIn,
    User, UserValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{reject, user_id_from_path};

/// Signup request body for `POST /signup`.
///
/// Omitted profile fields take their defaults.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SignupRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "secret1", min_length = 6)]
    pub password: String,
    #[schema(min_length = 2, max_length = 30)]
    pub name: Option<String>,
    #[schema(min_length = 2, max_length = 200)]
    pub about: Option<String>,
    pub avatar: Option<String>,
}

impl TryFrom<SignupRequest> for Registration {
    type Error = UserValidationError;

    fn try_from(value: SignupRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            &value.email,
            &value.password,
            value.name.as_deref(),
            value.about.as_deref(),
            value.avatar.as_deref(),
        )
    }
}

/// Signin request body for `POST /signin`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SigninRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "secret1")]
    pub password: String,
}

impl TryFrom<SigninRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: SigninRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

/// Successful signin payload.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SigninResponse {
    /// Bearer token for the `Authorization` header.
    pub token: String,
    pub name: String,
    pub email: String,
}

impl From<SignIn> for SigninResponse {
    fn from(value: SignIn) -> Self {
        Self {
            token: value.token.as_str().to_owned(),
            name: value.user.name().to_string(),
            email: value.user.email().to_string(),
        }
    }
}

/// Partial profile edit for `PATCH /users/me`; at least one field is required.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProfilePatchRequest {
    #[schema(min_length = 2, max_length = 30)]
    pub name: Option<String>,
    #[schema(min_length = 2, max_length = 200)]
    pub about: Option<String>,
}

impl TryFrom<ProfilePatchRequest> for ProfileUpdate {
    type Error = UserValidationError;

    fn try_from(value: ProfilePatchRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(value.name.as_deref(), value.about.as_deref())
    }
}

/// Avatar replacement for `PATCH /users/me/avatar`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AvatarRequest {
    #[schema(example = "https://example.com/ada.png")]
    pub avatar: String,
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let registration = Registration::try_from(payload.into_inner()).map_err(reject)?;
    let user = state.registration.register(registration).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Exchange email and password for a bearer token.
///
/// An unknown email and a wrong password produce the same response.
#[utoipa::path(
    post,
    path = "/signin",
    request_body = SigninRequest,
    responses(
        (status = 200, description = "Signed in", body = SigninResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Incorrect email or password", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "signin",
    security([])
)]
#[post("/signin")]
pub async fn signin(
    state: web::Data<HttpState>,
    payload: web::Json<SigninRequest>,
) -> ApiResult<web::Json<SigninResponse>> {
    let credentials = LoginCredentials::try_from(payload.into_inner()).map_err(reject)?;
    let sign_in = state.login.login(&credentials).await?;
    Ok(web::Json(SigninResponse::from(sign_in)))
}

/// List every registered profile.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Profiles", body = [UserSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    _auth: Authenticated,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<User>>> {
    Ok(web::Json(state.users.list_users().await?))
}

/// Return the caller's own profile.
#[utoipa::path(
    get,
    path = "/users/me",
    responses(
        (status = 200, description = "Own profile", body = UserSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Account no longer exists", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    auth: Authenticated,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<User>> {
    Ok(web::Json(state.users.find_user(auth.subject_id()).await?))
}

/// Return a profile by id.
#[utoipa::path(
    get,
    path = "/users/{userId}",
    params(("userId" = String, Path, description = "User identifier (UUID)")),
    responses(
        (status = 200, description = "Profile", body = UserSchema),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No such user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{userId}")]
pub async fn get_user(
    _auth: Authenticated,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let id = user_id_from_path(&path)?;
    Ok(web::Json(state.users.find_user(&id).await?))
}

/// Change the caller's name and/or about text.
#[utoipa::path(
    patch,
    path = "/users/me",
    request_body = ProfilePatchRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Account no longer exists", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateProfile"
)]
#[patch("/users/me")]
pub async fn update_profile(
    auth: Authenticated,
    state: web::Data<HttpState>,
    payload: web::Json<ProfilePatchRequest>,
) -> ApiResult<web::Json<User>> {
    let update = ProfileUpdate::try_from(payload.into_inner()).map_err(reject)?;
    let user = state.profile.update_profile(auth.context(), &update).await?;
    Ok(web::Json(user))
}

/// Replace the caller's avatar.
#[utoipa::path(
    patch,
    path = "/users/me/avatar",
    request_body = AvatarRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Account no longer exists", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateAvatar"
)]
#[patch("/users/me/avatar")]
pub async fn update_avatar(
    auth: Authenticated,
    state: web::Data<HttpState>,
    payload: web::Json<AvatarRequest>,
) -> ApiResult<web::Json<User>> {
    let avatar = AvatarUrl::new(payload.into_inner().avatar).map_err(reject)?;
    let user = state.profile.update_avatar(auth.context(), &avatar).await?;
    Ok(web::Json(user))
}
