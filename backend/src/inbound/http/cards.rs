//! Card handlers.
//!
//! ```text
//! GET /cards
//! POST /cards {"name":"Elbrus","link":"https://example.com/elbrus.jpg"}
//! GET /cards/{cardId}
//! DELETE /cards/{cardId}
//! PUT /cards/{cardId}/likes
//! DELETE /cards/{cardId}/likes
//! ```
//!
//! Every route requires a bearer token. Only the owner may delete a card;
//! likes are idempotent for any authenticated user.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Card, CardValidationError, NewCard};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::schemas::{CardSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{card_id_from_path, reject};

/// Request body for `POST /cards`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CardRequest {
    #[schema(example = "Elbrus", min_length = 2, max_length = 30)]
    pub name: String,
    #[schema(example = "https://example.com/elbrus.jpg")]
    pub link: String,
}

impl TryFrom<CardRequest> for NewCard {
    type Error = CardValidationError;

    fn try_from(value: CardRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.name, &value.link)
    }
}

/// List every card, newest first.
#[utoipa::path(
    get,
    path = "/cards",
    responses(
        (status = 200, description = "Cards", body = [CardSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["cards"],
    operation_id = "listCards"
)]
#[get("/cards")]
pub async fn list_cards(
    _auth: Authenticated,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Card>>> {
    Ok(web::Json(state.cards.list_cards().await?))
}

/// Post a new card owned by the caller.
#[utoipa::path(
    post,
    path = "/cards",
    request_body = CardRequest,
    responses(
        (status = 201, description = "Card created", body = CardSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["cards"],
    operation_id = "createCard"
)]
#[post("/cards")]
pub async fn create_card(
    auth: Authenticated,
    state: web::Data<HttpState>,
    payload: web::Json<CardRequest>,
) -> ApiResult<HttpResponse> {
    let new_card = NewCard::try_from(payload.into_inner()).map_err(reject)?;
    let card = state
        .cards_command
        .create_card(auth.context(), new_card)
        .await?;
    Ok(HttpResponse::Created().json(card))
}

/// Return a card by id.
#[utoipa::path(
    get,
    path = "/cards/{cardId}",
    params(("cardId" = String, Path, description = "Card identifier (UUID)")),
    responses(
        (status = 200, description = "Card", body = CardSchema),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No such card", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["cards"],
    operation_id = "getCard"
)]
#[get("/cards/{cardId}")]
pub async fn get_card(
    _auth: Authenticated,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Card>> {
    let id = card_id_from_path(&path)?;
    Ok(web::Json(state.cards.find_card(&id).await?))
}

/// Delete a card the caller owns and return it.
#[utoipa::path(
    delete,
    path = "/cards/{cardId}",
    params(("cardId" = String, Path, description = "Card identifier (UUID)")),
    responses(
        (status = 200, description = "Deleted card", body = CardSchema),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Card belongs to another user", body = ErrorSchema),
        (status = 404, description = "No such card", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["cards"],
    operation_id = "deleteCard"
)]
#[delete("/cards/{cardId}")]
pub async fn delete_card(
    auth: Authenticated,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Card>> {
    let id = card_id_from_path(&path)?;
    let card = state.cards_command.delete_card(auth.context(), &id).await?;
    Ok(web::Json(card))
}

/// Add the caller to the card's likers.
#[utoipa::path(
    put,
    path = "/cards/{cardId}/likes",
    params(("cardId" = String, Path, description = "Card identifier (UUID)")),
    responses(
        (status = 200, description = "Card after the like", body = CardSchema),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No such card", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["cards"],
    operation_id = "likeCard"
)]
#[put("/cards/{cardId}/likes")]
pub async fn like_card(
    auth: Authenticated,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Card>> {
    let id = card_id_from_path(&path)?;
    let card = state.cards_command.like_card(auth.context(), &id).await?;
    Ok(web::Json(card))
}

/// Remove the caller from the card's likers.
#[utoipa::path(
    delete,
    path = "/cards/{cardId}/likes",
    params(("cardId" = String, Path, description = "Card identifier (UUID)")),
    responses(
        (status = 200, description = "Card after the unlike", body = CardSchema),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No such card", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["cards"],
    operation_id = "unlikeCard"
)]
#[delete("/cards/{cardId}/likes")]
pub async fn unlike_card(
    auth: Authenticated,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Card>> {
    let id = card_id_from_path(&path)?;
    let card = state.cards_command.unlike_card(auth.context(), &id).await?;
    Ok(web::Json(card))
}
