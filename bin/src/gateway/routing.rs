//! Request routing and the JSON API handlers.

use std::{convert::Infallible, sync::Arc};

use clubchain_sui::{
    authorize,
    config::is_valid_id,
    contracts::{self, NewEvent},
    now_ms,
};
use http_body_util::{BodyExt, Limited};
use hyper::{Method, Request, Response};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use tracing::{info, info_span, Instrument};

use super::{
    response::{self, ApiError, Body},
    Gateway,
};

/// Largest request body accepted.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// `POST /api/events/create` body.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateEventRequest {
    /// Wallet that signs the transaction.
    sender: String,
    /// The event.
    #[serde(flatten)]
    event: NewEvent,
}

/// `POST /api/events/:id/leave` body.
#[derive(Deserialize)]
struct LeaveEventRequest {
    /// Wallet that signs the transaction.
    sender: String,
}

/// Route one request. Every failure is turned into a JSON error response.
pub(crate) async fn router<B>(
    req: Request<B>, gateway: Arc<Gateway>,
) -> Result<Response<Body>, Infallible>
where
    B: hyper::body::Body + Send,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let request_id = rusty_ulid::generate_ulid_string();
    let span = info_span!(
        "request",
        %request_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    async move {
        let response = match route(req, &gateway).await {
            Ok(response) => response,
            Err(err) => err.into_response(),
        };
        info!(status = response.status().as_u16(), "served");
        Ok(response)
    }
    .instrument(span)
    .await
}

/// Dispatch on method and path segments.
async fn route<B>(req: Request<B>, gateway: &Gateway) -> Result<Response<Body>, ApiError>
where
    B: hyper::body::Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    let body = match (&method, segments.as_slice()) {
        (&Method::GET, ["api", "clubs"]) => list_clubs(gateway).await?,
        (&Method::GET, ["api", "clubs", club_id]) => get_club(gateway, club_id).await?,
        (&Method::GET, ["api", "clubs", club_id, "events"]) => {
            list_events(gateway, club_id).await?
        },
        (&Method::POST, ["api", "events", "create"]) => {
            create_event(gateway, read_json(req.into_body()).await?).await?
        },
        (&Method::GET, ["api", "events", event_id]) => get_event(gateway, event_id).await?,
        (&Method::POST, ["api", "events", event_id, "leave"]) => {
            leave_event(gateway, event_id, read_json(req.into_body()).await?).await?
        },
        (&Method::GET, ["api", "auth", address]) => get_authorization(gateway, address).await?,
        _ => return Ok(response::not_found()),
    };
    Ok(response::ok(&body))
}

/// Collect a size limited body and decode it.
async fn read_json<T, B>(body: B) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    B: hyper::body::Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let bytes = Limited::new(body, MAX_BODY_BYTES)
        .collect()
        .await
        .map_err(|err| ApiError::BadRequest(format!("Unreadable request body: {err}")))?
        .to_bytes();
    serde_json::from_slice(&bytes)
        .map_err(|err| ApiError::BadRequest(format!("Invalid request body: {err}")))
}

/// Sender addresses must be well formed before anything is built for them.
fn check_sender(sender: &str) -> Result<(), ApiError> {
    if is_valid_id(sender) {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!("Invalid sender address `{sender}`")))
    }
}

/// `GET /api/clubs`
async fn list_clubs(gateway: &Gateway) -> Result<Value, ApiError> {
    Ok(json!({ "clubs": gateway.reader.clubs().await? }))
}

/// `GET /api/clubs/:id`
async fn get_club(gateway: &Gateway, club_id: &str) -> Result<Value, ApiError> {
    if !is_valid_id(club_id) {
        return Err(ApiError::NotFound("Club not found".to_string()));
    }
    let club = gateway
        .reader
        .club(club_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Club not found".to_string()))?;
    Ok(json!({ "club": club }))
}

/// `GET /api/clubs/:id/events`
async fn list_events(gateway: &Gateway, club_id: &str) -> Result<Value, ApiError> {
    if !is_valid_id(club_id) {
        return Err(ApiError::NotFound("Club not found".to_string()));
    }
    Ok(json!({ "events": gateway.reader.events(club_id).await? }))
}

/// `GET /api/events/:id`
async fn get_event(gateway: &Gateway, event_id: &str) -> Result<Value, ApiError> {
    if !is_valid_id(event_id) {
        return Err(ApiError::NotFound("Event not found".to_string()));
    }
    let event = gateway
        .reader
        .event(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;
    Ok(json!({ "event": event }))
}

/// `POST /api/events/create`
///
/// The body is validated first, then the club must exist and the sender must be able to
/// manage it. The answer is the unsigned transaction for the sender's wallet.
async fn create_event(gateway: &Gateway, req: CreateEventRequest) -> Result<Value, ApiError> {
    check_sender(&req.sender)?;
    let config = gateway.reader.config();
    let call = contracts::create_event(config, &req.event)?;

    let club = gateway
        .reader
        .club(&req.event.club_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Club not found".to_string()))?;

    let auth = authorize(
        gateway.reader.rpc().as_ref(),
        config,
        Some(req.sender.as_str()),
        now_ms(),
    )
    .await;
    if !auth.can_manage_club(&club) {
        return Err(ApiError::Forbidden(
            "Only the club owner or an administrator can create events".to_string(),
        ));
    }

    let tx = gateway
        .reader
        .rpc()
        .move_call(&req.sender, &call, gateway.gas_budget)
        .await?;
    Ok(json!({ "transaction": tx }))
}

/// `POST /api/events/:id/leave`
async fn leave_event(
    gateway: &Gateway, event_id: &str, req: LeaveEventRequest,
) -> Result<Value, ApiError> {
    check_sender(&req.sender)?;
    if !is_valid_id(event_id) {
        return Err(ApiError::NotFound("Event not found".to_string()));
    }
    let event = gateway
        .reader
        .event(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;
    if !event.has_participant(&req.sender) {
        return Err(ApiError::BadRequest(
            "Sender is not a participant of this event".to_string(),
        ));
    }

    let call = contracts::leave_event(gateway.reader.config(), event_id)?;
    let tx = gateway
        .reader
        .rpc()
        .move_call(&req.sender, &call, gateway.gas_budget)
        .await?;
    Ok(json!({ "transaction": tx }))
}

/// `GET /api/auth/:address`
async fn get_authorization(gateway: &Gateway, address: &str) -> Result<Value, ApiError> {
    if !is_valid_id(address) {
        return Err(ApiError::BadRequest(format!("Invalid address `{address}`")));
    }
    let auth = authorize(
        gateway.reader.rpc().as_ref(),
        gateway.reader.config(),
        Some(address),
        now_ms(),
    )
    .await;
    Ok(json!({ "authorization": auth }))
}
