//! Newsletter handlers

use crate::error::ApiError;
use crate::extractors::ValidJson;
use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use financeai_core::{FinanceError, NewSubscription, UnsubscribeRequest};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

const ALREADY_SUBSCRIBED: &str = "Email already subscribed";

#[derive(Debug, Serialize)]
pub struct CountResponse {
    count: usize,
}

pub async fn subscribe(
    State(state): State<AppState>,
    ValidJson(subscription): ValidJson<NewSubscription>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let subscribers = state
        .store
        .get_newsletter_subscribers()
        .await
        .map_err(|e| ApiError::internal(e, "Failed to subscribe to newsletter"))?;

    if subscribers.iter().any(|s| s.email == subscription.email) {
        return Err(ApiError::bad_request(ALREADY_SUBSCRIBED));
    }

    match state.store.subscribe_to_newsletter(subscription).await {
        Ok(record) => {
            info!("Newsletter subscription created: id={}", record.id);
            Ok((
                StatusCode::CREATED,
                Json(json!({ "message": "Successfully subscribed to newsletter" })),
            ))
        }
        // An earlier, unsubscribed record still holds the address
        Err(FinanceError::Conflict(_)) => Err(ApiError::bad_request(ALREADY_SUBSCRIBED)),
        Err(e) => Err(ApiError::from_error(e, "Failed to subscribe to newsletter")),
    }
}

pub async fn unsubscribe(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<UnsubscribeRequest>,
) -> Result<Json<Value>, ApiError> {
    match state.store.unsubscribe_from_newsletter(&request.email).await {
        Ok(true) => {
            info!("Newsletter subscription cancelled");
            Ok(Json(
                json!({ "message": "Successfully unsubscribed from newsletter" }),
            ))
        }
        Ok(false) => Err(ApiError::not_found("Subscription not found")),
        Err(e) => Err(ApiError::internal(e, "Failed to unsubscribe from newsletter")),
    }
}

pub async fn count(State(state): State<AppState>) -> Result<Json<CountResponse>, ApiError> {
    state
        .store
        .get_newsletter_subscribers()
        .await
        .map(|subscribers| {
            Json(CountResponse {
                count: subscribers.len(),
            })
        })
        .map_err(|e| ApiError::internal(e, "Failed to fetch subscriber count"))
}
