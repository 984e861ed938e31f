//! HTTP handlers

pub mod ai;
pub mod blogs;
pub mod market;
pub mod newsletter;

use axum::Json;
use serde_json::{json, Value};

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
