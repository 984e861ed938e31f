//! Market data handlers

use crate::services::market;
use axum::Json;
use financeai_core::{MarketIndices, StockMover};

pub async fn indices() -> Json<MarketIndices> {
    Json(market::indices())
}

pub async fn top_gainers() -> Json<Vec<StockMover>> {
    Json(market::top_gainers())
}
