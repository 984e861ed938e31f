//! AI generation handlers

use crate::error::ApiError;
use crate::extractors::ValidJson;
use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use financeai_core::{
    BlogPost, BudgetPlan, BudgetPlanRequest, FinanceAdvice, FinanceAdviceRequest,
    GenerateBlogRequest, StockAnalysis, StockAnalysisRequest,
};

pub async fn generate_blog(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<GenerateBlogRequest>,
) -> Result<(StatusCode, Json<BlogPost>), ApiError> {
    let post = state
        .content
        .generate_blog(&request)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to generate blog post"))?;

    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn finance_advice(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<FinanceAdviceRequest>,
) -> Result<Json<FinanceAdvice>, ApiError> {
    state
        .content
        .finance_advice(&request)
        .await
        .map(Json)
        .map_err(|e| ApiError::internal(e, "Failed to generate finance advice"))
}

pub async fn stock_analysis(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<StockAnalysisRequest>,
) -> Result<Json<StockAnalysis>, ApiError> {
    state
        .content
        .stock_analysis(&request)
        .await
        .map(Json)
        .map_err(|e| ApiError::internal(e, "Failed to generate stock analysis"))
}

pub async fn stock_analyses(
    State(state): State<AppState>,
) -> Result<Json<Vec<StockAnalysis>>, ApiError> {
    state
        .content
        .stock_analyses()
        .await
        .map(Json)
        .map_err(|e| ApiError::internal(e, "Failed to fetch stock analyses"))
}

pub async fn budget_plan(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<BudgetPlanRequest>,
) -> Result<Json<BudgetPlan>, ApiError> {
    state
        .content
        .budget_plan(&request)
        .await
        .map(Json)
        .map_err(|e| ApiError::internal(e, "Failed to generate budget plan"))
}
