//! Content generation port

use crate::Result;
use async_trait::async_trait;
use financeai_types::{
    BudgetPlanRequest, FinanceAdviceRequest, GeneratedBlogContent, GeneratedBudgetPlan,
    GeneratedFinanceAdvice, GeneratedStockAnalysis, StockAnalysisRequest,
};

/// Structured-output generation backed by an external model.
///
/// Any failure (transport, empty answer, malformed JSON) is reported as
/// [`FinanceError::Generation`](crate::FinanceError::Generation).
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate_blog_post(&self, topic: &str, category: &str)
        -> Result<GeneratedBlogContent>;

    async fn generate_finance_advice(
        &self,
        request: &FinanceAdviceRequest,
    ) -> Result<GeneratedFinanceAdvice>;

    async fn generate_stock_analysis(
        &self,
        request: &StockAnalysisRequest,
    ) -> Result<GeneratedStockAnalysis>;

    async fn generate_budget_plan(&self, request: &BudgetPlanRequest)
        -> Result<GeneratedBudgetPlan>;
}
