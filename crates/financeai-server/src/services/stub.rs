//! Canned `ContentGenerator` for tests

use async_trait::async_trait;
use financeai_core::ports::ContentGenerator;
use financeai_core::{
    BudgetPlanRequest, ChartData, ChartDataset, FinanceAdviceRequest, FinanceError,
    GeneratedBlogContent, GeneratedBudgetPlan, GeneratedFinanceAdvice, GeneratedStockAnalysis,
    InvestmentPlan, Recommendation, Result, RiskLevel, StockAnalysisRequest,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Default)]
pub struct StubGenerator {
    fail: bool,
    delay: Option<Duration>,
    blog_calls: AtomicUsize,
    stock_calls: AtomicUsize,
}

impl StubGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call returns `FinanceError::Generation`
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn blog_calls(&self) -> usize {
        self.blog_calls.load(Ordering::SeqCst)
    }

    pub fn stock_calls(&self) -> usize {
        self.stock_calls.load(Ordering::SeqCst)
    }

    async fn respond(&self) -> Result<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(FinanceError::Generation("stub failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ContentGenerator for StubGenerator {
    async fn generate_blog_post(
        &self,
        topic: &str,
        category: &str,
    ) -> Result<GeneratedBlogContent> {
        self.blog_calls.fetch_add(1, Ordering::SeqCst);
        self.respond().await?;
        Ok(GeneratedBlogContent {
            title: format!("A Guide to {}", topic),
            excerpt: format!("What every {} investor should know about {}", category, topic),
            content: format!("<h2>{}</h2><p>{}</p>", topic, "Start early. ".repeat(40)),
            tags: vec![category.to_string(), "india".to_string()],
        })
    }

    async fn generate_finance_advice(
        &self,
        request: &FinanceAdviceRequest,
    ) -> Result<GeneratedFinanceAdvice> {
        self.respond().await?;
        Ok(GeneratedFinanceAdvice {
            advice: format!("Save ₹{} every month.", request.monthly_savings()),
            investment_plan: InvestmentPlan {
                emergency: "Six months of expenses in a liquid fund".to_string(),
                short_term: "Short-duration debt funds".to_string(),
                long_term: "Index fund SIPs".to_string(),
                tax_saving: "ELSS and PPF under 80C".to_string(),
            },
        })
    }

    async fn generate_stock_analysis(
        &self,
        request: &StockAnalysisRequest,
    ) -> Result<GeneratedStockAnalysis> {
        self.stock_calls.fetch_add(1, Ordering::SeqCst);
        self.respond().await?;
        Ok(GeneratedStockAnalysis {
            analysis: format!("{} has steady fundamentals.", request.company_name),
            recommendation: Recommendation::Hold,
            risk_level: RiskLevel::Medium,
            target_price: 1850.6,
        })
    }

    async fn generate_budget_plan(
        &self,
        request: &BudgetPlanRequest,
    ) -> Result<GeneratedBudgetPlan> {
        self.respond().await?;
        let mut labels: Vec<String> = request.expenses.keys().cloned().collect();
        let mut data: Vec<f64> = request.expenses.values().map(|v| *v as f64).collect();
        labels.push("Savings".to_string());
        data.push(request.savings_target as f64);
        Ok(GeneratedBudgetPlan {
            recommendations: "Trim discretionary spending.".to_string(),
            chart_data: ChartData {
                labels,
                datasets: vec![ChartDataset {
                    label: "Monthly Budget (₹)".to_string(),
                    background_color: vec!["#3B82F6".to_string(); data.len()],
                    data,
                }],
            },
        })
    }
}
