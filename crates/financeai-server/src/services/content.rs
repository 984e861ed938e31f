//! AI content service
//!
//! Runs the generator and persists what it returns.

use chrono::Utc;
use dashmap::DashMap;
use financeai_core::ports::{ContentGenerator, Storage};
use financeai_core::utils::{estimate_read_time, generated_slug};
use financeai_core::{
    BlogPost, BudgetPlan, BudgetPlanRequest, FinanceAdvice, FinanceAdviceRequest,
    GenerateBlogRequest, NewBlogPost, NewBudgetPlan, NewFinanceAdvice, NewStockAnalysis, Result,
    StockAnalysis, StockAnalysisRequest, DEFAULT_AUTHOR,
};
use rand::Rng;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Range of the synthetic current price given to new stock analyses, in rupees
const PRICE_RANGE: std::ops::Range<i64> = 100..1100;

/// Holds one symbol's lock and drops the map entry when the last holder leaves
struct SymbolLock<'a> {
    locks: &'a DashMap<String, Arc<Mutex<()>>>,
    symbol: &'a str,
    lock: Arc<Mutex<()>>,
}

impl<'a> SymbolLock<'a> {
    fn acquire(locks: &'a DashMap<String, Arc<Mutex<()>>>, symbol: &'a str) -> Self {
        let lock = locks.entry(symbol.to_string()).or_default().clone();
        Self {
            locks,
            symbol,
            lock,
        }
    }
}

impl Drop for SymbolLock<'_> {
    fn drop(&mut self) {
        // Release this holder first; a count of one means only the map is left
        drop(std::mem::take(&mut self.lock));
        self.locks
            .remove_if(self.symbol, |_, held| Arc::strong_count(held) == 1);
    }
}

pub struct ContentService {
    store: Arc<dyn Storage>,
    generator: Arc<dyn ContentGenerator>,
    /// One lock per uppercased symbol; serializes lookup-then-generate
    symbol_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl ContentService {
    pub fn new(store: Arc<dyn Storage>, generator: Arc<dyn ContentGenerator>) -> Self {
        Self {
            store,
            generator,
            symbol_locks: DashMap::new(),
        }
    }

    /// Generate an article for `topic` and publish it
    pub async fn generate_blog(&self, request: &GenerateBlogRequest) -> Result<BlogPost> {
        info!(
            "Generating blog post: topic={}, category={}",
            request.topic, request.category
        );

        let generated = self
            .generator
            .generate_blog_post(&request.topic, &request.category)
            .await?;

        let slug = generated_slug(&request.topic, Utc::now().timestamp_millis());
        let read_time = estimate_read_time(&generated.content);

        let post = self
            .store
            .create_blog_post(NewBlogPost {
                seo_title: Some(generated.title.clone()),
                seo_description: Some(generated.excerpt.clone()),
                title: generated.title,
                slug,
                excerpt: generated.excerpt,
                content: generated.content,
                category: request.category.clone(),
                tags: Some(generated.tags),
                author: Some(DEFAULT_AUTHOR.to_string()),
                featured: Some(false),
                published: Some(true),
                read_time: Some(read_time),
            })
            .await?;

        info!("Blog post created: id={}, slug={}", post.id, post.slug);
        Ok(post)
    }

    pub async fn finance_advice(&self, request: &FinanceAdviceRequest) -> Result<FinanceAdvice> {
        info!(
            "Generating finance advice: income={}, risk={}",
            request.income, request.risk_tolerance
        );

        let generated = self.generator.generate_finance_advice(request).await?;

        let advice = self
            .store
            .create_finance_advice(NewFinanceAdvice {
                user_id: None,
                income: request.income,
                expenses: request.expenses,
                savings_goal: request.savings_goal,
                risk_tolerance: request.risk_tolerance,
                advice: generated.advice,
                investment_plan: Some(generated.investment_plan),
            })
            .await?;

        info!("Finance advice created: id={}", advice.id);
        Ok(advice)
    }

    /// Return the stored analysis for the symbol, generating one on first request.
    ///
    /// Concurrent requests for the same unseen symbol generate once; the
    /// others wait and receive the stored record.
    pub async fn stock_analysis(&self, request: &StockAnalysisRequest) -> Result<StockAnalysis> {
        let symbol = request.symbol.to_uppercase();
        let entry = SymbolLock::acquire(&self.symbol_locks, &symbol);
        let _guard = entry.lock.lock().await;
        self.find_or_generate(symbol.clone(), request).await
    }

    async fn find_or_generate(
        &self,
        symbol: String,
        request: &StockAnalysisRequest,
    ) -> Result<StockAnalysis> {
        if let Some(existing) = self.store.get_stock_analysis(&symbol).await? {
            debug!("Reusing stock analysis for {}: id={}", symbol, existing.id);
            return Ok(existing);
        }

        info!("Generating stock analysis for {}", symbol);
        let generated = self.generator.generate_stock_analysis(request).await?;
        let current_price = rand::thread_rng().gen_range(PRICE_RANGE);

        let analysis = self
            .store
            .create_stock_analysis(NewStockAnalysis {
                symbol,
                company_name: request.company_name.clone(),
                current_price,
                analysis: generated.analysis,
                recommendation: generated.recommendation,
                risk_level: generated.risk_level,
                target_price: Some(generated.target_price.round() as i64),
            })
            .await?;

        info!(
            "Stock analysis created: id={}, symbol={}, recommendation={}",
            analysis.id, analysis.symbol, analysis.recommendation
        );
        Ok(analysis)
    }

    pub async fn stock_analyses(&self) -> Result<Vec<StockAnalysis>> {
        self.store.get_all_stock_analyses().await
    }

    pub async fn budget_plan(&self, request: &BudgetPlanRequest) -> Result<BudgetPlan> {
        info!(
            "Generating budget plan: income={}, expenses={}",
            request.monthly_income,
            request.total_expenses()
        );

        let generated = self.generator.generate_budget_plan(request).await?;

        let plan = self
            .store
            .create_budget_plan(NewBudgetPlan {
                user_id: None,
                monthly_income: request.monthly_income,
                expenses: request.expenses.clone(),
                savings_target: request.savings_target,
                recommendations: generated.recommendations,
                chart_data: Some(generated.chart_data),
            })
            .await?;

        info!("Budget plan created: id={}", plan.id);
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::stub::StubGenerator;
    use crate::storage::MemoryStore;
    use financeai_core::ports::{BlogStore, StockAnalysisStore};
    use financeai_core::{FinanceError, RiskTolerance};
    use std::collections::BTreeMap;
    use std::time::Duration;
    use tokio_test::assert_ok;

    fn service(generator: Arc<StubGenerator>) -> (Arc<MemoryStore>, ContentService) {
        let store = Arc::new(MemoryStore::new());
        let content = ContentService::new(store.clone(), generator);
        (store, content)
    }

    fn infosys() -> StockAnalysisRequest {
        StockAnalysisRequest {
            symbol: "infy".to_string(),
            company_name: "Infosys".to_string(),
        }
    }

    #[tokio::test]
    async fn test_generate_blog_fills_derived_fields() {
        let generator = Arc::new(StubGenerator::new());
        let (store, content) = service(generator.clone());

        let post = assert_ok!(
            content
                .generate_blog(&GenerateBlogRequest {
                    topic: "SIP vs Lump Sum!".to_string(),
                    category: "investing".to_string(),
                })
                .await
        );

        assert!(post.slug.starts_with("sip-vs-lump-sum--"));
        let stamp = post.slug.trim_start_matches("sip-vs-lump-sum--");
        assert!(stamp.parse::<i64>().is_ok(), "{}", post.slug);
        assert_eq!(post.read_time, estimate_read_time(&post.content));
        assert_eq!(post.author, DEFAULT_AUTHOR);
        assert!(!post.featured);
        assert!(post.published);
        assert_eq!(post.seo_title.as_deref(), Some(post.title.as_str()));
        assert_eq!(post.seo_description.as_deref(), Some(post.excerpt.as_str()));
        assert_eq!(post.category, "investing");

        let stored = store.get_blog_post_by_slug(&post.slug).await.unwrap();
        assert_eq!(stored, Some(post));
    }

    #[tokio::test]
    async fn test_stock_analysis_reuses_stored_record() {
        let generator = Arc::new(StubGenerator::new());
        let (_store, content) = service(generator.clone());

        let first = assert_ok!(content.stock_analysis(&infosys()).await);
        assert_eq!(first.symbol, "INFY");
        assert!(PRICE_RANGE.contains(&first.current_price));
        assert_eq!(first.target_price, Some(1851));

        let again = StockAnalysisRequest {
            symbol: "Infy".to_string(),
            company_name: "Infosys Ltd".to_string(),
        };
        let second = assert_ok!(content.stock_analysis(&again).await);

        assert_eq!(second.id, first.id);
        assert_eq!(generator.stock_calls(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_stock_requests_generate_once() {
        let generator = Arc::new(StubGenerator::new().with_delay(Duration::from_millis(50)));
        let (_store, content) = service(generator.clone());
        let content = Arc::new(content);

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let content = content.clone();
                tokio::spawn(async move { content.stock_analysis(&infosys()).await })
            })
            .collect();

        let mut ids = Vec::new();
        for task in tasks {
            ids.push(task.await.unwrap().unwrap().id);
        }

        ids.dedup();
        assert_eq!(ids.len(), 1);
        assert_eq!(generator.stock_calls(), 1);
        assert_eq!(content.stock_analyses().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_symbol_locks_released_after_requests() {
        let (_store, content) = service(Arc::new(StubGenerator::failing()));

        for i in 0..50 {
            let request = StockAnalysisRequest {
                symbol: format!("SYM{}", i),
                company_name: "Anything".to_string(),
            };
            assert!(content.stock_analysis(&request).await.is_err());
        }
        assert!(content.symbol_locks.is_empty());

        let generator = Arc::new(StubGenerator::new().with_delay(Duration::from_millis(20)));
        let (_store, content) = service(generator);
        let content = Arc::new(content);
        let tasks: Vec<_> = (0..4)
            .map(|_| {
                let content = content.clone();
                tokio::spawn(async move { content.stock_analysis(&infosys()).await })
            })
            .collect();
        for task in tasks {
            assert_ok!(task.await.unwrap());
        }
        assert!(content.symbol_locks.is_empty());
    }

    #[tokio::test]
    async fn test_generation_failure_stores_nothing() {
        let generator = Arc::new(StubGenerator::failing());
        let (store, content) = service(generator);

        let result = content.stock_analysis(&infosys()).await;
        assert!(matches!(result, Err(FinanceError::Generation(_))));
        assert!(store.get_all_stock_analyses().await.unwrap().is_empty());

        let result = content
            .finance_advice(&FinanceAdviceRequest {
                income: 100000,
                expenses: 60000,
                savings_goal: 500000,
                risk_tolerance: RiskTolerance::High,
            })
            .await;
        assert!(matches!(result, Err(FinanceError::Generation(_))));
    }

    #[tokio::test]
    async fn test_finance_advice_and_budget_plan_are_anonymous() {
        let generator = Arc::new(StubGenerator::new());
        let (_store, content) = service(generator);

        let advice = assert_ok!(
            content
                .finance_advice(&FinanceAdviceRequest {
                    income: 100000,
                    expenses: 60000,
                    savings_goal: 500000,
                    risk_tolerance: RiskTolerance::Medium,
                })
                .await
        );
        assert!(advice.user_id.is_none());
        assert!(advice.investment_plan.is_some());
        assert_eq!(advice.risk_tolerance, RiskTolerance::Medium);

        let mut expenses = BTreeMap::new();
        expenses.insert("rent".to_string(), 20000);
        let plan = assert_ok!(
            content
                .budget_plan(&BudgetPlanRequest {
                    monthly_income: 75000,
                    expenses: expenses.clone(),
                    savings_target: 20000,
                })
                .await
        );
        assert!(plan.user_id.is_none());
        assert_eq!(plan.expenses, expenses);
        assert!(plan.chart_data.is_some());
    }
}
