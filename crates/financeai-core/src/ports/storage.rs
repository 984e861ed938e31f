//! Storage traits for persistence
//!
//! Lookups report absence as `Ok(None)` or an empty list. Every list is
//! ordered newest first.

use crate::Result;
use async_trait::async_trait;
use financeai_types::{
    BlogPost, BlogPostPatch, BudgetPlan, FinanceAdvice, NewBlogPost, NewBudgetPlan,
    NewFinanceAdvice, NewStockAnalysis, NewSubscription, NewUser, NewsletterSubscription,
    StockAnalysis, User,
};

/// Number of posts returned by [`BlogStore::get_featured_blog_posts`]
pub const FEATURED_LIMIT: usize = 3;

/// User store
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_user(&self, id: &str) -> Result<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn create_user(&self, user: NewUser) -> Result<User>;
}

/// Blog post store
#[async_trait]
pub trait BlogStore: Send + Sync {
    /// Published posts only
    async fn get_all_blog_posts(&self) -> Result<Vec<BlogPost>>;
    async fn get_blog_post(&self, id: &str) -> Result<Option<BlogPost>>;
    async fn get_blog_post_by_slug(&self, slug: &str) -> Result<Option<BlogPost>>;
    async fn create_blog_post(&self, post: NewBlogPost) -> Result<BlogPost>;
    async fn update_blog_post(&self, id: &str, patch: BlogPostPatch) -> Result<Option<BlogPost>>;
    async fn delete_blog_post(&self, id: &str) -> Result<bool>;
    /// Featured and published, capped at [`FEATURED_LIMIT`]
    async fn get_featured_blog_posts(&self) -> Result<Vec<BlogPost>>;
    async fn get_blog_posts_by_category(&self, category: &str) -> Result<Vec<BlogPost>>;
    /// Case-insensitive substring search over title, excerpt, content and tags
    async fn search_blog_posts(&self, query: &str) -> Result<Vec<BlogPost>>;
}

/// Finance advice store
#[async_trait]
pub trait FinanceAdviceStore: Send + Sync {
    async fn create_finance_advice(&self, advice: NewFinanceAdvice) -> Result<FinanceAdvice>;
    async fn get_finance_advice_by_user_id(&self, user_id: &str) -> Result<Vec<FinanceAdvice>>;
}

/// Stock analysis store
#[async_trait]
pub trait StockAnalysisStore: Send + Sync {
    async fn create_stock_analysis(&self, analysis: NewStockAnalysis) -> Result<StockAnalysis>;
    /// Newest analysis for `symbol`, compared case-insensitively
    async fn get_stock_analysis(&self, symbol: &str) -> Result<Option<StockAnalysis>>;
    async fn get_all_stock_analyses(&self) -> Result<Vec<StockAnalysis>>;
}

/// Budget plan store
#[async_trait]
pub trait BudgetPlanStore: Send + Sync {
    async fn create_budget_plan(&self, plan: NewBudgetPlan) -> Result<BudgetPlan>;
    async fn get_budget_plans_by_user_id(&self, user_id: &str) -> Result<Vec<BudgetPlan>>;
}

/// Newsletter store
#[async_trait]
pub trait NewsletterStore: Send + Sync {
    async fn subscribe_to_newsletter(
        &self,
        subscription: NewSubscription,
    ) -> Result<NewsletterSubscription>;
    /// Active subscriptions only
    async fn get_newsletter_subscribers(&self) -> Result<Vec<NewsletterSubscription>>;
    /// Flips `subscribed` to false; returns whether a record matched
    async fn unsubscribe_from_newsletter(&self, email: &str) -> Result<bool>;
}

/// Every store a backend must provide
pub trait Storage:
    UserStore + BlogStore + FinanceAdviceStore + StockAnalysisStore + BudgetPlanStore + NewsletterStore
{
}

impl<T> Storage for T where
    T: UserStore
        + BlogStore
        + FinanceAdviceStore
        + StockAnalysisStore
        + BudgetPlanStore
        + NewsletterStore
{
}
