//! Port traits (interfaces) for dependency injection

pub mod generator;
pub mod storage;

pub use generator::ContentGenerator;
pub use storage::{
    BlogStore, BudgetPlanStore, FinanceAdviceStore, NewsletterStore, StockAnalysisStore, Storage,
    UserStore,
};
