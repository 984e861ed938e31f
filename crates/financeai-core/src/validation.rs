//! Boundary validation for request payloads
//!
//! Deserialization checks shape; these checks cover the value constraints
//! serde cannot express.

use crate::{FinanceError, Result};
use financeai_types::{
    BlogPostPatch, BudgetPlanRequest, FinanceAdviceRequest, GenerateBlogRequest, NewBlogPost,
    NewSubscription, NewUser, StockAnalysisRequest, UnsubscribeRequest,
};

pub trait Validate {
    /// Message returned to clients when the payload is rejected
    const INVALID_MESSAGE: &'static str = "Invalid request data";

    fn validate(&self) -> Result<()>;
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FinanceError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

fn require_non_negative(field: &str, value: i64) -> Result<()> {
    if value < 0 {
        return Err(FinanceError::Validation(format!(
            "{} must not be negative",
            field
        )));
    }
    Ok(())
}

fn require_email(value: &str) -> Result<()> {
    let invalid = || FinanceError::Validation(format!("invalid email address: {}", value));
    let (local, domain) = value.trim().split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') || !domain.contains('.') {
        return Err(invalid());
    }
    Ok(())
}

impl Validate for NewBlogPost {
    const INVALID_MESSAGE: &'static str = "Invalid blog post data";

    fn validate(&self) -> Result<()> {
        require_text("title", &self.title)?;
        require_text("slug", &self.slug)?;
        require_text("category", &self.category)?;
        if let Some(read_time) = self.read_time {
            require_non_negative("readTime", read_time.into())?;
        }
        Ok(())
    }
}

impl Validate for BlogPostPatch {
    const INVALID_MESSAGE: &'static str = "Invalid blog post data";

    fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            require_text("title", title)?;
        }
        if let Some(slug) = &self.slug {
            require_text("slug", slug)?;
        }
        if let Some(category) = &self.category {
            require_text("category", category)?;
        }
        if let Some(read_time) = self.read_time {
            require_non_negative("readTime", read_time.into())?;
        }
        Ok(())
    }
}

impl Validate for GenerateBlogRequest {
    const INVALID_MESSAGE: &'static str = "Topic and category are required";

    fn validate(&self) -> Result<()> {
        if self.topic.trim().is_empty() || self.category.trim().is_empty() {
            return Err(FinanceError::Validation(
                "Topic and category are required".to_string(),
            ));
        }
        Ok(())
    }
}

impl Validate for FinanceAdviceRequest {
    fn validate(&self) -> Result<()> {
        require_non_negative("income", self.income)?;
        require_non_negative("expenses", self.expenses)?;
        require_non_negative("savingsGoal", self.savings_goal)
    }
}

impl Validate for StockAnalysisRequest {
    fn validate(&self) -> Result<()> {
        require_text("symbol", &self.symbol)?;
        require_text("companyName", &self.company_name)
    }
}

impl Validate for BudgetPlanRequest {
    fn validate(&self) -> Result<()> {
        require_non_negative("monthlyIncome", self.monthly_income)?;
        require_non_negative("savingsTarget", self.savings_target)?;
        for (category, amount) in &self.expenses {
            require_non_negative(category, *amount)?;
        }
        if self.checked_total_expenses().is_none() {
            return Err(FinanceError::Validation(
                "total expenses out of range".to_string(),
            ));
        }
        Ok(())
    }
}

impl Validate for NewSubscription {
    const INVALID_MESSAGE: &'static str = "Invalid email address";

    fn validate(&self) -> Result<()> {
        require_email(&self.email)
    }
}

impl Validate for UnsubscribeRequest {
    const INVALID_MESSAGE: &'static str = "Invalid email address";

    fn validate(&self) -> Result<()> {
        require_email(&self.email)
    }
}

impl Validate for NewUser {
    fn validate(&self) -> Result<()> {
        require_text("username", &self.username)?;
        require_text("password", &self.password)?;
        require_email(&self.email)
    }
}
