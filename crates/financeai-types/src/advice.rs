//! Finance advice types

use crate::{amount, RiskTolerance};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-horizon breakdown returned alongside the advice text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentPlan {
    pub emergency: String,
    pub short_term: String,
    pub long_term: String,
    pub tax_saving: String,
}

/// Stored finance advice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceAdvice {
    pub id: String,
    pub user_id: Option<String>,
    pub income: i64,
    pub expenses: i64,
    pub savings_goal: i64,
    pub risk_tolerance: RiskTolerance,
    pub advice: String,
    pub investment_plan: Option<InvestmentPlan>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFinanceAdvice {
    #[serde(default)]
    pub user_id: Option<String>,
    pub income: i64,
    pub expenses: i64,
    pub savings_goal: i64,
    pub risk_tolerance: RiskTolerance,
    pub advice: String,
    #[serde(default)]
    pub investment_plan: Option<InvestmentPlan>,
}

impl NewFinanceAdvice {
    pub fn into_record(self, id: String, now: DateTime<Utc>) -> FinanceAdvice {
        FinanceAdvice {
            id,
            user_id: self.user_id,
            income: self.income,
            expenses: self.expenses,
            savings_goal: self.savings_goal,
            risk_tolerance: self.risk_tolerance,
            advice: self.advice,
            investment_plan: self.investment_plan,
            created_at: now,
        }
    }
}

/// Body of `POST /api/ai/finance-advice`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceAdviceRequest {
    #[serde(deserialize_with = "amount::rupees")]
    pub income: i64,
    #[serde(deserialize_with = "amount::rupees")]
    pub expenses: i64,
    #[serde(deserialize_with = "amount::rupees")]
    pub savings_goal: i64,
    pub risk_tolerance: RiskTolerance,
}

impl FinanceAdviceRequest {
    pub fn monthly_savings(&self) -> i64 {
        self.income.saturating_sub(self.expenses)
    }
}

/// Advice returned by the generative model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedFinanceAdvice {
    pub advice: String,
    pub investment_plan: InvestmentPlan,
}
