//! Budget plan types

use crate::amount;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Category → monthly amount (rupees)
pub type ExpenseBreakdown = BTreeMap<String, i64>;

/// Chart payload consumed by the frontend charting library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
    pub background_color: Vec<String>,
}

/// Stored budget plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPlan {
    pub id: String,
    pub user_id: Option<String>,
    pub monthly_income: i64,
    pub expenses: ExpenseBreakdown,
    pub savings_target: i64,
    pub recommendations: String,
    pub chart_data: Option<ChartData>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBudgetPlan {
    #[serde(default)]
    pub user_id: Option<String>,
    pub monthly_income: i64,
    pub expenses: ExpenseBreakdown,
    pub savings_target: i64,
    pub recommendations: String,
    #[serde(default)]
    pub chart_data: Option<ChartData>,
}

impl NewBudgetPlan {
    pub fn into_record(self, id: String, now: DateTime<Utc>) -> BudgetPlan {
        BudgetPlan {
            id,
            user_id: self.user_id,
            monthly_income: self.monthly_income,
            expenses: self.expenses,
            savings_target: self.savings_target,
            recommendations: self.recommendations,
            chart_data: self.chart_data,
            created_at: now,
        }
    }
}

/// Body of `POST /api/ai/budget-plan`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPlanRequest {
    #[serde(deserialize_with = "amount::rupees")]
    pub monthly_income: i64,
    #[serde(deserialize_with = "amount::breakdown")]
    pub expenses: ExpenseBreakdown,
    #[serde(deserialize_with = "amount::rupees")]
    pub savings_target: i64,
}

impl BudgetPlanRequest {
    /// Sum of the breakdown, `None` on overflow
    pub fn checked_total_expenses(&self) -> Option<i64> {
        self.expenses
            .values()
            .try_fold(0i64, |total, amount| total.checked_add(*amount))
    }

    pub fn total_expenses(&self) -> i64 {
        self.expenses
            .values()
            .fold(0i64, |total, amount| total.saturating_add(*amount))
    }

    pub fn current_savings(&self) -> i64 {
        self.monthly_income.saturating_sub(self.total_expenses())
    }
}

/// Plan returned by the generative model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedBudgetPlan {
    pub recommendations: String,
    pub chart_data: ChartData,
}
