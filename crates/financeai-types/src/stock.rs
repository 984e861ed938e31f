//! Stock analysis types

use crate::{Recommendation, RiskLevel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored stock analysis, one per analysed symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAnalysis {
    pub id: String,
    pub symbol: String,
    pub company_name: String,
    pub current_price: i64,
    pub analysis: String,
    pub recommendation: Recommendation,
    pub risk_level: RiskLevel,
    pub target_price: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStockAnalysis {
    pub symbol: String,
    pub company_name: String,
    pub current_price: i64,
    pub analysis: String,
    pub recommendation: Recommendation,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub target_price: Option<i64>,
}

impl NewStockAnalysis {
    pub fn into_record(self, id: String, now: DateTime<Utc>) -> StockAnalysis {
        StockAnalysis {
            id,
            symbol: self.symbol,
            company_name: self.company_name,
            current_price: self.current_price,
            analysis: self.analysis,
            recommendation: self.recommendation,
            risk_level: self.risk_level,
            target_price: self.target_price,
            created_at: now,
        }
    }
}

/// Body of `POST /api/ai/stock-analysis`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAnalysisRequest {
    pub symbol: String,
    pub company_name: String,
}

/// Analysis returned by the generative model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedStockAnalysis {
    pub analysis: String,
    pub recommendation: Recommendation,
    pub risk_level: RiskLevel,
    /// Rupees; the model may answer with a fractional value
    pub target_price: f64,
}
