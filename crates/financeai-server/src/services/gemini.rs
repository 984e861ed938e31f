//! Gemini `generateContent` client
//!
//! Every call asks for `application/json` output constrained by a response
//! schema, then deserializes the returned text into the generated type.

use crate::config::AiConfig;
use anyhow::Context;
use async_trait::async_trait;
use financeai_core::ports::ContentGenerator;
use financeai_core::prompts;
use financeai_core::{
    BudgetPlanRequest, FinanceAdviceRequest, FinanceError, GeneratedBlogContent,
    GeneratedBudgetPlan, GeneratedFinanceAdvice, GeneratedStockAnalysis, Result,
    StockAnalysisRequest,
};
use reqwest::Client as ReqwestClient;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

pub struct GeminiClient {
    http: ReqwestClient,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(config: &AiConfig) -> anyhow::Result<Self> {
        let http = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            api_key: config.api_key.clone().unwrap_or_default(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn generate<T: DeserializeOwned>(&self, prompt: String, schema: Value) -> Result<T> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        debug!("Calling {} ({} prompt chars)", url, prompt.len());

        let response = self
            .http
            .post(&url)
            .query(&[("key", &self.api_key)])
            .json(&json!({
                "contents": [{
                    "role": "user",
                    "parts": [{ "text": prompt }],
                }],
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": schema,
                },
            }))
            .send()
            .await
            .map_err(|e| FinanceError::Generation(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FinanceError::Generation(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(FinanceError::Generation(format!(
                "Model API returned {}: {}",
                status,
                api_error_message(&body)
            )));
        }

        let text = response_text(&body)?;
        parse_generated(&text)
    }
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    async fn generate_blog_post(
        &self,
        topic: &str,
        category: &str,
    ) -> Result<GeneratedBlogContent> {
        self.generate(prompts::blog_prompt(topic, category), prompts::blog_schema())
            .await
    }

    async fn generate_finance_advice(
        &self,
        request: &FinanceAdviceRequest,
    ) -> Result<GeneratedFinanceAdvice> {
        self.generate(
            prompts::finance_advice_prompt(request),
            prompts::finance_advice_schema(),
        )
        .await
    }

    async fn generate_stock_analysis(
        &self,
        request: &StockAnalysisRequest,
    ) -> Result<GeneratedStockAnalysis> {
        self.generate(
            prompts::stock_analysis_prompt(request),
            prompts::stock_analysis_schema(),
        )
        .await
    }

    async fn generate_budget_plan(
        &self,
        request: &BudgetPlanRequest,
    ) -> Result<GeneratedBudgetPlan> {
        self.generate(
            prompts::budget_plan_prompt(request),
            prompts::budget_plan_schema(),
        )
        .await
    }
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

/// Concatenated text parts of the first candidate
fn response_text(body: &str) -> Result<String> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| FinanceError::Generation(format!("Malformed API response: {}", e)))?;

    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(FinanceError::Generation("Empty response from model".to_string()));
    }
    Ok(text)
}

fn parse_generated<T: DeserializeOwned>(text: &str) -> Result<T> {
    serde_json::from_str(text)
        .map_err(|e| FinanceError::Generation(format!("Invalid JSON from model: {}", e)))
}

fn api_error_message(body: &str) -> String {
    let error: Value = serde_json::from_str(body).unwrap_or_default();
    error["error"]["message"]
        .as_str()
        .unwrap_or("Unknown error")
        .to_string()
}
