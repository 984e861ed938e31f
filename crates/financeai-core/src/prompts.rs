//! Prompt text and response schemas for structured generation

use financeai_types::{BudgetPlanRequest, FinanceAdviceRequest, StockAnalysisRequest};
use serde_json::{json, Value};

pub fn blog_prompt(topic: &str, category: &str) -> String {
    format!(
        r#"Write a comprehensive finance blog post for Indian investors about "{topic}" in the {category} category.

Requirements:
- Clear, engaging style for beginner to intermediate investors
- Examples from the Indian market (NSE, BSE, Indian companies, INR amounts)
- Relevant Indian instruments (SIP, ELSS, PPF, EPF and similar)
- Practical, actionable tips; explain any jargon
- Clear headings and sections, 800-1200 words

Respond with JSON:
{{
  "title": "SEO-friendly title, at most 60 characters",
  "excerpt": "Summary of 150-200 characters",
  "content": "Full HTML article with headings and paragraphs",
  "tags": ["relevant", "tags"]
}}"#
    )
}

pub fn blog_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "title": { "type": "string" },
            "excerpt": { "type": "string" },
            "content": { "type": "string" },
            "tags": { "type": "array", "items": { "type": "string" } }
        },
        "required": ["title", "excerpt", "content", "tags"]
    })
}

pub fn finance_advice_prompt(request: &FinanceAdviceRequest) -> String {
    format!(
        r#"As a financial advisor for Indian investors, give personalised advice for:

Monthly Income: ₹{income}
Monthly Expenses: ₹{expenses}
Monthly Savings: ₹{savings}
Savings Goal: ₹{goal}
Risk Tolerance: {risk}

Cover emergency fund sizing (3-6 months of expenses), tax-saving options (80C, ELSS, PPF),
short-term (1-3 years) and long-term (5+ years) investing, mutual fund categories with SIP
amounts, and an asset allocation matching the risk tolerance. Use INR amounts.

Respond with JSON:
{{
  "advice": "Detailed advice, 500-800 words",
  "investmentPlan": {{
    "emergency": "Emergency fund recommendation",
    "shortTerm": "Short-term strategy",
    "longTerm": "Long-term strategy",
    "taxSaving": "Tax saving recommendations"
  }}
}}"#,
        income = request.income,
        expenses = request.expenses,
        savings = request.monthly_savings(),
        goal = request.savings_goal,
        risk = request.risk_tolerance,
    )
}

pub fn finance_advice_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "advice": { "type": "string" },
            "investmentPlan": {
                "type": "object",
                "properties": {
                    "emergency": { "type": "string" },
                    "shortTerm": { "type": "string" },
                    "longTerm": { "type": "string" },
                    "taxSaving": { "type": "string" }
                },
                "required": ["emergency", "shortTerm", "longTerm", "taxSaving"]
            }
        },
        "required": ["advice", "investmentPlan"]
    })
}

pub fn stock_analysis_prompt(request: &StockAnalysisRequest) -> String {
    format!(
        r#"As a stock analyst covering Indian markets, analyse:

Company: {company}
Stock Symbol: {symbol}

Cover business fundamentals, financial health, growth prospects, risks, valuation,
a BUY/SELL/HOLD recommendation, a LOW/MEDIUM/HIGH risk level and a target price.
Stay objective and focus on what matters to Indian retail investors.

Respond with JSON:
{{
  "analysis": "Analysis of 400-600 words",
  "recommendation": "BUY, SELL, or HOLD",
  "riskLevel": "LOW, MEDIUM, or HIGH",
  "targetPrice": target_price_in_rupees
}}"#,
        company = request.company_name,
        symbol = request.symbol,
    )
}

pub fn stock_analysis_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "analysis": { "type": "string" },
            "recommendation": { "type": "string", "enum": ["BUY", "SELL", "HOLD"] },
            "riskLevel": { "type": "string", "enum": ["LOW", "MEDIUM", "HIGH"] },
            "targetPrice": { "type": "number" }
        },
        "required": ["analysis", "recommendation", "riskLevel", "targetPrice"]
    })
}

pub fn budget_plan_prompt(request: &BudgetPlanRequest) -> String {
    // BTreeMap serialization cannot fail
    let breakdown = serde_json::to_string(&request.expenses).unwrap_or_default();
    format!(
        r##"As a financial planner, build a budget plan for an Indian household:

Monthly Income: ₹{income}
Current Expenses: ₹{total}
Expense Breakdown: {breakdown}
Current Savings: ₹{savings}
Savings Target: ₹{target}

Analyse the spending pattern, suggest optimisations, lay out how to reach the savings
target, and include emergency fund and surplus investment guidance.

Respond with JSON:
{{
  "recommendations": "Budget recommendations, 400-600 words",
  "chartData": {{
    "labels": ["Rent", "Food", "Transportation", "Utilities", "Entertainment", "Others", "Savings"],
    "datasets": [{{
      "label": "Monthly Budget (₹)",
      "data": [expense_amounts_and_target_savings],
      "backgroundColor": ["#3B82F6", "#10B981", "#F59E0B", "#8B5CF6", "#EF4444", "#6B7280", "#059669"]
    }}]
  }}
}}"##,
        income = request.monthly_income,
        total = request.total_expenses(),
        breakdown = breakdown,
        savings = request.current_savings(),
        target = request.savings_target,
    )
}

pub fn budget_plan_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "recommendations": { "type": "string" },
            "chartData": {
                "type": "object",
                "properties": {
                    "labels": { "type": "array", "items": { "type": "string" } },
                    "datasets": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "label": { "type": "string" },
                                "data": { "type": "array", "items": { "type": "number" } },
                                "backgroundColor": { "type": "array", "items": { "type": "string" } }
                            },
                            "required": ["label", "data", "backgroundColor"]
                        }
                    }
                },
                "required": ["labels", "datasets"]
            }
        },
        "required": ["recommendations", "chartData"]
    })
}
