//! Tax calculation routes.

use std::collections::BTreeMap;

use axum::extract::State;
use serde::Deserialize;
use tracing::debug;

use levy_core::{tax, LineItem, Money, TaxRate, TaxResult, DEFAULT_COUNTRY_CODE};

use crate::error::Result;
use crate::extract::{Json, Path};
use crate::state::AppState;

/// Body of `POST /tax/calculate`.
#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    pub amount: Money,
    /// Percentage; absent or 0 means "use the country's rate".
    #[serde(default)]
    pub tax_rate: Option<TaxRate>,
    #[serde(default)]
    pub country_code: Option<String>,
}

/// Body of `POST /tax/calculate-items`.
#[derive(Debug, Deserialize)]
pub struct CalculateItemsRequest {
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub tax_rate: Option<TaxRate>,
    #[serde(default)]
    pub country_code: Option<String>,
}

/// `POST /tax/calculate`
pub async fn calculate(
    State(state): State<AppState>,
    Json(req): Json<CalculateRequest>,
) -> Result<axum::Json<TaxResult>> {
    let country_code = req.country_code.as_deref().unwrap_or(DEFAULT_COUNTRY_CODE);
    let rate = state.rates().resolve(req.tax_rate, country_code)?;

    let result = tax::compute(req.amount, rate, country_code)?;
    debug!(country_code, total = %result.total_amount, "Tax calculated");
    Ok(axum::Json(result))
}

/// `POST /tax/calculate-items`
pub async fn calculate_items(
    State(state): State<AppState>,
    Json(req): Json<CalculateItemsRequest>,
) -> Result<axum::Json<TaxResult>> {
    let country_code = req.country_code.as_deref().unwrap_or(DEFAULT_COUNTRY_CODE);
    let rate = state.rates().resolve(req.tax_rate, country_code)?;

    let result = tax::compute_items(&req.items, rate, country_code)?;
    debug!(
        country_code,
        count = req.items.len(),
        total = %result.total_amount,
        "Item tax calculated"
    );
    Ok(axum::Json(result))
}

/// `GET /tax/rates`
pub async fn rates(State(state): State<AppState>) -> axum::Json<BTreeMap<String, TaxRate>> {
    axum::Json(state.rates().list().clone())
}

/// `GET /tax/rate/{country_code}`
pub async fn rate(
    State(state): State<AppState>,
    Path(country_code): Path<String>,
) -> Result<axum::Json<TaxRate>> {
    let rate = state.rates().get(&country_code)?;
    Ok(axum::Json(rate))
}
