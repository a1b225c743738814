//! Client for the remote budgeting API (YNAB v1 wire format)
//!
//! Thin typed accessors over the three calls the app needs: list
//! budgets, list categories (flattened across category groups), and
//! fetch one month's detail. Calls are not retried and carry no special
//! handling for invalid tokens; an upstream failure propagates to the
//! caller's error boundary as-is.

use chrono::{Datelike, NaiveDate};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::fmt;

pub use budgetlens_analysis::Category;

// ============================================================================
// Error Types
// ============================================================================

/// Client errors
#[derive(Debug, thiserror::Error)]
pub enum YnabError {
    /// The access token was rejected by the remote API
    #[error("remote API rejected the access token")]
    Unauthorized,

    /// Any other non-success response
    #[error("remote API error: {status} - {detail}")]
    Api {
        /// HTTP status returned by the remote
        status: u16,
        /// Detail from the remote error envelope, or the raw status text
        detail: String,
    },

    /// Transport-level failure (connect, timeout, body read, decode)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A month URL segment that is neither `current` nor a calendar month
    #[error("unrecognized month segment: {0}")]
    InvalidMonth(String),
}

/// Client result type
pub type YnabResult<T> = Result<T, YnabError>;

// ============================================================================
// Wire Types
// ============================================================================

/// A budget as listed by the remote API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Budget {
    /// Budget id
    pub id: String,
    /// Display name
    pub name: String,
    /// Last modification timestamp (RFC 3339, kept as text for display)
    pub last_modified_on: Option<String>,
}

/// One month of a budget: aggregate totals plus the category list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MonthDetail {
    /// First day of the month, `YYYY-MM-DD`
    pub month: String,
    /// Total income, milliunits
    pub income: i64,
    /// Total activity (outflows negative), milliunits
    pub activity: i64,
    /// Total budgeted, milliunits
    pub budgeted: i64,
    /// Categories for the month
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct BudgetsData {
    budgets: Vec<Budget>,
}

#[derive(Debug, Deserialize)]
struct CategoryGroupsData {
    category_groups: Vec<CategoryGroup>,
}

#[derive(Debug, Deserialize)]
struct CategoryGroup {
    #[serde(default)]
    categories: Vec<Category>,
}

#[derive(Debug, Deserialize)]
struct MonthData {
    month: MonthDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    detail: String,
}

// ============================================================================
// Month References
// ============================================================================

/// A month selector for the month-detail call.
///
/// The remote API accepts either the literal `current` or the first day
/// of a calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthRef {
    /// The remote API's "current month" token
    Current,
    /// An explicit month, normalized to its first day
    Month(NaiveDate),
}

impl MonthRef {
    /// Parse a URL segment: `current`, `YYYY-MM`, or `YYYY-MM-DD`.
    pub fn parse(segment: &str) -> YnabResult<Self> {
        if segment == "current" {
            return Ok(Self::Current);
        }
        if let Ok(date) = NaiveDate::parse_from_str(segment, "%Y-%m-%d") {
            return Ok(Self::Month(first_of_month(date)));
        }
        if let Ok(date) = NaiveDate::parse_from_str(&format!("{segment}-01"), "%Y-%m-%d") {
            return Ok(Self::Month(date));
        }
        Err(YnabError::InvalidMonth(segment.to_string()))
    }
}

impl fmt::Display for MonthRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => f.write_str("current"),
            Self::Month(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

// ============================================================================
// Client
// ============================================================================

/// Typed client for the remote budgeting API.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct BudgetClient {
    http: Client,
    base_url: String,
}

impl BudgetClient {
    /// Create a client against the given API base URL
    /// (e.g. `https://api.ynab.com/v1`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// List the budgets the token grants access to.
    pub async fn list_budgets(&self, access_token: &str) -> YnabResult<Vec<Budget>> {
        let response = self
            .http
            .get(format!("{}/budgets", self.base_url))
            .bearer_auth(access_token)
            .send()
            .await?;
        let response = check_status(response).await?;
        let envelope: Envelope<BudgetsData> = response.json().await?;
        tracing::debug!(count = envelope.data.budgets.len(), "listed budgets");
        Ok(envelope.data.budgets)
    }

    /// List a budget's categories, flattened across category groups in
    /// group order then in-group order.
    pub async fn list_categories(
        &self,
        access_token: &str,
        budget_id: &str,
    ) -> YnabResult<Vec<Category>> {
        let response = self
            .http
            .get(format!("{}/budgets/{budget_id}/categories", self.base_url))
            .bearer_auth(access_token)
            .send()
            .await?;
        let response = check_status(response).await?;
        let envelope: Envelope<CategoryGroupsData> = response.json().await?;
        let categories = envelope
            .data
            .category_groups
            .into_iter()
            .flat_map(|group| group.categories)
            .collect();
        Ok(categories)
    }

    /// Fetch one month's totals and categories.
    pub async fn month_detail(
        &self,
        access_token: &str,
        budget_id: &str,
        month: &MonthRef,
    ) -> YnabResult<MonthDetail> {
        tracing::debug!(%budget_id, %month, "loading month detail");
        let response = self
            .http
            .get(format!(
                "{}/budgets/{budget_id}/months/{month}",
                self.base_url
            ))
            .bearer_auth(access_token)
            .send()
            .await?;
        let response = check_status(response).await?;
        let envelope: Envelope<MonthData> = response.json().await?;
        Ok(envelope.data.month)
    }
}

/// Map non-success statuses to client errors. 401 gets its own variant;
/// everything else carries the remote's error detail when the body has
/// the standard envelope.
async fn check_status(response: Response) -> YnabResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(YnabError::Unauthorized);
    }
    let detail = match response.json::<ErrorEnvelope>().await {
        Ok(envelope) => envelope.error.detail,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };
    Err(YnabError::Api {
        status: status.as_u16(),
        detail,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_ref_parse_current() {
        assert_eq!(MonthRef::parse("current").unwrap(), MonthRef::Current);
    }

    #[test]
    fn test_month_ref_parse_full_date_normalizes_day() {
        let parsed = MonthRef::parse("2024-03-15").unwrap();
        assert_eq!(
            parsed,
            MonthRef::Month(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        );
    }

    #[test]
    fn test_month_ref_parse_year_month() {
        let parsed = MonthRef::parse("2024-03").unwrap();
        assert_eq!(parsed.to_string(), "2024-03-01");
    }

    #[test]
    fn test_month_ref_parse_rejects_garbage() {
        assert!(matches!(
            MonthRef::parse("not-a-month"),
            Err(YnabError::InvalidMonth(_))
        ));
        assert!(matches!(
            MonthRef::parse("2024-13"),
            Err(YnabError::InvalidMonth(_))
        ));
    }

    #[test]
    fn test_month_ref_display() {
        assert_eq!(MonthRef::Current.to_string(), "current");
        assert_eq!(
            MonthRef::Month(NaiveDate::from_ymd_opt(2023, 11, 1).unwrap()).to_string(),
            "2023-11-01"
        );
    }

    #[test]
    fn test_month_detail_parses_without_categories() {
        let raw = r#"{"month":"2024-03-01","income":100,"activity":-50,"budgeted":80}"#;
        let parsed: MonthDetail = serde_json::from_str(raw).unwrap();
        assert!(parsed.categories.is_empty());
    }
}
