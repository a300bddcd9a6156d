/*
[INPUT]:  Caller-supplied credentials and knobs
[OUTPUT]: Validated provider configuration and retrieval mode
[POS]:    Provider layer - configuration and mode selection
[UPDATE]: When credential combinations or defaults change
*/

use rust_decimal::Decimal;

use crate::http::{AfdianError, Result};

/// Fixed message for the missing-credential configuration error.
pub const MISSING_CREDENTIALS_MESSAGE: &str =
    "Afdian provider requires either web_auth_token, account + password, or user_id + token";

/// Per-provider configuration.
///
/// Mode selection: a web-session credential set (token, or account +
/// password) selects the bill-filter pipeline; otherwise `user_id` +
/// `token` select the open API.
#[derive(Debug, Clone)]
pub struct AfdianConfig {
    /// Pre-obtained session cookie value (web-session mode).
    pub web_auth_token: Option<String>,
    /// Credentials for minting a session token (web-session mode).
    pub account: Option<String>,
    pub password: Option<String>,
    /// API-key identity and shared secret (open-API mode).
    pub user_id: Option<String>,
    pub token: Option<String>,
    /// Divisor from platform currency to output currency.
    pub exchange_rate: Decimal,
    /// Keep commercial purchases in the open-API results.
    pub include_purchases: bool,
    /// Synthetic purchase expiry window in days. 0 disables.
    pub purchase_effectivity_days: i64,
    /// Defensive pagination cap.
    pub max_pages: u32,
}

impl Default for AfdianConfig {
    fn default() -> Self {
        Self {
            web_auth_token: None,
            account: None,
            password: None,
            user_id: None,
            token: None,
            exchange_rate: Decimal::new(65, 1),
            include_purchases: true,
            purchase_effectivity_days: 30,
            max_pages: 1000,
        }
    }
}

/// Web-session credential variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum WebCredentials<'a> {
    Token(&'a str),
    Password { account: &'a str, password: &'a str },
}

/// Which pipeline the configuration selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RetrievalMode<'a> {
    WebSession(WebCredentials<'a>),
    OpenApi { user_id: &'a str, token: &'a str },
}

impl AfdianConfig {
    /// Resolve the retrieval mode, before any network call.
    pub(crate) fn retrieval_mode(&self) -> Result<RetrievalMode<'_>> {
        if let Some(token) = non_empty(self.web_auth_token.as_deref()) {
            return Ok(RetrievalMode::WebSession(WebCredentials::Token(token)));
        }
        if let (Some(account), Some(password)) = (
            non_empty(self.account.as_deref()),
            non_empty(self.password.as_deref()),
        ) {
            return Ok(RetrievalMode::WebSession(WebCredentials::Password {
                account,
                password,
            }));
        }
        if let (Some(user_id), Some(token)) = (
            non_empty(self.user_id.as_deref()),
            non_empty(self.token.as_deref()),
        ) {
            return Ok(RetrievalMode::OpenApi { user_id, token });
        }
        Err(AfdianError::Config(MISSING_CREDENTIALS_MESSAGE.to_string()))
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.exchange_rate.is_zero() {
            return Err(AfdianError::Config(
                "exchange_rate must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
