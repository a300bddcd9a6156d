/*
[INPUT]:  Raw Afdian response envelopes
[OUTPUT]: Typed response wrappers and pagination outcomes
[POS]:    Data layer - response envelope and partial-result types
[UPDATE]: When envelope fields or truncation causes change
*/

use serde::Deserialize;

use super::models::{RawOrder, RawSponsorRecord};

/// Remote success value of the envelope `ec` field.
pub const EC_OK: i64 = 200;

/// Common `{ec, em, data}` wrapper around every Afdian response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub ec: i64,
    #[serde(default)]
    pub em: String,
    #[serde(default)]
    pub data: Option<T>,
}

/// One page of the sponsored-bill endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderPage {
    #[serde(default)]
    pub list: Vec<RawOrder>,
    /// 1 while the server has further pages.
    #[serde(default)]
    pub has_more: i64,
}

/// One page of the open query-sponsor endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SponsorPage {
    #[serde(default)]
    pub list: Vec<RawSponsorRecord>,
    /// Server-declared page count, re-read from every response.
    #[serde(default)]
    pub total_page: u32,
}

/// Payload of the passport login endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginData {
    #[serde(default)]
    pub auth_token: Option<String>,
}

/// Why a paginated fetch stopped before the server ran out of pages.
#[derive(Debug, Clone, PartialEq)]
pub enum Truncation {
    /// Transport-level non-success status on the given page.
    HttpStatus { page: u32, status: u16 },
    /// Envelope `ec` was not the success value on the given page.
    ErrorCode { page: u32, code: i64, message: String },
    /// Defensive page cap reached.
    PageLimit { limit: u32 },
}

/// Accumulated records plus the truncation cause, if any.
///
/// Remote failures truncate instead of erroring; callers that only want
/// the fail-soft list use [`FetchOutcome::into_records`].
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome<T> {
    pub records: Vec<T>,
    pub truncation: Option<Truncation>,
}

impl<T> FetchOutcome<T> {
    pub fn complete(records: Vec<T>) -> Self {
        Self {
            records,
            truncation: None,
        }
    }

    pub fn truncated(records: Vec<T>, cause: Truncation) -> Self {
        Self {
            records,
            truncation: Some(cause),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.truncation.is_none()
    }

    pub fn into_records(self) -> Vec<T> {
        self.records
    }
}
