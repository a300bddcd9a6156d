/*
[INPUT]:  API-key identity, shared secret, filtering knobs, page cap
[OUTPUT]: All raw sponsor records, with truncation cause if any
[POS]:    HTTP layer - open query-sponsor pagination (API-key mode)
[UPDATE]: When the open endpoint body, filters, or stop conditions change
*/

use chrono::Utc;
use reqwest::Method;

use crate::http::client::PageStatus;
use crate::http::signature::signed_page_body;
use crate::http::{AfdianClient, Result};
use crate::types::{FetchOutcome, RawSponsorRecord, SponsorPage, Truncation};

const SECONDS_PER_DAY: i64 = 86_400;

/// Subscription/donation product type; anything else is a purchase.
const PRODUCT_TYPE_SUBSCRIPTION: i32 = 0;

/// Knobs for the API-key retrieval mode.
#[derive(Debug, Clone)]
pub struct SponsorQueryOptions {
    /// Keep records whose current plan is a commercial purchase.
    pub include_purchases: bool,
    /// Synthesize an expiry for purchases: update_time + days. 0 disables.
    pub purchase_effectivity_days: i64,
    /// Defensive cap on pagination.
    pub max_pages: u32,
}

impl Default for SponsorQueryOptions {
    fn default() -> Self {
        Self {
            include_purchases: true,
            purchase_effectivity_days: 30,
            max_pages: 1000,
        }
    }
}

impl AfdianClient {
    /// Fetch every sponsor record via the open API.
    ///
    /// POST /api/open/query-sponsor with a signed body per page,
    /// following the server-declared `total_page` (re-read from every
    /// response). Remote failures stop the loop and keep the pages
    /// gathered so far.
    pub async fn fetch_all_sponsors(
        &self,
        user_id: &str,
        token: &str,
        options: &SponsorQueryOptions,
    ) -> Result<FetchOutcome<RawSponsorRecord>> {
        let mut records: Vec<RawSponsorRecord> = Vec::new();
        let mut page: u32 = 1;

        loop {
            if page > options.max_pages {
                tracing::warn!(
                    limit = options.max_pages,
                    "query-sponsor pagination hit page cap"
                );
                return Ok(FetchOutcome::truncated(
                    records,
                    Truncation::PageLimit {
                        limit: options.max_pages,
                    },
                ));
            }

            let ts = Utc::now().timestamp();
            let body = signed_page_body(user_id, token, page, ts);
            let builder = self
                .request(Method::POST, "/api/open/query-sponsor")?
                .json(&body);

            match self.send_page::<SponsorPage>(builder).await? {
                PageStatus::Ok(data) => {
                    let total_page = data.total_page;
                    let list = postprocess_page(data.list, options);
                    tracing::debug!(page, total_page, count = list.len(), "fetched sponsor page");
                    records.extend(list);
                    if page >= total_page {
                        return Ok(FetchOutcome::complete(records));
                    }
                    page += 1;
                }
                PageStatus::HttpError { status } => {
                    tracing::warn!(page, status, "sponsor page failed, keeping partial");
                    return Ok(FetchOutcome::truncated(
                        records,
                        Truncation::HttpStatus { page, status },
                    ));
                }
                PageStatus::ApiError { code, message } => {
                    tracing::warn!(page, code, %message, "sponsor page rejected, keeping partial");
                    return Ok(FetchOutcome::truncated(
                        records,
                        Truncation::ErrorCode {
                            page,
                            code,
                            message,
                        },
                    ));
                }
            }
        }
    }
}

/// Apply the purchase filter and expiry synthesis to one page.
fn postprocess_page(
    mut list: Vec<RawSponsorRecord>,
    options: &SponsorQueryOptions,
) -> Vec<RawSponsorRecord> {
    if !options.include_purchases {
        list.retain(|record| {
            record
                .current_plan
                .as_ref()
                .is_none_or(|plan| plan.product_type == PRODUCT_TYPE_SUBSCRIPTION)
        });
    }

    if options.purchase_effectivity_days > 0 {
        for record in &mut list {
            if let Some(plan) = record.current_plan.as_mut() {
                if plan.product_type != PRODUCT_TYPE_SUBSCRIPTION {
                    plan.expire_time =
                        Some(plan.update_time + options.purchase_effectivity_days * SECONDS_PER_DAY);
                }
            }
        }
    }

    list
}
