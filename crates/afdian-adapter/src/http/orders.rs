/*
[INPUT]:  Web-session auth token and page cap
[OUTPUT]: All raw sponsorship orders, with truncation cause if any
[POS]:    HTTP layer - sponsored-bill pagination (web-session mode)
[UPDATE]: When the bill endpoint query template or stop conditions change
*/

use reqwest::{Method, header};

use crate::http::client::PageStatus;
use crate::http::{AfdianClient, Result};
use crate::types::{FetchOutcome, OrderPage, RawOrder, Truncation};

/// Server flag value meaning "further pages exist".
const HAS_MORE: i64 = 1;

impl AfdianClient {
    /// Fetch every sponsored-bill order for the authenticated creator.
    ///
    /// GET /api/my/sponsored-bill-filter, page by page, following the
    /// server's `has_more` flag. A remote failure stops the loop and
    /// keeps the pages gathered so far; `max_pages` caps a server that
    /// never clears the flag.
    pub async fn fetch_all_orders(
        &self,
        auth_token: &str,
        max_pages: u32,
    ) -> Result<FetchOutcome<RawOrder>> {
        let mut records: Vec<RawOrder> = Vec::new();
        let mut page: u32 = 1;

        loop {
            if page > max_pages {
                tracing::warn!(limit = max_pages, "sponsored-bill pagination hit page cap");
                return Ok(FetchOutcome::truncated(
                    records,
                    Truncation::PageLimit { limit: max_pages },
                ));
            }

            let endpoint = format!(
                "/api/my/sponsored-bill-filter?page={page}\
                 &sort_field=update_time&sort_value=desc&is_redeem=0\
                 &plan_id=&sign_status=&has_remark=0&status=&order_id=\
                 &nick_name=&remark=&express_no="
            );
            let builder = self
                .request(Method::GET, &endpoint)?
                .header(header::COOKIE, format!("auth_token={auth_token}"));

            match self.send_page::<OrderPage>(builder).await? {
                PageStatus::Ok(data) => {
                    let has_more = data.has_more == HAS_MORE;
                    tracing::debug!(page, count = data.list.len(), "fetched sponsored-bill page");
                    records.extend(data.list);
                    if !has_more {
                        return Ok(FetchOutcome::complete(records));
                    }
                    page += 1;
                }
                PageStatus::HttpError { status } => {
                    tracing::warn!(page, status, "sponsored-bill page failed, keeping partial");
                    return Ok(FetchOutcome::truncated(
                        records,
                        Truncation::HttpStatus { page, status },
                    ));
                }
                PageStatus::ApiError { code, message } => {
                    tracing::warn!(page, code, %message, "sponsored-bill page rejected, keeping partial");
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
