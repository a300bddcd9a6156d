/*
[INPUT]:  Provider configuration and the HTTP client
[OUTPUT]: Uniform sponsorship records for one creator
[POS]:    Provider layer - orchestrates mode selection, fetch, normalize
[UPDATE]: When the retrieval flow or output contract changes
*/

pub mod config;
pub mod normalize;

use chrono::Utc;

use crate::auth::obtain_session_token;
use crate::http::{AfdianClient, AfdianError, Result, SponsorQueryOptions};
use crate::types::{FetchOutcome, Sponsorship};

pub use config::{AfdianConfig, MISSING_CREDENTIALS_MESSAGE};
pub use normalize::{
    ANONYMOUS_NAME_PREFIX, aggregate_orders, sponsorship_from_aggregate, sponsorship_from_record,
};

use config::{RetrievalMode, WebCredentials};

/// Fetches and normalizes one creator's sponsorships.
///
/// Every fetch builds fresh accumulators; nothing survives across
/// calls. Pagination is strictly sequential.
#[derive(Debug)]
pub struct AfdianProvider {
    client: AfdianClient,
    config: AfdianConfig,
}

impl AfdianProvider {
    /// Create a provider against the production API.
    pub fn new(config: AfdianConfig) -> Result<Self> {
        Self::with_client(AfdianClient::new()?, config)
    }

    /// Create a provider with an explicit client (used by tests).
    pub fn with_client(client: AfdianClient, config: AfdianConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { client, config })
    }

    /// Fetch all sponsorships, fail-soft on remote errors.
    ///
    /// Remote non-success pages truncate the result instead of raising;
    /// use [`AfdianProvider::fetch_report`] to observe the truncation.
    pub async fn fetch_sponsorships(&self) -> Result<Vec<Sponsorship>> {
        Ok(self.fetch_report().await?.into_records())
    }

    /// Fetch all sponsorships together with the truncation cause, if any.
    pub async fn fetch_report(&self) -> Result<FetchOutcome<Sponsorship>> {
        let now = Utc::now().timestamp();

        match self.config.retrieval_mode()? {
            RetrievalMode::WebSession(credentials) => {
                let token = self.resolve_session_token(credentials).await?;
                let outcome = self
                    .client
                    .fetch_all_orders(&token, self.config.max_pages)
                    .await?;

                let aggregates = aggregate_orders(&outcome.records);
                tracing::debug!(
                    orders = outcome.records.len(),
                    sponsors = aggregates.len(),
                    "aggregated sponsored-bill orders"
                );
                let records = aggregates
                    .iter()
                    .map(|aggregate| {
                        sponsorship_from_aggregate(aggregate, self.config.exchange_rate, now)
                    })
                    .collect::<Result<Vec<_>>>()?;

                Ok(FetchOutcome {
                    records,
                    truncation: outcome.truncation,
                })
            }
            RetrievalMode::OpenApi { user_id, token } => {
                let options = SponsorQueryOptions {
                    include_purchases: self.config.include_purchases,
                    purchase_effectivity_days: self.config.purchase_effectivity_days,
                    max_pages: self.config.max_pages,
                };
                let outcome = self
                    .client
                    .fetch_all_sponsors(user_id, token, &options)
                    .await?;

                let records = outcome
                    .records
                    .iter()
                    .map(|record| sponsorship_from_record(record, self.config.exchange_rate, now))
                    .collect::<Result<Vec<_>>>()?;

                Ok(FetchOutcome {
                    records,
                    truncation: outcome.truncation,
                })
            }
        }
    }

    async fn resolve_session_token(&self, credentials: WebCredentials<'_>) -> Result<String> {
        match credentials {
            WebCredentials::Token(token) => Ok(token.to_string()),
            WebCredentials::Password { account, password } => {
                let minted = obtain_session_token(&self.client, account, password).await?;
                if minted.is_empty() {
                    return Err(AfdianError::authentication(
                        "login response carried no auth_token",
                    ));
                }
                Ok(minted)
            }
        }
    }
}
