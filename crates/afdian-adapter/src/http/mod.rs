/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod error;
pub mod orders;
pub mod signature;
pub mod sponsors;

pub use error::{AfdianError, Result};
pub use signature::{page_params, sign_request, signed_page_body};
pub use sponsors::SponsorQueryOptions;

pub use client::{AfdianClient, ClientConfig};
