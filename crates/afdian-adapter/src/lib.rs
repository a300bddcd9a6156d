/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Afdian adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod provider;
pub mod types;

// Re-export commonly used types from auth
pub use auth::obtain_session_token;

// Re-export commonly used types from http
pub use http::{
    AfdianClient,
    AfdianError,
    ClientConfig,
    Result,
    SponsorQueryOptions,
    sign_request,
};

// Re-export the provider surface
pub use provider::{
    AfdianConfig,
    AfdianProvider,
    MISSING_CREDENTIALS_MESSAGE,
};

// Re-export all types
pub use types::*;
