/*
[INPUT]:  Account credentials and the HTTP client
[OUTPUT]: Web-session auth token
[POS]:    Auth layer - credential-encryption login flow
[UPDATE]: When the login handshake or its crypto constants change
*/

pub mod handshake;

pub use handshake::obtain_session_token;
