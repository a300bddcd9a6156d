/*
[INPUT]:  API token, canonical page params, timestamp, user id
[OUTPUT]: Signed request body for the open query-sponsor endpoint
[POS]:    HTTP layer - request signing for the API-key mode
[UPDATE]: When the signing concatenation or body format changes
*/

use md5::{Digest, Md5};

/// Canonical JSON serialization of the per-page params object.
pub fn page_params(page: u32) -> String {
    serde_json::json!({ "page": page }).to_string()
}

/// Sign one page request.
///
/// Digest is MD5 over the literal concatenation
/// `token + "params" + params + "ts" + ts + "user_id" + user_id`,
/// returned as lowercase hex. Identical inputs always yield the same
/// digest.
pub fn sign_request(token: &str, params: &str, ts: i64, user_id: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(token.as_bytes());
    hasher.update(b"params");
    hasher.update(params.as_bytes());
    hasher.update(b"ts");
    hasher.update(ts.to_string().as_bytes());
    hasher.update(b"user_id");
    hasher.update(user_id.as_bytes());
    hex::encode(hasher.finalize())
}

/// Build the POST body `{user_id, params, ts, sign}` for one page.
pub fn signed_page_body(user_id: &str, token: &str, page: u32, ts: i64) -> serde_json::Value {
    let params = page_params(page);
    let sign = sign_request(token, &params, ts, user_id);
    serde_json::json!({
        "user_id": user_id,
        "params": params,
        "ts": ts,
        "sign": sign,
    })
}
