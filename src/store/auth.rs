//! Master-key authorization for the Cosmos DB REST API.
//!
//! Each request is signed with HMAC-SHA256 over the verb, resource type,
//! resource link and `x-ms-date`, keyed with the decoded account key.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::StoreError;

type HmacSha256 = Hmac<Sha256>;

/// Format a timestamp as the RFC 1123 date Cosmos expects in `x-ms-date`.
pub fn format_ms_date(now: DateTime<Utc>) -> String {
    now.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Decode a base64 master key.
pub fn decode_master_key(key: &str) -> Result<Vec<u8>, StoreError> {
    STANDARD
        .decode(key.trim())
        .map_err(|e| StoreError::InvalidKey(e.to_string()))
}

/// Build the URL-encoded `authorization` header value.
///
/// `resource_link` is the path of the parent resource without a leading
/// slash, e.g. `dbs/sim/colls/elevator` for a document query.
pub fn master_key_token(
    key: &[u8],
    verb: &str,
    resource_type: &str,
    resource_link: &str,
    ms_date: &str,
) -> Result<String, StoreError> {
    let payload = format!(
        "{}\n{}\n{}\n{}\n\n",
        verb.to_lowercase(),
        resource_type.to_lowercase(),
        resource_link,
        ms_date.to_lowercase()
    );

    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|e| StoreError::InvalidKey(e.to_string()))?;
    mac.update(payload.as_bytes());
    let signature = STANDARD.encode(mac.finalize().into_bytes());

    let token = format!("type=master&ver=1.0&sig={}", signature);
    Ok(url::form_urlencoded::byte_serialize(token.as_bytes()).collect())
}
