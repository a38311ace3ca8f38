//! HMAC-SHA256 signatures Shopify puts on query strings and webhooks.

use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Parameters excluded from the signed message.
const UNSIGNED_PARAMS: &[&str] = &["hmac", "signature"];

/// Build the message Shopify signs: every parameter except `hmac` and
/// `signature`, sorted by key, joined as `k=v` pairs with `&`.
fn query_message(params: &BTreeMap<String, String>) -> String {
    params
        .iter()
        .filter(|(k, _)| !UNSIGNED_PARAMS.contains(&k.as_str()))
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

fn mac(secret: &str, message: &[u8]) -> Option<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(message);
    Some(mac)
}

/// Hex signature for a query string, as Shopify computes it.
#[must_use]
pub fn sign_query(params: &BTreeMap<String, String>, secret: &str) -> String {
    mac(secret, query_message(params).as_bytes())
        .map(|m| hex::encode(m.finalize().into_bytes()))
        .unwrap_or_default()
}

/// Verify the `hmac` parameter of a Shopify-signed query string.
///
/// The comparison runs in constant time.
#[must_use]
pub fn verify_query(params: &BTreeMap<String, String>, secret: &str) -> bool {
    let Some(provided) = params.get("hmac") else {
        return false;
    };
    let Ok(provided) = hex::decode(provided) else {
        return false;
    };
    let Some(mac) = mac(secret, query_message(params).as_bytes()) else {
        return false;
    };

    mac.verify_slice(&provided).is_ok()
}

/// Base64 signature for a webhook body.
#[must_use]
pub fn sign_webhook(body: &[u8], secret: &str) -> String {
    mac(secret, body)
        .map(|m| STANDARD.encode(m.finalize().into_bytes()))
        .unwrap_or_default()
}

/// Verify the `X-Shopify-Hmac-Sha256` header of a webhook.
#[must_use]
pub fn verify_webhook(body: &[u8], header: &str, secret: &str) -> bool {
    let Ok(provided) = STANDARD.decode(header.trim()) else {
        return false;
    };
    let Some(mac) = mac(secret, body) else {
        return false;
    };

    mac.verify_slice(&provided).is_ok()
}
