//! Shopify session tokens.
//!
//! App Bridge mints a short-lived JWT for every request the embedded page
//! makes (`shopify.idToken()`). It is signed with HS256 using the app's API
//! secret and names the shop in its `dest` claim.
//!
//! Verification checks, in order: structure, algorithm, signature,
//! `exp`/`nbf` (with [`CLOCK_LEEWAY_SECS`] leeway), `aud`, and that `iss`
//! and `dest` name the same shop.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use theme_sections_core::{ShopDomain, ShopDomainError};
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Allowed clock skew between Shopify and this server.
pub const CLOCK_LEEWAY_SECS: i64 = 5;

const ALGORITHM: &str = "HS256";

/// Reasons a session token is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionTokenError {
    #[error("malformed session token")]
    Malformed,
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
    #[error("invalid signature")]
    BadSignature,
    #[error("session token expired")]
    Expired,
    #[error("session token not yet valid")]
    NotYetValid,
    #[error("session token issued for another app")]
    WrongAudience,
    #[error("invalid shop in session token: {0}")]
    InvalidShop(#[from] ShopDomainError),
    #[error("issuer and destination name different shops")]
    ShopMismatch,
}

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    typ: Option<String>,
}

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTokenClaims {
    /// `https://<shop>/admin`
    pub iss: String,
    /// `https://<shop>`
    pub dest: String,
    /// The app's API key.
    pub aud: String,
    /// Staff member ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    pub exp: i64,
    pub nbf: i64,
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
}

/// A verified session token.
#[derive(Debug, Clone)]
pub struct SessionToken {
    shop: ShopDomain,
    claims: SessionTokenClaims,
}

fn signer(secret: &str) -> Result<HmacSha256, SessionTokenError> {
    HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| SessionTokenError::BadSignature)
}

fn decode_segment<T: serde::de::DeserializeOwned>(segment: &str) -> Result<T, SessionTokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| SessionTokenError::Malformed)?;
    serde_json::from_slice(&bytes).map_err(|_| SessionTokenError::Malformed)
}

impl SessionToken {
    /// Verify a raw token at time `now` (Unix seconds).
    ///
    /// # Errors
    ///
    /// Returns the first check that failed; see [`SessionTokenError`].
    pub fn verify(
        token: &str,
        api_key: &str,
        api_secret: &str,
        now: i64,
    ) -> Result<Self, SessionTokenError> {
        let mut parts = token.split('.');
        let (Some(header_b64), Some(claims_b64), Some(signature_b64), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(SessionTokenError::Malformed);
        };

        let header: Header = decode_segment(header_b64)?;
        if header.alg != ALGORITHM {
            return Err(SessionTokenError::UnsupportedAlgorithm(header.alg));
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| SessionTokenError::Malformed)?;
        let mut mac = signer(api_secret)?;
        mac.update(header_b64.as_bytes());
        mac.update(b".");
        mac.update(claims_b64.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| SessionTokenError::BadSignature)?;

        let claims: SessionTokenClaims = decode_segment(claims_b64)?;

        if now > claims.exp + CLOCK_LEEWAY_SECS {
            return Err(SessionTokenError::Expired);
        }
        if now + CLOCK_LEEWAY_SECS < claims.nbf {
            return Err(SessionTokenError::NotYetValid);
        }
        if claims.aud != api_key {
            return Err(SessionTokenError::WrongAudience);
        }

        let shop = ShopDomain::parse(&claims.dest)?;
        let issuer_shop = ShopDomain::parse(claims.iss.trim_end_matches("/admin"))?;
        if issuer_shop != shop {
            return Err(SessionTokenError::ShopMismatch);
        }

        Ok(Self { shop, claims })
    }

    /// Sign `claims` the way Shopify does.
    #[must_use]
    pub fn encode(claims: &SessionTokenClaims, api_secret: &str) -> String {
        let header = Header {
            alg: ALGORITHM.to_string(),
            typ: Some("JWT".to_string()),
        };
        let header_b64 =
            URL_SAFE_NO_PAD.encode(serde_json::to_vec(&header).unwrap_or_default());
        let claims_b64 =
            URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims).unwrap_or_default());

        let signature = signer(api_secret)
            .map(|mut mac| {
                mac.update(header_b64.as_bytes());
                mac.update(b".");
                mac.update(claims_b64.as_bytes());
                URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
            })
            .unwrap_or_default();

        format!("{header_b64}.{claims_b64}.{signature}")
    }

    /// Shop the token was issued for.
    #[must_use]
    pub const fn shop(&self) -> &ShopDomain {
        &self.shop
    }

    #[must_use]
    pub const fn claims(&self) -> &SessionTokenClaims {
        &self.claims
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const KEY: &str = "api-key";
    const SECRET: &str = "api-secret";
    const NOW: i64 = 1_700_000_000;

    fn claims() -> SessionTokenClaims {
        SessionTokenClaims {
            iss: "https://pineapple.myshopify.com/admin".to_string(),
            dest: "https://pineapple.myshopify.com".to_string(),
            aud: KEY.to_string(),
            sub: Some("42".to_string()),
            exp: NOW + 60,
            nbf: NOW - 1,
            iat: NOW - 1,
            jti: Some("f8912129-1af6-4cad-9ca3-76b0f7621087".to_string()),
            sid: None,
        }
    }

    #[test]
    fn test_verify_valid_token() {
        let token = SessionToken::encode(&claims(), SECRET);
        let session = SessionToken::verify(&token, KEY, SECRET, NOW).unwrap();
        assert_eq!(session.shop().as_str(), "pineapple.myshopify.com");
        assert_eq!(session.claims().sub.as_deref(), Some("42"));
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = SessionToken::encode(&claims(), "other-secret");
        assert_eq!(
            SessionToken::verify(&token, KEY, SECRET, NOW).unwrap_err(),
            SessionTokenError::BadSignature
        );
    }

    #[test]
    fn test_verify_rejects_tampered_claims() {
        let token = SessionToken::encode(&claims(), SECRET);
        let mut forged = claims();
        forged.dest = "https://evil.myshopify.com".to_string();
        let forged_b64 = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged).unwrap());

        let mut parts: Vec<&str> = token.split('.').collect();
        parts[1] = &forged_b64;
        let tampered = parts.join(".");

        assert_eq!(
            SessionToken::verify(&tampered, KEY, SECRET, NOW).unwrap_err(),
            SessionTokenError::BadSignature
        );
    }

    #[test]
    fn test_verify_expiry_with_leeway() {
        let token = SessionToken::encode(&claims(), SECRET);
        assert!(SessionToken::verify(&token, KEY, SECRET, NOW + 60 + CLOCK_LEEWAY_SECS).is_ok());
        assert_eq!(
            SessionToken::verify(&token, KEY, SECRET, NOW + 61 + CLOCK_LEEWAY_SECS).unwrap_err(),
            SessionTokenError::Expired
        );
    }

    #[test]
    fn test_verify_not_before() {
        let mut c = claims();
        c.nbf = NOW + 30;
        let token = SessionToken::encode(&c, SECRET);
        assert_eq!(
            SessionToken::verify(&token, KEY, SECRET, NOW).unwrap_err(),
            SessionTokenError::NotYetValid
        );
    }

    #[test]
    fn test_verify_wrong_audience() {
        let token = SessionToken::encode(&claims(), SECRET);
        assert_eq!(
            SessionToken::verify(&token, "another-app", SECRET, NOW).unwrap_err(),
            SessionTokenError::WrongAudience
        );
    }

    #[test]
    fn test_verify_issuer_destination_mismatch() {
        let mut c = claims();
        c.iss = "https://other.myshopify.com/admin".to_string();
        let token = SessionToken::encode(&c, SECRET);
        assert_eq!(
            SessionToken::verify(&token, KEY, SECRET, NOW).unwrap_err(),
            SessionTokenError::ShopMismatch
        );
    }

    #[test]
    fn test_verify_rejects_non_hs256() {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none"}"#);
        let body = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims()).unwrap());
        let token = format!("{header}.{body}.");
        assert_eq!(
            SessionToken::verify(&token, KEY, SECRET, NOW).unwrap_err(),
            SessionTokenError::UnsupportedAlgorithm("none".to_string())
        );
    }

    #[test]
    fn test_verify_malformed() {
        for token in ["", "a.b", "a.b.c.d", "!!!.???.***"] {
            assert_eq!(
                SessionToken::verify(token, KEY, SECRET, NOW).unwrap_err(),
                SessionTokenError::Malformed,
                "token: {token:?}"
            );
        }
    }
}
