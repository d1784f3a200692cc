//! API Middleware
//!
//! API key gate and the credential verifiers it can be built with.

use std::future::Future;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use sha2::{Digest, Sha256};

use crate::config::ApiCredential;
use crate::error::AppError;

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "X-API-Key";

// =========================================================================
// Verifiers
// =========================================================================

/// Decides whether a presented credential is acceptable
pub trait Verifier: Send + Sync {
    fn verify(&self, credential: &str) -> bool;
}

/// Accepts exactly one plaintext secret
#[derive(Clone)]
pub struct StaticKeyVerifier {
    secret: String,
}

impl StaticKeyVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl Verifier for StaticKeyVerifier {
    fn verify(&self, credential: &str) -> bool {
        credential == self.secret
    }
}

/// Accepts the credential whose SHA-256 digest matches the stored one
#[derive(Clone)]
pub struct Sha256KeyVerifier {
    digest: [u8; 32],
}

impl Sha256KeyVerifier {
    pub fn new(digest: [u8; 32]) -> Self {
        Self { digest }
    }

    /// Hash `secret` once and keep only the digest
    pub fn from_secret(secret: &str) -> Self {
        let mut digest = [0u8; 32];
        digest.copy_from_slice(&Sha256::digest(secret.as_bytes()));
        Self::new(digest)
    }
}

impl Verifier for Sha256KeyVerifier {
    fn verify(&self, credential: &str) -> bool {
        Sha256::digest(credential.as_bytes()).as_slice() == self.digest.as_slice()
    }
}

/// Build the verifier matching the configured credential
pub fn verifier_for(credential: &ApiCredential) -> Arc<dyn Verifier> {
    match credential {
        ApiCredential::Plain(secret) => Arc::new(StaticKeyVerifier::new(secret.clone())),
        ApiCredential::Sha256(digest) => Arc::new(Sha256KeyVerifier::new(*digest)),
    }
}

// =========================================================================
// Auth gate
// =========================================================================

/// Wraps a handler with a credential check
#[derive(Clone)]
pub struct AuthGate {
    verifier: Arc<dyn Verifier>,
}

impl AuthGate {
    pub fn new(verifier: Arc<dyn Verifier>) -> Self {
        Self { verifier }
    }

    /// Run `next` only if `credential` passes the verifier.
    ///
    /// On rejection `next` is never invoked. On success its output is
    /// returned unchanged.
    pub async fn enforce<F, Fut, T>(&self, credential: &str, next: F) -> Result<T, AppError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        if !self.verifier.verify(credential) {
            return Err(AppError::Unauthorized);
        }

        Ok(next().await)
    }
}

/// Log the request, then check the X-API-Key header.
///
/// A missing or non-UTF-8 header is checked as the empty credential.
pub async fn auth_middleware(
    State(gate): State<AuthGate>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    tracing::info!(method = %method, path = %path, "Incoming request");
    tracing::debug!(headers = ?mask_headers_for_logging(request.headers()), "Request headers");

    let credential = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    match gate.enforce(&credential, || next.run(request)).await {
        Ok(response) => response,
        Err(rejection) => {
            tracing::warn!(method = %method, path = %path, "Rejected request: bad API key");
            rejection.into_response()
        }
    }
}

// =========================================================================
// Header masking
// =========================================================================

/// Headers that should be masked in logs
const SENSITIVE_HEADERS: &[&str] = &["x-api-key", "authorization", "cookie", "set-cookie"];

/// Mask sensitive headers for logging
pub fn mask_headers_for_logging(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let masked_value = if SENSITIVE_HEADERS.contains(&name.as_str()) {
                "[REDACTED]".to_string()
            } else {
                value.to_str().unwrap_or("[invalid utf8]").to_string()
            };
            (name.to_string(), masked_value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn static_gate() -> AuthGate {
        AuthGate::new(Arc::new(StaticKeyVerifier::new("secret123")))
    }

    #[test]
    fn test_static_verifier_exact_match() {
        let verifier = StaticKeyVerifier::new("secret123");

        assert!(verifier.verify("secret123"));
        assert!(!verifier.verify("secret1234"));
        assert!(!verifier.verify("SECRET123"));
        assert!(!verifier.verify(" secret123"));
        assert!(!verifier.verify(""));
    }

    #[test]
    fn test_sha256_verifier() {
        let verifier = Sha256KeyVerifier::from_secret("secret123");

        assert!(verifier.verify("secret123"));
        assert!(!verifier.verify("secret12"));
        assert!(!verifier.verify(""));
    }

    #[test]
    fn test_verifier_for_digest_credential() {
        let mut digest = [0u8; 32];
        digest.copy_from_slice(&Sha256::digest(b"secret123"));
        let verifier = verifier_for(&ApiCredential::Sha256(digest));

        assert!(verifier.verify("secret123"));
        assert!(!verifier.verify("other"));
    }

    #[tokio::test]
    async fn test_gate_passes_result_through() {
        let result = static_gate().enforce("secret123", || async { 42 }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_gate_rejects_without_calling_next() {
        let flag = AtomicBool::new(false);
        let called = &flag;

        for credential in ["", "wrong", "secret12", "secret123 "] {
            let result = static_gate()
                .enforce(credential, move || async move { called.store(true, Ordering::SeqCst) })
                .await;
            assert!(matches!(result, Err(AppError::Unauthorized)));
        }

        assert!(!flag.load(Ordering::SeqCst));
    }

    #[test]
    fn test_mask_headers_for_logging() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", "application/json".parse().unwrap());
        headers.insert("x-api-key", "secret123".parse().unwrap());

        let masked = mask_headers_for_logging(&headers);

        let api_key = masked.iter().find(|(k, _)| k == "x-api-key");
        let content_type = masked.iter().find(|(k, _)| k == "content-type");

        assert_eq!(api_key.unwrap().1, "[REDACTED]");
        assert_eq!(content_type.unwrap().1, "application/json");
    }
}
