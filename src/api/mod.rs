//! API module
//!
//! HTTP API endpoints and middleware.

pub mod middleware;
pub mod routes;

pub use middleware::{verifier_for, AuthGate, Sha256KeyVerifier, StaticKeyVerifier, Verifier};
pub use routes::{build_router, create_router};
