/// Gateway kernel - signing and transport
///
/// The kernel holds the two pieces with a wire contract: deterministic
/// request canonicalization/signing, and the HTTP transport that posts
/// signed envelopes and unwraps replies.
///
/// # Architecture
///
/// - `RequestSigner`: canonicalizes parameters and computes the request
///   signature over `(timestamp, project, action, params, secret)`.
/// - `Transport`: pluggable call interface the action facade delegates to.
/// - `ReqwestTransport`: reqwest-backed implementation, one best-effort
///   POST per call with per-category failure mapping.
///
/// All components are trait-based where a seam matters, so tests can inject
/// a recording transport instead of hitting the network.
pub mod rest;
pub mod signer;

// Re-export key types for convenience
pub use rest::{ReqwestTransport, Transport, TransportConfig};
pub use signer::{canonicalize, RequestSigner};
