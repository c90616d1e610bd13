//! OAT Trace Verification
//!
//! Replays a trace, absorbs every payload into a SHA-256 digest in record
//! order and compares the result with a published digest string.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod observer;
pub mod report;
pub mod verifier;

pub use config::VerifyConfig;
pub use observer::{EventObserver, NoopObserver, TracingObserver};
pub use report::VerificationResult;
pub use verifier::{compute_digest, verify_file, TraceVerifier};
