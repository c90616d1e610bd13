//! OAT Core Types
//!
//! Record kinds, SHA-256 digests and the error taxonomy shared by the
//! trace decoder and the verifier. No I/O happens here.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod hash;
pub mod kind;

// Re-exports
pub use error::{CoreError, CoreResult, MalformedTrace};
pub use hash::{Digest, DigestState};
pub use kind::EventKind;
