//! Client for the external virtual try-on API.
//!
//! One fixed endpoint, one request shape: a multipart form carrying the model
//! image, the garment image (inline or by URL), the category and an optional
//! description, authenticated with a bearer token. Every call is a single
//! attempt; retrying is left to the caller.

pub mod client;
pub mod credential;
pub mod error;
pub mod metrics;
pub mod types;


pub use client::{TryOnClient, TryOnClientConfig, DEFAULT_ENDPOINT};
pub use credential::Credential;
pub use error::{ClientError, ClientResult};
pub use types::TryOnOutput;
