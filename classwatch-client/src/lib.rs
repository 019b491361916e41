// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Classwatch Client
//!
//! HTTP client for a course-progress backend instance.
//!
//! The client owns the whole vertical the coordinator depends on:
//!
//! - [`HttpClient`] / [`RetryStrategy`] - transport with bounded retry on
//!   connect and timeout failures
//! - [`ApiClient`] - token login and member/class graph fetch
//! - [`Session`] - an authenticated session implementing [`ProgressSource`]
//! - [`Reauthorizing`] - a wrapper composed at construction time that
//!   re-authenticates exactly once when a call fails with an auth error and
//!   replays the single failed call
//!
//! Auth failures, connectivity failures, and malformed payloads are kept
//! distinct in [`ClientError`] so callers can classify them.

pub mod api;
pub mod error;
pub mod http;
pub mod parser;
pub mod reauth;
pub mod retry;
pub mod session;

pub use api::ApiClient;
pub use error::ClientError;
pub use http::HttpClient;
pub use reauth::Reauthorizing;
pub use retry::RetryStrategy;
pub use session::{AccountCredentials, ProgressSource, Session};
