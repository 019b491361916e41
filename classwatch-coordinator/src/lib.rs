// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Classwatch Coordinator
//!
//! The periodic-refresh owner for one account: drives the client, rebuilds
//! the normalized snapshot wholesale on every refresh, classifies failures
//! into reauth-required vs transient, and republishes committed snapshots
//! to subscribers over a watch channel.
//!
//! Also home to:
//!
//! - [`AccountRegistry`] - the explicit map from account id to coordinator,
//!   owned by the top-level service (insert on setup, remove on unload)
//! - [`validate_credentials`] - one-shot credential validation with the
//!   user-facing error keys the setup flow renders

pub mod coordinator;
pub mod error;
pub mod registry;
pub mod setup;

pub use coordinator::Coordinator;
pub use error::CoordinatorError;
pub use registry::AccountRegistry;
pub use setup::{validate_credentials, SetupError};
