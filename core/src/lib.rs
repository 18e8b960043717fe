//! # SelfCruz Core
//!
//! Core business logic for the SelfCruz rental backend's phone login.
//! This crate contains the OTP record entity, the OTP store interface and its
//! in-memory implementation, the OTP service and the error types shared by
//! the outer layers.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::*;
pub use services::*;
pub use repositories::*;
pub use errors::*;
