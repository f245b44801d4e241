//! Shared utilities.
//!
//! - [`errors`]: Application error type and response mapping
//! - [`jwt`]: Access token creation and verification
//! - [`password`]: Password hashing and verification
//! - [`token`]: One-time token generation

pub mod errors;
pub mod jwt;
pub mod password;
pub mod token;
