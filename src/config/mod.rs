//! Configuration modules.
//!
//! Each submodule handles one aspect of configuration, loaded from
//! environment variables once at process start and passed by reference
//! to the components that need it.
//!
//! - [`cors`]: CORS allowed origins
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`email`]: SMTP settings for outbound notifications
//! - [`jwt`]: Access token secret and expiry
//! - [`sms`]: SMS provider settings

pub mod cors;
pub mod database;
pub mod email;
pub mod jwt;
pub mod sms;
