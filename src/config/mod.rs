//! Configuration modules, each loaded from environment variables with
//! development defaults.
//!
//! - [`cors`]: allowed origins for the storefront
//! - [`database`]: Postgres pool initialization
//! - [`email`]: SMTP settings for the verification mailer
//! - [`jwt`]: session token secret and lifetime

pub mod cors;
pub mod database;
pub mod email;
pub mod jwt;
