//! Identity module: login and session tokens
//!
//! `AuthService` turns Basic credentials into a signed session token and
//! resolves incoming tokens back to a live user.

pub mod service;

pub use service::{AuthService, AuthenticatedUser, Session, BASIC_HEADER, TOKEN_HEADER};
