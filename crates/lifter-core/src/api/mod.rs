//! REST API client module for the Lifter weightlifting API.
//!
//! This module provides the `LifterClient` for listing, reading, creating,
//! editing and deleting athletes, competitions, sessions and lifts.
//!
//! Reads are anonymous. Writes carry a JWT bearer token minted from the
//! caller's refresh token by `auth::TokenManager`.

pub mod athletes;
pub mod client;
pub mod competitions;
pub mod error;
pub mod guard;
pub mod lifts;
pub mod sessions;

pub use client::{is_not_found, LifterClient};
pub use error::ApiError;
pub use guard::ResourceRefs;
