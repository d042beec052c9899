//! Authentication module for bearer tokens and stored credentials.
//!
//! This module provides:
//! - `TokenManager`: Verify-before-refresh access token lifecycle
//! - `CredentialStore`: Refresh token storage in the OS keychain via keyring
//!
//! Access tokens are short-lived and only ever held in memory. The refresh
//! token is what gets persisted.

pub mod credentials;
pub mod token;

pub use credentials::CredentialStore;
pub use token::TokenManager;
