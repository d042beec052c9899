use anyhow::{Context, Result};
use keyring::Entry;

const SERVICE_NAME: &str = "lifter-api";

/// Keychain account the refresh token is stored under
const REFRESH_TOKEN_ACCOUNT: &str = "refresh-token";

/// OS keychain storage for the long-lived refresh token.
pub struct CredentialStore;

impl CredentialStore {
    fn entry() -> Result<Entry> {
        Entry::new(SERVICE_NAME, REFRESH_TOKEN_ACCOUNT).context("Failed to create keyring entry")
    }

    /// Store the refresh token in the OS keychain
    pub fn store(refresh_token: &str) -> Result<()> {
        Self::entry()?
            .set_password(refresh_token)
            .context("Failed to store refresh token in keychain")?;
        Ok(())
    }

    /// Retrieve the stored refresh token, if there is one
    pub fn refresh_token() -> Result<Option<String>> {
        match Self::entry()?.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e).context("Failed to retrieve refresh token from keychain"),
        }
    }

    /// Delete the stored refresh token
    pub fn delete() -> Result<()> {
        match Self::entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e).context("Failed to delete refresh token from keychain"),
        }
    }
}
