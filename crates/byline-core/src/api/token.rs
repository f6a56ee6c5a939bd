//! Bearer credential storage.
//!
//! A single named slot in `${BYLINE_HOME}/token.json`, written with
//! restricted permissions (0600). The slot is overwritten wholesale on
//! login and removed wholesale on logout; tokens are never logged in full.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// On-disk shape of the credential slot.
#[derive(Debug, Default, Serialize, Deserialize)]
struct TokenSlot {
    #[serde(skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
}

/// Owned handle to the durable credential slot.
///
/// At most one credential is active at a time: `set` overwrites, never
/// merges. Every other component only reads; `set` and `clear` are the
/// only mutation points. Concurrent writers are last-write-wins.
#[derive(Debug)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Creates a store backed by a specific file.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Creates a store backed by the default slot under `BYLINE_HOME`.
    pub fn from_default_path() -> Self {
        Self::new(paths::token_path())
    }

    /// Returns the current credential, or `None` when the slot is empty.
    ///
    /// No token-shape validation happens here; that is the server's job.
    ///
    /// # Errors
    /// Returns an error if the slot exists but cannot be read or parsed.
    pub fn get(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read credential from {}", self.path.display()))?;

        let slot: TokenSlot = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse credential from {}", self.path.display()))?;

        Ok(slot.access_token.filter(|token| !token.is_empty()))
    }

    /// Persists a credential, replacing any previous one.
    ///
    /// # Errors
    /// Returns an error if the slot cannot be written.
    pub fn set(&self, token: &str) -> Result<()> {
        let slot = TokenSlot {
            access_token: Some(token.to_string()),
        };
        self.write_slot(&slot)
    }

    /// Removes the credential. Clearing an empty slot is not an error.
    ///
    /// # Errors
    /// Returns an error if the slot exists but cannot be removed.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| {
                format!("Failed to remove credential at {}", self.path.display())
            }),
        }
    }

    fn write_slot(&self, slot: &TokenSlot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents = serde_json::to_string_pretty(slot).context("Failed to serialize credential")?;

        // Write with restricted permissions
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }
}

/// Returns a masked version of a token for display (first 8 chars + ...).
pub fn mask_token(token: &str) -> String {
    if token.len() <= 12 {
        return "***".to_string();
    }
    format!("{}...", &token[..8])
}
