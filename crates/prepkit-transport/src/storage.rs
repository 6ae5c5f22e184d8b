//! Durable token storage.
//!
//! The browser original kept the access token under a single
//! `localStorage` key so a page reload could resume the session. The
//! equivalent here is a one-key store: [`FileTokenStore`] persists the
//! token to a file under the platform data directory, and
//! [`MemoryTokenStore`] backs tests and throwaway sessions.
//!
//! The store is read on every outbound request (header injection) and at
//! process start (session restore); it is written on successful login and
//! cleared on logout and on an authorization-denied response.

use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::TransportError;

/// A single-slot, reload-surviving credential store.
///
/// Absence of a token means anonymous. Implementations must be safe to
/// call from any task; all three operations are quick enough to stay
/// synchronous.
pub trait TokenStore: Send + Sync + 'static {
    /// Reads the current token, if any.
    fn load(&self) -> Result<Option<String>, TransportError>;

    /// Replaces the stored token.
    fn store(&self, token: &str) -> Result<(), TransportError>;

    /// Removes the stored token. Removing an absent token is a no-op.
    fn clear(&self) -> Result<(), TransportError>;
}

// ---------------------------------------------------------------------------
// MemoryTokenStore
// ---------------------------------------------------------------------------

/// An in-memory [`TokenStore`]. Nothing survives the process; used by
/// tests and short-lived tools.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with a token already present, as if a prior session had
    /// stored one.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, TransportError> {
        Ok(self.token.lock().expect("token lock poisoned").clone())
    }

    fn store(&self, token: &str) -> Result<(), TransportError> {
        *self.token.lock().expect("token lock poisoned") = Some(token.to_owned());
        Ok(())
    }

    fn clear(&self) -> Result<(), TransportError> {
        *self.token.lock().expect("token lock poisoned") = None;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileTokenStore
// ---------------------------------------------------------------------------

/// A [`TokenStore`] backed by one file on disk.
///
/// The default location is `<platform data dir>/prepkit/token`. The file
/// holds the bare token string; a missing file means anonymous.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store at an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the platform default location.
    ///
    /// # Errors
    /// Fails when the platform reports no data directory (e.g. a stripped
    /// container without `$HOME`).
    pub fn at_default_path() -> Result<Self, TransportError> {
        let base = dirs::data_dir().ok_or_else(|| {
            TransportError::Storage(io::Error::new(
                io::ErrorKind::NotFound,
                "no platform data directory",
            ))
        })?;
        Ok(Self::new(base.join("prepkit").join("token")))
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, TransportError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(token.to_owned()))
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TransportError::Storage(e)),
        }
    }

    fn store(&self, token: &str) -> Result<(), TransportError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(TransportError::Storage)?;
        }
        std::fs::write(&self.path, token).map_err(TransportError::Storage)
    }

    fn clear(&self) -> Result<(), TransportError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TransportError::Storage(e)),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
