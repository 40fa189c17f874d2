//! Bearer credentials and where they are kept between sessions.

use crate::error::Result;
use secrecy::{ExposeSecret, SecretString};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// A bearer token, attached as `Authorization: Bearer <token>`.
///
/// The token is never printed by `Debug`.
#[derive(Clone, Debug)]
pub struct Credentials {
    token: SecretString,
}

impl Credentials {
    /// Wrap a token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::new(token.into().into_boxed_str()),
        }
    }

    /// The raw token.
    pub fn token(&self) -> &str {
        self.token.expose_secret()
    }

    pub(crate) fn authorization(&self) -> String {
        format!("Bearer {}", self.token())
    }
}

impl From<SecretString> for Credentials {
    fn from(token: SecretString) -> Self {
        Self { token }
    }
}

/// Persistent storage for the session token.
pub trait TokenStore: Send + Sync {
    /// The stored credentials, if any.
    fn load(&self) -> Result<Option<Credentials>>;

    /// Replace the stored credentials.
    fn save(&self, credentials: &Credentials) -> Result<()>;

    /// Forget the stored credentials. Clearing an empty store is not an error.
    fn clear(&self) -> Result<()>;
}

/// Process-local token store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<Credentials>>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<Credentials>> {
        Ok(self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, credentials: &Credentials) -> Result<()> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(credentials.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).take();
        Ok(())
    }
}

/// Token store backed by a single file holding the raw token.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store the token at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store the token in `dir`, under the conventional
    /// [`TOKEN_STORE_KEY`](crate::TOKEN_STORE_KEY) file name.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(crate::TOKEN_STORE_KEY))
    }

    /// Location of the token file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<Credentials>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| Credentials::new(token)))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, credentials: &Credentials) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, credentials.token())?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
