//! Runtime credential and the session that carries it.

use lessonloom_error::{StageError, StageErrorKind};

/// API credential for the remote service.
///
/// `Debug` is redacted so a credential never ends up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key, for building authenticated requests.
    pub fn expose(&self) -> &str {
        &self.0
    }

    fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(****)")
    }
}

/// Explicit per-caller session passed into every stage call.
///
/// Created on sign-in and cleared on sign-out by whoever owns it. Stages copy
/// the credential out at entry, so replacing it does not affect calls that are
/// already running.
///
/// # Examples
///
/// ```
/// use lessonloom_core::Session;
///
/// let mut session = Session::signed_out();
/// assert!(session.require_credential().is_err());
///
/// session.sign_in("secret");
/// assert_eq!(session.require_credential().unwrap().expose(), "secret");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    credential: Option<Credential>,
}

impl Session {
    /// A session holding the given key.
    pub fn signed_in(key: impl Into<String>) -> Self {
        Self {
            credential: Some(Credential::new(key)),
        }
    }

    /// A session with no credential.
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// Replace the credential.
    pub fn sign_in(&mut self, key: impl Into<String>) {
        self.credential = Some(Credential::new(key));
    }

    /// Drop the credential.
    pub fn sign_out(&mut self) {
        self.credential = None;
    }

    /// Whether a usable credential is present.
    pub fn is_signed_in(&self) -> bool {
        self.credential.as_ref().is_some_and(|c| !c.is_blank())
    }

    /// Snapshot the credential, failing fast when none is configured.
    ///
    /// # Errors
    ///
    /// Returns `MissingCredential` if the slot is empty or blank.
    pub fn require_credential(&self) -> Result<Credential, StageError> {
        match &self.credential {
            Some(credential) if !credential.is_blank() => Ok(credential.clone()),
            _ => Err(StageError::new(StageErrorKind::MissingCredential)),
        }
    }
}
