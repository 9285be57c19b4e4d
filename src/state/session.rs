//! Authentication state machine of the mocked session.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Authentication status of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AuthStatus {
    /// Nobody is signed in.
    #[default]
    Anonymous,
    /// A login round trip is pending.
    Authenticating,
    /// Signed in.
    Authenticated,
}

/// Outcome of starting a login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginTicket {
    /// A round trip was started; carries the attempt number to complete it with.
    Pending(u64),
    /// The session was already signed in, nothing to do.
    AlreadyAuthenticated,
}

/// Session part of the application state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    /// Current status.
    pub status: AuthStatus,
    /// Mock account balance, zero unless authenticated.
    pub balance: f64,
    /// Number of the latest login attempt.
    attempt: u64,
}

impl Session {
    /// Whether the session is signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.status == AuthStatus::Authenticated
    }

    /// Moves to `Authenticating`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::LoginInProgress` if a login is already pending.
    pub fn begin_login(&mut self) -> Result<LoginTicket, StoreError> {
        match self.status {
            AuthStatus::Authenticating => Err(StoreError::LoginInProgress),
            AuthStatus::Authenticated => Ok(LoginTicket::AlreadyAuthenticated),
            AuthStatus::Anonymous => {
                self.attempt += 1;
                self.status = AuthStatus::Authenticating;
                Ok(LoginTicket::Pending(self.attempt))
            }
        }
    }

    /// Completes attempt `attempt` and credits `balance`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::LoginAborted` if the session was logged out (or a
    /// newer attempt started) while the round trip was pending.
    pub fn complete_login(&mut self, attempt: u64, balance: f64) -> Result<(), StoreError> {
        if self.status != AuthStatus::Authenticating || self.attempt != attempt {
            return Err(StoreError::LoginAborted);
        }
        self.status = AuthStatus::Authenticated;
        self.balance = balance;
        Ok(())
    }

    /// Abandons a pending login, returning whether one was pending.
    ///
    /// The attempt number is kept, so the abandoned round trip can no longer
    /// complete.
    pub fn abort_login(&mut self) -> bool {
        if self.status != AuthStatus::Authenticating {
            return false;
        }
        self.status = AuthStatus::Anonymous;
        true
    }

    /// Signs out and clears the balance. Returns the previous status.
    pub fn logout(&mut self) -> AuthStatus {
        let previous = self.status;
        self.status = AuthStatus::Anonymous;
        self.balance = 0.0;
        previous
    }
}

/// Checks that both credential fields were filled in.
///
/// # Errors
///
/// Returns `StoreError::InvalidCredentials` if either field is empty or only
/// whitespace.
pub fn validate_credentials(identifier: &str, secret: &str) -> Result<(), StoreError> {
    if identifier.trim().is_empty() || secret.trim().is_empty() {
        return Err(StoreError::InvalidCredentials);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{
        error::StoreError,
        state::session::{AuthStatus, LoginTicket, Session, validate_credentials},
    };

    #[test]
    fn test_credentials_must_be_filled() {
        assert_eq!(
            validate_credentials("", ""),
            Err(StoreError::InvalidCredentials)
        );
        assert_eq!(
            validate_credentials("user@example.com", "   "),
            Err(StoreError::InvalidCredentials)
        );
        assert!(validate_credentials("user@example.com", "secret").is_ok());
    }

    #[test]
    fn test_login_transitions() {
        let mut session = Session::default();
        assert_eq!(session.status, AuthStatus::Anonymous);

        let LoginTicket::Pending(attempt) = session.begin_login().unwrap() else {
            panic!("expected a pending login");
        };
        assert_eq!(session.status, AuthStatus::Authenticating);
        assert_eq!(session.begin_login(), Err(StoreError::LoginInProgress));

        session.complete_login(attempt, 100.0).unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.balance, 100.0);
        assert_eq!(
            session.begin_login(),
            Ok(LoginTicket::AlreadyAuthenticated)
        );
    }

    #[test]
    fn test_logout_aborts_pending_attempt() {
        let mut session = Session::default();
        let LoginTicket::Pending(first) = session.begin_login().unwrap() else {
            panic!("expected a pending login");
        };

        assert_eq!(session.logout(), AuthStatus::Authenticating);
        let LoginTicket::Pending(second) = session.begin_login().unwrap() else {
            panic!("expected a pending login");
        };

        assert_eq!(
            session.complete_login(first, 1.0),
            Err(StoreError::LoginAborted)
        );
        assert!(session.complete_login(second, 2.0).is_ok());
        assert_eq!(session.balance, 2.0);
    }

    #[test]
    fn test_abort_login_only_touches_pending_attempts() {
        let mut session = Session::default();
        assert!(!session.abort_login());

        let LoginTicket::Pending(attempt) = session.begin_login().unwrap() else {
            panic!("expected a pending login");
        };
        assert!(session.abort_login());
        assert_eq!(session.status, AuthStatus::Anonymous);
        assert_eq!(
            session.complete_login(attempt, 1.0),
            Err(StoreError::LoginAborted)
        );
    }

    #[test]
    fn test_logout_resets_balance() {
        let mut session = Session::default();
        let LoginTicket::Pending(attempt) = session.begin_login().unwrap() else {
            panic!("expected a pending login");
        };
        session.complete_login(attempt, 1250.75).unwrap();

        assert_eq!(session.logout(), AuthStatus::Authenticated);
        assert_eq!(session.status, AuthStatus::Anonymous);
        assert_eq!(session.balance, 0.0);
    }
}
