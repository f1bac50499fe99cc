//! Identity service seam.

use super::{RemoteError, RemoteResult};
use log::{info, warn};
use std::fmt::{Debug, Formatter};

/// Signed-in user as reported by the identity service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: String,
    pub email: Option<String>,
}

/// Email/password credential. `Debug` never prints the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub email: String,
    pub password: String,
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Whether the login form creates an account or signs into one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

impl AuthMode {
    fn label(self) -> &'static str {
        match self {
            Self::SignIn => "sign_in",
            Self::SignUp => "sign_up",
        }
    }
}

/// Adapter contract for the external identity service.
pub trait IdentityService {
    /// Returns `None` when nobody is signed in.
    fn current_user(&self) -> RemoteResult<Option<UserProfile>>;
    fn sign_in(&self, credential: &Credential) -> RemoteResult<UserProfile>;
    fn sign_up(&self, credential: &Credential) -> RemoteResult<UserProfile>;
    fn sign_out(&self) -> RemoteResult<()>;
}

/// Runs one login-form submission.
///
/// Blank email or password is rejected locally; service errors are returned
/// with their message untouched.
pub fn authenticate(
    service: &dyn IdentityService,
    mode: AuthMode,
    credential: &Credential,
) -> RemoteResult<UserProfile> {
    if credential.email.trim().is_empty() || credential.password.is_empty() {
        return Err(RemoteError::new("Email and password are required."));
    }

    let result = match mode {
        AuthMode::SignIn => service.sign_in(credential),
        AuthMode::SignUp => service.sign_up(credential),
    };
    match &result {
        Ok(_) => info!("event=auth module=remote status=ok mode={}", mode.label()),
        Err(_) => warn!("event=auth module=remote status=error mode={}", mode.label()),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::{authenticate, AuthMode, Credential, IdentityService, UserProfile};
    use crate::remote::{RemoteError, RemoteResult};
    use std::cell::RefCell;

    #[derive(Default)]
    struct MockIdentity {
        calls: RefCell<Vec<&'static str>>,
    }

    impl IdentityService for MockIdentity {
        fn current_user(&self) -> RemoteResult<Option<UserProfile>> {
            Ok(None)
        }

        fn sign_in(&self, credential: &Credential) -> RemoteResult<UserProfile> {
            self.calls.borrow_mut().push("sign_in");
            if credential.password == "right" {
                Ok(UserProfile {
                    id: "user-1".to_string(),
                    email: Some(credential.email.clone()),
                })
            } else {
                Err(RemoteError::new("Invalid login credentials"))
            }
        }

        fn sign_up(&self, _credential: &Credential) -> RemoteResult<UserProfile> {
            self.calls.borrow_mut().push("sign_up");
            Err(RemoteError::new("User already registered"))
        }

        fn sign_out(&self) -> RemoteResult<()> {
            Ok(())
        }
    }

    fn credential(password: &str) -> Credential {
        Credential {
            email: "friend@example.com".to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn service_message_is_surfaced_verbatim() {
        let service = MockIdentity::default();
        let err = authenticate(&service, AuthMode::SignIn, &credential("wrong")).unwrap_err();
        assert_eq!(err.message, "Invalid login credentials");

        let err = authenticate(&service, AuthMode::SignUp, &credential("x")).unwrap_err();
        assert_eq!(err.to_string(), "User already registered");
        assert_eq!(*service.calls.borrow(), vec!["sign_in", "sign_up"]);
    }

    #[test]
    fn successful_sign_in_returns_profile() {
        let service = MockIdentity::default();
        let user = authenticate(&service, AuthMode::SignIn, &credential("right")).unwrap();
        assert_eq!(user.id, "user-1");
    }

    #[test]
    fn blank_credential_never_reaches_service() {
        let service = MockIdentity::default();
        assert!(authenticate(&service, AuthMode::SignIn, &credential("")).is_err());
        assert!(service.calls.borrow().is_empty());
    }

    #[test]
    fn credential_debug_redacts_password() {
        let rendered = format!("{:?}", credential("hunter2"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("redacted"));
    }
}
