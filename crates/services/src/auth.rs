use std::sync::{Arc, RwLock};

use tutor_core::model::{Credentials, Registration, User};

use crate::api::TutorApi;
use crate::error::ApiError;
use crate::notify::{Notice, Notifier, report};

/// Session-cookie login and the locally known current user.
#[derive(Clone)]
pub struct AuthService {
    api: Arc<dyn TutorApi>,
    notifier: Arc<dyn Notifier>,
    user: Arc<RwLock<Option<User>>>,
}

impl AuthService {
    #[must_use]
    pub fn new(api: Arc<dyn TutorApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            user: Arc::new(RwLock::new(None)),
        }
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.user.read().ok().and_then(|user| user.clone())
    }

    fn set_user(&self, user: Option<User>) {
        if let Ok(mut slot) = self.user.write() {
            *slot = user;
        }
    }

    /// # Errors
    ///
    /// Returns `ApiError` if the backend rejects the login.
    pub async fn login(&self, username: &str) -> Result<User, ApiError> {
        let credentials = Credentials {
            username: username.to_string(),
        };
        let user = self
            .api
            .login(&credentials)
            .await
            .map_err(|err| report(self.notifier.as_ref(), "login", err))?;
        tracing::info!(user_id = %user.user_id, "logged in");
        self.set_user(Some(user.clone()));
        self.notifier.notify(Notice::success("Welcome back!"));
        Ok(user)
    }

    /// # Errors
    ///
    /// Returns `ApiError` if the backend rejects the registration.
    pub async fn register(&self, username: &str, email: &str) -> Result<User, ApiError> {
        let registration = Registration {
            username: username.to_string(),
            email: email.to_string(),
        };
        let user = self
            .api
            .register(&registration)
            .await
            .map_err(|err| report(self.notifier.as_ref(), "register", err))?;
        tracing::info!(user_id = %user.user_id, "registered");
        self.set_user(Some(user.clone()));
        self.notifier
            .notify(Notice::success("Account created successfully!"));
        Ok(user)
    }

    /// End the backend session, then forget the local user.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the backend call fails; the user stays logged in.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.api
            .logout()
            .await
            .map_err(|err| report(self.notifier.as_ref(), "logout", err))?;
        tracing::info!("logged out");
        self.set_user(None);
        self.notifier.notify(Notice::success("Logged out successfully"));
        Ok(())
    }

    /// Ask the backend who owns the session cookie.
    ///
    /// Returns `Ok(None)` when nobody is logged in.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for failures other than 401.
    pub async fn current_user(&self) -> Result<Option<User>, ApiError> {
        let user = match self.api.current_user().await {
            Ok(user) => Some(user),
            Err(err) if err.is_unauthorized() => None,
            Err(err) => return Err(report(self.notifier.as_ref(), "current user", err)),
        };
        self.set_user(user.clone());
        Ok(user)
    }
}
