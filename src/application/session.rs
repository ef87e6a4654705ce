use crate::domain::ports::{AdminApiRef, NavigatorRef, Notice, NotifierRef, TokenStoreRef};
use crate::domain::session::{AccessToken, AdminCredentials, Route};
use crate::error::{NeuronError, Result};
use std::future::Future;
use tracing::{info, warn};

/// Owns the admin bearer token: login, logout, and the mount-time guard.
///
/// A 401 on any admin request is the only way a session ends besides logout;
/// there is no refresh.
pub struct AdminSession {
    api: AdminApiRef,
    tokens: TokenStoreRef,
    notifier: NotifierRef,
    navigator: NavigatorRef,
}

impl AdminSession {
    pub fn new(
        api: AdminApiRef,
        tokens: TokenStoreRef,
        notifier: NotifierRef,
        navigator: NavigatorRef,
    ) -> Self {
        Self {
            api,
            tokens,
            notifier,
            navigator,
        }
    }

    pub fn api(&self) -> &AdminApiRef {
        &self.api
    }

    pub fn notifier(&self) -> &NotifierRef {
        &self.notifier
    }

    /// Exchanges credentials for a token and stores it.
    pub async fn login(&self, credentials: &AdminCredentials) -> Result<()> {
        if !credentials.is_complete() {
            self.notifier
                .notify(Notice::error("Please enter both username and password"));
            return Err(NeuronError::ValidationError(
                "username and password are required".to_string(),
            ));
        }

        let token = match self.api.login(credentials).await {
            Ok(token) => token,
            Err(e) => {
                warn!(username = %credentials.username, error = %e, "admin login failed");
                self.notifier.notify(Notice::error(
                    e.user_message("Login failed. Please check your credentials."),
                ));
                return Err(e);
            }
        };

        if let Err(e) = self.tokens.save(&token) {
            warn!(error = %e, "failed to store admin token");
            self.notifier
                .notify(Notice::error("Login failed. Could not store the session."));
            return Err(e);
        }
        info!(username = %credentials.username, "admin logged in");
        self.notifier.notify(Notice::success("Login successful!"));
        self.navigator.navigate(Route::AdminDashboard);
        Ok(())
    }

    /// Guard run when a protected view mounts.
    pub fn require_token(&self) -> Result<AccessToken> {
        match self.tokens.load()? {
            Some(token) => Ok(token),
            None => {
                self.notifier
                    .notify(Notice::error("Please login to access dashboard"));
                self.navigator.navigate(Route::AdminLogin);
                Err(NeuronError::Unauthenticated)
            }
        }
    }

    /// Drops the stored token after the backend rejected it.
    pub fn invalidate(&self) {
        if let Err(e) = self.tokens.clear() {
            warn!(error = %e, "failed to clear stored token");
        }
        info!("admin session expired");
        self.notifier
            .notify(Notice::error("Session expired. Please login again."));
        self.navigator.navigate(Route::AdminLogin);
    }

    pub fn logout(&self) -> Result<()> {
        self.tokens.clear()?;
        info!("admin logged out");
        self.notifier.notify(Notice::success("Logged out successfully"));
        self.navigator.navigate(Route::AdminLogin);
        Ok(())
    }

    /// Runs an authenticated request, ending the session if it comes back 401.
    pub async fn authorized<T, F, Fut>(&self, request: F) -> Result<T>
    where
        F: FnOnce(AccessToken) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let token = self.require_token()?;
        let result = request(token).await;
        if let Err(e) = &result
            && e.is_unauthorized()
        {
            self.invalidate();
        }
        result
    }
}
