use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage key the admin bearer token lives under.
pub const ADMIN_TOKEN_KEY: &str = "admin_token";

/// Views the client can be sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    AdminLogin,
    AdminDashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::AdminLogin => "/admin",
            Route::AdminDashboard => "/admin/dashboard",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Opaque bearer token issued on admin login.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Response body of `POST /auth/admin-login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: AccessToken,
    #[serde(default)]
    pub token_type: Option<String>,
}
