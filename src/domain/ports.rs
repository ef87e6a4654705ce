use super::payment::{
    CheckoutOptions, CheckoutOutcome, PaymentOrder, PaymentOrderRequest, PaymentVerification,
    VerificationReceipt,
};
use super::registration::{Registration, RegistrationForm, RegistrationReceipt};
use super::session::{AccessToken, AdminCredentials, Route};
use super::stats::RegistrationStats;
use crate::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

/// Public, unauthenticated backend calls made by the registration flow.
#[async_trait]
pub trait RegistrationApi: Send + Sync {
    async fn create_registration(&self, form: &RegistrationForm) -> Result<RegistrationReceipt>;
    async fn create_order(&self, request: &PaymentOrderRequest) -> Result<PaymentOrder>;
    async fn verify_payment(
        &self,
        verification: &PaymentVerification,
    ) -> Result<VerificationReceipt>;
}

/// Admin backend calls. Everything except `login` needs a bearer token.
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn login(&self, credentials: &AdminCredentials) -> Result<AccessToken>;
    async fn registrations(&self, token: &AccessToken) -> Result<Vec<Registration>>;
    async fn stats(&self, token: &AccessToken) -> Result<RegistrationStats>;
    async fn export(&self, token: &AccessToken) -> Result<Vec<u8>>;
}

/// The third-party checkout widget.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Makes the widget available. Called at most once per successful load.
    async fn load(&self) -> Result<()>;
    /// Opens the widget and resolves when the participant pays or closes it.
    async fn open(&self, options: &CheckoutOptions) -> Result<CheckoutOutcome>;
}

/// Persisted slot for the admin bearer token.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<AccessToken>>;
    fn save(&self, token: &AccessToken) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Destination for files the user downloads.
pub trait DownloadSink: Send + Sync {
    fn save(&self, filename: &str, contents: &[u8]) -> Result<PathBuf>;
}

pub type RegistrationApiRef = Arc<dyn RegistrationApi>;
pub type AdminApiRef = Arc<dyn AdminApi>;
pub type PaymentGatewayRef = Arc<dyn PaymentGateway>;
pub type TokenStoreRef = Arc<dyn TokenStore>;
pub type NotifierRef = Arc<dyn Notifier>;
pub type NavigatorRef = Arc<dyn Navigator>;
