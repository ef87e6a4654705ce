use crate::domain::ports::TokenStore;
use crate::domain::session::AccessToken;
use crate::error::Result;
use std::sync::{Arc, PoisonError, RwLock};

/// A token slot that lives only as long as the process.
///
/// Cloning shares the slot, which lets tests inspect what a controller
/// stored.
#[derive(Default, Clone)]
pub struct InMemoryTokenStore {
    token: Arc<RwLock<Option<AccessToken>>>,
}

impl InMemoryTokenStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `token`.
    pub fn with_token(token: AccessToken) -> Self {
        Self {
            token: Arc::new(RwLock::new(Some(token))),
        }
    }
}

impl TokenStore for InMemoryTokenStore {
    fn load(&self) -> Result<Option<AccessToken>> {
        Ok(self
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, token: &AccessToken) -> Result<()> {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
