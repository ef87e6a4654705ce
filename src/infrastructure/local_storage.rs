use crate::domain::ports::TokenStore;
use crate::domain::session::{ADMIN_TOKEN_KEY, AccessToken};
use crate::error::Result;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// String key/value storage persisted as a JSON object on disk.
///
/// Plays the part of browser local storage: the whole file is read and
/// rewritten on every change, and keys other than the ones we touch are
/// preserved.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(entries)?)?;
        Ok(())
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    pub fn remove_item(&self, key: &str) -> Result<()> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

impl TokenStore for LocalStorage {
    fn load(&self) -> Result<Option<AccessToken>> {
        Ok(self
            .get_item(ADMIN_TOKEN_KEY)?
            .filter(|value| !value.is_empty())
            .map(AccessToken::new))
    }

    fn save(&self, token: &AccessToken) -> Result<()> {
        self.set_item(ADMIN_TOKEN_KEY, token.as_str())
    }

    fn clear(&self) -> Result<()> {
        self.remove_item(ADMIN_TOKEN_KEY)
    }
}
