use log::warn;
use serde_json::Map;
use serde_json::Value;
use std::fs;
use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::RwLock;
use thiserror::Error;

/// Key the token is stored under in the session file.
pub const SESSION_TOKEN_KEY: &str = "accessToken";

#[derive(Debug, Error)]
pub enum SessionImplError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    JsonSerializerImplError(#[from] serde_json::Error),
}

/// Holds the bearer token of the current admin session.
///
/// A file-backed store keeps the token in a small json object on disk so it
/// survives between runs; an in-memory store forgets it when dropped. There
/// is no expiry tracking: a stale token stays here until the server rejects
/// it and a controller clears it.
pub struct SessionStoreImpl {
    path: Option<PathBuf>,
    token: RwLock<Option<String>>,
}

impl SessionStoreImpl {
    pub fn in_memory() -> Self {
        Self {
            path: None,
            token: RwLock::new(None),
        }
    }

    /// Opens the session file at `path`, loading the token if one was saved.
    /// A missing file is an empty session.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SessionImplError> {
        let path = path.into();
        let token = read_entries(&path)?
            .get(SESSION_TOKEN_KEY)
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(Self {
            path: Some(path),
            token: RwLock::new(token),
        })
    }
}

impl SessionStoreImpl {
    pub fn get_token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.get_token().is_some()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl SessionStoreImpl {
    pub fn set_token(&self, token: &str) -> Result<(), SessionImplError> {
        if let Some(path) = &self.path {
            let mut entries = read_entries(path)?;
            entries.insert(
                SESSION_TOKEN_KEY.to_string(),
                Value::String(token.to_string()),
            );
            write_entries(path, &entries)?;
        }

        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token.to_string());

        Ok(())
    }

    /// Forgets the token. The in-memory copy is dropped even when the session
    /// file can't be rewritten, so no further call goes out with it.
    pub fn clear(&self) -> Result<(), SessionImplError> {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;

        if let Some(path) = &self.path {
            let mut entries = read_entries(path)?;
            if entries.remove(SESSION_TOKEN_KEY).is_some() {
                write_entries(path, &entries)?;
            }
        }

        Ok(())
    }
}

fn read_entries(path: &Path) -> Result<Map<String, Value>, SessionImplError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Map::new()),
        Err(err) => return Err(SessionImplError::IoError(err)),
    };

    if content.trim().is_empty() {
        return Ok(Map::new());
    }

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(entries)) => Ok(entries),
        Ok(_) => {
            warn!("session file {} is not a json object, ignoring it", path.display());
            Ok(Map::new())
        }
        Err(err) => {
            warn!("session file {} is unreadable, ignoring it: {}", path.display(), err);
            Ok(Map::new())
        }
    }
}

fn write_entries(path: &Path, entries: &Map<String, Value>) -> Result<(), SessionImplError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let content = serde_json::to_string_pretty(entries)?;

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    // the file holds a credential, so it is never readable by others
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;

    // an existing file keeps its old mode on open
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    file.write_all(content.as_bytes())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::SessionStoreImpl;
    use super::SESSION_TOKEN_KEY;
    use serde_json::Value;
    use std::fs;

    #[test]
    fn in_memory_store_sets_and_clears() {
        let session = SessionStoreImpl::in_memory();
        assert!(!session.is_authenticated());

        session.set_token("abc").unwrap();
        assert_eq!(session.get_token().as_deref(), Some("abc"));

        session.clear().unwrap();
        assert_eq!(session.get_token(), None);
    }

    #[test]
    fn missing_file_is_an_empty_session() {
        let dir = tempfile::tempdir().unwrap();

        let session = SessionStoreImpl::open(dir.path().join("nested/session.json")).unwrap();

        assert!(!session.is_authenticated());
    }

    #[test]
    fn token_survives_reopening_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mission-control/session.json");

        SessionStoreImpl::open(&path)
            .unwrap()
            .set_token("persisted")
            .unwrap();

        let stored: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(stored[SESSION_TOKEN_KEY], "persisted");
        assert_eq!(
            SessionStoreImpl::open(&path).unwrap().get_token().as_deref(),
            Some("persisted")
        );
    }

    #[test]
    fn clear_removes_only_the_token_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, r#"{"accessToken": "old", "theme": "dark"}"#).unwrap();

        let session = SessionStoreImpl::open(&path).unwrap();
        assert_eq!(session.get_token().as_deref(), Some("old"));
        session.clear().unwrap();

        let stored: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(stored.get(SESSION_TOKEN_KEY).is_none());
        assert_eq!(stored["theme"], "dark");
        assert!(!SessionStoreImpl::open(&path).unwrap().is_authenticated());
    }

    #[test]
    fn corrupt_file_is_an_empty_session_that_can_be_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{\"accessToken\": ").unwrap();

        let session = SessionStoreImpl::open(&path).unwrap();
        assert!(!session.is_authenticated());
        session.clear().unwrap();

        session.set_token("fresh").unwrap();
        let stored: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(stored[SESSION_TOKEN_KEY], "fresh");
    }

    #[cfg(unix)]
    #[test]
    fn session_file_is_private_to_the_owner() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let created = dir.path().join("created.json");
        let existing = dir.path().join("existing.json");
        fs::write(&existing, "{}").unwrap();
        fs::set_permissions(&existing, fs::Permissions::from_mode(0o644)).unwrap();

        for path in [&created, &existing] {
            SessionStoreImpl::open(path).unwrap().set_token("abc").unwrap();

            let mode = fs::metadata(path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }
}
