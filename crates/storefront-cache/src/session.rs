//! Browsing-session state on top of the key-value store.

use crate::{cache_key, Cache, CacheError};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::marker::PhantomData;

/// A unique session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random session ID (`sess_` + 24 URL-safe characters).
    pub fn generate() -> Self {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
        use rand::Rng;

        let bytes: [u8; 18] = rand::thread_rng().gen();
        Self(format!("sess_{}", URL_SAFE_NO_PAD.encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Stored envelope around the user data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData<T> {
    pub id: SessionId,
    pub data: T,
    /// Incremented on every write.
    pub version: u64,
    /// Unix timestamp of the first write.
    pub created_at: u64,
    /// Unix timestamp of the latest write.
    pub updated_at: u64,
}

/// Session store, generic over the session payload `T`.
///
/// # Example
///
/// ```rust,ignore
/// let sessions = Session::<ShopState>::new(Cache::open(".storefront/store")?);
/// let id = SessionId::generate();
/// let mut state = sessions.get(&id)?.unwrap_or_default();
/// state.liked.push(7);
/// sessions.set(&id, &state)?;
/// ```
pub struct Session<T> {
    cache: Cache,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> Session<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    pub fn new(cache: Cache) -> Self {
        Self {
            cache,
            _phantom: PhantomData,
        }
    }

    pub fn get(&self, id: &SessionId) -> Result<Option<T>, CacheError> {
        Ok(self.get_versioned(id)?.map(|s| s.data))
    }

    /// Full envelope including version and timestamps.
    pub fn get_versioned(&self, id: &SessionId) -> Result<Option<SessionData<T>>, CacheError> {
        self.cache.get(&session_key(id))
    }

    /// Overwrite session data, bumping the version.
    pub fn set(&self, id: &SessionId, data: &T) -> Result<u64, CacheError> {
        let now = current_timestamp();
        let previous = self.get_versioned(id)?;
        let envelope = SessionData {
            id: id.clone(),
            data: data.clone(),
            version: previous.as_ref().map_or(1, |s| s.version + 1),
            created_at: previous.as_ref().map_or(now, |s| s.created_at),
            updated_at: now,
        };
        self.cache.set(&session_key(id), &envelope)?;
        Ok(envelope.version)
    }
}

fn session_key(id: &SessionId) -> String {
    cache_key!("session", id)
}

fn current_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
    struct Liked {
        ids: Vec<i64>,
    }

    #[test]
    fn test_session_id_generate_format() {
        let id = SessionId::generate();
        assert!(id.as_str().starts_with("sess_"));
        // 18 bytes of base64 = 24 chars
        assert_eq!(id.as_str().len(), 29);
        assert_ne!(id, SessionId::generate());
    }

    #[test]
    fn test_session_id_serializes_as_string() {
        let json = serde_json::to_string(&SessionId::new("abc")).unwrap();
        assert_eq!(json, r#""abc""#);
    }

    #[test]
    fn test_unknown_session_is_none() {
        let sessions = Session::<Liked>::new(Cache::in_memory());
        assert!(sessions.get(&SessionId::new("s1")).unwrap().is_none());
    }

    #[test]
    fn test_set_bumps_version_and_keeps_created_at() {
        let sessions = Session::<Liked>::new(Cache::in_memory());
        let id = SessionId::new("s1");

        assert_eq!(sessions.set(&id, &Liked { ids: vec![1] }).unwrap(), 1);
        let first = sessions.get_versioned(&id).unwrap().unwrap();
        assert_eq!(sessions.set(&id, &Liked { ids: vec![1, 2] }).unwrap(), 2);
        let second = sessions.get_versioned(&id).unwrap().unwrap();

        assert_eq!(second.created_at, first.created_at);
        assert_eq!(second.data.ids, vec![1, 2]);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let sessions = Session::<Liked>::new(Cache::in_memory());
        sessions.set(&SessionId::new("a"), &Liked { ids: vec![1] }).unwrap();
        sessions.set(&SessionId::new("b"), &Liked { ids: vec![2] }).unwrap();
        assert_eq!(sessions.get(&SessionId::new("a")).unwrap().unwrap().ids, vec![1]);
    }
}
