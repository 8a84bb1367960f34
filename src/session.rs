use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{AuthError, CredentialVerifier};
use crate::models::{Identity, Role};

pub const SESSION_FILE: &str = "session.json";

/// Wire shape of the persisted session record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedSession {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub role: Option<String>,
}

impl PersistedSession {
    fn from_identity(identity: &Identity) -> PersistedSession {
        PersistedSession {
            id: identity.id.clone(),
            email: identity.email.clone(),
            user_metadata: UserMetadata {
                role: Some(identity.role.as_str().to_string()),
            },
        }
    }

    /// Missing or unknown role metadata resolves to Employee.
    fn into_identity(self) -> Identity {
        let role = self
            .user_metadata
            .role
            .as_deref()
            .map(Role::from_str_or_default)
            .unwrap_or(Role::Employee);
        Identity {
            id: self.id,
            email: self.email,
            role,
        }
    }
}

/// Storage seam for the session record, so local persistence can later be
/// swapped for a server-issued token without touching the manager.
pub trait SessionStore {
    fn load(&self) -> anyhow::Result<Option<PersistedSession>>;
    fn save(&self, record: &PersistedSession) -> anyhow::Result<()>;
    fn clear(&self) -> anyhow::Result<()>;
}

pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: &Path) -> FileStore {
        FileStore {
            path: data_dir.join(SESSION_FILE),
        }
    }
}

impl SessionStore for FileStore {
    fn load(&self) -> anyhow::Result<Option<PersistedSession>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err).context("failed to read session record"),
        };
        let record = serde_json::from_str(&raw).context("session record is not valid JSON")?;
        Ok(Some(record))
    }

    fn save(&self, record: &PersistedSession) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(record)?;
        std::fs::write(&self.path, raw).context("failed to write session record")?;
        Ok(())
    }

    fn clear(&self) -> anyhow::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).context("failed to clear session record"),
        }
    }
}

pub struct SessionManager<V, S> {
    verifier: V,
    store: S,
    identity: Option<Identity>,
    loading: bool,
}

impl<V: CredentialVerifier, S: SessionStore> SessionManager<V, S> {
    pub fn new(verifier: V, store: S) -> SessionManager<V, S> {
        SessionManager {
            verifier,
            store,
            identity: None,
            loading: true,
        }
    }

    /// Reads the persisted record once at startup. A malformed record is
    /// treated as no session; `loading` flips to false on every path.
    pub async fn restore_session(&mut self) -> Option<Identity> {
        if !self.loading {
            return self.identity.clone();
        }
        let restored = match self.store.load() {
            Ok(Some(record)) => Some(record.into_identity()),
            Ok(None) => None,
            Err(err) => {
                tracing::warn!("discarding unreadable session record: {err:#}");
                None
            }
        };
        self.identity = restored.clone();
        self.loading = false;
        restored
    }

    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let role = self
            .verifier
            .verify(email, password)
            .ok_or(AuthError::InvalidCredentials)?;
        let id = match role {
            Role::Manager => "manager-123".to_string(),
            Role::Employee => "employee-456".to_string(),
        };
        let identity = Identity {
            id,
            email: email.to_string(),
            role,
        };
        self.authenticate(identity.clone());
        Ok(identity)
    }

    /// Demo mode: no uniqueness or verification checks, the password is
    /// never stored.
    pub async fn sign_up(
        &mut self,
        email: &str,
        _password: &str,
        role: Role,
        consent: bool,
    ) -> Result<Identity, AuthError> {
        if !consent {
            return Err(AuthError::ConsentRequired);
        }
        let identity = Identity {
            id: format!("{}-{}", role.as_str(), Uuid::new_v4()),
            email: email.to_string(),
            role,
        };
        self.authenticate(identity.clone());
        Ok(identity)
    }

    /// Idempotent: signing out twice is not an error.
    pub async fn sign_out(&mut self) {
        self.identity = None;
        self.loading = false;
        if let Err(err) = self.store.clear() {
            tracing::warn!("failed to clear persisted session: {err:#}");
        }
    }

    fn authenticate(&mut self, identity: Identity) {
        // The in-memory session stays authenticated even when the write
        // fails; the worst outcome is a session that does not survive a
        // restart.
        if let Err(err) = self.store.save(&PersistedSession::from_identity(&identity)) {
            tracing::warn!("failed to persist session: {err:#}");
        }
        self.identity = Some(identity);
        self.loading = false;
    }

    pub fn current(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.identity.as_ref().map(|identity| identity.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{DemoCredentials, EMPLOYEE_EMAIL, EMPLOYEE_PASSWORD, MANAGER_EMAIL, MANAGER_PASSWORD};
    use tempfile::TempDir;

    fn manager_in(dir: &TempDir) -> SessionManager<DemoCredentials, FileStore> {
        SessionManager::new(DemoCredentials, FileStore::new(dir.path()))
    }

    #[tokio::test]
    async fn sign_in_accepts_demo_accounts() {
        let dir = TempDir::new().unwrap();
        let mut sessions = manager_in(&dir);

        let identity = sessions.sign_in(MANAGER_EMAIL, MANAGER_PASSWORD).await.unwrap();
        assert_eq!(identity.role, Role::Manager);
        assert_eq!(identity.id, "manager-123");
        assert_eq!(sessions.current(), Some(&identity));
        assert!(dir.path().join(SESSION_FILE).exists());
    }

    #[tokio::test]
    async fn sign_in_rejects_unknown_pairs_without_state_change() {
        let dir = TempDir::new().unwrap();
        let mut sessions = manager_in(&dir);

        let result = sessions.sign_in(MANAGER_EMAIL, "wrong").await;
        assert_eq!(result, Err(AuthError::InvalidCredentials));
        assert!(sessions.current().is_none());
        assert!(!dir.path().join(SESSION_FILE).exists());
    }

    #[tokio::test]
    async fn sign_up_without_consent_never_mutates_state() {
        let dir = TempDir::new().unwrap();
        let mut sessions = manager_in(&dir);

        let result = sessions
            .sign_up("new@demo.com", "pw", Role::Manager, false)
            .await;
        assert_eq!(result, Err(AuthError::ConsentRequired));
        assert!(sessions.current().is_none());
        assert!(!dir.path().join(SESSION_FILE).exists());
    }

    #[tokio::test]
    async fn sign_up_with_consent_uses_the_requested_role() {
        let dir = TempDir::new().unwrap();
        let mut sessions = manager_in(&dir);

        let identity = sessions
            .sign_up("new@demo.com", "pw", Role::Manager, true)
            .await
            .unwrap();
        assert_eq!(identity.role, Role::Manager);
        assert!(identity.id.starts_with("manager-"));
        assert_eq!(sessions.role(), Some(Role::Manager));
    }

    #[tokio::test]
    async fn session_survives_a_restart() {
        let dir = TempDir::new().unwrap();
        let mut first = manager_in(&dir);
        let signed_in = first.sign_in(EMPLOYEE_EMAIL, EMPLOYEE_PASSWORD).await.unwrap();

        let mut second = manager_in(&dir);
        assert!(second.loading);
        let restored = second.restore_session().await;
        assert_eq!(restored, Some(signed_in));
        assert!(!second.loading);
    }

    #[tokio::test]
    async fn sign_out_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let mut sessions = manager_in(&dir);
        sessions.sign_in(MANAGER_EMAIL, MANAGER_PASSWORD).await.unwrap();

        sessions.sign_out().await;
        sessions.sign_out().await;
        assert!(sessions.current().is_none());
        assert!(!dir.path().join(SESSION_FILE).exists());

        let mut next = manager_in(&dir);
        assert_eq!(next.restore_session().await, None);
    }

    #[tokio::test]
    async fn restore_reads_the_store_only_once() {
        let dir = TempDir::new().unwrap();
        let mut sessions = manager_in(&dir);
        sessions.sign_in(MANAGER_EMAIL, MANAGER_PASSWORD).await.unwrap();

        // A later write from elsewhere is not re-read mid-session.
        std::fs::write(dir.path().join(SESSION_FILE), "{}").unwrap();
        let restored = sessions.restore_session().await;
        assert_eq!(restored.map(|identity| identity.role), Some(Role::Manager));
    }

    #[tokio::test]
    async fn malformed_record_restores_to_no_session() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(SESSION_FILE), "{not json").unwrap();

        let mut sessions = manager_in(&dir);
        assert_eq!(sessions.restore_session().await, None);
        assert!(!sessions.loading);
    }

    #[tokio::test]
    async fn unknown_persisted_role_defaults_to_employee() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(SESSION_FILE),
            r#"{"id":"legacy-1","email":"legacy@demo.com","user_metadata":{"role":"admin"}}"#,
        )
        .unwrap();

        let mut sessions = manager_in(&dir);
        let restored = sessions.restore_session().await.unwrap();
        assert_eq!(restored.role, Role::Employee);
    }

    #[tokio::test]
    async fn missing_role_metadata_defaults_to_employee() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(SESSION_FILE),
            r#"{"id":"legacy-2","email":"legacy@demo.com"}"#,
        )
        .unwrap();

        let mut sessions = manager_in(&dir);
        let restored = sessions.restore_session().await.unwrap();
        assert_eq!(restored.role, Role::Employee);
    }
}
