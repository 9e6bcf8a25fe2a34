use crate::{infra::kv_store::KeyValueStore, usecases::session_store::SessionStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoutOutcome {
    pub was_signed_in: bool,
}

/// Drops any saved session. Safe to run when nobody is signed in.
pub fn logout_and_reset<S: KeyValueStore>(sessions: &mut SessionStore<S>) -> LogoutOutcome {
    let was_signed_in = sessions.restore().is_some();
    sessions.logout();

    LogoutOutcome { was_signed_in }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use super::*;
    use crate::{
        infra::kv_store::{FileStore, KeyValueStore},
        usecases::session_store::{MockAuthenticator, IDENTITY_KEY, TOKEN_KEY},
    };

    fn sessions(storage: FileStore) -> SessionStore<FileStore> {
        SessionStore::new(storage, Arc::new(MockAuthenticator::new(Duration::ZERO)))
    }

    #[tokio::test]
    async fn logout_removes_saved_session_from_state_file() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let state_file = dir.path().join("state.json");
        sessions(FileStore::new(&state_file))
            .login("a@b.com", "pw")
            .await
            .expect("login should succeed");

        let outcome = logout_and_reset(&mut sessions(FileStore::new(&state_file)));

        assert!(outcome.was_signed_in);
        let storage = FileStore::new(&state_file);
        assert_eq!(storage.get(TOKEN_KEY).expect("state should be readable"), None);
        assert_eq!(
            storage.get(IDENTITY_KEY).expect("state should be readable"),
            None
        );
    }

    #[test]
    fn logout_is_idempotent_without_saved_session() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let state_file = dir.path().join("state.json");

        let first = logout_and_reset(&mut sessions(FileStore::new(&state_file)));
        let second = logout_and_reset(&mut sessions(FileStore::new(&state_file)));

        assert!(!first.was_signed_in);
        assert!(!second.was_signed_in);
    }
}
