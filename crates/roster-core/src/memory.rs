//! In-memory reference implementation of the user store
//!
//! Backs the service in development and in the integration tests. Records
//! live in a `tokio::sync::RwLock`; ids are assigned as UUIDs on insert.
//! Email uniqueness is deliberately NOT enforced here (see `UserStore`).

use crate::{RemoveReport, Result, UpdateReport, User, UserPatch, UserStore};
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local user store
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id.as_deref() == Some(id)).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, mut user: User) -> Result<User> {
        user.id = Some(Uuid::new_v4().to_string());
        self.users.write().await.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: &str, patch: UserPatch) -> Result<UpdateReport> {
        let mut users = self.users.write().await;
        match users.iter_mut().find(|u| u.id.as_deref() == Some(id)) {
            Some(user) => {
                let modified = patch.apply(user);
                Ok(UpdateReport {
                    matched: 1,
                    modified: modified as u64,
                })
            }
            None => Ok(UpdateReport {
                matched: 0,
                modified: 0,
            }),
        }
    }

    async fn remove(&self, id: &str) -> Result<RemoveReport> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id.as_deref() != Some(id));
        Ok(RemoveReport {
            removed: (before - users.len()) as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(email: &str) -> User {
        User::new(
            "Test User".to_string(),
            email.to_string(),
            "hash".to_string(),
            100,
        )
    }

    #[tokio::test]
    async fn insert_assigns_an_id() {
        let store = MemoryStore::new();
        let stored = store.insert(sample("a@x.com")).await.unwrap();

        let id = stored.id.expect("id assigned on insert");
        let found = store.find_by_id(&id).await.unwrap();
        assert_eq!(found.unwrap().email, "a@x.com");
    }

    #[tokio::test]
    async fn email_lookup_is_case_sensitive() {
        let store = MemoryStore::new();
        store.insert(sample("Ana@x.com")).await.unwrap();

        assert!(store.find_by_email("Ana@x.com").await.unwrap().is_some());
        assert!(store.find_by_email("ana@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_reports_matched_and_modified() {
        let store = MemoryStore::new();
        let stored = store.insert(sample("a@x.com")).await.unwrap();
        let id = stored.id.unwrap();

        let report = store.update(&id, UserPatch::last_login(200)).await.unwrap();
        assert_eq!(report, UpdateReport { matched: 1, modified: 1 });

        // same value again: matched but nothing changed
        let report = store.update(&id, UserPatch::last_login(200)).await.unwrap();
        assert_eq!(report, UpdateReport { matched: 1, modified: 0 });

        let report = store
            .update("missing", UserPatch::last_login(1))
            .await
            .unwrap();
        assert_eq!(report, UpdateReport { matched: 0, modified: 0 });
    }

    #[tokio::test]
    async fn remove_reports_count() {
        let store = MemoryStore::new();
        let stored = store.insert(sample("a@x.com")).await.unwrap();
        let id = stored.id.unwrap();

        assert_eq!(store.remove(&id).await.unwrap(), RemoveReport { removed: 1 });
        assert_eq!(store.remove(&id).await.unwrap(), RemoveReport { removed: 0 });
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn duplicate_emails_are_not_rejected_by_the_store() {
        // uniqueness is the account service's concern; the store stays dumb
        let store = MemoryStore::new();
        store.insert(sample("dup@x.com")).await.unwrap();
        store.insert(sample("dup@x.com")).await.unwrap();
        assert_eq!(store.len().await, 2);
    }
}
