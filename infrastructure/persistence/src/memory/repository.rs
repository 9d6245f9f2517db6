use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use futures::StreamExt;
use futures::stream;
use tokio::sync::watch;

use business::domain::errors::RepositoryError;
use business::domain::shared::value_objects::UserId;
use business::domain::shopping_entry::model::{RecipeDraft, ShoppingEntry, sort_snapshot};
use business::domain::shopping_entry::repository::{ShoppingEntryRepository, SnapshotStream};
use business::domain::shopping_entry::value_objects::RecipeId;

/// One user's documents plus the channel publishing their snapshots.
struct Scope {
    entries: BTreeMap<RecipeId, ShoppingEntry>,
    changes: watch::Sender<Vec<ShoppingEntry>>,
}

impl Scope {
    fn new() -> Self {
        let (changes, _) = watch::channel(Vec::new());
        Self {
            entries: BTreeMap::new(),
            changes,
        }
    }

    fn snapshot(&self) -> Vec<ShoppingEntry> {
        let mut entries: Vec<_> = self.entries.values().cloned().collect();
        sort_snapshot(&mut entries);
        entries
    }

    fn publish(&self) {
        self.changes.send_replace(self.snapshot());
    }

    fn entry_mut(&mut self, recipe_id: &RecipeId) -> Result<&mut ShoppingEntry, RepositoryError> {
        self.entries
            .get_mut(recipe_id)
            .ok_or(RepositoryError::NotFound)
    }

    fn is_idle(&self) -> bool {
        self.entries.is_empty() && self.changes.receiver_count() == 0
    }
}

/// Process-local document store.
///
/// Used when no database is configured and as the backing store in tests.
/// Subscribers only ever see the latest snapshot; intermediate states
/// between two polls are coalesced.
#[derive(Default)]
pub struct InMemoryShoppingRepository {
    scopes: Mutex<HashMap<UserId, Scope>>,
}

impl InMemoryShoppingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<UserId, Scope>>, RepositoryError> {
        self.scopes.lock().map_err(|_| {
            tracing::error!("In-memory shopping store lock poisoned");
            RepositoryError::Persistence
        })
    }

    /// Runs `f` against the user's scope, creating it if needed. Scopes left
    /// without entries or subscribers are dropped afterwards.
    fn with_scope<R>(
        &self,
        user_id: &UserId,
        f: impl FnOnce(&mut Scope) -> Result<R, RepositoryError>,
    ) -> Result<R, RepositoryError> {
        let mut scopes = self.lock()?;
        let scope = scopes.entry(user_id.clone()).or_insert_with(Scope::new);
        let result = f(scope);
        if scope.is_idle() {
            scopes.remove(user_id);
        }
        result
    }

    /// Read-only access; a user without a scope reads as empty.
    fn read_scope<R>(
        &self,
        user_id: &UserId,
        f: impl FnOnce(Option<&Scope>) -> R,
    ) -> Result<R, RepositoryError> {
        let scopes = self.lock()?;
        Ok(f(scopes.get(user_id)))
    }

    #[cfg(test)]
    fn scope_count(&self) -> usize {
        self.scopes.lock().map(|scopes| scopes.len()).unwrap_or_default()
    }
}

#[async_trait]
impl ShoppingEntryRepository for InMemoryShoppingRepository {
    async fn get_all(&self, user_id: &UserId) -> Result<Vec<ShoppingEntry>, RepositoryError> {
        self.read_scope(user_id, |scope| scope.map(Scope::snapshot).unwrap_or_default())
    }

    async fn get_by_id(
        &self,
        recipe_id: &RecipeId,
        user_id: &UserId,
    ) -> Result<ShoppingEntry, RepositoryError> {
        self.read_scope(user_id, |scope| {
            scope
                .and_then(|scope| scope.entries.get(recipe_id))
                .cloned()
                .ok_or(RepositoryError::NotFound)
        })?
    }

    async fn upsert(
        &self,
        draft: &RecipeDraft,
        user_id: &UserId,
    ) -> Result<ShoppingEntry, RepositoryError> {
        self.with_scope(user_id, |scope| {
            let entry = match scope.entries.get_mut(&draft.recipe_id) {
                Some(existing) => {
                    existing.merge(draft.clone());
                    existing.clone()
                }
                None => {
                    let created = ShoppingEntry::new(draft.clone());
                    scope
                        .entries
                        .insert(draft.recipe_id.clone(), created.clone());
                    created
                }
            };
            scope.publish();
            Ok(entry)
        })
    }

    async fn set_checked(
        &self,
        recipe_id: &RecipeId,
        ingredient: &str,
        checked: bool,
        user_id: &UserId,
    ) -> Result<(), RepositoryError> {
        self.with_scope(user_id, |scope| {
            let entry = scope.entry_mut(recipe_id)?;
            entry
                .checklist
                .set_checked(ingredient, checked)
                .map_err(|_| RepositoryError::ItemNotFound)?;
            entry.updated_at = Utc::now();
            scope.publish();
            Ok(())
        })
    }

    async fn remove_ingredient(
        &self,
        recipe_id: &RecipeId,
        ingredient: &str,
        user_id: &UserId,
    ) -> Result<(), RepositoryError> {
        self.with_scope(user_id, |scope| {
            let entry = scope.entry_mut(recipe_id)?;
            entry.checklist.remove(ingredient);
            entry.updated_at = Utc::now();
            scope.publish();
            Ok(())
        })
    }

    async fn delete(&self, recipe_id: &RecipeId, user_id: &UserId) -> Result<(), RepositoryError> {
        self.with_scope(user_id, |scope| {
            if scope.entries.remove(recipe_id).is_some() {
                scope.publish();
            }
            Ok(())
        })
    }

    async fn watch(&self, user_id: &UserId) -> Result<SnapshotStream, RepositoryError> {
        let receiver = self.with_scope(user_id, |scope| Ok(scope.changes.subscribe()))?;

        let snapshots = stream::unfold((receiver, true), |(mut receiver, initial)| async move {
            if !initial && receiver.changed().await.is_err() {
                return None;
            }
            let snapshot = receiver.borrow_and_update().clone();
            Some((Ok(snapshot), (receiver, false)))
        });

        Ok(snapshots.boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserId {
        UserId::new("uid-1")
    }

    fn draft(id: &str, ingredients: &[&str]) -> RecipeDraft {
        RecipeDraft {
            recipe_id: RecipeId::parse(id).unwrap(),
            title: id.to_string(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn should_upsert_without_duplicating() {
        let repo = InMemoryShoppingRepository::new();

        repo.upsert(&draft("r1", &["Pasta"]), &user()).await.unwrap();
        repo.upsert(&draft("r1", &["Pasta"]), &user()).await.unwrap();

        assert_eq!(repo.get_all(&user()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_keep_created_at_on_readd() {
        let repo = InMemoryShoppingRepository::new();
        let first = repo.upsert(&draft("r1", &["Pasta"]), &user()).await.unwrap();

        let second = repo
            .upsert(&draft("r1", &["Pasta", "Salt"]), &user())
            .await
            .unwrap();

        assert_eq!(first.created_at, second.created_at);
        assert_eq!(second.ingredients().len(), 2);
    }

    #[tokio::test]
    async fn should_isolate_users() {
        let repo = InMemoryShoppingRepository::new();
        repo.upsert(&draft("r1", &["Pasta"]), &user()).await.unwrap();

        let other = repo.get_all(&UserId::new("uid-2")).await.unwrap();

        assert!(other.is_empty());
    }

    #[tokio::test]
    async fn should_return_not_found_for_missing_entry() {
        let repo = InMemoryShoppingRepository::new();
        let recipe_id = RecipeId::parse("r1").unwrap();

        assert_eq!(
            repo.get_by_id(&recipe_id, &user()).await.unwrap_err(),
            RepositoryError::NotFound
        );
        assert_eq!(
            repo.set_checked(&recipe_id, "Salt", true, &user())
                .await
                .unwrap_err(),
            RepositoryError::NotFound
        );
        assert_eq!(
            repo.remove_ingredient(&recipe_id, "Salt", &user())
                .await
                .unwrap_err(),
            RepositoryError::NotFound
        );
        assert!(repo.delete(&recipe_id, &user()).await.is_ok());
    }

    #[tokio::test]
    async fn should_refuse_to_check_unlisted_ingredient() {
        let repo = InMemoryShoppingRepository::new();
        repo.upsert(&draft("r1", &["Pasta"]), &user()).await.unwrap();
        let recipe_id = RecipeId::parse("r1").unwrap();

        let result = repo.set_checked(&recipe_id, "Salt", true, &user()).await;

        assert_eq!(result.unwrap_err(), RepositoryError::ItemNotFound);
        let entry = repo.get_by_id(&recipe_id, &user()).await.unwrap();
        assert_eq!(entry.checklist.checked().count(), 0);
    }

    #[tokio::test]
    async fn should_publish_initial_and_changed_snapshots() {
        let repo = InMemoryShoppingRepository::new();
        let mut snapshots = repo.watch(&user()).await.unwrap();

        assert!(snapshots.next().await.unwrap().unwrap().is_empty());

        repo.upsert(&draft("r1", &["Pasta"]), &user()).await.unwrap();
        let after_add = snapshots.next().await.unwrap().unwrap();
        assert_eq!(after_add.len(), 1);

        repo.delete(&RecipeId::parse("r1").unwrap(), &user())
            .await
            .unwrap();
        assert!(snapshots.next().await.unwrap().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_not_notify_other_users() {
        let repo = InMemoryShoppingRepository::new();
        let mut snapshots = repo.watch(&user()).await.unwrap();
        snapshots.next().await.unwrap().unwrap();

        repo.upsert(&draft("r1", &["Pasta"]), &UserId::new("uid-2"))
            .await
            .unwrap();

        let pending = tokio::time::timeout(std::time::Duration::from_millis(50), snapshots.next()).await;
        assert!(pending.is_err());
    }

    #[tokio::test]
    async fn should_not_keep_scopes_for_readers_or_emptied_users() {
        let repo = InMemoryShoppingRepository::new();
        let recipe_id = RecipeId::parse("r1").unwrap();

        repo.get_all(&UserId::new("reader")).await.unwrap();
        let _ = repo.get_by_id(&recipe_id, &UserId::new("reader")).await;
        assert_eq!(repo.scope_count(), 0);

        repo.upsert(&draft("r1", &["Pasta"]), &user()).await.unwrap();
        assert_eq!(repo.scope_count(), 1);
        repo.delete(&recipe_id, &user()).await.unwrap();
        assert_eq!(repo.scope_count(), 0);
    }

    #[tokio::test]
    async fn should_keep_empty_scope_while_watched() {
        let repo = InMemoryShoppingRepository::new();
        let mut snapshots = repo.watch(&user()).await.unwrap();
        snapshots.next().await.unwrap().unwrap();

        repo.upsert(&draft("r1", &["Pasta"]), &user()).await.unwrap();
        repo.delete(&RecipeId::parse("r1").unwrap(), &user())
            .await
            .unwrap();

        assert_eq!(repo.scope_count(), 1);
        assert!(snapshots.next().await.unwrap().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_restart_from_current_state_on_resubscribe() {
        let repo = InMemoryShoppingRepository::new();
        repo.upsert(&draft("r1", &["Pasta"]), &user()).await.unwrap();
        let first = repo.watch(&user()).await.unwrap();
        drop(first);

        let mut second = repo.watch(&user()).await.unwrap();

        assert_eq!(second.next().await.unwrap().unwrap().len(), 1);
    }
}
