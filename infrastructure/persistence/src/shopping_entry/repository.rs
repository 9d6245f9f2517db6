use std::sync::{Arc, Weak};
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use futures::stream;
use sqlx::PgPool;
use sqlx::postgres::PgListener;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::OnceCell;

use business::domain::errors::RepositoryError;
use business::domain::shared::value_objects::UserId;
use business::domain::shopping_entry::model::{RecipeDraft, ShoppingEntry};
use business::domain::shopping_entry::repository::{ShoppingEntryRepository, SnapshotStream};
use business::domain::shopping_entry::value_objects::RecipeId;

use super::entity::ShoppingEntryEntity;

/// Channel the `shopping_recipes` trigger notifies on; the payload is the
/// owning user id.
pub const SHOPPING_CHANNEL: &str = "shopping_recipes_changed";

const CHANGE_FEED_CAPACITY: usize = 256;
const LISTENER_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Store-wide change feed: one `LISTEN` connection shared by every live
/// subscription of a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Change {
    /// A row of this user changed.
    User(String),
    /// The listener reconnected; notifications may have been missed.
    Resync,
}

struct ChangeFeed {
    sender: Arc<broadcast::Sender<Change>>,
    started: OnceCell<()>,
}

impl ChangeFeed {
    fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANGE_FEED_CAPACITY);
        Self {
            sender: Arc::new(sender),
            started: OnceCell::new(),
        }
    }

    /// Starts the shared listener on first use and returns a receiver that
    /// sees every change published after this call.
    async fn subscribe(
        &self,
        pool: &PgPool,
    ) -> Result<broadcast::Receiver<Change>, RepositoryError> {
        self.started
            .get_or_try_init(|| async {
                let mut listener = PgListener::connect_with(pool).await.map_err(|err| {
                    tracing::error!("Failed to open shopping listener: {err}");
                    RepositoryError::DatabaseError
                })?;
                listener.listen(SHOPPING_CHANNEL).await.map_err(|err| {
                    tracing::error!("Failed to LISTEN on {SHOPPING_CHANNEL}: {err}");
                    RepositoryError::DatabaseError
                })?;
                tokio::spawn(forward_notifications(listener, Arc::downgrade(&self.sender)));
                tracing::info!("Shopping change listener started");
                Ok::<(), RepositoryError>(())
            })
            .await?;

        Ok(self.sender.subscribe())
    }
}

/// Pumps notifications into the feed until the repository is dropped.
async fn forward_notifications(
    mut listener: PgListener,
    sender: Weak<broadcast::Sender<Change>>,
) {
    loop {
        let change = match listener.try_recv().await {
            Ok(Some(notification)) => Change::User(notification.payload().to_string()),
            Ok(None) => {
                tracing::warn!("Shopping listener lost its connection, resyncing subscribers");
                Change::Resync
            }
            Err(err) => {
                tracing::error!("Shopping listener failed: {err}");
                tokio::time::sleep(LISTENER_RETRY_DELAY).await;
                Change::Resync
            }
        };

        let Some(feed) = sender.upgrade() else {
            tracing::debug!("Shopping repository dropped, stopping listener");
            return;
        };
        // No subscribers is not an error.
        let _ = feed.send(change);
    }
}

/// Waits for the next change relevant to `user_id`. Returns `false` once the
/// feed is gone.
async fn next_change(receiver: &mut broadcast::Receiver<Change>, user_id: &UserId) -> bool {
    loop {
        match receiver.recv().await {
            Ok(Change::User(owner)) if owner == user_id.as_str() => return true,
            Ok(Change::User(_)) => continue,
            Ok(Change::Resync) => return true,
            Err(RecvError::Lagged(skipped)) => {
                tracing::debug!("Shopping subscriber for {user_id} skipped {skipped} changes");
                return true;
            }
            Err(RecvError::Closed) => return false,
        }
    }
}

pub struct ShoppingEntryRepositoryPostgres {
    pool: PgPool,
    changes: ChangeFeed,
}

impl ShoppingEntryRepositoryPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            changes: ChangeFeed::new(),
        }
    }
}

async fn fetch_all(pool: &PgPool, user_id: &UserId) -> Result<Vec<ShoppingEntry>, RepositoryError> {
    let entities = sqlx::query_as::<_, ShoppingEntryEntity>(
        "SELECT recipe_id, title, ingredients, checked, created_at, updated_at FROM shopping_recipes WHERE user_id = $1 ORDER BY created_at ASC, recipe_id ASC",
    )
    .bind(user_id.as_str())
    .fetch_all(pool)
    .await
    .map_err(|_| RepositoryError::DatabaseError)?;

    Ok(entities.into_iter().map(|e| e.into_domain()).collect())
}

struct WatchState {
    changes: broadcast::Receiver<Change>,
    pool: PgPool,
    user_id: UserId,
    initial: bool,
}

#[async_trait]
impl ShoppingEntryRepository for ShoppingEntryRepositoryPostgres {
    async fn get_all(&self, user_id: &UserId) -> Result<Vec<ShoppingEntry>, RepositoryError> {
        fetch_all(&self.pool, user_id).await
    }

    async fn get_by_id(
        &self,
        recipe_id: &RecipeId,
        user_id: &UserId,
    ) -> Result<ShoppingEntry, RepositoryError> {
        let entity = sqlx::query_as::<_, ShoppingEntryEntity>(
            "SELECT recipe_id, title, ingredients, checked, created_at, updated_at FROM shopping_recipes WHERE user_id = $1 AND recipe_id = $2",
        )
        .bind(user_id.as_str())
        .bind(recipe_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?
        .ok_or(RepositoryError::NotFound)?;

        Ok(entity.into_domain())
    }

    async fn upsert(
        &self,
        draft: &RecipeDraft,
        user_id: &UserId,
    ) -> Result<ShoppingEntry, RepositoryError> {
        let entity = sqlx::query_as::<_, ShoppingEntryEntity>(
            r#"INSERT INTO shopping_recipes (user_id, recipe_id, title, ingredients, checked, created_at, updated_at)
            VALUES ($1, $2, $3, $4, '{}', NOW(), NOW())
            ON CONFLICT (user_id, recipe_id) DO UPDATE SET
                title = EXCLUDED.title,
                ingredients = EXCLUDED.ingredients,
                checked = ARRAY(
                    SELECT c FROM unnest(shopping_recipes.checked) AS c
                    WHERE c = ANY(EXCLUDED.ingredients)
                ),
                updated_at = NOW()
            RETURNING recipe_id, title, ingredients, checked, created_at, updated_at"#,
        )
        .bind(user_id.as_str())
        .bind(draft.recipe_id.as_str())
        .bind(&draft.title)
        .bind(&draft.ingredients)
        .fetch_one(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(entity.into_domain())
    }

    async fn set_checked(
        &self,
        recipe_id: &RecipeId,
        ingredient: &str,
        checked: bool,
        user_id: &UserId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"UPDATE shopping_recipes SET
                checked = CASE
                    WHEN NOT $4 THEN array_remove(checked, $3)
                    WHEN $3 = ANY(checked) THEN checked
                    ELSE array_append(checked, $3)
                END,
                updated_at = NOW()
            WHERE user_id = $1 AND recipe_id = $2 AND $3 = ANY(ingredients)"#,
        )
        .bind(user_id.as_str())
        .bind(recipe_id.as_str())
        .bind(ingredient)
        .bind(checked)
        .execute(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        if result.rows_affected() > 0 {
            return Ok(());
        }

        let entry_exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM shopping_recipes WHERE user_id = $1 AND recipe_id = $2)",
        )
        .bind(user_id.as_str())
        .bind(recipe_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        if entry_exists {
            Err(RepositoryError::ItemNotFound)
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    async fn remove_ingredient(
        &self,
        recipe_id: &RecipeId,
        ingredient: &str,
        user_id: &UserId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"UPDATE shopping_recipes SET
                ingredients = array_remove(ingredients, $3),
                checked = array_remove(checked, $3),
                updated_at = NOW()
            WHERE user_id = $1 AND recipe_id = $2"#,
        )
        .bind(user_id.as_str())
        .bind(recipe_id.as_str())
        .bind(ingredient)
        .execute(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, recipe_id: &RecipeId, user_id: &UserId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM shopping_recipes WHERE user_id = $1 AND recipe_id = $2")
            .bind(user_id.as_str())
            .bind(recipe_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(())
    }

    async fn watch(&self, user_id: &UserId) -> Result<SnapshotStream, RepositoryError> {
        // Subscribe before the first read so no change slips in between.
        let changes = self.changes.subscribe(&self.pool).await?;

        let state = WatchState {
            changes,
            pool: self.pool.clone(),
            user_id: user_id.clone(),
            initial: true,
        };

        let snapshots = stream::unfold(Some(state), |state| async move {
            let Some(mut state) = state else {
                return None;
            };
            if !std::mem::replace(&mut state.initial, false)
                && !next_change(&mut state.changes, &state.user_id).await
            {
                return None;
            }
            match fetch_all(&state.pool, &state.user_id).await {
                Ok(entries) => Some((Ok(entries), Some(state))),
                Err(err) => Some((Err(err), None)),
            }
        });

        Ok(snapshots.boxed())
    }
}
