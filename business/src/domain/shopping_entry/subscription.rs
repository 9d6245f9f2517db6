use std::pin::Pin;
use std::task::{Context, Poll};

use futures::{Stream, StreamExt};

use super::errors::ShoppingEntryError;
use super::model::ShoppingEntry;
use super::repository::SnapshotStream;

/// Live view of a shopping scope.
///
/// Yields a full snapshot on every change until [`Subscription::unsubscribe`]
/// is called or the value is dropped; both release the underlying listener.
pub struct Subscription {
    inner: Option<SnapshotStream>,
}

impl Subscription {
    pub fn new(inner: SnapshotStream) -> Self {
        Self { inner: Some(inner) }
    }

    pub fn unsubscribe(&mut self) {
        self.inner = None;
    }

    pub fn is_active(&self) -> bool {
        self.inner.is_some()
    }
}

impl Stream for Subscription {
    type Item = Result<Vec<ShoppingEntry>, ShoppingEntryError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let Some(inner) = self.inner.as_mut() else {
            return Poll::Ready(None);
        };
        match inner.poll_next_unpin(cx) {
            Poll::Ready(Some(snapshot)) => {
                Poll::Ready(Some(snapshot.map_err(ShoppingEntryError::from)))
            }
            Poll::Ready(None) => {
                self.inner = None;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
