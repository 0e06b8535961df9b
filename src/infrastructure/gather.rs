//! Concurrent gathering that keeps going when some tasks fail
//!
//! Every future is driven to completion; outcomes are split into the
//! successes and the failures, each kept in submission order.

use std::future::Future;

use futures::stream::{self, StreamExt};

/// Outcome of [`gather_settled`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settled<T, E> {
    pub succeeded: Vec<T>,
    pub failed: Vec<E>,
}

impl<T, E> Default for Settled<T, E> {
    fn default() -> Self {
        Self {
            succeeded: Vec::new(),
            failed: Vec::new(),
        }
    }
}

impl<T, E> Settled<T, E> {
    pub fn failure_count(&self) -> usize {
        self.failed.len()
    }

    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }
}

impl<T, E> FromIterator<Result<T, E>> for Settled<T, E> {
    fn from_iter<I: IntoIterator<Item = Result<T, E>>>(iter: I) -> Self {
        let mut settled = Self::default();
        for result in iter {
            match result {
                Ok(value) => settled.succeeded.push(value),
                Err(error) => settled.failed.push(error),
            }
        }
        settled
    }
}

/// Run all futures, at most `limit` at a time (unbounded when None)
pub async fn gather_settled<I, F, T, E>(futures: I, limit: Option<usize>) -> Settled<T, E>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
{
    match limit {
        Some(limit) => {
            // `buffered` keeps submission order, unlike `buffer_unordered`
            stream::iter(futures)
                .buffered(limit.max(1))
                .collect::<Vec<_>>()
                .await
                .into_iter()
                .collect()
        }
        None => futures::future::join_all(futures).await.into_iter().collect(),
    }
}
