//! Join that waits for every task and keeps each outcome

use futures::future::join_all;
use std::future::Future;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settled<T, E> {
    Fulfilled(T),
    Rejected(E),
}

impl<T, E> Settled<T, E> {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Settled::Rejected(_))
    }
}

impl<T, E> From<Result<T, E>> for Settled<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Settled::Fulfilled(value),
            Err(error) => Settled::Rejected(error),
        }
    }
}

/// Drive all futures concurrently to completion.
///
/// A failing future does not cancel the others; outcomes come back in input
/// order.
pub async fn settle_all<I, F, T, E>(futures: I) -> Vec<Settled<T, E>>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
{
    join_all(futures)
        .await
        .into_iter()
        .map(Settled::from)
        .collect()
}
