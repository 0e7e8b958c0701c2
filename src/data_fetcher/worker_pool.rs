//! Bounded fan-out over a list of work items

use futures::stream::{self, StreamExt};
use std::future::Future;

/// Runs `work` over `items` with at most `workers` calls in flight.
///
/// Results come back in input order regardless of which call finished
/// first, so folds over them do not depend on completion timing.
pub async fn run_bounded<I, T, F, Fut, R>(items: I, workers: usize, work: F) -> Vec<(T, R)>
where
    I: IntoIterator<Item = T>,
    T: Clone,
    F: Fn(T) -> Fut,
    Fut: Future<Output = R>,
{
    let workers = workers.max(1);
    let mut results: Vec<(usize, T, R)> = stream::iter(items.into_iter().enumerate())
        .map(|(index, item)| {
            let call = work(item.clone());
            async move { (index, item, call.await) }
        })
        .buffer_unordered(workers)
        .collect()
        .await;

    results.sort_by_key(|(index, _, _)| *index);
    results
        .into_iter()
        .map(|(_, item, result)| (item, result))
        .collect()
}
