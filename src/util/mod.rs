//! Async helpers shared by the services

use futures::future::try_join_all;
use std::future::Future;

/// Keep the items whose asynchronous predicate resolves to `true`.
///
/// The predicate is called once per item and every resulting future is
/// created before any of them is awaited; they are then driven together.
/// The output keeps the input order no matter which checks finish first.
/// The first predicate error fails the whole call and no partial result is
/// returned.
pub async fn async_filter<T, E, F, Fut>(items: Vec<T>, mut predicate: F) -> Result<Vec<T>, E>
where
    F: FnMut(&T) -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    let checks: Vec<Fut> = items.iter().map(&mut predicate).collect();
    let keep = try_join_all(checks).await?;

    Ok(items
        .into_iter()
        .zip(keep)
        .filter_map(|(item, keep)| keep.then_some(item))
        .collect())
}
