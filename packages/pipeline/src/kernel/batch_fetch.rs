//! Bounded, rate-limit-friendly batched fetching.
//!
//! Third-party stores throttle aggressive fan-out, so per-trip fetches run in
//! fixed-size groups with a pause between groups. Within a group each future
//! is awaited via `join_all` and its error captured individually; one bad
//! item never cancels its siblings.
//!
//! `group_size = 1, group_delay = 0` degenerates to plain serial fetching,
//! which is why there is no separate "all at once" code path.

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use futures::future::join_all;
use tracing::debug;
use uuid::Uuid;

/// Grouping knobs for [`fetch_in_groups`].
#[derive(Debug, Clone)]
pub struct BatchFetchConfig {
    pub group_size: usize,
    pub group_delay: Duration,
}

impl Default for BatchFetchConfig {
    fn default() -> Self {
        Self {
            group_size: 10,
            group_delay: Duration::from_millis(500),
        }
    }
}

/// Run `fetch` over `ids` in groups, returning every id paired with its own
/// outcome in input order.
pub async fn fetch_in_groups<T, F, Fut>(
    ids: &[Uuid],
    config: &BatchFetchConfig,
    fetch: F,
) -> Vec<(Uuid, Result<T>)>
where
    F: Fn(Uuid) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let group_size = config.group_size.max(1);
    let mut outcomes = Vec::with_capacity(ids.len());

    for (group_index, group) in ids.chunks(group_size).enumerate() {
        if group_index > 0 && !config.group_delay.is_zero() {
            tokio::time::sleep(config.group_delay).await;
        }

        debug!(
            group = group_index,
            size = group.len(),
            "Fetching batch group"
        );

        let results = join_all(group.iter().map(|id| fetch(*id))).await;
        outcomes.extend(group.iter().copied().zip(results));
    }

    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn config(group_size: usize) -> BatchFetchConfig {
        BatchFetchConfig {
            group_size,
            group_delay: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn returns_every_id_in_input_order() {
        let ids: Vec<Uuid> = (0..7).map(|_| Uuid::new_v4()).collect();

        let outcomes = fetch_in_groups(&ids, &config(3), |id| async move { Ok(id) }).await;

        assert_eq!(outcomes.len(), 7);
        for (expected, (id, result)) in ids.iter().zip(&outcomes) {
            assert_eq!(id, expected);
            assert_eq!(result.as_ref().unwrap(), expected);
        }
    }

    #[tokio::test]
    async fn one_failure_does_not_poison_the_group() {
        let ids: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
        let bad = ids[1];

        let outcomes = fetch_in_groups(&ids, &config(4), |id| async move {
            if id == bad {
                Err(anyhow!("store exploded"))
            } else {
                Ok(id)
            }
        })
        .await;

        let failures: Vec<_> = outcomes.iter().filter(|(_, r)| r.is_err()).collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, bad);
        assert_eq!(outcomes.iter().filter(|(_, r)| r.is_ok()).count(), 3);
    }

    #[tokio::test]
    async fn group_size_one_is_serial() {
        let ids: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
        let in_flight = AtomicUsize::new(0);
        let max_seen = AtomicUsize::new(0);

        fetch_in_groups(&ids, &config(1), |id| {
            let in_flight = &in_flight;
            let max_seen = &max_seen;
            async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                max_seen.fetch_max(now, Ordering::SeqCst);
                tokio::task::yield_now().await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                Ok(id)
            }
        })
        .await;

        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn zero_group_size_is_clamped() {
        let ids = vec![Uuid::new_v4()];
        let outcomes = fetch_in_groups(&ids, &config(0), |id| async move { Ok(id) }).await;
        assert_eq!(outcomes.len(), 1);
    }
}
