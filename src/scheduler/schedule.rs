/*
 * Copyright © 2024. EcomDev B.V.
 * All rights reserved.
 * See LICENSE for license details.
 */
use std::{future::Future, time::Duration};

use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;

/// Runs `tick` at a fixed rate until `token` is cancelled
///
/// Tick `n` is due at `start + n * period`, so the first tick happens one full period
/// after the call. Deadlines do not move when a tick overruns: the next tick starts
/// right away and the schedule catches up instead of drifting. Ticks run one after
/// another, never concurrently.
pub(crate) async fn run_at_fixed_rate<F, Fut>(
    period: Duration,
    token: CancellationToken,
    mut tick: F,
) where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    let mut deadline = Instant::now().checked_add(period);

    while let Some(due) = deadline {
        tokio::select! {
            biased;
            _ = token.cancelled() => return,
            _ = sleep_until(due) => {}
        }

        tick().await;
        deadline = due.checked_add(period);
    }

    // Period is too large to ever be due
    token.cancelled().await;
}
