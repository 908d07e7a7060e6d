/*
 * Copyright © 2024. EcomDev B.V.
 * All rights reserved.
 * See LICENSE for license details.
 */

//! Accumulator contract and the immutable snapshots it produces.

use std::collections::BTreeMap;

pub use snapshot::*;

mod snapshot;

/// Name of a metric, unique within its category
pub type MetricName = String;

/// Snapshots of a single category ordered by metric name
pub type SnapshotMap<S> = BTreeMap<MetricName, S>;

/// Live metric that collects raw observations between report ticks
///
/// Implementations are owned by the registry and updated concurrently by
/// application code. [`calculate_metric`](Accumulator::calculate_metric) may reset
/// windowed state, so the scheduler calls it exactly once per accumulator per tick.
pub trait Accumulator: Send + Sync {
    type Snapshot;

    /// Derives the point-in-time value of the accumulator
    fn calculate_metric(&self) -> Self::Snapshot;
}

impl<F, S> Accumulator for F
where
    F: Fn() -> S + Send + Sync,
{
    type Snapshot = S;

    fn calculate_metric(&self) -> Self::Snapshot {
        self()
    }
}
