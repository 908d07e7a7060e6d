/*
 * Copyright © 2024. EcomDev B.V.
 * All rights reserved.
 * See LICENSE for license details.
 */

//! Contract of the registry the scheduler reads on every tick.

use std::{collections::BTreeMap, sync::Arc};

use crate::metric::{Accumulator, CounterMetric, HistogramMetric, MetricName, TimerMetric};

/// Accumulators of a single category ordered by metric name
pub type AccumulatorMap<S> = BTreeMap<MetricName, Arc<dyn Accumulator<Snapshot = S>>>;

/// Source of live accumulators
///
/// Each category is an independent namespace. Returned maps are sorted by name
/// in ascending order, which becomes the iteration order reporters observe.
pub trait MetricRegistry: Send + Sync {
    fn counters(&self) -> AccumulatorMap<CounterMetric>;

    fn histograms(&self) -> AccumulatorMap<HistogramMetric>;

    fn timers(&self) -> AccumulatorMap<TimerMetric>;
}
