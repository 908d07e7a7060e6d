/*
 * Copyright © 2024. EcomDev B.V.
 * All rights reserved.
 * See LICENSE for license details.
 */
use std::{
    fmt,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use crate::{
    metric::{Accumulator, CounterMetric, HistogramMetric, MetricName, TimerMetric},
    registry::{AccumulatorMap, MetricRegistry},
};

/// Accumulator returning the same snapshot on every call
///
/// Counts calls to [`calculate_metric`](Accumulator::calculate_metric) so tests can
/// verify that each accumulator is read exactly once per tick.
#[derive(Debug)]
pub struct AccumulatorStub<S> {
    snapshot: S,
    calls: AtomicUsize,
}

impl<S> AccumulatorStub<S> {
    pub fn new(snapshot: S) -> Self {
        Self {
            snapshot,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of calculated snapshots so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<S> Accumulator for AccumulatorStub<S>
where
    S: Clone + Send + Sync,
{
    type Snapshot = S;

    fn calculate_metric(&self) -> Self::Snapshot {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.snapshot.clone()
    }
}

/// In-memory [`MetricRegistry`] assembled in tests
#[derive(Default)]
pub struct RegistryStub {
    counters: AccumulatorMap<CounterMetric>,
    histograms: AccumulatorMap<HistogramMetric>,
    timers: AccumulatorMap<TimerMetric>,
}

impl RegistryStub {
    pub fn with_counter<A>(mut self, name: impl Into<MetricName>, counter: Arc<A>) -> Self
    where
        A: Accumulator<Snapshot = CounterMetric> + 'static,
    {
        self.counters.insert(name.into(), counter);
        self
    }

    pub fn with_histogram<A>(mut self, name: impl Into<MetricName>, histogram: Arc<A>) -> Self
    where
        A: Accumulator<Snapshot = HistogramMetric> + 'static,
    {
        self.histograms.insert(name.into(), histogram);
        self
    }

    pub fn with_timer<A>(mut self, name: impl Into<MetricName>, timer: Arc<A>) -> Self
    where
        A: Accumulator<Snapshot = TimerMetric> + 'static,
    {
        self.timers.insert(name.into(), timer);
        self
    }
}

impl MetricRegistry for RegistryStub {
    fn counters(&self) -> AccumulatorMap<CounterMetric> {
        self.counters.clone()
    }

    fn histograms(&self) -> AccumulatorMap<HistogramMetric> {
        self.histograms.clone()
    }

    fn timers(&self) -> AccumulatorMap<TimerMetric> {
        self.timers.clone()
    }
}

impl fmt::Debug for RegistryStub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryStub")
            .field("counters", &self.counters.keys().collect::<Vec<_>>())
            .field("histograms", &self.histograms.keys().collect::<Vec<_>>())
            .field("timers", &self.timers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_returns_accumulators_sorted_by_name() {
        let registry = RegistryStub::default()
            .with_timer("b.latency", Arc::new(AccumulatorStub::new(TimerMetric::default())))
            .with_timer("a.latency", Arc::new(AccumulatorStub::new(TimerMetric::default())));

        assert_eq!(
            registry.timers().keys().collect::<Vec<_>>(),
            vec!["a.latency", "b.latency"]
        );
        assert!(registry.counters().is_empty());
    }

    #[test]
    fn categories_are_separate_namespaces() {
        let registry = RegistryStub::default()
            .with_counter("requests", Arc::new(AccumulatorStub::new(CounterMetric::default())))
            .with_histogram(
                "requests",
                Arc::new(AccumulatorStub::new(HistogramMetric::default())),
            );

        assert_eq!(registry.counters().len(), 1);
        assert_eq!(registry.histograms().len(), 1);
    }
}
