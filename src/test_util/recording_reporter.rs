/*
 * Copyright © 2024. EcomDev B.V.
 * All rights reserved.
 * See LICENSE for license details.
 */
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex, PoisonError,
};

use crate::{
    metric::{CounterMetric, HistogramMetric, SnapshotMap, TimerMetric},
    reporter::{Reporter, ReporterError},
};

/// Snapshots received by a reporter in a single tick
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportedTick {
    pub counters: SnapshotMap<CounterMetric>,
    pub histograms: SnapshotMap<HistogramMetric>,
    pub timers: SnapshotMap<TimerMetric>,
}

/// Recording reporter
///
/// Keeps every received tick in memory for later verification in tests
#[derive(Debug, Default)]
pub struct RecordingReporter {
    name: Option<String>,
    ticks: Mutex<Vec<ReportedTick>>,
}

impl RecordingReporter {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Copy of all ticks received so far
    pub fn ticks(&self) -> Vec<ReportedTick> {
        self.ticks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn tick_count(&self) -> usize {
        self.ticks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Reporter for RecordingReporter {
    fn report(
        &self,
        counters: &SnapshotMap<CounterMetric>,
        histograms: &SnapshotMap<HistogramMetric>,
        timers: &SnapshotMap<TimerMetric>,
    ) -> Result<(), ReporterError> {
        self.ticks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ReportedTick {
                counters: counters.clone(),
                histograms: histograms.clone(),
                timers: timers.clone(),
            });

        Ok(())
    }

    fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("recording")
    }
}

/// Reporter that fails on every call
#[derive(Debug)]
pub struct FailingReporter {
    name: String,
    calls: AtomicUsize,
}

impl FailingReporter {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Reporter for FailingReporter {
    fn report(
        &self,
        _counters: &SnapshotMap<CounterMetric>,
        _histograms: &SnapshotMap<HistogramMetric>,
        _timers: &SnapshotMap<TimerMetric>,
    ) -> Result<(), ReporterError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(format!("{} is unavailable", self.name).into())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_every_received_tick() {
        let reporter = RecordingReporter::named("memory");
        let counters = SnapshotMap::from([("requests.count".to_string(), CounterMetric::default())]);

        reporter
            .report(&counters, &SnapshotMap::new(), &SnapshotMap::new())
            .unwrap();
        reporter
            .report(&SnapshotMap::new(), &SnapshotMap::new(), &SnapshotMap::new())
            .unwrap();

        assert_eq!(reporter.tick_count(), 2);
        assert_eq!(reporter.ticks()[0].counters, counters);
        assert_eq!(reporter.name(), "memory");
    }

    #[test]
    fn failing_reporter_counts_attempts() {
        let reporter = FailingReporter::named("network");

        let error = reporter
            .report(&SnapshotMap::new(), &SnapshotMap::new(), &SnapshotMap::new())
            .unwrap_err();

        assert_eq!(error.to_string(), "network is unavailable");
        assert_eq!(reporter.calls(), 1);
    }
}
