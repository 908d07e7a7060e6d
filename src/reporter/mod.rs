/*
 * Copyright © 2024. EcomDev B.V.
 * All rights reserved.
 * See LICENSE for license details.
 */

//! Output side of a report tick.

pub use error::*;

mod error;

use std::sync::Arc;

use crate::metric::{CounterMetric, HistogramMetric, SnapshotMap, TimerMetric};

/// Sink for snapshots produced on every report tick
///
/// Reporters are invoked sequentially on the scheduler worker, in the order they
/// were registered, so a slow reporter delays every reporter after it as well as the
/// next tick. Implementations doing slow I/O should hand the data off instead of
/// blocking.
pub trait Reporter: Send + Sync {
    /// Receives one tick worth of snapshots, each map ordered by metric name
    fn report(
        &self,
        counters: &SnapshotMap<CounterMetric>,
        histograms: &SnapshotMap<HistogramMetric>,
        timers: &SnapshotMap<TimerMetric>,
    ) -> Result<(), ReporterError>;

    /// Name used to attribute failures in logs
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<T> Reporter for Arc<T>
where
    T: Reporter + ?Sized,
{
    fn report(
        &self,
        counters: &SnapshotMap<CounterMetric>,
        histograms: &SnapshotMap<HistogramMetric>,
        timers: &SnapshotMap<TimerMetric>,
    ) -> Result<(), ReporterError> {
        (**self).report(counters, histograms, timers)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T> Reporter for Box<T>
where
    T: Reporter + ?Sized,
{
    fn report(
        &self,
        counters: &SnapshotMap<CounterMetric>,
        histograms: &SnapshotMap<HistogramMetric>,
        timers: &SnapshotMap<TimerMetric>,
    ) -> Result<(), ReporterError> {
        (**self).report(counters, histograms, timers)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SilentReporter;

    impl Reporter for SilentReporter {
        fn report(
            &self,
            _counters: &SnapshotMap<CounterMetric>,
            _histograms: &SnapshotMap<HistogramMetric>,
            _timers: &SnapshotMap<TimerMetric>,
        ) -> Result<(), ReporterError> {
            Ok(())
        }
    }

    #[test]
    fn defaults_name_to_type_name() {
        assert!(SilentReporter.name().ends_with("SilentReporter"));
    }

    #[test]
    fn shared_reporter_keeps_inner_name() {
        let reporter: Arc<dyn Reporter> = Arc::new(SilentReporter);

        assert_eq!(reporter.name(), SilentReporter.name());
    }
}
