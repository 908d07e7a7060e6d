/*
 * Copyright © 2024. EcomDev B.V.
 * All rights reserved.
 * See LICENSE for license details.
 */
use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    sync::{Arc, PoisonError, RwLock},
};

use tracing::error;

use crate::{
    metric::{CounterMetric, HistogramMetric, SnapshotMap, TimerMetric},
    registry::{AccumulatorMap, MetricRegistry},
    reporter::Reporter,
};

use super::ReportError;

/// Reads the registry, snapshots every accumulator and fans the result out to reporters
pub(crate) struct ReportPipeline<R: ?Sized> {
    registry: Arc<R>,
    reporters: RwLock<Vec<Arc<dyn Reporter>>>,
}

impl<R> ReportPipeline<R>
where
    R: MetricRegistry + ?Sized,
{
    pub(crate) fn new(registry: Arc<R>, reporters: Vec<Box<dyn Reporter>>) -> Self {
        Self {
            registry,
            reporters: RwLock::new(reporters.into_iter().map(Arc::from).collect()),
        }
    }

    pub(crate) fn add_reporter(&self, reporter: Box<dyn Reporter>) {
        self.reporters
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::from(reporter));
    }

    pub(crate) fn reporter_count(&self) -> usize {
        self.reporters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Single report pass
    ///
    /// Stops at the first failing reporter, reporters registered after it do not
    /// receive this pass.
    pub(crate) fn report(&self) -> Result<(), ReportError> {
        self.dispatch(|reporter, counters, histograms, timers| {
            reporter
                .report(counters, histograms, timers)
                .map_err(|source| ReportError::Reporter {
                    reporter: reporter.name().to_string(),
                    source,
                })
        })
    }

    /// Report pass with panics turned into [`ReportError::Panicked`]
    ///
    /// A panic inside a reporter is attributed to it, a panic in the registry or
    /// an accumulator has no reporter.
    pub(crate) fn tick(&self) -> Result<(), ReportError> {
        panic::catch_unwind(AssertUnwindSafe(|| {
            self.dispatch(|reporter, counters, histograms, timers| {
                match panic::catch_unwind(AssertUnwindSafe(|| {
                    reporter.report(counters, histograms, timers)
                })) {
                    Ok(result) => result.map_err(|source| ReportError::Reporter {
                        reporter: reporter.name().to_string(),
                        source,
                    }),
                    Err(payload) => Err(ReportError::Panicked {
                        reporter: Some(reporter.name().to_string()),
                        message: panic_message(payload),
                    }),
                }
            })
        }))
        .unwrap_or_else(|payload| {
            Err(ReportError::Panicked {
                reporter: None,
                message: panic_message(payload),
            })
        })
    }

    /// Scheduled tick: failures are logged and never reach the schedule
    pub(crate) fn run_tick(&self) {
        if let Err(error) = self.tick() {
            error!(
                reporter = error.reporter().unwrap_or_default(),
                error = %error,
                "Metric report tick failed"
            );
        }
    }

    fn dispatch<F>(&self, mut send: F) -> Result<(), ReportError>
    where
        F: FnMut(
            &dyn Reporter,
            &SnapshotMap<CounterMetric>,
            &SnapshotMap<HistogramMetric>,
            &SnapshotMap<TimerMetric>,
        ) -> Result<(), ReportError>,
    {
        let counters = calculate(&self.registry.counters());
        let histograms = calculate(&self.registry.histograms());
        let timers = calculate(&self.registry.timers());

        // Lock is released before any reporter runs
        let reporters = self
            .reporters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        for reporter in &reporters {
            send(reporter.as_ref(), &counters, &histograms, &timers)?;
        }

        Ok(())
    }
}

fn calculate<S>(accumulators: &AccumulatorMap<S>) -> SnapshotMap<S> {
    accumulators
        .iter()
        .map(|(name, accumulator)| (name.clone(), accumulator.calculate_metric()))
        .collect()
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(message) => *message,
        Err(payload) => match payload.downcast::<&'static str>() {
            Ok(message) => message.to_string(),
            Err(_) => "unknown panic".to_string(),
        },
    }
}
