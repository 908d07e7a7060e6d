/*
 * Copyright © 2024. EcomDev B.V.
 * All rights reserved.
 * See LICENSE for license details.
 */

//! Periodic metrics reporting.
//!
//! [`ReportScheduler`] wakes up on a fixed rate, asks a [`MetricRegistry`] for its
//! counters, histograms and timers, turns each live accumulator into an immutable
//! snapshot and hands the three ordered snapshot maps to every registered [`Reporter`].

#![warn(missing_debug_implementations, unreachable_pub)]

pub mod metric;
pub mod registry;
pub mod reporter;
pub mod scheduler;
pub mod thread;

mod sync;

#[cfg(any(test, feature = "test_util"))]
pub mod test_util;

pub use metric::{
    Accumulator, CounterMetric, HistogramMetric, MetricName, Percentile, SnapshotMap, TimerMetric,
};
pub use registry::{AccumulatorMap, MetricRegistry};
pub use reporter::{Reporter, ReporterError};
pub use scheduler::{
    ReportError, ReportScheduler, SchedulerError, SchedulerSettings, SchedulerState, TimeUnit,
};
pub use thread::NamedThreadFactory;
