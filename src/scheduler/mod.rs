/*
 * Copyright © 2024. EcomDev B.V.
 * All rights reserved.
 * See LICENSE for license details.
 */

//! Fixed rate report scheduler.

mod error;
mod pipeline;
mod schedule;
mod settings;
mod unit;

use std::{
    fmt, future, mem,
    sync::{
        mpsc::{self, RecvTimeoutError},
        Arc,
    },
    thread::JoinHandle,
    time::Duration,
};

use tokio::runtime::Builder;
use tokio_util::sync::CancellationToken;
use tracing::{dispatcher, error, info, Dispatch};

pub use error::*;
pub use settings::SchedulerSettings;
pub use unit::TimeUnit;

use crate::{registry::MetricRegistry, reporter::Reporter, thread::NamedThreadFactory};
use pipeline::ReportPipeline;
use schedule::run_at_fixed_rate;

/// Lifecycle of a [`ReportScheduler`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Created,
    Started,
    /// Terminal, a stopped scheduler cannot be started again
    Stopped,
}

struct Worker {
    token: CancellationToken,
    finished: mpsc::Receiver<()>,
    handle: JoinHandle<()>,
}

impl Worker {
    fn shutdown(self, timeout: Duration) {
        self.token.cancel();

        match self.finished.recv_timeout(timeout) {
            Err(RecvTimeoutError::Timeout) => {
                info!(
                    "metric reporters can't stop in {:?}, force stopped.",
                    timeout
                );
            }
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                if self.handle.join().is_err() {
                    error!("Metric report worker terminated with panic");
                }
                info!("metric reporters stopped.");
            }
        }
    }
}

enum State {
    Created,
    Started(Worker),
    Stopped,
}

/// Periodically snapshots a [`MetricRegistry`] and hands the result to reporters
///
/// All ticks run on a single named background thread, one at a time. A failing or
/// panicking tick is logged and the schedule carries on.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use metric_reporter::{MetricRegistry, ReportScheduler, Reporter, TimeUnit};
///
/// fn run(registry: Arc<dyn MetricRegistry>, console: impl Reporter + 'static) {
///     let mut scheduler = ReportScheduler::new(registry);
///     scheduler.add_reporter(console);
///
///     scheduler.start(10, TimeUnit::Seconds).expect("report worker is started");
///     // ... application runs
///     scheduler.stop();
/// }
/// ```
pub struct ReportScheduler<R: ?Sized> {
    pipeline: Arc<ReportPipeline<R>>,
    settings: SchedulerSettings,
    threads: NamedThreadFactory,
    state: State,
}

impl<R> ReportScheduler<R>
where
    R: MetricRegistry + ?Sized + 'static,
{
    pub fn new(registry: Arc<R>) -> Self {
        Self::with_reporters(registry, Vec::new())
    }

    pub fn with_reporters(
        registry: Arc<R>,
        reporters: impl IntoIterator<Item = Box<dyn Reporter>>,
    ) -> Self {
        let settings = SchedulerSettings::default();

        Self {
            pipeline: Arc::new(ReportPipeline::new(
                registry,
                reporters.into_iter().collect(),
            )),
            threads: NamedThreadFactory::new(settings.thread_name()),
            settings,
            state: State::Created,
        }
    }

    /// Replaces default settings, has effect only before [`start`](Self::start)
    pub fn with_settings(mut self, settings: SchedulerSettings) -> Self {
        self.threads = NamedThreadFactory::new(settings.thread_name());
        self.settings = settings;
        self
    }

    /// Appends reporter to the end of the dispatch order
    ///
    /// Reporters added while running receive data starting from the next tick. The
    /// call does not wait for a tick that is in progress.
    pub fn add_reporter(&mut self, reporter: impl Reporter + 'static) {
        self.pipeline.add_reporter(Box::new(reporter));
    }

    /// Starts reporting on a fixed rate
    ///
    /// The first report happens after one full `period`, following reports are
    /// anchored to the start time rather than to the end of the previous report.
    ///
    /// # Errors
    ///
    /// Fails when the period is zero, when the scheduler was already started or
    /// stopped, or when the worker thread cannot be created.
    pub fn start(&mut self, period: u64, unit: TimeUnit) -> Result<(), SchedulerError> {
        match self.state {
            State::Created => {}
            State::Started(_) => return Err(SchedulerError::AlreadyStarted),
            State::Stopped => return Err(SchedulerError::Stopped),
        }

        let interval = unit.to_duration(period);

        if interval.is_zero() {
            return Err(SchedulerError::InvalidPeriod);
        }

        let runtime = Builder::new_current_thread().enable_time().build()?;
        let token = CancellationToken::new();
        let (finished_sender, finished) = mpsc::channel();
        let dispatch = dispatcher::get_default(Dispatch::clone);

        let pipeline = Arc::clone(&self.pipeline);
        let worker_token = token.clone();

        let handle = self.threads.spawn(move || {
            let _finished = finished_sender;

            dispatcher::with_default(&dispatch, || {
                runtime.block_on(run_at_fixed_rate(interval, worker_token, || {
                    pipeline.run_tick();
                    future::ready(())
                }))
            })
        })?;

        self.state = State::Started(Worker {
            token,
            finished,
            handle,
        });

        info!(period = ?interval, "metric reporters started.");

        Ok(())
    }

    /// Stops the schedule
    ///
    /// No tick starts after this call returns. A tick that is already running gets
    /// the configured shutdown timeout to finish, after that the worker is left to
    /// complete it in the background.
    pub fn stop(&mut self) {
        match mem::replace(&mut self.state, State::Stopped) {
            State::Started(worker) => worker.shutdown(self.settings.shutdown_timeout()),
            State::Created => info!("metric reporters stopped."),
            State::Stopped => {}
        }
    }

    /// Runs a single report pass on the calling thread
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing reporter, reporters after it are skipped.
    /// Panics raised by the registry, accumulators or reporters are not caught.
    pub fn report(&self) -> Result<(), ReportError> {
        self.pipeline.report()
    }

    pub fn state(&self) -> SchedulerState {
        match self.state {
            State::Created => SchedulerState::Created,
            State::Started(_) => SchedulerState::Started,
            State::Stopped => SchedulerState::Stopped,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == SchedulerState::Started
    }

    pub fn settings(&self) -> &SchedulerSettings {
        &self.settings
    }
}

impl<R: ?Sized> Drop for ReportScheduler<R> {
    fn drop(&mut self) {
        if let State::Started(worker) = &self.state {
            worker.token.cancel();
        }
    }
}

impl<R> fmt::Debug for ReportScheduler<R>
where
    R: MetricRegistry + ?Sized + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportScheduler")
            .field("state", &self.state())
            .field("reporters", &self.pipeline.reporter_count())
            .field("settings", &self.settings)
            .finish()
    }
}
