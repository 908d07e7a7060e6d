/*
 * Copyright © 2024. EcomDev B.V.
 * All rights reserved.
 * See LICENSE for license details.
 */
use std::time::Duration;

const DEFAULT_THREAD_NAME: &str = "metrics-reporter";
const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchedulerSettings {
    thread_name: String,
    shutdown_timeout: Duration,
}

impl SchedulerSettings {
    /// Changes name prefix of the report worker thread
    ///
    /// # Arguments
    ///
    /// * `thread_name`: prefix followed by the worker number, e.g. `metrics-reporter1`
    pub fn with_thread_name(self, thread_name: impl Into<String>) -> Self {
        Self {
            thread_name: thread_name.into(),
            ..self
        }
    }

    /// Changes how long [`stop`](crate::ReportScheduler::stop) waits for a running tick
    ///
    /// # Arguments
    ///
    /// * `shutdown_timeout`: grace period after which the worker is left behind
    pub fn with_shutdown_timeout(self, shutdown_timeout: Duration) -> Self {
        Self {
            shutdown_timeout,
            ..self
        }
    }

    pub fn thread_name(&self) -> &str {
        &self.thread_name
    }

    pub fn shutdown_timeout(&self) -> Duration {
        self.shutdown_timeout
    }
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            thread_name: DEFAULT_THREAD_NAME.to_string(),
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
        }
    }
}
