/*
 * Copyright © 2024. EcomDev B.V.
 * All rights reserved.
 * See LICENSE for license details.
 */
use std::io;
use thiserror::Error;

use crate::reporter::ReporterError;

/// Failure of a single report pass
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Reporter `{reporter}` failed: {source}")]
    Reporter {
        reporter: String,
        #[source]
        source: ReporterError,
    },

    #[error("Report tick panicked: {message}")]
    Panicked {
        /// Reporter that panicked, `None` when the registry or an accumulator did
        reporter: Option<String>,
        message: String,
    },
}

impl ReportError {
    /// Name of the reporter that caused the failure, if any
    pub fn reporter(&self) -> Option<&str> {
        match self {
            Self::Reporter { reporter, .. } => Some(reporter),
            Self::Panicked { reporter, .. } => reporter.as_deref(),
        }
    }
}

/// Lifecycle errors of [`ReportScheduler`](crate::ReportScheduler)
#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("Report period must be greater than zero")]
    InvalidPeriod,

    #[error("Report scheduler is already started")]
    AlreadyStarted,

    #[error("Report scheduler is stopped and cannot be started again")]
    Stopped,

    #[error("Failed to start report worker: {0}")]
    Spawn(#[from] io::Error),
}
