/*
 * Copyright © 2024. EcomDev B.V.
 * All rights reserved.
 * See LICENSE for license details.
 */

//! Named background workers.

use std::{
    fmt, io,
    thread::{Builder, JoinHandle},
};

use crate::sync::{AtomicUsize, Ordering};

const FIRST_THREAD_NUMBER: usize = 1;

/// Spawns OS threads named `{prefix}{number}`
///
/// Numbers start at 1 and grow with every thread spawned by the same factory, so
/// workers are easy to tell apart in thread dumps and debuggers. Spawned threads do
/// not keep the process alive once `main` returns.
///
/// # Examples
///
/// ```
/// use metric_reporter::NamedThreadFactory;
///
/// let factory = NamedThreadFactory::new("metrics-reporter");
///
/// assert_eq!(factory.next_name(), "metrics-reporter1");
/// assert_eq!(factory.next_name(), "metrics-reporter2");
/// ```
pub struct NamedThreadFactory {
    prefix: String,
    thread_number: AtomicUsize,
}

impl NamedThreadFactory {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            thread_number: AtomicUsize::new(FIRST_THREAD_NUMBER),
        }
    }

    /// Reserves the next thread number and returns its name
    pub fn next_name(&self) -> String {
        let number = self.thread_number.fetch_add(1, Ordering::Relaxed);
        format!("{}{}", self.prefix, number)
    }

    /// Spawns a thread with the next name of the factory
    ///
    /// # Errors
    ///
    /// Returns an error when the operating system refuses to create a thread.
    pub fn spawn<F, T>(&self, task: F) -> io::Result<JoinHandle<T>>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        Builder::new().name(self.next_name()).spawn(task)
    }
}

impl fmt::Debug for NamedThreadFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedThreadFactory")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}
