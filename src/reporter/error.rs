/*
 * Copyright © 2024. EcomDev B.V.
 * All rights reserved.
 * See LICENSE for license details.
 */
use std::error::Error;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReporterError {
    #[error("Reporter output failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Message(String),

    // Allows returning any error from that supports Error trait
    #[error(transparent)]
    Dynamic(#[from] Box<dyn Error + Send + Sync>),
}

impl From<&str> for ReporterError {
    fn from(value: &str) -> Self {
        ReporterError::Message(value.to_string())
    }
}

impl From<String> for ReporterError {
    fn from(value: String) -> Self {
        ReporterError::Message(value)
    }
}
