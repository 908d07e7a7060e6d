/*
 * Copyright © 2024. EcomDev B.V.
 * All rights reserved.
 * See LICENSE for license details.
 */
//! Test doubles for registries, accumulators and reporters.

mod recording_reporter;
mod registry_stub;

pub use recording_reporter::*;
pub use registry_stub::*;
