// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for freqgov.
//!
//! Every variant here describes an environment failure: the host does not
//! expose a control surface the governor needs, so no safe adjustment can
//! proceed. Errors propagate up to the loop driver, which logs the cause and
//! terminates with a non-zero status. Policy-level non-events (an unknown
//! governor name, a redundant write) are absorbed where they occur and never
//! reach this type.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for freqgov operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A cpufreq or power-supply control file could not be read or written.
    #[error("control surface access failed at {}: {source}", .path.display())]
    ControlSurface {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A control file was readable but its content did not parse as the
    /// expected integer value.
    #[error("malformed control value at {}: {value:?}", .path.display())]
    MalformedValue { path: PathBuf, value: String },

    /// None of the known power-supply identifiers exposes an `online` flag.
    #[error("no recognizable power supply under {} (probed {probed:?}), please report this", .root.display())]
    NoPowerSupply {
        root: PathBuf,
        probed: &'static [&'static str],
    },
}

/// A specialized `Result` type for freqgov operations.
pub type Result<T> = std::result::Result<T, Error>;
