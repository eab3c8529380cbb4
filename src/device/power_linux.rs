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

use std::fs;
use std::path::PathBuf;

use crate::common::config::AppConfig;
use crate::device::traits::PowerStateReader;
use crate::error::{Error, Result};

/// Power source and lock detection backed by sysfs and a lock-marker file.
///
/// The lock marker is cross-process shared state: another process creates
/// and removes it to pause the governor around a lock screen or a pending
/// suspend. Only its presence matters.
pub struct LinuxPowerStateReader {
    power_supply_root: PathBuf,
    lock_marker: PathBuf,
}

impl LinuxPowerStateReader {
    pub fn new() -> Self {
        Self::with_paths(AppConfig::POWER_SUPPLY_ROOT, AppConfig::LOCK_MARKER_PATH)
    }

    pub fn with_paths(
        power_supply_root: impl Into<PathBuf>,
        lock_marker: impl Into<PathBuf>,
    ) -> Self {
        Self {
            power_supply_root: power_supply_root.into(),
            lock_marker: lock_marker.into(),
        }
    }
}

impl Default for LinuxPowerStateReader {
    fn default() -> Self {
        Self::new()
    }
}

impl PowerStateReader for LinuxPowerStateReader {
    fn is_plugged(&self) -> Result<bool> {
        for candidate in AppConfig::POWER_SUPPLY_CANDIDATES {
            let path = self.power_supply_root.join(candidate).join("online");
            if path.exists() {
                let value = fs::read_to_string(&path).map_err(|source| Error::ControlSurface {
                    path: path.clone(),
                    source,
                })?;
                return Ok(value.trim() == "1");
            }
        }
        // The environment is expected to expose exactly one of the known
        // identifiers; none found means no safe adjustment can proceed.
        Err(Error::NoPowerSupply {
            root: self.power_supply_root.clone(),
            probed: AppConfig::POWER_SUPPLY_CANDIDATES,
        })
    }

    fn is_locked(&self) -> bool {
        self.lock_marker.exists()
    }
}

#[cfg(test)]
mod tests;
