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

use std::time::Duration;

use crate::device::FrequencyBounds;
use crate::error::Result;

/// Per-core frequency-scaling control surface.
///
/// Capability queries (`available_governors`, `available_frequencies`,
/// `frequency_bounds`) read from the reference core and are assumed valid
/// for every core.
pub trait CpufreqControl {
    fn available_governors(&self) -> Result<Vec<String>>;
    fn current_governor(&self, core: usize) -> Result<String>;
    /// Writes the governor for one core. Silent no-op when `governor` is
    /// not in the available set or the reference core already runs it.
    fn set_governor(&self, core: usize, governor: &str) -> Result<()>;
    /// Writes the governor for every core. Silent no-op when `governor` is
    /// not in the available set or the reference core already runs it.
    fn set_all_governors(&self, governor: &str, core_count: usize) -> Result<()>;
    /// The hardware frequency table, read fresh on every call.
    fn available_frequencies(&self) -> Result<Vec<u64>>;
    fn current_frequency(&self, core: usize) -> Result<u64>;
    fn frequency_bounds(&self) -> Result<FrequencyBounds>;
    /// Writes `khz` as-is, bypassing the hardware frequency table.
    fn set_frequency(&self, core: usize, khz: u64) -> Result<()>;
    /// Snaps `khz` to the nearest entry of the hardware frequency table
    /// before writing.
    fn set_closest_frequency(&self, core: usize, khz: u64) -> Result<()>;
}

/// Power source and lock-signal detection.
pub trait PowerStateReader {
    /// Whether the system runs on external power.
    fn is_plugged(&self) -> Result<bool>;
    /// Whether the external lock marker is present. Presence alone pauses
    /// all adjustments; the marker content is never read.
    fn is_locked(&self) -> bool;
}

/// Per-core utilization sampling over a fixed window.
pub trait UtilizationSampler {
    /// Blocks for `interval`, then returns one percentage per core in
    /// core-index order. Values may slightly exceed 100 under measurement
    /// artifacts.
    fn sample(&mut self, interval: Duration) -> Vec<f64>;
}
