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
use crate::device::traits::CpufreqControl;
use crate::device::FrequencyBounds;
use crate::error::{Error, Result};
use crate::policy::engine::snap_to_available;

// Parameter names under cpu<N>/cpufreq/.
const SCALING_GOVERNOR: &str = "scaling_governor";
const SCALING_SETSPEED: &str = "scaling_setspeed";
const SCALING_CUR_FREQ: &str = "scaling_cur_freq";
const SCALING_MIN_FREQ: &str = "scaling_min_freq";
const SCALING_MAX_FREQ: &str = "scaling_max_freq";
const SCALING_AVAILABLE_FREQUENCIES: &str = "scaling_available_frequencies";
const SCALING_AVAILABLE_GOVERNORS: &str = "scaling_available_governors";

/// Capability queries go through this core and are assumed to hold for all
/// cores (homogeneous-core invariant).
const REFERENCE_CORE: usize = 0;

/// Cpufreq control facade over the sysfs key-value surface.
///
/// Parameters are addressed per core under
/// `<root>/cpu<N>/cpufreq/<key>`. The root is injectable so tests can run
/// against a temporary directory tree.
pub struct SysfsCpufreqControl {
    root: PathBuf,
}

impl SysfsCpufreqControl {
    pub fn new() -> Self {
        Self::with_root(AppConfig::CPUFREQ_ROOT)
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn param_path(&self, core: usize, key: &str) -> PathBuf {
        self.root.join(format!("cpu{core}")).join("cpufreq").join(key)
    }

    fn read_param(&self, core: usize, key: &str) -> Result<String> {
        let path = self.param_path(core, key);
        let raw = fs::read_to_string(&path).map_err(|source| Error::ControlSurface {
            path: path.clone(),
            source,
        })?;
        Ok(raw.trim_end_matches('\n').to_string())
    }

    fn write_param(&self, core: usize, key: &str, value: &str) -> Result<()> {
        let path = self.param_path(core, key);
        fs::write(&path, value).map_err(|source| Error::ControlSurface { path, source })
    }

    fn read_khz_param(&self, core: usize, key: &str) -> Result<u64> {
        let value = self.read_param(core, key)?;
        value.trim().parse().map_err(|_| Error::MalformedValue {
            path: self.param_path(core, key),
            value,
        })
    }
}

impl Default for SysfsCpufreqControl {
    fn default() -> Self {
        Self::new()
    }
}

impl CpufreqControl for SysfsCpufreqControl {
    fn available_governors(&self) -> Result<Vec<String>> {
        Ok(self
            .read_param(REFERENCE_CORE, SCALING_AVAILABLE_GOVERNORS)?
            .split_whitespace()
            .map(str::to_string)
            .collect())
    }

    fn current_governor(&self, core: usize) -> Result<String> {
        self.read_param(core, SCALING_GOVERNOR)
    }

    fn set_governor(&self, core: usize, governor: &str) -> Result<()> {
        // Hardware without the requested governor rejects the write, so an
        // unknown name is absorbed here instead.
        if !self.available_governors()?.iter().any(|g| g == governor) {
            return Ok(());
        }
        if self.current_governor(REFERENCE_CORE)? == governor {
            return Ok(());
        }
        self.write_param(core, SCALING_GOVERNOR, governor)
    }

    fn set_all_governors(&self, governor: &str, core_count: usize) -> Result<()> {
        if !self.available_governors()?.iter().any(|g| g == governor) {
            return Ok(());
        }
        if self.current_governor(REFERENCE_CORE)? == governor {
            return Ok(());
        }
        for core in 0..core_count {
            self.write_param(core, SCALING_GOVERNOR, governor)?;
        }
        Ok(())
    }

    fn available_frequencies(&self) -> Result<Vec<u64>> {
        // Read fresh on every call; unparsable tokens are skipped.
        Ok(self
            .read_param(REFERENCE_CORE, SCALING_AVAILABLE_FREQUENCIES)?
            .split_whitespace()
            .filter_map(|token| token.parse().ok())
            .collect())
    }

    fn current_frequency(&self, core: usize) -> Result<u64> {
        self.read_khz_param(core, SCALING_CUR_FREQ)
    }

    fn frequency_bounds(&self) -> Result<FrequencyBounds> {
        Ok(FrequencyBounds {
            min_khz: self.read_khz_param(REFERENCE_CORE, SCALING_MIN_FREQ)?,
            max_khz: self.read_khz_param(REFERENCE_CORE, SCALING_MAX_FREQ)?,
        })
    }

    fn set_frequency(&self, core: usize, khz: u64) -> Result<()> {
        self.write_param(core, SCALING_SETSPEED, &khz.to_string())
    }

    /*
        writing an arbitrary frequency has unpredictable behaviour depending
        on the target: some hardware silently rejects values outside the
        reported table and the clock gets stuck. snapping to the table
        avoids that.
    */
    fn set_closest_frequency(&self, core: usize, khz: u64) -> Result<()> {
        let available = self.available_frequencies()?;
        self.set_frequency(core, snap_to_available(khz, &available))
    }
}

#[cfg(test)]
mod tests;
