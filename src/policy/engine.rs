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

//! Frequency stepping policy.
//!
//! Maps a core's utilization sample to a frequency delta through four
//! non-overlapping bands, evaluated in priority order (first match wins):
//!
//! | utilization | delta     | at the edge            |
//! |-------------|-----------|------------------------|
//! | > 90        | +3 steps  | clamp to max, flagged  |
//! | (50, 90]    | +1 step   | clamp to max, flagged  |
//! | < 3         | -2 steps  | clamp to min, silent   |
//! | [3, 10)     | -1 step   | clamp to min, silent   |
//!
//! The 10-50 band is a dead zone with no adjustment. Stepped targets are
//! snapped to the hardware frequency table before writing; clamps to a
//! bound bypass snapping and write the bound directly.

use std::fmt;

use crate::common::config::AppConfig;
use crate::device::FrequencyBounds;

/// Direction and magnitude of an applied adjustment, for the per-core
/// summary line. Silent clamps to the minimum carry no change marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalingChange {
    SteepUp,
    Up,
    SaturatedMax,
    SteepDown,
    Down,
}

impl ScalingChange {
    pub fn indicator(self) -> &'static str {
        match self {
            ScalingChange::SteepUp => "+++",
            ScalingChange::Up => "+",
            ScalingChange::SaturatedMax => "max",
            ScalingChange::SteepDown => "--",
            ScalingChange::Down => "-",
        }
    }
}

impl fmt::Display for ScalingChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.indicator())
    }
}

/// How the target frequency should reach the hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyWrite {
    /// Snap to the nearest entry of the hardware frequency table, then
    /// write.
    Stepped(u64),
    /// Write the bound directly, bypassing the table.
    Clamped(u64),
}

/// One planned adjustment for one core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub write: FrequencyWrite,
    pub change: Option<ScalingChange>,
}

/// Plans the next frequency for a core given its current frequency and
/// utilization sample. Returns `None` in the dead zone (no write at all).
///
/// Pure function: all I/O stays with the caller.
pub fn plan_step(
    current_khz: u64,
    utilization_pct: f64,
    bounds: &FrequencyBounds,
    step_khz: u64,
) -> Option<Decision> {
    let FrequencyBounds { min_khz, max_khz } = *bounds;

    if utilization_pct > AppConfig::STEEP_UP_THRESHOLD {
        let target = current_khz + AppConfig::STEEP_UP_FACTOR * step_khz;
        Some(if target >= max_khz {
            Decision {
                write: FrequencyWrite::Clamped(max_khz),
                change: Some(ScalingChange::SaturatedMax),
            }
        } else {
            Decision {
                write: FrequencyWrite::Stepped(target),
                change: Some(ScalingChange::SteepUp),
            }
        })
    } else if utilization_pct > AppConfig::UP_THRESHOLD {
        let target = current_khz + step_khz;
        Some(if target >= max_khz {
            Decision {
                write: FrequencyWrite::Clamped(max_khz),
                change: Some(ScalingChange::SaturatedMax),
            }
        } else {
            Decision {
                write: FrequencyWrite::Stepped(target),
                change: Some(ScalingChange::Up),
            }
        })
    } else if utilization_pct < AppConfig::STEEP_DOWN_THRESHOLD {
        let target = current_khz.saturating_sub(AppConfig::STEEP_DOWN_FACTOR * step_khz);
        Some(if target <= min_khz {
            Decision {
                write: FrequencyWrite::Clamped(min_khz),
                change: None,
            }
        } else {
            Decision {
                write: FrequencyWrite::Stepped(target),
                change: Some(ScalingChange::SteepDown),
            }
        })
    } else if utilization_pct < AppConfig::DOWN_THRESHOLD {
        let target = current_khz.saturating_sub(step_khz);
        Some(if target <= min_khz {
            Decision {
                write: FrequencyWrite::Clamped(min_khz),
                change: None,
            }
        } else {
            Decision {
                write: FrequencyWrite::Stepped(target),
                change: Some(ScalingChange::Down),
            }
        })
    } else {
        None
    }
}

/// Snaps `target_khz` to the nearest entry of the hardware frequency table
/// by absolute difference. Ties resolve to the earlier entry. An empty
/// table returns the target unchanged so the caller can still issue the
/// raw write.
pub fn snap_to_available(target_khz: u64, available: &[u64]) -> u64 {
    let mut best = target_khz;
    let mut best_diff = u64::MAX;
    for &candidate in available {
        let diff = candidate.abs_diff(target_khz);
        if diff < best_diff {
            best_diff = diff;
            best = candidate;
        }
    }
    best
}
