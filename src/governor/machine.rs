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

//! Governor state machine.
//!
//! Tracks the coarse system state and drives one polling interval per
//! `advance` call. Governor writes and transition log lines fire only on
//! the transition edge, never on every interval spent in a state.

use std::time::Duration;

use tracing::info;

use crate::common::config::AppConfig;
use crate::device::traits::{CpufreqControl, PowerStateReader, UtilizationSampler};
use crate::device::FrequencyBounds;
use crate::policy::engine::{plan_step, FrequencyWrite, ScalingChange};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemState {
    Undefined,
    Locked,
    Plugged,
    OnBattery,
}

/// Per-core result of one on-battery adjustment pass. Lives for one
/// reporting cycle only.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreSummary {
    pub core: usize,
    pub utilization_pct: f64,
    pub frequency_khz: u64,
    pub change: Option<ScalingChange>,
}

/// What the loop driver should do after one `advance` call.
#[derive(Debug)]
pub enum TickOutcome {
    /// Locked or on external power: sleep one interval, no frequency work.
    Sleep,
    /// On battery: the utilization sample already consumed the interval;
    /// report and go straight into the next tick.
    Adjusted(Vec<CoreSummary>),
}

pub struct GovernorMachine {
    state: SystemState,
    bounds: FrequencyBounds,
    step_khz: u64,
}

impl GovernorMachine {
    pub fn new(bounds: FrequencyBounds, step_khz: u64) -> Self {
        Self {
            state: SystemState::Undefined,
            bounds,
            step_khz,
        }
    }

    pub fn state(&self) -> SystemState {
        self.state
    }

    /// Runs one polling interval: re-detects the system state, applies
    /// transition side effects once per edge, and on battery runs a full
    /// sampling and stepping pass over all cores.
    pub fn advance(
        &mut self,
        power: &dyn PowerStateReader,
        cpufreq: &dyn CpufreqControl,
        sampler: &mut dyn UtilizationSampler,
        core_count: usize,
        interval: Duration,
    ) -> Result<TickOutcome> {
        if power.is_locked() {
            if self.state != SystemState::Locked {
                self.state = SystemState::Locked;
                info!("locked, waiting");
            }
            return Ok(TickOutcome::Sleep);
        }
        if self.state == SystemState::Locked {
            info!("unlocked");
        }

        if power.is_plugged()? {
            if self.state != SystemState::Plugged {
                self.state = SystemState::Plugged;
                info!(
                    "on external power, setting the {} governor",
                    AppConfig::PERFORMANCE_GOVERNOR
                );
                cpufreq.set_all_governors(AppConfig::PERFORMANCE_GOVERNOR, core_count)?;
            }
            return Ok(TickOutcome::Sleep);
        }

        if self.state != SystemState::OnBattery {
            self.state = SystemState::OnBattery;
            info!(
                "on battery, setting the {} governor and optimising frequency",
                AppConfig::USERSPACE_GOVERNOR
            );
            cpufreq.set_all_governors(AppConfig::USERSPACE_GOVERNOR, core_count)?;
        }

        let samples = sampler.sample(interval);
        let mut summaries = Vec::with_capacity(samples.len());
        for (core, &utilization_pct) in samples.iter().enumerate() {
            let current = cpufreq.current_frequency(core)?;
            let change = match plan_step(current, utilization_pct, &self.bounds, self.step_khz) {
                Some(decision) => {
                    match decision.write {
                        FrequencyWrite::Stepped(khz) => cpufreq.set_closest_frequency(core, khz)?,
                        FrequencyWrite::Clamped(khz) => cpufreq.set_frequency(core, khz)?,
                    }
                    decision.change
                }
                None => None,
            };
            summaries.push(CoreSummary {
                core,
                utilization_pct,
                frequency_khz: cpufreq.current_frequency(core)?,
                change,
            });
        }
        Ok(TickOutcome::Adjusted(summaries))
    }
}
