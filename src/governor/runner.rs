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

use std::thread;
use std::time::Duration;

use tracing::debug;

use crate::cli::Cli;
use crate::common::config::AppConfig;
use crate::device::traits::CpufreqControl;
use crate::device::{LinuxPowerStateReader, SysfsCpufreqControl, SysinfoSampler};
use crate::error::Result;
use crate::governor::machine::{CoreSummary, GovernorMachine, TickOutcome};
use crate::utils::khz_to_ghz;

/// Runs the governing loop until the process is terminated externally or an
/// environment error surfaces. No cleanup on exit: nothing is held across
/// iterations.
pub fn run(cli: &Cli) -> Result<()> {
    let cpufreq = SysfsCpufreqControl::new();
    let power = LinuxPowerStateReader::new();
    let mut sampler = SysinfoSampler::new();

    // Limits come from the reference core once; cores are assumed
    // homogeneous for the process lifetime.
    let bounds = cpufreq.frequency_bounds()?;
    let interval = Duration::from_secs(AppConfig::POLL_INTERVAL_SECS);
    let mut machine = GovernorMachine::new(bounds, AppConfig::FREQUENCY_STEP_KHZ);

    debug!(
        "governing between {} and {} kHz in {} kHz steps",
        bounds.min_khz,
        bounds.max_khz,
        AppConfig::FREQUENCY_STEP_KHZ
    );

    loop {
        // Core count is re-detected every interval.
        let core_count = num_cpus::get();
        match machine.advance(&power, &cpufreq, &mut sampler, core_count, interval)? {
            TickOutcome::Sleep => thread::sleep(interval),
            TickOutcome::Adjusted(summaries) => {
                if cli.debug {
                    print_summaries(&summaries);
                }
            }
        }
    }
}

fn print_summaries(summaries: &[CoreSummary]) {
    for summary in summaries {
        let mut line = format!(
            "{}:\t{:.2}%, {:.2}GHz",
            summary.core,
            summary.utilization_pct,
            khz_to_ghz(summary.frequency_khz)
        );
        if let Some(change) = summary.change {
            line = format!("{line} {change}");
        }
        println!("{line}");
    }
    println!();
}
