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
use std::path::Path;

use tempfile::TempDir;

use super::SysfsCpufreqControl;
use crate::device::traits::CpufreqControl;
use crate::device::FrequencyBounds;
use crate::error::Error;

fn write_param(root: &Path, core: usize, key: &str, value: &str) {
    let dir = root.join(format!("cpu{core}")).join("cpufreq");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(key), value).unwrap();
}

fn read_param(root: &Path, core: usize, key: &str) -> String {
    fs::read_to_string(root.join(format!("cpu{core}")).join("cpufreq").join(key)).unwrap()
}

fn fake_sysfs(cores: usize) -> (TempDir, SysfsCpufreqControl) {
    let dir = tempfile::tempdir().unwrap();
    for core in 0..cores {
        write_param(dir.path(), core, "scaling_governor", "ondemand\n");
        write_param(dir.path(), core, "scaling_cur_freq", "1600000\n");
        write_param(dir.path(), core, "scaling_min_freq", "800000\n");
        write_param(dir.path(), core, "scaling_max_freq", "3600000\n");
        write_param(
            dir.path(),
            core,
            "scaling_available_frequencies",
            "800000 1200000 1600000 2000000\n",
        );
        write_param(
            dir.path(),
            core,
            "scaling_available_governors",
            "performance userspace ondemand\n",
        );
    }
    let control = SysfsCpufreqControl::with_root(dir.path());
    (dir, control)
}

#[test]
fn test_read_strips_trailing_newline() {
    let (_dir, control) = fake_sysfs(1);
    assert_eq!(control.current_governor(0).unwrap(), "ondemand");
}

#[test]
fn test_frequency_bounds_come_from_reference_core() {
    let (dir, control) = fake_sysfs(2);
    // divergent values on core 1 must be ignored
    write_param(dir.path(), 1, "scaling_min_freq", "400000\n");
    assert_eq!(
        control.frequency_bounds().unwrap(),
        FrequencyBounds {
            min_khz: 800_000,
            max_khz: 3_600_000,
        }
    );
}

#[test]
fn test_available_governors() {
    let (_dir, control) = fake_sysfs(1);
    assert_eq!(
        control.available_governors().unwrap(),
        vec!["performance", "userspace", "ondemand"]
    );
}

#[test]
fn test_available_frequencies_skips_malformed_tokens() {
    let (dir, control) = fake_sysfs(1);
    write_param(
        dir.path(),
        0,
        "scaling_available_frequencies",
        "800000 garbage 1200000\n",
    );
    assert_eq!(
        control.available_frequencies().unwrap(),
        vec![800_000, 1_200_000]
    );
}

#[test]
fn test_set_governor_rejects_unknown_name() {
    let (dir, control) = fake_sysfs(1);
    control.set_governor(0, "warpspeed").unwrap();
    assert_eq!(read_param(dir.path(), 0, "scaling_governor"), "ondemand\n");
}

#[test]
fn test_set_governor_writes_known_name() {
    let (dir, control) = fake_sysfs(1);
    control.set_governor(0, "userspace").unwrap();
    assert_eq!(read_param(dir.path(), 0, "scaling_governor"), "userspace");
}

#[test]
fn test_set_governor_skips_redundant_write() {
    let (dir, control) = fake_sysfs(1);
    control.set_governor(0, "ondemand").unwrap();
    // an issued write would have stripped the newline
    assert_eq!(read_param(dir.path(), 0, "scaling_governor"), "ondemand\n");
}

#[test]
fn test_set_all_governors_writes_every_core() {
    let (dir, control) = fake_sysfs(4);
    control.set_all_governors("performance", 4).unwrap();
    for core in 0..4 {
        assert_eq!(
            read_param(dir.path(), core, "scaling_governor"),
            "performance"
        );
    }
}

#[test]
fn test_set_all_governors_skips_redundant_write() {
    let (dir, control) = fake_sysfs(2);
    write_param(dir.path(), 0, "scaling_governor", "performance\n");
    control.set_all_governors("performance", 2).unwrap();
    // core 1 untouched because the reference core already matched
    assert_eq!(read_param(dir.path(), 1, "scaling_governor"), "ondemand\n");
}

#[test]
fn test_set_closest_frequency_snaps_to_table() {
    let (dir, control) = fake_sysfs(1);
    control.set_closest_frequency(0, 1_350_000).unwrap();
    assert_eq!(read_param(dir.path(), 0, "scaling_setspeed"), "1200000");
}

#[test]
fn test_set_closest_frequency_with_empty_table_writes_raw_target() {
    let (dir, control) = fake_sysfs(1);
    write_param(dir.path(), 0, "scaling_available_frequencies", "\n");
    control.set_closest_frequency(0, 1_350_000).unwrap();
    assert_eq!(read_param(dir.path(), 0, "scaling_setspeed"), "1350000");
}

#[test]
fn test_missing_control_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let control = SysfsCpufreqControl::with_root(dir.path());
    assert!(matches!(
        control.current_frequency(0),
        Err(Error::ControlSurface { .. })
    ));
}

#[test]
fn test_malformed_frequency_value_is_an_error() {
    let (dir, control) = fake_sysfs(1);
    write_param(dir.path(), 0, "scaling_cur_freq", "not-a-number\n");
    assert!(matches!(
        control.current_frequency(0),
        Err(Error::MalformedValue { .. })
    ));
}
