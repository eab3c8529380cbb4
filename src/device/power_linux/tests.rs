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

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::LinuxPowerStateReader;
use crate::common::config::AppConfig;
use crate::device::traits::PowerStateReader;
use crate::error::Error;

fn write_online(root: &Path, supply: &str, value: &str) {
    let dir = root.join(supply);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("online"), value).unwrap();
}

#[test]
fn test_plugged_when_online_flag_is_one() {
    let dir = tempfile::tempdir().unwrap();
    write_online(dir.path(), "AC", "1\n");
    let reader = LinuxPowerStateReader::with_paths(dir.path(), dir.path().join("missing"));
    assert!(reader.is_plugged().unwrap());
}

#[test]
fn test_on_battery_when_online_flag_is_zero() {
    let dir = tempfile::tempdir().unwrap();
    write_online(dir.path(), "AC", "0\n");
    let reader = LinuxPowerStateReader::with_paths(dir.path(), dir.path().join("missing"));
    assert!(!reader.is_plugged().unwrap());
}

#[test]
fn test_any_known_identifier_is_probed() {
    // only the last candidate exists
    let dir = tempfile::tempdir().unwrap();
    write_online(dir.path(), "ADP1", "1\n");
    let reader = LinuxPowerStateReader::with_paths(dir.path(), dir.path().join("missing"));
    assert!(reader.is_plugged().unwrap());
}

#[test]
fn test_no_known_power_supply_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let reader = LinuxPowerStateReader::with_paths(dir.path(), dir.path().join("missing"));
    assert!(matches!(
        reader.is_plugged(),
        Err(Error::NoPowerSupply { .. })
    ));
}

#[test]
fn test_candidate_list_has_no_duplicates() {
    let unique: HashSet<_> = AppConfig::POWER_SUPPLY_CANDIDATES.iter().collect();
    assert_eq!(unique.len(), AppConfig::POWER_SUPPLY_CANDIDATES.len());
    assert!(!AppConfig::POWER_SUPPLY_CANDIDATES.is_empty());
}

#[test]
fn test_lock_marker_presence() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("governor.lock");
    let reader = LinuxPowerStateReader::with_paths(dir.path(), &marker);
    assert!(!reader.is_locked());
    fs::write(&marker, "").unwrap();
    assert!(reader.is_locked());
    fs::remove_file(&marker).unwrap();
    assert!(!reader.is_locked());
}
