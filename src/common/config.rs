/// Application configuration constants
pub struct AppConfig;

impl AppConfig {
    // Control surfaces
    pub const CPUFREQ_ROOT: &'static str = "/sys/devices/system/cpu";
    pub const POWER_SUPPLY_ROOT: &'static str = "/sys/class/power_supply";
    pub const LOCK_MARKER_PATH: &'static str = "/tmp/freqgov.lock";

    /// Power-supply identifiers probed for an `online` flag, in order.
    /// The list must stay free of duplicates.
    pub const POWER_SUPPLY_CANDIDATES: &'static [&'static str] = &["AC", "ACAD", "ADP1"];

    // Polling
    pub const POLL_INTERVAL_SECS: u64 = 3;

    // Frequency stepping
    pub const FREQUENCY_STEP_KHZ: u64 = 250_000;
    pub const STEEP_UP_FACTOR: u64 = 3;
    pub const STEEP_DOWN_FACTOR: u64 = 2;

    // Utilization band boundaries (percent). The 10-50 band is a deliberate
    // dead zone with no adjustment.
    pub const STEEP_UP_THRESHOLD: f64 = 90.0;
    pub const UP_THRESHOLD: f64 = 50.0;
    pub const DOWN_THRESHOLD: f64 = 10.0;
    pub const STEEP_DOWN_THRESHOLD: f64 = 3.0;

    // Governors
    pub const PERFORMANCE_GOVERNOR: &'static str = "performance";
    pub const USERSPACE_GOVERNOR: &'static str = "userspace";
}
