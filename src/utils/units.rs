//! Unit conversion utilities

/// Convert kilohertz to gigahertz
#[inline]
pub fn khz_to_ghz(khz: u64) -> f64 {
    khz as f64 / 1_000_000.0
}

/// Convert kilohertz to megahertz
#[inline]
pub fn khz_to_mhz(khz: u64) -> u64 {
    khz / 1000
}
