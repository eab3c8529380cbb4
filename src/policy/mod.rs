pub mod engine;

pub use engine::{plan_step, snap_to_available, Decision, FrequencyWrite, ScalingChange};
