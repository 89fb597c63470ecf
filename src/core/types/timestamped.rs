//! Timestamp wrapper for sensor data.

use serde::{Deserialize, Serialize};

/// A value paired with a monotonic timestamp in microseconds.
///
/// Vision estimates carry the capture time of the underlying frame so
/// the odometry collaborator can apply them at the right point in its
/// history, not at the time of submission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timestamped<T> {
    /// The wrapped value
    pub data: T,
    /// Monotonic timestamp in microseconds
    pub timestamp_us: u64,
}

impl<T> Timestamped<T> {
    /// Wrap a value with its timestamp.
    pub fn new(data: T, timestamp_us: u64) -> Self {
        Self { data, timestamp_us }
    }
}
