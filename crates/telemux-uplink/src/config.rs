use std::time::Duration;

use telemux_frame::DEFAULT_MAX_PAYLOAD;

/// Configuration for the uplink worker.
#[derive(Debug, Clone)]
pub struct UplinkConfig {
    /// Collector address, `host:port`.
    pub collector: String,
    /// Bound on a single connect attempt.
    pub connect_timeout: Duration,
    /// Fixed wait between failed connect attempts. No backoff, no cap;
    /// the worker retries for the life of the process.
    pub retry_delay: Duration,
    /// Maximum registrable per-channel payload size.
    pub max_payload_size: usize,
    /// Capacity of the channel table.
    pub max_channels: usize,
    /// Bounded queue depth per channel. A full queue drops new records.
    pub queue_capacity: usize,
}

impl UplinkConfig {
    /// Configuration with defaults for everything but the collector address.
    pub fn new(collector: impl Into<String>) -> Self {
        Self {
            collector: collector.into(),
            connect_timeout: Duration::from_secs(5),
            retry_delay: Duration::from_secs(1),
            max_payload_size: DEFAULT_MAX_PAYLOAD,
            max_channels: 8,
            queue_capacity: 16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = UplinkConfig::new("10.0.0.1:5555");
        assert_eq!(config.collector, "10.0.0.1:5555");
        assert_eq!(config.retry_delay, Duration::from_secs(1));
        assert_eq!(config.max_channels, 8);
        assert!(config.queue_capacity > 0);
    }
}
