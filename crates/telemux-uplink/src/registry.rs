use bytes::Bytes;
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use tracing::{debug, warn};

use telemux_frame::CONTROL_CHANNEL;
use telemux_transport::TcpConnector;

use crate::config::UplinkConfig;
use crate::connection::Connection;
use crate::error::{Result, UplinkError};
use crate::worker::UplinkWorker;

/// Channel names are display-only and truncated to this many bytes.
const MAX_NAME_LEN: usize = 32;

/// One registered telemetry source: identity plus its bounded queue.
///
/// The registry keeps both ends of the queue; producers get a clone of the
/// sender wrapped in a [`ChannelHandle`], the worker drains the receiver.
/// Holding the sender here means the queue never disconnects while the
/// worker runs, even if every producer handle is dropped.
pub(crate) struct Channel {
    pub(crate) id: u32,
    pub(crate) name: String,
    pub(crate) payload_size: usize,
    pub(crate) tx: Sender<Bytes>,
    pub(crate) rx: Receiver<Bytes>,
}

impl Channel {
    /// A fresh producer handle for this channel's queue.
    pub(crate) fn handle(&self) -> ChannelHandle {
        ChannelHandle {
            id: self.id,
            payload_size: self.payload_size,
            tx: self.tx.clone(),
        }
    }
}

/// Producer-facing handle to one channel's queue.
///
/// Cheap to clone; safe to use from any thread. Never blocks.
#[derive(Debug, Clone)]
pub struct ChannelHandle {
    id: u32,
    payload_size: usize,
    tx: Sender<Bytes>,
}

impl ChannelHandle {
    /// Enqueue one encoded record for delivery.
    ///
    /// Returns `false` without blocking if the payload length does not
    /// match the registered size, or if the queue is full (the record is
    /// dropped).
    pub fn push(&self, payload: impl Into<Bytes>) -> bool {
        let payload = payload.into();
        if payload.len() != self.payload_size {
            warn!(
                channel = self.id,
                len = payload.len(),
                expected = self.payload_size,
                "payload size mismatch, record dropped"
            );
            return false;
        }
        match self.tx.try_send(payload) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                debug!(channel = self.id, "queue full, record dropped");
                false
            }
            Err(TrySendError::Disconnected(_)) => {
                debug!(channel = self.id, "queue gone, record dropped");
                false
            }
        }
    }

    /// The channel ID this handle pushes to.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// The fixed payload size registered for this channel.
    pub fn payload_size(&self) -> usize {
        self.payload_size
    }
}

/// Builds the frozen channel set, then starts the uplink worker.
///
/// Registration is only possible before [`start`](UplinkBuilder::start);
/// `start` consumes the builder, so the channel set is immutable for the
/// life of the worker and a second start is unrepresentable.
pub struct UplinkBuilder {
    config: UplinkConfig,
    channels: Vec<Channel>,
}

impl UplinkBuilder {
    /// Create a builder in the pre-start phase.
    pub fn new(config: UplinkConfig) -> Self {
        Self {
            config,
            channels: Vec::new(),
        }
    }

    /// Register a telemetry channel.
    ///
    /// Fails for the reserved ID 0, a zero or over-limit payload size, or a
    /// full channel table. Re-registering an existing ID before start
    /// overwrites its name and queue and returns a fresh handle; handles
    /// from the replaced registration go stale (their pushes return
    /// `false`).
    pub fn register(
        &mut self,
        id: u32,
        name: &str,
        payload_size: usize,
    ) -> Result<ChannelHandle> {
        if id == CONTROL_CHANNEL {
            return Err(UplinkError::ReservedChannel);
        }
        if payload_size == 0 || payload_size > self.config.max_payload_size {
            return Err(UplinkError::InvalidPayloadSize {
                id,
                size: payload_size,
                max: self.config.max_payload_size,
            });
        }

        let existing = self.channels.iter().position(|ch| ch.id == id);
        if existing.is_none() && self.channels.len() >= self.config.max_channels {
            return Err(UplinkError::RegistryFull {
                capacity: self.config.max_channels,
            });
        }

        let (tx, rx) = bounded(self.config.queue_capacity);
        let channel = Channel {
            id,
            name: truncate_name(name),
            payload_size,
            tx,
            rx,
        };
        let handle = channel.handle();

        match existing {
            Some(pos) => {
                warn!(channel = id, "re-registered, previous queue replaced");
                self.channels[pos] = channel;
            }
            None => {
                debug!(channel = id, name, size = payload_size, "channel registered");
                self.channels.push(channel);
            }
        }

        Ok(handle)
    }

    /// Freeze the channel set and start the worker thread.
    pub fn start(self) -> Result<UplinkWorker> {
        if self.channels.is_empty() {
            return Err(UplinkError::NoChannels);
        }

        let connector =
            TcpConnector::with_timeout(&self.config.collector, self.config.connect_timeout);
        let frame_config = telemux_frame::FrameConfig {
            max_payload_size: self.config.max_payload_size,
        };
        let connection = Connection::new(connector, frame_config);

        UplinkWorker::spawn(self.channels, connection, self.config.retry_delay)
    }

    /// Number of registered channels.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Whether no channel has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// The (possibly truncated) registered name for `id`.
    pub fn channel_name(&self, id: u32) -> Option<&str> {
        self.channels
            .iter()
            .find(|ch| ch.id == id)
            .map(|ch| ch.name.as_str())
    }

    /// The registered payload size for `id`.
    pub fn payload_size(&self, id: u32) -> Option<usize> {
        self.channels
            .iter()
            .find(|ch| ch.id == id)
            .map(|ch| ch.payload_size)
    }
}

fn truncate_name(name: &str) -> String {
    if name.len() <= MAX_NAME_LEN {
        return name.to_string();
    }
    let mut end = MAX_NAME_LEN;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    name[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> UplinkBuilder {
        let mut config = UplinkConfig::new("127.0.0.1:1");
        config.queue_capacity = 2;
        config.max_channels = 3;
        UplinkBuilder::new(config)
    }

    #[test]
    fn register_and_retrieve() {
        let mut b = builder();
        let handle = b.register(1, "env", 24).unwrap();
        assert_eq!(handle.id(), 1);
        assert_eq!(handle.payload_size(), 24);
        assert_eq!(b.channel_name(1), Some("env"));
        assert_eq!(b.payload_size(1), Some(24));
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn reserved_id_rejected() {
        let mut b = builder();
        let err = b.register(0, "control", 4).unwrap_err();
        assert!(matches!(err, UplinkError::ReservedChannel));
    }

    #[test]
    fn zero_payload_size_rejected() {
        let mut b = builder();
        let err = b.register(1, "empty", 0).unwrap_err();
        assert!(matches!(err, UplinkError::InvalidPayloadSize { .. }));
    }

    #[test]
    fn oversized_payload_rejected() {
        let mut config = UplinkConfig::new("127.0.0.1:1");
        config.max_payload_size = 64;
        let mut b = UplinkBuilder::new(config);
        let err = b.register(1, "big", 65).unwrap_err();
        assert!(matches!(
            err,
            UplinkError::InvalidPayloadSize { size: 65, max: 64, .. }
        ));
    }

    #[test]
    fn table_capacity_enforced() {
        let mut b = builder();
        b.register(1, "a", 4).unwrap();
        b.register(2, "b", 4).unwrap();
        b.register(3, "c", 4).unwrap();
        let err = b.register(4, "d", 4).unwrap_err();
        assert!(matches!(err, UplinkError::RegistryFull { capacity: 3 }));
    }

    #[test]
    fn reregistration_overwrites() {
        // Documented quirk: a duplicate ID before start replaces the
        // earlier registration instead of erroring.
        let mut b = builder();
        let old = b.register(5, "first", 4).unwrap();
        let new = b.register(5, "second", 4).unwrap();

        assert_eq!(b.len(), 1);
        assert_eq!(b.channel_name(5), Some("second"));

        // The replaced queue is gone; stale handles drop everything.
        assert!(!old.push(vec![0u8; 4]));
        assert!(new.push(vec![0u8; 4]));
    }

    #[test]
    fn reregistration_does_not_consume_capacity() {
        let mut b = builder();
        b.register(1, "a", 4).unwrap();
        b.register(2, "b", 4).unwrap();
        b.register(3, "c", 4).unwrap();
        // Table is full, but overwriting an existing ID still works.
        assert!(b.register(2, "b2", 8).is_ok());
        assert_eq!(b.payload_size(2), Some(8));
    }

    #[test]
    fn push_drops_on_full_queue() {
        let mut b = builder(); // queue_capacity = 2
        let handle = b.register(1, "env", 4).unwrap();

        assert!(handle.push(vec![1u8; 4]));
        assert!(handle.push(vec![2u8; 4]));
        // Queue is at capacity: the third push returns immediately and drops.
        assert!(!handle.push(vec![3u8; 4]));

        let ch = &b.channels[0];
        assert_eq!(ch.rx.len(), 2);
        assert_eq!(ch.rx.try_recv().unwrap().as_ref(), &[1u8; 4]);
    }

    #[test]
    fn push_rejects_wrong_size() {
        let mut b = builder();
        let handle = b.register(1, "env", 4).unwrap();
        assert!(!handle.push(vec![0u8; 3]));
        assert!(b.channels[0].rx.is_empty());
    }

    #[test]
    fn long_names_truncated() {
        let mut b = builder();
        let long = "x".repeat(80);
        b.register(1, &long, 4).unwrap();
        assert_eq!(b.channel_name(1).unwrap().len(), MAX_NAME_LEN);
    }

    #[test]
    fn multibyte_names_truncated_at_char_boundary() {
        let mut b = builder();
        // 12 three-byte chars = 36 bytes; 32 falls mid-char, so the cut
        // lands at the previous boundary (30 bytes, 10 chars).
        let long = "日".repeat(12);
        b.register(1, &long, 4).unwrap();
        let name = b.channel_name(1).unwrap();
        assert!(name.len() <= MAX_NAME_LEN);
        assert_eq!(name, "日".repeat(10));
    }

    #[test]
    fn start_without_channels_fails() {
        let b = builder();
        let err = b.start().unwrap_err();
        assert!(matches!(err, UplinkError::NoChannels));
    }
}
