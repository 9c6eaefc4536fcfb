/// Errors that can occur in uplink configuration and operation.
///
/// Configuration errors surface at `register`/`start` time. Transport and
/// frame errors are recovered inside the worker's retry loop and never
/// propagate out of it.
#[derive(Debug, thiserror::Error)]
pub enum UplinkError {
    /// Channel ID 0 is reserved for control use.
    #[error("channel 0 is reserved for control use")]
    ReservedChannel,

    /// Payload size must be non-zero and within the configured maximum.
    #[error("invalid payload size {size} for channel {id} (allowed 1..={max})")]
    InvalidPayloadSize { id: u32, size: usize, max: usize },

    /// The fixed-size channel table is full.
    #[error("channel table full ({capacity} channels)")]
    RegistryFull { capacity: usize },

    /// The uplink cannot start without at least one registered channel.
    #[error("no channels registered")]
    NoChannels,

    /// Transport-level error.
    #[error("transport error: {0}")]
    Transport(#[from] telemux_transport::TransportError),

    /// Frame-level error.
    #[error("frame error: {0}")]
    Frame(#[from] telemux_frame::FrameError),

    /// The worker thread could not be spawned.
    #[error("failed to spawn uplink worker: {0}")]
    Spawn(std::io::Error),
}

pub type Result<T> = std::result::Result<T, UplinkError>;
