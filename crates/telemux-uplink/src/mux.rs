//! The fair drain pass over all registered channel queues.
//!
//! Channels are serviced in registration order, one item per channel per
//! pass. Under sustained load from every channel this gives earlier
//! registrations a slight bias.

use std::io::Write;
use std::time::Duration;

use crossbeam_channel::Select;
use tracing::trace;

use telemux_frame::{FrameError, FrameWriter};

use crate::registry::Channel;

/// Block until at least one channel has data, or `timeout` elapses.
///
/// The timeout exists so the worker loop can observe shutdown and
/// connection state; callers just loop when it returns `false`.
pub(crate) fn wait_any_ready(channels: &[Channel], timeout: Duration) -> bool {
    let mut sel = Select::new();
    for ch in channels {
        sel.recv(&ch.rx);
    }
    sel.ready_timeout(timeout).is_ok()
}

/// Drain one item from every non-empty channel, in registration order,
/// framing and writing each to the collector.
///
/// A write failure aborts the pass: the failing item and anything already
/// dequeued are lost (at-most-once per attempt), and the caller must drop
/// the connection. Returns the number of frames written.
pub(crate) fn drain_ready<W: Write>(
    channels: &[Channel],
    writer: &mut FrameWriter<W>,
) -> Result<usize, FrameError> {
    let mut sent = 0usize;
    for ch in channels {
        if let Ok(payload) = ch.rx.try_recv() {
            writer.send(ch.id, &payload)?;
            trace!(channel = ch.id, len = payload.len(), "frame sent");
            sent += 1;
        }
    }
    Ok(sent)
}
