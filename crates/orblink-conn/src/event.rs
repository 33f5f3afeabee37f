use orblink_frame::AsyncFrame;
use orblink_transport::TransportError;

/// Out-of-band notifications delivered on the connection's event sink.
///
/// The sink is bounded; [`Event::Async`] messages are dropped when it is
/// full (sensor streaming outruns slow consumers), while terminal events
/// are delivered best-effort as the reader loop exits.
#[derive(Debug)]
pub enum Event {
    /// Unsolicited frame pushed by the device.
    Async(AsyncFrame),

    /// The device closed the link; the reader loop exited gracefully.
    Closed,

    /// The reader loop hit an unrecoverable transport failure. The owner
    /// decides whether to reopen the connection or give up.
    ConnectionLost(TransportError),
}
