/// Errors that can occur on a connection.
#[derive(Debug, thiserror::Error)]
pub enum ConnError {
    /// Transport-level error.
    #[error("transport error: {0}")]
    Transport(#[from] orblink_transport::TransportError),

    /// The outgoing frame could not be encoded.
    #[error("frame error: {0}")]
    Encode(#[from] orblink_frame::EncodeError),

    /// The connection was closed, either by `close()` or because the
    /// reader loop terminated.
    #[error("connection closed")]
    Closed,
}

pub type Result<T> = std::result::Result<T, ConnError>;
