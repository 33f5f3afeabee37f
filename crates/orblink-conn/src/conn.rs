use std::collections::HashMap;
use std::io::{ErrorKind, Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, SyncSender, TrySendError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use bytes::{Buf, BytesMut};
use orblink_frame::{encode_command, parse, AnswerFrame, Frame};
use orblink_transport::{SerialConfig, SerialLink, TransportError};
use tracing::{debug, warn};

use crate::error::{ConnError, Result};
use crate::event::Event;

/// Suggested capacity for the event sink channel.
pub const EVENT_SINK_CAPACITY: usize = 256;

const READ_CHUNK_SIZE: usize = 256;
const INITIAL_BUFFER_CAPACITY: usize = 1024;

/// State touched by both command senders and the reader thread.
///
/// One mutex covers sequence allocation, reply registration, and the
/// transport write, so allocate-and-register is atomic and frame bytes are
/// never interleaved on the wire.
struct Shared {
    writer: Box<dyn Write + Send>,
    seq: u8,
    pending: HashMap<u8, mpsc::Sender<AnswerFrame>>,
    closed: bool,
}

/// A live connection to the robot.
///
/// Owns the serial link and the reader thread. `Connection` is `Sync`:
/// share it behind an `Arc` and call [`send`](Connection::send) from as
/// many threads as needed.
pub struct Connection {
    shared: Arc<Mutex<Shared>>,
    shutdown: Arc<AtomicBool>,
    reader: Option<JoinHandle<()>>,
}

impl Connection {
    /// Open the serial device and spawn the reader thread.
    ///
    /// `events` receives unsolicited frames and terminal notifications;
    /// size it with [`EVENT_SINK_CAPACITY`] unless you have a reason not
    /// to. Async frames are dropped while the sink is full.
    pub fn open(config: &SerialConfig, events: SyncSender<Event>) -> Result<Self> {
        let writer = SerialLink::open(config)?;
        let reader = writer.try_clone()?;
        Ok(Self::from_parts(reader, writer, events))
    }

    /// Build a connection from raw stream halves.
    ///
    /// The reader half should have a read timeout configured: a blocked
    /// read only notices [`close`](Connection::close) when it wakes.
    pub fn from_parts<R, W>(reader: R, writer: W, events: SyncSender<Event>) -> Self
    where
        R: Read + Send + 'static,
        W: Write + Send + 'static,
    {
        let shared = Arc::new(Mutex::new(Shared {
            writer: Box::new(writer),
            seq: 0,
            pending: HashMap::new(),
            closed: false,
        }));
        let shutdown = Arc::new(AtomicBool::new(false));

        let reader_handle = {
            let shared = Arc::clone(&shared);
            let shutdown = Arc::clone(&shutdown);
            thread::spawn(move || reader_loop(reader, shared, events, shutdown))
        };

        Self {
            shared,
            shutdown,
            reader: Some(reader_handle),
        }
    }

    /// Send a command to `device`.
    ///
    /// Allocates the next sequence number, registers `reply` under it (if
    /// present), and writes the encoded frame. Returns the assigned
    /// sequence number. Does not wait for the answer — it arrives later on
    /// `reply`. With `reply == None` the command is fire-and-forget: no
    /// table entry is created and the answer, if any, is dropped.
    pub fn send(
        &self,
        device: u8,
        command: u8,
        payload: &[u8],
        reply: Option<mpsc::Sender<AnswerFrame>>,
    ) -> Result<u8> {
        let mut shared = lock(&self.shared);
        if shared.closed {
            return Err(ConnError::Closed);
        }

        let seq = shared.seq.wrapping_add(1);
        let mut frame = BytesMut::with_capacity(7 + payload.len());
        encode_command(device, command, seq, payload, &mut frame)?;
        shared.seq = seq;

        let registered = reply.is_some();
        if let Some(tx) = reply {
            shared.pending.insert(seq, tx);
        }

        let written = shared
            .writer
            .write_all(&frame)
            .and_then(|()| shared.writer.flush());
        if let Err(err) = written {
            if registered {
                shared.pending.remove(&seq);
            }
            return Err(TransportError::Io(err).into());
        }

        Ok(seq)
    }

    /// Number of requests still waiting for an answer.
    pub fn pending_replies(&self) -> usize {
        lock(&self.shared).pending.len()
    }

    /// Whether the connection has been closed or lost.
    pub fn is_closed(&self) -> bool {
        lock(&self.shared).closed
    }

    /// Signal the reader thread to stop and wait for it to exit.
    ///
    /// Subsequent `send` calls fail with [`ConnError::Closed`]. Calling
    /// `close` again is a no-op.
    pub fn close(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        lock(&self.shared).closed = true;
        if let Some(handle) = self.reader.take() {
            if handle.join().is_err() {
                warn!("reader thread panicked");
            }
        }
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        // Signal only; joining here could block a caller that never set a
        // read timeout on the transport.
        self.shutdown.store(true, Ordering::Relaxed);
        lock(&self.shared).closed = true;
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shared = lock(&self.shared);
        f.debug_struct("Connection")
            .field("seq", &shared.seq)
            .field("pending", &shared.pending.len())
            .field("closed", &shared.closed)
            .finish()
    }
}

fn lock(shared: &Arc<Mutex<Shared>>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Drain the transport until shutdown, EOF, or a fatal read error.
///
/// Owns the receive buffer exclusively. Framing errors desynchronize at
/// most one frame and never end the loop.
fn reader_loop<R: Read>(
    mut stream: R,
    shared: Arc<Mutex<Shared>>,
    events: SyncSender<Event>,
    shutdown: Arc<AtomicBool>,
) {
    let mut buf = BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY);
    let mut chunk = [0u8; READ_CHUNK_SIZE];

    let exit_event = loop {
        if shutdown.load(Ordering::Relaxed) {
            break None;
        }

        let read = match stream.read(&mut chunk) {
            Ok(0) => {
                debug!("device closed the link");
                break Some(Event::Closed);
            }
            Ok(n) => n,
            Err(err) => match err.kind() {
                // Timeouts double as the shutdown poll interval.
                ErrorKind::Interrupted | ErrorKind::TimedOut | ErrorKind::WouldBlock => continue,
                ErrorKind::UnexpectedEof
                | ErrorKind::BrokenPipe
                | ErrorKind::ConnectionReset
                | ErrorKind::ConnectionAborted
                | ErrorKind::NotConnected => {
                    debug!(error = %err, "link closed while reading");
                    break Some(Event::Closed);
                }
                _ => {
                    warn!(error = %err, "transport read failed");
                    break Some(Event::ConnectionLost(TransportError::Io(err)));
                }
            },
        };

        buf.extend_from_slice(&chunk[..read]);
        drain(&mut buf, &shared, &events);
    };

    // Fail fast for senders and unblock anyone still waiting on a reply:
    // dropping the pending senders wakes their receivers with a disconnect.
    {
        let mut shared = lock(&shared);
        shared.closed = true;
        shared.pending.clear();
    }

    if let Some(event) = exit_event {
        if events.try_send(event).is_err() {
            debug!("event sink gone before terminal event");
        }
    }
}

/// Run the parser over the buffer until it reports no progress.
fn drain(buf: &mut BytesMut, shared: &Arc<Mutex<Shared>>, events: &SyncSender<Event>) {
    loop {
        let step = parse(buf);
        if step.consumed == 0 {
            break;
        }
        if let Some(err) = step.error {
            warn!(error = %err, discarded = step.consumed, "framing error, resynchronizing");
        }
        if let Some(frame) = step.frame {
            dispatch(frame, shared, events);
        }
        buf.advance(step.consumed);
    }
}

fn dispatch(frame: Frame, shared: &Arc<Mutex<Shared>>, events: &SyncSender<Event>) {
    match frame {
        Frame::Answer(answer) => {
            let dest = lock(shared).pending.remove(&answer.seq);
            match dest {
                Some(tx) => {
                    if tx.send(answer).is_err() {
                        debug!("reply receiver dropped before the answer arrived");
                    }
                }
                None => debug!(seq = answer.seq, "answer with no pending request"),
            }
        }
        Frame::Async(msg) => match events.try_send(Event::Async(msg)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => warn!("event sink full, dropping async message"),
            Err(TrySendError::Disconnected(_)) => {
                debug!("event sink closed, dropping async message")
            }
        },
    }
}
