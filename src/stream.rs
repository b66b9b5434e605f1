//! Child stream readers
//!
//! Each piped stream of the child gets its own thread that reads raw chunks
//! and sends them to the runner over a channel. Chunks are forwarded exactly
//! as the pipe delivered them; nothing is split on lines.

use std::fmt;
use std::io::{ErrorKind, Read};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

/// Largest chunk handed over in a single event
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Which child stream an event came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamSource {
    Stdout,
    Stderr,
}

impl StreamSource {
    /// Console prefix identifying the origin of a chunk
    pub fn prefix(self) -> &'static str {
        match self {
            StreamSource::Stdout => "stdout: ",
            StreamSource::Stderr => "stderr: ",
        }
    }
}

impl fmt::Display for StreamSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamSource::Stdout => f.write_str("stdout"),
            StreamSource::Stderr => f.write_str("stderr"),
        }
    }
}

/// Event sent from a reader thread to the runner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    Data(StreamSource, Vec<u8>),
    Closed(StreamSource),
    Failed(StreamSource, String),
}

/// Start a thread that forwards everything read from `reader` as events
///
/// The thread always finishes with exactly one `Closed` or `Failed` event,
/// unless the receiving side is gone.
pub fn spawn_reader<R>(
    source: StreamSource,
    reader: R,
    tx: Sender<StreamEvent>,
) -> std::io::Result<JoinHandle<()>>
where
    R: Read + Send + 'static,
{
    thread::Builder::new()
        .name(format!("listrun-{}", source))
        .spawn(move || read_loop(source, reader, tx))
}

fn read_loop<R: Read>(source: StreamSource, mut reader: R, tx: Sender<StreamEvent>) {
    let mut buffer = vec![0u8; CHUNK_SIZE];
    loop {
        match reader.read(&mut buffer) {
            Ok(0) => {
                let _ = tx.send(StreamEvent::Closed(source));
                break;
            }
            Ok(n) => {
                if tx.send(StreamEvent::Data(source, buffer[..n].to_vec())).is_err() {
                    break;
                }
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                let _ = tx.send(StreamEvent::Failed(source, e.to_string()));
                break;
            }
        }
    }
}
