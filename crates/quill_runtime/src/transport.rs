//! Line-based TCP transport for multi-player sessions.
//!
//! An accept thread hands each new socket to the scheduler as a
//! [`NewConnection`]; a reader thread per socket turns incoming bytes into
//! lines. Telnet negotiation is stripped on the way in, and echo is toggled
//! with `IAC WILL/WONT ECHO` for hidden answers.

use std::io::{self, BufRead, BufReader, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use flume::{Receiver, Sender};
use quill_engine::{NewConnection, OutputSink, StopHandle};
use tracing::{debug, info, warn};

const IAC: u8 = 255;
const SB: u8 = 250;
const SE: u8 = 240;
const WILL: u8 = 251;
const WONT: u8 = 252;
const DO: u8 = 253;
const DONT: u8 = 254;
const ECHO: u8 = 1;

/// How long the accept loop sleeps when nobody is connecting.
const ACCEPT_POLL: Duration = Duration::from_millis(50);

/// Writes output to a socket, translating newlines for telnet clients.
#[derive(Debug)]
pub struct TelnetSink {
    stream: TcpStream,
}

impl OutputSink for TelnetSink {
    fn send(&mut self, text: &str) -> io::Result<()> {
        let text = text.replace('\n', "\r\n");
        self.stream.write_all(text.as_bytes())?;
        self.stream.flush()
    }

    fn set_echo(&mut self, echo: bool) {
        // The server claiming echo makes the client stop echoing locally.
        let command = if echo { [IAC, WONT, ECHO] } else { [IAC, WILL, ECHO] };
        if let Err(e) = self.stream.write_all(&command) {
            warn!(error = %e, "echo negotiation failed");
        }
    }

    fn close(&mut self) {
        let _ = self.stream.shutdown(Shutdown::Both);
    }
}

/// Removes telnet commands and line endings from one raw input line.
#[must_use]
pub fn clean_line(raw: &[u8]) -> String {
    let mut out = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        match raw[i] {
            IAC => match raw.get(i + 1) {
                Some(&SB) => {
                    // Skip to IAC SE.
                    i += 2;
                    while i < raw.len() && !(raw[i] == IAC && raw.get(i + 1) == Some(&SE)) {
                        i += 1;
                    }
                    i += 2;
                }
                Some(&(WILL | WONT | DO | DONT)) => i += 3,
                Some(&IAC) => {
                    out.push(IAC);
                    i += 2;
                }
                _ => i += 2,
            },
            b'\r' | b'\n' => i += 1,
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// The running accept thread.
#[derive(Debug)]
pub struct Listener {
    port: u16,
    handle: JoinHandle<()>,
}

impl Listener {
    /// Port actually bound, useful when binding port 0.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Waits for the accept thread to finish after a stop.
    pub fn join(self) {
        if self.handle.join().is_err() {
            warn!("transport thread panicked");
        }
    }
}

/// Binds `addr` and starts accepting connections until `stop` is set.
///
/// # Errors
///
/// Fails if the address cannot be bound or the thread cannot start.
pub fn listen(addr: SocketAddr, stop: StopHandle) -> io::Result<(Receiver<NewConnection>, Listener)> {
    let listener = TcpListener::bind(addr)?;
    listener.set_nonblocking(true)?;
    let port = listener.local_addr()?.port();
    let (tx, rx) = flume::unbounded();
    let handle = thread::Builder::new()
        .name("quill-transport".into())
        .spawn(move || accept_loop(&listener, &tx, &stop))?;
    info!(port, "listening for players");
    Ok((rx, Listener { port, handle }))
}

fn accept_loop(listener: &TcpListener, tx: &Sender<NewConnection>, stop: &StopHandle) {
    while !stop.is_stopped() {
        match listener.accept() {
            Ok((stream, peer)) => match connection_for(stream, peer) {
                Ok(connection) => {
                    if tx.send(connection).is_err() {
                        break;
                    }
                }
                Err(e) => warn!(%peer, error = %e, "could not set up connection"),
            },
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => thread::sleep(ACCEPT_POLL),
            Err(e) => {
                warn!(error = %e, "accept failed");
                thread::sleep(ACCEPT_POLL);
            }
        }
    }
    debug!("accept loop stopped");
}

fn connection_for(stream: TcpStream, peer: SocketAddr) -> io::Result<NewConnection> {
    stream.set_nonblocking(false)?;
    if let Err(e) = stream.set_nodelay(true) {
        warn!(%peer, error = %e, "nodelay failed");
    }
    let reader = stream.try_clone()?;
    let (line_tx, line_rx) = flume::unbounded();
    thread::Builder::new()
        .name(format!("quill-reader-{peer}"))
        .spawn(move || read_lines(reader, &line_tx, peer))?;
    info!(%peer, "peer connected");
    Ok(NewConnection::new(line_rx, Box::new(TelnetSink { stream })))
}

fn read_lines(stream: TcpStream, tx: &Sender<String>, peer: SocketAddr) {
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                if tx.send(clean_line(&buf)).is_err() {
                    break;
                }
            }
            Err(e) => {
                debug!(%peer, error = %e, "read failed");
                break;
            }
        }
    }
    info!(%peer, "peer disconnected");
}
