// src/handlers/probe.rs
use std::io;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};
use log::debug;
use crate::models::server::{ProbeResult, ServerAddress};

/// Checks whether a server accepts connections at all.
pub trait Prober {
    fn probe(&self, address: &ServerAddress) -> ProbeResult;
}

/// Plain TCP connect; no game protocol bytes are exchanged.
#[derive(Debug, Clone)]
pub struct TcpProber {
    timeout: Duration,
}

impl TcpProber {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Prober for TcpProber {
    fn probe(&self, address: &ServerAddress) -> ProbeResult {
        let started = Instant::now();
        match connect(address, started + self.timeout) {
            Ok(_stream) => {
                let latency = round_ms(started.elapsed());
                debug!("{} accepted a connection in {}ms", address, latency);
                ProbeResult::reachable(latency)
            }
            Err(e) => {
                debug!("{} is not reachable: {}", address, e);
                ProbeResult::unreachable()
            }
        }
    }
}

/// Tries each resolved address in turn until one connects or the deadline passes.
fn connect(address: &ServerAddress, deadline: Instant) -> io::Result<TcpStream> {
    let mut last_err = None;
    for addr in (address.host(), address.port()).to_socket_addrs()? {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(io::Error::new(io::ErrorKind::TimedOut, "connection timed out"));
        }
        match TcpStream::connect_timeout(&addr, remaining) {
            Ok(stream) => return Ok(stream),
            Err(e) => last_err = Some(e),
        }
    }
    Err(last_err.unwrap_or_else(|| io::Error::new(io::ErrorKind::NotFound, "host resolved to no addresses")))
}

/// Milliseconds, rounded to two decimals.
fn round_ms(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 100_000.0).round() / 100.0
}
