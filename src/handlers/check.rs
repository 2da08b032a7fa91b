// src/handlers/check.rs
use chrono::Local;
use log::{debug, info};
use crate::handlers::probe::Prober;
use crate::handlers::status::StatusSource;
use crate::models::server::{Outcome, Report, ServerAddress, StatusResult};

/// Runs one status check: ask the API first, then fall back to a direct
/// probe when the API fails, reports the server offline, or gives no ping.
#[derive(Debug)]
pub struct Checker<S, P> {
    source: S,
    prober: P,
}

impl<S: StatusSource, P: Prober> Checker<S, P> {
    pub fn new(source: S, prober: P) -> Self {
        Self { source, prober }
    }

    pub fn check(&self, address: &ServerAddress) -> Report {
        let outcome = match self.source.fetch(address) {
            Err(error) => {
                info!("Status lookup for {} failed ({}), probing directly", address, error);
                let probe = self.prober.probe(address);
                Outcome::LookupFailed { error, probe }
            }
            Ok(raw) => {
                let status = StatusResult::from_raw(raw);
                debug!("Status API body for {}: {}", address, status.raw);
                if !status.online {
                    debug!("API reports {} offline, probing directly", address);
                    let probe = self.prober.probe(address);
                    Outcome::Offline { status, probe }
                } else if status.latency_ms.is_none() {
                    let probe = Some(self.prober.probe(address));
                    Outcome::Online { status, probe }
                } else {
                    Outcome::Online { status, probe: None }
                }
            }
        };

        Report {
            address: address.clone(),
            checked_at: Local::now(),
            outcome,
        }
    }
}
