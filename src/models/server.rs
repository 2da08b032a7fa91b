// src/models/server.rs
use std::fmt;
use chrono::{DateTime, Local};
use serde_json::Value;
use crate::models::api::{format_motd, format_version, ApiResponse, PlayerEntry, NO_MOTD};
use crate::utils::LookupError;

/// A validated `host:port` pair. Only built through address parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerAddress {
    host: String,
    port: u16,
}

impl ServerAddress {
    pub(crate) fn new(host: String, port: u16) -> Self {
        Self { host, port }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSummary {
    pub online: i64,
    pub max: i64,
    pub names: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct StatusResult {
    pub online: bool,
    pub motd: Option<String>,
    pub version: String,
    pub players: Option<PlayerSummary>,
    pub latency_ms: Option<f64>,
    pub srv_record: bool,
    pub software: Option<String>,
    pub mod_count: usize,
    pub raw: Value,
}

impl StatusResult {
    pub fn from_raw(raw: Value) -> Self {
        let response = ApiResponse::from_value(&raw);

        let players = response.players.as_ref().filter(|p| p.is_reported()).map(|p| PlayerSummary {
            online: p.online.unwrap_or(0),
            max: p.max.unwrap_or(0),
            names: p
                .list
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(PlayerEntry::display_name)
                .collect(),
        });

        Self {
            online: response.is_online(),
            motd: Some(format_motd(response.motd.as_ref())).filter(|m| m != NO_MOTD),
            version: format_version(response.version.as_ref()),
            players,
            latency_ms: response.ping_ms(),
            srv_record: response.has_srv_record(),
            software: response.software_name(),
            mod_count: response.mod_count(),
            raw,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeResult {
    pub reachable: bool,
    pub latency_ms: Option<f64>,
}

impl ProbeResult {
    pub fn reachable(latency_ms: f64) -> Self {
        Self { reachable: true, latency_ms: Some(latency_ms) }
    }

    pub fn unreachable() -> Self {
        Self { reachable: false, latency_ms: None }
    }
}

/// What a single check found.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The API answered and reports the server online. `probe` is only set
    /// when the API gave no ping of its own.
    Online { status: StatusResult, probe: Option<ProbeResult> },
    /// The API answered but reports the server offline.
    Offline { status: StatusResult, probe: ProbeResult },
    /// The API call itself failed.
    LookupFailed { error: LookupError, probe: ProbeResult },
}

#[derive(Debug, Clone)]
pub struct Report {
    pub address: ServerAddress,
    pub checked_at: DateTime<Local>,
    pub outcome: Outcome,
}

impl Report {
    pub fn is_success(&self) -> bool {
        !matches!(self.outcome, Outcome::LookupFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_is_normalized_from_raw_body() {
        let raw = json!({
            "online": true,
            "motd": {"clean": ["Welcome", "to the server"]},
            "version": {"name": "Paper 1.20"},
            "players": {"online": 2, "max": 20, "list": [{"name": "A"}, {"name": "B"}]},
            "debug": {"ping": 12.5, "srv": false},
            "software": "Paper"
        });
        let status = StatusResult::from_raw(raw.clone());

        assert!(status.online);
        assert_eq!(status.motd.as_deref(), Some("Welcome to the server"));
        assert_eq!(status.version, "Paper 1.20");
        assert_eq!(
            status.players,
            Some(PlayerSummary { online: 2, max: 20, names: vec!["A".into(), "B".into()] })
        );
        assert_eq!(status.latency_ms, Some(12.5));
        assert!(!status.srv_record);
        assert_eq!(status.software.as_deref(), Some("Paper"));
        assert_eq!(status.mod_count, 0);
        assert_eq!(status.raw, raw);
    }

    #[test]
    fn bare_offline_body_has_no_details() {
        let status = StatusResult::from_raw(json!({"online": false}));
        assert!(!status.online);
        assert_eq!(status.motd, None);
        assert_eq!(status.version, "Unknown");
        assert_eq!(status.players, None);
        assert_eq!(status.latency_ms, None);
    }

    #[test]
    fn address_displays_as_host_port() {
        let addr = ServerAddress::new("mc.example.org".into(), 25565);
        assert_eq!(addr.to_string(), "mc.example.org:25565");
    }
}
