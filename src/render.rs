// src/render.rs
//! Terminal text for reports, prompts and banners.
//!
//! Everything here returns plain `String`s; styling comes from `console` and
//! is dropped automatically when stdout is not a terminal.
use console::style;
use crate::config::Config;
use crate::models::server::{Outcome, ProbeResult, Report, ServerAddress, StatusResult};
use crate::models::api::truncate_for_display;
use crate::utils::{AddressError, LookupError};

const RULE_WIDTH: usize = 60;

pub const EXAMPLE_SERVERS: &[(&str, &str)] = &[
    ("play.hypixel.net", "Hypixel Network"),
    ("mc.mineplex.com", "Mineplex"),
    ("play.cubecraft.net", "CubeCraft Games"),
    ("mineverse.com", "Mineverse"),
    ("cosmicpvp.com", "Cosmic PvP"),
];

pub fn header() -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!(
        "\n{}\n{}\n{}\n\n{}\n",
        style(&rule).bold().blue(),
        style("           Minecraft Server Status Checker").bold().blue(),
        style(&rule).bold().blue(),
        style("Check the status of any Minecraft server").dim(),
    )
}

pub fn separator() -> String {
    style("-".repeat(RULE_WIDTH)).dim().to_string()
}

pub fn address_prompt() -> String {
    format!("{} (or 'examples'/'quit'): ", style("Server address").bold())
}

pub fn continue_prompt() -> String {
    style("Check another server? (y/n): ").dim().to_string()
}

pub fn farewell() -> String {
    style("Goodbye!").cyan().to_string()
}

pub fn address_error(error: &AddressError) -> String {
    style(format!("Error: {}", error)).red().to_string()
}

pub fn checking(address: &ServerAddress) -> String {
    format!(
        "{}\n\n{}",
        style(format!("Checking server '{}'...", address)).yellow(),
        style("   Querying server status...").dim(),
    )
}

pub fn examples() -> String {
    let mut lines = vec![style("Popular Minecraft servers to try:").bold().to_string()];
    for (host, name) in EXAMPLE_SERVERS {
        lines.push(format!("   {} - {}", style(format!("• {}", host)).cyan(), name));
    }
    lines.push(String::new());
    lines.join("\n")
}

fn label(text: &str) -> String {
    style(text).cyan().to_string()
}

fn timestamp(report: &Report) -> String {
    report.checked_at.format("%H:%M:%S").to_string()
}

pub fn report(report: &Report, config: &Config) -> String {
    let lines = match &report.outcome {
        Outcome::Online { status, probe } => online_lines(report, status, *probe, config),
        Outcome::Offline { probe, .. } => offline_lines(report, *probe),
        Outcome::LookupFailed { error, probe } => lookup_failed_lines(&report.address, error, *probe),
    };
    lines.join("\n")
}

fn online_lines(report: &Report, status: &StatusResult, probe: Option<ProbeResult>, config: &Config) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        separator(),
        String::new(),
        style("Server Status: ONLINE").bold().green().to_string(),
        String::new(),
        style("SERVER INFORMATION").bold().to_string(),
        format!("   {} {}", label("Address:"), report.address),
    ];

    if let Some(motd) = &status.motd {
        lines.push(format!("   {} {}", label("MOTD:"), truncate_for_display(motd, config.motd_display_width)));
    }
    lines.push(format!("   {} {}", label("Version:"), status.version));
    lines.push(String::new());

    if let Some(players) = &status.players {
        lines.push(style("PLAYERS").bold().to_string());
        lines.push(format!("   {} {}/{}", label("Online:"), players.online, players.max));

        if players.online > 0 && !players.names.is_empty() {
            lines.push(format!("   {}", label("Player list:")));
            for name in players.names.iter().take(config.max_listed_players) {
                lines.push(format!("      • {}", name));
            }
            let hidden = players.names.len().saturating_sub(config.max_listed_players);
            if hidden > 0 {
                lines.push(format!("      {}", style(format!("... and {} more", hidden)).dim()));
            }
        }
        lines.push(String::new());
    }

    lines.push(style("TECHNICAL INFO").bold().to_string());
    match (status.latency_ms, probe) {
        (Some(ping), _) => lines.push(format!("   {} {}ms", label("Ping:"), ping)),
        (None, Some(ProbeResult { reachable: true, latency_ms: Some(ms) })) => {
            lines.push(format!("   {} {}ms", label("Direct ping:"), ms))
        }
        _ => {}
    }
    if status.srv_record {
        lines.push(format!("   {} Yes", label("SRV record:")));
    }
    if let Some(software) = &status.software {
        lines.push(format!("   {} {}", label("Software:"), software));
    }
    if status.mod_count > 0 {
        lines.push(format!("   {} {} detected", label("Mods:"), status.mod_count));
    }
    lines.push(format!("   {} {}", label("Last checked:"), timestamp(report)));
    lines.push(String::new());
    lines.push(separator());
    lines.push(String::new());
    lines
}

fn offline_lines(report: &Report, probe: ProbeResult) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        separator(),
        String::new(),
        style("Server Status: OFFLINE").bold().red().to_string(),
        String::new(),
    ];

    if let ProbeResult { reachable: true, latency_ms: Some(ms) } = probe {
        lines.push(style("Note: Server port is reachable but may not respond to queries").yellow().to_string());
        lines.push(format!("   {} {}ms", label("Direct ping:"), ms));
    }

    lines.push(String::new());
    lines.push(style(format!("Server: {}", report.address)).dim().to_string());
    lines.push(style(format!("Status checked at: {}", timestamp(report))).dim().to_string());
    lines.push(String::new());
    lines
}

fn lookup_failed_lines(address: &ServerAddress, error: &LookupError, probe: ProbeResult) -> Vec<String> {
    let mut lines = vec![
        style(format!("API Error: {}", error)).red().to_string(),
        style("   Trying direct connection...").dim().to_string(),
        String::new(),
    ];

    match probe {
        ProbeResult { reachable: true, latency_ms: Some(ms) } => {
            lines.push(style("Server is reachable but doesn't respond to status queries").yellow().to_string());
            lines.push(format!("{} {}ms", label("Direct ping:"), ms));
            lines.push(style("This may be a server with query disabled").dim().to_string());
        }
        _ => {
            lines.push(style("Server is not reachable").red().to_string());
            lines.push(style(format!("Server: {}", address)).dim().to_string());
        }
    }
    lines.push(String::new());
    lines
}
