// src/models/api.rs
//! Response shapes returned by the status API.
//!
//! Every field is optional and deserialized leniently: a field that is
//! missing, null, or of an unexpected type becomes `None` instead of failing
//! the whole body.
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub const NO_MOTD: &str = "No MOTD";
pub const UNKNOWN_VERSION: &str = "Unknown";

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Mirrors the truthiness rules of the JSON the API hands back: null, false,
/// zero, and empty strings/arrays/objects all count as "not reported".
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Strings are shown as-is, everything else as its JSON text.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub online: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub motd: Option<Motd>,
    #[serde(default, deserialize_with = "lenient")]
    pub version: Option<Version>,
    #[serde(default, deserialize_with = "lenient")]
    pub players: Option<Players>,
    #[serde(default, deserialize_with = "lenient")]
    pub debug: Option<DebugInfo>,
    #[serde(default)]
    pub software: Option<Value>,
    #[serde(default)]
    pub mods: Option<Value>,
}

impl ApiResponse {
    /// A body that is not a JSON object yields an empty (offline) response.
    pub fn from_value(raw: &Value) -> Self {
        serde_json::from_value(raw.clone()).unwrap_or_default()
    }

    pub fn is_online(&self) -> bool {
        self.online.unwrap_or(false)
    }

    /// Ping reported by the API, when it is a number.
    pub fn ping_ms(&self) -> Option<f64> {
        self.debug.as_ref().and_then(|d| d.ping)
    }

    pub fn has_srv_record(&self) -> bool {
        self.debug.as_ref().and_then(|d| d.srv).unwrap_or(false)
    }

    pub fn software_name(&self) -> Option<String> {
        self.software.as_ref().filter(|v| !is_blank(v)).map(value_text)
    }

    pub fn mod_count(&self) -> usize {
        match &self.mods {
            Some(Value::Array(mods)) => mods.len(),
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Motd {
    Text(String),
    Lines(Vec<String>),
    Structured(MotdLines),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MotdLines {
    #[serde(default)]
    pub clean: Vec<String>,
    #[serde(default)]
    pub raw: Vec<String>,
}

impl Motd {
    /// Space-joined, trimmed text; `None` when nothing is left.
    pub fn text(&self) -> Option<String> {
        let joined = match self {
            Self::Text(s) => s.trim().to_string(),
            Self::Lines(lines) => lines.join(" ").trim().to_string(),
            Self::Structured(lines) if !lines.clean.is_empty() => lines.clean.join(" ").trim().to_string(),
            Self::Structured(lines) => lines.raw.join(" ").trim().to_string(),
        };
        Some(joined).filter(|s| !s.is_empty())
    }
}

pub fn format_motd(motd: Option<&Motd>) -> String {
    motd.and_then(Motd::text).unwrap_or_else(|| NO_MOTD.to_string())
}

/// Cuts `text` to `width` characters, ending in "..." when shortened.
pub fn truncate_for_display(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Version {
    Text(String),
    Named { name: Option<String> },
    Other(Value),
}

impl Version {
    pub fn label(&self) -> Option<String> {
        match self {
            Self::Text(s) if !s.is_empty() => Some(s.clone()),
            Self::Text(_) => None,
            Self::Named { name } => name.clone().filter(|n| !n.is_empty()),
            Self::Other(v) if is_blank(v) => None,
            Self::Other(v) => Some(value_text(v)),
        }
    }
}

pub fn format_version(version: Option<&Version>) -> String {
    version.and_then(Version::label).unwrap_or_else(|| UNKNOWN_VERSION.to_string())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Players {
    #[serde(default, deserialize_with = "lenient")]
    pub online: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub max: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub list: Option<Vec<PlayerEntry>>,
}

impl Players {
    pub fn is_reported(&self) -> bool {
        self.online.is_some() || self.max.is_some() || self.list.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PlayerEntry {
    Named { name: String },
    Raw(Value),
}

impl PlayerEntry {
    pub fn display_name(&self) -> String {
        match self {
            Self::Named { name } => name.clone(),
            Self::Raw(v) => value_text(v),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DebugInfo {
    #[serde(default, deserialize_with = "lenient")]
    pub ping: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub srv: Option<bool>,
}
