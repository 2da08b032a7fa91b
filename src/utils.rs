// src/utils.rs
use std::fmt;
use log::debug;
use crate::models::server::ServerAddress;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    Empty,
    HostTooShort,
    HostInvalidChars,
    PortNotNumber,
    PortOutOfRange,
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Server address cannot be empty"),
            Self::HostTooShort => write!(f, "Server address too short"),
            Self::HostInvalidChars => write!(f, "Invalid characters in server address"),
            Self::PortNotNumber => write!(f, "Port must be a valid number"),
            Self::PortOutOfRange => write!(f, "Port must be between 1 and 65535"),
        }
    }
}

impl std::error::Error for AddressError {}

/// Failure of a single status API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    Timeout,
    Network(String),
    HttpStatus(u16),
    InvalidBody(String),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "Request timeout - server may be slow to respond"),
            Self::Network(cause) => write!(f, "Network error: {}", cause),
            Self::HttpStatus(code) => write!(f, "API error: HTTP {}", code),
            Self::InvalidBody(cause) => write!(f, "API error: unreadable response ({})", cause),
        }
    }
}

impl std::error::Error for LookupError {}

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_decode() {
            Self::InvalidBody(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}

fn is_allowed_host_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_'
}

pub fn validate_host(host: &str) -> Result<String, AddressError> {
    let host = host.trim();
    if host.is_empty() {
        return Err(AddressError::Empty);
    }
    if host.len() < 3 {
        return Err(AddressError::HostTooShort);
    }
    if !host.chars().all(is_allowed_host_char) {
        return Err(AddressError::HostInvalidChars);
    }
    Ok(host.to_string())
}

/// An empty port string means "use the default".
pub fn validate_port(port: &str, default_port: u16) -> Result<u16, AddressError> {
    let port = port.trim();
    if port.is_empty() {
        return Ok(default_port);
    }
    let value: i64 = port.parse().map_err(|_| AddressError::PortNotNumber)?;
    match u16::try_from(value) {
        Ok(p) if p >= 1 => Ok(p),
        _ => Err(AddressError::PortOutOfRange),
    }
}

/// Splits `host[:port]` on the last colon, host first, then validates both parts.
pub fn parse_server_address(input: &str, default_port: u16) -> Result<ServerAddress, AddressError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(AddressError::Empty);
    }

    let (host, port) = match input.rsplit_once(':') {
        Some((host, port)) => (host, port),
        None => (input, ""),
    };

    let host = validate_host(host).map_err(|e| {
        debug!("Rejected host {:?}: {}", host, e);
        e
    })?;
    let port = validate_port(port, default_port).map_err(|e| {
        debug!("Rejected port {:?}: {}", port, e);
        e
    })?;

    Ok(ServerAddress::new(host, port))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT: u16 = 25565;

    #[test]
    fn explicit_port_is_split_off() {
        let addr = parse_server_address("host:1234", DEFAULT).unwrap();
        assert_eq!(addr.host(), "host");
        assert_eq!(addr.port(), 1234);
    }

    #[test]
    fn missing_port_uses_default() {
        let addr = parse_server_address("host", DEFAULT).unwrap();
        assert_eq!(addr.port(), 25565);

        let addr = parse_server_address("host:", DEFAULT).unwrap();
        assert_eq!(addr.port(), 25565);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let addr = parse_server_address("  play.example.net:25566 \n", DEFAULT).unwrap();
        assert_eq!(addr.to_string(), "play.example.net:25566");
    }

    #[test]
    fn bad_ports_are_rejected() {
        assert_eq!(parse_server_address("host:70000", DEFAULT), Err(AddressError::PortOutOfRange));
        assert_eq!(parse_server_address("host:0", DEFAULT), Err(AddressError::PortOutOfRange));
        assert_eq!(parse_server_address("host:-5", DEFAULT), Err(AddressError::PortOutOfRange));
        assert_eq!(parse_server_address("host:abc", DEFAULT), Err(AddressError::PortNotNumber));
        assert_eq!(parse_server_address("host:65535", DEFAULT).unwrap().port(), 65535);
        assert_eq!(parse_server_address("host:1", DEFAULT).unwrap().port(), 1);
    }

    #[test]
    fn bad_hosts_are_rejected() {
        assert_eq!(parse_server_address("my host", DEFAULT), Err(AddressError::HostInvalidChars));
        assert_eq!(parse_server_address("a/b.net", DEFAULT), Err(AddressError::HostInvalidChars));
        assert_eq!(parse_server_address("ab", DEFAULT), Err(AddressError::HostTooShort));
        assert_eq!(parse_server_address("a.b", DEFAULT).unwrap().host(), "a.b");
        assert_eq!(parse_server_address("mc_01-x.net", DEFAULT).unwrap().host(), "mc_01-x.net");
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(parse_server_address("", DEFAULT), Err(AddressError::Empty));
        assert_eq!(parse_server_address("   \t", DEFAULT), Err(AddressError::Empty));
        assert_eq!(parse_server_address(":25565", DEFAULT), Err(AddressError::Empty));
    }

    #[test]
    fn host_is_checked_before_port() {
        assert_eq!(parse_server_address("ab:abc", DEFAULT), Err(AddressError::HostTooShort));
    }

    #[test]
    fn only_last_colon_separates_the_port() {
        // a colon left in the host fails the character check
        assert_eq!(parse_server_address("a:b:25565", DEFAULT), Err(AddressError::HostInvalidChars));
    }

    #[test]
    fn lookup_errors_read_like_the_cli_reports_them() {
        assert_eq!(LookupError::HttpStatus(503).to_string(), "API error: HTTP 503");
        assert!(LookupError::Timeout.to_string().starts_with("Request timeout"));
        assert_eq!(
            LookupError::Network("connection refused".into()).to_string(),
            "Network error: connection refused"
        );
    }
}
