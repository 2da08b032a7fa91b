// src/handlers/status.rs
use log::{debug, warn};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::StatusCode;
use serde_json::Value;
use crate::config::Config;
use crate::models::server::ServerAddress;
use crate::utils::LookupError;

/// Anything that can look up the status JSON for a server.
pub trait StatusSource {
    fn fetch(&self, address: &ServerAddress) -> Result<Value, LookupError>;
}

/// Blocking client for the public status API. One attempt per lookup, no retries.
#[derive(Debug)]
pub struct ApiClient {
    client: Client,
    config: Config,
}

impl ApiClient {
    pub fn new(config: Config) -> Result<Self, LookupError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        Ok(Self { client, config })
    }
}

impl StatusSource for ApiClient {
    fn fetch(&self, address: &ServerAddress) -> Result<Value, LookupError> {
        let url = self.config.status_url(address.host(), address.port());
        debug!("Querying status API: {}", url);

        let response = self.client.get(&url).send().map_err(|e| {
            warn!("Status request for {} failed: {}", address, e);
            LookupError::from(e)
        })?;

        let status = response.status();
        debug!("Status API answered {} for {}", status, address);
        if status != StatusCode::OK {
            warn!("Status API returned HTTP {} for {}", status.as_u16(), address);
            return Err(LookupError::HttpStatus(status.as_u16()));
        }

        let body = response.text()?;
        serde_json::from_str(&body).map_err(|e| {
            warn!("Status API sent an unreadable body for {}: {}", address, e);
            LookupError::InvalidBody(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;
    use std::time::Duration;
    use crate::utils::parse_server_address;

    fn read_request(stream: &mut std::net::TcpStream) -> String {
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }
        String::from_utf8_lossy(&request).into_owned()
    }

    /// Serves one canned HTTP response and hands back the request line.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}/3", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            request
        });
        (base, handle)
    }

    fn client_for(base: String, timeout_secs: u64) -> ApiClient {
        ApiClient::new(Config { api_base_url: base, timeout_secs, ..Config::default() }).unwrap()
    }

    #[test]
    fn ok_response_is_parsed_as_json() {
        let (base, server) = serve_once("200 OK", r#"{"online": true, "players": {"online": 1, "max": 8}}"#);
        let address = parse_server_address("play.example.net:25570", 25565).unwrap();

        let value = client_for(base, 5).fetch(&address).unwrap();
        assert_eq!(value["online"], Value::Bool(true));
        assert_eq!(value["players"]["max"], 8);

        let request = server.join().unwrap();
        assert!(request.starts_with("GET /3/play.example.net:25570 HTTP/1.1"));
        let lowered = request.to_ascii_lowercase();
        assert!(lowered.contains("user-agent: minecraft-server-checker/1.0"));
        assert!(lowered.contains("accept: application/json"));
    }

    #[test]
    fn non_200_status_is_an_error() {
        let (base, server) = serve_once("503 Service Unavailable", "{}");
        let address = parse_server_address("play.example.net", 25565).unwrap();

        let err = client_for(base, 5).fetch(&address).unwrap_err();
        assert_eq!(err, LookupError::HttpStatus(503));
        server.join().unwrap();
    }

    #[test]
    fn non_json_body_is_an_error() {
        let (base, server) = serve_once("200 OK", "<html>maintenance</html>");
        let address = parse_server_address("play.example.net", 25565).unwrap();

        let err = client_for(base, 5).fetch(&address).unwrap_err();
        assert!(matches!(err, LookupError::InvalidBody(_)));
        server.join().unwrap();
    }

    #[test]
    fn silent_api_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}/3", listener.local_addr().unwrap());
        let server = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            read_request(&mut stream);
            thread::sleep(Duration::from_secs(3));
        });
        let address = parse_server_address("play.example.net", 25565).unwrap();

        let err = client_for(base, 1).fetch(&address).unwrap_err();
        assert_eq!(err, LookupError::Timeout);
        server.join().unwrap();
    }

    #[test]
    fn refused_connection_is_a_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}/3", listener.local_addr().unwrap());
        drop(listener);
        let address = parse_server_address("play.example.net", 25565).unwrap();

        let err = client_for(base, 2).fetch(&address).unwrap_err();
        assert!(matches!(err, LookupError::Network(_)));
    }
}
