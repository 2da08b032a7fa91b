use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    // Status API
    pub api_base_url: String,
    pub user_agent: String,

    // Network limits, shared by the API call and the direct probe
    pub timeout_secs: u64,

    // Address defaults
    pub default_port: u16,

    // Display limits
    pub max_listed_players: usize,
    pub motd_display_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.mcsrvstat.us/3".to_string(),
            user_agent: "Minecraft-Server-Checker/1.0".to_string(),
            timeout_secs: 5,
            default_port: 25565,
            max_listed_players: 10,
            motd_display_width: 80,
        }
    }
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Builds the lookup URL for `host:port` under the configured API base.
    pub fn status_url(&self, host: &str, port: u16) -> String {
        format!("{}/{}:{}", self.api_base_url.trim_end_matches('/'), host, port)
    }
}
