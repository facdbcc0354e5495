use crate::{ConfigProblem, ConfigSection};
use serde::{Deserialize, Serialize};

/// `[server]`: address the REST server listens on
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// `host:port`, as passed to the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ConfigSection for ServerConfig {
    const NAME: &'static str = "server";

    fn check(&self, problems: &mut Vec<ConfigProblem>) {
        if self.host.trim().is_empty() {
            problems.push(ConfigProblem::in_section(
                Self::NAME,
                "host",
                "must not be blank",
            ));
        }
        // Port 0 would bind a random port nobody can find
        if self.port == 0 {
            problems.push(ConfigProblem::in_section(Self::NAME, "port", "must not be 0"));
        }
    }
}
