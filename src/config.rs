#[derive(Debug, Clone)]
pub struct RegistryConfig {
    pub port: Option<u16>,
    pub host: String,
}

impl RegistryConfig {
    pub fn new() -> Self {
        Self {
            port: None,
            host: "127.0.0.1".to_string(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// `host:port`, with port 0 (ephemeral) when none was configured.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port.unwrap_or(0))
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::new()
    }
}
