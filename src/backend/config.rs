use crate::{AppError, AppResult};

pub const DEFAULT_HOST: &str = "http://127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub host: String,
    pub port: u16,
}

impl BackendConfig {
    pub fn builder() -> BackendConfigBuilder {
        BackendConfigBuilder::new()
    }

    pub fn endpoint_url(&self) -> String {
        format!("{}:{}", self.host.trim_end_matches('/'), self.port)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.host.is_empty() {
            return Err(AppError::Config("Host cannot be empty".to_string()));
        }
        if !(self.host.starts_with("http://") || self.host.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "Host must start with http:// or https://, got {}",
                self.host
            )));
        }
        if self.port == 0 {
            return Err(AppError::Config("Port cannot be 0".to_string()));
        }
        Ok(())
    }
}

// Builder for BackendConfig
#[derive(Debug)]
pub struct BackendConfigBuilder {
    host: String,
    port: u16,
}

impl BackendConfigBuilder {
    pub fn new() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }

    pub fn host(mut self, host: String) -> Self {
        self.host = host;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn build(self) -> AppResult<BackendConfig> {
        let config = BackendConfig {
            host: self.host,
            port: self.port,
        };
        config.validate()?;

        Ok(config)
    }
}

impl Default for BackendConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
