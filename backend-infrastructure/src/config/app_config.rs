use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use backend_domain::RuntimeConfig;

use super::validation::{validate_template_name, validate_webhook_url};
use crate::utils::resolve_path;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub data_path: String,
    pub directory_path: String,
    pub notification_template: String,
    pub notification_webhook_url: Option<String>,
    pub notification_webhook_token: Option<String>,
    pub request_timeout_seconds: u64,
    pub log_dir: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: "./events.json".to_string(),
            directory_path: "./directory.yaml".to_string(),
            notification_template: "event_notification".to_string(),
            notification_webhook_url: None,
            notification_webhook_token: None,
            request_timeout_seconds: 15,
            log_dir: None,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var("EVENTS_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        let base_dir = file_path.parent();
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            Self::from_toml_str(&content)?
        } else {
            warn!("{} not found, using defaults", path);
            AppConfig::default()
        };
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn normalize(&mut self) {
        self.notification_template = self.notification_template.trim().to_string();
        for value in [
            &mut self.notification_webhook_url,
            &mut self.notification_webhook_token,
            &mut self.log_dir,
        ] {
            if value.as_deref().is_some_and(|raw| raw.trim().is_empty()) {
                *value = None;
            }
        }
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.data_path = resolve_path(base, &self.data_path);
        self.directory_path = resolve_path(base, &self.directory_path);
        if let Some(log_dir) = &self.log_dir {
            self.log_dir = Some(resolve_path(base, log_dir));
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.data_path.trim().is_empty() {
            return Err(anyhow!("data_path must not be empty"));
        }
        validate_template_name(&self.notification_template)?;
        if let Some(url) = &self.notification_webhook_url {
            validate_webhook_url(url)?;
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            data_path: Some(self.data_path.clone()),
            directory_path: Some(self.directory_path.clone())
                .filter(|path| !path.trim().is_empty()),
            notification_template: self.notification_template.clone(),
            notification_webhook_url: self.notification_webhook_url.clone(),
            notification_webhook_token: self.notification_webhook_token.clone(),
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("EVENTS_DATA_PATH") {
            self.data_path = value;
        }
        if let Ok(value) = env::var("EVENTS_DIRECTORY_PATH") {
            self.directory_path = value;
        }
        if let Ok(value) = env::var("EVENTS_NOTIFICATION_TEMPLATE") {
            self.notification_template = value;
        }
        if let Ok(value) = env::var("EVENTS_NOTIFICATION_WEBHOOK_URL") {
            self.notification_webhook_url = Some(value);
        }
        if let Ok(value) = env::var("EVENTS_NOTIFICATION_WEBHOOK_TOKEN") {
            self.notification_webhook_token = Some(value);
        }
        if let Ok(value) = env::var("EVENTS_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
        if let Ok(value) = env::var("EVENTS_LOG_DIR") {
            self.log_dir = Some(value);
        }
    }
}
