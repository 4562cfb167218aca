// Runtime configuration handed from infrastructure to the application layer

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub data_path: Option<String>,
    pub directory_path: Option<String>,
    pub notification_template: String,
    pub notification_webhook_url: Option<String>,
    pub notification_webhook_token: Option<String>,
    pub request_timeout_seconds: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            directory_path: None,
            notification_template: "event_notification".to_string(),
            notification_webhook_url: None,
            notification_webhook_token: None,
            request_timeout_seconds: 15,
        }
    }
}
