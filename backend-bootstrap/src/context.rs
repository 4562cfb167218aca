use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use backend_application::{AppState, Metrics, NotificationDispatcher};
use backend_infrastructure::{
    build_notification_sender, AppConfig, DirectoryFileLookup, JsonFileStore,
    WebhookNotificationSender,
};

pub struct AppContext {
    pub state: AppState,
    webhook: Option<Arc<WebhookNotificationSender>>,
}

impl AppContext {
    pub async fn new(config: &AppConfig) -> Result<Self> {
        let runtime_config = config.to_runtime_config();

        let store = Arc::new(JsonFileStore::open(&config.data_path).await?);
        let directory = Arc::new(DirectoryFileLookup::load(&config.directory_path).await?);
        let (sender, webhook) = build_notification_sender(&runtime_config)?;
        if webhook.is_none() {
            info!("no notification webhook configured, notifications are only logged");
        }

        let metrics = Arc::new(Metrics::default());
        let dispatcher = Arc::new(NotificationDispatcher::new(
            directory,
            sender,
            runtime_config.notification_template.clone(),
            metrics.clone(),
        ));

        let state = AppState {
            config: runtime_config,
            event_repo: store.clone(),
            reservation_repo: store.clone(),
            catalog_repo: store,
            dispatcher,
            metrics,
        };

        Ok(Self { state, webhook })
    }

    /// Lets pending notification deliveries finish before the process exits.
    pub async fn shutdown(&self) {
        if let Some(webhook) = &self.webhook {
            let limit = Duration::from_secs(self.state.config.request_timeout_seconds + 5);
            webhook.flush(limit).await;
        }
    }
}
