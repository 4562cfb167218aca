use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use backend_domain::ports::NotificationSender;
use backend_domain::{NotificationRequest, RuntimeConfig};

/// Logs notifications instead of delivering them.
#[derive(Debug, Default)]
pub struct LogNotificationSender;

impl LogNotificationSender {
    pub fn new() -> Self {
        Self
    }
}

impl NotificationSender for LogNotificationSender {
    fn send(&self, request: NotificationRequest) {
        info!(
            template = %request.template,
            recipients = ?request.recipients,
            "notification: {}",
            request.context.message.replace('\n', " | ")
        );
    }
}

/// Posts each notification as JSON to the mail gateway. Delivery runs on the
/// tokio runtime; failures are logged and never reach the caller.
pub struct WebhookNotificationSender {
    client: Client,
    url: String,
    token: Option<String>,
    in_flight: Mutex<Vec<JoinHandle<()>>>,
}

impl WebhookNotificationSender {
    pub fn new(url: impl Into<String>, token: Option<String>, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds.max(3)))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
            token,
            in_flight: Mutex::new(Vec::new()),
        })
    }

    /// Waits for deliveries that are still running, up to `limit`.
    pub async fn flush(&self, limit: Duration) {
        let handles = match self.in_flight.lock() {
            Ok(mut in_flight) => std::mem::take(&mut *in_flight),
            Err(_) => return,
        };
        let pending = handles.len();
        let joined = tokio::time::timeout(limit, async move {
            for handle in handles {
                let _ = handle.await;
            }
        })
        .await;
        if joined.is_err() {
            warn!("gave up waiting for {} notification deliveries", pending);
        }
    }
}

impl NotificationSender for WebhookNotificationSender {
    fn send(&self, request: NotificationRequest) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("no async runtime, notification to {:?} dropped", request.recipients);
            return;
        };
        let client = self.client.clone();
        let url = self.url.clone();
        let token = self.token.clone();
        let handle = runtime.spawn(async move {
            if let Err(err) = post_notification(&client, &url, token.as_deref(), &request).await {
                warn!(
                    "notification to {:?} failed: {}",
                    request.recipients, err
                );
            }
        });
        if let Ok(mut in_flight) = self.in_flight.lock() {
            in_flight.retain(|handle| !handle.is_finished());
            in_flight.push(handle);
        }
    }
}

async fn post_notification(
    client: &Client,
    url: &str,
    token: Option<&str>,
    request: &NotificationRequest,
) -> Result<()> {
    let mut builder = client.post(url).json(request);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.send().await?.error_for_status()?;
    Ok(())
}

/// Picks the webhook sender when a gateway is configured, the log sender otherwise.
pub fn build_notification_sender(
    config: &RuntimeConfig,
) -> Result<(Arc<dyn NotificationSender>, Option<Arc<WebhookNotificationSender>>)> {
    match &config.notification_webhook_url {
        Some(url) => {
            let webhook = Arc::new(WebhookNotificationSender::new(
                url.clone(),
                config.notification_webhook_token.clone(),
                config.request_timeout_seconds,
            )?);
            Ok((webhook.clone(), Some(webhook)))
        }
        None => Ok((Arc::new(LogNotificationSender::new()), None)),
    }
}
