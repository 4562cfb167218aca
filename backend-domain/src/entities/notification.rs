// Outbound notification request

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationContext {
    #[serde(rename = "msg")]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub template: String,
    pub recipients: Vec<String>,
    pub context: NotificationContext,
}

impl NotificationRequest {
    pub fn new(template: impl Into<String>, recipient: impl Into<String>, message: String) -> Self {
        Self {
            template: template.into(),
            recipients: vec![recipient.into()],
            context: NotificationContext { message },
        }
    }
}
