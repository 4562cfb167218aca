use async_trait::async_trait;

use crate::entities::{NotificationRequest, Person};
use crate::value_objects::PersonRef;

/// Employee directory.
#[async_trait]
pub trait IdentityLookup: Send + Sync {
    async fn resolve(&self, person: PersonRef) -> anyhow::Result<Option<Person>>;
}

/// Message delivery. Fire-and-forget: implementations must not block the
/// caller on delivery and must not report failures back to it.
pub trait NotificationSender: Send + Sync {
    fn send(&self, request: NotificationRequest);
}
