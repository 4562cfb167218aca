use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use backend_domain::ports::{IdentityLookup, NotificationSender};
use backend_domain::{
    compose_message, event_change_text, EventChange, NotificationRequest, PersonRef,
    Reservation, ReservationLedger, ReservationNotice,
};

use crate::Metrics;

/// How many notifications a dispatch emitted and how many it had to drop
/// because the registrant could not be reached.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DispatchOutcome {
    pub sent: usize,
    pub skipped: usize,
}

impl DispatchOutcome {
    fn record(&mut self, delivered: bool) {
        if delivered {
            self.sent += 1;
        } else {
            self.skipped += 1;
        }
    }

    pub fn merge(self, other: DispatchOutcome) -> DispatchOutcome {
        DispatchOutcome {
            sent: self.sent + other.sent,
            skipped: self.skipped + other.skipped,
        }
    }
}

/// Resolves registrants and hands one notification per registrant to the sender.
/// Never fails: unreachable registrants are skipped.
pub struct NotificationDispatcher {
    identity: Arc<dyn IdentityLookup>,
    sender: Arc<dyn NotificationSender>,
    template: String,
    metrics: Arc<Metrics>,
}

impl NotificationDispatcher {
    pub fn new(
        identity: Arc<dyn IdentityLookup>,
        sender: Arc<dyn NotificationSender>,
        template: impl Into<String>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            identity,
            sender,
            template: template.into(),
            metrics,
        }
    }

    pub async fn dispatch_event_change(
        &self,
        change: &EventChange,
        ledger: &ReservationLedger,
    ) -> DispatchOutcome {
        let text = event_change_text(change);
        let mut outcome = DispatchOutcome::default();
        for reservation in ledger.in_dispatch_order() {
            outcome.record(self.notify(reservation.casy_ref, &text).await);
        }
        debug!(
            "event change {} dispatched: sent={}, skipped={}",
            change.as_str(),
            outcome.sent,
            outcome.skipped
        );
        outcome
    }

    pub async fn dispatch_reservation_notice(
        &self,
        reservation: &Reservation,
        notice: &ReservationNotice,
    ) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();
        outcome.record(self.notify(reservation.casy_ref, &notice.text()).await);
        outcome
    }

    async fn notify(&self, person_ref: PersonRef, text: &str) -> bool {
        let person = match self.identity.resolve(person_ref).await {
            Ok(Some(person)) => person,
            Ok(None) => {
                debug!("no directory entry for {}, notification skipped", person_ref);
                self.metrics.record_notification_skipped();
                return false;
            }
            Err(err) => {
                warn!("identity lookup for {} failed: {}", person_ref, err);
                self.metrics.record_notification_skipped();
                return false;
            }
        };
        let Some(email) = person.contact_email() else {
            debug!("no email for {}, notification skipped", person_ref);
            self.metrics.record_notification_skipped();
            return false;
        };
        let request =
            NotificationRequest::new(self.template.clone(), email, compose_message(&person, text));
        self.sender.send(request);
        self.metrics.record_notification_sent();
        true
    }
}
