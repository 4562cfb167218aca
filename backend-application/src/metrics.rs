use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    events_saved: AtomicU64,
    reservations_changed: AtomicU64,
    notifications_sent: AtomicU64,
    notifications_skipped: AtomicU64,
}

impl Metrics {
    pub fn record_event_saved(&self) {
        self.events_saved.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_reservation_changed(&self) {
        self.reservations_changed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_notification_sent(&self) {
        self.notifications_sent.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_notification_skipped(&self) {
        self.notifications_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn notifications_sent(&self) -> u64 {
        self.notifications_sent.load(Ordering::Relaxed)
    }

    pub fn notifications_skipped(&self) -> u64 {
        self.notifications_skipped.load(Ordering::Relaxed)
    }

    pub fn render_prometheus(&self) -> String {
        let events = self.events_saved.load(Ordering::Relaxed);
        let reservations = self.reservations_changed.load(Ordering::Relaxed);
        let sent = self.notifications_sent();
        let skipped = self.notifications_skipped();

        format!(
            "# TYPE events_saved_total counter\n\
events_saved_total {}\n\
# TYPE events_reservations_changed_total counter\n\
events_reservations_changed_total {}\n\
# TYPE events_notifications_sent_total counter\n\
events_notifications_sent_total {}\n\
# TYPE events_notifications_skipped_total counter\n\
events_notifications_skipped_total {}\n",
            events, reservations, sent, skipped
        )
    }
}
