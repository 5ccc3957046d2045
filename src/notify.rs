use notify_rust::Notification;
use tracing::info;

use crate::error::Result;

/// Outbound alert delivery. One fire-and-forget call per run; no return
/// value is consumed beyond the error for logging.
pub trait Notifier {
    fn send(&self, title: &str, body: &str) -> Result<()>;
}

/// Desktop toast via the platform notification service.
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn send(&self, title: &str, body: &str) -> Result<()> {
        Notification::new().summary(title).body(body).show()?;
        info!("desktop alert delivered: {title}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::report::alert_body;
    use crate::types::AlertEntry;

    /// Collects sent alerts for assertions instead of toasting.
    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<(String, String)>>,
    }

    impl Notifier for RecordingNotifier {
        fn send(&self, title: &str, body: &str) -> Result<()> {
            self.sent
                .lock()
                .expect("lock sent alerts")
                .push((title.to_string(), body.to_string()));
            Ok(())
        }
    }

    #[test]
    fn one_alert_carries_every_qualifying_product() {
        let entries = vec![
            AlertEntry {
                reference_name: "Fish Oil 400".to_string(),
                percentage_drop: 20,
            },
            AlertEntry {
                reference_name: "Coffee Beans 1kg".to_string(),
                percentage_drop: 25,
            },
        ];

        let notifier = RecordingNotifier::default();
        notifier
            .send("Price Drop > 20%", &alert_body(&entries))
            .unwrap();

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "Price Drop > 20%");
        assert_eq!(sent[0].1, "Fish Oil 400 (-20%), Coffee Beans 1kg (-25%)");
    }
}
