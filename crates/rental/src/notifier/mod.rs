use crate::{abstract_trait::notifier::RentalNotifierTrait, domain::event::RentalEvent};
use async_trait::async_trait;
use shared::{abstract_trait::DynKafka, errors::ServiceError};
use tracing::info;

/// Publishes rental events to Kafka, keyed by rental id.
pub struct KafkaRentalNotifier {
    kafka: DynKafka,
}

impl KafkaRentalNotifier {
    pub fn new(kafka: DynKafka) -> Self {
        Self { kafka }
    }
}

#[async_trait]
impl RentalNotifierTrait for KafkaRentalNotifier {
    async fn notify(&self, event: &RentalEvent) -> Result<(), ServiceError> {
        let payload = serde_json::to_vec(event)
            .map_err(|e| ServiceError::Internal(format!("Failed to encode event: {e}")))?;

        self.kafka
            .publish(event.topic(), &event.rental_id().to_string(), &payload)
            .await
    }
}

/// Used when no broker is configured.
#[derive(Default)]
pub struct LoggingNotifier;

#[async_trait]
impl RentalNotifierTrait for LoggingNotifier {
    async fn notify(&self, event: &RentalEvent) -> Result<(), ServiceError> {
        info!(
            "📨 {} for rental {} (no broker configured)",
            event.topic(),
            event.rental_id()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::abstract_trait::KafkaTrait;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct RecordingKafka {
        sent: Mutex<Vec<(String, String, Vec<u8>)>>,
    }

    #[async_trait]
    impl KafkaTrait for RecordingKafka {
        async fn publish(&self, topic: &str, key: &str, value: &[u8]) -> Result<(), ServiceError> {
            self.sent
                .lock()
                .unwrap()
                .push((topic.to_string(), key.to_string(), value.to_vec()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn cancellation_goes_to_its_own_topic_keyed_by_rental() {
        let kafka = Arc::new(RecordingKafka::default());
        let notifier = KafkaRentalNotifier::new(kafka.clone());

        notifier
            .notify(&RentalEvent::Cancelled { rental_id: 42 })
            .await
            .unwrap();

        let sent = kafka.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "rental.cancelled");
        assert_eq!(sent[0].1, "42");

        let body: serde_json::Value = serde_json::from_slice(&sent[0].2).unwrap();
        assert_eq!(body["type"], "Cancelled");
    }
}
