//! Collection lifecycle events pushed by the database webhook.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::errors::DomainError;

/// A newly created collection row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionEvent {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionAck {
    pub collection_id: Uuid,
}

/// Record a new collection and acknowledge it.
///
/// Only logs today; follow-up work for new collections hangs off this call.
pub fn handle_new_collection(event: &CollectionEvent) -> Result<CollectionAck, DomainError> {
    info!(
        collection_id = %event.id,
        user_id = %event.user_id,
        has_description = event.description.is_some(),
        "New collection created"
    );

    Ok(CollectionAck {
        collection_id: event.id,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::datetime;

    use super::*;

    fn payload() -> serde_json::Value {
        json!({
            "id": "5f0c7a36-8a0e-4d4c-9d55-0c1f6a1d2b3e",
            "user_id": "0b7e0a5c-2f8c-4f0e-a1b6-6d2c1e9f7a10",
            "name": "Vinyl",
            "created_at": "2024-05-01T12:30:00Z",
            "updated_at": "2024-05-01T12:30:00.123456+00:00",
        })
    }

    #[test]
    fn test_deserialize_event_without_description() {
        let event: CollectionEvent = serde_json::from_value(payload()).unwrap();

        assert_eq!(event.name, "Vinyl");
        assert_eq!(event.description, None);
        assert_eq!(event.created_at, datetime!(2024-05-01 12:30:00 UTC));
    }

    #[test]
    fn test_explicit_null_description() {
        let mut value = payload();
        value["description"] = serde_json::Value::Null;

        let event: CollectionEvent = serde_json::from_value(value).unwrap();
        assert_eq!(event.description, None);
    }

    #[test]
    fn test_rejects_bad_uuid_and_timestamp() {
        let mut value = payload();
        value["id"] = json!("not-a-uuid");
        assert!(serde_json::from_value::<CollectionEvent>(value).is_err());

        let mut value = payload();
        value["created_at"] = json!("yesterday");
        assert!(serde_json::from_value::<CollectionEvent>(value).is_err());
    }

    #[test]
    fn test_ack_echoes_id() {
        let event: CollectionEvent = serde_json::from_value(payload()).unwrap();
        let ack = handle_new_collection(&event).unwrap();
        assert_eq!(ack.collection_id, event.id);
    }
}
