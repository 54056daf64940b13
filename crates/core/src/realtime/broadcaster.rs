use crate::realtime::rooms::Room;
use counseldesk_primitives::models::events::RealtimeEvent;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Buffered events per room before slow subscribers start losing messages.
const ROOM_CAPACITY: usize = 256;

/// Fan-out of committed events to room subscribers. Delivery is at-most-once
/// and fire-and-forget: publishing never blocks the request path, a lagging
/// or disconnected subscriber simply misses events and must resynchronize
/// through the log query service. Callers publish only after their database
/// transaction has committed.
#[derive(Clone)]
pub struct Broadcaster {
    admin: broadcast::Sender<String>,
    super_admin: broadcast::Sender<String>,
}

impl Broadcaster {
    pub fn new() -> Self {
        let (admin, _) = broadcast::channel(ROOM_CAPACITY);
        let (super_admin, _) = broadcast::channel(ROOM_CAPACITY);
        Self { admin, super_admin }
    }

    fn sender(&self, room: Room) -> &broadcast::Sender<String> {
        match room {
            Room::Admin => &self.admin,
            Room::SuperAdmin => &self.super_admin,
        }
    }

    /// Serializes the event and pushes it to every current subscriber of the
    /// room. A send error only means nobody is listening; that is not a
    /// failure.
    pub fn publish(&self, room: Room, event: &RealtimeEvent) {
        let payload = match serde_json::to_string(event) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Failed to serialize {} event: {}", event.name(), e);
                return;
            }
        };

        match self.sender(room).send(payload) {
            Ok(receivers) => {
                debug!(
                    "Published {} to {} ({} subscribers)",
                    event.name(),
                    room.as_str(),
                    receivers
                );
            }
            Err(_) => {
                debug!("No subscribers in {} for {}", room.as_str(), event.name());
            }
        }
    }

    pub fn subscribe(&self, room: Room) -> broadcast::Receiver<String> {
        self.sender(room).subscribe()
    }

    pub fn subscriber_count(&self, room: Room) -> usize {
        self.sender(room).receiver_count()
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use counseldesk_primitives::models::events::RealtimeEvent;
    use uuid::Uuid;

    fn sample_event() -> RealtimeEvent {
        RealtimeEvent::AdminDeleted {
            user_id: Uuid::new_v4(),
            name: "Jane Doe".into(),
            deleted_by: "Root Admin".into(),
            timestamp: "2025-01-01 00:00:00".into(),
        }
    }

    #[tokio::test]
    async fn delivers_to_room_subscribers_in_order() {
        let broadcaster = Broadcaster::new();
        let mut rx = broadcaster.subscribe(Room::SuperAdmin);

        broadcaster.publish(Room::SuperAdmin, &sample_event());
        broadcaster.publish(
            Room::SuperAdmin,
            &RealtimeEvent::ConnectionSuccess {
                status: "connected".into(),
                user: "root@example.com".into(),
                role: "super_admin".into(),
            },
        );

        let first: serde_json::Value = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
        let second: serde_json::Value = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
        assert_eq!(first["event"], "admin_deleted");
        assert_eq!(second["event"], "connection_success");
    }

    #[tokio::test]
    async fn rooms_are_isolated() {
        let broadcaster = Broadcaster::new();
        let mut admin_rx = broadcaster.subscribe(Room::Admin);
        let mut super_rx = broadcaster.subscribe(Room::SuperAdmin);

        broadcaster.publish(Room::SuperAdmin, &sample_event());

        assert!(super_rx.try_recv().is_ok());
        assert!(admin_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_a_no_op() {
        let broadcaster = Broadcaster::new();
        // must not panic or block
        broadcaster.publish(Room::Admin, &sample_event());
        assert_eq!(broadcaster.subscriber_count(Room::Admin), 0);
    }

    #[tokio::test]
    async fn late_subscribers_miss_earlier_events() {
        let broadcaster = Broadcaster::new();
        broadcaster.publish(Room::SuperAdmin, &sample_event());

        // no replay: a subscriber that joins after the publish sees nothing
        let mut rx = broadcaster.subscribe(Room::SuperAdmin);
        assert!(matches!(
            rx.try_recv(),
            Err(tokio::sync::broadcast::error::TryRecvError::Empty)
        ));
    }
}
