use counseldesk_primitives::models::Role;
use std::collections::HashSet;

/// Role-scoped broadcast groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Room {
    Admin,
    SuperAdmin,
}

impl Room {
    pub fn as_str(&self) -> &'static str {
        match self {
            Room::Admin => "admin_room",
            Room::SuperAdmin => "super_admin_room",
        }
    }

    pub fn permits(&self, role: Role) -> bool {
        match self {
            Room::Admin => matches!(role, Role::OfficeAdmin | Role::SuperAdmin),
            Room::SuperAdmin => role == Role::SuperAdmin,
        }
    }
}

/// Rooms a role may join. Unauthorized join requests resolve to an empty set
/// and are dropped without an error; the caller never learns which rooms
/// exist. This is a deliberate policy, not the explicit-403 path used by the
/// HTTP handlers.
pub fn authorized_rooms(role: Role) -> Vec<Room> {
    [Room::Admin, Room::SuperAdmin]
        .into_iter()
        .filter(|room| room.permits(role))
        .collect()
}

/// Per-connection membership. Lives only in the owning websocket task and is
/// dropped with it on disconnect; a reconnect starts from an empty set.
#[derive(Debug, Default)]
pub struct RoomMembership {
    joined: HashSet<Room>,
}

impl RoomMembership {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the rooms the role is allowed into and reports which were
    /// newly joined.
    pub fn join(&mut self, role: Role) -> Vec<Room> {
        authorized_rooms(role)
            .into_iter()
            .filter(|room| self.joined.insert(*room))
            .collect()
    }

    pub fn contains(&self, room: Room) -> bool {
        self.joined.contains(&room)
    }

    pub fn is_empty(&self) -> bool {
        self.joined.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn super_admin_joins_both_rooms() {
        let rooms = authorized_rooms(Role::SuperAdmin);
        assert!(rooms.contains(&Room::Admin));
        assert!(rooms.contains(&Room::SuperAdmin));
    }

    #[test]
    fn office_admin_joins_admin_room_only() {
        assert_eq!(authorized_rooms(Role::OfficeAdmin), vec![Room::Admin]);
    }

    #[test]
    fn student_join_is_silently_ignored() {
        assert!(authorized_rooms(Role::Student).is_empty());

        let mut membership = RoomMembership::new();
        assert!(membership.join(Role::Student).is_empty());
        assert!(membership.is_empty());
    }

    #[test]
    fn rejoining_is_idempotent() {
        let mut membership = RoomMembership::new();
        assert_eq!(membership.join(Role::SuperAdmin).len(), 2);
        assert!(membership.join(Role::SuperAdmin).is_empty());
        assert!(membership.contains(Room::Admin));
        assert!(membership.contains(Room::SuperAdmin));
    }
}
