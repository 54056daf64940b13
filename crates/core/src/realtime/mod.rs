pub mod broadcaster;
pub mod rooms;

pub use broadcaster::Broadcaster;
pub use rooms::{authorized_rooms, Room, RoomMembership};
