use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::{Extension, State},
    http::HeaderMap,
    response::Response,
};
use futures::stream::SelectAll;
use futures::{SinkExt, StreamExt};
use counseldesk_core::realtime::RoomMembership;
use counseldesk_core::repositories::UserRepository;
use counseldesk_core::services::{ActivityRecorder, Actor, RequestMeta};
use counseldesk_core::{AppState, Claims};
use counseldesk_primitives::error::ApiError;
use counseldesk_primitives::models::entities::{Role, User};
use counseldesk_primitives::models::events::RealtimeEvent;
use serde::Deserialize;
use std::sync::Arc;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{debug, info, warn};

#[derive(Deserialize)]
struct ClientCommand {
    action: String,
}

/// Upgrades an authenticated connection into the realtime channel. Any
/// authenticated user may connect; which rooms they actually receive from is
/// decided per join request by their role.
pub async fn websocket(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    headers: HeaderMap,
    ws: WebSocketUpgrade,
) -> Result<Response, ApiError> {
    let mut conn = state.conn()?;
    let user = UserRepository::find(&mut conn, claims.user_id()?)?
        .ok_or_else(|| ApiError::Auth("Account no longer exists".to_string()))?;
    let meta = super::request_meta(&headers);

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, user, meta)))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, user: User, meta: RequestMeta) {
    let actor = Actor::from_user(&user);
    let (mut sink, mut source) = socket.split();
    let mut membership = RoomMembership::new();
    let mut feeds: SelectAll<BroadcastStream<String>> = SelectAll::new();

    debug!("WebSocket opened for {}", user.email);

    loop {
        tokio::select! {
            incoming = source.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        let Ok(command) = serde_json::from_str::<ClientCommand>(&text) else {
                            continue;
                        };
                        if command.action != "join_admin_room" {
                            continue;
                        }

                        // a role with no authorized rooms joins nothing and
                        // hears nothing; no ack, no error
                        for room in membership.join(actor.role) {
                            feeds.push(BroadcastStream::new(state.broadcaster.subscribe(room)));
                            info!("{} joined {}", user.email, room.as_str());
                        }

                        let Some(ack) = connection_ack(&membership, &user.email, actor.role)
                        else {
                            continue;
                        };

                        if actor.role == Role::SuperAdmin {
                            record_connect(&state, &actor, &meta);
                        }

                        match serde_json::to_string(&ack) {
                            Ok(payload) => {
                                if sink.send(Message::Text(payload.into())).await.is_err() {
                                    break;
                                }
                            }
                            Err(e) => warn!("Failed to serialize connection ack: {}", e),
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        debug!("WebSocket receive error for {}: {}", user.email, e);
                        break;
                    }
                }
            }
            event = feeds.next(), if !membership.is_empty() => {
                match event {
                    Some(Ok(payload)) => {
                        if sink.send(Message::Text(payload.into())).await.is_err() {
                            break;
                        }
                    }
                    Some(Err(BroadcastStreamRecvError::Lagged(missed))) => {
                        warn!("{} lagged, {} events dropped", user.email, missed);
                    }
                    None => break,
                }
            }
        }
    }

    debug!("WebSocket closed for {}", user.email);
}

/// Only connections holding at least one room get the `connection_success`
/// ack; a join that granted nothing stays silent.
fn connection_ack(
    membership: &RoomMembership,
    email: &str,
    role: Role,
) -> Option<RealtimeEvent> {
    if membership.is_empty() {
        return None;
    }
    Some(RealtimeEvent::ConnectionSuccess {
        status: "connected".to_string(),
        user: email.to_string(),
        role: role.as_str().to_string(),
    })
}

/// Super-admin connections leave a trail entry. The write commits on its own
/// and never interferes with the socket lifecycle.
fn record_connect(state: &AppState, actor: &Actor, meta: &RequestMeta) {
    let result = state.conn().and_then(|mut conn| {
        ActivityRecorder::super_admin_action(
            &mut conn,
            actor,
            "WebSocket Connect",
            "system",
            None,
            None,
            Some("Joined realtime dashboard rooms".to_string()),
            meta,
        )
    });
    if let Err(e) = result {
        warn!("Failed to record websocket connect: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_join_gets_no_ack() {
        let mut membership = RoomMembership::new();
        membership.join(Role::Student);
        assert!(connection_ack(&membership, "student@example.com", Role::Student).is_none());
    }

    #[test]
    fn granted_join_is_acknowledged() {
        let mut membership = RoomMembership::new();
        membership.join(Role::OfficeAdmin);

        let ack = connection_ack(&membership, "admin@example.com", Role::OfficeAdmin)
            .expect("room member gets an ack");
        let value = serde_json::to_value(&ack).unwrap();
        assert_eq!(value["event"], "connection_success");
        assert_eq!(value["data"]["status"], "connected");
        assert_eq!(value["data"]["role"], "office_admin");
    }
}
