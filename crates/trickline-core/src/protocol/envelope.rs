//! Envelope (JSON) and the closed set of message kinds.
//!
//! The envelope stores `payload` as `RawValue` so it is parsed exactly once,
//! into the struct selected by `type`.

use serde::Deserialize;
use serde_json::value::RawValue;

use crate::error::{Result, TricklineError};
use crate::protocol::messages::{Inbound, Outbound};

/// Every message kind exchanged with the game server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    JoinGame,
    StartRound,
    GetState,
    PlayCard,
    Joined,
    StateUpdate,
    TrickComplete,
    RoundComplete,
    Error,
}

impl MessageKind {
    pub const ALL: [MessageKind; 9] = [
        MessageKind::JoinGame,
        MessageKind::StartRound,
        MessageKind::GetState,
        MessageKind::PlayCard,
        MessageKind::Joined,
        MessageKind::StateUpdate,
        MessageKind::TrickComplete,
        MessageKind::RoundComplete,
        MessageKind::Error,
    ];

    /// Wire tag (`type` field).
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::JoinGame => "join_game",
            MessageKind::StartRound => "start_round",
            MessageKind::GetState => "get_state",
            MessageKind::PlayCard => "play_card",
            MessageKind::Joined => "joined",
            MessageKind::StateUpdate => "state_update",
            MessageKind::TrickComplete => "trick_complete",
            MessageKind::RoundComplete => "round_complete",
            MessageKind::Error => "error",
        }
    }

    pub fn from_wire(tag: &str) -> Option<MessageKind> {
        MessageKind::ALL.into_iter().find(|k| k.as_str() == tag)
    }

    /// True for kinds the server sends to the client.
    pub fn is_inbound(self) -> bool {
        matches!(
            self,
            MessageKind::Joined
                | MessageKind::StateUpdate
                | MessageKind::TrickComplete
                | MessageKind::RoundComplete
                | MessageKind::Error
        )
    }
}

/// Envelope as received, payload not yet interpreted.
#[derive(Debug, Deserialize)]
pub struct RawEnvelope {
    /// Message kind (field name is `type` in JSON).
    #[serde(rename = "type")]
    pub kind: String,
    /// Payload, stored as raw JSON (lazy parsing).
    #[serde(default)]
    pub payload: Option<Box<RawValue>>,
}

fn payload<'a, T: Deserialize<'a>>(env: &'a RawEnvelope) -> Result<T> {
    let raw = env
        .payload
        .as_ref()
        .ok_or_else(|| TricklineError::Decode(format!("{} requires payload", env.kind)))?;
    serde_json::from_str(raw.get())
        .map_err(|e| TricklineError::Decode(format!("{} invalid payload: {e}", env.kind)))
}

/// Decode one inbound text message.
///
/// Unknown kinds, and outbound kinds echoed back, decode to
/// [`Inbound::Unknown`] so newer servers do not break older clients.
pub fn decode_inbound(text: &str) -> Result<Inbound> {
    let env: RawEnvelope = serde_json::from_str(text)
        .map_err(|e| TricklineError::Decode(format!("invalid envelope json: {e}")))?;

    let Some(kind) = MessageKind::from_wire(&env.kind).filter(|k| k.is_inbound()) else {
        tracing::trace!(kind = %env.kind, "inbound kind not handled");
        return Ok(Inbound::Unknown { kind: env.kind });
    };

    Ok(match kind {
        MessageKind::Joined => Inbound::Joined(payload(&env)?),
        MessageKind::StateUpdate => Inbound::StateUpdate(payload(&env)?),
        MessageKind::TrickComplete => Inbound::TrickComplete(payload(&env)?),
        MessageKind::RoundComplete => Inbound::RoundComplete(payload(&env)?),
        MessageKind::Error => Inbound::Error(payload(&env)?),
        MessageKind::JoinGame
        | MessageKind::StartRound
        | MessageKind::GetState
        | MessageKind::PlayCard => Inbound::Unknown { kind: env.kind },
    })
}

/// Encode one outbound command as envelope text.
pub fn encode_outbound(msg: &Outbound) -> Result<String> {
    serde_json::to_string(msg)
        .map_err(|e| TricklineError::Internal(format!("json encode failed: {e}")))
}
