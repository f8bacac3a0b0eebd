//! Typed results produced by the response parsers.
//!
//! These are plain DTOs: no invariants beyond field presence, no methods that
//! touch bytes. The wire contract lives entirely in `rpc/`; callers (the
//! stores, the sync scheduler, the CLI) only ever see these shapes.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
pub struct Identity {
    pub address: String,
    pub display_name: String,
    pub bio: String,
    pub registered_at_block: u64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
pub struct FeedParticipant {
    pub address: String,
    pub display_name: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
pub struct Feed {
    pub feed_id: String,
    pub title: String,
    pub is_group: bool,
    pub latest_block: u64,
    pub unread_count: u64,
    pub participants: Vec<FeedParticipant>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
pub struct FeedMessage {
    pub message_id: String,
    pub feed_id: String,
    pub sender: String,
    /// Ciphertext; opaque to this layer.
    pub body: Vec<u8>,
    pub block_height: u64,
    pub timestamp: u64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
pub struct PersonalFeedStatus {
    pub exists: bool,
    pub feed_id: Option<String>,
}

/// Shared success/message response shape used by the mutation RPCs.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
pub struct Ack {
    pub success: bool,
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
pub struct GroupFeedInfo {
    pub feed_id: String,
    pub title: String,
    pub description: String,
    pub is_public: bool,
    pub member_count: u32,
    /// Only `GetGroupFeed` carries this; the invite-code lookup omits it.
    pub current_key_generation: Option<u32>,
}

/// Outcome of a group-feed lookup.
///
/// `Refused` is the server answering with `success=false` and a reason;
/// `Missing` is the server answering with no data frame at all. A truncated
/// buffer is neither -- it fails the parse outright -- so a caller can always
/// tell "the server said no" from "there was nothing there" from "the bytes
/// were broken".
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub enum GroupFeedLookup {
    Found(GroupFeedInfo),
    Refused { message: String },
    Missing,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
pub struct GroupMember {
    pub address: String,
    pub display_name: String,
    pub joined_at_block: u64,
    pub is_admin: bool,
}

/// Result of `JoinGroupFeed`: an ack plus the joined feed's id on success.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
pub struct JoinOutcome {
    pub success: bool,
    pub message: String,
    pub feed_id: Option<String>,
}
