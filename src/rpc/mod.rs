//! Request builders and response parsers, one pair per RPC.
//!
//! Field numbers here are the wire contract with the server and must match
//! its proto schemas exactly. Every parser follows the same shape: walk the
//! buffer tag by tag, decode the field numbers it knows, `skip_field` on
//! everything else. Parsers take `Option<&[u8]>` because an absent data frame
//! is a first-class outcome each RPC maps to its own documented default.

pub mod blockchain;
pub mod feed;
pub mod group;
pub mod identity;
