use std::sync::Arc;

use crate::events::{EventRegistry, FeedEvent};
use crate::grpcweb;
use crate::rpc::group;
use crate::transport::GrpcWebTransport;
use crate::types::{Ack, GroupFeedLookup, GroupMember, JoinOutcome};

pub const SERVICE_NAME: &str = "rpcHush.HushGroup";

/// Group façade. Besides the build/call/parse chain this is the one façade
/// with a side channel: membership mutations that the server acknowledges are
/// announced on the event registry so the sync layer can refresh without
/// waiting for its next poll.
pub struct HushGroupService {
    transport: Arc<GrpcWebTransport>,
    events: Arc<EventRegistry>,
}

impl HushGroupService {
    pub fn new(transport: Arc<GrpcWebTransport>, events: Arc<EventRegistry>) -> Self {
        HushGroupService { transport, events }
    }

    pub async fn get_group_feed(&self, feed_id: &str) -> crate::Result<GroupFeedLookup> {
        let request = group::build_get_group_feed_request(feed_id);
        let body = self
            .transport
            .call(SERVICE_NAME, "GetGroupFeed", &request)
            .await?;
        let message = grpcweb::parse_response_frames(&body)?;
        group::parse_get_group_feed_response(message.as_deref())
    }

    pub async fn get_group_feed_by_invite_code(
        &self,
        invite_code: &str,
    ) -> crate::Result<GroupFeedLookup> {
        let request = group::build_get_group_feed_by_invite_code_request(invite_code);
        let body = self
            .transport
            .call(SERVICE_NAME, "GetGroupFeedByInviteCode", &request)
            .await?;
        let message = grpcweb::parse_response_frames(&body)?;
        group::parse_get_group_feed_by_invite_code_response(message.as_deref())
    }

    pub async fn join_group_feed(
        &self,
        invite_code: &str,
        address: &str,
        display_name: &str,
    ) -> crate::Result<JoinOutcome> {
        let request = group::build_join_group_feed_request(invite_code, address, display_name);
        let body = self
            .transport
            .call(SERVICE_NAME, "JoinGroupFeed", &request)
            .await?;
        let message = grpcweb::parse_response_frames(&body)?;
        let outcome = group::parse_join_group_feed_response(message.as_deref())?;
        if outcome.success {
            if let Some(feed_id) = &outcome.feed_id {
                self.events.notify(&FeedEvent::MemberJoined {
                    feed_id: feed_id.clone(),
                    address: address.to_string(),
                });
            }
        }
        Ok(outcome)
    }

    pub async fn leave_group_feed(&self, feed_id: &str, address: &str) -> crate::Result<Ack> {
        let request = group::build_leave_group_feed_request(feed_id, address);
        let body = self
            .transport
            .call(SERVICE_NAME, "LeaveGroupFeed", &request)
            .await?;
        let message = grpcweb::parse_response_frames(&body)?;
        let ack = group::parse_leave_group_feed_response(message.as_deref())?;
        if ack.success {
            self.events.notify(&FeedEvent::MembershipRevoked {
                feed_id: feed_id.to_string(),
                address: address.to_string(),
            });
        }
        Ok(ack)
    }

    pub async fn delete_group_feed(&self, feed_id: &str, address: &str) -> crate::Result<Ack> {
        let request = group::build_delete_group_feed_request(feed_id, address);
        let body = self
            .transport
            .call(SERVICE_NAME, "DeleteGroupFeed", &request)
            .await?;
        let message = grpcweb::parse_response_frames(&body)?;
        let ack = group::parse_delete_group_feed_response(message.as_deref())?;
        if ack.success {
            self.events.notify(&FeedEvent::MembershipRevoked {
                feed_id: feed_id.to_string(),
                address: address.to_string(),
            });
        }
        Ok(ack)
    }

    pub async fn add_member_to_group_feed(
        &self,
        feed_id: &str,
        member_address: &str,
        added_by_address: &str,
    ) -> crate::Result<Ack> {
        let request = group::build_add_member_to_group_feed_request(
            feed_id,
            member_address,
            added_by_address,
        );
        let body = self
            .transport
            .call(SERVICE_NAME, "AddMemberToGroupFeed", &request)
            .await?;
        let message = grpcweb::parse_response_frames(&body)?;
        let ack = group::parse_add_member_to_group_feed_response(message.as_deref())?;
        if ack.success {
            self.events.notify(&FeedEvent::MemberJoined {
                feed_id: feed_id.to_string(),
                address: member_address.to_string(),
            });
        }
        Ok(ack)
    }

    pub async fn get_group_members(&self, feed_id: &str) -> crate::Result<Vec<GroupMember>> {
        let request = group::build_get_group_members_request(feed_id);
        let body = self
            .transport
            .call(SERVICE_NAME, "GetGroupMembers", &request)
            .await?;
        let message = grpcweb::parse_response_frames(&body)?;
        group::parse_get_group_members_response(message.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use crate::settings::EndpointSource;
    use crate::wire::WireWriter;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use warp::Filter;

    struct FixedEndpoint(String);

    impl EndpointSource for FixedEndpoint {
        fn base_url(&self) -> String {
            self.0.clone()
        }
    }

    fn framed(message: &[u8]) -> Vec<u8> {
        let mut body = grpcweb::build_request_frame(message);
        let trailer = b"grpc-status:0\r\n";
        body.push(grpcweb::TRAILER_FLAG);
        body.extend_from_slice(&(trailer.len() as u32).to_be_bytes());
        body.extend_from_slice(trailer);
        body
    }

    #[tokio::test]
    async fn test_successful_join_notifies_member_joined() {
        let mut response = WireWriter::new();
        response.bool_field(1, true);
        response.string_field(2, "welcome");
        response.string_field(3, "feed-42");
        let body = framed(&response.into_bytes());

        let filter = warp::post()
            .and(warp::path!("rpcHush.HushGroup" / "JoinGroupFeed"))
            .map(move || warp::reply::Response::new(body.clone().into()));
        let (addr, server) = warp::serve(filter).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);

        let events = Arc::new(EventRegistry::new());
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_in_callback = Arc::clone(&hits);
        events.subscribe(EventKind::MemberJoined, move |event| {
            assert_eq!(
                event,
                &FeedEvent::MemberJoined {
                    feed_id: "feed-42".to_string(),
                    address: "hush1new".to_string(),
                }
            );
            hits_in_callback.fetch_add(1, Ordering::SeqCst);
        });

        let transport = Arc::new(GrpcWebTransport::new(Arc::new(FixedEndpoint(format!(
            "http://{}",
            addr
        )))));
        let service = HushGroupService::new(transport, events);
        let outcome = service
            .join_group_feed("ABC123", "hush1new", "newcomer")
            .await
            .unwrap();
        assert!(outcome.success);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_refused_join_stays_silent() {
        let mut response = WireWriter::new();
        response.bool_field(1, false);
        response.string_field(2, "invite code expired");
        let body = framed(&response.into_bytes());

        let filter = warp::post()
            .and(warp::path!("rpcHush.HushGroup" / "JoinGroupFeed"))
            .map(move || warp::reply::Response::new(body.clone().into()));
        let (addr, server) = warp::serve(filter).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);

        let events = Arc::new(EventRegistry::new());
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_in_callback = Arc::clone(&hits);
        events.subscribe(EventKind::MemberJoined, move |_| {
            hits_in_callback.fetch_add(1, Ordering::SeqCst);
        });

        let transport = Arc::new(GrpcWebTransport::new(Arc::new(FixedEndpoint(format!(
            "http://{}",
            addr
        )))));
        let service = HushGroupService::new(transport, events);
        let outcome = service
            .join_group_feed("STALE", "hush1new", "newcomer")
            .await
            .unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.message, "invite code expired");
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
