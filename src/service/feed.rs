use std::sync::Arc;

use crate::grpcweb;
use crate::rpc::feed;
use crate::transport::GrpcWebTransport;
use crate::types::{Ack, Feed, FeedMessage, PersonalFeedStatus};

pub const SERVICE_NAME: &str = "rpcHush.HushFeed";

pub struct HushFeedService {
    transport: Arc<GrpcWebTransport>,
}

impl HushFeedService {
    pub fn new(transport: Arc<GrpcWebTransport>) -> Self {
        HushFeedService { transport }
    }

    /// Every feed `address` participates in; an empty list when the address
    /// has no feeds yet.
    pub async fn get_feeds_for_address(&self, address: &str) -> crate::Result<Vec<Feed>> {
        let request = feed::build_get_feeds_for_address_request(address);
        let body = self
            .transport
            .call(SERVICE_NAME, "GetFeedsForAddress", &request)
            .await?;
        let message = grpcweb::parse_response_frames(&body)?;
        feed::parse_get_feeds_for_address_response(message.as_deref())
    }

    pub async fn get_feed_messages_for_address(
        &self,
        address: &str,
        since_block: u64,
    ) -> crate::Result<Vec<FeedMessage>> {
        let request = feed::build_get_feed_messages_for_address_request(address, since_block);
        let body = self
            .transport
            .call(SERVICE_NAME, "GetFeedMessagesForAddress", &request)
            .await?;
        let message = grpcweb::parse_response_frames(&body)?;
        feed::parse_get_feed_messages_for_address_response(message.as_deref())
    }

    pub async fn get_feed_messages_by_id(
        &self,
        feed_id: &str,
        since_block: u64,
    ) -> crate::Result<Vec<FeedMessage>> {
        let request = feed::build_get_feed_messages_by_id_request(feed_id, since_block);
        let body = self
            .transport
            .call(SERVICE_NAME, "GetFeedMessagesById", &request)
            .await?;
        let message = grpcweb::parse_response_frames(&body)?;
        feed::parse_get_feed_messages_by_id_response(message.as_deref())
    }

    pub async fn has_personal_feed(&self, address: &str) -> crate::Result<PersonalFeedStatus> {
        let request = feed::build_has_personal_feed_request(address);
        let body = self
            .transport
            .call(SERVICE_NAME, "HasPersonalFeed", &request)
            .await?;
        let message = grpcweb::parse_response_frames(&body)?;
        feed::parse_has_personal_feed_response(message.as_deref())
    }

    pub async fn mark_feed_as_read(
        &self,
        feed_id: &str,
        address: &str,
        up_to_block: u64,
    ) -> crate::Result<Ack> {
        let request = feed::build_mark_feed_as_read_request(feed_id, address, up_to_block);
        let body = self
            .transport
            .call(SERVICE_NAME, "MarkFeedAsRead", &request)
            .await?;
        let message = grpcweb::parse_response_frames(&body)?;
        feed::parse_mark_feed_as_read_response(message.as_deref())
    }
}
