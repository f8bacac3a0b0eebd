use std::sync::Arc;

use crate::grpcweb;
use crate::rpc::identity;
use crate::transport::GrpcWebTransport;
use crate::types::Identity;

pub const SERVICE_NAME: &str = "rpcHush.HushIdentity";

pub struct HushIdentityService {
    transport: Arc<GrpcWebTransport>,
}

impl HushIdentityService {
    pub fn new(transport: Arc<GrpcWebTransport>) -> Self {
        HushIdentityService { transport }
    }

    /// Looks up the on-chain identity registered for `address`; `None` when
    /// the address has never registered one.
    pub async fn get_identity(&self, address: &str) -> crate::Result<Option<Identity>> {
        let request = identity::build_get_identity_request(address);
        let body = self
            .transport
            .call(SERVICE_NAME, "GetIdentity", &request)
            .await?;
        let message = grpcweb::parse_response_frames(&body)?;
        identity::parse_get_identity_response(message.as_deref())
    }

    pub async fn search_by_display_name(
        &self,
        query: &str,
        limit: u32,
    ) -> crate::Result<Vec<Identity>> {
        let request = identity::build_search_by_display_name_request(query, limit);
        let body = self
            .transport
            .call(SERVICE_NAME, "SearchByDisplayName", &request)
            .await?;
        let message = grpcweb::parse_response_frames(&body)?;
        identity::parse_search_by_display_name_response(message.as_deref())
    }
}
