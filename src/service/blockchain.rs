use std::sync::Arc;

use crate::grpcweb;
use crate::rpc::blockchain;
use crate::transport::GrpcWebTransport;

pub const SERVICE_NAME: &str = "rpcHush.HushBlockchain";

pub struct HushBlockchainService {
    transport: Arc<GrpcWebTransport>,
}

impl HushBlockchainService {
    pub fn new(transport: Arc<GrpcWebTransport>) -> Self {
        HushBlockchainService { transport }
    }

    /// Current block height of the chain backing the feeds.
    pub async fn get_blockchain_height(&self) -> crate::Result<u64> {
        let request = blockchain::build_get_blockchain_height_request();
        let body = self
            .transport
            .call(SERVICE_NAME, "GetBlockchainHeight", &request)
            .await?;
        let message = grpcweb::parse_response_frames(&body)?;
        blockchain::parse_get_blockchain_height_response(message.as_deref())
    }
}
