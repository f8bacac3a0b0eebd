use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::Error;
use crate::grpcweb;
use crate::settings::EndpointSource;

pub const CONTENT_TYPE_GRPC_WEB: &str = "application/grpc-web+proto";
pub const ACCEPT_GRPC_WEB: &str = "application/grpc-web+proto, application/grpc-web";

/// Issues gRPC-Web POSTs and hands back the raw framed response body.
///
/// This layer only does HTTP: it frames the request, sets the gRPC-Web
/// headers, and distinguishes HTTP-level failures from everything else. It
/// never interprets `grpc-status` (that is the framer's job) and it carries
/// no retry, timeout, or pooling policy; the sync scheduler around this
/// crate owns cadence and backoff.
pub struct GrpcWebTransport {
    client: reqwest::Client,
    endpoint: Arc<dyn EndpointSource>,
}

impl GrpcWebTransport {
    pub fn new(endpoint: Arc<dyn EndpointSource>) -> Self {
        GrpcWebTransport {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    /// POSTs one framed request to `{base_url}/{service}/{method}` and
    /// returns the raw response body bytes.
    ///
    /// Non-2xx responses become `Error::Transport` with the HTTP status and
    /// body text, distinct from an in-band `grpc-status` failure.
    pub async fn call(
        &self,
        service: &str,
        method: &str,
        request: &[u8],
    ) -> crate::Result<Vec<u8>> {
        let url = format!("{}/{}/{}", self.endpoint.base_url(), service, method);
        debug!(
            "grpc-web call {}/{} ({} request bytes)",
            service,
            method,
            request.len()
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", CONTENT_TYPE_GRPC_WEB)
            .header("Accept", ACCEPT_GRPC_WEB)
            .header("X-Grpc-Web", "1")
            .body(grpcweb::build_request_frame(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                "grpc-web call {}/{} rejected with http {}",
                service,
                method,
                status.as_u16()
            );
            return Err(Error::Transport {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}
