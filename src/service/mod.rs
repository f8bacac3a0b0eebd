//! Typed per-service façades over the transport and codecs.
//!
//! Each façade groups the codec pairs of one gRPC service behind async
//! functions: build request bytes, POST through the transport, de-frame the
//! body, parse, and apply the RPC's empty-result default. Errors propagate as
//! `crate::Error`; nothing here retries or logs to a user surface.

pub mod blockchain;
pub mod feed;
pub mod group;
pub mod identity;

pub use blockchain::HushBlockchainService;
pub use feed::HushFeedService;
pub use group::HushGroupService;
pub use identity::HushIdentityService;

use std::sync::Arc;

use crate::events::EventRegistry;
use crate::settings::EndpointSource;
use crate::transport::GrpcWebTransport;

/// All four service façades plus the event registry, behind one constructor.
pub struct HushClient {
    pub identity: HushIdentityService,
    pub feed: HushFeedService,
    pub group: HushGroupService,
    pub blockchain: HushBlockchainService,
    events: Arc<EventRegistry>,
}

impl HushClient {
    pub fn new(endpoint: Arc<dyn EndpointSource>) -> Self {
        HushClient::with_transport(
            Arc::new(GrpcWebTransport::new(endpoint)),
            Arc::new(EventRegistry::new()),
        )
    }

    /// Wires the façades onto an existing transport and registry; the seam
    /// the tests (and any embedder with its own registry) use.
    pub fn with_transport(transport: Arc<GrpcWebTransport>, events: Arc<EventRegistry>) -> Self {
        HushClient {
            identity: HushIdentityService::new(Arc::clone(&transport)),
            feed: HushFeedService::new(Arc::clone(&transport)),
            group: HushGroupService::new(Arc::clone(&transport), Arc::clone(&events)),
            blockchain: HushBlockchainService::new(transport),
            events,
        }
    }

    pub fn events(&self) -> &Arc<EventRegistry> {
        &self.events
    }
}
