/*!
# Hush RPC

Client-side implementation of the gRPC-Web wire format and the Protocol
Buffers wire encoding used by the Hush Feeds blockchain messaging server.
There is no generated protobuf toolchain here: the varint codec, the
tag/wire-type parsing, the 5-byte gRPC-Web framing, and every per-RPC
request builder and response parser are written by hand against the server's
proto schemas.

The layering, leaf first: `wire` (varints, field tags, cursor reader/writer),
`grpcweb` (data/trailer frames, grpc-status extraction), `transport` (the
HTTP POST), `rpc` (one codec pair per RPC), and `service` (typed async
façades grouped by gRPC service). Everything below the transport is a pure
function over byte buffers; one request/response cycle shares no state with
any other.

# Usage

```no_run
use std::sync::Arc;
use hush_rpc::service::HushClient;
use hush_rpc::settings::Settings;

# async fn example() -> hush_rpc::Result<()> {
let settings = Arc::new(Settings::load("config")?);
let client = HushClient::new(settings);
let height = client.blockchain.get_blockchain_height().await?;
println!("chain height: {}", height);
# Ok(())
# }
```
*/
pub mod error;
pub mod events;
pub mod grpcweb;
pub mod rpc;
pub mod service;
pub mod settings;
pub mod transport;
pub mod types;
pub mod wire;

pub use error::{Error, WireError};

pub type Result<T> = std::result::Result<T, Error>;
