use thiserror::Error;

/// Failures raised by the low-level protobuf wire codec.
///
/// These are always malformed-input conditions: the reader refuses to read
/// past the end of a buffer or accept a tag it cannot interpret. They never
/// represent an application-level failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WireError {
    #[error("varint truncated at offset {0}")]
    TruncatedVarint(usize),
    #[error("varint exceeds 64 bits at offset {0}")]
    VarintOverflow(usize),
    #[error("needed {needed} more bytes at offset {offset}")]
    Truncated { offset: usize, needed: usize },
    #[error("invalid wire type {0}")]
    InvalidWireType(u8),
    #[error("field number {0} out of range")]
    FieldNumberOutOfRange(u64),
    #[error("length-delimited field at offset {0} is not valid utf-8")]
    InvalidUtf8(usize),
}

/// Everything that can go wrong between a façade call and its typed result.
///
/// `Transport` and `Http` are HTTP-level failures, `GrpcStatus` is the server
/// declining the call in-band via a trailer frame, and `Wire`/`MalformedFrame`
/// mean the response bytes violated the wire contract. An empty response body
/// is *not* an error; each RPC maps it to its own documented default.
#[derive(Debug, Error)]
pub enum Error {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned http {status}: {body}")]
    Transport { status: u16, body: String },

    #[error("malformed grpc-web frame: {0}")]
    MalformedFrame(&'static str),

    #[error("grpc status {code}: {message}")]
    GrpcStatus { code: u32, message: String },

    #[error("malformed message: {0}")]
    Wire(#[from] WireError),

    #[error("response missing required field: {0}")]
    MissingField(&'static str),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
