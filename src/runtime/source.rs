use crate::api::ChunkStream;
use anyhow::Result;
use std::future::Future;

/// Produces the chunk sequence of one user turn.
///
/// The returned stream is finite and forward-only. An `Err` item ends the
/// turn; the driver hands it to its caller untouched.
pub trait EventSource {
    fn open_stream(&self, input: &str) -> impl Future<Output = Result<ChunkStream>> + Send;
}

