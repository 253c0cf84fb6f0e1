pub mod client;
pub mod logging;
#[cfg(test)]
pub mod mock_client;
pub mod stream;

pub use client::{AgentClient, ByteStream};
pub use stream::{chunk_stream, ChunkAssembler, ChunkStream, StreamParser};
