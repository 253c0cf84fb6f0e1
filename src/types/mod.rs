mod api;
mod chunk;

pub use api::{OutputItem, ResponseError, ResponseInfo, ResponseStreamEvent};
pub use chunk::{Chunk, ContentItem};
