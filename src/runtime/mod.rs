pub mod render;
pub mod source;
pub mod turn;

pub use render::{announce, render, SeenCalls};
pub use source::EventSource;
pub use turn::{TurnDriver, TurnPhase};
