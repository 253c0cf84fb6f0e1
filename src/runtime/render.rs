use crate::types::Chunk;
use std::collections::HashSet;
use std::io::{self, Write};

/// Call identifiers already announced during one turn. Insert-only.
#[derive(Debug, Default)]
pub struct SeenCalls {
    ids: HashSet<String>,
}

impl SeenCalls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when `call_id` was not seen before.
    pub fn insert(&mut self, call_id: &str) -> bool {
        self.ids.insert(call_id.to_string())
    }

    pub fn contains(&self, call_id: &str) -> bool {
        self.ids.contains(call_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Prints one `Tool calls: <name>` line per call id not yet in `seen`.
/// Calls are keyed by id, so two calls sharing a name are both announced.
pub fn announce<W: Write>(chunk: &Chunk, seen: &mut SeenCalls, out: &mut W) -> io::Result<()> {
    for (call_id, name) in chunk.function_calls() {
        if seen.insert(call_id) {
            writeln!(out, "Tool calls: {name}")?;
        }
    }
    Ok(())
}

/// Writes the chunk's text fragment verbatim.
pub fn render<W: Write>(chunk: &Chunk, out: &mut W) -> io::Result<()> {
    if let Some(text) = chunk.text_fragment() {
        out.write_all(text.as_bytes())?;
    }
    Ok(())
}
