use super::client::ByteStream;
use super::logging::emit_sse_parse_error;
use crate::types::{Chunk, OutputItem, ResponseStreamEvent};
use anyhow::{anyhow, Result};
use futures::stream::{self, Stream, StreamExt};
use std::collections::{HashMap, VecDeque};
use std::pin::Pin;

pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<Chunk>> + Send>>;

/// Splits raw SSE bytes into events. Bytes are buffered until a frame is
/// complete, so a character split across reads is decoded whole.
#[derive(Default)]
pub struct StreamParser {
    buffer: Vec<u8>,
}

impl StreamParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process(&mut self, chunk: &[u8]) -> Result<Vec<ResponseStreamEvent>> {
        // 0x0D never occurs inside a multi-byte UTF-8 sequence.
        self.buffer
            .extend(chunk.iter().copied().filter(|byte| *byte != b'\r'));
        let mut events = Vec::new();
        let mut start = 0;

        while let Some(end) = find_frame_end(&self.buffer[start..]) {
            let event_end = start + end + 2;
            let frame = std::str::from_utf8(&self.buffer[start..event_end])
                .map_err(|error| anyhow!("SSE frame is not valid UTF-8: {error}"))?;
            if let Some(event) = parse_frame(frame) {
                events.push(event);
            }
            start = event_end;
        }

        if start > 0 {
            self.buffer.drain(..start);
        }

        Ok(events)
    }

    /// Takes the bytes of an unterminated trailing frame.
    pub fn flush(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buffer)
    }
}

fn find_frame_end(bytes: &[u8]) -> Option<usize> {
    bytes.windows(2).position(|pair| pair == b"\n\n")
}

fn parse_frame(frame: &str) -> Option<ResponseStreamEvent> {
    let mut event_type = None;
    let mut data_lines = Vec::new();

    for line in frame.lines() {
        if let Some(rest) = line.strip_prefix("event:") {
            event_type = Some(rest.trim().to_string());
        } else if let Some(rest) = line.strip_prefix("data:") {
            data_lines.push(rest.strip_prefix(' ').unwrap_or(rest));
        }
    }

    if data_lines.is_empty() {
        return None;
    }
    let json_data = data_lines.join("\n");
    if json_data.trim() == "[DONE]" {
        return None;
    }

    match serde_json::from_str::<ResponseStreamEvent>(&json_data) {
        Ok(event) => Some(event),
        Err(e) => {
            emit_sse_parse_error(event_type.as_deref(), &json_data, &e);
            None
        }
    }
}

/// Turns protocol events into chunks. A tool call is reported again for every
/// event that mentions its item, so one call usually spans several chunks.
#[derive(Debug, Default)]
pub struct ChunkAssembler {
    calls: HashMap<String, (String, String)>,
    finished: bool,
}

impl ChunkAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn push(&mut self, event: ResponseStreamEvent) -> Result<Option<Chunk>> {
        match event {
            ResponseStreamEvent::OutputItemAdded { item, .. }
            | ResponseStreamEvent::OutputItemDone { item, .. } => Ok(self.track_item(item)),
            ResponseStreamEvent::FunctionCallArgumentsDelta { item_id, .. }
            | ResponseStreamEvent::McpCallArgumentsDelta { item_id, .. } => Ok(self
                .calls
                .get(&item_id)
                .map(|(call_id, name)| Chunk::function_call(call_id.clone(), name.clone()))),
            ResponseStreamEvent::OutputTextDelta { delta, .. } => {
                if delta.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(Chunk::text(delta)))
                }
            }
            ResponseStreamEvent::Completed { .. } | ResponseStreamEvent::Incomplete { .. } => {
                self.finished = true;
                Ok(None)
            }
            ResponseStreamEvent::Failed { response } => {
                self.finished = true;
                let detail = response
                    .error
                    .map(|error| match error.code {
                        Some(code) => format!("{code}: {}", error.message),
                        None => error.message,
                    })
                    .unwrap_or_else(|| "no error detail".to_string());
                Err(anyhow!("agent response '{}' failed: {detail}", response.id))
            }
            ResponseStreamEvent::Error { code, message } => {
                self.finished = true;
                match code {
                    Some(code) => Err(anyhow!("agent service error {code}: {message}")),
                    None => Err(anyhow!("agent service error: {message}")),
                }
            }
            ResponseStreamEvent::Created { .. }
            | ResponseStreamEvent::InProgress { .. }
            | ResponseStreamEvent::Unknown => Ok(None),
        }
    }

    fn track_item(&mut self, item: OutputItem) -> Option<Chunk> {
        let (item_id, call_id, name) = match item {
            OutputItem::FunctionCall {
                id, call_id, name, ..
            } => (id, call_id, name),
            OutputItem::McpCall { id, name, .. } => (Some(id.clone()), id, name),
            OutputItem::Other => return None,
        };
        if let Some(item_id) = item_id {
            self.calls
                .insert(item_id, (call_id.clone(), name.clone()));
        }
        Some(Chunk::function_call(call_id, name))
    }
}

struct ChunkStreamState {
    bytes: ByteStream,
    parser: StreamParser,
    assembler: ChunkAssembler,
    pending: VecDeque<Result<Chunk>>,
    done: bool,
}

impl ChunkStreamState {
    fn absorb(&mut self, events: Vec<ResponseStreamEvent>) {
        for event in events {
            match self.assembler.push(event) {
                Ok(Some(chunk)) => self.pending.push_back(Ok(chunk)),
                Ok(None) => {}
                Err(error) => {
                    self.pending.push_back(Err(error));
                    self.done = true;
                    return;
                }
            }
        }
    }

    fn finish(&mut self) {
        self.done = true;
        let mut tail = self.parser.flush();
        if !tail.iter().all(u8::is_ascii_whitespace) {
            tail.extend_from_slice(b"\n\n");
            match self.parser.process(&tail) {
                Ok(events) => self.absorb(events),
                Err(error) => self.pending.push_back(Err(error)),
            }
        }
        if !self.assembler.is_finished() && !self.pending.iter().any(|item| item.is_err()) {
            self.pending
                .push_back(Err(anyhow!("agent response stream ended before completion")));
        }
    }
}

/// Lazily decodes a response body into chunks. Nothing is yielded after the
/// first error.
pub fn chunk_stream(bytes: ByteStream) -> ChunkStream {
    let state = ChunkStreamState {
        bytes,
        parser: StreamParser::new(),
        assembler: ChunkAssembler::new(),
        pending: VecDeque::new(),
        done: false,
    };

    Box::pin(stream::unfold(state, |mut state| async move {
        loop {
            if let Some(item) = state.pending.pop_front() {
                if item.is_err() {
                    state.pending.clear();
                }
                return Some((item, state));
            }
            if state.done {
                return None;
            }

            match state.bytes.next().await {
                Some(Ok(bytes)) => match state.parser.process(&bytes) {
                    Ok(events) => state.absorb(events),
                    Err(error) => {
                        state.done = true;
                        state.pending.push_back(Err(error));
                    }
                },
                Some(Err(error)) => {
                    state.done = true;
                    state.pending.push_back(Err(error));
                }
                None => state.finish(),
            }
        }
    }))
}
