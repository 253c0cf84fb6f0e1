use super::render::{announce, render, SeenCalls};
use super::source::EventSource;
use anyhow::{bail, Result};
use futures::StreamExt;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    NotStarted,
    Started,
    Streaming,
    Completed,
    Failed,
}

/// Replays user turns through an [`EventSource`] and prints the streamed
/// transcript to `out`.
pub struct TurnDriver<S, W> {
    source: S,
    out: W,
    phase: TurnPhase,
}

impl<S: EventSource, W: Write> TurnDriver<S, W> {
    pub fn new(source: S, out: W) -> Self {
        Self {
            source,
            out,
            phase: TurnPhase::NotStarted,
        }
    }

    /// Phase reached by the most recent turn.
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs one turn to completion. A failing chunk stream is returned as is;
    /// whatever was printed before the failure stays printed.
    pub async fn run_turn(&mut self, input: &str) -> Result<()> {
        if input.trim().is_empty() {
            bail!("turn input must not be empty");
        }

        self.phase = TurnPhase::NotStarted;
        writeln!(self.out, "\n# User: '{input}'")?;
        let mut seen = SeenCalls::new();
        self.phase = TurnPhase::Started;

        let result = self.stream_turn(input, &mut seen).await;
        self.phase = match result {
            Ok(()) => TurnPhase::Completed,
            Err(_) => TurnPhase::Failed,
        };
        result
    }

    async fn stream_turn(&mut self, input: &str, seen: &mut SeenCalls) -> Result<()> {
        let mut chunks = self.source.open_stream(input).await?;
        self.phase = TurnPhase::Streaming;

        while let Some(chunk) = chunks.next().await {
            let chunk = chunk?;
            announce(&chunk, seen, &mut self.out)?;
            render(&chunk, &mut self.out)?;
            self.out.flush()?;
        }

        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }

    /// Runs turns one after another, stopping at the first failure.
    pub async fn run_script<I, T>(&mut self, inputs: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        for input in inputs {
            self.run_turn(input.as_ref()).await?;
        }
        Ok(())
    }
}
