use super::logging::{debug_payload_enabled, emit_debug_payload, emit_stream_failure};
use super::stream::{chunk_stream, ChunkStream};
use crate::config::Config;
use crate::runtime::EventSource;
use crate::tools::McpTool;
use crate::util::is_local_endpoint_url;
use anyhow::anyhow;
use anyhow::Result;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use serde_json::json;
use serde_json::Value;
use std::pin::Pin;
#[cfg(test)]
use std::sync::Arc;

pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>;

#[cfg(test)]
pub trait MockStreamProducer: Send + Sync {
    fn create_mock_stream(&self, input: &str) -> Result<ByteStream>;
}

/// Streams responses of a hosted agent deployment. The service runs the
/// declared tool server itself; this client only reports what it streams.
#[derive(Clone)]
pub struct AgentClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    agent_name: String,
    instructions: String,
    request_url: String,
    tools: Vec<McpTool>,
    #[cfg(test)]
    mock_stream_producer: Option<Arc<dyn MockStreamProducer>>,
}

impl AgentClient {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            http: reqwest::Client::builder().build()?,
            api_key: config.api_key.clone(),
            model: config.model_deployment.clone(),
            agent_name: config.agent_name.clone(),
            instructions: config.instructions.clone(),
            request_url: responses_url(&config.endpoint, config.api_version.as_deref()),
            tools: vec![McpTool::from_config(config)],
            #[cfg(test)]
            mock_stream_producer: None,
        })
    }

    #[cfg(test)]
    pub fn new_mock(mock_producer: Arc<dyn MockStreamProducer>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: None,
            model: "mock-deployment".to_string(),
            agent_name: "mock-agent".to_string(),
            instructions: "You are a test agent.".to_string(),
            request_url: "http://localhost:8000/v1/responses".to_string(),
            tools: Vec::new(),
            mock_stream_producer: Some(mock_producer),
        }
    }

    pub fn request_url(&self) -> &str {
        &self.request_url
    }

    pub fn is_local_endpoint(&self) -> bool {
        is_local_endpoint_url(&self.request_url)
    }

    pub fn request_payload(&self, input: &str) -> Value {
        let tools: Vec<Value> = self.tools.iter().map(McpTool::declaration).collect();
        json!({
            "model": self.model,
            "instructions": self.instructions,
            "input": input,
            "stream": true,
            "tools": tools,
            "metadata": { "agent_name": self.agent_name },
        })
    }

    pub async fn create_stream(&self, input: &str) -> Result<ByteStream> {
        #[cfg(test)]
        {
            if let Some(producer) = &self.mock_stream_producer {
                return producer.create_mock_stream(input);
            }
        }

        let payload = self.request_payload(input);
        if debug_payload_enabled() {
            emit_debug_payload(&self.request_url, &payload);
        }

        let mut request = self
            .http
            .post(&self.request_url)
            .header("content-type", "application/json")
            .header("accept", "text/event-stream")
            .json(&payload);
        if let Some(api_key) = &self.api_key {
            request = request.header("authorization", format!("Bearer {api_key}"));
        }

        let response = request
            .send()
            .await
            .map_err(|error| map_api_request_error(error, &self.request_url))?
            .error_for_status()
            .map_err(|error| map_api_request_error(error, &self.request_url))?;

        let request_url_for_stream = self.request_url.clone();
        let stream = response.bytes_stream().map(move |item| {
            item.map_err(|error| {
                let error = map_api_request_error(error, &request_url_for_stream);
                emit_stream_failure(&request_url_for_stream, &error);
                error
            })
        });
        Ok(Box::pin(stream))
    }
}

impl EventSource for AgentClient {
    async fn open_stream(&self, input: &str) -> Result<ChunkStream> {
        let bytes = self.create_stream(input).await?;
        Ok(chunk_stream(bytes))
    }
}

fn map_api_request_error(error: reqwest::Error, request_url: &str) -> anyhow::Error {
    if error.is_connect() && is_local_endpoint_url(request_url) {
        return anyhow!(
            "cannot reach local agent endpoint '{}': {}. Start your local server or update CORA_ENDPOINT.",
            request_url,
            error
        );
    }
    if error.is_connect() {
        return anyhow!("cannot reach agent endpoint '{}': {}", request_url, error);
    }
    if error.is_timeout() {
        return anyhow!("agent request to '{}' timed out: {}", request_url, error);
    }
    if let Some(status) = error.status() {
        return anyhow!(
            "agent endpoint '{}' returned HTTP {}: {}",
            request_url,
            status,
            error
        );
    }
    anyhow!("agent request to '{}' failed: {}", request_url, error)
}

/// Resolves the streaming responses URL for a project endpoint.
pub fn responses_url(endpoint: &str, api_version: Option<&str>) -> String {
    let (path, query) = match endpoint.trim().split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (endpoint.trim(), None),
    };
    let path = path.trim_end_matches('/');
    let mut base = if path.ends_with("/responses") {
        path.to_string()
    } else if path.ends_with("/v1") || path.ends_with("/openai") {
        format!("{path}/responses")
    } else {
        format!("{path}/openai/responses")
    };
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        base.push('?');
        base.push_str(query);
    }

    match api_version.map(str::trim).filter(|v| !v.is_empty()) {
        Some(version) if !base.contains("api-version=") => {
            let separator = if base.contains('?') { '&' } else { '?' };
            format!("{base}{separator}api-version={version}")
        }
        _ => base,
    }
}
