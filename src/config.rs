use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::script;
use crate::util::is_local_endpoint_url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub endpoint: String,
    pub api_version: Option<String>,
    pub api_key: Option<String>,
    pub model_deployment: String,
    pub agent_name: String,
    pub instructions: String,
    pub mcp_server_name: String,
    pub mcp_server_url: String,
    pub mcp_rls_user_id: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(Self {
            endpoint: env_or("CORA_ENDPOINT", script::DEFAULT_ENDPOINT),
            api_version: env_non_empty("CORA_API_VERSION"),
            api_key: env_non_empty("CORA_API_KEY"),
            model_deployment: env_or("CORA_MODEL_DEPLOYMENT", script::DEFAULT_MODEL_DEPLOYMENT),
            agent_name: env_or("CORA_AGENT_NAME", script::DEFAULT_AGENT_NAME),
            instructions: script::AGENT_INSTRUCTIONS.to_string(),
            mcp_server_name: env_or("CORA_MCP_SERVER_NAME", script::DEFAULT_MCP_SERVER_NAME),
            mcp_server_url: env_or("CORA_MCP_SERVER_URL", script::DEFAULT_MCP_SERVER_URL),
            mcp_rls_user_id: Some(env_or(
                "CORA_MCP_RLS_USER_ID",
                script::DEFAULT_RLS_USER_ID,
            )),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if !is_http_url(&self.endpoint) {
            bail!(
                "Invalid CORA_ENDPOINT '{}': expected http:// or https:// URL",
                self.endpoint
            );
        }

        if !is_http_url(&self.mcp_server_url) {
            bail!(
                "Invalid CORA_MCP_SERVER_URL '{}': expected http:// or https:// URL",
                self.mcp_server_url
            );
        }

        if !is_local_endpoint_url(&self.endpoint) && self.api_key.is_none() {
            bail!(
                "CORA_API_KEY must be set for non-local endpoints (url: '{}')",
                self.endpoint
            );
        }

        if self.model_deployment.trim().is_empty() {
            bail!("CORA_MODEL_DEPLOYMENT must not be empty");
        }

        if self.agent_name.trim().is_empty() {
            bail!("CORA_AGENT_NAME must not be empty");
        }

        if self.mcp_server_name.trim().is_empty() {
            bail!("CORA_MCP_SERVER_NAME must not be empty");
        }

        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn for_tests(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            api_version: None,
            api_key: None,
            model_deployment: "mock-deployment".to_string(),
            agent_name: script::DEFAULT_AGENT_NAME.to_string(),
            instructions: script::AGENT_INSTRUCTIONS.to_string(),
            mcp_server_name: script::DEFAULT_MCP_SERVER_NAME.to_string(),
            mcp_server_url: script::DEFAULT_MCP_SERVER_URL.to_string(),
            mcp_rls_user_id: Some(script::DEFAULT_RLS_USER_ID.to_string()),
        }
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|v| {
        if v.trim().is_empty() {
            None
        } else {
            Some(v)
        }
    })
}

fn env_or(key: &str, default: &str) -> String {
    env_non_empty(key).unwrap_or_else(|| default.to_string())
}

fn is_http_url(url: &str) -> bool {
    let url = url.trim();
    url.starts_with("http://") || url.starts_with("https://")
}
