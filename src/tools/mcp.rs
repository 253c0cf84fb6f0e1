use crate::config::Config;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;

pub const RLS_USER_HEADER: &str = "x-rls-user-id";

/// The tool server the hosted agent is allowed to call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct McpTool {
    pub name: String,
    pub description: String,
    pub server_url: String,
    pub require_approval: String,
    pub headers: BTreeMap<String, String>,
}

impl McpTool {
    pub fn new(name: &str, server_url: impl Into<String>) -> Self {
        Self {
            name: server_label(name),
            description: format!("MCP server for {name}"),
            server_url: server_url.into(),
            require_approval: "never".to_string(),
            headers: BTreeMap::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut tool = Self::new(&config.mcp_server_name, config.mcp_server_url.clone());
        if let Some(user_id) = &config.mcp_rls_user_id {
            tool.headers
                .insert(RLS_USER_HEADER.to_string(), user_id.clone());
        }
        tool
    }

    pub fn declaration(&self) -> Value {
        let mut declaration = json!({
            "type": "mcp",
            "server_label": self.name,
            "server_description": self.description,
            "server_url": self.server_url,
            "require_approval": self.require_approval,
        });
        if !self.headers.is_empty() {
            declaration["headers"] = json!(self.headers);
        }
        declaration
    }
}

/// Server labels only allow identifier characters.
fn server_label(name: &str) -> String {
    name.trim().replace('-', "_")
}
