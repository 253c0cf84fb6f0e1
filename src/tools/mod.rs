mod mcp;

pub use mcp::McpTool;
