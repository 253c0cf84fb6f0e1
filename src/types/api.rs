use serde::Deserialize;

/// One server-sent event of a streamed agent response.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum ResponseStreamEvent {
    #[serde(rename = "response.created")]
    Created { response: ResponseInfo },
    #[serde(rename = "response.in_progress")]
    InProgress { response: ResponseInfo },
    #[serde(rename = "response.output_item.added")]
    OutputItemAdded {
        #[serde(default)]
        output_index: usize,
        item: OutputItem,
    },
    #[serde(rename = "response.output_item.done")]
    OutputItemDone {
        #[serde(default)]
        output_index: usize,
        item: OutputItem,
    },
    #[serde(rename = "response.output_text.delta")]
    OutputTextDelta {
        #[serde(default)]
        item_id: Option<String>,
        #[serde(default)]
        delta: String,
    },
    #[serde(rename = "response.function_call_arguments.delta")]
    FunctionCallArgumentsDelta {
        item_id: String,
        #[serde(default)]
        delta: String,
    },
    #[serde(rename = "response.mcp_call_arguments.delta")]
    McpCallArgumentsDelta {
        item_id: String,
        #[serde(default)]
        delta: String,
    },
    #[serde(rename = "response.completed")]
    Completed { response: ResponseInfo },
    #[serde(rename = "response.incomplete")]
    Incomplete { response: ResponseInfo },
    #[serde(rename = "response.failed")]
    Failed { response: ResponseInfo },
    #[serde(rename = "error")]
    Error {
        #[serde(default)]
        code: Option<String>,
        #[serde(default)]
        message: String,
    },
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputItem {
    FunctionCall {
        #[serde(default)]
        id: Option<String>,
        call_id: String,
        name: String,
        #[serde(default)]
        arguments: String,
    },
    /// A call to a hosted MCP server; the service runs it and only reports it.
    McpCall {
        id: String,
        name: String,
        #[serde(default)]
        server_label: Option<String>,
        #[serde(default)]
        arguments: String,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error: Option<ResponseError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_event_type_is_tolerated() {
        let event: ResponseStreamEvent = serde_json::from_str(
            r#"{"type":"response.reasoning_summary_text.delta","delta":"hmm"}"#,
        )
        .expect("unknown events must still parse");
        assert!(matches!(event, ResponseStreamEvent::Unknown));
    }

    #[test]
    fn test_message_item_maps_to_other() {
        let event: ResponseStreamEvent = serde_json::from_str(
            r#"{"type":"response.output_item.added","output_index":0,"item":{"type":"message","id":"msg_1","role":"assistant","content":[]}}"#,
        )
        .expect("message item should parse");
        match event {
            ResponseStreamEvent::OutputItemAdded { item, .. } => {
                assert!(matches!(item, OutputItem::Other))
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_mcp_call_item_parses_without_call_id() {
        let event: ResponseStreamEvent = serde_json::from_str(
            r#"{"type":"response.output_item.added","output_index":1,"item":{"type":"mcp_call","id":"mcp_7","name":"get_products","server_label":"zava_customer_sales"}}"#,
        )
        .expect("mcp call item should parse");
        match event {
            ResponseStreamEvent::OutputItemAdded {
                output_index,
                item: OutputItem::McpCall {
                    id, server_label, ..
                },
            } => {
                assert_eq!(output_index, 1);
                assert_eq!(id, "mcp_7");
                assert_eq!(server_label.as_deref(), Some("zava_customer_sales"));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
