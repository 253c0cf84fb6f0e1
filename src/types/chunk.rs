use serde::{Deserialize, Serialize};

/// An item embedded in a streamed chunk. Only function calls carry meaning
/// for the console loop; every other kind lands in `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentItem {
    FunctionCall { call_id: String, name: String },
    Text { text: String },
    #[serde(other)]
    Unknown,
}

/// One unit of a streamed agent response, handled in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    #[serde(default)]
    pub contents: Vec<ContentItem>,
    #[serde(default)]
    pub text: Option<String>,
}

impl Chunk {
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            contents: vec![ContentItem::Text { text: text.clone() }],
            text: Some(text),
        }
    }

    pub fn function_call(call_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            contents: vec![ContentItem::FunctionCall {
                call_id: call_id.into(),
                name: name.into(),
            }],
            text: None,
        }
    }

    pub fn with_item(mut self, item: ContentItem) -> Self {
        self.contents.push(item);
        self
    }

    /// `(call_id, name)` of every function-call item, in item order.
    pub fn function_calls(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.contents.iter().filter_map(|item| match item {
            ContentItem::FunctionCall { call_id, name } => Some((call_id.as_str(), name.as_str())),
            _ => None,
        })
    }

    pub fn text_fragment(&self) -> Option<&str> {
        self.text.as_deref().filter(|text| !text.is_empty())
    }
}
