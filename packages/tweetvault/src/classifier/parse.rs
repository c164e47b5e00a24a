//! Model reply parsing.
//!
//! Models often wrap the JSON in prose or code fences, so the reply is cut from the
//! first `{` to the last `}` before decoding.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{ClassifyError, ClassifyResult};

pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Default, Deserialize)]
pub struct ClassificationReply {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub items: Vec<ReplyItem>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub categories: Vec<String>,
}

/// Models emit `null` for empty arrays about as often as they omit the key.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
pub struct ReplyItem {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub summary: Option<String>,
}

impl ReplyItem {
    /// Ids come back as strings or numbers.
    pub fn id(&self) -> Option<String> {
        match &self.id {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Category with blanks mapped to [`UNCATEGORIZED`].
    pub fn category(&self) -> String {
        self.category
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(UNCATEGORIZED)
            .to_string()
    }
}

/// The span from the first `{` to the last `}`.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

pub fn parse_reply(text: &str) -> ClassifyResult<ClassificationReply> {
    let json = extract_json_object(text).ok_or(ClassifyError::NoJsonObject)?;
    Ok(serde_json::from_str(json)?)
}
