use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// A single expenditure line item. Entries carry no id; they are addressed by
/// their position inside the owning [`DayBucket`](super::DayBucket).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Entry {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub recipient: String,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub comment: String,
}

impl Entry {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        recipient: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            recipient: recipient.into(),
            amount,
            comment: String::new(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
