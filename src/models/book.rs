//! Book model

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Book record
///
/// Every field defaults to an empty string, so a request body may omit any
/// of them or send `null`. Ids are supplied by callers and are not required
/// to be unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Book {
    #[serde(deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub author: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Book {
    pub fn new(id: impl Into<String>, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
        }
    }

    /// Records present when the process starts
    pub fn seed() -> Vec<Book> {
        vec![
            Book::new("1", "Book 1", "Author 1"),
            Book::new("2", "Book 2", "Author 2"),
        ]
    }
}
