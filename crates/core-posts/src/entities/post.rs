use chrono::{DateTime, Utc};
use core_transpose::errors::IncompatibleSnafu;
use core_transpose::{ColumnarEntity, FieldDescriptor};
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

pub type PostId = i64;

// Post struct is used for storage and also as the service response shape
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Builds an unsaved post; the store assigns the id on add.
    #[must_use]
    pub fn new(title: String, content: String, author: String) -> Self {
        let created_at = Utc::now();
        Self {
            id: PostId::default(),
            title,
            content,
            author,
            created_at,
            updated_at: created_at,
        }
    }

    pub fn set_title(&mut self, title: String) {
        self.title = title;
    }

    pub fn set_content(&mut self, content: String) {
        self.content = content;
    }

    pub fn set_updated_at(&mut self, updated_at: Option<DateTime<Utc>>) {
        self.updated_at = updated_at.unwrap_or_else(Utc::now);
    }
}

// Columnar projection covers the response-facing fields; timestamps stay
// row-only.
const POST_FIELDS: &[FieldDescriptor<Post>] = &[
    FieldDescriptor {
        name: "id",
        read: |post| serde_json::to_value(post.id).ok(),
        write: |post, value| {
            post.id = serde_json::from_value(value).context(IncompatibleSnafu { field: "id" })?;
            Ok(())
        },
    },
    FieldDescriptor {
        name: "title",
        read: |post| serde_json::to_value(&post.title).ok(),
        write: |post, value| {
            post.title =
                serde_json::from_value(value).context(IncompatibleSnafu { field: "title" })?;
            Ok(())
        },
    },
    FieldDescriptor {
        name: "content",
        read: |post| serde_json::to_value(&post.content).ok(),
        write: |post, value| {
            post.content =
                serde_json::from_value(value).context(IncompatibleSnafu { field: "content" })?;
            Ok(())
        },
    },
    FieldDescriptor {
        name: "author",
        read: |post| serde_json::to_value(&post.author).ok(),
        write: |post, value| {
            post.author =
                serde_json::from_value(value).context(IncompatibleSnafu { field: "author" })?;
            Ok(())
        },
    },
];

impl ColumnarEntity for Post {
    fn fields() -> &'static [FieldDescriptor<Self>] {
        POST_FIELDS
    }
}
