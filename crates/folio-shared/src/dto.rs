//! Data Transfer Objects - response types for the blog API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use folio_core::domain::{Category, Post};

/// A category as exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub link_name: String,
    /// Link names from the root category down to this one.
    pub path: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i32>,
}

impl From<&Category> for CategoryResponse {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id(),
            name: category.to_string(),
            link_name: category.link_name().to_string(),
            path: category.path().into_iter().map(str::to_owned).collect(),
            parent_id: category.parent().map(|parent| parent.id()),
        }
    }
}

/// A post in list views: everything but the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: i32,
    pub title: String,
    pub link: String,
    pub permalink: String,
    pub publish_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl From<&Post> for PostSummary {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id(),
            title: post.to_string(),
            link: post.link().to_string(),
            permalink: post.permalink(),
            publish_time: post.publish_time(),
            description: post.description().map(str::to_owned),
            category: post.category().map(|c| c.link_name().to_string()),
        }
    }
}

/// A single post with its content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i32,
    pub title: String,
    pub link: String,
    pub permalink: String,
    pub creation_time: DateTime<Utc>,
    pub publish_time: DateTime<Utc>,
    pub last_modification_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&Post> for PostResponse {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id(),
            title: post.to_string(),
            link: post.link().to_string(),
            permalink: post.permalink(),
            creation_time: post.creation_time(),
            publish_time: post.publish_time(),
            last_modification_time: post.last_modification_time(),
            category: post.category().map(|c| CategoryResponse::from(&**c)),
            content: post.content().map(str::to_owned),
            description: post.description().map(str::to_owned),
        }
    }
}

/// Health check payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    /// `postgres` or `memory`.
    pub storage: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_category_response_includes_path() {
        let parent = Arc::new(Category::from_name("Programming", None).with_id(2));
        let category = Category::from_name("Rust", Some(parent)).with_id(3);

        let response = CategoryResponse::from(&category);

        assert_eq!(response.name, "Rust");
        assert_eq!(response.path, vec!["programming", "rust"]);
        assert_eq!(response.parent_id, Some(2));
    }

    #[test]
    fn test_post_summary_omits_empty_fields() {
        let category = Arc::new(Category::uncategorised_seed());
        let post = Post::with_category("Hello World", category, "Body").with_id(9);

        let json = serde_json::to_value(PostSummary::from(&post)).unwrap();

        assert_eq!(json["link"], "hello-world");
        assert_eq!(json["permalink"], "/blog/uncategorised/hello-world");
        assert_eq!(json["category"], "uncategorised");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_post_response_carries_content() {
        let category = Arc::new(Category::uncategorised_seed());
        let post = Post::with_category("Hello World", category, "Body");

        let response = PostResponse::from(&post);

        assert_eq!(response.content.as_deref(), Some("Body"));
        assert_eq!(
            response.category.map(|c| c.link_name),
            Some("uncategorised".to_string())
        );
    }
}
