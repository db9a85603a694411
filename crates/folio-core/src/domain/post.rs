use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::category::Category;
use crate::domain::link_name::LinkName;
use crate::domain::today;
use crate::domain::value::EntityKind;
use crate::error::DomainError;
use crate::ports::CategoryRepository;

/// Longest description a post may carry, in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 280;

/// Post entity - a blog entry filed under a category.
///
/// Creation and last-modification times are stamped with the current date
/// when the post is constructed. Posts compare and hash by value over every
/// field, with the category compared through its own value equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Post {
    id: i32,
    title: Option<String>,
    link: LinkName,
    creation_time: DateTime<Utc>,
    publish_time: DateTime<Utc>,
    last_modification_time: DateTime<Utc>,
    category: Option<Arc<Category>>,
    content: Option<String>,
    description: Option<String>,
}

impl EntityKind for Post {
    const ENTITY_TYPE: &'static str = "Post";
}

impl Post {
    /// Create a post with every field given.
    ///
    /// `link` is normalized, which leaves an already valid link untouched.
    pub fn new(
        title: impl Into<String>,
        link: &str,
        publish_time: DateTime<Utc>,
        category: Option<Arc<Category>>,
        content: Option<String>,
        description: Option<String>,
    ) -> Self {
        let today = today();
        Self {
            id: 0,
            title: Some(title.into()),
            link: LinkName::from_name(link),
            creation_time: today,
            publish_time,
            last_modification_time: today,
            category,
            content,
            description,
        }
    }

    /// Create a post published today, with its link derived from the title.
    pub fn with_category(
        title: impl Into<String>,
        category: Arc<Category>,
        content: impl Into<String>,
    ) -> Self {
        let title = title.into();
        let link = LinkName::from_name(&title);
        Self::new(
            title,
            link.as_str(),
            today(),
            Some(category),
            Some(content.into()),
            None,
        )
    }

    /// Create a post filed under the persisted default category.
    pub async fn uncategorised<R>(
        title: impl Into<String>,
        content: impl Into<String>,
        categories: &R,
    ) -> Result<Self, DomainError>
    where
        R: CategoryRepository + ?Sized,
    {
        let category = Category::uncategorised(categories).await?;
        Ok(Self::with_category(title, Arc::new(category), content))
    }

    #[must_use]
    pub fn with_id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }

    /// Restore the timestamps a stored post was created with.
    #[must_use]
    pub fn with_stored_timestamps(
        mut self,
        creation_time: DateTime<Utc>,
        last_modification_time: DateTime<Utc>,
    ) -> Self {
        self.creation_time = creation_time;
        self.last_modification_time = last_modification_time;
        self
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn link(&self) -> &LinkName {
        &self.link
    }

    pub fn creation_time(&self) -> DateTime<Utc> {
        self.creation_time
    }

    pub fn publish_time(&self) -> DateTime<Utc> {
        self.publish_time
    }

    pub fn last_modification_time(&self) -> DateTime<Utc> {
        self.last_modification_time
    }

    pub fn category(&self) -> Option<&Arc<Category>> {
        self.category.as_ref()
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Replace the link with the normalized form of `link`.
    pub fn set_link(&mut self, link: &str) {
        self.link = LinkName::from_name(link);
    }

    pub fn set_publish_time(&mut self, publish_time: DateTime<Utc>) {
        self.publish_time = publish_time;
    }

    pub fn set_category(&mut self, category: Arc<Category>) {
        self.category = Some(category);
    }

    pub fn set_content(&mut self, content: Option<String>) {
        self.content = content;
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    /// Whether the post is visible at `now`.
    ///
    /// Both instants must be in the same reference frame.
    pub fn is_published(&self, now: DateTime<Utc>) -> bool {
        now >= self.publish_time
    }

    /// Check the fields storage requires.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.as_deref().is_none_or(|t| t.trim().is_empty()) {
            return Err(DomainError::Validation("post title cannot be empty".into()));
        }
        if self.category.is_none() {
            return Err(DomainError::Validation(
                "post must belong to a category".into(),
            ));
        }
        if let Some(description) = &self.description {
            let length = description.chars().count();
            if length > MAX_DESCRIPTION_LENGTH {
                return Err(DomainError::Validation(format!(
                    "post description is {length} characters, the limit is {MAX_DESCRIPTION_LENGTH}"
                )));
            }
        }
        Ok(())
    }

    /// Site path of the post: `/blog/{category path}/{link}`.
    pub fn permalink(&self) -> String {
        let mut path = String::from("/blog");
        if let Some(category) = &self.category {
            for segment in category.path() {
                path.push('/');
                path.push_str(segment);
            }
        }
        path.push('/');
        path.push_str(self.link.as_str());
        path
    }
}

impl Default for Post {
    fn default() -> Self {
        let today = today();
        Self {
            id: 0,
            title: None,
            link: LinkName::default(),
            creation_time: today,
            publish_time: today,
            last_modification_time: today,
            category: None,
            content: None,
            description: None,
        }
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title.as_deref().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::domain::UNCATEGORISED_ID;
    use crate::testing::{StubCategoryRepository, hash_of};

    fn test_category() -> Arc<Category> {
        Arc::new(Category::from_name("Test Category", None))
    }

    #[test]
    fn test_full_constructor() {
        let publish_time = Utc.with_ymd_and_hms(2019, 3, 1, 0, 0, 0).unwrap();
        let category = test_category();

        let post = Post::new(
            "Test Post",
            "test-post",
            publish_time,
            Some(category.clone()),
            Some("<p>Test Content</p>".to_owned()),
            Some("Test Post description".to_owned()),
        );

        assert_eq!(post.title(), Some("Test Post"));
        assert_eq!(post.link().as_str(), "test-post");
        assert_eq!(post.creation_time(), today());
        assert_eq!(post.last_modification_time(), today());
        assert_eq!(post.publish_time(), publish_time);
        assert_eq!(post.category(), Some(&category));
        assert_eq!(post.content(), Some("<p>Test Content</p>"));
        assert_eq!(post.description(), Some("Test Post description"));
    }

    #[test]
    fn test_full_constructor_normalizes_link() {
        let post = Post::new("Title", "Not A Slug!", Utc::now(), None, None, None);
        assert_eq!(post.link().as_str(), "not-a-slug");
    }

    #[test]
    fn test_category_constructor() {
        let category = test_category();

        let post = Post::with_category("Test Post", category.clone(), "<p>Test Content</p>");

        assert_eq!(post.title(), Some("Test Post"));
        assert_eq!(post.link().as_str(), "test-post");
        assert_eq!(post.creation_time(), today());
        assert_eq!(post.last_modification_time(), today());
        assert_eq!(post.publish_time(), today());
        assert_eq!(post.category(), Some(&category));
        assert_eq!(post.content(), Some("<p>Test Content</p>"));
        assert!(post.description().is_none());
    }

    #[test]
    fn test_minimal_constructor() {
        let post = Post::default().with_id(12);

        assert_eq!(post.id(), 12);
        assert!(post.title().is_none());
        assert!(post.content().is_none());
        assert_eq!(post.link().as_str(), "_");
        assert!(post.category().is_none());
        assert_eq!(post.creation_time(), today());
    }

    #[tokio::test]
    async fn test_uncategorised_constructor() {
        let repo = StubCategoryRepository::seeded();

        let post = Post::uncategorised("Hello, World!", "<p>hi</p>", &repo)
            .await
            .unwrap();

        let uncategorised = Category::uncategorised(&repo).await.unwrap();
        assert_eq!(post.category(), Some(&Arc::new(uncategorised)));
        assert_eq!(post.category().unwrap().id(), UNCATEGORISED_ID);
        assert_eq!(post.link().as_str(), "hello-world");
    }

    #[tokio::test]
    async fn test_uncategorised_constructor_without_seed() {
        let repo = StubCategoryRepository::empty();

        let err = Post::uncategorised("Title", "Body", &repo).await.unwrap_err();

        assert!(matches!(err, DomainError::UncategorisedMissing));
    }

    #[test]
    fn test_is_published() {
        let now = Utc::now();
        let mut post = Post::new(
            "Another Test Post",
            "another-test-post",
            now - Duration::days(1),
            None,
            None,
            None,
        );

        assert!(post.is_published(now));

        post.set_publish_time(post.publish_time() + Duration::days(2));
        assert!(!post.is_published(now));
    }

    #[test]
    fn test_is_published_at_exact_publish_time() {
        let publish_time = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let post = Post::new("Boundary", "boundary", publish_time, None, None, None);

        assert!(post.is_published(publish_time));
        assert!(!post.is_published(publish_time - Duration::nanoseconds(1)));
    }

    #[test]
    fn test_validate() {
        let mut post = Post::with_category("Title", test_category(), "Body");
        assert!(post.validate().is_ok());

        post.set_description(Some("x".repeat(MAX_DESCRIPTION_LENGTH)));
        assert!(post.validate().is_ok());

        post.set_description(Some("x".repeat(MAX_DESCRIPTION_LENGTH + 1)));
        assert!(matches!(post.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_validate_counts_characters_not_bytes() {
        let mut post = Post::with_category("Title", test_category(), "Body");
        post.set_description(Some("é".repeat(MAX_DESCRIPTION_LENGTH)));
        assert!(post.validate().is_ok());
    }

    #[test]
    fn test_validate_requires_title_and_category() {
        assert!(Post::default().validate().is_err());

        let post = Post::new("Title", "title", Utc::now(), None, None, None);
        assert!(matches!(post.validate(), Err(DomainError::Validation(_))));

        let post = Post::with_category("   ", test_category(), "Body");
        assert!(post.validate().is_err());
    }

    #[test]
    fn test_permalink_follows_category_path() {
        let root = Arc::new(Category::from_name("Programming", None));
        let child = Arc::new(Category::from_name("Rust", Some(root)));
        let post = Post::with_category("Borrowing Explained", child, "Body");

        assert_eq!(post.permalink(), "/blog/programming/rust/borrowing-explained");
        assert_eq!(Post::default().permalink(), "/blog/_");
    }

    #[test]
    fn test_display_is_title() {
        let post = Post::with_category("My Title", test_category(), "Body");
        assert_eq!(post.to_string(), "My Title");
    }

    fn post_pool() -> Vec<Post> {
        let fixed = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let categories = [
            None,
            Some(test_category()),
            Some(Arc::new(Category::from_name("Other", None))),
        ];
        let mut pool = Vec::new();
        for id in [0, 5] {
            for title in ["First", "first"] {
                for publish_time in [fixed, fixed + Duration::hours(1)] {
                    for category in &categories {
                        for description in [None, Some("Summary".to_owned())] {
                            let post = Post::new(
                                title,
                                title,
                                publish_time,
                                category.clone(),
                                Some("Body".to_owned()),
                                description,
                            )
                            .with_id(id)
                            .with_stored_timestamps(fixed, fixed);
                            pool.push(post);
                        }
                    }
                }
            }
        }
        pool.push(Post::default().with_stored_timestamps(fixed, fixed));
        pool
    }

    #[test]
    fn test_equality_laws_over_generated_triples() {
        let pool = post_pool();
        let mirror = post_pool();

        for (x, x_copy) in pool.iter().zip(&mirror) {
            assert_eq!(x, x);
            assert_eq!(x, x_copy);
            assert_eq!(hash_of(x), hash_of(x_copy));

            for y in &pool {
                assert_eq!(x == y, y == x);
                if x == y {
                    assert_eq!(hash_of(x), hash_of(y));
                }
                for z in &pool {
                    if x == y && y == z {
                        assert_eq!(x, z);
                    }
                }
            }
        }
    }

    #[test]
    fn test_equality_delegates_to_category_value() {
        let a = Post::with_category("Post", test_category(), "Body");
        let b = Post::with_category("Post", test_category(), "Body");
        assert_eq!(a, b);

        let c = Post::with_category(
            "Post",
            Arc::new(Category::from_name("Test Category", None).with_id(9)),
            "Body",
        );
        assert_ne!(a, c);
    }
}
