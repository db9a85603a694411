use std::fmt;
use std::sync::Arc;

use crate::domain::link_name::LinkName;
use crate::domain::value::EntityKind;
use crate::error::DomainError;
use crate::ports::CategoryRepository;

/// Id of the seeded default category.
pub const UNCATEGORISED_ID: i32 = 1;
/// Display name of the seeded default category.
pub const UNCATEGORISED_NAME: &str = "Uncategorised";
/// Link name of the seeded default category.
pub const UNCATEGORISED_LINK_NAME: &str = "uncategorised";

/// Category entity - one node of the blog taxonomy tree.
///
/// Categories compare and hash by value over id, name, link name and parent.
/// The parent is a shared handle, so many categories can point at the same
/// parent and comparing them walks the parent chain by value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Category {
    id: i32,
    name: Option<String>,
    link_name: LinkName,
    parent: Option<Arc<Category>>,
}

impl EntityKind for Category {
    const ENTITY_TYPE: &'static str = "Category";
}

impl Category {
    /// Create a category with explicit link text.
    ///
    /// The link text is normalized; pass `None` to get the fallback link name.
    pub fn new(
        name: impl Into<String>,
        link_text: Option<&str>,
        parent: Option<Arc<Category>>,
    ) -> Self {
        Self {
            id: 0,
            name: Some(name.into()),
            link_name: LinkName::new(link_text),
            parent,
        }
    }

    /// Create a category whose link name is derived from its name.
    pub fn from_name(name: impl Into<String>, parent: Option<Arc<Category>>) -> Self {
        let name = name.into();
        let link_name = LinkName::from_name(&name);
        Self {
            id: 0,
            name: Some(name),
            link_name,
            parent,
        }
    }

    /// The seed row for the default category.
    pub fn uncategorised_seed() -> Self {
        Self::from_name(UNCATEGORISED_NAME, None).with_id(UNCATEGORISED_ID)
    }

    /// Look up the persisted default category.
    ///
    /// Fails with [`DomainError::UncategorisedMissing`] when storage was never
    /// seeded.
    pub async fn uncategorised<R>(repo: &R) -> Result<Self, DomainError>
    where
        R: CategoryRepository + ?Sized,
    {
        repo.find_by_link_name(UNCATEGORISED_LINK_NAME)
            .await?
            .ok_or(DomainError::UncategorisedMissing)
    }

    #[must_use]
    pub fn with_id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn link_name(&self) -> &LinkName {
        &self.link_name
    }

    pub fn parent(&self) -> Option<&Arc<Category>> {
        self.parent.as_ref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Replace the link name with the normalized form of `link_text`.
    pub fn set_link_name(&mut self, link_text: Option<&str>) {
        self.link_name = LinkName::new(link_text);
    }

    pub fn set_parent(&mut self, parent: Option<Arc<Category>>) {
        self.parent = parent;
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Check the fields storage requires.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.as_deref().is_none_or(|n| n.trim().is_empty()) {
            return Err(DomainError::Validation("category name cannot be empty".into()));
        }
        Ok(())
    }

    /// Walk up the tree, nearest parent first.
    pub fn ancestors(&self) -> impl Iterator<Item = &Category> {
        std::iter::successors(self.parent.as_deref(), |c| c.parent.as_deref())
    }

    /// Link names from the root category down to this one.
    pub fn path(&self) -> Vec<&str> {
        let mut segments: Vec<&str> = self.ancestors().map(|c| c.link_name.as_str()).collect();
        segments.reverse();
        segments.push(self.link_name.as_str());
        segments
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.as_deref().unwrap_or_default())
    }
}
