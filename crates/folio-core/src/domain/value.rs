//! Value-semantics helpers for receivers that may be absent.
//!
//! Entities compare and hash by value through their derived impls. These
//! helpers cover the case where the receiver itself is optional: an absent
//! receiver is a [`DomainError::MissingReference`], while an absent comparand
//! simply compares unequal.

use std::collections::hash_map::DefaultHasher;
use std::fmt::Display;
use std::hash::{Hash, Hasher};

use crate::error::DomainError;

/// Names an entity type in error reports.
pub trait EntityKind {
    const ENTITY_TYPE: &'static str;
}

fn require<T: EntityKind>(receiver: Option<&T>) -> Result<&T, DomainError> {
    receiver.ok_or(DomainError::MissingReference {
        entity_type: T::ENTITY_TYPE,
    })
}

/// Value equality with an optional receiver and comparand.
pub fn checked_eq<T>(receiver: Option<&T>, other: Option<&T>) -> Result<bool, DomainError>
where
    T: EntityKind + PartialEq,
{
    let receiver = require(receiver)?;
    Ok(other.is_some_and(|other| receiver == other))
}

/// Hash code of an optional receiver.
pub fn checked_hash<T>(receiver: Option<&T>) -> Result<u64, DomainError>
where
    T: EntityKind + Hash,
{
    let receiver = require(receiver)?;
    let mut hasher = DefaultHasher::new();
    receiver.hash(&mut hasher);
    Ok(hasher.finish())
}

/// Display text of an optional receiver.
pub fn checked_to_string<T>(receiver: Option<&T>) -> Result<String, DomainError>
where
    T: EntityKind + Display,
{
    require(receiver).map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Post};

    #[test]
    fn test_absent_receiver_is_missing_reference() {
        let other = Category::from_name("Rust", None);

        let err = checked_eq(None, Some(&other)).unwrap_err();
        assert!(matches!(
            err,
            DomainError::MissingReference {
                entity_type: "Category"
            }
        ));

        let err = checked_hash::<Post>(None).unwrap_err();
        assert!(matches!(
            err,
            DomainError::MissingReference { entity_type: "Post" }
        ));

        assert!(checked_to_string::<Category>(None).is_err());
    }

    #[test]
    fn test_absent_comparand_is_unequal() {
        let category = Category::from_name("Rust", None);
        assert!(!checked_eq(Some(&category), None).unwrap());
        assert!(checked_eq(Some(&category), Some(&category.clone())).unwrap());
    }

    #[test]
    fn test_checked_hash_matches_for_equal_values() {
        let a = Category::from_name("Rust", None).with_id(3);
        let b = Category::from_name("Rust", None).with_id(3);
        assert_eq!(
            checked_hash(Some(&a)).unwrap(),
            checked_hash(Some(&b)).unwrap()
        );
    }

    #[test]
    fn test_checked_to_string_uses_display() {
        let category = Category::from_name("Rust Notes", None);
        assert_eq!(checked_to_string(Some(&category)).unwrap(), "Rust Notes");
    }
}
