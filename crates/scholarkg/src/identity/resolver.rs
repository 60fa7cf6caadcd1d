//! Author / reviewer class membership.
//!
//! The schema makes `reviewer` a subclass of `author`, but at runtime every
//! author key lives in exactly one of the two groups: a key that appears in
//! the review table is a reviewer, every other known author key is an
//! author. Membership is decided once from the full tables, before any node
//! or edge is asserted, and is only read afterwards.

use indexmap::IndexSet;

use super::minter::{Identifier, IdentifierMinter, IdentityIndex};
use crate::error::{Result, ScholarError};
use crate::vocab::EntityClass;

/// Classify an author key given the set of keys that wrote a review.
pub fn classify(author_key: &str, review_keys: &IndexSet<String>) -> EntityClass {
    if review_keys.contains(author_key.trim()) {
        EntityClass::Reviewer
    } else {
        EntityClass::Author
    }
}

/// The run's partition of author keys into authors and reviewers.
#[derive(Debug, Clone, Default)]
pub struct Membership {
    reviewers: IndexSet<String>,
    authors: IndexSet<String>,
}

impl Membership {
    /// Build the partition from the author table's keys and the review
    /// table's author keys. Both keep first-seen order.
    pub fn new<'a, A, R>(author_keys: A, review_keys: R) -> Self
    where
        A: IntoIterator<Item = &'a str>,
        R: IntoIterator<Item = &'a str>,
    {
        let reviewers: IndexSet<String> = review_keys
            .into_iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        let authors: IndexSet<String> = author_keys
            .into_iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty() && classify(k, &reviewers) == EntityClass::Author)
            .collect();

        Self { reviewers, authors }
    }

    /// Class of a known author key, or `None` if the key is unknown.
    pub fn classify(&self, key: &str) -> Option<EntityClass> {
        match classify(key, &self.reviewers) {
            EntityClass::Reviewer => Some(EntityClass::Reviewer),
            _ if self.authors.contains(key.trim()) => Some(EntityClass::Author),
            _ => None,
        }
    }

    /// Class of an author key referenced from `table`.
    ///
    /// A key known to neither group means the source tables disagree with
    /// each other, which aborts the run.
    pub fn resolve(&self, key: &str, table: &str) -> Result<EntityClass> {
        self.classify(key)
            .ok_or_else(|| ScholarError::UnresolvedMembership {
                key: key.trim().to_string(),
                table: table.to_string(),
            })
    }

    /// Distinct reviewer keys in first-seen order.
    pub fn reviewers(&self) -> &IndexSet<String> {
        &self.reviewers
    }

    /// Distinct author keys that are not reviewers, in first-seen order.
    pub fn authors(&self) -> &IndexSet<String> {
        &self.authors
    }
}

/// Minted author and reviewer identities plus the membership that decides
/// which of the two an author key points to.
#[derive(Debug, Clone)]
pub struct AuthorRoles {
    membership: Membership,
    authors: IdentityIndex,
    reviewers: IdentityIndex,
}

impl AuthorRoles {
    /// Mint author identifiers for `author_rows` (the author table's key
    /// column, reviewers included) and reviewer identifiers for the
    /// distinct reviewer keys.
    ///
    /// Author rows whose key is a reviewer get no author identifier: those
    /// people exist once, as reviewers.
    pub fn new<'a, I>(membership: Membership, author_rows: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let author_keys: Vec<Option<&str>> = author_rows
            .into_iter()
            .map(|k| k.filter(|k| membership.classify(k) == Some(EntityClass::Author)))
            .collect();
        let authors = IdentifierMinter::new(EntityClass::Author).mint(author_keys);
        let reviewers = IdentifierMinter::new(EntityClass::Reviewer)
            .mint(membership.reviewers().iter().map(|k| Some(k.as_str())));

        Self {
            membership,
            authors,
            reviewers,
        }
    }

    pub fn membership(&self) -> &Membership {
        &self.membership
    }

    /// Identities minted for author table rows.
    pub fn authors(&self) -> &IdentityIndex {
        &self.authors
    }

    /// Identities minted for distinct reviewer keys.
    pub fn reviewers(&self) -> &IdentityIndex {
        &self.reviewers
    }

    /// Identifiers for an author key referenced from `table`, after
    /// substituting the reviewer class where it applies.
    pub fn lookup(&self, key: &str, table: &str) -> Result<Vec<&Identifier>> {
        Ok(match self.membership.resolve(key, table)? {
            EntityClass::Reviewer => self.reviewers.lookup(key),
            _ => self.authors.lookup(key),
        })
    }
}
