//! Entity classes of the bibliographic schema.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A class declared by the schema. Every minted identifier belongs to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityClass {
    Author,
    /// An author who has written at least one review.
    Reviewer,
    Paper,
    Review,
    Affiliation,
    Keyword,
    Venue,
    Journal,
    Conference,
    Compilation,
    Volume,
    Edition,
    Community,
}

impl EntityClass {
    /// All declared classes, in schema order.
    pub const ALL: [EntityClass; 13] = [
        EntityClass::Author,
        EntityClass::Reviewer,
        EntityClass::Paper,
        EntityClass::Review,
        EntityClass::Affiliation,
        EntityClass::Keyword,
        EntityClass::Venue,
        EntityClass::Journal,
        EntityClass::Conference,
        EntityClass::Compilation,
        EntityClass::Volume,
        EntityClass::Edition,
        EntityClass::Community,
    ];

    /// Class tag, used both as the class's local name and as the prefix of
    /// its instances' identifiers.
    pub fn tag(&self) -> &'static str {
        match self {
            EntityClass::Author => "author",
            EntityClass::Reviewer => "reviewer",
            EntityClass::Paper => "paper",
            EntityClass::Review => "review",
            EntityClass::Affiliation => "affiliation",
            EntityClass::Keyword => "keyword",
            EntityClass::Venue => "venue",
            EntityClass::Journal => "journal",
            EntityClass::Conference => "conference",
            EntityClass::Compilation => "compilation",
            EntityClass::Volume => "volume",
            EntityClass::Edition => "edition",
            EntityClass::Community => "community",
        }
    }

    /// Direct superclass, if the schema declares one.
    pub fn superclass(&self) -> Option<EntityClass> {
        match self {
            EntityClass::Reviewer => Some(EntityClass::Author),
            EntityClass::Journal | EntityClass::Conference => Some(EntityClass::Venue),
            EntityClass::Volume | EntityClass::Edition => Some(EntityClass::Compilation),
            _ => None,
        }
    }

    /// Whether `self` is `other` or one of its subclasses.
    pub fn is_a(&self, other: EntityClass) -> bool {
        let mut current = Some(*self);
        while let Some(class) = current {
            if class == other {
                return true;
            }
            current = class.superclass();
        }
        false
    }
}

impl fmt::Display for EntityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
