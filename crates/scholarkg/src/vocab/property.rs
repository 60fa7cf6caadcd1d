//! Datatype and object properties of the bibliographic schema.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::class::EntityClass;

/// XML Schema datatype of a literal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiteralType {
    String,
    Integer,
    Boolean,
}

impl LiteralType {
    /// Local name in the `xsd:` namespace.
    pub fn xsd_name(&self) -> &'static str {
        match self {
            LiteralType::String => "string",
            LiteralType::Integer => "integer",
            LiteralType::Boolean => "boolean",
        }
    }

    /// Canonical lexical form of `raw`, or `None` if it does not fit the type.
    ///
    /// Integers written with a trailing `.0` (as spreadsheet exports do)
    /// are accepted. Booleans accept `true/false`, `1/0` and `yes/no`.
    pub fn normalize(&self, raw: &str) -> Option<String> {
        let raw = raw.trim();
        match self {
            LiteralType::String => Some(raw.to_string()),
            LiteralType::Integer => {
                let digits = raw.strip_suffix(".0").unwrap_or(raw);
                digits.parse::<i64>().ok().map(|n| n.to_string())
            }
            LiteralType::Boolean => parse_bool(raw).map(|b| b.to_string()),
        }
    }
}

/// Parse a boolean cell value.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" => Some(true),
        "false" | "f" | "0" | "no" | "n" => Some(false),
        _ => None,
    }
}

/// A property whose values are literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DatatypeProperty {
    NameAuthor,
    NamePaper,
    Doi,
    Abstract,
    Pages,
    Content,
    Approves,
    AffiliationType,
    NameAffiliation,
    NameKeyword,
    NameVenue,
    NameCompilation,
    Year,
    Location,
    NameCommunity,
}

impl DatatypeProperty {
    pub const ALL: [DatatypeProperty; 15] = [
        DatatypeProperty::NameAuthor,
        DatatypeProperty::NamePaper,
        DatatypeProperty::Doi,
        DatatypeProperty::Abstract,
        DatatypeProperty::Pages,
        DatatypeProperty::Content,
        DatatypeProperty::Approves,
        DatatypeProperty::AffiliationType,
        DatatypeProperty::NameAffiliation,
        DatatypeProperty::NameKeyword,
        DatatypeProperty::NameVenue,
        DatatypeProperty::NameCompilation,
        DatatypeProperty::Year,
        DatatypeProperty::Location,
        DatatypeProperty::NameCommunity,
    ];

    /// Local name in the base namespace.
    pub fn name(&self) -> &'static str {
        match self {
            DatatypeProperty::NameAuthor => "name_author",
            DatatypeProperty::NamePaper => "name_paper",
            DatatypeProperty::Doi => "DOI",
            DatatypeProperty::Abstract => "abstract",
            DatatypeProperty::Pages => "pages",
            DatatypeProperty::Content => "content",
            DatatypeProperty::Approves => "approves",
            DatatypeProperty::AffiliationType => "type",
            DatatypeProperty::NameAffiliation => "name_affiliation",
            DatatypeProperty::NameKeyword => "name_keyword",
            DatatypeProperty::NameVenue => "name_venue",
            DatatypeProperty::NameCompilation => "name_compilation",
            DatatypeProperty::Year => "year",
            DatatypeProperty::Location => "location",
            DatatypeProperty::NameCommunity => "name_community",
        }
    }

    pub fn domain(&self) -> EntityClass {
        match self {
            DatatypeProperty::NameAuthor => EntityClass::Author,
            DatatypeProperty::NamePaper
            | DatatypeProperty::Doi
            | DatatypeProperty::Abstract
            | DatatypeProperty::Pages => EntityClass::Paper,
            DatatypeProperty::Content | DatatypeProperty::Approves => EntityClass::Review,
            DatatypeProperty::AffiliationType | DatatypeProperty::NameAffiliation => {
                EntityClass::Affiliation
            }
            DatatypeProperty::NameKeyword => EntityClass::Keyword,
            DatatypeProperty::NameVenue => EntityClass::Venue,
            DatatypeProperty::NameCompilation | DatatypeProperty::Year => EntityClass::Compilation,
            DatatypeProperty::Location => EntityClass::Edition,
            DatatypeProperty::NameCommunity => EntityClass::Community,
        }
    }

    pub fn range(&self) -> LiteralType {
        match self {
            DatatypeProperty::Pages | DatatypeProperty::Year => LiteralType::Integer,
            DatatypeProperty::Approves => LiteralType::Boolean,
            _ => LiteralType::String,
        }
    }
}

impl fmt::Display for DatatypeProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A property relating two entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ObjectProperty {
    Writes,
    IsCorrespondingAuthor,
    WritesR,
    About,
    BelongsToA,
    RelatesTo,
    Cites,
    PublishedInC,
    PublishedInV,
    PublishedInE,
    BelongsToV,
    BelongsToJ,
    BelongsToC,
    InCommunity,
    CIn,
    JIn,
}

impl ObjectProperty {
    pub const ALL: [ObjectProperty; 16] = [
        ObjectProperty::Writes,
        ObjectProperty::IsCorrespondingAuthor,
        ObjectProperty::WritesR,
        ObjectProperty::About,
        ObjectProperty::BelongsToA,
        ObjectProperty::RelatesTo,
        ObjectProperty::Cites,
        ObjectProperty::PublishedInC,
        ObjectProperty::PublishedInV,
        ObjectProperty::PublishedInE,
        ObjectProperty::BelongsToV,
        ObjectProperty::BelongsToJ,
        ObjectProperty::BelongsToC,
        ObjectProperty::InCommunity,
        ObjectProperty::CIn,
        ObjectProperty::JIn,
    ];

    /// Local name in the base namespace.
    pub fn name(&self) -> &'static str {
        match self {
            ObjectProperty::Writes => "writes",
            ObjectProperty::IsCorrespondingAuthor => "is_corresponding_author",
            ObjectProperty::WritesR => "writes_r",
            ObjectProperty::About => "about",
            ObjectProperty::BelongsToA => "belongs_to_a",
            ObjectProperty::RelatesTo => "relates_to",
            ObjectProperty::Cites => "cites",
            ObjectProperty::PublishedInC => "published_in_c",
            ObjectProperty::PublishedInV => "published_in_v",
            ObjectProperty::PublishedInE => "published_in_e",
            ObjectProperty::BelongsToV => "belongs_to_v",
            ObjectProperty::BelongsToJ => "belongs_to_j",
            ObjectProperty::BelongsToC => "belongs_to_c",
            ObjectProperty::InCommunity => "in_community",
            ObjectProperty::CIn => "c_in",
            ObjectProperty::JIn => "j_in",
        }
    }

    pub fn domain(&self) -> EntityClass {
        match self {
            ObjectProperty::Writes
            | ObjectProperty::IsCorrespondingAuthor
            | ObjectProperty::BelongsToA => EntityClass::Author,
            ObjectProperty::WritesR => EntityClass::Reviewer,
            ObjectProperty::About => EntityClass::Review,
            ObjectProperty::RelatesTo
            | ObjectProperty::Cites
            | ObjectProperty::PublishedInC
            | ObjectProperty::PublishedInV
            | ObjectProperty::PublishedInE => EntityClass::Paper,
            ObjectProperty::BelongsToV => EntityClass::Compilation,
            ObjectProperty::BelongsToJ => EntityClass::Volume,
            ObjectProperty::BelongsToC => EntityClass::Edition,
            ObjectProperty::InCommunity => EntityClass::Venue,
            ObjectProperty::CIn => EntityClass::Conference,
            ObjectProperty::JIn => EntityClass::Journal,
        }
    }

    pub fn range(&self) -> EntityClass {
        match self {
            ObjectProperty::Writes
            | ObjectProperty::IsCorrespondingAuthor
            | ObjectProperty::About
            | ObjectProperty::Cites => EntityClass::Paper,
            ObjectProperty::WritesR => EntityClass::Review,
            ObjectProperty::BelongsToA => EntityClass::Affiliation,
            ObjectProperty::RelatesTo => EntityClass::Keyword,
            ObjectProperty::PublishedInC => EntityClass::Compilation,
            ObjectProperty::PublishedInV => EntityClass::Volume,
            ObjectProperty::PublishedInE => EntityClass::Edition,
            ObjectProperty::BelongsToV => EntityClass::Venue,
            ObjectProperty::BelongsToJ => EntityClass::Journal,
            ObjectProperty::BelongsToC => EntityClass::Conference,
            ObjectProperty::InCommunity | ObjectProperty::CIn | ObjectProperty::JIn => {
                EntityClass::Community
            }
        }
    }

    /// Direct super-property, if the schema declares one.
    pub fn super_property(&self) -> Option<ObjectProperty> {
        match self {
            ObjectProperty::IsCorrespondingAuthor => Some(ObjectProperty::Writes),
            ObjectProperty::PublishedInV | ObjectProperty::PublishedInE => {
                Some(ObjectProperty::PublishedInC)
            }
            ObjectProperty::BelongsToJ | ObjectProperty::BelongsToC => {
                Some(ObjectProperty::BelongsToV)
            }
            ObjectProperty::CIn | ObjectProperty::JIn => Some(ObjectProperty::InCommunity),
            _ => None,
        }
    }
}

impl fmt::Display for ObjectProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
