//! Tag Model
//!
//! Tags are owned by the backend. The client keeps read-only copies and
//! normalizes the wire shape (which mixes `snake_case` and `camelCase`)
//! through [`TagWire`] before anything else sees it.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::TagError;

/// What kind of entity a tag can be attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagType {
    Product,
    Option,
    Item,
}

impl TagType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Option => "option",
            Self::Item => "item",
        }
    }
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TagType {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "product" => Ok(Self::Product),
            "option" => Ok(Self::Option),
            "item" => Ok(Self::Item),
            other => Err(TagError::UnknownType(other.to_string())),
        }
    }
}

/// Tag entity
///
/// Deserializes through [`TagWire`], so a `Tag` nested anywhere in a backend
/// payload is normalized the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TagWire", rename_all = "camelCase")]
pub struct Tag {
    pub id: i64,
    pub name: String,
    /// Background color (hex)
    pub color: String,
    /// Foreground color (hex)
    pub text_color: Option<String>,
    #[serde(rename = "type")]
    pub tag_type: TagType,
    pub visible: bool,
    /// Sort key, lower first
    pub priority: Option<i32>,
    /// Percentage
    #[serde(serialize_with = "rust_decimal::serde::float_option::serialize")]
    pub discount: Option<Decimal>,
    /// Entities carrying this tag cannot be selected by customers
    pub disable_selection: bool,
    pub is_recommended: bool,
}

impl Tag {
    /// Whether the tag may be attached to entities of `kind`
    pub fn applies_to(&self, kind: TagType) -> bool {
        self.tag_type == kind
    }

    /// Display order: priority ascending (unset last), then name, then id
    pub fn display_cmp(&self, other: &Self) -> Ordering {
        match (self.priority, other.priority) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
        .then_with(|| self.name.cmp(&other.name))
        .then_with(|| self.id.cmp(&other.id))
    }
}

/// Tags of `kind` the customer-facing menu shows, in display order
pub fn visible_tags(tags: &[Tag], kind: TagType) -> Vec<&Tag> {
    let mut out: Vec<&Tag> = tags
        .iter()
        .filter(|t| t.visible && t.applies_to(kind))
        .collect();
    out.sort_by(|a, b| a.display_cmp(b));
    out
}

/// Tag as the backend sends it.
///
/// Field casing is inconsistent across endpoints, so every multi-word field
/// accepts both spellings. Only [`TryFrom<TagWire>`] turns it into a [`Tag`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagWire {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub color: Option<String>,
    #[serde(alias = "textColor")]
    pub text_color: Option<String>,
    #[serde(rename = "type", alias = "tag_type", alias = "tagType")]
    pub tag_type: Option<String>,
    pub visible: Option<bool>,
    pub priority: Option<i32>,
    #[serde(with = "rust_decimal::serde::float_option", default)]
    pub discount: Option<Decimal>,
    #[serde(alias = "disableSelection")]
    pub disable_selection: Option<bool>,
    #[serde(alias = "isRecommended")]
    pub is_recommended: Option<bool>,
}

const DEFAULT_TAG_COLOR: &str = "#000000";

impl TryFrom<TagWire> for Tag {
    type Error = TagError;

    fn try_from(wire: TagWire) -> Result<Self, Self::Error> {
        let id = wire.id.ok_or(TagError::MissingField("id"))?;
        let name = wire
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or(TagError::MissingField("name"))?;
        let tag_type = wire
            .tag_type
            .as_deref()
            .ok_or(TagError::MissingField("type"))?
            .parse()?;

        Ok(Self {
            id,
            name,
            color: wire
                .color
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_TAG_COLOR.to_string()),
            text_color: wire.text_color.filter(|c| !c.is_empty()),
            tag_type,
            visible: wire.visible.unwrap_or(true),
            priority: wire.priority,
            discount: wire.discount,
            disable_selection: wire.disable_selection.unwrap_or(false),
            is_recommended: wire.is_recommended.unwrap_or(false),
        })
    }
}

/// Create tag payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagCreate {
    pub name: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(rename = "type")]
    pub tag_type: TagType,
    pub visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub discount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_selection: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_recommended: Option<bool>,
}

/// Update tag payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub discount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_selection: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_recommended: Option<bool>,
}
