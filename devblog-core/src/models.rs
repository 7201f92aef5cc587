use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

// ==================== Значения по умолчанию ====================

pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_DATE: &str = "No date";
pub const DEFAULT_CONTENT: &str = "No content";

/// Status values (compared case-insensitively) that mark a post as not yet published.
const UNPUBLISHED_STATUSES: [&str; 4] = ["draft", "coming-soon", "coming_soon", "comingsoon"];

// ==================== Идентификатор поста ====================

/// Integer post identifier.
///
/// The remote data is hand-edited, so `"42"` and `42` both decode to the
/// same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PostId(i64);

impl PostId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i64 {
        self.0
    }

    /// Reads an id out of hand-edited JSON: integers, integral floats and
    /// numeric strings. Anything else is not an id.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            }),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
        .map(Self)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for PostId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPostId(pub String);

impl fmt::Display for InvalidPostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid post id: {:?}", self.0)
    }
}

impl std::error::Error for InvalidPostId {}

impl FromStr for PostId {
    type Err = InvalidPostId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| InvalidPostId(s.to_string()))
    }
}

impl Serialize for PostId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0)
    }
}

// ==================== Модель поста ====================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<PostId>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub author: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub link: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_status",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,
    #[serde(
        rename = "comingSoon",
        default,
        deserialize_with = "lenient_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub coming_soon: Option<bool>,
}

impl Post {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().filter(|t| !t.is_empty()).unwrap_or(DEFAULT_TITLE)
    }

    pub fn display_date(&self) -> &str {
        self.date.as_deref().filter(|d| !d.is_empty()).unwrap_or(DEFAULT_DATE)
    }

    pub fn display_content(&self) -> &str {
        self.content.as_deref().filter(|c| !c.is_empty()).unwrap_or(DEFAULT_CONTENT)
    }

    /// Author to show next to the date, `None` when missing or blank.
    pub fn display_author(&self) -> Option<&str> {
        self.author.as_deref().filter(|a| !a.trim().is_empty())
    }

    /// Marked as draft / coming soon by either `status` or `comingSoon`.
    pub fn is_unpublished(&self) -> bool {
        if self.coming_soon == Some(true) {
            return true;
        }
        self.status.as_deref().is_some_and(|status| {
            let status = status.trim();
            UNPUBLISHED_STATUSES
                .iter()
                .any(|known| status.eq_ignore_ascii_case(known))
        })
    }
}

// Hand-edited fields with the wrong JSON type fall back to "absent"
// instead of dropping the whole post.

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<PostId>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let id = PostId::from_json(&value);
    if id.is_none() && !value.is_null() {
        log::warn!("Ignoring unusable post id {}", value);
    }
    Ok(id)
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    if value.is_array() || value.is_object() {
        log::warn!("Ignoring non-text post field {}", value);
        return Ok(None);
    }
    Ok(scalar_text(value))
}

fn lenient_status<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        Value::Null => Ok(None),
        other => {
            log::warn!("Ignoring post status {}", other);
            Ok(None)
        }
    }
}

fn lenient_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let flag = match &value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s.trim().eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.trim().eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    };
    if flag.is_none() && !value.is_null() {
        log::warn!("Ignoring comingSoon value {}", value);
    }
    Ok(flag)
}

fn lenient_tags<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items.into_iter().filter_map(scalar_text).collect()),
        Value::Null => Ok(Vec::new()),
        other => {
            log::warn!("Ignoring post tags {}", other);
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_accepts_number_and_numeric_string() {
        let a: Post = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        let b: Post = serde_json::from_str(r#"{"id": " 7 "}"#).unwrap();
        assert_eq!(a.id, Some(PostId::new(7)));
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn unusable_id_becomes_absent() {
        for raw in [r#""intro""#, "1.5", "true", "[1]"] {
            let post: Post =
                serde_json::from_str(&format!(r#"{{"id": {raw}, "title": "kept"}}"#)).unwrap();
            assert_eq!(post.id, None, "id {raw}");
            assert_eq!(post.display_title(), "kept");
        }
        assert!("12x".parse::<PostId>().is_err());
    }

    #[test]
    fn integral_float_id_is_accepted() {
        let post: Post = serde_json::from_str(r#"{"id": 3.0}"#).unwrap();
        assert_eq!(post.id, Some(PostId::new(3)));
    }

    #[test]
    fn wrongly_typed_fields_fall_back() {
        let post: Post = serde_json::from_str(
            r#"{"title": 2024, "author": {"name": "x"}, "tags": "rust",
                "comingSoon": "TRUE", "status": ["draft"]}"#,
        )
        .unwrap();
        assert_eq!(post.display_title(), "2024");
        assert_eq!(post.display_author(), None);
        assert!(post.tags.is_empty());
        assert_eq!(post.coming_soon, Some(true));
        assert_eq!(post.status, None);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let post: Post = serde_json::from_str(r#"{"tags": null}"#).unwrap();
        assert_eq!(post.display_title(), "Untitled");
        assert_eq!(post.display_date(), "No date");
        assert_eq!(post.display_content(), "No content");
        assert_eq!(post.display_author(), None);
        assert!(post.tags.is_empty());
    }

    #[test]
    fn blank_author_is_hidden() {
        let post = Post {
            author: Some("   ".into()),
            ..Post::default()
        };
        assert_eq!(post.display_author(), None);
    }

    #[test]
    fn unpublished_from_status_or_flag() {
        let by_flag: Post = serde_json::from_str(r#"{"comingSoon": true}"#).unwrap();
        let by_status: Post = serde_json::from_str(r#"{"status": "Coming-Soon"}"#).unwrap();
        let published: Post = serde_json::from_str(r#"{"status": "published"}"#).unwrap();

        assert!(by_flag.is_unpublished());
        assert!(by_status.is_unpublished());
        assert!(!published.is_unpublished());
        assert!(!Post::default().is_unpublished());
    }

    #[test]
    fn serialization_skips_absent_fields() {
        let post = Post {
            id: Some(PostId::new(1)),
            title: Some("Hello".into()),
            ..Post::default()
        };
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "title": "Hello", "tags": []}));
    }
}
