//! DTOs for link endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::api::dto::tag::{TagSummary, validate_tag_name};
use crate::application::services::CreateLink;
use crate::domain::entities::{Link, LinkPatch, Tag, TagAttachReport};
use crate::utils::alias_generator::ALIAS_PATTERN;
use crate::utils::url_validator::validate_target;

/// Request body for `POST /links`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// Destination URL (must be HTTP/HTTPS).
    #[validate(custom(function = validate_target))]
    pub target: String,

    /// Explicit alias. Generated when absent.
    #[validate(length(min = 1, max = 64))]
    #[validate(regex(path = "*ALIAS_PATTERN"))]
    pub alias: Option<String>,

    /// Length of the generated alias.
    #[validate(range(min = 3, max = 10))]
    pub length: Option<usize>,

    #[validate(length(max = 512))]
    pub description: Option<String>,

    /// Tag names to attach; each must be non-blank.
    #[serde(default)]
    #[validate(custom(function = validate_tag_names))]
    pub tags: Vec<String>,
}

fn validate_tag_names(tags: &[String]) -> Result<(), ValidationError> {
    tags.iter().try_for_each(|name| validate_tag_name(name))
}

impl CreateLinkRequest {
    pub fn into_input(self) -> CreateLink {
        CreateLink {
            user_id: 0,
            target: self.target,
            alias: self.alias,
            length: self.length,
            description: self.description,
            tags: self.tags,
        }
    }
}

/// Request body for `PATCH /links/{id}`.
///
/// All fields are optional; only provided fields are changed.
///
/// # `description` semantics
///
/// - **Absent** → leave unchanged
/// - **`null`** → clear
/// - **String** → set
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = validate_update_description))]
pub struct UpdateLinkRequest {
    #[validate(custom(function = validate_target))]
    pub target: Option<String>,

    #[validate(length(min = 1, max = 64))]
    #[validate(regex(path = "*ALIAS_PATTERN"))]
    pub alias: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
}

fn validate_update_description(req: &UpdateLinkRequest) -> Result<(), ValidationError> {
    match &req.description {
        Some(Some(d)) if d.chars().count() > 512 => Err(ValidationError::new("length")),
        _ => Ok(()),
    }
}

impl UpdateLinkRequest {
    pub fn into_patch(self) -> LinkPatch {
        LinkPatch {
            target: self.target,
            alias: self.alias,
            description: self.description,
        }
    }
}

/// JSON representation of a link with its tags.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub alias: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub tags: Vec<TagSummary>,
}

impl LinkResponse {
    pub fn new(link: Link, tags: Vec<Tag>) -> Self {
        Self {
            id: link.id,
            alias: link.alias,
            target: link.target,
            description: link.description,
            created_at: link.created_at,
            tags: tags.into_iter().map(TagSummary::from).collect(),
        }
    }
}

/// Response of `POST /links`: the link plus the per-tag outcome.
#[derive(Debug, Serialize)]
pub struct CreateLinkResponse {
    #[serde(flatten)]
    pub link: LinkResponse,
    pub tag_report: TagAttachReport,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create(body: serde_json::Value) -> CreateLinkRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_create_minimal_is_valid() {
        let req = create(json!({ "target": "https://example.com" }));
        assert!(req.validate().is_ok());
        assert!(req.tags.is_empty());
    }

    #[test]
    fn test_create_rejects_bad_target() {
        assert!(create(json!({ "target": "not a url" })).validate().is_err());
        assert!(create(json!({ "target": "ftp://example.com" })).validate().is_err());
    }

    #[test]
    fn test_create_rejects_target_with_newline() {
        let req = create(json!({ "target": "https://example.com/a\nb" }));
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("target"));

        let update: UpdateLinkRequest =
            serde_json::from_value(json!({ "target": " https://example.com" })).unwrap();
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_create_length_bounds() {
        let ok = create(json!({ "target": "https://example.com", "length": 3 }));
        assert!(ok.validate().is_ok());

        let low = create(json!({ "target": "https://example.com", "length": 2 }));
        let errors = low.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("length"));

        let high = create(json!({ "target": "https://example.com", "length": 11 }));
        assert!(high.validate().is_err());
    }

    #[test]
    fn test_create_rejects_long_description() {
        let req = create(json!({ "target": "https://example.com", "description": "d".repeat(513) }));
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("description"));
    }

    #[test]
    fn test_create_rejects_blank_tag() {
        let req = create(json!({ "target": "https://example.com", "tags": ["news", " "] }));
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("tags"));
    }

    #[test]
    fn test_create_rejects_bad_alias_chars() {
        let req = create(json!({ "target": "https://example.com", "alias": "a b" }));
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_description_semantics() {
        let absent: UpdateLinkRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(absent.into_patch().description, None);

        let cleared: UpdateLinkRequest =
            serde_json::from_value(json!({ "description": null })).unwrap();
        assert_eq!(cleared.into_patch().description, Some(None));

        let set: UpdateLinkRequest =
            serde_json::from_value(json!({ "description": "hello" })).unwrap();
        assert_eq!(set.into_patch().description, Some(Some("hello".to_string())));
    }

    #[test]
    fn test_update_rejects_long_description() {
        let req: UpdateLinkRequest =
            serde_json::from_value(json!({ "description": "d".repeat(513) })).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_link_response_omits_missing_description() {
        let now = Utc::now();
        let link = Link::new(
            1,
            0,
            "abc".into(),
            "https://example.com".into(),
            None,
            now,
            now,
            None,
        );
        let tag = Tag::new(2, "news".into(), now, now);

        let body = serde_json::to_value(LinkResponse::new(link, vec![tag])).unwrap();
        assert!(body.get("description").is_none());
        assert_eq!(body["tags"], json!([{ "id": 2, "name": "news" }]));
    }
}
