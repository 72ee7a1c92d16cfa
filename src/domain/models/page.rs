use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, types::Json};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Home,
    Contact,
    Hotel,
}

#[derive(Debug, Error)]
#[error("unknown page kind '{0}'")]
pub struct UnknownPageKind(pub String);

impl PageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageKind::Home => "home",
            PageKind::Contact => "contact",
            PageKind::Hotel => "hotel",
        }
    }
}

impl FromStr for PageKind {
    type Err = UnknownPageKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "home" => Ok(PageKind::Home),
            "contact" => Ok(PageKind::Contact),
            "hotel" => Ok(PageKind::Hotel),
            other => Err(UnknownPageKind(other.to_string())),
        }
    }
}

impl TryFrom<String> for PageKind {
    type Error = UnknownPageKind;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageBlock {
    pub url: String,
    #[serde(default)]
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionedImage {
    pub url: String,
    #[serde(default)]
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoBlock {
    pub url: String,
    #[serde(default)]
    pub caption: String,
}

/// One entry of a page body, stored as `{"type": "...", "value": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ContentBlock {
    Heading(String),
    /// Rich text authored by administrators, rendered as-is.
    Paragraph(String),
    Image(ImageBlock),
    ImageWithCaption(CaptionedImage),
    EmbeddedVideo(VideoBlock),
    Quote(String),
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Page {
    pub id: String,
    pub parent_id: Option<String>,
    pub slug: String,
    pub title: String,
    #[sqlx(try_from = "String")]
    pub kind: PageKind,
    pub hotel_id: Option<String>,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub body: Json<Vec<ContentBlock>>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewPageParams {
    pub parent_id: Option<String>,
    pub slug: String,
    pub title: String,
    pub kind: PageKind,
    pub hotel_id: Option<String>,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub body: Vec<ContentBlock>,
    pub sort_order: i32,
}

impl Page {
    pub fn new(params: NewPageParams, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            parent_id: params.parent_id,
            slug: params.slug,
            title: params.title,
            kind: params.kind,
            hotel_id: params.hotel_id,
            address: params.address,
            phone: params.phone,
            email: params.email,
            body: Json(params.body),
            sort_order: params.sort_order,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blocks_use_type_value_layout() {
        let raw = json!([
            {"type": "heading", "value": "Welcome!"},
            {"type": "paragraph", "value": "<p>Hello</p>"},
            {"type": "image_with_caption", "value": {"url": "/media/a.jpg", "caption": "Lobby"}},
            {"type": "embedded_video", "value": {"url": "https://youtu.be/dQw4w9WgXcQ"}},
        ]);

        let blocks: Vec<ContentBlock> = serde_json::from_value(raw).unwrap();
        assert_eq!(blocks[0], ContentBlock::Heading("Welcome!".into()));
        assert_eq!(
            blocks[2],
            ContentBlock::ImageWithCaption(CaptionedImage { url: "/media/a.jpg".into(), caption: "Lobby".into() })
        );
        assert_eq!(
            blocks[3],
            ContentBlock::EmbeddedVideo(VideoBlock { url: "https://youtu.be/dQw4w9WgXcQ".into(), caption: String::new() })
        );
    }

    #[test]
    fn test_unknown_block_type_is_rejected() {
        let raw = json!([{"type": "carousel", "value": []}]);
        assert!(serde_json::from_value::<Vec<ContentBlock>>(raw).is_err());
    }
}
