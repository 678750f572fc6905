//! Page payloads served by the CMS content API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::image::ImageDescriptor;

/// Inline text run inside a rich-text block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextNode {
    /// Raw text.
    pub text: String,
    /// Bold marker.
    #[serde(default)]
    pub bold: bool,
    /// Italic marker.
    #[serde(default)]
    pub italic: bool,
}

/// List numbering style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListFormat {
    /// Numbered list.
    Ordered,
    /// Bulleted list.
    #[default]
    Unordered,
}

/// Children of block nodes. Only text runs are expected but unknown inline
/// node types (links, code) are tolerated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum InlineNode {
    /// Plain text run.
    Text(TextNode),
    /// Any inline node type this crate does not model.
    #[serde(other)]
    Unsupported,
}

/// Single `<li>` of a list block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "list-item")]
pub struct ListItemNode {
    /// Inline content.
    #[serde(default)]
    pub children: Vec<InlineNode>,
}

/// Top-level block of a rich-text field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RichTextNode {
    /// Paragraph.
    Paragraph {
        /// Inline content.
        #[serde(default)]
        children: Vec<InlineNode>,
    },
    /// Heading of a given level (1-6).
    Heading {
        /// Inline content.
        #[serde(default)]
        children: Vec<InlineNode>,
        /// Heading level.
        level: u8,
    },
    /// Ordered or unordered list.
    List {
        /// Numbering style.
        #[serde(default)]
        format: ListFormat,
        /// List items.
        #[serde(default)]
        children: Vec<ListItemNode>,
    },
    /// Block types this crate does not model (quotes, code, images).
    #[serde(other)]
    Unsupported,
}

impl RichTextNode {
    /// Concatenates the plain text of this block, list items separated by
    /// newlines.
    #[must_use]
    pub fn plain_text(&self) -> String {
        match self {
            Self::Paragraph { children } | Self::Heading { children, .. } => inline_text(children),
            Self::List { children, .. } => children
                .iter()
                .map(|item| inline_text(&item.children))
                .collect::<Vec<_>>()
                .join("\n"),
            Self::Unsupported => String::new(),
        }
    }
}

fn inline_text(children: &[InlineNode]) -> String {
    children
        .iter()
        .filter_map(|node| match node {
            InlineNode::Text(text) => Some(text.text.as_str()),
            InlineNode::Unsupported => None,
        })
        .collect()
}

/// Base URL for Google Drive file previews.
const GOOGLE_DRIVE_VIEW_BASE: &str = "https://drive.google.com/file/d";

/// Entry of the home page link collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkItem {
    /// Component id.
    pub id: u64,
    /// Link label.
    #[serde(rename = "LinkTitle", default)]
    pub link_title: String,
    /// Whether the link points at a Google Drive file.
    #[serde(rename = "googleDrive", default)]
    pub google_drive: bool,
    /// Plain URL.
    #[serde(rename = "linkUrl", default)]
    pub link_url: Option<String>,
    /// Google Drive file id.
    #[serde(rename = "googleDriveID", default)]
    pub google_drive_id: Option<String>,
}

impl LinkItem {
    /// Returns the URL the link should point at.
    ///
    /// Drive links resolve to the file preview page; otherwise `linkUrl` is
    /// used. Blank values count as absent.
    #[must_use]
    pub fn href(&self) -> Option<String> {
        let non_blank = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        };

        if self.google_drive
            && let Some(id) = non_blank(&self.google_drive_id)
        {
            return Some(format!("{GOOGLE_DRIVE_VIEW_BASE}/{id}/view"));
        }
        non_blank(&self.link_url)
    }
}

/// Home page single type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct HomePage {
    pub id: u64,
    pub document_id: String,
    #[serde(default)]
    pub logo: Vec<RichTextNode>,
    #[serde(default)]
    pub hero_text: Vec<RichTextNode>,
    #[serde(default)]
    pub hero_image: Option<ImageDescriptor>,
    #[serde(default)]
    pub link_collection: Vec<LinkItem>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    /// Opaque; localized variants are not consumed.
    #[serde(default)]
    pub localizations: Vec<serde_json::Value>,
}

/// About page single type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct AboutPage {
    pub id: u64,
    pub document_id: String,
    #[serde(default)]
    pub about_text: Vec<RichTextNode>,
    #[serde(default)]
    pub portfolio_image: Option<ImageDescriptor>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub localizations: Vec<serde_json::Value>,
}

/// Envelope around every single-type response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentResponse<T> {
    /// Page data.
    pub data: T,
    /// Pagination and other response metadata, not interpreted.
    #[serde(default)]
    pub meta: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::SizeTier;

    const HOME_JSON: &str = r#"{
        "data": {
            "id": 2,
            "documentId": "h0me",
            "logo": [{"type": "paragraph", "children": [{"type": "text", "text": "Ana ", "bold": true}, {"type": "text", "text": "Ruiz"}]}],
            "heroText": [
                {"type": "heading", "level": 1, "children": [{"type": "text", "text": "Painter"}]},
                {"type": "quote", "children": []}
            ],
            "createdAt": "2025-02-01T10:00:00.000Z",
            "updatedAt": "2025-02-01T10:00:00.000Z",
            "publishedAt": "2025-02-01T10:00:00.000Z",
            "locale": "en",
            "heroImage": {
                "url": "/uploads/hero.jpg",
                "alternativeText": "Hero",
                "formats": {"medium": {"url": "/uploads/medium_hero.jpg"}},
                "provider_metadata": null
            },
            "linkCollection": [
                {"id": 1, "LinkTitle": "CV", "googleDrive": true, "linkUrl": null, "googleDriveID": "1AbC"},
                {"id": 2, "LinkTitle": "Shop", "googleDrive": false, "linkUrl": "https://shop.example", "googleDriveID": null}
            ],
            "localizations": []
        },
        "meta": {}
    }"#;

    #[test]
    fn test_parse_home_page() {
        let response: ContentResponse<HomePage> = serde_json::from_str(HOME_JSON).unwrap();
        let page = response.data;

        assert_eq!(page.document_id, "h0me");
        assert_eq!(page.logo[0].plain_text(), "Ana Ruiz");
        assert_eq!(page.hero_text[0].plain_text(), "Painter");
        assert_eq!(page.hero_text[1], RichTextNode::Unsupported);
        assert_eq!(
            page.hero_image.as_ref().map(|i| i.source_path(SizeTier::Medium)),
            Some("/uploads/medium_hero.jpg")
        );
        assert_eq!(page.link_collection.len(), 2);
    }

    #[test]
    fn test_parse_about_page_with_list() {
        let json = r#"{
            "data": {
                "id": 1,
                "documentId": "ab0ut",
                "aboutText": [
                    {"type": "list", "format": "ordered", "children": [
                        {"type": "list-item", "children": [{"type": "text", "text": "one"}]},
                        {"type": "list-item", "children": [{"type": "text", "text": "two"}]}
                    ]}
                ],
                "portfolioImage": {"url": "/uploads/me.png"},
                "localizations": [{"id": 9}]
            },
            "meta": {"note": 1}
        }"#;

        let response: ContentResponse<AboutPage> = serde_json::from_str(json).unwrap();

        assert_eq!(response.data.about_text[0].plain_text(), "one\ntwo");
        assert!(response.data.portfolio_image.is_some());
        assert_eq!(response.meta.len(), 1);
    }

    #[test]
    fn test_link_href_prefers_drive() {
        let link = LinkItem {
            id: 1,
            link_title: "CV".into(),
            google_drive: true,
            link_url: Some("https://fallback.example".into()),
            google_drive_id: Some("1AbC".into()),
        };
        assert_eq!(
            link.href().as_deref(),
            Some("https://drive.google.com/file/d/1AbC/view")
        );
    }

    #[test]
    fn test_link_href_falls_back_to_url() {
        let link = LinkItem {
            google_drive: true,
            link_url: Some("https://shop.example".into()),
            google_drive_id: Some("  ".into()),
            ..LinkItem::default()
        };
        assert_eq!(link.href().as_deref(), Some("https://shop.example"));
        assert_eq!(LinkItem::default().href(), None);
    }
}
