//! Image descriptors as served by the CMS and their materialized form.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Named size category selecting which pre-rendered variant to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SizeTier {
    /// Smallest variant, typically 156px on the long edge.
    Thumbnail,
    /// Small variant.
    Small,
    /// Medium variant.
    #[default]
    Medium,
    /// Large variant.
    Large,
}

impl SizeTier {
    /// All tiers, smallest first.
    pub const ALL: [Self; 4] = [Self::Thumbnail, Self::Small, Self::Medium, Self::Large];

    /// Returns the tier name as used in CMS payloads and filenames.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Thumbnail => "thumbnail",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    /// Parses a tier name, falling back to [`SizeTier::Medium`] for anything
    /// unrecognized.
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl fmt::Display for SizeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known size tier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown size tier: {0}")]
pub struct UnknownTier(pub String);

impl FromStr for SizeTier {
    type Err = UnknownTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "thumbnail" => Ok(Self::Thumbnail),
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            _ => Err(UnknownTier(s.to_string())),
        }
    }
}

/// A single pre-rendered size variant of an uploaded image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ImageFormat {
    /// Path of the variant, relative to the CMS origin.
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Size in kilobytes, as reported by the CMS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_in_bytes: Option<u64>,
}

impl ImageFormat {
    /// Creates a variant with only a URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

/// Size variants keyed by tier. Every tier is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct ImageFormats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<ImageFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small: Option<ImageFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<ImageFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large: Option<ImageFormat>,
}

impl ImageFormats {
    /// Returns the variant for a tier, if the CMS rendered one.
    #[must_use]
    pub const fn get(&self, tier: SizeTier) -> Option<&ImageFormat> {
        match tier {
            SizeTier::Thumbnail => self.thumbnail.as_ref(),
            SizeTier::Small => self.small.as_ref(),
            SizeTier::Medium => self.medium.as_ref(),
            SizeTier::Large => self.large.as_ref(),
        }
    }

    /// Sets the variant for a tier.
    pub fn set(&mut self, tier: SizeTier, format: ImageFormat) {
        let slot = match tier {
            SizeTier::Thumbnail => &mut self.thumbnail,
            SizeTier::Small => &mut self.small,
            SizeTier::Medium => &mut self.medium,
            SizeTier::Large => &mut self.large,
        };
        *slot = Some(format);
    }
}

/// Remote image record as returned by the CMS media library.
///
/// Only `url` is required. Upload-provider specific data is kept as an
/// opaque value since nothing here interprets it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ImageDescriptor {
    /// Path of the original upload, relative to the CMS origin.
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formats: Option<ImageFormats>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(
        default,
        rename = "provider_metadata",
        skip_serializing_if = "Option::is_none"
    )]
    pub provider_metadata: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

impl ImageDescriptor {
    /// Creates a descriptor with only the original URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Sets the alternative text.
    #[must_use]
    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alternative_text = Some(alt.into());
        self
    }

    /// Adds a size variant.
    #[must_use]
    pub fn with_format(mut self, tier: SizeTier, url: impl Into<String>) -> Self {
        self.formats
            .get_or_insert_with(ImageFormats::default)
            .set(tier, ImageFormat::new(url));
        self
    }

    /// Returns the variant for `tier`, if any.
    #[must_use]
    pub fn format(&self, tier: SizeTier) -> Option<&ImageFormat> {
        self.formats.as_ref().and_then(|f| f.get(tier))
    }

    /// Path of the image to fetch for `tier`.
    ///
    /// Falls back to the original upload when the tier was not rendered,
    /// trading size fidelity for availability.
    #[must_use]
    pub fn source_path(&self, tier: SizeTier) -> &str {
        self.format(tier).map_or(self.url.as_str(), |f| f.url.as_str())
    }

    /// Alternative text, empty when the CMS has none.
    #[must_use]
    pub fn alt_text(&self) -> &str {
        self.alternative_text.as_deref().unwrap_or_default()
    }
}

/// Renderer-facing image reference.
///
/// `src` is either a root-relative local asset path or, when materialization
/// failed, the absolute remote URL. Both are valid `<img src>` values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterializedImage {
    /// Image source for the page.
    pub src: String,
    /// Alternative text for the page.
    pub alt: String,
}

impl MaterializedImage {
    /// Creates a new materialized image.
    #[must_use]
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
        }
    }

    /// Result for a missing descriptor.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}
