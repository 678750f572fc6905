//! Deterministic local filenames and absolute URLs for CMS images.
//!
//! The filename is the whole cache key: the same (source path, tier) pair
//! always lands on the same file, so an existing file means the image has
//! already been materialized.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::entities::SizeTier;

/// How local filenames are derived from source paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NamingStrategy {
    /// `{stem}_{tier}{ext}` from the last path segment.
    ///
    /// Two uploads sharing a filename under different paths collide.
    #[default]
    Legacy,
    /// `{stem}_{tier}_{digest}{ext}` where `digest` is derived from the full
    /// source path.
    Hashed,
}

impl std::fmt::Display for NamingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Legacy => write!(f, "legacy"),
            Self::Hashed => write!(f, "hashed"),
        }
    }
}

/// Returns the last path segment of a URL or path, ignoring any query string
/// or fragment.
#[must_use]
pub fn last_segment(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.rsplit('/').next().unwrap_or_default()
}

/// Splits a filename into stem and extension (extension keeps its dot).
///
/// A leading dot does not start an extension, so `.hidden` has no extension.
#[must_use]
pub fn split_extension(filename: &str) -> (&str, &str) {
    match filename.rfind('.') {
        Some(idx) if idx > 0 => filename.split_at(idx),
        _ => (filename, ""),
    }
}

/// Derives the local asset filename for `source_path` at `tier`.
#[must_use]
pub fn asset_filename(source_path: &str, tier: SizeTier, strategy: NamingStrategy) -> String {
    let (stem, ext) = split_extension(last_segment(source_path));

    match strategy {
        NamingStrategy::Legacy => format!("{stem}_{tier}{ext}"),
        NamingStrategy::Hashed => {
            let digest = Sha256::digest(source_path.as_bytes());
            format!("{stem}_{tier}_{}{ext}", hex::encode(&digest[..8]))
        }
    }
}

/// Builds the absolute fetch URL for a CMS path.
///
/// Paths that are already absolute (external upload providers) are returned
/// unchanged.
#[must_use]
pub fn absolute_url(origin: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    if origin.ends_with('/') && path.starts_with('/') {
        return format!("{}{path}", origin.trim_end_matches('/'));
    }
    format!("{origin}{path}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("/img/a_med.png", SizeTier::Medium, "a_med_medium.png" ; "medium_variant")]
    #[test_case("/uploads/thumbnail_hero_1a2b.jpg", SizeTier::Thumbnail, "thumbnail_hero_1a2b_thumbnail.jpg" ; "thumbnail_variant")]
    #[test_case("/uploads/archive.tar.gz", SizeTier::Large, "archive.tar_large.gz" ; "last_dot_wins")]
    #[test_case("/uploads/noext", SizeTier::Small, "noext_small" ; "no_extension")]
    #[test_case("/uploads/.hidden", SizeTier::Small, ".hidden_small" ; "leading_dot")]
    #[test_case("/uploads/a.png?updated_at=123", SizeTier::Medium, "a_medium.png" ; "query_ignored")]
    #[test_case("https://bucket.example/x/y/photo.webp", SizeTier::Large, "photo_large.webp" ; "absolute_provider_url")]
    fn test_legacy_filename(path: &str, tier: SizeTier, expected: &str) {
        assert_eq!(asset_filename(path, tier, NamingStrategy::Legacy), expected);
    }

    #[test]
    fn test_same_input_same_name() {
        for tier in SizeTier::ALL {
            assert_eq!(
                asset_filename("/uploads/a.png", tier, NamingStrategy::Hashed),
                asset_filename("/uploads/a.png", tier, NamingStrategy::Hashed)
            );
        }
    }

    #[test]
    fn test_hashed_names_separate_same_filename() {
        let first = asset_filename("/one/a.png", SizeTier::Medium, NamingStrategy::Hashed);
        let second = asset_filename("/two/a.png", SizeTier::Medium, NamingStrategy::Hashed);

        assert_ne!(first, second);
        assert!(first.starts_with("a_medium_"));
        assert!(first.ends_with(".png"));
        assert_eq!(first.len(), "a_medium_".len() + 16 + ".png".len());
    }

    #[test]
    fn test_legacy_names_collide_across_paths() {
        assert_eq!(
            asset_filename("/one/a.png", SizeTier::Medium, NamingStrategy::Legacy),
            asset_filename("/two/a.png", SizeTier::Medium, NamingStrategy::Legacy)
        );
    }

    #[test_case("http://cms:1337", "/uploads/a.png", "http://cms:1337/uploads/a.png" ; "plain")]
    #[test_case("http://cms:1337/", "/uploads/a.png", "http://cms:1337/uploads/a.png" ; "trailing_slash")]
    #[test_case("http://cms:1337", "https://cdn.example/a.png", "https://cdn.example/a.png" ; "already_absolute")]
    fn test_absolute_url(origin: &str, path: &str, expected: &str) {
        assert_eq!(absolute_url(origin, path), expected);
    }
}
