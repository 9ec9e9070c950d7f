//! Font resolution for typed signatures
//!
//! A font comes either from the installed system fonts (looked up by family
//! name through fontdb) or from a font file on disk. Either way the result is a
//! [`ResolvedFont`] that owns the font bytes for the duration of one render.

use crate::FontError;
use fontdb::{Database, Family, Query, Source, Stretch, Style, Weight};
use std::path::{Path, PathBuf};

/// Where a font was resolved from, plus its owned data
#[derive(Debug, Clone)]
pub enum ResolvedFont {
    /// Installed font found by family name
    System {
        family: String,
        data: Vec<u8>,
        face_index: u32,
    },
    /// Font loaded from an explicit file path
    Loaded {
        path: PathBuf,
        data: Vec<u8>,
        face_index: u32,
    },
}

impl ResolvedFont {
    /// Get the raw font data
    pub fn data(&self) -> &[u8] {
        match self {
            Self::System { data, .. } | Self::Loaded { data, .. } => data,
        }
    }

    /// Face index within a font collection
    pub fn face_index(&self) -> u32 {
        match self {
            Self::System { face_index, .. } | Self::Loaded { face_index, .. } => *face_index,
        }
    }

    /// Human readable origin, used in logs and errors
    pub fn origin(&self) -> String {
        match self {
            Self::System { family, .. } => format!("system font '{}'", family),
            Self::Loaded { path, .. } => format!("font file {}", path.display()),
        }
    }

    /// Path to report when the font data turns out to be unusable
    pub(crate) fn error_path(&self) -> PathBuf {
        match self {
            Self::System { family, .. } => PathBuf::from(family),
            Self::Loaded { path, .. } => path.clone(),
        }
    }
}

/// Resolves font requests against a fontdb database
pub struct FontResolver {
    db: Database,
}

impl FontResolver {
    /// Create a resolver over all installed system fonts
    pub fn system() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        tracing::debug!("Loaded {} system font faces", db.len());
        Self { db }
    }

    /// Create a resolver over a prepared database
    pub fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Resolve `path` if given, otherwise the installed family `name`
    pub fn resolve(&self, name: &str, path: Option<&Path>) -> Result<ResolvedFont, FontError> {
        match path {
            Some(path) => load_font_file(path),
            None => self.resolve_installed(name),
        }
    }

    /// Look up an installed font by family name (regular weight, upright)
    pub fn resolve_installed(&self, name: &str) -> Result<ResolvedFont, FontError> {
        let query = Query {
            families: &[Family::Name(name)],
            weight: Weight::NORMAL,
            style: Style::Normal,
            stretch: Stretch::Normal,
        };

        let id = self.db.query(&query).ok_or_else(|| FontError::NotInstalled {
            name: name.to_string(),
        })?;

        let (src, face_index) = self.db.face_source(id).ok_or_else(|| FontError::NotInstalled {
            name: name.to_string(),
        })?;

        let data = match src {
            Source::File(path) => std::fs::read(&path).map_err(|e| FontError::InvalidFont {
                reason: format!("failed to read installed font: {}", e),
                path,
            })?,
            Source::Binary(arc) => arc.as_ref().as_ref().to_vec(),
            Source::SharedFile(_path, data) => data.as_ref().as_ref().to_vec(),
        };

        tracing::debug!("Resolved installed font '{}' (face {})", name, face_index);

        Ok(ResolvedFont::System {
            family: name.to_string(),
            data,
            face_index,
        })
    }

    /// Check if a font family is installed
    pub fn has_font(&self, name: &str) -> bool {
        let query = Query {
            families: &[Family::Name(name)],
            weight: Weight::NORMAL,
            style: Style::Normal,
            stretch: Stretch::Normal,
        };
        self.db.query(&query).is_some()
    }

    /// List available font families, sorted and deduplicated
    pub fn list_families(&self) -> Vec<String> {
        let mut families: Vec<String> = self
            .db
            .faces()
            .filter_map(|face| face.families.first().map(|(name, _)| name.clone()))
            .collect();

        families.sort();
        families.dedup();
        families
    }
}

impl Default for FontResolver {
    fn default() -> Self {
        Self::system()
    }
}

/// Load and validate a font file.
///
/// Only regular files count as existing; a directory is reported as
/// [`FontError::FileNotFound`].
pub fn load_font_file(path: &Path) -> Result<ResolvedFont, FontError> {
    if !path.is_file() {
        return Err(FontError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let data = std::fs::read(path).map_err(|e| FontError::InvalidFont {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    ttf_parser::Face::parse(&data, 0).map_err(|e| FontError::InvalidFont {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    tracing::debug!("Loaded font file {}", path.display());

    Ok(ResolvedFont::Loaded {
        path: path.to_path_buf(),
        data,
        face_index: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_resolver() -> FontResolver {
        FontResolver::with_database(Database::new())
    }

    #[test]
    fn test_missing_family_is_not_installed() {
        let err = empty_resolver().resolve("Journal", None).unwrap_err();
        assert!(matches!(err, FontError::NotInstalled { ref name } if name == "Journal"));
    }

    #[test]
    fn test_missing_file_is_file_not_found() {
        let path = std::env::temp_dir().join("sigpad-font-does-not-exist.ttf");
        let err = empty_resolver().resolve("Journal", Some(&path)).unwrap_err();
        assert!(matches!(err, FontError::FileNotFound { .. }));
    }

    #[test]
    fn test_directory_is_file_not_found() {
        let dir = std::env::temp_dir();
        let err = load_font_file(&dir).unwrap_err();
        assert!(matches!(err, FontError::FileNotFound { .. }));
    }

    #[test]
    fn test_garbage_file_is_invalid_font() {
        let path = std::env::temp_dir().join(format!(
            "sigpad-font-garbage-{}.ttf",
            std::process::id()
        ));
        std::fs::write(&path, b"definitely not a font").unwrap();
        let result = load_font_file(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(FontError::InvalidFont { .. })));
    }

    #[test]
    fn test_empty_database_lists_nothing() {
        let resolver = empty_resolver();
        assert!(resolver.list_families().is_empty());
        assert!(!resolver.has_font("Journal"));
    }
}
