//! Stroke segments captured by a signature pad

use crate::Result;
use serde::{Deserialize, Serialize};

/// One straight stroke segment from `(lx, ly)` to `(mx, my)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineSegment {
    pub lx: i32,
    pub ly: i32,
    pub mx: i32,
    pub my: i32,
}

impl LineSegment {
    pub const fn new(lx: i32, ly: i32, mx: i32, my: i32) -> Self {
        Self { lx, ly, mx, my }
    }

    pub fn start(&self) -> (f32, f32) {
        (self.lx as f32, self.ly as f32)
    }

    pub fn end(&self) -> (f32, f32) {
        (self.mx as f32, self.my as f32)
    }
}

/// Parse the pad's JSON stroke list, keeping input order.
///
/// Blank input yields an empty list.
pub fn parse_segments(json: &str) -> Result<Vec<LineSegment>> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    let segments: Vec<LineSegment> = serde_json::from_str(json)?;
    tracing::debug!("Parsed {} signature segments", segments.len());
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RenderError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_preserves_order() {
        let json = r#"[{"lx":5,"ly":6,"mx":7,"my":8},{"lx":1,"ly":2,"mx":3,"my":4}]"#;
        assert_eq!(
            parse_segments(json).unwrap(),
            vec![LineSegment::new(5, 6, 7, 8), LineSegment::new(1, 2, 3, 4)]
        );
    }

    #[test]
    fn test_parse_blank_is_empty() {
        assert!(parse_segments("").unwrap().is_empty());
        assert!(parse_segments("  \n").unwrap().is_empty());
        assert!(parse_segments("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_ignores_unknown_fields() {
        let json = r#"[{"lx":1,"ly":2,"mx":3,"my":4,"pressure":0.5}]"#;
        assert_eq!(parse_segments(json).unwrap(), vec![LineSegment::new(1, 2, 3, 4)]);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in [
            "not json",
            r#"{"lx":1,"ly":2,"mx":3,"my":4}"#,
            r#"[{"lx":1,"ly":2,"mx":3}]"#,
            r#"[{"lx":"1","ly":2,"mx":3,"my":4}]"#,
        ] {
            assert!(
                matches!(parse_segments(bad), Err(RenderError::InvalidInput(_))),
                "accepted {bad}"
            );
        }
    }
}
