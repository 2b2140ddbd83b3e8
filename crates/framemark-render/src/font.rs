//! Label font loading and text measurement.

use crate::renderer::{RenderError, RenderResult};
use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use rusttype::{Font, Scale, point};
use std::fmt;

/// Extent of a label at a given pixel size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    pub width: f32,
    /// Height above the baseline.
    pub ascent: f32,
    /// Depth below the baseline, positive.
    pub descent: f32,
}

/// Font used for measurement labels and text annotations.
///
/// Without a face, text is measured with fixed proportions and no glyphs are
/// painted.
#[derive(Clone)]
pub struct LabelFont {
    face: Option<Font<'static>>,
}

impl LabelFont {
    pub fn from_bytes(bytes: Vec<u8>) -> RenderResult<Self> {
        let face = Font::try_from_vec(bytes).ok_or(RenderError::InvalidFont)?;
        Ok(Self { face: Some(face) })
    }

    /// First sans-serif face installed on the system.
    pub fn system_default() -> Option<Self> {
        let mut db = Database::new();
        db.load_system_fonts();

        let families = [Family::SansSerif];
        let query = Query {
            families: &families,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = db.query(&query)?;
        let face = db
            .with_face_data(id, |data, index| Font::try_from_vec_and_index(data.to_vec(), index))??;
        Some(Self { face: Some(face) })
    }

    /// Metrics-only font.
    pub fn fallback() -> Self {
        Self { face: None }
    }

    pub fn has_glyphs(&self) -> bool {
        self.face.is_some()
    }

    pub(crate) fn face(&self) -> Option<&Font<'static>> {
        self.face.as_ref()
    }

    pub fn measure(&self, text: &str, px: f32) -> TextMetrics {
        let Some(font) = &self.face else {
            return TextMetrics {
                width: text.chars().count() as f32 * px * 0.55,
                ascent: px * 0.75,
                descent: px * 0.25,
            };
        };

        let scale = Scale::uniform(px);
        let v_metrics = font.v_metrics(scale);
        let width = font
            .layout(text, scale, point(0.0, 0.0))
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0);

        TextMetrics {
            width,
            ascent: v_metrics.ascent,
            descent: -v_metrics.descent,
        }
    }
}

impl fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelFont")
            .field("has_glyphs", &self.has_glyphs())
            .finish()
    }
}
