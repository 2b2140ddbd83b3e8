//! Text with an optional translucent backing box.

use crate::font::LabelFont;
use crate::options::RenderOptions;
use framemark_core::shapes::Rgb;
use rusttype::{Scale, point};
use tiny_skia::{Paint, Pixmap, Rect, Transform};

/// One label to draw. `anchor` is the left end of the text baseline.
pub(crate) struct Label<'a> {
    pub text: &'a str,
    pub anchor: (i32, i32),
    pub scale: f64,
    pub color: Rgb,
    pub background: bool,
    /// Glyph stroke weight in pixels; 1 draws the plain outline coverage.
    pub weight: u32,
}

/// Heaviest glyph weight honoured; thicker requests are clamped.
pub(crate) const MAX_GLYPH_WEIGHT: u32 = 16;

pub(crate) fn draw_label(
    pixmap: &mut Pixmap,
    font: &LabelFont,
    options: &RenderOptions,
    label: &Label<'_>,
) {
    let px = label.scale as f32 * options.font_px_per_scale;
    if label.text.is_empty() || px <= 0.0 {
        return;
    }
    let metrics = font.measure(label.text, px);
    let (x, y) = (label.anchor.0 as f32, label.anchor.1 as f32);

    if label.background {
        let pad = options.label_padding;
        let rect = Rect::from_ltrb(
            x - pad,
            y - metrics.ascent - pad,
            x + metrics.width + pad,
            y + metrics.descent + pad,
        );
        if let Some(rect) = rect {
            let mut paint = Paint::default();
            let alpha = (options.label_background_alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
            paint.set_color_rgba8(0, 0, 0, alpha);
            pixmap.fill_rect(rect, &paint, Transform::identity(), None);
        }
    }

    let Some(face) = font.face() else {
        return;
    };
    let weight = label.weight.clamp(1, MAX_GLYPH_WEIGHT) as i32;
    let (width, height) = (pixmap.width() as i32, pixmap.height() as i32);
    let data = pixmap.data_mut();
    for glyph in face.layout(label.text, Scale::uniform(px), point(x, y)) {
        let Some(bounds) = glyph.pixel_bounding_box() else {
            continue;
        };
        // Widened box covering every offset copy of the glyph.
        let spread = weight - 1;
        let (min_x, min_y) = (bounds.min.x - spread / 2, bounds.min.y - spread / 2);
        let (box_w, box_h) = (bounds.width() + spread, bounds.height() + spread);
        if !intersects(min_x, min_y, box_w, box_h, width, height) {
            continue;
        }

        // Max coverage over the offsets, so overlapping copies never darken twice.
        let mut coverage = vec![0.0f32; (box_w * box_h) as usize];
        glyph.draw(|gx, gy, c| {
            for dy in 0..weight {
                for dx in 0..weight {
                    let idx = ((gy as i32 + dy) * box_w + gx as i32 + dx) as usize;
                    coverage[idx] = coverage[idx].max(c);
                }
            }
        });

        for row in 0..box_h {
            let ty = min_y + row;
            if ty < 0 || ty >= height {
                continue;
            }
            for col in 0..box_w {
                let tx = min_x + col;
                if tx < 0 || tx >= width {
                    continue;
                }
                let c = coverage[(row * box_w + col) as usize];
                let idx = ((ty * width + tx) * 4) as usize;
                blend_over(&mut data[idx..idx + 4], label.color, c);
            }
        }
    }
}

/// Whether the box at (`x`, `y`) of size `w`×`h` touches a `width`×`height` image.
fn intersects(x: i32, y: i32, w: i32, h: i32, width: i32, height: i32) -> bool {
    w > 0 && h > 0 && x < width && y < height && x + w > 0 && y + h > 0
}

/// Source-over of an opaque colour at `coverage` onto one premultiplied RGBA pixel.
fn blend_over(pixel: &mut [u8], color: Rgb, coverage: f32) {
    let a = coverage.clamp(0.0, 1.0);
    if a <= 0.0 {
        return;
    }
    let inv = 1.0 - a;
    let src = [color.r, color.g, color.b, 255];
    for (dst, src) in pixel.iter_mut().zip(src) {
        *dst = (src as f32 * a + *dst as f32 * inv).round() as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_pixmap(size: u32, value: u8) -> Pixmap {
        let mut pixmap = Pixmap::new(size, size).unwrap();
        pixmap.fill(tiny_skia::Color::from_rgba8(value, value, value, 255));
        pixmap
    }

    fn pixel(pixmap: &Pixmap, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * pixmap.width() + x) * 4) as usize;
        let d = pixmap.data();
        [d[idx], d[idx + 1], d[idx + 2], d[idx + 3]]
    }

    #[test]
    fn test_background_darkens() {
        let mut pixmap = gray_pixmap(100, 200);
        let label = Label {
            text: "90.0°",
            anchor: (20, 50),
            scale: 0.5,
            color: Rgb::white(),
            background: true,
            weight: 1,
        };
        draw_label(&mut pixmap, &LabelFont::fallback(), &RenderOptions::default(), &label);

        let inside = pixel(&pixmap, 22, 45);
        assert!((inside[0] as i32 - 80).abs() <= 1, "got {inside:?}");
        assert_eq!(inside[3], 255);
        assert_eq!(pixel(&pixmap, 5, 5), [200, 200, 200, 255]);
    }

    #[test]
    fn test_no_background_no_glyphs_is_noop() {
        let mut pixmap = gray_pixmap(50, 120);
        let before = pixmap.data().to_vec();
        let label = Label {
            text: "hidden",
            anchor: (10, 30),
            scale: 1.0,
            color: Rgb::yellow(),
            background: false,
            weight: 3,
        };
        draw_label(&mut pixmap, &LabelFont::fallback(), &RenderOptions::default(), &label);
        assert_eq!(pixmap.data(), &before[..]);
    }

    #[test]
    fn test_blend_over() {
        let mut px = [0, 0, 0, 255];
        blend_over(&mut px, Rgb::new(255, 255, 0), 1.0);
        assert_eq!(px, [255, 255, 0, 255]);

        let mut px = [100, 100, 100, 255];
        blend_over(&mut px, Rgb::new(200, 0, 0), 0.5);
        assert_eq!(px, [150, 50, 50, 255]);

        let mut px = [10, 20, 30, 255];
        blend_over(&mut px, Rgb::white(), 0.0);
        assert_eq!(px, [10, 20, 30, 255]);
    }

    #[test]
    fn test_glyph_box_visibility() {
        assert!(intersects(2, 2, 4, 4, 8, 8));
        assert!(intersects(-3, -3, 4, 4, 8, 8));
        assert!(!intersects(8, 0, 4, 4, 8, 8));
        assert!(!intersects(0, -4, 4, 4, 8, 8));
        assert!(!intersects(-60_000, -60_000, 50_000, 50_000, 8, 8));
        assert!(!intersects(0, 0, 0, 5, 8, 8));
    }

    #[test]
    fn test_weight_thickens_glyphs() {
        let Some(font) = LabelFont::system_default() else {
            return;
        };
        let lit = |weight: u32| {
            let mut pixmap = gray_pixmap(80, 0);
            let label = Label {
                text: "H",
                anchor: (20, 60),
                scale: 1.5,
                color: Rgb::white(),
                background: false,
                weight,
            };
            draw_label(&mut pixmap, &font, &RenderOptions::default(), &label);
            pixmap.data().chunks(4).filter(|p| p[0] > 128).count()
        };
        let thin = lit(1);
        assert!(thin > 0);
        assert!(lit(4) > thin);
        assert_eq!(lit(1000), lit(MAX_GLYPH_WEIGHT));
    }
}
