//! Shape definitions for frame annotations.

mod angle;
mod arc;
mod circle;
mod line;
mod text;

pub use angle::Angle;
pub use arc::Arc;
pub use circle::Circle;
pub use line::Line;
pub use text::{MAX_FONT_SCALE, Text};

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Open key/value metadata attached to a shape. Opaque to the core.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// RGB colour, serialized as a `[r, g, b]` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn yellow() -> Self {
        Self::new(255, 255, 0)
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255)
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        [c.r, c.g, c.b]
    }
}

/// Stroke colour and width applied to newly created shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawingStyle {
    pub color: Rgb,
    /// Stroke width in pixels, at least 1.
    pub thickness: u32,
}

impl DrawingStyle {
    pub fn new(color: Rgb, thickness: u32) -> Self {
        Self {
            color,
            thickness: thickness.max(1),
        }
    }

    /// Default style for text annotations (white).
    pub fn text_default() -> Self {
        Self::new(Rgb::white(), 2)
    }
}

impl Default for DrawingStyle {
    fn default() -> Self {
        Self::new(Rgb::yellow(), 2)
    }
}

/// Seconds since the Unix epoch, as stored in `created_at`.
pub fn timestamp_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

/// Fields shared by every shape variant.
///
/// Set once at construction; there are no setters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeHeader {
    pub(crate) id: ShapeId,
    pub(crate) color: Rgb,
    pub(crate) thickness: u32,
    pub(crate) frame_number: u32,
    pub(crate) created_at: f64,
    #[serde(default)]
    pub(crate) metadata: Metadata,
}

impl ShapeHeader {
    /// Fresh header with a new id and the current time.
    pub fn new(frame_number: u32, style: DrawingStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            color: style.color,
            thickness: style.thickness.max(1),
            frame_number,
            created_at: timestamp_now(),
            metadata: Metadata::new(),
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn thickness(&self) -> u32 {
        self.thickness
    }

    pub fn frame_number(&self) -> u32 {
        self.frame_number
    }

    pub fn created_at(&self) -> f64 {
        self.created_at
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

/// Discriminant of [`Shape`], matching the persisted `type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeKind {
    Line,
    Angle,
    Circle,
    Arc,
    Text,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Line,
        ShapeKind::Angle,
        ShapeKind::Circle,
        ShapeKind::Arc,
        ShapeKind::Text,
    ];

    /// Persisted tag name.
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Line => "line",
            ShapeKind::Angle => "angle",
            ShapeKind::Circle => "circle",
            ShapeKind::Arc => "arc",
            ShapeKind::Text => "text",
        }
    }

    /// Parse a persisted tag name.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == tag)
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a persisted shape record was rejected.
#[derive(Debug, Error)]
pub enum ShapeRecordError {
    #[error("shape record is missing its type")]
    MissingType,
    #[error("unknown shape type: {0}")]
    UnknownType(String),
    #[error("malformed {kind} record: {source}")]
    Malformed {
        kind: ShapeKind,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid {kind} record: {reason}")]
    Invalid { kind: ShapeKind, reason: String },
}

/// A frame annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Line(Line),
    Angle(Angle),
    Circle(Circle),
    Arc(Arc),
    Text(Text),
}

impl Shape {
    pub fn header(&self) -> &ShapeHeader {
        match self {
            Shape::Line(s) => &s.header,
            Shape::Angle(s) => &s.header,
            Shape::Circle(s) => &s.header,
            Shape::Arc(s) => &s.header,
            Shape::Text(s) => &s.header,
        }
    }

    fn header_mut(&mut self) -> &mut ShapeHeader {
        match self {
            Shape::Line(s) => &mut s.header,
            Shape::Angle(s) => &mut s.header,
            Shape::Circle(s) => &mut s.header,
            Shape::Arc(s) => &mut s.header,
            Shape::Text(s) => &mut s.header,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.header().id
    }

    pub fn frame_number(&self) -> u32 {
        self.header().frame_number
    }

    pub fn color(&self) -> Rgb {
        self.header().color
    }

    pub fn thickness(&self) -> u32 {
        self.header().thickness
    }

    pub fn created_at(&self) -> f64 {
        self.header().created_at
    }

    pub fn metadata(&self) -> &Metadata {
        &self.header().metadata
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Line(_) => ShapeKind::Line,
            Shape::Angle(_) => ShapeKind::Angle,
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Arc(_) => ShapeKind::Arc,
            Shape::Text(_) => ShapeKind::Text,
        }
    }

    /// Attach a metadata entry. Only meaningful before the shape is handed to
    /// a manager.
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.header_mut().metadata.insert(key.into(), value);
        self
    }

    /// Distance from `point` used for hit-testing.
    ///
    /// Lines measure to the segment, angles to the nearer leg, circles to the
    /// perimeter and text to its anchor. Arcs are not hit-testable.
    pub fn hit_distance(&self, point: Point) -> Option<f64> {
        match self {
            Shape::Line(s) => Some(s.hit_distance(point)),
            Shape::Angle(s) => Some(s.hit_distance(point)),
            Shape::Circle(s) => Some(s.hit_distance(point)),
            Shape::Arc(_) => None,
            Shape::Text(s) => Some(s.hit_distance(point)),
        }
    }

    /// Check the invariants a decoded record must satisfy.
    pub fn validate(&self) -> Result<(), ShapeRecordError> {
        let kind = self.kind();
        let invalid = |reason: &str| ShapeRecordError::Invalid {
            kind,
            reason: reason.to_string(),
        };
        let header = self.header();
        if header.thickness < 1 {
            return Err(invalid("thickness must be at least 1"));
        }
        if !header.created_at.is_finite() {
            return Err(invalid("created_at is not a finite timestamp"));
        }
        let points: Vec<Point> = match self {
            Shape::Line(s) => vec![s.start, s.end],
            Shape::Angle(s) => vec![s.point1, s.vertex, s.point3],
            Shape::Circle(s) => vec![s.center],
            Shape::Arc(s) => vec![s.center],
            Shape::Text(s) => vec![s.position],
        };
        if points.iter().any(|p| !p.is_finite()) {
            return Err(invalid("coordinates must be finite"));
        }
        match self {
            Shape::Circle(s) if !(s.radius >= 0.0 && s.radius.is_finite()) => {
                Err(invalid("radius must be a finite value >= 0"))
            }
            Shape::Arc(s) if !(s.radius >= 0.0 && s.radius.is_finite()) => {
                Err(invalid("radius must be a finite value >= 0"))
            }
            Shape::Text(s) if !s.has_valid_scale() => {
                Err(invalid(&format!("font_scale must be in (0, {MAX_FONT_SCALE}]")))
            }
            _ => Ok(()),
        }
    }

    /// Serialize to a JSON record.
    pub fn to_record(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Decode and validate one JSON record.
    pub fn from_record(record: &serde_json::Value) -> Result<Self, ShapeRecordError> {
        let tag = record
            .get("type")
            .and_then(|t| t.as_str())
            .ok_or(ShapeRecordError::MissingType)?;
        let kind = ShapeKind::from_tag(tag)
            .ok_or_else(|| ShapeRecordError::UnknownType(tag.to_string()))?;
        let shape: Shape = serde_json::from_value(record.clone())
            .map_err(|source| ShapeRecordError::Malformed { kind, source })?;
        shape.validate()?;
        Ok(shape)
    }
}

impl From<Line> for Shape {
    fn from(s: Line) -> Self {
        Shape::Line(s)
    }
}

impl From<Angle> for Shape {
    fn from(s: Angle) -> Self {
        Shape::Angle(s)
    }
}

impl From<Circle> for Shape {
    fn from(s: Circle) -> Self {
        Shape::Circle(s)
    }
}

impl From<Arc> for Shape {
    fn from(s: Arc) -> Self {
        Shape::Arc(s)
    }
}

impl From<Text> for Shape {
    fn from(s: Text) -> Self {
        Shape::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_shapes() -> Vec<Shape> {
        let style = DrawingStyle::new(Rgb::new(10, 20, 30), 3);
        vec![
            Line::new(Point::new(1.0, 2.0), Point::new(3.0, 4.0), 7, style)
                .with_label("shaft")
                .into(),
            Angle::new(Point::new(0.0, 1.0), Point::ZERO, Point::new(1.0, 0.0), 7, style)
                .with_arc_radius(30)
                .into(),
            Circle::new(Point::new(50.0, 50.0), 12.5, 8, style).with_fill(true).into(),
            Arc::new(Point::new(5.0, 5.0), 10.0, -30.0, 400.0, 9, style).into(),
            Text::new(Point::new(9.0, 9.0), "Top of swing", 9, DrawingStyle::text_default())
                .with_font_scale(1.5)
                .into(),
        ]
    }

    #[test]
    fn test_record_round_trip_every_variant() {
        for shape in sample_shapes() {
            let shape = shape.with_metadata("note", json!({"k": [1, 2]}));
            let record = shape.to_record().unwrap();
            assert_eq!(record["type"], shape.kind().as_str());
            let back = Shape::from_record(&record).unwrap();
            assert_eq!(back, shape);
        }
    }

    #[test]
    fn test_record_layout() {
        let line: Shape =
            Line::new(Point::new(1.0, 2.0), Point::new(3.0, 4.0), 7, DrawingStyle::default())
                .into();
        let record = line.to_record().unwrap();
        assert_eq!(record["type"], "line");
        assert_eq!(record["color"], json!([255, 255, 0]));
        assert_eq!(record["thickness"], 2);
        assert_eq!(record["frame_number"], 7);
        assert_eq!(record["start"], json!({"x": 1.0, "y": 2.0}));
        assert_eq!(record["end"], json!({"x": 3.0, "y": 4.0}));
        assert!(record["id"].is_string());
        assert!(record["metadata"].is_object());
    }

    #[test]
    fn test_record_optional_fields_default() {
        let record = json!({
            "type": "angle",
            "id": "6f1c2d3e-1111-4222-8333-444455556666",
            "color": [255, 0, 0],
            "thickness": 2,
            "frame_number": 3,
            "created_at": 1700000000.5,
            "point1": {"x": 0.0, "y": 1.0},
            "vertex": {"x": 0.0, "y": 0.0},
            "point3": {"x": 1.0, "y": 0.0}
        });
        let Shape::Angle(angle) = Shape::from_record(&record).unwrap() else {
            panic!("expected angle");
        };
        assert!(angle.show_arc);
        assert_eq!(angle.arc_radius, 50);
        assert!(angle.label.is_empty());
        assert!(angle.header.metadata.is_empty());
    }

    #[test]
    fn test_record_errors() {
        assert!(matches!(
            Shape::from_record(&json!({"start": {"x": 0, "y": 0}})),
            Err(ShapeRecordError::MissingType)
        ));
        assert!(matches!(
            Shape::from_record(&json!({"type": "polygon"})),
            Err(ShapeRecordError::UnknownType(t)) if t == "polygon"
        ));
        assert!(matches!(
            Shape::from_record(&json!({"type": "line", "id": "nope"})),
            Err(ShapeRecordError::Malformed { kind: ShapeKind::Line, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut record = sample_shapes()[2].to_record().unwrap();
        record["radius"] = json!(-1.0);
        assert!(matches!(
            Shape::from_record(&record),
            Err(ShapeRecordError::Invalid { kind: ShapeKind::Circle, .. })
        ));

        let mut record = sample_shapes()[0].to_record().unwrap();
        record["thickness"] = json!(0);
        assert!(matches!(Shape::from_record(&record), Err(ShapeRecordError::Invalid { .. })));

        for scale in [0.0, 2000.0] {
            let mut record = sample_shapes()[4].to_record().unwrap();
            record["font_scale"] = json!(scale);
            assert!(matches!(
                Shape::from_record(&record),
                Err(ShapeRecordError::Invalid { kind: ShapeKind::Text, .. })
            ));
        }

        let mut record = sample_shapes()[0].to_record().unwrap();
        record["color"] = json!([300, 0, 0]);
        assert!(matches!(Shape::from_record(&record), Err(ShapeRecordError::Malformed { .. })));
    }

    #[test]
    fn test_ids_are_unique() {
        let a = sample_shapes();
        let b = sample_shapes();
        for s in &a {
            assert!(b.iter().all(|o| o.id() != s.id()));
        }
    }

    #[test]
    fn test_style_thickness_floor() {
        assert_eq!(DrawingStyle::new(Rgb::black(), 0).thickness, 1);
        let header = ShapeHeader::new(0, DrawingStyle { color: Rgb::black(), thickness: 0 });
        assert_eq!(header.thickness(), 1);
    }

    #[test]
    fn test_hit_distance_dispatch() {
        let shapes = sample_shapes();
        assert!(shapes[0].hit_distance(Point::new(1.0, 2.0)).is_some());
        assert!(shapes[3].hit_distance(Point::new(5.0, 5.0)).is_none());
    }

    #[test]
    fn test_kind_tags() {
        for kind in ShapeKind::ALL {
            assert_eq!(ShapeKind::from_tag(kind.as_str()), Some(kind));
        }
        assert_eq!(ShapeKind::from_tag("polygon"), None);
    }
}
