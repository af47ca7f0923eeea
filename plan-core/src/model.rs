//! Plan snapshot types.
//!
//! These mirror the JSON the plan store hands over (camelCase keys). Optional
//! style fields stay `Option` here; renderers apply defaults and clamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geom::Point;

/// Immutable snapshot of one floor plan.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorPlan {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Background image reference (path or data URL).
    #[serde(default)]
    pub background: Option<String>,
    /// Logical plan width in world units.
    pub width: f64,
    /// Logical plan height in world units.
    pub height: f64,
    #[serde(default)]
    pub print_area: Option<PrintArea>,
    #[serde(default)]
    pub scale: Option<ScaleBar>,
    #[serde(default)]
    pub objects: Vec<MapObject>,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub revisions: Vec<Revision>,
}

impl FloorPlan {
    pub fn object(&self, id: &str) -> Option<&MapObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Real-world meters per world unit, when the plan carries a usable scale bar.
    pub fn meters_per_unit(&self) -> Option<f64> {
        self.scale.as_ref().and_then(ScaleBar::meters_per_unit)
    }
}

/// Sub-rectangle of the plan selected for export, in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PrintArea {
    pub x: f64,
    pub y: f64,
    #[serde(alias = "w")]
    pub width: f64,
    #[serde(alias = "h")]
    pub height: f64,
}

/// Two reference points plus the real distance between them.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleBar {
    #[serde(default)]
    pub start: Option<Point>,
    #[serde(default)]
    pub end: Option<Point>,
    #[serde(default)]
    pub meters: f64,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub stroke_width: Option<f64>,
}

impl ScaleBar {
    pub fn endpoints(&self) -> Option<(Point, Point)> {
        Some((self.start?, self.end?))
    }

    pub fn meters_per_unit(&self) -> Option<f64> {
        let (a, b) = self.endpoints()?;
        let len = a.distance(b);
        if len > 0.0 && self.meters.is_finite() && self.meters > 0.0 {
            Some(self.meters / len)
        } else {
            None
        }
    }
}

/// One drawable object on the plan. `kind` carries the per-type payload and the
/// `type` tag in JSON.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapObject {
    pub id: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub scale: Option<f64>,
    #[serde(default)]
    pub scale_x: Option<f64>,
    #[serde(default)]
    pub scale_y: Option<f64>,
    /// Degrees, clockwise in screen space.
    #[serde(default)]
    pub rotation: Option<f64>,
    #[serde(default)]
    pub opacity: Option<f64>,
    #[serde(default)]
    pub stroke_color: Option<String>,
    #[serde(default)]
    pub stroke_width: Option<f64>,
    #[serde(flatten)]
    pub kind: ObjectKind,
}

impl MapObject {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Effective horizontal scale: uniform scale times the x factor.
    pub fn scale_x(&self) -> f64 {
        positive_or_one(self.scale) * positive_or_one(self.scale_x)
    }

    pub fn scale_y(&self) -> f64 {
        positive_or_one(self.scale) * positive_or_one(self.scale_y)
    }

    pub fn rotation(&self) -> f64 {
        self.rotation.filter(|r| r.is_finite()).unwrap_or(0.0)
    }

    pub fn type_tag(&self) -> &'static str {
        match self.kind {
            ObjectKind::Marker(_) => "marker",
            ObjectKind::Desk(_) => "desk",
            ObjectKind::Wall(_) => "wall",
            ObjectKind::Text(_) => "text",
            ObjectKind::Image(_) => "image",
            ObjectKind::Quote(_) => "quote",
            ObjectKind::Link(_) => "link",
        }
    }
}

fn positive_or_one(v: Option<f64>) -> f64 {
    v.filter(|s| s.is_finite() && *s > 0.0).unwrap_or(1.0)
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ObjectKind {
    Marker(Marker),
    Desk(Desk),
    Wall(Wall),
    Text(TextBlock),
    Image(EmbeddedImage),
    Quote(Quote),
    Link(Link),
}

/// Generic marker; its icon comes from the caller's type-id lookup.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub type_id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Safety equipment (extinguishers, exits, ...) toggled separately from other markers.
    #[serde(default)]
    pub safety: bool,
    #[serde(default)]
    pub fill_color: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeskShape {
    Round,
    Square,
    #[default]
    Rectangular,
    Double,
    Long,
    Trapezoid,
    LShape,
    MirroredLShape,
}

impl DeskShape {
    pub const ALL: [DeskShape; 8] = [
        DeskShape::Round,
        DeskShape::Square,
        DeskShape::Rectangular,
        DeskShape::Double,
        DeskShape::Long,
        DeskShape::Trapezoid,
        DeskShape::LShape,
        DeskShape::MirroredLShape,
    ];
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Desk {
    #[serde(default)]
    pub shape: DeskShape,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub fill_color: Option<String>,
}

/// Wall polyline; points are offsets from the object's `(x, y)`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wall {
    pub points: Vec<Point>,
    #[serde(default)]
    pub dashed: bool,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    pub text: String,
    #[serde(default)]
    pub font_family: Option<String>,
    #[serde(default)]
    pub font_size: Option<f64>,
    #[serde(default)]
    pub background: bool,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub background_color: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedImage {
    pub src: String,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LabelPosition {
    #[default]
    Above,
    Below,
    Left,
    Right,
    Center,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EndStyle {
    #[default]
    Arrows,
    Dots,
}

/// Dimension line. Points are offsets from `(x, y)`; when `from_id`/`to_id`
/// are set the first/last point follows that object instead.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    #[serde(default)]
    pub points: Vec<Point>,
    #[serde(default)]
    pub label_position: LabelPosition,
    #[serde(default)]
    pub end_style: EndStyle,
    #[serde(default)]
    pub dashed: bool,
    #[serde(default = "default_true")]
    pub label_background: bool,
    #[serde(default)]
    pub font_size: Option<f64>,
    #[serde(default)]
    pub from_id: Option<String>,
    #[serde(default)]
    pub to_id: Option<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LinkKind {
    Arrow,
    #[default]
    Cable,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Routing {
    #[default]
    HorizontalFirst,
    VerticalFirst,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArrowMode {
    #[default]
    None,
    Start,
    End,
    Both,
}

impl ArrowMode {
    pub fn at_start(self) -> bool {
        matches!(self, ArrowMode::Start | ArrowMode::Both)
    }

    pub fn at_end(self) -> bool {
        matches!(self, ArrowMode::End | ArrowMode::Both)
    }
}

/// Connection between two objects, addressed by id.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub from_id: String,
    pub to_id: String,
    #[serde(default)]
    pub kind: LinkKind,
    #[serde(default)]
    pub routing: Routing,
    #[serde(default)]
    pub arrows: ArrowMode,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoomKind {
    #[default]
    Rect,
    Polygon,
}

/// Room outline. Rect rooms use `x/y/width/height`, polygon rooms use `points`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: RoomKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub points: Option<Vec<Point>>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RoomOutline {
    Rect { origin: Point, width: f64, height: f64 },
    Polygon(Vec<Point>),
}

impl Room {
    /// Resolved outline, or `None` when the geometry is unusable.
    pub fn outline(&self) -> Option<RoomOutline> {
        match self.kind {
            RoomKind::Rect => {
                let origin = Point::new(self.x?, self.y?);
                let (w, h) = (self.width?, self.height?);
                if !origin.is_finite() || !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0
                {
                    return None;
                }
                Some(RoomOutline::Rect {
                    origin,
                    width: w,
                    height: h,
                })
            }
            RoomKind::Polygon => {
                let pts = self.points.clone()?;
                if pts.len() < 3 || pts.iter().any(|p| !p.is_finite()) {
                    return None;
                }
                Some(RoomOutline::Polygon(pts))
            }
        }
    }
}

/// Immutable revision snapshot. Only `created_at`, `sequence`, `major` and
/// `minor` are read by the renderer; the copies are carried for completeness.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Revision {
    pub created_at: DateTime<Utc>,
    pub major: u32,
    pub minor: u32,
    /// Store-assigned creation counter, used to order equal timestamps.
    #[serde(default)]
    pub sequence: Option<u64>,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub objects: Vec<MapObject>,
    #[serde(default)]
    pub rooms: Vec<Room>,
}

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;
