//! Style defaults and tuned geometry constants for the entity renderers.
//! Lengths are in world units unless the name says `_PX`.

// ── Shared ──────────────────────────────────────────────────────

pub const DEFAULT_STROKE: &str = "#333333";
pub const MIN_OPACITY: f64 = 0.1;
pub const MAX_OPACITY: f64 = 1.0;
/// Average glyph advance as a fraction of the font size, used to size label pills.
pub const AVG_CHAR_EM: f64 = 0.6;
pub const LINE_HEIGHT_EM: f64 = 1.25;
pub const PILL_PAD_EM: f64 = 0.35;
pub const PILL_FILL: &str = "#ffffff";
pub const LABEL_COLOR: &str = "#212121";
pub const FONT_FAMILY: &str = "sans-serif";

// ── Rooms ───────────────────────────────────────────────────────

pub const ROOM_COLOR: &str = "#1e88e5";
pub const ROOM_STROKE_WIDTH: f64 = 2.0;
pub const ROOM_DASH: [f64; 2] = [10.0, 6.0];

// ── Walls ───────────────────────────────────────────────────────

pub const WALL_COLOR: &str = "#424242";
pub const WALL_WIDTH: f64 = 6.0;
pub const WALL_DASH: [f64; 2] = [12.0, 8.0];
pub const MIN_STROKE_PX: f64 = 1.0;

// ── Dimension lines ─────────────────────────────────────────────

pub const QUOTE_COLOR: &str = "#e53935";
pub const QUOTE_WIDTH: f64 = 2.0;
pub const QUOTE_DASH: [f64; 2] = [8.0, 5.0];
pub const QUOTE_FONT_SIZE: f64 = 14.0;
pub const QUOTE_ARROW_SIZE: f64 = 12.0;
pub const QUOTE_DOT_RADIUS: f64 = 4.0;
pub const QUOTE_MIN_SCALE: f64 = 0.5;
pub const QUOTE_MAX_SCALE: f64 = 1.6;
/// Half-opening of the arrowhead triangle, measured from the segment direction.
pub const ARROW_SPREAD_DEG: f64 = 148.0;
/// Label distance from the line for above/below, in font sizes.
pub const QUOTE_LABEL_SIDE_EM: f64 = 0.9;
/// Label distance from the line for left/right, in label widths.
pub const QUOTE_LABEL_LATERAL_FACTOR: f64 = 0.6;
/// Extra clearance past the stroke, in stroke widths.
pub const QUOTE_LABEL_STROKE_GAP: f64 = 1.5;

// ── Links ───────────────────────────────────────────────────────

pub const CABLE_COLOR: &str = "#6d4c41";
pub const ARROW_LINK_COLOR: &str = "#37474f";
pub const LINK_WIDTH: f64 = 2.0;
pub const LINK_ARROW_SIZE: f64 = 10.0;
pub const LINK_FONT_SIZE: f64 = 12.0;

// ── Markers ─────────────────────────────────────────────────────

pub const MARKER_SIZE: f64 = 32.0;
pub const MARKER_CORNER: f64 = 6.0;
pub const MARKER_ICON_RATIO: f64 = 0.7;
pub const MARKER_FILL: &str = "#ffffff";
pub const MARKER_STROKE: &str = "#1976d2";
pub const SAFETY_STROKE: &str = "#d32f2f";
pub const MARKER_STROKE_WIDTH: f64 = 2.0;
pub const MARKER_LABEL_SIZE: f64 = 11.0;
pub const MARKER_LABEL_MAX_LINES: usize = 2;
pub const FALLBACK_GLYPH: &str = "?";

// ── Desks ───────────────────────────────────────────────────────

pub const DESK_UNIT: f64 = 40.0;
/// Arm thickness of L-shaped desks; does not follow the unit size.
pub const DESK_L_THICKNESS: f64 = 16.0;
pub const DESK_FILL: &str = "#eceff1";
pub const DESK_STROKE: &str = "#546e7a";
pub const DESK_STROKE_WIDTH: f64 = 1.5;
pub const DESK_LABEL_SIZE: f64 = 10.0;

// ── Text blocks ─────────────────────────────────────────────────

pub const TEXT_FONT_SIZE: f64 = 16.0;
pub const TEXT_COLOR: &str = "#212121";

// ── Embedded images ─────────────────────────────────────────────

pub const PLACEHOLDER_STROKE: &str = "#9e9e9e";
pub const PLACEHOLDER_DASH: [f64; 2] = [6.0, 4.0];

// ── Scale bar ───────────────────────────────────────────────────

pub const SCALE_COLOR: &str = "#212121";
pub const SCALE_WIDTH: f64 = 2.0;
pub const SCALE_DOT_RADIUS: f64 = 4.0;
pub const SCALE_FONT_SIZE: f64 = 14.0;
