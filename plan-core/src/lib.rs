//! Floor-plan data model and the pure math shared by the raster and export crates.
//!
//! Everything in here is side-effect free: plans are immutable snapshots handed
//! over by the owning store, and the helpers only read them.
//!
//! | Module | Role |
//! |--------|------|
//! | [`model`] | Plan snapshot types (objects, rooms, revisions, scale bar) |
//! | [`geom`] | Points, rotation, bounds, polyline measurement |
//! | [`transform`] | World-to-pixel conversion with print-area cropping |
//! | [`revision`] | Latest-revision selection and footer stamp |

pub mod geom;
pub mod model;
pub mod revision;
pub mod transform;

pub use geom::Point;
pub use model::{
    ArrowMode, DeskShape, EndStyle, FloorPlan, LabelPosition, LinkKind, MapObject, ObjectKind,
    PrintArea, Revision, Room, RoomOutline, Routing, ScaleBar,
};
pub use revision::{RevisionStamp, latest_revision};
pub use transform::{CropRect, PixelTransform, clamp_target_long};
