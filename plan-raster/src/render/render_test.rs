use plan_core::model::{LabelPosition, Routing};
use plan_core::{FloorPlan, ObjectKind};
use serde_json::json;

use super::dimensions::{label_anchor, length_label};
use super::links::cable_route;
use super::*;
use crate::resources::MemoryLoader;

const SVG_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="8" height="8"><rect width="8" height="8" fill="blue"/></svg>"#;

fn object(value: serde_json::Value) -> MapObject {
    serde_json::from_value(value).unwrap()
}

fn draw_one(obj: &MapObject, cache: &ResourceCache, icons: &IconLookup) -> String {
    draw_all(std::slice::from_ref(obj), cache, icons)
}

fn draw_all(objects: &[MapObject], cache: &ResourceCache, icons: &IconLookup) -> String {
    let transform = PixelTransform::new((100.0, 100.0), None, None, 1000);
    let ctx = DrawContext {
        transform: &transform,
        cache,
        icons,
        meters_per_unit: None,
    };
    let mut surface = Surface::new(transform.width_px(), transform.height_px());
    let plan = FloorPlan {
        objects: objects.to_vec(),
        ..serde_json::from_value(json!({"id": "p", "width": 100, "height": 100})).unwrap()
    };
    let scene = crate::scene::Scene::build(&plan, &crate::options::Categories::default());
    for entity in scene.items() {
        draw_entity(&mut surface, &ctx, entity);
    }
    surface.finish()
}

#[test]
fn every_desk_shape_has_geometry() {
    for shape in plan_core::DeskShape::ALL {
        let parts = desk_outline(shape, 1.0, 1.0);
        assert!(!parts.is_empty(), "{shape:?}");
        for part in parts {
            if let DeskPart::Polygon(pts) = part {
                assert!(pts.len() >= 3, "{shape:?}");
            }
        }
    }
}

#[test]
fn l_shapes_keep_arm_thickness_and_mirror() {
    let DeskPart::Polygon(l) = &desk_outline(plan_core::DeskShape::LShape, 1.0, 1.0)[0] else {
        panic!("L desk is a polygon");
    };
    let DeskPart::Polygon(m) = &desk_outline(plan_core::DeskShape::MirroredLShape, 1.0, 1.0)[0] else {
        panic!("mirrored L desk is a polygon");
    };
    assert!((l[2].y - l[1].y - crate::consts::DESK_L_THICKNESS).abs() < 1e-9);
    for p in l {
        assert!(m.iter().any(|q| (q.x + p.x).abs() < 1e-9 && (q.y - p.y).abs() < 1e-9));
    }
}

/// Vertices of the first `<path>` in `svg`.
fn first_path(svg: &str) -> Vec<Point> {
    let start = svg.find("<path d=\"").unwrap() + "<path d=\"".len();
    let d = &svg[start..start + svg[start..].find('"').unwrap()];
    let nums: Vec<f64> = d
        .split_whitespace()
        .filter_map(|t| t.parse().ok())
        .collect();
    nums.chunks(2).map(|c| Point::new(c[0], c[1])).collect()
}

#[test]
fn stretched_l_desk_keeps_arm_thickness_in_pixels() {
    let obj = object(json!({"id": "d", "type": "desk", "x": 50, "y": 50, "shape": "l-shape", "scaleX": 3}));
    let svg = draw_one(&obj, &ResourceCache::new(), &IconLookup::new());
    // 100-unit plan at 1000 px: 10 px per unit on both axes, scale not folded in.
    assert!(svg.contains("scale(10.0000 10.0000)"));

    let pts = first_path(&svg);
    assert_eq!(pts.len(), 6);
    let k = 10.0;
    let expected = crate::consts::DESK_L_THICKNESS * k;
    let top_arm = (pts[2].y - pts[1].y) * k;
    let side_arm = (pts[3].x - pts[0].x) * k;
    assert!((top_arm - expected).abs() < 1e-6, "top arm {top_arm}");
    assert!((side_arm - expected).abs() < 1e-6, "side arm {side_arm}");
    // The footprint itself does stretch.
    let width = (pts[1].x - pts[0].x) * k;
    assert!((width - 3.0 * 1.5 * crate::consts::DESK_UNIT * k).abs() < 1e-6);
}

#[test]
fn desk_outline_stretches_footprint_per_axis() {
    let DeskPart::Polygon(r) = &desk_outline(plan_core::DeskShape::Square, 2.0, 0.5)[0] else {
        panic!("square desk is a polygon");
    };
    let u = crate::consts::DESK_UNIT;
    assert!((r[1].x - r[0].x - 2.0 * u).abs() < 1e-9);
    assert!((r[3].y - r[0].y - 0.5 * u).abs() < 1e-9);
}

#[test]
fn desk_name_is_drawn_upright_outside_the_desk_group() {
    let obj = object(json!({
        "id": "d", "type": "desk", "x": 50, "y": 50, "shape": "long",
        "rotation": 90, "scaleX": 2, "name": "Reception"
    }));
    let svg = draw_one(&obj, &ResourceCache::new(), &IconLookup::new());
    let desk_group = svg.find("rotate(90.00)").unwrap();
    let desk_close = desk_group + svg[desk_group..].find("</g>").unwrap();
    let label = svg.find(">Reception</text>").unwrap();
    assert!(label > desk_close);

    let text = &svg[svg[..label].rfind("<text").unwrap()..label];
    assert!(text.contains("x=\"500.00\" y=\"500.00\""));
    let size = crate::consts::DESK_LABEL_SIZE * 10.0;
    assert!(text.contains(&format!("font-size=\"{size:.2}\"")));
}

#[test]
fn arrowhead_wings_trail_the_tip() {
    let [tip, a, b] = arrowhead(Point::new(10.0, 0.0), 0.0, 5.0);
    assert_eq!(tip, Point::new(10.0, 0.0));
    assert!(a.x < tip.x && b.x < tip.x);
    assert!((a.y + b.y).abs() < 1e-9);
}

#[test]
fn dimension_labels_use_meters_when_scaled() {
    assert_eq!(length_label(100.0, Some(0.05)), "5.00 m");
    assert_eq!(length_label(123.4, None), "123 px");
}

#[test]
fn label_anchor_offsets_by_position() {
    let mid = Point::new(50.0, 50.0);
    let above = label_anchor(mid, 0.0, LabelPosition::Above, 10.0, 40.0, 2.0);
    let below = label_anchor(mid, 0.0, LabelPosition::Below, 10.0, 40.0, 2.0);
    let left = label_anchor(mid, 0.0, LabelPosition::Left, 10.0, 40.0, 2.0);
    let right = label_anchor(mid, 0.0, LabelPosition::Right, 10.0, 40.0, 2.0);
    assert!(above.y < mid.y && (above.x - mid.x).abs() < 1e-9);
    assert!(below.y > mid.y);
    assert!(left.x < mid.x && right.x > mid.x);
    assert_eq!(label_anchor(mid, 0.0, LabelPosition::Center, 10.0, 40.0, 2.0), mid);
    // Right-to-left lines still put "above" on the upper side.
    let flipped = label_anchor(mid, std::f64::consts::PI, LabelPosition::Above, 10.0, 40.0, 2.0);
    assert!(flipped.y < mid.y);
}

#[test]
fn cable_routes_are_orthogonal() {
    let (a, b) = (Point::new(0.0, 0.0), Point::new(10.0, 20.0));
    assert_eq!(
        cable_route(a, b, Routing::HorizontalFirst),
        vec![a, Point::new(10.0, 0.0), b]
    );
    assert_eq!(
        cable_route(a, b, Routing::VerticalFirst),
        vec![a, Point::new(0.0, 20.0), b]
    );
    assert_eq!(
        cable_route(a, Point::new(10.0, 0.0), Routing::VerticalFirst).len(),
        2
    );
}

#[test]
fn opacity_is_clamped() {
    let mut obj = object(json!({"id": "m", "type": "marker", "typeId": "x", "opacity": 0.0}));
    assert!((opacity(&obj) - MIN_OPACITY).abs() < 1e-9);
    obj.opacity = Some(7.0);
    assert!((opacity(&obj) - MAX_OPACITY).abs() < 1e-9);
    obj.opacity = None;
    assert!((opacity(&obj) - 1.0).abs() < 1e-9);
}

#[test]
fn marker_without_icon_falls_back_to_glyph() {
    let obj = object(json!({"id": "m", "type": "marker", "x": 50, "y": 50, "typeId": "printer", "name": "Printer\nFloor 2\nextra"}));
    let svg = draw_one(&obj, &ResourceCache::new(), &IconLookup::new());
    assert!(svg.contains(">?</text>"));
    assert!(svg.contains(">Printer</text>"));
    assert!(svg.contains(">Floor 2</text>"));
    assert!(!svg.contains(">extra</text>"));
}

#[tokio::test]
async fn marker_with_resolved_icon_embeds_it() {
    let mut loader = MemoryLoader::new();
    loader.insert_icon("print", SVG_ICON.as_bytes().to_vec());
    let mut cache = ResourceCache::new();
    cache.icon(&loader, "print").await;
    let icons = IconLookup::from([("printer".to_string(), "print".to_string())]);

    let obj = object(json!({"id": "m", "type": "marker", "x": 50, "y": 50, "typeId": "printer"}));
    let svg = draw_one(&obj, &cache, &icons);
    assert!(svg.contains("data:image/svg+xml;base64,"));
    assert!(svg.contains("<use xlink:href=\"#img0\""));
    assert!(!svg.contains(">?</text>"));
}

#[tokio::test]
async fn markers_sharing_an_icon_embed_it_once() {
    let mut loader = MemoryLoader::new();
    loader.insert_icon("print", SVG_ICON.as_bytes().to_vec());
    let mut cache = ResourceCache::new();
    cache.icon(&loader, "print").await;
    let icons = IconLookup::from([("printer".to_string(), "print".to_string())]);

    let markers: Vec<MapObject> = [20, 50, 80]
        .into_iter()
        .map(|x| object(json!({"id": format!("m{x}"), "type": "marker", "x": x, "y": 50, "typeId": "printer"})))
        .collect();
    let svg = draw_all(&markers, &cache, &icons);
    assert_eq!(svg.matches("data:image/svg+xml;base64,").count(), 1);
    assert_eq!(svg.matches("<use xlink:href=\"#img0\"").count(), 3);
}

#[test]
fn unresolved_image_draws_dashed_placeholder() {
    let obj = object(json!({"id": "i", "type": "image", "x": 50, "y": 50, "src": "gone.png", "width": 20, "height": 10}));
    assert!(matches!(obj.kind, ObjectKind::Image(_)));
    let svg = draw_one(&obj, &ResourceCache::new(), &IconLookup::new());
    assert!(svg.contains("stroke-dasharray"));
    assert!(!svg.contains("<image"));
}

#[test]
fn text_block_draws_every_line_with_background() {
    let obj = object(json!({"id": "t", "type": "text", "x": 50, "y": 50, "text": "a\nb\nc", "background": true}));
    let svg = draw_one(&obj, &ResourceCache::new(), &IconLookup::new());
    assert_eq!(svg.matches("<text").count(), 3);
    assert!(svg.contains("<rect"));
}
