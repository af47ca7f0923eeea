use super::*;

#[test]
fn finish_wraps_body_and_closes_groups() {
    let mut s = Surface::new(120, 80);
    s.begin_group(None, 0.5);
    s.circle(Point::new(10.0, 10.0), 3.0, Some("#000"), None);
    let svg = s.finish();
    assert!(svg.contains("width=\"120\" height=\"80\""));
    assert!(svg.contains("opacity=\"0.500\""));
    assert_eq!(svg.matches("<g").count(), svg.matches("</g>").count());
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn path_writes_fixed_precision_and_close() {
    let mut s = Surface::new(10, 10);
    let stroke = Stroke::solid("#f00", 2.0).dashed([4.0, 2.0]).rounded();
    s.path(
        &[Point::new(0.0, 0.0), Point::new(1.0 / 3.0, 2.0)],
        true,
        Some(&stroke),
        None,
    );
    let svg = s.finish();
    assert!(svg.contains("d=\"M 0.00 0.00 L 0.33 2.00 Z\""));
    assert!(svg.contains("stroke-dasharray=\"4.00 2.00\""));
    assert!(svg.contains("stroke-linejoin=\"round\""));
    assert!(svg.contains("fill=\"none\""));
}

#[test]
fn text_is_escaped_and_blank_lines_skipped() {
    let mut s = Surface::new(10, 10);
    s.text(
        Point::new(5.0, 5.0),
        &["A & <B>", ""],
        &TextStyle::centered(10.0, "#111"),
    );
    let svg = s.finish();
    assert!(svg.contains(">A &amp; &lt;B&gt;</text>"));
    assert_eq!(svg.matches("<text").count(), 1);
}

#[test]
fn placement_orders_translate_scale_rotate() {
    let p = Placement {
        center: Point::new(50.0, 60.0),
        rotation: 30.0,
        sx: 2.0,
        sy: 2.0,
    };
    let mut s = Surface::new(10, 10);
    s.begin_group(Some(&p), 1.0);
    s.end_group();
    let svg = s.finish();
    assert!(svg.contains("translate(50.00 60.00) scale(2.0000 2.0000) rotate(30.00)"));
    assert!((p.local_len(4.0) - 2.0).abs() < 1e-12);
}

#[test]
fn text_width_scales_with_length_and_size() {
    assert!((text_width("abcd", 10.0) - 24.0).abs() < 1e-9);
    assert_eq!(text_width("", 10.0), 0.0);
}

#[test]
fn shared_images_are_defined_once_and_reused() {
    let mut s = Surface::new(40, 40);
    let mut encoded = 0;
    for x in [0.0, 10.0, 20.0] {
        s.shared_image("icon:print", (x, 0.0, 8.0, 8.0), || {
            encoded += 1;
            "data:image/png;base64,AAAA".to_string()
        });
    }
    s.shared_image("icon:print", (0.0, 20.0, 4.0, 4.0), || "data:image/png;base64,BBBB".to_string());
    let svg = s.finish();

    assert_eq!(encoded, 1);
    assert_eq!(svg.matches("AAAA").count(), 1);
    assert_eq!(svg.matches("<use ").count(), 4);
    assert_eq!(svg.matches("<image id=").count(), 2);
    assert!(svg.contains("<use xlink:href=\"#img0\" x=\"20.00\" y=\"0.00\"/>"));
    let defs_end = svg.find("</defs>").unwrap();
    assert!(defs_end < svg.find("<use ").unwrap());
}

#[test]
fn documents_without_shared_images_have_no_defs() {
    let svg = Surface::new(10, 10).finish();
    assert!(!svg.contains("<defs>"));
}
