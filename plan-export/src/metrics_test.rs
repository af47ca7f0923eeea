use super::*;

#[test]
fn widths_follow_afm_tables() {
    assert!((text_width("0", 1000.0, Font::Regular) - 556.0).abs() < 1e-3);
    assert!((text_width("W", 10.0, Font::Regular) - 9.44).abs() < 1e-3);
    assert!((text_width("i", 10.0, Font::Bold) - 2.78).abs() < 1e-3);
    assert!(text_width("Plan", 12.0, Font::Bold) > text_width("Plan", 12.0, Font::Regular));
    assert_eq!(text_width("", 12.0, Font::Regular), 0.0);
}

#[test]
fn truncation_keeps_short_text_and_fits_long_text() {
    assert_eq!(truncate_to_width("Floor 1", 10.0, Font::Regular, 500.0), "Floor 1");
    let long = "Building A / Floor 12 / East wing / Meeting rooms";
    let cut = truncate_to_width(long, 10.0, Font::Regular, 100.0);
    assert!(cut.ends_with("..."));
    assert!(text_width(&cut, 10.0, Font::Regular) <= 100.0);
}

#[test]
fn winansi_maps_latin1_and_typographic_quotes() {
    assert_eq!(winansi("Rev: 1.2"), b"Rev: 1.2".to_vec());
    assert_eq!(winansi("é"), vec![0xe9]);
    assert_eq!(winansi("“x”"), vec![0x93, b'x', 0x94]);
    assert_eq!(winansi("日"), vec![b'?']);
}
