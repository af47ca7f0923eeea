use std::io::Write;

use super::*;

#[test]
fn defaults_without_file() {
    let cfg = ExportConfig::default();
    assert_eq!(cfg.logging.level, "info");
    assert_eq!(cfg.page.width, 842.0);
    assert_eq!(cfg.render.target_long_pixel, DEFAULT_TARGET_LONG_PX);
    assert_eq!(cfg.branding.product_name, "Floorprint");
    assert!(cfg.branding.logo.is_none());
    assert!(cfg.resources.system_fonts);
    assert!(cfg.resources.font_files.is_empty());
}

#[test]
fn load_from_temp_file() {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    writeln!(
        file,
        r#"
        [logging]
        level = "debug"

        [page]
        width = 595
        height = 842

        [index]
        line_height = 20

        [branding]
        product_name = "Acme Facilities"
        logo = "brand/logo.png"

        [render]
        jpeg_quality = 0.7

        [resources]
        icon_dir = "icons"
        font_files = ["fonts/Inter.ttf"]
        system_fonts = false
        "#
    )
    .unwrap();

    let cfg = ExportConfig::from_file(file.path()).expect("load config");
    assert_eq!(cfg.logging.level, "debug");
    assert_eq!((cfg.page.width, cfg.page.height), (595.0, 842.0));
    // Unset keys inside a present section keep their defaults.
    assert_eq!(cfg.page.margin, 36.0);
    assert_eq!(cfg.index.line_height, 20.0);
    assert_eq!(cfg.index.header_reserve, 120.0);
    assert_eq!(cfg.branding.product_name, "Acme Facilities");
    assert_eq!(cfg.branding.logo.as_deref(), Some("brand/logo.png"));
    assert_eq!(cfg.branding.document_title, "Floor plans");
    assert_eq!(cfg.render.jpeg_quality, 0.7);
    assert_eq!(cfg.render.target_long_pixel, DEFAULT_TARGET_LONG_PX);
    assert_eq!(cfg.resources.icon_dir, Some(PathBuf::from("icons")));
    assert_eq!(cfg.resources.font_files.len(), 1);
    assert!(!cfg.resources.system_fonts);
}

#[test]
fn malformed_file_reports_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[page]\nwidth = \"wide\"").unwrap();
    let err = ExportConfig::from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn missing_file_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ExportConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
