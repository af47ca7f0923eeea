use super::*;

fn png(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(w, h, image::Rgb([10, 200, 30]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

const SVG_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="12"><rect width="24" height="12" fill="red"/></svg>"#;

#[test]
fn png_is_sniffed_with_dimensions() {
    let img = LoadedImage::from_bytes(png(7, 3)).unwrap();
    assert_eq!(img.kind(), ImageKind::Png);
    assert_eq!((img.width(), img.height()), (7, 3));
    assert!(img.data_url().starts_with("data:image/png;base64,"));
}

#[test]
fn svg_is_sniffed_with_dimensions() {
    let img = LoadedImage::from_bytes(SVG_ICON.as_bytes().to_vec()).unwrap();
    assert_eq!(img.kind(), ImageKind::Svg);
    assert_eq!((img.width(), img.height()), (24, 12));
}

#[test]
fn garbage_is_not_an_image() {
    assert!(LoadedImage::from_bytes(b"definitely not pixels".to_vec()).is_none());
}

#[test]
fn bmp_is_reencoded_as_png() {
    let img = image::RgbImage::from_pixel(4, 4, image::Rgb([1, 2, 3]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Bmp).unwrap();
    let loaded = LoadedImage::from_bytes(out.into_inner()).unwrap();
    assert_eq!(loaded.kind(), ImageKind::Png);
}

#[test]
fn flatten_to_rgb_composites_on_white() {
    let rgba = image::RgbaImage::from_pixel(2, 2, image::Rgba([0, 0, 0, 0]));
    let mut out = Cursor::new(Vec::new());
    rgba.write_to(&mut out, image::ImageFormat::Png).unwrap();
    let loaded = LoadedImage::from_bytes(out.into_inner()).unwrap();
    let rgb = loaded.to_rgb().unwrap();
    assert_eq!(rgb.get_pixel(0, 0).0, [255, 255, 255]);
}

#[test]
fn data_urls_decode_base64_and_percent() {
    assert_eq!(decode_data_url("data:text/plain;base64,aGk=").unwrap(), b"hi");
    assert_eq!(decode_data_url("data:text/plain,a%20b").unwrap(), b"a b");
    assert!(decode_data_url("data:nocomma").is_err());
}

#[tokio::test]
async fn cache_memoizes_hits_and_failures() {
    let mut loader = MemoryLoader::new();
    loader.insert("bg.png", png(5, 5));
    let mut cache = ResourceCache::new();

    assert!(cache.image(&loader, "bg.png").await.loaded().is_some());
    assert!(cache.image(&loader, "bg.png").await.loaded().is_some());
    assert!(cache.image(&loader, "missing.png").await.loaded().is_none());
    assert!(cache.image(&loader, "missing.png").await.loaded().is_none());

    assert_eq!(loader.fetch_count(), 2);
    assert_eq!(cache.len(), 2);
    assert!(matches!(cache.cached_image("missing.png"), Some(Fetch::Failed)));
}

#[tokio::test]
async fn icons_and_sources_do_not_share_keys() {
    let mut loader = MemoryLoader::new();
    loader.insert("chair", png(2, 2));
    loader.insert_icon("chair", SVG_ICON.as_bytes().to_vec());
    let mut cache = ResourceCache::new();

    let icon = cache.icon(&loader, "chair").await;
    let source = cache.image(&loader, "chair").await;
    assert_eq!(icon.loaded().unwrap().kind(), ImageKind::Svg);
    assert_eq!(source.loaded().unwrap().kind(), ImageKind::Png);
}

#[tokio::test]
async fn fs_loader_reads_relative_to_root_and_icon_dir() {
    let dir = std::env::temp_dir().join(format!("plan-raster-fs-{}", std::process::id()));
    std::fs::create_dir_all(dir.join("icons")).unwrap();
    std::fs::write(dir.join("bg.png"), png(3, 3)).unwrap();
    std::fs::write(dir.join("icons").join("exit.svg"), SVG_ICON).unwrap();

    let loader = FsLoader::new()
        .with_root(&dir)
        .with_icon_dir(dir.join("icons"));
    assert!(loader.fetch("bg.png").await.is_ok());
    assert!(loader.fetch("nope.png").await.is_err());
    assert!(loader.fetch("https://example.com/a.png").await.is_err());
    assert!(loader.fetch_icon("exit").await.is_ok());
    assert!(loader.fetch_icon("../bg").await.is_err());

    std::fs::remove_dir_all(&dir).ok();
}
