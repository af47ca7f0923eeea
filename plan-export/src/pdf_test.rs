use super::*;

fn jpeg(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(w, h, image::Rgb([200, 10, 10]));
    let mut buf = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, 80)
        .encode(img.as_raw(), w, h, image::ExtendedColorType::Rgb8)
        .unwrap();
    buf
}

fn contains(haystack: &[u8], needle: &str) -> bool {
    haystack
        .windows(needle.len())
        .any(|w| w == needle.as_bytes())
}

#[test]
fn pages_links_and_images_are_written() {
    let mut pdf = PdfBuilder::new(842.0, 595.0);
    let index = pdf.add_page();
    let plan = pdf.add_page();
    assert_eq!((index, plan, pdf.page_count()), (0, 1, 2));

    let img = pdf.embed_jpeg(&jpeg(4, 2), 4, 2);
    pdf.draw_image(plan, &img, 10.0, 10.0, 400.0, 200.0);
    pdf.text(index, 36.0, 500.0, 11.0, Font::Regular, Rgb::BLACK, "Floor 1");
    pdf.text_right(index, 806.0, 500.0, 11.0, Font::Bold, Rgb::BLACK, "2");
    pdf.link(index, 36.0, 495.0, 100.0, 18.0, plan);
    assert_eq!(pdf.link_targets(index), vec![plan]);
    assert_eq!(pdf.link_count(plan), 0);

    let bytes = pdf.finish("Plans", "floorprint");
    assert!(bytes.starts_with(b"%PDF-"));
    for needle in [
        "/Helvetica-Bold",
        "/WinAnsiEncoding",
        "/DCTDecode",
        "/Link",
        "/GoTo",
        "(Floor 1)",
        "/Count 2",
        "(Plans)",
    ] {
        assert!(contains(&bytes, needle), "missing {needle}");
    }
}

#[test]
fn drawing_on_unknown_pages_is_ignored() {
    let mut pdf = PdfBuilder::new(100.0, 100.0);
    pdf.text(3, 0.0, 0.0, 10.0, Font::Regular, Rgb::BLACK, "nowhere");
    pdf.link(3, 0.0, 0.0, 1.0, 1.0, 0);
    assert_eq!(pdf.page_count(), 0);
    let bytes = pdf.finish("", "");
    assert!(contains(&bytes, "/Count 0"));
}

#[test]
fn output_is_deterministic() {
    let build = || {
        let mut pdf = PdfBuilder::new(200.0, 100.0);
        let p = pdf.add_page();
        pdf.fill_rect(p, 0.0, 0.0, 10.0, 10.0, Rgb(0.5, 0.5, 0.5));
        pdf.line(p, (0.0, 0.0), (10.0, 10.0), 1.0, Rgb::BLACK);
        pdf.finish("t", "p")
    };
    assert_eq!(build(), build());
}
