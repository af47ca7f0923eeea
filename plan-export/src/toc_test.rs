use super::*;

fn entry(breadcrumb: &str, client: Option<&str>, target_page: usize) -> TocEntry {
    TocEntry {
        breadcrumb: breadcrumb.to_string(),
        client_name: client.map(str::to_string),
        client_logo: None,
        target_page,
    }
}

fn header() -> IndexHeader {
    IndexHeader {
        product_name: "Floorprint".to_string(),
        title: "Floor plans".to_string(),
        generated_on: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
        categories: vec!["Rooms", "Walls"],
        logo: None,
    }
}

#[test]
fn lines_per_page_uses_usable_height() {
    let page = PageConfig::default();
    let index = IndexConfig::default();
    // (595 - 72 - 120) / 18 = 22.4
    assert_eq!(lines_per_page(&page, &index), 22);

    let cramped = IndexConfig {
        header_reserve: 10_000.0,
        ..IndexConfig::default()
    };
    assert_eq!(lines_per_page(&page, &cramped), 1);
}

#[test]
fn index_pages_round_up() {
    assert_eq!(index_page_count(1, 22), 1);
    assert_eq!(index_page_count(22, 22), 1);
    assert_eq!(index_page_count(23, 22), 2);
    assert_eq!(index_page_count(50, 22), 3);
    assert_eq!(index_page_count(0, 22), 1);
}

#[test]
fn rows_group_on_client_change() {
    let rows = toc_rows(&[Some("Acme"), Some("Acme"), None, Some("Acme"), Some(" Beta ")]);
    assert_eq!(
        rows,
        vec![
            TocRow::Group { entry: 0 },
            TocRow::Entry { entry: 0, grouped: true },
            TocRow::Entry { entry: 1, grouped: true },
            TocRow::Entry { entry: 2, grouped: false },
            TocRow::Group { entry: 3 },
            TocRow::Entry { entry: 3, grouped: true },
            TocRow::Group { entry: 4 },
            TocRow::Entry { entry: 4, grouped: true },
        ]
    );
    assert_eq!(toc_rows(&[None, None]).len(), 2);
}

#[test]
fn short_index_is_centered_on_first_page() {
    let page = PageConfig::default();
    let index = IndexConfig::default();
    let rows = toc_rows(&[None, None]);
    let slots = layout_rows(&rows, &page, &index);
    assert_eq!(slots.len(), 2);
    let region_top = page.height - page.margin - index.header_reserve;
    let region_bottom = page.margin;
    let block_bottom = slots[1].top - index.line_height;
    let gap_above = region_top - slots[0].top;
    let gap_below = block_bottom - region_bottom;
    assert!((gap_above - gap_below).abs() < 1e-3);
}

#[test]
fn long_index_spills_onto_later_pages_at_top_offset() {
    let page = PageConfig::default();
    let index = IndexConfig::default();
    let names = vec![None; 30];
    let rows = toc_rows(&names);
    let slots = layout_rows(&rows, &page, &index);

    let first: Vec<&RowSlot> = slots.iter().filter(|s| s.page == 0).collect();
    let second: Vec<&RowSlot> = slots.iter().filter(|s| s.page == 1).collect();
    assert_eq!((first.len(), second.len()), (22, 8));
    assert_eq!(first[0].top, page.height - page.margin - index.header_reserve);
    assert_eq!(second[0].top, page.height - page.margin - index.top_offset);
    assert!(slots.iter().all(|s| s.top - index.line_height >= page.margin - 1e-3));
}

#[test]
fn links_target_each_entry_page() {
    let page = PageConfig::default();
    let index = IndexConfig::default();
    let entries: Vec<TocEntry> = (0..25)
        .map(|i| entry(&format!("Site / Floor {i}"), None, 2 + i))
        .collect();
    let mut pdf = PdfBuilder::new(page.width, page.height);
    let index_pages = vec![pdf.add_page(), pdf.add_page()];
    for _ in 0..25 {
        pdf.add_page();
    }
    draw_index(&mut pdf, &index_pages, &entries, &header(), &page, &index);

    let mut targets = pdf.link_targets(0);
    targets.extend(pdf.link_targets(1));
    assert_eq!(targets, (2..27).collect::<Vec<_>>());
    assert_eq!(pdf.link_count(0), 22);
}

#[test]
fn group_headings_are_not_links() {
    let page = PageConfig::default();
    let index = IndexConfig::default();
    let entries = vec![
        entry("HQ / Ground", Some("Acme"), 1),
        entry("HQ / First", Some("Acme"), 2),
    ];
    let mut pdf = PdfBuilder::new(page.width, page.height);
    let first = pdf.add_page();
    pdf.add_page();
    pdf.add_page();
    draw_index(&mut pdf, &[first], &entries, &header(), &page, &index);
    assert_eq!(pdf.link_targets(first), vec![1, 2]);

    let text = String::from_utf8_lossy(&pdf.finish("t", "p")).to_string();
    assert!(text.contains("(Acme)"));
    assert!(text.contains("(HQ / Ground)"));
    assert!(text.contains("(Floorprint)"));
    assert!(text.contains("(Included: Rooms, Walls)"));
}
