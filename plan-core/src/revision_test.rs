use chrono::{TimeZone, Utc};

use super::*;

fn rev(day: u32, major: u32, minor: u32, sequence: Option<u64>) -> Revision {
    Revision {
        created_at: Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap(),
        major,
        minor,
        sequence,
        background: None,
        objects: Vec::new(),
        rooms: Vec::new(),
    }
}

#[test]
fn latest_is_by_timestamp_not_position() {
    let revisions = vec![rev(10, 2, 0, None), rev(20, 3, 1, None), rev(5, 1, 0, None)];
    let latest = latest_revision(&revisions).unwrap();
    assert_eq!((latest.major, latest.minor), (3, 1));
}

#[test]
fn equal_timestamps_break_on_sequence() {
    let revisions = vec![rev(10, 1, 2, Some(7)), rev(10, 1, 1, Some(3))];
    let latest = latest_revision(&revisions).unwrap();
    assert_eq!(latest.minor, 2);
}

#[test]
fn equal_timestamps_without_sequence_prefer_later_entry() {
    let revisions = vec![rev(10, 1, 1, None), rev(10, 1, 2, None)];
    assert_eq!(latest_revision(&revisions).unwrap().minor, 2);
}

#[test]
fn stamp_label_and_date() {
    let plan = FloorPlan {
        revisions: vec![rev(1, 0, 9, None), rev(15, 4, 2, None)],
        ..FloorPlan::default()
    };
    let stamp = RevisionStamp::for_plan(&plan).unwrap();
    assert_eq!(stamp.label(), "Rev: 4.2");
    assert_eq!(stamp.date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
}

#[test]
fn no_revisions_no_stamp() {
    assert!(RevisionStamp::for_plan(&FloorPlan::default()).is_none());
}
