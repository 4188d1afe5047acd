use approx::assert_relative_eq;
use image::{Rgb, RgbImage};
use labeler_core::{
    AnnotatorConfig, Commit, Labeler, NoticeLevel, OrientedRgbLoader, Point, Release, Step,
};
use rstest::rstest;
use std::fs;
use std::path::Path;
use tempfile::{TempDir, tempdir};

fn write_png(path: &Path, w: u32, h: u32) {
    RgbImage::from_pixel(w, h, Rgb([200, 200, 200]))
        .save(path)
        .unwrap();
}

/// Images `a.png` and `b.png` plus a config pointing labels into the tempdir.
fn workspace() -> (TempDir, AnnotatorConfig) {
    let dir = tempdir().unwrap();
    let images = dir.path().join("images");
    fs::create_dir(&images).unwrap();
    write_png(&images.join("a.png"), 120, 80);
    write_png(&images.join("b.png"), 64, 64);
    let config = AnnotatorConfig {
        labels_dir: dir.path().join("labels"),
        sort_by_name: true,
        ..AnnotatorConfig::default()
    };
    (dir, config)
}

fn open(dir: &TempDir, config: &AnnotatorConfig) -> Labeler<OrientedRgbLoader> {
    Labeler::open(dir.path().join("images"), config, OrientedRgbLoader).unwrap()
}

#[test]
fn draw_label_and_come_back() {
    let (dir, config) = workspace();
    let mut l = open(&dir, &config);
    assert!(config.labels_dir.is_dir());
    assert_eq!(l.view().unwrap().extent(), (120, 80));

    l.press(Point::new(10.0, 10.0));
    l.drag(Point::new(30.0, 25.0));
    l.drag(Point::new(50.0, 40.0));
    assert!(matches!(
        l.release(Point::new(50.0, 40.0)),
        Release::AwaitingLabel(_)
    ));
    assert!(matches!(l.submit_label(Some("1")), Commit::Saved(_)));

    let text = fs::read_to_string(config.labels_dir.join("a.txt")).unwrap();
    assert_eq!(text, "1 10.0 10.0 40.0 30.0\n");
    assert_eq!(l.current().filename, "b.png");
    assert!(l.view().unwrap().overlays.is_empty());

    assert_eq!(l.next_image(), Step::AtEnd);
    assert_eq!(l.prev_image(), Step::Moved);
    let view = l.view().unwrap();
    assert_eq!(view.entry.filename, "a.png");
    assert_eq!(view.overlays.len(), 1);
    let r = view.overlays[0].rect();
    assert_relative_eq!(r.min().x, 10.0);
    assert_relative_eq!(r.min().y, 10.0);
    assert_relative_eq!(r.max().x, 50.0);
    assert_relative_eq!(r.max().y, 40.0);
}

#[test]
fn empty_label_writes_nothing() {
    let (dir, config) = workspace();
    let mut l = open(&dir, &config);

    l.press(Point::new(5.0, 5.0));
    l.release(Point::new(25.0, 15.0));
    assert_eq!(l.submit_label(Some("")), Commit::Rejected);

    assert!(!config.labels_dir.join("a.txt").exists());
    assert_eq!(l.current().filename, "a.png");
    let notices = l.drain_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Warning);
}

#[rstest]
#[case((10.0, 10.0), (50.0, 40.0))]
#[case((50.0, 40.0), (10.0, 10.0))]
#[case((7.5, 60.0), (99.25, 0.5))]
#[case((0.0, 0.0), (1.0, 79.0))]
fn committed_box_is_min_corner_and_absolute_extent(
    #[case] p1: (f64, f64),
    #[case] p2: (f64, f64),
) {
    let (dir, config) = workspace();
    let mut l = open(&dir, &config);
    l.press(Point::new(p1.0, p1.1));
    l.drag(Point::new(p2.0, p2.1));
    l.release(Point::new(p2.0, p2.1));
    l.submit_label(Some("obj"));

    let records = l.store().records_for("a.png").unwrap();
    assert_eq!(records.len(), 1);
    let r = &records[0];
    assert_eq!(r.label, "obj");
    assert_relative_eq!(r.x, p1.0.min(p2.0));
    assert_relative_eq!(r.y, p1.1.min(p2.1));
    assert_relative_eq!(r.width, (p2.0 - p1.0).abs());
    assert_relative_eq!(r.height, (p2.1 - p1.1).abs());
}

#[test]
fn repeated_sessions_append_in_order() {
    let (dir, config) = workspace();
    for i in 0..4 {
        let mut l = open(&dir, &config);
        let offset = i as f64;
        l.press(Point::new(offset, offset));
        l.release(Point::new(offset + 10.0, offset + 10.0));
        assert!(matches!(
            l.submit_label(Some(&i.to_string())),
            Commit::Saved(_)
        ));
    }

    let l = open(&dir, &config);
    let overlays = &l.view().unwrap().overlays;
    let labels: Vec<_> = overlays.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["0", "1", "2", "3"]);
}

#[test]
fn unreadable_image_is_skipped_at_startup() {
    let (dir, config) = workspace();
    fs::write(dir.path().join("images").join("0_broken.png"), b"nope").unwrap();
    let mut l = open(&dir, &config);
    assert_eq!(l.view().unwrap().entry.filename, "a.png");
    let notices = l.drain_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
}

#[test]
fn folder_without_images_fails_to_open() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("notes.txt"), "hi").unwrap();
    let config = AnnotatorConfig {
        labels_dir: dir.path().join("labels"),
        ..AnnotatorConfig::default()
    };
    assert!(Labeler::open(dir.path(), &config, OrientedRgbLoader).is_err());
}
