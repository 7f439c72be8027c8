use photo_tagger::core::catalog::Catalog;
use photo_tagger::models::{Coordinates, FilterKind, MetadataRecord, PhotoDate, PhotoEntry};
use photo_tagger::storage::MemoryFolderStore;

fn entry(name: &str) -> PhotoEntry {
    PhotoEntry::new(name, 1024, 0)
}

fn record(date: bool, location: bool) -> MetadataRecord {
    MetadataRecord {
        date: date.then(|| PhotoDate::new(2024, 3, 5)),
        coordinates: location.then(|| Coordinates::new(48.85, 2.35)),
        camera: Default::default(),
    }
}

#[test]
fn photos_sort_case_insensitively_with_stable_ties() {
    let mut catalog = Catalog::new();
    catalog.load(vec![
        entry("Zebra.jpg"),
        entry("apple.png"),
        entry("IMG_2.jpg"),
        entry("img_2.JPG"),
    ]);

    let names: Vec<&str> = catalog
        .photos()
        .iter()
        .map(|photo| photo.name.as_str())
        .collect();
    // Case-insensitive order, with the tie keeping its original order.
    assert_eq!(names, vec!["apple.png", "IMG_2.jpg", "img_2.JPG", "Zebra.jpg"]);
}

#[test]
fn load_selects_the_first_photo() {
    let mut catalog = Catalog::new();
    catalog.load(vec![entry("b.jpg"), entry("a.jpg")]);
    assert_eq!(catalog.current_photo().unwrap().name, "a.jpg");

    catalog.load(Vec::new());
    assert!(catalog.current_photo().is_none());
}

#[test]
fn filter_consults_the_classification_cache() {
    let mut catalog = Catalog::new();
    catalog.load(vec![
        entry("a.jpg"),
        entry("b.jpg"),
        entry("c.jpg"),
        entry("d.jpg"),
    ]);
    catalog.cache_record("a.jpg", record(false, false));
    catalog.cache_record("b.jpg", record(true, false));
    catalog.cache_record("c.jpg", record(false, true));
    catalog.cache_record("d.jpg", record(true, true));

    catalog.set_filter(FilterKind::Untagged);
    let visible: Vec<&str> = catalog
        .filtered()
        .iter()
        .map(|photo| photo.name.as_str())
        .collect();
    assert_eq!(visible, vec!["a.jpg"]);

    catalog.set_filter(FilterKind::HasLocation);
    let visible: Vec<&str> = catalog
        .filtered()
        .iter()
        .map(|photo| photo.name.as_str())
        .collect();
    assert_eq!(visible, vec!["c.jpg", "d.jpg"]);
}

#[test]
fn uncached_photos_count_as_fully_untagged() {
    let mut catalog = Catalog::new();
    catalog.load(vec![entry("a.jpg"), entry("b.jpg")]);
    catalog.cache_record("b.jpg", record(true, true));

    let classification = catalog.classification("a.jpg");
    assert!(!classification.has_date);
    assert!(!classification.has_location);

    catalog.set_filter(FilterKind::Untagged);
    assert_eq!(catalog.filtered().len(), 1);
    assert_eq!(catalog.filtered()[0].name, "a.jpg");
}

#[test]
fn selecting_a_filter_clears_multiselect_and_reselects_first() {
    let mut catalog = Catalog::new();
    catalog.load(vec![entry("a.jpg"), entry("b.jpg"), entry("c.jpg")]);
    catalog.select_range(0, 2);
    assert_eq!(catalog.selection_count(), 3);

    catalog.set_filter(FilterKind::All);
    assert_eq!(catalog.selection_count(), 0);
    assert_eq!(catalog.current_photo().unwrap().name, "a.jpg");
}

#[test]
fn empty_filter_result_blanks_the_viewer() {
    let mut catalog = Catalog::new();
    catalog.load(vec![entry("a.jpg")]);
    catalog.cache_record("a.jpg", record(true, true));

    catalog.set_filter(FilterKind::Untagged);
    assert!(catalog.filtered().is_empty());
    assert!(catalog.current_photo().is_none());
}

#[test]
fn save_targets_prefer_the_multiselection() {
    let mut catalog = Catalog::new();
    catalog.load(vec![entry("a.jpg"), entry("b.jpg"), entry("c.jpg")]);

    // Single selection: target is the current photo.
    catalog.select(1);
    let targets: Vec<String> = catalog
        .save_targets()
        .into_iter()
        .map(|photo| photo.name)
        .collect();
    assert_eq!(targets, vec!["b.jpg"]);

    catalog.toggle_selection(0);
    catalog.toggle_selection(2);
    let targets: Vec<String> = catalog
        .save_targets()
        .into_iter()
        .map(|photo| photo.name)
        .collect();
    assert_eq!(targets, vec!["a.jpg", "c.jpg"]);
}

#[test]
fn rename_invalidates_the_cache_and_resorts() {
    let mut catalog = Catalog::new();
    catalog.load(vec![entry("a.jpg"), entry("m.jpg"), entry("z.jpg")]);
    catalog.cache_record("m.jpg", record(true, true));

    catalog.apply_rename("m.jpg", "zz.jpg", None);

    assert!(catalog.record("m.jpg").is_none());
    assert!(catalog.record("zz.jpg").is_none());
    let names: Vec<&str> = catalog
        .photos()
        .iter()
        .map(|photo| photo.name.as_str())
        .collect();
    assert_eq!(names, vec!["a.jpg", "z.jpg", "zz.jpg"]);
}

#[test]
fn refilter_keeps_the_current_photo_when_still_visible() {
    let mut catalog = Catalog::new();
    catalog.load(vec![entry("a.jpg"), entry("b.jpg")]);
    catalog.set_filter(FilterKind::NoDate);
    catalog.select(1);

    // a.jpg gains a date; it drops out of the no-date view on refilter.
    catalog.cache_record("a.jpg", record(true, false));
    catalog.refilter();

    assert_eq!(catalog.current_photo().unwrap().name, "b.jpg");
    assert_eq!(catalog.filtered().len(), 1);
}

#[test]
fn selection_bumps_the_display_epoch() {
    let mut catalog = Catalog::new();
    catalog.load(vec![entry("a.jpg"), entry("b.jpg")]);

    let before = catalog.display_epoch();
    catalog.select(1);
    let after = catalog.display_epoch();

    assert_ne!(before, after);
    assert!(!catalog.is_current_epoch(before));
    assert!(catalog.is_current_epoch(after));
}

#[tokio::test]
async fn scan_associates_sidecars_case_insensitively() {
    let store = MemoryFolderStore::new();
    store.insert("holiday.NEF", b"raw-bytes".to_vec());
    store.insert("HOLIDAY.NEF.xmp", b"<x/>".to_vec());
    store.insert("beach.jpg", b"jpeg-bytes".to_vec());
    store.insert("notes.txt", b"not a photo".to_vec());

    let catalog = Catalog::scan(&store).await.expect("scan should succeed");

    let names: Vec<&str> = catalog
        .photos()
        .iter()
        .map(|photo| photo.name.as_str())
        .collect();
    assert_eq!(names, vec!["beach.jpg", "holiday.NEF"]);

    let nef = &catalog.photos()[1];
    assert_eq!(nef.sidecar.as_deref(), Some("HOLIDAY.NEF.xmp"));
    assert!(!catalog.photos()[0].has_sidecar());
}

#[test]
fn range_select_over_an_empty_view_selects_nothing() {
    let mut catalog = Catalog::new();
    catalog.load(vec![entry("a.jpg")]);
    catalog.cache_record("a.jpg", record(true, true));

    // Untagged view is empty; a drag-select over it must not create
    // phantom selections.
    catalog.set_filter(FilterKind::Untagged);
    catalog.select_range(0, 0);
    assert_eq!(catalog.selection_count(), 0);
    assert!(catalog.save_targets().is_empty());
}

#[test]
fn navigation_clamps_at_the_ends() {
    let mut catalog = Catalog::new();
    catalog.load(vec![entry("a.jpg"), entry("b.jpg")]);

    assert_eq!(catalog.navigate(-1).unwrap().name, "a.jpg");
    assert_eq!(catalog.navigate(1).unwrap().name, "b.jpg");
    assert_eq!(catalog.navigate(1).unwrap().name, "b.jpg");
}
