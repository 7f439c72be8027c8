use photo_tagger::core::catalog::Catalog;
use photo_tagger::core::save::{save_photo, PendingEdit};
use photo_tagger::models::{PhotoDate, PhotoEntry};
use photo_tagger::storage::{FolderStore, FsFolderStore};
use photo_tagger::TaggerError;

#[tokio::test]
async fn fs_store_round_trips_files() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = FsFolderStore::open(dir.path()).expect("open store");

    store.write("photo.png", b"pixels").await.expect("write");
    assert_eq!(store.read("photo.png").await.expect("read"), b"pixels");

    store.rename("photo.png", "renamed.png").await.expect("rename");
    assert!(store.read("photo.png").await.is_err());

    let entries = store.enumerate().await.expect("enumerate");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "renamed.png");
    assert_eq!(entries[0].size, 6);

    store.delete("renamed.png").await.expect("delete");
    assert!(store.enumerate().await.expect("enumerate").is_empty());
}

#[tokio::test]
async fn fs_store_finds_sidecars_case_insensitively() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = FsFolderStore::open(dir.path()).expect("open store");

    store.write("shot.nef", b"raw").await.expect("write photo");
    store.write("SHOT.NEF.XMP", b"<x/>").await.expect("write sidecar");

    assert_eq!(
        store.sidecar_for("shot.nef").await.as_deref(),
        Some("SHOT.NEF.XMP")
    );
    assert_eq!(store.sidecar_for("other.nef").await, None);
}

#[test]
fn opening_a_missing_folder_is_an_unsupported_environment() {
    let result = FsFolderStore::open("/definitely/not/a/real/folder");
    assert!(matches!(
        result,
        Err(TaggerError::UnsupportedEnvironment(_))
    ));
}

#[tokio::test]
async fn scan_and_save_against_a_real_folder() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = FsFolderStore::open(dir.path()).expect("open store");
    store.write("trip.png", b"png-bytes").await.expect("write");

    let catalog = Catalog::scan(&store).await.expect("scan");
    assert_eq!(catalog.photos().len(), 1);

    let entry = PhotoEntry::new("trip.png", 9, 0);
    let edit = PendingEdit {
        date: Some(PhotoDate::new(2024, 3, 5)),
        coordinates: None,
    };
    save_photo(&store, &entry, edit).await.expect("save");

    assert!(dir.path().join("trip.png.xmp").is_file());
}
