use super::*;

// =============================================================================
// stored_name
// =============================================================================

#[test]
fn stored_name_replaces_unsafe_channel_chars() {
    let name = stored_name("../etc passwd", 1_700_000_000);
    assert!(name.starts_with("___etc_passwd_"));
    assert!(name.ends_with("_1700000000"));
    assert!(!name.contains('/'));
}

#[test]
fn stored_names_are_unique() {
    assert_ne!(stored_name("general", 1), stored_name("general", 1));
}

// =============================================================================
// display_name
// =============================================================================

#[test]
fn display_name_strips_directories() {
    assert_eq!(display_name(Some("C:\\Users\\me\\report.pdf")), "report.pdf");
    assert_eq!(display_name(Some("/tmp/notes.txt")), "notes.txt");
}

#[test]
fn display_name_falls_back_for_empty_or_dot_names() {
    assert_eq!(display_name(None), "file");
    assert_eq!(display_name(Some("")), "file");
    assert_eq!(display_name(Some("dir/")), "file");
    assert_eq!(display_name(Some("..")), "file");
}

// =============================================================================
// content_disposition
// =============================================================================

#[test]
fn content_disposition_quotes_plain_names() {
    assert_eq!(content_disposition("a b.txt"), "attachment; filename=\"a b.txt\"");
}

#[test]
fn content_disposition_neutralises_quotes_and_newlines() {
    assert_eq!(content_disposition("x\"y\r\n.txt"), "attachment; filename=\"x_y__.txt\"");
}

// =============================================================================
// error codes
// =============================================================================

#[test]
fn error_codes_match_wire_strings() {
    assert_eq!(FileError::NoFile.error_code(), "no_file");
    assert_eq!(FileError::NotFound.error_code(), "not_found");
    assert_eq!(FileError::Expired.error_code(), "file_expired");
    let io = FileError::Io(std::io::Error::other("disk"));
    assert_eq!(io.error_code(), "internal_error");
}

#[test]
fn file_entry_serializes_client_shape() {
    let entry = FileEntry { id: 3, name: "a.txt".into(), size: 12, uploaded_at: 100, expire_at: None };
    assert_eq!(
        serde_json::to_value(&entry).unwrap(),
        serde_json::json!({"id": 3, "name": "a.txt", "size": 12, "uploaded_at": 100, "expire_at": null})
    );
}

// =============================================================================
// disk
// =============================================================================

#[tokio::test]
async fn remove_stored_ignores_missing_file() {
    let dir = std::env::temp_dir().join(format!("chanbox-files-{}", uuid::Uuid::new_v4().simple()));
    remove_stored(&dir, "nothing-here").await;
}

#[tokio::test]
async fn remove_stored_deletes_existing_file() {
    let dir = std::env::temp_dir().join(format!("chanbox-files-{}", uuid::Uuid::new_v4().simple()));
    tokio::fs::create_dir_all(&dir).await.unwrap();
    tokio::fs::write(dir.join("body"), b"x").await.unwrap();
    remove_stored(&dir, "body").await;
    assert!(!dir.join("body").exists());
    tokio::fs::remove_dir_all(&dir).await.unwrap();
}
