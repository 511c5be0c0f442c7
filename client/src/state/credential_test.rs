use super::*;

fn credentials_with_store() -> (Credentials, MemoryStore) {
    let store = MemoryStore::new();
    (Credentials::new(Rc::new(store.clone())), store)
}

// =============================================================
// Master key
// =============================================================

#[test]
fn master_key_absent_is_none() {
    let (credentials, _) = credentials_with_store();
    assert_eq!(credentials.master_key(), None);
    assert_eq!(credentials.header_value(), "");
}

#[test]
fn master_key_empty_string_counts_as_absent() {
    let (credentials, store) = credentials_with_store();
    store.set_item(MASTER_KEY, "");
    assert_eq!(credentials.master_key(), None);
    assert_eq!(credentials.header_value(), "");
}

#[test]
fn master_key_reads_live_store_value() {
    let (credentials, store) = credentials_with_store();
    store.set_item(MASTER_KEY, "first");
    assert_eq!(credentials.master_key().as_deref(), Some("first"));
    store.set_item(MASTER_KEY, "second");
    assert_eq!(credentials.master_key().as_deref(), Some("second"));
}

#[test]
fn set_master_key_trims_and_clear_removes() {
    let (credentials, store) = credentials_with_store();
    credentials.set_master_key("  abc123 \n");
    assert_eq!(store.get_item(MASTER_KEY).as_deref(), Some("abc123"));
    credentials.clear_master_key();
    assert_eq!(store.get_item(MASTER_KEY), None);
}

#[test]
fn cloned_credentials_share_the_store() {
    let (credentials, _) = credentials_with_store();
    let other = credentials.clone();
    credentials.set_master_key("shared");
    assert_eq!(other.header_value(), "shared");
}

// =============================================================
// Channel passwords
// =============================================================

#[test]
fn channel_password_round_trips_per_channel() {
    let (credentials, _) = credentials_with_store();
    credentials.set_channel_password("general", "hunter2");
    assert_eq!(credentials.channel_password("general").as_deref(), Some("hunter2"));
    assert_eq!(credentials.channel_password("random"), None);
}

#[test]
fn channel_password_uses_prefixed_key() {
    let (credentials, store) = credentials_with_store();
    credentials.set_channel_password("general", "pw");
    assert_eq!(store.get_item("CHANNEL_PASSWORD:general").as_deref(), Some("pw"));
}

#[test]
fn empty_channel_password_forgets_entry() {
    let (credentials, store) = credentials_with_store();
    credentials.set_channel_password("general", "pw");
    credentials.set_channel_password("general", "");
    assert_eq!(store.get_item("CHANNEL_PASSWORD:general"), None);
}

// =============================================================
// BrowserStore off-browser
// =============================================================

#[test]
fn browser_store_is_empty_without_a_window() {
    let credentials = Credentials::browser();
    credentials.set_master_key("ignored");
    assert_eq!(credentials.master_key(), None);
}
