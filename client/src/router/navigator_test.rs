use super::*;
use crate::state::credential::{Credentials, KeyValueStore, MASTER_KEY, MemoryStore};

fn credential_guard(store: &MemoryStore) -> CredentialGuard {
    CredentialGuard::new(Credentials::new(Rc::new(store.clone())))
}

// =============================================================
// NavigationTarget
// =============================================================

#[test]
fn href_without_query_is_path() {
    assert_eq!(NavigationTarget::new("/dash").href(), "/dash");
}

#[test]
fn href_encodes_query_values() {
    let target = NavigationTarget::new("/general/password").with_query("cb", "/general?tab=files");
    assert_eq!(target.href(), "/general/password?cb=%2Fgeneral%3Ftab%3Dfiles");
}

#[test]
fn href_joins_multiple_pairs() {
    let target = NavigationTarget::new("/x").with_query("a", "1").with_query("b", "two words");
    assert_eq!(target.href(), "/x?a=1&b=two+words");
}

// =============================================================
// MemoryNavigator
// =============================================================

#[test]
fn memory_navigator_commits_without_guards() {
    let nav = MemoryNavigator::new("/");
    nav.push(&NavigationTarget::new("/general"));
    assert_eq!(nav.current_full_path(), "/general");
    assert_eq!(nav.history(), vec!["/general".to_owned()]);
}

#[test]
fn memory_navigator_applies_guard_redirect() {
    let store = MemoryStore::new();
    let nav = MemoryNavigator::new("/").with_guard(Rc::new(credential_guard(&store)));
    nav.push(&NavigationTarget::new("/general"));
    assert_eq!(nav.current_full_path(), "/");
    assert_eq!(nav.history(), vec!["/".to_owned()]);
}

#[test]
fn memory_navigator_proceeds_with_credential() {
    let store = MemoryStore::new();
    store.set_item(MASTER_KEY, "mk");
    let nav = MemoryNavigator::new("/").with_guard(Rc::new(credential_guard(&store)));
    nav.push(&NavigationTarget::new("/general"));
    assert_eq!(nav.current_full_path(), "/general");
}

#[test]
fn memory_navigator_reaches_gate_without_credential() {
    let store = MemoryStore::new();
    let nav = MemoryNavigator::new("/general").with_guard(Rc::new(credential_guard(&store)));
    nav.push(&NavigationTarget::new("/"));
    assert_eq!(nav.history(), vec!["/".to_owned()]);
}

// =============================================================
// BrowserNavigator
// =============================================================

#[test]
fn browser_navigator_forwards_href_when_allowed() {
    let store = MemoryStore::new();
    store.set_item(MASTER_KEY, "mk");
    let calls: Rc<RefCell<Vec<(String, bool)>>> = Rc::default();
    let sink = Rc::clone(&calls);
    let nav = BrowserNavigator::new(
        move |to: &str, options: NavigateOptions| sink.borrow_mut().push((to.to_owned(), options.replace)),
        credential_guard(&store),
    );

    nav.push(&NavigationTarget::new("/general").with_query("cb", "/dash"));

    assert_eq!(*calls.borrow(), vec![("/general?cb=%2Fdash".to_owned(), false)]);
}

#[test]
fn browser_navigator_replaces_with_gate_when_blocked() {
    let store = MemoryStore::new();
    let calls: Rc<RefCell<Vec<(String, bool)>>> = Rc::default();
    let sink = Rc::clone(&calls);
    let nav = BrowserNavigator::new(
        move |to: &str, options: NavigateOptions| sink.borrow_mut().push((to.to_owned(), options.replace)),
        credential_guard(&store),
    );

    nav.push(&NavigationTarget::new("/dash"));

    assert_eq!(*calls.borrow(), vec![("/".to_owned(), true)]);
}

#[test]
fn browser_navigator_off_browser_reports_gate_path() {
    let store = MemoryStore::new();
    let nav = BrowserNavigator::new(|_: &str, _: NavigateOptions| {}, credential_guard(&store));
    assert_eq!(nav.current_full_path(), "/");
}
