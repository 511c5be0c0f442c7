use super::*;

// =============================================================
// AppRoute::parse
// =============================================================

#[test]
fn parse_root_is_gate() {
    assert_eq!(AppRoute::parse("/"), Some(AppRoute::Gate));
    assert_eq!(AppRoute::parse(""), Some(AppRoute::Gate));
}

#[test]
fn parse_dash_is_dashboard_not_channel() {
    assert_eq!(AppRoute::parse("/dash"), Some(AppRoute::Dashboard));
}

#[test]
fn parse_single_segment_is_channel() {
    assert_eq!(AppRoute::parse("/general"), Some(AppRoute::Channel("general".to_owned())));
}

#[test]
fn parse_password_suffix_is_prompt() {
    assert_eq!(
        AppRoute::parse("/general/password?cb=%2Fgeneral"),
        Some(AppRoute::PasswordPrompt("general".to_owned()))
    );
}

#[test]
fn parse_ignores_trailing_slash_and_fragment() {
    assert_eq!(AppRoute::parse("/general/#top"), Some(AppRoute::Channel("general".to_owned())));
}

#[test]
fn parse_unknown_shape_is_none() {
    assert_eq!(AppRoute::parse("/a/b/c"), None);
    assert_eq!(AppRoute::parse("/general/files"), None);
}

#[test]
fn path_renders_each_route() {
    assert_eq!(AppRoute::Gate.path(), "/");
    assert_eq!(AppRoute::Dashboard.path(), "/dash");
    assert_eq!(AppRoute::Channel("c1".to_owned()).path(), "/c1");
    assert_eq!(AppRoute::PasswordPrompt("c1".to_owned()).path(), "/c1/password");
}

#[test]
fn parse_decodes_escaped_channel_names() {
    assert_eq!(AppRoute::parse("/a%3Fb"), Some(AppRoute::Channel("a?b".to_owned())));
    assert_eq!(AppRoute::parse("/x%2Ffiles"), Some(AppRoute::Channel("x/files".to_owned())));
    assert_eq!(AppRoute::parse("/a%23b/password"), Some(AppRoute::PasswordPrompt("a#b".to_owned())));
}

#[test]
fn path_escapes_channel_names() {
    assert_eq!(AppRoute::Channel("a?b".to_owned()).path(), "/a%3Fb");
    assert_eq!(AppRoute::PasswordPrompt("x/files".to_owned()).path(), "/x%2Ffiles/password");
    let odd = AppRoute::Channel("50% off #1".to_owned());
    assert_eq!(AppRoute::parse(&odd.path()), Some(odd));
}

// =============================================================
// encode_segment
// =============================================================

#[test]
fn encode_segment_escapes_separators() {
    assert_eq!(encode_segment("general"), "general");
    assert_eq!(encode_segment("a?b"), "a%3Fb");
    assert_eq!(encode_segment("x/files"), "x%2Ffiles");
    assert_eq!(encode_segment("a#b"), "a%23b");
    assert_eq!(encode_segment("a b"), "a%20b");
    assert_eq!(encode_segment("%"), "%25");
}

#[test]
fn encode_segment_escapes_dot_segments() {
    assert_eq!(encode_segment("."), "%2E");
    assert_eq!(encode_segment(".."), "%2E%2E");
    assert_eq!(decode_segment("%2E%2E"), "..");
}

// =============================================================
// resolve
// =============================================================

fn resolve_with_key(key: Option<&str>, to: &str) -> RouteOutcome {
    use std::rc::Rc;

    use crate::router::CredentialGuard;
    use crate::state::credential::{Credentials, KeyValueStore, MASTER_KEY, MemoryStore};

    let store = MemoryStore::new();
    if let Some(key) = key {
        store.set_item(MASTER_KEY, key);
    }
    let guard = CredentialGuard::new(Credentials::new(Rc::new(store)));
    resolve(&guard, &RouteTransition { to: to.to_owned(), from: "/".to_owned() })
}

#[test]
fn resolve_without_key_never_renders_protected_pages() {
    for to in ["/dash", "/general", "/general/password?cb=%2Fgeneral", "/a/b/c"] {
        assert_eq!(resolve_with_key(None, to), RouteOutcome::Redirect("/".to_owned()), "{to}");
    }
}

#[test]
fn resolve_without_key_renders_gate() {
    assert_eq!(resolve_with_key(None, "/"), RouteOutcome::Render(AppRoute::Gate));
}

#[test]
fn resolve_with_key_matches_route_table() {
    assert_eq!(resolve_with_key(Some("mk"), "/dash"), RouteOutcome::Render(AppRoute::Dashboard));
    assert_eq!(resolve_with_key(Some("mk"), "/x"), RouteOutcome::Render(AppRoute::Channel("x".to_owned())));
    assert_eq!(
        resolve_with_key(Some("mk"), "/x/password?cb=%2Fx"),
        RouteOutcome::Render(AppRoute::PasswordPrompt("x".to_owned()))
    );
    assert_eq!(resolve_with_key(Some("mk"), "/a/b/c"), RouteOutcome::NotFound);
}

// =============================================================
// path_only
// =============================================================

#[test]
fn path_only_strips_query_and_fragment() {
    assert_eq!(path_only("/general?x=1"), "/general");
    assert_eq!(path_only("/general#f"), "/general");
    assert_eq!(path_only("/"), "/");
}

// =============================================================
// password_return_path
// =============================================================

#[test]
fn password_return_uses_local_cb() {
    assert_eq!(password_return_path("general", Some("/general?tab=files")), "/general?tab=files");
}

#[test]
fn password_return_rejects_external_cb() {
    assert_eq!(password_return_path("general", Some("https://evil.test/")), "/general");
    assert_eq!(password_return_path("general", Some("//evil.test/")), "/general");
}

#[test]
fn password_return_defaults_to_channel() {
    assert_eq!(password_return_path("general", None), "/general");
}

// =============================================================
// normalize_channel_name
// =============================================================

#[test]
fn normalize_channel_name_trims() {
    assert_eq!(normalize_channel_name("  general "), Some("general".to_owned()));
}

#[test]
fn normalize_channel_name_rejects_reserved_and_unsafe() {
    assert_eq!(normalize_channel_name(""), None);
    assert_eq!(normalize_channel_name("   "), None);
    assert_eq!(normalize_channel_name("dash"), None);
    assert_eq!(normalize_channel_name("a/b"), None);
    assert_eq!(normalize_channel_name("a?b"), None);
    assert_eq!(normalize_channel_name("a#b"), None);
    assert_eq!(normalize_channel_name("a%20b"), None);
}
