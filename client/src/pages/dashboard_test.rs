use super::*;

#[test]
fn rotation_label_names_each_choice() {
    let labels: Vec<String> = ROTATION_MINUTES.iter().map(|m| rotation_label(*m)).collect();
    assert_eq!(labels, vec!["1 hour", "1 day", "1 week"]);
    assert_eq!(rotation_label(5), "5 minutes");
}

#[test]
fn describe_key_permanent() {
    let info = KeyInfo { created_at: 1, expires_at: None, is_permanent: true, can_rotate: true };
    assert_eq!(describe_key(&info, 100), "Permanent key");
}

#[test]
fn describe_key_visitor_shows_remaining_time() {
    let info = KeyInfo { created_at: 1, expires_at: Some(100 + 3_600), is_permanent: false, can_rotate: false };
    assert_eq!(describe_key(&info, 100), "Visitor key, expires in 1 h");
}
