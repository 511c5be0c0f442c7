use super::*;

#[test]
fn parse_expire_minutes_accepts_choices() {
    for (minutes, _) in EXPIRE_CHOICES {
        assert_eq!(parse_expire_minutes(&minutes.to_string()), minutes);
    }
}

#[test]
fn parse_expire_minutes_falls_back_to_default() {
    assert_eq!(parse_expire_minutes(""), DEFAULT_EXPIRE_MINUTES);
    assert_eq!(parse_expire_minutes("soon"), DEFAULT_EXPIRE_MINUTES);
    assert_eq!(parse_expire_minutes("-5"), DEFAULT_EXPIRE_MINUTES);
}

#[test]
fn expire_choices_include_never() {
    assert!(EXPIRE_CHOICES.iter().any(|(minutes, _)| *minutes == 0));
}
