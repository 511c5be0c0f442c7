use super::*;
use axum::http::HeaderValue;

fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in pairs {
        map.insert(*name, HeaderValue::from_static(value));
    }
    map
}

fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect()
}

#[test]
fn credential_prefers_header_over_query() {
    let h = headers(&[(MASTER_KEY_HEADER, "from-header")]);
    let q = query(&[(MASTER_KEY_PARAM, "from-query")]);
    assert_eq!(credential(&h, &q, MASTER_KEY_HEADER, MASTER_KEY_PARAM).as_deref(), Some("from-header"));
}

#[test]
fn credential_falls_back_to_query() {
    let q = query(&[(CHANNEL_PASSWORD_PARAM, "pw")]);
    assert_eq!(
        credential(&HeaderMap::new(), &q, CHANNEL_PASSWORD_HEADER, CHANNEL_PASSWORD_PARAM).as_deref(),
        Some("pw")
    );
}

#[test]
fn empty_header_counts_as_absent() {
    let h = headers(&[(MASTER_KEY_HEADER, "")]);
    let q = query(&[(MASTER_KEY_PARAM, "from-query")]);
    assert_eq!(credential(&h, &q, MASTER_KEY_HEADER, MASTER_KEY_PARAM).as_deref(), Some("from-query"));
}

#[test]
fn nothing_supplied_is_none() {
    let q = query(&[(MASTER_KEY_PARAM, "")]);
    assert_eq!(credential(&HeaderMap::new(), &q, MASTER_KEY_HEADER, MASTER_KEY_PARAM), None);
}

#[test]
fn query_params_decode_percent_escapes() {
    let (parts, ()) = axum::http::Request::builder()
        .uri("/api/channel/general/download/1?master_key=a%2Bb&password=p%26w")
        .body(())
        .unwrap()
        .into_parts();
    let q = query_params(&parts);
    assert_eq!(q.get(MASTER_KEY_PARAM).map(String::as_str), Some("a+b"));
    assert_eq!(q.get(CHANNEL_PASSWORD_PARAM).map(String::as_str), Some("p&w"));
}
