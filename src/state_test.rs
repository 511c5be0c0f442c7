use super::*;

#[tokio::test]
async fn test_app_state_uses_default_upload_dir() {
    let state = test_helpers::test_app_state();
    assert_eq!(state.upload_dir(), Path::new("uploads"));
}

#[tokio::test]
async fn clones_share_config() {
    let state = test_helpers::test_app_state();
    let clone = state.clone();
    assert!(Arc::ptr_eq(&state.config, &clone.config));
}
