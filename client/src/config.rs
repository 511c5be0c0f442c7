//! Backend location, fixed at build time with an optional runtime override.
//!
//! The build reads `CHANBOX_BACKEND_URL`; a deployed page may replace it by
//! defining `window.CHANBOX_CONFIG = { api_base_url: "..." }` before the WASM
//! bundle loads. An empty base URL keeps requests same-origin.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Origin used to resolve relative URLs when no browser window exists.
pub const FALLBACK_ORIGIN: &str = "http://localhost";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
}

impl AppConfig {
    /// Build-time defaults with any runtime override applied.
    #[must_use]
    pub fn load() -> Self {
        let mut config = Self { api_base_url: option_env!("CHANBOX_BACKEND_URL").unwrap_or_default().trim().to_owned() };
        if let Some(runtime) = runtime_config() {
            config.apply(runtime);
        }
        config
    }

    fn apply(&mut self, runtime: RuntimeConfig) {
        if let Some(value) = runtime.api_base_url {
            self.api_base_url = value;
        }
    }
}

#[derive(Debug, Default)]
struct RuntimeConfig {
    api_base_url: Option<String>,
}

#[cfg(feature = "csr")]
fn runtime_config() -> Option<RuntimeConfig> {
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = js_sys::Reflect::get(&window, &JsValue::from_str("CHANBOX_CONFIG")).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }
    let api_base_url = js_sys::Reflect::get(&config, &JsValue::from_str("api_base_url"))
        .ok()
        .and_then(|value| value.as_string())
        .and_then(|value| normalize_runtime_value(&value));
    Some(RuntimeConfig { api_base_url })
}

#[cfg(not(feature = "csr"))]
fn runtime_config() -> Option<RuntimeConfig> {
    None
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) }
}

/// Origin of the page, used by the 403 handler to resolve request URLs.
#[must_use]
pub fn browser_origin() -> String {
    #[cfg(feature = "csr")]
    {
        web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_else(|| FALLBACK_ORIGIN.to_owned())
    }
    #[cfg(not(feature = "csr"))]
    {
        FALLBACK_ORIGIN.to_owned()
    }
}
