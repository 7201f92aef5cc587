use devblog_core::{BlogConfig, ConfigError};
use js_sys::Reflect;
use wasm_bindgen::JsValue;

/// Optional page global with overrides, e.g.
/// `<script>window.DEVBLOG_CONFIG = { previewWords: 40 };</script>`.
pub const CONFIG_GLOBAL: &str = "DEVBLOG_CONFIG";

pub fn page_config() -> BlogConfig {
    let window = gloo_utils::window();
    let raw = match Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)) {
        Ok(value) if !value.is_undefined() && !value.is_null() => value,
        _ => return BlogConfig::default(),
    };

    let parsed = serde_wasm_bindgen::from_value::<BlogConfig>(raw)
        .map_err(|e| ConfigError::Invalid(e.to_string()))
        .and_then(BlogConfig::validate);

    match parsed {
        Ok(config) => {
            log::info!("Using page configuration from window.{}", CONFIG_GLOBAL);
            config
        }
        Err(e) => {
            log::warn!("{}; falling back to defaults", e);
            BlogConfig::default()
        }
    }
}
