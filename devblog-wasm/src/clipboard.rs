use async_trait::async_trait;
use devblog_core::clipboard::ClipboardBackend;
use devblog_core::ClipboardError;
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlDocument, HtmlTextAreaElement};

pub const MANUAL_COPY_MESSAGE: &str =
    "Could not copy automatically. Please select the JSON in the dialog and copy it manually (Ctrl+C / Cmd+C).";

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClipboard;

fn rejected(value: JsValue) -> ClipboardError {
    ClipboardError::Rejected(format!("{:?}", value))
}

#[async_trait(?Send)]
impl ClipboardBackend for BrowserClipboard {
    async fn write_modern(&self, text: &str) -> Result<(), ClipboardError> {
        let navigator = gloo_utils::window().navigator();

        // navigator.clipboard отсутствует вне secure context
        let clipboard = Reflect::get(&navigator, &JsValue::from_str("clipboard")).map_err(rejected)?;
        if clipboard.is_undefined() || clipboard.is_null() {
            return Err(ClipboardError::Unavailable);
        }

        let write_text = Reflect::get(&clipboard, &JsValue::from_str("writeText"))
            .map_err(rejected)?
            .dyn_into::<Function>()
            .map_err(|_| ClipboardError::Unavailable)?;

        let promise = write_text
            .call1(&clipboard, &JsValue::from_str(text))
            .map_err(rejected)?
            .dyn_into::<Promise>()
            .map_err(rejected)?;

        JsFuture::from(promise).await.map_err(rejected)?;
        Ok(())
    }

    fn write_legacy(&self, text: &str) -> Result<(), ClipboardError> {
        let document = gloo_utils::document();
        let body = document.body().ok_or(ClipboardError::Unavailable)?;

        let textarea = document
            .create_element("textarea")
            .map_err(rejected)?
            .dyn_into::<HtmlTextAreaElement>()
            .map_err(|e| rejected(e.into()))?;
        textarea.set_value(text);
        textarea
            .set_attribute("readonly", "")
            .and_then(|_| textarea.set_attribute("style", "position:fixed;top:0;left:-9999px;"))
            .map_err(rejected)?;

        body.append_child(&textarea).map_err(rejected)?;
        textarea.select();

        let copied = document
            .dyn_ref::<HtmlDocument>()
            .ok_or(ClipboardError::Unavailable)
            .and_then(|doc| doc.exec_command("copy").map_err(rejected));

        if let Err(e) = body.remove_child(&textarea) {
            log::warn!("Failed to remove copy helper: {:?}", e);
        }

        match copied? {
            true => Ok(()),
            false => Err(ClipboardError::Rejected(
                "execCommand(\"copy\") returned false".into(),
            )),
        }
    }
}

/// Blocking notice shown when neither copy mechanism worked.
pub fn alert_manual_copy() {
    if let Err(e) = gloo_utils::window().alert_with_message(MANUAL_COPY_MESSAGE) {
        log::error!("Failed to show alert: {:?}", e);
    }
}
