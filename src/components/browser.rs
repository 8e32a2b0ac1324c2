//! Thin wrappers over browser APIs used by the community pages. They are only
//! ever invoked from event handlers, i.e. in the hydrated client.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}

pub async fn copy_text(text: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("no window")?;
    let promise = window.navigator().clipboard().write_text(text);
    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|e| format!("{e:?}"))
}

/// Saves `contents` as a file through a temporary data-URL anchor.
pub fn download_text(file_name: &str, mime: &str, contents: &str) -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("no document")?;
    let anchor = document
        .create_element("a")
        .map_err(|e| format!("{e:?}"))?
        .dyn_into::<web_sys::HtmlElement>()
        .map_err(|_| "anchor is not an HtmlElement".to_string())?;

    let href = format!("data:{mime};charset=utf-8,{}", urlencoding::encode(contents));
    anchor.set_attribute("href", &href).map_err(|e| format!("{e:?}"))?;
    anchor
        .set_attribute("download", file_name)
        .map_err(|e| format!("{e:?}"))?;
    anchor.click();
    Ok(())
}

/// Reads the first file picked in a file input as text.
pub async fn read_selected_file(input: &web_sys::HtmlInputElement) -> Result<Option<String>, String> {
    let Some(file) = input.files().and_then(|files| files.get(0)) else {
        return Ok(None);
    };
    let text = JsFuture::from(file.text())
        .await
        .map_err(|e| format!("{e:?}"))?;
    Ok(text.as_string())
}

pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
