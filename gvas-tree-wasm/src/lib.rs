use gvas_tree::Save;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Decodes a save and returns the tree as pretty printed JSON. Property level
/// errors are part of the output, only an unreadable header is an error here.
#[wasm_bindgen]
pub fn sav_to_json(data: &[u8]) -> Result<String, JsValue> {
    let save = Save::read(data).map_err(|e| JsValue::from_str(&format!("{e}")))?;

    serde_json::to_string_pretty(&save).map_err(|e| JsValue::from_str(&format!("{e}")))
}

