// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use cabin_frame_geometry::Error;
use wasm_bindgen::JsValue;

/// Set panic hook for better error messages in the browser
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Log a failed operation to the console and turn it into a JS error value
pub fn report(context: &str, err: Error) -> JsValue {
    let message = format!("{}: {}", context, err);
    web_sys::console::warn_1(&message.as_str().into());
    JsValue::from_str(&message)
}
