// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cabin Frame WebAssembly Bindings
//!
//! JavaScript/TypeScript API for the cabin frame designer built with
//! wasm-bindgen.

use wasm_bindgen::prelude::*;

mod designer;
mod mesh_data;
mod utils;

pub use designer::CabinFrameDesigner;
pub use mesh_data::{BeamMeshCollection, BeamMeshJs};
pub use utils::set_panic_hook as init_panic_hook;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    utils::set_panic_hook();
}

/// Get the version of the frame engine
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
