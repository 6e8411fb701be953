#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod bus;
pub mod cart_panel;
pub mod components;
pub mod config;
pub mod dom;
pub mod i18n;
pub mod logger;
pub mod mount;
pub mod page;
pub mod paths;
pub mod runtime;
pub mod transport;
pub mod widgets;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logger::init();
    // Sync <html lang> with the saved locale before anything renders.
    crate::i18n::set_lang(&crate::i18n::current_lang());
    mount::start();
}
