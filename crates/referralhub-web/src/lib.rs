#[macro_use]
extern crate log;

mod app;
mod common;
mod employee;
mod hr;
mod login;
mod query;
mod register;
mod storage;
mod utils;

use std::rc::Rc;

use wasm_bindgen::prelude::*;

use app::App;
use storage::{BrowserStorage, Session};

#[wasm_bindgen(start)]
pub async fn main_js() -> Result<(), JsValue> {
    #[cfg(debug_assertions)]
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    utils::initialize_urls();

    let session = Rc::new(Session::new(BrowserStorage::new()));
    dominator::append_dom(&dominator::body(), App::render(App::new(session.clone())));

    session.initialize();

    Ok(())
}
