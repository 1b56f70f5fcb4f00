use dominator::routing;
use futures_signals::signal::{Signal, SignalExt};
use referralhub_core::route::Route;
use wasm_bindgen::prelude::*;
use web_sys::Url;

/// Browser side of [`Route`]: follows the address bar and navigates.
pub trait RouteExt {
    fn signal() -> impl Signal<Item = Route>;

    fn go_to(&self);

    /// Navigates without leaving the current url in history.
    fn replace(&self);
}

impl RouteExt for Route {
    fn signal() -> impl Signal<Item = Route> {
        routing::url()
            .signal_ref(|url| Url::new(url).unwrap_throw())
            .map(|url| Route::from_path(&url.pathname()))
    }

    fn go_to(&self) {
        routing::go_to_url(&self.url());
    }

    fn replace(&self) {
        routing::replace_url(&self.url());
    }
}
