use std::sync::atomic::{AtomicUsize, Ordering};

use futures::{
    Future,
    future::{AbortHandle, abortable},
};
use futures_signals::signal::{Mutable, Signal};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Storage, Window};

pub const API_OVERRIDE_KEY: &str = "__REFERRALHUB_API__";

thread_local! {
    static WINDOW: Window = web_sys::window().unwrap_throw();
    static LOCAL_STORAGE: Storage = WINDOW.with(|w| w.local_storage().unwrap_throw().unwrap_throw());
    static GRAPHQL_HOST: std::cell::RefCell<String> = std::cell::RefCell::new("/graphql".to_string());
}

pub struct AsyncState {
    id: usize,
    handle: AbortHandle,
}

impl AsyncState {
    fn new(handle: AbortHandle) -> Self {
        static ID: AtomicUsize = AtomicUsize::new(0);
        let id = ID.fetch_add(1, Ordering::SeqCst);

        Self { id, handle }
    }
}

/// Runs at most one future at a time. Loading a new one aborts the previous,
/// and dropping the loader aborts whatever is still running so a component
/// that is gone is never touched by a late completion.
pub struct AsyncLoader {
    loading: Mutable<Option<AsyncState>>,
}

impl Default for AsyncLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AsyncLoader {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl AsyncLoader {
    pub fn new() -> Self {
        Self {
            loading: Mutable::new(None),
        }
    }

    pub fn cancel(&self) {
        self.replace(None)
    }

    pub fn replace(&self, value: Option<AsyncState>) {
        let mut loading = self.loading.lock_mut();
        if let Some(state) = loading.as_mut() {
            state.handle.abort();
        }
        *loading = value;
    }

    pub fn load<F>(&self, fut: F)
    where
        F: Future<Output = ()> + 'static,
    {
        let (fut, handle) = abortable(fut);

        let state = AsyncState::new(handle);
        let id = state.id;

        self.replace(Some(state));

        let loading = self.loading.clone();

        spawn_local(async move {
            match fut.await {
                Ok(()) => {
                    let mut loading = loading.lock_mut();

                    if let Some(current_id) = loading.as_ref().map(|x| x.id) {
                        if current_id == id {
                            *loading = None;
                        }
                    }
                }
                Err(_) => {
                    debug!("task {} aborted", id);
                }
            }
        });
    }

    pub fn is_loading(&self) -> impl Signal<Item = bool> + use<> {
        self.loading.signal_ref(|x| x.is_some())
    }
}

/// Resolves the GraphQL endpoint. A page can point the client elsewhere by
/// defining `window.__REFERRALHUB_API__` before the module loads.
pub fn initialize_urls() {
    let graphql_host = match js_sys::Reflect::get(&window(), &JsValue::from_str(API_OVERRIDE_KEY))
    {
        Ok(val) if val.is_string() => val.as_string().unwrap_or_default(),
        _ => format!(
            "{}/graphql",
            window().location().origin().unwrap_throw()
        ),
    };

    info!("using graphql endpoint {}", graphql_host);
    GRAPHQL_HOST.with(|s| *s.borrow_mut() = graphql_host);
}

pub fn graphql_host() -> String {
    GRAPHQL_HOST.with(|v| v.borrow().clone())
}

pub fn window() -> Window {
    WINDOW.with(|s| s.clone())
}

pub fn local_storage() -> Storage {
    LOCAL_STORAGE.with(|s| s.clone())
}
