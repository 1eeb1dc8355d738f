//! geopath-wasm: browser navigation shell for geopath-core
//!
//! This crate wires `geopath-core` into a page: it intercepts clicks on
//! in-app links, keeps the history stack in sync, resolves every
//! navigation and hands the resulting page to a JavaScript renderer.
//!
//! What it provides
//! ----------------
//! - [`GeoPathApp`], constructed from a catalog (JS object or JSON text)
//!   or the built-in demo catalog
//! - `install()`: listens for clicks on `a[data-link]` and for `popstate`,
//!   then routes the current location
//! - `navigate(href)`, `resolve(path)` and `listings(path, limit)`,
//!   all returning Promises
//! - `setOnRender(fn)` / `setOnError(fn)` callbacks
//! - `defaultLocale()`: the `default_locale` from the routes TOML
//!
//! Quick start (browser)
//! ---------------------
//! ```javascript
//! import init, { GeoPathApp } from 'geopath-wasm';
//!
//! async function main() {
//!   await init();
//!   const catalog = await (await fetch('/catalog.json')).json();
//!   const app = new GeoPathApp(catalog);
//!   app.setOnRender((page) => render(page.page, page.params, page.scope));
//!   app.setOnError((err) => showBanner(err.message, err.retryable));
//!   app.install();
//! }
//! main();
//! ```
//!
//! Notes
//! -----
//! - Only the result of the most recent navigation is rendered; older
//!   navigations still in flight resolve to `undefined`.
//! - A lookup failure calls the error callback and rejects the Promise.
//!   It never renders the not-found page.

use geopath_core::{
    Catalog, LinkAction, ListingFilter, ListingSource, Locale, Navigation, Navigator, Resolver,
    RouteTable, Router, RouterConfig,
};
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, spawn_local};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

fn js_err(err: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Plain objects and arrays instead of ES `Map`s.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&Serializer::json_compatible())
        .map_err(JsValue::from)
}

#[derive(Serialize)]
struct ErrorReport {
    message: String,
    retryable: bool,
}

type Listener = Closure<dyn FnMut(web_sys::Event)>;

/// State shared between the exported handle and its event listeners.
struct Shell {
    navigator: Navigator<Catalog>,
    on_render: RefCell<Option<js_sys::Function>>,
    on_error: RefCell<Option<js_sys::Function>>,
    locale: Locale,
}

impl Shell {
    async fn navigate(&self, href: &str) -> Result<JsValue, JsValue> {
        match self.navigator.navigate(href).await {
            Navigation::Show(page) => {
                let value = to_js(&page)?;
                let render = self.on_render.borrow().clone();
                if let Some(render) = render {
                    render.call1(&JsValue::NULL, &value)?;
                }
                Ok(value)
            }
            Navigation::Failed(err) => {
                web_sys::console::warn_1(&format!("geopath: {href}: {err}").into());
                let report = to_js(&ErrorReport {
                    message: err.to_string(),
                    retryable: err.is_retryable(),
                })?;
                let on_error = self.on_error.borrow().clone();
                if let Some(on_error) = on_error {
                    on_error.call1(&JsValue::NULL, &report)?;
                }
                Err(report)
            }
            Navigation::Superseded => Ok(JsValue::UNDEFINED),
        }
    }
}

fn spawn_navigation(shell: Rc<Shell>, href: String) {
    spawn_local(async move {
        // Lookup faults also reach the error callback; callback
        // exceptions and serialization failures only surface here.
        if let Err(err) = shell.navigate(&href).await {
            web_sys::console::error_2(&"geopath: navigation failed".into(), &err);
        }
    });
}

/// `pathname + search` of the current location.
fn current_href() -> Option<String> {
    let location = web_sys::window()?.location();
    let path = location.pathname().ok()?;
    let search = location.search().unwrap_or_default();
    Some(format!("{path}{search}"))
}

/// Anchor the click landed on, unless a modifier asks for a new tab.
fn clicked_anchor(event: &web_sys::Event) -> Option<web_sys::Element> {
    if let Some(mouse) = event.dyn_ref::<web_sys::MouseEvent>() {
        let modified = mouse.ctrl_key() || mouse.meta_key() || mouse.shift_key() || mouse.alt_key();
        if mouse.button() != 0 || modified {
            return None;
        }
    }
    let target = event.target()?.dyn_into::<web_sys::Element>().ok()?;
    target.closest("a[href]").ok().flatten()
}

#[wasm_bindgen]
pub struct GeoPathApp {
    shell: Rc<Shell>,
    listeners: Vec<(web_sys::EventTarget, &'static str, Listener)>,
}

#[wasm_bindgen]
impl GeoPathApp {
    /// Builds the app from a catalog object; `routes` is optional TOML
    /// replacing the builtin route table.
    #[wasm_bindgen(constructor)]
    pub fn new(catalog: JsValue, routes: Option<String>) -> Result<GeoPathApp, JsValue> {
        let catalog: Catalog = serde_wasm_bindgen::from_value(catalog)?;
        Self::build(catalog.normalized(), routes.as_deref())
    }

    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str, routes: Option<String>) -> Result<GeoPathApp, JsValue> {
        let catalog = Catalog::from_json_str(json).map_err(js_err)?;
        Self::build(catalog, routes.as_deref())
    }

    pub fn demo() -> Result<GeoPathApp, JsValue> {
        Self::build(Catalog::demo(), None)
    }

    #[wasm_bindgen(js_name = setOnRender)]
    pub fn set_on_render(&self, render: js_sys::Function) {
        *self.shell.on_render.borrow_mut() = Some(render);
    }

    #[wasm_bindgen(js_name = setOnError)]
    pub fn set_on_error(&self, on_error: js_sys::Function) {
        *self.shell.on_error.borrow_mut() = Some(on_error);
    }

    /// Routes `href` and renders the result. Resolves to the page, or to
    /// `undefined` when a newer navigation overtook this one.
    pub fn navigate(&self, href: String) -> js_sys::Promise {
        let shell = self.shell.clone();
        future_to_promise(async move { shell.navigate(&href).await })
    }

    /// Resolves `path` without rendering: `{ descriptor, scope }`.
    pub fn resolve(&self, path: String) -> js_sys::Promise {
        let shell = self.shell.clone();
        future_to_promise(async move {
            let route = shell
                .navigator
                .router()
                .resolver()
                .resolve_path(&path)
                .await
                .map_err(js_err)?;
            to_js(&route)
        })
    }

    /// Newest active listings in the scope `path` resolves to.
    pub fn listings(&self, path: String, limit: Option<usize>) -> js_sys::Promise {
        let shell = self.shell.clone();
        future_to_promise(async move {
            let resolver = shell.navigator.router().resolver();
            let route = resolver.resolve_path(&path).await.map_err(js_err)?;
            if route.descriptor.is_not_found() {
                return to_js(&Vec::<geopath_core::Listing>::new());
            }
            let mut filter = ListingFilter::for_scope(&route.scope);
            if let Some(limit) = limit {
                filter = filter.with_limit(limit);
            }
            let rows = resolver.lookup().listings(&filter).await.map_err(js_err)?;
            to_js(&rows)
        })
    }

    /// `default_locale` from the routes TOML (`en` unless configured).
    #[wasm_bindgen(js_name = defaultLocale)]
    pub fn default_locale(&self) -> String {
        self.shell.locale.code().to_owned()
    }

    /// Navigations started so far.
    pub fn generation(&self) -> f64 {
        self.shell.navigator.generation() as f64
    }

    /// Intercepts in-app link clicks and history moves, then routes the
    /// current location. Calling it twice replaces the listeners.
    pub fn install(&mut self) -> Result<(), JsValue> {
        self.uninstall();

        let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
        let document = window.document().ok_or_else(|| js_err("no document"))?;

        let shell = self.shell.clone();
        let history = window.history()?;
        let on_click = Listener::new(move |event: web_sys::Event| {
            let Some(anchor) = clicked_anchor(&event) else {
                return;
            };
            let href = anchor.get_attribute("href").unwrap_or_default();
            let in_app = anchor.has_attribute("data-link");
            if let LinkAction::InApp(href) = LinkAction::classify(&href, in_app) {
                event.prevent_default();
                if let Err(err) = history.push_state_with_url(&JsValue::NULL, "", Some(&href)) {
                    web_sys::console::warn_2(&"geopath: pushState failed".into(), &err);
                }
                spawn_navigation(shell.clone(), href);
            }
        });
        self.listen(&document, "click", on_click)?;

        let shell = self.shell.clone();
        let on_popstate = Listener::new(move |_: web_sys::Event| {
            if let Some(href) = current_href() {
                spawn_navigation(shell.clone(), href);
            }
        });
        self.listen(&window, "popstate", on_popstate)?;

        if let Some(href) = current_href() {
            spawn_navigation(self.shell.clone(), href);
        }
        Ok(())
    }

    /// Removes the listeners added by [`GeoPathApp::install`].
    pub fn uninstall(&mut self) {
        for (target, kind, listener) in self.listeners.drain(..) {
            let _ = target
                .remove_event_listener_with_callback(kind, listener.as_ref().unchecked_ref());
        }
    }
}

impl GeoPathApp {
    fn build(catalog: Catalog, routes: Option<&str>) -> Result<GeoPathApp, JsValue> {
        let (table, locale) = match routes {
            Some(toml) => {
                let config = RouterConfig::from_toml_str(toml).map_err(js_err)?;
                (config.route_table().map_err(js_err)?, config.default_locale)
            }
            None => (RouteTable::builtin(), Locale::default()),
        };
        let navigator = Navigator::new(Router::new(table, Resolver::new(catalog)));
        Ok(GeoPathApp {
            shell: Rc::new(Shell {
                navigator,
                on_render: RefCell::new(None),
                on_error: RefCell::new(None),
                locale,
            }),
            listeners: Vec::new(),
        })
    }

    fn listen(
        &mut self,
        target: &web_sys::EventTarget,
        kind: &'static str,
        listener: Listener,
    ) -> Result<(), JsValue> {
        target.add_event_listener_with_callback(kind, listener.as_ref().unchecked_ref())?;
        self.listeners.push((target.clone(), kind, listener));
        Ok(())
    }
}

impl Drop for GeoPathApp {
    fn drop(&mut self) {
        self.uninstall();
    }
}
