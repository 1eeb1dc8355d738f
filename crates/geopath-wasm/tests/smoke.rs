#![cfg(target_arch = "wasm32")]

use geopath_wasm::GeoPathApp;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

fn field(value: &JsValue, key: &str) -> JsValue {
    js_sys::Reflect::get(value, &JsValue::from_str(key)).unwrap()
}

#[wasm_bindgen_test]
async fn navigates_to_a_country_page() {
    let app = GeoPathApp::demo().unwrap();

    let page = JsFuture::from(app.navigate("/us".into())).await.unwrap();
    assert_eq!(field(&page, "page").as_string().as_deref(), Some("country"));

    let params = field(&page, "params");
    assert_eq!(field(&params, "countryCode").as_string().as_deref(), Some("US"));
    assert_eq!(app.generation(), 1.0);
}

#[wasm_bindgen_test]
async fn unknown_paths_render_not_found() {
    let app = GeoPathApp::demo().unwrap();
    let page = JsFuture::from(app.navigate("/fr/massage".into())).await.unwrap();
    assert_eq!(field(&page, "page").as_string().as_deref(), Some("not-found"));
}

#[wasm_bindgen_test]
async fn resolve_reports_descriptor_type() {
    let app = GeoPathApp::demo().unwrap();
    let route = JsFuture::from(app.resolve("/us/massage/california".into()))
        .await
        .unwrap();
    let descriptor = field(&route, "descriptor");
    assert_eq!(
        field(&descriptor, "type").as_string().as_deref(),
        Some("category-state")
    );
}

#[wasm_bindgen_test]
fn rejects_malformed_route_tables() {
    let json = r#"{"countries": []}"#;
    assert!(GeoPathApp::from_json(json, Some("routes = 5".into())).is_err());
    assert!(GeoPathApp::from_json(json, None).is_ok());
}

#[wasm_bindgen_test]
fn keeps_default_locale_from_routes_toml() {
    let json = r#"{"countries": []}"#;
    let app = GeoPathApp::from_json(json, Some(r#"default_locale = "es""#.into())).unwrap();
    assert_eq!(app.default_locale(), "es");
    assert_eq!(GeoPathApp::demo().unwrap().default_locale(), "en");
}

#[wasm_bindgen_test]
async fn throwing_renderer_rejects_the_navigation() {
    let app = GeoPathApp::demo().unwrap();
    app.set_on_render(js_sys::Function::new_no_args("throw new Error('boom')"));

    let outcome = JsFuture::from(app.navigate("/us".into())).await;
    assert!(outcome.is_err());
}
