//! Browser probe for the mobile heuristics

use crate::selector::EnvironmentSignals;
use js_sys::Reflect;
use wasm_bindgen::JsValue;

fn number(target: &JsValue, key: &str) -> f64 {
    Reflect::get(target, &JsValue::from_str(key)).ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
}

fn has(target: &JsValue, key: &str) -> bool {
    Reflect::has(target, &JsValue::from_str(key)).unwrap_or(false)
}

/// Signals from `window`/`navigator`/`document`; `None` outside a window.
pub fn browser_signals() -> Option<EnvironmentSignals> {
    let window = web_sys::window()?;
    let navigator = window.navigator();
    let document = window.document();

    Some(EnvironmentSignals {
        user_agent: navigator.user_agent().unwrap_or_default(),
        max_touch_points: number(navigator.as_ref(), "maxTouchPoints") as u32,
        ms_max_touch_points: number(navigator.as_ref(), "msMaxTouchPoints") as u32,
        has_touch_start: has(window.as_ref(), "ontouchstart"),
        has_touch_end: document.map_or(false, |d| has(d.as_ref(), "ontouchend")),
        inner_width: window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0),
    })
}
