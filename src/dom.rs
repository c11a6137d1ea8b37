use dash_core::MemoryUsage;
use wasm_bindgen::JsValue;
use web_sys as web;

/// Heap figures from the non-standard `performance.memory` (Chromium only).
pub fn performance_memory() -> Option<MemoryUsage> {
    let perf = web::window()?.performance()?;
    let memory = js_sys::Reflect::get(&perf, &JsValue::from_str("memory")).ok()?;
    if memory.is_undefined() || memory.is_null() {
        return None;
    }
    let field = |name: &str| {
        js_sys::Reflect::get(&memory, &JsValue::from_str(name))
            .ok()
            .and_then(|v| v.as_f64())
            .map(|v| v as u64)
    };
    Some(MemoryUsage {
        used_bytes: field("usedJSHeapSize")?,
        total_bytes: field("totalJSHeapSize")?,
        limit_bytes: field("jsHeapSizeLimit")?,
    })
}

/// Calendar date (`YYYY-MM-DD`) used to stamp leaderboard entries.
pub fn today() -> String {
    let iso: String = js_sys::Date::new_0().to_iso_string().into();
    iso.chars().take(10).collect()
}
