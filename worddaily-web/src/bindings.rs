//! JavaScript exports consumed by the UI (home page, navigation bar,
//! achievements page, share button).

use crate::api::{ApiError, StreakApi};
use crate::dom;
use crate::storage::{BrowserClock, BrowserStore};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use worddaily_streak::StreakTracker;

pub type WebStreakApi = StreakApi<BrowserStore, BrowserClock>;

/// Build the API over this origin's `localStorage` and the browser's local date.
///
/// # Errors
///
/// Returns an error if `localStorage` is unavailable.
pub fn web_api() -> Result<WebStreakApi, ApiError> {
    let store = BrowserStore::open().map_err(|err| ApiError(err.to_string()))?;
    Ok(StreakApi::new(StreakTracker::new(store, BrowserClock)))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|err| JsValue::from_str(&err.to_string()))
}

fn to_js_error(err: &ApiError) -> JsValue {
    dom::console_error(&err.0);
    JsValue::from_str(&err.0)
}

fn call<T, F>(f: F) -> Result<JsValue, JsValue>
where
    T: Serialize,
    F: FnOnce(&WebStreakApi) -> Result<T, ApiError>,
{
    let api = web_api().map_err(|err| to_js_error(&err))?;
    let value = f(&api).map_err(|err| to_js_error(&err))?;
    to_js(&value)
}

/// Current streak record without recording a visit.
///
/// # Errors
/// Throws if `localStorage` cannot be used.
#[wasm_bindgen(js_name = getStreakData)]
pub fn get_streak_data() -> Result<JsValue, JsValue> {
    call(WebStreakApi::streak_data)
}

/// Record today's visit and return the updated record.
///
/// # Errors
/// Throws if `localStorage` cannot be used, including a rejected write.
#[wasm_bindgen(js_name = updateStreak)]
pub fn update_streak() -> Result<JsValue, JsValue> {
    call(WebStreakApi::update_streak)
}

/// Record today's visit and return `{ record, transition, newBadges }`.
///
/// # Errors
/// Throws if `localStorage` cannot be used.
#[wasm_bindgen(js_name = recordVisitDetailed)]
pub fn record_visit_detailed() -> Result<JsValue, JsValue> {
    call(WebStreakApi::record_visit_detailed)
}

/// # Errors
/// Throws if `localStorage` cannot be read.
#[wasm_bindgen(js_name = hasPlayedToday)]
pub fn has_played_today() -> Result<bool, JsValue> {
    let api = web_api().map_err(|err| to_js_error(&err))?;
    api.has_played_today().map_err(|err| to_js_error(&err))
}

/// Badge id → `{ name, description }`.
///
/// # Errors
/// Throws only if serialization fails.
#[wasm_bindgen(js_name = badgeInfo)]
pub fn badge_info() -> Result<JsValue, JsValue> {
    to_js(worddaily_streak::badge_catalog())
}

/// Display name for a badge id, falling back to the id itself.
#[wasm_bindgen(js_name = badgeName)]
#[must_use]
pub fn badge_name(id: &str) -> String {
    worddaily_streak::badge_catalog().label(id).name.to_string()
}

/// # Errors
/// Throws if `localStorage` cannot be used.
#[wasm_bindgen]
pub fn achievements() -> Result<JsValue, JsValue> {
    call(WebStreakApi::achievements)
}

/// # Errors
/// Throws if `localStorage` cannot be used.
#[wasm_bindgen(js_name = streakSummary)]
pub fn streak_summary() -> Result<JsValue, JsValue> {
    call(WebStreakApi::summary)
}

/// # Errors
/// Throws if `localStorage` cannot be used.
#[wasm_bindgen(js_name = shareText)]
pub fn share_text(word: &str, definition: &str) -> Result<String, JsValue> {
    let api = web_api().map_err(|err| to_js_error(&err))?;
    api.share_text(word, definition)
        .map_err(|err| to_js_error(&err))
}
