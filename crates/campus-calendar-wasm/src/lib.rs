//! WASM bindings for campus-calendar.
//!
//! Exposes the time parser, the overlap check, the conflict report and free
//! slot computation to the browser via `wasm-bindgen`. Events cross the
//! boundary as JSON strings in the same shape the calendar page keeps in
//! local storage: `{title, time, description, type, date}`.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p campus-calendar-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/pkg/ \
//!   target/wasm32-unknown-unknown/release/campus_calendar_wasm.wasm
//! ```

use campus_calendar::{DayWindow, Event};
use chrono::NaiveDate;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ConflictDto<'a> {
    index: usize,
    title: &'a str,
    time: &'a str,
    overlap_minutes: u32,
}

#[derive(Serialize)]
struct FreeSlotDto {
    start: String,
    end: String,
    duration_minutes: u32,
}

// ---------------------------------------------------------------------------
// JSON-level implementations, kept free of `JsValue` so they run natively
// ---------------------------------------------------------------------------

fn parse_event(json: &str) -> Result<Event, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid event JSON: {}", e))
}

fn parse_events(json: &str) -> Result<Vec<Event>, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid events JSON: {}", e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn parse_time_json(token: &str) -> Result<String, String> {
    to_json(&campus_calendar::parse_time(token))
}

fn events_overlap_json(candidate_json: &str, existing_json: &str) -> Result<bool, String> {
    let candidate = parse_event(candidate_json)?;
    let existing = parse_events(existing_json)?;
    Ok(campus_calendar::has_overlap(&candidate, &existing))
}

fn find_conflicts_json(candidate_json: &str, existing_json: &str) -> Result<String, String> {
    let candidate = parse_event(candidate_json)?;
    let existing = parse_events(existing_json)?;

    let dtos: Vec<ConflictDto<'_>> = campus_calendar::find_conflicts(&candidate, &existing)
        .iter()
        .map(|c| ConflictDto {
            index: c.index,
            title: &c.existing.title,
            time: &c.existing.time,
            overlap_minutes: c.overlap_minutes,
        })
        .collect();

    to_json(&dtos)
}

fn find_free_slots_json(
    events_json: &str,
    date: &str,
    from: &str,
    to: &str,
) -> Result<String, String> {
    let events = parse_events(events_json)?;
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{}': {}", date, e))?;
    let window = DayWindow::parse(from, to).map_err(|e| e.to_string())?;

    let dtos: Vec<FreeSlotDto> = campus_calendar::find_free_slots(&events, date, window)
        .iter()
        .map(|s| FreeSlotDto {
            start: campus_calendar::time::format_minutes(s.start),
            end: campus_calendar::time::format_minutes(s.end),
            duration_minutes: s.duration_minutes,
        })
        .collect();

    to_json(&dtos)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Extract the first `H:MM` clock time from a string.
///
/// Returns a JSON string: `[hour, minute]`, or `null` when there is no match.
#[wasm_bindgen(js_name = "parseTime")]
pub fn parse_time(token: &str) -> Result<String, JsValue> {
    parse_time_json(token).map_err(|e| JsValue::from_str(&e))
}

/// Whether a candidate event overlaps any stored event on the same date.
///
/// `candidate_json` is one event object, `existing_json` an array of them.
/// Malformed `time` fields never overlap.
#[wasm_bindgen(js_name = "eventsOverlap")]
pub fn events_overlap(candidate_json: &str, existing_json: &str) -> Result<bool, JsValue> {
    events_overlap_json(candidate_json, existing_json).map_err(|e| JsValue::from_str(&e))
}

/// Every stored event the candidate overlaps.
///
/// Returns a JSON array of `{index, title, time, overlap_minutes}` objects.
#[wasm_bindgen(js_name = "findConflicts")]
pub fn find_conflicts(candidate_json: &str, existing_json: &str) -> Result<String, JsValue> {
    find_conflicts_json(candidate_json, existing_json).map_err(|e| JsValue::from_str(&e))
}

/// Free gaps on `date` (`YYYY-MM-DD`) between the clock times `from` and `to`.
///
/// Returns a JSON array of `{start, end, duration_minutes}` objects with
/// `HH:MM` times.
#[wasm_bindgen(js_name = "findFreeSlots")]
pub fn find_free_slots(
    events_json: &str,
    date: &str,
    from: &str,
    to: &str,
) -> Result<String, JsValue> {
    find_free_slots_json(events_json, date, from, to).map_err(|e| JsValue::from_str(&e))
}
