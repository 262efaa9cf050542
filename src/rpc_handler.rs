//! RPC method handler for the Shelfmark JSON-RPC protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be unit-tested. Every form
//! method returns the event outcome together with a fresh page snapshot,
//! which carries the alerts the controller raised.

use std::sync::Mutex;

use serde_json::{json, Value};

use crate::app::App;
use crate::managers::form_controller::{EventOutcome, FormEvent, SubmitOutcome};
use crate::services::settings_engine::SettingsEngineTrait;
use crate::services::sorter::sort_bookmarks;
use crate::services::storage::{safe_get_data, StorageTrait};
use crate::types::bookmark::{FormFields, UserId};

fn str_param<'a>(params: &'a Value, name: &str) -> Option<&'a str> {
    params.get(name).and_then(|v| v.as_str())
}

/// Reads `title`/`url`/`description` from params if any of them is present.
fn fields_param(params: &Value) -> Option<FormFields> {
    let present = ["title", "url", "description"]
        .iter()
        .any(|k| params.get(*k).is_some());
    if !present {
        return None;
    }
    Some(FormFields {
        title: str_param(params, "title").unwrap_or_default().to_string(),
        url: str_param(params, "url").unwrap_or_default().to_string(),
        description: str_param(params, "description").unwrap_or_default().to_string(),
    })
}

fn outcome_json(outcome: &EventOutcome) -> Value {
    let prevent_default = outcome.prevents_default();
    match outcome {
        EventOutcome::Ignored => json!({"status": "ignored", "prevent_default": prevent_default}),
        EventOutcome::SelectionApplied(_) => {
            json!({"status": "selected", "prevent_default": prevent_default})
        }
        EventOutcome::Submitted(SubmitOutcome::Saved(bookmark)) => {
            json!({"status": "saved", "bookmark": bookmark, "prevent_default": prevent_default})
        }
        EventOutcome::Submitted(SubmitOutcome::Rejected(reason)) => json!({
            "status": "rejected",
            "message": reason.to_string(),
            "prevent_default": prevent_default,
        }),
    }
}

fn dispatch(app: &Mutex<App>, event: FormEvent, fields: Option<FormFields>) -> Result<Value, String> {
    let mut a = app.lock().map_err(|e| e.to_string())?;
    if let Some(fields) = fields {
        a.controller.view_mut().set_fields(fields);
    }
    let outcome = a.controller.handle_event(event).map_err(|e| e.to_string())?;
    Ok(json!({"outcome": outcome_json(&outcome), "page": a.page_snapshot()}))
}

/// Dispatch a JSON-RPC method call.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Users ───
        "users.list" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let ids = a.controller.storage().get_user_ids().map_err(|e| e.to_string())?;
            let arr: Vec<Value> = ids
                .iter()
                .map(|id| json!({"value": id.as_str(), "label": id.label()}))
                .collect();
            Ok(json!(arr))
        }
        "user.select" => {
            let user_id = str_param(params, "user_id").unwrap_or_default().to_string();
            dispatch(app, FormEvent::SelectionChanged(user_id), fields_param(params))
        }

        // ─── Form ───
        "form.set_fields" => {
            let fields = fields_param(params).unwrap_or_default();
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.controller.view_mut().set_fields(fields);
            Ok(a.page_snapshot())
        }
        "form.keydown" => {
            let key = str_param(params, "key").ok_or("missing key")?.to_string();
            dispatch(app, FormEvent::KeyDown(key), fields_param(params))
        }
        "form.submit" => dispatch(app, FormEvent::Submit, fields_param(params)),

        // ─── Bookmarks ───
        "bookmarks.list" => {
            let user_id = str_param(params, "user_id").ok_or("missing user_id")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let bookmarks = safe_get_data(a.controller.storage(), &UserId::from(user_id));
            Ok(json!(sort_bookmarks(bookmarks)))
        }

        // ─── Page ───
        "page.state" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            Ok(a.page_snapshot())
        }

        // ─── Settings ───
        "settings.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            serde_json::to_value(a.settings_engine.get_settings()).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let key = str_param(params, "key").ok_or("missing key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.settings_engine.set_value(key, value).map_err(|e| e.to_string())?;
            if key.starts_with("display.") {
                a.apply_display_settings();
            }
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
