//! WebView host for the bookmark page, using `wry` + `tao`.
//!
//! - The page is served from the `shelfmark://` custom protocol.
//! - JS → Rust: `window.ipc.postMessage()` with `{cmd, ...}` objects.
//! - Rust → JS: `evaluate_script("window.__sm_apply(<snapshot>)")`; the
//!   page redraws from the snapshot and raises any queued alerts.

use std::borrow::Cow;
use std::cell::RefCell;
use std::rc::Rc;

use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder};
use tao::window::WindowBuilder;
use wry::WebViewBuilder;

use crate::app::App;
use crate::managers::form_controller::FormEvent;
use crate::types::bookmark::FormFields;

#[derive(Debug)]
enum UserEvent {
    EvalScript(String),
}

const PAGE_HTML: &str = include_str!("../../resources/ui/index.html");
const PAGE_CSS: &str = include_str!("../../resources/ui/styles.css");
const PAGE_JS: &str = include_str!("../../resources/ui/app.js");

/// The full page with styles and script inlined.
fn page_html() -> String {
    PAGE_HTML
        .replace("/*STYLES*/", PAGE_CSS)
        .replace("/*SCRIPT*/", PAGE_JS)
}

fn apply_script(app: &mut App) -> String {
    format!("window.__sm_apply({})", app.page_snapshot())
}

fn fields_from(msg: &serde_json::Value) -> Option<FormFields> {
    msg.get("fields")
        .cloned()
        .and_then(|v| serde_json::from_value(v).ok())
}

// ─── IPC handler ───

fn handle_ipc(app: &mut App, message: &str) -> Option<UserEvent> {
    let msg: serde_json::Value = serde_json::from_str(message).ok()?;
    let cmd = msg.get("cmd")?.as_str()?;

    let event = match cmd {
        "ui_ready" => return Some(UserEvent::EvalScript(apply_script(app))),
        "select_user" => {
            let value = msg.get("value").and_then(|v| v.as_str()).unwrap_or("");
            FormEvent::SelectionChanged(value.to_string())
        }
        "keydown" => {
            let key = msg.get("key").and_then(|v| v.as_str())?;
            FormEvent::KeyDown(key.to_string())
        }
        "submit" => FormEvent::Submit,
        other => {
            tracing::debug!(cmd = other, "unknown ipc command");
            return None;
        }
    };

    if let Some(fields) = fields_from(&msg) {
        app.controller.view_mut().set_fields(fields);
    }

    if let Err(e) = app.controller.handle_event(event) {
        // field values stay in place for a retry
        tracing::error!(error = %e, "bookmark write failed");
    }
    Some(UserEvent::EvalScript(apply_script(app)))
}

// ─── Main entry point ───

/// Opens the window and runs the event loop until it is closed.
pub fn run(mut app: App) -> Result<(), Box<dyn std::error::Error>> {
    app.startup()?;
    let state = Rc::new(RefCell::new(app));

    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window = WindowBuilder::new()
        .with_title("Shelfmark")
        .with_inner_size(tao::dpi::LogicalSize::new(900.0, 720.0))
        .build(&event_loop)?;

    let ipc_state = state.clone();

    let builder = WebViewBuilder::new()
        .with_custom_protocol("shelfmark".into(), move |_wv_id, _request| {
            wry::http::Response::builder()
                .header("Content-Type", "text/html; charset=utf-8")
                .body(Cow::Owned(page_html().into_bytes()))
                .unwrap_or_else(|_| wry::http::Response::new(Cow::Borrowed(&[][..])))
        })
        .with_url("shelfmark://localhost/")
        .with_ipc_handler(move |msg: wry::http::Request<String>| {
            let body = msg.body().as_str();
            tracing::trace!(len = body.len(), "ipc message");
            let Ok(mut app) = ipc_state.try_borrow_mut() else {
                return;
            };
            if let Some(event) = handle_ipc(&mut app, body) {
                let _ = proxy.send_event(event);
            }
        })
        .with_devtools(cfg!(debug_assertions));

    #[cfg(target_os = "linux")]
    let webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        let vbox = window.default_vbox().ok_or("GTK vbox unavailable")?;
        builder.build_gtk(vbox)?
    };

    #[cfg(not(target_os = "linux"))]
    let webview = builder.build(&window)?;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                tracing::info!("window closed");
                *control_flow = ControlFlow::Exit;
            }

            Event::UserEvent(UserEvent::EvalScript(js)) => {
                if let Err(e) = webview.evaluate_script(&js) {
                    tracing::warn!(error = %e, "script evaluation failed");
                }
            }

            _ => {}
        }
    });
}
