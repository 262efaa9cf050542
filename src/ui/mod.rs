//! Shelfmark UI layer.
//!
//! Uses `wry` for cross-platform WebView rendering:
//! - Windows: WebView2
//! - Linux: WebKitGTK
//! - macOS: WKWebView
//!
//! The page is plain HTML/CSS/JS. The form controller runs in Rust; the page
//! forwards user actions over wry IPC and redraws from the snapshots it gets back.

pub mod webview_app;
