//! Shelfmark: a single-page, per-user bookmark manager.
//!
//! With the `gui` feature this opens the bookmark page in a WebView window.
//! Without it, a scripted console walkthrough runs against an in-memory store.

use std::process::ExitCode;

use shelfmark::services::logging;

#[cfg(feature = "gui")]
fn main() -> ExitCode {
    use shelfmark::app::{warn_default_settings, App};
    use shelfmark::services::settings_engine::SettingsEngineTrait;

    let (settings, load_error) = App::open_settings(std::env::var("SHELFMARK_SETTINGS").ok());
    logging::init(&settings.get_settings().logging.level);
    if let Some(e) = load_error {
        warn_default_settings(&settings, &e);
    }

    let app = match App::from_engine(settings) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "startup failed");
            return ExitCode::FAILURE;
        }
    };

    match shelfmark::ui::webview_app::run(app) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "window failed");
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(feature = "gui"))]
fn main() -> ExitCode {
    logging::init("warn");

    println!();
    println!("Shelfmark v{} (demo mode)", env!("CARGO_PKG_VERSION"));
    println!();

    match demo::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("demo failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(feature = "gui"))]
mod demo {
    use chrono::{Duration, TimeZone, Utc};

    use shelfmark::managers::form_controller::{FormController, FormEvent};
    use shelfmark::managers::page_state::{AlertQueue, PageState};
    use shelfmark::services::storage::MemoryStorage;
    use shelfmark::services::view_renderer::ViewRenderer;
    use shelfmark::types::bookmark::{FormFields, UserId};

    type DemoController = FormController<MemoryStorage, PageState, AlertQueue>;

    fn section(name: &str) {
        println!("───────────────────────────────────────────────────────────────");
        println!("  {}", name);
        println!("───────────────────────────────────────────────────────────────");
    }

    fn show(controller: &mut DemoController) {
        let page = controller.view();
        println!("  inputs enabled: {}", page.inputs_enabled);
        for entry in &page.results {
            for line in entry.to_string().lines() {
                println!("    {}", line);
            }
        }
        for alert in controller.notifier_mut().drain() {
            println!("  ! alert: {}", alert);
        }
        println!();
    }

    fn fill(controller: &mut DemoController, title: &str, url: &str, description: &str) {
        controller.view_mut().set_fields(FormFields {
            title: title.to_string(),
            url: url.to_string(),
            description: description.to_string(),
        });
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let users: Vec<UserId> = ["1", "2", "3"].into_iter().map(UserId::from).collect();
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).single().ok_or("bad start time")?;
        let tick = std::sync::atomic::AtomicI64::new(0);

        let mut controller = FormController::new(
            MemoryStorage::new(users),
            PageState::new(),
            AlertQueue::new(),
            ViewRenderer::default(),
        )
        .with_clock(move || {
            let n = tick.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            start + Duration::hours(n)
        });

        section("Initial render");
        controller.initialize()?;
        let labels: Vec<&str> = controller.view().users.iter().map(|u| u.label.as_str()).collect();
        println!("  dropdown: {}", labels.join(", "));
        show(&mut controller);

        section("Submit without a user");
        controller.handle_event(FormEvent::Submit)?;
        show(&mut controller);

        section("Select User 1");
        controller.handle_event(FormEvent::SelectionChanged("1".to_string()))?;
        show(&mut controller);

        section("Save two bookmarks");
        fill(&mut controller, "Rust", "https://www.rust-lang.org", "The Rust language");
        controller.handle_event(FormEvent::Submit)?;
        fill(&mut controller, "Docs", "https://docs.rs", "Crate documentation");
        controller.handle_event(FormEvent::KeyDown("Enter".to_string()))?;
        show(&mut controller);

        section("Rejected submissions");
        fill(&mut controller, "Rust again", "https://www.rust-lang.org", "dup");
        controller.handle_event(FormEvent::Submit)?;
        fill(&mut controller, "Broken", "not-a-url", "bad");
        controller.handle_event(FormEvent::Submit)?;
        fill(&mut controller, "", "https://example.com", "no title");
        controller.handle_event(FormEvent::Submit)?;
        show(&mut controller);

        section("Clear selection");
        controller.handle_event(FormEvent::SelectionChanged(String::new()))?;
        show(&mut controller);

        Ok(())
    }
}
