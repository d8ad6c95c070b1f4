mod config;
mod error;
mod filter;
mod hypr_client;
mod selection;
mod session;
mod stylesheet;
mod ui;
mod window;

use anyhow::{Context, Result, bail};
use config::{Command, Config};
use gtk4::prelude::*;
use hypr_client::{HyprClient, WindowActivator};
use session::{Response, Session, SessionResult};
use std::cell::RefCell;
use std::io::Write;
use tracing::{debug, info};
use ui::SwitcherWindow;

const APPLICATION_ID: &str = "hypr-switcher";

fn main() -> Result<()> {
    // Parse CLI arguments
    let config = Config::parse();

    // Initialize logging
    let log_level = if config.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match config.command() {
        Command::Show => run_switcher(&config),
        Command::List { query, json } => {
            let stdout = std::io::stdout();
            list_windows(open_session(&config), query.as_deref(), json, &mut stdout.lock())
        }
        Command::Focus { query } => focus_best_match(open_session(&config), &query),
    }
}

fn open_session(config: &Config) -> Session {
    let mut source = HyprClient::new(config.hyprctl.clone());
    let activator = HyprClient::new(config.hyprctl.clone());
    Session::open(&mut source, activator)
}

/// Run the GTK switcher until the user picks a window or dismisses it
fn run_switcher(config: &Config) -> Result<()> {
    info!("Starting hypr-switcher");

    let app = gtk4::Application::builder()
        .application_id(APPLICATION_ID)
        .build();

    // Startup runs once per primary instance, so only one provider is installed
    let style = config.style.clone();
    app.connect_startup(move |_| {
        stylesheet::apply(&stylesheet::load(style.as_deref()));
    });

    let config = config.clone();
    let switcher = RefCell::new(None);
    // Each activation opens a fresh session with a newly loaded window list
    app.connect_activate(move |app| {
        let window = SwitcherWindow::new(app, open_session(&config));
        window.present();
        *switcher.borrow_mut() = Some(window);
    });

    // clap already consumed our arguments, GTK must not parse them again
    let status = app.run_with_args::<&str>(&[]);
    info!("Switcher exited with {:?}", status);
    Ok(())
}

/// Write the ranked window list for `query` to `out`
fn list_windows<A: WindowActivator>(
    mut session: Session<A>,
    query: Option<&str>,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    if let Some(e) = session.take_source_error() {
        return Err(e.into());
    }

    session.on_query_changed(query.unwrap_or_default());

    let controller = session.controller();
    let windows = controller.ordered();
    debug!(
        "{} of {} windows match {:?}",
        windows.len(),
        controller.windows().len(),
        controller.query()
    );

    if json {
        serde_json::to_writer_pretty(&mut *out, windows)
            .context("Failed to serialize window list")?;
        writeln!(out)?;
        return Ok(());
    }

    for (i, window) in windows.iter().enumerate() {
        writeln!(
            out,
            "{:>2}) {}  [{} (Workspace {})]",
            i + 1,
            window.title,
            window.window_class,
            window.workspace_id
        )?;
    }
    Ok(())
}

/// Activate the top-ranked window for `query` without showing the UI
fn focus_best_match<A: WindowActivator>(mut session: Session<A>, query: &str) -> Result<()> {
    if let Some(e) = session.take_source_error() {
        return Err(e.into());
    }

    session.on_query_changed(query);
    match session.on_row_activated(0) {
        Response::Finished(SessionResult::Activated(window)) => {
            if let Some(e) = session.take_activation_error() {
                return Err(e.into());
            }
            info!("Focused {:?}", window.title);
            Ok(())
        }
        _ => bail!("No window matches {:?}", query),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hypr_client::WindowSource;
    use crate::window::Window;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn make_window(title: &str, class: &str, workspace: i64, active: bool) -> Window {
        Window {
            title: title.to_string(),
            window_class: class.to_string(),
            workspace_id: workspace,
            address: format!("0x{}", title.to_lowercase()),
            is_active_workspace: active,
        }
    }

    struct FakeSource(Option<Vec<Window>>);

    impl WindowSource for FakeSource {
        fn list_windows(&mut self) -> Result<Vec<Window>> {
            match self.0.clone() {
                Some(windows) => Ok(windows),
                None => bail!("hyprctl not found"),
            }
        }
    }

    /// Records activations in a shared log, since the session owns the activator.
    #[derive(Clone, Default)]
    struct FakeActivator {
        calls: Rc<RefCell<Vec<(i64, String)>>>,
        fail: bool,
    }

    impl WindowActivator for FakeActivator {
        fn activate(&mut self, workspace_id: i64, address: &str) -> Result<()> {
            self.calls.borrow_mut().push((workspace_id, address.to_string()));
            if self.fail {
                bail!("No such window");
            }
            Ok(())
        }
    }

    fn windows() -> Vec<Window> {
        vec![
            make_window("Firefox", "firefox", 1, true),
            make_window("Files", "nautilus", 2, false),
        ]
    }

    fn session(windows: Option<Vec<Window>>, activator: &FakeActivator) -> Session<FakeActivator> {
        Session::open(&mut FakeSource(windows), activator.clone())
    }

    #[test]
    fn test_focus_activates_best_match_once() {
        let activator = FakeActivator::default();

        focus_best_match(session(Some(windows()), &activator), "fi").unwrap();

        assert_eq!(*activator.calls.borrow(), vec![(1, "0xfirefox".to_string())]);
    }

    #[test]
    fn test_focus_without_match_fails() {
        let activator = FakeActivator::default();

        let err = focus_best_match(session(Some(windows()), &activator), "nonexistent")
            .unwrap_err();

        assert!(err.to_string().contains("No window matches"));
        assert!(activator.calls.borrow().is_empty());
    }

    #[test]
    fn test_focus_activation_failure_fails() {
        let activator = FakeActivator {
            fail: true,
            ..Default::default()
        };

        let err = focus_best_match(session(Some(windows()), &activator), "files").unwrap_err();

        assert_eq!(
            format!("{:#}", err),
            "failed to activate window 0xfiles: No such window"
        );
        assert_eq!(activator.calls.borrow().len(), 1);
    }

    #[test]
    fn test_focus_source_failure_fails() {
        let activator = FakeActivator::default();

        let err = focus_best_match(session(None, &activator), "fi").unwrap_err();

        assert_eq!(format!("{:#}", err), "could not load window list: hyprctl not found");
        assert!(activator.calls.borrow().is_empty());
    }

    #[test]
    fn test_list_prints_ranked_lines() {
        let mut out = Vec::new();

        list_windows(session(Some(windows()), &FakeActivator::default()), Some("fi"), false, &mut out)
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            " 1) Firefox  [firefox (Workspace 1)]\n 2) Files  [nautilus (Workspace 2)]\n"
        );
    }

    #[test]
    fn test_list_json() {
        let mut out = Vec::new();

        list_windows(session(Some(windows()), &FakeActivator::default()), Some("naut"), true, &mut out)
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let entries = parsed.as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["title"], "Files");
        assert_eq!(entries[0]["workspace_id"], 2);
    }

    #[test]
    fn test_list_source_failure_fails() {
        let mut out = Vec::new();

        let result = list_windows(session(None, &FakeActivator::default()), None, false, &mut out);

        assert!(result.is_err());
        assert!(out.is_empty());
    }
}
