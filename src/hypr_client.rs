//! Hyprland access through `hyprctl`.
//!
//! The switcher only needs two things from the compositor: the current window
//! list and a way to focus one window. Both are expressed as traits so the
//! session can run against fakes in tests.

use anyhow::{Context, Result, bail};
use std::process::Command;
use tracing::debug;

use crate::window::{Window, collect_windows, parse_active_workspace, parse_clients};

/// Provides the windows shown when the switcher opens.
pub trait WindowSource {
    /// Get all switchable windows, already in default display order
    fn list_windows(&mut self) -> Result<Vec<Window>>;
}

/// Brings a window to the front.
pub trait WindowActivator {
    /// Switch to `workspace_id`, then focus the window at `address`
    fn activate(&mut self, workspace_id: i64, address: &str) -> Result<()>;
}

/// Runs a single `hyprctl` invocation and returns its stdout.
pub trait CommandRunner {
    fn run(&mut self, args: &[&str]) -> Result<String>;
}

/// Real implementation spawning the `hyprctl` executable
pub struct HyprctlProcess {
    program: String,
}

impl HyprctlProcess {
    pub fn new(program: impl Into<String>) -> Self {
        HyprctlProcess {
            program: program.into(),
        }
    }
}

impl CommandRunner for HyprctlProcess {
    fn run(&mut self, args: &[&str]) -> Result<String> {
        debug!("Running {} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .with_context(|| format!("Failed to run {}", self.program))?;

        if !output.status.success() {
            bail!(
                "{} {} exited with {}: {}",
                self.program,
                args.join(" "),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        String::from_utf8(output.stdout)
            .with_context(|| format!("{} produced non-UTF-8 output", self.program))
    }
}

/// Window source and activator backed by `hyprctl`.
pub struct HyprClient<R: CommandRunner = HyprctlProcess> {
    runner: R,
}

impl HyprClient<HyprctlProcess> {
    /// Create a client that runs the given `hyprctl` executable
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_runner(HyprctlProcess::new(program))
    }
}

impl<R: CommandRunner> HyprClient<R> {
    /// Create a client with a custom runner (for testing)
    pub fn with_runner(runner: R) -> Self {
        HyprClient { runner }
    }

    fn dispatch(&mut self, args: &[&str]) -> Result<()> {
        let mut full = vec!["dispatch"];
        full.extend_from_slice(args);

        let reply = self.runner.run(&full)?;
        let reply = reply.trim();
        // hyprctl reports dispatcher errors on stdout with a zero exit code
        if !reply.is_empty() && reply != "ok" {
            bail!("dispatch {} failed: {}", args.join(" "), reply);
        }
        Ok(())
    }
}

impl<R: CommandRunner> WindowSource for HyprClient<R> {
    fn list_windows(&mut self) -> Result<Vec<Window>> {
        let clients = parse_clients(&self.runner.run(&["clients", "-j"])?)?;
        let active = parse_active_workspace(&self.runner.run(&["activeworkspace", "-j"])?)?;

        let windows = collect_windows(clients, active);
        debug!("Loaded {} windows (active workspace {})", windows.len(), active);
        Ok(windows)
    }
}

impl<R: CommandRunner> WindowActivator for HyprClient<R> {
    fn activate(&mut self, workspace_id: i64, address: &str) -> Result<()> {
        let workspace = workspace_id.to_string();
        let target = format!("address:{}", address);

        // Workspace first so focuswindow doesn't land on a hidden workspace
        self.dispatch(&["workspace", workspace.as_str()])
            .context("Failed to switch workspace")?;
        self.dispatch(&["focuswindow", target.as_str()])
            .context("Failed to focus window")?;
        Ok(())
    }
}
