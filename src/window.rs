use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Class names Hyprland reports for clients that never set one.
const UNSET_CLASS: &str = "unset";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Window {
    pub title: String,
    pub window_class: String,
    pub workspace_id: i64,
    pub address: String, // only used for activation
    pub is_active_workspace: bool,
}

/// A client as reported by `hyprctl clients -j`.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientInfo {
    pub address: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub class: String,
    pub workspace: WorkspaceRef,
}

/// Workspace object as it appears in `hyprctl` JSON output.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceRef {
    pub id: i64,
}

impl Window {
    /// Build a window from a Hyprland client.
    ///
    /// Returns `None` for clients without a usable class.
    pub fn from_client(client: ClientInfo, active_workspace: i64) -> Option<Self> {
        if client.class.is_empty() || client.class.eq_ignore_ascii_case(UNSET_CLASS) {
            return None;
        }

        Some(Window {
            title: client.title,
            window_class: client.class,
            workspace_id: client.workspace.id,
            address: client.address,
            is_active_workspace: client.workspace.id == active_workspace,
        })
    }
}

/// Parse the output of `hyprctl clients -j`.
pub fn parse_clients(json: &str) -> Result<Vec<ClientInfo>> {
    serde_json::from_str(json).context("Failed to parse hyprctl clients output")
}

/// Parse the output of `hyprctl activeworkspace -j` into a workspace id.
pub fn parse_active_workspace(json: &str) -> Result<i64> {
    let workspace: WorkspaceRef =
        serde_json::from_str(json).context("Failed to parse hyprctl activeworkspace output")?;
    Ok(workspace.id)
}

/// Convert raw clients into the session's window list, in default order.
#[must_use]
pub fn collect_windows(clients: Vec<ClientInfo>, active_workspace: i64) -> Vec<Window> {
    let mut windows: Vec<Window> = clients
        .into_iter()
        .filter_map(|client| Window::from_client(client, active_workspace))
        .collect();
    windows.sort_by(default_order);
    windows
}

/// Active workspace first, then case-insensitive title.
fn default_order(a: &Window, b: &Window) -> Ordering {
    b.is_active_workspace
        .cmp(&a.is_active_workspace)
        .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
}
