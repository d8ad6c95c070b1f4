use crate::error::SwitcherError;
use crate::hypr_client::{HyprClient, WindowActivator, WindowSource};
use crate::selection::{Action, FocusRegion, NavKey, SelectionController};
use crate::window::Window;
use tracing::{debug, error, info, warn};

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionResult {
    Activated(Window),
    Dismissed,
}

/// What the presenter should do after feeding an event in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Let the toolkit's default handling run
    Ignored,
    /// Event consumed, re-render
    Consumed,
    /// Session is over, close the UI
    Finished(SessionResult),
}

/// One opening of the switcher, from window load to activation or dismissal.
pub struct Session<A: WindowActivator = HyprClient> {
    controller: SelectionController,
    activator: A,
    result: Option<SessionResult>,
    source_error: Option<SwitcherError>,
    activation_error: Option<SwitcherError>,
}

impl<A: WindowActivator> Session<A> {
    /// Load the window list and start a session.
    ///
    /// A failing source yields an empty list rather than an error.
    pub fn open<S: WindowSource>(source: &mut S, activator: A) -> Self {
        let (windows, source_error) = match source.list_windows() {
            Ok(windows) => (windows, None),
            Err(e) => {
                warn!("Could not load window list: {:#}", e);
                (Vec::new(), Some(SwitcherError::SourceUnavailable(e)))
            }
        };

        info!("Opened session with {} windows", windows.len());

        Session {
            controller: SelectionController::new(windows),
            activator,
            result: None,
            source_error,
            activation_error: None,
        }
    }

    pub fn controller(&self) -> &SelectionController {
        &self.controller
    }

    /// The terminal result, once the session has finished.
    pub fn result(&self) -> Option<&SessionResult> {
        self.result.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }

    /// Take the load failure, leaving the session's empty list in place.
    pub fn take_source_error(&mut self) -> Option<SwitcherError> {
        self.source_error.take()
    }

    /// Take the activation failure, if the last activation failed.
    pub fn take_activation_error(&mut self) -> Option<SwitcherError> {
        self.activation_error.take()
    }

    pub fn on_query_changed(&mut self, text: &str) {
        if self.is_finished() {
            return;
        }
        self.controller.on_query_changed(text);
    }

    pub fn on_key(&mut self, key: NavKey) -> Response {
        if self.is_finished() {
            return Response::Ignored;
        }

        debug!("Key {:?} in {:?}", key, self.controller.focus_region());
        let action = self.controller.on_key(key);
        self.apply(action)
    }

    pub fn on_row_activated(&mut self, index: usize) -> Response {
        if self.is_finished() {
            return Response::Ignored;
        }

        let action = self.controller.on_row_activated(index);
        self.apply(action)
    }

    pub fn on_focus_changed(&mut self, region: FocusRegion) {
        if self.is_finished() {
            return;
        }
        self.controller.on_focus_changed(region);
    }

    fn apply(&mut self, action: Action) -> Response {
        match action {
            Action::Ignored => Response::Ignored,
            Action::Consumed => Response::Consumed,
            Action::Activate(window) => {
                let result = self.activate(window);
                self.finish(result)
            }
            Action::Dismiss => {
                info!("Switcher dismissed");
                self.finish(SessionResult::Dismissed)
            }
        }
    }

    /// Focus `window`. The session ends as activated even when this fails.
    fn activate(&mut self, window: Window) -> SessionResult {
        info!(
            "Activating {:?} ({}) on workspace {}",
            window.title, window.address, window.workspace_id
        );

        if let Err(e) = self.activator.activate(window.workspace_id, &window.address) {
            error!("Failed to activate window {}: {:#}", window.address, e);
            self.activation_error = Some(SwitcherError::ActivationFailed {
                address: window.address.clone(),
                source: e,
            });
        }

        SessionResult::Activated(window)
    }

    fn finish(&mut self, result: SessionResult) -> Response {
        self.result = Some(result.clone());
        Response::Finished(result)
    }
}
