use crate::selection::{FocusRegion, NavKey};
use crate::session::{Response, Session};
use crate::window::Window;
use gtk4::gdk::{Key, ModifierType};
use gtk4::prelude::*;
use gtk4::{
    Application, ApplicationWindow, Box as GtkBox, Entry, EventControllerFocus,
    EventControllerKey, Label, ListBox, ListBoxRow, Orientation, PropagationPhase,
    ScrolledWindow, SelectionMode,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, info};

const DEFAULT_WIDTH: i32 = 600;
const DEFAULT_HEIGHT: i32 = 400;
const ROW_SPACING: i32 = 12;

/// GTK view of a [`Session`]: a search entry above the window list.
///
/// The session owns all state; this only mirrors it into widgets and feeds
/// toolkit events back in.
pub struct SwitcherWindow {
    window: ApplicationWindow,
    entry: Entry,
    list_box: ListBox,
    session: RefCell<Session>,
    rendered_revision: Cell<Option<u64>>,
}

impl SwitcherWindow {
    pub fn new(app: &Application, session: Session) -> Rc<Self> {
        let window = ApplicationWindow::builder()
            .application(app)
            .title("HyprSwitcher")
            .default_width(DEFAULT_WIDTH)
            .default_height(DEFAULT_HEIGHT)
            .build();

        let main_box = GtkBox::new(Orientation::Vertical, 0);
        window.set_child(Some(&main_box));

        let search_box = GtkBox::new(Orientation::Horizontal, 0);
        search_box.set_css_classes(&["search-box"]);

        let search_label = Label::new(Some("Search: "));
        search_label.set_css_classes(&["search-label"]);
        search_box.append(&search_label);

        let entry = Entry::new();
        entry.set_hexpand(true);
        search_box.append(&entry);
        main_box.append(&search_box);

        let scrolled = ScrolledWindow::new();
        scrolled.set_vexpand(true);
        main_box.append(&scrolled);

        let list_box = ListBox::new();
        list_box.set_selection_mode(SelectionMode::Single);
        list_box.set_css_classes(&["window-list"]);
        scrolled.set_child(Some(&list_box));

        let switcher = Rc::new(SwitcherWindow {
            window,
            entry,
            list_box,
            session: RefCell::new(session),
            rendered_revision: Cell::new(None),
        });
        switcher.connect_signals();
        switcher
    }

    /// Show the switcher with the search entry focused
    pub fn present(&self) {
        self.render();
        self.window.present();
        info!("Switcher presented");
    }

    fn connect_signals(self: &Rc<Self>) {
        let this = Rc::clone(self);
        self.entry.connect_changed(move |entry| {
            let text = entry.text();
            this.session.borrow_mut().on_query_changed(&text);
            this.render();
        });

        let this = Rc::clone(self);
        self.list_box.connect_row_activated(move |_, row| {
            let Ok(index) = usize::try_from(row.index()) else {
                return;
            };
            let response = this.session.borrow_mut().on_row_activated(index);
            let _ = this.handle(response);
        });

        self.entry.add_controller(self.key_controller(FocusRegion::SearchField));
        self.list_box.add_controller(self.key_controller(FocusRegion::List));

        let entry_focus = EventControllerFocus::new();
        let this = Rc::clone(self);
        entry_focus.connect_enter(move |_| {
            this.session.borrow_mut().on_focus_changed(FocusRegion::SearchField);
            this.list_box.unselect_all();
        });
        self.entry.add_controller(entry_focus);

        let list_focus = EventControllerFocus::new();
        let this = Rc::clone(self);
        list_focus.connect_enter(move |_| {
            this.session.borrow_mut().on_focus_changed(FocusRegion::List);
        });
        self.list_box.add_controller(list_focus);
    }

    /// Key handling shared by the entry and the list. Capture phase so the
    /// entry's text widget and the list's own bindings don't see navigation keys.
    ///
    /// On the list, the remaining cursor keys are swallowed too: `ListBox` would
    /// otherwise move its visible selection away from the session's.
    fn key_controller(self: &Rc<Self>, region: FocusRegion) -> EventControllerKey {
        let controller = EventControllerKey::new();
        controller.set_propagation_phase(PropagationPhase::Capture);

        let this = Rc::clone(self);
        controller.connect_key_pressed(move |_, keyval, _, state| {
            let Some(key) = nav_key(keyval) else {
                if region == FocusRegion::List && is_list_cursor_key(keyval, state) {
                    return glib::Propagation::Stop;
                }
                return glib::Propagation::Proceed;
            };

            let response = this.session.borrow_mut().on_key(key);
            this.handle(response)
        });
        controller
    }

    fn handle(&self, response: Response) -> glib::Propagation {
        match response {
            Response::Ignored => glib::Propagation::Proceed,
            Response::Consumed => {
                self.render();
                glib::Propagation::Stop
            }
            Response::Finished(_) => {
                debug!("Session finished: {:?}", self.session.borrow().result());
                self.window.close();
                glib::Propagation::Stop
            }
        }
    }

    /// Bring the widgets in line with the session state.
    ///
    /// The session borrow is released before touching widgets, since focus
    /// changes re-enter the focus handlers.
    fn render(&self) {
        let (revision, ordered, focus, selected) = {
            let session = self.session.borrow();
            let controller = session.controller();
            (
                controller.revision(),
                controller.ordered().to_vec(),
                controller.focus_region(),
                controller.selected_index(),
            )
        };

        if self.rendered_revision.get() != Some(revision) {
            self.rebuild_rows(&ordered);
            self.rendered_revision.set(Some(revision));
        }

        match (focus, selected) {
            (FocusRegion::List, Some(index)) => {
                let row = i32::try_from(index)
                    .ok()
                    .and_then(|i| self.list_box.row_at_index(i));
                if let Some(row) = row {
                    self.list_box.select_row(Some(&row));
                    row.grab_focus();
                }
            }
            (FocusRegion::List, None) => self.list_box.unselect_all(),
            (FocusRegion::SearchField, _) => {
                self.list_box.unselect_all();
                self.entry.grab_focus_without_selecting();
            }
        }
    }

    fn rebuild_rows(&self, windows: &[Window]) {
        while let Some(child) = self.list_box.first_child() {
            self.list_box.remove(&child);
        }

        for window in windows {
            self.list_box.append(&create_row(window));
        }
        debug!("Rendered {} rows", windows.len());
    }
}

fn create_row(window: &Window) -> ListBoxRow {
    let row = GtkBox::new(Orientation::Horizontal, ROW_SPACING);
    row.set_css_classes(&["window-row"]);

    let text_box = GtkBox::new(Orientation::Vertical, 2);
    text_box.set_hexpand(true);

    let title = Label::new(Some(&window.title));
    title.set_css_classes(&["window-title"]);
    title.set_halign(gtk4::Align::Start);
    title.set_ellipsize(gtk4::pango::EllipsizeMode::End);
    text_box.append(&title);

    let info = Label::new(Some(&row_subtitle(window)));
    info.set_css_classes(&["window-info"]);
    info.set_halign(gtk4::Align::Start);
    text_box.append(&info);

    row.append(&text_box);

    let list_row = ListBoxRow::new();
    list_row.set_child(Some(&row));
    list_row
}

fn row_subtitle(window: &Window) -> String {
    format!("{} (Workspace {})", window.window_class, window.workspace_id)
}

fn nav_key(keyval: Key) -> Option<NavKey> {
    match keyval {
        Key::Up | Key::KP_Up => Some(NavKey::Up),
        Key::Down | Key::KP_Down => Some(NavKey::Down),
        Key::Return | Key::KP_Enter => Some(NavKey::Enter),
        Key::Right | Key::KP_Right => Some(NavKey::Right),
        Key::Escape => Some(NavKey::Escape),
        _ => None,
    }
}

/// Keys `ListBox` binds to cursor and selection movement that the session
/// doesn't handle.
fn is_list_cursor_key(keyval: Key, state: ModifierType) -> bool {
    match keyval {
        Key::Home
        | Key::KP_Home
        | Key::End
        | Key::KP_End
        | Key::Page_Up
        | Key::KP_Page_Up
        | Key::Page_Down
        | Key::KP_Page_Down => true,
        // toggle-cursor-row and select-all/unselect-all
        Key::space | Key::KP_Space => state.contains(ModifierType::CONTROL_MASK),
        Key::a | Key::A => state.contains(ModifierType::CONTROL_MASK),
        _ => false,
    }
}
