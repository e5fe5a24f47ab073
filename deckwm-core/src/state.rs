//! The window manager's view of the world.

use crate::config::Config;
use crate::display_action::DisplayAction;
use crate::layouts::LayoutArea;
use crate::models::{
    Alien, Client, ClientId, Display, DisplayId, DisplaySettings, FocusContext, Handle, Hierarchy,
    Mode, Monitor, WindowHandle, Xyhw,
};
use std::collections::VecDeque;

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug)]
pub struct State<H: Handle> {
    pub hierarchy: Hierarchy<H>,
    pub focus: FocusContext,
    pub previous_desktop: usize,
    /// Unmanaged windows kept above the clients.
    pub aliens: Vec<Alien<H>>,
    /// Client recognised by its title, owned by no display.
    pub scratchpad: Option<ClientId>,
    pub scratchpad_visible: bool,
    pub mode: Mode,
    pub actions: VecDeque<DisplayAction<H>>,
    /// Clients of the current display are on screen; cleared by `ShowHide`.
    pub show: bool,
    pub border_width: i32,
    pub master_ratio: f64,
    pub min_window_size: i32,
    pub panel_height: i32,
    pub top_panel: bool,
    pub attach_aside: bool,
    pub follow_mouse: bool,
    pub follow_window: bool,
    pub click_to_focus: bool,
    pub monocle_borders: bool,
    pub auto_center: bool,
    pub global_gaps: bool,
    pub output_title: bool,
    pub scratchpad_name: String,
    pub scratchpad_border_width: i32,
    pub mousekey: Vec<String>,
}

impl<H: Handle> State<H> {
    pub(crate) fn new(config: &impl Config) -> Self {
        let desktops = config.desktops().max(1);
        let settings = DisplaySettings {
            layout: config.default_layout(),
            master_size: 0,
            growth: 0,
            gaps: config.gaps(),
            invert: config.invert(),
            show_panel: config.show_panel(),
        };
        let hierarchy = Hierarchy::new(
            desktops,
            Xyhw::default(),
            config.panel_height(),
            settings,
        );
        let current = config.default_desktop().min(desktops - 1);
        let focus = hierarchy.focus_context(current).unwrap_or_default();

        Self {
            hierarchy,
            focus,
            previous_desktop: current,
            aliens: vec![],
            scratchpad: None,
            scratchpad_visible: false,
            mode: Mode::default(),
            actions: VecDeque::new(),
            show: true,
            border_width: config.border_width(),
            master_ratio: config.master_size(),
            min_window_size: config.min_window_size(),
            panel_height: config.panel_height(),
            top_panel: config.top_panel(),
            attach_aside: config.attach_aside(),
            follow_mouse: config.follow_mouse(),
            follow_window: config.follow_window(),
            click_to_focus: config.click_to_focus(),
            monocle_borders: config.monocle_borders(),
            auto_center: config.auto_center(),
            global_gaps: config.global_gaps(),
            output_title: config.output_title(),
            scratchpad_name: config.scratchpad_name(),
            scratchpad_border_width: config.scratchpad_border_width(),
            mousekey: config.mousekey(),
        }
    }

    pub fn desktop_count(&self) -> usize {
        self.hierarchy.desktop_count()
    }

    /// Makes desktop `number` the active one and recomputes the focus context.
    /// Out of range numbers are ignored.
    pub fn select(&mut self, number: usize) -> bool {
        match self.hierarchy.focus_context(number) {
            Some(context) => {
                self.focus = context;
                true
            }
            None => false,
        }
    }

    /// Recomputes the focus context after a display was pushed or popped.
    pub fn reselect(&mut self) {
        self.select(self.focus.number);
    }

    pub fn monitor(&self) -> &Monitor {
        &self.hierarchy.monitors[self.focus.monitor]
    }

    pub fn display(&self) -> &Display {
        &self.hierarchy.displays[self.focus.display]
    }

    pub fn display_mut(&mut self) -> &mut Display {
        &mut self.hierarchy.displays[self.focus.display]
    }

    /// Usable width of the current monitor.
    pub fn ww(&self) -> i32 {
        self.monitor().width()
    }

    /// Usable height of the current monitor, panel excluded.
    pub fn wh(&self) -> i32 {
        self.monitor().height()
    }

    pub fn current(&self) -> Option<ClientId> {
        self.display().current
    }

    pub fn client(&self, id: ClientId) -> Option<&Client<H>> {
        self.hierarchy.clients.get(id)
    }

    pub fn client_mut(&mut self, id: ClientId) -> Option<&mut Client<H>> {
        self.hierarchy.clients.get_mut(id)
    }

    /// Finds a managed client or the scratchpad by window handle.
    pub fn find_window(&self, handle: &WindowHandle<H>) -> Option<ClientId> {
        self.hierarchy.find_client(handle).or_else(|| {
            self.scratchpad
                .filter(|id| self.client(*id).is_some_and(|c| c.handle == *handle))
        })
    }

    pub fn is_scratchpad(&self, id: ClientId) -> bool {
        self.scratchpad == Some(id)
    }

    pub fn is_visible_scratchpad(&self, id: ClientId) -> bool {
        self.scratchpad_visible && self.is_scratchpad(id)
    }

    /// Whether `id` is a member of the display currently shown.
    pub fn in_current_display(&self, id: ClientId) -> bool {
        self.client(id)
            .is_some_and(|c| c.display() == Some(self.focus.display))
    }

    pub(crate) fn layout_area(&self, settings: &DisplaySettings) -> LayoutArea {
        let panel = self.monitor().panel_height;
        LayoutArea {
            width: self.ww(),
            height: self.wh() + if settings.show_panel { 0 } else { panel },
            top: if self.top_panel && settings.show_panel {
                panel
            } else {
                0
            },
            monitor_height: self.wh(),
            gaps: settings.gaps,
            master_ratio: self.master_ratio,
            master_size: settings.master_size,
            growth: settings.growth,
            invert: settings.invert,
            min_window_size: self.min_window_size,
            monocle_borders: self.monocle_borders,
        }
    }

    /// Places a client and records the geometry. The client is on screen afterwards.
    pub fn move_resize_client(&mut self, id: ClientId, geometry: Xyhw) {
        if let Some(client) = self.hierarchy.clients.get_mut(id) {
            client.geometry = geometry;
            client.hidden = false;
            self.actions
                .push_back(DisplayAction::MoveResizeWindow(client.handle, geometry));
        }
    }

    /// Moves a client to a new position, keeping its size.
    pub fn move_client(&mut self, id: ClientId, x: i32, y: i32) {
        if let Some(client) = self.hierarchy.clients.get_mut(id) {
            client.geometry = client.geometry.with_position(x, y);
            client.hidden = false;
            self.actions
                .push_back(DisplayAction::MoveWindow(client.handle, x, y));
        }
    }

    /// Moves a client off screen. Its geometry is kept so it can come back.
    pub fn hide_client(&mut self, id: ClientId) {
        let offset = -2 * self.ww();
        if let Some(client) = self.hierarchy.clients.get_mut(id) {
            if !client.hidden {
                client.hidden = true;
                self.actions
                    .push_back(DisplayAction::MoveWindow(client.handle, offset, 0));
            }
        }
    }

    /// Brings a hidden client back to where it was.
    pub fn show_client(&mut self, id: ClientId) {
        if let Some(client) = self.hierarchy.clients.get_mut(id) {
            if client.hidden {
                client.hidden = false;
                let Xyhw { x, y, .. } = client.geometry;
                self.actions
                    .push_back(DisplayAction::MoveWindow(client.handle, x, y));
            }
        }
    }

    pub fn hide_display(&mut self, display: DisplayId) {
        for id in self.hierarchy.client_ids(display) {
            self.hide_client(id);
        }
    }

    /// Shows every client of a display that is not minimized.
    pub fn show_display(&mut self, display: DisplayId) {
        for id in self.hierarchy.client_ids(display) {
            if self.client(id).is_some_and(|c| !c.minimized) {
                self.show_client(id);
            }
        }
    }

    pub fn hide_aliens(&mut self) {
        let offset = -2 * self.ww();
        for alien in self.aliens.iter_mut().filter(|a| !a.hidden) {
            alien.hidden = true;
            self.actions
                .push_back(DisplayAction::MoveWindow(alien.handle, offset, 0));
        }
    }

    pub fn show_aliens(&mut self) {
        for alien in self.aliens.iter_mut().filter(|a| a.hidden) {
            alien.hidden = false;
            self.actions.push_back(DisplayAction::MoveWindow(
                alien.handle,
                alien.geometry.x,
                alien.geometry.y,
            ));
        }
    }

    /// Tears everything down on exit. Returns the handles of the clients that were managed,
    /// scratchpad included.
    pub fn drop_hierarchy(&mut self) -> Vec<WindowHandle<H>> {
        self.aliens.clear();
        self.scratchpad = None;
        self.scratchpad_visible = false;
        self.mode = Mode::Normal;
        let handles: Vec<WindowHandle<H>> = self
            .hierarchy
            .drop_hierarchy()
            .into_iter()
            .map(|client| client.handle)
            .collect();
        tracing::debug!("Released {} clients", handles.len());
        handles
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{Client, WindowHandle, WindowType, Xyhw};
    use crate::Manager;

    #[test]
    fn state_starts_on_the_default_desktop() {
        let manager = Manager::new_test(4);
        let state = &manager.state;
        assert_eq!(state.desktop_count(), 4);
        assert_eq!(state.focus.number, 0);
        assert!(state.display().clients.is_empty());
        assert!(state.show);
    }

    #[test]
    fn hiding_twice_moves_the_window_once() {
        let mut manager = Manager::new_test(4);
        let state = &mut manager.state;
        state.screen_create_handler(Xyhw::new(0, 0, 1000, 700));
        let id = state.hierarchy.clients.insert(Client::new(
            WindowHandle(1),
            WindowType::Normal,
            Xyhw::new(10, 20, 300, 200),
        ));
        state.hierarchy.attach_back(state.focus.display, id);
        state.actions.clear();
        state.hide_client(id);
        state.hide_client(id);
        assert_eq!(state.actions.len(), 1);
        state.show_client(id);
        assert_eq!(
            state.actions.back(),
            Some(&crate::DisplayAction::MoveWindow(WindowHandle(1), 10, 20))
        );
    }

    #[test]
    fn selecting_an_unknown_desktop_is_ignored() {
        let mut manager = Manager::new_test(2);
        assert!(!manager.state.select(2));
        assert_eq!(manager.state.focus.number, 0);
        assert!(manager.state.select(1));
        assert_eq!(manager.state.focus.number, 1);
    }

    #[test]
    fn drop_hierarchy_returns_the_scratchpad_too() {
        let mut manager = Manager::new_test(1);
        let state = &mut manager.state;
        let normal = state.hierarchy.clients.insert(Client::new(
            WindowHandle(1),
            WindowType::Normal,
            Xyhw::default(),
        ));
        state.hierarchy.attach_back(state.focus.display, normal);
        let scratchpad = state.hierarchy.clients.insert(Client::new(
            WindowHandle(2),
            WindowType::Normal,
            Xyhw::default(),
        ));
        state.scratchpad = Some(scratchpad);
        let mut handles = state.drop_hierarchy();
        handles.sort_by_key(|h| h.0);
        assert_eq!(handles, vec![WindowHandle(1), WindowHandle(2)]);
        assert!(state.scratchpad.is_none());
    }
}
