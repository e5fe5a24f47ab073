use crate::config::AppRule;
use crate::display_action::DisplayAction;
use crate::models::list::prev_of;
use crate::models::{
    AdoptInfo, Alien, Client, ClientId, Handle, WindowHandle, WindowInfo, WindowState, WindowType,
    Xyhw,
};
use crate::state::State;

impl<H: Handle> State<H> {
    /// Takes a new window under management. `rule` is the first application rule matching the
    /// window's title.
    ///
    /// Returns `true` if changes need to be rendered.
    pub fn map_request_handler(&mut self, info: WindowInfo<H>, rule: Option<AppRule>) -> bool {
        if let Some(id) = self.find_window(&info.handle) {
            self.relocate_to_current(id);
            return true;
        }
        if !info.r#type.is_manageable() {
            self.add_alien(&info);
            self.actions.push_back(DisplayAction::MapWindow(info.handle));
            return true;
        }
        if self.is_scratchpad_title(&info) {
            self.adopt_scratchpad(&info);
            self.actions.push_back(DisplayAction::MapWindow(info.handle));
            return true;
        }

        let rule = rule.unwrap_or_default();
        let number = rule
            .desktop
            .filter(|number| *number < self.desktop_count())
            .unwrap_or(self.focus.number);
        let Some((_, display)) = self
            .hierarchy
            .find_desktop(number)
            .and_then(|desktop| self.hierarchy.top_display(desktop))
        else {
            return false;
        };

        let id = self.hierarchy.clients.insert(client_from(&info));
        if let Some(client) = self.client_mut(id) {
            client.floating = rule.floating || info.transient;
            client.border_width = rule.border_width;
        }
        if self.attach_aside {
            self.hierarchy.attach_back(display, id);
        } else {
            self.hierarchy.attach_front(display, id);
        }
        tracing::debug!("Managing {:?} on desktop {number}", info.handle);

        self.hide_client(id);
        self.actions.push_back(DisplayAction::MapWindow(info.handle));
        let mut visible = number == self.focus.number;
        if !visible && rule.follow {
            self.change_desktop(number);
            visible = true;
        }
        if visible && self.show {
            self.show_client(id);
            self.update_current(Some(id));
            if self.auto_center && self.client(id).is_some_and(|c| c.floating) {
                self.center_floating(id);
            }
            if info.fullscreen {
                self.set_fullscreen(id, true);
            }
        }
        self.actions
            .push_back(DisplayAction::SetWindowDesktop(info.handle, number));
        true
    }

    /// Mapping a window that is already managed moves it to the current display and focuses it.
    fn relocate_to_current(&mut self, id: ClientId) {
        let Some(handle) = self.client(id).map(|c| c.handle) else {
            return;
        };
        self.actions.push_back(DisplayAction::MapWindow(handle));
        if self.is_scratchpad(id) {
            return;
        }
        if !self.in_current_display(id) {
            if self.client(id).is_some_and(|c| c.fullscreen) {
                self.destroy_display(id);
            }
            self.hierarchy.detach(id);
            self.hierarchy.attach_back(self.focus.display, id);
            self.show_client(id);
        }
        self.update_current(Some(id));
    }

    fn is_scratchpad_title(&self, info: &WindowInfo<H>) -> bool {
        self.scratchpad.is_none() && info.name.as_deref() == Some(self.scratchpad_name.as_str())
    }

    /// The scratchpad is kept off-screen until it is toggled.
    fn adopt_scratchpad(&mut self, info: &WindowInfo<H>) {
        let id = self.hierarchy.clients.insert(client_from(info));
        self.scratchpad = Some(id);
        self.scratchpad_visible = false;
        self.hide_client(id);
        tracing::debug!("Adopted {:?} as the scratchpad", info.handle);
    }

    fn add_alien(&mut self, info: &WindowInfo<H>) {
        if self.aliens.iter().any(|a| a.handle == info.handle) {
            return;
        }
        self.aliens
            .push(Alien::new(info.handle, info.r#type, info.geometry));
    }

    /// A window that mapped itself without asking. Only unknown windows are tracked, as aliens.
    pub fn window_mapped_handler(&mut self, info: WindowInfo<H>) -> bool {
        if self.find_window(&info.handle).is_some() {
            return false;
        }
        if self.aliens.iter().any(|a| a.handle == info.handle) {
            tracing::trace!("Alien {:?} is already known", info.handle);
            return false;
        }
        self.add_alien(&info);
        true
    }

    /// Takes over a window that existed before the window manager started.
    pub fn adopt_handler(&mut self, info: WindowInfo<H>, adopt: AdoptInfo) -> bool {
        if self.find_window(&info.handle).is_some() {
            return false;
        }
        if !info.r#type.is_manageable() {
            if adopt.mapped {
                self.add_alien(&info);
            }
            return adopt.mapped;
        }
        if self.is_scratchpad_title(&info) {
            self.adopt_scratchpad(&info);
            self.actions.push_back(DisplayAction::MapWindow(info.handle));
            return true;
        }
        let number = match adopt.desktop {
            None if !adopt.mapped => return false,
            None => self.focus.number,
            Some(number) => number.min(self.desktop_count() - 1),
        };
        let Some((_, display)) = self
            .hierarchy
            .find_desktop(number)
            .and_then(|desktop| self.hierarchy.top_display(desktop))
        else {
            return false;
        };

        let id = self.hierarchy.clients.insert(client_from(&info));
        if let Some(client) = self.client_mut(id) {
            client.fullscreen = false;
            client.floating = info.transient;
        }
        self.hierarchy.attach_back(display, id);
        if info.fullscreen {
            self.actions.push_back(DisplayAction::SetState(
                info.handle,
                false,
                WindowState::Fullscreen,
            ));
        }
        self.actions
            .push_back(DisplayAction::SetWindowDesktop(info.handle, number));
        // Mapping starts the adapter's tracking, even for windows that are already mapped.
        self.actions.push_back(DisplayAction::MapWindow(info.handle));
        tracing::debug!("Adopted {:?} on desktop {number}", info.handle);

        if info.hidden {
            self.minimize_client(id);
        } else if number != self.focus.number {
            self.hide_client(id);
        } else {
            self.update_current(self.current());
        }
        true
    }

    /// Returns `true` if changes need to be rendered.
    pub fn window_destroyed_handler(&mut self, handle: &WindowHandle<H>) -> bool {
        if let Some(id) = self.hierarchy.find_client(handle) {
            if self.client(id).is_some_and(|c| c.fullscreen) {
                self.destroy_display(id);
            }
            self.remove_client(id);
            return true;
        }
        if let Some(id) = self.find_window(handle) {
            self.hierarchy.clients.remove(id);
            self.scratchpad = None;
            self.scratchpad_visible = false;
            tracing::debug!("Scratchpad {:?} is gone", handle);
            self.update_current(self.current());
            return true;
        }
        let before = self.aliens.len();
        self.aliens.retain(|a| a.handle != *handle);
        before != self.aliens.len()
    }

    /// Only clients of the active desktop are forgotten when they unmap; the others were
    /// unmapped by someone else on purpose.
    pub fn window_unmapped_handler(&mut self, handle: &WindowHandle<H>) -> bool {
        let Some(id) = self.hierarchy.find_client(handle) else {
            return false;
        };
        if self.hierarchy.desktop_of(id) != Some(self.focus.number) {
            return false;
        }
        if self.client(id).is_some_and(|c| c.fullscreen) {
            self.destroy_display(id);
        }
        self.remove_client(id);
        true
    }

    /// Drops a client from its display and frees it.
    pub fn remove_client(&mut self, id: ClientId) {
        let Some(display_id) = self.client(id).and_then(Client::display) else {
            return;
        };
        self.hierarchy.unlink(id);
        let display = &mut self.hierarchy.displays[display_id];
        display.forget_minimized(id);
        let was_current = display.current == Some(id);
        if was_current {
            display.current = None;
        }
        if display.previous == Some(id) {
            display.previous = display
                .current
                .and_then(|current| prev_of(&self.hierarchy.clients, current));
        }
        let remaining = display.clients.len();
        self.hierarchy.clients.remove(id);

        if display_id != self.focus.display {
            let display = &mut self.hierarchy.displays[display_id];
            if was_current {
                display.current = display.previous.take();
            }
            return;
        }
        if was_current || remaining <= 1 {
            self.update_current(self.display().previous);
        } else {
            self.tile();
        }
    }

    /// Asks the current client to close and stops managing it.
    pub fn kill_client(&mut self) -> Option<bool> {
        let current = self.current()?;
        self.close_client(current)
    }

    pub fn close_client(&mut self, id: ClientId) -> Option<bool> {
        let handle = self.client(id)?.handle;
        self.actions.push_back(DisplayAction::KillWindow(handle));
        if self.is_scratchpad(id) {
            self.hierarchy.clients.remove(id);
            self.scratchpad = None;
            self.scratchpad_visible = false;
            if self.current() == Some(id) {
                self.display_mut().current = None;
            }
            self.update_current(None);
            return Some(true);
        }
        if self.client(id).is_some_and(|c| c.fullscreen) {
            self.destroy_display(id);
        }
        self.remove_client(id);
        Some(true)
    }

    /// Forwards a configure request, keeping the window clear of the panel and inside the
    /// monitor. Maximized clients stay maximized.
    pub fn configure_request_handler(
        &mut self,
        handle: &WindowHandle<H>,
        geometry: Xyhw,
        border_width: i32,
    ) -> bool {
        let id = self.find_window(handle);
        if let Some(id) = id.filter(|id| self.client(*id).is_some_and(|c| c.maximized)) {
            self.set_maximize(id, true);
            self.tile();
            return true;
        }
        let borders = id.map_or(0, |id| self.border_of(id));
        let settings = self.display().settings;
        let normal = id
            .and_then(|id| self.client(id))
            .is_some_and(|c| c.r#type == WindowType::Normal);
        let panel = self.monitor().panel_height;
        let mut geometry = geometry;
        if normal && settings.show_panel && self.top_panel && geometry.y < panel {
            geometry.y = panel;
        }
        if geometry.w >= self.ww() - borders {
            geometry.w = self.ww() + borders;
        }
        if geometry.h >= self.wh() - borders {
            geometry.h = self.wh() + borders;
        }
        if let Some(client) = id
            .and_then(|id| self.client_mut(id))
            .filter(|c| c.floating)
        {
            client.geometry = geometry;
        }
        self.actions.push_back(DisplayAction::ConfigureWindow {
            handle: *handle,
            geometry,
            border_width,
        });
        self.tile();
        true
    }

    /// Urgency is only recorded for clients that do not have focus.
    pub fn urgency_change_handler(&mut self, handle: &WindowHandle<H>, urgent: bool) -> bool {
        let Some(id) = self.find_window(handle) else {
            return false;
        };
        let current = self.current();
        if let Some(client) = self.client_mut(id) {
            client.urgent = urgent && current != Some(id);
        }
        true
    }

    pub fn title_change_handler(&mut self, handle: &WindowHandle<H>, name: Option<String>) -> bool {
        let Some(id) = self.find_window(handle) else {
            return false;
        };
        let current = self.current();
        if let Some(client) = self.client_mut(id) {
            client.name = name;
        }
        self.output_title && current == Some(id)
    }
}

fn client_from<H: Handle>(info: &WindowInfo<H>) -> Client<H> {
    let mut client = Client::new(info.handle, info.r#type, info.geometry);
    client.name = info.name.clone();
    client.transient = info.transient;
    client.focus = info.focus;
    client
}

#[cfg(test)]
mod tests {
    use super::super::focus_handler::tests::state_with_clients;
    use crate::config::AppRule;
    use crate::display_action::DisplayAction;
    use crate::models::{AdoptInfo, WindowHandle, WindowInfo, WindowState, WindowType, Xyhw};

    fn info(handle: i32) -> WindowInfo<i32> {
        WindowInfo::new(WindowHandle(handle), None, WindowType::Normal)
    }

    #[test]
    fn mapping_twice_does_not_duplicate_the_client() {
        let (mut state, ids) = state_with_clients(2);
        state.map_request_handler(info(1), None);
        assert_eq!(state.hierarchy.client_ids(state.focus.display).len(), 2);
        assert_eq!(state.current(), Some(ids[0]));
    }

    #[test]
    fn a_duplicate_map_on_another_desktop_relocates_the_client() {
        let (mut state, ids) = state_with_clients(2);
        state.client_to_desktop(3);
        state.map_request_handler(info(2), None);
        assert_eq!(state.hierarchy.desktop_of(ids[1]), Some(0));
        assert_eq!(state.current(), Some(ids[1]));
    }

    #[test]
    fn rules_send_clients_to_other_desktops() {
        let (mut state, ids) = state_with_clients(1);
        let rule = AppRule {
            desktop: Some(2),
            floating: true,
            ..AppRule::default()
        };
        state.map_request_handler(info(5), Some(rule));
        let id = state.find_window(&WindowHandle(5)).unwrap();
        assert_eq!(state.hierarchy.desktop_of(id), Some(2));
        assert!(state.client(id).unwrap().hidden);
        assert!(state.client(id).unwrap().floating);
        assert_eq!(state.current(), Some(ids[0]));
        assert_eq!(
            state.actions.back(),
            Some(&DisplayAction::SetWindowDesktop(WindowHandle(5), 2))
        );
    }

    #[test]
    fn following_rules_switch_desktop() {
        let (mut state, _) = state_with_clients(1);
        let rule = AppRule {
            desktop: Some(1),
            follow: true,
            ..AppRule::default()
        };
        state.map_request_handler(info(5), Some(rule));
        assert_eq!(state.focus.number, 1);
        assert_eq!(state.current(), state.find_window(&WindowHandle(5)));
    }

    #[test]
    fn out_of_range_rule_desktops_mean_the_current_one() {
        let (mut state, _) = state_with_clients(0);
        let rule = AppRule {
            desktop: Some(9),
            ..AppRule::default()
        };
        state.map_request_handler(info(5), Some(rule));
        let id = state.find_window(&WindowHandle(5)).unwrap();
        assert_eq!(state.hierarchy.desktop_of(id), Some(0));
    }

    #[test]
    fn transient_windows_float() {
        let (mut state, _) = state_with_clients(1);
        let mut dialog = info(7);
        dialog.transient = true;
        state.map_request_handler(dialog, None);
        let id = state.find_window(&WindowHandle(7)).unwrap();
        assert!(state.client(id).unwrap().floating);
    }

    #[test]
    fn non_normal_windows_become_aliens() {
        let (mut state, _) = state_with_clients(0);
        state.map_request_handler(
            WindowInfo::new(WindowHandle(3), None, WindowType::Dock),
            None,
        );
        assert_eq!(state.aliens.len(), 1);
        assert!(state.find_window(&WindowHandle(3)).is_none());
        assert!(state.window_destroyed_handler(&WindowHandle(3)));
        assert!(state.aliens.is_empty());
    }

    #[test]
    fn the_scratchpad_title_is_recognised() {
        let (mut state, _) = state_with_clients(1);
        state.map_request_handler(
            WindowInfo::new(
                WindowHandle(8),
                Some("scratchpad".to_string()),
                WindowType::Normal,
            ),
            None,
        );
        let id = state.scratchpad.unwrap();
        assert!(state.client(id).unwrap().hidden);
        assert_eq!(state.hierarchy.desktop_of(id), None);
        assert!(state.window_destroyed_handler(&WindowHandle(8)));
        assert!(state.scratchpad.is_none());
    }

    #[test]
    fn removing_the_current_client_focuses_the_previous_one() {
        let (mut state, ids) = state_with_clients(3);
        state.window_destroyed_handler(&WindowHandle(3));
        assert_eq!(state.current(), Some(ids[1]));
        assert_eq!(state.display().previous, Some(ids[0]));
        assert!(state.client(ids[2]).is_none());
    }

    #[test]
    fn removing_the_previous_client_picks_a_new_one() {
        let (mut state, ids) = state_with_clients(3);
        state.window_destroyed_handler(&WindowHandle(2));
        assert_eq!(state.current(), Some(ids[2]));
        assert_eq!(state.display().previous, Some(ids[0]));
    }

    #[test]
    fn unmapping_a_client_of_another_desktop_is_ignored() {
        let (mut state, ids) = state_with_clients(2);
        state.client_to_desktop(1);
        assert!(!state.window_unmapped_handler(&WindowHandle(2)));
        assert!(state.client(ids[1]).is_some());
        assert!(state.window_unmapped_handler(&WindowHandle(1)));
        assert!(state.client(ids[0]).is_none());
    }

    #[test]
    fn destroying_a_fullscreen_client_pops_its_display() {
        let (mut state, ids) = state_with_clients(2);
        state.set_fullscreen(ids[0], true);
        state.window_destroyed_handler(&WindowHandle(1));
        assert_eq!(state.hierarchy.monitors[state.focus.monitor].displays.len(), 1);
        assert_eq!(state.hierarchy.client_ids(state.focus.display), vec![ids[1]]);
        assert_eq!(state.current(), Some(ids[1]));
    }

    #[test]
    fn kill_client_asks_the_window_to_close() {
        let (mut state, ids) = state_with_clients(2);
        state.kill_client();
        assert!(state
            .actions
            .contains(&DisplayAction::KillWindow(WindowHandle(2))));
        assert_eq!(state.current(), Some(ids[0]));
    }

    #[test]
    fn configure_requests_are_kept_below_the_panel() {
        let (mut state, _) = state_with_clients(2);
        state.configure_request_handler(&WindowHandle(1), Xyhw::new(10, 5, 5000, 100), 1);
        assert!(state.actions.contains(&DisplayAction::ConfigureWindow {
            handle: WindowHandle(1),
            geometry: Xyhw::new(10, 18, 1280 + 2, 100),
            border_width: 1,
        }));
    }

    #[test]
    fn urgency_is_not_set_on_the_focused_client() {
        let (mut state, ids) = state_with_clients(2);
        state.urgency_change_handler(&WindowHandle(2), true);
        state.urgency_change_handler(&WindowHandle(1), true);
        assert!(!state.client(ids[1]).unwrap().urgent);
        assert!(state.client(ids[0]).unwrap().urgent);
    }

    #[test]
    fn adoption_places_windows_on_their_desktops() {
        let (mut state, _) = state_with_clients(0);
        let adopt = |mapped, desktop| AdoptInfo { mapped, desktop };
        assert!(!state.adopt_handler(info(1), adopt(false, None)));
        assert!(state.adopt_handler(info(2), adopt(true, None)));
        assert!(state.adopt_handler(info(3), adopt(false, Some(17))));
        let mut hidden = info(4);
        hidden.hidden = true;
        assert!(state.adopt_handler(hidden, adopt(true, Some(0))));
        let mut fullscreen = info(5);
        fullscreen.fullscreen = true;
        assert!(state.adopt_handler(fullscreen, adopt(true, Some(0))));

        let desktop = |state: &crate::state::State<i32>, h| {
            let id = state.find_window(&WindowHandle(h)).unwrap();
            state.hierarchy.desktop_of(id)
        };
        assert!(state.find_window(&WindowHandle(1)).is_none());
        assert_eq!(desktop(&state, 2), Some(0));
        assert_eq!(desktop(&state, 3), Some(3));
        let three = state.find_window(&WindowHandle(3)).unwrap();
        assert!(state.client(three).unwrap().hidden);
        let four = state.find_window(&WindowHandle(4)).unwrap();
        assert!(state.client(four).unwrap().minimized);
        assert_eq!(state.display().minimized, vec![four]);
        let five = state.find_window(&WindowHandle(5)).unwrap();
        assert!(!state.client(five).unwrap().fullscreen);
        assert!(state.actions.contains(&DisplayAction::SetState(
            WindowHandle(5),
            false,
            WindowState::Fullscreen
        )));
        assert_ne!(state.current(), Some(four));
        // Already mapped windows are still handed to the display server.
        assert!(state
            .actions
            .contains(&DisplayAction::MapWindow(WindowHandle(2))));
    }
}
