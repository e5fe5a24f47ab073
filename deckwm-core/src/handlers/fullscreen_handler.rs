use crate::display_action::DisplayAction;
use crate::models::{ClientId, DisplayId, Handle, ReturnSlot, WindowState, Xyhw};
use crate::state::State;

impl<H: Handle> State<H> {
    pub fn set_fullscreen(&mut self, id: ClientId, fullscreen: bool) -> Option<bool> {
        let client = self.client(id)?;
        if client.fullscreen == fullscreen {
            return None;
        }
        if fullscreen {
            self.create_display(id)
        } else {
            self.destroy_display(id)
        }
    }

    pub fn toggle_fullscreen(&mut self) -> Option<bool> {
        let current = self.current()?;
        let fullscreen = self.client(current)?.fullscreen;
        self.set_fullscreen(current, !fullscreen)
    }

    /// Isolates a client on a display of its own, pushed on top of its monitor's stack.
    /// Off the active desktop only the hierarchy changes and everything stays off screen.
    pub(crate) fn create_display(&mut self, id: ClientId) -> Option<bool> {
        let (old, monitor, desktop) = self.hierarchy.parents(id)?;
        let active = desktop == self.focus.desktop;
        let screen = self.hierarchy.monitors[monitor].screen;
        let client = self.client_mut(id)?;
        client.fullscreen = true;
        let handle = client.handle;
        self.actions
            .push_back(DisplayAction::SetBorderWidth(handle, 0));
        if active {
            self.move_resize_client(id, screen);
        } else {
            self.resize_hidden_client(id, screen);
        }
        self.actions
            .push_back(DisplayAction::SetState(handle, true, WindowState::Fullscreen));

        let slot = self
            .hierarchy
            .prev_client(id)
            .map_or(ReturnSlot::Head, ReturnSlot::After);
        let settings = self.hierarchy.displays[old].settings;
        self.hierarchy.detach(id);
        let isolated = self.hierarchy.push_display(monitor, settings);
        self.hierarchy.displays[isolated].return_slot = Some(slot);
        self.hierarchy.attach_front(isolated, id);
        tracing::debug!("Pushed a display for fullscreen client {:?}", handle);

        self.hide_display(old);
        if !active {
            self.hierarchy.displays[isolated].current = Some(id);
            return Some(true);
        }
        self.hide_aliens();
        self.reselect();
        self.update_current(Some(id));
        Some(true)
    }

    /// Leaves fullscreen, moving everything on the isolated display back to the one below it.
    /// Off the active desktop the clients are relinked but stay off screen.
    pub(crate) fn destroy_display(&mut self, id: ClientId) -> Option<bool> {
        let desktop = self.hierarchy.parents(id).map(|(_, _, desktop)| desktop);
        let client = self.client_mut(id)?;
        client.fullscreen = false;
        let handle = client.handle;
        let display = client.display();
        self.actions.push_back(DisplayAction::SetState(
            handle,
            false,
            WindowState::Fullscreen,
        ));
        let Some((display, below)) =
            display.and_then(|d| Some((d, self.hierarchy.display_below(d)?)))
        else {
            tracing::trace!("No display below {:?}, nothing to pop", handle);
            self.tile();
            return None;
        };

        self.relink_onto(display, below, id);
        if !self.hierarchy.pop_display(display) {
            tracing::warn!("Fullscreen display was not empty after relinking");
        }
        if desktop != Some(self.focus.desktop) {
            let lower = &mut self.hierarchy.displays[below];
            if lower.current != Some(id) {
                lower.previous = lower.current;
                lower.current = Some(id);
            }
            return Some(true);
        }
        self.reselect();
        self.show_display(below);
        self.show_aliens();
        self.update_current(Some(id));
        Some(true)
    }

    /// Records a new size for a client that is off screen, keeping it there.
    fn resize_hidden_client(&mut self, id: ClientId, geometry: Xyhw) {
        self.hide_client(id);
        if let Some(client) = self.client_mut(id) {
            client.geometry = geometry;
            let handle = client.handle;
            self.actions.push_back(DisplayAction::ResizeWindow(
                handle,
                geometry.w,
                geometry.h,
            ));
        }
    }

    fn relink_onto(&mut self, from: DisplayId, to: DisplayId, fullscreen: ClientId) {
        let slot = self.hierarchy.displays[from].return_slot;
        let minimized: Vec<ClientId> = self.hierarchy.displays[from].minimized.drain(..).collect();
        for id in self.hierarchy.client_ids(from) {
            self.hierarchy.detach(id);
            if id != fullscreen {
                self.hierarchy.attach_back(to, id);
                continue;
            }
            let placed = match slot {
                Some(ReturnSlot::After(anchor)) => self.hierarchy.attach_after(to, anchor, id),
                Some(ReturnSlot::Head) | None => self.hierarchy.attach_front(to, id),
            };
            if !placed {
                self.hierarchy.attach_back(to, id);
            }
        }
        for id in minimized {
            if let Some(client) = self.client_mut(id) {
                client.minimized = false;
                let handle = client.handle;
                self.actions
                    .push_back(DisplayAction::SetState(handle, false, WindowState::Hidden));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::focus_handler::tests::state_with_clients;
    use crate::models::{WindowHandle, WindowInfo, WindowType, Xyhw};

    #[test]
    fn fullscreen_round_trip_restores_order_and_stack_depth() {
        let (mut state, ids) = state_with_clients(4);
        let monitor = state.focus.monitor;
        let lower = state.focus.display;
        state.set_fullscreen(ids[2], true);

        assert_eq!(state.hierarchy.monitors[monitor].displays.len(), 2);
        assert_ne!(state.focus.display, lower);
        assert_eq!(state.hierarchy.client_ids(state.focus.display), vec![ids[2]]);
        assert_eq!(
            state.client(ids[2]).unwrap().geometry,
            Xyhw::new(0, 0, 1280, 800)
        );
        assert!(state.client(ids[0]).unwrap().hidden);

        state.set_fullscreen(ids[2], false);
        assert_eq!(state.hierarchy.monitors[monitor].displays.len(), 1);
        assert_eq!(state.focus.display, lower);
        assert_eq!(state.hierarchy.client_ids(lower), ids);
        assert_eq!(state.current(), Some(ids[2]));
        assert!(ids.iter().all(|id| !state.client(*id).unwrap().hidden));
    }

    #[test]
    fn a_fullscreen_head_returns_to_the_head() {
        let (mut state, ids) = state_with_clients(3);
        state.set_fullscreen(ids[0], true);
        state.set_fullscreen(ids[0], false);
        assert_eq!(state.hierarchy.client_ids(state.focus.display), ids);
    }

    #[test]
    fn clients_mapped_while_fullscreen_join_the_lower_display() {
        let (mut state, ids) = state_with_clients(2);
        state.set_fullscreen(ids[0], true);
        state.map_request_handler(
            WindowInfo::new(WindowHandle(9), None, WindowType::Normal),
            None,
        );
        let late = state.find_window(&WindowHandle(9)).unwrap();
        state.set_fullscreen(ids[0], false);
        assert_eq!(
            state.hierarchy.client_ids(state.focus.display),
            vec![ids[0], ids[1], late]
        );
    }

    #[test]
    fn leaving_fullscreen_without_a_display_below_only_clears_the_flag() {
        let (mut state, ids) = state_with_clients(1);
        state.client_mut(ids[0]).unwrap().fullscreen = true;
        assert_eq!(state.set_fullscreen(ids[0], false), None);
        assert!(!state.client(ids[0]).unwrap().fullscreen);
        assert_eq!(state.hierarchy.monitors[state.focus.monitor].displays.len(), 1);
    }

    #[test]
    fn destroying_a_fullscreen_client_on_a_hidden_desktop_keeps_it_hidden() {
        let (mut state, ids) = state_with_clients(2);
        let monitor = state.focus.monitor;
        state.set_fullscreen(ids[0], true);
        state.change_desktop(1);
        state.window_destroyed_handler(&WindowHandle(1));

        assert!(state.client(ids[1]).unwrap().hidden);
        assert_eq!(state.hierarchy.monitors[monitor].displays.len(), 1);
        assert_eq!(state.focus.number, 1);

        state.change_desktop(0);
        assert!(!state.client(ids[1]).unwrap().hidden);
        assert_eq!(state.current(), Some(ids[1]));
    }

    #[test]
    fn fullscreen_on_a_hidden_desktop_waits_off_screen() {
        let (mut state, ids) = state_with_clients(2);
        let monitor = state.focus.monitor;
        state.change_desktop(1);
        let shown = state.focus.display;
        assert_eq!(state.set_fullscreen(ids[0], true), Some(true));

        let client = state.client(ids[0]).unwrap();
        assert!(client.fullscreen);
        assert!(client.hidden);
        assert!(state.client(ids[1]).unwrap().hidden);
        assert_eq!(state.hierarchy.monitors[monitor].displays.len(), 2);
        assert_eq!(state.focus.display, shown);

        state.change_desktop(0);
        let client = state.client(ids[0]).unwrap();
        assert!(!client.hidden);
        assert_eq!(client.geometry, Xyhw::new(0, 0, 1280, 800));
        assert!(state.client(ids[1]).unwrap().hidden);
        assert_eq!(state.current(), Some(ids[0]));
    }

    #[test]
    fn sending_a_fullscreen_client_away_pops_its_display() {
        let (mut state, ids) = state_with_clients(2);
        let monitor = state.focus.monitor;
        state.set_fullscreen(ids[1], true);
        state.client_to_desktop(2);

        assert_eq!(state.hierarchy.monitors[monitor].displays.len(), 1);
        assert!(!state.client(ids[1]).unwrap().fullscreen);
        assert_eq!(state.hierarchy.desktop_of(ids[1]), Some(2));
        assert!(!state.client(ids[0]).unwrap().hidden);
        assert_eq!(state.current(), Some(ids[0]));
    }

    #[test]
    fn remapping_a_fullscreen_client_from_another_desktop_pops_its_display() {
        let (mut state, ids) = state_with_clients(2);
        let monitor = state.focus.monitor;
        state.set_fullscreen(ids[0], true);
        state.change_desktop(1);
        state.map_request_handler(
            WindowInfo::new(WindowHandle(1), None, WindowType::Normal),
            None,
        );

        assert_eq!(state.hierarchy.monitors[monitor].displays.len(), 1);
        assert_eq!(state.hierarchy.desktop_of(ids[0]), Some(1));
        assert!(!state.client(ids[0]).unwrap().fullscreen);
        assert!(state.client(ids[1]).unwrap().hidden);
        assert_eq!(state.current(), Some(ids[0]));
    }
}
