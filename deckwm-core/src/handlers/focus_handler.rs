use crate::display_action::{BorderColor, DisplayAction};
use crate::layouts::Layout;
use crate::models::{ClientId, DisplayId, FocusDelivery, Handle, WindowType};
use crate::state::State;

impl<H: Handle> State<H> {
    /// Border width a client gets in its display right now.
    pub fn border_of(&self, id: ClientId) -> i32 {
        let Some(client) = self.client(id) else {
            return 0;
        };
        if client.fullscreen {
            return 0;
        }
        if self.is_scratchpad(id) {
            return self.scratchpad_border_width;
        }
        let width = client.border_width.unwrap_or(self.border_width);
        if self.monocle_borders {
            return width;
        }
        let Some(display) = client
            .display()
            .and_then(|display| self.hierarchy.displays.get(display))
        else {
            return width;
        };
        let visible = display
            .clients
            .iter(&self.hierarchy.clients)
            .filter(|other| !self.hierarchy.clients[*other].minimized)
            .count();
        let monocle = display.settings.layout == Layout::Monocle && client.is_tileable();
        if visible <= 1 || monocle {
            0
        } else {
            width
        }
    }

    /// First client of a display, in list order, that is not minimized.
    pub fn first_visible(&self, display: DisplayId) -> Option<ClientId> {
        let display = self.hierarchy.displays.get(display)?;
        display
            .clients
            .iter(&self.hierarchy.clients)
            .find(|id| !self.hierarchy.clients[*id].minimized)
    }

    /// Re-derives the focus pair of the current display, then borders, tiling, stacking and
    /// input focus. Every state change ends here.
    pub fn update_current(&mut self, target: Option<ClientId>) {
        if let Some(target) = target {
            if !self.in_current_display(target) && !self.is_visible_scratchpad(target) {
                tracing::trace!("Ignoring focus request for a client outside the current display");
                return;
            }
        }

        let display_id = self.focus.display;
        if self.display().clients.is_empty() && !self.scratchpad_visible {
            let display = self.display_mut();
            display.current = None;
            display.previous = None;
            self.actions.push_back(DisplayAction::ClearFocus);
            return;
        }

        let display = self.display();
        let (current, previous) = (display.current, display.previous);
        let (current, previous) = match target {
            None => {
                let next = previous
                    .filter(|id| self.client(*id).is_some_and(|c| !c.minimized))
                    .or_else(|| self.first_visible(display_id));
                (next, next.and_then(|id| self.hierarchy.prev_client(id)))
            }
            Some(target) if Some(target) == previous => {
                (Some(target), self.hierarchy.prev_client(target))
            }
            Some(target) if Some(target) != current => {
                let kept = match current {
                    Some(old) if self.is_scratchpad(old) => previous,
                    old => old,
                };
                (Some(target), kept)
            }
            Some(_) => (current, previous),
        };
        let current = current.or_else(|| self.scratchpad.filter(|_| self.scratchpad_visible));
        let display = self.display_mut();
        display.current = current;
        display.previous = previous.filter(|id| Some(*id) != current);

        self.apply_borders();
        self.tile();
        self.restack();
        self.deliver_focus();
    }

    fn apply_borders(&mut self) {
        let current = self.current();
        for id in self.hierarchy.client_ids(self.focus.display) {
            let Some(client) = self.client(id) else {
                continue;
            };
            if client.fullscreen {
                continue;
            }
            let handle = client.handle;
            let color = if Some(id) == current {
                BorderColor::Focused
            } else {
                BorderColor::Unfocused
            };
            let width = self.border_of(id);
            self.actions
                .push_back(DisplayAction::SetBorderColor(handle, color));
            self.actions
                .push_back(DisplayAction::SetBorderWidth(handle, width));
        }
        if let Some(scratchpad) = self.scratchpad.filter(|_| self.scratchpad_visible) {
            if let Some(client) = self.client(scratchpad) {
                let handle = client.handle;
                let color = if current == Some(scratchpad) {
                    BorderColor::Scratchpad
                } else {
                    BorderColor::Unfocused
                };
                self.actions
                    .push_back(DisplayAction::SetBorderColor(handle, color));
                self.actions.push_back(DisplayAction::SetBorderWidth(
                    handle,
                    self.scratchpad_border_width,
                ));
            }
        }
    }

    /// Raises windows from the lowest layer to the highest.
    fn restack(&mut self) {
        let current = self.current();
        let clients = &self.hierarchy.clients;
        let ids = self.hierarchy.client_ids(self.focus.display);
        let current_fullscreen = current
            .and_then(|id| clients.get(id))
            .is_some_and(|c| c.fullscreen);

        let mut lowered = vec![];
        let mut tiles = vec![];
        let mut above = vec![];
        for id in &ids {
            let client = &clients[*id];
            if Some(*id) == current {
                continue;
            }
            if client.fullscreen {
                lowered.push(client.handle);
            } else if client.stacks_above_tiles() {
                above.push(client.handle);
            } else {
                tiles.push(client.handle);
            }
        }
        let current_client = current.and_then(|id| clients.get(id));
        match current_client {
            Some(client) if self.scratchpad != current && client.stacks_above_tiles() => {
                above.push(client.handle);
            }
            Some(client) if self.scratchpad != current => tiles.push(client.handle),
            _ => {}
        }
        let scratchpad = self
            .scratchpad
            .filter(|_| self.scratchpad_visible)
            .and_then(|id| clients.get(id))
            .map(|client| client.handle);
        let aliens: Vec<_> = self
            .aliens
            .iter()
            .filter(|alien| !current_fullscreen || alien.r#type == WindowType::Notification)
            .map(|alien| alien.handle)
            .collect();

        for handle in lowered {
            self.actions.push_back(DisplayAction::Lower(handle));
        }
        for handle in tiles.into_iter().chain(above).chain(scratchpad).chain(aliens) {
            self.actions.push_back(DisplayAction::Raise(handle));
        }
    }

    fn deliver_focus(&mut self) {
        let Some(id) = self.current() else {
            self.actions.push_back(DisplayAction::ClearFocus);
            return;
        };
        let Some(client) = self.client_mut(id) else {
            return;
        };
        client.urgent = false;
        let action = match client.focus {
            FocusDelivery::Direct => DisplayAction::SetInputFocus(client.handle),
            FocusDelivery::TakeFocus => DisplayAction::TakeFocus(client.handle),
        };
        self.actions.push_back(action);
    }

    /// Focuses the next client that is not minimized, wrapping around.
    pub fn focus_next(&mut self) -> Option<bool> {
        self.focus_cycle(|state, id| state.hierarchy.next_client(id), true)
    }

    /// Focuses the previous client that is not minimized, wrapping around.
    pub fn focus_previous(&mut self) -> Option<bool> {
        self.focus_cycle(|state, id| state.hierarchy.prev_client(id), false)
    }

    fn focus_cycle<F>(&mut self, step: F, forward: bool) -> Option<bool>
    where
        F: Fn(&Self, ClientId) -> Option<ClientId>,
    {
        let current = self.current().filter(|id| self.in_current_display(*id))?;
        let display = self.display();
        if display.clients.len() < 2 {
            return None;
        }
        let wrap = if forward {
            display.clients.head()
        } else {
            display.clients.tail()
        };
        let mut cursor = current;
        loop {
            cursor = step(self, cursor).or(wrap)?;
            if cursor == current {
                tracing::trace!("Every other client is minimized");
                return None;
            }
            if self.client(cursor).is_some_and(|c| !c.minimized) {
                break;
            }
        }
        let display = self.display_mut();
        display.previous = Some(current);
        display.current = Some(cursor);
        self.update_current(Some(cursor));
        Some(true)
    }

    /// Toggles between the head of the list and the previously focused client.
    pub fn focus_master(&mut self) -> Option<bool> {
        let display = self.display();
        let head = display.clients.head()?;
        let current = display.current?;
        let second = self.hierarchy.next_client(head);
        if current == head && second.is_none() {
            return None;
        }
        let previous = display.previous?;
        if self.client(previous).map_or(true, |c| c.minimized) {
            return None;
        }
        if Some(current) == second {
            self.display_mut().previous = Some(current);
        }
        let target = if current == head {
            self.display().previous
        } else {
            Some(head)
        };
        self.update_current(target);
        Some(true)
    }

    /// Makes the current client the master. When it already is, its successor takes over.
    pub fn swap_master(&mut self) -> Option<bool> {
        let display_id = self.focus.display;
        let display = self.display();
        let current = display.current.filter(|id| self.in_current_display(*id))?;
        let head = display.clients.head()?;
        let second = self.hierarchy.next_client(head)?;
        let promoted = if current == head { second } else { current };
        self.hierarchy.unlink(promoted);
        self.hierarchy.attach_front(display_id, promoted);
        let head = self.display().clients.head();
        self.update_current(head);
        Some(true)
    }

    /// Swaps the current client with its successor.
    pub fn move_down(&mut self) -> Option<bool> {
        let current = self.current().filter(|id| self.in_current_display(*id))?;
        let next = self.hierarchy.next_client(current)?;
        let display = self.focus.display;
        self.hierarchy.unlink(current);
        self.hierarchy.attach_after(display, next, current);
        self.tile();
        Some(true)
    }

    /// Swaps the current client with its predecessor.
    pub fn move_up(&mut self) -> Option<bool> {
        let current = self.current().filter(|id| self.in_current_display(*id))?;
        let prev = self.hierarchy.prev_client(current)?;
        let display = self.focus.display;
        self.hierarchy.unlink(current);
        self.hierarchy.attach_before(display, prev, current);
        self.tile();
        Some(true)
    }

    /// Focuses the first urgent client: the current display is searched first, then every
    /// desktop in order.
    pub fn focus_urgent(&mut self) -> Option<bool> {
        let is_urgent = |state: &Self, id: &ClientId| state.client(*id).is_some_and(|c| c.urgent);
        if let Some(id) = self
            .hierarchy
            .client_ids(self.focus.display)
            .into_iter()
            .find(|id| is_urgent(self, id))
        {
            self.update_current(Some(id));
            return Some(true);
        }
        let (number, id) = (0..self.desktop_count()).find_map(|number| {
            let desktop = self.hierarchy.find_desktop(number)?;
            let (_, display) = self.hierarchy.top_display(desktop)?;
            self.hierarchy
                .client_ids(display)
                .into_iter()
                .find(|id| is_urgent(self, id))
                .map(|id| (number, id))
        })?;
        self.change_desktop(number);
        self.update_current(Some(id));
        Some(true)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::display_action::DisplayAction;
    use crate::models::{ClientId, FocusDelivery, MockHandle, WindowHandle, WindowInfo, WindowType};
    use crate::state::State;
    use crate::Manager;

    pub(crate) fn state_with_clients(count: i32) -> (State<MockHandle>, Vec<ClientId>) {
        let mut manager = Manager::new_test(4);
        let state = &mut manager.state;
        state.screen_create_handler(crate::models::Xyhw::new(0, 0, 1280, 800));
        let ids = (1..=count)
            .map(|handle| {
                state.map_request_handler(
                    WindowInfo::new(WindowHandle(handle), None, WindowType::Normal),
                    None,
                );
                state.find_window(&WindowHandle(handle)).unwrap()
            })
            .collect();
        (manager.state, ids)
    }

    #[test]
    fn new_clients_take_focus_and_remember_the_previous_one() {
        let (state, ids) = state_with_clients(2);
        assert_eq!(state.current(), Some(ids[1]));
        assert_eq!(state.display().previous, Some(ids[0]));
    }

    #[test]
    fn focusing_a_client_of_another_desktop_is_ignored() {
        let (mut state, ids) = state_with_clients(2);
        let outsider = ids[0];
        state.hierarchy.detach(outsider);
        let (_, other) = state
            .hierarchy
            .top_display(state.hierarchy.find_desktop(1).unwrap())
            .unwrap();
        state.hierarchy.attach_back(other, outsider);
        state.update_current(Some(outsider));
        assert_eq!(state.current(), Some(ids[1]));
    }

    #[test]
    fn emptying_the_display_clears_focus() {
        let (mut state, ids) = state_with_clients(1);
        state.hierarchy.detach(ids[0]);
        state.actions.clear();
        state.update_current(None);
        assert_eq!(state.current(), None);
        assert_eq!(state.display().previous, None);
        assert_eq!(state.actions.back(), Some(&DisplayAction::ClearFocus));
    }

    #[test]
    fn focus_is_delivered_as_a_message_when_requested() {
        let (mut state, ids) = state_with_clients(2);
        state.client_mut(ids[0]).unwrap().focus = FocusDelivery::TakeFocus;
        state.client_mut(ids[0]).unwrap().urgent = true;
        state.actions.clear();
        state.update_current(Some(ids[0]));
        assert_eq!(
            state.actions.back(),
            Some(&DisplayAction::TakeFocus(WindowHandle(1)))
        );
        assert!(!state.client(ids[0]).unwrap().urgent);
    }

    #[test]
    fn a_lone_client_has_no_border() {
        let (mut state, ids) = state_with_clients(2);
        assert_eq!(state.border_of(ids[0]), 2);
        state.minimize_client(ids[1]);
        assert_eq!(state.border_of(ids[0]), 0);
    }

    #[test]
    fn next_and_previous_skip_minimized_clients() {
        let (mut state, ids) = state_with_clients(4);
        state.update_current(Some(ids[0]));
        state.minimize_client(ids[1]);
        state.minimize_client(ids[2]);
        state.update_current(Some(ids[0]));
        state.focus_next();
        assert_eq!(state.current(), Some(ids[3]));
        assert_eq!(state.display().previous, Some(ids[0]));
        state.focus_previous();
        assert_eq!(state.current(), Some(ids[0]));
        assert_eq!(state.display().previous, Some(ids[3]));
    }

    #[test]
    fn cycling_is_a_noop_when_every_other_client_is_minimized() {
        let (mut state, ids) = state_with_clients(3);
        state.minimize_client(ids[2]);
        state.minimize_client(ids[1]);
        assert_eq!(state.current(), Some(ids[0]));
        assert_eq!(state.focus_next(), None);
        assert_eq!(state.focus_previous(), None);
        assert_eq!(state.current(), Some(ids[0]));
    }

    #[test]
    fn focus_master_toggles_between_head_and_previous() {
        let (mut state, ids) = state_with_clients(3);
        let head = state.display().clients.head().unwrap();
        assert_eq!(head, ids[0]);
        state.update_current(Some(ids[2]));
        state.focus_master();
        assert_eq!(state.current(), Some(head));
        state.focus_master();
        assert_eq!(state.current(), Some(ids[2]));
    }

    #[test]
    fn swap_master_promotes_current_or_the_second_client() {
        let (mut state, ids) = state_with_clients(3);
        state.update_current(Some(ids[2]));
        state.swap_master();
        let order = state.hierarchy.client_ids(state.focus.display);
        assert_eq!(order, vec![ids[2], ids[0], ids[1]]);
        assert_eq!(state.current(), Some(ids[2]));
        state.swap_master();
        let order = state.hierarchy.client_ids(state.focus.display);
        assert_eq!(order, vec![ids[0], ids[2], ids[1]]);
        assert_eq!(state.current(), Some(ids[0]));
    }

    #[test]
    fn move_up_and_down_swap_neighbours() {
        let (mut state, ids) = state_with_clients(3);
        state.update_current(Some(ids[0]));
        state.move_down();
        assert_eq!(
            state.hierarchy.client_ids(state.focus.display),
            vec![ids[1], ids[0], ids[2]]
        );
        state.move_up();
        state.move_up();
        assert_eq!(
            state.hierarchy.client_ids(state.focus.display),
            vec![ids[0], ids[1], ids[2]]
        );
        assert_eq!(state.current(), Some(ids[0]));
    }

    #[test]
    fn focus_urgent_switches_desktop() {
        let (mut state, ids) = state_with_clients(2);
        state.client_to_desktop(2);
        assert_eq!(state.hierarchy.desktop_of(ids[1]), Some(2));
        state.client_mut(ids[1]).unwrap().urgent = true;
        state.focus_urgent();
        assert_eq!(state.focus.number, 2);
        assert_eq!(state.current(), Some(ids[1]));
        assert!(!state.client(ids[1]).unwrap().urgent);
    }

    #[test]
    fn notifications_stay_above_a_fullscreen_client() {
        let (mut state, ids) = state_with_clients(1);
        state.window_mapped_handler(WindowInfo::new(
            WindowHandle(50),
            None,
            WindowType::Notification,
        ));
        state.window_mapped_handler(WindowInfo::new(WindowHandle(51), None, WindowType::Dock));
        state.set_fullscreen(ids[0], true);
        state.actions.clear();
        state.update_current(Some(ids[0]));
        assert!(state
            .actions
            .contains(&DisplayAction::Raise(WindowHandle(50))));
        assert!(!state
            .actions
            .contains(&DisplayAction::Raise(WindowHandle(51))));
    }
}
