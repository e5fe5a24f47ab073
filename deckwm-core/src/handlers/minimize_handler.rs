use crate::display_action::DisplayAction;
use crate::models::{ClientId, Handle, WindowState};
use crate::state::State;

impl<H: Handle> State<H> {
    /// Hides a client on its display's minimize stack. Fullscreen and already minimized clients
    /// are refused.
    pub fn minimize_client(&mut self, id: ClientId) -> Option<bool> {
        let client = self.client(id)?;
        if client.fullscreen || client.minimized {
            tracing::trace!("Refusing to minimize {:?}", client.handle);
            return None;
        }
        let handle = client.handle;
        let display_id = client.display()?;

        self.hierarchy.displays[display_id].minimized.push_front(id);
        self.client_mut(id)?.minimized = true;
        self.actions
            .push_back(DisplayAction::SetState(handle, true, WindowState::Hidden));
        self.hide_client(id);

        let first = self.first_visible(display_id);
        if display_id == self.focus.display {
            self.update_current(first);
        } else {
            let display = &mut self.hierarchy.displays[display_id];
            if display.current == Some(id) {
                display.current = first;
            }
        }
        let display = &mut self.hierarchy.displays[display_id];
        if display.previous == Some(id) {
            display.previous = None;
        }
        self.tile();
        Some(true)
    }

    /// Brings back the most recently minimized client of the current display, or `target` when
    /// given. A target that is not minimized there is ignored.
    pub fn restore_client(&mut self, target: Option<ClientId>) -> Option<bool> {
        let display = self.display_mut();
        let id = match target {
            None => display.minimized.pop_front()?,
            Some(id) if display.forget_minimized(id) => id,
            Some(_) => return None,
        };
        let client = self.client_mut(id)?;
        client.minimized = false;
        let (handle, floating) = (client.handle, client.floating);
        self.actions
            .push_back(DisplayAction::SetState(handle, false, WindowState::Hidden));
        self.show_client(id);
        if floating {
            self.center_floating(id);
        }
        self.tile();
        self.update_current(Some(id));
        Some(true)
    }
}
