use crate::display_action::DisplayAction;
use crate::models::{ClientId, Handle};
use crate::state::State;

impl<H: Handle> State<H> {
    /// Makes desktop `number` the active one, hiding the clients of the desktop left behind.
    pub fn change_desktop(&mut self, number: usize) -> Option<bool> {
        if number == self.focus.number || number >= self.desktop_count() {
            return None;
        }
        let old = self.focus.display;
        self.previous_desktop = self.focus.number;
        self.select(number);
        if self.show {
            self.show_display(self.focus.display);
        }
        self.hide_display(old);
        // Aliens stay hidden behind a fullscreen display.
        if self.hierarchy.display_below(self.focus.display).is_some() {
            self.hide_aliens();
        } else {
            self.show_aliens();
        }
        tracing::debug!("Switched to desktop {number}");
        self.update_current(self.current());
        self.actions
            .push_back(DisplayAction::SetCurrentDesktop(number));
        Some(true)
    }

    pub fn last_desktop(&mut self) -> Option<bool> {
        self.change_desktop(self.previous_desktop)
    }

    pub fn rotate_desktop(&mut self, delta: i32) -> Option<bool> {
        let target = self.rotated(delta);
        self.change_desktop(target)
    }

    /// Like [`State::rotate_desktop`] but skips desktops without clients.
    pub fn rotate_filled(&mut self, delta: i32) -> Option<bool> {
        let count = self.desktop_count();
        let step = if delta > 0 { 1 } else { count - 1 };
        let mut number = self.focus.number;
        loop {
            number = (number + step) % count;
            if number == self.focus.number {
                return None;
            }
            let populated = self
                .hierarchy
                .find_desktop(number)
                .is_some_and(|desktop| !self.hierarchy.desktop_clients(desktop).is_empty());
            if populated {
                break;
            }
        }
        self.change_desktop(number)
    }

    /// Sends the current client to the top display of desktop `number`.
    pub fn client_to_desktop(&mut self, number: usize) -> Option<bool> {
        let current = self.current().filter(|id| self.in_current_display(*id))?;
        if number == self.focus.number || number >= self.desktop_count() {
            return None;
        }
        if self.client(current)?.fullscreen {
            self.destroy_display(current);
        }
        let (_, target) = self
            .hierarchy
            .top_display(self.hierarchy.find_desktop(number)?)?;
        self.hierarchy.detach(current);
        self.hierarchy.attach_back(target, current);
        self.hide_client(current);
        let handle = self.client(current)?.handle;
        self.actions
            .push_back(DisplayAction::SetWindowDesktop(handle, number));

        if self.follow_window {
            self.change_desktop(number);
            self.update_current(Some(current));
        } else {
            self.update_current(self.display().previous);
        }
        Some(true)
    }

    /// Sends the current client `delta` desktops away and follows it.
    pub fn rotate_client(&mut self, delta: i32) -> Option<bool> {
        let current: ClientId = self.current().filter(|id| self.in_current_display(*id))?;
        let target = self.rotated(delta);
        self.client_to_desktop(target)?;
        self.change_desktop(target);
        self.update_current(Some(current));
        Some(true)
    }

    fn rotated(&self, delta: i32) -> usize {
        let count = self.desktop_count() as i64;
        (self.focus.number as i64 + i64::from(delta)).rem_euclid(count) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::super::focus_handler::tests::state_with_clients;
    use crate::display_action::DisplayAction;

    #[test]
    fn desktop_round_trip_keeps_the_focus_pair() {
        let (mut state, ids) = state_with_clients(3);
        state.update_current(Some(ids[1]));
        let before = (state.current(), state.display().previous);
        state.change_desktop(1);
        assert_eq!(state.focus.number, 1);
        assert!(ids.iter().all(|id| state.client(*id).unwrap().hidden));
        state.change_desktop(0);
        assert_eq!((state.current(), state.display().previous), before);
        assert_eq!(state.display().clients.head(), Some(ids[0]));
        assert!(ids.iter().all(|id| !state.client(*id).unwrap().hidden));
    }

    #[test]
    fn out_of_range_and_current_desktops_are_ignored() {
        let (mut state, _) = state_with_clients(1);
        assert_eq!(state.change_desktop(0), None);
        assert_eq!(state.change_desktop(4), None);
        state.change_desktop(3);
        assert_eq!(
            state.actions.back(),
            Some(&DisplayAction::SetCurrentDesktop(3))
        );
        state.last_desktop();
        assert_eq!(state.focus.number, 0);
    }

    #[test]
    fn rotating_wraps_around() {
        let (mut state, _) = state_with_clients(0);
        state.rotate_desktop(-1);
        assert_eq!(state.focus.number, 3);
        state.rotate_desktop(2);
        assert_eq!(state.focus.number, 1);
    }

    #[test]
    fn rotate_filled_skips_empty_desktops() {
        let (mut state, ids) = state_with_clients(2);
        state.client_to_desktop(2);
        assert_eq!(state.current(), Some(ids[0]));
        state.rotate_filled(1);
        assert_eq!(state.focus.number, 2);
        state.rotate_filled(1);
        assert_eq!(state.focus.number, 0);
        state.rotate_filled(-1);
        assert_eq!(state.focus.number, 2);
    }

    #[test]
    fn rotating_a_client_follows_it() {
        let (mut state, ids) = state_with_clients(2);
        state.rotate_client(1);
        assert_eq!(state.focus.number, 1);
        assert_eq!(state.current(), Some(ids[1]));
        assert_eq!(state.hierarchy.desktop_of(ids[1]), Some(1));
    }
}
