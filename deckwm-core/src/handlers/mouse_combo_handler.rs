use crate::display_action::DisplayAction;
use crate::models::{DragAxis, Handle, Mode, WindowHandle};
use crate::state::State;
use crate::utils::modmask_lookup::{self, Button, ModMask};

impl<H: Handle> State<H> {
    /// A button press on a client. Button 1 focuses with click-to-focus; the mouse modifier with
    /// button 1 or 3 starts a drag. The click is replayed to the client afterwards.
    pub fn mouse_combo_handler(
        &mut self,
        modmask: &ModMask,
        button: &Button,
        handle: WindowHandle<H>,
        x: i32,
        y: i32,
    ) -> bool {
        let Some(id) = self
            .find_window(&handle)
            .filter(|id| !self.is_scratchpad(*id) || self.scratchpad_visible)
        else {
            return false;
        };
        if self.click_to_focus && *button == Button::Button1 && self.current() != Some(id) {
            self.update_current(Some(id));
        }

        let is_mouse_key = modmask_lookup::clean(modmask.clone())
            == modmask_lookup::into_modmask(&self.mousekey);
        if is_mouse_key && !self.is_scratchpad(id) {
            let axis = if *button == Button::Button1 {
                Some(DragAxis::Move)
            } else if *button == Button::Button3 {
                Some(DragAxis::Resize)
            } else {
                None
            };
            if let Some(axis) = axis {
                if self.current() != Some(id) {
                    self.update_current(Some(id));
                }
                self.start_drag(axis, Some((x, y)));
            }
        }

        if self.click_to_focus {
            self.actions
                .push_back(DisplayAction::ReplayClick(handle, button.clone()));
        }
        true
    }

    /// With follow-mouse, the client under the pointer takes focus. Ignored while dragging.
    pub fn pointer_enter_handler(&mut self, handle: &WindowHandle<H>) -> bool {
        if !self.follow_mouse || self.mode != Mode::Normal {
            return false;
        }
        let Some(id) = self.find_window(handle) else {
            return false;
        };
        if self.current() == Some(id)
            || (!self.in_current_display(id) && !self.is_visible_scratchpad(id))
        {
            return false;
        }
        self.update_current(Some(id));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::super::focus_handler::tests::state_with_clients;
    use crate::display_action::DisplayAction;
    use crate::models::{DragAxis, Mode, WindowHandle};
    use crate::utils::modmask_lookup::{Button, ModMask};

    #[test]
    fn clicking_focuses_and_replays() {
        let (mut state, ids) = state_with_clients(2);
        state.mouse_combo_handler(&ModMask::Zero, &Button::Button1, WindowHandle(1), 5, 5);
        assert_eq!(state.current(), Some(ids[0]));
        assert_eq!(
            state.actions.back(),
            Some(&DisplayAction::ReplayClick(WindowHandle(1), Button::Button1))
        );
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn the_mouse_modifier_starts_a_drag() {
        let (mut state, ids) = state_with_clients(2);
        state.mouse_combo_handler(
            &(ModMask::Super | ModMask::NumLock),
            &Button::Button3,
            WindowHandle(1),
            100,
            200,
        );
        let Mode::Dragging(drag) = state.mode else {
            panic!("expected a drag, got {:?}", state.mode);
        };
        assert_eq!(drag.client, ids[0]);
        assert_eq!(drag.axis, DragAxis::Resize);
        assert_eq!(drag.anchor, Some((100, 200)));
        assert!(state.client(ids[0]).unwrap().floating);
        assert!(state
            .actions
            .contains(&DisplayAction::ReadyToResizeWindow(WindowHandle(1))));
    }

    #[test]
    fn unknown_windows_are_ignored() {
        let (mut state, _) = state_with_clients(1);
        assert!(!state.mouse_combo_handler(
            &ModMask::Super,
            &Button::Button1,
            WindowHandle(42),
            0,
            0
        ));
    }

    #[test]
    fn pointer_enter_focuses_only_with_follow_mouse() {
        let (mut state, ids) = state_with_clients(2);
        assert!(!state.pointer_enter_handler(&WindowHandle(1)));
        assert_eq!(state.current(), Some(ids[1]));
        state.follow_mouse = true;
        assert!(state.pointer_enter_handler(&WindowHandle(1)));
        assert_eq!(state.current(), Some(ids[0]));
        assert!(!state.pointer_enter_handler(&WindowHandle(1)));
    }
}
