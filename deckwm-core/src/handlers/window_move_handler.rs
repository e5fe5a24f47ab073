use crate::display_action::DisplayAction;
use crate::models::{ClientId, DragAxis, DraggingState, Handle, Mode};
use crate::state::State;

impl<H: Handle> State<H> {
    /// Floats the current client and grabs the pointer for moving or resizing it.
    pub fn start_drag(&mut self, axis: DragAxis, anchor: Option<(i32, i32)>) -> Option<bool> {
        let current = self.current()?;
        let client = self.client(current)?;
        if client.fullscreen {
            return None;
        }
        if client.maximized {
            self.set_maximize(current, false);
        }
        if !self.client(current)?.floating {
            self.float_client(current);
        }
        self.update_current(Some(current));

        let client = self.client(current)?;
        let handle = client.handle;
        self.mode = Mode::Dragging(DraggingState {
            client: current,
            axis,
            anchor,
            origin: client.geometry,
        });
        self.actions.push_back(match axis {
            DragAxis::Move => DisplayAction::ReadyToMoveWindow(handle),
            DragAxis::Resize => DisplayAction::ReadyToResizeWindow(handle),
        });
        Some(true)
    }

    /// Pointer motion while dragging.
    pub fn motion_handler(&mut self, x: i32, y: i32) -> bool {
        let Mode::Dragging(mut drag) = self.mode else {
            return false;
        };
        if self.client(drag.client).is_none() {
            return self.normal_mode_handler();
        }
        let Some((ax, ay)) = drag.anchor else {
            drag.anchor = Some((x, y));
            self.mode = Mode::Dragging(drag);
            return false;
        };
        let (dx, dy) = (x - ax, y - ay);
        let origin = drag.origin;
        match drag.axis {
            DragAxis::Move => self.move_client(drag.client, origin.x + dx, origin.y + dy),
            DragAxis::Resize => {
                let w = origin.w + dx;
                let h = origin.h + dy;
                let w = if w > self.min_window_size { w } else { origin.w };
                let h = if h > self.min_window_size { h } else { origin.h };
                self.resize_client(drag.client, w, h);
            }
        }
        true
    }

    fn resize_client(&mut self, id: ClientId, w: i32, h: i32) {
        if let Some(client) = self.client_mut(id) {
            client.geometry.w = w;
            client.geometry.h = h;
            let handle = client.handle;
            self.actions
                .push_back(DisplayAction::ResizeWindow(handle, w, h));
        }
    }

    /// Ends a drag and releases the pointer.
    pub fn normal_mode_handler(&mut self) -> bool {
        if self.mode == Mode::Normal {
            return false;
        }
        self.mode = Mode::Normal;
        self.actions.push_back(DisplayAction::NormalMode);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::super::focus_handler::tests::state_with_clients;
    use crate::display_action::DisplayAction;
    use crate::models::{DragAxis, Mode, WindowHandle, Xyhw};

    #[test]
    fn dragging_moves_relative_to_the_anchor() {
        let (mut state, ids) = state_with_clients(2);
        state.start_drag(DragAxis::Move, Some((100, 100)));
        let origin = state.client(ids[1]).unwrap().geometry;
        state.motion_handler(130, 90);
        assert_eq!(
            state.client(ids[1]).unwrap().geometry,
            Xyhw::new(origin.x + 30, origin.y - 10, origin.w, origin.h)
        );
        assert!(state.normal_mode_handler());
        assert_eq!(state.actions.back(), Some(&DisplayAction::NormalMode));
        assert!(!state.motion_handler(0, 0));
    }

    #[test]
    fn a_keyboard_drag_anchors_on_the_first_motion() {
        let (mut state, ids) = state_with_clients(1);
        state.start_drag(DragAxis::Resize, None);
        let origin = state.client(ids[0]).unwrap().geometry;
        assert!(!state.motion_handler(500, 500));
        state.motion_handler(520, 480);
        assert_eq!(
            state.actions.back(),
            Some(&DisplayAction::ResizeWindow(
                WindowHandle(1),
                origin.w + 20,
                origin.h - 20
            ))
        );
    }

    #[test]
    fn resizing_never_goes_below_the_minimum() {
        let (mut state, ids) = state_with_clients(1);
        state.start_drag(DragAxis::Resize, Some((0, 0)));
        let origin = state.client(ids[0]).unwrap().geometry;
        state.motion_handler(-5000, 10);
        let geometry = state.client(ids[0]).unwrap().geometry;
        assert_eq!((geometry.w, geometry.h), (origin.w, origin.h + 10));
    }

    #[test]
    fn fullscreen_clients_cannot_be_dragged() {
        let (mut state, ids) = state_with_clients(1);
        state.set_fullscreen(ids[0], true);
        assert_eq!(state.start_drag(DragAxis::Move, None), None);
        assert_eq!(state.mode, Mode::Normal);
    }
}
