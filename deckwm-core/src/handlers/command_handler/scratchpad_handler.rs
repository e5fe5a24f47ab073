use crate::child_process::exec_shell;
use crate::config::Config;
use crate::display_action::DisplayAction;
use crate::display_servers::DisplayServer;
use crate::models::{Handle, Manager};
use crate::state::State;

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// Shows or hides the scratchpad. Without one, the scratchpad command is started; the window
    /// it opens is recognised by its title when it maps.
    pub(crate) fn toggle_scratchpad(&mut self) -> Option<bool> {
        let Some(id) = self.state.scratchpad else {
            let command = self.config.scratchpad_command();
            if command.is_empty() {
                return None;
            }
            if let Err(err) = exec_shell(&command, &mut self.children) {
                tracing::warn!("Cannot start the scratchpad: {err}");
            }
            self.state.scratchpad_visible = false;
            return None;
        };
        if let Some(client) = self.state.client_mut(id) {
            if let Some(geometry) = self.display_server.query_geometry(&client.handle) {
                client.geometry.w = geometry.w;
                client.geometry.h = geometry.h;
            }
        }
        self.state.toggle_scratchpad()
    }
}

impl<H: Handle> State<H> {
    pub fn toggle_scratchpad(&mut self) -> Option<bool> {
        let id = self.scratchpad?;
        self.scratchpad_visible = !self.scratchpad_visible;
        let handle = self.client(id)?.handle;
        if self.scratchpad_visible {
            let geometry = self.client(id)?.geometry;
            let x = (self.ww() - geometry.w) / 2;
            let y = (self.wh() - geometry.h) / 2;
            self.move_client(id, x, y);
            self.update_current(Some(id));
            self.actions.push_back(DisplayAction::Raise(handle));
            return Some(true);
        }

        self.hide_client(id);
        if self.current() == Some(id) {
            let display = self.display();
            let head = display.clients.head();
            let target = match display.previous {
                Some(previous) if self.client(previous).is_some_and(|c| !c.minimized) => {
                    Some(previous)
                }
                _ => head,
            };
            self.update_current(target);
        }
        Some(true)
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::focus_handler::tests::state_with_clients;
    use crate::display_action::BorderColor;
    use crate::display_action::DisplayAction;
    use crate::models::{WindowHandle, WindowInfo, WindowType, Xyhw};

    fn with_scratchpad(
        count: i32,
    ) -> (crate::state::State<i32>, Vec<crate::models::ClientId>, crate::models::ClientId) {
        let (mut state, ids) = state_with_clients(count);
        let mut info = WindowInfo::new(
            WindowHandle(100),
            Some("scratchpad".to_string()),
            WindowType::Normal,
        );
        info.geometry = Xyhw::new(0, 0, 400, 300);
        state.map_request_handler(info, None);
        let scratchpad = state.scratchpad.unwrap();
        (state, ids, scratchpad)
    }

    #[test]
    fn showing_the_scratchpad_centres_and_focuses_it() {
        let (mut state, ids, scratchpad) = with_scratchpad(2);
        state.toggle_scratchpad();
        assert_eq!(state.current(), Some(scratchpad));
        assert_eq!(state.display().previous, Some(ids[1]));
        assert_eq!(
            state.client(scratchpad).unwrap().geometry,
            Xyhw::new((1280 - 400) / 2, (782 - 300) / 2, 400, 300)
        );
        assert!(state.actions.contains(&DisplayAction::SetBorderColor(
            WindowHandle(100),
            BorderColor::Scratchpad
        )));
    }

    #[test]
    fn hiding_the_scratchpad_returns_focus() {
        let (mut state, ids, scratchpad) = with_scratchpad(2);
        state.toggle_scratchpad();
        state.toggle_scratchpad();
        assert!(state.client(scratchpad).unwrap().hidden);
        assert_eq!(state.current(), Some(ids[1]));
    }

    #[test]
    fn the_scratchpad_survives_desktop_switches() {
        let (mut state, _, scratchpad) = with_scratchpad(1);
        state.toggle_scratchpad();
        state.change_desktop(1);
        assert_eq!(state.current(), Some(scratchpad));
        assert!(!state.client(scratchpad).unwrap().hidden);
    }
}
