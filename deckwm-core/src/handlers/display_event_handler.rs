use super::{Config, DisplayEvent, Manager};
use crate::display_event::ClientMessage;
use crate::display_servers::DisplayServer;
use crate::models::{Handle, WindowHandle};
use crate::state::State;

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// Process a collection of events, and apply them changes to a manager.
    /// Returns true if changes need to be rendered.
    pub fn display_event_handler(&mut self, event: DisplayEvent<H>) -> bool {
        match event {
            DisplayEvent::ScreenCreate(screen) => self.state.screen_create_handler(screen),
            DisplayEvent::MapRequest(info) => {
                let rule = info
                    .name
                    .as_deref()
                    .and_then(|title| self.config.app_rule(title));
                self.state.map_request_handler(info, rule)
            }
            DisplayEvent::WindowMapped(info) => self.state.window_mapped_handler(info),
            DisplayEvent::Adopt(info, adopt) => self.state.adopt_handler(info, adopt),
            DisplayEvent::WindowDestroy(handle) => self.state.window_destroyed_handler(&handle),
            DisplayEvent::WindowUnmap(handle) => self.state.window_unmapped_handler(&handle),
            DisplayEvent::ConfigureRequest {
                handle,
                geometry,
                border_width,
            } => self
                .state
                .configure_request_handler(&handle, geometry, border_width),
            DisplayEvent::UrgencyChange(handle, urgent) => {
                self.state.urgency_change_handler(&handle, urgent)
            }
            DisplayEvent::TitleChange(handle, name) => {
                self.state.title_change_handler(&handle, name)
            }
            DisplayEvent::PointerEnter(handle) => self.state.pointer_enter_handler(&handle),
            DisplayEvent::MouseCombo(modmask, button, handle, x, y) => self
                .state
                .mouse_combo_handler(&modmask, &button, handle, x, y),
            DisplayEvent::Motion(x, y) => self.state.motion_handler(x, y),
            DisplayEvent::ChangeToNormalMode => self.state.normal_mode_handler(),
            DisplayEvent::ClientMessage(handle, message) => {
                self.state.client_message_handler(&handle, message)
            }
            DisplayEvent::SendCommand(command) => self.command_handler(&command),
        }
    }
}

impl<H: Handle> State<H> {
    /// Answers the EWMH requests other clients send on behalf of a window.
    pub fn client_message_handler(
        &mut self,
        handle: &WindowHandle<H>,
        message: ClientMessage,
    ) -> bool {
        tracing::trace!("Client message {:?} for {:?}", message, handle);
        if let ClientMessage::CurrentDesktop(number) = message {
            return self.change_desktop(number).unwrap_or(false);
        }
        let Some(id) = self.find_window(handle) else {
            return false;
        };
        let result = match message {
            ClientMessage::Fullscreen(action) => {
                let fullscreen = self.client(id).is_some_and(|c| c.fullscreen);
                self.set_fullscreen(id, action.apply(fullscreen))
            }
            ClientMessage::Hidden(action) => {
                let minimized = self.client(id).is_some_and(|c| c.minimized);
                match (minimized, action.apply(minimized)) {
                    (false, true) if !self.is_scratchpad(id) => self.minimize_client(id),
                    (true, false) => self.restore_client(Some(id)),
                    _ => None,
                }
            }
            ClientMessage::Close => self.close_client(id),
            ClientMessage::ActiveWindow => {
                if !self.in_current_display(id) && !self.is_visible_scratchpad(id) {
                    tracing::trace!("Ignoring activation of {:?} outside the current display", handle);
                    return false;
                }
                self.update_current(Some(id));
                Some(true)
            }
            ClientMessage::WindowDesktop(number) => {
                if self.current() != Some(id) {
                    self.update_current(Some(id));
                }
                if self.current() == Some(id) {
                    self.client_to_desktop(number)
                } else {
                    None
                }
            }
            ClientMessage::CurrentDesktop(_) => None,
        };
        result.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppRule, TestConfig};
    use crate::display_action::DisplayAction;
    use crate::display_event::StateAction;
    use crate::display_servers::MockDisplayServer;
    use crate::models::{MockHandle, WindowInfo, WindowType, Xyhw};

    type TestManager = Manager<MockHandle, TestConfig, MockDisplayServer<MockHandle>>;

    fn map(manager: &mut TestManager, handle: i32, name: Option<&str>) {
        manager.display_event_handler(DisplayEvent::MapRequest(WindowInfo::new(
            WindowHandle(handle),
            name.map(str::to_owned),
            WindowType::Normal,
        )));
    }

    #[test]
    fn map_requests_apply_the_matching_rule() {
        let mut manager = Manager::new_test_with(TestConfig {
            rules: vec![(
                "mail".to_owned(),
                AppRule {
                    desktop: Some(2),
                    follow: true,
                    ..AppRule::default()
                },
            )],
            ..TestConfig::default()
        });
        manager.display_event_handler(DisplayEvent::ScreenCreate(Xyhw::new(0, 0, 1280, 800)));
        map(&mut manager, 1, Some("mail"));
        let id = manager.state.find_window(&WindowHandle(1)).unwrap();
        assert_eq!(manager.state.hierarchy.desktop_of(id), Some(2));
        assert_eq!(manager.state.focus.number, 2);
        assert_eq!(manager.state.current(), Some(id));
    }

    #[test]
    fn fullscreen_messages_toggle_isolation() {
        let mut manager = Manager::new_test(2);
        manager.display_event_handler(DisplayEvent::ScreenCreate(Xyhw::new(0, 0, 1280, 800)));
        map(&mut manager, 1, None);
        map(&mut manager, 2, None);
        let id = manager.state.find_window(&WindowHandle(1)).unwrap();
        let message = ClientMessage::Fullscreen(StateAction::Toggle);
        assert!(manager.display_event_handler(DisplayEvent::ClientMessage(
            WindowHandle(1),
            message.clone()
        )));
        assert!(manager.state.client(id).unwrap().fullscreen);
        assert!(!manager.display_event_handler(DisplayEvent::ClientMessage(
            WindowHandle(1),
            ClientMessage::Fullscreen(StateAction::Add)
        )));
        manager.display_event_handler(DisplayEvent::ClientMessage(WindowHandle(1), message));
        assert!(!manager.state.client(id).unwrap().fullscreen);
    }

    #[test]
    fn hidden_messages_minimize_and_restore() {
        let mut manager = Manager::new_test(2);
        manager.display_event_handler(DisplayEvent::ScreenCreate(Xyhw::new(0, 0, 1280, 800)));
        map(&mut manager, 1, None);
        map(&mut manager, 2, None);
        let id = manager.state.find_window(&WindowHandle(1)).unwrap();
        manager.display_event_handler(DisplayEvent::ClientMessage(
            WindowHandle(1),
            ClientMessage::Hidden(StateAction::Add),
        ));
        assert!(manager.state.client(id).unwrap().minimized);
        manager.display_event_handler(DisplayEvent::ClientMessage(
            WindowHandle(1),
            ClientMessage::Hidden(StateAction::Remove),
        ));
        assert!(!manager.state.client(id).unwrap().minimized);
        assert_eq!(manager.state.current(), Some(id));
    }

    #[test]
    fn activation_is_limited_to_the_current_display() {
        let mut manager = Manager::new_test(2);
        manager.display_event_handler(DisplayEvent::ScreenCreate(Xyhw::new(0, 0, 1280, 800)));
        map(&mut manager, 1, None);
        map(&mut manager, 2, None);
        manager.display_event_handler(DisplayEvent::ClientMessage(
            WindowHandle(2),
            ClientMessage::WindowDesktop(1),
        ));
        let moved = manager.state.find_window(&WindowHandle(2)).unwrap();
        assert_eq!(manager.state.hierarchy.desktop_of(moved), Some(1));
        assert!(!manager.display_event_handler(DisplayEvent::ClientMessage(
            WindowHandle(2),
            ClientMessage::ActiveWindow
        )));
        assert!(manager.display_event_handler(DisplayEvent::ClientMessage(
            WindowHandle(2),
            ClientMessage::CurrentDesktop(1)
        )));
        assert!(manager.display_event_handler(DisplayEvent::ClientMessage(
            WindowHandle(1),
            ClientMessage::CurrentDesktop(0)
        )));
        assert!(manager.display_event_handler(DisplayEvent::ClientMessage(
            WindowHandle(1),
            ClientMessage::ActiveWindow
        )));
    }

    #[test]
    fn close_messages_kill_and_forget_the_client() {
        let mut manager = Manager::new_test(1);
        manager.display_event_handler(DisplayEvent::ScreenCreate(Xyhw::new(0, 0, 1280, 800)));
        map(&mut manager, 1, None);
        manager.display_event_handler(DisplayEvent::ClientMessage(
            WindowHandle(1),
            ClientMessage::Close,
        ));
        assert!(manager.state.find_window(&WindowHandle(1)).is_none());
        assert!(manager
            .state
            .actions
            .contains(&DisplayAction::KillWindow(WindowHandle(1))));
    }
}
