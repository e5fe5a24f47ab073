mod scratchpad_handler;

use super::{Command, Config, Manager};
use crate::child_process::exec_shell;
use crate::display_servers::DisplayServer;
use crate::models::{DragAxis, Handle};
use crate::state::State;

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// Processes a command and invokes the associated function.
    ///
    /// Returns `true` if the status line needs to be written again.
    pub fn command_handler(&mut self, command: &Command) -> bool {
        tracing::trace!("Command: {:?}", command);
        process_internal(self, command).unwrap_or(false)
    }

    /// Reads the geometry of the current client back from the display server. The cached value
    /// is kept when the server cannot answer.
    fn refresh_current_geometry(&mut self) {
        let Some(id) = self.state.current() else {
            return;
        };
        let Some(client) = self.state.client_mut(id) else {
            return;
        };
        if let Some(geometry) = self.display_server.query_geometry(&client.handle) {
            client.geometry = geometry;
        }
    }
}

fn process_internal<H: Handle, C: Config, SERVER: DisplayServer<H>>(
    manager: &mut Manager<H, C, SERVER>,
    command: &Command,
) -> Option<bool> {
    let state = &mut manager.state;
    match command {
        Command::Spawn(shell_command) => {
            if let Err(err) = exec_shell(shell_command, &mut manager.children) {
                tracing::warn!("{err}");
            }
            None
        }
        Command::Quit => {
            manager.quit();
            None
        }
        Command::KillClient => state.kill_client(),

        Command::FocusNext => state.focus_next(),
        Command::FocusPrevious => state.focus_previous(),
        Command::FocusMaster => state.focus_master(),
        Command::FocusUrgent => state.focus_urgent(),
        Command::SwapMaster => state.swap_master(),
        Command::MoveUp => state.move_up(),
        Command::MoveDown => state.move_down(),

        Command::ChangeDesktop(number) => state.change_desktop(*number),
        Command::LastDesktop => state.last_desktop(),
        Command::RotateDesktop(delta) => state.rotate_desktop(*delta),
        Command::RotateFilled(delta) => state.rotate_filled(*delta),
        Command::ClientToDesktop(number) => state.client_to_desktop(*number),
        Command::RotateClient(delta) => state.rotate_client(*delta),

        Command::SwitchMode(layout) => state.switch_mode(*layout),
        Command::RotateMode(delta) => state.rotate_mode(*delta),
        Command::ResizeMaster(delta) => state.resize_master(*delta),
        Command::ResizeStack(delta) => state.resize_stack(*delta),
        Command::AdjustGaps(delta) => state.adjust_gaps(*delta),
        Command::AdjustBorders(delta) => state.adjust_borders(*delta),
        Command::InvertStack => state.invert_stack(),
        Command::TogglePanel => state.toggle_panel(),
        Command::ShowHide => state.show_hide(),

        Command::Maximize => state.toggle_maximize(),
        Command::Minimize => minimize_current(state),
        Command::Restore => state.restore_client(None),
        Command::ToggleFullscreen => state.toggle_fullscreen(),

        Command::FloatX(delta) => state.float_x(*delta),
        Command::FloatY(delta) => state.float_y(*delta),
        Command::ResizeX(delta) => state.resize_x(*delta),
        Command::ResizeY(delta) => state.resize_y(*delta),
        Command::CenterWindow => state.center_window(),
        Command::Tilemize => state.tilemize(),

        Command::ToggleScratchpad => manager.toggle_scratchpad(),

        Command::MoveWindow => {
            manager.refresh_current_geometry();
            manager.state.start_drag(DragAxis::Move, None)
        }
        Command::ResizeWindow => {
            manager.refresh_current_geometry();
            manager.state.start_drag(DragAxis::Resize, None)
        }
    }
}

fn minimize_current<H: Handle>(state: &mut State<H>) -> Option<bool> {
    let current = state.current().filter(|id| !state.is_scratchpad(*id))?;
    state.minimize_client(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TestConfig;
    use crate::display_action::DisplayAction;
    use crate::display_servers::MockDisplayServer;
    use crate::layouts::Layout;
    use crate::models::{Mode, MockHandle, WindowHandle, WindowInfo, WindowType, Xyhw};
    use crate::DisplayEvent;

    fn manager_with_clients(
        count: i32,
    ) -> Manager<MockHandle, TestConfig, MockDisplayServer<MockHandle>> {
        let mut manager = Manager::new_test(4);
        manager.display_event_handler(DisplayEvent::ScreenCreate(Xyhw::new(0, 0, 1280, 800)));
        for handle in 1..=count {
            manager.display_event_handler(DisplayEvent::MapRequest(WindowInfo::new(
                WindowHandle(handle),
                None,
                WindowType::Normal,
            )));
        }
        manager
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut manager = Manager::new_test(1);
        assert!(!manager.command_handler(&Command::Quit));
        assert!(manager.quit_requested);
    }

    #[test]
    fn desktop_commands_report_changes() {
        let mut manager = manager_with_clients(2);
        assert!(manager.command_handler(&Command::ChangeDesktop(2)));
        assert_eq!(manager.state.focus.number, 2);
        assert!(!manager.command_handler(&Command::ChangeDesktop(2)));
        assert!(manager.command_handler(&Command::LastDesktop));
        assert_eq!(manager.state.focus.number, 0);
    }

    #[test]
    fn switching_mode_applies_to_the_current_display() {
        let mut manager = manager_with_clients(3);
        manager.command_handler(&Command::SwitchMode(Layout::Grid));
        assert_eq!(manager.state.display().settings.layout, Layout::Grid);
        manager.command_handler(&Command::RotateMode(-1));
        assert_eq!(manager.state.display().settings.layout, Layout::BottomStack);
    }

    #[test]
    fn minimize_and_restore_through_commands() {
        let mut manager = manager_with_clients(2);
        let current = manager.state.current().unwrap();
        manager.command_handler(&Command::Minimize);
        assert!(manager.state.client(current).unwrap().minimized);
        manager.command_handler(&Command::Restore);
        assert_eq!(manager.state.current(), Some(current));
    }

    #[test]
    fn keyboard_drag_uses_the_server_geometry() {
        let mut manager = manager_with_clients(1);
        manager
            .display_server
            .set_geometry(WindowHandle(1), Xyhw::new(40, 50, 300, 200));
        manager.command_handler(&Command::MoveWindow);
        let Mode::Dragging(drag) = manager.state.mode else {
            panic!("no drag in progress");
        };
        assert_eq!(drag.origin, Xyhw::new(40, 50, 300, 200));
        assert_eq!(drag.anchor, None);
        assert_eq!(
            manager.state.actions.back(),
            Some(&DisplayAction::ReadyToMoveWindow(WindowHandle(1)))
        );
    }
}
