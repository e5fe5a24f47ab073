use crate::config::Config;
use crate::display_action::DisplayAction;
use crate::models::Handle;
use crate::utils::status_line::StatusLine;
use crate::{DisplayServer, Manager};
use std::sync::atomic::Ordering;
use tokio::io::AsyncWrite;

const REAP_INTERVAL_MS: u64 = 500;

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// Runs until a `Quit` command, writing the status line to stdout after every change.
    pub async fn event_loop(self) {
        self.event_loop_with(tokio::io::stdout()).await;
    }

    pub async fn event_loop_with<W: AsyncWrite + Unpin>(mut self, out: W) {
        let mut status_line = StatusLine::new(out);
        let mut event_buffer = vec![];
        let mut needs_update = true;
        loop {
            if needs_update {
                if let Err(err) = status_line.write_state(&self.state).await {
                    tracing::warn!("Cannot write the status line: {err}");
                }
                needs_update = false;
            }
            self.display_server.flush();

            tokio::select! {
                () = self.display_server.wait_readable(), if event_buffer.is_empty() => {
                    event_buffer.append(&mut self.display_server.get_next_events());
                    continue;
                }
                // Wake up now and then so exited children are reaped without X traffic.
                () = timeout(REAP_INTERVAL_MS), if event_buffer.is_empty() && self.waits_for_children() => {}
                else => {
                    for event in event_buffer.drain(..) {
                        needs_update = self.display_event_handler(event) || needs_update;
                    }
                }
            }

            // Actions may answer with events of their own, handled on the next pass.
            self.execute_actions(&mut event_buffer);

            if self.reap_requested.swap(false, Ordering::SeqCst) {
                self.children.remove_finished_children();
            }

            if self.quit_requested {
                break;
            }
        }
        self.release();
        tracing::info!("Leaving the event loop");
    }

    fn waits_for_children(&self) -> bool {
        !self.children.is_empty()
    }

    fn execute_actions(&mut self, event_buffer: &mut Vec<crate::DisplayEvent<H>>) {
        while let Some(act) = self.state.actions.pop_front() {
            if let Some(event) = self.display_server.execute_action(act) {
                event_buffer.push(event);
            }
        }
    }

    /// Lets go of every window on exit. The scratchpad is closed, or left centred on screen
    /// when it should survive the window manager.
    fn release(&mut self) {
        let close_scratchpad = self.config.close_scratchpad();
        let scratchpad = self
            .state
            .scratchpad
            .and_then(|id| self.state.client(id))
            .map(|client| (client.handle, client.geometry));
        if let Some((handle, geometry)) = scratchpad {
            if close_scratchpad {
                self.state.actions.push_back(DisplayAction::KillWindow(handle));
            } else {
                let centered = geometry.centered_in(self.state.ww(), self.state.wh(), 0);
                self.state
                    .actions
                    .push_back(DisplayAction::SetBorderWidth(handle, 0));
                self.state
                    .actions
                    .push_back(DisplayAction::MoveWindow(handle, centered.x, centered.y));
            }
        }
        let released = self.state.drop_hierarchy();
        tracing::debug!("Released {} windows", released.len());
        let mut ignored = vec![];
        self.execute_actions(&mut ignored);
        self.display_server.flush();
    }
}

async fn timeout(mills: u64) {
    use tokio::time::{sleep, Duration};
    sleep(Duration::from_millis(mills)).await;
}

#[cfg(test)]
mod tests {
    use crate::display_action::DisplayAction;
    use crate::models::{WindowHandle, WindowInfo, WindowType, Xyhw};
    use crate::utils::child_process::exec_shell;
    use crate::{Command, DisplayEvent, Manager};

    #[test]
    fn release_closes_the_scratchpad() {
        let mut manager = Manager::new_test(2);
        manager.display_event_handler(DisplayEvent::ScreenCreate(Xyhw::new(0, 0, 1280, 800)));
        manager.display_event_handler(DisplayEvent::MapRequest(WindowInfo::new(
            WindowHandle(7),
            Some("scratchpad".to_owned()),
            WindowType::Normal,
        )));
        manager.display_event_handler(DisplayEvent::SendCommand(Command::Quit));
        manager.release();
        assert!(manager
            .display_server
            .executed
            .contains(&DisplayAction::KillWindow(WindowHandle(7))));
        assert!(manager.state.scratchpad.is_none());
        assert!(manager.state.actions.is_empty());
    }

    #[test]
    fn actions_reach_the_display_server_in_order() {
        let mut manager = Manager::new_test(2);
        manager.display_event_handler(DisplayEvent::ScreenCreate(Xyhw::new(0, 0, 1280, 800)));
        manager.display_event_handler(DisplayEvent::SendCommand(Command::ChangeDesktop(1)));
        let mut events = vec![];
        manager.execute_actions(&mut events);
        assert!(events.is_empty());
        assert_eq!(
            manager.display_server.executed.last(),
            Some(&DisplayAction::SetCurrentDesktop(1))
        );
    }

    #[test]
    fn spawned_children_keep_the_loop_waking_up() {
        let mut manager = Manager::new_test(2);
        assert!(!manager.waits_for_children());
        exec_shell("exit 0", &mut manager.children).unwrap();
        assert!(manager.waits_for_children());
    }
}
