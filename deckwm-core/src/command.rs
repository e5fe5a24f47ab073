use crate::layouts::Layout;
use serde::{Deserialize, Serialize};

/// Everything a key binding or a client message can ask the window manager to do.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub enum Command {
    /// Run a shell command detached from the window manager.
    Spawn(String),
    Quit,
    KillClient,
    FocusNext,
    FocusPrevious,
    FocusMaster,
    FocusUrgent,
    SwapMaster,
    MoveUp,
    MoveDown,
    ChangeDesktop(usize),
    LastDesktop,
    RotateDesktop(i32),
    /// Like `RotateDesktop` but skips desktops without clients.
    RotateFilled(i32),
    ClientToDesktop(usize),
    /// Send the current client `n` desktops away and follow it.
    RotateClient(i32),
    SwitchMode(Layout),
    RotateMode(i32),
    ResizeMaster(i32),
    ResizeStack(i32),
    AdjustGaps(i32),
    AdjustBorders(i32),
    InvertStack,
    TogglePanel,
    ShowHide,
    Maximize,
    Minimize,
    Restore,
    ToggleFullscreen,
    FloatX(i32),
    FloatY(i32),
    ResizeX(i32),
    ResizeY(i32),
    CenterWindow,
    Tilemize,
    ToggleScratchpad,
    MoveWindow,
    ResizeWindow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_read_from_their_serialized_form() {
        let command: Command = serde_json::from_str(r#"{"SwitchMode":"Grid"}"#).unwrap();
        assert_eq!(command, Command::SwitchMode(Layout::Grid));
        let command: Command = serde_json::from_str(r#""ToggleScratchpad""#).unwrap();
        assert_eq!(command, Command::ToggleScratchpad);
        assert!(serde_json::from_str::<Command>(r#"{"ChangeDesktop":-1}"#).is_err());
    }
}
