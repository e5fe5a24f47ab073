use super::{Config, Keybind, Modifier};
use deckwm_core::layouts::Layout;
use deckwm_core::Command;

const DESKTOPS: usize = 4;

impl Default for Config {
    fn default() -> Self {
        Self {
            desktops: DESKTOPS,
            default_desktop: 0,
            default_layout: Layout::Tile,
            border_width: 2,
            focus_color: "#43a172".to_owned(),
            unfocus_color: "#424b6c".to_owned(),
            scratchpad_color: "#cc0000".to_owned(),
            master_size: 0.52,
            gaps: 4,
            min_window_size: 50,
            panel_height: 18,
            top_panel: true,
            show_panel: true,
            invert: false,
            attach_aside: true,
            follow_mouse: false,
            follow_window: false,
            click_to_focus: true,
            monocle_borders: false,
            auto_center: true,
            global_gaps: true,
            output_title: false,
            scratchpad_name: "scratchpad".to_owned(),
            scratchpad_command: "st -t scratchpad".to_owned(),
            scratchpad_border_width: 1,
            close_scratchpad: true,
            modkey: "Mod4".to_owned(),
            mousekey: Modifier::from("modkey"),
            keybind: default_keybinds(),
            rule: vec![],
        }
    }
}

#[allow(clippy::too_many_lines)]
fn default_keybinds() -> Vec<Keybind> {
    const MOD: &[&str] = &["modkey"];
    const MOD_SHIFT: &[&str] = &["modkey", "Shift"];
    const MOD_CTRL: &[&str] = &["modkey", "Control"];
    const MOD_CTRL_SHIFT: &[&str] = &["modkey", "Control", "Shift"];
    const MOD_ALT: &[&str] = &["modkey", "Mod1"];
    const MOD_ALT_CTRL: &[&str] = &["modkey", "Mod1", "Control"];

    let mut keybinds = vec![
        Keybind::new(MOD_SHIFT, "Return", Command::Spawn("st".to_owned())),
        Keybind::new(MOD, "r", Command::Spawn("dmenu_run".to_owned())),
        Keybind::new(MOD_SHIFT, "c", Command::KillClient),
        Keybind::new(MOD_CTRL, "q", Command::Quit),
        // focus and order
        Keybind::new(MOD, "j", Command::FocusNext),
        Keybind::new(MOD, "k", Command::FocusPrevious),
        Keybind::new(MOD, "v", Command::FocusMaster),
        Keybind::new(MOD, "BackSpace", Command::FocusUrgent),
        Keybind::new(MOD, "Return", Command::SwapMaster),
        Keybind::new(MOD_SHIFT, "j", Command::MoveDown),
        Keybind::new(MOD_SHIFT, "k", Command::MoveUp),
        // modes
        Keybind::new(MOD_SHIFT, "t", Command::SwitchMode(Layout::Tile)),
        Keybind::new(MOD_SHIFT, "m", Command::SwitchMode(Layout::Monocle)),
        Keybind::new(MOD_SHIFT, "b", Command::SwitchMode(Layout::BottomStack)),
        Keybind::new(MOD_SHIFT, "g", Command::SwitchMode(Layout::Grid)),
        Keybind::new(MOD_SHIFT, "v", Command::SwitchMode(Layout::Fibonacci)),
        Keybind::new(MOD_SHIFT, "d", Command::SwitchMode(Layout::DualStack)),
        Keybind::new(MOD_SHIFT, "e", Command::SwitchMode(Layout::Equal)),
        Keybind::new(MOD, "space", Command::RotateMode(1)),
        Keybind::new(MOD_SHIFT, "space", Command::RotateMode(-1)),
        Keybind::new(MOD, "h", Command::ResizeMaster(-10)),
        Keybind::new(MOD, "l", Command::ResizeMaster(10)),
        Keybind::new(MOD, "o", Command::ResizeStack(-10)),
        Keybind::new(MOD, "p", Command::ResizeStack(10)),
        Keybind::new(MOD, "minus", Command::AdjustGaps(-1)),
        Keybind::new(MOD, "equal", Command::AdjustGaps(1)),
        Keybind::new(MOD_CTRL, "u", Command::AdjustBorders(-1)),
        Keybind::new(MOD_CTRL, "i", Command::AdjustBorders(1)),
        Keybind::new(MOD, "i", Command::InvertStack),
        Keybind::new(MOD, "b", Command::TogglePanel),
        Keybind::new(MOD_CTRL, "s", Command::ShowHide),
        // window state
        Keybind::new(MOD, "f", Command::Maximize),
        Keybind::new(MOD_SHIFT, "f", Command::ToggleFullscreen),
        Keybind::new(MOD, "m", Command::Minimize),
        Keybind::new(MOD, "n", Command::Restore),
        Keybind::new(MOD, "c", Command::CenterWindow),
        Keybind::new(MOD, "t", Command::Tilemize),
        Keybind::new(MOD, "s", Command::ToggleScratchpad),
        Keybind::new(MOD_ALT, "j", Command::FloatY(10)),
        Keybind::new(MOD_ALT, "k", Command::FloatY(-10)),
        Keybind::new(MOD_ALT, "h", Command::FloatX(-10)),
        Keybind::new(MOD_ALT, "l", Command::FloatX(10)),
        Keybind::new(MOD_ALT_CTRL, "j", Command::ResizeY(10)),
        Keybind::new(MOD_ALT_CTRL, "k", Command::ResizeY(-10)),
        Keybind::new(MOD_ALT_CTRL, "h", Command::ResizeX(-10)),
        Keybind::new(MOD_ALT_CTRL, "l", Command::ResizeX(10)),
        // desktops
        Keybind::new(MOD, "Tab", Command::LastDesktop),
        Keybind::new(MOD_CTRL, "h", Command::RotateDesktop(-1)),
        Keybind::new(MOD_CTRL, "l", Command::RotateDesktop(1)),
        Keybind::new(MOD_CTRL_SHIFT, "h", Command::RotateFilled(-1)),
        Keybind::new(MOD_CTRL_SHIFT, "l", Command::RotateFilled(1)),
        Keybind::new(MOD_SHIFT, "h", Command::RotateClient(-1)),
        Keybind::new(MOD_SHIFT, "l", Command::RotateClient(1)),
    ];

    for desktop in 0..DESKTOPS {
        let key = (desktop + 1).to_string();
        keybinds.push(Keybind::new(MOD, &key, Command::ChangeDesktop(desktop)));
        keybinds.push(Keybind::new(MOD_SHIFT, &key, Command::ClientToDesktop(desktop)));
    }
    keybinds
}
