mod app_rule;
mod keybind;

use crate::layouts::Layout;
pub use app_rule::AppRule;
pub use keybind::Keybind;
#[cfg(test)]
pub(crate) use tests::TestConfig;

/// Settings the window manager core reads. Loaded and validated by the binary.
pub trait Config {
    /// Number of virtual desktops.
    fn desktops(&self) -> usize;
    fn default_desktop(&self) -> usize;
    fn default_layout(&self) -> Layout;
    fn border_width(&self) -> i32;
    fn focus_color(&self) -> String;
    fn unfocus_color(&self) -> String;
    fn scratchpad_color(&self) -> String;
    /// Share of the screen given to the master area.
    fn master_size(&self) -> f64;
    fn gaps(&self) -> i32;
    fn min_window_size(&self) -> i32;
    fn panel_height(&self) -> i32;
    fn top_panel(&self) -> bool;
    fn show_panel(&self) -> bool;
    fn invert(&self) -> bool;
    /// Attach new clients at the end of the list instead of the front.
    fn attach_aside(&self) -> bool;
    fn follow_mouse(&self) -> bool;
    fn follow_window(&self) -> bool;
    fn click_to_focus(&self) -> bool;
    fn monocle_borders(&self) -> bool;
    fn auto_center(&self) -> bool;
    fn global_gaps(&self) -> bool;
    /// Append the current client's title to the status line.
    fn output_title(&self) -> bool;
    fn scratchpad_name(&self) -> String;
    fn scratchpad_command(&self) -> String;
    fn scratchpad_border_width(&self) -> i32;
    fn close_scratchpad(&self) -> bool;
    fn mousekey(&self) -> Vec<String>;
    fn keybinds(&self) -> Vec<Keybind>;

    /// The first application rule whose pattern matches `title`.
    fn app_rule(&self, title: &str) -> Option<AppRule>;
}
