pub mod command_handler;
pub mod display_event_handler;
mod focus_handler;
mod fullscreen_handler;
mod goto_desktop_handler;
mod layout_handler;
mod minimize_handler;
mod mouse_combo_handler;
mod screen_create_handler;
mod window_handler;
mod window_move_handler;

use super::command::Command;
use super::config::Config;
use super::models::Manager;
use super::DisplayEvent;

#[cfg(test)]
pub(crate) use focus_handler::tests;
