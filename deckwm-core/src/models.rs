//! Objects (such as clients and displays) the window manager keeps track of.
mod alien;
mod client;
mod desktop;
mod display;
mod focus_context;
mod hierarchy;
pub mod list;
mod manager;
mod mode;
mod monitor;
mod window_info;
mod window_state;
mod window_type;
mod xyhw;

pub use alien::Alien;
pub use client::{Client, ClientId, FocusDelivery, Handle, WindowHandle};
pub(crate) use client::MockHandle;
pub use desktop::{Desktop, DesktopId};
pub use display::{Display, DisplayId, DisplaySettings, ReturnSlot};
pub use focus_context::FocusContext;
pub use hierarchy::Hierarchy;
pub use manager::Manager;
pub use mode::{DragAxis, DraggingState, Mode};
pub use monitor::{Monitor, MonitorId};
pub use window_info::{AdoptInfo, WindowInfo};
pub use window_state::WindowState;
pub use window_type::WindowType;
pub use xyhw::Xyhw;
