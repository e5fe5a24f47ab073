//! Managed window information.
#![allow(clippy::module_name_repetitions)]

use std::fmt::Debug;

use super::list::{Link, Linked};
use super::{DisplayId, WindowType, Xyhw};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

slotmap::new_key_type! {
    /// Arena handle of a [`Client`].
    pub struct ClientId;
}

/// A trait which backend specific window handles need to implement
pub trait Handle:
    Serialize + DeserializeOwned + Debug + Clone + Copy + PartialEq + Eq + Default + Send + 'static
{
}

/// A Backend-agnostic handle to a window used to identify it
///
/// # Serde
///
/// Using generics here with serde derive macros causes some wierd behaviour with the compiler, so
/// as suggested by [this `serde` issue][serde-issue], just adding `#[serde(bound = "")]`
/// everywhere the generic is declared fixes the bug.
///
/// [serde-issue]: https://github.com/serde-rs/serde/issues/1296
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowHandle<H>(#[serde(bound = "")] pub H)
where
    H: Handle;

/// Handle for testing purposes
pub type MockHandle = i32;
impl Handle for MockHandle {}

/// How input focus is handed to a client.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusDelivery {
    /// Set the input focus on the window directly.
    #[default]
    Direct,
    /// The window asked not to be focused directly, send it `WM_TAKE_FOCUS` instead.
    TakeFocus,
}

/// One managed window.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone)]
pub struct Client<H: Handle> {
    pub handle: WindowHandle<H>,
    pub name: Option<String>,
    pub r#type: WindowType,
    pub urgent: bool,
    pub transient: bool,
    pub floating: bool,
    pub fullscreen: bool,
    pub maximized: bool,
    pub minimized: bool,
    /// Overrides the global border width when set.
    pub border_width: Option<i32>,
    pub focus: FocusDelivery,
    /// Last known on-screen placement.
    pub geometry: Xyhw,
    /// Moved off-screen; `geometry` still holds where it belongs.
    pub hidden: bool,
    /// Size to restore when the client is floated again.
    pub float_size: Option<(i32, i32)>,
    link: Link<ClientId, DisplayId>,
}

impl<H: Handle> Client<H> {
    #[must_use]
    pub fn new(handle: WindowHandle<H>, r#type: WindowType, geometry: Xyhw) -> Self {
        Self {
            handle,
            name: None,
            r#type,
            urgent: false,
            transient: false,
            floating: false,
            fullscreen: false,
            maximized: false,
            minimized: false,
            border_width: None,
            focus: FocusDelivery::Direct,
            geometry,
            hidden: false,
            float_size: None,
            link: Link::default(),
        }
    }

    /// Whether the layout engine places this client.
    #[must_use]
    pub const fn is_tileable(&self) -> bool {
        !(self.floating || self.transient || self.fullscreen || self.maximized || self.minimized)
    }

    /// Floating, transient and non-normal clients are stacked above the tiled ones.
    #[must_use]
    pub fn stacks_above_tiles(&self) -> bool {
        self.floating || self.transient || self.r#type != WindowType::Normal
    }

    /// The display whose client list holds this client.
    #[must_use]
    pub fn display(&self) -> Option<DisplayId> {
        self.link.parent()
    }

    #[must_use]
    pub fn is_managed(&self) -> bool {
        self.link.is_linked()
    }
}

impl<H: Handle> Linked<ClientId> for Client<H> {
    type Parent = DisplayId;

    fn link(&self) -> &Link<ClientId, DisplayId> {
        &self.link
    }

    fn link_mut(&mut self) -> &mut Link<ClientId, DisplayId> {
        &mut self.link
    }
}
