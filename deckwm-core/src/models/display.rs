use super::list::{Link, Linked, List};
use super::{ClientId, MonitorId};
use crate::layouts::Layout;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

slotmap::new_key_type! {
    /// Arena handle of a [`Display`].
    pub struct DisplayId;
}

/// Per display layout parameters. Copied onto the display pushed for a fullscreen client.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct DisplaySettings {
    pub layout: Layout,
    /// Pixel adjustment of the master extent.
    pub master_size: i32,
    pub growth: i32,
    pub gaps: i32,
    pub invert: bool,
    pub show_panel: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            layout: Layout::default(),
            master_size: 0,
            growth: 0,
            gaps: 4,
            invert: false,
            show_panel: true,
        }
    }
}

/// Where a fullscreen client came from, so leaving fullscreen puts it back in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnSlot {
    Head,
    After(ClientId),
}

/// An ordered list of clients with its own focus pair and layout settings.
#[derive(Debug, Clone)]
pub struct Display {
    pub clients: List<ClientId, DisplayId>,
    /// Minimized clients, most recent first. They stay in `clients` too.
    pub minimized: VecDeque<ClientId>,
    pub current: Option<ClientId>,
    pub previous: Option<ClientId>,
    pub settings: DisplaySettings,
    /// Set on a display pushed for a fullscreen client.
    pub return_slot: Option<ReturnSlot>,
    link: Link<DisplayId, MonitorId>,
}

impl Display {
    #[must_use]
    pub fn new(id: DisplayId, settings: DisplaySettings) -> Self {
        Self {
            clients: List::new(id),
            minimized: VecDeque::new(),
            current: None,
            previous: None,
            settings,
            return_slot: None,
            link: Link::default(),
        }
    }

    #[must_use]
    pub fn id(&self) -> DisplayId {
        self.clients.owner()
    }

    #[must_use]
    pub fn monitor(&self) -> Option<MonitorId> {
        self.link.parent()
    }

    /// Drops `client` from the minimize stack. Returns whether it was there.
    pub fn forget_minimized(&mut self, client: ClientId) -> bool {
        let before = self.minimized.len();
        self.minimized.retain(|id| *id != client);
        before != self.minimized.len()
    }
}

impl Linked<DisplayId> for Display {
    type Parent = MonitorId;

    fn link(&self) -> &Link<DisplayId, MonitorId> {
        &self.link
    }

    fn link_mut(&mut self) -> &mut Link<DisplayId, MonitorId> {
        &mut self.link
    }
}
