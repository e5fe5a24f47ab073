use super::list::{Link, Linked, List};
use super::{DesktopId, DisplayId, Xyhw};

slotmap::new_key_type! {
    /// Arena handle of a [`Monitor`].
    pub struct MonitorId;
}

/// A stack of displays; the head is the one being shown.
#[derive(Debug, Clone)]
pub struct Monitor {
    pub displays: List<DisplayId, MonitorId>,
    /// Full screen geometry.
    pub screen: Xyhw,
    /// Space reserved for the panel.
    pub panel_height: i32,
    link: Link<MonitorId, DesktopId>,
}

impl Monitor {
    #[must_use]
    pub fn new(id: MonitorId, screen: Xyhw, panel_height: i32) -> Self {
        Self {
            displays: List::new(id),
            screen,
            panel_height,
            link: Link::default(),
        }
    }

    #[must_use]
    pub fn id(&self) -> MonitorId {
        self.displays.owner()
    }

    #[must_use]
    pub const fn width(&self) -> i32 {
        self.screen.w
    }

    /// Height without the panel.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.screen.h - self.panel_height
    }

    #[must_use]
    pub const fn is_pivoted(&self) -> bool {
        self.height() > self.width()
    }

    #[must_use]
    pub fn top_display(&self) -> Option<DisplayId> {
        self.displays.head()
    }

    #[must_use]
    pub fn desktop(&self) -> Option<DesktopId> {
        self.link.parent()
    }
}

impl Linked<MonitorId> for Monitor {
    type Parent = DesktopId;

    fn link(&self) -> &Link<MonitorId, DesktopId> {
        &self.link
    }

    fn link_mut(&mut self) -> &mut Link<MonitorId, DesktopId> {
        &mut self.link
    }
}
