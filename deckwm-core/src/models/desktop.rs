use super::list::{Link, Linked, List};
use super::MonitorId;

slotmap::new_key_type! {
    /// Arena handle of a [`Desktop`].
    pub struct DesktopId;
}

/// A virtual desktop. Holds one monitor per physical screen.
#[derive(Debug, Clone)]
pub struct Desktop {
    pub number: usize,
    pub monitors: List<MonitorId, DesktopId>,
    link: Link<DesktopId, ()>,
}

impl Desktop {
    #[must_use]
    pub fn new(id: DesktopId, number: usize) -> Self {
        Self {
            number,
            monitors: List::new(id),
            link: Link::default(),
        }
    }

    #[must_use]
    pub fn id(&self) -> DesktopId {
        self.monitors.owner()
    }
}

impl Linked<DesktopId> for Desktop {
    type Parent = ();

    fn link(&self) -> &Link<DesktopId, ()> {
        &self.link
    }

    fn link_mut(&mut self) -> &mut Link<DesktopId, ()> {
        &mut self.link
    }
}
