use super::{DesktopId, DisplayId, MonitorId};

/// The active desktop and the monitor and display currently shown on it.
///
/// Recomputed by [`Hierarchy::focus_context`](super::Hierarchy::focus_context) whenever the
/// active desktop changes or a display is pushed or popped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FocusContext {
    pub desktop: DesktopId,
    pub number: usize,
    pub monitor: MonitorId,
    pub display: DisplayId,
}
