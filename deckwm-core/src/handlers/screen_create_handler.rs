use crate::models::{Handle, Xyhw};
use crate::state::State;

impl<H: Handle> State<H> {
    /// Applies the geometry of the screen to every monitor.
    ///
    /// On a screen taller than it is wide the stacking layouts of the base displays are pivoted,
    /// so the master area sits on top.
    pub fn screen_create_handler(&mut self, screen: Xyhw) -> bool {
        let was_pivoted = self.monitor().is_pivoted();
        self.hierarchy.set_screen(screen);
        if self.monitor().is_pivoted() && !was_pivoted {
            for monitor in self.hierarchy.monitors.values() {
                if let Some(display) = monitor
                    .displays
                    .tail()
                    .and_then(|id| self.hierarchy.displays.get_mut(id))
                {
                    display.settings.layout = display.settings.layout.pivoted();
                }
            }
        }
        tracing::debug!("Screen is {}x{}", screen.w, screen.h);
        self.tile();
        true
    }
}
