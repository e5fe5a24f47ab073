//! Arena storage for the desktop > monitor > display > client tree.
use super::list::{self, List};
use super::{
    Client, ClientId, Desktop, DesktopId, Display, DisplayId, DisplaySettings, FocusContext,
    Handle, Monitor, MonitorId, WindowHandle, Xyhw,
};
use slotmap::SlotMap;

#[derive(Debug)]
pub struct Hierarchy<H: Handle> {
    pub desktops: SlotMap<DesktopId, Desktop>,
    pub monitors: SlotMap<MonitorId, Monitor>,
    pub displays: SlotMap<DisplayId, Display>,
    pub clients: SlotMap<ClientId, Client<H>>,
    pub desktop_list: List<DesktopId, ()>,
}

impl<H: Handle> Hierarchy<H> {
    /// Builds `count` desktops, each with one monitor of geometry `screen` holding one display.
    pub fn new(count: usize, screen: Xyhw, panel_height: i32, settings: DisplaySettings) -> Self {
        let mut hierarchy = Self {
            desktops: SlotMap::with_key(),
            monitors: SlotMap::with_key(),
            displays: SlotMap::with_key(),
            clients: SlotMap::with_key(),
            desktop_list: List::new(()),
        };
        for number in 0..count {
            let desktop = hierarchy
                .desktops
                .insert_with_key(|id| Desktop::new(id, number));
            hierarchy
                .desktop_list
                .push_back(&mut hierarchy.desktops, desktop);
            let monitor = hierarchy
                .monitors
                .insert_with_key(|id| Monitor::new(id, screen, panel_height));
            hierarchy.desktops[desktop]
                .monitors
                .push_back(&mut hierarchy.monitors, monitor);
            hierarchy.push_display(monitor, settings);
        }
        hierarchy
    }

    pub fn desktop_count(&self) -> usize {
        self.desktop_list.len()
    }

    /// Desktop handles in numeric order.
    pub fn desktop_ids(&self) -> Vec<DesktopId> {
        self.desktop_list.keys(&self.desktops)
    }

    pub fn find_desktop(&self, number: usize) -> Option<DesktopId> {
        self.desktop_list
            .iter(&self.desktops)
            .find(|id| self.desktops[*id].number == number)
    }

    /// The first monitor of a desktop and the display on top of its stack.
    pub fn top_display(&self, desktop: DesktopId) -> Option<(MonitorId, DisplayId)> {
        let monitor = self.desktops.get(desktop)?.monitors.head()?;
        let display = self.monitors.get(monitor)?.top_display()?;
        Some((monitor, display))
    }

    /// Computes where focus lives when desktop `number` is the active one.
    pub fn focus_context(&self, number: usize) -> Option<FocusContext> {
        let desktop = self.find_desktop(number)?;
        let (monitor, display) = self.top_display(desktop)?;
        Some(FocusContext {
            desktop,
            number,
            monitor,
            display,
        })
    }

    /// Looks for a client by window handle in every display of every desktop.
    pub fn find_client(&self, handle: &WindowHandle<H>) -> Option<ClientId> {
        self.desktop_list.iter(&self.desktops).find_map(|desktop| {
            self.desktops[desktop]
                .monitors
                .iter(&self.monitors)
                .find_map(|monitor| {
                    self.monitors[monitor]
                        .displays
                        .iter(&self.displays)
                        .find_map(|display| {
                            self.displays[display]
                                .clients
                                .iter(&self.clients)
                                .find(|client| self.clients[*client].handle == *handle)
                        })
                })
        })
    }

    /// Climbs from a client to the display, monitor and desktop holding it.
    pub fn parents(&self, client: ClientId) -> Option<(DisplayId, MonitorId, DesktopId)> {
        let display = self.clients.get(client)?.display()?;
        let monitor = self.displays.get(display)?.monitor()?;
        let desktop = self.monitors.get(monitor)?.desktop()?;
        Some((display, monitor, desktop))
    }

    pub fn desktop_of(&self, client: ClientId) -> Option<usize> {
        let (_, _, desktop) = self.parents(client)?;
        Some(self.desktops[desktop].number)
    }

    pub fn client_ids(&self, display: DisplayId) -> Vec<ClientId> {
        self.displays
            .get(display)
            .map(|d| d.clients.keys(&self.clients))
            .unwrap_or_default()
    }

    /// Every client of a desktop, displays below the top included.
    pub fn desktop_clients(&self, desktop: DesktopId) -> Vec<ClientId> {
        let Some(desktop) = self.desktops.get(desktop) else {
            return vec![];
        };
        desktop
            .monitors
            .iter(&self.monitors)
            .flat_map(|monitor| self.monitors[monitor].displays.keys(&self.displays))
            .flat_map(|display| self.client_ids(display))
            .collect()
    }

    pub fn next_client(&self, client: ClientId) -> Option<ClientId> {
        list::next_of(&self.clients, client)
    }

    pub fn prev_client(&self, client: ClientId) -> Option<ClientId> {
        list::prev_of(&self.clients, client)
    }

    pub fn attach_front(&mut self, display: DisplayId, client: ClientId) -> bool {
        match self.displays.get_mut(display) {
            Some(d) => d.clients.push_front(&mut self.clients, client),
            None => false,
        }
    }

    pub fn attach_back(&mut self, display: DisplayId, client: ClientId) -> bool {
        match self.displays.get_mut(display) {
            Some(d) => d.clients.push_back(&mut self.clients, client),
            None => false,
        }
    }

    pub fn attach_after(&mut self, display: DisplayId, anchor: ClientId, client: ClientId) -> bool {
        match self.displays.get_mut(display) {
            Some(d) => d.clients.insert_after(&mut self.clients, anchor, client),
            None => false,
        }
    }

    pub fn attach_before(
        &mut self,
        display: DisplayId,
        anchor: ClientId,
        client: ClientId,
    ) -> bool {
        match self.displays.get_mut(display) {
            Some(d) => d.clients.insert_before(&mut self.clients, anchor, client),
            None => false,
        }
    }

    /// Unlinks a client from its display's list only, leaving the focus pair alone. Used to
    /// reorder a list.
    pub fn unlink(&mut self, client: ClientId) -> Option<DisplayId> {
        let display = self.clients.get(client)?.display()?;
        self.displays
            .get_mut(display)?
            .clients
            .remove(&mut self.clients, client)?;
        Some(display)
    }

    /// Unlinks a client from its display and scrubs it from the display's focus pair and
    /// minimize stack. Returns the display it was in.
    pub fn detach(&mut self, client: ClientId) -> Option<DisplayId> {
        let display = self.clients.get(client)?.display()?;
        let d = self.displays.get_mut(display)?;
        d.clients.remove(&mut self.clients, client)?;
        d.forget_minimized(client);
        if d.current == Some(client) {
            d.current = None;
        }
        if d.previous == Some(client) {
            d.previous = None;
        }
        Some(display)
    }

    /// Pushes a fresh display on top of a monitor's stack.
    pub fn push_display(&mut self, monitor: MonitorId, settings: DisplaySettings) -> DisplayId {
        let display = self
            .displays
            .insert_with_key(|id| Display::new(id, settings));
        if let Some(m) = self.monitors.get_mut(monitor) {
            m.displays.push_front(&mut self.displays, display);
        }
        display
    }

    /// Unlinks and frees an empty display. The last display of a monitor is never removed.
    pub fn pop_display(&mut self, display: DisplayId) -> bool {
        let Some(d) = self.displays.get(display) else {
            return false;
        };
        if !d.clients.is_empty() {
            return false;
        }
        let Some(monitor) = d.monitor() else {
            return false;
        };
        let m = &mut self.monitors[monitor];
        if m.displays.len() < 2 {
            return false;
        }
        m.displays.remove(&mut self.displays, display);
        self.displays.remove(display);
        true
    }

    /// The display right below `display` in its monitor's stack.
    pub fn display_below(&self, display: DisplayId) -> Option<DisplayId> {
        list::next_of(&self.displays, display)
    }

    /// Sets the geometry of every monitor.
    pub fn set_screen(&mut self, screen: Xyhw) {
        for monitor in self.monitors.values_mut() {
            monitor.screen = screen;
        }
    }

    /// Tears the whole tree down, returning the clients that were managed.
    pub fn drop_hierarchy(&mut self) -> Vec<Client<H>> {
        for desktop in self.desktop_ids() {
            for client in self.desktop_clients(desktop) {
                self.detach(client);
            }
        }
        while self.desktop_list.pop_front(&mut self.desktops).is_some() {}
        self.displays.clear();
        self.monitors.clear();
        self.desktops.clear();
        self.clients.drain().map(|(_, client)| client).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MockHandle, WindowType};

    fn hierarchy(count: usize) -> Hierarchy<MockHandle> {
        Hierarchy::new(
            count,
            Xyhw::new(0, 0, 1280, 800),
            18,
            DisplaySettings::default(),
        )
    }

    fn add(hierarchy: &mut Hierarchy<MockHandle>, display: DisplayId, handle: i32) -> ClientId {
        let client = hierarchy.clients.insert(Client::new(
            WindowHandle(handle),
            WindowType::Normal,
            Xyhw::default(),
        ));
        hierarchy.attach_back(display, client);
        client
    }

    #[test]
    fn every_desktop_gets_one_monitor_and_one_display() {
        let hierarchy = hierarchy(4);
        assert_eq!(hierarchy.desktop_count(), 4);
        for number in 0..4 {
            let context = hierarchy.focus_context(number).unwrap();
            assert_eq!(context.number, number);
            assert_eq!(hierarchy.monitors[context.monitor].displays.len(), 1);
        }
        assert!(hierarchy.focus_context(4).is_none());
    }

    #[test]
    fn find_client_searches_other_desktops_and_lower_displays() {
        let mut hierarchy = hierarchy(2);
        let second = hierarchy.focus_context(1).unwrap();
        let lower = add(&mut hierarchy, second.display, 7);
        let upper = hierarchy.push_display(second.monitor, DisplaySettings::default());
        let top = add(&mut hierarchy, upper, 8);
        assert_eq!(hierarchy.find_client(&WindowHandle(7)), Some(lower));
        assert_eq!(hierarchy.find_client(&WindowHandle(8)), Some(top));
        assert_eq!(hierarchy.find_client(&WindowHandle(9)), None);
        let (display, monitor, desktop) = hierarchy.parents(lower).unwrap();
        assert_eq!(display, second.display);
        assert_eq!(monitor, second.monitor);
        assert_eq!(desktop, second.desktop);
        assert_eq!(hierarchy.desktop_clients(second.desktop), vec![top, lower]);
    }

    #[test]
    fn detach_clears_the_focus_pair() {
        let mut hierarchy = hierarchy(1);
        let context = hierarchy.focus_context(0).unwrap();
        let first = add(&mut hierarchy, context.display, 1);
        let second = add(&mut hierarchy, context.display, 2);
        let display = &mut hierarchy.displays[context.display];
        display.current = Some(second);
        display.previous = Some(first);
        display.minimized.push_front(first);
        assert_eq!(hierarchy.detach(first), Some(context.display));
        let display = &hierarchy.displays[context.display];
        assert_eq!(display.previous, None);
        assert_eq!(display.current, Some(second));
        assert!(display.minimized.is_empty());
        assert_eq!(hierarchy.detach(first), None);
    }

    #[test]
    fn the_last_display_of_a_monitor_is_never_popped() {
        let mut hierarchy = hierarchy(1);
        let context = hierarchy.focus_context(0).unwrap();
        assert!(!hierarchy.pop_display(context.display));
        let upper = hierarchy.push_display(context.monitor, DisplaySettings::default());
        assert_eq!(hierarchy.focus_context(0).unwrap().display, upper);
        assert_eq!(hierarchy.display_below(upper), Some(context.display));
        assert!(hierarchy.pop_display(upper));
        assert_eq!(hierarchy.focus_context(0).unwrap().display, context.display);
    }

    #[test]
    fn drop_hierarchy_hands_back_every_client() {
        let mut hierarchy = hierarchy(2);
        let first = hierarchy.focus_context(0).unwrap();
        let second = hierarchy.focus_context(1).unwrap();
        add(&mut hierarchy, first.display, 1);
        add(&mut hierarchy, second.display, 2);
        let dropped = hierarchy.drop_hierarchy();
        assert_eq!(dropped.len(), 2);
        assert!(dropped.iter().all(|client| !client.is_managed()));
        assert_eq!(hierarchy.desktop_count(), 0);
        assert!(hierarchy.displays.is_empty());
    }
}
