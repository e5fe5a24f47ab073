use super::Config;
use super::DisplayAction;
use super::DisplayEvent;
use super::DisplayServer;
use crate::models::{Handle, WindowHandle, Xyhw};

/// Records every executed action and answers geometry queries from a fixed table.
#[derive(Clone, Debug, Default)]
pub struct MockDisplayServer<H: Handle> {
    pub executed: Vec<DisplayAction<H>>,
    pub geometries: Vec<(WindowHandle<H>, Xyhw)>,
}

impl<H: Handle> MockDisplayServer<H> {
    pub fn set_geometry(&mut self, handle: WindowHandle<H>, geometry: Xyhw) {
        self.geometries.retain(|(h, _)| *h != handle);
        self.geometries.push((handle, geometry));
    }
}

impl<H: Handle> DisplayServer<H> for MockDisplayServer<H> {
    fn new(_: &impl Config) -> Self {
        Self {
            executed: vec![],
            geometries: vec![],
        }
    }

    fn get_next_events(&mut self) -> Vec<DisplayEvent<H>> {
        vec![]
    }

    fn execute_action(&mut self, act: DisplayAction<H>) -> Option<DisplayEvent<H>> {
        self.executed.push(act);
        None
    }

    fn query_geometry(&self, handle: &WindowHandle<H>) -> Option<Xyhw> {
        self.geometries
            .iter()
            .find(|(h, _)| h == handle)
            .map(|(_, geometry)| *geometry)
    }

    fn wait_readable(&self) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()>>> {
        Box::pin(futures::future::pending())
    }

    fn flush(&self) {}
}
