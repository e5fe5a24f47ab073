use crate::config::Config;
use crate::display_servers::DisplayServer;
use crate::models::Handle;
use crate::state::State;
use crate::utils::child_process::Children;
use std::marker::PhantomData;
use std::sync::{atomic::AtomicBool, Arc};

/// Maintains current program state.
#[derive(Debug)]
pub struct Manager<H: Handle, C, SERVER: DisplayServer<H>> {
    pub state: State<H>,
    pub config: C,

    pub(crate) children: Children,
    pub(crate) reap_requested: Arc<AtomicBool>,
    pub(crate) quit_requested: bool,
    pub display_server: SERVER,
    marker: PhantomData<H>,
}

impl<H: Handle, C, SERVER> Manager<H, C, SERVER>
where
    C: Config,
    SERVER: DisplayServer<H>,
{
    pub fn new(config: C) -> Self {
        let display_server = SERVER::new(&config);

        Self {
            state: State::new(&config),
            config,
            children: Default::default(),
            reap_requested: Default::default(),
            quit_requested: false,
            display_server,
            marker: PhantomData,
        }
    }

    pub fn register_child_hook(&self) {
        crate::child_process::register_child_hook(self.reap_requested.clone());
    }

    /// Stop the event loop after the current iteration.
    pub fn quit(&mut self) {
        self.quit_requested = true;
    }
}

#[cfg(test)]
impl
    Manager<
        crate::models::MockHandle,
        crate::config::TestConfig,
        crate::display_servers::MockDisplayServer<crate::models::MockHandle>,
    >
{
    pub fn new_test(desktops: usize) -> Self {
        Self::new(crate::config::TestConfig {
            desktops,
            ..Default::default()
        })
    }

    pub fn new_test_with(config: crate::config::TestConfig) -> Self {
        Self::new(config)
    }
}
