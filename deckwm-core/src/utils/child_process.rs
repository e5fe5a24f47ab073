//! Spawning and reaping of the programs started by key bindings.
use crate::errors::{DeckError, Result};
use std::collections::HashMap;
use std::os::unix::process::CommandExt;
use std::process::{Child, Command, Stdio};
use std::sync::{atomic::AtomicBool, Arc};

pub type ChildID = u32;

/// Children started by the window manager that have not been reaped yet.
#[derive(Debug, Default)]
pub struct Children {
    inner: HashMap<ChildID, Child>,
}

impl Children {
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns `false` if the child was already known.
    pub fn insert(&mut self, child: Child) -> bool {
        self.inner.insert(child.id(), child).is_none()
    }

    /// Waits on every child that exited so none is left a zombie.
    pub fn remove_finished_children(&mut self) {
        self.inner
            .retain(|_, child| child.try_wait().map_or(true, |status| status.is_none()));
    }
}

/// Registers the `SIGCHLD` handler. The flag is set when the signal arrives; clearing it is up
/// to the caller.
pub fn register_child_hook(flag: Arc<AtomicBool>) {
    _ = signal_hook::flag::register(signal_hook::consts::signal::SIGCHLD, flag)
        .map_err(|err| tracing::error!("Cannot register SIGCHLD signal handler: {:?}", err));
}

/// Runs `command` through `sh -c` in its own process group, with the standard streams closed.
///
/// # Errors
///
/// Fails when the shell cannot be started.
pub fn exec_shell(command: &str, children: &mut Children) -> Result<ChildID> {
    let child = Command::new("sh")
        .arg("-c")
        .arg(command)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .process_group(0)
        .spawn()
        .map_err(|err| DeckError::SpawnFailed(format!("{command}: {err}")))?;
    let pid = child.id();
    tracing::debug!("Spawned `{command}` as {pid}");
    children.insert(child);
    Ok(pid)
}
