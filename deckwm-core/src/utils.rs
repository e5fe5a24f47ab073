//! Various shared functions that `deckwm` uses.
pub mod child_process;
pub mod modmask_lookup;
pub mod status_line;
