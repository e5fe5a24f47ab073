use crate::Command;
use serde::{Deserialize, Serialize};

/// A key combination and the command it triggers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Keybind {
    #[serde(default)]
    pub modifier: Vec<String>,
    pub key: String,
    pub command: Command,
}
