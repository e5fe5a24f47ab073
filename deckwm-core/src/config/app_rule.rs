use serde::{Deserialize, Serialize};

/// Placement decided for a new client by the first matching application rule.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppRule {
    /// Target desktop. `None` or out of range means the current one.
    pub desktop: Option<usize>,
    /// Switch to the target desktop once the client is mapped.
    pub follow: bool,
    pub floating: bool,
    pub border_width: Option<i32>,
}
