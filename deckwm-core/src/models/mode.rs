use super::{ClientId, Xyhw};

/// What a pointer drag does to the grabbed client.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragAxis {
    Move,
    Resize,
}

/// A drag in progress and the client's geometry when it started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DraggingState {
    pub client: ClientId,
    pub axis: DragAxis,
    /// Pointer position the drag is measured from. A drag started from the keyboard takes the
    /// first motion as its anchor.
    pub anchor: Option<(i32, i32)>,
    pub origin: Xyhw,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Dragging(DraggingState),
}
