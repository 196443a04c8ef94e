use crate::provider::Id;

pub mod controller;
pub mod model;

/// A user interaction the disclosure state machine reacts to. Transitions
/// are synchronous and purely presentational; none of them can fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    ShowMore,
    ToggleForm(Id),
    ExpandPassword,
}
