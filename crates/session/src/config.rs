/// Knobs the session needs from the outer configuration layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// Upper bound on registered participants. `None` means unbounded.
    pub max_participants: Option<usize>,
}

impl SessionConfig {
    pub fn with_max_participants(limit: usize) -> Self {
        Self {
            max_participants: Some(limit),
        }
    }
}
