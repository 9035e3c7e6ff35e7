use crate::core::models::ids::InstanceId;

/// The interaction mode of a session. Exactly one is active at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Browsing the pattern categories.
    CategoryBrowsing,
    /// Browsing the patterns of one category.
    PatternBrowsing { category: String },
    /// A pattern is picked and waiting for a placement position.
    Placing { category: String, name: String },
    /// A placed instance is selected and can be nudged around.
    IdleWithSelection { id: InstanceId },
    /// The registry has been committed; the grid is authoritative.
    Running,
}

impl Mode {
    pub fn is_running(&self) -> bool {
        matches!(self, Mode::Running)
    }

    /// True for the three pre-selection, pre-run picker modes.
    pub fn is_browsing(&self) -> bool {
        matches!(
            self,
            Mode::CategoryBrowsing | Mode::PatternBrowsing { .. } | Mode::Placing { .. }
        )
    }
}
