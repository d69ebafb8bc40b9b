//! Idempotent filesystem primitives used by the link engine.
pub mod symlink;

pub mod helpers {
    //! Shared helpers for resource implementations.
    pub mod fs;
}

/// Result of applying or removing a resource.
///
/// # Examples
///
/// ```
/// use dotlink::resources::ResourceChange;
///
/// let applied = ResourceChange::Applied;
/// assert!(applied.is_change());
/// assert!(!ResourceChange::AlreadyAbsent.is_change());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceChange {
    /// Link was created or replaced.
    Applied,
    /// Link already stored the expected target; nothing was touched.
    AlreadyCorrect,
    /// An entry was removed.
    Removed,
    /// Nothing existed at the path.
    AlreadyAbsent,
}

impl ResourceChange {
    /// Whether the filesystem was modified.
    #[must_use]
    pub const fn is_change(self) -> bool {
        matches!(self, Self::Applied | Self::Removed)
    }
}
