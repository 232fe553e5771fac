//! Selection of global state released by [`super::Context::teardown`].

/// Named teardown steps.
///
/// # Examples
///
/// ```
/// use appenv::TeardownFlags;
///
/// let flags = TeardownFlags { null_container: true, ..TeardownFlags::DEFAULT };
/// assert_eq!(flags, TeardownFlags::EVERYTHING);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct TeardownFlags {
    /// Drop the active application.
    pub null_app: bool,
    /// Flush the application's log.
    pub flush_log: bool,
    /// Close the application's session.
    pub close_session: bool,
    /// Clear every container definition.
    pub clear_container: bool,
    /// Discard the container itself.
    pub null_container: bool,
}

impl Default for TeardownFlags {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TeardownFlags {
    /// Selects nothing; teardown becomes a no-op.
    pub const NOTHING: Self = Self {
        null_app: false,
        flush_log: false,
        close_session: false,
        clear_container: false,
        null_container: false,
    };

    /// Every usually necessary step; keeps the container itself.
    pub const ALL: Self = Self {
        null_app: true,
        flush_log: true,
        close_session: true,
        clear_container: true,
        null_container: false,
    };

    /// Same as [`TeardownFlags::ALL`].
    pub const DEFAULT: Self = Self::ALL;

    /// Every step including discarding the container.
    pub const EVERYTHING: Self = Self {
        null_container: true,
        ..Self::ALL
    };

    /// Whether no step is selected.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        !(self.null_app
            || self.flush_log
            || self.close_session
            || self.clear_container
            || self.null_container)
    }
}
