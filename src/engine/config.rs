/// How the duplicate detector decides that a candidate collides with a committed deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Any committed deal with the same business id is a duplicate.
    #[default]
    IdOnly,
    /// Only a committed deal with the same id and the same timestamp is a duplicate.
    ///
    /// The deal store still enforces id uniqueness, so a same-id row with a different
    /// timestamp ends as a persistence failure rather than a duplicate.
    IdAndTimestamp
}

#[derive(Debug, Clone)]
pub struct ImportConfig {
    pub duplicate_policy: DuplicatePolicy,
    /// Skip writing another error row for an id that already has one.
    pub suppress_repeated_errors: bool,
    /// Bound of the reader to coordinator channel.
    pub channel_capacity: usize
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::IdOnly,
            suppress_repeated_errors: false,
            channel_capacity: 256
        }
    }
}
