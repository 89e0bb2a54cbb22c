/// Allowed team sizes for generated training teams
///
/// A pure lookup table: it describes the nominal `[MIN, MAX]` range but does
/// not enforce it. The generator decides how to respect it.
///
/// ```text
/// size:   0      1..3     4   5   6     7..
///         empty  invalid  valid      full  invalid
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamSizePolicy;

impl TeamSizePolicy {
    pub const MIN: usize = 4;
    pub const MAX: usize = 6;

    pub const fn is_empty(size: usize) -> bool {
        size == 0
    }

    pub const fn is_full(size: usize) -> bool {
        size == Self::MAX
    }

    pub const fn can_add_member(size: usize) -> bool {
        size < Self::MAX
    }

    /// Checks whether `size` lies inside the nominal range
    ///
    /// # Example
    /// ```
    /// use training_teams_api::domain::team::value_objects::TeamSizePolicy;
    ///
    /// assert!(TeamSizePolicy::is_valid(5));
    /// assert!(!TeamSizePolicy::is_valid(3));
    /// assert!(!TeamSizePolicy::is_valid(7));
    /// ```
    pub const fn is_valid(size: usize) -> bool {
        size >= Self::MIN && size <= Self::MAX
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_bounds() {
        assert_eq!(TeamSizePolicy::MIN, 4);
        assert_eq!(TeamSizePolicy::MAX, 6);
    }

    #[test]
    fn empty_only_at_zero() {
        assert!(TeamSizePolicy::is_empty(0));
        assert!(!TeamSizePolicy::is_empty(1));
    }

    #[test]
    fn full_only_at_max() {
        assert!(TeamSizePolicy::is_full(6));
        assert!(!TeamSizePolicy::is_full(5));
        assert!(!TeamSizePolicy::is_full(7));
    }

    #[test]
    fn can_add_member_below_max() {
        assert!(TeamSizePolicy::can_add_member(0));
        assert!(TeamSizePolicy::can_add_member(5));
        assert!(!TeamSizePolicy::can_add_member(6));
        assert!(!TeamSizePolicy::can_add_member(8));
    }

    #[test]
    fn valid_sizes() {
        for size in 0..=10 {
            assert_eq!(TeamSizePolicy::is_valid(size), (4..=6).contains(&size), "size {}", size);
        }
    }
}
