//! Match scoring between a variant's targeting and a subject.

use super::targeting::{Targeting, TargetingSubject};

/// Outcome of scoring one targeting against one subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    pub matches: bool,
    /// Count of declared axes; only meaningful when `matches` is true.
    pub specificity: usize,
}

/// Scores `targeting` against `subject`.
///
/// Matches only when every declared axis equals the subject's value on
/// that axis. A subject without a value on a declared axis fails the match.
/// Specificity counts declared axes, so an untargeted variant scores 0.
pub fn score(targeting: &Targeting, subject: &impl TargetingSubject) -> MatchResult {
    let matches = targeting
        .predicates()
        .iter()
        .all(|p| subject.axis_value(p.axis).as_ref() == Some(&p.value));

    MatchResult {
        matches,
        specificity: targeting.declared_count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::{AxisValue, TargetAxis};
    use std::collections::HashMap;

    struct Subject(HashMap<TargetAxis, AxisValue>);

    impl Subject {
        fn new() -> Self {
            Self(HashMap::new())
        }

        fn text(mut self, axis: TargetAxis, value: &str) -> Self {
            self.0.insert(axis, AxisValue::Text(value.to_string()));
            self
        }

        fn level(mut self, level: u32) -> Self {
            self.0.insert(TargetAxis::Level, AxisValue::Level(level));
            self
        }
    }

    impl TargetingSubject for Subject {
        fn axis_value(&self, axis: TargetAxis) -> Option<AxisValue> {
            self.0.get(&axis).cloned()
        }
    }

    #[test]
    fn untargeted_matches_with_zero_specificity() {
        let result = score(&Targeting::any(), &Subject::new());
        assert_eq!(result, MatchResult { matches: true, specificity: 0 });
    }

    #[test]
    fn all_declared_axes_must_match() {
        let subject = Subject::new().text(TargetAxis::Role, "IT").level(1);
        let targeting = Targeting::any().with_role("IT").with_level(1);

        let result = score(&targeting, &subject);
        assert!(result.matches);
        assert_eq!(result.specificity, 2);
    }

    #[test]
    fn one_mismatching_axis_fails() {
        let subject = Subject::new().text(TargetAxis::Role, "IT").level(2);
        let targeting = Targeting::any().with_role("IT").with_level(1);

        assert!(!score(&targeting, &subject).matches);
    }

    #[test]
    fn missing_subject_value_fails_declared_axis() {
        let subject = Subject::new().text(TargetAxis::Role, "IT");
        let targeting = Targeting::any().with_language("hebrew");

        assert!(!score(&targeting, &subject).matches);
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let subject = Subject::new().text(TargetAxis::Role, "it");
        let targeting = Targeting::any().with_role("IT");

        assert!(!score(&targeting, &subject).matches);
    }
}
