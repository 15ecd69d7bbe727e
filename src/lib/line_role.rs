use std::fmt;
use strum_macros::EnumIter;

/// Rendering role of a curve within a chart: the low end of the swept values,
/// the middle, or the high end. The renderer maps each role to a style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineRole {
    Low,
    Mid,
    High,
}

impl LineRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineRole::Low => "low",
            LineRole::Mid => "mid",
            LineRole::High => "high",
        }
    }
}

impl fmt::Display for LineRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Role of the curve at `index` in a series of `total` curves.
///
/// Two curves are split into low and high. Otherwise curves more than half a
/// step below the median index are low, more than half a step above are high,
/// and the rest are mid.
pub fn role(index: usize, total: usize) -> LineRole {
    if total == 2 {
        return if index == 0 { LineRole::Low } else { LineRole::High };
    }

    let index = index as f64;
    let median = (total as f64 - 1.0) / 2.0;
    if index < median - 0.5 {
        LineRole::Low
    } else if index > median + 0.5 {
        LineRole::High
    } else {
        LineRole::Mid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_two_curves() {
        assert_eq!(role(0, 2), LineRole::Low);
        assert_eq!(role(1, 2), LineRole::High);
    }

    #[test]
    fn test_odd_series() {
        let roles: Vec<LineRole> = (0..5).map(|i| role(i, 5)).collect();
        assert_eq!(
            roles,
            vec![
                LineRole::Low,
                LineRole::Low,
                LineRole::Mid,
                LineRole::High,
                LineRole::High
            ]
        );
    }

    #[test]
    fn test_longer_series() {
        // median 1.5, both inner curves are within half a step
        let roles: Vec<LineRole> = (0..4).map(|i| role(i, 4)).collect();
        assert_eq!(
            roles,
            vec![LineRole::Low, LineRole::Mid, LineRole::Mid, LineRole::High]
        );
        // nine mu values: only 0.5 is mid
        let roles: Vec<LineRole> = (0..9).map(|i| role(i, 9)).collect();
        assert_eq!(roles[3], LineRole::Low);
        assert_eq!(roles[4], LineRole::Mid);
        assert_eq!(roles[5], LineRole::High);
    }

    #[test]
    fn test_single_and_three() {
        assert_eq!(role(0, 1), LineRole::Mid);
        assert_eq!(role(0, 3), LineRole::Low);
        assert_eq!(role(1, 3), LineRole::Mid);
        assert_eq!(role(2, 3), LineRole::High);
    }

    #[test]
    fn test_display() {
        let names: Vec<String> = LineRole::iter().map(|r| r.to_string()).collect();
        assert_eq!(names, vec!["low", "mid", "high"]);
    }
}
