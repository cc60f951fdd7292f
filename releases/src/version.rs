use std::cmp::Ordering;

/// Numeric value of one dotted segment. Leading digits count, anything else reads as 0.
/// Values too large for `u64` saturate.
fn segment_value(segment: &str) -> u64 {
    let digits: String = segment
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u64::MAX)
}

/// Dotted-numeric comparison: `1.10.0` is greater than `1.9.0`, missing trailing segments are 0.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let left: Vec<u64> = a.split('.').map(segment_value).collect();
    let right: Vec<u64> = b.split('.').map(segment_value).collect();
    let len = left.len().max(right.len());

    (0..len)
        .map(|i| {
            let l = left.get(i).copied().unwrap_or(0);
            let r = right.get(i).copied().unwrap_or(0);
            l.cmp(&r)
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_not_lexical() {
        assert_eq!(compare_versions("1.10.0", "1.9.0"), Ordering::Greater);
        assert_eq!(compare_versions("1.9.0", "1.10.0"), Ordering::Less);
    }

    #[test]
    fn test_missing_segments_are_zero() {
        assert_eq!(compare_versions("2.0", "2.0.0"), Ordering::Equal);
        assert_eq!(compare_versions("2", "2.0.1"), Ordering::Less);
    }

    #[test]
    fn test_non_numeric_segments() {
        assert_eq!(compare_versions("1.0.0-rc1", "1.0.0"), Ordering::Equal);
        assert_eq!(compare_versions("1.x", "1.0"), Ordering::Equal);
        assert_eq!(compare_versions("1.2rc", "1.1"), Ordering::Greater);
    }

    #[test]
    fn test_oversized_segments_saturate() {
        assert_eq!(
            compare_versions("1.99999999999999999999999", "1.0"),
            Ordering::Greater
        );
        assert_eq!(
            compare_versions("1.99999999999999999999999", "1.18446744073709551614"),
            Ordering::Greater
        );
        assert_eq!(compare_versions("1.000000000000000000000007", "1.7"), Ordering::Equal);
    }
}
