/// `part / total * 100`, or 0 when nothing has been counted yet.
pub fn percentage(part: u64, total: u64) -> f64 {
    match total {
        0 => 0.0,
        total => part as f64 / total as f64 * 100.0,
    }
}

/// `sum / count`, or 0 for an empty bucket.
pub fn average(sum: u64, count: u64) -> f64 {
    match count {
        0 => 0.0,
        count => sum as f64 / count as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(1, 4), 25.0);
        assert_eq!(percentage(3, 3), 100.0);
    }

    #[test]
    fn test_percentage_empty() {
        assert_eq!(percentage(0, 0), 0.0);
    }

    #[test]
    fn test_average() {
        assert_eq!(average(1500, 3), 500.0);
        assert_eq!(average(1, 2), 0.5);
    }

    #[test]
    fn test_average_empty() {
        assert_eq!(average(0, 0), 0.0);
    }
}
