/// Bar heights for the stats charts; bars carry whole numbers.
pub fn bar_values(values: &[f64]) -> Vec<u64> {
    values.iter().map(|v| v.max(0.0).round() as u64).collect()
}

/// Width of each bar so `count` bars with a one-cell gap fit inside a bordered
/// block of `area_width`.
pub fn bar_width(area_width: u16, count: usize) -> u16 {
    if count == 0 {
        return 1;
    }
    let inner = area_width.saturating_sub(2) as usize;
    let per_bar = inner / count;
    per_bar.saturating_sub(1).clamp(1, 6) as u16
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_values_round() {
        assert_eq!(bar_values(&[0.0, 33.333, 66.7, 100.0]), vec![0, 33, 67, 100]);
    }

    #[test]
    fn test_bar_width_fits_area() {
        // 10 bars in 62 columns: 60 inner, 6 each, 5 wide plus gap
        assert_eq!(bar_width(62, 10), 5);
        assert_eq!(bar_width(20, 25), 1);
        assert_eq!(bar_width(200, 2), 6);
        assert_eq!(bar_width(80, 0), 1);
    }

    #[test]
    fn test_format_label() {
        assert_eq!(format_label(1.0), "1");
        assert_eq!(format_label(1.2345), "1.23");
    }
}
