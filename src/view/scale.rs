use glam::Vec2;

/// Shrink image dimensions to display units by their order of magnitude.
///
/// With `n` the decimal digit count of the larger side, both sides are
/// divided by `10^(n - 0.5)`, which puts the larger side in
/// `[10^-0.5, 10^0.5)` and keeps the aspect ratio. Sizes jump visibly at
/// powers of ten. Returns `None` if either side is zero.
pub fn normalized_scale(width: u32, height: u32) -> Option<Vec2> {
    if width == 0 || height == 0 {
        return None;
    }

    let digits = width.max(height).ilog10() + 1;
    let divisor = 10f64.powf(digits as f64 - 0.5);

    Some(Vec2::new(
        (width as f64 / divisor) as f32,
        (height as f64 / divisor) as f32,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOWER: f32 = 0.316;
    const UPPER: f32 = 3.1623;

    fn check(w: u32, h: u32) {
        let s = normalized_scale(w, h).expect("positive sides");
        let larger = s.x.max(s.y);
        assert!(
            (LOWER..UPPER).contains(&larger),
            "{w}x{h} -> {s:?} out of range"
        );
        let expected = w as f64 / h as f64;
        let got = s.x as f64 / s.y as f64;
        assert!(
            ((got - expected) / expected).abs() < 1e-5,
            "{w}x{h} ratio {got} != {expected}"
        );
    }

    #[test]
    fn zero_side_has_no_scale() {
        assert_eq!(normalized_scale(0, 10), None);
        assert_eq!(normalized_scale(10, 0), None);
        assert_eq!(normalized_scale(0, 0), None);
    }

    #[test]
    fn default_placeholder_scale() {
        let s = normalized_scale(500, 500).expect("positive sides");
        let expected = 500.0 / 10f32.powf(2.5);
        assert!((s.x - expected).abs() < 1e-5);
        assert_eq!(s.x, s.y);
    }

    #[test]
    fn decade_boundaries() {
        // 999 and 1000 straddle a digit-count change.
        let below = normalized_scale(999, 1).expect("positive sides");
        let above = normalized_scale(1000, 1).expect("positive sides");
        assert!(below.x > above.x);
        check(1, 1);
        check(9, 1);
        check(10, 1);
        check(u32::MAX, 1);
    }

    #[test]
    fn ratio_and_range_hold_across_sizes() {
        let sides = [1u32, 2, 3, 7, 10, 99, 100, 101, 480, 600, 800, 1920, 4096, 65_535, 1_000_000];
        for &w in &sides {
            for &h in &sides {
                check(w, h);
            }
        }
    }

    #[test]
    fn larger_side_is_the_one_normalized() {
        let s = normalized_scale(800, 600).expect("positive sides");
        assert!(s.x > s.y);
        let s = normalized_scale(600, 800).expect("positive sides");
        assert!(s.y > s.x);
    }
}
