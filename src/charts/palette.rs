use plotters::style::RGBColor;

/// Viridis sampled at nine evenly spaced stops.
const VIRIDIS: [(u8, u8, u8); 9] = [
    (68, 1, 84),
    (71, 44, 122),
    (59, 81, 139),
    (44, 113, 142),
    (33, 144, 141),
    (39, 173, 129),
    (92, 200, 99),
    (170, 220, 50),
    (253, 231, 37),
];

/// Default categorical cycle for line series.
pub const TAB10: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

pub const BROWN: RGBColor = RGBColor(165, 42, 42);
pub const DARK_GREEN: RGBColor = RGBColor(0, 128, 0);
pub const MISSING: RGBColor = RGBColor(200, 200, 200);

/// Colour at position `t` in [0, 1] along viridis (clamped).
pub fn viridis(t: f64) -> RGBColor {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (VIRIDIS.len() - 1) as f64;
    let lo = scaled.floor() as usize;
    let hi = (lo + 1).min(VIRIDIS.len() - 1);
    let frac = scaled - lo as f64;
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    let (a, b) = (VIRIDIS[lo], VIRIDIS[hi]);
    RGBColor(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

/// `n` discrete viridis colours, skipping both extremes.
pub fn viridis_steps(n: usize) -> Vec<RGBColor> {
    (1..=n).map(|i| viridis(i as f64 / (n + 1) as f64)).collect()
}

/// Dark text on the bright end of the map, light text on the dark end.
pub fn annotation_color(background: RGBColor) -> RGBColor {
    let luma = 0.299 * background.0 as f64 + 0.587 * background.1 as f64 + 0.114 * background.2 as f64;
    if luma > 140.0 {
        RGBColor(0, 0, 0)
    } else {
        RGBColor(255, 255, 255)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viridis_hits_its_endpoints() {
        assert_eq!(viridis(0.0), RGBColor(68, 1, 84));
        assert_eq!(viridis(1.0), RGBColor(253, 231, 37));
        assert_eq!(viridis(7.0), viridis(1.0));
    }

    #[test]
    fn steps_exclude_extremes() {
        let steps = viridis_steps(6);
        assert_eq!(steps.len(), 6);
        assert_ne!(steps[0], viridis(0.0));
        assert_ne!(steps[5], viridis(1.0));
    }

    #[test]
    fn annotation_contrasts_with_cell() {
        assert_eq!(annotation_color(viridis(0.0)), RGBColor(255, 255, 255));
        assert_eq!(annotation_color(viridis(1.0)), RGBColor(0, 0, 0));
    }
}
