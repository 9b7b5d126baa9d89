use image::Rgb;

// Viridis sampled at ten evenly spaced stops
const VIRIDIS: [[u8; 3]; 10] = [
    [0x44, 0x01, 0x54],
    [0x48, 0x28, 0x78],
    [0x3e, 0x49, 0x89],
    [0x31, 0x68, 0x8e],
    [0x26, 0x82, 0x8e],
    [0x1f, 0x9e, 0x89],
    [0x35, 0xb7, 0x79],
    [0x6e, 0xce, 0x58],
    [0xb5, 0xde, 0x2b],
    [0xfd, 0xe7, 0x25],
];

/// Linearly interpolated viridis colour for `t` in [0, 1]
pub fn viridis(t: f32) -> Rgb<u8> {
    let t = t.clamp(0.0, 1.0);
    let scaled = t * (VIRIDIS.len() - 1) as f32;
    let lower = scaled.floor() as usize;
    let upper = (lower + 1).min(VIRIDIS.len() - 1);
    let frac = scaled - lower as f32;

    let channel = |i: usize| {
        let a = VIRIDIS[lower][i] as f32;
        let b = VIRIDIS[upper][i] as f32;
        (a + (b - a) * frac).round() as u8
    };

    Rgb([channel(0), channel(1), channel(2)])
}

/// Alpha-blend `color` over `base` with coverage in 0..=255
pub fn blend(base: Rgb<u8>, color: Rgb<u8>, coverage: u8) -> Rgb<u8> {
    let alpha = coverage as f32 / 255.0;
    let mix = |i: usize| (base.0[i] as f32 * (1.0 - alpha) + color.0[i] as f32 * alpha).round() as u8;
    Rgb([mix(0), mix(1), mix(2)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_match_colour_map() {
        assert_eq!(viridis(0.0), Rgb([0x44, 0x01, 0x54]));
        assert_eq!(viridis(1.0), Rgb([0xfd, 0xe7, 0x25]));
        assert_eq!(viridis(7.0), viridis(1.0));
    }

    #[test]
    fn blend_respects_coverage() {
        let white = Rgb([255, 255, 255]);
        let black = Rgb([0, 0, 0]);
        assert_eq!(blend(white, black, 0), white);
        assert_eq!(blend(white, black, 255), black);
        assert_eq!(blend(white, black, 128), Rgb([127, 127, 127]));
    }
}
