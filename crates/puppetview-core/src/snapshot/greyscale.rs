//! Greyscale conversion using ITU-R BT.709 coefficients.
//!
//! Luminance is computed in linear light: each channel is gamma-expanded
//! first and the weighted sum is gamma-compressed back to display space.

use super::Snapshot;

/// ITU-R BT.709 coefficient for red channel in luminance calculation.
pub const LUMINANCE_R: f64 = 0.2126;

/// ITU-R BT.709 coefficient for green channel in luminance calculation.
pub const LUMINANCE_G: f64 = 0.7152;

/// ITU-R BT.709 coefficient for blue channel in luminance calculation.
pub const LUMINANCE_B: f64 = 0.0722;

/// Display gamma assumed for 8-bit channel values.
pub const GAMMA: f64 = 2.2;

/// Grey level (0-255) of an 8-bit RGB color. Fractional levels are
/// truncated.
#[inline]
pub fn grey_level(r: u8, g: u8, b: u8) -> u8 {
    let linear = |c: u8| (f64::from(c) / 255.0).powf(GAMMA);
    let lum = LUMINANCE_R * linear(r) + LUMINANCE_G * linear(g) + LUMINANCE_B * linear(b);
    (255.0 * lum.powf(1.0 / GAMMA)).clamp(0.0, 255.0) as u8
}

/// Produce a greyscale copy of `image`, keeping the RGB layout.
pub fn to_greyscale(image: &Snapshot) -> Snapshot {
    let pixels = image
        .pixels()
        .chunks_exact(3)
        .flat_map(|px| {
            let v = grey_level(px[0], px[1], px[2]);
            [v, v, v]
        })
        .collect();
    Snapshot::from_parts(image.width(), image.height(), pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coefficients_sum_to_one() {
        let sum = LUMINANCE_R + LUMINANCE_G + LUMINANCE_B;
        assert!((sum - 1.0).abs() < 1e-9, "Coefficients should sum to 1.0");
    }

    #[test]
    fn test_extremes() {
        assert_eq!(grey_level(255, 255, 255), 255);
        assert_eq!(grey_level(0, 0, 0), 0);
    }

    #[test]
    fn test_gray_preserves_value() {
        for v in [0u8, 64, 128, 192, 255] {
            let lum = grey_level(v, v, v);
            assert!(
                (lum as i32 - v as i32).abs() <= 1,
                "Gray {} should stay ~{}, got {}",
                v,
                v,
                lum
            );
        }
    }

    #[test]
    fn test_green_brighter_than_blue() {
        assert!(grey_level(0, 255, 0) > grey_level(255, 0, 0));
        assert!(grey_level(255, 0, 0) > grey_level(0, 0, 255));
    }

    #[test]
    fn test_pure_red_in_linear_light() {
        // 255 * 0.2126^(1/2.2) ~= 126.2
        assert_eq!(grey_level(255, 0, 0), 126);
    }

    #[test]
    fn test_levels_are_truncated() {
        // 255 * 0.7152^(1/2.2) ~= 218.96
        assert_eq!(grey_level(0, 255, 0), 218);
        // ~= 98.94
        assert_eq!(grey_level(200, 0, 0), 98);
        // ~= 63.77
        assert_eq!(grey_level(100, 50, 25), 63);
    }

    #[test]
    fn test_to_greyscale_keeps_layout() {
        let img = Snapshot::new(2, 1, vec![255, 0, 0, 10, 10, 10]).unwrap();
        let grey = to_greyscale(&img);

        assert_eq!(grey.width(), 2);
        assert_eq!(grey.height(), 1);
        let [r, g, b] = grey.pixel(0, 0).unwrap();
        assert_eq!(r, g);
        assert_eq!(g, b);
    }
}
