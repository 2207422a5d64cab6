//! CIEDE2000 color difference (ΔE00)
//!
//! Implements the CIE 2000 formula with kL = kC = kH = 1, working in
//! degrees for hue angles. The degenerate branches (either chroma zero,
//! hue difference wrapping past ±180°) follow the CIE recommendation as
//! written up by Sharma, Wu & Dalal (2005), whose reference data the tests
//! reproduce.

use crate::color::Lab;

/// 25⁷, the chroma normalizer shared by G and R_C.
const POW25_7: f64 = 6_103_515_625.0;

#[inline]
fn hue_degrees(b: f64, a_prime: f64) -> f64 {
    b.atan2(a_prime).to_degrees().rem_euclid(360.0)
}

#[inline]
fn cos_deg(deg: f64) -> f64 {
    deg.to_radians().cos()
}

/// CIEDE2000 difference between two Lab colors.
///
/// Returns a non-negative value; identical inputs give exactly 0.0.
///
/// # Example
///
/// ```
/// use palette_match::{ciede2000, Lab, Srgb};
///
/// let red = Lab::from(Srgb::from_u8(255, 0, 0));
/// let orange = Lab::from(Srgb::from_u8(255, 128, 0));
/// assert_eq!(ciede2000(red, red), 0.0);
/// assert!(ciede2000(red, orange) > 10.0);
/// ```
pub fn ciede2000(lab1: Lab, lab2: Lab) -> f64 {
    let (l1, a1, b1) = (lab1.l, lab1.a, lab1.b);
    let (l2, a2, b2) = (lab2.l, lab2.a, lab2.b);

    // a' correction for the neutral axis
    let c_avg = (a1.hypot(b1) + a2.hypot(b2)) / 2.0;
    let c_avg_7 = c_avg.powi(7);
    let g = 0.5 * (1.0 - (c_avg_7 / (c_avg_7 + POW25_7)).sqrt());
    let a1_prime = a1 * (1.0 + g);
    let a2_prime = a2 * (1.0 + g);

    let c1_prime = a1_prime.hypot(b1);
    let c2_prime = a2_prime.hypot(b2);
    let h1_prime = hue_degrees(b1, a1_prime);
    let h2_prime = hue_degrees(b2, a2_prime);

    let delta_l = l2 - l1;
    let delta_c = c2_prime - c1_prime;

    let chroma_product = c1_prime * c2_prime;
    let raw_dh = h2_prime - h1_prime;
    let delta_h_angle = if chroma_product == 0.0 {
        0.0
    } else if raw_dh.abs() <= 180.0 {
        raw_dh
    } else if raw_dh > 180.0 {
        raw_dh - 360.0
    } else {
        raw_dh + 360.0
    };
    let delta_h = 2.0 * chroma_product.sqrt() * (delta_h_angle / 2.0).to_radians().sin();

    let l_avg = (l1 + l2) / 2.0;
    let c_avg_prime = (c1_prime + c2_prime) / 2.0;

    let h_sum = h1_prime + h2_prime;
    let h_avg = if chroma_product == 0.0 {
        h_sum
    } else if (h1_prime - h2_prime).abs() <= 180.0 {
        h_sum / 2.0
    } else if h_sum < 360.0 {
        (h_sum + 360.0) / 2.0
    } else {
        (h_sum - 360.0) / 2.0
    };

    let t = 1.0 - 0.17 * cos_deg(h_avg - 30.0)
        + 0.24 * cos_deg(2.0 * h_avg)
        + 0.32 * cos_deg(3.0 * h_avg + 6.0)
        - 0.20 * cos_deg(4.0 * h_avg - 63.0);

    let l_mid_sq = (l_avg - 50.0).powi(2);
    let s_l = 1.0 + 0.015 * l_mid_sq / (20.0 + l_mid_sq).sqrt();
    let s_c = 1.0 + 0.045 * c_avg_prime;
    let s_h = 1.0 + 0.015 * c_avg_prime * t;

    let c_avg_prime_7 = c_avg_prime.powi(7);
    let r_c = 2.0 * (c_avg_prime_7 / (c_avg_prime_7 + POW25_7)).sqrt();
    let delta_theta = 30.0 * (-((h_avg - 275.0) / 25.0).powi(2)).exp();
    let r_t = -(2.0 * delta_theta).to_radians().sin() * r_c;

    let l_term = delta_l / s_l;
    let c_term = delta_c / s_c;
    let h_term = delta_h / s_h;

    // The rotation term can push the sum a hair below zero for
    // near-identical colors.
    (l_term * l_term + c_term * c_term + h_term * h_term + r_t * c_term * h_term)
        .max(0.0)
        .sqrt()
}
