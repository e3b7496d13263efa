//! IBM System/360 hexadecimal floating point (SEG-Y sample format 1).
//!
//! A 32-bit IBM float is laid out as one sign bit, a 7-bit base-16 exponent
//! biased by 64, and a 24-bit fraction with the radix point to its left:
//!
//! ```text
//! value = (-1)^sign * 0.fraction * 16^(exponent - 64)
//! ```
//!
//! This is not IEEE-754. Reinterpreting the bits as an `f32` produces a
//! plausible looking but wrong value (`0x42650000` is 101.0 as IBM and 57.25
//! as IEEE).

/// 2^24, the scale of the 24-bit fraction.
const FRACTION_SCALE: f64 = 16_777_216.0;
const EXPONENT_BIAS: i32 = 64;

/// Convert a big-endian IBM float word to the nearest `f32`.
///
/// The conversion goes through `f64`, which holds every IBM single exactly.
/// IBM magnitudes beyond the `f32` range become infinities, and very small
/// ones flush towards zero through the usual IEEE rounding.
pub fn ibm_to_f32(word: u32) -> f32 {
    let negative = word & 0x8000_0000 != 0;
    let exponent = ((word >> 24) & 0x7F) as i32 - EXPONENT_BIAS;
    let fraction = word & 0x00FF_FFFF;

    if fraction == 0 {
        return if negative { -0.0 } else { 0.0 };
    }

    let magnitude = fraction as f64 / FRACTION_SCALE * 16f64.powi(exponent);
    let value = if negative { -magnitude } else { magnitude };
    value as f32
}

/// Convert an `f32` to an IBM float word, rounding to nearest.
///
/// Returns `None` for NaN and infinities, which IBM floats cannot express.
/// Every finite `f32` fits in the IBM exponent range.
pub fn f32_to_ibm(value: f32) -> Option<u32> {
    if !value.is_finite() {
        return None;
    }

    let sign = if value.is_sign_negative() { 0x8000_0000 } else { 0 };
    if value == 0.0 {
        return Some(sign);
    }

    // Normalize so that 1/16 <= fraction < 1. Scaling by 16 is exact.
    let mut fraction = (value as f64).abs();
    let mut exponent = EXPONENT_BIAS;
    while fraction >= 1.0 {
        fraction /= 16.0;
        exponent += 1;
    }
    while fraction < 0.0625 {
        fraction *= 16.0;
        exponent -= 1;
    }

    let mut mantissa = (fraction * FRACTION_SCALE).round() as u32;
    if mantissa > 0x00FF_FFFF {
        // Rounding carried into a new hex digit.
        mantissa >>= 4;
        exponent += 1;
    }

    if !(0..=0x7F).contains(&exponent) {
        return None;
    }

    Some(sign | ((exponent as u32) << 24) | mantissa)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn load_vectors(filename: &str) -> serde_json::Value {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("testdata")
            .join(filename);
        let content = std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));
        serde_json::from_str(&content).unwrap()
    }

    fn parse_word(s: &str) -> u32 {
        u32::from_str_radix(s.trim_start_matches("0x"), 16).unwrap()
    }

    #[test]
    fn test_worked_example() {
        assert_eq!(ibm_to_f32(0x4265_0000), 101.0);
    }

    #[test]
    fn test_differs_from_ieee_reinterpretation() {
        let ieee = f32::from_bits(0x4265_0000);
        assert_eq!(ieee, 57.25);
        assert_ne!(ibm_to_f32(0x4265_0000), ieee);
    }

    #[test]
    fn test_vectors_decode_and_encode() {
        let vectors = load_vectors("ibm_vectors.json");
        for v in vectors.as_array().unwrap() {
            let name = v["name"].as_str().unwrap();
            let word = parse_word(v["word"].as_str().unwrap());
            let value = v["value"].as_f64().unwrap() as f32;

            assert_eq!(ibm_to_f32(word), value, "{name}: decode");
            assert_eq!(f32_to_ibm(value), Some(word), "{name}: encode");
        }
    }

    #[test]
    fn test_zero_fraction_is_zero() {
        assert_eq!(ibm_to_f32(0x0000_0000), 0.0);
        // Exponent bits without fraction are still zero.
        assert_eq!(ibm_to_f32(0x4100_0000), 0.0);
        assert!(ibm_to_f32(0x8000_0000).is_sign_negative());
    }

    #[test]
    fn test_negative_zero_keeps_sign() {
        assert_eq!(f32_to_ibm(-0.0), Some(0x8000_0000));
        assert_eq!(f32_to_ibm(0.0), Some(0));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert_eq!(f32_to_ibm(f32::NAN), None);
        assert_eq!(f32_to_ibm(f32::INFINITY), None);
        assert_eq!(f32_to_ibm(f32::NEG_INFINITY), None);
    }

    #[test]
    fn test_out_of_f32_range_is_infinite() {
        assert_eq!(ibm_to_f32(0x7FFF_FFFF), f32::INFINITY);
        assert_eq!(ibm_to_f32(0xFFFF_FFFF), f32::NEG_INFINITY);
    }

    #[test]
    fn test_extremes_of_f32_encode() {
        for value in [f32::MAX, f32::MIN, f32::MIN_POSITIVE, 1.0e-40] {
            let word = f32_to_ibm(value).unwrap();
            let back = ibm_to_f32(word);
            let rel = ((back - value) / value).abs();
            assert!(rel < 1e-6, "{value}: got {back}");
        }
    }

    #[test]
    fn test_precision_within_ibm_fraction() {
        // IBM keeps 21-24 significant bits, so a round trip is within 2^-20.
        let mut x = 0.001f32;
        while x < 1.0e6 {
            let back = ibm_to_f32(f32_to_ibm(x).unwrap());
            assert!(((back - x) / x).abs() < 1.0e-6, "{x} -> {back}");
            x *= 1.37;
        }
    }
}
