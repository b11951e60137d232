//! Validation for numeric user input.

use crate::HlError;

pub fn ensure_finite(v: f64, what: &'static str) -> Result<f64, HlError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(HlError::NonFinite { what, value: v })
    }
}

/// Finite and `>= 0`. Zero is a legitimate entry (no openings, no add-on).
pub fn ensure_non_negative(v: f64, what: &'static str) -> Result<f64, HlError> {
    let v = ensure_finite(v, what)?;
    if v < 0.0 {
        Err(HlError::Negative { what, value: v })
    } else {
        Ok(v)
    }
}

/// Finite and strictly positive.
pub fn ensure_positive(v: f64, what: &'static str) -> Result<f64, HlError> {
    let v = ensure_non_negative(v, what)?;
    if v == 0.0 {
        Err(HlError::InvalidArg { what })
    } else {
        Ok(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_names_the_field() {
        let err = ensure_finite(f64::NAN, "indoor temperature").unwrap_err();
        assert!(err.to_string().contains("indoor temperature"));
    }

    #[test]
    fn non_negative_accepts_zero() {
        assert_eq!(ensure_non_negative(0.0, "area").unwrap(), 0.0);
        assert!(matches!(
            ensure_non_negative(-1.0, "area"),
            Err(HlError::Negative { .. })
        ));
    }

    #[test]
    fn positive_rejects_zero() {
        assert!(ensure_positive(0.0, "thickness").is_err());
        assert!(ensure_positive(f64::INFINITY, "thickness").is_err());
        assert_eq!(ensure_positive(3.5, "thickness").unwrap(), 3.5);
    }
}
