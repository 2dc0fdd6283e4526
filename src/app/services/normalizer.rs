//! Value normalization for instrument-reported results
//!
//! Rounds raw textual values to the target parameter's configured decimal
//! precision before storage. Parsing is tolerant: a value that is not
//! numeric passes through unmodified with a recoverable warning, so one
//! unparseable analyte never aborts the rest of a message.

/// A normalized value plus an optional recoverable warning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub value: String,
    pub warning: Option<String>,
}

impl Normalized {
    fn clean(value: String) -> Self {
        Self {
            value,
            warning: None,
        }
    }

    fn passthrough(raw: &str, warning: String) -> Self {
        Self {
            value: raw.to_string(),
            warning: Some(warning),
        }
    }
}

/// Normalize a raw value against a parameter's precision.
///
/// With no precision configured the value is stored exactly as
/// transmitted. With a precision, numeric values are rounded half-up;
/// `precision == 0` renders integer form with no decimal point.
pub fn normalize(precision: Option<u32>, raw: &str) -> Normalized {
    let Some(precision) = precision else {
        return Normalized::clean(raw.to_string());
    };

    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Normalized::clean(round_half_up(value, precision)),
        Ok(_) => Normalized::passthrough(
            raw,
            format!("value '{raw}' is not a finite number; stored unmodified"),
        ),
        Err(_) => Normalized::passthrough(
            raw,
            format!("value '{raw}' is not numeric; stored unmodified"),
        ),
    }
}

/// Unwrap enum-style encoded values for display.
///
/// Select-type parameters store their options as `select**chosen**...`;
/// the displayable value is the first encoded component. Plain values
/// pass through untouched. This is the read-side accessor shared by every
/// surface that renders stored values; the instrument write path never
/// produces the encoded form.
pub fn display_value(stored: &str) -> &str {
    match stored.strip_prefix("select**") {
        Some(rest) => rest.split("**").next().unwrap_or(rest),
        None => stored,
    }
}

/// Round half-up to `precision` decimal places and render as text.
///
/// The decimal rendering works on a scaled integer because float
/// formatting rounds ties to even, which disagrees with the half-up
/// contract for values like 0.125 at two decimals.
fn round_half_up(value: f64, precision: u32) -> String {
    // Beyond ~15 digits f64 carries no information; 12 keeps the scaled
    // integer comfortably inside i64
    let precision = precision.min(12);
    let scale = 10f64.powi(precision as i32);
    // f64::round is half away from zero, which is half-up in magnitude
    let scaled = (value * scale).round();

    if precision == 0 {
        return format!("{}", scaled as i64);
    }

    let negative = scaled < 0.0;
    let magnitude = scaled.abs() as i64;
    let base = 10i64.pow(precision);
    let integer = magnitude / base;
    let fraction = magnitude % base;

    format!(
        "{}{}.{:0width$}",
        if negative { "-" } else { "" },
        integer,
        fraction,
        width = precision as usize
    )
}
