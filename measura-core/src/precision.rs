//! Display precision and rounding policy
//!
//! Precision only affects how a value is rendered. The stored magnitude
//! is never rounded.

use serde::{Serialize, Deserialize};

/// Rounding applied when a value is displayed with fixed decimal digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Ties away from zero
    #[default]
    HalfUp,
    /// Ties toward zero
    HalfDown,
    /// Ties to the even neighbour
    HalfEven,
    /// Away from zero
    Up,
    /// Toward zero
    Down,
    /// Toward positive infinity
    Ceiling,
    /// Toward negative infinity
    Floor,
}

impl RoundingMode {
    /// Round `value` to `digits` decimal places
    pub fn round(&self, value: f64, digits: u32) -> f64 {
        if !value.is_finite() {
            return value;
        }
        let factor = 10f64.powi(digits as i32);
        let scaled = value * factor;
        if !scaled.is_finite() {
            return value;
        }
        let rounded = match self {
            RoundingMode::HalfUp => scaled.round(),
            RoundingMode::HalfDown => {
                let floor = scaled.trunc();
                if (scaled - floor).abs() > 0.5 { floor + scaled.signum() } else { floor }
            }
            RoundingMode::HalfEven => scaled.round_ties_even(),
            RoundingMode::Up => {
                if scaled >= 0.0 { scaled.ceil() } else { scaled.floor() }
            }
            RoundingMode::Down => scaled.trunc(),
            RoundingMode::Ceiling => scaled.ceil(),
            RoundingMode::Floor => scaled.floor(),
        };
        rounded / factor
    }
}

/// Render a number with `digits` fixed decimals, or the natural `f64`
/// representation when `digits` is `None`.
pub fn format_number(value: f64, digits: Option<u32>, rounding: RoundingMode) -> String {
    match digits {
        Some(d) => {
            let rounded = rounding.round(value, d);
            // Avoid "-0.00" after rounding a tiny negative value
            let rounded = if rounded == 0.0 { 0.0 } else { rounded };
            format!("{:.*}", d as usize, rounded)
        }
        None => format!("{}", value),
    }
}
