//! Money helpers using rust_decimal
//!
//! Menu prices are whole currency units. Arithmetic stays in `Decimal`
//! and is rounded to units only when a figure leaves the cart.

use rust_decimal::prelude::*;

/// Round a monetary value to whole units (half away from zero)
#[inline]
pub fn round_to_unit(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Display format for prices: symbol, grouped thousands, no fraction digits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceFormat {
    pub symbol: String,
    pub thousands_separator: char,
}

impl Default for PriceFormat {
    fn default() -> Self {
        Self {
            symbol: "$".to_string(),
            thousands_separator: '.',
        }
    }
}

impl PriceFormat {
    /// `12400.4` -> `$12.400`, `-1500` -> `-$1.500`
    pub fn format(&self, amount: Decimal) -> String {
        let rounded = round_to_unit(amount);
        let digits = rounded.abs().trunc().to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(self.thousands_separator);
            }
            grouped.push(ch);
        }

        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        format!("{}{}{}", sign, self.symbol, grouped)
    }
}

/// Format with the default [`PriceFormat`]
pub fn format_price(amount: Decimal) -> String {
    PriceFormat::default().format(amount)
}
