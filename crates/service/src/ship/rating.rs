//! Server-side rating: `80 * speed * k / (3019 - year + 1)`, `k = 0.5` for used ships.
//!
//! Arithmetic and rounding run on decimals parsed from the shortest `f64` text, so a
//! value such as `0.145` rounds to `0.15` rather than following its binary approximation.

use models::ship::CURRENT_YEAR;
use rust_decimal::{Decimal, RoundingStrategy};

const RATING_SCALE: i64 = 80;
const SCALE: u32 = 2;

fn to_decimal(value: f64) -> Option<Decimal> {
    value.to_string().parse::<Decimal>().ok()
}

fn half_up(value: Decimal) -> f64 {
    let rounded = value.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.mantissa() as f64 / 10f64.powi(rounded.scale() as i32)
}

/// Round half-up to two decimal places.
pub fn round2(value: f64) -> f64 {
    match to_decimal(value) {
        Some(d) => half_up(d),
        None => (value * 100.0).round() / 100.0,
    }
}

/// `production_year` must already be validated (<= 3019), so the divisor is at least 1.
pub fn compute(speed: f64, is_used: bool, production_year: i32) -> f64 {
    let age = CURRENT_YEAR - production_year + 1;
    let k = if is_used { Decimal::new(5, 1) } else { Decimal::ONE };
    let exact = to_decimal(speed)
        .and_then(|s| s.checked_mul(Decimal::from(RATING_SCALE)))
        .and_then(|v| v.checked_mul(k))
        .and_then(|v| v.checked_div(Decimal::from(age)));
    match exact {
        Some(v) => half_up(v),
        None => {
            let k = if is_used { 0.5 } else { 1.0 };
            round2(RATING_SCALE as f64 * speed * k / f64::from(age))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::ship::MIN_PROD_YEAR;

    #[test]
    fn new_ship_from_current_year() {
        assert_eq!(compute(0.5, false, 3019), 40.0);
    }

    #[test]
    fn used_ship_halves_the_rating() {
        assert_eq!(compute(0.5, true, 3019), 20.0);
    }

    #[test]
    fn older_ships_rate_lower() {
        // 80 * 0.5 / 120 = 0.3333..
        assert_eq!(compute(0.5, false, 2900), 0.33);
        // 80 * 0.99 / 220 = 0.36
        assert_eq!(compute(0.99, false, 2800), 0.36);
        // 80 * 0.01 * 0.5 / 220 = 0.0018..
        assert_eq!(compute(0.01, true, 2800), 0.0);
    }

    #[test]
    fn round2_is_half_up_for_positive_values() {
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(0.124), 0.12);
        assert_eq!(round2(0.5), 0.5);
    }

    #[test]
    fn round2_uses_the_decimal_value_not_its_binary_form() {
        assert_eq!(round2(0.285), 0.29);
        assert_eq!(round2(0.145), 0.15);
        assert_eq!(round2(1.005), 1.01);
    }

    #[test]
    fn exact_midpoint_rating_rounds_up() {
        // 80 * 0.29 / 160 = 0.145
        assert_eq!(compute(0.29, false, 2860), 0.15);
    }

    #[test]
    fn every_valid_input_matches_integer_half_up() {
        for hundredths in 1..=99i64 {
            let speed = hundredths as f64 / 100.0;
            for year in MIN_PROD_YEAR..=CURRENT_YEAR {
                let age = i64::from(CURRENT_YEAR - year + 1);
                for is_used in [false, true] {
                    // rating * 100 = num / age
                    let num = if is_used { 40 * hundredths } else { 80 * hundredths };
                    let cents = (2 * num + age) / (2 * age);
                    let expected = cents as f64 / 100.0;
                    assert_eq!(
                        compute(speed, is_used, year),
                        expected,
                        "speed={speed} used={is_used} year={year}"
                    );
                }
            }
        }
    }
}
