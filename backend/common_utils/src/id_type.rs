//! Merchant side identifiers for orders and refunds

use std::fmt;

use chrono::{Datelike, Local, Timelike};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    consts::{
        DEFAULT_TRADE_NO_PREFIX, TRADE_NO_CHANNEL, TRADE_NO_RANDOM_MAX, TRADE_NO_RANDOM_WIDTH,
        TRADE_NO_TIME_COMPONENT_WIDTH,
    },
    fp_utils::fit_width,
};

/// Merchant generated trade or refund number.
///
/// Layout: `{prefix}{YYMMDDhhmmss}{channel}{rand36 x3}{rand36 x3}`. The timestamp part makes
/// numbers sortable per process; the two random suffixes separate numbers issued within the
/// same second.
#[derive(Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeNo(String);

impl TradeNo {
    /// Generate a trade number from the local clock, falling back to the `WX` prefix.
    pub fn generate(prefix: Option<&str>) -> Self {
        Self::generate_at(prefix, &Local::now(), &mut rand::thread_rng())
    }

    /// Generate a trade number for a given instant and random source.
    pub fn generate_at<T, R>(prefix: Option<&str>, now: &T, rng: &mut R) -> Self
    where
        T: Datelike + Timelike,
        R: Rng + ?Sized,
    {
        let prefix = match prefix {
            Some(prefix) if !prefix.is_empty() => prefix,
            _ => DEFAULT_TRADE_NO_PREFIX,
        };

        let year = u64::try_from(now.year().rem_euclid(100)).unwrap_or_default();
        let time_components = [
            year,
            u64::from(now.month()),
            u64::from(now.day()),
            u64::from(now.hour()),
            u64::from(now.minute()),
            u64::from(now.second()),
        ];

        let mut trade_no = String::from(prefix);
        for component in time_components {
            trade_no.push_str(&fit_width(component, TRADE_NO_TIME_COMPONENT_WIDTH, 10));
        }
        trade_no.push_str(TRADE_NO_CHANNEL);
        for _ in 0..2 {
            let draw = rng.gen_range(0..=TRADE_NO_RANDOM_MAX);
            trade_no.push_str(&fit_width(draw, TRADE_NO_RANDOM_WIDTH, 36));
        }

        Self(trade_no)
    }

    /// Length of any trade number issued with `prefix`.
    pub fn expected_len(prefix: &str) -> usize {
        prefix.len()
            + 6 * TRADE_NO_TIME_COMPONENT_WIDTH
            + TRADE_NO_CHANNEL.len()
            + 2 * TRADE_NO_RANDOM_WIDTH
    }

    pub fn get_string_repr(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for TradeNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TradeNo").field(&self.0).finish()
    }
}

impl fmt::Display for TradeNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TradeNo {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<TradeNo> for String {
    fn from(value: TradeNo) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::NaiveDate;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn is_base36(c: char) -> bool {
        c.is_ascii_digit() || c.is_ascii_lowercase()
    }

    #[test]
    fn test_layout_for_fixed_instant() {
        let instant = NaiveDate::from_ymd_opt(2024, 3, 7)
            .and_then(|date| date.and_hms_opt(9, 5, 1))
            .unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let trade_no = TradeNo::generate_at(Some("AB"), &instant, &mut rng);
        let repr = trade_no.get_string_repr();

        assert!(repr.starts_with("AB24030709050101"), "unexpected layout: {repr}");
        assert_eq!(repr.len(), TradeNo::expected_len("AB"));
        assert!(repr.chars().skip(16).all(is_base36));
    }

    #[test]
    fn test_default_prefix() {
        let trade_no = TradeNo::generate(None);
        assert!(trade_no.get_string_repr().starts_with(DEFAULT_TRADE_NO_PREFIX));
        assert_eq!(trade_no.get_string_repr().len(), TradeNo::expected_len("WX"));

        let trade_no = TradeNo::generate(Some(""));
        assert!(trade_no.get_string_repr().starts_with(DEFAULT_TRADE_NO_PREFIX));
    }

    #[test]
    fn test_years_past_century_keep_two_digits() {
        let instant = NaiveDate::from_ymd_opt(2100, 12, 31)
            .and_then(|date| date.and_hms_opt(23, 59, 59))
            .unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let trade_no = TradeNo::generate_at(Some(""), &instant, &mut rng);
        assert!(trade_no.get_string_repr().starts_with("WX00123123595901"));
    }

    #[test]
    fn test_same_second_numbers_differ() {
        let instant = Local::now();
        let mut rng = rand::thread_rng();
        let issued: HashSet<_> = (0..1_000)
            .map(|_| TradeNo::generate_at(Some("WX"), &instant, &mut rng))
            .collect();
        // 2^40 suffix space; a handful of collisions across 1000 draws would indicate a bug
        assert!(issued.len() >= 998);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn test_shape_for_any_instant(
            prefix in "[A-Z]{0,4}",
            year in 1970i32..2400,
            month in 1u32..=12,
            day in 1u32..=28,
            hour in 0u32..24,
            minute in 0u32..60,
            second in 0u32..60,
            seed in any::<u64>(),
        ) {
            let instant = NaiveDate::from_ymd_opt(year, month, day)
                .and_then(|date| date.and_hms_opt(hour, minute, second))
                .unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            let trade_no = TradeNo::generate_at(Some(&prefix), &instant, &mut rng);
            let used_prefix = if prefix.is_empty() {
                DEFAULT_TRADE_NO_PREFIX
            } else {
                prefix.as_str()
            };
            let repr = trade_no.get_string_repr();

            prop_assert_eq!(repr.len(), TradeNo::expected_len(used_prefix));
            prop_assert!(repr.starts_with(used_prefix));
            let rest: String = repr.chars().skip(used_prefix.len()).collect();
            prop_assert!(rest.chars().take(12).all(|c| c.is_ascii_digit()));
            prop_assert_eq!(rest.get(12..14), Some(TRADE_NO_CHANNEL));
            prop_assert!(rest.chars().skip(14).all(is_base36));
        }
    }
}
