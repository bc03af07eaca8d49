//! Integer coercion for notification fields and the indexed-field array convention.
//!
//! Coercion is lossy on purpose: a malformed amount becomes `0` instead of failing the whole
//! notification. That suits display and best-effort accounting, not settlement reconciliation,
//! which should re-query the order.
//!
//! Indexed arrays are read up to a slot cap, [`MAX_INDEXED_SLOTS`] unless set with
//! [`IndexedFieldArray::with_max_slots`]. A count above the cap visits only the first
//! `max_slots` slots and logs a warning; slots past the cap are left exactly as received.

use serde_json::{Map, Value};

/// Default upper bound on slots visited for one indexed array.
pub const MAX_INDEXED_SLOTS: usize = 1024;

/// Coerces `record[field]` to an integer in place.
///
/// Absent and `null` fields are left alone. Anything that does not start with an integer
/// becomes `0`.
pub fn coerce_int(record: &mut Map<String, Value>, field: &str) {
    if let Some(value) = record.get_mut(field) {
        if !value.is_null() {
            *value = Value::from(lenient_int(value));
        }
    }
}

/// Integer reading of a JSON value with `parseInt`-like leniency.
pub fn lenient_int(value: &Value) -> i64 {
    match value {
        Value::Number(number) => number.as_i64().unwrap_or_else(|| {
            number
                .as_f64()
                .filter(|float| float.is_finite())
                .and_then(truncate_float)
                .unwrap_or_default()
        }),
        Value::String(text) => parse_leading_int(text),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => 0,
    }
}

/// Reads the longest leading integer of `text`: leading whitespace is skipped, one sign is
/// accepted, and parsing stops at the first non-digit. No digits, or a value out of `i64`
/// range, yields `0`.
pub fn parse_leading_int(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = unsigned
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        return 0;
    }
    let signed = if negative {
        format!("-{digits}")
    } else {
        digits
    };
    signed.parse().unwrap_or_default()
}

fn truncate_float(float: f64) -> Option<i64> {
    format!("{:.0}", float.trunc()).parse().ok()
}

/// Name of slot `index` of a field in the indexed-field convention.
pub fn indexed_field_name(base: &str, index: usize) -> String {
    format!("{base}_{index}")
}

/// A variable length array carried as numbered scalar fields.
///
/// On the wire an array of `n` elements with element fields `a` and `b` is `count_field = n`
/// plus `a_0, b_0, .., a_{n-1}, b_{n-1}`. A slot missing one of its fields has no value for it;
/// it is never treated as zero.
#[derive(Clone, Copy, Debug)]
pub struct IndexedFieldArray<'a> {
    count_field: &'a str,
    element_fields: &'a [&'a str],
    int_fields: &'a [&'a str],
    max_slots: usize,
}

impl<'a> IndexedFieldArray<'a> {
    pub const fn new(
        count_field: &'a str,
        element_fields: &'a [&'a str],
        int_fields: &'a [&'a str],
    ) -> Self {
        Self {
            count_field,
            element_fields,
            int_fields,
            max_slots: MAX_INDEXED_SLOTS,
        }
    }

    /// Overrides the slot cap.
    pub const fn with_max_slots(mut self, max_slots: usize) -> Self {
        self.max_slots = max_slots;
        self
    }

    pub fn max_slots(&self) -> usize {
        self.max_slots
    }

    pub fn count_field(&self) -> &'a str {
        self.count_field
    }

    /// Number of slots declared by the record, capped at [`Self::max_slots`]. Missing or
    /// non-numeric counts mean no slots.
    pub fn len(&self, record: &Map<String, Value>) -> usize {
        let declared = record
            .get(self.count_field)
            .filter(|value| !value.is_null())
            .map(lenient_int)
            .unwrap_or_default();
        let declared = usize::try_from(declared).unwrap_or_default();
        if declared > self.max_slots {
            tracing::warn!(
                count_field = self.count_field,
                declared,
                max_slots = self.max_slots,
                "Indexed array count above limit, slots past the limit are left untouched"
            );
        }
        declared.min(self.max_slots)
    }

    pub fn is_empty(&self, record: &Map<String, Value>) -> bool {
        self.len(record) == 0
    }

    /// Coerces the integer element fields of every declared slot.
    pub fn coerce_ints(&self, record: &mut Map<String, Value>) {
        for index in 0..self.len(record) {
            for field in self.int_fields {
                coerce_int(record, &indexed_field_name(field, index));
            }
        }
    }

    /// Collects each declared slot into its own mapping keyed by the unsuffixed field name.
    /// Fields absent from a slot are absent from its mapping.
    pub fn decode(&self, record: &Map<String, Value>) -> Vec<Map<String, Value>> {
        (0..self.len(record))
            .map(|index| {
                self.element_fields
                    .iter()
                    .filter_map(|field| {
                        record
                            .get(&indexed_field_name(field, index))
                            .map(|value| ((*field).to_string(), value.clone()))
                    })
                    .collect()
            })
            .collect()
    }

    /// Writes `elements` into `record` as numbered fields plus the count field.
    ///
    /// Numbered fields from a previous, longer encoding are removed first.
    pub fn encode(&self, record: &mut Map<String, Value>, elements: &[Map<String, Value>]) {
        for index in 0..self.len(record) {
            for field in self.element_fields {
                record.remove(&indexed_field_name(field, index));
            }
        }
        for (index, element) in elements.iter().enumerate() {
            for field in self.element_fields {
                if let Some(value) = element.get(*field) {
                    record.insert(indexed_field_name(field, index), value.clone());
                }
            }
        }
        record.insert(self.count_field.to_string(), Value::from(elements.len()));
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    const COUPONS: IndexedFieldArray<'static> = IndexedFieldArray::new(
        "coupon_count",
        &["coupon_type", "coupon_id", "coupon_fee"],
        &["coupon_type", "coupon_fee"],
    );

    fn record(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("100"), 100);
        assert_eq!(parse_leading_int("  42"), 42);
        assert_eq!(parse_leading_int("-7"), -7);
        assert_eq!(parse_leading_int("+8"), 8);
        assert_eq!(parse_leading_int("12abc"), 12);
        assert_eq!(parse_leading_int("1.9"), 1);
        assert_eq!(parse_leading_int("abc"), 0);
        assert_eq!(parse_leading_int(""), 0);
        assert_eq!(parse_leading_int("-"), 0);
        assert_eq!(parse_leading_int("99999999999999999999999"), 0);
    }

    #[test]
    fn test_coerce_int_presence_rules() {
        let mut fields = record(json!({
            "total_fee": "abc",
            "cash_fee": "88",
            "coupon_fee": null,
            "already": 5,
            "float": 3.7,
            "flag": true,
        }));
        for field in [
            "total_fee",
            "cash_fee",
            "coupon_fee",
            "missing",
            "already",
            "float",
            "flag",
        ] {
            coerce_int(&mut fields, field);
        }

        assert_eq!(fields.get("total_fee"), Some(&json!(0)));
        assert_eq!(fields.get("cash_fee"), Some(&json!(88)));
        assert_eq!(fields.get("coupon_fee"), Some(&Value::Null));
        assert!(!fields.contains_key("missing"));
        assert_eq!(fields.get("already"), Some(&json!(5)));
        assert_eq!(fields.get("float"), Some(&json!(3)));
        assert_eq!(fields.get("flag"), Some(&json!(0)));
    }

    #[test]
    fn test_sparse_slots_stay_absent() {
        let mut fields = record(json!({
            "coupon_count": "2",
            "coupon_type_0": "1",
            "coupon_fee_1": "50",
        }));
        COUPONS.coerce_ints(&mut fields);

        assert_eq!(fields.get("coupon_type_0"), Some(&json!(1)));
        assert_eq!(fields.get("coupon_fee_1"), Some(&json!(50)));
        assert!(!fields.contains_key("coupon_fee_0"));
        assert!(!fields.contains_key("coupon_type_1"));
    }

    #[test]
    fn test_count_bounds_iteration() {
        let mut fields = record(json!({
            "coupon_count": "1",
            "coupon_fee_0": "10",
            "coupon_fee_1": "20",
        }));
        COUPONS.coerce_ints(&mut fields);
        assert_eq!(fields.get("coupon_fee_0"), Some(&json!(10)));
        assert_eq!(fields.get("coupon_fee_1"), Some(&json!("20")));

        for count in [json!("many"), json!(-3), Value::Null] {
            let fields = record(json!({ "coupon_count": count, "coupon_fee_0": "10" }));
            assert_eq!(COUPONS.len(&fields), 0);
        }
        assert!(COUPONS.is_empty(&Map::new()));
        assert_eq!(COUPONS.len(&record(json!({ "coupon_count": 5000 }))), MAX_INDEXED_SLOTS);
    }

    #[test]
    fn test_slots_past_the_cap_are_left_untouched() {
        let mut fields = record(json!({
            "coupon_count": "1025",
            "coupon_fee_0": "1",
            "coupon_fee_1023": "2",
            "coupon_fee_1024": "3",
        }));
        let mut wide = fields.clone();

        COUPONS.coerce_ints(&mut fields);
        assert_eq!(fields.get("coupon_fee_0"), Some(&json!(1)));
        assert_eq!(fields.get("coupon_fee_1023"), Some(&json!(2)));
        assert_eq!(fields.get("coupon_fee_1024"), Some(&json!("3")));

        let uncapped = COUPONS.with_max_slots(2048);
        assert_eq!(uncapped.max_slots(), 2048);
        uncapped.coerce_ints(&mut wide);
        assert_eq!(wide.get("coupon_fee_1024"), Some(&json!(3)));
        assert_eq!(uncapped.len(&wide), 1025);
    }

    #[test]
    fn test_decode_and_encode() {
        let fields = record(json!({
            "coupon_count": 2,
            "coupon_id_0": "c-1",
            "coupon_fee_0": 30,
            "coupon_fee_1": 20,
        }));
        let slots = COUPONS.decode(&fields);
        assert_eq!(slots.len(), 2);
        assert_eq!(slots.first(), Some(&record(json!({ "coupon_id": "c-1", "coupon_fee": 30 }))));
        assert_eq!(slots.get(1), Some(&record(json!({ "coupon_fee": 20 }))));

        let mut rewritten = fields.clone();
        COUPONS.encode(&mut rewritten, slots.get(1..).unwrap_or_default());
        assert_eq!(
            rewritten,
            record(json!({ "coupon_count": 1, "coupon_fee_0": 20 }))
        );
    }

    proptest! {
        #[test]
        fn test_coercion_is_idempotent(
            total_fee in proptest::option::of("[-+ ]?[0-9a-z.]{0,8}"),
            coupon_count in "[0-9]{0,1}|x",
            coupon_fee_0 in proptest::option::of("[0-9]{0,4}[a-z]?"),
        ) {
            let mut fields = Map::new();
            if let Some(total_fee) = total_fee {
                fields.insert("total_fee".to_string(), Value::from(total_fee));
            }
            fields.insert("coupon_count".to_string(), Value::from(coupon_count));
            if let Some(coupon_fee_0) = coupon_fee_0 {
                fields.insert("coupon_fee_0".to_string(), Value::from(coupon_fee_0));
            }

            let coerce = |fields: &mut Map<String, Value>| {
                coerce_int(fields, "total_fee");
                coerce_int(fields, "coupon_count");
                COUPONS.coerce_ints(fields);
            };

            let mut once = fields.clone();
            coerce(&mut once);
            let mut twice = once.clone();
            coerce(&mut twice);
            prop_assert_eq!(once, twice);
        }
    }
}
