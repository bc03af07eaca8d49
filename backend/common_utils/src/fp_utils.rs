//! Functional programming utilities

use crate::consts::{ALPHABETS, NONCE_LENGTH};

/// The Applicative trait provides a pure behavior,
/// which can be used to create values of type f a from values of type a.
pub trait Applicative<R> {
    /// The Associative type acts as a (f a) wrapper for Self.
    type WrappedSelf<T>;

    /// Applicative::pure(_) is abstraction with lifts any arbitrary type to underlying higher
    /// order type
    fn pure(v: R) -> Self::WrappedSelf<R>;
}

impl<R> Applicative<R> for Option<R> {
    type WrappedSelf<T> = Option<T>;
    fn pure(v: R) -> Self::WrappedSelf<R> {
        Some(v)
    }
}

impl<R, E> Applicative<R> for Result<R, E> {
    type WrappedSelf<T> = Result<T, E>;
    fn pure(v: R) -> Self::WrappedSelf<R> {
        Ok(v)
    }
}

/// based on the condition provided into the `predicate`
pub fn when<W: Applicative<(), WrappedSelf<()> = W>, F>(predicate: bool, f: F) -> W
where
    F: FnOnce() -> W,
{
    if predicate {
        f()
    } else {
        W::pure(())
    }
}

/// Random string for the gateway's `nonce_str` field
#[inline]
pub fn generate_nonce_str() -> String {
    nanoid::nanoid!(NONCE_LENGTH, &ALPHABETS)
}

/// Renders `value` in `radix` (lowercase digits) and fits it to exactly `width` characters.
///
/// Shorter renderings are left padded with `'0'`. Longer renderings keep only the rightmost
/// `width` characters, so over-width values are silently truncated rather than rejected.
pub fn fit_width(value: u64, width: usize, radix: u32) -> String {
    let rendered = to_radix_string(value, radix);
    let len = rendered.len();
    if len >= width {
        rendered.chars().skip(len - width).collect()
    } else {
        format!("{}{rendered}", "0".repeat(width - len))
    }
}

fn to_radix_string(mut value: u64, radix: u32) -> String {
    let radix = radix.clamp(2, 36);
    let mut digits = Vec::new();
    loop {
        let digit = u32::try_from(value % u64::from(radix)).unwrap_or_default();
        digits.push(char::from_digit(digit, radix).unwrap_or('0'));
        value /= u64::from(radix);
        if value == 0 {
            break;
        }
    }
    digits.iter().rev().collect()
}
