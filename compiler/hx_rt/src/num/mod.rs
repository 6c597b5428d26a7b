//! Numeric helpers (`N.*`).
//!
//! Native target arithmetic is modelled as `i64`: on several Haxe targets an
//! `Int` expression may hold more than 32 bits until it is stored. The
//! narrowing helpers take that wide value and reproduce the source
//! language's truncation.
//!
//! Every function here corresponds to one helper name the code generator
//! emits; the name is the same without the `N.` prefix.

use crate::RtError;

// ── Narrowing ───────────────────────────────────────────────────────────

/// Truncate to 32-bit two's complement.
#[inline]
pub fn i(x: i64) -> i32 {
    x as i32
}

/// Truncate to 8 bits and sign-extend.
#[inline]
pub fn i2b(x: i64) -> i32 {
    i32::from(x as i8)
}

/// Truncate to 16 bits and sign-extend.
#[inline]
pub fn i2s(x: i64) -> i32 {
    i32::from(x as i16)
}

/// Truncate to 16 bits and zero-extend.
#[inline]
pub fn i2c(x: i64) -> i32 {
    i32::from(x as u16)
}

// ── 32-bit arithmetic ───────────────────────────────────────────────────

#[inline]
pub fn imul(a: i32, b: i32) -> i32 {
    a.wrapping_mul(b)
}

/// Truncating division. `MIN / -1` wraps to `MIN`.
pub fn idiv(a: i32, b: i32) -> Result<i32, RtError> {
    if b == 0 {
        return Err(RtError::DivisionByZero);
    }
    Ok(a.wrapping_div(b))
}

/// Remainder with the sign of the dividend.
pub fn irem(a: i32, b: i32) -> Result<i32, RtError> {
    if b == 0 {
        return Err(RtError::DivisionByZero);
    }
    Ok(a.wrapping_rem(b))
}

/// Left shift; only the low five bits of the distance count.
#[inline]
pub fn ishl(a: i32, b: i32) -> i32 {
    a.wrapping_shl(b as u32 & 31)
}

/// Arithmetic (sign-propagating) right shift.
#[inline]
pub fn ishr(a: i32, b: i32) -> i32 {
    a.wrapping_shr(b as u32 & 31)
}

/// Logical (zero-filling) right shift.
#[inline]
pub fn iushr(a: i32, b: i32) -> i32 {
    ((a as u32).wrapping_shr(b as u32 & 31)) as i32
}

// ── 64-bit arithmetic ───────────────────────────────────────────────────

/// Build a long from its high and low 32-bit halves.
#[inline]
pub fn lnew(high: i32, low: i32) -> i64 {
    (i64::from(high) << 32) | i64::from(low as u32)
}

#[inline]
pub fn ladd(a: i64, b: i64) -> i64 {
    a.wrapping_add(b)
}

#[inline]
pub fn lsub(a: i64, b: i64) -> i64 {
    a.wrapping_sub(b)
}

#[inline]
pub fn lmul(a: i64, b: i64) -> i64 {
    a.wrapping_mul(b)
}

pub fn ldiv(a: i64, b: i64) -> Result<i64, RtError> {
    if b == 0 {
        return Err(RtError::DivisionByZero);
    }
    Ok(a.wrapping_div(b))
}

pub fn lrem(a: i64, b: i64) -> Result<i64, RtError> {
    if b == 0 {
        return Err(RtError::DivisionByZero);
    }
    Ok(a.wrapping_rem(b))
}

#[inline]
pub fn land(a: i64, b: i64) -> i64 {
    a & b
}

#[inline]
pub fn lor(a: i64, b: i64) -> i64 {
    a | b
}

#[inline]
pub fn lxor(a: i64, b: i64) -> i64 {
    a ^ b
}

#[inline]
pub fn lneg(a: i64) -> i64 {
    a.wrapping_neg()
}

/// Left shift; only the low six bits of the distance count.
#[inline]
pub fn lshl(a: i64, b: i32) -> i64 {
    a.wrapping_shl(b as u32 & 63)
}

#[inline]
pub fn lshr(a: i64, b: i32) -> i64 {
    a.wrapping_shr(b as u32 & 63)
}

#[inline]
pub fn lushr(a: i64, b: i32) -> i64 {
    ((a as u64).wrapping_shr(b as u32 & 63)) as i64
}

// ── Tri-state comparisons ───────────────────────────────────────────────

#[inline]
fn ordering_to_int(o: std::cmp::Ordering) -> i32 {
    match o {
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
        std::cmp::Ordering::Greater => 1,
    }
}

/// Compare two longs: `-1`, `0` or `1`.
#[inline]
pub fn lcmp(a: i64, b: i64) -> i32 {
    ordering_to_int(a.cmp(&b))
}

/// Compare two integral values of any width.
#[inline]
pub fn cmp(a: i64, b: i64) -> i32 {
    ordering_to_int(a.cmp(&b))
}

/// Floating compare where NaN orders low.
#[inline]
pub fn cmpl(a: f64, b: f64) -> i32 {
    a.partial_cmp(&b).map_or(-1, ordering_to_int)
}

/// Floating compare where NaN orders high.
#[inline]
pub fn cmpg(a: f64, b: f64) -> i32 {
    a.partial_cmp(&b).map_or(1, ordering_to_int)
}

// ── Conversions ─────────────────────────────────────────────────────────

/// Float to int: NaN becomes 0, out-of-range values saturate.
#[inline]
pub fn f2i(x: f32) -> i32 {
    x as i32
}

#[inline]
pub fn d2i(x: f64) -> i32 {
    x as i32
}

#[inline]
pub fn f2j(x: f32) -> i64 {
    x as i64
}

#[inline]
pub fn d2j(x: f64) -> i64 {
    x as i64
}

#[inline]
pub fn l2i(x: i64) -> i32 {
    x as i32
}

#[inline]
pub fn i2j(x: i32) -> i64 {
    i64::from(x)
}

#[inline]
pub fn j2f(x: i64) -> f32 {
    x as f32
}

#[inline]
pub fn j2d(x: i64) -> f64 {
    x as f64
}

/// Round a double to single precision.
#[inline]
pub fn d2f(x: f64) -> f32 {
    x as f32
}

#[inline]
pub fn z2i(x: bool) -> i32 {
    i32::from(x)
}

#[inline]
pub fn i2z(x: i32) -> bool {
    x != 0
}

/// Non-short-circuit `&` on booleans; both arguments are already evaluated.
#[inline]
pub fn zand(a: bool, b: bool) -> bool {
    a & b
}

#[inline]
pub fn zor(a: bool, b: bool) -> bool {
    a | b
}
