//! Arithmetic in GF(2^255 - 19) on 16 limbs of 16 bits.
//!
//! ## Representation
//!
//! A field element is 16 little-endian limbs of 16 bits each, stored as
//! `i32` with all intermediate arithmetic promoted to `i64`:
//!
//! ```text
//! value = sum(limb[i] * 2^(16 i)),  i = 0..16
//! ```
//!
//! "Reduced form" keeps limbs 0 through 14 in `[0, 0xFFFF]` and limb 15
//! at most slightly above `0x7FFF`; the represented value may still
//! exceed `p = 2^255 - 19` once (see [`FieldElement::is_overflow`]).
//! Packing to bytes requires reduced form; multiplying by
//! [`FieldElement::ONE`] canonicalizes an element of unknown provenance.
//!
//! Addition and subtraction return values that are valid inputs for
//! multiplication and squaring but not for packing. Multiplication,
//! squaring and [`FieldElement::mul_small`] always return reduced form.
//!
//! Carry folding uses `2^255 = 19 (mod p)` and `2^256 = 38 (mod p)`.
//! Subtraction adds fixed bias limbs (a multiple of p in total) so every
//! intermediate limb stays nonnegative; carries use arithmetic shifts,
//! which are exact for the occasional negative top limb as well.
//!
//! ## Multiplication
//!
//! Products use one level of Karatsuba over 8-limb halves: three half
//! products, the middle term recovered from the `(lo + hi)` product by
//! subtraction, then a fold of the high 256 bits by 38.
//!
//! Inversion is the classic `x^(2^255 - 21)` addition chain (11
//! multiplies, 254 squarings); with `sqrt_assist` the chain stops early
//! at `x^((p - 5) / 8)`, the helper exponent for square roots.

use std::array;
use std::ops::{Add, Mul, Sub};

/// Field element modulo `2^255 - 19` in radix `2^16`.
#[derive(Clone, Copy)]
pub struct FieldElement(pub(crate) [i32; 16]);

impl FieldElement {
    /// The additive identity.
    pub const ZERO: Self = FieldElement([0; 16]);

    /// The multiplicative identity.
    pub const ONE: Self = FieldElement([1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

    /// Constant-time conditional swap.
    ///
    /// Swaps `self` and `rhs` when `condition == 1`; branch-free.
    pub(crate) fn swap(&mut self, rhs: &mut Self, condition: u32) {
        let mask = -(condition as i32);

        for (s, r) in self.0.iter_mut().zip(rhs.0.iter_mut()) {
            let tmp = (*s ^ *r) & mask;
            *s ^= tmp;
            *r ^= tmp;
        }
    }

    /// Decode 32 little-endian bytes into limbs.
    ///
    /// All 256 input bits are kept, including bit 255; the next
    /// arithmetic operation folds it as `2^255 = 19`.
    pub fn from_bytes(m: &[u8; 32]) -> FieldElement {
        FieldElement(array::from_fn(|i| {
            (m[2 * i] as i32) | ((m[2 * i + 1] as i32) << 8)
        }))
    }

    /// Encode into 32 little-endian bytes. Requires reduced form.
    pub fn to_bytes(self) -> [u8; 32] {
        let mut m = [0u8; 32];
        for (i, &limb) in self.0.iter().enumerate() {
            m[2 * i] = (limb & 0xFF) as u8;
            m[2 * i + 1] = ((limb >> 8) & 0xFF) as u8;
        }
        m
    }

    /// `self * self`; saves the cross multiplies of a general product.
    pub fn square(self) -> FieldElement {
        let x = sqr8h(&upper(&self.0));
        let z = sqr8h(&lower(&self.0));
        let y = sqr8h(&folded(&self.0));
        combine(&x, &y, &z)
    }

    /// Multiply by a small constant (121665 and 486662 in the curve
    /// formulas; 1 to canonicalize). Returns reduced form.
    pub fn mul_small(self, m: i32) -> FieldElement {
        let a = &self.0;
        let m = m as i64;
        let mut r = [0i32; 16];

        let mut v: i64 = a[0] as i64 * m;
        r[0] = (v & 0xFFFF) as i32;
        for i in 1..15 {
            v = (v >> 16) + a[i] as i64 * m;
            r[i] = (v & 0xFFFF) as i32;
        }
        let top = (v >> 16) + a[15] as i64 * m;
        reduce(&mut r, top);

        FieldElement(r)
    }

    /// `self^(2^255 - 21)`, which is `1/self` for nonzero `self` by
    /// Fermat (the exponent is p - 2).
    ///
    /// With `sqrt_assist` the chain stops two squarings and one multiply
    /// early, returning `self^((p - 5) / 8)` for [`FieldElement::sqrt`].
    pub fn recip(self, sqrt_assist: bool) -> FieldElement {
        let x = self;

        let mut t1 = x.square(); /* 2 */
        let mut t2 = t1.square(); /* 4 */
        let t0 = t2.square(); /* 8 */
        t2 = t0 * x; /* 9 */
        let t0 = t2 * t1; /* 11 */
        t1 = t0.square(); /* 22 */
        let mut t3 = t1 * t2; /* 2^5 - 2^0 = 31 */
        t1 = t3.square(); /* 2^6 - 2^1 */
        t2 = t1.square(); /* 2^7 - 2^2 */
        t1 = t2.square(); /* 2^8 - 2^3 */
        t2 = t1.square(); /* 2^9 - 2^4 */
        t1 = t2.square(); /* 2^10 - 2^5 */
        t2 = t1 * t3; /* 2^10 - 2^0 */
        t1 = t2.square(); /* 2^11 - 2^1 */
        t3 = t1.square(); /* 2^12 - 2^2 */
        for _ in 1..5 {
            t1 = t3.square();
            t3 = t1.square();
        } /* 2^20 - 2^10 */
        t1 = t3 * t2; /* 2^20 - 2^0 */
        t3 = t1.square(); /* 2^21 - 2^1 */
        let mut t4 = t3.square(); /* 2^22 - 2^2 */
        for _ in 1..10 {
            t3 = t4.square();
            t4 = t3.square();
        } /* 2^40 - 2^20 */
        t3 = t4 * t1; /* 2^40 - 2^0 */
        for _ in 0..5 {
            t1 = t3.square();
            t3 = t1.square();
        } /* 2^50 - 2^10 */
        t1 = t3 * t2; /* 2^50 - 2^0 */
        t2 = t1.square(); /* 2^51 - 2^1 */
        t3 = t2.square(); /* 2^52 - 2^2 */
        for _ in 1..25 {
            t2 = t3.square();
            t3 = t2.square();
        } /* 2^100 - 2^50 */
        t2 = t3 * t1; /* 2^100 - 2^0 */
        t3 = t2.square(); /* 2^101 - 2^1 */
        t4 = t3.square(); /* 2^102 - 2^2 */
        for _ in 1..50 {
            t3 = t4.square();
            t4 = t3.square();
        } /* 2^200 - 2^100 */
        t3 = t4 * t2; /* 2^200 - 2^0 */
        for _ in 0..25 {
            t4 = t3.square();
            t3 = t4.square();
        } /* 2^250 - 2^50 */
        t2 = t3 * t1; /* 2^250 - 2^0 */
        t1 = t2.square(); /* 2^251 - 2^1 */
        t2 = t1.square(); /* 2^252 - 2^2 */

        if sqrt_assist {
            x * t2 /* 2^252 - 3 */
        } else {
            t1 = t2.square(); /* 2^253 - 2^3 */
            t2 = t1.square(); /* 2^254 - 2^4 */
            t1 = t2.square(); /* 2^255 - 2^5 */
            t1 * t0 /* 2^255 - 21 */
        }
    }

    /// A square root of `self`, via `v = (2 self)^((p - 5) / 8)` and
    /// `root = self * v * (2 self v^2 - 1)`.
    ///
    /// The caller must know a root exists (curve y^2 values do); which of
    /// the two roots comes back is fixed up through
    /// [`FieldElement::is_negative`].
    pub fn sqrt(self) -> FieldElement {
        let u = self;

        let t = u + u;
        let v = t.recip(true);
        let v2 = v.square();
        let w = t * v2 - FieldElement::ONE;
        u * (v * w)
    }

    /// Whether a reduced element's value still lies in `[p, 2^255)`, or
    /// its top limb exceeds `0x7FFF`.
    pub fn is_overflow(&self) -> bool {
        let x = &self.0;
        let middle = x[1]
            & x[2]
            & x[3]
            & x[4]
            & x[5]
            & x[6]
            & x[7]
            & x[8]
            & x[9]
            & x[10]
            & x[11]
            & x[12]
            & x[13]
            & x[14];

        (x[0] >= 0xFFED && middle == 0xFFFF && x[15] == 0x7FFF) || x[15] > 0x7FFF
    }

    /// Parity-based sign convention: `is_overflow(x) XOR (x mod 2)`.
    /// Requires reduced form.
    pub fn is_negative(&self) -> bool {
        self.is_overflow() ^ (self.0[0] & 1 == 1)
    }
}

impl Add for FieldElement {
    type Output = FieldElement;

    /// Limbwise addition; overflow of bit 255 folds back as `+19`.
    fn add(self, rhs: FieldElement) -> FieldElement {
        let a = &self.0;
        let b = &rhs.0;
        let mut r = [0i32; 16];

        let mut v: i64 =
            ((a[15] as i64 >> 15) + (b[15] as i64 >> 15)) * 19 + a[0] as i64 + b[0] as i64;
        r[0] = (v & 0xFFFF) as i32;
        for i in 1..15 {
            v = (v >> 16) + a[i] as i64 + b[i] as i64;
            r[i] = (v & 0xFFFF) as i32;
        }
        r[15] = ((v >> 16) + (a[15] & 0x7FFF) as i64 + (b[15] & 0x7FFF) as i64) as i32;

        FieldElement(r)
    }
}

impl Sub for FieldElement {
    type Output = FieldElement;

    /// Limbwise subtraction. The bias limbs sum to a multiple of p and
    /// keep every intermediate nonnegative; only limb 15 of the result
    /// can transiently go to -1, which the arithmetic-shift carries
    /// handle exactly.
    fn sub(self, rhs: FieldElement) -> FieldElement {
        let a = &self.0;
        let b = &rhs.0;
        let mut r = [0i32; 16];

        let mut v: i64 = 0x80000 + ((a[15] as i64 >> 15) - (b[15] as i64 >> 15) - 1) * 19
            + a[0] as i64
            - b[0] as i64;
        r[0] = (v & 0xFFFF) as i32;
        for i in 1..15 {
            v = (v >> 16) + 0x7fff8 + a[i] as i64 - b[i] as i64;
            r[i] = (v & 0xFFFF) as i32;
        }
        r[15] = ((v >> 16) + 0x7ff8 + (a[15] & 0x7FFF) as i64 - (b[15] & 0x7FFF) as i64) as i32;

        FieldElement(r)
    }
}

impl Mul for FieldElement {
    type Output = FieldElement;

    /// Karatsuba product over 8-limb halves. Returns reduced form.
    fn mul(self, rhs: FieldElement) -> FieldElement {
        let x = mul8h(&upper(&self.0), &upper(&rhs.0));
        let z = mul8h(&lower(&self.0), &lower(&rhs.0));
        let y = mul8h(&folded(&self.0), &folded(&rhs.0));
        combine(&x, &y, &z)
    }
}

fn lower(x: &[i32; 16]) -> [i64; 8] {
    array::from_fn(|i| x[i] as i64)
}

fn upper(x: &[i32; 16]) -> [i64; 8] {
    array::from_fn(|i| x[i + 8] as i64)
}

fn folded(x: &[i32; 16]) -> [i64; 8] {
    array::from_fn(|i| x[i] as i64 + x[i + 8] as i64)
}

/// One 8x8-limb schoolbook product: 16 limbs, carries masked as it goes,
/// limb 15 holding the final carry unmasked.
fn mul8h(a: &[i64; 8], b: &[i64; 8]) -> [i64; 16] {
    let mut r = [0i64; 16];
    let mut v: i64;

    v = a[0] * b[0];
    r[0] = v & 0xFFFF;
    v = (v >> 16) + a[0] * b[1] + a[1] * b[0];
    r[1] = v & 0xFFFF;
    v = (v >> 16) + a[0] * b[2] + a[1] * b[1] + a[2] * b[0];
    r[2] = v & 0xFFFF;
    v = (v >> 16) + a[0] * b[3] + a[1] * b[2] + a[2] * b[1] + a[3] * b[0];
    r[3] = v & 0xFFFF;
    v = (v >> 16) + a[0] * b[4] + a[1] * b[3] + a[2] * b[2] + a[3] * b[1] + a[4] * b[0];
    r[4] = v & 0xFFFF;
    v = (v >> 16) + a[0] * b[5] + a[1] * b[4] + a[2] * b[3] + a[3] * b[2] + a[4] * b[1]
        + a[5] * b[0];
    r[5] = v & 0xFFFF;
    v = (v >> 16) + a[0] * b[6] + a[1] * b[5] + a[2] * b[4] + a[3] * b[3] + a[4] * b[2]
        + a[5] * b[1]
        + a[6] * b[0];
    r[6] = v & 0xFFFF;
    v = (v >> 16) + a[0] * b[7] + a[1] * b[6] + a[2] * b[5] + a[3] * b[4] + a[4] * b[3]
        + a[5] * b[2]
        + a[6] * b[1]
        + a[7] * b[0];
    r[7] = v & 0xFFFF;
    v = (v >> 16) + a[1] * b[7] + a[2] * b[6] + a[3] * b[5] + a[4] * b[4] + a[5] * b[3]
        + a[6] * b[2]
        + a[7] * b[1];
    r[8] = v & 0xFFFF;
    v = (v >> 16) + a[2] * b[7] + a[3] * b[6] + a[4] * b[5] + a[5] * b[4] + a[6] * b[3]
        + a[7] * b[2];
    r[9] = v & 0xFFFF;
    v = (v >> 16) + a[3] * b[7] + a[4] * b[6] + a[5] * b[5] + a[6] * b[4] + a[7] * b[3];
    r[10] = v & 0xFFFF;
    v = (v >> 16) + a[4] * b[7] + a[5] * b[6] + a[6] * b[5] + a[7] * b[4];
    r[11] = v & 0xFFFF;
    v = (v >> 16) + a[5] * b[7] + a[6] * b[6] + a[7] * b[5];
    r[12] = v & 0xFFFF;
    v = (v >> 16) + a[6] * b[7] + a[7] * b[6];
    r[13] = v & 0xFFFF;
    v = (v >> 16) + a[7] * b[7];
    r[14] = v & 0xFFFF;
    r[15] = v >> 16;

    r
}

/// Squaring variant of [`mul8h`]: cross products doubled.
fn sqr8h(a: &[i64; 8]) -> [i64; 16] {
    let mut r = [0i64; 16];
    let mut v: i64;

    v = a[0] * a[0];
    r[0] = v & 0xFFFF;
    v = (v >> 16) + 2 * a[0] * a[1];
    r[1] = v & 0xFFFF;
    v = (v >> 16) + 2 * a[0] * a[2] + a[1] * a[1];
    r[2] = v & 0xFFFF;
    v = (v >> 16) + 2 * (a[0] * a[3] + a[1] * a[2]);
    r[3] = v & 0xFFFF;
    v = (v >> 16) + 2 * (a[0] * a[4] + a[1] * a[3]) + a[2] * a[2];
    r[4] = v & 0xFFFF;
    v = (v >> 16) + 2 * (a[0] * a[5] + a[1] * a[4] + a[2] * a[3]);
    r[5] = v & 0xFFFF;
    v = (v >> 16) + 2 * (a[0] * a[6] + a[1] * a[5] + a[2] * a[4]) + a[3] * a[3];
    r[6] = v & 0xFFFF;
    v = (v >> 16) + 2 * (a[0] * a[7] + a[1] * a[6] + a[2] * a[5] + a[3] * a[4]);
    r[7] = v & 0xFFFF;
    v = (v >> 16) + 2 * (a[1] * a[7] + a[2] * a[6] + a[3] * a[5]) + a[4] * a[4];
    r[8] = v & 0xFFFF;
    v = (v >> 16) + 2 * (a[2] * a[7] + a[3] * a[6] + a[4] * a[5]);
    r[9] = v & 0xFFFF;
    v = (v >> 16) + 2 * (a[3] * a[7] + a[4] * a[6]) + a[5] * a[5];
    r[10] = v & 0xFFFF;
    v = (v >> 16) + 2 * (a[4] * a[7] + a[5] * a[6]);
    r[11] = v & 0xFFFF;
    v = (v >> 16) + 2 * a[5] * a[7] + a[6] * a[6];
    r[12] = v & 0xFFFF;
    v = (v >> 16) + 2 * a[6] * a[7];
    r[13] = v & 0xFFFF;
    v = (v >> 16) + a[7] * a[7];
    r[14] = v & 0xFFFF;
    r[15] = v >> 16;

    r
}

/// Karatsuba combine: `z + (y - x - z) * 2^128 + x * 2^256` with the top
/// fold `2^256 = 38` and bias limbs keeping intermediates nonnegative.
fn combine(x: &[i64; 16], y: &[i64; 16], z: &[i64; 16]) -> FieldElement {
    let mut r = [0i32; 16];

    let mut v: i64 = 0x800000 + z[0] + (y[8] - x[8] - z[8] + x[0] - 0x80) * 38;
    r[0] = (v & 0xFFFF) as i32;
    for i in 1..8 {
        v = (v >> 16) + 0x7fff80 + z[i] + (y[i + 8] - x[i + 8] - z[i + 8] + x[i]) * 38;
        r[i] = (v & 0xFFFF) as i32;
    }
    for i in 8..15 {
        v = (v >> 16) + 0x7fff80 + z[i] + y[i - 8] - x[i - 8] - z[i - 8] + x[i] * 38;
        r[i] = (v & 0xFFFF) as i32;
    }
    let top = (v >> 16) + 0x7fff80 + z[15] + y[7] - x[7] - z[7] + x[15] * 38;
    reduce(&mut r, top);

    FieldElement(r)
}

/// Fold the top limb's bits above 2^15 back into limb 0 as `* 19` and
/// re-carry once.
fn reduce(r: &mut [i32; 16], top: i64) {
    r[15] = (top & 0x7FFF) as i32;
    let mut v = (top >> 15) * 19;
    for limb in r.iter_mut().take(15) {
        v += *limb as i64;
        *limb = (v & 0xFFFF) as i32;
        v >>= 16;
    }
    r[15] += v as i32;
}
