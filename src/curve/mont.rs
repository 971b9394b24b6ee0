//! Montgomery X:Z ladder steps for Curve25519.
//!
//! Points are projective (X : Z) pairs on
//!
//! ```text
//! y^2 = x^3 + 486662 x^2 + x   over GF(2^255 - 19)
//! ```
//!
//! and Y is never materialized. [`mont_prep`] turns a point into the
//! `(X + Z, X - Z)` form the step functions consume, [`mont_add`] is a
//! differential addition (the caller supplies the affine X of the
//! difference of the two points), and [`mont_dbl`] doubles.
//!
//! [`x_to_y2`] evaluates the right-hand side of the curve equation,
//! which is how the signature layer recovers y information from the
//! X-only ladder.

use super::field::FieldElement;

/// Affine X of the base point G.
pub const BASE_X: FieldElement =
    FieldElement([9, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

/// `Gx + A = 9 + 486662 = 486671`.
pub const BASE_X_PLUS_A: FieldElement =
    FieldElement([0x6D0F, 0x0007, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

/// `Gy^2 = x_to_y2(Gx) = 39420360`.
pub const BASE_Y_SQ: FieldElement =
    FieldElement([0x81C8, 0x0259, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

/// `2 Gy`.
pub const BASE_2Y: FieldElement = FieldElement([
    22587, 610, 29883, 44076, 15515, 9479, 25859, 56197, 23910, 4462, 17831, 16322, 62102,
    36542, 52412, 16035,
]);

/// `1 / (2 Gy)`.
pub const BASE_2Y_INV: FieldElement = FieldElement([
    5744, 16384, 61977, 54121, 8776, 18501, 26522, 34893, 23833, 5823, 55924, 58749, 24147,
    14085, 13606, 6080,
]);

/// `(X + Z, X - Z)`; both outputs are multiplication inputs only.
pub fn mont_prep(x: FieldElement, z: FieldElement) -> (FieldElement, FieldElement) {
    (x + z, x - z)
}

/// Differential addition.
///
/// `(t1, t2)` is the prepared point the sum replaces, `(t3, t4)` the
/// prepared other point, and `dx` the affine X of their difference.
pub fn mont_add(
    t1: FieldElement,
    t2: FieldElement,
    t3: FieldElement,
    t4: FieldElement,
    dx: FieldElement,
) -> (FieldElement, FieldElement) {
    let a = t2 * t3;
    let b = t1 * t4;
    let sum = a + b;
    let diff = a - b;
    (sum.square(), diff.square() * dx)
}

/// Doubling of the point prepared as `(t3, t4)`, via `(A - 2)/4 = 121665`.
pub fn mont_dbl(t3: FieldElement, t4: FieldElement) -> (FieldElement, FieldElement) {
    let s = t3.square();
    let d = t4.square();
    let x = s * d;
    let e = s - d;
    let z = (s + e.mul_small(121665)) * e;
    (x, z)
}

/// Curve equation right-hand side: `x^3 + 486662 x^2 + x`.
pub fn x_to_y2(x: FieldElement) -> FieldElement {
    let sq = x.square();
    (sq + x.mul_small(486662) + FieldElement::ONE) * x
}
