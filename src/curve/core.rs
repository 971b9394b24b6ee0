//! EC-KCDSA key generation, signing and verification over Curve25519.
//!
//! ## Scheme
//!
//! Scalars live modulo the group order
//!
//! ```text
//! q = 2^252 + 27742317777372353535851937790883648493
//! ```
//!
//! Key generation clamps a 32-byte seed into `k`, walks the ladder to
//! `P = k G`, and derives the signing multiplier `s` with `s |P| = G`,
//! where `|P|` fixes the sign of P's y coordinate by the parity
//! convention of `FieldElement::is_negative`.
//!
//! Signing is deterministic arithmetic: `v = (x - h) s  (mod q)`.
//! Verification recomputes `Y = v |P| + h G` without ever seeing `x`:
//! the caller checks `Y` against the value the signer committed to.
//!
//! ## Verification ladder
//!
//! `v |P| + h G` is evaluated with a single pass over both scalars. The
//! bytes of `v` and `h` are recoded into a difference stream `d` (a
//! Gray-code-like carry cascade), after which each of the 256 steps
//! advances three (X : Z) slots in lockstep:
//!
//! - slot 0 doubles one of the three slots,
//! - slot 1 advances by P or by G (difference picked from `d`),
//! - slot 2 advances by P + G or by P - G.
//!
//! The differences X(P + G) and X(P - G) are precomputed from the curve
//! equation: `Py = sqrt(x_to_y2(Px))`, with the sign ambiguity of the
//! root cancelled by indexing on its parity.

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::bigint::{divmod, egcd32, mula32, mula_small};
use super::field::FieldElement;
use super::mont::{
    BASE_2Y, BASE_2Y_INV, BASE_X, BASE_X_PLUS_A, BASE_Y_SQ, mont_add, mont_dbl, mont_prep,
    x_to_y2,
};
use crate::error::Error;

/// The group order `q`, little-endian.
pub const ORDER: [u8; 32] = [
    237, 211, 245, 92, 26, 99, 18, 88, 214, 156, 247, 162, 222, 249, 222, 20, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 16,
];

/// `8 q`, little-endian.
const ORDER_TIMES_8: [u8; 32] = [
    104, 159, 174, 231, 210, 24, 147, 192, 178, 230, 188, 23, 245, 206, 247, 166, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 128,
];

/// The three outputs of key generation.
///
/// `public` is the packed X of `P = k G`. `signing` is the multiplier
/// `s` consumed by [`sign`]. `agreement` is the clamped seed, reusable
/// for raw key agreement. All three are wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial {
    pub public: [u8; 32],
    pub signing: [u8; 32],
    pub agreement: [u8; 32],
}

/// Clamp 32 random or derived bytes into a ladder scalar: clear the low
/// three bits, clear bit 255, set bit 254.
pub fn clamp(k: &mut [u8; 32]) {
    k[0] &= 0xF8;
    k[31] &= 0x7F;
    k[31] |= 0x40;
}

/// 256-step MSB-first Montgomery ladder.
///
/// Returns the projective (X : Z) of `k P` and of `(k + 1) P`; the
/// second pair feeds the signing-multiplier derivation. Slot selection
/// is a branch-free conditional swap.
fn ladder(
    k: &[u8; 32],
    dx: FieldElement,
) -> (FieldElement, FieldElement, FieldElement, FieldElement) {
    let mut x0 = FieldElement::ONE;
    let mut z0 = FieldElement::ZERO;
    let mut x1 = dx;
    let mut z1 = FieldElement::ONE;

    let mut swap = 0u32;
    for i in (0..256).rev() {
        let bit = ((k[i >> 3] >> (i & 7)) & 1) as u32;
        swap ^= bit;
        x0.swap(&mut x1, swap);
        z0.swap(&mut z1, swap);
        swap = bit;

        // after the swap, (x1, z1) is the slot the sum replaces and
        // (x0, z0) the slot the double replaces
        let (t1, t2) = mont_prep(x1, z1);
        let (t3, t4) = mont_prep(x0, z0);
        let (sx, sz) = mont_add(t1, t2, t3, t4, dx);
        let (qx, qz) = mont_dbl(t3, t4);
        x1 = sx;
        z1 = sz;
        x0 = qx;
        z0 = qz;
    }
    x0.swap(&mut x1, swap);
    z0.swap(&mut z1, swap);

    (x0, z0, x1, z1)
}

/// Scalar multiplication on the Montgomery X line, returning the packed
/// affine X of `k P`.
///
/// `base` is the packed X of `P`; `None` selects the base point G. The
/// scalar is used as given; key agreement callers clamp it first.
pub fn scalar_mult(k: &[u8; 32], base: Option<&[u8; 32]>) -> [u8; 32] {
    let dx = match base {
        Some(p) => FieldElement::from_bytes(p),
        None => BASE_X,
    };
    let (x0, z0, _, _) = ladder(k, dx);
    (x0 * z0.recip(false)).to_bytes()
}

/// Key generation: clamp `seed` into `k` and derive `(P, s, k)`.
pub fn keygen(seed: &[u8; 32]) -> Result<KeyMaterial, Error> {
    let mut k = Zeroizing::new(*seed);
    clamp(&mut k);

    let (x0, z0, x1, z1) = ladder(&k, BASE_X);
    let px = x0 * z0.recip(false);
    let public = px.to_bytes();

    // t = +/- Py out of the Montgomery addition identity applied to
    // P, G and Q = P + G:
    //   (Qx + Px + Gx + A)(Px - Gx)^2 - Py^2 - Gy^2 = -/+ 2 Py Gy
    let py2 = x_to_y2(px);
    let qx = x1 * z1.recip(false);
    let t = (qx + px + BASE_X_PLUS_A) * (px - BASE_X).square() - py2 - BASE_Y_SQ;
    let t = t * BASE_2Y_INV;

    // s' = k when t is negative, 8q - k otherwise; picked branch-free so
    // that s' * |P| = G regardless of which sign P's y actually has
    let mut s = Zeroizing::new(ORDER_TIMES_8);
    mula_small(&mut s[..], 0, &k[..], 32, -1);
    select(&mut s, &k, t.is_negative());

    // s = 1/s' mod q, normalized into [0, q)
    let mut a = Zeroizing::new(*s);
    let mut modulus = ORDER;
    *s = egcd32(&mut a, &mut modulus)?;
    let negative = (s[31] >> 7) as i32;
    mula_small(&mut s[..], 0, &ORDER, 32, negative);

    Ok(KeyMaterial {
        public,
        signing: *s,
        agreement: *k,
    })
}

/// Branch-free byte select: `dest = src` when `condition` holds.
fn select(dest: &mut [u8; 32], src: &[u8; 32], condition: bool) {
    let mask = (condition as u8).wrapping_neg();
    for (d, s) in dest.iter_mut().zip(src.iter()) {
        *d ^= (*d ^ *s) & mask;
    }
}

/// Deterministic signing: `v = (x - h) s  (mod q)`.
///
/// `h` and `x` are reduced mod q first; both are treated as secret. A
/// zero result cannot be published (it would leak that `x = h mod q`)
/// and is rejected as degenerate.
pub fn sign(h: &[u8; 32], x: &[u8; 32], s: &[u8; 32]) -> Result<[u8; 32], Error> {
    let mut scratch = [0u8; 33];

    let mut h1 = *h;
    let mut x1 = *x;
    divmod(&mut scratch, &mut h1, 32, &ORDER, 32);
    divmod(&mut scratch, &mut x1, 32, &ORDER, 32);

    let mut v = x1;
    mula_small(&mut v, 0, &h1, 32, -1);
    mula_small(&mut v, 0, &ORDER, 32, 1);

    let mut product = [0u8; 64];
    mula32(&mut product, &v, s, 32, 1);
    divmod(&mut scratch, &mut product, 64, &ORDER, 32);

    let mut nonzero = 0u8;
    for (out, byte) in v.iter_mut().zip(product.iter()) {
        *out = *byte;
        nonzero |= *byte;
    }
    if nonzero == 0 {
        return Err(Error::DegenerateSignature);
    }
    Ok(v)
}

/// Verification-side reconstruction `Y = v |P| + h G`.
///
/// Callers compare the returned packed point against the signer's
/// commitment; this function itself accepts any inputs.
pub fn verify(v: &[u8; 32], h: &[u8; 32], public: &[u8; 32]) -> [u8; 32] {
    let p = [BASE_X, FieldElement::from_bytes(public)];

    // difference table for slot 2: X(P + G) and X(P - G), with the sign
    // of the recovered root cancelled by indexing on its parity
    let py2 = x_to_y2(p[1]);
    let root = py2.sqrt();
    let j = root.is_negative() as usize;
    let axis = py2 + BASE_Y_SQ;
    let cross = BASE_2Y * root;

    let mut num = [FieldElement::ZERO; 2];
    num[j] = axis - cross; /* (Py - Gy)^2 */
    num[1 - j] = axis + cross; /* (Py + Gy)^2 */

    // X(P +/- G) = (Py -/+ Gy)^2 / (Px - Gx)^2 - Px - Gx - A
    let inv_sq = (p[1] - BASE_X).square().recip(false);
    let mut s = [FieldElement::ZERO; 2];
    for i in 0..2 {
        s[i] = (num[i] * inv_sq - p[1] - BASE_X_PLUS_A).mul_small(1);
    }

    // recode (v, h) into the difference stream d: bytewise Gray coding
    // with a carry cascade through the nvh mask
    let mut d = [0u8; 32];
    let (mut vi, mut hi, mut di, mut nvh) = (0i32, 0i32, 0i32, 0i32);
    for i in 0..32 {
        vi = (vi >> 8) ^ (v[i] as i32) ^ ((v[i] as i32) << 1);
        hi = (hi >> 8) ^ (h[i] as i32) ^ ((h[i] as i32) << 1);
        nvh = !(vi ^ hi);
        di = (nvh & ((di & 0x80) >> 7)) ^ vi;
        di ^= nvh & ((di & 0x01) << 1);
        di ^= nvh & ((di & 0x02) << 1);
        di ^= nvh & ((di & 0x04) << 1);
        di ^= nvh & ((di & 0x08) << 1);
        di ^= nvh & ((di & 0x10) << 1);
        di ^= nvh & ((di & 0x20) << 1);
        di ^= nvh & ((di & 0x40) << 1);
        d[i] = di as u8;
    }
    let di = ((nvh & ((di & 0x80) << 1)) ^ vi) >> 8;

    // slot 0: ladder state for the doubles; slot 1: + P or G;
    // slot 2: + (P + G) or (P - G)
    let mut yx = [FieldElement::ONE, p[(di & 1) as usize], s[0]];
    let mut yz = [FieldElement::ZERO, FieldElement::ONE, FieldElement::ONE];

    let (mut vi, mut hi) = (0i32, 0i32);
    let mut di = di;

    for i in (0..32).rev() {
        vi = ((vi & 0xFF) << 8) | v[i] as i32;
        hi = ((hi & 0xFF) << 8) | h[i] as i32;
        di = ((di & 0xFF) << 8) | d[i] as i32;

        for j in (0..8).rev() {
            let (a0, b0) = mont_prep(yx[0], yz[0]);
            let (a1, b1) = mont_prep(yx[1], yz[1]);
            let (a2, b2) = mont_prep(yx[2], yz[2]);
            let t1 = [a0, a1, a2];
            let t2 = [b0, b1, b2];

            let k = ((((vi ^ (vi >> 1)) >> j) & 1) + (((hi ^ (hi >> 1)) >> j) & 1)) as usize;
            let slot0 = mont_dbl(t1[k], t2[k]);

            let k = (((di >> j) & 2) ^ (((di >> j) & 1) << 1)) as usize;
            let slot1 = mont_add(t1[1], t2[1], t1[k], t2[k], p[((di >> j) & 1) as usize]);

            let k = ((((vi ^ hi) >> j) & 2) >> 1) as usize;
            let slot2 = mont_add(t1[2], t2[2], t1[0], t2[0], s[k]);

            yx[0] = slot0.0;
            yz[0] = slot0.1;
            yx[1] = slot1.0;
            yz[1] = slot1.1;
            yx[2] = slot2.0;
            yz[2] = slot2.1;
        }
    }

    let k = ((vi & 1) + (hi & 1)) as usize;
    (yx[k] * yz[k].recip(false)).to_bytes()
}

/// A canonical signature has its `v` half already reduced mod q.
///
/// The group arithmetic maps `v` and `v + q` to the same point, so
/// without this check a third party could re-publish a valid signature
/// under different bytes.
pub fn is_canonical_signature(signature: &[u8; 64]) -> bool {
    let mut v = [0u8; 32];
    v.copy_from_slice(&signature[..32]);
    let mut scratch = [0u8; 33];
    divmod(&mut scratch, &mut v, 32, &ORDER, 32);
    v[..] == signature[..32]
}

/// A canonical public key packs a value below `2^255 - 19`.
pub fn is_canonical_public_key(public: &[u8; 32]) -> bool {
    !FieldElement::from_bytes(public).is_overflow()
}
