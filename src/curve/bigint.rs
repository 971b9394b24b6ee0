//! Fixed-width little-endian byte integer arithmetic.
//!
//! The signature scheme needs exact integer arithmetic modulo the group
//! order `q`. Rather than a general big-integer type, this module provides
//! the handful of primitives the scheme actually uses, all operating in
//! place over fixed 32- and 64-byte buffers:
//!
//! - fused multiply-add of a small signed factor ([`mula_small`])
//! - fused multiply-add of a 32-byte factor ([`mula32`])
//! - Euclidean division with remainder ([`divmod`])
//! - significant-byte count ([`numsize`])
//! - modular inverse via the extended Euclidean algorithm ([`egcd32`])
//!
//! ## Conventions
//!
//! Values are little-endian unsigned byte strings with explicit lengths.
//! Running carries are signed and held in `i64`: a multiply-add with a
//! negative factor legitimately drives the carry negative, and the final
//! byte write absorbs it. Buffers never grow; every loop is bounded by a
//! caller-supplied length.

use crate::error::Error;

/// `p[m..m+n] += z * x[0..n]`, byte by byte, returning the final carry.
///
/// The destination doubles as the addend source; callers needing
/// `p = q + z * x` with a distinct `q` copy it into `p` first. The carry
/// is negative when the subtraction underflows past byte `m + n`.
pub fn mula_small(p: &mut [u8], m: usize, x: &[u8], n: usize, z: i32) -> i64 {
    let mut v: i64 = 0;
    for i in 0..n {
        v += p[i + m] as i64 + z as i64 * x[i] as i64;
        p[i + m] = v as u8;
        v >>= 8;
    }
    v
}

/// `p[0..t+32] += z * x[0..32] * y[0..t]`, returning the final carry.
pub fn mula32(p: &mut [u8], x: &[u8], y: &[u8], t: usize, z: i32) -> i64 {
    const N: usize = 31;

    let mut w: i64 = 0;
    for i in 0..t {
        let zy = z as i64 * y[i] as i64;
        w += mula_small(p, i, x, N, zy as i32) + p[i + N] as i64 + zy * x[N] as i64;
        p[i + N] = w as u8;
        w >>= 8;
    }
    p[t + N] = (w + p[t + N] as i64) as u8;
    w >> 8
}

/// Euclidean division of the `n`-byte value in `r` by the `t`-byte
/// divisor `d`. The quotient lands in `q` (`n - t + 1` bytes), the
/// remainder stays in `r`.
///
/// `d[t - 1]` must be nonzero. Each trial digit comes from the top two
/// bytes of the running remainder divided by the top two bytes of the
/// divisor; it may overshoot by one, in which case the correction pass
/// adds the divisor back and the quotient byte absorbs the borrow.
pub fn divmod(q: &mut [u8], r: &mut [u8], n: usize, d: &[u8], t: usize) {
    debug_assert!(d[t - 1] != 0);

    let mut n = n;
    let mut rn: i64 = 0;
    let dt: i64 = ((d[t - 1] as i64) << 8) + if t > 1 { d[t - 2] as i64 } else { 0 };

    while n >= t {
        n -= 1;
        let mut z: i64 =
            (rn << 16) + ((r[n] as i64) << 8) + if n > 0 { r[n - 1] as i64 } else { 0 };
        z /= dt;
        rn += mula_small(r, n + 1 - t, d, t, -(z as i32));
        q[n + 1 - t] = ((z + rn) & 0xFF) as u8;
        mula_small(r, n + 1 - t, d, t, -(rn as i32));
        rn = r[n] as i64;
        r[n] = 0;
    }
    r[t - 1] = rn as u8;
}

/// Index just past the highest nonzero byte of `x[0..n]` (0 for zero).
pub fn numsize(x: &[u8], n: usize) -> usize {
    let mut n = n;
    while n != 0 && x[n - 1] == 0 {
        n -= 1;
    }
    n
}

/// Modular inverse of `a` modulo `b`, by the extended Euclidean
/// algorithm expressed with [`divmod`] and [`mula32`] alternating over
/// two cofactor accumulators.
///
/// Both operands are clobbered as working storage. The result may carry
/// the algorithm's sign in its top bit; callers normalize into `[0, b)`
/// by adding `b` once when bit 255 is set.
pub fn egcd32(a: &mut [u8; 32], b: &mut [u8; 32]) -> Result<[u8; 32], Error> {
    let mut x = [0u8; 64];
    let mut y = [0u8; 64];
    let mut temp = [0u8; 32];

    x[0] = 1;
    let mut an = numsize(&a[..], 32);
    if an == 0 {
        return Err(Error::ZeroDivisor);
    }
    let mut bn = 32;

    loop {
        let mut qn = bn - an + 1;
        divmod(&mut temp, &mut b[..], bn, &a[..], an);
        bn = numsize(&b[..], bn);
        if bn == 0 {
            return Ok(low_half(&x));
        }
        mula32(&mut y, &x, &temp, qn, -1);

        qn = an - bn + 1;
        divmod(&mut temp, &mut a[..], an, &b[..], bn);
        an = numsize(&a[..], an);
        if an == 0 {
            return Ok(low_half(&y));
        }
        mula32(&mut x, &y, &temp, qn, -1);
    }
}

fn low_half(x: &[u8; 64]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&x[..32]);
    out
}
