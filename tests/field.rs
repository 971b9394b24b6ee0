use kcdsa25519::curve::bigint::{divmod, mula32, mula_small};
use kcdsa25519::curve::field::FieldElement;
use kcdsa25519::curve::mont::x_to_y2;
use kcdsa25519::curve::{clamp, scalar_mult};

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// 2^255 - 19, little-endian.
const P_BYTES: [u8; 32] = [
    0xED, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0x7F,
];

/// Reduce a 256-bit little-endian string into its canonical residue.
fn canon(bytes: &[u8; 32]) -> [u8; 32] {
    let mut r = *bytes;
    let mut q = [0u8; 1];
    divmod(&mut q, &mut r, 32, &P_BYTES, 32);
    r
}

/// Canonical bytes of a field element of any provenance.
fn pack_canon(x: FieldElement) -> [u8; 32] {
    canon(&x.mul_small(1).to_bytes())
}

/// Integer-level (a + b) mod p over raw byte strings.
fn ref_add(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
    let mut r = [0u8; 33];
    r[..32].copy_from_slice(a);
    let carry = mula_small(&mut r, 0, b, 32, 1);
    r[32] = carry as u8;

    let mut q = [0u8; 2];
    divmod(&mut q, &mut r, 33, &P_BYTES, 32);
    let mut out = [0u8; 32];
    out.copy_from_slice(&r[..32]);
    out
}

/// Integer-level (a * b) mod p over raw byte strings.
fn ref_mul(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
    let mut product = [0u8; 64];
    mula32(&mut product, a, b, 32, 1);

    let mut q = [0u8; 33];
    divmod(&mut q, &mut product, 64, &P_BYTES, 32);
    let mut out = [0u8; 32];
    out.copy_from_slice(&product[..32]);
    out
}

#[test]
fn field_pack_unpack_round_trip() {
    let mut m = [0u8; 32];
    for (i, byte) in m.iter_mut().enumerate() {
        *byte = (i as u8).wrapping_mul(19).wrapping_add(3);
    }

    assert_eq!(FieldElement::from_bytes(&m).to_bytes(), m);
    assert_eq!(FieldElement::from_bytes(&[0u8; 32]).to_bytes(), [0u8; 32]);
    assert_eq!(FieldElement::from_bytes(&[0xFF; 32]).to_bytes(), [0xFF; 32]);
}

#[test]
fn field_add_matches_integer_reference() {
    let mut rng = ChaCha20Rng::seed_from_u64(7);

    for _ in 0..32 {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        rng.fill_bytes(&mut a);
        rng.fill_bytes(&mut b);

        let sum = FieldElement::from_bytes(&a) + FieldElement::from_bytes(&b);
        assert_eq!(pack_canon(sum), ref_add(&a, &b));
    }
}

#[test]
fn field_sub_adds_back_to_minuend() {
    let mut rng = ChaCha20Rng::seed_from_u64(11);

    for _ in 0..32 {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        rng.fill_bytes(&mut a);
        rng.fill_bytes(&mut b);

        let diff = pack_canon(FieldElement::from_bytes(&a) - FieldElement::from_bytes(&b));
        assert_eq!(ref_add(&diff, &b), canon(&a));
    }
}

#[test]
fn field_mul_matches_integer_reference() {
    let mut rng = ChaCha20Rng::seed_from_u64(13);

    for _ in 0..32 {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        rng.fill_bytes(&mut a);
        rng.fill_bytes(&mut b);

        let product = FieldElement::from_bytes(&a) * FieldElement::from_bytes(&b);
        assert_eq!(pack_canon(product), ref_mul(&a, &b));
    }
}

#[test]
fn field_mul_identities() {
    let mut a = [0u8; 32];
    for (i, byte) in a.iter_mut().enumerate() {
        *byte = (i as u8).wrapping_mul(91).wrapping_add(17);
    }
    let x = FieldElement::from_bytes(&a);

    assert_eq!(pack_canon(x * FieldElement::ONE), canon(&a));
    assert_eq!(pack_canon(x * FieldElement::ZERO), [0u8; 32]);
}

#[test]
fn field_square_matches_self_multiplication() {
    let mut rng = ChaCha20Rng::seed_from_u64(17);

    for _ in 0..16 {
        let mut a = [0u8; 32];
        rng.fill_bytes(&mut a);

        let x = FieldElement::from_bytes(&a);
        assert_eq!(x.square().to_bytes(), (x * x).to_bytes());
        assert_eq!(pack_canon(x.square()), ref_mul(&a, &a));
    }
}

#[test]
fn field_recip_times_self_is_one() {
    let mut rng = ChaCha20Rng::seed_from_u64(23);
    let mut one = [0u8; 32];
    one[0] = 1;

    for _ in 0..8 {
        let mut a = [0u8; 32];
        rng.fill_bytes(&mut a);
        if canon(&a) == [0u8; 32] {
            continue;
        }

        let x = FieldElement::from_bytes(&a);
        assert_eq!(pack_canon(x * x.recip(false)), one);
    }
}

#[test]
fn field_recip_of_two() {
    // 1/2 = (p + 1)/2 = 2^254 - 9
    let mut two = [0u8; 32];
    two[0] = 2;
    let mut expected = [0xFF; 32];
    expected[0] = 0xF7;
    expected[31] = 0x3F;

    let half = FieldElement::from_bytes(&two).recip(false);
    assert_eq!(pack_canon(half), expected);
}

#[test]
fn field_sqrt_squares_back_for_curve_values() {
    for seed in 1u8..4 {
        let mut k = [0u8; 32];
        for (i, byte) in k.iter_mut().enumerate() {
            *byte = (i as u8).wrapping_mul(29).wrapping_add(seed);
        }
        clamp(&mut k);

        // y^2 of an on-curve x is always a square
        let x = FieldElement::from_bytes(&scalar_mult(&k, None));
        let y2 = x_to_y2(x);
        let root = y2.sqrt();
        assert_eq!(pack_canon(root.square()), pack_canon(y2));
    }
}

#[test]
fn field_overflow_and_sign_classification() {
    let mut p_minus_1 = P_BYTES;
    p_minus_1[0] = 0xEC;
    let mut p_plus_1 = P_BYTES;
    p_plus_1[0] = 0xEE;

    let x = FieldElement::from_bytes(&p_minus_1);
    assert!(!x.is_overflow());
    assert!(!x.is_negative());

    // p itself packs as zero, which is even
    let x = FieldElement::from_bytes(&P_BYTES);
    assert!(x.is_overflow());
    assert!(!x.is_negative());

    // p + 1 packs as one, which is odd
    let x = FieldElement::from_bytes(&p_plus_1);
    assert!(x.is_overflow());
    assert!(x.is_negative());

    // 2^255 - 1 = p + 18, even residue
    let x = FieldElement::from_bytes(&[0xFF; 32]);
    assert!(x.is_overflow());
    assert!(!x.is_negative());

    assert!(!FieldElement::ZERO.is_overflow());
    assert!(!FieldElement::ZERO.is_negative());
    assert!(FieldElement::ONE.is_negative());
}
