//! Linear algebra over GF(2)
//!
//! Matrices are row-major arrays of 0/1 bytes. Addition is XOR and
//! multiplication is AND, so every product is reduced mod 2 as it accumulates.

/// Matrix–vector product mod 2: `(m · v) mod 2`
pub fn mat_vec<const R: usize, const C: usize>(m: &[[u8; C]; R], v: &[u8; C]) -> [u8; R] {
    let mut out = [0u8; R];
    for (acc, row) in out.iter_mut().zip(m.iter()) {
        *acc = dot(row, v);
    }
    out
}

/// Inner product mod 2
pub fn dot<const N: usize>(a: &[u8; N], b: &[u8; N]) -> u8 {
    a.iter()
        .zip(b.iter())
        .fold(0u8, |acc, (&x, &y)| acc ^ (x & y & 1))
}

/// Column `j` of a matrix
///
/// # Panics
///
/// Panics if `j >= C`.
pub fn column<const R: usize, const C: usize>(m: &[[u8; C]; R], j: usize) -> [u8; R] {
    let mut out = [0u8; R];
    for (dst, row) in out.iter_mut().zip(m.iter()) {
        *dst = row[j];
    }
    out
}

/// `acc += v` over GF(2)
pub fn add_assign<const N: usize>(acc: &mut [u8; N], v: &[u8; N]) {
    for (a, &b) in acc.iter_mut().zip(v.iter()) {
        *a ^= b & 1;
    }
}

/// Returns true if every entry is zero
pub fn is_zero<const N: usize>(v: &[u8; N]) -> bool {
    v.iter().all(|&b| b == 0)
}
