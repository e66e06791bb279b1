//! Dense vector math used by the vectorizer
//!
//! Vectors are plain slices; every binary operation expects both operands
//! to be laid out against the same vocabulary.

use num::Float;

/// Sum of squares
#[inline]
pub fn norm_sq<N>(vec: &[N]) -> N
where
    N: Float,
{
    vec.iter().fold(N::zero(), |acc, &x| acc + x * x)
}

/// Euclidean (L2) norm
#[inline]
pub fn l2_norm<N>(vec: &[N]) -> N
where
    N: Float,
{
    norm_sq(vec).sqrt()
}

/// L2 normalization
///
/// A zero vector is returned unchanged instead of dividing by zero.
///
/// # Arguments
/// * `vec` - input vector
///
/// # Returns
/// * `Vec<N>` - unit-length copy of `vec`, or `vec` itself if its norm is 0
pub fn l2_normalize<N>(vec: &[N]) -> Vec<N>
where
    N: Float,
{
    let mut out = vec.to_vec();
    l2_normalize_in_place(&mut out);
    out
}

/// In-place variant of [`l2_normalize`]
#[inline]
pub fn l2_normalize_in_place<N>(vec: &mut [N])
where
    N: Float,
{
    let norm = l2_norm(vec);
    if norm == N::zero() {
        return;
    }
    for x in vec.iter_mut() {
        *x = *x / norm;
    }
}

/// Elementwise product
#[inline]
pub fn hadamard<N>(a: &[N], b: &[N]) -> Vec<N>
where
    N: Float,
{
    debug_assert_eq!(
        a.len(),
        b.len(),
        "Vectors must be of the same length to compute hadamard product."
    );
    a.iter().zip(b).map(|(&x, &y)| x * y).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: &[f64], b: &[f64], tol: f64) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() <= tol)
    }

    #[test]
    fn normalized_vector_has_unit_length() {
        let v = l2_normalize(&[3.0_f64, 4.0]);
        assert!(approx_eq(&v, &[0.6, 0.8], 1e-12));
        assert!((l2_norm(&v) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn normalization_is_idempotent() {
        let v = [0.2_f64, -1.5, 3.0, 0.0, 7.25];
        let once = l2_normalize(&v);
        let twice = l2_normalize(&once);
        assert!(approx_eq(&once, &twice, 1e-9));
    }

    #[test]
    fn zero_vector_is_unchanged() {
        assert_eq!(l2_normalize(&[0.0_f64, 0.0, 0.0]), vec![0.0, 0.0, 0.0]);
        assert!(l2_normalize::<f64>(&[]).is_empty());
    }

    #[test]
    fn works_for_f32() {
        let v = l2_normalize(&[0.0_f32, 2.0]);
        assert_eq!(v, vec![0.0, 1.0]);
    }

    #[test]
    fn hadamard_and_norm_sq() {
        let a = [1.0_f64, 2.0, 3.0];
        let b = [4.0_f64, 0.5, 0.0];
        assert_eq!(hadamard(&a, &b), vec![4.0, 1.0, 0.0]);
        assert_eq!(norm_sq(&a), 14.0);
    }
}
