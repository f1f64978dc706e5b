//! Products with matrices stored in coordinate (triplet) format.
//!
//! Each matrix is given as parallel `rows`, `cols` and `vals` slices with
//! 0-based indices. Repeated entries are summed. The output slice is
//! overwritten, and its length together with the length of `v` fixes the
//! matrix shape.

use sprs::{CsMat, TriMat, prod::mul_acc_mat_vec_csr};

/// Computes `out = A * v`.
pub fn coo_mul(rows: &[usize], cols: &[usize], vals: &[f64], v: &[f64], out: &mut [f64]) {
    let mut trimat = TriMat::with_capacity((out.len(), v.len()), vals.len());
    for ((&i, &j), &a) in rows.iter().zip(cols).zip(vals) {
        trimat.add_triplet(i, j, a);
    }
    csr_mul(&trimat, v, out);
}

/// Computes `out = Aᵀ * v`.
pub fn coo_mul_transposed(
    rows: &[usize],
    cols: &[usize],
    vals: &[f64],
    v: &[f64],
    out: &mut [f64],
) {
    coo_mul(cols, rows, vals, v, out);
}

/// Computes `out = A * v` for a symmetric `A` stored by one triangle.
///
/// Off-diagonal entries are mirrored into the other triangle.
pub fn coo_mul_symmetric(
    rows: &[usize],
    cols: &[usize],
    vals: &[f64],
    v: &[f64],
    out: &mut [f64],
) {
    let mut trimat = TriMat::with_capacity((out.len(), v.len()), 2 * vals.len());
    for ((&i, &j), &a) in rows.iter().zip(cols).zip(vals) {
        trimat.add_triplet(i, j, a);
        if i != j {
            trimat.add_triplet(j, i, a);
        }
    }
    csr_mul(&trimat, v, out);
}

fn csr_mul(trimat: &TriMat<f64>, v: &[f64], out: &mut [f64]) {
    let mat: CsMat<f64> = trimat.to_csr();
    out.fill(0.0);
    mul_acc_mat_vec_csr(mat.view(), v, out);
}
