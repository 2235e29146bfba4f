//! Column sorts: destructive heap/shell sorts and index-producing maps.

use alloc::vec::Vec;

use crate::traits::FloatScalar;

use super::Matrix;

/// In-place ascending heap sort.
pub fn heap_sort<T: FloatScalar>(v: &mut [T]) {
    let n = v.len();
    if n < 2 {
        return;
    }
    let mut bottom = n;
    let mut top = n / 2;
    while bottom > 1 {
        let target;
        if top > 0 {
            // promote up to form the heap
            top -= 1;
            target = v[top];
        } else {
            // drop the largest to the bottom
            bottom -= 1;
            target = v[bottom];
            v[bottom] = v[0];
        }
        let mut parent = top;
        let mut child = 2 * parent + 1;
        while child < bottom {
            if child + 1 < bottom && v[child] < v[child + 1] {
                child += 1;
            }
            if target < v[child] {
                v[parent] = v[child];
                parent = child;
                child = 2 * parent + 1;
            } else {
                break;
            }
        }
        v[parent] = target;
    }
}

/// In-place ascending shell sort (Sedgewick 3h+1 gap sequence).
pub fn shell_sort<T: FloatScalar>(v: &mut [T]) {
    let n = v.len();
    let mut h = 1;
    while h <= n {
        h = 3 * h + 1;
    }
    while h > 1 {
        h /= 3;
        for i in h..n {
            let xi = v[i];
            let mut j = i;
            while j >= h && xi < v[j - h] {
                v[j] = v[j - h];
                j -= h;
            }
            v[j] = xi;
        }
    }
}

/// Index map of the ascending sort: `v[map[0]] <= v[map[1]] <= ...`.
///
/// `v` itself is left untouched.
///
/// ```
/// use densemat::matrix::heap_map;
/// let m = heap_map(&[3.0, 1.0, 2.0]);
/// assert_eq!(m, vec![1, 2, 0]);
/// ```
pub fn heap_map<T: FloatScalar>(v: &[T]) -> Vec<usize> {
    let n = v.len();
    let mut m: Vec<usize> = (0..n).collect();
    if n < 2 {
        return m;
    }
    let mut bottom = n;
    let mut top = n / 2;
    while bottom > 1 {
        let target;
        if top > 0 {
            top -= 1;
            target = m[top];
        } else {
            bottom -= 1;
            target = m[bottom];
            m[bottom] = m[0];
        }
        let mut parent = top;
        let mut child = 2 * parent + 1;
        while child < bottom {
            if child + 1 < bottom && v[m[child]] < v[m[child + 1]] {
                child += 1;
            }
            if v[target] < v[m[child]] {
                m[parent] = m[child];
                parent = child;
                child = 2 * parent + 1;
            } else {
                break;
            }
        }
        m[parent] = target;
    }
    m
}

/// Rank of each element given a sort map: `rankings(map)[map[k]] == k`.
///
/// ```
/// use densemat::matrix::{heap_map, rankings};
/// let v = [30.0, 10.0, 20.0];
/// let r = rankings(&heap_map(&v));
/// assert_eq!(r, vec![2, 0, 1]);
/// ```
pub fn rankings(map: &[usize]) -> Vec<usize> {
    let n = map.len();
    let mut z = Vec::new();
    z.resize(n, 0);
    for (rank, &k) in map.iter().enumerate() {
        assert!(k < n, "sort map entry {} out of range for length {}", k, n);
        z[k] = rank;
    }
    z
}

impl<T: FloatScalar> Matrix<T> {
    /// Sort column `col` ascending, in place (heap sort).
    pub fn sort_col(&mut self, col: usize) {
        let nrows = self.nrows;
        heap_sort(&mut self.data[col * nrows..(col + 1) * nrows]);
    }

    /// Sort column `col` ascending, in place (shell sort).
    pub fn sort_col_shell(&mut self, col: usize) {
        let nrows = self.nrows;
        shell_sort(&mut self.data[col * nrows..(col + 1) * nrows]);
    }

    /// Index map of the ascending sort of column `col`, without sorting.
    pub fn sort_map(&self, col: usize) -> Vec<usize> {
        heap_map(&self.data[col * self.nrows..(col + 1) * self.nrows])
    }
}
