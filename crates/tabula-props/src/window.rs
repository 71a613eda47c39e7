//! Fixed-width windowing of flat sequences.
//!
//! A flat sequence of `n` items is read as `n / width` tuples, tuple `i`
//! covering positions `[i * width, i * width + width)`. The `n % width`
//! trailing items belong to no tuple.

use crate::{Error, Result};

/// Largest tuple width in use (RGBA).
pub const MAX_WIDTH: usize = 4;

/// Validate a tuple width.
pub fn check_width(width: usize) -> Result<usize> {
    if (1..=MAX_WIDTH).contains(&width) {
        Ok(width)
    } else {
        Err(Error::InvalidLutWidth(width))
    }
}

/// Number of whole tuples in a sequence of `len` items.
#[inline]
pub fn tuple_count(len: usize, width: usize) -> usize {
    if width == 0 {
        0
    } else {
        len / width
    }
}

/// Number of trailing items that belong to no tuple.
#[inline]
pub fn orphaned(len: usize, width: usize) -> usize {
    if width == 0 {
        len
    } else {
        len % width
    }
}

/// Project `flat` into tuples.
///
/// `read` is called once per whole window and may reject it; the result pairs
/// every accepted value with its tuple index, so rejected windows leave gaps
/// rather than shifting later tuples.
pub fn project<S, T>(
    flat: &[S],
    width: usize,
    mut read: impl FnMut(&[S]) -> Option<T>,
) -> Vec<(usize, T)> {
    if width == 0 {
        return Vec::new();
    }
    flat.chunks_exact(width)
        .enumerate()
        .filter_map(|(index, window)| read(window).map(|value| (index, value)))
        .collect()
}

/// Write tuples back into an existing sequence.
///
/// Tuples must come in increasing index order. Writing stops at the first
/// tuple whose window does not fit entirely in `dest`; a window is never
/// partially written. Returns the number of tuples written.
pub fn write_back<'v, S, T: 'v>(
    dest: &mut [S],
    width: usize,
    tuples: impl IntoIterator<Item = (usize, &'v T)>,
    mut write: impl FnMut(&T, &mut [S]),
) -> usize {
    if width == 0 {
        return 0;
    }
    let mut written = 0;
    for (index, value) in tuples {
        let start = index.saturating_mul(width);
        let Some(window) = start
            .checked_add(width)
            .and_then(|end| dest.get_mut(start..end))
        else {
            break;
        };
        write(value, window);
        written += 1;
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(flat: &[f32]) -> Vec<(usize, [f32; 2])> {
        project(flat, 2, |w| Some([w[0], w[1]]))
    }

    #[test]
    fn test_project_ignores_tail() {
        let flat = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(pairs(&flat), vec![(0, [1.0, 2.0]), (1, [3.0, 4.0])]);
        assert_eq!(tuple_count(flat.len(), 2), 2);
        assert_eq!(orphaned(flat.len(), 2), 1);
    }

    #[test]
    fn test_rejected_window_keeps_index() {
        let flat = [1.0, -1.0, 3.0, 4.0, 5.0, 6.0];
        let tuples = project(&flat, 2, |w| (w[1] >= 0.0).then(|| w[0]));
        assert_eq!(tuples, vec![(1, 3.0), (2, 5.0)]);
    }

    #[test]
    fn test_write_back_leaves_tail_untouched() {
        for width in 1..=MAX_WIDTH {
            for len in 0..=9usize {
                let original: Vec<f32> = (0..len).map(|i| i as f32).collect();
                let tuples = project(&original, width, |w| Some(w.to_vec()));
                assert_eq!(tuples.len(), len / width);

                let mut dest = vec![-1.0f32; len];
                let tail = len - len % width;
                dest[tail..].copy_from_slice(&original[tail..]);
                let written = write_back(
                    &mut dest,
                    width,
                    tuples.iter().map(|(i, v)| (*i, v)),
                    |v, w| w.copy_from_slice(v),
                );

                assert_eq!(written, len / width);
                assert_eq!(dest, original, "width {width} len {len}");
            }
        }
    }

    #[test]
    fn test_write_back_never_partially_writes() {
        let mut dest = [0.0f32; 5];
        let values = [[1.0, 1.0, 1.0], [2.0, 2.0, 2.0]];
        let written = write_back(&mut dest, 3, values.iter().enumerate(), |v, w| {
            w.copy_from_slice(v)
        });
        assert_eq!(written, 1);
        assert_eq!(dest, [1.0, 1.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_check_width() {
        assert!(check_width(0).is_err());
        assert_eq!(check_width(4).unwrap(), 4);
        assert!(matches!(check_width(5), Err(Error::InvalidLutWidth(5))));
    }
}
