//! Mask pattern application and penalty scoring (spec §4.G).
//!
//! Masking XORs a periodic black/white pattern across the data-area
//! modules only (the free mask excludes function patterns and format/
//! version strips) to avoid accidental structure that would confuse a
//! scanner, then scores each of the 8 candidate patterns with four
//! penalty rules and keeps the lowest-scoring one.

use crate::ecc::CodeEcc;
use crate::finder_penalty::FinderPenalty;
use crate::matrix::{Matrix, Module};
use crate::tables;
use crate::{PENALTY_N1, PENALTY_N2, PENALTY_N3, PENALTY_N4};

/// A mask pattern index, 0 through 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mask(u8);

impl Mask {
    /// Creates a mask pattern index.
    ///
    /// Panics if `pattern` is greater than 7.
    pub fn new(pattern: u8) -> Self {
        assert!(pattern <= 7, "mask pattern out of range");
        Self(pattern)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

/// Evaluates mask predicate `pattern` at module coordinates `(x, y)`:
/// `true` means the module should be inverted.
fn predicate(pattern: Mask, x: i32, y: i32) -> bool {
    match pattern.value() {
        0 => (x + y) % 2 == 0,
        1 => y % 2 == 0,
        2 => x % 3 == 0,
        3 => (x + y) % 3 == 0,
        4 => (x / 3 + y / 2) % 2 == 0,
        5 => (x * y) % 2 + (x * y) % 3 == 0,
        6 => ((x * y) % 2 + (x * y) % 3) % 2 == 0,
        7 => ((x + y) % 2 + (x * y) % 3) % 2 == 0,
        _ => unreachable!(),
    }
}

fn module_for(dark: bool) -> Module {
    if dark {
        Module::Dark
    } else {
        Module::Light
    }
}

/// Writes the 15-bit format string for `(ec, pattern)` into the format
/// strips reserved during module placement, skipping the timing column/row
/// and the dark module, per ISO/IEC 18004 §8.9.
fn draw_format_bits(matrix: &mut Matrix, ec: CodeEcc, pattern: Mask) {
    let bits = u32::from(tables::format_info(ec, pattern));
    let get = |i: i32| (bits >> i) & 1 != 0;
    let side = matrix.side();

    for i in 0..6 {
        matrix.set(8, i, module_for(get(i)));
    }
    matrix.set(8, 7, module_for(get(6)));
    matrix.set(8, 8, module_for(get(7)));
    matrix.set(7, 8, module_for(get(8)));
    for i in 9..15 {
        matrix.set(14 - i, 8, module_for(get(i)));
    }

    for i in 0..8 {
        matrix.set(side - 1 - i, 8, module_for(get(i)));
    }
    for i in 8..15 {
        matrix.set(8, side - 15 + i, module_for(get(i)));
    }
    matrix.set(8, side - 8, Module::Dark);
}

/// Applies mask `pattern` to the free (non-function) modules of `matrix`
/// and overlays the format information for `ec`. Returns a new matrix;
/// `matrix` and `free_mask` are not modified.
///
/// `free_mask[i]` tells whether the module at the corresponding flattened
/// position is eligible for masking; function patterns and reserved
/// format/version strips are `false` and pass through unchanged.
pub fn apply_mask(matrix: &Matrix, free_mask: &[bool], ec: CodeEcc, pattern: Mask) -> Matrix {
    let side = matrix.side();
    let mut out = Matrix::new(matrix.version());
    for (x, y) in matrix.iter_coords() {
        let idx = (y * side + x) as usize;
        let m = matrix.get(x, y);
        let value = if free_mask[idx] && predicate(pattern, x, y) {
            module_for(!m.is_dark())
        } else {
            m
        };
        out.set(x, y, value);
    }
    draw_format_bits(&mut out, ec, pattern);
    out
}

/// Scores a fully masked matrix with the four penalty rules (N1 runs, N2
/// 2x2 blocks, N3 finder-shadow windows, N4 dark/light balance) and
/// returns their sum.
pub fn evaluate_penalty(matrix: &Matrix) -> i32 {
    let side = matrix.side();
    let mut penalty = 0;

    for y in 0..side {
        penalty += run_penalty((0..side).map(|x| matrix.get(x, y).is_dark()));
    }
    for x in 0..side {
        penalty += run_penalty((0..side).map(|y| matrix.get(x, y).is_dark()));
    }

    for y in 0..side - 1 {
        for x in 0..side - 1 {
            let c = matrix.get(x, y).is_dark();
            if c == matrix.get(x + 1, y).is_dark()
                && c == matrix.get(x, y + 1).is_dark()
                && c == matrix.get(x + 1, y + 1).is_dark()
            {
                penalty += PENALTY_N2;
            }
        }
    }

    for y in 0..side {
        penalty += finder_penalty_for_line(side, |i| matrix.get(i, y).is_dark());
    }
    for x in 0..side {
        penalty += finder_penalty_for_line(side, |i| matrix.get(x, i).is_dark());
    }

    let dark: i32 = matrix
        .iter_coords()
        .filter(|&(x, y)| matrix.get(x, y).is_dark())
        .count() as i32;
    let total = side * side;
    penalty += (dark * 2 - total).abs() * 10 / total * PENALTY_N4;

    penalty
}

fn run_penalty(cells: impl Iterator<Item = bool>) -> i32 {
    let mut penalty = 0;
    let mut run_color: Option<bool> = None;
    let mut run_len = 0;
    for dark in cells {
        if Some(dark) == run_color {
            run_len += 1;
        } else {
            if run_len >= 5 {
                penalty += PENALTY_N1 + (run_len - 5);
            }
            run_color = Some(dark);
            run_len = 1;
        }
    }
    if run_len >= 5 {
        penalty += PENALTY_N1 + (run_len - 5);
    }
    penalty
}

fn finder_penalty_for_line(side: i32, at: impl Fn(i32) -> bool) -> i32 {
    let mut fp = FinderPenalty::new(side);
    let mut run_color = false;
    let mut run_len = 0i32;
    let mut patterns = 0i32;
    for i in 0..side {
        let dark = at(i);
        if dark == run_color {
            run_len += 1;
        } else {
            fp.add_history(run_len);
            // A finder-shadow window is always centered on a light run, so
            // only check just after one has terminated.
            if !run_color {
                patterns += fp.count_patterns();
            }
            run_color = dark;
            run_len = 1;
        }
    }
    patterns += fp.terminate_and_count(run_color, run_len);
    patterns * PENALTY_N3
}

/// Applies all 8 mask patterns and returns the matrix and pattern index
/// with the lowest penalty score, breaking ties in favor of the lower
/// index.
pub fn mask_modules_auto(matrix: &Matrix, free_mask: &[bool], ec: CodeEcc) -> (Matrix, Mask) {
    let mut best: Option<(Matrix, Mask, i32)> = None;
    for p in 0..8u8 {
        let pattern = Mask::new(p);
        let masked = apply_mask(matrix, free_mask, ec, pattern);
        let score = evaluate_penalty(&masked);
        if best.as_ref().map_or(true, |(_, _, best_score)| score < *best_score) {
            best = Some((masked, pattern, score));
        }
    }
    let (matrix, pattern, _) = best.expect("mask pattern range 0..8 is non-empty");
    (matrix, pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_is_involution_on_free_modules() {
        let mut m = Matrix::new(crate::version::Version::new(1));
        let side = m.side();
        for (x, y) in m.iter_coords() {
            m.set(x, y, if (x + y) % 2 == 0 { Module::Dark } else { Module::Light });
        }
        let free_mask = vec![true; (side * side) as usize];
        let once = apply_mask(&m, &free_mask, CodeEcc::Low, Mask::new(3));
        let twice = apply_mask(&once, &free_mask, CodeEcc::Low, Mask::new(3));
        for (x, y) in m.iter_coords() {
            if x == 8 || y == 8 {
                continue; // format strip was overwritten, not re-XORed
            }
            assert_eq!(m.get(x, y), twice.get(x, y));
        }
    }

    #[test]
    fn all_dark_four_by_four_penalty_is_127() {
        let mut m = Matrix::new_square_for_test(4);
        for (x, y) in m.iter_coords() {
            m.set(x, y, Module::Dark);
        }
        assert_eq!(evaluate_penalty(&m), 127);
    }

    #[test]
    fn four_by_four_penalty_density_cases() {
        let cases: [(&[[u8; 4]; 4], i32); 3] = [
            (
                &[[0, 0, 0, 0], [0, 1, 0, 1], [0, 0, 0, 0], [0, 1, 0, 1]],
                50,
            ),
            (
                &[[1, 0, 1, 0], [0, 1, 0, 1], [1, 0, 1, 0], [0, 1, 0, 1]],
                0,
            ),
            (
                &[[1, 1, 1, 0], [0, 1, 0, 1], [1, 0, 1, 0], [0, 1, 1, 1]],
                20,
            ),
        ];
        for (grid, expected) in cases {
            let mut m = Matrix::new_square_for_test(4);
            for (y, row) in grid.iter().enumerate() {
                for (x, &v) in row.iter().enumerate() {
                    m.set(x as i32, y as i32, if v == 1 { Module::Dark } else { Module::Light });
                }
            }
            assert_eq!(evaluate_penalty(&m), expected);
        }
    }

    /// "HELLO WORLD" encoded at version 1, EC level Q: the pre-masking
    /// matrix and its free mask, and the penalty score each of the 8 mask
    /// patterns produces. Pattern 6 scores lowest and is the one
    /// `mask_modules_auto` should select.
    #[test]
    fn hello_world_version_1_q_penalty_scores() {
        const DARK: u8 = 1;
        const LIGHT: u8 = 0;
        const RESERVED: u8 = 2;
        #[rustfmt::skip]
        let raw: [[u8; 21]; 21] = [
            [1,1,1,1,1,1,1,0,2,1,1,0,1,0,1,1,1,1,1,1,1],
            [1,0,0,0,0,0,1,0,2,1,0,0,0,0,1,0,0,0,0,0,1],
            [1,0,1,1,1,0,1,0,2,0,1,1,0,0,1,0,1,1,1,0,1],
            [1,0,1,1,1,0,1,0,2,1,0,1,0,0,1,0,1,1,1,0,1],
            [1,0,1,1,1,0,1,0,2,0,0,0,1,0,1,0,1,1,1,0,1],
            [1,0,0,0,0,0,1,0,2,1,1,1,0,0,1,0,0,0,0,0,1],
            [1,1,1,1,1,1,1,0,1,0,1,0,1,0,1,1,1,1,1,1,1],
            [0,0,0,0,0,0,0,0,2,1,0,1,0,0,0,0,0,0,0,0,0],
            [2,2,2,2,2,2,1,2,2,0,1,0,0,2,2,2,2,2,2,2,2],
            [0,0,0,1,0,1,0,1,1,0,1,0,0,1,0,1,1,1,0,1,1],
            [1,0,0,1,1,1,1,1,1,1,0,0,1,0,0,0,0,1,1,0,1],
            [0,0,1,1,1,0,0,0,0,1,1,0,0,0,0,0,0,0,1,0,0],
            [0,0,1,0,0,0,1,0,0,0,0,1,0,0,0,1,0,0,0,0,0],
            [0,0,0,0,0,0,0,0,1,0,0,0,0,1,1,1,0,1,1,1,1],
            [1,1,1,1,1,1,1,0,2,0,0,0,1,0,1,1,1,1,0,0,1],
            [1,0,0,0,0,0,1,0,2,0,0,0,1,1,1,0,0,0,0,1,0],
            [1,0,1,1,1,0,1,0,2,0,0,0,1,0,0,1,0,1,0,1,0],
            [1,0,1,1,1,0,1,0,2,0,0,0,0,0,0,0,0,1,0,0,0],
            [1,0,1,1,1,0,1,0,2,0,1,1,1,1,0,1,1,1,1,0,0],
            [1,0,0,0,0,0,1,0,2,1,1,0,1,0,0,1,0,0,0,0,1],
            [1,1,1,1,1,1,1,0,2,0,1,1,1,1,0,1,1,0,1,0,0],
        ];
        #[rustfmt::skip]
        let flags: [[u8; 21]; 21] = [
            [0,0,0,0,0,0,0,0,0,1,1,1,1,0,0,0,0,0,0,0,0],
            [0,0,0,0,0,0,0,0,0,1,1,1,1,0,0,0,0,0,0,0,0],
            [0,0,0,0,0,0,0,0,0,1,1,1,1,0,0,0,0,0,0,0,0],
            [0,0,0,0,0,0,0,0,0,1,1,1,1,0,0,0,0,0,0,0,0],
            [0,0,0,0,0,0,0,0,0,1,1,1,1,0,0,0,0,0,0,0,0],
            [0,0,0,0,0,0,0,0,0,1,1,1,1,0,0,0,0,0,0,0,0],
            [0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
            [0,0,0,0,0,0,0,0,0,1,1,1,1,0,0,0,0,0,0,0,0],
            [0,0,0,0,0,0,0,0,0,1,1,1,1,0,0,0,0,0,0,0,0],
            [1,1,1,1,1,1,0,1,1,1,1,1,1,1,1,1,1,1,1,1,1],
            [1,1,1,1,1,1,0,1,1,1,1,1,1,1,1,1,1,1,1,1,1],
            [1,1,1,1,1,1,0,1,1,1,1,1,1,1,1,1,1,1,1,1,1],
            [1,1,1,1,1,1,0,1,1,1,1,1,1,1,1,1,1,1,1,1,1],
            [0,0,0,0,0,0,0,0,0,1,1,1,1,1,1,1,1,1,1,1,1],
            [0,0,0,0,0,0,0,0,0,1,1,1,1,1,1,1,1,1,1,1,1],
            [0,0,0,0,0,0,0,0,0,1,1,1,1,1,1,1,1,1,1,1,1],
            [0,0,0,0,0,0,0,0,0,1,1,1,1,1,1,1,1,1,1,1,1],
            [0,0,0,0,0,0,0,0,0,1,1,1,1,1,1,1,1,1,1,1,1],
            [0,0,0,0,0,0,0,0,0,1,1,1,1,1,1,1,1,1,1,1,1],
            [0,0,0,0,0,0,0,0,0,1,1,1,1,1,1,1,1,1,1,1,1],
            [0,0,0,0,0,0,0,0,0,1,1,1,1,1,1,1,1,1,1,1,1],
        ];

        let side = 21;
        let mut m = Matrix::new_square_for_test(side);
        let mut free_mask = vec![false; (side * side) as usize];
        for y in 0..side {
            for x in 0..side {
                let v = raw[y as usize][x as usize];
                let module = match v {
                    v if v == DARK => Module::Dark,
                    v if v == LIGHT => Module::Light,
                    v if v == RESERVED => Module::Reserved,
                    _ => unreachable!(),
                };
                m.set(x, y, module);
                free_mask[(y * side + x) as usize] = flags[y as usize][x as usize] == 1;
            }
        }

        let expected = [347, 470, 506, 441, 539, 516, 314, 558];
        for (p, &want) in expected.iter().enumerate() {
            let masked = apply_mask(&m, &free_mask, CodeEcc::Quartile, Mask::new(p as u8));
            assert_eq!(evaluate_penalty(&masked), want, "mask pattern {p}");
        }

        let (_, best_pattern) = mask_modules_auto(&m, &free_mask, CodeEcc::Quartile);
        assert_eq!(best_pattern.value(), 6);
    }
}
