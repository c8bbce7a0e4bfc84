//! The square grid of modules that makes up a QR Code symbol.

use crate::version::Version;

/// The state of a single module in the symbol grid.
///
/// `Reserved` marks a module set aside for format/version information or a
/// function pattern before its final bit value is known; it never survives
/// past module placement. `None` marks a data-area module not yet written;
/// it never survives past module placement either. A fully placed, masked
/// matrix contains only `Light` and `Dark`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Module {
    None,
    Light,
    Dark,
    Reserved,
}

impl Module {
    pub(crate) fn is_dark(self) -> bool {
        matches!(self, Module::Dark)
    }
}

/// A flat, row-major grid of [`Module`]s, `side * side` in size.
///
/// Square side length is always `4 * version + 17`, per ISO/IEC 18004.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    side: i32,
    version: Version,
    cells: Vec<Module>,
}

impl Matrix {
    pub(crate) fn new(version: Version) -> Self {
        let side = i32::from(version.value()) * 4 + 17;
        Self {
            side,
            version,
            cells: vec![Module::None; (side * side) as usize],
        }
    }

    /// Side length of the (square) symbol, in modules.
    pub fn side(&self) -> i32 {
        self.side
    }

    /// The symbol version this matrix was built for.
    pub fn version(&self) -> Version {
        self.version
    }

    pub fn get(&self, x: i32, y: i32) -> Module {
        self.cells[self.index(x, y)]
    }

    pub(crate) fn set(&mut self, x: i32, y: i32, m: Module) {
        let i = self.index(x, y);
        self.cells[i] = m;
    }

    fn index(&self, x: i32, y: i32) -> usize {
        assert!(
            (0..self.side).contains(&x) && (0..self.side).contains(&y),
            "module coordinates out of range"
        );
        (y * self.side + x) as usize
    }

    /// True if every module has been assigned a final `Light` or `Dark`
    /// value (no placement or masking step left anything pending).
    pub fn is_fully_placed(&self) -> bool {
        self.cells
            .iter()
            .all(|m| matches!(m, Module::Light | Module::Dark))
    }

    /// All `(x, y)` coordinates in row-major order. Does not borrow `self`,
    /// so callers can mutate the matrix while iterating.
    pub(crate) fn iter_coords(&self) -> impl Iterator<Item = (i32, i32)> {
        let side = self.side;
        (0..side).flat_map(move |y| (0..side).map(move |x| (x, y)))
    }
}

#[cfg(test)]
impl Matrix {
    /// Builds a matrix of an arbitrary side length, not tied to any real
    /// QR Code version. Used by penalty-scoring tests that exercise
    /// `evaluate_penalty` against small fixture grids.
    pub(crate) fn new_square_for_test(side: i32) -> Self {
        Self {
            side,
            version: Version::new(1),
            cells: vec![Module::None; (side * side) as usize],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_matrix_is_all_none() {
        let m = Matrix::new(Version::new(1));
        assert_eq!(m.side(), 21);
        assert!(m.iter_coords().all(|(x, y)| m.get(x, y) == Module::None));
        assert!(!m.is_fully_placed());
    }

    #[test]
    fn set_and_get_round_trip() {
        let mut m = Matrix::new(Version::new(1));
        m.set(3, 4, Module::Dark);
        assert_eq!(m.get(3, 4), Module::Dark);
    }
}
