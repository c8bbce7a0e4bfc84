//! N3 finder-pattern-shadow detection for the mask penalty score (rule
//! N3 in spec §4.G): tracks run lengths along a row or column and counts
//! occurrences of the 1:1:3:1:1 finder shadow, in either direction,
//! surrounded by at least 4 modules of light border.

pub(crate) struct FinderPenalty {
    size: i32,
    run_history: [i32; 7],
}

impl FinderPenalty {
    pub(crate) fn new(size: i32) -> Self {
        Self {
            size,
            run_history: [0i32; 7],
        }
    }

    /// Pushes a newly terminated run length to the front of the history,
    /// dropping the oldest. The very first run recorded absorbs the
    /// implicit light border outside the matrix.
    pub(crate) fn add_history(&mut self, mut current_run_length: i32) {
        if self.run_history[0] == 0 {
            current_run_length += self.size;
        }
        let rh = &mut self.run_history;
        for i in (0..rh.len() - 1).rev() {
            rh[i + 1] = rh[i];
        }
        rh[0] = current_run_length;
    }

    /// Must be called only immediately after a light run has just been
    /// pushed. Returns 0, 1, or 2 depending on whether the run history
    /// centered on that light run matches the finder shadow on one or both
    /// sides.
    pub(crate) fn count_patterns(&self) -> i32 {
        let rh = &self.run_history;
        let n = rh[1];
        debug_assert!(n <= self.size * 3);
        let core = n > 0 && rh[2] == n && rh[3] == n * 3 && rh[4] == n && rh[5] == n;
        i32::from(core && rh[0] >= n * 4 && rh[6] >= n)
            + i32::from(core && rh[6] >= n * 4 && rh[0] >= n)
    }

    /// Call once at the end of a row or column to flush the final run
    /// (closed off by the implicit light border past the matrix edge) and
    /// return the total pattern count for that line.
    pub(crate) fn terminate_and_count(
        mut self,
        current_run_is_dark: bool,
        mut current_run_length: i32,
    ) -> i32 {
        if current_run_is_dark {
            self.add_history(current_run_length);
            current_run_length = 0;
        }
        current_run_length += self.size;
        self.add_history(current_run_length);
        self.count_patterns()
    }
}
