// Copyright (C) 2025, NTNU
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Direct solution of dense linear systems, plus the normal-equations products for least squares
//! problems.

use super::*;

use crate::error::Error;
use crate::type_aliases::Float;

/// Pivots smaller than this are treated as zero, and the system as singular
const PIVOT_TOLERANCE: Float = 1.0e-12;

impl Matrix<Float> {
    /// Direct solution of the square system `A x = b` by Gaussian elimination with partial
    /// pivoting, allocating the solution vector.
    pub fn solve_gaussian_elimination(&self, rhs: &[Float]) -> Result<Vec<Float>, Error> {
        let mut solution = vec![0.0; self.nr_rows()];

        self.solve_into(rhs, &mut solution)?;

        Ok(solution)
    }

    /// Like [Matrix::solve_gaussian_elimination], but writing into a caller-provided solution
    /// buffer. The working copy of the system is the only scratch allocation.
    pub fn solve_into(&self, rhs: &[Float], solution: &mut [Float]) -> Result<(), Error> {
        let n = self.nr_rows();

        if self.nr_cols() != n {
            return Err(Error::DimensionMismatch { expected: n, actual: self.nr_cols() });
        }

        if rhs.len() != n {
            return Err(Error::DimensionMismatch { expected: n, actual: rhs.len() });
        }

        if solution.len() != n {
            return Err(Error::DimensionMismatch { expected: n, actual: solution.len() });
        }

        // Work on a copy of the system, with the right-hand side carried as an extra column so
        // the row operations reach it too
        let mut system = Matrix::new([n, n + 1]);

        for i_row in 0..n {
            for i_col in 0..n {
                system[[i_row, i_col]] = self[[i_row, i_col]];
            }

            system[[i_row, n]] = rhs[i_row];
        }

        for i_col in 0..n {
            // Bring the largest remaining entry of this column into the pivot position
            let mut i_pivot = i_col;

            for i_row in (i_col + 1)..n {
                if system[[i_row, i_col]].abs() > system[[i_pivot, i_col]].abs() {
                    i_pivot = i_row;
                }
            }

            if system[[i_pivot, i_col]].abs() < PIVOT_TOLERANCE {
                return Err(Error::SingularMatrix { pivot_row: i_col });
            }

            if i_pivot != i_col {
                // Everything left of the pivot column is already zero in both rows, so the swap
                // can start at the pivot column
                for i_entry in i_col..=n {
                    let held = system[[i_col, i_entry]];
                    system[[i_col, i_entry]] = system[[i_pivot, i_entry]];
                    system[[i_pivot, i_entry]] = held;
                }
            }

            // Clear the column below the pivot by subtracting scaled copies of the pivot row
            for i_row in (i_col + 1)..n {
                let scaling = system[[i_row, i_col]] / system[[i_col, i_col]];

                for i_entry in i_col..=n {
                    system[[i_row, i_entry]] -= scaling * system[[i_col, i_entry]];
                }
            }
        }

        // The system is triangular now, so the unknowns resolve from the last row upwards
        for i_row in (0..n).rev() {
            let mut value = system[[i_row, n]];

            for i_col in (i_row + 1)..n {
                value -= system[[i_row, i_col]] * solution[i_col];
            }

            solution[i_row] = value / system[[i_row, i_row]];
        }

        Ok(())
    }

    /// Returns AᵀA, the coefficient matrix of the normal equations for a least squares problem.
    pub fn transposed_product(&self) -> Matrix<Float> {
        let nr_rows = self.nr_rows();
        let nr_cols = self.nr_cols();

        let mut product = Matrix::new([nr_cols, nr_cols]);

        for i_left in 0..nr_cols {
            for i_right in 0..nr_cols {
                let mut entry = 0.0;

                for i_row in 0..nr_rows {
                    entry += self[[i_row, i_left]] * self[[i_row, i_right]];
                }

                product[[i_left, i_right]] = entry;
            }
        }

        product
    }

    /// Returns Aᵀb, the right-hand side of the normal equations for a least squares problem.
    pub fn transposed_vector_product(&self, rhs: &[Float]) -> Vec<Float> {
        let nr_rows = self.nr_rows();
        let nr_cols = self.nr_cols();

        let mut product = vec![0.0; nr_cols];

        for i_col in 0..nr_cols {
            for i_row in 0..nr_rows {
                product[i_col] += self[[i_row, i_col]] * rhs[i_row];
            }
        }

        product
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// The right-hand side is built from a chosen solution, so the solver has to reproduce it.
    fn recovers_a_constructed_solution() {
        let matrix = Matrix {
            data: vec![
                2.0, 1.0, 0.0,
                1.0, 3.0, -1.0,
                0.0, -2.0, 4.0,
            ],
            shape: [3, 3],
        };

        let chosen = [1.0, -2.0, 3.0];

        let mut rhs = vec![0.0; 3];

        for i_row in 0..3 {
            for i_col in 0..3 {
                rhs[i_row] += matrix[[i_row, i_col]] * chosen[i_col];
            }
        }

        let solved = matrix.solve_gaussian_elimination(&rhs).unwrap();

        dbg!(&solved);

        for i in 0..3 {
            assert!(
                (solved[i] - chosen[i]).abs() < 1e-12,
                "Entry {}: {} != {}", i, solved[i], chosen[i]
            );
        }
    }

    #[test]
    fn solutions_can_go_into_an_existing_buffer() {
        let matrix = Matrix {
            data: vec![4.0, 0.0,
                       0.0, 0.5],
            shape: [2, 2],
        };

        let mut solution = [0.0; 2];

        matrix.solve_into(&[8.0, 1.0], &mut solution).unwrap();

        assert!((solution[0] - 2.0).abs() < 1e-14);
        assert!((solution[1] - 2.0).abs() < 1e-14);

        // A right-hand side of the wrong length is rejected before anything runs
        assert!(matches!(
            matrix.solve_into(&[1.0], &mut solution),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn a_rank_deficient_system_is_rejected() {
        // The second row is twice the first
        let matrix = Matrix {
            data: vec![1.0, 2.0,
                       2.0, 4.0],
            shape: [2, 2],
        };

        let result = matrix.solve_gaussian_elimination(&[1.0, 2.0]);

        assert!(matches!(result, Err(Error::SingularMatrix { .. })));
    }

    #[test]
    fn normal_equations_recover_an_overdetermined_solution() {
        // Three equations, two unknowns, consistent system: x = 1, y = 2
        let matrix = Matrix {
            data: vec![1.0, 0.0,
                       0.0, 1.0,
                       1.0, 1.0],
            shape: [3, 2],
        };

        let rhs = vec![1.0, 2.0, 3.0];

        let normal_matrix = matrix.transposed_product();
        let normal_rhs = matrix.transposed_vector_product(&rhs);

        let solved = normal_matrix.solve_gaussian_elimination(&normal_rhs).unwrap();

        assert!((solved[0] - 1.0).abs() < 1e-12);
        assert!((solved[1] - 2.0).abs() < 1e-12);
    }
}
