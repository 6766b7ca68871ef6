use std::{
    fmt::{self, Display, Write},
    ops::{Index, IndexMut},
};

use ndarray::{Array2, ArrayView1, ArrayView2, ArrayViewMut2};

/// A fixed-size, mutable row-major grid of weights, indexed as `grid[(row, column)]`.
///
/// Dimensions are fixed at construction. Indexing out of range panics.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericGrid {
    content: Array2<f32>,
}

impl NumericGrid {
    /// Creates a new zero filled `NumericGrid`.
    pub fn zeros(rows: usize, columns: usize) -> Self {
        Self {
            content: Array2::zeros((rows, columns)),
        }
    }

    /// Creates a new `NumericGrid` populating each cell with a generator.
    ///
    /// # Arguments
    /// * `rows` - The amount of rows.
    /// * `columns` - The amount of columns.
    /// * `f` - Called once per cell in row-major order with the cell's `(row, column)`.
    pub fn from_fn<F>(rows: usize, columns: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f32,
    {
        Self {
            content: Array2::from_shape_fn((rows, columns), |(r, c)| f(r, c)),
        }
    }

    pub fn rows(&self) -> usize {
        self.content.nrows()
    }

    pub fn columns(&self) -> usize {
        self.content.ncols()
    }

    /// Returns a view of a single row.
    ///
    /// # Panics
    /// If `row` is out of range.
    pub fn row(&self, row: usize) -> ArrayView1<'_, f32> {
        self.content.row(row)
    }

    pub fn view(&self) -> ArrayView2<'_, f32> {
        self.content.view()
    }

    pub fn view_mut(&mut self) -> ArrayViewMut2<'_, f32> {
        self.content.view_mut()
    }

    /// Formats the grid one row per line, cells in fixed-width columns.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for (r, row) in self.content.rows().into_iter().enumerate() {
            if r > 0 {
                out.push('\n');
            }
            for (c, value) in row.iter().enumerate() {
                if c > 0 {
                    out.push(' ');
                }
                let _ = write!(out, "{value:>8.4}");
            }
        }

        out
    }
}

impl Index<(usize, usize)> for NumericGrid {
    type Output = f32;

    fn index(&self, (row, column): (usize, usize)) -> &f32 {
        &self.content[[row, column]]
    }
}

impl IndexMut<(usize, usize)> for NumericGrid {
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut f32 {
        &mut self.content[[row, column]]
    }
}

impl Display for NumericGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_is_called_row_major() {
        let mut calls = vec![];
        let grid = NumericGrid::from_fn(2, 3, |r, c| {
            calls.push((r, c));
            (r * 10 + c) as f32
        });

        assert_eq!(calls, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
        assert_eq!(grid[(1, 2)], 12.0);
        assert_eq!(grid.row(1).to_vec(), vec![10.0, 11.0, 12.0]);
    }

    #[test]
    fn dimensions_are_kept() {
        let grid = NumericGrid::zeros(6, 5);
        assert_eq!(grid.rows(), 6);
        assert_eq!(grid.columns(), 5);
        assert!(grid.view().iter().all(|&w| w == 0.0));
    }

    #[test]
    fn index_mut_writes_single_cell() {
        let mut grid = NumericGrid::zeros(2, 2);
        grid[(0, 1)] = 0.5;

        assert_eq!(grid[(0, 1)], 0.5);
        assert_eq!(grid[(1, 0)], 0.0);
    }

    #[test]
    #[should_panic]
    fn out_of_range_index_panics() {
        let grid = NumericGrid::zeros(2, 2);
        let _ = grid[(2, 0)];
    }

    #[test]
    fn dump_layout() {
        let grid = NumericGrid::from_fn(2, 2, |r, c| if r == c { 1.0 } else { -0.5 });
        assert_eq!(grid.dump(), "  1.0000  -0.5000\n -0.5000   1.0000");
    }
}
