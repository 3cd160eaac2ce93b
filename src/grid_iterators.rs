use std::fmt;

use crate::cells::Cartesian2DCoordinate;
use crate::units::{ColumnIndex, ColumnLength, RowIndex, RowLength};

/// Row-major iteration over every coordinate of a rectangular grid.
#[derive(Clone)]
pub struct CellIter {
    row_length: RowLength,
    current_cell_number: usize,
    cells_count: usize,
}

impl CellIter {
    pub fn new(cells_count: usize, row_length: RowLength) -> CellIter {
        CellIter {
            row_length,
            current_cell_number: 0,
            cells_count,
        }
    }
}

impl fmt::Debug for CellIter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "CellIter :: current_cell_number: {:?}, cells_count: {:?}",
               self.current_cell_number,
               self.cells_count)
    }
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = Cartesian2DCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = Cartesian2DCoordinate::from_row_major_index(self.current_cell_number,
                                                                    self.row_length);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}

#[derive(Debug, Copy, Clone)]
pub enum BatchIterType {
    Row,
    Column,
}

/// Iterates a grid one whole row, or one whole column, at a time.
#[derive(Debug, Copy, Clone)]
pub struct BatchIter {
    iter_type: BatchIterType,
    current_index: usize,
    row_length: RowLength,
    col_length: ColumnLength,
}

impl BatchIter {
    pub fn new(iter_type: BatchIterType,
               row_length: RowLength,
               col_length: ColumnLength)
               -> BatchIter {
        BatchIter {
            iter_type,
            current_index: 0,
            row_length,
            col_length,
        }
    }

    fn batches_count(&self) -> usize {
        match self.iter_type {
            BatchIterType::Row => self.col_length.0,
            BatchIterType::Column => self.row_length.0,
        }
    }
}

impl ExactSizeIterator for BatchIter {} // default impl using size_hint()
impl Iterator for BatchIter {
    type Item = Vec<Cartesian2DCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {

        if self.current_index >= self.batches_count() {
            return None;
        }

        let batch_index = self.current_index;
        let coords = match self.iter_type {
            BatchIterType::Row => {
                let RowLength(length) = self.row_length;
                (0..length)
                    .map(|i: usize| {
                        Cartesian2DCoordinate::from_row_column_indices(ColumnIndex(i),
                                                                       RowIndex(batch_index))
                    })
                    .collect()
            }
            BatchIterType::Column => {
                let ColumnLength(length) = self.col_length;
                (0..length)
                    .map(|i: usize| {
                        Cartesian2DCoordinate::from_row_column_indices(ColumnIndex(batch_index),
                                                                       RowIndex(i))
                    })
                    .collect()
            }
        };
        self.current_index += 1;
        Some(coords)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.batches_count() - self.current_index;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}
