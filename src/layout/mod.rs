//! Grid layout engine
//!
//! Assigns a flat, ordered list of items to rows and columns.
//! Rows fill left-to-right, top-to-bottom; the last row may be partially
//! filled and is never padded.

use thiserror::Error;

/// Errors raised by the layout engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The column count must be at least 1
    #[error("invalid argument: column count must be positive, got {0}")]
    InvalidArgument(i64),
}

/// Shape of a grid: how many columns and how many items fill it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSpec {
    column_count: usize,
    item_count: usize,
}

impl GridSpec {
    /// Create a grid spec, rejecting a column count of zero or less.
    ///
    /// Takes a signed count so that values coming straight from
    /// configuration (or a user) can be validated in one place.
    pub fn new(column_count: i64, item_count: usize) -> Result<Self, LayoutError> {
        if column_count <= 0 {
            return Err(LayoutError::InvalidArgument(column_count));
        }
        Ok(Self {
            column_count: column_count as usize,
            item_count,
        })
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// `ceil(item_count / column_count)`, 0 when there are no items
    pub fn row_count(&self) -> usize {
        self.item_count.div_ceil(self.column_count)
    }

    /// Coordinates of the item at flat index `index`
    pub fn position(&self, index: usize) -> (usize, usize) {
        (index / self.column_count, index % self.column_count)
    }

    /// Number of occupied columns in `row`.
    ///
    /// Equal to `column_count` for every row but the last; columns past it
    /// stay empty and must not be rendered as placeholders.
    pub fn columns_in_row(&self, row: usize) -> usize {
        let start = row * self.column_count;
        self.item_count.saturating_sub(start).min(self.column_count)
    }
}

/// An item together with the cell it was assigned to
#[derive(Debug, PartialEq, Eq)]
pub struct Placement<'a, T> {
    pub item: &'a T,
    /// Flat index in the input order
    pub index: usize,
    pub row: usize,
    pub col: usize,
}

// Manual impls: a placement only borrows its item, so it is Copy for any `T`
impl<T> Clone for Placement<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Placement<'_, T> {}

/// Lay out `items` over `column_count` columns.
///
/// Returns one placement per item, in input order. Fails with
/// [`LayoutError::InvalidArgument`] when `column_count <= 0`.
pub fn layout<T>(items: &[T], column_count: i64) -> Result<Vec<Placement<'_, T>>, LayoutError> {
    let spec = GridSpec::new(column_count, items.len())?;

    Ok(items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let (row, col) = spec.position(index);
            Placement {
                item,
                index,
                row,
                col,
            }
        })
        .collect())
}

/// One row of the grid
#[derive(Debug, PartialEq, Eq)]
pub struct RowBatch<'a, T> {
    pub row: usize,
    /// Flat index of the first item of this row
    pub start: usize,
    /// `items[row * column_count .. row * column_count + column_count]`
    pub items: &'a [T],
}

impl<T> Clone for RowBatch<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RowBatch<'_, T> {}

impl<'a, T> RowBatch<'a, T> {
    /// Placements of this row's items, identical to what [`layout`] yields
    /// for the same slice
    pub fn placements(&self) -> impl Iterator<Item = Placement<'a, T>> + '_ {
        let row = self.row;
        let start = self.start;
        self.items.iter().enumerate().map(move |(col, item)| Placement {
            item,
            index: start + col,
            row,
            col,
        })
    }
}

/// Split `items` into row-batches of `column_count` items each.
///
/// Callers that render a second, aligned band per row (e.g. detail panels)
/// open one grouping per batch and reuse the same column partition for both
/// bands, so the alignment holds whatever the image heights are.
pub fn layout_rows<T>(items: &[T], column_count: i64) -> Result<Vec<RowBatch<'_, T>>, LayoutError> {
    let spec = GridSpec::new(column_count, items.len())?;

    Ok(items
        .chunks(spec.column_count())
        .enumerate()
        .map(|(row, chunk)| RowBatch {
            row,
            start: row * spec.column_count(),
            items: chunk,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords<T>(placements: &[Placement<'_, T>]) -> Vec<(usize, usize)> {
        placements.iter().map(|p| (p.row, p.col)).collect()
    }

    #[test]
    fn test_seven_items_three_columns() {
        let items = ['a', 'b', 'c', 'd', 'e', 'f', 'g'];
        let placements = layout(&items, 3).unwrap();

        assert_eq!(placements.len(), 7);
        assert_eq!((placements[0].row, placements[0].col), (0, 0));
        assert_eq!((placements[5].row, placements[5].col), (1, 2));
        assert_eq!((placements[6].row, placements[6].col), (2, 0));

        let rows = layout_rows(&items, 3).unwrap();
        let rows: Vec<&[char]> = rows.iter().map(|r| r.items).collect();
        assert_eq!(rows, vec![&['a', 'b', 'c'][..], &['d', 'e', 'f'][..], &['g'][..]]);
    }

    #[test]
    fn test_empty_items() {
        let items: [char; 0] = [];
        assert!(layout(&items, 5).unwrap().is_empty());
        assert!(layout_rows(&items, 5).unwrap().is_empty());
        assert_eq!(GridSpec::new(5, 0).unwrap().row_count(), 0);
    }

    #[test]
    fn test_single_column() {
        let items = ['x', 'y'];
        let placements = layout(&items, 1).unwrap();
        assert_eq!(coords(&placements), vec![(0, 0), (1, 0)]);
    }

    #[test]
    fn test_invalid_column_count() {
        let items = ['x'];
        assert_eq!(layout(&items, 0).unwrap_err(), LayoutError::InvalidArgument(0));
        assert_eq!(layout_rows(&items, -2).unwrap_err(), LayoutError::InvalidArgument(-2));
        assert!(GridSpec::new(0, 0).is_err());
    }

    #[test]
    fn test_more_columns_than_items() {
        let items = [1, 2];
        let spec = GridSpec::new(6, items.len()).unwrap();
        assert_eq!(spec.row_count(), 1);
        assert_eq!(spec.columns_in_row(0), 2);
        assert_eq!(coords(&layout(&items, 6).unwrap()), vec![(0, 0), (0, 1)]);
    }

    #[test]
    fn test_grid_properties_hold_for_many_shapes() {
        for item_count in 0..40usize {
            let items: Vec<usize> = (0..item_count).collect();
            for columns in 1..9i64 {
                let spec = GridSpec::new(columns, item_count).unwrap();
                let placements = layout(&items, columns).unwrap();
                let cols = columns as usize;

                assert_eq!(placements.len(), item_count);
                assert_eq!(spec.row_count(), (item_count + cols - 1) / cols);
                assert_eq!(spec.row_count() == 0, item_count == 0);

                let mut previous_row = 0;
                for (i, p) in placements.iter().enumerate() {
                    assert_eq!(*p.item, i);
                    assert_eq!(p.col, i % cols);
                    assert!(p.row >= previous_row);
                    assert!(p.row < spec.row_count());
                    previous_row = p.row;
                }

                let mut seen = std::collections::HashSet::new();
                assert!(placements.iter().all(|p| seen.insert((p.row, p.col))));

                let flattened: Vec<Placement<'_, usize>> = layout_rows(&items, columns)
                    .unwrap()
                    .iter()
                    .flat_map(|batch| batch.placements().collect::<Vec<_>>())
                    .collect();
                assert_eq!(flattened, placements);
            }
        }
    }

    #[test]
    fn test_columns_in_last_row() {
        let spec = GridSpec::new(3, 7).unwrap();
        assert_eq!(spec.columns_in_row(0), 3);
        assert_eq!(spec.columns_in_row(1), 3);
        assert_eq!(spec.columns_in_row(2), 1);
        assert_eq!(spec.columns_in_row(3), 0);
    }
}
