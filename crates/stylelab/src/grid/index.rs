/// A resolved `(row, column)` position in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridAddress {
    pub row: usize,
    pub col: usize,
}

/// Map a flat position to its row-major address.
///
/// The column count is fixed across the whole grid. Returns `None` for a
/// grid without columns.
pub fn address(position: usize, columns: usize) -> Option<GridAddress> {
    if columns == 0 {
        return None;
    }
    Some(GridAddress {
        row: position / columns,
        col: position % columns,
    })
}

/// Inverse of [`address`].
pub fn flat_position(addr: GridAddress, columns: usize) -> usize {
    addr.row * columns + addr.col
}
