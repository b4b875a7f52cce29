//! Ordered range tables.

/// A piecewise lookup: `(upper, value)` rows checked in order with `x < upper`,
/// falling through to `last` when no row matches.
#[derive(Debug)]
pub struct BandTable<T: 'static> {
    pub rows: &'static [(f64, T)],
    pub last: T,
}

impl<T> BandTable<T> {
    pub fn lookup(&self, x: f64) -> &T {
        self.rows
            .iter()
            .find(|(upper, _)| x < *upper)
            .map(|(_, v)| v)
            .unwrap_or(&self.last)
    }
}
