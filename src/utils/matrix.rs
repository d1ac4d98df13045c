/// Dense row-major matrix over a flat Vec.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix2<T> {
    pub data: Vec<T>,
    pub rows: usize,
    pub cols: usize,
}

impl<T: Clone> Matrix2<T> {
    pub fn new(rows: usize, cols: usize, init: T) -> Self {
        Self {
            data: vec![init; rows * cols],
            rows,
            cols,
        }
    }
    pub fn get_mut(&mut self, row: usize, col: usize) -> &mut T {
        &mut self.data[row * self.cols + col]
    }

    /// Bounds-checked access.
    pub fn try_get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_layout() {
        let mut m = Matrix2::new(2, 3, 0u32);
        *m.get_mut(1, 2) = 7;
        *m.get_mut(0, 1) = 3;
        assert_eq!(m.data, vec![0, 3, 0, 0, 0, 7]);
        assert_eq!(m.try_get(1, 2), Some(&7));
        assert_eq!(m.try_get(2, 0), None);
        assert_eq!(m.try_get(0, 3), None);
    }
}
