/// Compact bit matrix over pixel or module coordinates (`true` = dark)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    /// Create a new all-light bit matrix with given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        let bytes_needed = (width * height).div_ceil(8);
        Self {
            width,
            height,
            data: vec![0; bytes_needed],
        }
    }

    /// Build a square matrix from rows of `'#'` (dark) and anything else (light)
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut matrix = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                matrix.set(x as i32, y as i32, c == '#');
            }
        }
        matrix
    }

    /// Get matrix width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get matrix height
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    /// Get bit at (x, y); anything outside the matrix reads as light
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> bool {
        match self.index(x, y) {
            Some(index) => (self.data[index / 8] >> (index % 8)) & 1 == 1,
            None => false,
        }
    }

    /// Set bit at (x, y); writes outside the matrix are dropped
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, value: bool) {
        let Some(index) = self.index(x, y) else {
            return;
        };
        let bit = 1 << (index % 8);
        if value {
            self.data[index / 8] |= bit;
        } else {
            self.data[index / 8] &= !bit;
        }
    }

    /// Fill the `width` x `height` rectangle whose top-left corner is (left, top)
    pub fn set_region(&mut self, left: i32, top: i32, width: i32, height: i32, value: bool) {
        for y in top..top + height {
            for x in left..left + width {
                self.set(x, y, value);
            }
        }
    }

    /// Toggle bit at (x, y)
    pub fn toggle(&mut self, x: i32, y: i32) {
        if let Some(index) = self.index(x, y) {
            self.data[index / 8] ^= 1 << (index % 8);
        }
    }

    /// Logical complement of every bit
    pub fn inverted(&self) -> Self {
        let mut out = Self::new(self.width, self.height);
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                out.set(x, y, !self.get(x, y));
            }
        }
        out
    }

    /// Mirror across the main diagonal, swapping (x, y) and (y, x)
    pub fn transposed(&self) -> Self {
        let mut out = Self::new(self.height, self.width);
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                out.set(y, x, self.get(x, y));
            }
        }
        out
    }

    /// Count of dark bits
    pub fn count_ones(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Clear all bits to 0
    pub fn clear(&mut self) {
        self.data.fill(0);
    }
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl std::fmt::Display for BitMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                f.write_str(if self.get(x, y) { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl serde::Serialize for BitMatrix {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let rows: Vec<String> = self.to_string().lines().map(str::to_owned).collect();
        let mut state = serializer.serialize_struct("BitMatrix", 3)?;
        state.serialize_field("width", &self.width)?;
        state.serialize_field("height", &self.height)?;
        state.serialize_field("rows", &rows)?;
        state.end()
    }
}
