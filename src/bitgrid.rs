//! Packed binary sample matrix.
//!
//! This module provides a cache-efficient (samples × units) binary matrix
//! backed by a vector of u64 words, one word run per row. It is the output
//! format of the grid resampler in [`sampler`][crate::sampler]: row `s` holds
//! the activity of every unit at grid step `s`.

/// A two-dimensional bit matrix with row-major packed storage.
///
/// Each row occupies `ceil(cols / 64)` words; bit `c % 64` of word `c / 64`
/// within a row holds column `c`. Dimensions are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitGrid {
    /// Storage: each u64 holds 64 column bits.
    words: Vec<u64>,
    rows: usize,
    cols: usize,
    words_per_row: usize,
}

impl BitGrid {
    /// Number of bits per word.
    const BITS_PER_WORD: usize = 64;

    /// Creates an all-zero grid with the given dimensions.
    pub fn new(rows: usize, cols: usize) -> Self {
        let words_per_row = (cols + Self::BITS_PER_WORD - 1) / Self::BITS_PER_WORD;
        Self {
            words: vec![0; rows * words_per_row],
            rows,
            cols,
            words_per_row,
        }
    }

    /// Number of rows (samples).
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (units).
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns true if the grid has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Word index and bit position of cell `(row, col)`.
    #[inline]
    fn word_and_bit(&self, row: usize, col: usize) -> (usize, usize) {
        assert!(row < self.rows && col < self.cols, "bit grid index out of bounds");
        let word = row * self.words_per_row + col / Self::BITS_PER_WORD;
        let bit = col % Self::BITS_PER_WORD;
        (word, bit)
    }

    /// Returns true if cell `(row, col)` is set.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        let (word, bit) = self.word_and_bit(row, col);
        (self.words[word] >> bit) & 1 != 0
    }

    /// Sets cell `(row, col)` to the given value.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        let (word, bit) = self.word_and_bit(row, col);
        let mask = 1u64 << bit;
        if value {
            self.words[word] |= mask;
        } else {
            self.words[word] &= !mask;
        }
    }

    /// Total number of set cells.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Number of set cells in one row.
    pub fn row_count(&self, row: usize) -> usize {
        assert!(row < self.rows, "bit grid row out of bounds");
        let start = row * self.words_per_row;
        self.words[start..start + self.words_per_row]
            .iter()
            .map(|w| w.count_ones() as usize)
            .sum()
    }

    /// One row unpacked into 0/1 bytes, e.g. for feeding into dense math.
    pub fn row_bits(&self, row: usize) -> Vec<u8> {
        (0..self.cols).map(|c| self.get(row, c) as u8).collect()
    }

    /// Fraction of samples in which the given column is set.
    pub fn column_mean(&self, col: usize) -> f64 {
        assert!(col < self.cols, "bit grid column out of bounds");
        if self.rows == 0 {
            return 0.0;
        }
        let set = (0..self.rows).filter(|&r| self.get(r, col)).count();
        set as f64 / self.rows as f64
    }
}
