use std::{
    fmt::{self, Display, Write},
    ops::{Index, IndexMut},
};

use ndarray::{Array1, ArrayView1, ArrayViewMut1};

/// A fixed-size, mutable one-dimensional buffer of activations.
///
/// Every slot is populated when the buffer is created and the size never changes afterwards.
/// Indexing out of range panics.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericBuffer {
    content: Array1<f32>,
}

impl NumericBuffer {
    /// Creates a new zero filled `NumericBuffer`.
    ///
    /// # Arguments
    /// * `size` - The amount of slots.
    pub fn zeros(size: usize) -> Self {
        Self::filled(size, 0.0)
    }

    /// Creates a new `NumericBuffer` with every slot set to `value`.
    ///
    /// # Arguments
    /// * `size` - The amount of slots.
    /// * `value` - The initial value of every slot.
    pub fn filled(size: usize, value: f32) -> Self {
        Self {
            content: Array1::from_elem(size, value),
        }
    }

    /// Creates a new `NumericBuffer` populating each slot with a generator.
    ///
    /// # Arguments
    /// * `size` - The amount of slots.
    /// * `f` - Called once per slot, in order, with the slot's index.
    pub fn from_fn<F>(size: usize, f: F) -> Self
    where
        F: FnMut(usize) -> f32,
    {
        Self {
            content: Array1::from_shape_fn(size, f),
        }
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn view(&self) -> ArrayView1<'_, f32> {
        self.content.view()
    }

    pub fn view_mut(&mut self) -> ArrayViewMut1<'_, f32> {
        self.content.view_mut()
    }

    pub fn to_vec(&self) -> Vec<f32> {
        self.content.to_vec()
    }

    /// Formats the buffer as a single line of fixed-width cells.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for (i, value) in self.content.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{value:>8.4}");
        }

        out
    }
}

impl From<Vec<f32>> for NumericBuffer {
    fn from(value: Vec<f32>) -> Self {
        Self {
            content: Array1::from_vec(value),
        }
    }
}

impl Index<usize> for NumericBuffer {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.content[index]
    }
}

impl IndexMut<usize> for NumericBuffer {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        &mut self.content[index]
    }
}

impl Display for NumericBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_sees_every_index_in_order() {
        let buf = NumericBuffer::from_fn(4, |i| i as f32 * 0.5);
        assert_eq!(buf.to_vec(), vec![0.0, 0.5, 1.0, 1.5]);
    }

    #[test]
    fn filled_and_zeros() {
        let ones = NumericBuffer::filled(3, 1.0);
        let zeros = NumericBuffer::zeros(3);

        assert_eq!(ones.to_vec(), vec![1.0; 3]);
        assert_eq!(zeros.to_vec(), vec![0.0; 3]);
        assert_eq!(ones.len(), 3);
        assert!(!ones.is_empty());
    }

    #[test]
    fn index_mut_writes_in_place() {
        let mut buf = NumericBuffer::zeros(2);
        buf[1] = 3.0;
        assert_eq!(buf[1], 3.0);
        assert_eq!(buf[0], 0.0);
    }

    #[test]
    #[should_panic]
    fn out_of_range_index_panics() {
        let buf = NumericBuffer::zeros(2);
        let _ = buf[2];
    }

    #[test]
    fn dump_layout() {
        let buf = NumericBuffer::from(vec![1.0, -0.25]);
        assert_eq!(buf.dump(), "  1.0000  -0.2500");
        assert_eq!(buf.to_string(), buf.dump());
    }
}
