use ndarray::{Array1, ArrayView1};

/// An input vector paired with the output the network should produce for it.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSample {
    inputs: Array1<f32>,
    expected: Array1<f32>,
}

impl TrainingSample {
    pub fn new(inputs: Array1<f32>, expected: Array1<f32>) -> Self {
        Self { inputs, expected }
    }

    /// Creates a new `TrainingSample` from integer valued vectors.
    pub fn from_ints<T>(inputs: &[T], expected: &[T]) -> Self
    where
        T: Copy + Into<f32>,
    {
        Self {
            inputs: inputs.iter().map(|&x| x.into()).collect(),
            expected: expected.iter().map(|&y| y.into()).collect(),
        }
    }

    pub fn inputs(&self) -> ArrayView1<'_, f32> {
        self.inputs.view()
    }

    pub fn expected(&self) -> ArrayView1<'_, f32> {
        self.expected.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ints_become_floats() {
        let sample = TrainingSample::from_ints(&[0u8, 1, 1], &[1u8]);

        assert_eq!(sample.inputs().to_vec(), vec![0.0, 1.0, 1.0]);
        assert_eq!(sample.expected().to_vec(), vec![1.0]);
    }
}
