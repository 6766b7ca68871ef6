use ndarray::{Array1, ArrayView1};

use crate::{dataset::TrainingSample, MindErr, Result};

/// The widest encoding a codec accepts, which bounds a full training set to 65536 samples.
pub const MAX_WIDTH: usize = 16;

/// Converts skill codes to fixed-width binary vectors and builds labeled training sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillCodec {
    width: usize,
}

impl SkillCodec {
    pub const DEFAULT_WIDTH: usize = 5;

    /// Creates a new `SkillCodec`.
    ///
    /// # Arguments
    /// * `width` - The amount of bits per code, between 1 and `MAX_WIDTH`.
    pub fn new(width: usize) -> Result<Self> {
        if width == 0 || width > MAX_WIDTH {
            return Err(MindErr::InvalidInput("codec width must be between 1 and 16"));
        }

        Ok(Self { width })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the amount of representable codes, `2^width`.
    pub fn capacity(&self) -> u32 {
        1 << self.width
    }

    /// Checks that `code` lies in `[0, 2^width)`.
    pub fn check(&self, code: u32) -> Result<()> {
        if code >= self.capacity() {
            return Err(MindErr::CodeOutOfRange {
                code,
                width: self.width,
            });
        }

        Ok(())
    }

    /// Returns the bits of `code`, most significant first, zero padded to the codec's width.
    pub fn encode(&self, code: u32) -> Result<Vec<u8>> {
        self.check(code)?;

        let bits = (0..self.width)
            .rev()
            .map(|shift| ((code >> shift) & 1) as u8)
            .collect();

        Ok(bits)
    }

    /// Like `encode`, as the network's input vector.
    pub fn encode_input(&self, code: u32) -> Result<Array1<f32>> {
        Ok(self.encode(code)?.into_iter().map(f32::from).collect())
    }

    /// Inverse of `encode`, reading any value above 0.5 as a set bit.
    pub fn decode(&self, bits: ArrayView1<f32>) -> Result<u32> {
        if bits.len() != self.width {
            return Err(MindErr::SizeMismatch {
                what: "encoded bits",
                got: bits.len(),
                expected: self.width,
            });
        }

        let code = bits
            .iter()
            .fold(0, |code, &bit| (code << 1) | u32::from(bit > 0.5));

        Ok(code)
    }

    /// Builds one sample per code in `[0, 2^width)`, in order, labeling only `target` positive.
    pub fn training_set(&self, target: u32) -> Result<Vec<TrainingSample>> {
        self.training_set_for(&[target])
    }

    /// Builds one sample per code in `[0, 2^width)`, in order, labeling every code in
    /// `positives` as `[1.0]` and every other code as `[0.0]`.
    pub fn training_set_for(&self, positives: &[u32]) -> Result<Vec<TrainingSample>> {
        for &code in positives {
            self.check(code)?;
        }

        let mut samples = Vec::with_capacity(self.capacity() as usize);
        for code in 0..self.capacity() {
            let label = u8::from(positives.contains(&code));
            samples.push(TrainingSample::from_ints(&self.encode(code)?, &[label]));
        }

        Ok(samples)
    }
}

impl Default for SkillCodec {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positives(samples: &[TrainingSample]) -> Vec<usize> {
        samples
            .iter()
            .enumerate()
            .filter(|(_, s)| s.expected()[0] == 1.0)
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn encodes_msb_first_and_zero_padded() {
        let codec = SkillCodec::default();

        assert_eq!(codec.encode(6).unwrap(), vec![0, 0, 1, 1, 0]);
        assert_eq!(codec.encode(0).unwrap(), vec![0; 5]);
        assert_eq!(codec.encode(31).unwrap(), vec![1; 5]);
        assert_eq!(codec.encode(16).unwrap(), vec![1, 0, 0, 0, 0]);
    }

    #[test]
    fn decode_inverts_encode_for_every_code() {
        let codec = SkillCodec::default();
        for code in 0..32 {
            let bits = codec.encode_input(code).unwrap();
            assert_eq!(bits.len(), 5);
            assert_eq!(codec.decode(bits.view()).unwrap(), code);
        }
    }

    #[test]
    fn out_of_range_codes_are_rejected() {
        let codec = SkillCodec::default();

        assert!(matches!(
            codec.encode(32),
            Err(MindErr::CodeOutOfRange { code: 32, width: 5 })
        ));
        assert!(codec.training_set(40).is_err());
    }

    #[test]
    fn decode_checks_width() {
        let codec = SkillCodec::default();
        let bits = Array1::from_vec(vec![1.0, 0.0]);
        assert!(matches!(
            codec.decode(bits.view()),
            Err(MindErr::SizeMismatch { got: 2, expected: 5, .. })
        ));
    }

    #[test]
    fn invalid_widths_are_rejected() {
        assert!(SkillCodec::new(0).is_err());
        assert!(SkillCodec::new(MAX_WIDTH + 1).is_err());
        assert_eq!(SkillCodec::new(3).unwrap().capacity(), 8);
    }

    #[test]
    fn single_target_set_has_one_positive() {
        let codec = SkillCodec::default();
        let samples = codec.training_set(6).unwrap();

        assert_eq!(samples.len(), 32);
        assert_eq!(positives(&samples), vec![6]);
        assert_eq!(samples[6].inputs().to_vec(), vec![0.0, 0.0, 1.0, 1.0, 0.0]);

        for (code, sample) in samples.iter().enumerate() {
            assert_eq!(codec.decode(sample.inputs()).unwrap(), code as u32);
        }
    }

    #[test]
    fn multi_target_set_labels_every_positive() {
        let codec = SkillCodec::default();
        let samples = codec.training_set_for(&[17, 6, 3]).unwrap();

        assert_eq!(samples.len(), 32);
        assert_eq!(positives(&samples), vec![3, 6, 17]);
    }
}
