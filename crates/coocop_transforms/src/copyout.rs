//! Copyout: occlude a square with pixels from a previously seen image.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use coocop_core::{CoreError, Image, Pixel, Result, Seed, Split, Transform};

use crate::buffer::{RollingImageBuffer, DEFAULT_IMAGE_BUFFER_SIZE};
use crate::region::RegionSampler;

pub(crate) fn default_image_buffer_size() -> usize {
    DEFAULT_IMAGE_BUFFER_SIZE
}

/// Configuration for the Copyout transform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyoutConfig {
    /// Side length of the copied square. Must be > 0.
    pub extent: usize,
    /// Number of past images kept to copy from. Must be > 0.
    #[serde(default = "default_image_buffer_size")]
    pub image_buffer_size: usize,
}

impl CopyoutConfig {
    /// Config with the given extent and the default buffer size of 128.
    #[must_use]
    pub fn new(extent: usize) -> Self {
        Self {
            extent,
            image_buffer_size: DEFAULT_IMAGE_BUFFER_SIZE,
        }
    }

    /// Set the buffer size.
    #[must_use]
    pub fn with_image_buffer_size(mut self, image_buffer_size: usize) -> Self {
        self.image_buffer_size = image_buffer_size;
        self
    }

    /// Check every parameter against its bound.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] naming the first offending parameter.
    pub fn validate(&self) -> Result<()> {
        if self.extent == 0 {
            return Err(CoreError::invalid_config("extent", "> 0", self.extent));
        }
        if self.image_buffer_size == 0 {
            return Err(CoreError::invalid_config(
                "image_buffer_size",
                "> 0",
                self.image_buffer_size,
            ));
        }
        Ok(())
    }
}

/// Copyout augmentation.
///
/// Every call overwrites a randomly placed square of the incoming image with
/// the pixels of an equally sized block from an image seen earlier, then
/// remembers an untouched copy of the incoming image for later calls. The
/// very first call has nothing to copy from and returns the image as is.
///
/// # Example
///
/// ```rust
/// use coocop_core::{Image, Seed};
/// use coocop_transforms::Copyout;
///
/// let mut copyout = Copyout::new(11).unwrap().with_seed(Seed::new(42));
/// let image = Image::filled((31, 33, 3), 1.0_f32).unwrap();
///
/// let out = copyout.augment(image.clone()).unwrap();
/// assert_eq!(out, image); // empty history
/// assert_eq!(copyout.buffer_len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Copyout<T: Pixel> {
    config: CopyoutConfig,
    sampler: RegionSampler,
    buffer: RollingImageBuffer<T>,
    seed: Seed,
    rng: ChaCha8Rng,
}

impl<T: Pixel> Copyout<T> {
    /// Create a Copyout transform with a buffer of 128 images.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] if `extent` is zero.
    pub fn new(extent: usize) -> Result<Self> {
        Self::from_config(CopyoutConfig::new(extent))
    }

    /// Create a Copyout transform with an explicit buffer size.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] if either parameter is zero.
    pub fn with_buffer_size(extent: usize, image_buffer_size: usize) -> Result<Self> {
        Self::from_config(CopyoutConfig::new(extent).with_image_buffer_size(image_buffer_size))
    }

    /// Create from config.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] if the config is out of bounds.
    pub fn from_config(config: CopyoutConfig) -> Result<Self> {
        config.validate()?;
        let seed = Seed::from_entropy();
        Ok(Self {
            sampler: RegionSampler::new(config.extent)?,
            buffer: RollingImageBuffer::new(config.image_buffer_size)?,
            rng: seed.to_rng(),
            seed,
            config,
        })
    }

    /// Set the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: Seed) -> Self {
        self.seed = seed;
        self.rng = seed.to_rng();
        self
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &CopyoutConfig {
        &self.config
    }

    /// The seed the random stream started from.
    #[must_use]
    pub fn seed(&self) -> Seed {
        self.seed
    }

    /// Side length of the copied square.
    #[must_use]
    pub fn extent(&self) -> usize {
        self.config.extent
    }

    /// Capacity of the history buffer.
    #[must_use]
    pub fn image_buffer_size(&self) -> usize {
        self.config.image_buffer_size
    }

    /// Number of images currently remembered.
    #[must_use]
    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }

    /// Augment one training image.
    ///
    /// The returned image has the shape of the input. An untouched copy of
    /// the input is always added to the history, even when the call fails.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ShapeMismatch`] if the remembered image drawn
    /// has a different channel count.
    pub fn augment(&mut self, mut image: Image<T>) -> Result<Image<T>> {
        let snapshot = image.clone();

        let outcome = match self.buffer.sample(&mut self.rng) {
            Some(sample) => paste_region(&mut image, &sample, &self.sampler, &mut self.rng),
            None => {
                tracing::debug!("Copyout: history empty, image passed through");
                Ok(())
            }
        };

        self.buffer.insert(snapshot, &mut self.rng);
        outcome.map(|()| image)
    }
}

/// Copy a randomly placed square of `sample` into `image`.
pub(crate) fn paste_region<T: Pixel, R: Rng + ?Sized>(
    image: &mut Image<T>,
    sample: &Image<T>,
    sampler: &RegionSampler,
    rng: &mut R,
) -> Result<()> {
    let region = sampler.sample(image.shape().spatial(), sample.shape().spatial(), rng);
    tracing::trace!(
        rows = ?region.dst_rows,
        cols = ?region.dst_cols,
        src_row = region.src_row,
        src_col = region.src_col,
        "Copyout region"
    );
    image.copy_region_from(
        sample,
        region.dst_rows,
        region.dst_cols,
        region.src_row,
        region.src_col,
    )
}

impl<T: Pixel> Transform<T> for Copyout<T> {
    fn apply(&mut self, image: Image<T>, split: Split) -> Result<Image<T>> {
        if split.is_eval() {
            return Ok(image);
        }
        self.augment(image)
    }

    fn name(&self) -> &str {
        "Copyout"
    }

    fn should_apply(&self, split: Split) -> bool {
        split.is_train()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;
    use rand::Rng;

    fn random_image(rng: &mut ChaCha8Rng, h: usize, w: usize, c: usize) -> Image<f32> {
        let values = (0..h * w * c).map(|_| rng.gen::<f32>()).collect();
        Image::from_shape_vec((h, w, c), values).unwrap()
    }

    #[test]
    fn test_copyout_internal_vars() {
        let coo = Copyout::<f32>::with_buffer_size(77, 23).unwrap();
        assert_eq!(coo.extent(), 77);
        assert_eq!(coo.image_buffer_size(), 23);
        assert_eq!(Copyout::<f32>::new(5).unwrap().image_buffer_size(), 128);
    }

    #[test]
    fn test_copyout_invalid_config() {
        assert!(matches!(
            Copyout::<f32>::new(0).unwrap_err(),
            CoreError::InvalidConfig(_)
        ));
        assert!(matches!(
            Copyout::<f32>::with_buffer_size(11, 0).unwrap_err(),
            CoreError::InvalidConfig(_)
        ));
    }

    #[test]
    fn test_copyout_call_keeps_shape() {
        let mut rng = Seed::new(1).to_rng();
        let mut coo = Copyout::with_buffer_size(11, 13).unwrap().with_seed(Seed::new(1));
        for _ in 0..20 {
            let input = random_image(&mut rng, 31, 33, 3);
            let output = coo.augment(input.clone()).unwrap();
            assert_eq!(output.shape(), input.shape());
        }
    }

    #[test]
    fn test_copyout_buffer_first() {
        let mut rng = Seed::new(2).to_rng();
        let mut coo = Copyout::with_buffer_size(11, 13).unwrap();
        let input = random_image(&mut rng, 31, 33, 3);
        let output = coo.augment(input.clone()).unwrap();
        assert_eq!(output, input);
        assert_eq!(coo.buffer_len(), 1);
    }

    #[test]
    fn test_copyout_buffer_full() {
        const BUFFER_LEN: usize = 3;
        let mut rng = Seed::new(3).to_rng();
        let mut coo = Copyout::with_buffer_size(11, BUFFER_LEN).unwrap();
        for i in 0..BUFFER_LEN + 10 {
            coo.augment(random_image(&mut rng, 31, 33, 3)).unwrap();
            assert_eq!(coo.buffer_len(), (i + 1).min(BUFFER_LEN));
        }
        assert_eq!(coo.buffer_len(), BUFFER_LEN);
    }

    #[test]
    fn test_copyout_pastes_from_history() {
        let mut coo = Copyout::with_buffer_size(8, 4).unwrap().with_seed(Seed::new(5));
        coo.augment(Image::filled((16, 16, 1), 7u8).unwrap()).unwrap();

        let mut changed = 0;
        for _ in 0..20 {
            let out = coo.augment(Image::filled((16, 16, 1), 0u8).unwrap()).unwrap();
            // pixels are either untouched or copied from some earlier image
            assert!(out.as_array().iter().all(|&v| v == 0 || v == 7));
            if out.as_array().iter().any(|&v| v == 7) {
                changed += 1;
            }
        }
        assert!(changed > 0);
    }

    #[test]
    fn test_copyout_is_reproducible() {
        let mut rng = Seed::new(6).to_rng();
        let images: Vec<_> = (0..10).map(|_| random_image(&mut rng, 12, 9, 2)).collect();

        let mut a = Copyout::with_buffer_size(5, 3).unwrap().with_seed(Seed::new(99));
        let mut b = Copyout::with_buffer_size(5, 3).unwrap().with_seed(Seed::new(99));
        for img in &images {
            assert_eq!(a.augment(img.clone()).unwrap(), b.augment(img.clone()).unwrap());
        }
    }

    #[test]
    fn test_copyout_channel_mismatch_still_records() {
        let mut coo = Copyout::with_buffer_size(4, 3).unwrap();
        coo.augment(Image::new(Array3::<f32>::zeros((8, 8, 3))).unwrap())
            .unwrap();
        let err = coo
            .augment(Image::new(Array3::<f32>::zeros((8, 8, 1))).unwrap())
            .unwrap_err();
        assert!(matches!(err, CoreError::ShapeMismatch(_)));
        assert_eq!(coo.buffer_len(), 2);
    }

    #[test]
    fn test_copyout_eval_split_is_untouched() {
        let mut coo = Copyout::with_buffer_size(4, 3).unwrap();
        let img = Image::filled((8, 8, 1), 1.0_f32).unwrap();
        let out = coo.apply(img.clone(), Split::Valid).unwrap();
        assert_eq!(out, img);
        assert_eq!(coo.buffer_len(), 0);
        assert!(!coo.should_apply(Split::Test));
    }

    #[test]
    fn test_copyout_config_serde_default_buffer() {
        let config: CopyoutConfig = serde_json::from_str(r#"{"extent": 16}"#).unwrap();
        assert_eq!(config, CopyoutConfig::new(16));
        assert_eq!(config.image_buffer_size, 128);
    }
}
