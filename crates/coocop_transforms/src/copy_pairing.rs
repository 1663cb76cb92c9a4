//! CopyPairing: epoch-scheduled mix of Copyout and SamplePairing.

use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use coocop_core::{CoreError, Image, Pixel, Result, Seed, Split, Transform};

use crate::buffer::{RollingImageBuffer, DEFAULT_IMAGE_BUFFER_SIZE};
use crate::copyout::{default_image_buffer_size, paste_region};
use crate::region::RegionSampler;

/// Configuration for the CopyPairing transform.
///
/// Epochs before `warmup_epochs` and epochs after `fine_tuning_epoch - 2`
/// only use Copyout. In between, `coo_epochs` Copyout calls alternate with
/// `cop_epochs` SamplePairing calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyPairingConfig {
    /// Side length of the Copyout square. Must be > 0.
    pub extent: usize,
    /// Number of leading Copyout-only epochs. Must be >= 0.
    pub warmup_epochs: i64,
    /// Epoch at which fine-tuning ends. Must be > 0.
    pub fine_tuning_epoch: i64,
    /// Copyout calls per middle-phase cycle. Must be > 0.
    pub coo_epochs: usize,
    /// SamplePairing calls per middle-phase cycle. Must be > 0.
    pub cop_epochs: usize,
    /// Number of past images kept. Must be > 0.
    #[serde(default = "default_image_buffer_size")]
    pub image_buffer_size: usize,
}

impl CopyPairingConfig {
    /// Config with the default buffer size of 128.
    #[must_use]
    pub fn new(
        extent: usize,
        warmup_epochs: i64,
        fine_tuning_epoch: i64,
        coo_epochs: usize,
        cop_epochs: usize,
    ) -> Self {
        Self {
            extent,
            warmup_epochs,
            fine_tuning_epoch,
            coo_epochs,
            cop_epochs,
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
        if self.warmup_epochs < 0 {
            return Err(CoreError::invalid_config(
                "warmup_epochs",
                ">= 0",
                self.warmup_epochs,
            ));
        }
        if self.fine_tuning_epoch <= 0 {
            return Err(CoreError::invalid_config(
                "fine_tuning_epoch",
                "> 0",
                self.fine_tuning_epoch,
            ));
        }
        if self.coo_epochs == 0 {
            return Err(CoreError::invalid_config("coo_epochs", "> 0", self.coo_epochs));
        }
        if self.cop_epochs == 0 {
            return Err(CoreError::invalid_config("cop_epochs", "> 0", self.cop_epochs));
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

    /// Phase a given epoch falls into.
    #[must_use]
    pub fn phase_at(&self, epoch: i64) -> CopyPairingPhase {
        if epoch < self.warmup_epochs {
            CopyPairingPhase::Warmup
        } else if epoch > self.fine_tuning_epoch.saturating_sub(2) {
            CopyPairingPhase::FineTuning
        } else {
            CopyPairingPhase::Middle
        }
    }
}

/// Training phase derived from the current epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CopyPairingPhase {
    /// Copyout only.
    Warmup,
    /// Copyout and SamplePairing alternate.
    Middle,
    /// Copyout only.
    FineTuning,
}

/// What one call did to its image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Augmentation {
    /// A square was copied in from a past image.
    Copyout,
    /// The image was averaged with a past image.
    SamplePairing,
    /// The history was empty; the image passed through.
    Skipped,
    /// Evaluation split; neither the image nor the history was touched.
    Bypassed,
}

/// Epoch and middle-phase counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpochPhaseState {
    /// Epoch last announced by the training loop.
    pub current_epoch: i64,
    /// Copyout calls in the running cycle.
    pub coo_count: usize,
    /// SamplePairing calls in the running cycle.
    pub cop_count: usize,
}

impl EpochPhaseState {
    /// Pick the augmentation for the next call and advance the cycle.
    fn next(&mut self, config: &CopyPairingConfig) -> Augmentation {
        match config.phase_at(self.current_epoch) {
            CopyPairingPhase::Warmup | CopyPairingPhase::FineTuning => Augmentation::Copyout,
            CopyPairingPhase::Middle if self.coo_count < config.coo_epochs => {
                self.coo_count += 1;
                Augmentation::Copyout
            }
            CopyPairingPhase::Middle => {
                self.cop_count += 1;
                if self.cop_count >= config.cop_epochs {
                    self.coo_count = 0;
                    self.cop_count = 0;
                }
                Augmentation::SamplePairing
            }
        }
    }
}

/// CopyPairing augmentation.
///
/// Shares the history discipline of [`Copyout`](crate::Copyout): one past
/// image is drawn per call and an untouched copy of the incoming image is
/// remembered afterwards. Which operation is applied depends on the epoch
/// set through [`CopyPairing::advance_epoch`]:
///
/// - warmup (`epoch < warmup_epochs`): Copyout
/// - fine-tuning tail (`epoch > fine_tuning_epoch - 2`): Copyout
/// - otherwise `coo_epochs` Copyout calls, then `cop_epochs` SamplePairing
///   calls, repeating
///
/// # Example
///
/// ```rust
/// use coocop_core::{Image, Seed};
/// use coocop_transforms::{CopyPairing, CopyPairingConfig, CopyPairingPhase};
///
/// let config = CopyPairingConfig::new(16, 100, 300, 1, 1);
/// let mut cop = CopyPairing::new(config).unwrap().with_seed(Seed::new(0));
///
/// cop.advance_epoch(150);
/// assert_eq!(cop.phase(), CopyPairingPhase::Middle);
///
/// let out = cop.augment(Image::filled((31, 33, 3), 0.0_f32).unwrap()).unwrap();
/// assert_eq!(out.height(), 31);
/// ```
#[derive(Debug, Clone)]
pub struct CopyPairing<T: Pixel> {
    config: CopyPairingConfig,
    sampler: RegionSampler,
    buffer: RollingImageBuffer<T>,
    state: EpochPhaseState,
    last_augmentation: Option<Augmentation>,
    seed: Seed,
    rng: ChaCha8Rng,
}

impl<T: Pixel> CopyPairing<T> {
    /// Create from config.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] if the config is out of bounds.
    pub fn new(config: CopyPairingConfig) -> Result<Self> {
        config.validate()?;
        let seed = Seed::from_entropy();
        Ok(Self {
            sampler: RegionSampler::new(config.extent)?,
            buffer: RollingImageBuffer::new(config.image_buffer_size)?,
            state: EpochPhaseState::default(),
            last_augmentation: None,
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
    pub fn config(&self) -> &CopyPairingConfig {
        &self.config
    }

    /// The seed the random stream started from.
    #[must_use]
    pub fn seed(&self) -> Seed {
        self.seed
    }

    /// Epoch and counters.
    #[must_use]
    pub fn state(&self) -> EpochPhaseState {
        self.state
    }

    /// Epoch last announced by the training loop.
    #[must_use]
    pub fn current_epoch(&self) -> i64 {
        self.state.current_epoch
    }

    /// Copyout calls in the running middle-phase cycle.
    #[must_use]
    pub fn coo_count(&self) -> usize {
        self.state.coo_count
    }

    /// SamplePairing calls in the running middle-phase cycle.
    #[must_use]
    pub fn cop_count(&self) -> usize {
        self.state.cop_count
    }

    /// Phase of the current epoch.
    #[must_use]
    pub fn phase(&self) -> CopyPairingPhase {
        self.config.phase_at(self.state.current_epoch)
    }

    /// Number of images currently remembered.
    #[must_use]
    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }

    /// What the most recent call did, `None` before the first call.
    #[must_use]
    pub fn last_augmentation(&self) -> Option<Augmentation> {
        self.last_augmentation
    }

    /// Set the current epoch.
    ///
    /// Called by the training loop at every epoch start. Any value is
    /// accepted and repeating a value changes nothing.
    pub fn advance_epoch(&mut self, epoch: i64) {
        let before = self.phase();
        self.state.current_epoch = epoch;
        let after = self.phase();
        if before != after {
            tracing::debug!("CopyPairing: epoch {} enters {:?} phase", epoch, after);
        }
    }

    /// Augment one training image.
    ///
    /// The returned image has the shape of the input. An untouched copy of
    /// the input is always added to the history, even when the call fails.
    /// A failed call leaves the counters and [`last_augmentation`] as they
    /// were.
    ///
    /// [`last_augmentation`]: CopyPairing::last_augmentation
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ShapeMismatch`] if the remembered image drawn
    /// cannot be combined with `image` (channel count for Copyout, full
    /// shape for SamplePairing).
    pub fn augment(&mut self, mut image: Image<T>) -> Result<Image<T>> {
        let snapshot = image.clone();

        let (augmentation, outcome) = match self.buffer.sample(&mut self.rng) {
            None => {
                tracing::debug!("CopyPairing: history empty, image passed through");
                (Augmentation::Skipped, Ok(image))
            }
            Some(sample) => {
                let mut state = self.state;
                let augmentation = state.next(&self.config);
                let outcome = match augmentation {
                    Augmentation::SamplePairing => image.mean_with(&sample),
                    _ => paste_region(&mut image, &sample, &self.sampler, &mut self.rng)
                        .map(|()| image),
                };
                if outcome.is_ok() {
                    self.state = state;
                }
                (augmentation, outcome)
            }
        };

        tracing::trace!(
            epoch = self.state.current_epoch,
            coo_count = self.state.coo_count,
            cop_count = self.state.cop_count,
            ?augmentation,
            failed = outcome.is_err(),
            "CopyPairing call"
        );
        if outcome.is_ok() {
            self.last_augmentation = Some(augmentation);
        }
        self.buffer.insert(snapshot, &mut self.rng);
        outcome
    }
}

impl<T: Pixel> Transform<T> for CopyPairing<T> {
    fn apply(&mut self, image: Image<T>, split: Split) -> Result<Image<T>> {
        if split.is_eval() {
            self.last_augmentation = Some(Augmentation::Bypassed);
            return Ok(image);
        }
        self.augment(image)
    }

    fn name(&self) -> &str {
        "CopyPairing"
    }

    fn should_apply(&self, split: Split) -> bool {
        split.is_train()
    }
}
