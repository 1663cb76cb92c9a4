//! Drives CopyPairing through a toy training schedule and reports which
//! augmentation each epoch used.
//!
//! Run with `cargo run -p coocop --example augment_loop`.

use coocop::prelude::*;
use rand::Rng;
use tracing_subscriber::prelude::*;

const N_EPOCHS: usize = 12;
const N_SAMPLES: usize = 16;

fn random_image(rng: &mut impl Rng) -> Result<Image<f32>> {
    let values = (0..28 * 28 * 3).map(|_| rng.gen::<f32>()).collect();
    Image::from_shape_vec((28, 28, 3), values)
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            tracing::Level::DEBUG,
        ))
        .init();

    let config = CopyPairingConfig::new(12, 3, N_EPOCHS as i64, 2, 1).with_image_buffer_size(8);
    let mut augment = SharedTransform::new(CopyPairing::<f32>::new(config)?.with_seed(Seed::new(42)));

    let mut callbacks = CallbackList::new();
    callbacks.add(EpochNotifyCallback::new(augment.clone()));

    let mut rng = Seed::new(7).to_rng();
    let mut ctx = CallbackContext::new(N_EPOCHS);
    callbacks.before_fit(&mut ctx)?;

    for epoch in 0..N_EPOCHS {
        ctx.epoch = epoch;
        callbacks.before_epoch(&mut ctx)?;

        let (mut copyout, mut pairing) = (0, 0);
        for _ in 0..N_SAMPLES {
            augment.apply(random_image(&mut rng)?, Split::Train)?;
            match augment.lock().last_augmentation() {
                Some(Augmentation::Copyout) => copyout += 1,
                Some(Augmentation::SamplePairing) => pairing += 1,
                _ => {}
            }
        }

        let phase = augment.lock().phase();
        tracing::info!(
            "epoch {:>2} {:<10} copyout={:>2} sample_pairing={:>2}",
            epoch,
            format!("{phase:?}"),
            copyout,
            pairing
        );
    }

    Ok(())
}
