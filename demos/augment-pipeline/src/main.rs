use detaug::effects::{
    Compose, Effect, RandomBrightness, RandomFlip, RandomRotate, RandomScale, RandomTranslate,
};
use detaug::{BoundingBox, Target};
use detaug_image::{Image, ImageSize};
use rand::{rngs::StdRng, SeedableRng};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .map(|s| s.parse::<u64>())
        .transpose()?
        .unwrap_or(42);

    // synthetic RGB gradient standing in for a decoded training sample
    let size = ImageSize {
        width: 320,
        height: 240,
    };
    let data: Vec<u8> = (0..size.width * size.height * 3)
        .map(|i| (i % 256) as u8)
        .collect();
    let image = Image::<u8, 3>::new(size, data)?;

    let target = Target::with_labels(
        vec![
            BoundingBox::new(40, 30, 120, 100),
            BoundingBox::new(180, 120, 280, 220),
        ],
        vec![1, 2],
    );

    let pipeline = Compose::new(vec![
        Box::new(RandomFlip::horizontal(0.5)?),
        Box::new(RandomRotate::new(-10, 10)?),
        Box::new(RandomScale::new(0.9, 1.1)?),
        Box::new(RandomTranslate::new((20, 20))?),
        Box::new(RandomBrightness::default()),
    ]);

    log::info!("augmenting a {size} sample with seed {seed}");
    for (i, b) in target.boxes.iter().enumerate() {
        log::info!("input box {i}: {b:?}");
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let (out_image, out_target) = pipeline.apply(image, target, &mut rng)?;

    log::info!(
        "augmented image: {} ({} boxes survived)",
        out_image.size(),
        out_target.boxes.len()
    );
    for (i, b) in out_target.boxes.iter().enumerate() {
        log::info!("output box {i}: {b:?}");
    }

    Ok(())
}
