use std::path::PathBuf;

use argh::FromArgs;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use pixscan::image::{ImageSize, RasterBuffer};
use pixscan::imgproc::benchmark::{BenchmarkConfig, BenchmarkHarness, ChannelMode, LogReporter};
use pixscan::imgproc::ScanStrategy;
use pixscan::io::functional as F;

#[derive(FromArgs, Debug)]
/// Reduce the color space of an image with a lookup table and time every way of scanning it.
struct Args {
    /// path to the input image, a random 640x480 image is used when omitted
    #[argh(option, short = 'i')]
    image_path: Option<PathBuf>,

    /// quantization step of the color reduction
    #[argh(option, short = 'd')]
    divisor: i64,

    /// load the image as gray scale
    #[argh(switch, short = 'g')]
    gray: bool,

    /// number of timed runs per strategy
    #[argh(option, short = 'n', default = "100")]
    repetitions: usize,

    /// extra bytes appended to every row to exercise non-packed buffers
    #[argh(option, default = "0")]
    padding: usize,
}

fn random_image(channels: usize) -> Result<RasterBuffer, Box<dyn std::error::Error>> {
    let size = ImageSize {
        width: 640,
        height: 480,
    };
    let mut rng = StdRng::seed_from_u64(42);
    let data = (0..size.width * size.height * channels)
        .map(|_| rng.random())
        .collect();
    Ok(RasterBuffer::new(size, channels, data)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    let config = BenchmarkConfig {
        divisor: args.divisor,
        repetitions: args.repetitions,
        channel_mode: if args.gray {
            ChannelMode::Gray
        } else {
            ChannelMode::Color
        },
    };

    // fail on bad options before touching the image
    let table = config.lookup_table()?;

    let image = match &args.image_path {
        Some(path) => F::read_image_any(path, config.channel_mode.channels())?,
        None => {
            log::warn!("No image path given, using a random {} image", config.channel_mode);
            random_image(config.channel_mode.channels())?
        }
    };

    let image = if args.padding > 0 {
        image.to_row_pitch(image.row_bytes() + args.padding)?
    } else {
        image
    };

    log::info!(
        "Scanning image of {} with {} channels, row pitch {} bytes",
        image.size(),
        image.num_channels(),
        image.row_pitch()
    );

    BenchmarkHarness::new().run_and_report(
        &image,
        &table,
        &ScanStrategy::ALL,
        config.repetitions,
        &mut LogReporter,
    )?;

    Ok(())
}
