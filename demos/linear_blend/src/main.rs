use std::path::PathBuf;

use argh::FromArgs;

use pixscan::image::RasterBuffer;
use pixscan::imgproc::enhance;
use pixscan::io::functional as F;

const DEFAULT_ALPHA: f64 = 0.5;

#[derive(FromArgs, Debug)]
/// Blend two images of the same size and adjust contrast and brightness of the result.
struct Args {
    /// path to the first image
    #[argh(option)]
    src1: PathBuf,

    /// path to the second image
    #[argh(option)]
    src2: PathBuf,

    /// weight of the first image in [0, 1], the second one gets 1 - alpha
    #[argh(option, short = 'a', default = "DEFAULT_ALPHA")]
    alpha: f64,

    /// gain applied to the blended image
    #[argh(option, default = "1.0")]
    contrast: f64,

    /// bias added to the blended image
    #[argh(option, default = "0.0")]
    brightness: f64,

    /// path to write the result to
    #[argh(option, short = 'o')]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    let alpha = if (0.0..=1.0).contains(&args.alpha) {
        args.alpha
    } else {
        log::warn!(
            "alpha {} is outside [0, 1], using {DEFAULT_ALPHA}",
            args.alpha
        );
        DEFAULT_ALPHA
    };

    let src1 = F::read_image_any_rgb8(&args.src1)?;
    let src2 = F::read_image_any_rgb8(&args.src2)?;

    let mut blended = RasterBuffer::from_size_val(src1.size(), 3, 0)?;
    enhance::add_weighted(&src1, alpha, &src2, 1.0 - alpha, 0.0, &mut blended)?;

    log::info!(
        "Blended {} and {} with alpha {alpha}",
        args.src1.display(),
        args.src2.display()
    );

    let output = if args.contrast != 1.0 || args.brightness != 0.0 {
        let mut adjusted = RasterBuffer::from_size_val(blended.size(), 3, 0)?;
        enhance::convert_scale(&blended, &mut adjusted, args.contrast, args.brightness)?;
        adjusted
    } else {
        blended
    };

    F::write_image_any(&args.output, &output)?;
    log::info!("Wrote {}", args.output.display());

    Ok(())
}
