use argh::FromArgs;
use std::path::PathBuf;

use segview::annotate::{
    build_detections, colors::DEFAULT_SEED, render, report::ClassInventory, ClassNames,
    ColorTable, RawDetection, RenderOptions,
};
use segview::io::jpeg::{read_image_jpeg_rgb8, write_image_jpeg_rgb8};
use segview::serve::DetectionRecord;

#[derive(FromArgs)]
/// Draw the detections of a segmentation model on an image
struct Args {
    /// path to the input JPEG image
    #[argh(option, short = 'i')]
    image: PathBuf,

    /// path to the JSON list of raw detections
    #[argh(option, short = 'd')]
    detections: PathBuf,

    /// path to the class names, one per line
    #[argh(option, short = 'c')]
    classes: Option<PathBuf>,

    /// path to the annotated JPEG image, the report is written next to it
    #[argh(option, short = 'o', default = "PathBuf::from(\"result.jpg\")")]
    output: PathBuf,

    /// seed of the class colors
    #[argh(option, default = "DEFAULT_SEED")]
    seed: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    // read the inputs
    let image = read_image_jpeg_rgb8(&args.image)?;
    let raws: Vec<RawDetection> =
        serde_json::from_str(&std::fs::read_to_string(&args.detections)?)?;
    let names = match &args.classes {
        Some(path) => ClassNames::from_lines(&std::fs::read_to_string(path)?),
        None => ClassNames::default(),
    };
    let colors = ColorTable::from_class_names(&names, args.seed);

    // draw the detections
    let detections = build_detections(&raws, image.size(), &names, &colors);
    let frame = render(&image, &detections, &RenderOptions::default())?;
    write_image_jpeg_rgb8(&args.output, &frame, 90)?;

    // write the report
    let records: Vec<_> = detections.iter().map(DetectionRecord::from_detection).collect();
    let report = serde_json::json!({
        "detections": records,
        "inventory": ClassInventory::from_detections(&names, &detections),
    });
    let report_path = args.output.with_extension("json");
    std::fs::write(&report_path, serde_json::to_string_pretty(&report)?)?;

    log::info!(
        "wrote {} detections to {} and {}",
        detections.len(),
        args.output.display(),
        report_path.display()
    );

    Ok(())
}
