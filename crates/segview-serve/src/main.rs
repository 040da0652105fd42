use std::{path::PathBuf, sync::Arc};

use argh::FromArgs;
use segview_annotate::{colors::DEFAULT_SEED, ClassNames};
use segview_serve::{router, service::DEFAULT_QUALITY, ResultStore, SegmentService};

/// Serve annotated instance segmentation results over HTTP.
#[derive(FromArgs)]
struct Args {
    /// port to listen on
    #[argh(option, default = "3000")]
    port: u16,

    /// directory of the stored frames
    #[argh(option, default = "PathBuf::from(\"results\")")]
    results_dir: PathBuf,

    /// class names file, one name per line
    #[argh(option)]
    classes: Option<PathBuf>,

    /// seed of the class color shuffle
    #[argh(option, default = "DEFAULT_SEED")]
    seed: u64,

    /// jpeg quality of the encoded frames
    #[argh(option, default = "DEFAULT_QUALITY")]
    quality: u8,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let names = match &args.classes {
        Some(path) => ClassNames::from_lines(&std::fs::read_to_string(path)?),
        None => ClassNames::default(),
    };
    log::info!("loaded {} class names", names.len());

    let store = ResultStore::new(&args.results_dir)?;
    let service = SegmentService::new(names, args.seed, store, args.quality);
    let app = router(Arc::new(service));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", args.port)).await?;
    log::info!("🚀 serving on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
