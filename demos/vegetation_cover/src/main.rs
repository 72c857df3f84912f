use argh::FromArgs;
use std::path::PathBuf;

use verdant::imgproc::parallel::ExecutionStrategy;
use verdant::{AnalyzerConfig, VegetationAnalyzer};

#[derive(FromArgs)]
/// Estimate vegetation coverage and carbon from a photograph
struct Args {
    /// path to an input image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// directory where the mask and the overlay are written
    #[argh(option, short = 'o')]
    output_dir: Option<PathBuf>,

    /// json configuration file
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// ground area covered by the image, in hectares
    #[argh(option)]
    area_hectares: Option<f64>,

    /// number of worker threads, 0 uses every core
    #[argh(option)]
    num_threads: Option<usize>,

    /// skip rendering the overlay image
    #[argh(switch)]
    no_visualization: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let mut config = match &args.config {
        Some(path) => AnalyzerConfig::from_json_file(path)?,
        None => AnalyzerConfig::default(),
    };

    if let Some(area_hectares) = args.area_hectares {
        config.area_hectares = area_hectares;
    }

    if let Some(num_threads) = args.num_threads {
        config.execution = match num_threads {
            0 => ExecutionStrategy::Parallel,
            n => ExecutionStrategy::Fixed(n),
        };
    }

    if args.no_visualization {
        config.visualize = false;
    }

    let analyzer = VegetationAnalyzer::new(config)?;
    log::info!("{:?}", analyzer.status());

    let result = analyzer.analyze_path(&args.image_path, args.output_dir.as_deref())?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
