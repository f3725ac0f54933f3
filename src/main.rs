// Command-line entry point: opens one image and prints its pixel average.

use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use vips_binding::{Image, Options, Runtime, RuntimeConfig};

#[derive(Parser, Debug)]
#[command(name = "vips-avg")]
#[command(about = "Open an image with libvips and print its pixel average")]
struct Cli {
    /// Image file to open
    filename: String,

    /// Load options as JSON, e.g. '{"heif-load":{"page":1}}'. Save option
    /// sets are rejected.
    #[arg(long)]
    options: Option<String>,

    /// libvips worker threads, 0 lets libvips decide
    #[arg(long, env = "VIPS_CONCURRENCY", default_value_t = 0)]
    concurrency: i32,

    /// Report leaked libvips objects on exit
    #[arg(long)]
    leak_check: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)       // Remove module path
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(average) => {
            println!("average: {average}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("vips-avg: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<f64> {
    let options = match &cli.options {
        Some(json) => serde_json::from_str::<Options>(json).context("invalid --options JSON")?,
        None => Options::default(),
    };
    if options.is_save() {
        bail!(
            "--options must name a load option set, got '{}'",
            options.operation()
        );
    }
    options.validate().context("invalid --options")?;

    let config = RuntimeConfig {
        concurrency: cli.concurrency,
        leak_check: cli.leak_check,
        ..RuntimeConfig::default()
    };
    let _runtime = Runtime::start(&config)?;

    let Some(image) = Image::open(&cli.filename, &options)? else {
        bail!("unable to open '{}'", cli.filename);
    };
    info!("Opened '{}' ({}×{})", cli.filename, image.width(), image.height());

    let average = image.average()?;
    image.release();
    debug!("Average of '{}' is {}", cli.filename, average);

    Ok(average)
}
