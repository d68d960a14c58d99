use clap::{Parser, Subcommand};
use emote_forge::config::{self, AppConfig};
use emote_forge::convert::{ConversionRequest, Converter, validate_selection};
use emote_forge::output;
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

/// Shared flags for commands that accept an input file.
#[derive(clap::Args, Clone)]
struct FormatArgs {
    /// Also accept WebP input (baseline set is jpg/jpeg/png/gif)
    #[arg(long)]
    extended: bool,
}

#[derive(Parser)]
#[command(name = "emote-forge")]
#[command(about = "Convert an image to Discord, Twitch, and 7TV emote sizes")]
#[command(long_about = "\
Convert an image to Discord, Twitch, and 7TV emote sizes

Takes one image file and writes every required emote size as a PNG into a
bundle directory next to the input:

  photos/cat.png
  photos/cat_emote_bundle/
  ├── cat-Discord-Small-28x28.png
  ├── cat-Discord-Medium-32x32.png
  ├── ...
  └── cat-7TV-4x-128x128.png

Sources are scaled to cover each target box and center-cropped, so the
middle of the frame survives at every size. Transparency is preserved;
animated inputs contribute their first frame only.

Run 'emote-forge gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Optional config.toml path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert an image into the full emote bundle
    Convert {
        /// Source image file
        file: PathBuf,
        #[command(flatten)]
        formats: FormatArgs,
        /// Maximum parallel workers (default: CPU cores)
        #[arg(long)]
        workers: Option<usize>,
        /// Print the result as JSON instead of the file listing
        #[arg(long)]
        json: bool,
    },
    /// Validate that a file would be accepted, without converting
    Check {
        /// Candidate file
        file: PathBuf,
        #[command(flatten)]
        formats: FormatArgs,
    },
    /// Print the size catalog
    Sizes,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut app_config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    match cli.command {
        Command::Convert {
            file,
            formats,
            workers,
            json,
        } => {
            app_config.formats.extended |= formats.extended;
            if workers.is_some() {
                app_config.processing.max_workers = workers;
            }
            init_thread_pool(&app_config.processing);

            let request = ConversionRequest::new(file, &app_config.formats)?;
            let converter = Converter::new(app_config.effective_catalog()?);

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    println!("{}", output::format_event(&event));
                }
            });
            let result = converter.convert_with_events(&request, Some(tx));
            printer.join().unwrap();

            let outcome = result?;
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                output::print_outcome(&outcome);
            }
        }
        Command::Check { file, formats } => {
            app_config.formats.extended |= formats.extended;
            validate_selection(&file, &app_config.formats)?;
            println!("{} would be accepted", file.display());
        }
        Command::Sizes => {
            let catalog = app_config.effective_catalog()?;
            output::print_catalog(&catalog);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores — user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let workers = config::effective_workers(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build_global()
        .ok();
}
