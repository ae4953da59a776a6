use clap::{ArgAction, Parser, Subcommand};
use pics_layout::config::{self, LayoutConfig};
use pics_layout::output;
use pics_layout::pipeline::{self, PipelineRequest};
use pics_layout::select::{self, SelectionError};
use pics_layout::types::ImageSet;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Inputs shared by `build` and `plan`.
#[derive(clap::Args, Clone)]
struct SelectionArgs {
    /// Image files, in grid order. Directories expand to the images directly
    /// inside them, sorted by name.
    inputs: Vec<PathBuf>,

    /// Filename prefix for every written file (blank → "output")
    #[arg(long, default_value = "")]
    prefix: String,

    /// Print the result as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
#[command(name = "pics-layout")]
#[command(about = "Lay out photos in a square grid collage with a white frame")]
#[command(long_about = "\
Lay out photos in a square grid collage with a white frame

Every image is resampled to a 4000px long edge, centered on a white 4200px
square, and tiled into a grid of ceil(sqrt(n)) columns. The grid is scaled
to about 10000px and framed in white; the frame is 1000px for two columns
or fewer and shrinks to 200px at ten columns.

Written to the export directory:

  {prefix}_resampled_{name}                 one per input
  {prefix}_bordered_{name}                  one per input
  {prefix}_collage.jpg                      the grid
  {prefix}_collage_resampled_with_border.jpg  the final image

Sizes can be changed in pics-layout.toml; run 'pics-layout gen-config'.")]
#[command(version)]
struct Cli {
    /// Config file (default: ./pics-layout.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the collage
    Build {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Directory for all written files
        #[arg(long, required_unless_present = "dialogs")]
        export_dir: Option<PathBuf>,

        /// Choose images and export directory in native dialogs
        #[arg(long)]
        dialogs: bool,
    },
    /// Show the grid, border and file names a build would produce
    Plan {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Directory the files would be written to
        #[arg(long, default_value = ".")]
        export_dir: PathBuf,
    },
    /// Print a stock pics-layout.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(cli)
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Command::Build {
            selection,
            export_dir,
            dialogs,
        } => {
            let layout = load_layout_config(config_path)?;
            if dialogs {
                return build_with_dialogs(&selection, &layout);
            }
            let images = collect_images(&selection.inputs, &layout)?;
            let export_dir = export_dir.ok_or(SelectionError::Cancelled)?;
            let request = PipelineRequest {
                images,
                export_dir,
                prefix: selection.prefix,
            };
            let report = run_and_print(&request, &layout, selection.json)?;
            print_build_report(&report, selection.json)?;
        }
        Command::Plan {
            selection,
            export_dir,
        } => {
            let layout = load_layout_config(config_path)?;
            let images = collect_images(&selection.inputs, &layout)?;
            let request = PipelineRequest {
                images,
                export_dir,
                prefix: selection.prefix,
            };
            let plan = pipeline::plan_pipeline(&request, &layout)?;
            if selection.json {
                println!("{}", output::format_plan_json(&plan)?);
            } else {
                output::print_plan(&plan);
            }
        }
        // No config is loaded, so a broken file never blocks printing a fresh one
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_layout_config(path: Option<&Path>) -> Result<LayoutConfig, config::ConfigError> {
    match path {
        Some(path) => config::load_config_file(path),
        None => config::load_config(Path::new(".")),
    }
}

fn print_build_report(
    report: &pipeline::RunReport,
    json: bool,
) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", output::format_report_json(report)?);
    } else {
        output::print_report(report);
    }
    Ok(())
}

/// Expand inputs and apply the selection limit before anything is written.
fn collect_images(
    inputs: &[PathBuf],
    layout: &LayoutConfig,
) -> Result<ImageSet, Box<dyn std::error::Error>> {
    let files = select::expand_inputs(inputs)?;
    Ok(select::validate_selection(files, layout.selection.max_images)?)
}

/// Run the pipeline, printing progress events on a separate thread.
fn run_and_print(
    request: &PipelineRequest,
    layout: &LayoutConfig,
    quiet: bool,
) -> Result<pipeline::RunReport, Box<dyn std::error::Error>> {
    if quiet {
        return Ok(pipeline::run(request, layout, None)?);
    }

    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            for line in output::format_pipeline_event(&event) {
                println!("{}", line);
            }
        }
    });
    let result = pipeline::run(request, layout, Some(tx));
    printer
        .join()
        .map_err(|_| "progress printer thread panicked")?;
    Ok(result?)
}

#[cfg(feature = "dialogs")]
fn build_with_dialogs(
    selection: &SelectionArgs,
    layout: &LayoutConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let chosen = select::select(&select::DialogSelector, layout.selection.max_images);
    let (images, export_dir) = match chosen {
        Ok(chosen) => chosen,
        Err(SelectionError::Cancelled) => return Ok(()),
        Err(err) => {
            select::show_error_dialog(&err.to_string());
            return Err(err.into());
        }
    };

    let request = PipelineRequest {
        images,
        export_dir,
        prefix: selection.prefix.clone(),
    };
    let report = run_and_print(&request, layout, selection.json)?;
    select::show_info_dialog(&format!(
        "Collage created: {}",
        report.final_output.display()
    ));
    print_build_report(&report, selection.json)?;
    Ok(())
}

#[cfg(not(feature = "dialogs"))]
fn build_with_dialogs(
    _selection: &SelectionArgs,
    _layout: &LayoutConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    Err("this build has no dialog support; rebuild with `--features dialogs`".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gen_config_ignores_broken_config_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let broken = tmp.path().join("pics-layout.toml");
        std::fs::write(&broken, "[border]\ncell_size = \"big\"\n").unwrap();
        let broken_arg = broken.to_str().unwrap();

        let cli = Cli::try_parse_from(["pics-layout", "--config", broken_arg, "gen-config"]).unwrap();
        assert!(run(cli).is_ok());

        let cli = Cli::try_parse_from(["pics-layout", "--config", broken_arg, "plan", "a.jpg"]).unwrap();
        assert!(run(cli).is_err());
    }

    #[test]
    fn build_requires_export_dir_unless_dialogs() {
        assert!(Cli::try_parse_from(["pics-layout", "build", "a.jpg"]).is_err());
        assert!(Cli::try_parse_from(["pics-layout", "build", "--dialogs", "--json"]).is_ok());
    }
}
