use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use farmtrace::GeoPoint;
use farmtrace::config::{FileConfig, GeolocationConfig};
use farmtrace::export::write_geojson;
use farmtrace::locate::{
    CachedLocator, FixedLocator, Geolocator, NominatimLocator, PositionOptions, Unsupported,
};
use farmtrace::session::{Command, HELP, Session, parse_point};
use farmtrace::view::format_area;

type BoxedLocator = Box<dyn Geolocator>;

/// Trace a farm boundary on a map and measure its area
///
/// Examples:
///   # Trace four points, lock the selection and save it
///   farmtrace -p 33.6982,-117.9472 -p 33.6974,-117.9458 \
///             -p 33.6961,-117.9462 -p 33.6967,-117.9475 \
///             --complete --name "Riverside Orchard" --save
///
///   # Replay a command script and export the region
///   farmtrace --script farm.txt --geojson farm.geojson
///
///   # Interactive session, locating via a place name
///   farmtrace --locate "Huntington Beach, USA"
#[derive(Parser, Debug)]
#[command(name = "farmtrace")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches farmtrace.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Boundary point as "lat,lon" (repeatable, added in order)
    #[arg(short = 'p', long = "point", value_parser = parse_point, allow_hyphen_values = true)]
    points: Vec<GeoPoint>,

    /// Farm name
    #[arg(short = 'n', long)]
    name: Option<String>,

    /// Lock the selection after adding the points
    #[arg(long)]
    complete: bool,

    /// Save the locked selection under --name
    #[arg(long, requires = "name")]
    save: bool,

    /// File of editor commands, one per line (see `help` in interactive mode)
    #[arg(long)]
    script: Option<PathBuf>,

    /// Place name to resolve when locating (uses Nominatim)
    #[arg(long)]
    locate: Option<String>,

    /// Fixed latitude reported when locating (use with --lon)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Fixed longitude reported when locating (use with --lat)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Write the locked region as a GeoJSON feature
    #[arg(long)]
    geojson: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    pretty_env_logger::formatted_builder()
        .filter_level(LevelFilter::Debug)
        .parse_default_env()
        .init();
    log::set_max_level(if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });

    let file_config = match args.config {
        Some(ref path) => FileConfig::from_path(path)?,
        None => FileConfig::load().unwrap_or_default(),
    };
    if file_config.verbose {
        log::set_max_level(LevelFilter::Debug);
    }

    let geo_config = file_config.geolocation.clone().unwrap_or_default();
    let options = geo_config.position_options();
    let locator = CachedLocator::new(select_locator(&args, &geo_config));

    let mut session =
        Session::new(locator, options).with_view(file_config.center(), file_config.zoom);

    for &point in &args.points {
        session.apply(Command::Add(point));
    }
    if let Some(ref name) = args.name {
        session.apply(Command::Name(name.clone()));
    }
    if args.complete {
        session.apply(Command::Complete);
    }
    if args.save {
        session.apply(Command::Save(None));
    }

    if let Some(ref script) = args.script {
        let contents = std::fs::read_to_string(script)
            .context(format!("Failed to read script file: {:?}", script))?;
        run_script(&mut session, &contents, &options);
    } else if args.points.is_empty() {
        run_interactive(&mut session, &options)?;
    }

    println!();
    print!("{}", session.render());

    if let Some(ref path) = args.geojson {
        write_geojson(path, session.editor()).context("Failed to export farm region")?;
        println!();
        println!("GeoJSON: {}", path.display());
    }

    Ok(())
}

fn select_locator(args: &Args, geo_config: &GeolocationConfig) -> BoxedLocator {
    if let (Some(lat), Some(lon)) = (args.lat, args.lon) {
        return Box::new(FixedLocator::new(GeoPoint::new(lat, lon)));
    }
    if let Some(ref query) = args.locate {
        return Box::new(NominatimLocator::new(query.clone()).with_url(&geo_config.nominatim_url));
    }
    if let Some(point) = geo_config.fixed_position() {
        return Box::new(FixedLocator::new(point));
    }
    if let Some(ref query) = geo_config.query {
        return Box::new(NominatimLocator::new(query.clone()).with_url(&geo_config.nominatim_url));
    }

    log::debug!("No location source configured");
    Box::new(Unsupported)
}

fn run_script<L: Geolocator>(session: &mut Session<L>, contents: &str, options: &PositionOptions) {
    for (number, line) in contents.lines().enumerate() {
        match Command::parse(line) {
            Ok(Some(command)) => {
                if !dispatch(session, command, options) {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => eprintln!("Line {}: {}", number + 1, e),
        }
    }
}

fn run_interactive<L: Geolocator>(
    session: &mut Session<L>,
    options: &PositionOptions,
) -> Result<()> {
    println!("farmtrace - Farm Boundary Editor");
    println!("================================");
    println!("Type 'help' for commands.");

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read from stdin")?;

        match Command::parse(&line) {
            Ok(Some(command)) => {
                if !dispatch(session, command, options) {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => println!("{}", e),
        }
    }

    Ok(())
}

/// Apply one command, printing whatever the command asks to see.
/// Returns `false` when the session should end.
fn dispatch<L: Geolocator>(
    session: &mut Session<L>,
    command: Command,
    options: &PositionOptions,
) -> bool {
    match command {
        Command::Help => {
            println!("{}", HELP);
            true
        }
        Command::Show => {
            print!("{}", session.render());
            true
        }
        Command::Locate => {
            let spinner = create_spinner("Fetching your location...");
            let start = Instant::now();
            session.apply(Command::Locate);
            let message = match session.geo_error() {
                Some(error) => format!("Location failed: {}", error),
                None => format!(
                    "Centered on {} [{:.1}s, timeout {}s]",
                    session.center(),
                    start.elapsed().as_secs_f32(),
                    options.timeout.as_secs()
                ),
            };
            spinner.finish_with_message(message);
            true
        }
        command => {
            let keep_going = session.apply(command);
            let editor = session.editor();
            log::debug!("State: {:?}", editor.state());
            println!(
                "Vertices: {}  Area: {}",
                editor.vertices().len(),
                format_area(editor.compute_area())
            );
            keep_going
        }
    }
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
