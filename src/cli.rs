//! Command-line parsing for the `solar-sizer` binary.

use std::env;
use std::path::PathBuf;

use solar_sizer::calc::RawForm;

/// Default API port when `--port` is not given.
#[cfg(feature = "api")]
pub const DEFAULT_PORT: u16 = 3000;

/// Parsed CLI arguments.
#[derive(Debug, Default)]
pub struct CliArgs {
    pub help: bool,
    pub config_path: Option<PathBuf>,
    pub locations: Option<PathBuf>,
    pub roi: Option<PathBuf>,
    pub list_regions: bool,
    pub list_localities: Option<String>,
    /// The estimate form as typed on the command line.
    pub form: RawForm,
    /// Set once any of `--region`, `--locality`, `--bills`, `--coverage` is seen.
    pub has_form: bool,
    pub snapshot_in: Option<PathBuf>,
    pub snapshot_out: Option<PathBuf>,
    pub metrics_out: Option<PathBuf>,
    pub show_roi: bool,
    pub roi_out: Option<PathBuf>,
    #[cfg(feature = "api")]
    pub serve: bool,
    #[cfg(feature = "api")]
    pub port: Option<u16>,
}

impl CliArgs {
    /// Whether the location index has to be loaded.
    pub fn wants_index(&self) -> bool {
        self.list_regions || self.list_localities.is_some() || self.has_form
    }

    /// Whether the ROI series has to be loaded.
    pub fn wants_roi(&self) -> bool {
        self.show_roi || self.roi_out.is_some()
    }

    /// A previous snapshot is to be rendered as-is, with no new form.
    pub fn replay_only(&self) -> bool {
        !self.has_form && self.snapshot_in.is_some()
    }

    /// Whether the arguments ask for anything at all.
    pub fn has_work(&self) -> bool {
        self.wants_index() || self.wants_roi() || self.replay_only()
    }
}

/// Parses the process arguments.
///
/// # Errors
///
/// Returns a message describing the first malformed argument.
pub fn parse_args() -> Result<CliArgs, String> {
    parse_args_from(env::args().skip(1).collect())
}

/// Parses an argument list (without the program name).
///
/// # Arguments
///
/// * `args` - Command-line arguments after the program name
///
/// # Errors
///
/// Returns a message for a missing flag value, a malformed `--bills` or
/// `--port` value, or an unknown argument.
pub fn parse_args_from(args: Vec<String>) -> Result<CliArgs, String> {
    let mut cli = CliArgs::default();

    let mut i = 0usize;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--help" | "-h" => cli.help = true,
            "--config" => cli.config_path = Some(PathBuf::from(args.value_of(&mut i, flag)?)),
            "--locations" => cli.locations = Some(PathBuf::from(args.value_of(&mut i, flag)?)),
            "--roi" => cli.roi = Some(PathBuf::from(args.value_of(&mut i, flag)?)),
            "--list-regions" => cli.list_regions = true,
            "--list-localities" => {
                cli.list_localities = Some(args.value_of(&mut i, flag)?.to_string());
            }
            "--region" => {
                cli.form.region = args.value_of(&mut i, flag)?.to_string();
                cli.has_form = true;
            }
            "--locality" => {
                cli.form.locality = args.value_of(&mut i, flag)?.to_string();
                cli.has_form = true;
            }
            "--bills" => {
                cli.form.bills = split_bills(args.value_of(&mut i, flag)?)?;
                cli.has_form = true;
            }
            "--coverage" => {
                cli.form.coverage = args.value_of(&mut i, flag)?.to_string();
                cli.has_form = true;
            }
            "--stratum" => cli.form.stratum = args.value_of(&mut i, flag)?.to_string(),
            "--battery" => cli.form.battery = args.value_of(&mut i, flag)?.to_string(),
            "--name" => cli.form.name = args.value_of(&mut i, flag)?.to_string(),
            "--phone" => cli.form.phone = args.value_of(&mut i, flag)?.to_string(),
            "--email" => cli.form.email = args.value_of(&mut i, flag)?.to_string(),
            "--comments" => cli.form.comments = args.value_of(&mut i, flag)?.to_string(),
            "--snapshot-in" => {
                cli.snapshot_in = Some(PathBuf::from(args.value_of(&mut i, flag)?));
            }
            "--snapshot-out" => {
                cli.snapshot_out = Some(PathBuf::from(args.value_of(&mut i, flag)?));
            }
            "--metrics-out" => {
                cli.metrics_out = Some(PathBuf::from(args.value_of(&mut i, flag)?));
            }
            "--show-roi" => cli.show_roi = true,
            "--roi-out" => cli.roi_out = Some(PathBuf::from(args.value_of(&mut i, flag)?)),
            #[cfg(feature = "api")]
            "--serve" => cli.serve = true,
            #[cfg(feature = "api")]
            "--port" => {
                let raw = args.value_of(&mut i, flag)?;
                let port = raw
                    .parse::<u16>()
                    .map_err(|_| format!("--port value \"{raw}\" is not a valid u16"))?;
                cli.port = Some(port);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    Ok(cli)
}

/// Splits `a,b,c` into the three bill fields, text left as typed.
fn split_bills(raw: &str) -> Result<[String; 3], String> {
    let parts: Vec<&str> = raw.split(',').collect();
    match parts.as_slice() {
        [a, b, c] => Ok([a.to_string(), b.to_string(), c.to_string()]),
        _ => Err(format!(
            "--bills expects three comma-separated values, got \"{raw}\""
        )),
    }
}

trait SliceArgExt {
    fn value_of(&self, index: &mut usize, flag: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    /// Advances past `flag` and returns its value.
    fn value_of(&self, index: &mut usize, flag: &str) -> Result<&str, String> {
        *index += 1;
        self.get(*index)
            .map(String::as_str)
            .ok_or_else(|| format!("missing value for {flag}"))
    }
}

pub fn print_usage() {
    eprintln!("solar-sizer: size a residential solar system from electricity bills");
    eprintln!();
    eprintln!("Usage: solar-sizer [OPTIONS]");
    eprintln!();
    eprintln!("Data:");
    eprintln!("  --config <path>            Load settings from a TOML file");
    eprintln!("  --locations <path>         Location table JSON (overrides config)");
    eprintln!("  --roi <path>               ROI series JSON (overrides config)");
    eprintln!();
    eprintln!("Selectors:");
    eprintln!("  --list-regions             Print all regions");
    eprintln!("  --list-localities <region> Print the localities of a region");
    eprintln!();
    eprintln!("Estimate:");
    eprintln!("  --region <name>            Selected region");
    eprintln!("  --locality <name>          Selected locality");
    eprintln!("  --bills <a,b,c>            Last three monthly bills");
    eprintln!("  --coverage <pct>           Coverage percentage (10-100)");
    eprintln!("  --stratum <1-6>            Socioeconomic stratum");
    eprintln!("  --battery <si|no>          Include battery storage");
    eprintln!("  --name, --phone, --email, --comments <text>");
    eprintln!("                             Contact details (passed through)");
    eprintln!("  --snapshot-in <path>       Previous result; reused if the input matches");
    eprintln!("  --snapshot-out <path>      Write the result for a later run");
    eprintln!("  --metrics-out <path>       Export the metrics to CSV");
    eprintln!();
    eprintln!("ROI:");
    eprintln!("  --show-roi                 Print the ten-year ROI summary");
    eprintln!("  --roi-out <path>           Export the ROI series to CSV");
    #[cfg(feature = "api")]
    {
        eprintln!();
        eprintln!("Server:");
        eprintln!("  --serve                    Start the REST API");
        eprintln!("  --port <u16>               API server port (default: {DEFAULT_PORT})");
    }
    eprintln!("  --help                     Show this help message");
}
