//! `SdrBoost` - SDR content brightness for HDR displays on Windows
//!
//! Reads one brightness value (argument or prompt), clamps it to 1.0-6.0 and
//! applies it to every connected display.

use anyhow::{Context, Result};
use clap::Parser;
use sdrboost::{
    brightness::{BrightnessLevel, read_brightness},
    config::ConfigManager,
    controller::BoostRun,
    error::{SdrBoostError, get_user_friendly_error},
    hdr::{WindowsVersion, probe_boost_function},
    monitor::SystemMonitors,
    utils,
};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use tracing::{debug, error, info, warn};

/// Set the SDR content brightness used on HDR displays
#[derive(Debug, Parser)]
#[command(name = "sdrboost", version, about)]
struct Cli {
    /// Brightness from 1.0 to 6.0; prompted for when omitted
    #[arg(allow_hyphen_values = true)]
    brightness: Option<String>,

    /// Anything after the brightness is ignored
    #[arg(hide = true, allow_hyphen_values = true)]
    ignored: Vec<String>,

    /// Export ordinal of the boost function [default: 171]
    #[arg(long, value_name = "N")]
    ordinal: Option<u16>,

    /// Library exporting the boost function [default: dwmapi.dll]
    #[arg(long, value_name = "NAME")]
    library: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let requested = {
        let mut input = io::stdin().lock();
        let mut out = io::stdout().lock();
        match begin_run(cli.brightness.as_deref(), &mut input, &mut out) {
            Ok(Some(value)) => value,
            // Diagnostic already printed; nothing was changed or written
            Ok(None) => return ExitCode::SUCCESS,
            Err(e) => {
                println!("{}", get_user_friendly_error(&e));
                return ExitCode::FAILURE;
            }
        }
    };

    if !cli.ignored.is_empty() {
        debug!("Ignoring extra arguments {:?}", cli.ignored);
    }

    match run(&cli, requested) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Run failed: {:#}", e);
            let message = if let Some(sdr_error) = e.downcast_ref::<SdrBoostError>() {
                get_user_friendly_error(sdr_error)
            } else {
                format!("{e:#}")
            };
            println!("{message}");
            ExitCode::FAILURE
        }
    }
}

/// Resolve the brightness request, then start file logging
///
/// Returns `None` for an unparsable request. Nothing touches the disk on
/// that path: the log directory is only created once a value parsed.
fn begin_run<R: BufRead, W: Write>(
    argument: Option<&str>,
    input: &mut R,
    out: &mut W,
) -> sdrboost::Result<Option<f64>> {
    let requested = match read_brightness(argument, input, out) {
        Ok(value) => value,
        Err(SdrBoostError::InputParse { .. }) => return Ok(None),
        Err(e) => return Err(e),
    };

    // A missing log file must not stop the brightness change
    if let Err(e) = utils::init_logging() {
        eprintln!("Logging unavailable: {e}");
    }
    info!("Brightness request {}", requested);

    Ok(Some(requested))
}

fn run(cli: &Cli, requested: f64) -> Result<()> {
    println!("Parsed {requested}");

    let level = BrightnessLevel::clamped(requested);
    println!("Setting brightness {level}");

    let config = ConfigManager::load()
        .context("Failed to load configuration")?
        .with_overrides(cli.library.clone(), cli.ordinal);

    log_platform(config.ordinal);

    let capability = probe_boost_function(&config);
    let report = BoostRun::new()
        .execute_with(capability, &SystemMonitors, level, |monitor| {
            println!(
                "Changing brightness for monitor handle: {} to: {}",
                monitor.handle, level
            );
        })
        .context("Failed to apply brightness")?;

    info!(
        "Run finished: {} monitor(s) at {}",
        report.monitors.len(),
        report.level
    );
    Ok(())
}

/// Log the Windows build next to the ordinal in use
fn log_platform(ordinal: u16) {
    match WindowsVersion::get_build_number() {
        Ok(build) => {
            info!(
                "Windows {:?} build {}, boost ordinal {}",
                WindowsVersion::parse_build_number(build),
                build,
                ordinal
            );
        }
        Err(e) => {
            warn!(
                "Could not determine Windows build ({}), boost ordinal {}",
                e, ordinal
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Cursor;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_without_arguments() {
        let cli = Cli::try_parse_from(["sdrboost"]).unwrap();
        assert!(cli.brightness.is_none());
        assert!(cli.ignored.is_empty());
        assert!(cli.ordinal.is_none());
        assert!(cli.library.is_none());
    }

    #[test]
    fn test_cli_accepts_negative_brightness() {
        let cli = Cli::try_parse_from(["sdrboost", "-2.5"]).unwrap();
        assert_eq!(cli.brightness.as_deref(), Some("-2.5"));
    }

    #[test]
    fn test_cli_passes_garbage_through() {
        let cli = Cli::try_parse_from(["sdrboost", "abc"]).unwrap();
        assert_eq!(cli.brightness.as_deref(), Some("abc"));
    }

    #[test]
    fn test_cli_passes_dash_garbage_through() {
        let cli = Cli::try_parse_from(["sdrboost", "-x"]).unwrap();
        assert_eq!(cli.brightness.as_deref(), Some("-x"));
    }

    #[test]
    fn test_cli_ignores_extra_arguments() {
        let cli = Cli::try_parse_from(["sdrboost", "3", "extra", "-y"]).unwrap();
        assert_eq!(cli.brightness.as_deref(), Some("3"));
        assert_eq!(cli.ignored, vec!["extra".to_string(), "-y".to_string()]);
    }

    #[test]
    fn test_cli_overrides() {
        let cli =
            Cli::try_parse_from(["sdrboost", "--ordinal", "172", "--library", "x.dll", "3"])
                .unwrap();
        assert_eq!(cli.ordinal, Some(172));
        assert_eq!(cli.library.as_deref(), Some("x.dll"));
        assert_eq!(cli.brightness.as_deref(), Some("3"));
    }

    #[test]
    #[expect(
        unsafe_code,
        reason = "Only test in this binary that touches APPDATA"
    )]
    fn test_unparsable_request_writes_nothing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let original = std::env::var("APPDATA").ok();
        // SAFETY: no other test in this binary reads or writes APPDATA.
        unsafe {
            std::env::set_var("APPDATA", temp_dir.path());
        }

        let mut out = Vec::new();
        let from_argument = begin_run(Some("abc"), &mut Cursor::new(Vec::new()), &mut out);
        let from_prompt = begin_run(None, &mut Cursor::new(b"3.\xff\n".to_vec()), &mut out);

        // SAFETY: as above.
        unsafe {
            match original {
                Some(original) => std::env::set_var("APPDATA", original),
                None => std::env::remove_var("APPDATA"),
            }
        }

        assert!(matches!(from_argument, Ok(None)));
        assert!(matches!(from_prompt, Ok(None)));
        assert!(!temp_dir.path().join("SdrBoost").exists());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Cannot parse, exiting: abc\nEnter desired brightness from 1.0 to 6.0:\nCannot parse input, exiting\n"
        );
    }
}
