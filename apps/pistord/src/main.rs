use clap::{Parser, ValueEnum};
use ps_app::{
    AppResult, DEFAULT_LOG_PATH, LogTarget, ServiceConfig, VERSION, logging, shutdown,
    spawn_fan_control, start_fan_control,
};
use ps_config::DEFAULT_CONFIG_PATH;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "pistord")]
#[command(about = "piStord - Fan Service for the piStor data server", long_about = None)]
struct Cli {
    /// SHUTDOWN, SERVICE, VERSION or DEBUG (case-insensitive); only the first
    /// token is read
    #[arg(num_args = 0.., allow_hyphen_values = true, trailing_var_arg = true)]
    args: Vec<String>,
    /// Configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Log file (ignored by DEBUG, which logs to the console)
    #[arg(long, default_value = DEFAULT_LOG_PATH)]
    log_file: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum Action {
    Shutdown,
    Service,
    Version,
    Debug,
}

impl Action {
    /// Action named by the first token; anything else is `None`.
    fn from_args(args: &[String]) -> Option<Self> {
        let token = args.first()?;
        Self::from_str(token, true).ok()
    }
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let Some(action) = Action::from_args(&cli.args) else {
        usage();
        return Ok(());
    };

    let config = ServiceConfig {
        config_path: cli.config,
        ..ServiceConfig::default()
    };

    match action {
        Action::Version => {
            println!("Version: {VERSION}");
            Ok(())
        }
        Action::Shutdown => {
            logging::init(LogTarget::File(cli.log_file))?;
            // A failure is logged by `turn_off_fan`; the command still exits 0.
            let _ = shutdown(&config.hardware);
            Ok(())
        }
        Action::Service => {
            logging::init(LogTarget::File(cli.log_file))?;
            let handle = spawn_fan_control(config).inspect_err(|err| {
                error!(error = %err, "Could not start service threads");
            })?;
            // The worker dies with the process, so keep the main thread parked on it.
            let report = handle.join()?;
            info!(state = ?report.state, "piStor Fan Service exited");
            Ok(())
        }
        Action::Debug => {
            logging::init(LogTarget::Console)?;
            start_fan_control(&config).map(|_| ())
        }
    }
}

fn usage() {
    println!("piStord - Fan Service for the piStor data server.\n");
    println!("usage: pistord <options>");
    println!("    SHUTDOWN    - Shutdown the piStor fan... issued when the user shutdown the service.");
    println!("    SERVICE     - Launch the pistord Daemon so we can control the fan.");
    println!("    VERSION     - Report the version of the piStor Daemon.");
    println!("    DEBUG       - Launches the fan control without spawning a thread.");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn actions_are_case_insensitive() {
        for token in ["SHUTDOWN", "shutdown", "Shutdown"] {
            assert!(matches!(Action::from_args(&args(&[token])), Some(Action::Shutdown)));
        }
        assert!(matches!(Action::from_args(&args(&["service"])), Some(Action::Service)));
        assert!(matches!(Action::from_args(&args(&["VeRsIoN"])), Some(Action::Version)));
        assert!(matches!(Action::from_args(&args(&["DEBUG"])), Some(Action::Debug)));
    }

    #[test]
    fn only_first_token_counts() {
        assert!(matches!(
            Action::from_args(&args(&["VERSION", "extra"])),
            Some(Action::Version)
        ));
        assert!(Action::from_args(&args(&["extra", "VERSION"])).is_none());
        assert!(Action::from_args(&[]).is_none());
        assert!(Action::from_args(&args(&["-x"])).is_none());
    }

    #[test]
    fn hyphen_tokens_reach_the_positional() {
        let cli = Cli::try_parse_from(["pistord", "-x"]).unwrap();
        assert_eq!(cli.args, args(&["-x"]));

        let cli = Cli::try_parse_from(["pistord", "--config", "/tmp/p.yaml", "VERSION", "extra"])
            .unwrap();
        assert_eq!(cli.config, PathBuf::from("/tmp/p.yaml"));
        assert_eq!(cli.args, args(&["VERSION", "extra"]));
    }
}
