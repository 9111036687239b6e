use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use log::info;
use services::{
    API_URL_ENV, AppServices, Clock, ConfigError, LeaderboardService, QuizApiConfig,
    QuizSessionService, UploadService,
};
use ui::{App, UiApp, build_app_context};

const FROM_UPLOAD_ENV: &str = "QUIZERA_FROM_UPLOAD";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidApiUrl(ConfigError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidApiUrl(err) => write!(f, "invalid API URL: {err}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
    from_upload: bool,
}

impl UiApp for DesktopApp {
    fn from_upload(&self) -> bool {
        self.from_upload
    }

    fn quiz_sessions(&self) -> Arc<QuizSessionService> {
        self.services.quiz_sessions()
    }

    fn leaderboard(&self) -> Arc<LeaderboardService> {
        self.services.leaderboard()
    }

    fn uploads(&self) -> Arc<UploadService> {
        self.services.uploads()
    }
}

#[derive(Debug)]
struct Args {
    api: QuizApiConfig,
    from_upload: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api-url <url>] [--from-upload]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api-url {}", services::DEFAULT_API_URL);
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  {API_URL_ENV}, {FROM_UPLOAD_ENV}=1, RUST_LOG");
}

fn flag_enabled(value: &str) -> bool {
    matches!(value.trim(), "1" | "true" | "yes")
}

enum Parsed {
    Run(Args),
    Help,
}

impl Args {
    /// Flags win over the environment, which is only consulted for what the
    /// command line leaves unset.
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Parsed, ArgsError> {
        let mut api_url = None;
        let mut from_upload = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-url" => api_url = Some(require_value(args, "--api-url")?),
                "--from-upload" => from_upload = true,
                "--help" | "-h" => return Ok(Parsed::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let api = match api_url {
            Some(raw) => QuizApiConfig::parse(&raw),
            None => QuizApiConfig::from_lookup(&env),
        }
        .map_err(ArgsError::InvalidApiUrl)?;
        let from_upload =
            from_upload || env(FROM_UPLOAD_ENV).is_some_and(|value| flag_enabled(&value));

        Ok(Parsed::Run(Self { api, from_upload }))
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = match Args::parse(&mut argv, |key| std::env::var(key).ok()) {
        Ok(Parsed::Run(args)) => args,
        Ok(Parsed::Help) => {
            print_usage();
            return Ok(());
        }
        Err(err) => {
            eprintln!("{err}");
            print_usage();
            return Err(err.into());
        }
    };

    info!(
        "starting quizera against {} (from upload: {})",
        parsed.api.base_url(),
        parsed.from_upload
    );
    let services = AppServices::new_http(parsed.api, Clock::system())?;
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        services,
        from_upload: parsed.from_upload,
    });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Quizera")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    pretty_env_logger::init();

    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_with_env(args: &[&str], env: &[(&str, &str)]) -> Result<Parsed, ArgsError> {
        let mut iter = args.iter().map(|s| (*s).to_string());
        Args::parse(&mut iter, |key| {
            env.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value).to_string())
        })
    }

    fn parse(args: &[&str]) -> Result<Parsed, ArgsError> {
        parse_with_env(args, &[])
    }

    #[test]
    fn api_url_and_upload_flags_are_read() {
        let Ok(Parsed::Run(args)) = parse(&["--api-url", "https://quiz.example.com", "--from-upload"])
        else {
            panic!("expected run");
        };
        assert_eq!(args.api.base_url().as_str(), "https://quiz.example.com/");
        assert!(args.from_upload);
    }

    #[test]
    fn bad_arguments_are_rejected() {
        assert!(matches!(
            parse(&["--api-url"]),
            Err(ArgsError::MissingValue { flag: "--api-url" })
        ));
        assert!(matches!(
            parse(&["--api-url", "ftp://x"]),
            Err(ArgsError::InvalidApiUrl(_))
        ));
        assert!(matches!(parse(&["--deck"]), Err(ArgsError::UnknownArg(_))));
        assert!(matches!(parse(&["-h"]), Ok(Parsed::Help)));
    }

    #[test]
    fn api_url_flag_overrides_invalid_environment() {
        let env = [(API_URL_ENV, "not a url")];
        let Ok(Parsed::Run(args)) = parse_with_env(&["--api-url", "http://10.0.0.2:5000"], &env)
        else {
            panic!("flag should win over the broken variable");
        };
        assert_eq!(args.api.base_url().as_str(), "http://10.0.0.2:5000/");

        assert!(matches!(parse_with_env(&[], &env), Err(ArgsError::InvalidApiUrl(_))));
        assert!(matches!(parse_with_env(&["--help"], &env), Ok(Parsed::Help)));
    }

    #[test]
    fn environment_fills_unset_flags() {
        let env = [(API_URL_ENV, "https://env.example"), (FROM_UPLOAD_ENV, "yes")];
        let Ok(Parsed::Run(args)) = parse_with_env(&[], &env) else {
            panic!("expected run");
        };
        assert_eq!(args.api.base_url().as_str(), "https://env.example/");
        assert!(args.from_upload);

        let Ok(Parsed::Run(args)) = parse(&[]) else {
            panic!("expected run");
        };
        assert_eq!(args.api.base_url().as_str(), "http://127.0.0.1:5000/");
        assert!(!args.from_upload);
    }

    #[test]
    fn upload_env_values() {
        assert!(flag_enabled("1"));
        assert!(flag_enabled(" true "));
        assert!(!flag_enabled("0"));
    }
}
