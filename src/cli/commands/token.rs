use crate::token::{DEFAULT_ACCESS_TTL_SECONDS, DEFAULT_REFRESH_TTL_SECONDS, MAX_TTL_SECONDS};
use clap::{builder::BoolishValueParser, Arg, ArgAction, Command};
use secrecy::SecretString;

pub const ARG_ACCESS_TOKEN_SECRET: &str = "access-token-secret";
pub const ARG_REFRESH_TOKEN_SECRET: &str = "refresh-token-secret";
pub const ARG_ACCESS_TOKEN_TTL_SECONDS: &str = "access-token-ttl-seconds";
pub const ARG_REFRESH_TOKEN_TTL_SECONDS: &str = "refresh-token-ttl-seconds";
pub const ARG_PRODUCTION: &str = "production";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_ACCESS_TOKEN_SECRET)
                .long(ARG_ACCESS_TOKEN_SECRET)
                .help("Secret used to sign access tokens")
                .env("TOLLGATE_ACCESS_TOKEN_SECRET")
                .hide_env_values(true),
        )
        .arg(
            Arg::new(ARG_REFRESH_TOKEN_SECRET)
                .long(ARG_REFRESH_TOKEN_SECRET)
                .help("Secret used to sign refresh tokens, must differ from the access secret")
                .env("TOLLGATE_REFRESH_TOKEN_SECRET")
                .hide_env_values(true),
        )
        .arg(
            Arg::new(ARG_ACCESS_TOKEN_TTL_SECONDS)
                .long(ARG_ACCESS_TOKEN_TTL_SECONDS)
                .help("Access token lifetime in seconds")
                .env("TOLLGATE_ACCESS_TOKEN_TTL_SECONDS")
                .default_value("900")
                .value_parser(clap::value_parser!(i64).range(1..=MAX_TTL_SECONDS)),
        )
        .arg(
            Arg::new(ARG_REFRESH_TOKEN_TTL_SECONDS)
                .long(ARG_REFRESH_TOKEN_TTL_SECONDS)
                .help("Refresh token and refresh cookie lifetime in seconds")
                .env("TOLLGATE_REFRESH_TOKEN_TTL_SECONDS")
                .default_value("604800")
                .value_parser(clap::value_parser!(i64).range(1..=MAX_TTL_SECONDS)),
        )
        .arg(
            Arg::new(ARG_PRODUCTION)
                .long(ARG_PRODUCTION)
                .help("Mark the refresh cookie Secure and SameSite=None")
                .env("TOLLGATE_PRODUCTION")
                .action(ArgAction::SetTrue)
                .value_parser(BoolishValueParser::new()),
        )
}

pub struct Options {
    pub access_secret: Option<SecretString>,
    pub refresh_secret: Option<SecretString>,
    pub access_ttl_seconds: i64,
    pub refresh_ttl_seconds: i64,
    pub production: bool,
}

impl Options {
    /// Secrets stay optional here; their presence is checked when the
    /// signing context is built.
    #[must_use]
    pub fn parse(matches: &clap::ArgMatches) -> Self {
        let secret = |id: &str| {
            matches
                .get_one::<String>(id)
                .map(|value| SecretString::from(value.clone()))
        };

        Self {
            access_secret: secret(ARG_ACCESS_TOKEN_SECRET),
            refresh_secret: secret(ARG_REFRESH_TOKEN_SECRET),
            access_ttl_seconds: matches
                .get_one::<i64>(ARG_ACCESS_TOKEN_TTL_SECONDS)
                .copied()
                .unwrap_or(DEFAULT_ACCESS_TTL_SECONDS),
            refresh_ttl_seconds: matches
                .get_one::<i64>(ARG_REFRESH_TOKEN_TTL_SECONDS)
                .copied()
                .unwrap_or(DEFAULT_REFRESH_TTL_SECONDS),
            production: matches.get_flag(ARG_PRODUCTION),
        }
    }
}
