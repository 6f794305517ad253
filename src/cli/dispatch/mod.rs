//! Map parsed arguments to the action the binary runs.

use crate::cli::{
    actions::{server::Args, Action},
    commands::{self, token},
};

/// Build the server action from validated matches.
#[must_use]
pub fn handler(matches: &clap::ArgMatches) -> Action {
    let port = matches
        .get_one::<u16>(commands::ARG_PORT)
        .copied()
        .unwrap_or(8080);
    let dsn = matches.get_one::<String>(commands::ARG_DSN).cloned();
    let token_opts = token::Options::parse(matches);

    Action::Server(Args {
        port,
        dsn,
        access_secret: token_opts.access_secret,
        refresh_secret: token_opts.refresh_secret,
        access_ttl_seconds: token_opts.access_ttl_seconds,
        refresh_ttl_seconds: token_opts.refresh_ttl_seconds,
        production: token_opts.production,
    })
}
