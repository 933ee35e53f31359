mod cli;

use std::io;

use clap::Parser;
use cli::{Opts, make_web_opts};
use duct::cmd;
use seclab_core::{SessionToken, TokenGenerateError};
use seclab_util_error::WhateverResult;
use seclab_web_ui::{Server, WebUiServerError};
use snafu::{FromString as _, ResultExt as _, Snafu, Whatever};
use tracing::level_filters::LevelFilter;
use tracing::warn;
use tracing_subscriber::EnvFilter;

pub const LOG_TARGET: &str = "seclab::cli";

#[derive(Debug, Snafu)]
pub enum CliError {
    #[snafu(display("WebUI Server error: {source}"))]
    WebUiServer { source: WebUiServerError },
    #[snafu(display("Token generation error: {source}"))]
    TokenGenerate { source: TokenGenerateError },
    #[snafu(display("Miscellaneous error: {source}"))]
    Whatever { source: Whatever },
}

pub type CliResult<T> = std::result::Result<T, CliError>;

#[snafu::report]
#[tokio::main]
async fn main() -> CliResult<()> {
    init_logging().context(WhateverSnafu)?;

    let opts = Opts::parse();
    let v = handle_cmd(opts).await?;
    if !v.is_null() {
        println!("{}", serde_json::to_string_pretty(&v).expect("Can't fail"));
    }
    Ok(())
}

async fn handle_cmd(opts: Opts) -> CliResult<serde_json::Value> {
    Ok(match opts.cmd {
        cli::OptsCmd::Serve(ref serve_opts) => {
            let server = Server::init(make_web_opts(serve_opts))
                .await
                .context(WebUiServerSnafu)?;

            if serve_opts.open {
                let url = format!("http://{}/", server.addr().context(WebUiServerSnafu)?);
                if cmd!("xdg-open", url).run().is_err() {
                    warn!(target: LOG_TARGET, "Failed to open browser");
                };
            }

            server.run().await.context(WebUiServerSnafu)?;

            serde_json::Value::Null
        }
        cli::OptsCmd::GenToken => {
            let token = SessionToken::generate().context(TokenGenerateSnafu)?;

            serde_json::json!({
                "token": token.to_string(),
            })
        }
    })
}

pub fn init_logging() -> WhateverResult<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .try_init()
        .map_err(|_| Whatever::without_source("Failed to initialize logging".to_string()))?;

    Ok(())
}
