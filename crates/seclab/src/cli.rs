use clap::{Args, Parser, Subcommand};
use seclab_web_ui::DEFAULT_LISTEN;

/// Command line options for the seclab teaching site
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Opts {
    /// The specific command to execute
    #[command(subcommand)]
    pub cmd: OptsCmd,
}

#[derive(Debug, Subcommand)]
pub enum OptsCmd {
    /// Serve the demo pages
    Serve(ServeOpts),

    /// Print a freshly generated session token (not registered anywhere)
    GenToken,
}

#[derive(Debug, Args)]
pub struct ServeOpts {
    /// Listen address
    #[arg(long, short, default_value = DEFAULT_LISTEN, env = "SECLAB_LISTEN")]
    pub listen: String,

    /// Set SO_REUSEPORT
    #[arg(long, env = "SECLAB_REUSEPORT")]
    pub reuseport: bool,

    /// Cors origin settings
    #[arg(long, env = "SECLAB_CORS_ORIGIN")]
    pub cors_origin: Option<String>,

    /// Open the landing page in a browser once listening
    #[arg(long)]
    pub open: bool,
}

pub fn make_web_opts(opts: &ServeOpts) -> seclab_web_ui::Opts {
    seclab_web_ui::Opts::builder()
        .listen(opts.listen.clone())
        .maybe_cors_origin(opts.cors_origin.clone())
        .reuseport(opts.reuseport)
        .build()
}
