use {
    anyhow::Result,
    clap::Parser,
    server::start_server,
    std::io::IsTerminal,
    tracing_subscriber::{
        filter::{
            self,
            LevelFilter,
        },
        layer::SubscriberExt,
        util::SubscriberInitExt,
        Layer,
    },
};

mod api;
mod bid;
mod config;
mod contract;
mod kernel;
mod metrics;
mod models;
mod rfq;
mod server;
mod state;

#[tokio::main]
async fn main() -> Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_file(false)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);
    let env_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    // Use the compact formatter if we're in a terminal, otherwise use the JSON formatter.
    let fmt_layer = if std::io::stderr().is_terminal() {
        fmt_layer.compact().boxed()
    } else {
        fmt_layer.json().boxed()
    };

    tracing_subscriber::registry()
        .with(metrics::MetricsLayer.with_filter(filter::filter_fn(|metadata| {
            metrics::is_metrics(metadata, false)
        })))
        .with(fmt_layer.with_filter(env_filter))
        .try_init()?;

    // Parse the command line arguments with StructOpt, will exit automatically on `--help` or
    // with invalid arguments.
    match config::Options::parse() {
        config::Options::Run(opts) => start_server(opts).await,
    }
}
