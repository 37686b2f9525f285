//! Terminal frontend for the todo example.
//!
//! Reads commands from stdin, dispatches them to the store, and re-renders the
//! list after every state change. Logs go to stderr.

use anyhow::Context;
use metrics_handle::MetricsHandle;
use tokio::io::{AsyncBufReadExt, BufReader};
use todo::config::DEFAULT_LOG_FILTER;
use todo::{view, AppError, Command, Config, Outcome, TodoApplication};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env();
    let metrics = MetricsHandle::install(config.metrics_enabled)?;

    let app = TodoApplication::new(&config).context("Failed to build the todo store")?;

    let weak_store = app.store().downgrade();
    let _render = app.store().subscribe(move || {
        if let Some(store) = weak_store.upgrade() {
            println!("\n{}", view::render(&store.get_state()));
        }
    });

    println!("{}", view::render(&app.store().get_state()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };

        match app.execute(command) {
            Ok(Outcome::Dispatched) => {}
            Ok(Outcome::Print(text)) => println!("{text}"),
            Ok(Outcome::Metrics) => println!("{}", metrics.render()),
            Ok(Outcome::Quit) => break,
            Err(AppError::Ids(e)) => eprintln!("{e}"),
            Err(e) => return Err(e.into()),
        }
    }

    tracing::info!(
        todos = app.store().state(|s| s.todos.len()),
        "Todo application exiting"
    );
    Ok(())
}

mod metrics_handle {
    use reflow_runtime::metrics::{install_recorder, MetricsError, PrometheusHandle};

    /// Prometheus handle, present only when metrics are enabled
    pub struct MetricsHandle(Option<PrometheusHandle>);

    impl MetricsHandle {
        pub fn install(enabled: bool) -> Result<Self, MetricsError> {
            if enabled {
                install_recorder().map(|handle| Self(Some(handle)))
            } else {
                Ok(Self(None))
            }
        }

        pub fn render(&self) -> String {
            self.0.as_ref().map_or_else(
                || "Metrics are disabled (set TODO_METRICS=true)".to_string(),
                PrometheusHandle::render,
            )
        }
    }
}
