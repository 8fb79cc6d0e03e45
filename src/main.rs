use pubsub_destination::cli::output::print_error;
use pubsub_destination::cli::{commands, Cli};
use pubsub_destination::config::{LogFormat, LoggingConfig};
use tracing_subscriber::EnvFilter;

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_new(&logging.level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    match logging.format {
        LogFormat::Text => builder.compact().init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Initialize tracing; stdout carries the outcomes
    init_tracing(&cli.logging());

    // Execute the command
    if let Err(e) = commands::execute_command(cli.command).await {
        print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
