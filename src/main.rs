use frida_schedule::commands;
use tracing_subscriber::EnvFilter;

fn main() {
    // logs go to stderr so that results on stdout stay machine readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if std::env::args().len() > 1 {
        if let Err(e) = commands::run_once() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    } else {
        commands::run_cli();
    }
}
