use cart_cli::{build_cli, run};
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_env("CART_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let matches = build_cli().get_matches();
    let mut stdout = std::io::stdout().lock();

    match run(&matches, &mut stdout) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(2);
        }
    }
}
