use clap::Parser;

use dotjson_repl::cli::Args;
use dotjson_repl::host::TerminalHost;
use dotjson_repl::{logging, ReplCore, ShellConfig, ShellContext};

fn main() {
    let args = Args::parse();
    logging::init_stderr_logging(args.debug);

    let config = ShellConfig::from_args(&args);
    let ctx = ShellContext::new(config.sort_mode);

    let mut host = match TerminalHost::new(&config) {
        Ok(host) => host,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let mut core = ReplCore::new(ctx, &config);
    match core.run(&mut host) {
        Ok(reason) => {
            tracing::debug!(?reason, "shell exited");
            if reason.exit_code() != 0 {
                std::process::exit(reason.exit_code());
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
