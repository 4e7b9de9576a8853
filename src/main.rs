// src/main.rs

use changegate::{RunStatus, cli, logging, run};

#[tokio::main]
async fn main() {
    match run_main().await {
        Ok(RunStatus::Success) => {}
        Ok(RunStatus::Failed) => std::process::exit(1),
        Err(err) => {
            eprintln!("changegate error: {err:?}");
            std::process::exit(1);
        }
    }
}

async fn run_main() -> anyhow::Result<RunStatus> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    run(args).await
}
