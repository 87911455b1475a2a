// src/main.rs

use jsonsmith::{cli, logging, run};

#[tokio::main]
async fn main() {
    let code = match run_main().await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("jsonsmith error: {err:?}");
            1
        }
    };
    // Exit from inside the runtime: a stdin reader parked on a blocking
    // thread must not hold up shutdown.
    std::process::exit(code);
}

async fn run_main() -> anyhow::Result<i32> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    let outcome = run(args).await?;
    Ok(outcome.exit_code())
}
