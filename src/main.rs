use release_asset_pusher::cli::{Args, Runner};
use std::process;

#[tokio::main]
async fn main() {
    let args = Args::parse_args().from_env();

    if let Err(msg) = args.validate() {
        eprintln!("Error: {}", msg);
        process::exit(2);
    }

    let runner = Runner::new(args);

    match runner.run().await {
        Ok(outcome) if outcome.is_success() => {}
        Ok(outcome) => {
            eprintln!("Error: {} artifacts failed to upload", outcome.failed);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
