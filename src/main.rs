use clap::Parser;
use log::error;
use quiz_admin::Config;

#[tokio::main]
async fn main() {
    let config = Config::parse();

    if let Err(e) = quiz_admin::launch(config).await {
        error!("Fatal: {e}");
        eprintln!("Error running quiz-admin: {}", e);
        std::process::exit(1);
    }
}
