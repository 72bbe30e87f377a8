use clap::Parser;

mod cli;
pub mod exit_codes;

use cli::args::Cli;
use cli::commands::dispatch;
use kattis_client::KattisError;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "warn");
    }
    env_logger::init();
    let cli = Cli::parse();
    let code = match dispatch(cli).await {
        Ok(code) => code,
        Err(e) => match e.downcast_ref::<KattisError>() {
            Some(err) => {
                eprintln!("{err}");
                err.exit_code()
            }
            None => {
                eprintln!("fatal: {e:?}");
                exit_codes::INTERNAL_ERROR
            }
        },
    };
    std::process::exit(code);
}
