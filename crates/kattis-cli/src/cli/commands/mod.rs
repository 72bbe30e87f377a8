use super::args::Cli;

pub mod submit;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    submit::run(cli).await
}
