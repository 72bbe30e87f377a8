use dialoguer::{theme::ColorfulTheme, Confirm as Prompt};

use kattis_client::{
    AlwaysConfirm, Confirm, KattisClient, KattisConfig, Pipeline, SourceSet, Submission,
};

use crate::cli::args::Cli;
use crate::exit_codes::{REJECTED, SUCCESS};

/// Prints the submission summary and asks on the terminal.
struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, submission: &Submission) -> bool {
        for line in submission.summary() {
            println!("{line}");
        }
        Prompt::with_theme(&ColorfulTheme::default())
            .with_prompt("Submit?")
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

pub async fn run(args: Cli) -> anyhow::Result<i32> {
    let config = KattisConfig::load()?;
    let sources = SourceSet::read(&args.files)?;
    let submission = Submission::prepare(&sources, &args.overrides())?;

    let client = KattisClient::new(config);
    let confirm: &dyn Confirm = if args.force {
        &AlwaysConfirm
    } else {
        &TerminalConfirm
    };

    let accepted = Pipeline::new(&client, confirm)
        .run(&submission, &mut std::io::stdout())
        .await?;

    Ok(exit_code(accepted))
}

fn exit_code(accepted: bool) -> i32 {
    if accepted {
        SUCCESS
    } else {
        REJECTED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use kattis_client::KattisError;
    use serial_test::serial;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_verdict_exit_codes() {
        assert_eq!(exit_code(true), 0);
        assert_eq!(exit_code(false), 1);
    }

    #[tokio::test]
    #[serial]
    async fn test_inference_failure_stops_before_network() {
        let dir = tempdir().unwrap();
        let rc = dir.path().join("kattisrc");
        fs::write(
            &rc,
            "[user]\nusername: alice\ntoken: t\n\n[kattis]\nhostname: localhost.invalid\n",
        )
        .unwrap();
        let source = dir.path().join("notes.xyz");
        fs::write(&source, "nothing to see").unwrap();

        std::env::set_var("KATTIS_CONFIG", &rc);
        let cli = Cli::try_parse_from(["kattis", "-f", source.to_str().unwrap()]).unwrap();
        let err = run(cli).await.unwrap_err();
        std::env::remove_var("KATTIS_CONFIG");

        let err = err.downcast::<KattisError>().unwrap();
        assert!(matches!(err, KattisError::Inference { .. }));
        assert_eq!(err.exit_code(), 1);
    }
}
