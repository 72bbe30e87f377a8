use clap::Parser;
use std::path::PathBuf;

use kattis_client::Overrides;

#[derive(Parser, Debug)]
#[command(
    name = "kattis",
    version,
    about = "Submit a solution to Kattis and follow it until it is judged"
)]
pub struct Cli {
    /// Which problem to submit to (default: first file's name, lowercased)
    #[arg(short, long)]
    pub problem: Option<String>,

    /// Main class or main file (default: inferred from the sources)
    #[arg(short, long)]
    pub mainclass: Option<String>,

    /// Language to submit as (default: inferred from the file extension)
    #[arg(short, long)]
    pub language: Option<String>,

    #[arg(short, long, hide = true)]
    pub tag: Option<String>,

    /// Submit without asking for confirmation
    #[arg(short, long)]
    pub force: bool,

    /// Source files to submit
    #[arg(required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            problem: self.problem.clone(),
            language: self.language.clone(),
            mainclass: self.mainclass.clone(),
            tag: self.tag.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_files_only() {
        let cli = Cli::try_parse_from(["kattis", "hello.py"]).unwrap();
        assert_eq!(cli.files, vec![PathBuf::from("hello.py")]);
        assert!(!cli.force);
        assert_eq!(cli.overrides(), Overrides::default());
    }

    #[test]
    fn test_parse_all_options() {
        let cli = Cli::try_parse_from([
            "kattis", "-p", "Hello", "-m", "Solver", "-l", "Java", "-t", "exam", "-f", "A.java",
            "B.java",
        ])
        .unwrap();

        assert!(cli.force);
        assert_eq!(cli.files.len(), 2);
        let overrides = cli.overrides();
        assert_eq!(overrides.problem.as_deref(), Some("Hello"));
        assert_eq!(overrides.mainclass.as_deref(), Some("Solver"));
        assert_eq!(overrides.language.as_deref(), Some("Java"));
        assert_eq!(overrides.tag.as_deref(), Some("exam"));
    }

    #[test]
    fn test_files_are_required() {
        assert!(Cli::try_parse_from(["kattis", "-f"]).is_err());
    }

    #[test]
    fn test_tag_hidden_from_help() {
        let help = Cli::command().render_help().to_string();
        assert!(help.contains("--problem"));
        assert!(!help.contains("--tag"));
    }
}
