//! Entry point and mainclass guessing.

use lazy_static::lazy_static;
use regex::Regex;

use super::{profile, ClassNaming, EntryKind, EntryScan};
use crate::source::SourceFile;

lazy_static! {
    static ref MAIN_FUNCTION: Regex = Regex::new(r"\bmain\s*\(").unwrap();
    static ref PROGRAM_KEYWORD: Regex = Regex::new(r"^\s*[Pp]rogram\b").unwrap();
}

const MAIN_STEMS: &[&str] = &["main", "Main"];

/// The file the judge should start from.
///
/// A file named `main`/`Main` wins outright; then a content match for
/// languages that declare their entry point; then the first file given.
/// Returns `None` only for an empty slice.
pub fn guess_entry_point<'a>(language: &str, files: &'a [SourceFile]) -> Option<&'a SourceFile> {
    if let Some(named) = files
        .iter()
        .find(|f| MAIN_STEMS.contains(&f.stem().as_str()))
    {
        return Some(named);
    }

    let pattern: Option<&Regex> = match profile(language).scan {
        EntryScan::MainFunction => Some(&*MAIN_FUNCTION),
        EntryScan::ProgramKeyword => Some(&*PROGRAM_KEYWORD),
        EntryScan::None => None,
    };

    if let Some(pattern) = pattern {
        if let Some(found) = files.iter().find(|f| pattern.is_match(&f.text())) {
            return Some(found);
        }
    }

    files.first()
}

/// The `mainclass` value for the judge, if the language needs one.
pub fn resolve_mainclass(language: &str, files: &[SourceFile]) -> Option<String> {
    let profile = profile(language);
    match profile.entry {
        EntryKind::File => {
            if files.len() > 1 {
                guess_entry_point(language, files).map(SourceFile::basename)
            } else {
                None
            }
        }
        EntryKind::Class => {
            let stem = guess_entry_point(language, files)?.stem();
            Some(match profile.naming {
                ClassNaming::Stem => stem,
                ClassNaming::CapitalizedWithSuffix(suffix) => {
                    format!("{}{}", capitalize(&stem), suffix)
                }
            })
        }
        EntryKind::Neither => None,
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
