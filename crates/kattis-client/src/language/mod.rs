//! Language and entry point inference.
//!
//! Everything here is pure: it looks at file names and the in-memory
//! snapshots in a [`SourceFile`] slice and never touches the network.

mod dialect;
mod entry;
mod rules;

pub use dialect::is_legacy_python;
pub use entry::{guess_entry_point, resolve_mainclass};
pub use rules::detect_language;

use crate::source::SourceFile;

/// What the judge needs to know to start a multi-file program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// The judge runs a named file.
    File,
    /// The judge runs a named class.
    Class,
    Neither,
}

/// How to find the entry point from file contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryScan {
    None,
    /// A `main(` declaration.
    MainFunction,
    /// A leading `program` keyword.
    ProgramKeyword,
}

/// How the class name is derived from the entry file stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClassNaming {
    Stem,
    /// Capitalize the stem and append the suffix.
    CapitalizedWithSuffix(&'static str),
}

/// Judge-side capabilities of a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageProfile {
    pub name: &'static str,
    pub entry: EntryKind,
    scan: EntryScan,
    naming: ClassNaming,
}

impl LanguageProfile {
    const fn new(name: &'static str, entry: EntryKind) -> Self {
        Self {
            name,
            entry,
            scan: EntryScan::None,
            naming: ClassNaming::Stem,
        }
    }

    const fn scan(mut self, scan: EntryScan) -> Self {
        self.scan = scan;
        self
    }

    const fn naming(mut self, naming: ClassNaming) -> Self {
        self.naming = naming;
        self
    }
}

/// Languages that need an entry file or class. Anything not listed needs
/// neither.
const PROFILES: &[LanguageProfile] = &[
    LanguageProfile::new("APL", EntryKind::File),
    LanguageProfile::new("Bash", EntryKind::File),
    LanguageProfile::new("Dart", EntryKind::File),
    LanguageProfile::new("Gerbil", EntryKind::File),
    LanguageProfile::new("JavaScript (Node.js)", EntryKind::File),
    LanguageProfile::new("Julia", EntryKind::File),
    LanguageProfile::new("Common Lisp", EntryKind::File),
    LanguageProfile::new("Pascal", EntryKind::File).scan(EntryScan::ProgramKeyword),
    LanguageProfile::new("PHP", EntryKind::File),
    LanguageProfile::new("Python 2", EntryKind::File),
    LanguageProfile::new("Python 3", EntryKind::File),
    LanguageProfile::new("Ruby", EntryKind::File),
    LanguageProfile::new("Rust", EntryKind::File).scan(EntryScan::MainFunction),
    LanguageProfile::new("TypeScript", EntryKind::File),
    LanguageProfile::new("Zig", EntryKind::File),
    LanguageProfile::new("Java", EntryKind::Class).scan(EntryScan::MainFunction),
    LanguageProfile::new("Scala", EntryKind::Class).scan(EntryScan::MainFunction),
    LanguageProfile::new("Kotlin", EntryKind::Class)
        .scan(EntryScan::MainFunction)
        .naming(ClassNaming::CapitalizedWithSuffix("Kt")),
];

/// Capabilities of `language`. Unknown names (e.g. user overrides) need
/// neither an entry file nor a class.
pub fn profile(language: &str) -> LanguageProfile {
    PROFILES
        .iter()
        .find(|p| p.name == language)
        .copied()
        .unwrap_or(LanguageProfile {
            name: "",
            entry: EntryKind::Neither,
            scan: EntryScan::None,
            naming: ClassNaming::Stem,
        })
}

/// Language inferred from the first file's extension.
pub fn infer_language(files: &[SourceFile]) -> Option<&'static str> {
    let first = files.first()?;
    detect_language(&first.extension(), files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_are_disjoint() {
        for (i, a) in PROFILES.iter().enumerate() {
            for b in &PROFILES[i + 1..] {
                assert_ne!(a.name, b.name, "duplicate profile");
            }
        }
    }

    #[test]
    fn test_unknown_language_needs_neither() {
        assert_eq!(profile("C++").entry, EntryKind::Neither);
        assert_eq!(profile("Brainfuck").entry, EntryKind::Neither);
    }

    #[test]
    fn test_capability_classes() {
        assert_eq!(profile("Python 3").entry, EntryKind::File);
        assert_eq!(profile("Rust").entry, EntryKind::File);
        assert_eq!(profile("Kotlin").entry, EntryKind::Class);
        assert_eq!(profile("Java").entry, EntryKind::Class);
    }
}
