//! Extension rules, evaluated in order; the first match wins.

use super::dialect::is_legacy_python;
use crate::source::SourceFile;

enum Rule {
    /// Case-sensitive match, checked before normalization.
    Exact {
        ext: &'static str,
        language: &'static str,
    },
    /// `with` if any file path ends in `companion`, otherwise `without`.
    Companion {
        ext: &'static str,
        companion: &'static str,
        with: &'static str,
        without: &'static str,
    },
    /// Shared extension, settled by looking at file contents.
    Dialect {
        ext: &'static str,
        legacy: &'static str,
        modern: &'static str,
    },
    Table,
}

const RULES: &[Rule] = &[
    Rule::Exact {
        ext: ".C",
        language: "C++",
    },
    Rule::Companion {
        ext: ".h",
        companion: ".c",
        with: "C",
        without: "C++",
    },
    Rule::Dialect {
        ext: ".py",
        legacy: "Python 2",
        modern: "Python 3",
    },
    Rule::Table,
];

/// Lowercased extension to language name.
const EXTENSIONS: &[(&str, &str)] = &[
    (".c", "C"),
    (".c++", "C++"),
    (".cc", "C++"),
    (".c#", "C#"),
    (".cpp", "C++"),
    (".cs", "C#"),
    (".cxx", "C++"),
    (".cbl", "COBOL"),
    (".cob", "COBOL"),
    (".cpy", "COBOL"),
    (".fs", "F#"),
    (".go", "Go"),
    (".hs", "Haskell"),
    (".java", "Java"),
    (".js", "JavaScript (Node.js)"),
    (".ts", "TypeScript"),
    (".kt", "Kotlin"),
    (".lisp", "Common Lisp"),
    (".cl", "Common Lisp"),
    (".m", "Objective-C"),
    (".ml", "OCaml"),
    (".pas", "Pascal"),
    (".php", "PHP"),
    (".pl", "Prolog"),
    (".pyc", "Python 3"),
    (".rb", "Ruby"),
    (".rs", "Rust"),
    (".scala", "Scala"),
    (".f90", "Fortran"),
    (".f", "Fortran"),
    (".for", "Fortran"),
    (".sh", "Bash"),
    (".apl", "APL"),
    (".ss", "Gerbil"),
    (".jl", "Julia"),
    (".vb", "Visual Basic"),
    (".dart", "Dart"),
    (".zig", "Zig"),
    (".swift", "Swift"),
    (".nim", "Nim"),
];

impl Rule {
    fn apply(&self, ext: &str, lowered: &str, files: &[SourceFile]) -> Option<&'static str> {
        match *self {
            Rule::Exact { ext: want, language } => (ext == want).then_some(language),
            Rule::Companion {
                ext: want,
                companion,
                with,
                without,
            } => {
                if lowered != want {
                    return None;
                }
                if files.iter().any(|f| f.display_path().ends_with(companion)) {
                    Some(with)
                } else {
                    Some(without)
                }
            }
            Rule::Dialect {
                ext: want,
                legacy,
                modern,
            } => {
                if lowered != want {
                    return None;
                }
                if is_legacy_python(files) {
                    Some(legacy)
                } else {
                    Some(modern)
                }
            }
            Rule::Table => EXTENSIONS
                .iter()
                .find(|(e, _)| *e == lowered)
                .map(|(_, language)| *language),
        }
    }
}

/// Language for `extension` (including the leading dot), looking at the
/// whole file set where a rule needs it.
pub fn detect_language(extension: &str, files: &[SourceFile]) -> Option<&'static str> {
    let lowered = extension.to_lowercase();
    RULES
        .iter()
        .find_map(|rule| rule.apply(extension, &lowered, files))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(names: &[&str]) -> Vec<SourceFile> {
        names
            .iter()
            .map(|n| SourceFile::from_bytes(*n, ""))
            .collect()
    }

    #[test]
    fn test_table_lookup_is_case_insensitive() {
        assert_eq!(detect_language(".cpp", &files(&["a.cpp"])), Some("C++"));
        assert_eq!(detect_language(".JAVA", &files(&["A.JAVA"])), Some("Java"));
        assert_eq!(detect_language(".kt", &files(&["a.kt"])), Some("Kotlin"));
        assert_eq!(
            detect_language(".js", &files(&["a.js"])),
            Some("JavaScript (Node.js)")
        );
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(detect_language(".xyz", &files(&["a.xyz"])), None);
        assert_eq!(detect_language("", &files(&["Makefile"])), None);
    }

    #[test]
    fn test_header_with_c_sibling_is_c() {
        assert_eq!(detect_language(".h", &files(&["a.h", "a.c"])), Some("C"));
    }

    #[test]
    fn test_header_without_c_sibling_is_cpp() {
        assert_eq!(detect_language(".h", &files(&["a.h"])), Some("C++"));
        assert_eq!(
            detect_language(".h", &files(&["a.h", "a.cpp"])),
            Some("C++")
        );
    }

    #[test]
    fn test_uppercase_header_uses_companion_rule() {
        assert_eq!(detect_language(".H", &files(&["a.H", "b.c"])), Some("C"));
    }

    #[test]
    fn test_uppercase_c_is_always_cpp() {
        assert_eq!(detect_language(".C", &files(&["a.C"])), Some("C++"));
        assert_eq!(detect_language(".C", &files(&["a.C", "b.c"])), Some("C++"));
        assert_eq!(detect_language(".c", &files(&["a.c"])), Some("C"));
    }

    #[test]
    fn test_python_dialects() {
        let modern = vec![SourceFile::from_bytes("a.py", "print('hi')\n")];
        assert_eq!(detect_language(".py", &modern), Some("Python 3"));

        let legacy = vec![SourceFile::from_bytes("a.py", "print 'hi'\n")];
        assert_eq!(detect_language(".py", &legacy), Some("Python 2"));
    }

    #[test]
    fn test_pyc_is_python3_without_heuristic() {
        let legacy = vec![SourceFile::from_bytes("a.pyc", "print 'hi'\n")];
        assert_eq!(detect_language(".pyc", &legacy), Some("Python 3"));
    }
}
