//! Python 2 vs Python 3 heuristic.

use lazy_static::lazy_static;
use regex::Regex;

use crate::source::SourceFile;

lazy_static! {
    /// A bare `print x` statement, or any use of `raw_input`.
    static ref LEGACY: Regex = Regex::new(r"^\s*\bprint\b *[^ \(\),\]]|\braw_input\b").unwrap();
}

enum Verdict {
    Legacy,
    Modern,
    Undecided,
}

fn classify(file: &SourceFile) -> Verdict {
    let text = file.text();
    // Lines keep their terminator: a bare `print` followed by a newline is
    // still a statement.
    for (index, line) in text.split_inclusive('\n').enumerate() {
        if index == 0 && line.starts_with("#!") {
            if line.contains("python2") {
                return Verdict::Legacy;
            }
            if line.contains("python3") {
                return Verdict::Modern;
            }
        }

        let code = line.split('#').next().unwrap_or("");
        if LEGACY.is_match(code) {
            return Verdict::Legacy;
        }
    }
    Verdict::Undecided
}

/// Whether `files` look like Python 2. Files are examined in order and the
/// first decisive one wins; with no evidence either way the answer is no.
pub fn is_legacy_python(files: &[SourceFile]) -> bool {
    for file in files {
        match classify(file) {
            Verdict::Legacy => return true,
            Verdict::Modern => return false,
            Verdict::Undecided => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn py(name: &str, body: &str) -> SourceFile {
        SourceFile::from_bytes(name, body)
    }

    #[test]
    fn test_shebang_python2_wins_over_body() {
        let file = py("a.py", "#!/usr/bin/env python2\nprint('modern looking')\n");
        assert!(is_legacy_python(&[file]));
    }

    #[test]
    fn test_shebang_python3_wins_over_body() {
        let file = py("a.py", "#!/usr/bin/env python3\nprint 'legacy looking'\n");
        assert!(!is_legacy_python(&[file]));
    }

    #[test]
    fn test_bare_print_statement() {
        assert!(is_legacy_python(&[py("a.py", "x = 1\nprint x\n")]));
        assert!(is_legacy_python(&[py("a.py", "    print \"hi\"\n")]));
    }

    #[test]
    fn test_print_call_is_modern() {
        assert!(!is_legacy_python(&[py("a.py", "print(1)\nprint (2)\n")]));
    }

    #[test]
    fn test_empty_print_statement() {
        assert!(is_legacy_python(&[py("a.py", "x = 1\nprint\n")]));
        assert!(is_legacy_python(&[py("a.py", "print\n")]));
        assert!(is_legacy_python(&[py("a.py", "if x:\n    print\r\n")]));
    }

    #[test]
    fn test_empty_print_with_comment_or_at_eof() {
        assert!(!is_legacy_python(&[py("a.py", "print # nothing\n")]));
        assert!(!is_legacy_python(&[py("a.py", "x = 1\nprint")]));
    }

    #[test]
    fn test_raw_input() {
        assert!(is_legacy_python(&[py("a.py", "n = int(raw_input())\n")]));
    }

    #[test]
    fn test_comments_are_ignored() {
        let file = py("a.py", "# print 'old'\nx = 1  # raw_input\n");
        assert!(!is_legacy_python(&[file]));
    }

    #[test]
    fn test_first_decisive_file_wins() {
        let modern = py("a.py", "#!/usr/bin/python3\n");
        let legacy = py("b.py", "print 'x'\n");
        assert!(!is_legacy_python(&[modern.clone(), legacy.clone()]));
        assert!(is_legacy_python(&[legacy, modern]));
    }

    #[test]
    fn test_undecided_file_does_not_stop_scan() {
        let plain = py("a.py", "import sys\n");
        let legacy = py("b.py", "print sys.argv\n");
        assert!(is_legacy_python(&[plain, legacy]));
    }
}
