//! Pure helpers: response text cleanup and submission id extraction (no HTTP).

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SUBMISSION_ID: Regex = Regex::new(r"Submission ID: (\d+)").unwrap();
}

/// Turn the HTML-flavored submit response into printable text.
pub(crate) fn plain_text(body: &str) -> String {
    body.replace("<br />", "\n")
}

/// Id of the new submission, if the response reports one.
pub(crate) fn extract_submission_id(text: &str) -> Option<String> {
    SUBMISSION_ID
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// `<base>/<id>`, tolerating a trailing slash on the base.
pub(crate) fn submission_url(base: &str, id: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        assert_eq!(
            plain_text("Submission received.<br />Submission ID: 42."),
            "Submission received.\nSubmission ID: 42."
        );
    }

    #[test]
    fn test_extract_submission_id() {
        assert_eq!(
            extract_submission_id("ok\nSubmission ID: 123456.\n").as_deref(),
            Some("123456")
        );
        assert_eq!(extract_submission_id("Submission ID: pending"), None);
        assert_eq!(extract_submission_id(""), None);
    }

    #[test]
    fn test_submission_url() {
        assert_eq!(
            submission_url("https://open.kattis.com/submissions/", "7"),
            "https://open.kattis.com/submissions/7"
        );
    }
}
