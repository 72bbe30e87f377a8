//! Scraping of the HTML fragments embedded in status documents.
//!
//! The judge reports the testcase total, CPU time and compiler output only
//! as markup. Every extractor returns an "unavailable" value (`None` or 0)
//! when the markup does not have the expected shape; callers must never
//! treat that as an error.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PRE_BLOCK: Regex = Regex::new(r"(?is)<pre\b[^>]*>(.*?)</pre\s*>").unwrap();
    static ref CPU_FIELD: Regex =
        Regex::new(r#"(?is)<[a-z][a-z0-9]*\b[^>]*\bdata-type\s*=\s*["']cpu["'][^>]*>([^<]*)"#)
            .unwrap();
    static ref ENTITY: Regex = Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").unwrap();
}

/// Fragment layout served by the judge's `?json` endpoint as of this
/// client version.
pub struct MarkupV1;

impl MarkupV1 {
    /// Total testcases: every `<i` in the row, minus the header marker.
    pub fn testcase_total(row_html: &str) -> u32 {
        let markers = row_html.matches("<i").count();
        u32::try_from(markers.saturating_sub(1)).unwrap_or(u32::MAX)
    }

    /// Text of the first `<pre>` block in the feedback fragment.
    pub fn compile_error(feedback_html: &str) -> Option<String> {
        let inner = PRE_BLOCK.captures(feedback_html)?.get(1)?.as_str();
        // Text up to the first child element.
        let text = inner.split('<').next().unwrap_or("");
        Some(decode_entities(text))
    }

    /// Text of the element tagged `data-type="cpu"` in the row fragment.
    pub fn cpu_time(row_html: &str) -> Option<String> {
        let raw = CPU_FIELD.captures(row_html)?.get(1)?.as_str();
        let text = decode_entities(raw);
        let text = text.trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }
}

fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let name = &caps[1];
            let decoded = if let Some(hex) = name
                .strip_prefix("#x")
                .or_else(|| name.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = name.strip_prefix('#') {
                dec.parse().ok().and_then(char::from_u32)
            } else {
                match name {
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "amp" => Some('&'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some('\u{a0}'),
                    _ => None,
                }
            };
            decoded
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_testcase_total_is_markers_minus_one() {
        let row = r#"<td><i class="hdr"></i><i class="ok"></i><i class="ok"/><i></i></td>"#;
        assert_eq!(MarkupV1::testcase_total(row), 3);
    }

    #[test]
    fn test_testcase_total_counts_every_i_prefix() {
        let row = r#"<img src="x"><i></i><i></i>"#;
        assert_eq!(MarkupV1::testcase_total(row), 2);

        let row = r#"<img src="x"><input><i></i><i></i>"#;
        assert_eq!(MarkupV1::testcase_total(row), 3);
    }

    #[test]
    fn test_testcase_total_without_markers() {
        assert_eq!(MarkupV1::testcase_total(""), 0);
        assert_eq!(MarkupV1::testcase_total("<i></i>"), 0);
        assert_eq!(MarkupV1::testcase_total("<td>garbage"), 0);
    }

    #[test]
    fn test_compile_error_block() {
        let feedback = r#"<div><p>Compiler said:</p><pre class="x">a.cpp:1: error: &#39;x&#39; was not declared
  x = 1;
      ^</pre><pre>second</pre></div>"#;
        let error = MarkupV1::compile_error(feedback).unwrap();
        assert!(error.starts_with("a.cpp:1: error: 'x' was not declared"));
        assert!(error.ends_with("      ^"));
    }

    #[test]
    fn test_compile_error_missing() {
        assert_eq!(MarkupV1::compile_error("<div>no block</div>"), None);
        assert_eq!(MarkupV1::compile_error("<pre>unterminated"), None);
    }

    #[test]
    fn test_compile_error_decodes_entities() {
        assert_eq!(
            MarkupV1::compile_error("<pre>vector&lt;int&gt; &amp; &bogus;</pre>").as_deref(),
            Some("vector<int> & &bogus;")
        );
    }

    #[test]
    fn test_cpu_time() {
        let row = r#"<tr><td data-type="status">Accepted</td><td class="r" data-type="cpu">0.01 s</td></tr>"#;
        assert_eq!(MarkupV1::cpu_time(row).as_deref(), Some("0.01 s"));
    }

    #[test]
    fn test_cpu_time_missing_or_empty() {
        assert_eq!(MarkupV1::cpu_time("<td data-type=\"lang\">C++</td>"), None);
        assert_eq!(MarkupV1::cpu_time("<td data-type=\"cpu\"></td>"), None);
    }
}
