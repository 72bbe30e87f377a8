//! Submission metadata and its wire form.

use tracing::debug;

use crate::error::{KattisError, KattisResult};
use crate::language::{infer_language, profile, resolve_mainclass, EntryKind};
use crate::source::{SourceFile, SourceSet};

/// Multipart field name shared by every attached file.
pub const FILE_FIELD: &str = "sub_file[]";

/// Content type for every attachment; the judge goes by `language` only.
pub const ATTACHMENT_MIME: &str = "application/octet-stream";

const SUBMIT_CTR: &str = "2";

/// User-supplied values that replace inferred ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Used verbatim, not lowercased.
    pub problem: Option<String>,
    pub language: Option<String>,
    /// Used verbatim; an empty string clears the inferred value.
    pub mainclass: Option<String>,
    pub tag: Option<String>,
}

/// Everything needed to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub problem: String,
    pub language: String,
    pub mainclass: Option<String>,
    pub tag: Option<String>,
    /// Sorted by path.
    pub files: Vec<SourceFile>,
}

/// One file part of the upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content: Vec<u8>,
    pub mime: &'static str,
}

impl Submission {
    /// Infer language, problem and mainclass from `sources`, then apply
    /// `overrides`. Fails before any network call when no language can be
    /// determined.
    pub fn prepare(sources: &SourceSet, overrides: &Overrides) -> KattisResult<Self> {
        let first = sources.first();

        let language = match &overrides.language {
            Some(language) if !language.is_empty() => language.clone(),
            _ => infer_language(sources.in_order())
                .ok_or_else(|| KattisError::Inference {
                    extension: first.extension(),
                })?
                .to_string(),
        };

        let problem = match &overrides.problem {
            Some(problem) if !problem.is_empty() => problem.clone(),
            _ => first.stem().to_lowercase(),
        };

        let mainclass = match &overrides.mainclass {
            Some(mainclass) => Some(mainclass.clone()),
            None => resolve_mainclass(&language, sources.in_order()),
        };

        let submission = Self::build(
            problem,
            language,
            sources.sorted(),
            mainclass,
            overrides.tag.clone(),
        );
        debug!(
            problem = %submission.problem,
            language = %submission.language,
            mainclass = ?submission.mainclass,
            files = submission.files.len(),
            "prepared submission"
        );
        Ok(submission)
    }

    /// Assemble a submission from already-decided values.
    pub fn build(
        problem: impl Into<String>,
        language: impl Into<String>,
        files: Vec<SourceFile>,
        mainclass: Option<String>,
        tag: Option<String>,
    ) -> Self {
        Self {
            problem: problem.into(),
            language: language.into(),
            mainclass,
            tag,
            files,
        }
    }

    /// Form fields, in wire order.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("submit", "true".to_string()),
            ("submit_ctr", SUBMIT_CTR.to_string()),
            ("language", self.language.clone()),
            ("mainclass", self.mainclass.clone().unwrap_or_default()),
            ("problem", self.problem.clone()),
            ("tag", self.tag.clone().unwrap_or_default()),
            ("script", "true".to_string()),
        ]
    }

    /// File parts, one per file, named by basename only.
    pub fn attachments(&self) -> Vec<Attachment> {
        encode_files(&self.files)
    }

    /// Human-readable summary shown before confirming.
    pub fn summary(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Problem: {}", self.problem),
            format!("Language: {}", self.language),
            format!(
                "Files: {}",
                self.files
                    .iter()
                    .map(SourceFile::display_path)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        ];
        if let Some(mainclass) = self.mainclass.as_deref().filter(|m| !m.is_empty()) {
            if profile(&self.language).entry == EntryKind::File {
                lines.push(format!("Main file: {}", mainclass));
            } else {
                lines.push(format!("Mainclass: {}", mainclass));
            }
        }
        if let Some(tag) = self.tag.as_deref().filter(|t| !t.is_empty()) {
            lines.push(format!("Tag: {}", tag));
        }
        lines
    }
}

/// One attachment per file, carrying its basename and full content.
pub fn encode_files(files: &[SourceFile]) -> Vec<Attachment> {
    files
        .iter()
        .map(|f| Attachment {
            file_name: f.basename(),
            content: f.content().to_vec(),
            mime: ATTACHMENT_MIME,
        })
        .collect()
}
