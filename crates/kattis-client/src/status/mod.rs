//! Judge status codes and parsed status documents.

pub mod markup;

use serde::Deserialize;

use markup::MarkupV1;

/// Status code of a submission that is executing testcases.
pub const RUNNING_CODE: i64 = 5;

/// Judge status. Codes below [`RUNNING_CODE`] are pre-execution phases,
/// codes above it are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JudgeStatus {
    New,
    WaitingForCompile,
    Compiling,
    WaitingForRun,
    Running,
    JudgeError,
    SubmissionError,
    CompileError,
    RunTimeError,
    MemoryLimitExceeded,
    OutputLimitExceeded,
    TimeLimitExceeded,
    IllegalFunction,
    WrongAnswer,
    Accepted,
    /// A code this client does not know.
    Unrecognized(i64),
}

impl JudgeStatus {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 | 1 => Self::New,
            2 => Self::WaitingForCompile,
            3 => Self::Compiling,
            4 => Self::WaitingForRun,
            RUNNING_CODE => Self::Running,
            6 => Self::JudgeError,
            7 => Self::SubmissionError,
            8 => Self::CompileError,
            9 => Self::RunTimeError,
            10 => Self::MemoryLimitExceeded,
            11 => Self::OutputLimitExceeded,
            12 => Self::TimeLimitExceeded,
            13 => Self::IllegalFunction,
            14 => Self::WrongAnswer,
            16 => Self::Accepted,
            other => Self::Unrecognized(other),
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Self::New => 1,
            Self::WaitingForCompile => 2,
            Self::Compiling => 3,
            Self::WaitingForRun => 4,
            Self::Running => RUNNING_CODE,
            Self::JudgeError => 6,
            Self::SubmissionError => 7,
            Self::CompileError => 8,
            Self::RunTimeError => 9,
            Self::MemoryLimitExceeded => 10,
            Self::OutputLimitExceeded => 11,
            Self::TimeLimitExceeded => 12,
            Self::IllegalFunction => 13,
            Self::WrongAnswer => 14,
            Self::Accepted => 16,
            Self::Unrecognized(code) => code,
        }
    }

    /// Display text.
    pub fn label(self) -> String {
        let text = match self {
            Self::New => "New",
            Self::WaitingForCompile => "Waiting for compile",
            Self::Compiling => "Compiling",
            Self::WaitingForRun => "Waiting for run",
            Self::Running => "Running",
            Self::JudgeError => "Judge Error",
            Self::SubmissionError => "Submission Error",
            Self::CompileError => "Compile Error",
            Self::RunTimeError => "Run Time Error",
            Self::MemoryLimitExceeded => "Memory Limit Exceeded",
            Self::OutputLimitExceeded => "Output Limit Exceeded",
            Self::TimeLimitExceeded => "Time Limit Exceeded",
            Self::IllegalFunction => "Illegal Function",
            Self::WrongAnswer => "Wrong Answer",
            Self::Accepted => "Accepted",
            Self::Unrecognized(code) => return format!("Unknown status {}", code),
        };
        text.to_string()
    }

    pub fn is_pending(self) -> bool {
        self.code() < RUNNING_CODE
    }

    pub fn is_running(self) -> bool {
        self.code() == RUNNING_CODE
    }

    /// Polling stops once this is true.
    pub fn is_terminal(self) -> bool {
        self.code() > RUNNING_CODE
    }

    pub fn is_accepted(self) -> bool {
        self == Self::Accepted
    }
}

/// Raw `?json` status document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusDocument {
    pub status_id: i64,
    #[serde(default)]
    pub testcase_index: u32,
    #[serde(default)]
    pub row_html: Option<String>,
    #[serde(default)]
    pub feedback_html: Option<String>,
}

/// One poll result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgementStatus {
    pub status: JudgeStatus,
    pub testcases_done: u32,
    /// Derived from markup; 0 when unavailable.
    pub testcases_total: u32,
    /// First preformatted block of the feedback; compile errors only.
    pub compile_error: Option<String>,
    /// Reported CPU time; terminal statuses only.
    pub cpu_time: Option<String>,
}

impl JudgementStatus {
    pub fn from_document(doc: &StatusDocument) -> Self {
        let status = JudgeStatus::from_code(doc.status_id);
        let row_html = doc.row_html.as_deref().unwrap_or("");

        let compile_error = if status == JudgeStatus::CompileError {
            doc.feedback_html
                .as_deref()
                .and_then(MarkupV1::compile_error)
        } else {
            None
        };

        let cpu_time = if status.is_terminal() {
            MarkupV1::cpu_time(row_html)
        } else {
            None
        };

        Self {
            status,
            testcases_done: doc.testcase_index,
            testcases_total: MarkupV1::testcase_total(row_html),
            compile_error,
            cpu_time,
        }
    }
}
