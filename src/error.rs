use quick_xml::de::DeError;
use std::io;
use thiserror::Error;

use crate::verdict::{Verdict, VerdictFormat};

/// Errors shared by every parser and renderer. Parses and renders are
/// whole-operation: the first error aborts and no partial contest or
/// partially written output is ever handed back.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    XmlDecode(#[from] DeError),
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("malformed {what}: {value:?}")]
    MalformedNumber { what: &'static str, value: String },
    #[error("missing required field {0}")]
    MissingField(&'static str),
    #[error("bad directive line: {0:?}")]
    BadDirective(String),
    #[error("unknown {format} verdict: {code:?}")]
    UnknownVerdict { format: VerdictFormat, code: String },
    #[error("verdict {verdict:?} is not representable in {format}")]
    UnsupportedVerdict {
        format: VerdictFormat,
        verdict: Verdict,
    },
    #[error("duplicate problem {0:?}")]
    DuplicateProblem(String),
    #[error("duplicate team {0:?}")]
    DuplicateTeam(String),
    #[error("submission references unknown problem {0:?}")]
    UnknownProblem(String),
    #[error("submission references unknown team {0:?}")]
    UnknownTeam(String),
    #[error("submission time {time}s outside contest duration {duration_seconds}s")]
    TimeOutOfRange { time: i64, duration_seconds: i64 },
    #[error("api returned status {0}")]
    ApiStatus(String),
    #[error("submission {0} references a team or problem outside the contest")]
    DanglingReference(usize),
}

/// Parses an integer field, wrapping failures with the field name so parse
/// errors identify the offending value.
pub fn parse_number<T: std::str::FromStr>(
    what: &'static str,
    value: &str,
) -> Result<T, ConvertError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConvertError::MalformedNumber {
            what,
            value: value.to_string(),
        })
}
