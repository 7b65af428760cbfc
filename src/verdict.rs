use std::fmt;

use crate::error::ConvertError;

/// Canonical judgement outcome for one submission. Every adapter maps its
/// native codes into and out of this closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Accepted,
    Rejected,
    WrongAnswer,
    RuntimeError,
    TimeLimitExceeded,
    MemoryLimitExceeded,
    CompilationError,
    PresentationError,
    IdlenessLimitExceeded,
    SecurityViolation,
}

pub const ALL_VERDICTS: [Verdict; 10] = [
    Verdict::Accepted,
    Verdict::Rejected,
    Verdict::WrongAnswer,
    Verdict::RuntimeError,
    Verdict::TimeLimitExceeded,
    Verdict::MemoryLimitExceeded,
    Verdict::CompilationError,
    Verdict::PresentationError,
    Verdict::IdlenessLimitExceeded,
    Verdict::SecurityViolation,
];

/// The wire alphabets the taxonomy translates. The PCMS scoreboard XML is
/// absent on purpose: its "accepted" flag collapses to Accepted/Rejected in
/// the parser and carries no richer alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerdictFormat {
    Ejudge,
    Testsys,
    Codeforces,
    Yandex,
}

impl fmt::Display for VerdictFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VerdictFormat::Ejudge => "ejudge",
            VerdictFormat::Testsys => "testsys",
            VerdictFormat::Codeforces => "codeforces",
            VerdictFormat::Yandex => "yandex",
        };
        f.write_str(name)
    }
}

impl Verdict {
    pub fn decode(format: VerdictFormat, code: &str) -> Result<Verdict, ConvertError> {
        let verdict = match format {
            VerdictFormat::Ejudge => match code {
                "OK" => Some(Verdict::Accepted),
                "RJ" => Some(Verdict::Rejected),
                "WA" => Some(Verdict::WrongAnswer),
                "RT" => Some(Verdict::RuntimeError),
                "TL" => Some(Verdict::TimeLimitExceeded),
                "ML" => Some(Verdict::MemoryLimitExceeded),
                "CE" => Some(Verdict::CompilationError),
                "PE" => Some(Verdict::PresentationError),
                "SE" => Some(Verdict::SecurityViolation),
                _ => None,
            },
            VerdictFormat::Testsys => match code {
                "OK" => Some(Verdict::Accepted),
                "RJ" => Some(Verdict::Rejected),
                "WA" => Some(Verdict::WrongAnswer),
                "RT" => Some(Verdict::RuntimeError),
                "TL" => Some(Verdict::TimeLimitExceeded),
                "ML" => Some(Verdict::MemoryLimitExceeded),
                "CE" => Some(Verdict::CompilationError),
                "PE" => Some(Verdict::PresentationError),
                _ => None,
            },
            VerdictFormat::Codeforces => match code {
                "OK" => Some(Verdict::Accepted),
                "REJECTED" => Some(Verdict::Rejected),
                "WRONG_ANSWER" => Some(Verdict::WrongAnswer),
                "RUNTIME_ERROR" => Some(Verdict::RuntimeError),
                "TIME_LIMIT_EXCEEDED" => Some(Verdict::TimeLimitExceeded),
                "MEMORY_LIMIT_EXCEEDED" => Some(Verdict::MemoryLimitExceeded),
                "COMPILATION_ERROR" => Some(Verdict::CompilationError),
                "PRESENTATION_ERROR" => Some(Verdict::PresentationError),
                "IDLENESS_LIMIT_EXCEEDED" => Some(Verdict::IdlenessLimitExceeded),
                _ => None,
            },
            VerdictFormat::Yandex => match code {
                "OK" => Some(Verdict::Accepted),
                "WA" => Some(Verdict::WrongAnswer),
                "RE" => Some(Verdict::RuntimeError),
                "TL" => Some(Verdict::TimeLimitExceeded),
                "ML" => Some(Verdict::MemoryLimitExceeded),
                "CE" => Some(Verdict::CompilationError),
                "PE" => Some(Verdict::PresentationError),
                "IL" => Some(Verdict::IdlenessLimitExceeded),
                _ => None,
            },
        };
        verdict.ok_or_else(|| ConvertError::UnknownVerdict {
            format,
            code: code.to_string(),
        })
    }

    /// Encodes into a format's code alphabet. Formats with fewer than ten
    /// codes use fixed substitutions: ejudge and testsys render an idleness
    /// limit as "TL", testsys renders a security violation as "RT".
    pub fn encode(self, format: VerdictFormat) -> Result<&'static str, ConvertError> {
        let code = match format {
            VerdictFormat::Ejudge => Some(match self {
                Verdict::Accepted => "OK",
                Verdict::Rejected => "RJ",
                Verdict::WrongAnswer => "WA",
                Verdict::RuntimeError => "RT",
                Verdict::TimeLimitExceeded => "TL",
                Verdict::MemoryLimitExceeded => "ML",
                Verdict::CompilationError => "CE",
                Verdict::PresentationError => "PE",
                Verdict::IdlenessLimitExceeded => "TL",
                Verdict::SecurityViolation => "SE",
            }),
            VerdictFormat::Testsys => Some(match self {
                Verdict::Accepted => "OK",
                Verdict::Rejected => "RJ",
                Verdict::WrongAnswer => "WA",
                Verdict::RuntimeError => "RT",
                Verdict::TimeLimitExceeded => "TL",
                Verdict::MemoryLimitExceeded => "ML",
                Verdict::CompilationError => "CE",
                Verdict::PresentationError => "PE",
                Verdict::IdlenessLimitExceeded => "TL",
                Verdict::SecurityViolation => "RT",
            }),
            VerdictFormat::Codeforces => match self {
                Verdict::Accepted => Some("OK"),
                Verdict::Rejected => Some("REJECTED"),
                Verdict::WrongAnswer => Some("WRONG_ANSWER"),
                Verdict::RuntimeError => Some("RUNTIME_ERROR"),
                Verdict::TimeLimitExceeded => Some("TIME_LIMIT_EXCEEDED"),
                Verdict::MemoryLimitExceeded => Some("MEMORY_LIMIT_EXCEEDED"),
                Verdict::CompilationError => Some("COMPILATION_ERROR"),
                Verdict::PresentationError => Some("PRESENTATION_ERROR"),
                Verdict::IdlenessLimitExceeded => Some("IDLENESS_LIMIT_EXCEEDED"),
                Verdict::SecurityViolation => None,
            },
            VerdictFormat::Yandex => match self {
                Verdict::Accepted => Some("OK"),
                Verdict::WrongAnswer => Some("WA"),
                Verdict::RuntimeError => Some("RE"),
                Verdict::TimeLimitExceeded => Some("TL"),
                Verdict::MemoryLimitExceeded => Some("ML"),
                Verdict::CompilationError => Some("CE"),
                Verdict::PresentationError => Some("PE"),
                Verdict::IdlenessLimitExceeded => Some("IL"),
                Verdict::Rejected | Verdict::SecurityViolation => None,
            },
        };
        code.ok_or(ConvertError::UnsupportedVerdict {
            format,
            verdict: self,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_inverts_encode_where_lossless() {
        // Substituted entries (IL on ejudge/testsys, SV on testsys) are
        // checked separately below.
        let lossless: &[(VerdictFormat, &[Verdict])] = &[
            (VerdictFormat::Ejudge, &ALL_VERDICTS[..8]),
            (VerdictFormat::Testsys, &ALL_VERDICTS[..8]),
            (VerdictFormat::Codeforces, &ALL_VERDICTS[..9]),
        ];
        for &(format, verdicts) in lossless {
            for &verdict in verdicts {
                let code = verdict.encode(format).unwrap();
                assert_eq!(Verdict::decode(format, code).unwrap(), verdict);
            }
        }
        assert_eq!(
            Verdict::decode(VerdictFormat::Ejudge, "SE").unwrap(),
            Verdict::SecurityViolation
        );
    }

    #[test]
    fn yandex_table_round_trips_where_defined() {
        for &verdict in &ALL_VERDICTS {
            match verdict.encode(VerdictFormat::Yandex) {
                Ok(code) => {
                    assert_eq!(Verdict::decode(VerdictFormat::Yandex, code).unwrap(), verdict)
                }
                Err(_) => assert!(matches!(
                    verdict,
                    Verdict::Rejected | Verdict::SecurityViolation
                )),
            }
        }
    }

    #[test]
    fn lossy_substitutions() {
        assert_eq!(
            Verdict::IdlenessLimitExceeded
                .encode(VerdictFormat::Ejudge)
                .unwrap(),
            "TL"
        );
        assert_eq!(
            Verdict::IdlenessLimitExceeded
                .encode(VerdictFormat::Testsys)
                .unwrap(),
            "TL"
        );
        assert_eq!(
            Verdict::SecurityViolation
                .encode(VerdictFormat::Testsys)
                .unwrap(),
            "RT"
        );
        assert_eq!(
            Verdict::SecurityViolation
                .encode(VerdictFormat::Ejudge)
                .unwrap(),
            "SE"
        );
    }

    #[test]
    fn codeforces_cannot_encode_security_violation() {
        match Verdict::SecurityViolation.encode(VerdictFormat::Codeforces) {
            Err(ConvertError::UnsupportedVerdict { verdict, .. }) => {
                assert_eq!(verdict, Verdict::SecurityViolation)
            }
            other => panic!("expected UnsupportedVerdict, got {:?}", other),
        }
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert!(Verdict::decode(VerdictFormat::Ejudge, "IL").is_err());
        assert!(Verdict::decode(VerdictFormat::Testsys, "SE").is_err());
        assert!(Verdict::decode(VerdictFormat::Codeforces, "HACKED").is_err());
        assert!(Verdict::decode(VerdictFormat::Yandex, "RT").is_err());
    }
}
