use std::io::Write;

use crate::error::ConvertError;
use crate::model::Contest;
use crate::renderer::Render;
use crate::verdict::VerdictFormat;

/// Renders the testsys scoreboard protocol: the 0x1A control byte, the
/// header directives, then one `@p`/`@t`/`@s` line per entity in that fixed
/// section order.
pub struct TestsysRenderer;

impl Render for TestsysRenderer {
    fn render(&self, contest: &Contest, sink: &mut dyn Write) -> Result<(), ConvertError> {
        writeln!(sink, "\u{1a}")?;
        writeln!(sink, "@contest \"{}\"", contest.name())?;
        writeln!(sink, "@contlen {}", contest.duration())?;
        writeln!(sink, "@problems {}", contest.problems().len())?;
        writeln!(sink, "@teams {}", contest.teams().len())?;
        writeln!(sink, "@submissions {}", contest.submissions().len())?;
        for problem in contest.problems() {
            writeln!(sink, "@p {},{},20,0", problem.letter, problem.name)?;
        }
        for team in contest.teams() {
            writeln!(sink, "@t {},0,1,\"{}\"", team.id, team.name)?;
        }
        for submission in contest.submissions() {
            writeln!(
                sink,
                "@s {},{},{},{},{}",
                contest.teams()[submission.team].id,
                contest.problems()[submission.problem].letter,
                submission.attempt,
                submission.time,
                submission.verdict.encode(VerdictFormat::Testsys)?
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Problem, Submission, Team};
    use crate::verdict::Verdict;

    #[test]
    fn renders_the_protocol_example() {
        let contest = Contest::new(
            "Demo".into(),
            180,
            vec![Problem {
                letter: 'A',
                name: "Sum".into(),
            }],
            vec![Team {
                id: 0,
                name: "Alice".into(),
            }],
            vec![Submission {
                id: 0,
                team: 0,
                problem: 0,
                attempt: 1,
                time: 42,
                verdict: Verdict::Accepted,
            }],
        )
        .unwrap();
        let mut buffer = Vec::new();
        TestsysRenderer.render(&contest, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "\u{1a}\n\
@contest \"Demo\"\n\
@contlen 180\n\
@problems 1\n\
@teams 1\n\
@submissions 1\n\
@p A,Sum,20,0\n\
@t 0,0,1,\"Alice\"\n\
@s 0,A,1,42,OK\n"
        );
    }

    #[test]
    fn substitutes_security_violation_with_rt() {
        let contest = Contest::new(
            "c".into(),
            60,
            vec![Problem {
                letter: 'A',
                name: "Sum".into(),
            }],
            vec![Team {
                id: 0,
                name: "Alice".into(),
            }],
            vec![Submission {
                id: 0,
                team: 0,
                problem: 0,
                attempt: 1,
                time: 10,
                verdict: Verdict::SecurityViolation,
            }],
        )
        .unwrap();
        let mut buffer = Vec::new();
        TestsysRenderer.render(&contest, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("@s 0,A,1,10,RT"));
    }
}
