use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::ConvertError;
use crate::model::Contest;
use crate::renderer::Render;
use crate::verdict::VerdictFormat;

/// Renders an ejudge run log. The duration attribute is written back in
/// seconds; `fog_time="3600"` is a fixed literal a downstream unfreezing
/// script expects. Numeric problem ids are the 1-based letter ordinal, and
/// run ids are re-assigned densely in stored submission order.
pub struct EjudgeRenderer;

impl Render for EjudgeRenderer {
    fn render(&self, contest: &Contest, sink: &mut dyn Write) -> Result<(), ConvertError> {
        let mut writer = Writer::new_with_indent(sink, b' ', 4);
        writer.write_event(Event::Decl(BytesDecl::new(
            b"1.0",
            Some(b"UTF-8"),
            Some(b"no"),
        )))?;

        let mut runlog = BytesStart::borrowed_name(b"runlog");
        let duration = (contest.duration() * 60).to_string();
        runlog.push_attribute(("duration", duration.as_str()));
        runlog.push_attribute(("fog_time", "3600"));
        writer.write_event(Event::Start(runlog))?;

        writer.write_event(Event::Start(BytesStart::borrowed_name(b"name")))?;
        writer.write_event(Event::Text(BytesText::from_plain_str(contest.name())))?;
        writer.write_event(Event::End(BytesEnd::borrowed(b"name")))?;

        writer.write_event(Event::Start(BytesStart::borrowed_name(b"users")))?;
        for team in contest.teams() {
            let mut user = BytesStart::borrowed_name(b"user");
            let id = team.id.to_string();
            user.push_attribute(("id", id.as_str()));
            user.push_attribute(("name", team.name.as_str()));
            writer.write_event(Event::Empty(user))?;
        }
        writer.write_event(Event::End(BytesEnd::borrowed(b"users")))?;

        writer.write_event(Event::Start(BytesStart::borrowed_name(b"problems")))?;
        for problem in contest.problems() {
            let mut element = BytesStart::borrowed_name(b"problem");
            let id = letter_ordinal(problem.letter).to_string();
            let letter = problem.letter.to_string();
            element.push_attribute(("id", id.as_str()));
            element.push_attribute(("short_name", letter.as_str()));
            element.push_attribute(("long_name", problem.name.as_str()));
            writer.write_event(Event::Empty(element))?;
        }
        writer.write_event(Event::End(BytesEnd::borrowed(b"problems")))?;

        writer.write_event(Event::Start(BytesStart::borrowed_name(b"runs")))?;
        for (run_id, submission) in contest.submissions().iter().enumerate() {
            let mut run = BytesStart::borrowed_name(b"run");
            let run_id = run_id.to_string();
            let time = submission.time.to_string();
            let status = submission.verdict.encode(VerdictFormat::Ejudge)?;
            let user_id = contest.teams()[submission.team].id.to_string();
            let prob_id =
                letter_ordinal(contest.problems()[submission.problem].letter).to_string();
            run.push_attribute(("run_id", run_id.as_str()));
            run.push_attribute(("time", time.as_str()));
            run.push_attribute(("status", status));
            run.push_attribute(("user_id", user_id.as_str()));
            run.push_attribute(("prob_id", prob_id.as_str()));
            writer.write_event(Event::Empty(run))?;
        }
        writer.write_event(Event::End(BytesEnd::borrowed(b"runs")))?;

        writer.write_event(Event::End(BytesEnd::borrowed(b"runlog")))?;
        Ok(())
    }
}

/// 1-based ordinal of a problem letter, 'A' -> 1.
fn letter_ordinal(letter: char) -> i32 {
    letter as i32 - 'A' as i32 + 1
}
