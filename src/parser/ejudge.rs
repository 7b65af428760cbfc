use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::attempt::AttemptCounter;
use crate::error::{parse_number, ConvertError};
use crate::model::{Contest, Problem, Submission, Team};
use crate::parser::Parse;
use crate::verdict::{Verdict, VerdictFormat};

/// Parses an ejudge run log: `runlog[duration]` with `name`, `users`,
/// `problems` and `runs` children. The duration attribute is seconds and is
/// normalized to minutes; source user and problem ids are remapped to dense
/// ids in document order.
pub struct EjudgeParser;

#[derive(Deserialize, Debug)]
struct Runlog {
    duration: String,
    name: String,
    users: Users,
    problems: Problems,
    runs: Runs,
}

#[derive(Deserialize, Debug)]
struct Users {
    #[serde(default)]
    user: Vec<User>,
}

#[derive(Deserialize, Debug)]
struct User {
    id: String,
    name: String,
}

#[derive(Deserialize, Debug)]
struct Problems {
    #[serde(default)]
    problem: Vec<XmlProblem>,
}

#[derive(Deserialize, Debug)]
struct XmlProblem {
    id: String,
    short_name: String,
    long_name: String,
}

#[derive(Deserialize, Debug)]
struct Runs {
    #[serde(default)]
    run: Vec<Run>,
}

#[derive(Deserialize, Debug)]
struct Run {
    run_id: String,
    time: String,
    status: String,
    user_id: String,
    prob_id: String,
}

impl Parse for EjudgeParser {
    fn parse(&self, input: &Path) -> Result<Contest, ConvertError> {
        parse_str(&fs::read_to_string(input)?)
    }
}

pub fn parse_str(xml: &str) -> Result<Contest, ConvertError> {
    let runlog: Runlog = quick_xml::de::from_str(xml)?;
    let duration = parse_number::<u64>("runlog duration", &runlog.duration)? / 60;

    let mut teams = Vec::with_capacity(runlog.users.user.len());
    let mut team_index: HashMap<u64, usize> = HashMap::new();
    for user in runlog.users.user {
        let source_id = parse_number("user id", &user.id)?;
        if team_index.insert(source_id, teams.len()).is_some() {
            return Err(ConvertError::DuplicateTeam(user.id));
        }
        teams.push(Team {
            id: teams.len(),
            name: user.name,
        });
    }

    let mut problems = Vec::with_capacity(runlog.problems.problem.len());
    let mut seen_letters = HashSet::new();
    let mut seen_ids = HashSet::new();
    for problem in runlog.problems.problem {
        let source_id: u64 = parse_number("problem id", &problem.id)?;
        let letter = problem
            .short_name
            .chars()
            .next()
            .ok_or(ConvertError::MissingField("problem short_name"))?;
        if !seen_ids.insert(source_id) || !seen_letters.insert(letter) {
            return Err(ConvertError::DuplicateProblem(problem.short_name));
        }
        problems.push((source_id, letter, problem.long_name));
    }
    problems.sort_by_key(|&(_, letter, _)| letter);
    let mut problem_index: HashMap<u64, usize> = HashMap::new();
    let problems: Vec<Problem> = problems
        .into_iter()
        .enumerate()
        .map(|(index, (source_id, letter, name))| {
            problem_index.insert(source_id, index);
            Problem { letter, name }
        })
        .collect();

    let mut attempts = AttemptCounter::new();
    let mut submissions = Vec::with_capacity(runlog.runs.run.len());
    for run in runlog.runs.run {
        let id = parse_number("run_id", &run.run_id)?;
        let time = parse_number("run time", &run.time)?;
        let user_id: u64 = parse_number("run user_id", &run.user_id)?;
        let prob_id: u64 = parse_number("run prob_id", &run.prob_id)?;
        let team = *team_index
            .get(&user_id)
            .ok_or(ConvertError::UnknownTeam(run.user_id))?;
        let problem = *problem_index
            .get(&prob_id)
            .ok_or(ConvertError::UnknownProblem(run.prob_id))?;
        let attempt = attempts.next(team, problem);
        submissions.push(Submission {
            id,
            team,
            problem,
            attempt,
            time,
            verdict: Verdict::decode(VerdictFormat::Ejudge, &run.status)?,
        });
    }

    debug!(
        "ejudge: {} teams, {} problems, {} submissions",
        teams.len(),
        problems.len(),
        submissions.len()
    );
    Contest::new(runlog.name, duration, problems, teams, submissions)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<runlog duration="7230" fog_time="3600">
    <name>Sample Round</name>
    <users>
        <user id="17" name="Alice"/>
        <user id="3" name="Bob"/>
    </users>
    <problems>
        <problem id="2" short_name="B" long_name="Graphs"/>
        <problem id="1" short_name="A" long_name="Sums"/>
    </problems>
    <runs>
        <run run_id="0" time="60" status="WA" user_id="17" prob_id="1"/>
        <run run_id="1" time="120" status="OK" user_id="17" prob_id="1"/>
        <run run_id="2" time="90" status="CE" user_id="3" prob_id="2"/>
    </runs>
</runlog>"#;

    #[test]
    fn normalizes_duration_to_truncated_minutes() {
        let contest = parse_str(LOG).unwrap();
        assert_eq!(contest.duration(), 120);
    }

    #[test]
    fn remaps_teams_densely_in_document_order() {
        let contest = parse_str(LOG).unwrap();
        let names: Vec<&str> = contest.teams().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
        let ids: Vec<usize> = contest.teams().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn sorts_problems_by_letter() {
        let contest = parse_str(LOG).unwrap();
        let letters: Vec<char> = contest.problems().iter().map(|p| p.letter).collect();
        assert_eq!(letters, vec!['A', 'B']);
    }

    #[test]
    fn recomputes_attempts_and_sorts_submissions() {
        let contest = parse_str(LOG).unwrap();
        let view: Vec<(usize, u32, u64)> = contest
            .submissions()
            .iter()
            .map(|s| (s.id, s.attempt, s.time))
            .collect();
        // Sorted by time; Alice's two runs on A count 1, 2.
        assert_eq!(view, vec![(0, 1, 60), (2, 1, 90), (1, 2, 120)]);
        assert_eq!(contest.submissions()[2].verdict, Verdict::Accepted);
    }

    #[test]
    fn duplicate_user_id_is_an_error() {
        let log = LOG.replace(r#"id="3""#, r#"id="17""#);
        assert!(matches!(
            parse_str(&log),
            Err(ConvertError::DuplicateTeam(_))
        ));
    }

    #[test]
    fn unknown_verdict_fails_the_parse() {
        let log = LOG.replace(r#"status="CE""#, r#"status="XX""#);
        assert!(matches!(
            parse_str(&log),
            Err(ConvertError::UnknownVerdict { .. })
        ));
    }

    #[test]
    fn unknown_problem_reference_is_an_error() {
        let log = LOG.replace(r#"prob_id="2""#, r#"prob_id="9""#);
        assert!(matches!(
            parse_str(&log),
            Err(ConvertError::UnknownProblem(_))
        ));
    }
}
