use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::attempt::AttemptCounter;
use crate::error::{parse_number, ConvertError};
use crate::model::{Contest, Problem, Submission, Team};
use crate::parser::Parse;
use crate::verdict::Verdict;

/// Parses a PCMS standings export: teams are per-session elements with
/// nested per-problem run lists. The format only records whether a run was
/// accepted, so every verdict collapses to Accepted or Rejected by design.
pub struct PcmsParser;

#[derive(Deserialize, Debug)]
struct Standings {
    contest: XmlContest,
}

#[derive(Deserialize, Debug)]
struct XmlContest {
    name: String,
    length: String,
    challenge: Challenge,
    #[serde(default)]
    session: Vec<Session>,
}

#[derive(Deserialize, Debug)]
struct Challenge {
    #[serde(default)]
    problem: Vec<XmlProblem>,
}

#[derive(Deserialize, Debug)]
struct XmlProblem {
    alias: String,
    name: String,
}

#[derive(Deserialize, Debug)]
struct Session {
    alias: String,
    party: String,
    #[serde(default)]
    problem: Vec<SessionProblem>,
}

#[derive(Deserialize, Debug)]
struct SessionProblem {
    alias: String,
    #[serde(default)]
    run: Vec<XmlRun>,
}

#[derive(Deserialize, Debug)]
struct XmlRun {
    accepted: String,
    time: String,
}

impl Parse for PcmsParser {
    fn parse(&self, input: &Path) -> Result<Contest, ConvertError> {
        parse_str(&fs::read_to_string(input)?)
    }
}

pub fn parse_str(xml: &str) -> Result<Contest, ConvertError> {
    let standings: Standings = quick_xml::de::from_str(xml)?;
    let contest = standings.contest;
    // Contest length is milliseconds; truncate to seconds, then minutes.
    let duration = parse_number::<u64>("contest length", &contest.length)? / 1000 / 60;

    let mut problems = Vec::with_capacity(contest.challenge.problem.len());
    let mut seen_letters = HashSet::new();
    for problem in contest.challenge.problem {
        let letter = problem
            .alias
            .chars()
            .next()
            .ok_or(ConvertError::MissingField("problem alias"))?;
        if !seen_letters.insert(letter) {
            return Err(ConvertError::DuplicateProblem(problem.alias));
        }
        problems.push((problem.alias, letter, problem.name));
    }
    problems.sort_by_key(|&(_, letter, _)| letter);
    let mut problem_index: HashMap<String, usize> = HashMap::new();
    let problems: Vec<Problem> = problems
        .into_iter()
        .enumerate()
        .map(|(index, (alias, letter, name))| {
            problem_index.insert(alias, index);
            Problem { letter, name }
        })
        .collect();

    let mut teams = Vec::with_capacity(contest.session.len());
    let mut team_index: HashMap<&str, usize> = HashMap::new();
    for session in &contest.session {
        if team_index.insert(&session.alias, teams.len()).is_some() {
            return Err(ConvertError::DuplicateTeam(session.alias.clone()));
        }
        teams.push(Team {
            id: teams.len(),
            name: session.party.clone(),
        });
    }

    let mut attempts = AttemptCounter::new();
    let mut submissions = Vec::new();
    for (team, session) in contest.session.iter().enumerate() {
        for session_problem in &session.problem {
            let problem = *problem_index
                .get(&session_problem.alias)
                .ok_or_else(|| ConvertError::UnknownProblem(session_problem.alias.clone()))?;
            for run in &session_problem.run {
                let time = parse_number::<u64>("run time", &run.time)? / 1000;
                let verdict = if run.accepted.eq_ignore_ascii_case("yes") {
                    Verdict::Accepted
                } else {
                    Verdict::Rejected
                };
                let attempt = attempts.next(team, problem);
                submissions.push(Submission {
                    id: submissions.len(),
                    team,
                    problem,
                    attempt,
                    time,
                    verdict,
                });
            }
        }
    }

    debug!(
        "pcms: {} teams, {} problems, {} submissions",
        teams.len(),
        problems.len(),
        submissions.len()
    );
    Contest::new(contest.name, duration, problems, teams, submissions)
}
