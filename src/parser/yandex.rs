use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use serde::Deserialize;

use crate::attempt::AttemptCounter;
use crate::error::{parse_number, ConvertError};
use crate::model::{Contest, Problem, Submission, Team};
use crate::parser::Parse;
use crate::verdict::{Verdict, VerdictFormat};

/// Parses a Yandex.Contest event log. Only users without a non-empty
/// participation-type marker become teams; submit events that reference an
/// excluded or hidden participant are skipped, not errors.
pub struct YandexParser;

#[derive(Deserialize, Debug)]
struct ContestLog {
    settings: Settings,
    users: Users,
    problems: Problems,
    events: Events,
}

#[derive(Deserialize, Debug)]
struct Settings {
    duration: String,
    #[serde(rename = "contestName")]
    contest_name: String,
}

#[derive(Deserialize, Debug)]
struct Users {
    #[serde(default)]
    user: Vec<User>,
}

#[derive(Deserialize, Debug)]
struct User {
    id: String,
    #[serde(rename = "displayedName")]
    displayed_name: String,
    #[serde(rename = "participationType")]
    participation_type: Option<String>,
}

#[derive(Deserialize, Debug)]
struct Problems {
    #[serde(default)]
    problem: Vec<XmlProblem>,
}

#[derive(Deserialize, Debug)]
struct XmlProblem {
    title: String,
    #[serde(rename = "longName")]
    long_name: String,
}

#[derive(Deserialize, Debug)]
struct Events {
    #[serde(default)]
    submit: Vec<Submit>,
}

#[derive(Deserialize, Debug)]
struct Submit {
    #[serde(rename = "userId")]
    user_id: String,
    #[serde(rename = "problemTitle")]
    problem_title: String,
    #[serde(rename = "contestTime")]
    contest_time: String,
    verdict: String,
}

impl Parse for YandexParser {
    fn parse(&self, input: &Path) -> Result<Contest, ConvertError> {
        parse_str(&fs::read_to_string(input)?)
    }
}

/// Parses an `H:M:S` duration into total seconds.
fn parse_duration_seconds(value: &str) -> Result<u64, ConvertError> {
    lazy_static! {
        static ref DURATION_REGEX: Regex = Regex::new(r"^(\d+):(\d+):(\d+)$").unwrap();
    }
    let captures = DURATION_REGEX
        .captures(value.trim())
        .ok_or_else(|| ConvertError::MalformedNumber {
            what: "contest duration",
            value: value.to_string(),
        })?;
    let hours: u64 = parse_number("duration hours", &captures[1])?;
    let minutes: u64 = parse_number("duration minutes", &captures[2])?;
    let seconds: u64 = parse_number("duration seconds", &captures[3])?;
    Ok(hours * 3600 + minutes * 60 + seconds)
}

pub fn parse_str(xml: &str) -> Result<Contest, ConvertError> {
    let contest_log: ContestLog = quick_xml::de::from_str(xml)?;
    let duration = parse_duration_seconds(&contest_log.settings.duration)? / 60;

    let mut teams = Vec::new();
    let mut team_index: HashMap<String, usize> = HashMap::new();
    for user in contest_log.users.user {
        let hidden = user
            .participation_type
            .as_ref()
            .map_or(false, |marker| !marker.is_empty());
        if hidden {
            continue;
        }
        if team_index.insert(user.id.clone(), teams.len()).is_some() {
            return Err(ConvertError::DuplicateTeam(user.id));
        }
        teams.push(Team {
            id: teams.len(),
            name: user.displayed_name,
        });
    }

    let mut problems = Vec::with_capacity(contest_log.problems.problem.len());
    let mut seen_letters = HashSet::new();
    for problem in contest_log.problems.problem {
        let letter = problem
            .title
            .chars()
            .next()
            .ok_or(ConvertError::MissingField("problem title"))?;
        if !seen_letters.insert(letter) {
            return Err(ConvertError::DuplicateProblem(problem.title));
        }
        problems.push((problem.title, letter, problem.long_name));
    }
    problems.sort_by_key(|&(_, letter, _)| letter);
    let mut problem_index: HashMap<String, usize> = HashMap::new();
    let problems: Vec<Problem> = problems
        .into_iter()
        .enumerate()
        .map(|(index, (title, letter, name))| {
            problem_index.insert(title, index);
            Problem { letter, name }
        })
        .collect();

    let mut attempts = AttemptCounter::new();
    let mut submissions = Vec::new();
    for submit in contest_log.events.submit {
        let team = match team_index.get(&submit.user_id) {
            Some(&team) => team,
            // Hidden or excluded participant.
            None => continue,
        };
        let problem = match problem_index.get(&submit.problem_title) {
            Some(&problem) => problem,
            None => continue,
        };
        let time = parse_number::<u64>("submit contestTime", &submit.contest_time)? / 1000;
        let attempt = attempts.next(team, problem);
        submissions.push(Submission {
            id: submissions.len(),
            team,
            problem,
            attempt,
            time,
            verdict: Verdict::decode(VerdictFormat::Yandex, &submit.verdict)?,
        });
    }

    debug!(
        "yandex: {} teams, {} problems, {} submissions",
        teams.len(),
        problems.len(),
        submissions.len()
    );
    Contest::new(
        contest_log.settings.contest_name,
        duration,
        problems,
        teams,
        submissions,
    )
}
