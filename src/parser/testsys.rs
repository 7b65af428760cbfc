use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{parse_number, ConvertError};
use crate::model::{Contest, Problem, Submission, Team};
use crate::parser::Parse;
use crate::verdict::{Verdict, VerdictFormat};

/// Parses the testsys scoreboard protocol: a leading 0x1A control byte,
/// then one `@`-prefixed directive per line. Team ids, problem letters and
/// attempt numbers are taken verbatim from the file, never recomputed.
pub struct TestsysParser;

impl Parse for TestsysParser {
    fn parse(&self, input: &Path) -> Result<Contest, ConvertError> {
        parse_str(&fs::read_to_string(input)?)
    }
}

pub fn parse_str(text: &str) -> Result<Contest, ConvertError> {
    let mut name = String::new();
    let mut duration = 0;
    let mut problems: Vec<Problem> = Vec::new();
    let mut teams: Vec<Team> = Vec::new();
    let mut submissions: Vec<Submission> = Vec::new();
    let mut problem_index: HashMap<char, usize> = HashMap::new();
    let mut team_index: HashMap<usize, usize> = HashMap::new();

    for line in text.lines() {
        let line = match line.strip_prefix('@') {
            Some(rest) => rest,
            // The 0x1A control line and any other undecorated line.
            None => continue,
        };
        let (directive, payload) = match line.split_once(' ') {
            Some((directive, payload)) => (directive, payload.trim()),
            None => (line, ""),
        };
        match directive {
            "contest" => name = quoted(payload, line)?.to_string(),
            "contlen" => duration = parse_number("contlen", payload)?,
            "p" => {
                let problem = parse_problem(payload, line)?;
                if problem_index
                    .insert(problem.letter, problems.len())
                    .is_some()
                {
                    return Err(ConvertError::DuplicateProblem(problem.letter.to_string()));
                }
                problems.push(problem);
            }
            "t" => {
                let team = parse_team(payload, line)?;
                if team_index.insert(team.id, teams.len()).is_some() {
                    return Err(ConvertError::DuplicateTeam(team.id.to_string()));
                }
                teams.push(team);
            }
            "s" => {
                let id = submissions.len();
                submissions.push(parse_submission(
                    payload,
                    line,
                    id,
                    &problem_index,
                    &team_index,
                )?);
            }
            // Section counts; the entity lines are authoritative.
            "problems" | "teams" | "submissions" => {}
            _ => {}
        }
    }

    debug!(
        "testsys: {} teams, {} problems, {} submissions",
        teams.len(),
        problems.len(),
        submissions.len()
    );
    Contest::new(name, duration, problems, teams, submissions)
}

/// Extracts the span between the first and last double quote; quoted names
/// may contain commas.
fn quoted<'a>(payload: &'a str, line: &str) -> Result<&'a str, ConvertError> {
    let first = payload.find('"');
    let last = payload.rfind('"');
    match (first, last) {
        (Some(first), Some(last)) if first < last => Ok(&payload[first + 1..last]),
        _ => Err(ConvertError::BadDirective(line.to_string())),
    }
}

fn parse_problem(payload: &str, line: &str) -> Result<Problem, ConvertError> {
    let mut chars = payload.chars();
    let letter = chars
        .next()
        .ok_or_else(|| ConvertError::BadDirective(line.to_string()))?;
    if chars.next() != Some(',') {
        return Err(ConvertError::BadDirective(line.to_string()));
    }
    let rest = chars.as_str();
    let name = rest
        .split(',')
        .next()
        .ok_or_else(|| ConvertError::BadDirective(line.to_string()))?;
    Ok(Problem {
        letter,
        name: name.to_string(),
    })
}

fn parse_team(payload: &str, line: &str) -> Result<Team, ConvertError> {
    let id_text = payload
        .split(',')
        .next()
        .ok_or_else(|| ConvertError::BadDirective(line.to_string()))?;
    Ok(Team {
        id: parse_number("team id", id_text)?,
        name: quoted(payload, line)?.to_string(),
    })
}

fn parse_submission(
    payload: &str,
    line: &str,
    id: usize,
    problem_index: &HashMap<char, usize>,
    team_index: &HashMap<usize, usize>,
) -> Result<Submission, ConvertError> {
    let fields: Vec<&str> = payload.split(',').collect();
    if fields.len() != 5 {
        return Err(ConvertError::BadDirective(line.to_string()));
    }
    let team_id: usize = parse_number("submission team id", fields[0])?;
    let letter = fields[1]
        .trim()
        .chars()
        .next()
        .ok_or_else(|| ConvertError::BadDirective(line.to_string()))?;
    let team = *team_index
        .get(&team_id)
        .ok_or_else(|| ConvertError::UnknownTeam(team_id.to_string()))?;
    let problem = *problem_index
        .get(&letter)
        .ok_or_else(|| ConvertError::UnknownProblem(letter.to_string()))?;
    Ok(Submission {
        id,
        team,
        problem,
        attempt: parse_number("submission attempt", fields[2])?,
        time: parse_number("submission time", fields[3])?,
        verdict: Verdict::decode(VerdictFormat::Testsys, fields[4].trim())?,
    })
}
