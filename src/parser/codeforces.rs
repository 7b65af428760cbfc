use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use lazy_static::lazy_static;
use log::{debug, info};
use rand::Rng;
use regex::Regex;
use serde::Deserialize;
use sha2::{Digest, Sha512};

use crate::attempt::AttemptCounter;
use crate::error::ConvertError;
use crate::model::{Contest, Problem, Submission, Team};
use crate::parser::Parse;
use crate::verdict::{Verdict, VerdictFormat};

const API_URL: &str = "https://codeforces.com/api";

/// Parses a contest through the Codeforces API. The input file holds
/// `key = value` properties: `contestId` (required) plus an optional
/// `key`/`secret` pair for signed requests. Two sequential calls are made:
/// `contest.standings` for the contest, problems and participants, then
/// `contest.status` for the submission stream.
pub struct CodeforcesParser;

/// The remote collaborator. Split out so the parsing core can be driven
/// from canned payloads in tests.
pub trait CodeforcesApi {
    fn call(&self, method: &str, parameters: &BTreeMap<String, String>)
        -> Result<String, ConvertError>;
}

pub struct HttpCodeforcesApi {
    client: reqwest::blocking::Client,
    credentials: Option<(String, String)>,
}

impl HttpCodeforcesApi {
    pub fn new(credentials: Option<(String, String)>) -> HttpCodeforcesApi {
        HttpCodeforcesApi {
            client: reqwest::blocking::Client::new(),
            credentials,
        }
    }
}

impl CodeforcesApi for HttpCodeforcesApi {
    fn call(
        &self,
        method: &str,
        parameters: &BTreeMap<String, String>,
    ) -> Result<String, ConvertError> {
        let mut parameters = parameters.clone();
        if let Some((key, _)) = &self.credentials {
            parameters.insert("apiKey".to_string(), key.clone());
            let now = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0);
            parameters.insert("time".to_string(), now.to_string());
        }
        // Parameters must stay sorted for the signature to verify.
        let query: Vec<String> = parameters
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        let mut method_with_params = format!("{}?{}", method, query.join("&"));
        if let Some((_, secret)) = &self.credentials {
            let nonce = format!("{:06x}", rand::thread_rng().gen_range(0..1 << 24));
            let digest = Sha512::digest(
                format!("{}/{}#{}", nonce, method_with_params, secret).as_bytes(),
            );
            let mut signature = nonce;
            for byte in digest {
                signature.push_str(&format!("{:02x}", byte));
            }
            method_with_params.push_str(&format!("&apiSig={}", signature));
        }
        let url = format!("{}/{}", API_URL, method_with_params);
        info!("fetching {}", method);
        Ok(self.client.get(&url).send()?.text()?)
    }
}

#[derive(Deserialize, Debug)]
struct ApiResponse<T> {
    status: String,
    comment: Option<String>,
    result: Option<T>,
}

#[derive(Deserialize, Debug)]
struct Standings {
    contest: ApiContest,
    problems: Vec<ApiProblem>,
    rows: Vec<ApiRow>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ApiContest {
    name: String,
    duration_seconds: i64,
}

#[derive(Deserialize, Debug)]
struct ApiProblem {
    index: String,
    name: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ApiRow {
    party: ApiParty,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ApiParty {
    participant_type: String,
    #[serde(default)]
    ghost: bool,
    team_name: Option<String>,
    members: Vec<ApiMember>,
}

#[derive(Deserialize, Debug)]
struct ApiMember {
    handle: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ApiSubmission {
    author: ApiParty,
    problem: ApiProblem,
    relative_time_seconds: i64,
    verdict: Option<String>,
}

impl Parse for CodeforcesParser {
    fn parse(&self, input: &Path) -> Result<Contest, ConvertError> {
        let properties = parse_properties(&fs::read_to_string(input)?)?;
        let contest_id = properties
            .get("contestId")
            .ok_or(ConvertError::MissingField("contestId"))?
            .clone();
        let credentials = match (properties.get("key"), properties.get("secret")) {
            (Some(key), Some(secret)) => Some((key.clone(), secret.clone())),
            (None, None) => None,
            _ => return Err(ConvertError::MissingField("key/secret pair")),
        };
        let api = HttpCodeforcesApi::new(credentials);
        parse_remote(&api, &contest_id)
    }
}

pub fn parse_remote(api: &dyn CodeforcesApi, contest_id: &str) -> Result<Contest, ConvertError> {
    let mut standings_parameters = BTreeMap::new();
    standings_parameters.insert("contestId".to_string(), contest_id.to_string());
    standings_parameters.insert("showUnofficial".to_string(), "true".to_string());
    let standings = api.call("contest.standings", &standings_parameters)?;

    let mut status_parameters = BTreeMap::new();
    status_parameters.insert("contestId".to_string(), contest_id.to_string());
    let status = api.call("contest.status", &status_parameters)?;

    parse_payloads(&standings, &status)
}

/// Pure parsing core over the two raw API payloads.
pub fn parse_payloads(standings_json: &str, status_json: &str) -> Result<Contest, ConvertError> {
    let standings: Standings = into_result(serde_json::from_str(standings_json)?)?;
    let duration_seconds = standings.contest.duration_seconds;

    let mut problems = Vec::with_capacity(standings.problems.len());
    let mut problem_index: HashMap<char, usize> = HashMap::new();
    for problem in standings.problems {
        let letter = index_letter(&problem)?;
        if problem_index.insert(letter, problems.len()).is_some() {
            return Err(ConvertError::DuplicateProblem(problem.index));
        }
        problems.push(Problem {
            letter,
            name: problem.name.unwrap_or_default(),
        });
    }

    let mut teams = Vec::new();
    let mut team_index: HashMap<String, usize> = HashMap::new();
    for row in standings.rows {
        if !is_official(&row.party) {
            continue;
        }
        let identity = team_identity(&row.party);
        if team_index.insert(identity.clone(), teams.len()).is_some() {
            return Err(ConvertError::DuplicateTeam(identity));
        }
        teams.push(Team {
            id: teams.len(),
            name: identity,
        });
    }

    let runs: Vec<ApiSubmission> = into_result(serde_json::from_str(status_json)?)?;
    let mut attempts = AttemptCounter::new();
    let mut submissions = Vec::new();
    // The status call is reverse-chronological; attempts count forward.
    for run in runs.into_iter().rev() {
        if !is_official(&run.author) {
            continue;
        }
        let letter = index_letter(&run.problem)?;
        let problem = *problem_index
            .get(&letter)
            .ok_or_else(|| ConvertError::UnknownProblem(letter.to_string()))?;
        let identity = team_identity(&run.author);
        let team = *team_index
            .get(&identity)
            .ok_or(ConvertError::UnknownTeam(identity))?;
        let time = run.relative_time_seconds;
        if time < 0 || time > duration_seconds {
            return Err(ConvertError::TimeOutOfRange {
                time,
                duration_seconds,
            });
        }
        let code = run.verdict.ok_or(ConvertError::MissingField("verdict"))?;
        let attempt = attempts.next(team, problem);
        submissions.push(Submission {
            id: submissions.len(),
            team,
            problem,
            attempt,
            time: time as u64,
            verdict: Verdict::decode(VerdictFormat::Codeforces, &code)?,
        });
    }

    debug!(
        "codeforces: {} teams, {} problems, {} submissions",
        teams.len(),
        problems.len(),
        submissions.len()
    );
    Contest::new(
        standings.contest.name,
        duration_seconds.max(0) as u64 / 60,
        problems,
        teams,
        submissions,
    )
}

fn into_result<T>(response: ApiResponse<T>) -> Result<T, ConvertError> {
    if response.status != "OK" {
        let mut status = response.status;
        if let Some(comment) = response.comment {
            status = format!("{}: {}", status, comment);
        }
        return Err(ConvertError::ApiStatus(status));
    }
    response.result.ok_or(ConvertError::MissingField("result"))
}

fn index_letter(problem: &ApiProblem) -> Result<char, ConvertError> {
    problem
        .index
        .chars()
        .next()
        .ok_or(ConvertError::MissingField("problem index"))
}

fn is_official(party: &ApiParty) -> bool {
    party.participant_type == "CONTESTANT"
        || (party.participant_type == "VIRTUAL" && party.ghost)
}

/// A party's deduplication key and display name: `"teamname: h1, h2"`, or
/// just the handle list when the party has no team name.
fn team_identity(party: &ApiParty) -> String {
    let handles: Vec<&str> = party.members.iter().map(|m| m.handle.as_str()).collect();
    match &party.team_name {
        Some(team_name) => format!("{}: {}", team_name, handles.join(", ")),
        None => handles.join(", "),
    }
}

fn parse_properties(text: &str) -> Result<HashMap<String, String>, ConvertError> {
    lazy_static! {
        static ref PROPERTY_REGEX: Regex =
            Regex::new(r"^\s*([^=:\s#][^=:]*?)\s*[=:]\s*(.*?)\s*$").unwrap();
    }
    let mut properties = HashMap::new();
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let captures = PROPERTY_REGEX
            .captures(line)
            .ok_or_else(|| ConvertError::BadDirective(line.to_string()))?;
        properties.insert(captures[1].to_string(), captures[2].to_string());
    }
    Ok(properties)
}
