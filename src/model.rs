use crate::error::ConvertError;
use crate::verdict::Verdict;

/// One contest problem. The letter is the short identifier ('A', 'B', ...);
/// parsers that only get a positional index derive dense letters from 'A'.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub letter: char,
    pub name: String,
}

/// One participating team. `id` is the identifier renderers emit; parsers
/// that remap external identifiers assign dense ids from 0 in first-seen
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub id: usize,
    pub name: String,
}

/// One judged run. `team` and `problem` index into the owning contest's
/// team and problem lists; `attempt` counts this team's submissions to this
/// problem chronologically, the current one included; `time` is seconds
/// since contest start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub id: usize,
    pub team: usize,
    pub problem: usize,
    pub attempt: u32,
    pub time: u64,
    pub verdict: Verdict,
}

/// Canonical aggregate every parser produces and every renderer consumes.
/// Constructed exactly once per parse and immutable thereafter; submissions
/// are stored sorted by (time ascending, id ascending).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contest {
    name: String,
    duration: u64,
    problems: Vec<Problem>,
    teams: Vec<Team>,
    submissions: Vec<Submission>,
}

impl Contest {
    /// Builds a contest, rejecting any submission whose team or problem
    /// index falls outside the given lists.
    pub fn new(
        name: String,
        duration: u64,
        problems: Vec<Problem>,
        teams: Vec<Team>,
        mut submissions: Vec<Submission>,
    ) -> Result<Contest, ConvertError> {
        for submission in &submissions {
            if submission.team >= teams.len() || submission.problem >= problems.len() {
                return Err(ConvertError::DanglingReference(submission.id));
            }
        }
        submissions.sort_by_key(|s| (s.time, s.id));
        Ok(Contest {
            name,
            duration,
            problems,
            teams,
            submissions,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contest length in minutes.
    pub fn duration(&self) -> u64 {
        self.duration
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem() -> Problem {
        Problem {
            letter: 'A',
            name: "Sum".into(),
        }
    }

    fn team() -> Team {
        Team {
            id: 0,
            name: "Alice".into(),
        }
    }

    fn submission(id: usize, team: usize, problem: usize, time: u64) -> Submission {
        Submission {
            id,
            team,
            problem,
            attempt: 1,
            time,
            verdict: Verdict::Accepted,
        }
    }

    #[test]
    fn rejects_dangling_team_reference() {
        let result = Contest::new(
            "c".into(),
            60,
            vec![problem()],
            vec![team()],
            vec![submission(0, 1, 0, 10)],
        );
        assert!(matches!(result, Err(ConvertError::DanglingReference(0))));
    }

    #[test]
    fn rejects_dangling_problem_reference() {
        let result = Contest::new(
            "c".into(),
            60,
            vec![problem()],
            vec![team()],
            vec![submission(0, 0, 1, 10)],
        );
        assert!(matches!(result, Err(ConvertError::DanglingReference(0))));
    }

    #[test]
    fn sorts_submissions_by_time_then_id() {
        let contest = Contest::new(
            "c".into(),
            60,
            vec![problem()],
            vec![team()],
            vec![
                submission(2, 0, 0, 50),
                submission(1, 0, 0, 10),
                submission(0, 0, 0, 50),
            ],
        )
        .unwrap();
        let order: Vec<usize> = contest.submissions().iter().map(|s| s.id).collect();
        assert_eq!(order, vec![1, 0, 2]);
    }
}
