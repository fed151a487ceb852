//! Knowledge base models: problems, their solutions and outcome feedback.

use serde::{Deserialize, Serialize};

/// A catalogued troubleshooting scenario.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Problem {
    pub id: u64,
    /// Free-text tag such as "Printer" or "Network"
    pub category: String,
    pub title: String,
    pub description: String,
    /// Ordered keywords used by relevance scoring
    pub keywords: Vec<String>,
    /// Solutions with their feedback counters as of the snapshot
    #[serde(default)]
    pub solutions: Vec<Solution>,
}

/// A named, ordered instruction sequence addressing a problem.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Solution {
    pub id: u64,
    pub problem_id: u64,
    pub title: String,
    /// Instructions, in the order the user should follow them
    pub steps: Vec<String>,
    #[serde(default)]
    pub success_count: u64,
    #[serde(default)]
    pub failure_count: u64,
}

impl Solution {
    /// Total number of feedback reports.
    pub fn uses(&self) -> u64 {
        self.success_count + self.failure_count
    }

    /// `success / (success + failure)`, 0 when nobody reported back yet.
    pub fn success_rate(&self) -> f64 {
        FeedbackTally {
            success_count: self.success_count,
            failure_count: self.failure_count,
        }
        .success_rate()
    }
}

/// Running success/failure counters of one solution.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedbackTally {
    pub success_count: u64,
    pub failure_count: u64,
}

impl FeedbackTally {
    /// Count one more outcome. Counters only ever grow.
    pub fn record(&mut self, success: bool) {
        if success {
            self.success_count += 1;
        } else {
            self.failure_count += 1;
        }
    }

    pub fn success_rate(&self) -> f64 {
        let total = self.success_count + self.failure_count;
        if total == 0 {
            0.0
        } else {
            self.success_count as f64 / total as f64
        }
    }
}

/// Persisted feedback counters, keyed by solution.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedbackRecord {
    pub solution_id: u64,
    pub success_count: u64,
    pub failure_count: u64,
}

/// A search hit: a problem and its relevance score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredProblem {
    #[serde(flatten)]
    pub problem: Problem,
    pub match_score: u32,
}

/// A solution annotated with its parent problem, as handed to callers that
/// rank solutions across problems.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedSolution {
    #[serde(flatten)]
    pub solution: Solution,
    pub success_rate: f64,
    pub problem_title: String,
    pub problem_category: String,
}

impl RankedSolution {
    pub fn new(solution: Solution, problem: &Problem) -> Self {
        Self {
            success_rate: solution.success_rate(),
            solution,
            problem_title: problem.title.clone(),
            problem_category: problem.category.clone(),
        }
    }
}
