//! Knowledge base of troubleshooting problems and their solutions.
//!
//! The [`KnowledgeStore`] answers relevance queries over a fixed catalog and
//! keeps a running success/failure tally per solution. Catalog text never
//! changes after construction and is read without locking; each solution slot
//! owns its own mutex so concurrent feedback on one solution never loses an
//! increment while feedback on different solutions never contends.
//!
//! Solutions live in an arena indexed by id: solution `n` is slot `n - 1`.
//! Problems are laid out the same way and own a contiguous range of solution
//! slots.
//!
//! ```rust
//! use helpdesk_core::{Catalog, KnowledgeStore};
//!
//! let store = KnowledgeStore::new(&Catalog::builtin().unwrap());
//! let hits = store.search("printer", None);
//! assert_eq!(hits[0].problem.category, "Printer");
//! ```

use std::{
    ops::Range,
    sync::{Mutex, PoisonError},
};

use log::debug;

use crate::{
    catalog::Catalog,
    error::{HelpdeskError, Result},
    models::{
        FeedbackRecord, FeedbackTally, KnowledgeContext, Problem, RankedSolution, ScoredProblem,
        Solution,
    },
    scoring,
};


/// Number of problems kept by [`KnowledgeStore::context_for_query`].
pub const CONTEXT_PROBLEMS: usize = 3;
/// Number of solutions kept by [`KnowledgeStore::context_for_query`].
pub const CONTEXT_SOLUTIONS: usize = 5;
/// Default minimum success rate for [`KnowledgeStore::quick_solutions`].
pub const QUICK_MIN_SUCCESS_RATE: f64 = 0.7;
/// Default minimum number of feedback reports for
/// [`KnowledgeStore::quick_solutions`].
pub const QUICK_MIN_USES: u64 = 3;

struct ProblemRecord {
    id: u64,
    category: String,
    title: String,
    description: String,
    keywords: Vec<String>,
    title_lower: String,
    description_lower: String,
    keywords_lower: Vec<String>,
    solutions: Range<usize>,
}

struct SolutionRecord {
    id: u64,
    problem_slot: usize,
    title: String,
    steps: Vec<String>,
    tally: Mutex<FeedbackTally>,
}

impl SolutionRecord {
    fn tally(&self) -> FeedbackTally {
        *self.tally.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn snapshot(&self, problem_id: u64) -> Solution {
        let tally = self.tally();
        Solution {
            id: self.id,
            problem_id,
            title: self.title.clone(),
            steps: self.steps.clone(),
            success_count: tally.success_count,
            failure_count: tally.failure_count,
        }
    }
}

/// Problems, solutions and their feedback counters.
pub struct KnowledgeStore {
    problems: Vec<ProblemRecord>,
    solutions: Vec<SolutionRecord>,
}

/// Maps a 1-based id onto its arena slot.
fn slot_of(id: u64) -> Option<usize> {
    usize::try_from(id).ok()?.checked_sub(1)
}

impl KnowledgeStore {
    /// Builds the store from a catalog, numbering problems and solutions in
    /// document order starting at 1. All counters start at zero.
    pub fn new(catalog: &Catalog) -> Self {
        let mut problems = Vec::with_capacity(catalog.problems.len());
        let mut solutions = Vec::new();

        for (problem_slot, entry) in catalog.problems.iter().enumerate() {
            let first = solutions.len();
            for solution in &entry.solutions {
                solutions.push(SolutionRecord {
                    id: solutions.len() as u64 + 1,
                    problem_slot,
                    title: solution.title.clone(),
                    steps: solution.steps.clone(),
                    tally: Mutex::new(FeedbackTally::default()),
                });
            }

            problems.push(ProblemRecord {
                id: problem_slot as u64 + 1,
                category: entry.category.clone(),
                title: entry.title.clone(),
                description: entry.description.clone(),
                keywords: entry.keywords.clone(),
                title_lower: entry.title.to_lowercase(),
                description_lower: entry.description.to_lowercase(),
                keywords_lower: entry.keywords.iter().map(|k| k.to_lowercase()).collect(),
                solutions: first..solutions.len(),
            });
        }

        Self {
            problems,
            solutions,
        }
    }

    /// Number of catalogued problems.
    pub fn problem_count(&self) -> usize {
        self.problems.len()
    }

    /// Number of catalogued solutions.
    pub fn solution_count(&self) -> usize {
        self.solutions.len()
    }

    /// Overwrites counters with persisted values. Records for unknown
    /// solutions are ignored. Returns how many records were applied.
    pub fn seed_feedback(&self, records: &[FeedbackRecord]) -> usize {
        let mut applied = 0;
        for record in records {
            match self.solution_record(record.solution_id) {
                Some(solution) => {
                    let mut tally = solution.tally.lock().unwrap_or_else(PoisonError::into_inner);
                    tally.success_count = record.success_count;
                    tally.failure_count = record.failure_count;
                    applied += 1;
                }
                None => debug!(
                    "Ignoring feedback for unknown solution {}",
                    record.solution_id
                ),
            }
        }
        applied
    }

    fn solution_record(&self, id: u64) -> Option<&SolutionRecord> {
        self.solutions.get(slot_of(id)?)
    }

    fn problem_snapshot(&self, problem: &ProblemRecord) -> Problem {
        Problem {
            id: problem.id,
            category: problem.category.clone(),
            title: problem.title.clone(),
            description: problem.description.clone(),
            keywords: problem.keywords.clone(),
            solutions: self.solutions[problem.solutions.clone()]
                .iter()
                .map(|solution| solution.snapshot(problem.id))
                .collect(),
        }
    }

    /// Ranks problems by relevance to `query`.
    ///
    /// Problems outside `category` (compared case-insensitively; a blank
    /// category filters nothing) and problems scoring zero are left out.
    /// Equal scores keep catalog order.
    pub fn search(&self, query: &str, category: Option<&str>) -> Vec<ScoredProblem> {
        let query = query.to_lowercase();
        let category = scoring::category_filter(category);

        let mut results: Vec<ScoredProblem> = self
            .problems
            .iter()
            .filter(|problem| {
                category
                    .as_deref()
                    .is_none_or(|c| problem.category.to_lowercase() == c)
            })
            .filter_map(|problem| {
                let score = scoring::problem_score(
                    &query,
                    &problem.title_lower,
                    &problem.description_lower,
                    &problem.keywords_lower,
                );
                (score > 0).then(|| ScoredProblem {
                    problem: self.problem_snapshot(problem),
                    match_score: score,
                })
            })
            .collect();

        // sort_by is stable: ties stay in catalog order
        results.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        results
    }

    /// Knowledge context for an inbound message.
    ///
    /// Takes the best [`CONTEXT_PROBLEMS`] problems, pools their solutions and
    /// keeps the [`CONTEXT_SOLUTIONS`] with the highest success rate, so a
    /// well-rated solution of a lower-ranked problem can outrank the
    /// solutions of the best match.
    pub fn context_for_query(&self, query: &str) -> KnowledgeContext {
        let mut problems = self.search(query, None);
        if problems.is_empty() {
            return KnowledgeContext::default();
        }
        problems.truncate(CONTEXT_PROBLEMS);

        let mut top_solutions: Vec<RankedSolution> = problems
            .iter()
            .flat_map(|scored| {
                scored
                    .problem
                    .solutions
                    .iter()
                    .map(move |solution| RankedSolution::new(solution.clone(), &scored.problem))
            })
            .collect();
        sort_by_success_rate(&mut top_solutions);
        top_solutions.truncate(CONTEXT_SOLUTIONS);

        KnowledgeContext {
            has_matches: true,
            problems,
            top_solutions,
        }
    }

    /// Counts one outcome report for a solution and returns the updated
    /// solution.
    pub fn record_feedback(&self, solution_id: u64, success: bool) -> Result<Solution> {
        let solution = self
            .solution_record(solution_id)
            .ok_or(HelpdeskError::SolutionNotFound { id: solution_id })?;

        solution
            .tally
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .record(success);

        let problem_id = self.problems[solution.problem_slot].id;
        debug!(
            "Recorded {} feedback for solution {solution_id}",
            if success { "success" } else { "failure" }
        );
        Ok(solution.snapshot(problem_id))
    }

    /// Solutions with at least `min_uses` reports and a success rate of at
    /// least `min_success_rate`, best first.
    pub fn quick_solutions(&self, min_success_rate: f64, min_uses: u64) -> Vec<RankedSolution> {
        let mut results: Vec<RankedSolution> = self
            .solutions
            .iter()
            .filter_map(|record| {
                let problem = &self.problems[record.problem_slot];
                let solution = record.snapshot(problem.id);
                (solution.uses() >= min_uses && solution.success_rate() >= min_success_rate)
                    .then(|| RankedSolution {
                        success_rate: solution.success_rate(),
                        problem_title: problem.title.clone(),
                        problem_category: problem.category.clone(),
                        solution,
                    })
            })
            .collect();

        sort_by_success_rate(&mut results);
        results
    }

    /// Looks up a problem with its solutions.
    pub fn get_problem(&self, problem_id: u64) -> Option<Problem> {
        let problem = self.problems.get(slot_of(problem_id)?)?;
        Some(self.problem_snapshot(problem))
    }

    /// Looks up a single solution.
    pub fn get_solution(&self, solution_id: u64) -> Option<Solution> {
        let solution = self.solution_record(solution_id)?;
        Some(solution.snapshot(self.problems[solution.problem_slot].id))
    }

    /// Distinct problem categories in catalog order.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for problem in &self.problems {
            if !categories.contains(&problem.category) {
                categories.push(problem.category.clone());
            }
        }
        categories
    }

    /// Current counters of every solution that received feedback.
    pub fn feedback(&self) -> Vec<FeedbackRecord> {
        self.solutions
            .iter()
            .filter_map(|solution| {
                let tally = solution.tally();
                (tally.success_count + tally.failure_count > 0).then_some(FeedbackRecord {
                    solution_id: solution.id,
                    success_count: tally.success_count,
                    failure_count: tally.failure_count,
                })
            })
            .collect()
    }
}

/// Stable sort, highest success rate first.
fn sort_by_success_rate(solutions: &mut [RankedSolution]) {
    solutions.sort_by(|a, b| b.success_rate.total_cmp(&a.success_rate));
}
