//! Collection wrapper types for displaying lists of domain objects.
//!
//! Each wrapper prints one markdown list item per element and a fixed
//! message when the list is empty.

use std::{fmt, ops::Index};

use crate::models::{Plan, RankedSolution, ScoredProblem, Template};

macro_rules! list_wrapper {
    ($(#[$meta:meta])* $name:ident, $item:ty) => {
        $(#[$meta])*
        pub struct $name(pub Vec<$item>);

        impl $name {
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn get(&self, index: usize) -> Option<&$item> {
                self.0.get(index)
            }

            pub fn iter(&self) -> std::slice::Iter<'_, $item> {
                self.0.iter()
            }
        }

        impl Index<usize> for $name {
            type Output = $item;

            fn index(&self, index: usize) -> &Self::Output {
                &self.0[index]
            }
        }

        impl IntoIterator for $name {
            type Item = $item;
            type IntoIter = std::vec::IntoIter<Self::Item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }

        impl From<Vec<$item>> for $name {
            fn from(items: Vec<$item>) -> Self {
                Self(items)
            }
        }
    };
}

list_wrapper!(
    /// A session's plans, one summary line each.
    ///
    /// ```rust
    /// use helpdesk_core::display::Plans;
    ///
    /// assert_eq!(Plans(vec![]).to_string(), "No plans found.\n");
    /// ```
    Plans,
    Plan
);

list_wrapper!(
    /// Knowledge base search hits, best first.
    SearchResults,
    ScoredProblem
);

list_wrapper!(
    /// Solutions with a proven track record.
    QuickSolutionList,
    RankedSolution
);

list_wrapper!(
    /// Task templates, one line each.
    Templates,
    Template
);

list_wrapper!(
    /// Distinct problem categories.
    Categories,
    String
);

impl fmt::Display for Plans {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No plans found.");
        }
        for plan in self.iter() {
            let progress = plan.progress();
            writeln!(
                f,
                "- **{}. {}** ({}, {}/{} steps)",
                plan.id, plan.title, plan.status, progress.completed, progress.total
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for SearchResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No matching problems found.");
        }
        for hit in self.iter() {
            writeln!(f, "- {hit}")?;
        }
        Ok(())
    }
}

impl fmt::Display for QuickSolutionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No solutions meet the threshold yet.");
        }
        for solution in self.iter() {
            writeln!(f, "- {solution}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Templates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No templates found.");
        }
        for template in self.iter() {
            writeln!(
                f,
                "- **{}. {}** [{}] ({} steps): {}",
                template.id,
                template.name,
                template.category,
                template.steps.len(),
                template.description
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for Categories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No categories found.");
        }
        for category in self.iter() {
            writeln!(f, "- {category}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Problem, Solution};

    fn problem(id: u64, title: &str) -> Problem {
        Problem {
            id,
            category: "Printer".to_string(),
            title: title.to_string(),
            description: String::new(),
            keywords: vec![],
            solutions: vec![],
        }
    }

    #[test]
    fn test_empty_collections() {
        assert_eq!(SearchResults(vec![]).to_string(), "No matching problems found.\n");
        assert_eq!(Templates(vec![]).to_string(), "No templates found.\n");
        assert!(QuickSolutionList(vec![]).is_empty());
    }

    #[test]
    fn test_search_results_keep_order() {
        let results = SearchResults(vec![
            ScoredProblem {
                problem: problem(1, "Printer Offline"),
                match_score: 7,
            },
            ScoredProblem {
                problem: problem(2, "Paper Jam"),
                match_score: 2,
            },
        ]);

        let output = results.to_string();
        let first = output.find("Printer Offline").unwrap();
        let second = output.find("Paper Jam").unwrap();
        assert!(first < second);
        assert!(output.contains("(score 7, 0 solutions)"));
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].match_score, 2);
    }

    #[test]
    fn test_ranked_solution_line() {
        let owner = problem(1, "Printer Offline");
        let solution = Solution {
            id: 4,
            problem_id: 1,
            title: "Restart spooler".to_string(),
            steps: vec![],
            success_count: 9,
            failure_count: 1,
        };
        let list = QuickSolutionList(vec![RankedSolution::new(solution, &owner)]);

        let output = list.to_string();
        assert!(output.contains("**Restart spooler** for Printer Offline [Printer]"));
        assert!(output.contains("(90% of 10 reports)"));
    }

    #[test]
    fn test_categories() {
        let categories = Categories::from(vec!["Network".to_string(), "Printer".to_string()]);
        assert_eq!(categories.to_string(), "- Network\n- Printer\n");
    }
}
