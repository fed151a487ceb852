//! Display implementations for domain models.
//!
//! Everything renders as markdown: a heading with the entity ID and title,
//! a metadata list, then nested sections.

use std::fmt;

use super::datetime::{Elapsed, LocalDateTime};
use crate::models::{
    Plan, PlanStatus, Problem, Progress, RankedSolution, ScoredProblem, Solution, Step,
    StepStatus, StepTransition, Template, TemplateMatch,
};

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} steps completed ({}%)",
            self.completed, self.total, self.percent
        )?;
        if self.skipped > 0 {
            write!(f, ", {} skipped", self.skipped)?;
        }
        if self.failed > 0 {
            write!(f, ", {} failed", self.failed)?;
        }
        Ok(())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.title)?;
        writeln!(f)?;

        writeln!(f, "- Status: {}", self.status)?;
        writeln!(f, "- Session: {}", self.session_id)?;
        if let Some(template_id) = self.template_id {
            writeln!(f, "- Template: {template_id}")?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        if let Some(started_at) = &self.started_at {
            writeln!(f, "- Started: {}", LocalDateTime(started_at))?;
        }
        if let Some(completed_at) = &self.completed_at {
            writeln!(f, "- Completed: {}", LocalDateTime(completed_at))?;
        }
        writeln!(f, "- Progress: {}", self.progress())?;

        if !self.description.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.description)?;
        }

        writeln!(f)?;
        writeln!(f, "## Steps")?;
        writeln!(f)?;

        if self.steps.is_empty() {
            writeln!(f, "No steps in this plan.")?;
        } else {
            for step in &self.steps {
                write!(f, "{step}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {}. {} ({})",
            self.order,
            self.title,
            self.status.with_icon()
        )?;
        writeln!(f)?;
        writeln!(f, "- Step ID: {}", self.id)?;
        match (&self.started_at, &self.completed_at) {
            (Some(from), Some(to)) => writeln!(f, "- Took: {}", Elapsed { from, to })?,
            (Some(from), None) => writeln!(f, "- Started: {}", LocalDateTime(from))?,
            _ => {}
        }
        if let Some(error) = &self.error_message {
            writeln!(f, "- Error: {error}")?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.description)?;
        writeln!(f)
    }
}

impl fmt::Display for StepTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Step {} of plan {} is now {}.",
            self.step.order, self.plan.id, self.step.status
        )?;
        if let Some(error) = &self.step.error_message {
            writeln!(f, "Error: {error}")?;
        }
        writeln!(f)?;

        match (&self.next_step, self.is_complete, self.plan.status) {
            (_, true, _) => writeln!(f, "All steps are done. The plan is completed.")?,
            (_, _, PlanStatus::Failed) => writeln!(f, "The plan has failed.")?,
            (Some(next), _, _) => {
                writeln!(f, "## Next step")?;
                writeln!(f)?;
                write!(f, "{next}")?;
            }
            (None, _, _) => {}
        }

        writeln!(f)?;
        writeln!(f, "Progress: {}", self.plan.progress())
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {}. {}", self.id, self.title)?;
        writeln!(f)?;
        if self.uses() == 0 {
            writeln!(f, "- Success rate: no feedback yet")?;
        } else {
            writeln!(
                f,
                "- Success rate: {:.0}% ({} worked, {} did not)",
                self.success_rate() * 100.0,
                self.success_count,
                self.failure_count
            )?;
        }
        writeln!(f)?;
        for (i, step) in self.steps.iter().enumerate() {
            writeln!(f, "{}. {step}", i + 1)?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.title)?;
        writeln!(f)?;
        writeln!(f, "- Category: {}", self.category)?;
        writeln!(f, "- Keywords: {}", self.keywords.join(", "))?;
        writeln!(f)?;
        writeln!(f, "{}", self.description)?;
        writeln!(f)?;
        writeln!(f, "## Solutions")?;
        writeln!(f)?;

        if self.solutions.is_empty() {
            writeln!(f, "No solutions recorded for this problem.")?;
        }
        for solution in &self.solutions {
            write!(f, "{solution}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ScoredProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. **{}** [{}] (score {}, {} solutions)",
            self.problem.id,
            self.problem.title,
            self.problem.category,
            self.match_score,
            self.problem.solutions.len()
        )
    }
}

impl fmt::Display for RankedSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. **{}** for {} [{}] ({:.0}% of {} reports)",
            self.solution.id,
            self.solution.title,
            self.problem_title,
            self.problem_category,
            self.success_rate * 100.0,
            self.solution.uses()
        )
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;
        writeln!(f, "- Category: {}", self.category)?;
        writeln!(f, "- Keywords: {}", self.keywords.join(", "))?;
        writeln!(f)?;
        writeln!(f, "{}", self.description)?;
        writeln!(f)?;
        writeln!(f, "## Steps")?;
        writeln!(f)?;
        for (i, step) in self.steps.iter().enumerate() {
            writeln!(f, "{}. **{}**: {}", i + 1, step.title, step.description)?;
        }
        Ok(())
    }
}

impl fmt::Display for TemplateMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matched with score {}.", self.match_score)?;
        writeln!(f)?;
        write!(f, "{}", self.template)
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::StepBlueprint;

    fn step(order: u32, status: StepStatus) -> Step {
        Step {
            id: u64::from(order) + 10,
            plan_id: 1,
            order,
            title: format!("Step {order}"),
            description: format!("Do thing {order}"),
            status,
            error_message: None,
            started_at: None,
            completed_at: None,
        }
    }

    fn plan(steps: Vec<Step>) -> Plan {
        Plan {
            id: 1,
            session_id: "s-1".to_string(),
            title: "Fix Printer Offline".to_string(),
            description: "Printer shows as offline".to_string(),
            template_id: Some(1),
            status: PlanStatus::InProgress,
            steps,
            created_at: Timestamp::now(),
            started_at: Some(Timestamp::now()),
            completed_at: None,
            revision: 0,
        }
    }

    #[test]
    fn test_plan_display() {
        let plan = plan(vec![
            step(1, StepStatus::Completed),
            step(2, StepStatus::InProgress),
        ]);
        let output = plan.to_string();

        assert!(output.starts_with("# 1. Fix Printer Offline\n"));
        assert!(output.contains("- Status: in_progress"));
        assert!(output.contains("- Session: s-1"));
        assert!(output.contains("- Template: 1"));
        assert!(output.contains("- Progress: 1/2 steps completed (50%)"));
        assert!(output.contains("## Steps"));
        assert!(output.contains("### 1. Step 1 (✓ Completed)"));
        assert!(output.contains("### 2. Step 2 (➤ In Progress)"));
    }

    #[test]
    fn test_empty_plan_display() {
        let output = plan(vec![]).to_string();
        assert!(output.contains("No steps in this plan."));
        assert!(output.contains("0/0 steps completed (0%)"));
    }

    #[test]
    fn test_step_shows_error() {
        let mut failed = step(1, StepStatus::Failed);
        failed.error_message = Some("cable missing".to_string());

        let output = failed.to_string();
        assert!(output.contains("(✗ Failed)"));
        assert!(output.contains("- Error: cable missing"));
    }

    #[test]
    fn test_transition_display() {
        let mut plan = plan(vec![
            step(1, StepStatus::Completed),
            step(2, StepStatus::InProgress),
        ]);
        let transition = StepTransition {
            step: plan.steps[0].clone(),
            next_step: Some(plan.steps[1].clone()),
            is_complete: false,
            plan: plan.clone(),
        };
        let output = transition.to_string();
        assert!(output.contains("Step 1 of plan 1 is now completed."));
        assert!(output.contains("## Next step"));
        assert!(output.contains("### 2. Step 2"));

        plan.steps[1].status = StepStatus::Completed;
        plan.status = PlanStatus::Completed;
        let transition = StepTransition {
            step: plan.steps[1].clone(),
            next_step: None,
            is_complete: true,
            plan,
        };
        let output = transition.to_string();
        assert!(output.contains("The plan is completed."));
        assert!(output.contains("2/2 steps completed (100%)"));
    }

    #[test]
    fn test_solution_success_rate() {
        let mut solution = Solution {
            id: 1,
            problem_id: 1,
            title: "Restart the printer".to_string(),
            steps: vec!["Turn it off".to_string(), "Turn it on".to_string()],
            success_count: 0,
            failure_count: 0,
        };
        assert!(solution.to_string().contains("no feedback yet"));

        solution.success_count = 3;
        solution.failure_count = 1;
        let output = solution.to_string();
        assert!(output.contains("- Success rate: 75% (3 worked, 1 did not)"));
        assert!(output.contains("1. Turn it off\n2. Turn it on"));
    }

    #[test]
    fn test_template_display() {
        let template = Template {
            id: 2,
            name: "Clear Print Queue".to_string(),
            description: "Remove stuck jobs".to_string(),
            category: "Printer".to_string(),
            keywords: vec!["print".to_string(), "queue".to_string()],
            steps: vec![StepBlueprint::new("Open queue", "Open the print queue")],
        };
        let output = template.to_string();
        assert!(output.starts_with("# 2. Clear Print Queue"));
        assert!(output.contains("- Keywords: print, queue"));
        assert!(output.contains("1. **Open queue**: Open the print queue"));
    }
}
