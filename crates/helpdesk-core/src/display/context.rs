//! Display implementations for context snapshots.

use std::fmt;

use crate::models::{InteractionContext, KnowledgeContext, SessionTaskContext};

impl fmt::Display for KnowledgeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.has_matches {
            return writeln!(f, "No matching problems in the knowledge base.");
        }

        writeln!(f, "### Matching problems")?;
        writeln!(f)?;
        for problem in &self.problems {
            writeln!(f, "- {problem}")?;
        }

        if !self.top_solutions.is_empty() {
            writeln!(f)?;
            writeln!(f, "### Top solutions")?;
            writeln!(f)?;
            for solution in &self.top_solutions {
                writeln!(f, "- {solution}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for SessionTaskContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(plan) = self.plan.as_ref().filter(|_| self.has_active_plan) else {
            return writeln!(f, "No active plan.");
        };

        writeln!(f, "Active plan {}: **{}**", plan.id, plan.title)?;
        if let Some(progress) = &self.progress {
            writeln!(f, "- Progress: {progress}")?;
        }
        if let Some(step) = &self.current_step {
            writeln!(f, "- Current step {}: {}", step.order, step.title)?;
            writeln!(f)?;
            writeln!(f, "{}", step.description)?;
        }
        Ok(())
    }
}

impl fmt::Display for InteractionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Knowledge base")?;
        writeln!(f)?;
        write!(f, "{}", self.knowledge)?;
        writeln!(f)?;

        writeln!(f, "## Suggested template")?;
        writeln!(f)?;
        match &self.suggested_template {
            Some(detected) => writeln!(
                f,
                "{}. **{}** (score {}, {} steps)",
                detected.template.id,
                detected.template.name,
                detected.match_score,
                detected.template.steps.len()
            )?,
            None => writeln!(f, "None.")?,
        }
        writeln!(f)?;

        writeln!(f, "## Task")?;
        writeln!(f)?;
        write!(f, "{}", self.tasks)
    }
}
