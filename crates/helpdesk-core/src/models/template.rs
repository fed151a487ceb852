//! Task template models.

use serde::{Deserialize, Serialize};

use super::StepBlueprint;

/// A reusable blueprint for a plan's step sequence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Template {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub category: String,
    pub keywords: Vec<String>,
    pub steps: Vec<StepBlueprint>,
}

/// The template detected for a message, with the score that selected it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemplateMatch {
    #[serde(flatten)]
    pub template: Template,
    pub match_score: u32,
}
