//! Reusable task templates and template detection.

use log::debug;

use crate::{
    catalog::Catalog,
    models::{Template, TemplateMatch},
    scoring,
};

struct TemplateRecord {
    template: Template,
    name_lower: String,
    keywords_lower: Vec<String>,
}

/// The immutable set of task templates.
pub struct TaskCatalog {
    templates: Vec<TemplateRecord>,
}

impl TaskCatalog {
    /// Numbers the catalog's templates in document order starting at 1.
    pub fn new(catalog: &Catalog) -> Self {
        let templates = catalog
            .templates
            .iter()
            .enumerate()
            .map(|(slot, entry)| TemplateRecord {
                name_lower: entry.name.to_lowercase(),
                keywords_lower: entry.keywords.iter().map(|k| k.to_lowercase()).collect(),
                template: Template {
                    id: slot as u64 + 1,
                    name: entry.name.clone(),
                    description: entry.description.clone(),
                    category: entry.category.clone(),
                    keywords: entry.keywords.clone(),
                    steps: entry.steps.clone(),
                },
            })
            .collect();

        Self { templates }
    }

    /// Number of templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// True when the catalog holds no templates.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Picks the template that best fits a free-text message.
    ///
    /// Only a strictly higher score replaces the current best, so on ties the
    /// template listed first wins. Nothing is returned below
    /// [`scoring::TEMPLATE_MIN_SCORE`].
    pub fn detect_template(&self, message: &str) -> Option<TemplateMatch> {
        let message = message.to_lowercase();

        let mut best: Option<(&TemplateRecord, u32)> = None;
        for record in &self.templates {
            let score =
                scoring::template_score(&message, &record.name_lower, &record.keywords_lower);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((record, score));
            }
        }

        let (record, score) = best.filter(|&(_, score)| score >= scoring::TEMPLATE_MIN_SCORE)?;
        debug!(
            "Detected template {} ({}) with score {score}",
            record.template.id, record.template.name
        );
        Some(TemplateMatch {
            template: record.template.clone(),
            match_score: score,
        })
    }

    /// Templates, optionally restricted to one category (case-insensitive).
    /// A blank category lists everything.
    pub fn list_templates(&self, category: Option<&str>) -> Vec<Template> {
        let category = scoring::category_filter(category);
        self.templates
            .iter()
            .filter(|record| {
                category
                    .as_deref()
                    .is_none_or(|c| record.template.category.to_lowercase() == c)
            })
            .map(|record| record.template.clone())
            .collect()
    }

    /// Looks up a template by id.
    pub fn get_template(&self, template_id: u64) -> Option<Template> {
        let slot = usize::try_from(template_id).ok()?.checked_sub(1)?;
        self.templates.get(slot).map(|record| record.template.clone())
    }
}
