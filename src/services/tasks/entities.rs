//! Named-entity extraction

use super::{join_partials, Combine, TaskStrategy};

/// Persons, organizations, places and dates as `- Name (Type)` bullets.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntitiesStrategy;

impl TaskStrategy for EntitiesStrategy {
    fn name(&self) -> &'static str {
        "entities"
    }

    fn segment_instruction(&self, segment: &str) -> String {
        format!(
            "Extract the named entities (Persons, Organizations, Places, Dates) from the following text. \
             Return the result in Markdown with bullets ' - Name (Type)'.\n\n\
             Text:\n{}\n\nEntities:",
            segment
        )
    }

    fn combine_instruction(&self, partials: &[String]) -> Combine {
        Combine::Synthesize(format!(
            "Combine and deduplicate the following partial entity lists and group them by type. \
             Return the result in Markdown with bullets.\n\n\
             Partial lists:\n{}\n\nCombined entities:",
            join_partials(partials)
        ))
    }
}
