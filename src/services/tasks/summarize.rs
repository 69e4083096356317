//! Summarize
//!
//! Five summary styles, each with its own per-segment template and its own
//! synthesis template.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Combine, TaskStrategy, CONCAT_DELIMITER};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryType {
    #[default]
    General,
    Bullets,
    Tldr,
    Business,
    Academic,
}

impl SummaryType {
    /// Parse a summary type; anything unrecognized is `General`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "bullets" => SummaryType::Bullets,
            "tldr" => SummaryType::Tldr,
            "business" => SummaryType::Business,
            "academic" => SummaryType::Academic,
            _ => SummaryType::General,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryType::General => "general",
            SummaryType::Bullets => "bullets",
            SummaryType::Tldr => "tldr",
            SummaryType::Business => "business",
            SummaryType::Academic => "academic",
        }
    }

    fn segment_template(&self) -> &'static str {
        match self {
            SummaryType::General => GENERAL,
            SummaryType::Bullets => BULLETS,
            SummaryType::Tldr => TLDR,
            SummaryType::Business => BUSINESS,
            SummaryType::Academic => ACADEMIC,
        }
    }

    fn synthesis_template(&self) -> &'static str {
        match self {
            SummaryType::General => {
                "Merge these partial summaries into a single coherent summary, keeping a professional structure with well-organized paragraphs. Keep every key point and important figure."
            }
            SummaryType::Bullets => {
                "Merge these partial summaries into ONE SINGLE LIST of 5-8 bullets. Combine and prioritize the most important points, removing duplicates. Use the format:\n- **Concept**: Description\nNo sub-bullets or nested lists."
            }
            SummaryType::Tldr => {
                "Merge these partial summaries into EXACTLY TWO SENTENCES that capture the essence of the whole document. First sentence: the main point. Second sentence: the key conclusion or action."
            }
            SummaryType::Business => {
                "Merge these partial summaries into one unified executive summary with the sections: Context → Key Findings → Business Implications → Recommended Actions. Keep the focus on ROI, strategy and decisions."
            }
            SummaryType::Academic => {
                "Merge these partial summaries into one coherent academic summary with the sections: Introduction/Context → Methodology → Main Findings → Conclusions. Keep a formal, objective tone."
            }
        }
    }
}

impl fmt::Display for SummaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const GENERAL: &str = "Write a professional, complete summary of the following text following these guidelines:
- Organize the summary in well-structured paragraphs
- Identify and keep every key point and main idea
- Use clear, coherent and formal language
- Keep the logical order of the original content
- Include important data, figures or relevant references
- Use Markdown headings and subheadings where appropriate
- The result must be understandable without reading the original text";

const BULLETS: &str = "Write a summary as a bullet list, STRICTLY following these rules:
- Write EXACTLY between 5 and 8 bullets (no more, no fewer)
- Each bullet must be concise but complete (1-2 lines at most)
- Use Markdown bullets (-)
- Each bullet captures ONE specific idea or key point
- Prioritize the most important points of the text
- Do NOT use sub-bullets or nested lists
- Start each bullet with an action verb or a key concept in bold
Expected format:
- **Key concept**: Concise description of the point
- **Another important point**: Short explanation";

const TLDR: &str = "Write a TL;DR (Too Long; Didn't Read) following EXACTLY these rules:
- Write ONLY TWO SENTENCES
- First sentence: the main point or most important finding
- Second sentence: the key conclusion or action
- Each sentence must be direct, clear and complete
- Do not use bullets, only running text
- 40-50 words at most in total
- Capture the absolute essence of the document";

const BUSINESS: &str = "Write an executive business summary following these guidelines:
- Open with the business context and the main problem
- Identify CLEARLY: opportunities, risks and key metrics
- Include a \"Business Implications\" section with strategic insights
- Add a \"Recommended Actions\" section with concrete, prioritized steps
- Use Markdown with headings and bullets where appropriate
- Focus on ROI, competitive advantage, financial impact and strategic decisions
- Structure: Context → Key Findings → Implications → Recommendations
- Use executive, results-oriented language";

const ACADEMIC: &str = "Write an academic summary following the standard scientific format:
- **Introduction/Context**: Main topic and research objectives
- **Methodology**: Approach, techniques and tools used (if any)
- **Main Findings**: Key results and discoveries with data
- **Conclusions**: Interpretation of results and theoretical/practical implications
- **Limitations and Future Work**: If the text mentions them
Use appropriate academic terminology, cite specific findings with data when available, and keep a formal, objective tone. Structure everything in Markdown with clearly defined sections.";

const SUMMARY_ONLY: &str = "Return ONLY the summary in Markdown, with no introduction or extra text. The summary must be self-contained and professional.";

/// Summarize in the requested style.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummarizeStrategy {
    summary_type: SummaryType,
}

impl SummarizeStrategy {
    pub fn new(summary_type: SummaryType) -> Self {
        Self { summary_type }
    }

    pub fn summary_type(&self) -> SummaryType {
        self.summary_type
    }
}

impl TaskStrategy for SummarizeStrategy {
    fn name(&self) -> &'static str {
        "summarize"
    }

    fn segment_instruction(&self, segment: &str) -> String {
        format!(
            "{}\n\n\n{}\n\nText to summarize:\n{}\n\nSummary:",
            self.summary_type.segment_template(),
            SUMMARY_ONLY,
            segment
        )
    }

    fn combine_instruction(&self, partials: &[String]) -> Combine {
        Combine::Synthesize(format!(
            "{}\n\nPartial summaries to merge:\n\n{}\n\nReturn ONLY the final merged summary in Markdown, with no introduction or extra text.\n\nFinal summary:",
            self.summary_type.synthesis_template(),
            partials.join(CONCAT_DELIMITER)
        ))
    }
}
