//! Prompt builder: maps a validated request to the generation instruction.
//!
//! Pure and deterministic: identical requests always produce identical
//! prompts. Because [`ProgramRequest`] fields are closed enums, every
//! placeholder is guaranteed to expand; there is no unknown-code path.

use crate::generation::prompts::PROGRAM_PROMPT_TEMPLATE;
use crate::models::program::ProgramRequest;

/// Builds the full generation prompt for one questionnaire submission.
pub fn build_prompt(request: &ProgramRequest) -> String {
    PROGRAM_PROMPT_TEMPLATE
        .replace("{niveau}", request.niveau.expansion())
        .replace("{duree}", request.duree.code())
        .replace("{attention}", request.attention.expansion())
        .replace("{matiere}", request.matiere.code())
        .replace("{passion}", request.passion.expansion())
}
