pub mod json;
pub mod md;

use crate::error::GradeError;
use crate::types::metadata::RepositoryMetadata;
use crate::types::report::AnalysisResult;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(
    metadata: &RepositoryMetadata,
    analysis: &AnalysisResult,
    format: OutputFormat,
) -> Result<String, GradeError> {
    match format {
        OutputFormat::Json => json::to_json(metadata, analysis).map_err(GradeError::Json),
        OutputFormat::Md => Ok(md::to_markdown(metadata, analysis)),
    }
}
