//! Run compile / decompile over JSON documents

use super::CliError;
use crate::{compile, decompile, MultiStageQuery, SurfaceQuery};

/// Options shared by the conversion commands
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// JSON document to convert
    pub input: Option<String>,
    /// Pretty-print the output
    pub pretty: bool,
}

impl ConvertOptions {
    fn document(&self) -> Result<&str, CliError> {
        self.input.as_deref().ok_or(CliError::NoInput)
    }

    fn render<T: serde::Serialize>(&self, value: &T) -> Result<String, CliError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        }?;
        Ok(json)
    }
}

/// Compile a surface JSON document into backend JSON
pub fn execute_compile(options: &ConvertOptions) -> Result<String, CliError> {
    let surface: SurfaceQuery = serde_json::from_str(options.document()?)?;
    let backend = compile(&surface)?;
    options.render(&backend)
}

/// Decompile a backend JSON document into surface JSON
pub fn execute_decompile(options: &ConvertOptions) -> Result<String, CliError> {
    let backend: MultiStageQuery = serde_json::from_str(options.document()?)?;
    let surface = decompile(&backend)?;
    options.render(&surface)
}

/// Check that a surface JSON document compiles, returning its stage count
pub fn execute_validate(options: &ConvertOptions) -> Result<usize, CliError> {
    let surface: SurfaceQuery = serde_json::from_str(options.document()?)?;
    let backend = compile(&surface)?;
    Ok(backend.stages.len())
}
