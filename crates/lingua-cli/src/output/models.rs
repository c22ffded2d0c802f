//! Serialisable report models.

use camino::{Utf8Path, Utf8PathBuf};
use lingua_syntax::{
    Classification, Definition, Detection, HarnessReport, LanguageProfile, LineIndex, Token,
    Verdict,
};
use serde::Serialize;

/// The output of one subcommand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub(crate) enum Report {
    Scan(ScanReport),
    Validation(ValidationReport),
    Classification(ClassificationReport),
    Detection(DetectionReport),
    Definitions(DefinitionsReport),
    Fixtures(HarnessReport),
    Languages(LanguagesReport),
}

impl Report {
    /// Returns `false` when the report should produce a failing exit code.
    pub(crate) fn is_success(&self) -> bool {
        match self {
            Self::Validation(report) => report.pass,
            Self::Detection(report) => report.detection.is_some(),
            Self::Fixtures(report) => report.is_success(),
            Self::Scan(_)
            | Self::Classification(_)
            | Self::Definitions(_)
            | Self::Languages(_) => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct TokenRecord {
    pub(crate) kind: &'static str,
    pub(crate) text: String,
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) line: u32,
    pub(crate) column: u32,
}

impl TokenRecord {
    pub(crate) fn new(token: &Token<'_>, index: &LineIndex<'_>) -> Self {
        let position = index.line_column(token.start());
        Self {
            kind: token.kind().label(),
            text: token.text().to_owned(),
            start: token.start(),
            end: token.end(),
            line: position.line,
            column: position.column,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ScanReport {
    pub(crate) path: Utf8PathBuf,
    pub(crate) language: String,
    pub(crate) tokens: Vec<TokenRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct DiagnosticRecord {
    pub(crate) code: &'static str,
    pub(crate) offset: usize,
    pub(crate) line: u32,
    pub(crate) column: u32,
    pub(crate) message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ValidationReport {
    pub(crate) path: Utf8PathBuf,
    pub(crate) language: String,
    pub(crate) pass: bool,
    pub(crate) diagnostics: Vec<DiagnosticRecord>,
}

impl ValidationReport {
    pub(crate) fn new(path: &Utf8Path, language: &str, source: &str, verdict: &Verdict) -> Self {
        let index = LineIndex::new(source);
        let diagnostics = verdict
            .diagnostics()
            .iter()
            .map(|diagnostic| {
                let position = index.line_column(diagnostic.offset());
                DiagnosticRecord {
                    code: diagnostic.kind().code(),
                    offset: diagnostic.offset(),
                    line: position.line,
                    column: position.column,
                    message: diagnostic.message().to_owned(),
                }
            })
            .collect();
        Self {
            path: path.to_owned(),
            language: language.to_owned(),
            pass: verdict.pass(),
            diagnostics,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ClassificationReport {
    pub(crate) path: Utf8PathBuf,
    pub(crate) candidates: Classification,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct DetectionReport {
    pub(crate) path: Utf8PathBuf,
    pub(crate) detection: Option<Detection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct DefinitionRecord {
    pub(crate) kind: &'static str,
    pub(crate) name: String,
    pub(crate) offset: usize,
    pub(crate) line: u32,
    pub(crate) column: u32,
}

impl DefinitionRecord {
    pub(crate) fn new(definition: &Definition, index: &LineIndex<'_>) -> Self {
        let position = index.line_column(definition.offset());
        Self {
            kind: definition.kind().into(),
            name: definition.name().to_owned(),
            offset: definition.offset(),
            line: position.line,
            column: position.column,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct DefinitionsReport {
    pub(crate) path: Utf8PathBuf,
    pub(crate) language: String,
    pub(crate) definitions: Vec<DefinitionRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct LanguageRecord {
    pub(crate) name: String,
    pub(crate) precedence: u32,
    pub(crate) extensions: Vec<String>,
}

impl From<&LanguageProfile> for LanguageRecord {
    fn from(profile: &LanguageProfile) -> Self {
        Self {
            name: profile.name().to_owned(),
            precedence: profile.precedence(),
            extensions: profile.extensions().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct LanguagesReport {
    pub(crate) languages: Vec<LanguageRecord>,
}
