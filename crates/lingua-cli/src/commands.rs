//! Subcommand execution against a configured engine.

use std::fs;

use camino::Utf8Path;
use lingua_config::Config;
use lingua_syntax::{
    ClassifierConfig, Confidence, DefinitionKind, Engine, FixtureRunner, HarnessConfig, LineIndex,
    load_corpus,
};
use tracing::debug;

use crate::AppError;
use crate::cli::CliCommand;
use crate::output::{
    ClassificationReport, DefinitionRecord, DefinitionsReport, DetectionReport, LanguageRecord,
    LanguagesReport, Report, ScanReport, TokenRecord, ValidationReport,
};

/// Builds an engine from the built-in catalogue, the optional extra profile
/// document and the configured classifier settings.
pub(crate) fn build_engine(config: &Config) -> Result<Engine, AppError> {
    let mut builder = Engine::builder()
        .classifier_config(ClassifierConfig {
            clean_bonus: Confidence::from_per_mille(config.clean_bonus()),
        })
        .min_confidence(Confidence::from_per_mille(config.min_confidence()));
    builder.with_builtin_profiles()?;
    if let Some(path) = config.profiles_path() {
        let document = fs::read_to_string(path).map_err(|source| AppError::ReadProfiles {
            path: path.to_owned(),
            source,
        })?;
        builder.with_profile_document(&document, path.as_str())?;
    }
    Ok(builder.build())
}

/// Runs `command` and returns its report.
pub(crate) fn execute(command: &CliCommand, config: &Config) -> Result<Report, AppError> {
    let engine = build_engine(config)?;
    match command {
        CliCommand::Scan { file, language } => scan(&engine, file, language),
        CliCommand::Validate { file, language } => validate(&engine, file, language.as_deref()),
        CliCommand::Classify { file } => {
            let source = read_source(file)?;
            Ok(Report::Classification(ClassificationReport {
                path: file.clone(),
                candidates: engine.classify(&source),
            }))
        }
        CliCommand::Detect { file } => {
            let source = read_source(file)?;
            Ok(Report::Detection(DetectionReport {
                path: file.clone(),
                detection: engine.detect(Some(file.as_std_path()), &source),
            }))
        }
        CliCommand::Definitions {
            file,
            language,
            kind,
            name,
        } => definitions(
            &engine,
            file,
            language.as_deref(),
            &DefinitionFilter {
                kind: *kind,
                name: name.as_deref(),
            },
        ),
        CliCommand::Fixtures { root } => {
            let fixtures = load_corpus(root.as_std_path())?;
            let runner = FixtureRunner::new(
                &engine,
                HarnessConfig {
                    parallel: !config.sequential(),
                },
            );
            Ok(Report::Fixtures(runner.run(&fixtures)))
        }
        CliCommand::Languages => Ok(Report::Languages(LanguagesReport {
            languages: engine
                .registry()
                .all()
                .iter()
                .map(LanguageRecord::from)
                .collect(),
        })),
    }
}

fn read_source(path: &Utf8Path) -> Result<String, AppError> {
    fs::read_to_string(path).map_err(|source| AppError::ReadSource {
        path: path.to_owned(),
        source,
    })
}

fn scan(engine: &Engine, file: &Utf8Path, language: &str) -> Result<Report, AppError> {
    let source = read_source(file)?;
    let name = engine.registry().get(language)?.name().to_owned();
    let index = LineIndex::new(&source);
    let tokens = engine
        .scan(&source, &name)?
        .map(|token| TokenRecord::new(&token, &index))
        .collect();
    Ok(Report::Scan(ScanReport {
        path: file.to_owned(),
        language: name,
        tokens,
    }))
}

/// Resolves the requested profile name, or detects one from `file` and `source`.
fn resolve_language(
    engine: &Engine,
    file: &Utf8Path,
    source: &str,
    language: Option<&str>,
) -> Result<String, AppError> {
    if let Some(requested) = language {
        return Ok(engine.registry().get(requested)?.name().to_owned());
    }
    let detection = engine
        .detect(Some(file.as_std_path()), source)
        .ok_or_else(|| AppError::UndetectedLanguage {
            path: file.to_owned(),
        })?;
    debug!(
        path = %file,
        language = detection.language(),
        stage = %detection.stage(),
        "detected language"
    );
    Ok(detection.language().to_owned())
}

fn validate(engine: &Engine, file: &Utf8Path, language: Option<&str>) -> Result<Report, AppError> {
    let source = read_source(file)?;
    let name = resolve_language(engine, file, &source, language)?;
    let verdict = engine.validate(&source, &name)?;
    Ok(Report::Validation(ValidationReport::new(
        file, &name, &source, &verdict,
    )))
}

struct DefinitionFilter<'a> {
    kind: Option<DefinitionKind>,
    name: Option<&'a str>,
}

fn definitions(
    engine: &Engine,
    file: &Utf8Path,
    language: Option<&str>,
    filter: &DefinitionFilter<'_>,
) -> Result<Report, AppError> {
    let source = read_source(file)?;
    let name = resolve_language(engine, file, &source, language)?;
    let index = LineIndex::new(&source);
    let definitions = engine
        .definitions(&source, &name)?
        .iter()
        .filter(|definition| filter.kind.is_none_or(|kind| definition.kind() == kind))
        .filter(|definition| filter.name.is_none_or(|text| definition.name().contains(text)))
        .map(|definition| DefinitionRecord::new(definition, &index))
        .collect();
    Ok(Report::Definitions(DefinitionsReport {
        path: file.to_owned(),
        language: name,
        definitions,
    }))
}
