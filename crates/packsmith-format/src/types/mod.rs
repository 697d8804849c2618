//! # Per-Type Formatters
//!
//! One module per content family. Each exposes its rule table as a
//! `RULES` constant and a [`ContentValidator`] for the validation phase.
//! [`rules_for`] and [`validator_for`] are the dispatch points used by
//! the formatter and the managers.

pub mod dashboard;
pub mod integration;
pub mod json;
pub mod playbook;
pub mod script;

use packsmith_core::FileType;
use packsmith_schema::ContentValidator;

use crate::rules::Rule;

/// Ordered rule table for a content type.
pub fn rules_for(file_type: FileType) -> &'static [Rule] {
    match file_type {
        FileType::Integration => integration::RULES,
        FileType::Script => script::RULES,
        FileType::Playbook => playbook::RULES,
        FileType::Dashboard => dashboard::RULES,
        FileType::Classifier | FileType::Mapper => json::CLASSIFIER_RULES,
        FileType::IncidentField | FileType::IndicatorField => json::FIELD_RULES,
        FileType::IncidentType | FileType::IndicatorType | FileType::Layout => json::BASIC_RULES,
    }
}

/// Semantic validator for a content type.
pub fn validator_for(file_type: FileType) -> &'static dyn ContentValidator {
    match file_type {
        FileType::Integration => &integration::IntegrationValidator,
        FileType::Script => &script::ScriptValidator,
        FileType::Playbook => &playbook::PlaybookValidator,
        FileType::Dashboard => &dashboard::DashboardValidator,
        FileType::Classifier => &json::JsonValidator(FileType::Classifier),
        FileType::Mapper => &json::JsonValidator(FileType::Mapper),
        FileType::Layout => &json::JsonValidator(FileType::Layout),
        FileType::IncidentField => &json::JsonValidator(FileType::IncidentField),
        FileType::IncidentType => &json::JsonValidator(FileType::IncidentType),
        FileType::IndicatorField => &json::JsonValidator(FileType::IndicatorField),
        FileType::IndicatorType => &json::JsonValidator(FileType::IndicatorType),
    }
}
