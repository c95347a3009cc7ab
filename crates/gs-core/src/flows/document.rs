//! Document upload: choose type -> select file -> upload.

use serde::{Deserialize, Serialize};

use crate::action::ActionKind;
use crate::form::{validate, FormAccumulator};
use crate::wizard::{ConfigError, StepDefinition, StepId, StepTable};

pub mod fields {
    pub const DOCUMENT_TYPE: &str = "document_type";
    pub const FILE_NAME: &str = "file_name";
    pub const FILE_SIZE: &str = "file_size";
    pub const DESCRIPTION: &str = "description";
    pub const DOCUMENT_UPLOADED: &str = "document_uploaded";
}

pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

pub const DOCUMENT_TYPES: [&str; 6] = [
    "identity",
    "address",
    "income",
    "educational",
    "medical",
    "other",
];

pub const FILE_EXTENSIONS: [&str; 4] = ["pdf", "jpg", "jpeg", "png"];

/// Checks the selected file's name, extension and size.
pub fn file_is_acceptable(acc: &FormAccumulator) -> bool {
    let name_ok = acc.text(fields::FILE_NAME).is_some_and(|name| {
        validate::is_non_blank(name)
            && name
                .rsplit_once('.')
                .is_some_and(|(_, ext)| FILE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
    });
    let size_ok = acc
        .number(fields::FILE_SIZE)
        .is_some_and(|size| size > 0.0 && size <= MAX_FILE_SIZE_BYTES as f64);
    name_ok && size_ok
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStep {
    ChooseType,
    SelectFile,
    Upload,
}

impl DocumentStep {
    pub const ALL: [DocumentStep; 3] = [
        DocumentStep::ChooseType,
        DocumentStep::SelectFile,
        DocumentStep::Upload,
    ];

    fn is_complete(&self, acc: &FormAccumulator) -> bool {
        match self {
            DocumentStep::ChooseType => acc
                .text(fields::DOCUMENT_TYPE)
                .is_some_and(|kind| DOCUMENT_TYPES.contains(&kind)),
            DocumentStep::SelectFile => file_is_acceptable(acc),
            DocumentStep::Upload => acc.flag(fields::DOCUMENT_UPLOADED),
        }
    }

    fn action(&self) -> Option<ActionKind> {
        match self {
            DocumentStep::ChooseType | DocumentStep::SelectFile => None,
            DocumentStep::Upload => Some(ActionKind::UploadDocument),
        }
    }
}

impl StepId for DocumentStep {
    const FLOW: &'static str = "document_upload";

    fn as_str(&self) -> &'static str {
        match self {
            DocumentStep::ChooseType => "choose_type",
            DocumentStep::SelectFile => "select_file",
            DocumentStep::Upload => "upload",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.as_str() == value)
    }
}

pub fn step_table() -> Result<StepTable<DocumentStep>, ConfigError> {
    let count = DocumentStep::ALL.len();
    StepTable::new(
        DocumentStep::ALL
            .into_iter()
            .enumerate()
            .map(|(index, step)| {
                let definition = StepDefinition::new(
                    step,
                    index as u32 + 1,
                    super::progress_for(index + 1, count),
                    move |acc| step.is_complete(acc),
                );
                match step.action() {
                    Some(action) => definition.with_action(action),
                    None => definition,
                }
            })
            .collect(),
    )
}
