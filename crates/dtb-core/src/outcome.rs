use std::{collections::BTreeMap, fmt, io};

/// Classified outcome of a file or JSON operation.
///
/// The set is closed: every failure at the file/JSON boundary is mapped onto
/// one of these kinds instead of escaping as an error value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    Success,
    FileNotFound,
    PermissionDenied,
    IsADirectory,
    InvalidEncoding,
    IoError,
    InvalidPath,
    InvalidData,
    TypeError,
    ValueError,
    RecursionLimit,
    Overflow,
    GenericFailure,
}

impl OutcomeKind {
    pub fn is_success(self) -> bool {
        self == OutcomeKind::Success
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OutcomeKind::Success => "SUCCESS",
            OutcomeKind::FileNotFound => "FILE_NOT_FOUND",
            OutcomeKind::PermissionDenied => "PERMISSION_DENIED",
            OutcomeKind::IsADirectory => "IS_A_DIRECTORY",
            OutcomeKind::InvalidEncoding => "INVALID_ENCODING",
            OutcomeKind::IoError => "IO_ERROR",
            OutcomeKind::InvalidPath => "INVALID_PATH",
            OutcomeKind::InvalidData => "INVALID_DATA",
            OutcomeKind::TypeError => "TYPE_ERROR",
            OutcomeKind::ValueError => "VALUE_ERROR",
            OutcomeKind::RecursionLimit => "RECURSION_LIMIT",
            OutcomeKind::Overflow => "OVERFLOW",
            OutcomeKind::GenericFailure => "GENERIC_FAILURE",
        }
    }

    /// Map an I/O error onto the outcome set (shared by reads and writes).
    pub fn from_io_error(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => OutcomeKind::FileNotFound,
            io::ErrorKind::PermissionDenied => OutcomeKind::PermissionDenied,
            io::ErrorKind::IsADirectory => OutcomeKind::IsADirectory,
            io::ErrorKind::InvalidData => OutcomeKind::InvalidEncoding,
            io::ErrorKind::InvalidInput => OutcomeKind::InvalidPath,
            _ if err.raw_os_error().is_some() => OutcomeKind::IoError,
            _ => OutcomeKind::GenericFailure,
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded JSON document: a flat object of string values.
pub type JsonMap = BTreeMap<String, String>;

/// Result of reading a text file. `content` is empty unless the read succeeded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileReadResult {
    outcome: OutcomeKind,
    content: String,
}

impl FileReadResult {
    pub fn success(content: String) -> Self {
        Self {
            outcome: OutcomeKind::Success,
            content,
        }
    }

    pub fn failure(outcome: OutcomeKind) -> Self {
        debug_assert!(!outcome.is_success());
        Self {
            outcome,
            content: String::new(),
        }
    }

    pub fn outcome(&self) -> OutcomeKind {
        self.outcome
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }

    /// Carry a failed read over to the JSON layer with an empty mapping.
    pub fn into_json_failure(self) -> JsonReadResult {
        JsonReadResult::failure(self.outcome)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileWriteResult {
    outcome: OutcomeKind,
}

impl FileWriteResult {
    pub fn new(outcome: OutcomeKind) -> Self {
        Self { outcome }
    }

    pub fn outcome(&self) -> OutcomeKind {
        self.outcome
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }
}

/// Result of reading a JSON document. `data` is empty unless the read succeeded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JsonReadResult {
    outcome: OutcomeKind,
    data: JsonMap,
}

impl JsonReadResult {
    pub fn success(data: JsonMap) -> Self {
        Self {
            outcome: OutcomeKind::Success,
            data,
        }
    }

    pub fn failure(outcome: OutcomeKind) -> Self {
        debug_assert!(!outcome.is_success());
        Self {
            outcome,
            data: JsonMap::new(),
        }
    }

    pub fn outcome(&self) -> OutcomeKind {
        self.outcome
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    pub fn data(&self) -> &JsonMap {
        &self.data
    }

    pub fn into_data(self) -> JsonMap {
        self.data
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JsonWriteResult {
    outcome: OutcomeKind,
}

impl JsonWriteResult {
    pub fn new(outcome: OutcomeKind) -> Self {
        Self { outcome }
    }

    pub fn outcome(&self) -> OutcomeKind {
        self.outcome
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }
}

impl From<FileWriteResult> for JsonWriteResult {
    fn from(r: FileWriteResult) -> Self {
        Self::new(r.outcome)
    }
}
