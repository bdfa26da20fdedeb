//! JSON documents on top of [`crate::file`].

use std::{io, path::Path};

use serde::Serialize;
use serde_json::{
    error::Category,
    ser::{Formatter, PrettyFormatter},
    Value,
};

use crate::{
    file::{read_text, write_text},
    here,
    logging::{log, log_exception, LogLevel},
    outcome::{JsonMap, JsonReadResult, JsonWriteResult, OutcomeKind},
};

const INDENT: &[u8] = b"    ";

/// Read a JSON object whose values are all strings.
pub fn read_json(path: &Path) -> JsonReadResult {
    let file = read_text(path);
    if !file.is_success() {
        return file.into_json_failure();
    }

    let value: Value = match serde_json::from_str(file.content()) {
        Ok(v) => v,
        Err(e) => {
            log_exception(&e, Some(here!()), "while loading a JSON");
            return JsonReadResult::failure(classify_parse_error(&e));
        }
    };

    match into_string_map(value) {
        Ok(map) => JsonReadResult::success(map),
        Err(reason) => {
            log(
                LogLevel::Error,
                &format!("unexpected JSON shape in {}: {reason}", path.display()),
            );
            JsonReadResult::failure(OutcomeKind::TypeError)
        }
    }
}

/// Serialize `data` as a pretty-printed JSON object (4-space indent).
///
/// Nesting deeper than [`read_json`] accepts is refused as
/// [`OutcomeKind::RecursionLimit`] before anything is written.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, data: &T) -> JsonWriteResult {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, DepthGuard::new());
    if let Err(e) = data.serialize(&mut ser) {
        log_exception(&e, Some(here!()), "while dumping a JSON");
        return JsonWriteResult::new(classify_serialize_error(&e));
    }

    if buf.first() != Some(&b'{') {
        log(
            LogLevel::Error,
            &format!("data must be a JSON object to be stored in {}", path.display()),
        );
        return JsonWriteResult::new(OutcomeKind::InvalidData);
    }
    buf.push(b'\n');

    write_text(path, buf).into()
}

/// Deepest nesting serde_json reads back.
const MAX_DEPTH: usize = 127;

/// Pretty printer that stops the serializer once nesting passes [`MAX_DEPTH`].
///
/// Failing inside `begin_*` unwinds the serializer before it recurses further,
/// so arbitrarily deep input cannot exhaust the stack.
struct DepthGuard {
    inner: PrettyFormatter<'static>,
    depth: usize,
}

impl DepthGuard {
    fn new() -> Self {
        Self {
            inner: PrettyFormatter::with_indent(INDENT),
            depth: 0,
        }
    }

    fn enter(&mut self) -> io::Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(io::Error::other("recursion limit exceeded"));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

impl Formatter for DepthGuard {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.enter()?;
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.leave();
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.enter()?;
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.leave();
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }
}

fn into_string_map(value: Value) -> std::result::Result<JsonMap, String> {
    let obj = match value {
        Value::Object(obj) => obj,
        other => return Err(format!("expected an object, found {}", value_kind(&other))),
    };

    obj.into_iter()
        .map(|(k, v)| match v {
            Value::String(s) => Ok((k, s)),
            other => Err(format!(
                "value of {k:?} must be a string, found {}",
                value_kind(&other)
            )),
        })
        .collect()
}

fn value_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// serde_json does not expose its error codes; the message prefix is stable.
fn limit_kind(e: &serde_json::Error) -> Option<OutcomeKind> {
    let msg = e.to_string();
    if msg.starts_with("recursion limit exceeded") {
        Some(OutcomeKind::RecursionLimit)
    } else if msg.starts_with("number out of range") {
        Some(OutcomeKind::Overflow)
    } else {
        None
    }
}

fn classify_parse_error(e: &serde_json::Error) -> OutcomeKind {
    if let Some(kind) = limit_kind(e) {
        return kind;
    }
    match e.classify() {
        Category::Syntax | Category::Eof => OutcomeKind::InvalidEncoding,
        Category::Io => OutcomeKind::IoError,
        Category::Data => OutcomeKind::GenericFailure,
    }
}

fn classify_serialize_error(e: &serde_json::Error) -> OutcomeKind {
    if let Some(kind) = limit_kind(e) {
        return kind;
    }
    if e.to_string().starts_with("key must be ") {
        return OutcomeKind::TypeError;
    }
    match e.classify() {
        Category::Data => OutcomeKind::ValueError,
        // writes go to a Vec; only the depth guard fails with I/O
        Category::Io => OutcomeKind::RecursionLimit,
        Category::Syntax | Category::Eof => OutcomeKind::GenericFailure,
    }
}
