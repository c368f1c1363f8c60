//! Append engine
//!
//! Adds one record to the array file by splicing its encoded text in front
//! of the closing bracket, instead of parsing and re-serializing every
//! stored record. The file is still read in full (that read is the
//! scalability ceiling), but nothing already stored is decoded or
//! re-encoded.
//!
//! Splicing trusts the file to look like an array of objects. The check is
//! cheap: first non-whitespace char is `[`, last is `]`, and the char before
//! `]` is `}` or the opening `[`. Anything else goes through a full parse,
//! which either rewrites a normalized array or fails with `Parse` and
//! leaves the file as it was.

use crate::record::{decode_all, encode, encode_all, Record};

use super::backend::TextFileBackend;
use super::errors::StoreResult;
use super::file::StoreFile;

/// How an append reached the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendPath {
    /// File was missing, blank or an empty array
    NewArray,
    /// Record text spliced before the closing bracket
    Spliced,
    /// Content failed the cheap check and was re-parsed
    Reparsed,
}

impl AppendPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppendPath::NewArray => "new_array",
            AppendPath::Spliced => "spliced",
            AppendPath::Reparsed => "reparsed",
        }
    }
}

/// Outcome of planning a splice against existing content
#[derive(Debug, PartialEq, Eq)]
pub enum Splice {
    /// Content holds no records yet
    Empty,
    /// Full new file content
    Spliced(String),
    /// Content does not look like an array of objects
    Untrusted,
}

/// `[`, newline, the record, newline, `]`
pub fn single_element_array(encoded: &str) -> String {
    let mut out = String::with_capacity(encoded.len() + 4);
    out.push_str("[\n");
    out.push_str(encoded);
    out.push_str("\n]");
    out
}

/// Plan the new file content for appending `encoded` to `content`.
pub fn splice_into_array(content: &str, encoded: &str) -> Splice {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Splice::Empty;
    }
    if !trimmed.starts_with('[') || !trimmed.ends_with(']') {
        return Splice::Untrusted;
    }

    let body = trimmed[..trimmed.len() - 1].trim_end();
    if body == "[" {
        return Splice::Empty;
    }
    if !body.ends_with('}') {
        return Splice::Untrusted;
    }

    let mut out = String::with_capacity(body.len() + encoded.len() + 4);
    out.push_str(body);
    out.push_str(",\n");
    out.push_str(encoded);
    out.push_str("\n]");
    Splice::Spliced(out)
}

/// Append `record` to the store file. Caller holds the exclusive guard.
pub(crate) async fn append_record<B: TextFileBackend>(
    file: &mut StoreFile<B>,
    record: &Record,
) -> StoreResult<AppendPath> {
    let encoded = encode(record)?;

    if !file.exists().await? {
        file.write_text(&single_element_array(&encoded)).await?;
        return Ok(AppendPath::NewArray);
    }

    let content = file.read_text().await?;
    match splice_into_array(&content, &encoded) {
        Splice::Empty => {
            file.write_text(&single_element_array(&encoded)).await?;
            Ok(AppendPath::NewArray)
        }
        Splice::Spliced(text) => {
            file.write_text(&text).await?;
            Ok(AppendPath::Spliced)
        }
        Splice::Untrusted => {
            let mut records = decode_all(&content)?;
            records.push(record.clone());
            file.write_text(&encode_all(&records)?).await?;
            Ok(AppendPath::Reparsed)
        }
    }
}
