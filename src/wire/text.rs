// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Inline wire text writers used on the marshall path.

use crate::core::Result;

use super::{ENCODED_TYPE_KEY, VALUE_KEY};

/// Quote and escape a string as a wire string literal.
pub fn quote(s: &str) -> Result<String> {
    Ok(serde_json::to_string(s)?)
}

/// Bracketed, comma-separated array writer.
///
/// A comma is written before every element except the first, so the output
/// never has a leading or trailing separator.
#[derive(Debug)]
pub struct ArrayWriter {
    buf: String,
    count: usize,
}

impl ArrayWriter {
    /// Start a new array.
    pub fn new() -> Self {
        Self {
            buf: String::from("["),
            count: 0,
        }
    }

    /// Append one already-encoded element.
    pub fn push(&mut self, element: &str) {
        if self.count > 0 {
            self.buf.push(',');
        }
        self.buf.push_str(element);
        self.count += 1;
    }

    /// Close the array and return its text.
    pub fn finish(mut self) -> String {
        self.buf.push(']');
        self.buf
    }
}

impl Default for ArrayWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Object writer producing `{"key":value,...}` in insertion order.
#[derive(Debug)]
pub struct ObjectWriter {
    buf: String,
    count: usize,
}

impl ObjectWriter {
    /// Start a new object.
    pub fn new() -> Self {
        Self {
            buf: String::from("{"),
            count: 0,
        }
    }

    /// Start an object whose first entry is the type tag.
    pub fn tagged(type_id: &str) -> Result<Self> {
        let mut writer = Self::new();
        writer.entry(ENCODED_TYPE_KEY, &quote(type_id)?)?;
        Ok(writer)
    }

    /// Append one entry with an already-encoded value.
    pub fn entry(&mut self, key: &str, value: &str) -> Result<()> {
        if self.count > 0 {
            self.buf.push(',');
        }
        self.buf.push_str(&quote(key)?);
        self.buf.push(':');
        self.buf.push_str(value);
        self.count += 1;
        Ok(())
    }

    /// Close the object and return its text.
    pub fn finish(mut self) -> String {
        self.buf.push('}');
        self.buf
    }
}

impl Default for ObjectWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrap a plain encoding with its type tag.
pub fn wrap_tagged(type_id: &str, plain: &str) -> Result<String> {
    let mut writer = ObjectWriter::tagged(type_id)?;
    writer.entry(VALUE_KEY, plain)?;
    Ok(writer.finish())
}
