//! JSON text as the push service writes it.
//!
//! The server rebuilds the signed parameters with Go's `encoding/json`, so the
//! client has to emit the same bytes: `<`, `>`, `&`, U+2028 and U+2029 are
//! escaped as `\uXXXX`, and numbers are written the way a `float64` prints.

use std::fmt;
use std::io;

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{Formatter, Serializer};

/// Compact formatter matching Go's `json.Marshal` output.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoJsonFormatter {
    integers_as_float: bool,
}

impl GoJsonFormatter {
    /// Integers are written exactly, as for a typed request body.
    pub fn wire() -> Self {
        Self {
            integers_as_float: false,
        }
    }

    /// Integers go through `float64` first, as for a decoded parameter map.
    pub fn canonical() -> Self {
        Self {
            integers_as_float: true,
        }
    }
}

impl Formatter for GoJsonFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (index, ch) in fragment.char_indices() {
            let escape = match ch {
                '<' => "\\u003c",
                '>' => "\\u003e",
                '&' => "\\u0026",
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };
            writer.write_all(&fragment.as_bytes()[start..index])?;
            writer.write_all(escape.as_bytes())?;
            start = index + ch.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }

    fn write_f32<W>(&mut self, writer: &mut W, value: f32) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let abs = value.abs();
        let exponent = abs != 0.0 && !(1e-6..1e21).contains(&abs);
        writer.write_all(go_float(value, exponent).as_bytes())
    }

    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let abs = value.abs();
        let exponent = abs != 0.0 && !(1e-6..1e21).contains(&abs);
        writer.write_all(go_float(value, exponent).as_bytes())
    }

    fn write_i64<W>(&mut self, writer: &mut W, value: i64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if self.integers_as_float {
            self.write_f64(writer, value as f64)
        } else {
            write!(writer, "{value}")
        }
    }

    fn write_u64<W>(&mut self, writer: &mut W, value: u64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if self.integers_as_float {
            self.write_f64(writer, value as f64)
        } else {
            write!(writer, "{value}")
        }
    }

    fn write_i128<W>(&mut self, writer: &mut W, value: i128) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if self.integers_as_float {
            self.write_f64(writer, value as f64)
        } else {
            write!(writer, "{value}")
        }
    }

    fn write_u128<W>(&mut self, writer: &mut W, value: u128) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if self.integers_as_float {
            self.write_f64(writer, value as f64)
        } else {
            write!(writer, "{value}")
        }
    }
}

/// Shortest round-trip digits; `1e+21` style exponents outside `[1e-6, 1e21)`.
fn go_float<T: fmt::Display + fmt::LowerExp>(value: T, exponent: bool) -> String {
    if !exponent {
        return value.to_string();
    }
    let mut text = format!("{value:e}");
    if let Some(pos) = text.find('e') {
        if !text[pos + 1..].starts_with('-') {
            text.insert(pos + 1, '+');
        }
    }
    text
}

/// Serialize a request payload for the wire.
pub fn to_wire_vec<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(128);
    let mut serializer = Serializer::with_formatter(&mut bytes, GoJsonFormatter::wire());
    value.serialize(&mut serializer)?;
    Ok(bytes)
}

/// Serialize a decoded parameter value for signing.
pub fn to_canonical_string(value: &Value) -> String {
    let mut bytes = Vec::with_capacity(128);
    let mut serializer = Serializer::with_formatter(&mut bytes, GoJsonFormatter::canonical());
    value
        .serialize(&mut serializer)
        .expect("JSON value serializes into memory");
    String::from_utf8(bytes).expect("JSON output is UTF-8")
}
