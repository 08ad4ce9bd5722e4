// src/json_text.rs
//! JSON text for reports and replies.
//!
//! Floats are written the same way table cells render them (`1e+16`, `1.5e-05`,
//! `2.0`), so a value reads identically in a table and in the JSON beside it.
//! Single-line output puts a space after `,` and `:`.

use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use std::io;

use crate::batch::format_float;
use crate::error::BotResult;

/// Single-line layout with `", "` and `": "` separators.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Wraps a layout formatter and replaces its float text.
#[derive(Debug, Clone)]
pub struct FloatText<F> {
    layout: F,
}

impl<F> FloatText<F> {
    pub fn new(layout: F) -> Self {
        Self { layout }
    }
}

impl<F: Formatter> Formatter for FloatText<F> {
    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(format_float(value).as_bytes())
    }

    fn write_f32<W>(&mut self, writer: &mut W, value: f32) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.write_f64(writer, f64::from(value))
    }

    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.layout.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.layout.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.layout.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.layout.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.layout.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.layout.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.layout.begin_object_key(writer, first)
    }

    fn end_object_key<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.layout.end_object_key(writer)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.layout.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.layout.end_object_value(writer)
    }
}

fn write_with<T, F>(value: &T, formatter: F) -> BotResult<String>
where
    T: Serialize + ?Sized,
    F: Formatter,
{
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Four-space indented JSON.
pub fn to_indented<T: Serialize + ?Sized>(value: &T) -> BotResult<String> {
    write_with(value, FloatText::new(PrettyFormatter::with_indent(b"    ")))
}

/// Single-line JSON with spaced separators.
pub fn to_spaced<T: Serialize + ?Sized>(value: &T) -> BotResult<String> {
    write_with(value, FloatText::new(SpacedFormatter))
}
