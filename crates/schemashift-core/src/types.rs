use std::fmt;

use serde::{Deserialize, Serialize};

/// Source column type as seen by the type mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDescriptor<'a> {
    pub source_type: &'a str,
    pub length: i32,
    pub precision: i32,
    pub scale: i32,
    pub nullable: bool,
}

impl<'a> TypeDescriptor<'a> {
    /// Descriptor with no length, precision or scale, not nullable.
    pub fn new(source_type: &'a str) -> Self {
        Self {
            source_type,
            length: 0,
            precision: 0,
            scale: 0,
            nullable: false,
        }
    }

    pub fn with_length(mut self, length: i32) -> Self {
        self.length = length;
        self
    }

    pub fn with_precision(mut self, precision: i32, scale: i32) -> Self {
        self.precision = precision;
        self.scale = scale;
        self
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }
}

/// Broad family of a recognized source type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeFamily {
    Character,
    Numeric,
    Lob,
    RowId,
    Xml,
    Cursor,
    DateTime,
    Interval,
    Binary,
}

/// Whether a translation rule matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingStatus {
    Mapped,
    /// No rule matched; the source type name was passed through verbatim.
    Unmapped,
}

/// Result of translating one source type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappedType {
    pub rendered: String,
    pub family: Option<TypeFamily>,
    pub status: MappingStatus,
}

impl MappedType {
    pub fn mapped(rendered: impl Into<String>, family: TypeFamily) -> Self {
        Self {
            rendered: rendered.into(),
            family: Some(family),
            status: MappingStatus::Mapped,
        }
    }

    pub fn unmapped(source_type: &str) -> Self {
        Self {
            rendered: source_type.to_string(),
            family: None,
            status: MappingStatus::Unmapped,
        }
    }

    pub fn is_unmapped(&self) -> bool {
        self.status == MappingStatus::Unmapped
    }

    pub fn is_character(&self) -> bool {
        self.family == Some(TypeFamily::Character)
    }
}

impl fmt::Display for MappedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}
