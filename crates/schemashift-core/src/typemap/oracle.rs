use std::collections::HashMap;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::types::{MappedType, TypeDescriptor, TypeFamily};

use super::TypeMapper;

/// Oracle → PostgreSQL / C# type mapper.
///
/// Exact type names are looked up first, then parameterized names
/// (`TIMESTAMP(6)`, `INTERVAL DAY(2) TO SECOND(6)`, ...) are matched by
/// pattern, and anything else passes through unmapped.
#[derive(Debug, Clone, Copy, Default)]
pub struct OracleToPostgres;

impl OracleToPostgres {
    pub fn new() -> Self {
        Self
    }
}

impl TypeMapper for OracleToPostgres {
    fn source_dialect(&self) -> &str {
        "oracle"
    }

    fn target_dialect(&self) -> &str {
        "postgres"
    }

    fn target_language(&self) -> &str {
        "csharp"
    }

    fn sql_type(&self, desc: &TypeDescriptor<'_>) -> MappedType {
        let key = normalize(desc.source_type);

        if let Some(rule) = exact_rules().get(key.as_str()) {
            return MappedType::mapped(rule.sql.render(&key, desc), rule.family);
        }

        for (pattern, rule) in pattern_rules() {
            if let Some(caps) = pattern.captures(&key) {
                return MappedType::mapped((rule.sql)(&caps), rule.family);
            }
        }

        MappedType::unmapped(desc.source_type)
    }

    fn property_type(&self, desc: &TypeDescriptor<'_>) -> MappedType {
        let key = normalize(desc.source_type);

        let resolved = if let Some(rule) = exact_rules().get(key.as_str()) {
            rule.property.resolve(desc).map(|base| (base, rule.family))
        } else {
            pattern_rules()
                .iter()
                .find(|(pattern, _)| pattern.is_match(&key))
                .map(|(_, rule)| (rule.property, rule.family))
        };

        match resolved {
            Some((base, family)) if desc.nullable => MappedType::mapped(format!("{base}?"), family),
            Some((base, family)) => MappedType::mapped(base, family),
            None => MappedType::unmapped(desc.source_type),
        }
    }
}

/// Width class of an Oracle `NUMBER(p, s)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberBucket {
    Int16,
    Int32,
    Int64,
    Decimal(i32),
    ScaledDecimal(i32, i32),
    Unsized,
}

/// Boundaries are half-open: `[1, 5)`, `[5, 9)`, `[9, 19)`, then `[19, 38]`.
fn number_bucket(precision: i32, scale: i32) -> NumberBucket {
    if scale <= 0 {
        match precision {
            1..=4 => return NumberBucket::Int16,
            5..=8 => return NumberBucket::Int32,
            9..=18 => return NumberBucket::Int64,
            19..=38 => return NumberBucket::Decimal(precision),
            _ => {}
        }
    }

    if precision > 0 {
        NumberBucket::ScaledDecimal(precision, scale)
    } else {
        NumberBucket::Unsized
    }
}

/// How an exact rule renders the target SQL type.
#[derive(Debug, Clone, Copy)]
enum SqlTarget {
    Fixed(&'static str),
    /// `NAME(length)` when length > 0, else `NAME`.
    Sized(&'static str),
    /// Source name, sized like [`SqlTarget::Sized`].
    SameNameSized,
    /// Source name with `(precision,scale)` when precision > 0.
    SameNameDecimal,
    Number,
}

impl SqlTarget {
    fn render(self, source: &str, desc: &TypeDescriptor<'_>) -> String {
        match self {
            SqlTarget::Fixed(name) => name.to_string(),
            SqlTarget::Sized(name) => sized(name, desc.length),
            SqlTarget::SameNameSized => sized(source, desc.length),
            SqlTarget::SameNameDecimal => {
                if desc.precision > 0 {
                    format!("{source}({},{})", desc.precision, desc.scale)
                } else {
                    source.to_string()
                }
            }
            SqlTarget::Number => match number_bucket(desc.precision, desc.scale) {
                NumberBucket::Int16 => "SMALLINT".to_string(),
                NumberBucket::Int32 => "INT".to_string(),
                NumberBucket::Int64 => "BIGINT".to_string(),
                NumberBucket::Decimal(precision) => format!("DECIMAL({precision})"),
                NumberBucket::ScaledDecimal(precision, scale) => {
                    format!("DECIMAL({precision},{scale})")
                }
                NumberBucket::Unsized => "DECIMAL".to_string(),
            },
        }
    }
}

/// How an exact rule renders the property type, before nullable widening.
#[derive(Debug, Clone, Copy)]
enum PropertyTarget {
    Fixed(&'static str),
    Number,
    /// No property equivalent; passes through unmapped.
    Passthrough,
}

impl PropertyTarget {
    fn resolve(self, desc: &TypeDescriptor<'_>) -> Option<&'static str> {
        match self {
            PropertyTarget::Fixed(name) => Some(name),
            PropertyTarget::Number => Some(match number_bucket(desc.precision, desc.scale) {
                NumberBucket::Int16 => "short",
                NumberBucket::Int32 => "int",
                NumberBucket::Int64 => "long",
                _ => "decimal",
            }),
            PropertyTarget::Passthrough => None,
        }
    }
}

struct ExactRule {
    names: &'static [&'static str],
    family: TypeFamily,
    sql: SqlTarget,
    property: PropertyTarget,
}

const EXACT_RULES: &[ExactRule] = &[
    // Character
    ExactRule {
        names: &["CHAR", "CHARACTER", "NCHAR"],
        family: TypeFamily::Character,
        sql: SqlTarget::SameNameSized,
        property: PropertyTarget::Fixed("string"),
    },
    ExactRule {
        names: &["NCHAR VARYING", "VARCHAR", "VARCHAR2", "NVARCHAR2"],
        family: TypeFamily::Character,
        sql: SqlTarget::Sized("VARCHAR"),
        property: PropertyTarget::Fixed("string"),
    },
    ExactRule {
        names: &["CLOB", "NCLOB", "LONG"],
        family: TypeFamily::Lob,
        sql: SqlTarget::Fixed("TEXT"),
        property: PropertyTarget::Fixed("string"),
    },
    // Numeric
    ExactRule {
        names: &["BINARY_FLOAT"],
        family: TypeFamily::Numeric,
        sql: SqlTarget::Fixed("REAL"),
        property: PropertyTarget::Fixed("float"),
    },
    ExactRule {
        names: &["BINARY_DOUBLE", "DOUBLE PRECISION", "FLOAT", "REAL"],
        family: TypeFamily::Numeric,
        sql: SqlTarget::Fixed("DOUBLE PRECISION"),
        property: PropertyTarget::Fixed("double"),
    },
    ExactRule {
        names: &["DECIMAL", "DEC", "NUMERIC"],
        family: TypeFamily::Numeric,
        sql: SqlTarget::SameNameDecimal,
        property: PropertyTarget::Fixed("decimal"),
    },
    ExactRule {
        names: &["INTEGER", "INT"],
        family: TypeFamily::Numeric,
        sql: SqlTarget::Fixed("INTEGER"),
        property: PropertyTarget::Fixed("int"),
    },
    ExactRule {
        names: &["SMALLINT"],
        family: TypeFamily::Numeric,
        sql: SqlTarget::Fixed("SMALLINT"),
        property: PropertyTarget::Fixed("short"),
    },
    ExactRule {
        names: &["NUMBER"],
        family: TypeFamily::Numeric,
        sql: SqlTarget::Number,
        property: PropertyTarget::Number,
    },
    // LOB
    ExactRule {
        names: &["BFILE"],
        family: TypeFamily::Lob,
        sql: SqlTarget::Fixed("VARCHAR(255)"),
        property: PropertyTarget::Fixed("byte[]"),
    },
    // ROWID
    ExactRule {
        names: &["ROWID"],
        family: TypeFamily::RowId,
        sql: SqlTarget::Fixed("CHARACTER(255)"),
        property: PropertyTarget::Fixed("string"),
    },
    ExactRule {
        names: &["UROWID"],
        family: TypeFamily::RowId,
        sql: SqlTarget::Sized("VARCHAR"),
        property: PropertyTarget::Fixed("string"),
    },
    ExactRule {
        names: &["XMLTYPE"],
        family: TypeFamily::Xml,
        sql: SqlTarget::Fixed("XML"),
        property: PropertyTarget::Fixed("string"),
    },
    ExactRule {
        names: &["SYS_REFCURSOR"],
        family: TypeFamily::Cursor,
        sql: SqlTarget::Fixed("REFCURSOR"),
        property: PropertyTarget::Passthrough,
    },
    // Date and time
    ExactRule {
        names: &["DATE"],
        family: TypeFamily::DateTime,
        sql: SqlTarget::Fixed("TIMESTAMP"),
        property: PropertyTarget::Fixed("DateTime"),
    },
    // Binary
    ExactRule {
        names: &["BLOB", "RAW", "LONG RAW"],
        family: TypeFamily::Binary,
        sql: SqlTarget::Fixed("BYTEA"),
        property: PropertyTarget::Fixed("byte[]"),
    },
];

struct PatternRule {
    pattern: &'static str,
    family: TypeFamily,
    sql: fn(&Captures<'_>) -> String,
    property: &'static str,
}

const PATTERN_RULES: &[PatternRule] = &[
    PatternRule {
        pattern: r"^TIMESTAMP\((\d+)\)$",
        family: TypeFamily::DateTime,
        sql: timestamp,
        property: "DateTime",
    },
    PatternRule {
        pattern: r"^TIMESTAMP\((\d+)\) WITH (?:LOCAL )?TIME ZONE$",
        family: TypeFamily::DateTime,
        sql: timestamp_tz,
        property: "DateTimeOffset",
    },
    PatternRule {
        pattern: r"^INTERVAL YEAR\((\d+)\) TO MONTH$",
        family: TypeFamily::Interval,
        sql: interval_year_to_month,
        property: "int",
    },
    PatternRule {
        pattern: r"^INTERVAL DAY\((\d+)\) TO SECOND\((\d+)\)$",
        family: TypeFamily::Interval,
        sql: interval_day_to_second,
        property: "TimeSpan",
    },
];

fn timestamp(caps: &Captures<'_>) -> String {
    format!("TIMESTAMP({})", &caps[1])
}

fn timestamp_tz(caps: &Captures<'_>) -> String {
    format!("TIMESTAMP({}) WITH TIME ZONE", &caps[1])
}

fn interval_year_to_month(_caps: &Captures<'_>) -> String {
    "INTERVAL YEAR TO MONTH".to_string()
}

fn interval_day_to_second(caps: &Captures<'_>) -> String {
    format!("INTERVAL DAY TO SECOND({})", &caps[2])
}

fn exact_rules() -> &'static HashMap<&'static str, &'static ExactRule> {
    static INDEX: OnceLock<HashMap<&'static str, &'static ExactRule>> = OnceLock::new();
    INDEX.get_or_init(|| {
        EXACT_RULES
            .iter()
            .flat_map(|rule| rule.names.iter().map(move |name| (*name, rule)))
            .collect()
    })
}

fn pattern_rules() -> &'static [(Regex, &'static PatternRule)] {
    static COMPILED: OnceLock<Vec<(Regex, &'static PatternRule)>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        PATTERN_RULES
            .iter()
            .filter_map(|rule| Regex::new(rule.pattern).ok().map(|re| (re, rule)))
            .collect()
    })
}

fn normalize(source_type: &str) -> String {
    source_type
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_uppercase()
}

fn sized(name: &str, length: i32) -> String {
    if length > 0 {
        format!("{name}({length})")
    } else {
        name.to_string()
    }
}
