//! Identifier transforms shared by the entity, mapping and context emitters.

use std::collections::HashSet;

use heck::ToUpperCamelCase;
use indexmap::IndexMap;
use schemashift_core::Table;

/// Lower-case the catalog identifier, then upper-case the first letter of
/// each word and join them (`EMP_ID` → `EmpId`).
///
/// Every non-alphanumeric character delimits a word and is dropped, so Oracle
/// names carrying `$` or `#` still yield valid C# identifiers (`SYS$LOG` →
/// `SysLog`).
pub fn title_case(identifier: &str) -> String {
    identifier.to_lowercase().to_upper_camel_case()
}

/// Title-cased name with the last word pluralized (`ORDER_LINE` → `OrderLines`).
pub fn plural_type_name(identifier: &str) -> String {
    let lower = identifier.to_lowercase();
    let plural = match lower.rsplit_once(|c: char| c == '_' || c.is_whitespace()) {
        Some((head, last)) if !last.is_empty() => {
            format!("{head}_{}", pluralizer::pluralize(last, 2, false))
        }
        _ => pluralizer::pluralize(&lower, 2, false),
    };
    code_identifier(title_case(&plural))
}

/// Title-cased name usable as a C# type or member name.
pub fn type_name(identifier: &str) -> String {
    code_identifier(title_case(identifier))
}

fn code_identifier(name: String) -> String {
    match name.chars().next() {
        None => "Unnamed".to_string(),
        Some(first) if first.is_ascii_digit() => format!("_{name}"),
        Some(_) => name,
    }
}

/// Generated member names for one table's entity class.
///
/// The entity and mapping emitters both resolve names through this type so a
/// mapping always refers to the members the entity actually declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberNames {
    class_name: String,
    /// Column name → scalar property.
    properties: IndexMap<String, String>,
    /// Referenced table → reference navigation.
    references: IndexMap<String, String>,
    /// Referencing table → collection navigation.
    collections: IndexMap<String, String>,
}

impl MemberNames {
    pub fn for_table(table: &Table) -> Self {
        let class_name = type_name(table.name());
        let mut taken: HashSet<String> = HashSet::new();
        taken.insert(class_name.clone());

        let mut properties = IndexMap::new();
        for column in table.columns() {
            let mut base = type_name(column.name());
            if base == class_name {
                base.push_str("Value");
            }
            let name = claim(&mut taken, base, "");
            properties.insert(column.name().to_string(), name);
        }

        let mut references = IndexMap::new();
        for target in table.foreign_key_targets() {
            let name = claim(&mut taken, type_name(target), "Navigation");
            references.insert(target.to_string(), name);
        }

        let mut collections = IndexMap::new();
        for source in table.incoming_references() {
            let name = claim(&mut taken, plural_type_name(source), "Navigation");
            collections.insert(source.clone(), name);
        }

        Self {
            class_name,
            properties,
            references,
            collections,
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn mapping_name(&self) -> String {
        mapping_name(self.class_name())
    }

    pub fn property(&self, column: &str) -> Option<&str> {
        self.properties.get(column).map(String::as_str)
    }

    pub fn reference(&self, target_table: &str) -> Option<&str> {
        self.references.get(target_table).map(String::as_str)
    }

    pub fn collection(&self, source_table: &str) -> Option<&str> {
        self.collections.get(source_table).map(String::as_str)
    }
}

pub fn mapping_name(class_name: &str) -> String {
    format!("{class_name}Mapping")
}

/// Take `base`, else `base + suffix`, else the first free numbered variant.
fn claim(taken: &mut HashSet<String>, base: String, suffix: &str) -> String {
    let mut candidate = base.clone();
    if taken.contains(&candidate) && !suffix.is_empty() {
        candidate = format!("{base}{suffix}");
    }

    let stem = candidate.clone();
    let mut counter = 2;
    while taken.contains(&candidate) {
        candidate = format!("{stem}{counter}");
        counter += 1;
    }

    taken.insert(candidate.clone());
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemashift_core::{RawMetadataRow, build_schema};

    fn row(table: &str, column: &str, constraint: Option<&str>, target: Option<&str>) -> RawMetadataRow {
        RawMetadataRow {
            table: Some(table.to_string()),
            column: Some(column.to_string()),
            source_type: "NUMBER".to_string(),
            constraint_type: constraint.map(str::to_string),
            ref_table: target.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn title_case_lowers_then_capitalizes_words() {
        assert_eq!(title_case("EMP_ID"), "EmpId");
        assert_eq!(title_case("EMP"), "Emp");
        assert_eq!(title_case("order line"), "OrderLine");
        assert_eq!(title_case("ADDR2_LINE"), "Addr2Line");
        assert_eq!(title_case("mixedCase"), "Mixedcase");
    }

    #[test]
    fn oracle_special_characters_become_word_breaks() {
        assert_eq!(title_case("SYS$LOG"), "SysLog");
        assert_eq!(title_case("ITEM#NO"), "ItemNo");
        assert_eq!(title_case("AUD$"), "Aud");
        assert_eq!(type_name("$$"), "Unnamed");
    }

    #[test]
    fn plural_names_pluralize_the_last_word() {
        assert_eq!(plural_type_name("EMP"), "Emps");
        assert_eq!(plural_type_name("ORDER_LINE"), "OrderLines");
        assert_eq!(plural_type_name("CATEGORY"), "Categories");
    }

    #[test]
    fn type_names_never_start_with_a_digit() {
        assert_eq!(type_name("2FA_CODE"), "_2faCode");
    }

    #[test]
    fn self_reference_navigation_avoids_the_class_name() {
        let schema = build_schema(vec![
            row("EMP", "EMP_ID", Some("P"), None),
            row("EMP", "MGR_ID", Some("R"), Some("EMP")),
        ])
        .expect("build")
        .schema;

        let names = MemberNames::for_table(schema.table("EMP").expect("emp"));
        assert_eq!(names.class_name(), "Emp");
        assert_eq!(names.reference("EMP"), Some("EmpNavigation"));
        assert_eq!(names.collection("EMP"), Some("Emps"));
        assert_eq!(names.mapping_name(), "EmpMapping");
    }

    #[test]
    fn navigation_colliding_with_a_column_gets_a_suffix() {
        let schema = build_schema(vec![row("EMP", "DEPT", Some("R"), Some("DEPT"))])
            .expect("build")
            .schema;

        let names = MemberNames::for_table(schema.table("EMP").expect("emp"));
        assert_eq!(names.property("DEPT"), Some("Dept"));
        assert_eq!(names.reference("DEPT"), Some("DeptNavigation"));
    }

    #[test]
    fn colliding_properties_are_numbered() {
        let schema = build_schema(vec![
            row("NOTE", "NOTE", None, None),
            row("NOTE", "EMP_ID", None, None),
            row("NOTE", "EMP ID", None, None),
        ])
        .expect("build")
        .schema;

        let names = MemberNames::for_table(schema.table("NOTE").expect("note"));
        assert_eq!(names.property("NOTE"), Some("NoteValue"));
        assert_eq!(names.property("EMP_ID"), Some("EmpId"));
        assert_eq!(names.property("EMP ID"), Some("EmpId2"));
    }
}
