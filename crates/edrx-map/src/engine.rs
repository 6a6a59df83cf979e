//! The generic field extractor.
//!
//! One engine interprets every feed's field map. All raw-JSON shape
//! handling lives here: scalar coercion, list joining, sub-object
//! attribute extraction, and row expansion. Per-record problems never
//! abort extraction; a missing or oddly-shaped field resolves to the
//! column's placeholder.

use edrx_model::{CustomerLookup, Row, Table};
use serde_json::{Map, Value};
use tracing::debug;

use crate::sanitize::sanitize_text;
use crate::types::{FeedSpec, FieldMap, FieldRule, FieldSpec};

/// Separator for multi-valued fields, inherited from the BI consumers.
pub const LIST_SEPARATOR: &str = "; ";

/// Flatten a whole snapshot into a table with the field map's columns.
pub fn extract_table(
    spec: &FeedSpec,
    records: &[Map<String, Value>],
    lookup: &CustomerLookup,
) -> Table {
    let mut table = Table::new(spec.kind, spec.field_map.columns());
    for record in records {
        for row in extract_rows(&spec.field_map, record, lookup) {
            table.push_row(row);
        }
    }
    debug!(
        feed = %spec.kind,
        records = records.len(),
        rows = table.len(),
        "extracted snapshot"
    );
    table
}

/// Flatten one raw record into one or more normalized rows.
///
/// Exactly one row is produced unless the map's `expand` field names a
/// list of sub-objects, in which case one row is produced per sub-object.
/// A record missing its entity key still extracts; key integrity is the
/// deduplicator's concern.
pub fn extract_rows(
    map: &FieldMap,
    record: &Map<String, Value>,
    lookup: &CustomerLookup,
) -> Vec<Row> {
    expansion_contexts(map, record)
        .into_iter()
        .map(|context| {
            map.fields
                .iter()
                .map(|field| {
                    let value = apply_rule(field, record, context, lookup)
                        .map(|text| {
                            if field.sanitize {
                                sanitize_text(&text)
                            } else {
                                text
                            }
                        })
                        .unwrap_or_else(|| field.placeholder.render().to_string());
                    (field.column.clone(), value)
                })
                .collect()
        })
        .collect()
}

/// Sub-object contexts for row expansion.
///
/// A list of scalars (the common shape for `products`) does not expand:
/// those are a joined attribute, not a row-expansion key. Only a list
/// nesting one sub-object per product yields one row per sub-object.
fn expansion_contexts<'a>(
    map: &FieldMap,
    record: &'a Map<String, Value>,
) -> Vec<Option<&'a Map<String, Value>>> {
    let Some(field) = map.expand.as_deref() else {
        return vec![None];
    };
    match record.get(field) {
        Some(Value::Array(items)) if items.iter().any(Value::is_object) => {
            items.iter().filter_map(|v| v.as_object().map(Some)).collect()
        }
        _ => vec![None],
    }
}

/// Evaluate one rule; `None` means "fall back to the placeholder".
fn apply_rule(
    field: &FieldSpec,
    record: &Map<String, Value>,
    context: Option<&Map<String, Value>>,
    lookup: &CustomerLookup,
) -> Option<String> {
    match &field.rule {
        FieldRule::Direct { source } | FieldRule::JoinList { source } => {
            present(record.get(source)).map(scalar_text)
        }
        FieldRule::JoinObjectAttr { source, attr } => {
            let items = present(record.get(source))?.as_array()?;
            Some(join_object_attr(items, attr))
        }
        FieldRule::ObjectAttr { source, attr } => {
            let object = present(record.get(source))?.as_object()?;
            present(object.get(attr)).map(scalar_text)
        }
        FieldRule::ExpandedAttr { attr } => {
            present(context?.get(attr)).map(scalar_text)
        }
        FieldRule::Customer { source } => {
            let tenant = present(record.get(source))
                .map(scalar_text)
                .unwrap_or_default();
            Some(lookup.resolve(&tenant).to_string())
        }
        FieldRule::Constant => None,
    }
}

fn present(value: Option<&Value>) -> Option<&Value> {
    match value {
        None | Some(Value::Null) => None,
        Some(other) => Some(other),
    }
}

fn join_object_attr(items: &[Value], attr: &str) -> String {
    let parts: Vec<String> = items
        .iter()
        .filter_map(|item| present(item.as_object()?.get(attr)))
        .map(scalar_text)
        .collect();
    parts.join(LIST_SEPARATOR)
}

/// Coerce a JSON value to output text.
///
/// Lists are joined with the multi-value separator, dropping `null`
/// entries. Numbers and booleans render in their canonical JSON form,
/// which is locale-independent. A sub-object reaching this point is a
/// map misconfiguration; it renders as compact JSON so the data is not
/// silently lost.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .filter(|v| !v.is_null())
            .map(scalar_text)
            .collect::<Vec<_>>()
            .join(LIST_SEPARATOR),
        Value::Object(_) => {
            debug!("coercing unexpected sub-object to JSON text");
            serde_json::to_string(value).unwrap_or_default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldSpec;
    use edrx_model::PlaceholderKind;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        value.as_object().expect("object literal").clone()
    }

    fn single_row(map: &FieldMap, rec: &Map<String, Value>) -> Row {
        let rows = extract_rows(map, rec, &CustomerLookup::builtin());
        assert_eq!(rows.len(), 1);
        rows.into_iter().next().unwrap()
    }

    #[test]
    fn direct_fields_and_placeholders() {
        let map = FieldMap::new(vec![
            FieldSpec::direct("Hostname", "hostname"),
            FieldSpec::direct("Site", "site_name"),
            FieldSpec::pending("Sensor Tags"),
            FieldSpec::unpopulated("Pod ID"),
        ]);
        let rec = record(json!({"hostname": "WEB01"}));
        let row = single_row(&map, &rec);

        assert_eq!(row.value("Hostname"), "WEB01");
        // Absent source field: empty placeholder.
        assert_eq!(row.value("Site"), "");
        // Constant columns render their placeholder kind.
        assert_eq!(row.value("Sensor Tags"), PlaceholderKind::Pending.render());
        assert_eq!(row.value("Pod ID"), " ");
    }

    #[test]
    fn present_but_empty_differs_from_absent() {
        let map = FieldMap::new(vec![FieldSpec::direct("Site", "site_name")
            .placeholder(PlaceholderKind::Pending)]);

        let empty = single_row(&map, &record(json!({"site_name": ""})));
        assert_eq!(empty.value("Site"), "");

        let absent = single_row(&map, &record(json!({})));
        assert_eq!(absent.value("Site"), " ");
    }

    #[test]
    fn lists_join_and_drop_nulls() {
        let map = FieldMap::new(vec![
            FieldSpec::join_list("OU", "ou"),
            FieldSpec::join_list("Tags", "tags"),
        ]);
        let rec = record(json!({
            "ou": ["Corp", null, "Workstations", 7],
            "tags": "solo"
        }));
        let row = single_row(&map, &rec);

        assert_eq!(row.value("OU"), "Corp; Workstations; 7");
        // Non-list values pass through unchanged.
        assert_eq!(row.value("Tags"), "solo");
    }

    #[test]
    fn sub_object_lists_extract_named_attribute() {
        let map = FieldMap::new(vec![FieldSpec::join_attr("GroupNames", "groups", "name")]);
        let rec = record(json!({
            "groups": [
                {"id": "g1", "name": "Servers"},
                {"id": "g2"},
                {"id": "g3", "name": "Canada"}
            ]
        }));
        let row = single_row(&map, &rec);
        assert_eq!(row.value("GroupNames"), "Servers; Canada");
    }

    #[test]
    fn nested_object_attribute() {
        let map = FieldMap::new(vec![
            FieldSpec::object_attr("CVE ID", "cve", "id"),
            FieldSpec::object_attr("CVSS Base Score", "cve", "base_score"),
        ]);
        let rec = record(json!({"cve": {"id": "CVE-2024-0001", "base_score": 9.8}}));
        let row = single_row(&map, &rec);
        assert_eq!(row.value("CVE ID"), "CVE-2024-0001");
        assert_eq!(row.value("CVSS Base Score"), "9.8");
    }

    #[test]
    fn customer_lookup_resolves_and_defaults() {
        let map = FieldMap::new(vec![FieldSpec::customer("Customer Name", "cid")]);

        let known = single_row(
            &map,
            &record(json!({"cid": "850b517a9a8e448689dc6ff8aabc7932"})),
        );
        assert_eq!(known.value("Customer Name"), "Russel Metals Inc.");

        let unknown = single_row(&map, &record(json!({"cid": "ffff"})));
        assert_eq!(unknown.value("Customer Name"), "");

        let missing = single_row(&map, &record(json!({})));
        assert_eq!(missing.value("Customer Name"), "");
    }

    #[test]
    fn scalar_product_list_does_not_expand_rows() {
        let map = FieldMap::new(vec![
            FieldSpec::direct("Hostname", "hostname"),
            FieldSpec::join_list("Products", "products"),
        ])
        .with_expand("products");
        let rec = record(json!({
            "hostname": "WEB01",
            "products": ["ProductA", "ProductB"]
        }));

        let rows = extract_rows(&map, &rec, &CustomerLookup::builtin());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value("Products"), "ProductA; ProductB");
    }

    #[test]
    fn sub_object_product_list_expands_one_row_each() {
        let map = FieldMap::new(vec![
            FieldSpec::direct("Hostname", "hostname"),
            FieldSpec::expanded("Product", "product_name_version"),
        ])
        .with_expand("apps");
        let rec = record(json!({
            "hostname": "WEB01",
            "apps": [
                {"product_name_version": "openssl 1.1.1"},
                {"product_name_version": "nginx 1.18"}
            ]
        }));

        let rows = extract_rows(&map, &rec, &CustomerLookup::builtin());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].value("Product"), "openssl 1.1.1");
        assert_eq!(rows[1].value("Product"), "nginx 1.18");
        assert_eq!(rows[1].value("Hostname"), "WEB01");
    }

    #[test]
    fn sanitize_flag_cleans_joined_text() {
        let map = FieldMap::new(vec![
            FieldSpec::join_attr("Steps", "extra_remediation_steps", "text").sanitized(),
        ]);
        let rec = record(json!({
            "extra_remediation_steps": [
                {"text": "see \"\r, https://vendor.example/kb"},
                {"text": "reboot\thost"}
            ]
        }));
        let row = single_row(&map, &rec);
        assert_eq!(
            row.value("Steps"),
            "see , https://vendor.example/kb; reboot host"
        );
    }
}
