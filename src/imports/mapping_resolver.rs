use std::collections::HashSet;

use super::imports_errors::{ImportError, Result};
use super::imports_model::{ColumnDescriptor, ColumnMap, ColumnMapping, ImportTarget};

/// Proposes an initial header-to-field mapping from the live schema.
///
/// Matching is case-insensitive after squashing spaces, underscores and
/// dashes out of both sides. Exact matches win; otherwise the first header
/// containing the field name (or contained by it) is taken. Each database
/// field is claimed by at most one header, auto-generated key columns are
/// never proposed, and unmatched headers are simply left out for the user
/// to place by hand.
pub fn propose_mapping(
    headers: &[String],
    descriptors: &[ColumnDescriptor],
    target: ImportTarget,
) -> ColumnMapping {
    let mut columns = Vec::new();
    let mut claimed: HashSet<&str> = HashSet::new();

    for header in headers {
        let normalized_header = normalize(header);
        if normalized_header.is_empty() {
            continue;
        }

        let candidates = descriptors
            .iter()
            .filter(|d| !d.is_auto_generated && !claimed.contains(d.name.as_str()));

        let mut exact = None;
        let mut partial = None;
        for descriptor in candidates {
            let normalized_field = normalize(&descriptor.name);
            if normalized_field == normalized_header {
                exact = Some(descriptor);
                break;
            }
            if partial.is_none()
                && (normalized_header.contains(&normalized_field)
                    || normalized_field.contains(&normalized_header))
            {
                partial = Some(descriptor);
            }
        }

        if let Some(descriptor) = exact.or(partial) {
            claimed.insert(descriptor.name.as_str());
            columns.push(ColumnMap {
                header: header.clone(),
                field: descriptor.name.clone(),
            });
        }
    }

    // Only suggest the conventional merge key when a header actually
    // claimed it; otherwise the caller picks one
    let default_merge = target.default_merge_field();
    let merge_field = if claimed.contains(default_merge) {
        default_merge.to_string()
    } else {
        String::new()
    };

    ColumnMapping {
        columns,
        merge_field,
    }
}

/// Rejects mappings the upsert engine cannot act on. Runs before any row is
/// touched so a bad mapping never results in a partial import.
pub fn validate(mapping: &ColumnMapping) -> Result<()> {
    if mapping.is_empty() {
        return Err(ImportError::EmptyMapping);
    }
    if mapping.merge_field.trim().is_empty() {
        return Err(ImportError::MissingMergeKey);
    }
    if !mapping.contains_field(&mapping.merge_field) {
        return Err(ImportError::UnmappedMergeKey(mapping.merge_field.clone()));
    }
    Ok(())
}

/// Checks every mapped field against the table's real columns. Only applies
/// to single-table imports; the linking flow validates against its own
/// fixed field set instead.
pub fn check_columns(
    mapping: &ColumnMapping,
    descriptors: &[ColumnDescriptor],
    target: ImportTarget,
) -> Result<()> {
    let known: HashSet<&str> = descriptors.iter().map(|d| d.name.as_str()).collect();
    for column in &mapping.columns {
        if !known.contains(column.field.as_str()) {
            return Err(ImportError::UnknownColumn(
                column.field.clone(),
                target.table_name().to_string(),
            ));
        }
    }
    Ok(())
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(name: &str) -> ColumnDescriptor {
        ColumnDescriptor {
            name: name.to_string(),
            declared_type: "TEXT".to_string(),
            nullable: true,
            is_auto_generated: false,
            has_default: false,
        }
    }

    fn phone_descriptors() -> Vec<ColumnDescriptor> {
        let mut id = descriptor("id");
        id.is_auto_generated = true;
        vec![
            id,
            descriptor("asset_tag"),
            descriptor("imei"),
            descriptor("manufacturer"),
            descriptor("model"),
            descriptor("status"),
        ]
    }

    #[test]
    fn test_propose_matches_headers_case_insensitively() {
        let headers = vec![
            "Asset Tag".to_string(),
            "IMEI".to_string(),
            "Notes".to_string(),
        ];
        let mapping = propose_mapping(&headers, &phone_descriptors(), ImportTarget::Phones);

        assert_eq!(mapping.header_for_field("asset_tag"), Some("Asset Tag"));
        assert_eq!(mapping.header_for_field("imei"), Some("IMEI"));
        // Unmatched headers are left out rather than guessed
        assert_eq!(mapping.columns.len(), 2);
        assert_eq!(mapping.merge_field, "asset_tag");
    }

    #[test]
    fn test_propose_never_claims_a_field_twice() {
        let headers = vec!["model".to_string(), "Model Name".to_string()];
        let mapping = propose_mapping(&headers, &phone_descriptors(), ImportTarget::Phones);

        let model_maps: Vec<_> = mapping
            .columns
            .iter()
            .filter(|c| c.field == "model")
            .collect();
        assert_eq!(model_maps.len(), 1);
        assert_eq!(model_maps[0].header, "model");
    }

    #[test]
    fn test_propose_skips_auto_generated_columns() {
        let headers = vec!["id".to_string()];
        let mapping = propose_mapping(&headers, &phone_descriptors(), ImportTarget::Phones);
        assert!(mapping.columns.is_empty());
        // No merge suggestion without a mapped merge key
        assert!(mapping.merge_field.is_empty());
    }

    #[test]
    fn test_propose_prefers_exact_over_substring() {
        let headers = vec!["asset_tag".to_string()];
        let descriptors = vec![descriptor("asset_tag_old"), descriptor("asset_tag")];
        let mapping = propose_mapping(&headers, &descriptors, ImportTarget::Phones);
        assert_eq!(mapping.columns[0].field, "asset_tag");
    }

    #[test]
    fn test_validate_rejects_empty_mapping() {
        let mapping = ColumnMapping {
            columns: vec![],
            merge_field: "asset_tag".to_string(),
        };
        assert!(matches!(validate(&mapping), Err(ImportError::EmptyMapping)));
    }

    #[test]
    fn test_validate_rejects_missing_merge_key() {
        let mapping = ColumnMapping {
            columns: vec![ColumnMap {
                header: "IMEI".to_string(),
                field: "imei".to_string(),
            }],
            merge_field: "".to_string(),
        };
        assert!(matches!(
            validate(&mapping),
            Err(ImportError::MissingMergeKey)
        ));
    }

    #[test]
    fn test_validate_rejects_unmapped_merge_key() {
        let mapping = ColumnMapping {
            columns: vec![ColumnMap {
                header: "IMEI".to_string(),
                field: "imei".to_string(),
            }],
            merge_field: "asset_tag".to_string(),
        };
        match validate(&mapping) {
            Err(ImportError::UnmappedMergeKey(field)) => assert_eq!(field, "asset_tag"),
            other => panic!("unexpected: {:?}", other.err()),
        }
    }

    #[test]
    fn test_check_columns_rejects_unknown_field() {
        let mapping = ColumnMapping {
            columns: vec![ColumnMap {
                header: "Color".to_string(),
                field: "color".to_string(),
            }],
            merge_field: "color".to_string(),
        };
        match check_columns(&mapping, &phone_descriptors(), ImportTarget::Phones) {
            Err(ImportError::UnknownColumn(field, table)) => {
                assert_eq!(field, "color");
                assert_eq!(table, "phones");
            }
            other => panic!("unexpected: {:?}", other.err()),
        }
    }
}
