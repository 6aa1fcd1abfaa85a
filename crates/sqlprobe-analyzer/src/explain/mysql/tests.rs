//! Tests for MySQL EXPLAIN mapping

use super::*;

const EXPLAIN_COLUMNS: [&str; 12] = [
    "id",
    "select_type",
    "table",
    "partitions",
    "type",
    "possible_keys",
    "key",
    "key_len",
    "ref",
    "rows",
    "filtered",
    "Extra",
];

fn s(value: &str) -> Value {
    Value::String(value.to_string())
}

#[allow(clippy::too_many_arguments)]
fn explain_row(
    id: i64,
    table: &str,
    access_type: &str,
    possible_keys: Value,
    key: Value,
    rows: i64,
    filtered: f64,
    extra: Value,
) -> Vec<Value> {
    vec![
        Value::Int64(id),
        s("SIMPLE"),
        s(table),
        Value::Null,
        s(access_type),
        possible_keys,
        key,
        Value::Null,
        Value::Null,
        Value::Int64(rows),
        Value::Float64(filtered),
        extra,
    ]
}

mod full_result_sets {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_full_scan() {
        let result = QueryResult::from_rows(
            &EXPLAIN_COLUMNS,
            vec![explain_row(
                1,
                "users",
                "ALL",
                Value::Null,
                Value::Null,
                1000,
                10.0,
                s("Using where"),
            )],
        );

        let rows = plan_rows_from_result(&result);
        assert_eq!(rows.len(), 1);

        let row = &rows[0];
        assert_eq!(row.select_id, Some(1));
        assert_eq!(row.select_type.as_deref(), Some("SIMPLE"));
        assert_eq!(row.table.as_deref(), Some("users"));
        assert_eq!(row.access_type, AccessType::All);
        assert_eq!(row.possible_keys, None);
        assert_eq!(row.key, None);
        assert_eq!(row.rows, Some(1000));
        assert_eq!(row.filtered, Some(10.0));
        assert_eq!(row.extra.as_deref(), Some("Using where"));
    }

    #[test]
    fn test_join_preserves_order() {
        let result = QueryResult::from_rows(
            &EXPLAIN_COLUMNS,
            vec![
                explain_row(
                    1,
                    "orders",
                    "ALL",
                    s("idx_customer"),
                    Value::Null,
                    5000,
                    100.0,
                    s("Using temporary; Using filesort"),
                ),
                explain_row(
                    1,
                    "customers",
                    "eq_ref",
                    s("PRIMARY"),
                    s("PRIMARY"),
                    1,
                    100.0,
                    Value::Null,
                ),
            ],
        );

        let rows = plan_rows_from_result(&result);
        let tables: Vec<_> = rows.iter().map(|r| r.table_or_empty()).collect();
        assert_eq!(tables, vec!["orders", "customers"]);
        assert_eq!(rows[0].possible_keys.as_deref(), Some("idx_customer"));
        assert_eq!(rows[1].access_type, AccessType::EqRef);
        assert_eq!(rows[1].key.as_deref(), Some("PRIMARY"));
        assert!(rows[1].extra.is_none());
    }

    #[test]
    fn test_empty_result_set() {
        let result = QueryResult::from_rows(&EXPLAIN_COLUMNS, vec![]);
        assert!(plan_rows_from_result(&result).is_empty());
    }
}

mod lenient_mapping {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_protocol_bytes() {
        let result = QueryResult::from_rows(
            &["id", "table", "type", "key", "rows", "filtered", "Extra"],
            vec![vec![
                Value::Bytes(b"2".to_vec()),
                Value::Bytes(b"orders".to_vec()),
                Value::Bytes(b"range".to_vec()),
                Value::Bytes(b"idx_created".to_vec()),
                Value::Bytes(b"320".to_vec()),
                Value::Bytes(b"33.33".to_vec()),
                Value::Bytes(b"Using index condition".to_vec()),
            ]],
        );

        let row = &plan_rows_from_result(&result)[0];
        assert_eq!(row.select_id, Some(2));
        assert_eq!(row.access_type, AccessType::Range);
        assert_eq!(row.key.as_deref(), Some("idx_created"));
        assert_eq!(row.rows, Some(320));
        assert_eq!(row.filtered, Some(33.33));
        assert_eq!(row.extra.as_deref(), Some("Using index condition"));
    }

    #[test]
    fn test_null_text_and_empty_strings_map_to_none() {
        let result = QueryResult::from_rows(
            &["table", "type", "key", "Extra"],
            vec![vec![s("orders"), s("index"), s("NULL"), s("")]],
        );

        let row = &plan_rows_from_result(&result)[0];
        assert_eq!(row.key, None);
        assert_eq!(row.extra, None);
        assert_eq!(row.access_type, AccessType::Index);
    }

    #[test]
    fn test_missing_columns() {
        let result = QueryResult::from_rows(&["table"], vec![vec![s("orders")]]);

        let row = &plan_rows_from_result(&result)[0];
        assert_eq!(row.table.as_deref(), Some("orders"));
        assert_eq!(row.access_type, AccessType::Unknown);
        assert_eq!(row.key, None);
        assert_eq!(row.rows, None);
        assert_eq!(row.select_id, None);
    }

    #[test]
    fn test_no_tables_used_row() {
        // SELECT 1 plans as a single row with NULL table/type/key
        let result = QueryResult::from_rows(
            &EXPLAIN_COLUMNS,
            vec![vec![
                Value::Int64(1),
                s("SIMPLE"),
                Value::Null,
                Value::Null,
                Value::Null,
                Value::Null,
                Value::Null,
                Value::Null,
                Value::Null,
                Value::Null,
                Value::Null,
                s("No tables used"),
            ]],
        );

        let row = &plan_rows_from_result(&result)[0];
        assert_eq!(row.table, None);
        assert_eq!(row.access_type, AccessType::Unknown);
        assert_eq!(row.rows, None);
        assert_eq!(row.extra.as_deref(), Some("No tables used"));
    }

    #[test]
    fn test_column_names_ignore_case() {
        let result = QueryResult::from_rows(
            &["TABLE", "TYPE", "KEY", "extra"],
            vec![vec![s("t"), s("ALL"), Value::Null, s("Using filesort")]],
        );

        let row = &plan_rows_from_result(&result)[0];
        assert_eq!(row.access_type, AccessType::All);
        assert!(row.extra_contains("Using filesort"));
    }

    #[test]
    fn test_negative_rows_are_dropped() {
        let result = QueryResult::from_rows(
            &["table", "rows"],
            vec![vec![s("t"), Value::Int64(-1)]],
        );
        assert_eq!(plan_rows_from_result(&result)[0].rows, None);
    }
}

mod extra_flags {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_extra_flags() {
        assert_eq!(
            parse_extra_flags("Using where; Using index"),
            vec!["Using where", "Using index"]
        );
        assert_eq!(parse_extra_flags("Using filesort"), vec!["Using filesort"]);
        assert!(parse_extra_flags("").is_empty());
        assert_eq!(parse_extra_flags(" ; Using temporary;"), vec!["Using temporary"]);
    }
}
