use proptest::prelude::*;
use querymap::builder::{build_select, named_query, NullType, Param, Value, WhereMap, WhereValue};
use std::collections::HashMap;

fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::Int),
        any::<u64>().prop_map(Value::UInt),
        (-1.0e6f64..1.0e6).prop_map(Value::Float),
        any::<bool>().prop_map(Value::Bool),
        "[a-z%]{0,8}".prop_map(Value::Text),
    ]
}

/// A predicate entry whose value always fits its operator
fn arb_entry() -> impl Strategy<Value = (String, WhereValue)> {
    let field = "[a-z]{1,6}";
    prop_oneof![
        (field, arb_value()).prop_map(|(f, v)| (f, WhereValue::Scalar(v))),
        (field, arb_value()).prop_map(|(f, v)| (format!("{} >=", f), WhereValue::Scalar(v))),
        (field, arb_value()).prop_map(|(f, v)| (format!("{} <>", f), WhereValue::Scalar(v))),
        (field, "[a-z%]{1,6}").prop_map(|(f, v)| (format!("{} like", f), WhereValue::from(v))),
        (field, prop::collection::vec(arb_value(), 1..5))
            .prop_map(|(f, v)| (format!("{} in", f), WhereValue::List(v))),
        (field, prop::collection::vec(arb_value(), 1..5))
            .prop_map(|(f, v)| (format!("{} not in", f), WhereValue::List(v))),
        (field, arb_value(), arb_value())
            .prop_map(|(f, lo, hi)| (format!("{} between", f), WhereValue::Range(lo, hi))),
        (field, any::<bool>()).prop_map(|(f, null)| {
            let marker = if null { NullType::IsNull } else { NullType::IsNotNull };
            (f, WhereValue::Null(marker))
        }),
    ]
}

fn arb_where() -> impl Strategy<Value = Vec<(String, WhereValue)>> {
    prop::collection::vec(arb_entry(), 0..12)
}

fn to_map(entries: &[(String, WhereValue)]) -> WhereMap {
    entries.iter().cloned().collect()
}

proptest! {
    #[test]
    fn prop_placeholders_match_values(entries in arb_where(), nested in arb_where()) {
        let mut where_map = to_map(&entries);
        let groups = vec![to_map(&nested), to_map(&entries)];
        where_map.insert("_or".to_string(), WhereValue::or(groups));
        where_map.insert("_limit".to_string(), WhereValue::from(vec![3u32, 9]));

        let stmt = build_select::<&str>("tb", &where_map, &[]).unwrap();
        prop_assert_eq!(stmt.placeholder_count(), stmt.values.len());
    }

    #[test]
    fn prop_compilation_is_deterministic(entries in arb_where(), nested in arb_where()) {
        // operator buckets are hash maps with a fresh seed per compile
        let mut where_map = to_map(&entries);
        where_map.insert("_or".to_string(), WhereValue::or(vec![to_map(&nested)]));

        let first = build_select("tb", &where_map, &["id"]).unwrap();
        for _ in 0..4 {
            prop_assert_eq!(&first, &build_select("tb", &where_map, &["id"]).unwrap());
        }
    }

    #[test]
    fn prop_single_limit_is_zero_based(n in any::<u32>(), entries in arb_where()) {
        let mut short = to_map(&entries);
        short.insert("_limit".to_string(), WhereValue::from(vec![n]));
        let mut full = to_map(&entries);
        full.insert("_limit".to_string(), WhereValue::from(vec![0u32, n]));

        prop_assert_eq!(
            build_select::<&str>("tb", &short, &[]).unwrap(),
            build_select::<&str>("tb", &full, &[]).unwrap()
        );
    }

    #[test]
    fn prop_named_placeholders_match_values(
        lists in prop::collection::vec(prop::collection::vec(arb_value(), 0..4), 1..5)
    ) {
        let mut template = String::from("select * from tb where 1=1");
        let mut params = HashMap::new();
        for (i, list) in lists.into_iter().enumerate() {
            template.push_str(&format!(" and c{} in {{{{p{}}}}}", i, i));
            params.insert(format!("p{}", i), Param::Many(list));
        }

        let stmt = named_query(&template, &params).unwrap();
        prop_assert_eq!(stmt.placeholder_count(), stmt.values.len());
        prop_assert!(!stmt.text.contains("{{"));
    }
}
