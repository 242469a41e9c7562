use crate::value::{Value, canonical_cmp};
use std::cmp::Ordering;

// ---- helpers -----------------------------------------------------------

fn v_txt(s: &str) -> Value {
    Value::Text(s.to_string())
}

#[test]
fn rank_orders_null_numeric_text_blob() {
    let ordered = [
        Value::Null,
        Value::Int(-3),
        Value::Float(2.5),
        v_txt("a"),
        Value::Blob(vec![0]),
    ];

    for pair in ordered.windows(2) {
        assert_eq!(canonical_cmp(&pair[0], &pair[1]), Ordering::Less, "{pair:?}");
    }
}

#[test]
fn int_and_float_compare_numerically() {
    assert_eq!(Value::Int(1), Value::Float(1.0));
    assert!(Value::Int(2) > Value::Float(1.5));
    assert!(Value::Float(-0.5) < Value::Int(0));
}

#[test]
fn text_compares_lexicographically() {
    assert!(v_txt("Bulbasaur") < v_txt("Pikachu"));
    assert_eq!(v_txt("Pikachu"), v_txt("Pikachu"));
    assert_ne!(v_txt("Pikachu"), Value::Int(25));
}

#[test]
fn conversions_cover_scalars() {
    assert_eq!(Value::from(25), Value::Int(25));
    assert_eq!(Value::from(true), Value::Int(1));
    assert_eq!(Value::from("Pikachu"), v_txt("Pikachu"));
    assert_eq!(Value::from(None::<i64>), Value::Null);
    assert_eq!(Value::from(Some("Eevee")), v_txt("Eevee"));
}

#[test]
fn accessors_are_variant_strict() {
    assert_eq!(Value::Int(7).as_int(), Some(7));
    assert_eq!(v_txt("7").as_int(), None);
    assert_eq!(Value::Int(7).as_float(), Some(7.0));
    assert_eq!(v_txt("Mew").as_text(), Some("Mew"));
    assert!(Value::Null.is_null());
    assert_eq!(Value::Blob(vec![1, 2]).as_blob(), Some(&[1u8, 2][..]));
}

#[test]
fn display_is_sql_flavoured() {
    assert_eq!(Value::Null.to_string(), "NULL");
    assert_eq!(Value::Int(25).to_string(), "25");
    assert_eq!(v_txt("Pikachu").to_string(), "'Pikachu'");
    assert_eq!(Value::Blob(vec![1, 2, 3]).to_string(), "<blob 3 bytes>");
}

#[test]
fn serializes_untagged() {
    let json = serde_json::to_string(&vec![Value::Int(25), v_txt("Pikachu"), Value::Null])
        .expect("values should serialize");

    assert_eq!(json, r#"[25,"Pikachu",null]"#);
}
