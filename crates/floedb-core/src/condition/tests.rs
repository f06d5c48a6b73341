use super::*;
use crate::query::{ConditionExt, FieldExt};
use proptest::prelude::*;

fn eq(name: &str, value: impl Into<Value>) -> Condition {
    Condition::eq(Attribute::new(name, value).unwrap())
}

fn gt(name: &str, value: impl Into<Value>) -> Condition {
    Condition::gt(Attribute::new(name, value).unwrap())
}

#[test]
fn leaf_constructors_set_the_kind() {
    let attribute = Attribute::new("age", 10_i64).unwrap();

    assert_eq!(
        Condition::eq(attribute.clone()).kind(),
        ConditionKind::Equals
    );
    assert_eq!(
        Condition::gte(attribute.clone()).kind(),
        ConditionKind::GreaterEqualsThan
    );
    assert_eq!(
        Condition::lte(attribute.clone()).kind(),
        ConditionKind::LesserEqualsThan
    );
    assert_eq!(Condition::in_(attribute.clone()).kind(), ConditionKind::In);
    assert_eq!(Condition::like(attribute).kind(), ConditionKind::Like);
}

#[test]
fn leaf_keeps_the_attribute_unchanged() {
    let attribute = Attribute::new("name", "otavio").unwrap();
    let condition = Condition::eq(attribute.clone());

    assert_eq!(condition.attribute(), Some(&attribute));
    assert!(condition.children().is_none());
}

#[test]
fn chained_and_builds_one_flat_node() {
    let (a, b, c) = (eq("a", 1), eq("b", 2), eq("c", 3));

    let condition = a.clone().and(b.clone()).and(c.clone());

    assert_eq!(condition.kind(), ConditionKind::And);
    assert_eq!(condition.name_field(), "_AND");
    assert_eq!(condition.children(), Some(&[a, b, c][..]));
}

#[test]
fn chained_or_builds_one_flat_node() {
    let (a, b, c) = (eq("a", 1), eq("b", 2), eq("c", 3));

    let condition = a.clone().or(b.clone()).or(c.clone());

    assert_eq!(condition.kind(), ConditionKind::Or);
    assert_eq!(condition.name_field(), "_OR");
    assert_eq!(condition.children(), Some(&[a, b, c][..]));
}

#[test]
fn and_of_a_non_and_starts_a_fresh_pair() {
    let (a, b, c) = (eq("a", 1), eq("b", 2), eq("c", 3));

    // OR on the left must not be absorbed into the new AND
    let condition = a.clone().or(b.clone()).and(c.clone());

    assert_eq!(
        condition,
        Condition::all(vec![Condition::any(vec![a, b]), c])
    );
}

#[test]
fn appended_composite_stays_one_child() {
    let (a, b, c, d) = (eq("a", 1), eq("b", 2), eq("c", 3), eq("d", 4));

    // the right-hand side is appended wholesale, not spliced
    let rhs = c.clone().and(d.clone());
    let condition = a.clone().and(b.clone()).and(rhs.clone());

    assert_eq!(condition.children(), Some(&[a, b, rhs][..]));
}

#[test]
fn eq_and_gt_compose_like_the_recorded_scenario() {
    let name = eq("name", "otavio");
    let age = gt("age", 10_i64);

    let condition = name.clone().and(age.clone());

    assert_eq!(condition.kind(), ConditionKind::And);
    assert_eq!(condition.name_field(), "_AND");

    let children = condition.children().unwrap();
    assert_eq!(children.len(), 2);
    assert!(children.contains(&name));
    assert!(children.contains(&age));
    assert_eq!(children, &[name, age][..]);
}

#[test]
fn negate_wraps_and_unwraps() {
    let leaf = eq("a", 1);

    let negated = leaf.clone().negate();
    assert_eq!(negated.kind(), ConditionKind::Not);
    assert_eq!(negated.name_field(), "_NOT");

    assert_eq!(negated.negate(), leaf);
}

#[test]
fn negate_is_involutive_for_composites() {
    let condition = eq("a", 1).and(eq("b", 2)).or(eq("c", 3));

    assert_eq!(condition.clone().negate().negate(), condition);
}

#[test]
fn between_accepts_exactly_two_bounds() {
    let attribute = Attribute::new("age", vec![12_i64, 13]).unwrap();

    let condition = Condition::between(attribute).unwrap();
    assert_eq!(condition.kind(), ConditionKind::Between);

    let (low, high) = condition.between_bounds().unwrap();
    assert_eq!((low, high), (&Value::Int(12), &Value::Int(13)));

    // the stored payload is the untouched two-element list
    let bounds: Vec<i64> = condition.attribute().unwrap().get().unwrap();
    assert_eq!(bounds, vec![12, 13]);
}

#[test]
fn between_rejects_wrong_arity() {
    for bounds in [vec![], vec![12_i64], vec![12, 13, 14]] {
        let attribute = Attribute::new("age", bounds).unwrap();
        let err = Condition::between(attribute).unwrap_err();
        assert!(matches!(err, ArgumentError::Invalid { .. }));
    }
}

#[test]
fn between_rejects_non_list_payloads() {
    let attribute = Attribute::new("age", 12_i64).unwrap();
    let err = Condition::between(attribute).unwrap_err();

    assert!(matches!(err, ArgumentError::Invalid { .. }));
}

#[test]
fn static_aggregation_preserves_order() {
    let (a, b, c) = (eq("a", 1), eq("b", 2), eq("c", 3));

    let all = Condition::all(vec![a.clone(), b.clone(), c.clone()]);
    assert_eq!(all.children(), Some(&[a.clone(), b.clone(), c.clone()][..]));

    let any = Condition::any(vec![c.clone(), a.clone(), b.clone()]);
    assert_eq!(any.children(), Some(&[c, a, b][..]));
}

#[test]
fn subquery_embeds_a_query() {
    let mut inner = SelectQuery::new("addresses").unwrap();
    inner.and(eq("city", 1));
    inner.add("street").unwrap();

    let condition = Condition::subquery(inner.clone());

    assert_eq!(condition.kind(), ConditionKind::Subquery);
    assert_eq!(condition.name_field(), "_SUBQUERY");
    assert_eq!(condition, Condition::Subquery(Box::new(inner)));
}

#[test]
fn equality_is_structural_and_recursive() {
    let left = eq("a", 1).and(eq("b", 2)).negate();
    let right = eq("a", 1).and(eq("b", 2)).negate();

    assert_eq!(left, right);
    assert_ne!(left, eq("a", 1).and(eq("b", 3)).negate());
    // same children, different operator
    assert_ne!(
        Condition::all(vec![eq("a", 1)]),
        Condition::any(vec![eq("a", 1)])
    );
}

#[test]
fn operators_delegate_to_the_algebra() {
    let (a, b, c) = (eq("a", 1), eq("b", 2), eq("c", 3));

    assert_eq!(
        (a.clone() & b.clone()) & c.clone(),
        a.clone().and(b.clone()).and(c.clone())
    );
    assert_eq!(a.clone() | b.clone(), a.clone().or(b.clone()));
    assert_eq!(!a.clone(), a.negate());
}

#[test]
fn normalize_flattens_nested_composites() {
    let (a, b, c) = (eq("a", 1), eq("b", 2), eq("c", 3));

    let nested = Condition::all(vec![
        Condition::all(vec![a.clone(), b.clone()]),
        c.clone(),
    ]);

    assert_eq!(nested.normalize(), Condition::all(vec![a, b, c]));
}

#[test]
fn normalize_collapses_single_child_composites() {
    let a = eq("a", 1);

    assert_eq!(Condition::all(vec![a.clone()]).normalize(), a.clone());
    assert_eq!(
        Condition::any(vec![Condition::all(vec![a.clone()])]).normalize(),
        a
    );
}

#[test]
fn normalize_strips_double_negation_below_the_root() {
    let a = eq("a", 1);

    let tree = Condition::all(vec![
        Condition::Not(Box::new(Condition::Not(Box::new(a.clone())))),
        eq("b", 2),
    ]);

    assert_eq!(tree.normalize(), Condition::all(vec![a, eq("b", 2)]));
}

#[test]
fn normalize_preserves_child_order() {
    let (a, b, c) = (eq("a", 1), eq("b", 2), eq("c", 3));

    let nested = Condition::any(vec![
        c.clone(),
        Condition::any(vec![a.clone(), b.clone()]),
    ]);

    assert_eq!(nested.normalize(), Condition::any(vec![c, a, b]));
}

#[test]
fn composite_condition_survives_a_json_round_trip() {
    let condition = eq("name", "otavio")
        .and(gt("age", 10_i64))
        .or(Condition::between(Attribute::new("age", vec![12_i64, 13]).unwrap()).unwrap());

    let json = serde_json::to_string(&condition).unwrap();
    let back: Condition = serde_json::from_str(&json).unwrap();

    assert_eq!(back, condition);
}

// --- Properties ---

fn leaf_strategy() -> impl Strategy<Value = Condition> {
    ("[a-z]{1,8}", any::<i64>())
        .prop_map(|(name, n)| Condition::eq(Attribute::new(name, n).unwrap()))
}

fn condition_strategy() -> impl Strategy<Value = Condition> {
    leaf_strategy().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 1..4).prop_map(Condition::all),
            prop::collection::vec(inner.clone(), 1..4).prop_map(Condition::any),
            inner.prop_map(Condition::negate),
        ]
    })
}

proptest! {
    #[test]
    fn negate_is_involutive(condition in condition_strategy()) {
        prop_assert_eq!(condition.clone().negate().negate(), condition);
    }

    #[test]
    fn folded_and_chain_stays_flat(leaves in prop::collection::vec(leaf_strategy(), 2..6)) {
        let mut iter = leaves.clone().into_iter();
        let first = iter.next().unwrap();
        let folded = iter.fold(first, Condition::and);

        prop_assert_eq!(folded.children(), Some(&leaves[..]));
    }

    #[test]
    fn normalize_is_idempotent(condition in condition_strategy()) {
        let once = condition.normalize();
        prop_assert_eq!(once.clone().normalize(), once);
    }
}
