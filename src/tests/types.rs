use super::*;

#[test]
fn atomic_types_have_no_elements() {
    for t in [Type::Bool, Type::Individual, Type::Integer, Type::Rational, Type::Real] {
        assert_eq!(t.len(), 0);
        assert!(t.is_empty());
        assert_eq!(t.iter().count(), 0);
    }
    assert_eq!(Type::Bool.kind(), Kind::Bool);
    assert_eq!(Type::Real.kind(), Kind::Real);
}

#[test]
fn compound_type_elements() {
    let t = Type::of(Kind::Func, vec![Type::Bool, Type::Real]);
    assert_eq!(t.kind(), Kind::Func);
    assert_eq!(t.len(), 2);
    assert_eq!(t[0], Type::Bool);
    assert_eq!(t[1], Type::Real);
    let collected: Vec<_> = t.iter().cloned().collect();
    assert_eq!(collected, vec![Type::Bool, Type::Real]);
}

#[test]
fn func_puts_result_first() {
    let t = Type::func(Type::Individual, &[Type::Integer, Type::Real]);
    assert_eq!(t, Type::of(Kind::Func, vec![Type::Individual, Type::Integer, Type::Real]));
}

#[test]
fn compound_types_have_value_equality() {
    let a = Type::of(Kind::Func, vec![Type::Bool, Type::Integer]);
    let b = Type::of(Kind::Func, vec![Type::Bool, Type::Integer]);
    assert_eq!(a, b);
    assert_ne!(a, Type::of(Kind::Func, vec![Type::Bool, Type::Real]));
    assert_ne!(a, Type::of(Kind::Func, vec![Type::Bool, Type::Integer, Type::Integer]));

    use std::collections::HashSet;
    let set: HashSet<Type> = [a.clone(), b].into_iter().collect();
    assert_eq!(set.len(), 1);
}

#[test]
fn nested_compound_equality() {
    let inner = || Type::func(Type::Bool, &[Type::Individual]);
    let a = Type::func(Type::Individual, &[inner()]);
    let b = Type::func(Type::Individual, &[inner()]);
    assert_eq!(a, b);
}

#[test]
#[should_panic]
fn index_out_of_range_panics() {
    let t = Type::func(Type::Bool, &[Type::Real]);
    let _ = &t[2];
}

#[test]
#[should_panic]
fn index_atomic_panics() {
    let _ = &Type::Integer[0];
}

#[test]
fn total_order() {
    assert_eq!(Type::Integer.cmp(&Type::Integer), Ordering::Equal);
    assert_ne!(Type::Integer.cmp(&Type::Real), Ordering::Equal);

    let bi = Type::func(Type::Bool, &[Type::Integer]);
    let br = Type::func(Type::Bool, &[Type::Real]);
    let bii = Type::func(Type::Bool, &[Type::Integer, Type::Integer]);
    assert_eq!(bi.cmp(&bi.clone()), Ordering::Equal);
    assert_eq!(bi.cmp(&br), Ordering::Less);
    assert_eq!(bi.cmp(&bii), Ordering::Less);
    assert_eq!(bii.cmp(&bi), Ordering::Greater);
    assert!(Type::Real < bi);
}

#[test]
fn numeric_types() {
    assert!(Type::Integer.is_numeric());
    assert!(Type::Rational.is_numeric());
    assert!(Type::Real.is_numeric());
    assert!(!Type::Bool.is_numeric());
    assert!(!Type::Individual.is_numeric());
    assert!(!Type::func(Type::Integer, &[]).is_numeric());
}

#[test]
fn display() {
    assert_eq!(Type::Bool.to_string(), "Bool");
    assert_eq!(
        Type::func(Type::Bool, &[Type::Real]).to_string(),
        "Func[Bool, Real]"
    );
}
