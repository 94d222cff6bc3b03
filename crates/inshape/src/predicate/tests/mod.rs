
use crate::{
    WELL_KNOWN_BUCKET_SIZES,
    field::FieldRef,
    filter::MembershipFilter,
    predicate::{Predicate, ShapeSignature},
};

struct Invoice {
    customer: u32,
    region: u32,
}

const CUSTOMER: FieldRef<Invoice, u32> = FieldRef::new("customer", |i: &Invoice| i.customer);
const REGION: FieldRef<Invoice, u32> = FieldRef::new("region", |i: &Invoice| i.region);

fn in_signature(filter: &MembershipFilter, n: u32) -> ShapeSignature {
    filter
        .predicate_in(CUSTOMER, 0..n)
        .expect("predicate")
        .shape_signature()
}

#[test]
fn signature_ignores_literal_values() {
    let a = MembershipFilter::new()
        .predicate_in(CUSTOMER, [1, 2, 3])
        .expect("predicate");
    let b = MembershipFilter::new()
        .predicate_in(CUSTOMER, [900, 17, 44])
        .expect("predicate");

    assert_ne!(a, b);
    assert_eq!(a.shape_signature(), b.shape_signature());
}

#[test]
fn signature_distinguishes_fields() {
    let a = CUSTOMER.eq(1);
    let b = REGION.eq(1);

    assert_ne!(a.shape_signature(), b.shape_signature());
}

#[test]
fn signature_distinguishes_in_from_not_in() {
    let filter = MembershipFilter::new();
    let matched = filter.predicate_in(CUSTOMER, [1, 2]).expect("in");
    let excluded = filter.predicate_not_in(CUSTOMER, [1, 2]).expect("not in");

    assert_ne!(matched.shape_signature(), excluded.shape_signature());
}

#[test]
fn signature_distinguishes_tree_layout() {
    let left = Predicate::or(Predicate::or(CUSTOMER.eq(1), CUSTOMER.eq(2)), CUSTOMER.eq(3));
    let right = Predicate::or(CUSTOMER.eq(1), Predicate::or(CUSTOMER.eq(2), CUSTOMER.eq(3)));

    assert_ne!(left.shape_signature(), right.shape_signature());
}

#[test]
fn signature_covers_in_list_arity_only() {
    let a = CUSTOMER.in_list(vec![1, 2, 3]);
    let b = CUSTOMER.in_list(vec![7, 8, 9]);
    let c = CUSTOMER.in_list(vec![7, 8]);

    assert_eq!(a.shape_signature(), b.shape_signature());
    assert_ne!(a.shape_signature(), c.shape_signature());
}

#[test]
fn bucketized_sizes_share_one_shape_per_bucket() {
    let filter = MembershipFilter::new();
    let reference = in_signature(&filter, 64);

    for n in 33..=64 {
        if WELL_KNOWN_BUCKET_SIZES.contains(&(n as usize)) {
            assert_ne!(in_signature(&filter, n), reference, "n = {n}");
        } else {
            assert_eq!(in_signature(&filter, n), reference, "n = {n}");
        }
    }
}

#[test]
fn shape_count_grows_logarithmically() {
    let filter = MembershipFilter::new();

    let mut shapes: Vec<ShapeSignature> = (1..=1024).map(|n| in_signature(&filter, n)).collect();
    shapes.sort();
    shapes.dedup();

    // powers of two 1..=1024 plus the four non-zero well-known sizes
    assert_eq!(shapes.len(), 11 + 4);
}

#[test]
fn exact_policy_churns_shapes() {
    let filter = MembershipFilter::new().with_bucketizer(crate::bucket::ExactBucketizer);

    let mut shapes: Vec<ShapeSignature> = (1..=100).map(|n| in_signature(&filter, n)).collect();
    shapes.sort();
    shapes.dedup();

    assert_eq!(shapes.len(), 100);
}

#[test]
fn signature_renders_as_hex() {
    let signature = Predicate::<Invoice, u32>::True.shape_signature();
    let hex = signature.to_string();

    assert_eq!(hex.len(), 64);
    assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    assert_eq!(hex, signature.as_hex());
    assert_eq!(signature.into_bytes().len(), 32);
}

#[test]
fn eval_handles_every_variant() {
    let invoice = Invoice {
        customer: 5,
        region: 2,
    };

    assert!(Predicate::<Invoice, u32>::True.eval(&invoice));
    assert!(!Predicate::<Invoice, u32>::False.eval(&invoice));
    assert!(CUSTOMER.eq(5).eval(&invoice));
    assert!(!REGION.eq(5).eval(&invoice));
    assert!(Predicate::or(REGION.eq(5), REGION.eq(2)).eval(&invoice));
    assert!(!Predicate::not(CUSTOMER.eq(5)).eval(&invoice));
    assert!(CUSTOMER.in_list(vec![1, 5, 9]).eval(&invoice));
    assert!(!CUSTOMER.in_list(Vec::new()).eval(&invoice));
}

#[test]
fn constants_are_reported() {
    assert!(Predicate::<Invoice, u32>::True.is_constant());
    assert!(Predicate::<Invoice, u32>::False.is_constant());
    assert!(!CUSTOMER.eq(1).is_constant());
}

#[test]
fn debug_output_names_fields() {
    let predicate = Predicate::not(Predicate::or(CUSTOMER.eq(1), CUSTOMER.in_list(vec![2])));

    assert_eq!(
        format!("{predicate:?}"),
        "Not(Or(Eq { field: \"customer\", value: 1 }, InList { field: \"customer\", values: [2] }))"
    );
}
