use proptest::prelude::*;
use simplicity_codec::analysis::cost;
use simplicity_codec::codec::{decode_program, decode_witness, encode_program, encode_witness};
use simplicity_codec::ser::{
    natural_bit_len, read_natural, write_natural, BitReader, BitWriter, SerKind, MAX_NATURAL,
};
use simplicity_codec::{
    Digest256, Expression, ExpressionBuilder, NodeId, Program, Roots, Value, WitnessAssignment,
};

struct Reference {
    program: &'static str,
    witness: &'static str,
    cmr: &'static str,
    imr: &'static str,
    amr: &'static str,
    cost: u32,
}

fn check(expr: Expression, values: &[Value], reference: &Reference) {
    let witness = WitnessAssignment::from_values(&expr, values).expect("witness values typecheck");
    let program = Program::new(expr, witness).expect("program is valid");
    let (program_bytes, witness_bytes) = program.encode().unwrap();
    assert_eq!(hex::encode(&program_bytes), reference.program);
    assert_eq!(hex::encode(&witness_bytes), reference.witness);
    assert_eq!(program.cmr().to_hex(), reference.cmr);
    assert_eq!(program.imr().to_hex(), reference.imr);
    assert_eq!(program.amr().to_hex(), reference.amr);
    assert_eq!(program.cost().milli_weight(), reference.cost);

    let decoded = Program::decode(&program_bytes, &witness_bytes).unwrap();
    assert_eq!(decoded.roots(), program.roots());
    assert_eq!(decoded.cost(), program.cost());
}

#[test]
fn lone_unit() {
    let mut builder = ExpressionBuilder::new();
    let unit = builder.unit();
    check(
        builder.finish(unit).unwrap(),
        &[],
        &Reference {
            program: "24",
            witness: "",
            cmr: "62274a89833ece8ba5ff57b28118c0063d3d4a85dd25aae06f87617604402715",
            imr: "8a145d0875918872341de05173f6519af2adea7b025dd474ec67424708d11814",
            amr: "f43210357f4eef1456d66ddee896bfda3742a4139beff26b0a185d256fe016db",
            cost: 100,
        },
    );
}

#[test]
fn unit_witness_feeding_unit() {
    let mut builder = ExpressionBuilder::new();
    let witness = builder.witness();
    let unit = builder.unit();
    let root = builder.comp(witness, unit);
    check(
        builder.finish(root).unwrap(),
        &[Value::Unit],
        &Reference {
            program: "ae9040",
            witness: "",
            cmr: "8e6da02c39fabf499870b739b0bbb39f9b2ff2ac0a028aa0d828dbe264eccbb4",
            imr: "e14a3f994f5506712cd2bad15b985dcb67aa4d452d855eef72442fefb0a807db",
            amr: "b3110763d59fab9163f8b8944c325457389341f53a14ec12cf0538acf890c48a",
            cost: 300,
        },
    );
}

#[test]
fn witness_bit_selects_case_branch() {
    let mut builder = ExpressionBuilder::new();
    let witness = builder.witness();
    let first = builder.unit();
    let pair = builder.pair(witness, first);
    let branch = builder.unit();
    let case = builder.case(branch, branch);
    let root = builder.comp(pair, case);
    check(
        builder.finish(root).unwrap(),
        &[Value::bit(true)],
        &Reference {
            program: "c9d228484050",
            witness: "80",
            cmr: "d2e3aa590df2c706e0f9b026311680efe19759b3182c46e6413adb3981fd3adf",
            imr: "6dc445f5644fc3af2afc284027f64dda0203fc5b289190730ae7d843e2436cab",
            amr: "40bbb2ff5f62e628dd890b734e02d8a1f1d4312596828a5b4c13dd5a4afeb38e",
            cost: 602,
        },
    );
}

#[test]
fn assertion_with_pruned_branch() {
    let mut builder = ExpressionBuilder::new();
    let witness = builder.witness();
    let first = builder.unit();
    let pair = builder.pair(witness, first);
    let branch = builder.unit();
    let assert = builder.assertl(branch, Digest256::from_bytes([0x11; 32]));
    let root = builder.comp(pair, assert);
    check(
        builder.finish(root).unwrap(),
        &[Value::bit(false)],
        &Reference {
            program: "cdd2284b0888888888888888888888888888888888888888888888888888888888888888860180",
            witness: "00",
            cmr: "9d2a26918cf97e7e25e35ca049aa4757f2a732594bd00f1e64fbc3b8013844a3",
            imr: "e63acc03172546ba0ef2fa67122e5131ac1c204694d90d66c16def32e5bb86b6",
            amr: "9e61fb7505dc72e366427dc96de3ac60f10cbd530760d903b65f97b159c3c3e0",
            cost: 602,
        },
    );
}

#[test]
fn disconnect_with_committed_half() {
    let mut builder = ExpressionBuilder::new();
    let unit = builder.unit();
    let both = builder.pair(unit, unit);
    let iden = builder.iden();
    let split = builder.disconnect(both, iden);
    let last = builder.unit();
    let root = builder.comp(split, last);
    let expr = builder.finish(root).unwrap();

    let program = Program::new(expr.clone(), WitnessAssignment::empty()).unwrap();
    assert_eq!(program.bounds().extra_cells, 256);
    assert_eq!(program.bounds().extra_frames, 3);
    check(
        expr,
        &[],
        &Reference {
            program: "c92210384820",
            witness: "",
            cmr: "73c43a6170a47d07852471c5655f15502af2b7714dcb5c89eb390438db758b43",
            imr: "336cfaaa734556669dfb0db6956640305710a093ade1efbd45d5259398548edb",
            amr: "04663835293a5b668f1f02a6198dc1976daf9d49af949bdd6af16f55c03dc3e3",
            cost: 956,
        },
    );
}

#[test]
fn witness_values_decode_back_to_structured_values() {
    let mut builder = ExpressionBuilder::new();
    let witness = builder.witness();
    let first = builder.unit();
    let pair = builder.pair(witness, first);
    let branch = builder.unit();
    let case = builder.case(branch, branch);
    let root = builder.comp(pair, case);
    let expr = builder.finish(root).unwrap();

    let assignment = WitnessAssignment::from_values(&expr, &[Value::bit(false)]).unwrap();
    assert_eq!(assignment.to_values(&expr).unwrap(), vec![Value::bit(false)]);
}

/// Source-polymorphic shapes, so any nesting type checks once composed with
/// a final `unit`. `Branch` and `Assert` each read one witness bit.
#[derive(Debug, Clone)]
enum Shape {
    Unit,
    Iden,
    InjL(Box<Shape>),
    InjR(Box<Shape>),
    Pair(Box<Shape>, Box<Shape>),
    Comp(Box<Shape>, Box<Shape>),
    /// `comp(pair(iden, unit), take s)`
    Take(Box<Shape>),
    /// `comp(pair(unit, iden), drop s)`
    Drop(Box<Shape>),
    /// A witness bit selecting one of two branches.
    Branch(bool, Box<Shape>, Box<Shape>),
    /// A witness bit feeding an assertion whose other branch is hidden
    /// behind `[byte; 32]`.
    Assert { keep_left: bool, byte: u8, kept: Box<Shape> },
}

fn shape() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![Just(Shape::Unit), Just(Shape::Iden)];
    leaf.prop_recursive(6, 64, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(|s| Shape::InjL(Box::new(s))),
            inner.clone().prop_map(|s| Shape::InjR(Box::new(s))),
            (inner.clone(), inner.clone())
                .prop_map(|(l, r)| Shape::Pair(Box::new(l), Box::new(r))),
            (inner.clone(), inner.clone())
                .prop_map(|(l, r)| Shape::Comp(Box::new(l), Box::new(r))),
            inner.clone().prop_map(|s| Shape::Take(Box::new(s))),
            inner.clone().prop_map(|s| Shape::Drop(Box::new(s))),
            (any::<bool>(), inner.clone(), inner.clone())
                .prop_map(|(bit, l, r)| Shape::Branch(bit, Box::new(l), Box::new(r))),
            (any::<bool>(), any::<u8>(), inner).prop_map(|(keep_left, byte, kept)| {
                Shape::Assert {
                    keep_left,
                    byte,
                    kept: Box::new(kept),
                }
            }),
        ]
    })
}

/// Builds `shape`, pushing one value per witness node in the order the
/// nodes end up in the finished expression.
fn build(shape: &Shape, builder: &mut ExpressionBuilder, values: &mut Vec<Value>) -> NodeId {
    match shape {
        Shape::Unit => builder.unit(),
        Shape::Iden => builder.iden(),
        Shape::InjL(inner) => {
            let child = build(inner, builder, values);
            builder.injl(child)
        }
        Shape::InjR(inner) => {
            let child = build(inner, builder, values);
            builder.injr(child)
        }
        Shape::Pair(left, right) => {
            let left = build(left, builder, values);
            let right = build(right, builder, values);
            builder.pair(left, right)
        }
        Shape::Comp(left, right) => {
            let left = build(left, builder, values);
            let right = build(right, builder, values);
            builder.comp(left, right)
        }
        Shape::Take(inner) => {
            let iden = builder.iden();
            let unit = builder.unit();
            let widen = builder.pair(iden, unit);
            let child = build(inner, builder, values);
            let take = builder.take(child);
            builder.comp(widen, take)
        }
        Shape::Drop(inner) => {
            let unit = builder.unit();
            let iden = builder.iden();
            let widen = builder.pair(unit, iden);
            let child = build(inner, builder, values);
            let drop = builder.drop(child);
            builder.comp(widen, drop)
        }
        Shape::Branch(bit, left, right) => {
            let select = selector(builder, values, *bit);
            let left = branch(left, builder, values);
            let right = branch(right, builder, values);
            let case = builder.case(left, right);
            builder.comp(select, case)
        }
        Shape::Assert {
            keep_left,
            byte,
            kept,
        } => {
            let select = selector(builder, values, !*keep_left);
            let kept = branch(kept, builder, values);
            let pruned = Digest256::from_bytes([*byte; 32]);
            let assert = if *keep_left {
                builder.assertl(kept, pruned)
            } else {
                builder.assertr(pruned, kept)
            };
            builder.comp(select, assert)
        }
    }
}

/// `pair(witness, iden)`, with the witness set to `bit`.
fn selector(builder: &mut ExpressionBuilder, values: &mut Vec<Value>, bit: bool) -> NodeId {
    let witness = builder.witness();
    values.push(Value::bit(bit));
    let iden = builder.iden();
    builder.pair(witness, iden)
}

/// `drop(comp(shape, unit))`, a case branch with a unit target.
fn branch(shape: &Shape, builder: &mut ExpressionBuilder, values: &mut Vec<Value>) -> NodeId {
    let body = build(shape, builder, values);
    let unit = builder.unit();
    let closed = builder.comp(body, unit);
    builder.drop(closed)
}

proptest! {
    #[test]
    fn naturals_roundtrip(value in 1u32..=MAX_NATURAL) {
        let mut writer = BitWriter::new();
        write_natural(&mut writer, value, SerKind::Program, "value").unwrap();
        prop_assert_eq!(writer.bit_len(), natural_bit_len(value));
        let bytes = writer.finish();
        let mut reader = BitReader::new(&bytes);
        prop_assert_eq!(read_natural(&mut reader, SerKind::Program, "value").unwrap(), value);
        prop_assert_eq!(reader.position(), natural_bit_len(value));
    }

    #[test]
    fn built_shapes_survive_reencoding(shape in shape()) {
        let mut builder = ExpressionBuilder::new();
        let mut values = Vec::new();
        let body = build(&shape, &mut builder, &mut values);
        let unit = builder.unit();
        let root = builder.comp(body, unit);
        let expr = builder.finish(root).unwrap();
        let witness = WitnessAssignment::from_values(&expr, &values).unwrap();

        let bytes = encode_program(&expr).unwrap();
        let witness_bytes = encode_witness(&witness);
        let decoded = decode_program(&bytes).unwrap();
        let decoded_witness = decode_witness(&witness_bytes, &decoded).unwrap();
        prop_assert_eq!(decoded.nodes(), expr.nodes());
        prop_assert_eq!(encode_program(&decoded).unwrap(), bytes);
        prop_assert_eq!(&decoded_witness, &witness);
        prop_assert_eq!(decoded_witness.to_values(&decoded).unwrap(), values);
        prop_assert_eq!(
            Roots::compute(&decoded, &decoded_witness).unwrap(),
            Roots::compute(&expr, &witness).unwrap()
        );
        prop_assert_eq!(cost(&decoded).unwrap(), cost(&expr).unwrap());
    }
}
