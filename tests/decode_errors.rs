use insta::assert_snapshot;
use simplicity_codec::codec::{
    decode_program, decode_program_with_limits, decode_witness, decode_witness_with_limits,
};
use simplicity_codec::node::{Combinator, Expression, NodeId};
use simplicity_codec::ser::{write_natural, BitWriter, SerError, SerKind};
use simplicity_codec::types::TypeError;
use simplicity_codec::vectors::type_skip;
use simplicity_codec::{
    ConfigError, DecodeError, DecodeLimits, Digest256, ExpressionBuilder, Program, Value,
    WitnessAssignment,
};

const BITCASE: [u8; 6] = [0xc9, 0xd2, 0x28, 0x48, 0x40, 0x50];

fn program(nodes: usize, body: impl FnOnce(&mut BitWriter)) -> Vec<u8> {
    let mut writer = BitWriter::new();
    write_natural(&mut writer, nodes as u32, SerKind::Program, "node count").unwrap();
    body(&mut writer);
    writer.finish()
}

fn offset(writer: &mut BitWriter, value: u32) {
    write_natural(writer, value, SerKind::Program, "child offset").unwrap();
}

fn id(index: usize) -> NodeId {
    NodeId::new(index)
}

#[test]
fn truncated_input_is_malformed() {
    let err = decode_program(&[]).expect_err("empty input");
    assert!(matches!(
        err,
        DecodeError::MalformedEncoding(SerError::UnexpectedEnd { .. })
    ));
    assert_snapshot!(err.to_string(), @"malformed encoding: program bitstream ended early while reading node count");

    let mut truncated = type_skip::PROGRAM.to_vec();
    truncated.truncate(100);
    assert!(matches!(
        decode_program(&truncated),
        Err(DecodeError::MalformedEncoding(SerError::UnexpectedEnd { .. }))
    ));
}

#[test]
fn padding_and_trailing_bytes() {
    assert!(matches!(
        decode_program(&[0x25]),
        Err(DecodeError::MalformedEncoding(SerError::IllegalPadding { .. }))
    ));
    assert!(matches!(
        decode_program(&[0x24, 0x00]),
        Err(DecodeError::MalformedEncoding(SerError::TrailingBytes { .. }))
    ));
}

#[test]
fn unsupported_node_codes() {
    let cases: [(u8, &str); 4] = [(0x60, "jet"), (0x40, "word"), (0x28, "fail"), (0x2c, "stop")];
    for (byte, tag) in cases {
        assert_eq!(
            decode_program(&[byte]).unwrap_err(),
            DecodeError::InvalidNodeTag { index: 0, tag }
        );
    }
    assert_snapshot!(
        decode_program(&[0x60]).unwrap_err().to_string(),
        @"node 0: unsupported node code `jet`"
    );
}

#[test]
fn child_offset_past_the_start() {
    let bytes = program(2, |w| {
        w.write_bits(0b01001, 5);
        w.write_bits(0b00000, 5);
        offset(w, 1);
        offset(w, 3);
    });
    let err = decode_program(&bytes).unwrap_err();
    assert_eq!(err, DecodeError::BadIndex { index: 1, offset: 3 });
    assert_snapshot!(err.to_string(), @"node 1: child offset 3 is out of range");
}

#[test]
fn hidden_root_is_rejected() {
    let bytes = program(1, |w| {
        w.write_bits(0b0110, 4);
        w.write_bytes(&[0xab; 32]);
    });
    assert_eq!(decode_program(&bytes).unwrap_err(), DecodeError::HiddenRoot);
}

#[test]
fn ill_typed_programs() {
    // take needs a product input, but the root input is unit
    let bytes = program(2, |w| {
        w.write_bits(0b01001, 5);
        w.write_bits(0b00110, 5);
        offset(w, 1);
    });
    assert!(matches!(
        decode_program(&bytes),
        Err(DecodeError::TypeMismatch(TypeError::Unify { node: 1, .. }))
    ));

    // the witness output would have to contain itself
    let nodes = vec![
        Combinator::Witness,
        Combinator::Iden,
        Combinator::Unit,
        Combinator::Pair(id(1), id(2)),
        Combinator::Comp(id(3), id(3)),
        Combinator::Comp(id(4), id(2)),
        Combinator::Comp(id(0), id(5)),
    ];
    assert!(matches!(
        Expression::from_nodes(nodes),
        Err(DecodeError::TypeMismatch(TypeError::OccursCheck { .. }))
    ));
}

#[test]
fn limits_are_enforced_before_decoding() {
    let limits = DecodeLimits {
        max_nodes: 5,
        ..DecodeLimits::default()
    };
    assert_eq!(
        decode_program_with_limits(&BITCASE, &limits).unwrap_err(),
        DecodeError::TooManyNodes { count: 6, limit: 5 }
    );

    let oversized = vec![0u8; 64 * 1024 + 1];
    assert_eq!(
        decode_program_with_limits(&oversized, &DecodeLimits::strict()).unwrap_err(),
        DecodeError::InputTooLarge {
            kind: SerKind::Program,
            len: oversized.len(),
            limit: 64 * 1024,
        }
    );
}

#[test]
fn unusable_limits_are_rejected() {
    let zero_nodes = DecodeLimits {
        max_nodes: 0,
        ..DecodeLimits::default()
    };
    let expected = DecodeError::InvalidLimits(ConfigError::ZeroLimit { field: "max_nodes" });
    assert_eq!(
        decode_program_with_limits(&BITCASE, &zero_nodes).unwrap_err(),
        expected
    );
    assert_eq!(
        Program::decode_with_limits(&BITCASE, &[0x80], &zero_nodes).unwrap_err(),
        expected
    );

    let expr = decode_program(&BITCASE).unwrap();
    let zero_witness = DecodeLimits {
        max_witness_bytes: 0,
        ..DecodeLimits::default()
    };
    assert_eq!(
        decode_witness_with_limits(&[0x80], &expr, &zero_witness).unwrap_err(),
        DecodeError::InvalidLimits(ConfigError::ZeroLimit {
            field: "max_witness_bytes"
        })
    );

    let witness = decode_witness(&[0x80], &expr).unwrap();
    let zero_budget = DecodeLimits::default().with_cost_budget(0);
    let err = Program::with_limits(expr, witness, &zero_budget).unwrap_err();
    assert_eq!(
        err,
        DecodeError::InvalidLimits(ConfigError::ZeroLimit {
            field: "cost_budget"
        })
    );
    assert_snapshot!(err.to_string(), @"invalid limits: limit `cost_budget` must be greater than zero");
}

#[test]
fn witness_must_fill_its_slots() {
    assert_eq!(
        Program::decode(&BITCASE, &[]).unwrap_err(),
        DecodeError::WitnessLengthMismatch {
            available: 0,
            consumed: 0,
        }
    );
    assert!(Program::decode(&BITCASE, &[0x80]).is_ok());
}

#[test]
fn duplicated_subexpressions_are_rejected() {
    let mut builder = ExpressionBuilder::new();
    let first = builder.unit();
    let second = builder.unit();
    let pair = builder.pair(first, second);
    let last = builder.unit();
    let root = builder.comp(pair, last);
    let expr = builder.finish(root).unwrap();

    assert_eq!(
        Program::new(expr, WitnessAssignment::empty()).unwrap_err(),
        DecodeError::SharingNotMaximal {
            first: 0,
            second: 1,
        }
    );
}

#[test]
fn hidden_branches_pruned_to_the_same_root_are_rejected() {
    let pruned = Digest256::from_bytes([0x22; 32]);
    let mut builder = ExpressionBuilder::new();
    let witness = builder.witness();
    let unit = builder.unit();
    let select = builder.pair(witness, unit);
    let kept = builder.unit();
    let left = builder.assertl(kept, pruned);
    let first = builder.comp(select, left);
    let injected = builder.injr(unit);
    let constant = builder.pair(injected, unit);
    let right = builder.assertr(pruned, kept);
    let second = builder.comp(constant, right);
    let root = builder.comp(first, second);
    let expr = builder.finish(root).unwrap();
    assert_eq!(expr.nodes()[4], Combinator::Hidden(pruned));
    assert_eq!(expr.nodes()[9], Combinator::Hidden(pruned));

    let witness = WitnessAssignment::from_values(&expr, &[Value::bit(false)]).unwrap();
    assert_eq!(
        Program::new(expr, witness).unwrap_err(),
        DecodeError::SharingNotMaximal {
            first: 4,
            second: 9,
        }
    );
}

#[test]
fn cost_budget() {
    let over = DecodeLimits::default().with_cost_budget(type_skip::COST - 1);
    let err = Program::decode_with_limits(&type_skip::PROGRAM, &type_skip::WITNESS, &over)
        .expect_err("over budget");
    assert_eq!(
        err,
        DecodeError::CostExceeded {
            cost: type_skip::COST,
            budget: type_skip::COST - 1,
        }
    );
    assert_snapshot!(err.to_string(), @"program cost 13720 exceeds budget 13719");

    let exact = DecodeLimits::default().with_cost_budget(type_skip::COST);
    assert!(Program::decode_with_limits(&type_skip::PROGRAM, &type_skip::WITNESS, &exact).is_ok());
}
