//! Property-based tests for the protocol codec

use super::codec::{decode, encode};
use super::types::{DataType, Input, Output, PrimitiveKind};
use proptest::prelude::*;

fn arb_primitive_kind() -> impl Strategy<Value = PrimitiveKind> {
    prop_oneof![
        Just(PrimitiveKind::Long),
        Just(PrimitiveKind::String),
        Just(PrimitiveKind::Boolean),
        Just(PrimitiveKind::Double),
    ]
}

fn arb_data_type() -> impl Strategy<Value = DataType> {
    arb_primitive_kind().prop_map(DataType::new)
}

fn arb_input() -> impl Strategy<Value = Input> {
    prop_oneof![
        "[a-zA-Z0-9><= ]{0,40}".prop_map(Input::start),
        ("[a-z]{1,16}", "[a-zA-Z0-9. ]{0,40}", arb_data_type())
            .prop_map(|(name, value, dt)| Input::continue_with(name, value, dt)),
    ]
}

fn arb_output() -> impl Strategy<Value = Output> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,40}".prop_map(|message| Output::Connected { message }),
        "[a-zA-Z0-9 ]{0,40}".prop_map(|message| Output::KnowThat { message }),
        ("[a-z]{1,16}", arb_data_type())
            .prop_map(|(name, data_type)| Output::TellMe { name, data_type }),
        "[a-zA-Z0-9 ]{0,40}".prop_map(|message| Output::Done { message }),
    ]
}

proptest! {
    /// Every valid Input survives an encode/decode cycle field-for-field.
    #[test]
    fn input_round_trips(input in arb_input()) {
        let frame = encode(&input).unwrap();
        let back: Input = serde_json::from_str(&frame).unwrap();
        prop_assert_eq!(back, input);
    }

    /// Decoding is the inverse of serialization for every Output the
    /// server can produce.
    #[test]
    fn output_round_trips(output in arb_output()) {
        let frame = serde_json::to_string(&output).unwrap();
        prop_assert_eq!(decode(&frame).unwrap(), output);
    }

    /// Encoding is deterministic.
    #[test]
    fn encoding_is_deterministic(input in arb_input()) {
        prop_assert_eq!(encode(&input).unwrap(), encode(&input).unwrap());
    }
}
