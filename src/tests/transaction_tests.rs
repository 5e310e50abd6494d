use crate::boxes::WithdrawalRequestBox;
use crate::codec::Reader;
use crate::registry::standard::REGULAR_TRANSACTION;
use crate::tests::fixtures::*;
use crate::transaction::{Input, RegularTransaction, Transaction};
use crate::types::BoxId;

fn mixed_transaction() -> RegularTransaction {
    transfer(
        vec![
            zen(1, 600, 0),
            Box::new(WithdrawalRequestBox::new(mc(4), 300, 1)),
            zen(2, 50, 2),
        ],
        25,
    )
}

#[test]
fn test_transaction_roundtrip_preserves_order() {
    let registry = registry();
    let tx = mixed_transaction();
    let bytes = registry.encode_transaction(&tx).unwrap();
    assert_eq!(bytes[0], REGULAR_TRANSACTION.0);

    let decoded = registry.decode_transaction(&bytes).unwrap();
    assert!(decoded.as_ref() == &tx as &dyn Transaction);

    let ids: Vec<BoxId> = decoded.unlocked_box_ids();
    assert_eq!(ids, vec![BoxId([0x11; 32]), BoxId([0x22; 32])]);
    let values: Vec<i64> = decoded.outputs().iter().map(|o| o.value()).collect();
    assert_eq!(values, vec![600, 300, 50]);
    assert!(decoded.outputs()[1]
        .as_any()
        .downcast_ref::<WithdrawalRequestBox>()
        .is_some());

    assert_eq!(registry.encode_transaction(decoded.as_ref()).unwrap(), bytes);
}

#[test]
fn test_reordering_outputs_changes_encoding() {
    let registry = registry();
    let a = transfer(vec![zen(1, 10, 0), zen(2, 20, 0)], 0);
    let b = transfer(vec![zen(2, 20, 0), zen(1, 10, 0)], 0);
    assert_ne!(
        registry.encode_transaction(&a).unwrap(),
        registry.encode_transaction(&b).unwrap()
    );
    assert_ne!(registry.transaction_id(&a).unwrap(), registry.transaction_id(&b).unwrap());
}

#[test]
fn test_every_proper_prefix_is_truncated() {
    let registry = registry();
    let bytes = registry.encode_transaction(&mixed_transaction()).unwrap();
    for len in 0..bytes.len() {
        let err = registry.decode_transaction(&bytes[..len]).unwrap_err();
        assert!(err.is_truncated(), "prefix {} gave {:?}", len, err);
    }
}

#[test]
fn test_truncated_decode_rewinds_reader() {
    let registry = registry();
    let bytes = registry.encode_transaction(&mixed_transaction()).unwrap();
    let cut = &bytes[..bytes.len() - 3];
    let mut reader = Reader::new(cut);
    assert!(registry.read_transaction(&mut reader).unwrap_err().is_truncated());
    assert_eq!(reader.position(), 0);
}

#[test]
fn test_oversized_count_fails_before_reading() {
    let registry = registry();
    // tag, version, fee, then a claim of 2^20 inputs with nothing behind it.
    let mut bytes = vec![REGULAR_TRANSACTION.0, 1];
    bytes.extend_from_slice(&0i64.to_le_bytes());
    bytes.extend_from_slice(&[0x80, 0x80, 0x40]);
    assert!(registry.decode_transaction(&bytes).unwrap_err().is_truncated());
}

#[test]
fn test_transaction_id_ignores_proofs() {
    let registry = registry();
    let mut tx = mixed_transaction();
    let id = registry.transaction_id(&tx).unwrap();
    let encoded = registry.encode_transaction(&tx).unwrap();

    tx.set_proof(0, vec![0xcc; 70]).unwrap();
    assert_eq!(registry.transaction_id(&tx).unwrap(), id);
    assert_ne!(registry.encode_transaction(&tx).unwrap(), encoded);

    let cheaper = transfer(tx.outputs().to_vec(), tx.fee() - 1);
    assert_ne!(registry.transaction_id(&cheaper).unwrap(), id);
}

#[test]
fn test_transaction_id_is_hash_of_message_to_sign() {
    let registry = registry();
    let tx = mixed_transaction();
    let message = registry.message_to_sign(&tx).unwrap();
    assert_eq!(message[0], REGULAR_TRANSACTION.0);
    assert_eq!(registry.transaction_id(&tx).unwrap().0, crate::hash::hash_bytes(&message));
}

#[test]
fn test_required_input_value() {
    let tx = mixed_transaction();
    assert_eq!(tx.total_output_value().unwrap(), 950);
    assert_eq!(tx.required_input_value().unwrap(), 975);
    tx.check_structure().unwrap();
}

#[test]
fn test_structure_checks() {
    let negative_output = transfer(vec![zen(1, -10, 0)], 0);
    assert!(negative_output.check_structure().unwrap_err().is_invalid_value());

    let negative_fee = transfer(vec![zen(1, 10, 0)], -1);
    assert!(negative_fee.check_structure().unwrap_err().is_invalid_value());

    let overflow = transfer(vec![zen(1, i64::MAX, 0), zen(2, 1, 0)], 0);
    assert!(overflow.check_structure().unwrap_err().is_invalid_value());

    let no_outputs = transfer(vec![], 0);
    assert!(no_outputs.check_structure().is_err());

    let double_spend = RegularTransaction::new(
        vec![
            Input::new(BoxId([5; 32]), vec![]),
            Input::new(BoxId([5; 32]), vec![1]),
        ],
        vec![zen(1, 1, 0)],
        0,
    );
    assert!(double_spend.check_structure().is_err());

    let no_inputs = RegularTransaction::new(vec![], vec![zen(1, 1, 0)], 0);
    assert!(no_inputs.check_structure().is_err());
}

#[test]
fn test_negative_fee_fails_to_encode() {
    let registry = registry();
    let tx = transfer(vec![zen(1, 10, 0)], -3);
    assert!(registry.encode_transaction(&tx).unwrap_err().is_invalid_value());
    assert!(registry.transaction_id(&tx).unwrap_err().is_invalid_value());
}

#[test]
fn test_boxed_transaction_clone_is_equal() {
    let tx: Box<dyn Transaction> = Box::new(mixed_transaction());
    let copy = tx.clone();
    assert!(tx == copy);
}
