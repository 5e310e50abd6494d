use crate::boxes::{LedgerBox, WithdrawalRequestBox, ZenBox};
use crate::codec::Writer;
use crate::registry::standard::{MC_PUBLIC_KEY_HASH_PROPOSITION, ZEN_BOX};
use crate::tests::fixtures::*;

#[test]
fn test_zen_box_layout() {
    let registry = registry();
    let b = ZenBox::new(Box::new(mc(0x42)), 1000, 7);
    let bytes = registry.encode_box(&b).unwrap();

    let mut expected = Vec::new();
    expected.put_u8(ZEN_BOX.0);
    expected.put_u8(MC_PUBLIC_KEY_HASH_PROPOSITION.0);
    expected.put_bytes(&[0x42; 20]);
    expected.put_i64(1000);
    expected.put_u64(7);

    assert_eq!(bytes, expected);
}

#[test]
fn test_withdrawal_box_owner_has_no_tag() {
    let registry = registry();
    let b = WithdrawalRequestBox::new(mc(9), 50, 1);
    let bytes = registry.encode_box(&b).unwrap();
    // tag + 20-byte hash + value + nonce
    assert_eq!(bytes.len(), 1 + 20 + 8 + 8);

    let decoded = registry.decode_box(&bytes).unwrap();
    let decoded = decoded.as_any().downcast_ref::<WithdrawalRequestBox>().unwrap();
    assert_eq!(decoded, &b);
    assert_eq!(decoded.destination(), &mc(9));
}

#[test]
fn test_negative_value_fails_to_encode() {
    let registry = registry();
    let b = ZenBox::new(pk(1), -1, 0);
    assert!(registry.encode_box(&b).unwrap_err().is_invalid_value());
    assert!(registry.box_id(&b).unwrap_err().is_invalid_value());
}

#[test]
fn test_negative_value_fails_to_decode() {
    let registry = registry();
    let mut bytes = registry.encode_box(&ZenBox::new(pk(1), 1, 0)).unwrap();
    // Value starts after box tag, owner tag and 32-byte key.
    let value_at = 1 + 1 + 32;
    bytes[value_at..value_at + 8].copy_from_slice(&(-5i64).to_le_bytes());
    assert!(registry.decode_box(&bytes).unwrap_err().is_invalid_value());
}

#[test]
fn test_box_id_is_content_derived() {
    let registry = registry();
    let base = ZenBox::new(Box::new(mc(1)), 100, 5);
    let id = registry.box_id(&base).unwrap();

    assert_eq!(id, registry.box_id(&base.clone()).unwrap());
    assert_eq!(id, registry.box_id(&ZenBox::new(Box::new(mc(1)), 100, 5)).unwrap());

    let variants: Vec<Box<dyn LedgerBox>> = vec![
        Box::new(ZenBox::new(Box::new(mc(2)), 100, 5)),
        Box::new(ZenBox::new(Box::new(mc(1)), 101, 5)),
        Box::new(ZenBox::new(Box::new(mc(1)), 100, 6)),
        // Same owner, value and nonce, different box type.
        Box::new(WithdrawalRequestBox::new(mc(1), 100, 5)),
        // Same payload bytes, different owner type.
        Box::new(ZenBox::new(Box::new(Secp256k1Proposition([1; 33])), 100, 5)),
    ];
    let extended = extended_registry();
    assert_eq!(id, extended.box_id(&base).unwrap());
    for variant in &variants {
        assert_ne!(id, extended.box_id(variant.as_ref()).unwrap(), "{:?}", variant);
    }
}

#[test]
fn test_box_id_is_hash_of_encoding() {
    let registry = registry();
    let b = zen(3, 10, 10);
    let bytes = registry.encode_box(b.as_ref()).unwrap();
    assert_eq!(registry.box_id(b.as_ref()).unwrap().0, crate::hash::hash_bytes(&bytes));
}

#[test]
fn test_box_equality_covers_owner() {
    let a = zen(1, 10, 0);
    let b = zen(2, 10, 0);
    assert!(a != b);
    assert!(a.proposition() == zen(1, 0, 0).proposition());
    assert_eq!(a.proposition().bytes(), &[1u8; 32]);
}

#[test]
fn test_zen_box_equality() {
    let a = ZenBox::new(Box::new(mc(1)), 10, 0);
    assert_eq!(a, ZenBox::new(Box::new(mc(1)), 10, 0));
    assert_ne!(a, ZenBox::new(Box::new(mc(1)), 10, 1));
    assert_ne!(a, ZenBox::new(Box::new(mc(2)), 10, 0));
    assert_ne!(
        ZenBox::new(Box::new(Secp256k1Proposition([1; 33])), 10, 0),
        ZenBox::new(pk(1), 10, 0)
    );
}
