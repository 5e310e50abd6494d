use crate::boxes::{LedgerBox, WithdrawalRequestBox, ZenBox};
use crate::codec::{Reader, Writer};
use crate::error::{EntityFamily, LedgerError, TypeKey};
use crate::proposition::{
    MCPublicKeyHashPropositionSerializer, Proposition, PublicKey25519Proposition,
    PublicKey25519PropositionSerializer,
};
use crate::registry::standard::{
    MC_PUBLIC_KEY_HASH_PROPOSITION, PUBLIC_KEY_25519_PROPOSITION, WITHDRAWAL_REQUEST_BOX, ZEN_BOX,
};
use crate::registry::{SerializerRegistry, SerializerRegistryBuilder};
use crate::tests::fixtures::*;
use crate::types::TypeTag;

#[test]
fn test_proposition_framing() {
    let registry = registry();
    let prop = PublicKey25519Proposition::new([3; 32]);
    let bytes = registry.encode_proposition(&prop).unwrap();

    assert_eq!(bytes.len(), 33);
    assert_eq!(bytes[0], PUBLIC_KEY_25519_PROPOSITION.0);
    assert_eq!(&bytes[1..], &[3u8; 32]);

    let decoded = registry.decode_proposition(&bytes).unwrap();
    assert!(decoded.as_ref() == &prop as &dyn Proposition);
    assert!(decoded.as_any().downcast_ref::<PublicKey25519Proposition>().is_some());
}

#[test]
fn test_same_payload_different_type_is_not_equal() {
    let a: Box<dyn Proposition> = Box::new(mc(1));
    let b: Box<dyn Proposition> = Box::new(Secp256k1Proposition([1; 33]));
    let c: Box<dyn Proposition> = Box::new(mc(1));
    assert!(a != b);
    assert!(a == c);
}

#[test]
fn test_encode_unregistered_type() {
    let registry = registry();
    let prop = Secp256k1Proposition([4; 33]);
    let err = registry.encode_proposition(&prop).unwrap_err();
    assert!(err.is_unregistered());
    match err {
        LedgerError::UnregisteredType { family, key: TypeKey::Type(name) } => {
            assert_eq!(family, EntityFamily::Proposition);
            assert!(name.ends_with("Secp256k1Proposition"));
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_nested_encode_of_unregistered_owner() {
    let registry = registry();
    let b = ZenBox::new(Box::new(Secp256k1Proposition([4; 33])), 10, 0);
    assert!(registry.encode_box(&b).unwrap_err().is_unregistered());
    assert!(registry.box_id(&b).unwrap_err().is_unregistered());
}

#[test]
fn test_failed_write_leaves_stream_untouched() {
    let registry = registry();
    let mut stream = vec![0xee];

    let b = ZenBox::new(Box::new(Secp256k1Proposition([4; 33])), 10, 0);
    assert!(registry.write_box(&b, &mut stream).unwrap_err().is_unregistered());
    assert_eq!(stream, vec![0xee]);

    let tx = transfer(vec![zen(1, 10, 0), Box::new(b.clone())], 0);
    assert!(registry.write_transaction(&tx, &mut stream).is_err());
    assert!(registry.write_message_to_sign(&tx, &mut stream).is_err());
    assert_eq!(stream, vec![0xee]);

    let negative = ZenBox::new(pk(1), -1, 0);
    assert!(registry.write_box(&negative, &mut stream).unwrap_err().is_invalid_value());
    assert_eq!(stream, vec![0xee]);
}

#[test]
fn test_decode_unknown_tag_leaves_reader_unchanged() {
    let extended = extended_registry();
    let standard = registry();

    let fee_box = FeeBox { owner: pk(1), value: 5, nonce: 2 };
    let mut stream = Vec::new();
    stream.put_u8(0xee); // unrelated prefix
    let entity_start = stream.len();
    extended.write_box(&fee_box, &mut stream).unwrap();

    let mut reader = Reader::new(&stream);
    reader.get_u8().unwrap();
    let err = standard.read_box(&mut reader).unwrap_err();

    assert_eq!(
        err,
        LedgerError::UnregisteredType { family: EntityFamily::Box, key: TypeKey::Tag(9) }
    );
    assert_eq!(reader.position(), entity_start);

    // A registry that knows the type reads the very same position.
    let decoded = extended.read_box(&mut reader).unwrap();
    assert!(reader.is_empty());
    assert_eq!(decoded.as_any().downcast_ref::<FeeBox>(), Some(&fee_box));
}

#[test]
fn test_decode_unknown_nested_proposition_rewinds_whole_box() {
    let extended = extended_registry();
    let standard = registry();

    let b = ZenBox::new(Box::new(Secp256k1Proposition([8; 33])), 77, 3);
    let bytes = extended.encode_box(&b).unwrap();

    let mut reader = Reader::new(&bytes);
    let err = standard.read_box(&mut reader).unwrap_err();
    assert_eq!(
        err,
        LedgerError::UnregisteredType {
            family: EntityFamily::Proposition,
            key: TypeKey::Tag(9),
        }
    );
    assert_eq!(reader.position(), 0);
}

#[test]
fn test_extension_types_roundtrip() {
    let registry = extended_registry();
    let b = FeeBox {
        owner: Box::new(Secp256k1Proposition([6; 33])),
        value: 1234,
        nonce: 99,
    };
    let bytes = registry.encode_box(&b).unwrap();
    assert_eq!(bytes[0], FEE_BOX.0);
    assert_eq!(bytes[1], SECP256K1_PROPOSITION.0);

    let decoded = registry.decode_box(&bytes).unwrap();
    assert!(decoded.as_ref() == &b as &dyn LedgerBox);
    assert_eq!(registry.encode_box(decoded.as_ref()).unwrap(), bytes);
}

#[test]
fn test_duplicate_tag_rejected() {
    let mut builder = SerializerRegistryBuilder::new();
    builder
        .register_proposition(TypeTag(1), PublicKey25519PropositionSerializer)
        .unwrap();
    let err = builder
        .register_proposition(TypeTag(1), MCPublicKeyHashPropositionSerializer)
        .err()
        .unwrap();
    assert_eq!(
        err,
        LedgerError::DuplicateRegistration {
            family: EntityFamily::Proposition,
            key: TypeKey::Tag(1),
        }
    );
}

#[test]
fn test_duplicate_type_rejected() {
    let mut builder = SerializerRegistryBuilder::new();
    builder
        .register_proposition(TypeTag(1), PublicKey25519PropositionSerializer)
        .unwrap();
    let err = builder
        .register_proposition(TypeTag(2), PublicKey25519PropositionSerializer)
        .err()
        .unwrap();
    assert!(matches!(
        err,
        LedgerError::DuplicateRegistration { key: TypeKey::Type(_), .. }
    ));
}

#[test]
fn test_same_tag_in_different_families_is_fine() {
    let registry = registry();
    assert!(registry.is_registered(EntityFamily::Proposition, TypeTag(1)));
    assert!(registry.is_registered(EntityFamily::Box, TypeTag(1)));
    assert!(registry.is_registered(EntityFamily::Transaction, TypeTag(1)));
    assert!(!registry.is_registered(EntityFamily::Box, TypeTag(3)));
    assert_eq!(
        registry.registered_tags(EntityFamily::Proposition),
        vec![PUBLIC_KEY_25519_PROPOSITION, MC_PUBLIC_KEY_HASH_PROPOSITION]
    );
    assert_eq!(
        registry.registered_tags(EntityFamily::Box),
        vec![ZEN_BOX, WITHDRAWAL_REQUEST_BOX]
    );
}

#[test]
fn test_trailing_bytes_rejected() {
    let registry = registry();
    let mut bytes = registry
        .encode_box(&WithdrawalRequestBox::new(mc(2), 10, 1))
        .unwrap();
    bytes.push(0);
    assert!(registry.decode_box(&bytes).unwrap_err().is_invalid_value());
}

#[test]
fn test_registry_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SerializerRegistry>();

    let registry = std::sync::Arc::new(registry());
    let handles: Vec<_> = (0..4u8)
        .map(|i| {
            let registry = std::sync::Arc::clone(&registry);
            std::thread::spawn(move || {
                let b = zen(i, i as i64 * 100, i as u64);
                let bytes = registry.encode_box(b.as_ref()).unwrap();
                registry.decode_box(&bytes).unwrap().value()
            })
        })
        .collect();
    let values: Vec<i64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(values, vec![0, 100, 200, 300]);
}

#[test]
fn test_global_install_only_once() {
    let installed = crate::registry::install(registry()).unwrap();
    assert!(std::sync::Arc::ptr_eq(&installed, &crate::registry::global().unwrap()));
    assert_eq!(
        crate::registry::install(registry()).err(),
        Some(LedgerError::RegistryAlreadyInstalled)
    );
}
