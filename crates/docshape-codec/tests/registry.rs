//! Registry behaviour shared across threads and codec kinds

use docshape_codec::{
    decoder_fn, same_decoder, CodecError, CodecRegistry, SharedDecoder, TypeKey,
};
use docshape_document::{Document, Value};
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Address {
    city: String,
    zip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Customer {
    name: String,
    address: Address,
    tags: Vec<String>,
}

fn customer() -> Customer {
    Customer {
        name: "Grace".to_string(),
        address: Address {
            city: "Arlington".to_string(),
            zip: None,
        },
        tags: vec!["navy".to_string()],
    }
}

#[test]
fn test_serde_codecs_through_registry() {
    let registry = CodecRegistry::new();
    registry.register_serde::<Customer>();

    let encoder = registry.encoder_for(TypeKey::of::<Customer>()).unwrap();
    let doc = encoder.encode(&customer()).unwrap();

    assert_eq!(doc.get_path("address.city"), Some(&Value::from("Arlington")));
    assert_eq!(doc.get_path("address.zip"), Some(&Value::Null));

    let decoded = registry.decoder_for::<Customer>().unwrap().decode(&doc).unwrap();
    assert_eq!(decoded, customer());
}

#[test]
fn test_replacing_a_decoder() {
    let registry = CodecRegistry::new();
    registry.register_serde::<Customer>();

    let custom: SharedDecoder<Customer> = decoder_fn(|doc: &Document| {
        let name = doc
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| CodecError::decode("Customer", "missing name"))?;
        Ok(Customer {
            name: name.to_uppercase(),
            ..customer()
        })
    });
    registry.register_decoder::<Customer>(custom.clone());

    let found = registry.decoder_for::<Customer>().unwrap();
    assert!(same_decoder(&found, &custom));

    let decoded = found.decode(&Document::new().with("name", "ada")).unwrap();
    assert_eq!(decoded.name, "ADA");
}

#[test]
fn test_concurrent_lookups_agree() {
    let registry = CodecRegistry::new();
    registry.register_serde::<Customer>();
    let expected = registry.decoder_for::<Customer>().unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = registry.clone();
            thread::spawn(move || registry.decoder_for::<Customer>().unwrap())
        })
        .collect();

    for handle in handles {
        let found = handle.join().unwrap();
        assert!(same_decoder(&found, &expected));
    }
}

#[test]
fn test_encoder_keyed_by_runtime_type() {
    let registry = CodecRegistry::new();
    registry.register_serde::<Address>();

    assert!(registry.has_encoder(TypeKey::of::<Address>()));
    assert!(!registry.has_encoder(TypeKey::of::<Customer>()));
    assert!(!registry.has_encoder(TypeKey::of::<Arc<Address>>()));
}
