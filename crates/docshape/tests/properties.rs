//! Rendering laws checked over generated documents

use docshape::{
    CodecRegistry, DecoderResolver, Document, DocumentCodec, RenderArgs, SharedDecoder,
    TypedProjection, UntypedProjection, Value, parse_document, same_decoder,
};
use proptest::prelude::*;
use std::sync::Arc;

fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        (i64::from(i32::MAX) + 1..i64::MAX).prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,10}".prop_map(Value::from),
        Just(Value::Null),
    ]
}

fn arb_document() -> impl Strategy<Value = Document> {
    prop::collection::vec(("[a-z_][a-z0-9_.]{0,8}", arb_value()), 0..8)
        .prop_map(|entries| entries.into_iter().collect())
}

fn args(registry: &CodecRegistry) -> RenderArgs<'_, Document> {
    let ambient: SharedDecoder<Document> = Arc::new(DocumentCodec);
    RenderArgs::new(registry).with_document_decoder(ambient)
}

proptest! {
    #[test]
    fn explicit_renders_the_same_document(document in arb_document()) {
        let document = Arc::new(document);
        let rendered = UntypedProjection::document(Arc::clone(&document))
            .render(&CodecRegistry::new())
            .unwrap();

        let shared = rendered.as_materialized().unwrap();
        prop_assert!(Arc::ptr_eq(shared, &document));
    }

    #[test]
    fn text_renders_the_parsed_document(document in arb_document()) {
        let text = document.to_string();
        let rendered = UntypedProjection::text(text.as_str())
            .render(&CodecRegistry::new())
            .unwrap();

        let parsed = parse_document(&text).unwrap();
        prop_assert_eq!(rendered.to_document().unwrap().into_owned(), parsed);
    }

    #[test]
    fn typed_render_is_idempotent(document in arb_document(), as_text in any::<bool>()) {
        let registry = CodecRegistry::with_defaults();
        let args = args(&registry);
        let projection: TypedProjection<Document, Document> = if as_text {
            document.to_string().into()
        } else {
            document.into()
        };

        let first = projection.render(&args).unwrap();
        let second = projection.render(&args).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn resolution_is_deterministic(register in any::<bool>()) {
        let registry = CodecRegistry::new();
        if register {
            registry.register_decoder::<Document>(Arc::new(DocumentCodec));
        }
        let resolver = DecoderResolver::new();

        let first = resolver.resolve::<Document, Document>(None, None, &registry);
        let second = resolver.resolve::<Document, Document>(None, None, &registry);
        match (first, second) {
            (Ok(a), Ok(b)) => prop_assert!(register && same_decoder(&a, &b)),
            (Err(a), Err(b)) => prop_assert!(!register && a == b),
            _ => prop_assert!(false, "resolution changed between calls"),
        }
    }

    #[test]
    fn unterminated_text_fails_to_parse(document in arb_document()) {
        let text = document.to_string();
        let truncated = &text[..text.len() - 1];

        let err = UntypedProjection::text(truncated)
            .render(&CodecRegistry::new())
            .unwrap_err();
        prop_assert!(matches!(err, docshape::ProjectionError::Parse(_)));
    }
}
