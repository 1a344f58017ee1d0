use eth_typed_signer::eip712::{encode_type, find_type_dependencies, sign_hash, Schema, TypedDataField};
use eth_typed_signer::recovery::{private_to_address, recover_address};
use eth_typed_signer::{concat_sig, from_rpc_sig};
use proptest::prelude::*;
use secp256k1::SecretKey;
use std::collections::HashSet;

fn any_secret_key() -> impl Strategy<Value = [u8; 32]> {
    prop::array::uniform32(any::<u8>()).prop_filter("valid secp256k1 scalar", |bytes| {
        SecretKey::from_slice(bytes).is_ok()
    })
}

const TYPE_NAMES: [&str; 6] = ["Alpha", "Bravo", "Charlie", "Delta", "Echo", "Foxtrot"];

/// Random schema over a fixed set of names; every field either references
/// another struct (cycles allowed) or is a primitive.
fn any_schema() -> impl Strategy<Value = Schema> {
    prop::collection::vec(prop::collection::vec(0usize..8, 0..4), TYPE_NAMES.len()).prop_map(|table| {
        let mut schema = Schema::new();
        for (name, refs) in TYPE_NAMES.iter().zip(table) {
            let fields = refs
                .into_iter()
                .enumerate()
                .map(|(i, r)| {
                    let type_name = TYPE_NAMES.get(r).copied().unwrap_or("uint256");
                    TypedDataField::new(format!("f{}", i), type_name)
                })
                .collect();
            schema.insert(name.to_string(), fields);
        }
        schema
    })
}

proptest! {
    #[test]
    fn signature_codec_roundtrips(
        r in prop::array::uniform32(any::<u8>()),
        s in prop::array::uniform32(any::<u8>()),
        v in 27u8..=28,
    ) {
        let hex_sig = concat_sig(u64::from(v), &r, &s).unwrap();
        prop_assert_eq!(hex_sig.len(), 132);

        let params = from_rpc_sig(&hex_sig).unwrap();
        prop_assert_eq!(params.r, r);
        prop_assert_eq!(params.s, s);
        prop_assert_eq!(params.v, v);
        prop_assert_eq!(params.to_rpc_sig(), hex_sig);
    }

    #[test]
    fn recovery_inverts_signing(key in any_secret_key(), hash in prop::array::uniform32(any::<u8>())) {
        let sig = sign_hash(&hash, &key).unwrap().to_rpc_sig();
        prop_assert_eq!(recover_address(&hash, &sig).unwrap(), private_to_address(&key).unwrap());
    }

    #[test]
    fn dependencies_are_unique_and_rooted(schema in any_schema(), root in 0usize..TYPE_NAMES.len()) {
        let root = TYPE_NAMES[root];
        let deps = find_type_dependencies(root, &schema).unwrap();

        prop_assert_eq!(deps[0].as_str(), root);
        let unique: HashSet<_> = deps.iter().collect();
        prop_assert_eq!(unique.len(), deps.len());
    }

    #[test]
    fn encode_type_is_deterministic_and_sorted(schema in any_schema(), root in 0usize..TYPE_NAMES.len()) {
        let root = TYPE_NAMES[root];
        let first = encode_type(root, &schema).unwrap();
        prop_assert_eq!(&first, &encode_type(root, &schema).unwrap());

        let rooted = format!("{}(", root);
        prop_assert!(first.starts_with(&rooted));

        let mut deps = find_type_dependencies(root, &schema).unwrap();
        let mut rest = deps.split_off(1);
        rest.sort();
        let mut cursor = 0;
        for name in deps.iter().chain(rest.iter()) {
            let header = format!("{}(", name);
            let pos = first[cursor..].find(&header).map(|p| p + cursor);
            prop_assert!(pos.is_some(), "{} missing from {}", name, first);
            cursor = pos.unwrap_or(cursor) + header.len();
        }
    }
}
