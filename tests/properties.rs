//! Property tests for index parsing, the codec and save/load

use proptest::prelude::*;
use serde_json::Value;

use common_save::settings::parse_index_list;
use common_save::{
    GameState, KeyValueBackend, MemoryStore, ShareManager, ShareSettings, StateStore, codec,
};

#[derive(Debug, Clone)]
enum Token {
    Valid(u32),
    Invalid(String),
}

fn token() -> impl Strategy<Value = Token> {
    prop_oneof![
        any::<u32>().prop_map(Token::Valid),
        "[a-zA-Z][a-zA-Z0-9]{0,4}".prop_map(Token::Invalid),
    ]
}

fn counter_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        "[ -~]{0,12}".prop_map(Value::from),
    ]
}

proptest! {
    #[test]
    fn test_parse_keeps_valid_tokens_in_order(tokens in prop::collection::vec(token(), 1..12)) {
        let raw = tokens
            .iter()
            .map(|t| match t {
                Token::Valid(n) => n.to_string(),
                Token::Invalid(s) => s.clone(),
            })
            .collect::<Vec<_>>()
            .join(",");
        let expected: Vec<u32> = tokens
            .iter()
            .filter_map(|t| match t {
                Token::Valid(n) => Some(*n),
                Token::Invalid(_) => None,
            })
            .collect();
        prop_assert_eq!(parse_index_list(&raw), expected);
    }

    #[test]
    fn test_codec_roundtrip(text in "\\PC{1,200}") {
        let blob = codec::compress(&text);
        prop_assert_eq!(codec::decompress(Some(&blob)), Some(text));
    }

    #[test]
    fn test_save_then_load_restores_tracked(
        flags in prop::collection::btree_map(0u32..500, any::<bool>(), 0..16),
        counters in prop::collection::btree_map(0u32..500, counter_value(), 0..16),
    ) {
        let settings = ShareSettings {
            target_flags: flags.keys().copied().collect(),
            target_counters: counters.keys().copied().collect(),
            auto_sync: true,
        };
        let manager = ShareManager::with_backend(settings, KeyValueBackend::new(MemoryStore::new()));

        let mut state = GameState::new();
        for (&i, &v) in &flags {
            state.set_flag(i, v);
        }
        for (&i, v) in &counters {
            state.set_counter(i, v.clone());
        }
        manager.save(&state).unwrap();

        // Scramble every tracked cell, then restore
        for (&i, &v) in &flags {
            state.set_flag(i, !v);
        }
        for &i in counters.keys() {
            state.set_counter(i, Value::Null);
        }
        prop_assert!(manager.load(&mut state));

        for (&i, &v) in &flags {
            prop_assert_eq!(state.flag(i), v);
        }
        for (&i, v) in &counters {
            prop_assert_eq!(&state.counter(i), v);
        }
    }
}
