use erp_ingest::data::CellValue;
use erp_ingest::normalize::{coerce_value, normalize_key};
use erp_ingest::vocab;
use proptest::prelude::*;

#[test]
fn every_reachable_alias_resolves_from_its_plain_spelling() {
    for (alias, canonical) in vocab::aliases() {
        if alias.chars().all(|c| c.is_ascii_alphanumeric()) {
            assert_eq!(normalize_key(alias), *canonical, "alias '{alias}'");
        }
    }
}

proptest! {
    #[test]
    fn alias_variants_normalize_to_their_canonical_metric(
        index in 0usize..vocab::aliases().len(),
        sep in prop::sample::select(vec!["", " ", "-", "_", ".", " - "]),
        mask in any::<u64>()
    ) {
        let (alias, canonical) = vocab::aliases()[index];
        // Alias keys are stored pre-normalized; only plain alphanumeric keys
        // are reachable through the normalizer.
        prop_assume!(alias.chars().all(|c| c.is_ascii_alphanumeric()));

        let mut decorated = String::new();
        for (i, c) in alias.chars().enumerate() {
            if i > 0 {
                decorated.push_str(sep);
            }
            if (mask >> (i % 64)) & 1 == 1 {
                decorated.push(c.to_ascii_uppercase());
            } else {
                decorated.push(c);
            }
        }
        let normalized = normalize_key(&decorated);
        prop_assert_eq!(normalized.as_str(), canonical);
    }

    #[test]
    fn integer_text_coerces_to_the_same_integer(n in any::<i64>()) {
        prop_assert_eq!(
            coerce_value(CellValue::Text(n.to_string())),
            CellValue::Integer(n)
        );
    }

    #[test]
    fn percentage_text_is_never_coerced(p in 0u32..=10_000) {
        let raw = format!("{p}%");
        prop_assert_eq!(
            coerce_value(CellValue::Text(raw.clone())),
            CellValue::Text(raw)
        );
    }

    #[test]
    fn coercion_is_idempotent(raw in "[ -~]{0,24}") {
        let once = coerce_value(CellValue::Text(raw));
        let twice = coerce_value(once.clone());
        prop_assert_eq!(once, twice);
    }
}
