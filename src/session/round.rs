//! Round construction: prompt, correct answer and shuffled alternatives

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use super::state::{Alternative, GameMode, MediaKind, Prompt};
use crate::consts::ALTERNATIVE_COUNT;
use crate::definition::SignalItem;

fn value_of(item: &SignalItem, kind: MediaKind) -> &str {
    match kind {
        MediaKind::Text => &item.text,
        MediaKind::Image => &item.primary_image,
    }
}

/// What is shown for `item` in `mode`
pub fn prompt_for(item: &SignalItem, mode: GameMode) -> Prompt {
    let kind = mode.prompt_kind();
    Prompt {
        kind,
        value: value_of(item, kind).to_string(),
    }
}

/// The correct alternative for `item` in `mode`
pub fn answer_for(item: &SignalItem, mode: GameMode) -> Alternative {
    let kind = mode.answer_kind();
    Alternative {
        kind,
        value: value_of(item, kind).to_string(),
    }
}

/// Correct answer plus up to three distinct wrong ones, in random order.
///
/// Wrong candidates are the other items' values that differ from the correct
/// one; with fewer than three available the set is simply smaller.
pub fn build_alternatives<R: Rng + ?Sized>(
    items: &[SignalItem],
    index: usize,
    mode: GameMode,
    rng: &mut R,
) -> Vec<Alternative> {
    let correct = answer_for(&items[index], mode);

    let mut seen = HashSet::new();
    let mut wrong: Vec<Alternative> = items
        .iter()
        .map(|item| answer_for(item, mode))
        .filter(|alt| alt.value != correct.value && seen.insert(alt.value.clone()))
        .collect();
    wrong.shuffle(rng);
    wrong.truncate(ALTERNATIVE_COUNT - 1);

    let mut alternatives = Vec::with_capacity(ALTERNATIVE_COUNT);
    alternatives.push(correct);
    alternatives.extend(wrong);
    alternatives.shuffle(rng);
    alternatives
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn items(n: usize) -> Vec<SignalItem> {
        (0..n)
            .map(|i| SignalItem {
                primary_image: format!("img-{}", i),
                representation_image: format!("rep-{}", i),
                text: format!("word-{}", i),
            })
            .collect()
    }

    #[test]
    fn test_full_set_has_one_correct() {
        let items = items(8);
        let mut rng = Pcg32::seed_from_u64(7);
        let alts = build_alternatives(&items, 3, GameMode::SignToText, &mut rng);

        assert_eq!(alts.len(), ALTERNATIVE_COUNT);
        assert_eq!(alts.iter().filter(|a| a.value == "word-3").count(), 1);
        assert!(alts.iter().all(|a| a.kind == MediaKind::Text));
    }

    #[test]
    fn test_image_modes_use_primary_images() {
        let items = items(5);
        let mut rng = Pcg32::seed_from_u64(1);
        for mode in [GameMode::ObjectToSign, GameMode::SignToObject, GameMode::TextToSign] {
            let alts = build_alternatives(&items, 0, mode, &mut rng);
            assert!(alts.iter().any(|a| a.value == "img-0"));
            assert!(alts.iter().all(|a| a.kind == MediaKind::Image && a.value.starts_with("img-")));
        }
        assert_eq!(prompt_for(&items[2], GameMode::TextToSign).value, "word-2");
        assert_eq!(prompt_for(&items[2], GameMode::SignToText).value, "img-2");
    }

    #[test]
    fn test_degrades_with_few_items() {
        let items = items(2);
        let mut rng = Pcg32::seed_from_u64(3);
        let alts = build_alternatives(&items, 1, GameMode::SignToText, &mut rng);
        assert_eq!(alts.len(), 2);

        let single = self::items(1);
        let alts = build_alternatives(&single, 0, GameMode::SignToText, &mut rng);
        assert_eq!(alts, vec![answer_for(&single[0], GameMode::SignToText)]);
    }

    #[test]
    fn test_duplicate_values_are_not_repeated() {
        let mut items = items(5);
        items[1].text = "word-0".into();
        items[2].text = "word-3".into();
        let mut rng = Pcg32::seed_from_u64(9);
        let alts = build_alternatives(&items, 0, GameMode::SignToText, &mut rng);

        // Distinct wrong values left: word-3, word-4
        assert_eq!(alts.len(), 3);
        let unique: HashSet<_> = alts.iter().map(|a| a.value.as_str()).collect();
        assert_eq!(unique.len(), alts.len());
    }

    #[test]
    fn test_same_seed_same_alternatives() {
        let items = items(10);
        let a = build_alternatives(&items, 4, GameMode::TextToSign, &mut Pcg32::seed_from_u64(42));
        let b = build_alternatives(&items, 4, GameMode::TextToSign, &mut Pcg32::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
