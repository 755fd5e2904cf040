//! Multiple-choice option generation.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::WordEntry;

/// Default number of options offered per question.
pub const DEFAULT_OPTION_COUNT: usize = 4;

/// Produce a shuffled option list for `correct`, drawing distractors from `pool`.
///
/// The correct meaning appears exactly once. Distractors are other entries'
/// meanings, sampled uniformly without replacement, and never repeat an
/// option text already in the list. When the pool has fewer distinct
/// meanings than `count`, fewer options are returned; a pool holding only
/// the correct entry yields a single option.
pub fn generate_options<R: Rng + ?Sized>(
    correct: &WordEntry,
    pool: &[WordEntry],
    count: usize,
    rng: &mut R,
) -> Vec<String> {
    let count = count.max(1);

    let mut candidates: Vec<&str> = pool
        .iter()
        .filter(|w| w.id != correct.id)
        .map(|w| w.meaning.as_str())
        .collect();
    candidates.shuffle(rng);

    let mut seen: HashSet<&str> = HashSet::from([correct.meaning.as_str()]);
    let mut options = vec![correct.meaning.clone()];
    for meaning in candidates {
        if options.len() >= count {
            break;
        }
        if seen.insert(meaning) {
            options.push(meaning.to_string());
        }
    }

    options.shuffle(rng);
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pool() -> Vec<WordEntry> {
        vec![
            WordEntry::new("1", "A", "X"),
            WordEntry::new("2", "B", "Y"),
            WordEntry::new("3", "C", "Z"),
            WordEntry::new("4", "D", "W"),
            WordEntry::new("5", "E", "V"),
            WordEntry::new("6", "F", "U"),
        ]
    }

    #[test]
    fn includes_correct_meaning_exactly_once() {
        let pool = pool();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let options = generate_options(&pool[2], &pool, 4, &mut rng);
            assert_eq!(options.len(), 4);
            assert_eq!(options.iter().filter(|o| *o == "Z").count(), 1);
            let distinct: HashSet<_> = options.iter().collect();
            assert_eq!(distinct.len(), 4);
        }
    }

    #[test]
    fn single_entry_pool_yields_single_option() {
        let only = WordEntry::new("1", "A", "X");
        let mut rng = StdRng::seed_from_u64(7);
        let options = generate_options(&only, std::slice::from_ref(&only), 4, &mut rng);
        assert_eq!(options, vec!["X".to_string()]);
    }

    #[test]
    fn duplicate_meanings_are_not_repeated() {
        let pool = vec![
            WordEntry::new("1", "A", "X"),
            WordEntry::new("2", "B", "X"),
            WordEntry::new("3", "C", "Y"),
            WordEntry::new("4", "D", "Y"),
            WordEntry::new("5", "E", "Y"),
        ];
        let mut rng = StdRng::seed_from_u64(3);
        let mut options = generate_options(&pool[0], &pool, 4, &mut rng);
        options.sort();
        assert_eq!(options, vec!["X".to_string(), "Y".to_string()]);
    }

    #[test]
    fn respects_requested_count() {
        let pool = pool();
        let mut rng = StdRng::seed_from_u64(11);
        assert_eq!(generate_options(&pool[0], &pool, 2, &mut rng).len(), 2);
        assert_eq!(generate_options(&pool[0], &pool, 0, &mut rng).len(), 1);
        assert_eq!(generate_options(&pool[0], &pool, 10, &mut rng).len(), 6);
    }

    #[test]
    fn same_seed_gives_same_order() {
        let pool = pool();
        let a = generate_options(&pool[0], &pool, 4, &mut StdRng::seed_from_u64(42));
        let b = generate_options(&pool[0], &pool, 4, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn correct_entry_outside_pool_still_present() {
        let pool = pool();
        let stranger = WordEntry::new("99", "Q", "Q-meaning");
        let mut rng = StdRng::seed_from_u64(5);
        let options = generate_options(&stranger, &pool, 4, &mut rng);
        assert!(options.contains(&"Q-meaning".to_string()));
        assert_eq!(options.len(), 4);
    }
}
