use itertools::{Itertools, repeat_n};

use crate::automaton::Language;

/// Every word over the alphabet of `lang` with length below `max_word_length`,
/// shortest first.
fn words<L: Language>(lang: &L, max_word_length: usize) -> impl Iterator<Item = Vec<L::Letter>> + '_ {
    (0..max_word_length).flat_map(move |i| {
        repeat_n(lang.alphabet(), i)
            .multi_cartesian_product()
            .map(|word| word.into_iter().cloned().collect_vec())
    })
}

/// Finds the shortest word on which the two languages disagree, checking all
/// words shorter than `max_word_length`. Returns `None` when the alphabets
/// differ as well, see [same_language].
pub fn find_difference<A, B>(a: &A, b: &B, max_word_length: usize) -> Option<Vec<A::Letter>>
where
    A: Language,
    B: Language<Letter = A::Letter>,
{
    words(a, max_word_length).find(|word| a.accepts_word(word) != b.accepts_word(word))
}

/// Checks if two languages are the same. This is done by checking if the
/// alphabets are the same and then checking if both accept the same words up
/// to a certain length.
pub fn same_language<A, B>(a: &A, b: &B, max_word_length: usize) -> bool
where
    A: Language,
    B: Language<Letter = A::Letter>,
{
    a.alphabet() == b.alphabet() && find_difference(a, b, max_word_length).is_none()
}

pub fn assert_same_language<A, B>(a: &A, b: &B, max_word_length: usize)
where
    A: Language,
    B: Language<Letter = A::Letter>,
{
    assert_eq!(a.alphabet(), b.alphabet(), "Alphabets are not the same");

    if let Some(word) = find_difference(a, b, max_word_length) {
        if a.accepts_word(&word) {
            panic!(
                "{:?} is accepted by `a` but not by `b`. Thus their languages are not equal.",
                word
            );
        } else {
            panic!(
                "{:?} is accepted by `b` but not by `a`. Thus their languages are not equal.",
                word
            );
        }
    }
}
