//! Name ordering by Hangul phonetic decomposition.
//!
//! Every precomposed syllable in U+AC00..=U+D7A3 encodes a
//! (leading consonant, vowel, trailing consonant) triple. Comparing those
//! triples character by character yields conventional dictionary order.
//! Any other character maps to `(FALLBACK_LEADING, code point, 0)` and so
//! sorts after every syllable, ordered among its kind by code point.

use std::cmp::Ordering;

pub const SYLLABLE_FIRST: u32 = 0xAC00;
pub const SYLLABLE_LAST: u32 = 0xD7A3;

pub const LEADING_COUNT: u32 = 19;
pub const VOWEL_COUNT: u32 = 21;
pub const TRAILING_COUNT: u32 = 28;

/// Larger than any valid leading consonant index.
pub const FALLBACK_LEADING: u32 = 999;

const LEADING_JAMO: [char; LEADING_COUNT as usize] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ', 'ㅋ',
    'ㅌ', 'ㅍ', 'ㅎ',
];

const VOWEL_JAMO: [char; VOWEL_COUNT as usize] = [
    'ㅏ', 'ㅐ', 'ㅑ', 'ㅒ', 'ㅓ', 'ㅔ', 'ㅕ', 'ㅖ', 'ㅗ', 'ㅘ', 'ㅙ', 'ㅚ', 'ㅛ', 'ㅜ', 'ㅝ', 'ㅞ',
    'ㅟ', 'ㅠ', 'ㅡ', 'ㅢ', 'ㅣ',
];

// Index 0 means "no trailing consonant".
const TRAILING_JAMO: [Option<char>; TRAILING_COUNT as usize] = [
    None,
    Some('ㄱ'),
    Some('ㄲ'),
    Some('ㄳ'),
    Some('ㄴ'),
    Some('ㄵ'),
    Some('ㄶ'),
    Some('ㄷ'),
    Some('ㄹ'),
    Some('ㄺ'),
    Some('ㄻ'),
    Some('ㄼ'),
    Some('ㄽ'),
    Some('ㄾ'),
    Some('ㄿ'),
    Some('ㅀ'),
    Some('ㅁ'),
    Some('ㅂ'),
    Some('ㅄ'),
    Some('ㅅ'),
    Some('ㅆ'),
    Some('ㅇ'),
    Some('ㅈ'),
    Some('ㅊ'),
    Some('ㅋ'),
    Some('ㅌ'),
    Some('ㅍ'),
    Some('ㅎ'),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CharKey {
    pub leading: u32,
    pub vowel: u32,
    pub trailing: u32,
}

impl CharKey {
    pub fn of(c: char) -> Self {
        let code = c as u32;
        if !(SYLLABLE_FIRST..=SYLLABLE_LAST).contains(&code) {
            return Self {
                leading: FALLBACK_LEADING,
                vowel: code,
                trailing: 0,
            };
        }

        let offset = code - SYLLABLE_FIRST;
        Self {
            leading: offset / (VOWEL_COUNT * TRAILING_COUNT),
            vowel: (offset / TRAILING_COUNT) % VOWEL_COUNT,
            trailing: offset % TRAILING_COUNT,
        }
    }

    pub fn is_syllable(&self) -> bool {
        self.leading < LEADING_COUNT
    }

    pub fn as_tuple(&self) -> (u32, u32, u32) {
        (self.leading, self.vowel, self.trailing)
    }
}

/// Sort key for a whole name. Derived `Ord` on the inner `Vec` is
/// lexicographic, so a proper prefix sorts first and the empty key sorts
/// before everything.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CollationKey(Vec<CharKey>);

impl CollationKey {
    pub fn new(name: &str) -> Self {
        Self(name.chars().map(CharKey::of).collect())
    }

    pub fn components(&self) -> &[CharKey] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub fn collation_key(name: &str) -> CollationKey {
    CollationKey::new(name)
}

pub fn compare_names(a: &str, b: &str) -> Ordering {
    // Avoids allocating both keys when the first characters already differ.
    let mut left = a.chars().map(CharKey::of);
    let mut right = b.chars().map(CharKey::of);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => match l.cmp(&r) {
                Ordering::Equal => continue,
                other => return other,
            },
        }
    }
}

/// Stable sort of `items` by the collation key of the name `name_of` returns.
pub fn sort_by_name<T, F>(items: &mut [T], name_of: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by_cached_key(|item| collation_key(name_of(item)));
}

/// Compatibility jamo for one syllable, or `None` outside the syllable block.
pub fn decompose(c: char) -> Option<(char, char, Option<char>)> {
    let key = CharKey::of(c);
    if !key.is_syllable() {
        return None;
    }
    Some((
        LEADING_JAMO[key.leading as usize],
        VOWEL_JAMO[key.vowel as usize],
        TRAILING_JAMO[key.trailing as usize],
    ))
}
