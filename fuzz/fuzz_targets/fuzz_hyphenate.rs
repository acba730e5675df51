#![no_main]

use arbitrary::Arbitrary;
use hyph_text::{HyphenPolicy, Pattern, PatternSet, hyphenate, hyphenate_bytes};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    patterns: Vec<String>,
    word: Vec<u8>,
    left_min: u8,
    right_min: u8,
}

fuzz_target!(|input: Input| {
    let set: PatternSet = input
        .patterns
        .iter()
        .take(64)
        .filter_map(|text| Pattern::parse(text))
        .collect();
    // Patterns equal under zero padding are rejected; nothing else may fail.
    let Ok(index) = set.build_index() else {
        return;
    };
    let Ok(policy) = HyphenPolicy::new(
        usize::from(input.left_min.max(1)),
        usize::from(input.right_min.max(1)),
        '-',
    ) else {
        return;
    };

    let out = hyphenate_bytes(&input.word, &index, &policy).unwrap();
    if let Ok(word) = std::str::from_utf8(&input.word) {
        let text = hyphenate(word, &index, &policy).unwrap();
        assert_eq!(text.as_bytes(), &out[..]);
        let count = word.chars().count();
        let inner: String = word.chars().skip(1).take(count.saturating_sub(2)).collect();
        if !inner.contains('-') {
            assert_eq!(text.replace('-', ""), inner);
        }
    }
});
