#![no_main]

use libfuzzer_sys::fuzz_target;

mod utils;

use utils::{assert_safe_slice, truncate_utf8};

fuzz_target!(|data: &[u8]| {
    let Some(text) = truncate_utf8(data) else {
        return;
    };

    // Every breaker must return ordered, non-overlapping ranges that slice `text` safely.
    for spans in [
        sift_matcher::break_into_word_runs(text, false),
        sift_matcher::break_into_word_runs(text, true),
        sift_matcher::break_into_word_parts(text),
        sift_matcher::break_into_character_parts(text),
    ] {
        let mut prev_end = 0;
        for span in spans {
            let start = u32::from(span.start()) as usize;
            let end = u32::from(span.end()) as usize;
            assert!(start < end, "empty span {start}..{end}");
            assert!(prev_end <= start, "overlapping span {start}..{end}");
            assert_safe_slice(text, start, end);
            prev_end = end;
        }
    }
});
