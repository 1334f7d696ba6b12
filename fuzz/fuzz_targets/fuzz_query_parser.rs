#![no_main]

use libfuzzer_sys::fuzz_target;
use triesearch::index::TrieIndex;

fuzz_target!(|data: &str| {
    // Arbitrary chunks must produce a result or an error, never a panic
    let chunks: Vec<&str> = data.split(' ').collect();
    let _ = triesearch::query::parse_query(&chunks);

    let mut index = TrieIndex::new();
    index.add_document(1, data.split(|c: char| !c.is_alphanumeric()));
    let _ = triesearch::query::query(&index, &chunks);
});
