#![no_main]

use abtest::{split_groups, Dataset};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Parsing and group validation must return errors, never panic
        if let Ok(dataset) = Dataset::from_csv_str(input) {
            if let Some(headers) = dataset.headers().get(..2) {
                let _ = split_groups(&dataset, &headers[0], &headers[1]);
            }
        }
    }
});
