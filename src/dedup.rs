use std::collections::HashSet;

use crate::model::{Record, ResultEntry};

/// Keeps the first record for each distinct redirect value, in received order.
/// Records without a redirect tag are dropped.
pub fn dedupe_by_redirect(records: Vec<Record>) -> Vec<ResultEntry> {
    let mut seen: HashSet<String> = HashSet::with_capacity(records.len());
    let mut output = Vec::with_capacity(records.len());

    for record in records {
        let Some(redirect) = record.redirect() else {
            continue;
        };
        if seen.insert(redirect.to_string()) {
            output.push(ResultEntry::new(record));
        }
    }

    output
}
