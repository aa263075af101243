#![no_main]

use std::path::Path;

use avatar_lint::bundle::loader::parse_document;
use avatar_lint::bundle::schema::{FACE_SCHEMA, MODE_SCHEMA};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Invalid UTF-8 never reaches the parser
    if let Ok(raw) = std::str::from_utf8(data) {
        let checked = parse_document(raw, Path::new("fuzz/config.json"), "fuzz/config.json");
        let Some(doc) = checked.value else {
            return;
        };

        // Every field lookup must classify, never panic
        for schema in [&FACE_SCHEMA, &MODE_SCHEMA] {
            for spec in schema.fields {
                let field = doc.field::<serde_json::Value>(*spec);
                let _ = doc.field_issue(*spec, &field);
            }
            let _ = doc.unknown_fields(schema);
        }
    }
});
