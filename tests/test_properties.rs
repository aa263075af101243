mod common;

use std::path::Path;

use avatar_lint::bundle::loader::parse_document;
use avatar_lint::bundle::{IssueCode, Validator};
use common::{BundleFixture, standard_mode};
use proptest::prelude::*;
use proptest::test_runner::Config;
use serde_json::json;

proptest! {
    #![proptest_config(Config::with_cases(32))]

    /// Each missing hand frame yields exactly one warning and never an error.
    #[test]
    fn missing_frames_match_warning_count(present in proptest::collection::vec(any::<bool>(), 1..8)) {
        let bundle = BundleFixture::valid();
        let frames: Vec<String> = (0..present.len()).map(|i| format!("f{i}.png")).collect();
        let mut mode = standard_mode();
        mode["LeftHandImageName"] = json!(frames);
        bundle.json("mode/standard/config.json", &mode);

        let existing: Vec<&str> = frames
            .iter()
            .zip(&present)
            .filter(|(_, keep)| **keep)
            .map(|(name, _)| name.as_str())
            .collect();
        bundle.touch_all("mode/standard/lefthand", &existing);

        let report = Validator::new(bundle.path()).validate_all();
        let missing = present.iter().filter(|keep| !**keep).count();
        prop_assert!(report.is_valid());
        prop_assert_eq!(report.with_code(IssueCode::MissingHandFrame).count(), missing);
        prop_assert_eq!(report.warnings.len(), missing);
        prop_assert_eq!(report, Validator::new(bundle.path()).validate_all());
    }

    /// Arbitrary text either parses to an object or produces exactly one error.
    #[test]
    fn parse_document_never_mixes_value_and_errors(raw in "\\PC{0,64}") {
        let checked = parse_document(&raw, Path::new("x/config.json"), "x/config.json");
        if checked.value.is_some() {
            prop_assert!(checked.issues.is_empty());
        } else {
            prop_assert_eq!(checked.issues.len(), 1);
        }
    }
}
