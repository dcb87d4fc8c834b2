//! Property-based tests for domain value objects and entities
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::{DocumentKind, GeneratedFiling};
use proptest::prelude::*;

// ============================================================================
// DocumentKind Property Tests
// ============================================================================

mod document_kind_tests {
    use super::*;

    proptest! {
        #[test]
        fn supported_suffix_always_routes_to_its_extractor(
            stem in "[a-zA-Zа-яА-Я0-9 _-]{0,30}",
            ext in prop_oneof![Just("pdf"), Just("docx"), Just("txt")]
        ) {
            let name = format!("{stem}.{ext}");
            let kind = DocumentKind::from_file_name(&name);
            let expected = match ext {
                "pdf" => DocumentKind::Pdf,
                "docx" => DocumentKind::Docx,
                _ => DocumentKind::PlainText,
            };
            prop_assert_eq!(kind, expected);
        }

        #[test]
        fn casing_never_changes_the_route(name in "[a-zA-Z0-9._-]{1,40}") {
            let lower = DocumentKind::from_file_name(&name.to_lowercase());
            let upper = DocumentKind::from_file_name(&name.to_uppercase());
            prop_assert_eq!(lower, upper);
        }

        #[test]
        fn unknown_extensions_are_unsupported(
            stem in "[a-z0-9_-]{1,20}",
            ext in "[a-z]{1,6}"
        ) {
            prop_assume!(ext != "pdf" && ext != "docx" && ext != "txt");
            let name = format!("{stem}.{ext}");
            prop_assert_eq!(
                DocumentKind::from_file_name(&name),
                DocumentKind::Unsupported
            );
        }

        #[test]
        fn serialization_roundtrip(
            kind in prop_oneof![
                Just(DocumentKind::Pdf),
                Just(DocumentKind::Docx),
                Just(DocumentKind::PlainText),
                Just(DocumentKind::Unsupported),
            ]
        ) {
            let json = serde_json::to_string(&kind).unwrap();
            let deserialized: DocumentKind = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(kind, deserialized);
        }
    }
}

// ============================================================================
// GeneratedFiling Property Tests
// ============================================================================

mod generated_filing_tests {
    use super::*;

    proptest! {
        #[test]
        fn no_paragraph_is_blank_or_padded(draft in "[ a-zA-Zа-я\n\t]{0,200}") {
            let filing = GeneratedFiling::from_draft(&draft);
            for paragraph in &filing.paragraphs {
                prop_assert!(!paragraph.is_empty());
                prop_assert_eq!(paragraph.trim(), paragraph.as_str());
            }
        }

        #[test]
        fn paragraph_count_never_exceeds_line_count(draft in "\\PC{0,200}") {
            let filing = GeneratedFiling::from_draft(&draft);
            prop_assert!(filing.paragraphs.len() <= draft.lines().count());
        }

        #[test]
        fn trimmed_nonblank_lines_survive_in_order(
            lines in prop::collection::vec("[a-zа-я]{1,12}", 0..12)
        ) {
            let draft = lines.join("\n");
            let filing = GeneratedFiling::from_draft(&draft);
            prop_assert_eq!(filing.paragraphs, lines);
        }
    }
}
