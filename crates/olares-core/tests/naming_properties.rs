use olares_core::naming::{MAX_APP_NAME_LEN, sanitize_app_name};
use proptest::prelude::*;

fn is_valid_app_name(name: &str) -> bool {
    name.len() <= MAX_APP_NAME_LEN
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !name.starts_with('-')
        && !name.ends_with('-')
}

proptest! {
    #[test]
    fn sanitized_names_are_cluster_safe(input in any::<String>()) {
        let sanitized = sanitize_app_name(&input);
        prop_assert!(is_valid_app_name(&sanitized), "invalid name: {:?}", sanitized);
    }

    #[test]
    fn sanitize_is_idempotent(input in any::<String>()) {
        let once = sanitize_app_name(&input);
        prop_assert_eq!(sanitize_app_name(&once), once);
    }

    #[test]
    fn long_hyphenated_names_stay_valid(input in "[a-zA-Z _!-]{40,120}") {
        let sanitized = sanitize_app_name(&input);
        prop_assert!(is_valid_app_name(&sanitized), "invalid name: {:?}", sanitized);
    }
}

#[test]
fn sanitize_known_examples() {
    assert_eq!(sanitize_app_name("My App!!"), "my-app");
    assert_eq!(sanitize_app_name("  Flask Demo  "), "flask-demo");
    assert_eq!(sanitize_app_name("ÜBER_app"), "ber-app");
}
