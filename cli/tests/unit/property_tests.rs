//! Property-based tests for bucket naming and request building.

use std::collections::HashSet;

use gcf_deploy_cli::domain::bucket::{BUCKET_SUFFIX, generate_bucket_name, validate_bucket_name};
use gcf_deploy_cli::domain::function::FunctionTemplate;
use gcf_deploy_cli::domain::target::DeploymentTarget;
use proptest::prelude::*;

#[test]
fn generated_bucket_names_are_distinct() {
    let names: HashSet<String> = (0..1000).map(|_| generate_bucket_name()).collect();
    assert_eq!(names.len(), 1000);
}

proptest! {
    /// Every generated name passes the naming rules.
    #[test]
    fn prop_generated_bucket_name_is_valid(_seed in 0u32..500) {
        let name = generate_bucket_name();
        prop_assert!(name.ends_with(BUCKET_SUFFIX));
        prop_assert!(!name.starts_with("goog"), "{}", name);
        prop_assert!(validate_bucket_name(&name).is_ok(), "{}", name);
    }

    /// Uppercase characters are never accepted.
    #[test]
    fn prop_uppercase_bucket_name_rejected(name in "[a-z0-9]{1,20}[A-Z][a-z0-9]{1,20}") {
        prop_assert!(validate_bucket_name(&name).is_err());
    }

    /// The function id and resource name always end in `-<index>`.
    #[test]
    fn prop_request_names_carry_index(
        base in "[a-z][a-z0-9-]{0,20}[a-z0-9]",
        index in 1u32..=50,
    ) {
        let target = DeploymentTarget::new("p", "us-central1", &base);
        let request = FunctionTemplate::default().request(&target, index, "b", "o.zip");
        let expected_id = format!("{base}-{index}");
        prop_assert_eq!(&request.function_id, &expected_id);
        let expected_suffix = format!("/functions/{expected_id}");
        prop_assert!(request.function.name.ends_with(&expected_suffix));
        prop_assert_eq!(&request.parent, "projects/p/locations/us-central1");
    }
}
