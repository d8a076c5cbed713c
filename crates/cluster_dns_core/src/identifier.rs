use std::sync::LazyLock;

use regex::Regex;

use crate::error::RoutingError;

pub const CLUSTER_SEPARATOR: &str = ":cluster/";

// (?s) lets the name run to end of input even across line breaks.
static CLUSTER_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s):cluster/(.+)").expect("cluster name pattern is a valid regex")
});

/// Extracts the cluster name from an ECS cluster ARN.
///
/// Everything after the first `:cluster/` is returned, trailing path segments
/// included. An ARN without that separator, or with nothing after it, is rejected.
pub fn parse_cluster_name(cluster_arn: &str) -> Result<&str, RoutingError> {
    CLUSTER_NAME_PATTERN
        .captures(cluster_arn)
        .and_then(|captures| captures.get(1))
        .map(|name| name.as_str())
        .ok_or_else(|| RoutingError::Parse {
            input: cluster_arn.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn parses_name_from_cluster_arn() {
        let name = parse_cluster_name("arn:aws:ecs:us-west-2:123456789012:cluster/test-cluster")
            .expect("valid arn should parse");
        assert_eq!(name, "test-cluster");
    }

    #[test]
    fn rejects_arn_without_cluster_separator() {
        let error = parse_cluster_name("this:arn:isnt:valid/cluster-name")
            .expect_err("invalid arn should fail");
        assert_eq!(
            error,
            RoutingError::Parse {
                input: "this:arn:isnt:valid/cluster-name".to_string()
            }
        );
    }

    #[test]
    fn rejects_separator_with_empty_name() {
        assert!(parse_cluster_name("arn:aws:ecs:us-west-2:123456789012:cluster/").is_err());
    }

    #[test]
    fn keeps_trailing_path_segments() {
        let name = parse_cluster_name("arn:aws:ecs:eu-west-1:1:cluster/team/blue")
            .expect("arn should parse");
        assert_eq!(name, "team/blue");
    }

    #[test]
    fn splits_on_first_separator_only() {
        let name = parse_cluster_name("a:cluster/b:cluster/c").expect("arn should parse");
        assert_eq!(name, "b:cluster/c");
    }

    #[test]
    fn name_runs_across_line_breaks() {
        let name = parse_cluster_name("arn:aws:ecs:us-east-1:1:cluster/first\nsecond")
            .expect("arn should parse");
        assert_eq!(name, "first\nsecond");
    }

    proptest! {
        #[test]
        fn returns_everything_after_separator(
            prefix in "[a-z0-9:-]{0,24}",
            name in "\\PC{1,40}",
        ) {
            let arn = format!("{prefix}{CLUSTER_SEPARATOR}{name}");
            let expected = &arn[arn.find(CLUSTER_SEPARATOR).unwrap() + CLUSTER_SEPARATOR.len()..];
            prop_assert_eq!(parse_cluster_name(&arn).unwrap(), expected);
        }

        #[test]
        fn fails_without_separator(input in "\\PC{0,64}") {
            prop_assume!(!input.contains(CLUSTER_SEPARATOR));
            prop_assert!(
                matches!(parse_cluster_name(&input), Err(RoutingError::Parse { .. })),
                "expected parse error for {:?}",
                input
            );
        }
    }
}
