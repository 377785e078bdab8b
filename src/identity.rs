//! Resource identity encoding
//!
//! Most GitLab objects are addressed by a single id, but some (project
//! memberships, for example) are only unique as a pair. Those pairs are
//! stored as one opaque string joined with [`DELIMITER`]. The codec is
//! byte-exact: no trimming or case folding happens in either direction,
//! so `encode(decode(id))` always reproduces `id`.

use crate::error::{Error, Result};
use std::str::FromStr;

/// Separator between the parts of a composite identity
pub const DELIMITER: char = ':';

/// Join identity parts into a single identity string
pub fn encode<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(&DELIMITER.to_string())
}

/// Split an identity string into exactly `expected` parts
pub fn decode(id: &str, expected: usize) -> Result<Vec<String>> {
    let parts: Vec<String> = id.split(DELIMITER).map(str::to_string).collect();
    if parts.len() != expected {
        return Err(Error::MalformedIdentifier {
            id: id.to_string(),
            expected,
            found: parts.len(),
        });
    }
    Ok(parts)
}

/// Build a `"<first>:<second>"` identity
pub fn build_two_part_id(first: &str, second: &str) -> String {
    encode(&[first, second])
}

/// Parse a `"<first>:<second>"` identity
pub fn parse_two_part_id(id: &str) -> Result<(String, String)> {
    let mut parts = decode(id, 2)?.into_iter();
    match (parts.next(), parts.next()) {
        (Some(first), Some(second)) => Ok((first, second)),
        _ => Err(Error::MalformedIdentifier {
            id: id.to_string(),
            expected: 2,
            found: 0,
        }),
    }
}

/// Parse one identity component as a number
pub fn parse_component<T>(component: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse::<T>()
        .map_err(|e| Error::invalid_component(component, value, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_two_parts() {
        assert_eq!(build_two_part_id("group/project", "42"), "group/project:42");
        assert_eq!(encode(&["a", "b", "c"]), "a:b:c");
    }

    #[test]
    fn test_decode_two_parts() {
        let (project, user) = parse_two_part_id("group/project:42").unwrap();
        assert_eq!(project, "group/project");
        assert_eq!(user, "42");
    }

    #[test]
    fn test_decode_wrong_part_count() {
        let err = decode("123", 2).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedIdentifier {
                expected: 2,
                found: 1,
                ..
            }
        ));

        let err = parse_two_part_id("a:b:c").unwrap_err();
        assert!(matches!(err, Error::MalformedIdentifier { found: 3, .. }));
    }

    #[test]
    fn test_decode_is_byte_exact() {
        let parts = decode(" Group :  7", 2).unwrap();
        assert_eq!(parts, vec![" Group ".to_string(), "  7".to_string()]);
    }

    #[test]
    fn test_decode_empty_parts() {
        assert_eq!(decode(":", 2).unwrap(), vec![String::new(), String::new()]);
        assert_eq!(decode("", 1).unwrap(), vec![String::new()]);
    }

    #[test]
    fn test_parse_component() {
        let user_id: i64 = parse_component("user_id", "42").unwrap();
        assert_eq!(user_id, 42);

        let err = parse_component::<i64>("user_id", "abc").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidIdentifierComponent { ref component, ref value, .. }
                if component == "user_id" && value == "abc"
        ));
    }

    proptest! {
        #[test]
        fn prop_decode_encode_round_trip(parts in prop::collection::vec("[^:]{0,12}", 1..5)) {
            let id = encode(&parts);
            prop_assert_eq!(decode(&id, parts.len()).unwrap(), parts);
        }

        #[test]
        fn prop_encode_decode_round_trip(id in "[a-z0-9/]{0,8}(:[a-z0-9/]{0,8}){0,3}") {
            let count = id.matches(DELIMITER).count() + 1;
            let parts = decode(&id, count).unwrap();
            prop_assert_eq!(encode(&parts), id);
        }

        #[test]
        fn prop_wrong_count_is_malformed(parts in prop::collection::vec("[^:]{0,12}", 1..5), extra in 1usize..3) {
            let id = encode(&parts);
            let is_malformed = matches!(
                decode(&id, parts.len() + extra),
                Err(Error::MalformedIdentifier { .. })
            );
            prop_assert!(is_malformed);
        }
    }
}
