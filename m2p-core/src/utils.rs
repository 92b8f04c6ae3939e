//! Identifier helpers.

/// Convert a snake_case identifier to PascalCase (e.g., "user_profile_id" -> "UserProfileId").
///
/// The first character of each segment goes through `char::to_uppercase`,
/// not Unicode title-casing, so `ǆ` becomes `Ǆ`. The remainder keeps its
/// original case. Empty segments are dropped.
pub fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("user_id"), "UserId");
        assert_eq!(to_pascal_case("user_profile_id"), "UserProfileId");
        assert_eq!(to_pascal_case("orders"), "Orders");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn test_to_pascal_case_keeps_inner_case() {
        assert_eq!(to_pascal_case("hElLo_wORLD"), "HElLoWORLD");
        assert_eq!(to_pascal_case("user_ID"), "UserID");
    }

    #[test]
    fn test_to_pascal_case_idempotent_on_single_segment() {
        let once = to_pascal_case("Orders");
        assert_eq!(once, "Orders");
        assert_eq!(to_pascal_case(&once), once);
    }

    #[test]
    fn test_to_pascal_case_empty_segments() {
        assert_eq!(to_pascal_case("_user__id_"), "UserId");
        assert_eq!(to_pascal_case("table_2"), "Table2");
    }

    #[test]
    fn test_to_pascal_case_unicode() {
        assert_eq!(to_pascal_case("élan_vital"), "ÉlanVital");
        assert_eq!(to_pascal_case("ǆungla"), "Ǆungla");
    }
}
