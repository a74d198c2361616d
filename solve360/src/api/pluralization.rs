//! Resource-path naming for Solve360 record types
//!
//! The service addresses each record type at a collection path derived from
//! the type name: lower-cased and pluralized with English grammar rules
//! (`Contact` -> `/contacts`, `Company` -> `/companies`).

/// Derive the URL path segment for a record type name.
pub fn resource_name(type_name: &str) -> String {
    pluralize(&type_name.to_lowercase())
}

/// Pluralize an already lower-cased word using English grammar rules.
fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    // s/ss/sh/ch/x endings take 'es'
    if word.ends_with('s') || word.ends_with("sh") || word.ends_with("ch") || word.ends_with('x') {
        return format!("{word}es");
    }

    // 'z' doubles and takes 'es'
    if word.ends_with('z') && !word.ends_with("tz") {
        return format!("{word}zes");
    }

    // consonant + 'y' becomes 'ies'
    if let Some(stem) = word.strip_suffix('y') {
        if matches!(stem.chars().last(), Some(c) if !"aeiou".contains(c)) {
            return format!("{stem}ies");
        }
    }

    // 'f'/'fe' endings become 'ves'
    if let Some(stem) = word.strip_suffix("fe") {
        return format!("{stem}ves");
    }
    if let Some(stem) = word.strip_suffix('f') {
        return format!("{stem}ves");
    }

    // consonant + 'o' takes 'es'
    if word.ends_with('o') {
        if matches!(word.chars().rev().nth(1), Some(c) if !"aeiou".contains(c)) {
            return format!("{word}es");
        }
    }

    format!("{word}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_record_types() {
        assert_eq!(resource_name("Contact"), "contacts");
        assert_eq!(resource_name("Company"), "companies");
        assert_eq!(resource_name("ProjectBlog"), "projectblogs");
        assert_eq!(resource_name("Opportunity"), "opportunities");
    }

    #[test]
    fn test_es_endings() {
        assert_eq!(resource_name("Address"), "addresses");
        assert_eq!(resource_name("Branch"), "branches");
        assert_eq!(resource_name("Box"), "boxes");
        assert_eq!(resource_name("Quiz"), "quizzes");
    }

    #[test]
    fn test_vowel_y_keeps_y() {
        assert_eq!(resource_name("Key"), "keys");
        assert_eq!(resource_name("Survey"), "surveys");
    }

    #[test]
    fn test_f_and_o_endings() {
        assert_eq!(resource_name("Leaf"), "leaves");
        assert_eq!(resource_name("Knife"), "knives");
        assert_eq!(resource_name("Hero"), "heroes");
        assert_eq!(resource_name("Video"), "videos");
    }

    #[test]
    fn test_empty() {
        assert_eq!(resource_name(""), "");
    }
}
