//! Names for inferred models.
//!
//! An inline object shape used as an array element gets a model name
//! derived from the property holding it: `addresses` becomes `Address`,
//! `phoneNumbers` becomes `PhoneNumber`.

use convert_case::{Case, Casing};

/// Irregular plural to singular, matched on the last word.
const IRREGULAR: &[(&str, &str)] = &[
    ("people", "person"),
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("movies", "movie"),
    ("leaves", "leaf"),
    ("lives", "life"),
    ("knives", "knife"),
    ("wives", "wife"),
    ("wolves", "wolf"),
    ("halves", "half"),
    ("shelves", "shelf"),
    ("indices", "index"),
    ("criteria", "criterion"),
];

/// Words with no distinct singular.
const UNCOUNTABLE: &[&str] = &[
    "data",
    "metadata",
    "information",
    "equipment",
    "news",
    "series",
    "species",
    "sheep",
    "fish",
];

/// Build the model name for an anonymous shape.
///
/// Uses the singularized, PascalCased property name when there is one, and
/// `Inferred<N>` (N = number of models registered so far) otherwise.
pub fn inferred_model_name(property: Option<&str>, model_count: usize) -> String {
    match property.map(singularize).filter(|name| !name.is_empty()) {
        Some(name) => name.to_case(Case::Pascal),
        None => format!("Inferred{}", model_count),
    }
}

/// Singularize the last word of an identifier.
///
/// Handles camelCase, snake_case and kebab-case identifiers; only the last
/// word changes.
pub fn singularize(word: &str) -> String {
    let (head, last) = split_last_word(word);
    let lower = last.to_lowercase();

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }

    let singular = if let Some((_, singular)) = IRREGULAR.iter().find(|(plural, _)| *plural == lower) {
        match_case(last, singular)
    } else if lower.ends_with("ies") && lower.len() > 3 {
        format!("{}y", &last[..last.len() - 3])
    } else if lower.ends_with("sses")
        || lower.ends_with("xes")
        || lower.ends_with("ches")
        || lower.ends_with("shes")
        || lower.ends_with("zzes")
    {
        last[..last.len() - 2].to_string()
    } else if lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is") {
        last.to_string()
    } else if lower.ends_with('s') && lower.len() > 1 {
        last[..last.len() - 1].to_string()
    } else {
        last.to_string()
    };

    format!("{}{}", head, singular)
}

fn split_last_word(word: &str) -> (&str, &str) {
    let camel = word
        .char_indices()
        .filter(|(i, c)| *i > 0 && c.is_uppercase())
        .map(|(i, _)| i)
        .last()
        .unwrap_or(0);
    let separated = word
        .rfind(['_', '-'])
        .map(|i| i + 1)
        .unwrap_or(0);
    word.split_at(camel.max(separated))
}

fn match_case(original: &str, replacement: &str) -> String {
    match original.chars().next() {
        Some(first) if first.is_uppercase() => {
            let mut chars = replacement.chars();
            match chars.next() {
                Some(head) => head.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
        _ => replacement.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singularize_regular() {
        assert_eq!(singularize("posts"), "post");
        assert_eq!(singularize("addresses"), "address");
        assert_eq!(singularize("categories"), "category");
        assert_eq!(singularize("boxes"), "box");
        assert_eq!(singularize("matches"), "match");
        assert_eq!(singularize("phones"), "phone");
    }

    #[test]
    fn test_singularize_keeps_singular_words() {
        assert_eq!(singularize("address"), "address");
        assert_eq!(singularize("status"), "status");
        assert_eq!(singularize("analysis"), "analysis");
        assert_eq!(singularize("item"), "item");
        assert_eq!(singularize("data"), "data");
    }

    #[test]
    fn test_singularize_irregular_and_compound() {
        assert_eq!(singularize("people"), "person");
        assert_eq!(singularize("phoneNumbers"), "phoneNumber");
        assert_eq!(singularize("teamPeople"), "teamPerson");
        assert_eq!(singularize("order_items"), "order_item");
    }

    #[test]
    fn test_inferred_model_name() {
        assert_eq!(inferred_model_name(Some("addresses"), 3), "Address");
        assert_eq!(inferred_model_name(Some("phoneNumbers"), 0), "PhoneNumber");
        assert_eq!(inferred_model_name(Some("order_items"), 0), "OrderItem");
        assert_eq!(inferred_model_name(None, 4), "Inferred4");
        assert_eq!(inferred_model_name(Some(""), 2), "Inferred2");
    }
}
