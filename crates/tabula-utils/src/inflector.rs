//! Naming-convention translation between model, table, and column names.
//!
//! The plural rules are suffix heuristics with no irregular-word table.
//! `Stats` stays `Stats`, `Weakness` becomes `Weaknesses`, and any word that
//! already ends in `s` is treated as plural. Table and foreign-key derivation
//! depends on these exact quirks, so they are kept as-is.
//!
//! Resolving a name to a model (`constantize`) needs a registry and lives on
//! `tabula_core::model::Schema`.

///
/// CONSTANTS
///

/// Separator between namespace segments in a qualified model name.
pub const NAMESPACE_SEPARATOR: &str = "::";

/// Suffix appended to a demodulized, underscored name to form a foreign key.
pub const FOREIGN_KEY_SUFFIX: &str = "_id";

/// Return the plural form of `word`.
///
/// - `Category` → `Categories`
/// - `Weakness` → `Weaknesses`
/// - `Stats` → `Stats`
/// - `Pokemon` → `Pokemons`
#[must_use]
pub fn pluralize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix('y') {
        return format!("{stem}ies");
    }
    if word.ends_with("ss") {
        return format!("{word}es");
    }
    if word.ends_with('s') {
        return word.to_string();
    }

    format!("{word}s")
}

/// Return the singular form of `word`, the inverse of [`pluralize`].
///
/// - `Categories` → `Category`
/// - `Weaknesses` → `Weakness`
/// - `Weakness` → `Weakness`
/// - `Pokemons` → `Pokemon`
#[must_use]
pub fn singularize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies") {
        return format!("{stem}y");
    }
    if let Some(stem) = word.strip_suffix("sses") {
        return format!("{stem}ss");
    }
    if word.ends_with("ss") {
        return word.to_string();
    }

    word.strip_suffix('s').unwrap_or(word).to_string()
}

/// Convert a snake-case name to upper camel case.
///
/// `pokemon_shiny` → `PokemonShiny`
#[must_use]
pub fn camelize(name: &str) -> String {
    name.split('_').map(capitalize).collect()
}

/// Convert a camel-case name to snake case.
///
/// `PokemonShiny` → `pokemon_shiny`
#[must_use]
pub fn underscorize(name: &str) -> String {
    let mut chars = name.chars();
    let Some(head) = chars.next() else {
        return String::new();
    };

    let mut out = String::with_capacity(name.len() + 4);
    out.extend(head.to_lowercase());

    for c in chars {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}

/// Return the rightmost segment of a namespaced name.
///
/// `PokemonGo::Trainer` → `Trainer`
#[must_use]
pub fn demodulize(name: &str) -> &str {
    name.rsplit_once(NAMESPACE_SEPARATOR)
        .map_or(name, |(_, last)| last)
}

/// Model name to table name: `underscorize` then `pluralize`.
///
/// `PokemonShiny` → `pokemon_shinies`
#[must_use]
pub fn tableize(name: &str) -> String {
    pluralize(&underscorize(name))
}

/// Table (or association) name to model name: `camelize` then `singularize`.
///
/// `pokemon_shinies` → `PokemonShiny`
#[must_use]
pub fn classify(name: &str) -> String {
    singularize(&camelize(name))
}

/// Foreign-key column for a model or association name.
///
/// `PokemonGo::Trainer` → `trainer_id`
#[must_use]
pub fn foreign_key(name: &str) -> String {
    let mut key = underscorize(demodulize(name));
    key.push_str(FOREIGN_KEY_SUFFIX);
    key
}

// Upper-case the first character and lower-case the rest.
fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    let Some(head) = chars.next() else {
        return String::new();
    };

    head.to_uppercase()
        .chain(chars.flat_map(char::to_lowercase))
        .collect()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn pluralize_follows_suffix_rules() {
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("weakness"), "weaknesses");
        assert_eq!(pluralize("stats"), "stats");
        assert_eq!(pluralize("pokemon"), "pokemons");
        assert_eq!(pluralize(""), "s");
    }

    #[test]
    fn singularize_inverts_suffix_rules() {
        assert_eq!(singularize("categories"), "category");
        assert_eq!(singularize("weaknesses"), "weakness");
        assert_eq!(singularize("weakness"), "weakness");
        assert_eq!(singularize("pokemons"), "pokemon");
        assert_eq!(singularize("pokemon"), "pokemon");
    }

    #[test]
    fn plural_rules_keep_known_false_positives() {
        // Words ending in a lone `s` are assumed to be plural already.
        assert_eq!(pluralize("status"), "status");
        assert_eq!(singularize("status"), "statu");
        assert_eq!(singularize("pies"), "py");
    }

    #[test]
    fn camelize_capitalizes_every_segment() {
        assert_eq!(camelize("pokemon_shiny"), "PokemonShiny");
        assert_eq!(camelize("pokemon"), "Pokemon");
        assert_eq!(camelize("SIGNATURE_move"), "SignatureMove");
        assert_eq!(camelize(""), "");
    }

    #[test]
    fn underscorize_splits_on_capitals() {
        assert_eq!(underscorize("PokemonShiny"), "pokemon_shiny");
        assert_eq!(underscorize("Pokemon"), "pokemon");
        assert_eq!(underscorize("pokemonShinyMove"), "pokemon_shiny_move");
        assert_eq!(underscorize(""), "");
    }

    #[test]
    fn demodulize_takes_last_segment() {
        assert_eq!(demodulize("PokemonGo::Trainer"), "Trainer");
        assert_eq!(demodulize("A::B::Move"), "Move");
        assert_eq!(demodulize("Trainer"), "Trainer");
    }

    #[test]
    fn composite_rules() {
        assert_eq!(tableize("PokemonShiny"), "pokemon_shinies");
        assert_eq!(tableize("Stats"), "stats");
        assert_eq!(classify("pokemon_shinies"), "PokemonShiny");
        assert_eq!(classify("signature_move"), "SignatureMove");
        assert_eq!(foreign_key("PokemonGo::Trainer"), "trainer_id");
        assert_eq!(foreign_key("category"), "category_id");
        assert_eq!(foreign_key("SignatureMove"), "signature_move_id");
    }

    // Regular nouns: no trailing `s`, and no suffix that pluralizes into
    // another rule's input (`pie` → `pies` → `py`, `asse` → `asses` → `ass`).
    fn regular_noun() -> impl Strategy<Value = String> {
        "[a-z]{1,12}".prop_filter("irregular under suffix rules", |w| {
            !w.ends_with('s') && !w.ends_with("ie") && !w.ends_with("sse")
        })
    }

    fn class_name() -> impl Strategy<Value = String> {
        (prop::collection::vec("[A-Z][a-z]{1,6}", 0..3), regular_noun()).prop_map(
            |(mut segments, last)| {
                segments.push(camelize(&last));
                segments.concat()
            },
        )
    }

    proptest! {
        #[test]
        fn singularize_inverts_pluralize(word in regular_noun()) {
            prop_assert_eq!(singularize(&pluralize(&word)), word);
        }

        #[test]
        fn classify_inverts_tableize(name in class_name()) {
            prop_assert_eq!(classify(&tableize(&name)), name);
        }

        #[test]
        fn foreign_key_ignores_namespace(ns in "[A-Z][a-z]{1,6}", name in class_name()) {
            let qualified = format!("{ns}::{name}");
            prop_assert_eq!(foreign_key(&qualified), foreign_key(&name));
        }
    }
}
