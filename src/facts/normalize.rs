//! Location name canonicalization.

/// Canonical join key for a free-text location name.
///
/// Everything that is not an ASCII Latin letter is dropped and the remainder is uppercased, so
/// `"Saudi_Arabia"`, `"SAUDI ARABIA"` and `" saudi-arabia "` all become `"SAUDIARABIA"`. Letters
/// carrying diacritics are dropped too (`"Kärnten"` becomes `"KRNTEN"`), which is fine as long as
/// both sides of a join go through this function. Distinct places whose letters coincide collapse
/// onto one key; no attempt is made to tell them apart.
#[must_use]
pub fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Title-case a country name as printed by the international case table.
///
/// Words are split on spaces and underscores; `and` / `of` stay lowercase, every other word gets
/// an uppercase first letter and lowercase rest.
#[must_use]
pub fn country_display_name(name: &str) -> String {
    name.trim()
        .split([' ', '_'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            if part.eq_ignore_ascii_case("and") || part.eq_ignore_ascii_case("of") {
                return part.to_lowercase();
            }

            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
