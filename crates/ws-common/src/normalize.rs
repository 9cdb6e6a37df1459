use std::collections::HashMap;
use std::sync::LazyLock;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Skill alias → canonical form (both already folded by [`fold_text`]).
///
/// Only true synonyms belong here; related-but-different roles (e.g. cocinero
/// vs ayudante de cocina) must stay distinct.
static SKILL_ALIASES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let aliases: &[(&str, &[&str])] = &[
        (
            "atencion al cliente",
            &[
                "servicio al cliente",
                "atencion al publico",
                "customer service",
            ],
        ),
        ("camarero", &["mesero", "camarera", "mesera", "waiter"]),
        ("cocteleria", &["mixologia", "cocktails", "cocteles"]),
        ("barista", &["cafeteria de especialidad", "barismo"]),
        ("recepcion", &["recepcionista", "front desk"]),
        ("limpieza", &["housekeeping", "camarera de pisos"]),
        ("sumiller", &["sommelier", "sumilleria"]),
        ("manipulacion de alimentos", &["manipulador de alimentos", "food handling"]),
    ];

    let mut map = HashMap::new();
    for (canonical, variants) in aliases {
        map.insert(*canonical, *canonical);
        for variant in *variants {
            map.insert(*variant, *canonical);
        }
    }
    map
});

/// Fold free text for comparison: NFKD, drop accents, lowercase, trim and
/// collapse internal whitespace.
pub fn fold_text(raw: &str) -> String {
    let folded: String = raw
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Canonical key used to compare skill names between profiles and postings.
pub fn canonical_skill(raw: &str) -> String {
    let folded = fold_text(raw);
    match SKILL_ALIASES.get(folded.as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => folded,
    }
}

/// Fold a list of tags, dropping the ones that end up empty. Order is kept and
/// duplicates removed.
pub fn fold_tags(tags: &[String]) -> Vec<String> {
    let mut folded: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let value = fold_text(tag);
        if !value.is_empty() && !folded.contains(&value) {
            folded.push(value);
        }
    }
    folded
}
