#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Skills,
    Experience,
    Location,
    Availability,
}

/// One sub-score as seen by the narrative generator.
#[derive(Debug, Clone, Copy)]
pub struct CategoryScore {
    pub category: Category,
    pub score: f64,
    /// The input for this category was missing rather than incompatible.
    pub unknown: bool,
}

fn strength_text(category: Category) -> &'static str {
    match category {
        Category::Skills => "Excelente dominio de habilidades requeridas",
        Category::Experience => "Amplia experiencia en el sector",
        Category::Location => "Ubicación compatible con el puesto",
        Category::Availability => "Disponibilidad compatible con el horario del puesto",
    }
}

fn weakness_text(category: Category, unknown: bool) -> &'static str {
    match (category, unknown) {
        (Category::Skills, _) => "Faltan habilidades importantes para el puesto",
        (Category::Experience, _) => "Experiencia limitada para el puesto",
        (Category::Location, true) => "Ubicación no indicada, requiere confirmación",
        (Category::Location, false) => "Ubicación alejada del lugar de trabajo",
        (Category::Availability, true) => "Disponibilidad no indicada, requiere confirmación",
        (Category::Availability, false) => "Disponibilidad no coincide con el horario requerido",
    }
}

/// Templated strengths (score ≥ strong) and weaknesses (score < weak), one per
/// category at most, in the order the scores are given.
pub fn describe(scores: &[CategoryScore], strong: f64, weak: f64) -> (Vec<String>, Vec<String>) {
    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();

    for entry in scores {
        if entry.score >= strong {
            strengths.push(strength_text(entry.category).to_string());
        } else if entry.score < weak {
            weaknesses.push(weakness_text(entry.category, entry.unknown).to_string());
        }
    }

    (strengths, weaknesses)
}
