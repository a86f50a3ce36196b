use crate::models::Thematique;

/// Built-in catalog shown when no source is configured or loading fails.
pub fn thematiques() -> Vec<Thematique> {
    vec![
        Thematique::new(
            "oop-architecture",
            "Architecture orientée objet",
            "Principes SOLID, design patterns et structuration modulaire pour des systèmes évolutifs.",
            "Intermédiaire",
            "Conception",
        ),
        Thematique::new(
            "oop-heritage",
            "Héritage et composition",
            "Comparer héritage et composition pour construire des hiérarchies souples et réutilisables.",
            "Débutant",
            "Fondamentaux",
        ),
        Thematique::new(
            "oop-interfaces",
            "Interfaces et contrats",
            "Utiliser des interfaces pour exprimer des contrats explicites et limiter le couplage.",
            "Intermédiaire",
            "Conception",
        ),
        Thematique::new(
            "oop-polymorphisme",
            "Polymorphisme",
            "Déléguer le comportement via le polymorphisme plutôt que des instructions conditionnelles.",
            "Avancé",
            "Patrons de conception",
        ),
        Thematique::new(
            "oop-tdd",
            "Tests unitaires en OOP",
            "Isoler les dépendances avec des doubles de test pour sécuriser le refactoring.",
            "Intermédiaire",
            "Qualité",
        ),
        Thematique::new(
            "oop-clean",
            "Code propre",
            "Nommer, découper et documenter des objets pour la lisibilité et la maintenabilité.",
            "Débutant",
            "Pratiques",
        ),
    ]
}
