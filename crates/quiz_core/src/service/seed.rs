//! Seed records inserted into an empty store.

/// Question/answer pairs loaded the first time a store is initialized.
pub const SEED_QUIZZES: &[(&str, &str)] = &[
    ("Capital de Italia", "Roma"),
    ("Capital de Francia", "París"),
    ("Capital de España", "Madrid"),
    ("Capital de Portugal", "Lisboa"),
    ("Oro parece, Plata no es, que es?", "Plátano"),
    ("Capital del Priorat?", "Falset"),
    (
        "Choco con un tranvía, late mi corazón, y quien no lo adivine, es un tontorrón.",
        "Chocolate",
    ),
];
