// src/noyau/etapes.rs
//
// Démarche d’une résolution : suite ordonnée d’étapes (expression, résultat, explication).
// Ajout seulement, locale à un appel de solveur, rendue par valeur à l’UI.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Etape {
    pub expression: String,
    pub resultat: String, // peut être vide
    pub explication: String,
}

impl Etape {
    pub fn new(
        expression: impl Into<String>,
        resultat: impl Into<String>,
        explication: impl Into<String>,
    ) -> Self {
        Self {
            expression: expression.into(),
            resultat: resultat.into(),
            explication: explication.into(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Etapes(Vec<Etape>);

impl Etapes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ajouter(
        &mut self,
        expression: impl Into<String>,
        resultat: impl Into<String>,
        explication: impl Into<String>,
    ) {
        self.0.push(Etape::new(expression, resultat, explication));
    }

    pub fn into_vec(self) -> Vec<Etape> {
        self.0
    }
}

/// Résultat d’une résolution : texte affiché + démarche.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    pub resultat: String,
    pub etapes: Vec<Etape>,
}
