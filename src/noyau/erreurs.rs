// src/noyau/erreurs.rs
//
// Taxonomie des erreurs du noyau.
// - Syntaxe    : jetons / parenthèses / forme invalide
// - Evaluation : domaine, symbole inconnu, résultat non fini
// - Résolution : équation hors du domaine des solveurs
// - Conversion : unités incompatibles ou inconnues
//
// Aucune de ces erreurs ne traverse la frontière UI : chaque point d’entrée
// public la convertit en sentinelle ("Error", "Error solving equation", ...).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErreurCalcul {
    #[error("syntax error: {0}")]
    Syntaxe(String),

    #[error("evaluation error: {0}")]
    Evaluation(String),

    #[error("not a polynomial in x: {0}")]
    NonPolynomial(String),

    #[error("degenerate equation: coefficient a is 0")]
    Degenere,

    #[error("unsupported degree: {0}")]
    DegreNonSupporte(usize),

    #[error("cannot solve: {0}")]
    Resolution(String),

    #[error("conversion error: {0}")]
    Conversion(String),
}

impl ErreurCalcul {
    pub(crate) fn syntaxe(msg: impl Into<String>) -> Self {
        Self::Syntaxe(msg.into())
    }

    pub(crate) fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }
}

pub type ResultatCalcul<T> = Result<T, ErreurCalcul>;
