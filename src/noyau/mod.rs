//! Noyau de la calculatrice (sans UI)
//!
//! Organisation interne :
//! - normaliseur.rs : texte libre -> expression (table de règles ordonnée)
//! - jetons.rs      : tokenisation + pourcents + multiplication implicite
//! - rpn.rs         : shunting-yard + construction Expr
//! - expr.rs        : AST (constantes, fonctions, opérateurs)
//! - eval.rs        : évaluation complexe + sentinelle "Error"
//! - format.rs      : affichage N chiffres significatifs
//! - polynome.rs    : Expr en x -> coefficients réels
//! - solveur.rs     : équations linéaires / quadratiques + démarche
//! - etapes.rs      : enregistrement des étapes
//! - unites.rs      : table d’unités + conversion
//! - erreurs.rs     : ErreurCalcul

pub mod erreurs;
pub mod etapes;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod normaliseur;
pub mod polynome;
pub mod rpn;
pub mod solveur;
pub mod unites;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique (utilisée par app/)
pub use erreurs::ErreurCalcul;
pub use etapes::Etape;
pub use eval::{PRECISION_CALCUL, SENTINELLE_ERREUR};
pub use normaliseur::normalize;
pub use solveur::{Solveur, TypeEquation};
pub use unites::{convert_unit, CATEGORIES};
