// src/noyau/normaliseur.rs
//
// Texte libre ("what is 25% of 80?") -> expression canonique ("25 * 80 / 100").
// Table de règles ordonnée, appliquée par un seul fold : chaque règle voit la sortie
// des précédentes. Ne renvoie jamais d’erreur : ce qui ne correspond à rien passe tel quel.
//
// Substitutions littérales = remplacement de sous-chaîne (pas de frontière de mot).

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{trace, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Regle {
    /// Retire ?, ! et . en fin de texte (les points décimaux restent).
    PonctuationFinale,
    Minuscules,
    /// Remplacement littéral de toutes les occurrences.
    Texte {
        motif: &'static str,
        remplacement: &'static str,
    },
    /// Remplacement par expression régulière ($1, $2 = captures).
    Motif {
        motif: &'static str,
        remplacement: &'static str,
    },
    /// Ferme les parenthèses ouvertes restantes.
    Parentheses,
    Trim,
}

const fn texte(motif: &'static str, remplacement: &'static str) -> Regle {
    Regle::Texte { motif, remplacement }
}

const fn motif(motif: &'static str, remplacement: &'static str) -> Regle {
    Regle::Motif { motif, remplacement }
}

/// Ordre d’application. Dans chaque famille, la formulation la plus longue passe d’abord.
pub static REGLES: &[Regle] = &[
    // 1. ponctuation, casse
    Regle::PonctuationFinale,
    Regle::Minuscules,
    // 2. mots de remplissage
    texte("what is", ""),
    texte("calculate", ""),
    texte("solve", ""),
    // 3. racines et puissances
    texte("the square root of", "sqrt("),
    texte("square root of", "sqrt("),
    texte("sqrt of", "sqrt("),
    texte("the cube root of", "cbrt("),
    texte("cube root of", "cbrt("),
    texte("cbrt of", "cbrt("),
    texte("the cube of", "("),
    texte("cube of", "("),
    texte("cubed", "^3"),
    texte("the square of", "("),
    texte("square of", "("),
    texte("squared", "^2"),
    // 4. opérateurs en toutes lettres
    texte("plus", "+"),
    texte("minus", "-"),
    texte("times", "*"),
    texte("multiplied by", "*"),
    texte("divided by", "/"),
    // 5. pourcentages
    texte("percent of", "% *"),
    texte("percent", "%"),
    // 6. trigonométrie, logarithmes (log = base 10, ln = naturel)
    texte("sin of", "sin("),
    texte("cos of", "cos("),
    texte("tan of", "tan("),
    texte("log of", "log10("),
    texte("ln of", "log("),
    // 7. "25% of 80", puis "25%"
    motif(r"(\d+)%\s*of\s*(\d+)", "$1 * $2 / 100"),
    motif(r"(\d+)%", "$1 / 100"),
    // 8. "3 of 4"
    motif(r"(\d+)\s+of\s+(\d+)", "$1 * $2"),
    // 9. équations
    texte("equals", " = "),
    // 10, 11.
    Regle::Parentheses,
    Regle::Trim,
];

/// Regex de la table, compilées une seule fois.
fn regex_compilees() -> &'static HashMap<&'static str, Regex> {
    static COMPILEES: OnceLock<HashMap<&'static str, Regex>> = OnceLock::new();

    COMPILEES.get_or_init(|| {
        REGLES
            .iter()
            .filter_map(|r| match r {
                Regle::Motif { motif, .. } => match Regex::new(motif) {
                    Ok(re) => Some((*motif, re)),
                    Err(e) => {
                        warn!(motif, erreur = %e, "motif de normalisation invalide, ignoré");
                        None
                    }
                },
                _ => None,
            })
            .collect()
    })
}

impl Regle {
    pub fn appliquer(&self, s: String) -> String {
        match *self {
            Regle::PonctuationFinale => s
                .trim_end()
                .trim_end_matches(['?', '!', '.'])
                .to_string(),

            Regle::Minuscules => s.to_lowercase(),

            Regle::Texte { motif, remplacement } => {
                if s.contains(motif) {
                    s.replace(motif, remplacement)
                } else {
                    s
                }
            }

            Regle::Motif { motif, remplacement } => match regex_compilees().get(motif) {
                Some(re) => re.replace_all(&s, remplacement).into_owned(),
                None => s,
            },

            Regle::Parentheses => {
                let ouvertes = s.chars().filter(|&c| c == '(').count();
                let fermees = s.chars().filter(|&c| c == ')').count();
                if ouvertes > fermees {
                    format!("{s}{}", ")".repeat(ouvertes - fermees))
                } else {
                    s
                }
            }

            Regle::Trim => s.trim().to_string(),
        }
    }
}

/// Réécrit un texte libre en expression (ou équation) évaluable.
pub fn normalize(texte: &str) -> String {
    let sortie = REGLES
        .iter()
        .fold(texte.to_string(), |acc, regle| regle.appliquer(acc));

    trace!(entree = texte, sortie = %sortie, "normalisation");
    sortie
}
