//! Tests scientifiques (campagne) : propriétés de bout en bout du pipeline.
//!
//! texte libre -> normalize -> (evaluate | solve_linear | solve_quadratic)
//!
//! Notes :
//! - les résultats sont comparés en texte (14 chiffres pour un calcul, 10 pour une solution)
//! - les étapes sont retrouvées par leur explication, pas par leur position
//!   (l’étape "Rearranged to standard form" n’existe que sans '=')

use std::time::{Duration, Instant};

use super::etapes::Resolution;
use super::eval::{evaluate, SENTINELLE_ERREUR};
use super::normaliseur::normalize;
use super::solveur::{solve_linear, solve_quadratic, TypeEquation, ERREUR_RESOLUTION};
use super::unites::{convert_unit, CATEGORIES};

const DISCRIMINANT: &str = "Calculate the discriminant to determine the number of solutions";

fn discriminant(r: &Resolution) -> &str {
    r.etapes
        .iter()
        .find(|e| e.explication == DISCRIMINANT)
        .map(|e| e.resultat.as_str())
        .unwrap_or_else(|| panic!("pas d’étape discriminant: {r:#?}"))
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Évaluation ------------------------ */

#[test]
fn sci_evaluation_de_reference() {
    assert_eq!(evaluate("2+2"), "4");
    assert_eq!(evaluate("sqrt(16)"), "4");
    assert_eq!(evaluate("2*-3"), "-6");
    assert_eq!(evaluate("sqrt(-4)"), "2i");
    assert_eq!(evaluate("0.1+0.2"), "0.3");
    assert_eq!(evaluate("1/0"), SENTINELLE_ERREUR);
    assert_eq!(evaluate("2+*3"), SENTINELLE_ERREUR);
}

#[test]
fn sci_precision_14_chiffres() {
    assert_eq!(evaluate("1/3"), "0.33333333333333");
    assert_eq!(evaluate("2/3"), "0.66666666666667");
    assert_eq!(evaluate("10^5"), "1e+5");
    assert_eq!(evaluate("2^0.5 * 2^0.5"), "2");
}

/* ------------------------ Langage naturel ------------------------ */

#[test]
fn sci_phrases_vers_valeurs() {
    let cas = [
        ("what is 25% of 80?", "20"),
        ("sqrt of 144", "12"),
        ("What is 5 plus 3?", "8"),
        ("calculate 2 squared times 3", "12"),
        ("10 percent of 50", "5"),
        ("log of 1000", "3"),
        ("ln of e", "1"),
        ("cube root of 64", "4"),
    ];
    for (phrase, attendu) in cas {
        let n = normalize(phrase);
        assert_eq!(evaluate(&n), attendu, "phrase={phrase:?} normalisée={n:?}");
    }
}

#[test]
fn sci_phrases_vers_equations() {
    let n = normalize("Solve 2x + 4 equals 10");
    assert_eq!(TypeEquation::detecter(&n), TypeEquation::Lineaire);
    assert_eq!(solve_linear(&n).resultat, "x = 3");

    let n = normalize("solve x squared minus 5x plus 6 equals 0");
    assert_eq!(n, "x ^2 - 5x + 6  =  0");
    assert_eq!(TypeEquation::detecter(&n), TypeEquation::Quadratique);
    assert_eq!(solve_quadratic(&n).resultat, "x₁ = 3, x₂ = 2");
}

#[test]
fn sci_parentheses_fermees_par_le_normaliseur() {
    for n in 0..6 {
        let entree = format!("{}1 + 2", "(".repeat(n));
        let sortie = normalize(&entree);
        assert_eq!(sortie, format!("{entree}{}", ")".repeat(n)));
        assert_eq!(evaluate(&sortie), "3");
    }
}

/* ------------------------ Solveurs ------------------------ */

#[test]
fn sci_lineaire_reference() {
    let r = solve_linear("2x + 4 = 10");
    assert_eq!(r.resultat, "x = 3");
    assert!(r.etapes.len() >= 3);
    assert_eq!(r.etapes.first().map(|e| e.explication.as_str()), Some("Original equation"));
    assert_eq!(r.etapes.last().map(|e| e.explication.as_str()), Some("Final solution"));
}

#[test]
fn sci_quadratique_trois_branches() {
    let r = solve_quadratic("x^2 - 5x + 6 = 0");
    assert_eq!(discriminant(&r), "1");
    assert_eq!(r.resultat, "x₁ = 3, x₂ = 2");

    let r = solve_quadratic("x^2 + 1 = 0");
    assert_eq!(discriminant(&r), "-4");
    assert_eq!(r.resultat, "x₁ = 0 + 1i, x₂ = 0 - 1i");

    let r = solve_quadratic("x^2 - 4x + 4 = 0");
    assert_eq!(discriminant(&r), "0");
    assert_eq!(r.resultat, "x = 2");
}

#[test]
fn sci_quadratique_racines_irrationnelles() {
    // x² - 2 = 0 => ±√2 à 10 chiffres
    let r = solve_quadratic("x^2 - 2 = 0");
    assert_eq!(r.resultat, "x₁ = 1.414213562, x₂ = -1.414213562");

    // 2x² + 3x - 2 = 0 => 0.5 et -2
    let r = solve_quadratic("2x^2 + 3x - 2 = 0");
    assert_eq!(discriminant(&r), "25");
    assert_eq!(r.resultat, "x₁ = 0.5, x₂ = -2");
}

#[test]
fn sci_quadratique_degenere_motif_d_echec() {
    let r = solve_quadratic("0x^2 + 2x + 1 = 0");
    assert_eq!(r.resultat, ERREUR_RESOLUTION);
    assert_eq!(r.etapes.len(), 1);
    assert_eq!(r.etapes[0].expression, "0x^2 + 2x + 1 = 0");
    assert_eq!(r.etapes[0].explication, "Could not solve the equation");
}

#[test]
fn sci_etapes_independantes_entre_appels() {
    let a = solve_quadratic("x^2 - 5x + 6 = 0");
    let _ = solve_linear("3x = 9");
    let b = solve_quadratic("x^2 - 5x + 6 = 0");
    assert_eq!(a, b);
}

/* ------------------------ Unités ------------------------ */

#[test]
fn sci_unites_aller_retour_toutes_paires() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    for cat in CATEGORIES {
        for a in cat.unites {
            for b in cat.unites {
                budget(t0, max);
                for v in [-3.5, 0.0, 1.0, 1234.5678] {
                    let aller = convert_unit(v, a.id, b.id)
                        .unwrap_or_else(|e| panic!("{} -> {}: {e}", a.id, b.id));
                    let retour = convert_unit(aller, b.id, a.id)
                        .unwrap_or_else(|e| panic!("{} -> {}: {e}", b.id, a.id));
                    assert!(
                        (retour - v).abs() <= 1e-9 * v.abs().max(1.0),
                        "{}: {v} {} -> {} -> {retour}",
                        cat.id,
                        a.id,
                        b.id
                    );
                }
            }
        }
    }
}

#[test]
fn sci_unites_celsius_fahrenheit() {
    let f = convert_unit(100.0, "celsius", "fahrenheit").unwrap_or(f64::NAN);
    assert!((f - 212.0).abs() < 1e-9, "100 °C = {f} °F");
}
