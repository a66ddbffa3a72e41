//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - longueurs bornées
//! - budget temps global
//! - invariants clés :
//!   * evaluate / solve_* ne paniquent jamais (sentinelle ou résolution d’échec)
//!   * normalize ferme exactement les parenthèses restées ouvertes
//!   * solveurs : racines reconstruites depuis des coefficients entiers
//!   * puissances imbriquées et coefficients énormes : échec rapide, jamais "Infinity"/"NaN"

use std::time::{Duration, Instant};

use super::eval::{evaluate, SENTINELLE_ERREUR};
use super::normaliseur::normalize;
use super::solveur::{solve_linear, solve_quadratic, TypeEquation, ERREUR_RESOLUTION};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn entier(&mut self, min: i64, max: i64) -> i64 {
        min + self.pick((max - min + 1) as u32) as i64
    }
    fn choix<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.pick(items.len() as u32) as usize]
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Générateurs ------------------------ */

const ALPHABET: &[&str] = &[
    "0", "1", "2", "3", "7", "9", ".", "+", "-", "*", "/", "^", "%", "!", "(", ")", "(", ")", "x",
    "pi", "e", "i", "π", "√", "²", "sin", "cos", "log", "sqrt", "factorial", " ", "=",
];

fn gen_bruit(rng: &mut Rng, longueur: usize) -> String {
    (0..longueur).map(|_| rng.choix(ALPHABET)).collect()
}

const MOTS: &[&str] = &[
    "12", "3", "0.5", "plus", "minus", "times", "divided by", "percent", "squared", "cubed",
    "sqrt of", "square root of", "cube of", "log of", "sin of", "what is", "of", "(",
];

/// Phrase "naturelle" sans ')' orpheline (toute fermeture a une ouverture avant elle).
fn gen_phrase(rng: &mut Rng, mots: usize) -> String {
    let mut sortie = Vec::new();
    let mut profondeur = 0usize;
    for _ in 0..mots {
        if profondeur > 0 && rng.pick(5) == 0 {
            sortie.push(")");
            profondeur -= 1;
            continue;
        }
        let mot = rng.choix(MOTS);
        if mot == "(" {
            profondeur += 1;
        }
        sortie.push(mot);
    }
    sortie.join(" ")
}

fn compte(s: &str, c: char) -> usize {
    s.chars().filter(|&x| x == c).count()
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_evaluateur_sans_panique_et_deterministe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(400);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let longueur = 1 + rng.pick(12) as usize;
        let expr = gen_bruit(&mut rng, longueur);

        let r1 = evaluate(&expr);
        let r2 = evaluate(&expr);
        assert_eq!(r1, r2, "non déterministe: expr={expr:?}");
        assert!(!r1.is_empty(), "sortie vide: expr={expr:?}");

        if r1 == SENTINELLE_ERREUR {
            seen_err += 1;
        } else {
            assert!(
                !r1.contains("NaN") && !r1.contains("Infinity"),
                "valeur non finie affichée: expr={expr:?} -> {r1}"
            );
            seen_ok += 1;
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 5, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 5, "trop peu d’erreurs: {seen_err}");
}

#[test]
fn fuzz_safe_normaliseur_ferme_les_parentheses() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..200 {
        budget(t0, max);

        let mots = 1 + rng.pick(10) as usize;
        let phrase = gen_phrase(&mut rng, mots);
        let sortie = normalize(&phrase);

        let ouvertes = compte(&sortie, '(');
        let fermees_entree = compte(&phrase, ')');
        assert_eq!(
            ouvertes,
            compte(&sortie, ')'),
            "déséquilibre: {phrase:?} -> {sortie:?}"
        );

        // les fermetures ajoutées sont exactement le déficit, en fin de texte
        let deficit = ouvertes - fermees_entree;
        assert!(
            sortie.ends_with(&")".repeat(deficit)),
            "fermetures mal placées: {phrase:?} -> {sortie:?}"
        );
    }
}

#[test]
fn fuzz_safe_solveurs_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(400);

    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..150 {
        budget(t0, max);

        let longueur = 1 + rng.pick(14) as usize;
        let eq = gen_bruit(&mut rng, longueur);

        for r in [solve_linear(&eq), solve_quadratic(&eq)] {
            if r.resultat == ERREUR_RESOLUTION {
                assert_eq!(r.etapes.len(), 1, "eq={eq:?}");
                assert_eq!(r.etapes[0].resultat, "Error");
            } else {
                assert!(r.resultat.starts_with('x'), "eq={eq:?} -> {}", r.resultat);
                assert!(r.etapes.len() >= 3, "eq={eq:?}");
            }
        }
    }
}

#[test]
fn fuzz_safe_puissances_imbriquees_bornees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0x9A55_u64);
    const EXPOSANTS: &[&str] = &["2", "3", "8", "16", "64"];

    for _ in 0..120 {
        budget(t0, max);

        let mut base = String::from("x");
        for _ in 0..1 + rng.pick(4) {
            base = format!("({base})^{}", rng.choix(EXPOSANTS));
        }
        let eq = format!("{base} + x = 1");

        let _ = TypeEquation::detecter(&eq);
        let r = solve_quadratic(&eq);
        if r.resultat != ERREUR_RESOLUTION {
            assert!(r.resultat.starts_with('x'), "eq={eq:?} -> {}", r.resultat);
        }
    }

    // pire cas connu : rejeté avant tout développement
    let t1 = Instant::now();
    assert_eq!(solve_quadratic("((x^64)^64)^64 = 0").resultat, ERREUR_RESOLUTION);
    assert_eq!(solve_linear("((x^64)^64)^8 = 0").resultat, ERREUR_RESOLUTION);
    budget(t1, Duration::from_millis(50));
}

#[test]
fn fuzz_safe_coefficients_enormes_sans_infini() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0xB16_u64);

    for _ in 0..150 {
        budget(t0, max);

        let ea = rng.entier(100, 307);
        let eb = rng.entier(100, 307);
        let ec = rng.entier(100, 307);
        let sb = rng.choix(&["+", "-"]);
        let sc = rng.choix(&["+", "-"]);

        let quad = format!("1e{ea}x^2 {sb} 1e{eb}x {sc} 1e{ec} = 0");
        let lin = format!("1e-{ea}x {sc} 1e{ec} = 0");

        for r in [solve_quadratic(&quad), solve_linear(&lin)] {
            assert!(!r.resultat.contains("Infinity"), "{quad:?} / {lin:?} -> {}", r.resultat);
            assert!(!r.resultat.contains("NaN"), "{quad:?} / {lin:?} -> {}", r.resultat);
            for e in &r.etapes {
                assert!(!e.resultat.contains("Infinity") && !e.resultat.contains("NaN"));
            }
        }
    }
}

#[test]
fn fuzz_safe_lineaire_racine_entiere() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0x11AE_u64);

    for _ in 0..100 {
        budget(t0, max);

        let a = match rng.entier(-9, 8) {
            0 => 9,
            a => a,
        };
        let x0 = rng.entier(-20, 20);
        let b = rng.entier(-50, 50);
        let c = a * x0 + b;

        let eq = format!("({a})x + ({b}) = {c}");
        let r = solve_linear(&eq);
        assert_eq!(r.resultat, format!("x = {x0}"), "eq={eq:?}");
    }
}

#[test]
fn fuzz_safe_quadratique_racines_reelles() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0x0B5E55ED_u64);

    for _ in 0..100 {
        budget(t0, max);

        // a(x - r1)(x - r2), a > 0 => x₁ est la plus grande racine
        let a = rng.entier(1, 4);
        let r1 = rng.entier(-9, 9);
        let r2 = rng.entier(-9, 9);
        let b = -a * (r1 + r2);
        let c = a * r1 * r2;

        let eq = format!("{a}x^2 + ({b})x + ({c}) = 0");
        let r = solve_quadratic(&eq);

        let attendu = if r1 == r2 {
            format!("x = {r1}")
        } else {
            format!("x₁ = {}, x₂ = {}", r1.max(r2), r1.min(r2))
        };
        assert_eq!(r.resultat, attendu, "eq={eq:?}");
    }
}

#[test]
fn fuzz_safe_quadratique_paires_complexes() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0xC0C0_u64);

    for _ in 0..80 {
        budget(t0, max);

        // (x + p)² + q² = 0  =>  x = -p ± qi
        let p = rng.entier(-6, 6);
        let q = rng.entier(1, 6);
        let b = 2 * p;
        let c = p * p + q * q;

        let eq = format!("x^2 + ({b})x + {c} = 0");
        let r = solve_quadratic(&eq);

        let re = -p;
        assert_eq!(
            r.resultat,
            format!("x₁ = {re} + {q}i, x₂ = {re} - {q}i"),
            "eq={eq:?}"
        );
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = somme_balancee("1/2", 800);
    budget(t0, max);

    // 800*(1/2) = 400
    assert_eq!(evaluate(&expr), "400");
}
