// src/noyau/solveur.rs
//
// Résolution d’équations en x (linéaire, quadratique).
// Pipeline commun :
//   équation -> "= 0" si absent -> gauche-(droite) -> Expr -> Polynome -> coefficients
//
// Aucune erreur ne remonte : l’échec devient une résolution à une seule étape.

use tracing::{debug, warn};

use super::erreurs::{ErreurCalcul, ResultatCalcul};
use super::etapes::{Etape, Etapes, Resolution};
use super::eval::{evaluate, parse_expression, PRECISION_CALCUL};
use super::format::{entre_parentheses_si_negatif, format_nombre};
use super::polynome::Polynome;

/// Chiffres significatifs des solutions affichées.
pub const PRECISION_SOLUTION: usize = 10;

/// Texte de résultat d’une résolution échouée.
pub const ERREUR_RESOLUTION: &str = "Error solving equation";

const EXPLICATION_ECHEC: &str = "Could not solve the equation";

/// Seule inconnue supportée.
const VARIABLE: &str = "x";

/* ------------------------ Dispatch ------------------------ */

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TypeEquation {
    #[default]
    Lineaire,
    Quadratique,
}

impl TypeEquation {
    pub fn libelle(self) -> &'static str {
        match self {
            Self::Lineaire => "Linear (ax + b = c)",
            Self::Quadratique => "Quadratic (ax² + bx + c = 0)",
        }
    }

    /// Devine le type d’après le degré de la forme standard (linéaire par défaut).
    pub fn detecter(equation: &str) -> Self {
        match forme_standard(equation) {
            Ok(p) if p.degre() == 2 => Self::Quadratique,
            _ => Self::Lineaire,
        }
    }

    pub fn resoudre(self, equation: &str) -> Resolution {
        match self {
            Self::Lineaire => solve_linear(equation),
            Self::Quadratique => solve_quadratic(equation),
        }
    }
}

/// Variante de calcul choisie par l’appelant : même contrat texte -> Resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Solveur {
    Evaluation,
    Equation(TypeEquation),
}

impl Solveur {
    pub fn resoudre(self, entree: &str) -> Resolution {
        match self {
            Self::Evaluation => Resolution {
                resultat: evaluate(entree),
                etapes: Vec::new(),
            },
            Self::Equation(t) => t.resoudre(entree),
        }
    }
}

/* ------------------------ Coefficients ------------------------ */

/// (a, b, c) de ax² + bx + c. a = 0 n’est PAS exclu ici (voir solve_quadratic).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Coefficients {
    pub fn depuis_polynome(p: &Polynome) -> Self {
        let v = p.coefficients(3);
        Self {
            a: v[0],
            b: v[1],
            c: v[2],
        }
    }

    pub fn discriminant(&self) -> f64 {
        self.b * self.b - 4.0 * self.a * self.c
    }
}

/* ------------------------ API publique ------------------------ */

/// Résout ax + b = c pour x.
pub fn solve_linear(equation: &str) -> Resolution {
    debug!(equation, "résolution linéaire");

    let mut equation = equation.to_string();
    let mut etapes = Etapes::new();

    match resout_lineaire(&mut equation, &mut etapes) {
        Ok(resultat) => Resolution {
            resultat,
            etapes: etapes.into_vec(),
        },
        Err(e) => {
            warn!(equation = %equation, erreur = %e, "équation linéaire non résolue");
            echec(&equation)
        }
    }
}

/// Résout ax² + bx + c = 0 (formule quadratique, branches réelle / double / complexe).
pub fn solve_quadratic(equation: &str) -> Resolution {
    debug!(equation, "résolution quadratique");

    let mut equation = equation.to_string();
    let mut etapes = Etapes::new();

    match resout_quadratique(&mut equation, &mut etapes) {
        Ok(resultat) => Resolution {
            resultat,
            etapes: etapes.into_vec(),
        },
        Err(e) => {
            warn!(equation = %equation, erreur = %e, "équation quadratique non résolue");
            echec(&equation)
        }
    }
}

/* ------------------------ Étapes communes ------------------------ */

fn echec(equation: &str) -> Resolution {
    Resolution {
        resultat: ERREUR_RESOLUTION.to_string(),
        etapes: vec![Etape::new(equation, "Error", EXPLICATION_ECHEC)],
    }
}

/// Étape 1 : équation d’origine ; ajoute "= 0" si l’équation n’a pas de membre droit.
fn enregistre_origine(equation: &mut String, etapes: &mut Etapes) {
    etapes.ajouter(equation.clone(), "", "Original equation");

    if !equation.contains('=') {
        *equation = format!("{equation} = 0");
        etapes.ajouter(equation.clone(), "", "Rearranged to standard form");
    }
}

/// gauche = droite  =>  polynôme de gauche-(droite).
/// Droite absente ou vide => "0".
fn forme_standard(equation: &str) -> ResultatCalcul<Polynome> {
    let nettoyee: String = equation.chars().filter(|c| !c.is_whitespace()).collect();

    let mut cotes = nettoyee.split('=');
    let gauche = cotes.next().unwrap_or_default();
    let droite = cotes.next().filter(|d| !d.is_empty()).unwrap_or("0");

    if cotes.next().is_some() {
        return Err(ErreurCalcul::syntaxe("plusieurs signes '='"));
    }
    if gauche.is_empty() {
        return Err(ErreurCalcul::syntaxe("membre gauche vide"));
    }

    let expr = parse_expression(&format!("{gauche}-({droite})"))?;
    Polynome::depuis_expr(&expr, VARIABLE)
}

fn nombre(x: f64) -> String {
    format_nombre(x, PRECISION_CALCUL)
}

fn signe(x: f64) -> String {
    entre_parentheses_si_negatif(x, PRECISION_CALCUL)
}

fn solution(x: f64) -> String {
    format_nombre(x, PRECISION_SOLUTION)
}

/// Débordement pendant le calcul (b², 4ac, racine) => échec, jamais "inf"/"NaN".
fn fini(x: f64, quoi: &str) -> ResultatCalcul<f64> {
    if x.is_finite() {
        Ok(x)
    } else {
        Err(ErreurCalcul::evaluation(format!("{quoi} non fini")))
    }
}

/* ------------------------ Linéaire ------------------------ */

fn resout_lineaire(equation: &mut String, etapes: &mut Etapes) -> ResultatCalcul<String> {
    enregistre_origine(equation, etapes);

    let p = forme_standard(equation)?;
    match p.degre() {
        1 => {}
        0 if p.est_nul() => {
            return Err(ErreurCalcul::Resolution(
                "toute valeur de x est solution".into(),
            ))
        }
        0 => return Err(ErreurCalcul::Resolution("aucune solution".into())),
        d => {
            return Err(ErreurCalcul::Resolution(format!(
                "équation non linéaire (degré {d})"
            )))
        }
    }

    etapes.ajouter(
        format!("{p} = 0"),
        "",
        "Simplified to standard form ax + b = 0",
    );

    let a = p.coefficient(1);
    let b = p.coefficient(0);
    let x = fini(-b / a, "x")?;
    let x_txt = solution(x);

    etapes.ajouter(
        format!("x = -b / a = {} / {}", nombre(-b), signe(a)),
        nombre(x),
        "Isolate x by dividing by its coefficient",
    );

    let resultat = format!("x = {x_txt}");
    etapes.ajouter(resultat.clone(), x_txt, "Final solution");

    Ok(resultat)
}

/* ------------------------ Quadratique ------------------------ */

fn resout_quadratique(equation: &mut String, etapes: &mut Etapes) -> ResultatCalcul<String> {
    enregistre_origine(equation, etapes);

    let p = forme_standard(equation)?;
    if p.degre() > 2 {
        return Err(ErreurCalcul::DegreNonSupporte(p.degre()));
    }

    etapes.ajouter(
        format!("{p} = 0"),
        "",
        "Simplified to standard form ax² + bx + c = 0",
    );

    let Coefficients { a, b, c } = Coefficients::depuis_polynome(&p);
    etapes.ajouter(
        format!("a = {}, b = {}, c = {}", nombre(a), nombre(b), nombre(c)),
        "",
        "Identified coefficients",
    );

    // a = 0 : pas une équation du second degré (2a au dénominateur)
    if a == 0.0 {
        return Err(ErreurCalcul::Degenere);
    }

    let d = fini(Coefficients { a, b, c }.discriminant(), "discriminant")?;
    etapes.ajouter(
        format!(
            "Discriminant = b² - 4ac = {}² - 4 × {} × {} = {}",
            signe(b),
            signe(a),
            signe(c),
            nombre(d)
        ),
        nombre(d),
        "Calculate the discriminant to determine the number of solutions",
    );

    let deux_a = 2.0 * a;

    let resultat = if d > 0.0 {
        // deux racines réelles
        let x1 = fini((-b + d.sqrt()) / deux_a, "x₁")?;
        let x2 = fini((-b - d.sqrt()) / deux_a, "x₂")?;

        etapes.ajouter(
            format!(
                "x₁ = (-b + √discriminant) / (2a) = (-{} + √{}) / (2 × {})",
                signe(b),
                nombre(d),
                signe(a)
            ),
            nombre(x1),
            "First solution using the quadratic formula",
        );
        etapes.ajouter(
            format!(
                "x₂ = (-b - √discriminant) / (2a) = (-{} - √{}) / (2 × {})",
                signe(b),
                nombre(d),
                signe(a)
            ),
            nombre(x2),
            "Second solution using the quadratic formula",
        );

        format!("x₁ = {}, x₂ = {}", solution(x1), solution(x2))
    } else if d == 0.0 {
        // racine double
        let x = fini(-b / deux_a, "x")?;

        etapes.ajouter(
            format!("x = -b / (2a) = -{} / (2 × {})", signe(b), signe(a)),
            nombre(x),
            "Single (repeated) solution when discriminant is zero",
        );

        format!("x = {}", solution(x))
    } else {
        // paire complexe conjuguée
        let re = fini(-b / deux_a, "partie réelle")?;
        let im = fini(d.abs().sqrt() / deux_a, "partie imaginaire")?;

        etapes.ajouter(
            format!("Real part = -b / (2a) = -{} / (2 × {})", signe(b), signe(a)),
            nombre(re),
            "Real part of complex solutions",
        );
        etapes.ajouter(
            format!(
                "Imaginary part = √|discriminant| / (2a) = √|{}| / (2 × {})",
                nombre(d),
                signe(a)
            ),
            nombre(im),
            "Imaginary part of complex solutions",
        );

        paire_complexe(re, im)
    };

    etapes.ajouter(resultat.clone(), resultat.clone(), "Final solution(s)");

    Ok(resultat)
}

/// "x₁ = re + imi, x₂ = re - imi" (signes inversés si im < 0, c.-à-d. a < 0).
fn paire_complexe(re: f64, im: f64) -> String {
    let re_txt = solution(re);
    let im_txt = solution(im.abs());
    let (s1, s2) = if im < 0.0 { ('-', '+') } else { ('+', '-') };
    format!("x₁ = {re_txt} {s1} {im_txt}i, x₂ = {re_txt} {s2} {im_txt}i")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn etape<'a>(r: &'a Resolution, explication: &str) -> &'a Etape {
        r.etapes
            .iter()
            .find(|e| e.explication == explication)
            .unwrap_or_else(|| panic!("étape {explication:?} absente: {:#?}", r.etapes))
    }

    fn assert_echec(r: &Resolution) {
        assert_eq!(r.resultat, ERREUR_RESOLUTION);
        assert_eq!(r.etapes.len(), 1);
        assert_eq!(r.etapes[0].explication, EXPLICATION_ECHEC);
        assert_eq!(r.etapes[0].resultat, "Error");
    }

    // --- Linéaire ---

    #[test]
    fn lineaire_simple() {
        let r = solve_linear("2x + 4 = 10");
        assert_eq!(r.resultat, "x = 3");
        assert!(r.etapes.len() >= 3);
        assert_eq!(r.etapes[0], Etape::new("2x + 4 = 10", "", "Original equation"));
        assert_eq!(etape(&r, "Simplified to standard form ax + b = 0").expression, "2x - 6 = 0");
        assert_eq!(etape(&r, "Final solution").resultat, "3");
    }

    #[test]
    fn lineaire_sans_egal() {
        let r = solve_linear("3x - 1");
        assert_eq!(r.resultat, "x = 0.3333333333");
        assert_eq!(r.etapes[1], Etape::new("3x - 1 = 0", "", "Rearranged to standard form"));
    }

    #[test]
    fn lineaire_variable_des_deux_cotes() {
        let r = solve_linear("5x - 2 = 3x + 6");
        assert_eq!(r.resultat, "x = 4");
    }

    #[test]
    fn lineaire_echecs() {
        assert_echec(&solve_linear("x^2 = 4"));
        assert_echec(&solve_linear("2 = 3"));
        assert_echec(&solve_linear("x = x"));
        assert_echec(&solve_linear("2x + y = 1"));
        assert_echec(&solve_linear("2x + 4) = 10"));
    }

    #[test]
    fn echec_garde_l_equation_completee() {
        let r = solve_linear("sin(x)");
        assert_echec(&r);
        assert_eq!(r.etapes[0].expression, "sin(x) = 0");
    }

    // --- Quadratique ---

    #[test]
    fn quadratique_deux_racines_reelles() {
        let r = solve_quadratic("x^2 - 5x + 6 = 0");
        assert_eq!(
            etape(&r, "Calculate the discriminant to determine the number of solutions").resultat,
            "1"
        );
        assert_eq!(
            etape(&r, "Identified coefficients").expression,
            "a = 1, b = -5, c = 6"
        );
        assert_eq!(r.resultat, "x₁ = 3, x₂ = 2");

        let mut racines = vec![
            etape(&r, "First solution using the quadratic formula").resultat.clone(),
            etape(&r, "Second solution using the quadratic formula").resultat.clone(),
        ];
        racines.sort();
        assert_eq!(racines, vec!["2".to_string(), "3".to_string()]);

        let fin = r.etapes.last().unwrap();
        assert_eq!(fin.explication, "Final solution(s)");
        assert_eq!(fin.resultat, r.resultat);
    }

    #[test]
    fn quadratique_racine_double() {
        let r = solve_quadratic("x^2 - 4x + 4 = 0");
        assert_eq!(
            etape(&r, "Calculate the discriminant to determine the number of solutions").resultat,
            "0"
        );
        assert_eq!(r.resultat, "x = 2");
    }

    #[test]
    fn quadratique_complexe() {
        let r = solve_quadratic("x^2 + 1 = 0");
        assert_eq!(
            etape(&r, "Calculate the discriminant to determine the number of solutions").resultat,
            "-4"
        );
        assert_eq!(etape(&r, "Real part of complex solutions").resultat, "0");
        assert_eq!(etape(&r, "Imaginary part of complex solutions").resultat, "1");
        assert_eq!(r.resultat, "x₁ = 0 + 1i, x₂ = 0 - 1i");
    }

    #[test]
    fn quadratique_sans_egal_et_membre_droit() {
        let r = solve_quadratic("x^2 - 9");
        assert_eq!(r.etapes[1].explication, "Rearranged to standard form");
        assert_eq!(r.resultat, "x₁ = 3, x₂ = -3");

        let r = solve_quadratic("x^2 = 3x - 2");
        assert_eq!(
            etape(&r, "Simplified to standard form ax² + bx + c = 0").expression,
            "x^2 - 3x + 2 = 0"
        );
        assert_eq!(r.resultat, "x₁ = 2, x₂ = 1");
    }

    #[test]
    fn quadratique_glyphe_carre() {
        let r = solve_quadratic("x² - 5x + 6 = 0");
        assert_eq!(r.resultat, "x₁ = 3, x₂ = 2");
    }

    #[test]
    fn quadratique_a_negatif_complexe() {
        // -x² - 1 = 0 : a = -1, im = 2 / -2 = -1
        let r = solve_quadratic("-x^2 - 1 = 0");
        assert_eq!(r.resultat, "x₁ = 0 - 1i, x₂ = 0 + 1i");
    }

    #[test]
    fn quadratique_degenere_et_hors_degre() {
        assert_echec(&solve_quadratic("0x^2 + 2x + 1 = 0"));
        assert_echec(&solve_quadratic("x^3 - 1 = 0"));
        assert_echec(&solve_quadratic("(x^2 + 1 = 0"));
        assert_echec(&solve_quadratic("1/x = 2"));
    }

    // --- Dispatch ---

    #[test]
    fn lineaire_etape_isoler_affiche_moins_b() {
        let r = solve_linear("2x + 4 = 10");
        let isoler = etape(&r, "Isolate x by dividing by its coefficient");
        assert_eq!(isoler.expression, "x = -b / a = 6 / 2");
        assert_eq!(isoler.resultat, "3");

        let r = solve_linear("2x = 0");
        assert_eq!(r.resultat, "x = 0");
        let isoler = etape(&r, "Isolate x by dividing by its coefficient");
        assert_eq!(isoler.expression, "x = -b / a = 0 / 2");
    }

    #[test]
    fn debordement_donne_echec() {
        // b² - 4ac déborde : +inf, -inf puis NaN
        assert_echec(&solve_quadratic("1e200x^2 - 1e200 = 0"));
        assert_echec(&solve_quadratic("1e155x^2 + 1e155 = 0"));
        assert_echec(&solve_quadratic("1e200x^2 + 1e200x + 1e200 = 0"));
        // coefficient lui-même infini
        assert_echec(&solve_quadratic("(1e200x)^2 - 1 = 0"));
        // -b / a déborde
        assert_echec(&solve_linear("1e-300x = 1e300"));
    }

    #[test]
    fn puissances_imbriquees_refusees() {
        assert_echec(&solve_quadratic("((x^64)^64)^64 = 0"));
        assert_eq!(TypeEquation::detecter("((x^64)^64)^8 = 0"), TypeEquation::Lineaire);
        assert_eq!(solve_quadratic("(x^1)^2 - 4 = 0").resultat, "x₁ = 2, x₂ = -2");
    }

    #[test]
    fn detection_du_type() {
        assert_eq!(TypeEquation::detecter("x^2 - 5x + 6 = 0"), TypeEquation::Quadratique);
        assert_eq!(TypeEquation::detecter("2x + 4 = 10"), TypeEquation::Lineaire);
        assert_eq!(TypeEquation::detecter("n'importe quoi"), TypeEquation::Lineaire);
    }

    #[test]
    fn dispatch_par_variante() {
        assert_eq!(Solveur::Evaluation.resoudre("2+2").resultat, "4");
        assert!(Solveur::Evaluation.resoudre("2+2").etapes.is_empty());
        assert_eq!(
            Solveur::Equation(TypeEquation::Lineaire).resoudre("2x + 4 = 10").resultat,
            "x = 3"
        );
        assert_eq!(
            Solveur::Equation(TypeEquation::Quadratique).resoudre("x^2 - 4x + 4 = 0").resultat,
            "x = 2"
        );
    }
}
