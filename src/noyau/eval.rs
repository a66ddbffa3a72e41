//! Noyau: évaluation (pipeline réel)
//!
//! tokenize -> pourcents -> multiplications implicites -> RPN -> Expr -> valeur complexe -> texte
//!
//! Politique numérique :
//! - argument réel dans le domaine réel => fonction réelle (sqrt(16) = 4 exactement)
//! - argument hors domaine réel => branche principale complexe (sqrt(-4) = 2i)
//! - résultat non fini (division par zéro, débordement) => erreur

use num_complex::Complex64;
use num_traits::Zero;
use tracing::{debug, warn};

use super::erreurs::{ErreurCalcul, ResultatCalcul};
use super::expr::{Expr, Fonction};
use super::format::format_valeur;
use super::jetons::{classe_pourcents, format_tokens, insere_multiplications, tokenize};
use super::rpn::{from_rpn, to_rpn};

/// Chiffres significatifs de l’affichage d’un calcul.
pub const PRECISION_CALCUL: usize = 14;

/// Sentinelle affichée pour toute erreur de calcul récupérée.
pub const SENTINELLE_ERREUR: &str = "Error";

/// Au-delà, n! n’est plus fini en f64.
const FACTORIELLE_MAX: f64 = 170.0;

/// Texte -> AST (sans évaluation).
pub fn parse_expression(expr_str: &str) -> ResultatCalcul<Expr> {
    let s = expr_str.trim();
    if s.is_empty() {
        return Err(ErreurCalcul::syntaxe("entrée vide"));
    }

    let jetons = insere_multiplications(classe_pourcents(tokenize(s)?));
    let rpn = to_rpn(&jetons)?;
    debug!(jetons = %format_tokens(&jetons), rpn = %format_tokens(&rpn), "expression analysée");

    from_rpn(&rpn)
}

/// Évalue une expression et retourne sa valeur (réelle ou complexe).
pub fn evaluer(expr_str: &str) -> ResultatCalcul<Complex64> {
    let expr = parse_expression(expr_str)?;
    evaluer_expr(&expr)
}

/// API publique : évalue et formate (14 chiffres significatifs).
/// Toute erreur devient la sentinelle "Error" (jamais de panique vers l’affichage).
pub fn evaluate(expr_str: &str) -> String {
    match evaluer(expr_str) {
        Ok(v) => format_valeur(v, PRECISION_CALCUL),
        Err(e) => {
            warn!(expression = expr_str, erreur = %e, "calcul impossible");
            SENTINELLE_ERREUR.to_string()
        }
    }
}

/// Évalue un AST sans variable libre.
pub fn evaluer_expr(expr: &Expr) -> ResultatCalcul<Complex64> {
    let v = evaluer_noeud(expr)?;
    if !v.re.is_finite() || !v.im.is_finite() {
        return Err(ErreurCalcul::evaluation("résultat non fini"));
    }
    Ok(v)
}

fn evaluer_noeud(expr: &Expr) -> ResultatCalcul<Complex64> {
    use Expr::*;

    match expr {
        Nombre(n) => Ok(Complex64::new(*n, 0.0)),
        Constante(c) => Ok(c.valeur()),
        Var(nom) => Err(ErreurCalcul::evaluation(format!("symbole non défini: {nom}"))),

        Neg(x) => Ok(-evaluer_noeud(x)?),
        Pourcent(x) => Ok(evaluer_noeud(x)? / 100.0),
        Factorielle(x) => factorielle(evaluer_noeud(x)?),
        Fonction(f, x) => applique_fonction(*f, evaluer_noeud(x)?),

        Add(a, b) => Ok(evaluer_noeud(a)? + evaluer_noeud(b)?),
        Sub(a, b) => Ok(evaluer_noeud(a)? - evaluer_noeud(b)?),
        Mul(a, b) => Ok(evaluer_noeud(a)? * evaluer_noeud(b)?),

        Div(a, b) => {
            let va = evaluer_noeud(a)?;
            let vb = evaluer_noeud(b)?;
            if vb.is_zero() {
                return Err(ErreurCalcul::evaluation("division par zéro"));
            }
            Ok(va / vb)
        }

        Mod(a, b) => {
            let x = reel(evaluer_noeud(a)?, "mod")?;
            let y = reel(evaluer_noeud(b)?, "mod")?;
            // convention : x mod 0 = x ; sinon signe du diviseur
            if y == 0.0 {
                return Ok(Complex64::new(x, 0.0));
            }
            Ok(Complex64::new(x - y * (x / y).floor(), 0.0))
        }

        Pow(a, b) => puissance(evaluer_noeud(a)?, evaluer_noeud(b)?),
    }
}

fn est_reel(v: Complex64) -> bool {
    v.im == 0.0
}

/// -(1+0i) donne (-1, -0) : on ramène -0 à +0 pour rester sur la branche principale.
fn sans_zero_negatif(v: Complex64) -> Complex64 {
    if est_reel(v) {
        Complex64::new(v.re, 0.0)
    } else {
        v
    }
}

fn reel(v: Complex64, contexte: &str) -> ResultatCalcul<f64> {
    if est_reel(v) {
        Ok(v.re)
    } else {
        Err(ErreurCalcul::evaluation(format!(
            "{contexte} : argument complexe non supporté"
        )))
    }
}

fn puissance(base: Complex64, exposant: Complex64) -> ResultatCalcul<Complex64> {
    let (base, exposant) = (sans_zero_negatif(base), sans_zero_negatif(exposant));

    if est_reel(base) && est_reel(exposant) {
        let (b, e) = (base.re, exposant.re);
        if b >= 0.0 || e.fract() == 0.0 {
            return Ok(Complex64::new(b.powf(e), 0.0));
        }
        // base négative, exposant fractionnaire : racine principale complexe
        return Ok(base.powc(exposant));
    }

    if est_reel(exposant) && exposant.re.fract() == 0.0 && exposant.re.abs() <= i32::MAX as f64 {
        return Ok(base.powi(exposant.re as i32));
    }
    Ok(base.powc(exposant))
}

fn factorielle(v: Complex64) -> ResultatCalcul<Complex64> {
    let n = reel(v, "factorial")?;
    if n < 0.0 || n.fract() != 0.0 {
        return Err(ErreurCalcul::evaluation(
            "factorial : entier positif ou nul attendu",
        ));
    }
    if n > FACTORIELLE_MAX {
        return Err(ErreurCalcul::evaluation("factorial : résultat trop grand"));
    }

    let mut acc = 1.0_f64;
    let mut k = 2.0_f64;
    while k <= n {
        acc *= k;
        k += 1.0;
    }
    Ok(Complex64::new(acc, 0.0))
}

fn applique_fonction(f: Fonction, v: Complex64) -> ResultatCalcul<Complex64> {
    use Fonction::*;

    if f == Factorial {
        return factorielle(v);
    }
    let v = sans_zero_negatif(v);

    if est_reel(v) {
        let x = v.re;
        let reel_ok = |r: f64| -> ResultatCalcul<Complex64> { Ok(Complex64::new(r, 0.0)) };
        match f {
            Sin => return reel_ok(x.sin()),
            Cos => return reel_ok(x.cos()),
            Tan => return reel_ok(x.tan()),
            Atan => return reel_ok(x.atan()),
            Cbrt => return reel_ok(x.cbrt()),
            Exp => return reel_ok(x.exp()),
            Abs => return reel_ok(x.abs()),
            Sqrt if x >= 0.0 => return reel_ok(x.sqrt()),
            Asin if x.abs() <= 1.0 => return reel_ok(x.asin()),
            Acos if x.abs() <= 1.0 => return reel_ok(x.acos()),
            Log | Log10 if x == 0.0 => {
                return Err(ErreurCalcul::evaluation("logarithme de zéro"));
            }
            Log if x > 0.0 => return reel_ok(x.ln()),
            Log10 if x > 0.0 => return reel_ok(x.log10()),
            // hors domaine réel : branche complexe ci-dessous
            _ => {}
        }
    }

    let r = match f {
        Sin => v.sin(),
        Cos => v.cos(),
        Tan => v.tan(),
        Asin => v.asin(),
        Acos => v.acos(),
        Atan => v.atan(),
        Sqrt => v.sqrt(),
        Cbrt => v.cbrt(),
        Log => v.ln(),
        Log10 => v.log10(),
        Exp => v.exp(),
        Abs => Complex64::new(v.norm(), 0.0),
        Factorial => return factorielle(v),
    };
    Ok(r)
}
