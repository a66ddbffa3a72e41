// src/noyau/polynome.rs
//
// Forme polynomiale d’une expression en une variable (coefficients réels denses).
// - coeffs[k] = coefficient de x^k
// - zéros de tête retirés (degré exact)
//
// Domaine accepté (le reste => NonPolynomial) :
// - sous-expression sans variable : évaluée numériquement (doit être réelle)
// - x, -p, p + q, p - q, p * q
// - p / k  avec k constant non nul
// - p ^ n  avec n constant entier >= 0
// Degré borné par DEGRE_MAX avant tout développement ; coefficients finis.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use super::erreurs::{ErreurCalcul, ResultatCalcul};
use super::eval::{evaluer_expr, PRECISION_CALCUL};
use super::expr::Expr;
use super::format::format_nombre;

/// Garde-fou : exposant maximal développé (anti-explosion).
const EXPOSANT_MAX: f64 = 64.0;

/// Garde-fou : degré maximal d’un produit ou d’une puissance développée.
const DEGRE_MAX: usize = 64;

#[derive(Clone, Debug, PartialEq)]
pub struct Polynome {
    variable: String,
    coeffs: Vec<f64>,
}

impl Polynome {
    pub fn constante(variable: &str, c: f64) -> Self {
        Self {
            variable: variable.to_string(),
            coeffs: vec![c],
        }
        .normalise()
    }

    pub fn variable(variable: &str) -> Self {
        Self {
            variable: variable.to_string(),
            coeffs: vec![0.0, 1.0],
        }
    }

    /// Retire les coefficients nuls de tête (le polynôme nul garde un seul 0).
    fn normalise(mut self) -> Self {
        while self.coeffs.len() > 1 && self.coeffs.last() == Some(&0.0) {
            self.coeffs.pop();
        }
        if self.coeffs.is_empty() {
            self.coeffs.push(0.0);
        }
        self
    }

    pub fn degre(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    pub fn est_nul(&self) -> bool {
        self.coeffs.iter().all(|c| *c == 0.0)
    }

    /// Coefficient de x^k (0 au-delà du degré).
    pub fn coefficient(&self, k: usize) -> f64 {
        self.coeffs.get(k).copied().unwrap_or(0.0)
    }

    /// `n` coefficients, de la puissance n-1 jusqu’à la constante.
    /// Ex: x^2 - 5x + 6, n=3 => [1, -5, 6] ; 2x + 1, n=3 => [0, 2, 1].
    pub fn coefficients(&self, n: usize) -> Vec<f64> {
        (0..n).rev().map(|k| self.coefficient(k)).collect()
    }

    fn puissance(&self, n: u32) -> Self {
        let mut acc = Polynome::constante(&self.variable, 1.0);
        for _ in 0..n {
            acc = &acc * self;
        }
        acc
    }

    /// Développe `expr` en polynôme de `variable`.
    /// Un coefficient infini ou NaN (débordement) est une erreur d’évaluation.
    pub fn depuis_expr(expr: &Expr, variable: &str) -> ResultatCalcul<Self> {
        let p = Self::developper(expr, variable)?;
        if p.coeffs.iter().any(|c| !c.is_finite()) {
            return Err(ErreurCalcul::evaluation(format!(
                "coefficient non fini: {expr}"
            )));
        }
        Ok(p)
    }

    fn developper(expr: &Expr, variable: &str) -> ResultatCalcul<Self> {
        use Expr::*;

        // sous-arbre constant : une seule évaluation numérique
        if !expr.contient_var() {
            let v = evaluer_expr(expr)?;
            if v.im != 0.0 {
                return Err(ErreurCalcul::NonPolynomial(format!(
                    "coefficient complexe: {expr}"
                )));
            }
            return Ok(Polynome::constante(variable, v.re));
        }

        match expr {
            Var(nom) if nom == variable => Ok(Polynome::variable(variable)),
            Var(nom) => Err(ErreurCalcul::NonPolynomial(format!(
                "variable inconnue: {nom}"
            ))),

            Neg(x) => Ok(-Self::developper(x, variable)?),
            Add(a, b) => Ok(&Self::developper(a, variable)? + &Self::developper(b, variable)?),
            Sub(a, b) => Ok(&Self::developper(a, variable)? - &Self::developper(b, variable)?),
            Mul(a, b) => {
                let p = Self::developper(a, variable)?;
                let q = Self::developper(b, variable)?;
                borne_degre(p.degre() + q.degre())?;
                Ok(&p * &q)
            }

            Div(a, b) if !b.contient_var() => {
                let k = Self::developper(b, variable)?.coefficient(0);
                if k == 0.0 {
                    return Err(ErreurCalcul::evaluation("division par zéro"));
                }
                let inverse = Polynome::constante(variable, 1.0 / k);
                Ok(&Self::developper(a, variable)? * &inverse)
            }

            Pow(base, exposant) if !exposant.contient_var() => {
                let n = Self::developper(exposant, variable)?.coefficient(0);
                if n < 0.0 || n.fract() != 0.0 || n > EXPOSANT_MAX {
                    return Err(ErreurCalcul::NonPolynomial(format!(
                        "exposant non entier positif: {expr}"
                    )));
                }
                let base = Self::developper(base, variable)?;
                borne_degre(base.degre().saturating_mul(n as usize))?;
                Ok(base.puissance(n as u32))
            }

            // x au dénominateur, dans une fonction, un modulo, une factorielle, ...
            _ => Err(ErreurCalcul::NonPolynomial(expr.to_string())),
        }
    }
}

fn borne_degre(degre: usize) -> ResultatCalcul<()> {
    if degre > DEGRE_MAX {
        return Err(ErreurCalcul::DegreNonSupporte(degre));
    }
    Ok(())
}

/* ------------------------ Opérations ------------------------ */

impl Add for &Polynome {
    type Output = Polynome;

    fn add(self, rhs: &Polynome) -> Polynome {
        let n = self.coeffs.len().max(rhs.coeffs.len());
        let coeffs = (0..n)
            .map(|k| self.coefficient(k) + rhs.coefficient(k))
            .collect();
        Polynome {
            variable: self.variable.clone(),
            coeffs,
        }
        .normalise()
    }
}

impl Neg for Polynome {
    type Output = Polynome;

    fn neg(mut self) -> Polynome {
        for c in &mut self.coeffs {
            *c = -*c;
        }
        self
    }
}

impl Sub for &Polynome {
    type Output = Polynome;

    fn sub(self, rhs: &Polynome) -> Polynome {
        self + &(-rhs.clone())
    }
}

impl Mul for &Polynome {
    type Output = Polynome;

    fn mul(self, rhs: &Polynome) -> Polynome {
        let mut coeffs = vec![0.0; self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in rhs.coeffs.iter().enumerate() {
                coeffs[i + j] += a * b;
            }
        }
        Polynome {
            variable: self.variable.clone(),
            coeffs,
        }
        .normalise()
    }
}

/* ------------------------ Forme canonique ------------------------ */

/// "x^2 - 5x + 6", "-x + 3", "0" (re-lisible par tokenize grâce à la multiplication implicite).
impl fmt::Display for Polynome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.est_nul() {
            return write!(f, "0");
        }

        let mut premier = true;
        for k in (0..self.coeffs.len()).rev() {
            let c = self.coeffs[k];
            if c == 0.0 {
                continue;
            }

            let signe = match (premier, c < 0.0) {
                (true, true) => "-",
                (true, false) => "",
                (false, true) => " - ",
                (false, false) => " + ",
            };

            let abs = format_nombre(c.abs(), PRECISION_CALCUL);
            let terme = match k {
                0 => abs,
                _ => {
                    let coeff = if abs == "1" { String::new() } else { abs };
                    let puissance = if k == 1 {
                        String::new()
                    } else {
                        format!("^{k}")
                    };
                    format!("{coeff}{}{puissance}", self.variable)
                }
            };

            write!(f, "{signe}{terme}")?;
            premier = false;
        }
        Ok(())
    }
}
