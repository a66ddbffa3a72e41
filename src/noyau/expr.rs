// src/noyau/expr.rs
//
// AST du calcul (flottants / complexes).
// - Nombre    : littéral réel
// - Constante : pi, e, i
// - Var       : variable symbolique (ex: x), jamais évaluée ici
// - Fonction  : fonction unaire nommée (sin, sqrt, log10, ...)
//
// L’évaluation vit dans eval.rs, l’expansion polynomiale dans polynome.rs.

use num_complex::Complex64;

use std::f64::consts;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constante {
    Pi,
    E,
    I, // unité imaginaire
}

impl Constante {
    pub fn depuis_nom(nom: &str) -> Option<Self> {
        match nom {
            "pi" => Some(Self::Pi),
            "e" => Some(Self::E),
            "i" => Some(Self::I),
            _ => None,
        }
    }

    pub fn nom(self) -> &'static str {
        match self {
            Self::Pi => "pi",
            Self::E => "e",
            Self::I => "i",
        }
    }

    pub fn valeur(self) -> Complex64 {
        match self {
            Self::Pi => Complex64::new(consts::PI, 0.0),
            Self::E => Complex64::new(consts::E, 0.0),
            Self::I => Complex64::i(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sqrt,
    Cbrt,
    Log,   // logarithme naturel
    Log10, // logarithme décimal
    Exp,
    Abs,
    Factorial,
}

impl Fonction {
    /// Identificateurs reconnus comme fonctions (unaire).
    pub fn depuis_nom(nom: &str) -> Option<Self> {
        use Fonction::*;
        let f = match nom {
            "sin" => Sin,
            "cos" => Cos,
            "tan" => Tan,
            "asin" => Asin,
            "acos" => Acos,
            "atan" => Atan,
            "sqrt" => Sqrt,
            "cbrt" => Cbrt,
            "log" => Log,
            "log10" => Log10,
            "exp" => Exp,
            "abs" => Abs,
            "factorial" => Factorial,
            _ => return None,
        };
        Some(f)
    }

    pub fn nom(self) -> &'static str {
        use Fonction::*;
        match self {
            Sin => "sin",
            Cos => "cos",
            Tan => "tan",
            Asin => "asin",
            Acos => "acos",
            Atan => "atan",
            Sqrt => "sqrt",
            Cbrt => "cbrt",
            Log => "log",
            Log10 => "log10",
            Exp => "exp",
            Abs => "abs",
            Factorial => "factorial",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(f64),
    Constante(Constante),
    Var(String),

    Neg(Box<Expr>),
    Fonction(Fonction, Box<Expr>),
    Factorielle(Box<Expr>), // x!
    Pourcent(Box<Expr>),    // x% = x/100

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Mod(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Détecte si une expression contient au moins une variable.
    /// Itératif + garde-fous : si l'arbre est trop gros, on retourne true (l’appelant refusera
    /// alors l’évaluation numérique directe).
    pub fn contient_var(&self) -> bool {
        use Expr::*;

        const MAX_PILE: usize = 8192;
        const MAX_NOEUDS: usize = 200_000;

        let mut pile: Vec<&Expr> = Vec::with_capacity(64);
        pile.push(self);

        let mut visites: usize = 0;

        while let Some(e) = pile.pop() {
            visites += 1;
            if visites > MAX_NOEUDS || pile.len() > MAX_PILE {
                return true;
            }

            match e {
                Var(_) => return true,

                Nombre(_) | Constante(_) => {}

                Neg(x) | Fonction(_, x) | Factorielle(x) | Pourcent(x) => pile.push(x.as_ref()),

                Add(a, b) | Sub(a, b) | Mul(a, b) | Div(a, b) | Mod(a, b) | Pow(a, b) => {
                    pile.push(a.as_ref());
                    pile.push(b.as_ref());
                }
            }
        }

        false
    }
}

/* ------------------------ Affichage (re-lisible par tokenize) ------------------------ */

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;
        match self {
            Nombre(n) => write!(f, "{n}"),
            Constante(c) => write!(f, "{}", c.nom()),
            Var(s) => write!(f, "{s}"),
            Neg(x) => write!(f, "(-{x})"),
            Fonction(func, x) => write!(f, "{}({x})", func.nom()),
            Factorielle(x) => write!(f, "({x})!"),
            Pourcent(x) => write!(f, "({x})%"),
            Add(a, b) => write!(f, "({a}+{b})"),
            Sub(a, b) => write!(f, "({a}-{b})"),
            Mul(a, b) => write!(f, "({a}*{b})"),
            Div(a, b) => write!(f, "({a}/{b})"),
            Mod(a, b) => write!(f, "({a} % {b})"),
            Pow(a, b) => write!(f, "({a})^({b})"),
        }
    }
}
