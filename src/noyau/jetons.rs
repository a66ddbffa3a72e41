// src/noyau/jetons.rs

use super::erreurs::{ErreurCalcul, ResultatCalcul};
use super::expr::Fonction;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // Fonctions, constantes et variables (tout ce qui n’est pas nombre / opérateur)
    // NOTE: le parse (RPN->Expr) décidera si c’est une fonction, une constante ou une variable.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^

    // '%' brut, reclassé par `classe_pourcents` en Pourcent (postfixe) ou Modulo (binaire) ;
    // Modulo vient aussi du mot-clé "mod"
    Percent,
    Pourcent,
    Modulo,

    Bang, // ! (factorielle postfixe)

    // Moins unaire : produit seulement par to_rpn (jamais par tokenize)
    Neg,

    LPar,
    RPar,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 3.5, .5, 1e3, 2.5E-4)
/// - opérateurs + - * / ^ % !
/// - parenthèses ( )
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (normalisés en minuscules)
/// - glyphes du pavé : π √ × ÷ − ² ³
pub fn tokenize(s: &str) -> ResultatCalcul<Vec<Tok>> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Plus),
            '-' | '−' => Some(Tok::Minus),
            '*' | '×' => Some(Tok::Star),
            '/' | '÷' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            '%' => Some(Tok::Percent),
            '!' => Some(Tok::Bang),
            'π' => Some(Tok::Ident("pi".to_string())),
            '√' => Some(Tok::Ident("sqrt".to_string())),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        // Exposants du pavé : x² / x³
        if c == '²' || c == '³' {
            out.push(Tok::Caret);
            out.push(Tok::Num(if c == '²' { 2.0 } else { 3.0 }));
            i += 1;
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word = chars[start..i].iter().collect::<String>().to_lowercase();
            out.push(if word == "mod" {
                Tok::Modulo
            } else {
                Tok::Ident(word)
            });
            continue;
        }

        // Nombre : mantisse [chiffres][.chiffres] + exposant optionnel e[+-]chiffres
        if c.is_ascii_digit() || (c == '.' && chiffre_a(&chars, i + 1)) {
            let start = i;
            while chiffre_a(&chars, i) {
                i += 1;
            }
            if i < chars.len() && chars[i] == '.' {
                i += 1;
                while chiffre_a(&chars, i) {
                    i += 1;
                }
            }

            // exposant seulement s’il est complet ("2e" reste 2 puis la constante e)
            if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                let signe = i + 1 < chars.len() && (chars[i + 1] == '+' || chars[i + 1] == '-');
                let debut_chiffres = if signe { i + 2 } else { i + 1 };
                if chiffre_a(&chars, debut_chiffres) {
                    i = debut_chiffres;
                    while chiffre_a(&chars, i) {
                        i += 1;
                    }
                }
            }

            let txt: String = chars[start..i].iter().collect();
            let n = txt
                .parse::<f64>()
                .map_err(|_| ErreurCalcul::syntaxe(format!("nombre invalide: {txt}")))?;
            out.push(Tok::Num(n));
            continue;
        }

        return Err(ErreurCalcul::syntaxe(format!("caractère inattendu: '{c}'")));
    }

    Ok(out)
}

fn chiffre_a(chars: &[char], i: usize) -> bool {
    i < chars.len() && chars[i].is_ascii_digit()
}

/// Vrai si le jeton peut commencer une valeur (opérande).
fn commence_valeur(t: &Tok) -> bool {
    matches!(t, Tok::Num(_) | Tok::Ident(_) | Tok::LPar)
}

/// Vrai si le jeton peut terminer une valeur.
/// Une fonction (sin, sqrt, ...) ne termine jamais une valeur : elle attend sa parenthèse.
fn termine_valeur(t: &Tok) -> bool {
    match t {
        Tok::Num(_) | Tok::RPar | Tok::Bang | Tok::Pourcent => true,
        Tok::Ident(name) => Fonction::depuis_nom(name).is_none(),
        _ => false,
    }
}

/// '%' suivi d’un opérande => modulo (7 % 3) ; sinon pourcentage postfixe (50%).
pub fn classe_pourcents(tokens: Vec<Tok>) -> Vec<Tok> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut iter = tokens.into_iter().peekable();

    while let Some(t) = iter.next() {
        if matches!(t, Tok::Percent) {
            let binaire = iter.peek().is_some_and(commence_valeur);
            out.push(if binaire { Tok::Modulo } else { Tok::Pourcent });
        } else {
            out.push(t);
        }
    }
    out
}

/// Insère les multiplications implicites : 2x, 2(3), (1)(2), 2pi, 3 sin(0), x y.
///
/// Exception : deux nombres côte à côte ("2 3") restent tels quels (erreur au parse).
pub fn insere_multiplications(tokens: Vec<Tok>) -> Vec<Tok> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len() * 2);

    for t in tokens {
        if let Some(prev) = out.last() {
            let deux_nombres = matches!((prev, &t), (Tok::Num(_), Tok::Num(_)));
            if termine_valeur(prev) && commence_valeur(&t) && !deux_nombres {
                out.push(Tok::Star);
            }
        }
        out.push(t);
    }
    out
}

/// Format utilitaire (debug/journal) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(n) => format!("{n}"),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),
            Tok::Percent | Tok::Pourcent => "%".to_string(),
            Tok::Modulo => "mod".to_string(),
            Tok::Bang => "!".to_string(),
            Tok::Neg => "neg".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
