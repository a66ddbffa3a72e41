// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Ident(name):
//    - si name est une fonction connue => fonction unaire (postfixée en RPN)
//    - sinon => constante (pi, e, i) ou variable (Expr::Var)
// - Précédences (haute -> basse) : ! % postfixes, ^ (droite), moins unaire, * / mod, + -
//   Donc -2^2 = -(2^2) et 2*-3 = 2*(-3).
// - Moins unaire : jeton Neg dédié (pas d’injection de 0, qui casse 2*-3).
// - Plus unaire : ignoré.
//
// NOTE:
// - Les fonctions sont traitées comme des opérateurs “collés” à leur argument
//   et sont sorties après la parenthèse fermante.

use super::erreurs::{ErreurCalcul, ResultatCalcul};
use super::expr::{Constante, Expr, Fonction};
use super::jetons::Tok;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash | Tok::Modulo => 2,
        Tok::Neg => 3,
        Tok::Caret => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret)
}

fn is_fonction(t: &Tok) -> bool {
    matches!(t, Tok::Ident(name) if Fonction::depuis_nom(name).is_some())
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("sqrt"), LPar, Num(16), RPar, Star, Num(2)]
///   rpn:    [Num(16), Ident("sqrt"), Num(2), Star]
pub fn to_rpn(tokens: &[Tok]) -> ResultatCalcul<Vec<Tok>> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter le moins unaire et les postfixes orphelins.
    let mut prev_was_value = false;

    for (idx, tok) in tokens.iter().cloned().enumerate() {
        match tok {
            Tok::Num(_) => {
                out.push(tok);
                prev_was_value = true;
            }

            Tok::Ident(_) => {
                if is_fonction(&tok) {
                    // fonction : doit être suivie de sa parenthèse
                    if !matches!(tokens.get(idx + 1), Some(Tok::LPar)) {
                        return Err(ErreurCalcul::syntaxe(format!(
                            "fonction sans parenthèses: {}",
                            super::jetons::format_tokens(std::slice::from_ref(&tok))
                        )));
                    }
                    ops.push(tok);
                    prev_was_value = false;
                } else {
                    out.push(tok);
                    prev_was_value = true;
                }
            }

            Tok::LPar => {
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RPar => {
                // dépile jusqu’à '('
                let mut ouvrante = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouvrante = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouvrante {
                    return Err(ErreurCalcul::syntaxe("parenthèse fermante sans ouvrante"));
                }

                // si une fonction est au sommet, on la sort aussi
                if ops.last().is_some_and(is_fonction) {
                    if let Some(f) = ops.pop() {
                        out.push(f);
                    }
                }

                prev_was_value = true;
            }

            Tok::Bang | Tok::Pourcent | Tok::Percent => {
                // postfixe : précédence maximale, sort directement
                if !prev_was_value {
                    return Err(ErreurCalcul::syntaxe("opérateur postfixe sans opérande"));
                }
                out.push(if matches!(tok, Tok::Percent) {
                    Tok::Pourcent
                } else {
                    tok
                });
            }

            Tok::Minus | Tok::Plus if !prev_was_value => {
                // unaire : le plus est neutre, le moins devient Neg (préfixe, ne dépile rien)
                if matches!(tok, Tok::Minus) {
                    ops.push(Tok::Neg);
                }
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Modulo | Tok::Caret => {
                if !prev_was_value {
                    return Err(ErreurCalcul::syntaxe(format!(
                        "opérateur sans opérande gauche: {}",
                        super::jetons::format_tokens(std::slice::from_ref(&tok))
                    )));
                }

                // dépile tant que:
                // - on n'est pas bloqué par '('
                // - et on ne traverse pas une fonction (fonction reste collée à son argument)
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar) || is_fonction(top) {
                        break;
                    }

                    let p_top = precedence(top);
                    let p_tok = precedence(&tok);

                    let doit_pop = if is_right_associative(&tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if !doit_pop {
                        break;
                    }
                    if let Some(op) = ops.pop() {
                        out.push(op);
                    }
                }

                ops.push(tok);
                prev_was_value = false;
            }

            Tok::Neg => return Err(ErreurCalcul::syntaxe("jeton interne inattendu")),
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(ErreurCalcul::syntaxe("parenthèses non fermées"));
        }
        if is_fonction(&op) {
            return Err(ErreurCalcul::syntaxe("fonction sans argument"));
        }
        out.push(op);
    }

    Ok(out)
}

/// Construit une Expr à partir d’une RPN.
///
/// - Ident(name):
///     - fonction connue => Expr::Fonction
///     - pi / e / i      => Expr::Constante
///     - sinon           => variable : Expr::Var(name)
pub fn from_rpn(rpn: &[Tok]) -> ResultatCalcul<Expr> {
    let invalide = || ErreurCalcul::syntaxe("expression invalide");
    let mut st: Vec<Expr> = Vec::new();

    for tok in rpn.iter().cloned() {
        match tok {
            Tok::Num(n) => st.push(Expr::Nombre(n)),

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Modulo | Tok::Caret => {
                let b = Box::new(st.pop().ok_or_else(invalide)?);
                let a = Box::new(st.pop().ok_or_else(invalide)?);

                let e = match tok {
                    Tok::Plus => Expr::Add(a, b),
                    Tok::Minus => Expr::Sub(a, b),
                    Tok::Star => Expr::Mul(a, b),
                    Tok::Slash => Expr::Div(a, b),
                    Tok::Modulo => Expr::Mod(a, b),
                    _ => Expr::Pow(a, b),
                };
                st.push(e);
            }

            Tok::Neg => {
                let x = st.pop().ok_or_else(invalide)?;
                st.push(Expr::Neg(Box::new(x)));
            }
            Tok::Bang => {
                let x = st.pop().ok_or_else(invalide)?;
                st.push(Expr::Factorielle(Box::new(x)));
            }
            Tok::Pourcent | Tok::Percent => {
                let x = st.pop().ok_or_else(invalide)?;
                st.push(Expr::Pourcent(Box::new(x)));
            }

            Tok::Ident(name) => {
                if let Some(f) = Fonction::depuis_nom(&name) {
                    let x = st
                        .pop()
                        .ok_or_else(|| ErreurCalcul::syntaxe("fonction sans argument"))?;
                    st.push(Expr::Fonction(f, Box::new(x)));
                } else if let Some(c) = Constante::depuis_nom(&name) {
                    st.push(Expr::Constante(c));
                } else {
                    st.push(Expr::Var(name));
                }
            }

            Tok::LPar | Tok::RPar => {
                return Err(ErreurCalcul::syntaxe("parenthèse inattendue en RPN"))
            }
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some(e), true) => Ok(e),
        _ => Err(invalide()),
    }
}
