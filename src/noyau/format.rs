// src/noyau/format.rs
//
// Affichage des nombres avec N chiffres significatifs.
// - notation fixe si l’exposant décimal est dans [-3, 5)
// - notation exponentielle sinon (1.2e+5, 1e-7)
// - zéros de fin retirés, "-0" affiché "0"
// - complexes : "a + bi", "a - bi", "bi", "i", "-i"

use num_complex::Complex64;

/// Bornes de la notation fixe (exposant décimal inclus / exclu).
const EXPOSANT_FIXE_MIN: i32 = -3;
const EXPOSANT_FIXE_MAX: i32 = 5;

/// Formate un réel avec `precision` chiffres significatifs.
pub fn format_nombre(x: f64, precision: usize) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if x == 0.0 {
        return "0".to_string();
    }

    let precision = precision.max(1);

    // Arrondi unique via la notation scientifique de Rust : "-1.2340000e3"
    let sci = format!("{:.*e}", precision - 1, x);
    let (mantisse, exposant) = match sci.split_once('e') {
        Some(parts) => parts,
        None => return sci,
    };
    let exposant: i32 = match exposant.parse() {
        Ok(e) => e,
        Err(_) => return sci,
    };

    let negatif = mantisse.starts_with('-');
    let mut chiffres: String = mantisse.chars().filter(|c| c.is_ascii_digit()).collect();
    while chiffres.len() > 1 && chiffres.ends_with('0') {
        chiffres.pop();
    }

    let corps = if (EXPOSANT_FIXE_MIN..EXPOSANT_FIXE_MAX).contains(&exposant) {
        notation_fixe(&chiffres, exposant)
    } else {
        notation_exponentielle(&chiffres, exposant)
    };

    if negatif {
        format!("-{corps}")
    } else {
        corps
    }
}

fn notation_fixe(chiffres: &str, exposant: i32) -> String {
    if exposant < 0 {
        let zeros = "0".repeat((-exposant - 1) as usize);
        return format!("0.{zeros}{chiffres}");
    }

    let entiers = exposant as usize + 1;
    if chiffres.len() <= entiers {
        let zeros = "0".repeat(entiers - chiffres.len());
        format!("{chiffres}{zeros}")
    } else {
        format!("{}.{}", &chiffres[..entiers], &chiffres[entiers..])
    }
}

fn notation_exponentielle(chiffres: &str, exposant: i32) -> String {
    let signe = if exposant < 0 { '-' } else { '+' };
    let (tete, reste) = chiffres.split_at(1);
    if reste.is_empty() {
        format!("{tete}e{signe}{}", exposant.abs())
    } else {
        format!("{tete}.{reste}e{signe}{}", exposant.abs())
    }
}

/// Formate une valeur (réelle ou complexe) avec `precision` chiffres significatifs.
pub fn format_valeur(v: Complex64, precision: usize) -> String {
    let re = format_nombre(v.re, precision);
    let im = format_nombre(v.im.abs(), precision);

    if im == "0" {
        return re;
    }

    let partie_im = if im == "1" { "i".to_string() } else { format!("{im}i") };

    if re == "0" {
        return if v.im < 0.0 {
            format!("-{partie_im}")
        } else {
            partie_im
        };
    }

    let op = if v.im < 0.0 { '-' } else { '+' };
    format!("{re} {op} {partie_im}")
}

/// Réel négatif entre parenthèses (pour les étapes : "(-5)² - 4 × 1 × 6").
pub fn entre_parentheses_si_negatif(x: f64, precision: usize) -> String {
    let s = format_nombre(x, precision);
    if s.starts_with('-') {
        format!("({s})")
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entiers_et_decimaux() {
        assert_eq!(format_nombre(4.0, 14), "4");
        assert_eq!(format_nombre(-12.5, 14), "-12.5");
        assert_eq!(format_nombre(12345.0, 14), "12345");
        assert_eq!(format_nombre(0.1 + 0.2, 14), "0.3");
        assert_eq!(format_nombre(1.0 / 3.0, 14), "0.33333333333333");
        assert_eq!(format_nombre(2.0 / 3.0, 10), "0.6666666667");
    }

    #[test]
    fn petits_et_grands() {
        assert_eq!(format_nombre(0.001, 14), "0.001");
        assert_eq!(format_nombre(0.0001, 14), "1e-4");
        assert_eq!(format_nombre(100000.0, 14), "1e+5");
        assert_eq!(format_nombre(123456.0, 14), "1.23456e+5");
        assert_eq!(format_nombre(-2.5e-7, 14), "-2.5e-7");
    }

    #[test]
    fn valeurs_speciales() {
        assert_eq!(format_nombre(-0.0, 14), "0");
        assert_eq!(format_nombre(f64::INFINITY, 14), "Infinity");
        assert_eq!(format_nombre(f64::NEG_INFINITY, 14), "-Infinity");
        assert_eq!(format_nombre(f64::NAN, 14), "NaN");
    }

    #[test]
    fn arrondi_qui_deborde() {
        // 9.99999999999999 arrondi à 14 chiffres => 10
        assert_eq!(format_nombre(9.999_999_999_999_999, 14), "10");
        assert_eq!(format_nombre(99_999.999_999_999_99, 10), "1e+5");
    }

    #[test]
    fn complexes() {
        assert_eq!(format_valeur(Complex64::new(2.0, 0.0), 14), "2");
        assert_eq!(format_valeur(Complex64::new(0.0, 2.0), 14), "2i");
        assert_eq!(format_valeur(Complex64::new(0.0, 1.0), 14), "i");
        assert_eq!(format_valeur(Complex64::new(0.0, -1.0), 14), "-i");
        assert_eq!(format_valeur(Complex64::new(1.0, -2.0), 14), "1 - 2i");
        assert_eq!(format_valeur(Complex64::new(-1.5, 0.5), 14), "-1.5 + 0.5i");
    }

    #[test]
    fn parentheses_negatif() {
        assert_eq!(entre_parentheses_si_negatif(-5.0, 14), "(-5)");
        assert_eq!(entre_parentheses_si_negatif(5.0, 14), "5");
    }
}
