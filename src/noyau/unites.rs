// src/noyau/unites.rs
//
// Table statique d’unités (8 catégories) et conversion.
// Chaque unité est une transformation affine vers l’unité de base de sa catégorie :
//   base = valeur * facteur + decalage
// Seules les températures ont un décalage non nul.

use tracing::warn;

use super::erreurs::{ErreurCalcul, ResultatCalcul};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Unite {
    pub id: &'static str,
    pub nom: &'static str,
    pub symbole: &'static str,
    pub facteur: f64,
    pub decalage: f64,
}

impl Unite {
    const fn lineaire(id: &'static str, nom: &'static str, symbole: &'static str, facteur: f64) -> Self {
        Self {
            id,
            nom,
            symbole,
            facteur,
            decalage: 0.0,
        }
    }

    fn vers_base(&self, valeur: f64) -> f64 {
        valeur * self.facteur + self.decalage
    }

    fn depuis_base(&self, base: f64) -> f64 {
        (base - self.decalage) / self.facteur
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CategorieUnite {
    pub id: &'static str,
    pub nom: &'static str,
    pub unites: &'static [Unite],
}

use Unite as U;

const MILE: f64 = 1609.344;
const HEURE: f64 = 3600.0;
const GALLON: f64 = 0.003_785_411_784;

const LONGUEUR: &[Unite] = &[
    U::lineaire("meter", "Meter", "m", 1.0),
    U::lineaire("kilometer", "Kilometer", "km", 1000.0),
    U::lineaire("centimeter", "Centimeter", "cm", 0.01),
    U::lineaire("millimeter", "Millimeter", "mm", 0.001),
    U::lineaire("mile", "Mile", "mi", MILE),
    U::lineaire("yard", "Yard", "yd", 0.9144),
    U::lineaire("foot", "Foot", "ft", 0.3048),
    U::lineaire("inch", "Inch", "in", 0.0254),
];

const MASSE: &[Unite] = &[
    U::lineaire("kilogram", "Kilogram", "kg", 1.0),
    U::lineaire("gram", "Gram", "g", 0.001),
    U::lineaire("milligram", "Milligram", "mg", 1e-6),
    U::lineaire("pound", "Pound", "lb", 0.453_592_37),
    U::lineaire("ounce", "Ounce", "oz", 0.028_349_523_125),
    U::lineaire("ton", "Metric Ton", "t", 1000.0),
];

// base : kelvin
const TEMPERATURE: &[Unite] = &[
    Unite {
        id: "celsius",
        nom: "Celsius",
        symbole: "°C",
        facteur: 1.0,
        decalage: 273.15,
    },
    Unite {
        id: "fahrenheit",
        nom: "Fahrenheit",
        symbole: "°F",
        facteur: 5.0 / 9.0,
        decalage: 273.15 - 32.0 * 5.0 / 9.0,
    },
    U::lineaire("kelvin", "Kelvin", "K", 1.0),
];

const TEMPS: &[Unite] = &[
    U::lineaire("second", "Second", "s", 1.0),
    U::lineaire("minute", "Minute", "min", 60.0),
    U::lineaire("hour", "Hour", "h", HEURE),
    U::lineaire("day", "Day", "d", 86_400.0),
    U::lineaire("week", "Week", "wk", 604_800.0),
    // année julienne / 12
    U::lineaire("month", "Month (avg)", "mo", 2_629_800.0),
    U::lineaire("year", "Year", "yr", 31_557_600.0),
];

// base : m³
const VOLUME: &[Unite] = &[
    U::lineaire("liter", "Liter", "L", 0.001),
    U::lineaire("milliliter", "Milliliter", "mL", 1e-6),
    U::lineaire("cubicMeter", "Cubic Meter", "m³", 1.0),
    U::lineaire("gallon", "Gallon (US)", "gal", GALLON),
    U::lineaire("quart", "Quart (US)", "qt", GALLON / 4.0),
    U::lineaire("pint", "Pint (US)", "pt", GALLON / 8.0),
    U::lineaire("fluidOunce", "Fluid Ounce (US)", "fl oz", GALLON / 128.0),
];

// base : m²
const SURFACE: &[Unite] = &[
    U::lineaire("squareMeter", "Square Meter", "m²", 1.0),
    U::lineaire("squareFoot", "Square Foot", "ft²", 0.092_903_04),
    U::lineaire("squareInch", "Square Inch", "in²", 0.000_645_16),
    U::lineaire("acre", "Acre", "ac", 4_046.856_422_4),
    U::lineaire("hectare", "Hectare", "ha", 10_000.0),
    U::lineaire("squareKilometer", "Square Kilometer", "km²", 1e6),
    U::lineaire("squareMile", "Square Mile", "mi²", MILE * MILE),
];

// base : bit, préfixes décimaux
const DONNEES: &[Unite] = &[
    U::lineaire("bit", "Bit", "b", 1.0),
    U::lineaire("byte", "Byte", "B", 8.0),
    U::lineaire("kilobyte", "Kilobyte", "kB", 8e3),
    U::lineaire("megabyte", "Megabyte", "MB", 8e6),
    U::lineaire("gigabyte", "Gigabyte", "GB", 8e9),
    U::lineaire("terabyte", "Terabyte", "TB", 8e12),
];

const VITESSE: &[Unite] = &[
    U::lineaire("metersPerSecond", "Meters per Second", "m/s", 1.0),
    U::lineaire("kilometersPerHour", "Kilometers per Hour", "km/h", 1000.0 / HEURE),
    U::lineaire("milesPerHour", "Miles per Hour", "mph", MILE / HEURE),
    U::lineaire("knot", "Knot", "kn", 1852.0 / HEURE),
];

pub static CATEGORIES: &[CategorieUnite] = &[
    CategorieUnite { id: "length", nom: "Length", unites: LONGUEUR },
    CategorieUnite { id: "mass", nom: "Weight", unites: MASSE },
    CategorieUnite { id: "temperature", nom: "Temperature", unites: TEMPERATURE },
    CategorieUnite { id: "time", nom: "Time", unites: TEMPS },
    CategorieUnite { id: "volume", nom: "Volume", unites: VOLUME },
    CategorieUnite { id: "area", nom: "Area", unites: SURFACE },
    CategorieUnite { id: "data", nom: "Data", unites: DONNEES },
    CategorieUnite { id: "speed", nom: "Speed", unites: VITESSE },
];

pub fn trouver_unite(id: &str) -> Option<&'static Unite> {
    CATEGORIES
        .iter()
        .flat_map(|c| c.unites.iter())
        .find(|u| u.id == id)
}

pub fn categorie_de(id_unite: &str) -> Option<&'static CategorieUnite> {
    CATEGORIES
        .iter()
        .find(|c| c.unites.iter().any(|u| u.id == id_unite))
}

/// Convertit `valeur` de l’unité `de` vers l’unité `vers` (identifiants de la table).
pub fn convert_unit(valeur: f64, de: &str, vers: &str) -> ResultatCalcul<f64> {
    let (Some(source), Some(cible)) = (trouver_unite(de), trouver_unite(vers)) else {
        warn!(de, vers, "unité inconnue");
        return Err(ErreurCalcul::Conversion("Invalid unit selection".into()));
    };

    let meme_categorie = categorie_de(de)
        .zip(categorie_de(vers))
        .is_some_and(|(a, b)| a.id == b.id);
    if !meme_categorie {
        warn!(de, vers, "conversion entre catégories");
        return Err(ErreurCalcul::Conversion(
            "Cannot convert between these units".into(),
        ));
    }

    let resultat = cible.depuis_base(source.vers_base(valeur));
    if !resultat.is_finite() {
        return Err(ErreurCalcul::Conversion(
            "Cannot convert between these units".into(),
        ));
    }
    Ok(resultat)
}
