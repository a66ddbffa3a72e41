//! src/app/etat.rs
//!
//! État de session (sans vue).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, affichage, démarche, historique,
//! mémoire, mode, convertisseur) et les actions qui passent par le noyau.
//!
//! Contrats :
//! - Aucun dessin ici (pas d’egui).
//! - Historique : ajouté seulement sur succès, le plus récent en tête, borné.
//! - Mémoire : la plus récente en tête, identifiants jamais réutilisés.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::noyau::format::format_nombre;
use crate::noyau::solveur::ERREUR_RESOLUTION;
use crate::noyau::{
    convert_unit, normalize, Etape, ErreurCalcul, Solveur, TypeEquation, CATEGORIES,
    PRECISION_CALCUL, SENTINELLE_ERREUR,
};

/// Garde-fou : nombre maximal de calculs conservés.
pub const HISTORIQUE_MAX: usize = 100;

/// Affichage au démarrage et après AC.
const AFFICHAGE_INITIAL: &str = "0";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModeCalcul {
    #[default]
    Standard,
    Scientifique,
    Equation,
    Unites,
}

impl ModeCalcul {
    pub const TOUS: [ModeCalcul; 4] = [
        ModeCalcul::Standard,
        ModeCalcul::Scientifique,
        ModeCalcul::Equation,
        ModeCalcul::Unites,
    ];

    pub fn libelle(self) -> &'static str {
        match self {
            ModeCalcul::Standard => "Standard",
            ModeCalcul::Scientifique => "Scientific",
            ModeCalcul::Equation => "Equation",
            ModeCalcul::Unites => "Unit",
        }
    }
}

/// Entrée d’historique.
#[derive(Clone, Debug, PartialEq)]
pub struct Calcul {
    pub id: u64,
    pub entree: String,
    pub resultat: String,
    pub mode: ModeCalcul,
    pub horodatage: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ValeurMemoire {
    pub id: u64,
    pub valeur: f64,
    pub libelle: Option<String>,
}

/// Nature d’un texte inséré par un bouton (règle d’espacement).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Insertion {
    Chiffre,
    Mot,
    Fonction,
    Operateur,
    Ouvrante,
    Fermante,
}

/// Motifs retirés d’un bloc par DEL.
const MOTIFS_DEL: [&str; 12] = [
    "log10(", "sqrt(", "cbrt(", "asin(", "acos(", "atan(", "sin(", "cos(", "tan(", "log(", "mod",
    "pi",
];

/// Panneau de conversion : catégorie choisie + unités (identifiants de la table).
#[derive(Clone, Debug)]
pub struct Convertisseur {
    pub categorie: usize,
    pub de: &'static str,
    pub vers: &'static str,
    pub valeur: f64,
    pub resultat: String,
    pub erreur: String,
}

impl Default for Convertisseur {
    fn default() -> Self {
        let mut c = Self {
            categorie: 0,
            de: "",
            vers: "",
            valeur: 1.0,
            resultat: String::new(),
            erreur: String::new(),
        };
        c.choisir_categorie(0);
        c
    }
}

impl Convertisseur {
    /// Change de catégorie : les deux premières unités deviennent source et cible.
    pub fn choisir_categorie(&mut self, index: usize) {
        let Some(cat) = CATEGORIES.get(index) else {
            return;
        };
        self.categorie = index;
        self.de = cat.unites.first().map_or("", |u| u.id);
        self.vers = cat.unites.get(1).or(cat.unites.first()).map_or("", |u| u.id);
        self.resultat.clear();
        self.erreur.clear();
    }

    pub fn inverser(&mut self) {
        std::mem::swap(&mut self.de, &mut self.vers);
        self.resultat.clear();
        self.erreur.clear();
    }
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrées utilisateur ---
    pub entree: String,        // expression / équation (pavé ou clavier)
    pub texte_naturel: String, // champ "langage naturel"

    // --- sorties ---
    pub affichage: String,   // résultat affiché ("Error" en cas d’échec)
    pub etapes: Vec<Etape>, // démarche de la dernière résolution

    // --- session ---
    pub historique: Vec<Calcul>,
    pub memoire: Vec<ValeurMemoire>,
    pub mode: ModeCalcul,
    pub type_equation: TypeEquation,
    pub convertisseur: Convertisseur,
    dernier_id: u64,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            texte_naturel: String::new(),
            affichage: AFFICHAGE_INITIAL.to_string(),
            etapes: Vec::new(),
            historique: Vec::new(),
            memoire: Vec::new(),
            mode: ModeCalcul::default(),
            type_equation: TypeEquation::default(),
            convertisseur: Convertisseur::default(),
            dernier_id: 0,
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    fn nouvel_id(&mut self) -> u64 {
        self.dernier_id += 1;
        self.dernier_id
    }

    /* ------------------------ Actions “boutons” ------------------------ */

    /// AC : entrée + affichage + démarche (l’historique et la mémoire restent).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.affichage = AFFICHAGE_INITIAL.to_string();
        self.etapes.clear();
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée.
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    fn couper_espaces_finaux(&mut self) {
        let fin = self.entree.trim_end().len();
        self.entree.truncate(fin);
    }

    /// Pavé : ajoute `texte` en gérant les espaces autour des opérateurs et des mots.
    pub fn inserer(&mut self, texte: &str, genre: Insertion) {
        if texte.is_empty() {
            return;
        }
        let precedent = self.entree.trim_end().chars().last();

        match genre {
            Insertion::Chiffre => {}
            Insertion::Fermante => self.couper_espaces_finaux(),
            Insertion::Operateur => {
                self.couper_espaces_finaux();
                if !self.entree.is_empty() {
                    self.entree.push(' ');
                }
            }
            Insertion::Ouvrante | Insertion::Fonction => {
                if precedent.is_some_and(|c| c.is_ascii_alphanumeric() || c == ')') {
                    self.entree.push(' ');
                }
            }
            Insertion::Mot => {
                let colle = !self.entree.ends_with(char::is_whitespace);
                if colle && precedent.is_some_and(|c| c.is_ascii_digit() || c == ')') {
                    self.entree.push(' ');
                }
            }
        }

        self.entree.push_str(texte);
        if genre == Insertion::Operateur {
            self.entree.push(' ');
        }
        self.focus_entree = true;
    }

    /// DEL : retire un motif entier ("sqrt(", "pi", ...) sinon un caractère.
    pub fn effacer_dernier(&mut self) {
        self.couper_espaces_finaux();

        let retrait = match MOTIFS_DEL.iter().find(|m| self.entree.ends_with(**m)) {
            Some(m) => m.len(),
            None => self.entree.chars().last().map_or(0, char::len_utf8),
        };
        self.entree.truncate(self.entree.len() - retrait);

        self.couper_espaces_finaux();
        self.focus_entree = true;
    }

    pub fn changer_mode(&mut self, mode: ModeCalcul) {
        if self.mode != mode {
            self.mode = mode;
            self.etapes.clear();
        }
        self.focus_entree = true;
    }

    /// "=" : évalue ou résout selon le mode courant.
    pub fn calculer(&mut self) {
        match self.mode {
            ModeCalcul::Equation => self.resoudre_equation(),
            _ => self.evaluer_entree(),
        }
    }

    /* ------------------------ Passage par le noyau ------------------------ */

    /// Évalue `entree` ; sur succès, le résultat devient la nouvelle entrée (enchaînement).
    pub fn evaluer_entree(&mut self) {
        let entree = self.entree.trim().to_string();
        if entree.is_empty() {
            return;
        }
        if self.executer(Solveur::Evaluation, &entree, &entree) {
            self.entree = self.affichage.clone();
        }
    }

    /// Résout `entree` avec le type d’équation choisi.
    pub fn resoudre_equation(&mut self) {
        let entree = self.entree.trim().to_string();
        if entree.is_empty() {
            return;
        }
        self.executer(Solveur::Equation(self.type_equation), &entree, &entree);
    }

    /// Texte libre -> normalize -> évaluation, ou résolution si la phrase contient '='.
    pub fn soumettre_texte_naturel(&mut self) {
        let texte = self.texte_naturel.trim().to_string();
        if texte.is_empty() {
            return;
        }

        let expression = normalize(&texte);
        debug!(texte = %texte, expression = %expression, "texte naturel normalisé");
        self.entree = expression.clone();

        let solveur = if expression.contains('=') {
            self.type_equation = TypeEquation::detecter(&expression);
            self.mode = ModeCalcul::Equation;
            Solveur::Equation(self.type_equation)
        } else {
            Solveur::Evaluation
        };

        self.executer(solveur, &expression, &texte);
        self.texte_naturel.clear();
    }

    /// Dépose résultat + démarche ; historique seulement sur succès. Retourne le succès.
    fn executer(&mut self, solveur: Solveur, expression: &str, libelle: &str) -> bool {
        let r = solveur.resoudre(expression);
        let succes = r.resultat != SENTINELLE_ERREUR && r.resultat != ERREUR_RESOLUTION;

        self.affichage = r.resultat;
        self.etapes = r.etapes;

        if succes {
            let resultat = self.affichage.clone();
            self.ajouter_historique(libelle, resultat);
        }
        self.focus_entree = true;
        succes
    }

    /// Conversion du panneau "Unit".
    pub fn convertir(&mut self) {
        let c = &mut self.convertisseur;
        c.resultat.clear();
        c.erreur.clear();

        let symbole = |id: &str| crate::noyau::unites::trouver_unite(id).map_or("", |u| u.symbole);

        match convert_unit(c.valeur, c.de, c.vers) {
            Ok(v) => {
                let entree = format!(
                    "{} {}",
                    format_nombre(c.valeur, PRECISION_CALCUL),
                    symbole(c.de)
                );
                let resultat = format!("{} {}", format_nombre(v, PRECISION_CALCUL), symbole(c.vers));
                c.resultat = resultat.clone();
                self.ajouter_historique(&entree, resultat);
            }
            Err(ErreurCalcul::Conversion(msg)) => c.erreur = msg,
            Err(e) => c.erreur = e.to_string(),
        }
    }

    /* ------------------------ Historique ------------------------ */

    fn ajouter_historique(&mut self, entree: &str, resultat: String) {
        let calcul = Calcul {
            id: self.nouvel_id(),
            entree: entree.to_string(),
            resultat,
            mode: self.mode,
            horodatage: Utc::now(),
        };
        self.historique.insert(0, calcul);
        self.historique.truncate(HISTORIQUE_MAX);
    }

    pub fn vider_historique(&mut self) {
        self.historique.clear();
    }

    /// Recharge l’entrée d’un calcul passé (et son mode).
    pub fn reprendre_historique(&mut self, id: u64) {
        if let Some(c) = self.historique.iter().find(|c| c.id == id) {
            self.entree = c.entree.clone();
            self.mode = c.mode;
            self.focus_entree = true;
        }
    }

    /* ------------------------ Mémoire ------------------------ */

    pub fn ajouter_memoire(&mut self, valeur: f64, libelle: Option<String>) -> u64 {
        let id = self.nouvel_id();
        self.memoire.insert(0, ValeurMemoire { id, valeur, libelle });
        id
    }

    pub fn lire_memoire(&self, id: u64) -> Option<f64> {
        self.memoire.iter().find(|m| m.id == id).map(|m| m.valeur)
    }

    pub fn retirer_memoire(&mut self, id: u64) {
        self.memoire.retain(|m| m.id != id);
    }

    pub fn vider_memoire(&mut self) {
        self.memoire.clear();
    }

    /// M+ : mémorise l’affichage s’il s’agit d’un réel (pas "Error", pas un complexe).
    pub fn memoriser_affichage(&mut self) -> Option<u64> {
        let valeur: f64 = self.affichage.trim().parse().ok()?;
        if !valeur.is_finite() {
            return None;
        }
        let libelle = Some(self.entree.trim().to_string()).filter(|s| !s.is_empty());
        Some(self.ajouter_memoire(valeur, libelle))
    }

    /// MR : insère une valeur mémorisée à la fin de l’entrée.
    pub fn rappeler_memoire(&mut self, id: u64) {
        if let Some(v) = self.lire_memoire(id) {
            self.entree.push_str(&format_nombre(v, PRECISION_CALCUL));
            self.focus_entree = true;
        }
    }
}
