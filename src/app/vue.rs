// src/app/vue.rs
//
// Vue (UI egui): natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter calcule, Backspace efface (quand le champ est focus)
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
// - Un pavé par mode (Standard / Scientific / Equation / Unit)
//
// Note :
// - PAS de Key::NumEnter (n’existe pas dans egui 0.33.x)

use eframe::egui;

use super::etat::{AppCalc, Insertion, ModeCalcul};
use crate::noyau::{TypeEquation, CATEGORIES};

/// Exemples proposés sous le champ "langage naturel".
const EXEMPLES: [&str; 4] = [
    "What is 25% of 80?",
    "sqrt of 144",
    "15 + 3 * 4",
    "Solve x^2 - 5x + 6 = 0",
];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice NL");
                ui.add_space(6.0);

                self.ui_modes(ui);

                ui.add_space(6.0);
                ui.separator();
                ui.add_space(6.0);

                if self.mode == ModeCalcul::Unites {
                    self.ui_convertisseur(ui);
                } else {
                    self.ui_entree(ui);
                    ui.add_space(8.0);
                    self.ui_pave(ui);
                }

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_texte_naturel(ui);

                ui.add_space(8.0);
                ui.separator();

                if !self.etapes.is_empty() {
                    self.ui_etapes(ui);
                }
                self.ui_historique(ui);
                self.ui_memoire(ui);
            });
    }

    fn ui_modes(&mut self, ui: &mut egui::Ui) {
        let mut choisi = self.mode;
        ui.horizontal(|ui| {
            for mode in ModeCalcul::TOUS {
                ui.selectable_value(&mut choisi, mode, mode.libelle());
            }
        });
        if choisi != self.mode {
            self.changer_mode(choisi);
        }

        if self.mode == ModeCalcul::Equation {
            ui.horizontal(|ui| {
                for t in [TypeEquation::Lineaire, TypeEquation::Quadratique] {
                    ui.radio_value(&mut self.type_equation, t, t.libelle());
                }
            });
        }
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        let indice = match self.mode {
            ModeCalcul::Equation => "Ex: 2x + 4 = 10, x^2 - 5x + 6 = 0",
            _ => "Ex: 15 + 3 * 4, sqrt(16), sin(pi/2)",
        };

        // IMPORTANT : id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text(indice)
                .id_salt("entree_edit")
                .code_editor(),
        );

        // Si on a cliqué un bouton (pavé / fonctions / DEL / C / etc.), on redonne le focus
        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // --- Clavier : Enter calcule (seulement si le champ est focus) ---
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.has_focus() && enter {
            self.calculer();
        }

        // --- Clavier : Backspace “par motif” ("sqrt(", "pi", ...) ---
        let backspace = ui.input(|i| i.key_pressed(egui::Key::Backspace));
        if resp.has_focus() && backspace {
            self.effacer_dernier();
            self.focus_entree = true;
        }

        ui.add_space(6.0);
        Self::champ_affichage(ui, &self.affichage);
    }

    /* ------------------------ Pavés ------------------------ */

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            // Contrat: C = entrée seulement ; AC = entrée + affichage + démarche
            self.bouton_action(ui, "C", "Efface seulement l’entrée", Action::ClearEntree);
            self.bouton_action(ui, "AC", "Remise à zéro de l’affichage", Action::ResetTotal);
            self.bouton_action(ui, "DEL", "Efface le dernier symbole", Action::Backspace);
            self.bouton_action(ui, "M+", "Mémorise le résultat affiché", Action::Memoriser);
        });

        ui.add_space(6.0);

        match self.mode {
            ModeCalcul::Scientifique => self.ui_fonctions(ui),
            ModeCalcul::Equation => self.ui_symboles_equation(ui),
            _ => {}
        }

        ui.add_space(6.0);
        self.ui_pave_numerique(ui);
    }

    fn ui_fonctions(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_fonctions")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for f in ["sin", "cos", "tan", "sqrt", "cbrt"] {
                    self.bouton_insert(ui, f, &format!("{f}("), Insertion::Fonction);
                }
                ui.end_row();

                for f in ["asin", "acos", "atan", "log10", "log"] {
                    self.bouton_insert(ui, f, &format!("{f}("), Insertion::Fonction);
                }
                ui.end_row();

                self.bouton_insert(ui, "(", "(", Insertion::Ouvrante);
                self.bouton_insert(ui, ")", ")", Insertion::Fermante);
                self.bouton_insert(ui, "^", "^", Insertion::Operateur);
                self.bouton_insert(ui, "!", "!", Insertion::Chiffre);
                self.bouton_insert(ui, "%", "%", Insertion::Chiffre);
                ui.end_row();

                self.bouton_insert(ui, "π", "pi", Insertion::Mot);
                self.bouton_insert(ui, "e", "e", Insertion::Mot);
                self.bouton_insert(ui, "i", "i", Insertion::Mot);
                self.bouton_insert(ui, "x²", "^2", Insertion::Chiffre);
                self.bouton_insert(ui, "mod", "mod", Insertion::Operateur);
                ui.end_row();
            });
    }

    fn ui_symboles_equation(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            self.bouton_insert(ui, "x", "x", Insertion::Chiffre);
            self.bouton_insert(ui, "x²", "x^2", Insertion::Chiffre);
            self.bouton_insert(ui, "^", "^", Insertion::Chiffre);
            self.bouton_insert(ui, "=", "=", Insertion::Operateur);
            self.bouton_insert(ui, "(", "(", Insertion::Ouvrante);
            self.bouton_insert(ui, ")", ")", Insertion::Fermante);
        });
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        let libelle_calcul = if self.mode == ModeCalcul::Equation {
            "Solve"
        } else {
            "="
        };

        egui::Grid::new("pave_numerique")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_insert(ui, "7", "7", Insertion::Chiffre);
                self.bouton_insert(ui, "8", "8", Insertion::Chiffre);
                self.bouton_insert(ui, "9", "9", Insertion::Chiffre);
                self.bouton_insert(ui, "/", "/", Insertion::Operateur);
                ui.end_row();

                self.bouton_insert(ui, "4", "4", Insertion::Chiffre);
                self.bouton_insert(ui, "5", "5", Insertion::Chiffre);
                self.bouton_insert(ui, "6", "6", Insertion::Chiffre);
                self.bouton_insert(ui, "*", "*", Insertion::Operateur);
                ui.end_row();

                self.bouton_insert(ui, "1", "1", Insertion::Chiffre);
                self.bouton_insert(ui, "2", "2", Insertion::Chiffre);
                self.bouton_insert(ui, "3", "3", Insertion::Chiffre);
                self.bouton_insert(ui, "-", "-", Insertion::Operateur);
                ui.end_row();

                self.bouton_insert(ui, "0", "0", Insertion::Chiffre);
                self.bouton_insert(ui, ".", ".", Insertion::Chiffre);
                if ui
                    .add_sized([46.0, 28.0], egui::Button::new(libelle_calcul))
                    .clicked()
                {
                    self.calculer();
                }
                self.bouton_insert(ui, "+", "+", Insertion::Operateur);
                ui.end_row();
            });
    }

    /* ------------------------ Langage naturel ------------------------ */

    fn ui_texte_naturel(&mut self, ui: &mut egui::Ui) {
        ui.label("Question :");

        let mut envoyer = false;
        ui.horizontal(|ui| {
            let resp = ui.add(
                egui::TextEdit::singleline(&mut self.texte_naturel)
                    .desired_width(ui.available_width() - 70.0)
                    .hint_text("Type a calculation or question...")
                    .id_salt("texte_naturel_edit"),
            );
            let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
            envoyer |= resp.lost_focus() && enter;
            envoyer |= ui.add_sized([60.0, 24.0], egui::Button::new("Send")).clicked();
        });

        ui.horizontal_wrapped(|ui| {
            for ex in EXEMPLES {
                if ui.small_button(ex).clicked() {
                    self.texte_naturel = ex.to_string();
                }
            }
        });

        if envoyer {
            self.soumettre_texte_naturel();
        }
    }

    /* ------------------------ Unités ------------------------ */

    fn ui_convertisseur(&mut self, ui: &mut egui::Ui) {
        let mut categorie = self.convertisseur.categorie;
        let nom_categorie = CATEGORIES.get(categorie).map_or("", |c| c.nom);

        egui::ComboBox::from_id_salt("categorie_unites")
            .selected_text(nom_categorie)
            .show_ui(ui, |ui| {
                for (i, c) in CATEGORIES.iter().enumerate() {
                    ui.selectable_value(&mut categorie, i, c.nom);
                }
            });
        if categorie != self.convertisseur.categorie {
            self.convertisseur.choisir_categorie(categorie);
        }

        let Some(cat) = CATEGORIES.get(self.convertisseur.categorie) else {
            return;
        };
        let libelle = |id: &str| {
            cat.unites
                .iter()
                .find(|u| u.id == id)
                .map_or(String::new(), |u| format!("{} ({})", u.nom, u.symbole))
        };

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.add(egui::DragValue::new(&mut self.convertisseur.valeur).speed(0.1));

            egui::ComboBox::from_id_salt("unite_source")
                .selected_text(libelle(self.convertisseur.de))
                .show_ui(ui, |ui| {
                    for u in cat.unites {
                        ui.selectable_value(&mut self.convertisseur.de, u.id, libelle(u.id));
                    }
                });

            if ui.button("⇄").on_hover_text("Inverser").clicked() {
                self.convertisseur.inverser();
            }

            egui::ComboBox::from_id_salt("unite_cible")
                .selected_text(libelle(self.convertisseur.vers))
                .show_ui(ui, |ui| {
                    for u in cat.unites {
                        ui.selectable_value(&mut self.convertisseur.vers, u.id, libelle(u.id));
                    }
                });
        });

        ui.add_space(6.0);
        if ui.add_sized([96.0, 30.0], egui::Button::new("Convert")).clicked() {
            self.convertir();
        }

        if !self.convertisseur.erreur.is_empty() {
            ui.colored_label(ui.visuals().error_fg_color, &self.convertisseur.erreur);
        } else if !self.convertisseur.resultat.is_empty() {
            Self::champ_affichage(ui, &self.convertisseur.resultat);
        }
    }

    /* ------------------------ Panneaux ------------------------ */

    fn ui_etapes(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .id_salt("panneau_etapes")
            .default_open(true)
            .show(ui, |ui| {
                for (k, e) in self.etapes.iter().enumerate() {
                    ui.add_space(4.0);
                    ui.label(format!("{}. {}", k + 1, e.explication));
                    let contenu = if e.resultat.is_empty() || e.resultat == e.expression {
                        e.expression.clone()
                    } else {
                        format!("{}  →  {}", e.expression, e.resultat)
                    };
                    Self::champ_monospace(ui, &format!("etape_{k}"), &contenu, 1);
                }
            });
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        let mut reprendre = None;
        let mut vider = false;

        egui::CollapsingHeader::new(format!("Historique ({})", self.historique.len()))
            .id_salt("panneau_historique")
            .show(ui, |ui| {
                if self.historique.is_empty() {
                    ui.weak("aucun calcul");
                    return;
                }
                if ui.small_button("Effacer l’historique").clicked() {
                    vider = true;
                }
                for c in &self.historique {
                    let texte = format!(
                        "{}  [{}]  {} = {}",
                        c.horodatage.format("%H:%M:%S"),
                        c.mode.libelle(),
                        c.entree,
                        c.resultat
                    );
                    if ui.add(egui::Button::new(texte).frame(false)).clicked() {
                        reprendre = Some(c.id);
                    }
                }
            });

        if vider {
            self.vider_historique();
        }
        if let Some(id) = reprendre {
            self.reprendre_historique(id);
        }
    }

    fn ui_memoire(&mut self, ui: &mut egui::Ui) {
        let mut rappeler = None;
        let mut retirer = None;
        let mut vider = false;

        egui::CollapsingHeader::new(format!("Mémoire ({})", self.memoire.len()))
            .id_salt("panneau_memoire")
            .show(ui, |ui| {
                if self.memoire.is_empty() {
                    ui.weak("vide (M+ mémorise le résultat)");
                    return;
                }
                if ui.small_button("MC").on_hover_text("Vide la mémoire").clicked() {
                    vider = true;
                }
                for m in &self.memoire {
                    ui.horizontal(|ui| {
                        ui.monospace(m.valeur.to_string());
                        if let Some(l) = &m.libelle {
                            ui.weak(l);
                        }
                        if ui.small_button("MR").clicked() {
                            rappeler = Some(m.id);
                        }
                        if ui.small_button("✕").clicked() {
                            retirer = Some(m.id);
                        }
                    });
                }
            });

        if vider {
            self.vider_memoire();
        }
        if let Some(id) = rappeler {
            self.rappeler_memoire(id);
        }
        if let Some(id) = retirer {
            self.retirer_memoire(id);
        }
    }

    fn champ_affichage(ui: &mut egui::Ui, contenu: &str) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.label(egui::RichText::new(contenu).monospace().size(26.0));
            });
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ResetTotal => self.reset_total(),
                Action::Backspace => self.effacer_dernier(),
                Action::Memoriser => {
                    self.memoriser_affichage();
                }
            }
            self.focus_entree = true;
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, texte: &str, genre: Insertion) {
        if ui.add_sized([46.0, 28.0], egui::Button::new(label)).clicked() {
            self.inserer(texte, genre);
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ResetTotal,
    Backspace,
    Memoriser,
}
