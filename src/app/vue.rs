// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppChaine (etat.rs) pour natif + wasm
// - Cartes posées en absolu (une Area par carte), liaisons peintes
//   entre les centres des points de connexion
// - Les centres sont mesurés pendant le passage de rendu et resservent
//   à la frame suivante (ancrages) : une frame de latence, invisible
//
// Note :
// - AUCUNE évaluation ici en dehors du panneau "Démarche" (lecture
//   seule) : la propagation se fait dans app.rs quand `recalculer` est
//   levé.

use std::collections::HashMap;

use eframe::egui;

use super::etat::{AppChaine, Carte};
use crate::noyau::evaluer_equation_demarche;

/* ------------------------ Disposition ------------------------ */

const LARGEUR_CARTE: f32 = 220.0;

const POS_CARTES: [(u32, (f32, f32)); 5] = [
    (1, (265.0, 162.0)),
    (2, (631.0, 162.0)),
    (3, (989.0, 162.0)),
    (4, (454.0, 520.0)),
    (5, (823.0, 520.0)),
];

const POS_ENTREE: (f32, f32) = (90.0, 335.0);
const POS_SORTIE: (f32, f32) = (1270.0, 335.0);
const POS_DEMARCHE: (f32, f32) = (20.0, 620.0);

/// En dessous de cette distance, un segment droit suffit.
const SEUIL_SEGMENT: f32 = 150.0;

/* ------------------------ Couleurs (palette du câblage) ------------------------ */

const ORANGE_ENTREE: egui::Color32 = egui::Color32::from_rgb(0xE2, 0x9A, 0x2D);
const VERT_SORTIE: egui::Color32 = egui::Color32::from_rgb(0x4C, 0xAF, 0x79);
const BLEU_POINT: egui::Color32 = egui::Color32::from_rgb(0x66, 0xA3, 0xFF);
// #0066FF à ~30 % d'alpha (composantes prémultipliées)
const BLEU_LIEN: egui::Color32 = egui::Color32::from_rgba_premultiplied(0x00, 0x1F, 0x4D, 0x4D);

impl AppChaine {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("Chaîne de fonctions");
        ui.label("Chaque carte applique son équation à la valeur reçue et alimente la suivante.");

        let ancrages_vides = self.ancrages.is_empty();
        self.dessiner_liaisons(ui);

        let ctx = ui.ctx().clone();
        let mut changement = false;

        // --- boîte d'entrée ---
        {
            let Self {
                x_initial, ancrages, ..
            } = self;

            egui::Area::new(egui::Id::new("boite_entree"))
                .fixed_pos(egui::pos2(POS_ENTREE.0, POS_ENTREE.1))
                .show(&ctx, |ui| {
                    changement |= boite_entree(ui, x_initial, ancrages);
                });
        }

        // --- cartes ---
        {
            let Self {
                cartes, ancrages, ..
            } = self;

            for carte in cartes.iter_mut() {
                let ancrages = &mut *ancrages; // réemprunt : une fermeture par carte
                let pos = position_carte(carte.id);
                egui::Area::new(egui::Id::new(("carte", carte.id)))
                    .fixed_pos(egui::pos2(pos.0, pos.1))
                    .show(&ctx, |ui| {
                        changement |= ui_carte(ui, carte, ancrages);
                    });
            }
        }

        // --- boîte de sortie ---
        {
            let Self {
                y_final, ancrages, ..
            } = self;

            egui::Area::new(egui::Id::new("boite_sortie"))
                .fixed_pos(egui::pos2(POS_SORTIE.0, POS_SORTIE.1))
                .show(&ctx, |ui| {
                    boite_sortie(ui, *y_final, ancrages);
                });
        }

        self.fenetre_demarche(&ctx);

        if changement {
            self.recalculer = true;
        }

        // La propagation (et le premier tracé des liaisons, qui attend
        // des ancrages mesurés) a besoin d'une frame de plus.
        if changement || ancrages_vides {
            ctx.request_repaint();
        }
    }

    /// Peint le câblage entre les centres mesurés à la frame précédente.
    fn dessiner_liaisons(&self, ui: &egui::Ui) {
        let painter = ui.painter();
        let stroke = egui::Stroke::new(6.0, BLEU_LIEN);

        for (de, vers) in self.connexions() {
            let (Some(&(x1, y1)), Some(&(x2, y2))) =
                (self.ancrages.get(&de), self.ancrages.get(&vers))
            else {
                continue; // première frame : rien de mesuré encore
            };

            let a = egui::pos2(x1, y1);
            let b = egui::pos2(x2, y2);

            if a.distance(b) < SEUIL_SEGMENT {
                painter.line_segment([a, b], stroke);
            } else {
                // point de contrôle au milieu, décalé vers le bas
                let controle = egui::pos2((a.x + b.x) / 2.0, (a.y + b.y) / 2.0 + 50.0);
                painter.add(egui::epaint::QuadraticBezierShape::from_points_stroke(
                    [a, controle, b],
                    false,
                    egui::Color32::TRANSPARENT,
                    stroke,
                ));
            }
        }
    }

    /// Panneau "Démarche" : trace du pipeline pour une carte choisie.
    fn fenetre_demarche(&mut self, ctx: &egui::Context) {
        let Self {
            cartes,
            carte_demarche,
            ..
        } = self;

        egui::Window::new("Démarche")
            .default_pos(egui::pos2(POS_DEMARCHE.0, POS_DEMARCHE.1))
            .default_open(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Carte :");
                    ui.add(
                        egui::DragValue::new(carte_demarche)
                            .speed(1)
                            .range(1..=cartes.len() as u32),
                    );
                });

                let Some(carte) = cartes.iter().find(|c| c.id == *carte_demarche) else {
                    ui.monospace("carte inconnue");
                    return;
                };

                match evaluer_equation_demarche(&carte.equation, carte.entree) {
                    Ok((valeur, d)) => {
                        champ_demarche(ui, "Normalisée", "demarche_normalisee", &d.normalisee);
                        champ_demarche(ui, "Jetons", "demarche_jetons", &d.jetons);
                        champ_demarche(ui, "RPN", "demarche_rpn", &d.rpn);
                        champ_demarche(ui, "Valeur", "demarche_valeur", &format_valeur(valeur));
                    }
                    Err(e) => {
                        ui.colored_label(ui.visuals().error_fg_color, e.to_string());
                    }
                }
            });
    }
}

/* ------------------------ Briques de la vue ------------------------ */

fn position_carte(id: u32) -> (f32, f32) {
    POS_CARTES
        .iter()
        .find(|(i, _)| *i == id)
        .map(|(_, p)| *p)
        .unwrap_or((265.0, 162.0))
}

fn ui_carte(
    ui: &mut egui::Ui,
    carte: &mut Carte,
    ancrages: &mut HashMap<String, (f32, f32)>,
) -> bool {
    let mut changement = false;

    egui::Frame::group(ui.style())
        .fill(ui.visuals().extreme_bg_color)
        .show(ui, |ui| {
            ui.set_width(LARGEUR_CARTE);

            ui.label(egui::RichText::new(&carte.etiquette).weak());
            ui.add_space(4.0);

            ui.label("Équation :");
            let resp = ui.add(
                egui::TextEdit::singleline(&mut carte.equation)
                    .desired_width(f32::INFINITY)
                    .hint_text("Ex: x^2 + 1")
                    .id_source(("equation", carte.id)),
            );
            if resp.changed() {
                changement = true;
            }

            ui.add_space(4.0);
            ui.label("Fonction suivante :");
            let suivante = match carte.suivante {
                Some(id) => format!("Fonction {id}"),
                None => "—".to_string(),
            };
            // câblage fixe : affiché, pas éditable
            ui.add_enabled(false, egui::Button::new(suivante));

            ui.add_space(6.0);
            if carte.erreur.is_empty() {
                ui.monospace(format!(
                    "f({}) = {}",
                    format_valeur(carte.entree),
                    format_valeur(carte.sortie)
                ));
            } else {
                ui.colored_label(ui.visuals().error_fg_color, &carte.erreur);
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                point_connexion(ui, format!("{}-entree", carte.id), ancrages);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    point_connexion(ui, format!("{}-sortie", carte.id), ancrages);
                });
            });
        });

    changement
}

fn boite_entree(
    ui: &mut egui::Ui,
    x_initial: &mut f64,
    ancrages: &mut HashMap<String, (f32, f32)>,
) -> bool {
    let mut changement = false;

    egui::Frame::group(ui.style())
        .fill(ui.visuals().extreme_bg_color)
        .show(ui, |ui| {
            ui.label(
                egui::RichText::new("Valeur initiale de x")
                    .strong()
                    .color(ORANGE_ENTREE),
            );
            ui.horizontal(|ui| {
                let resp = ui.add(egui::DragValue::new(x_initial).speed(0.1));
                if resp.changed() {
                    changement = true;
                }
                point_connexion(ui, "entree-x".to_string(), ancrages);
            });
        });

    changement
}

fn boite_sortie(ui: &mut egui::Ui, y_final: f64, ancrages: &mut HashMap<String, (f32, f32)>) {
    egui::Frame::group(ui.style())
        .fill(ui.visuals().extreme_bg_color)
        .show(ui, |ui| {
            ui.label(
                egui::RichText::new("Sortie finale y")
                    .strong()
                    .color(VERT_SORTIE),
            );
            ui.horizontal(|ui| {
                point_connexion(ui, "sortie-y".to_string(), ancrages);
                ui.monospace(format_valeur(y_final));
            });
        });
}

/// Petit disque de connexion ; son centre est enregistré dans `ancrages`
/// pour le tracé des liaisons à la frame suivante.
fn point_connexion(ui: &mut egui::Ui, id: String, ancrages: &mut HashMap<String, (f32, f32)>) {
    let (rect, _resp) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
    let centre = rect.center();
    ui.painter().circle(
        centre,
        5.0,
        BLEU_POINT,
        egui::Stroke::new(2.0, egui::Color32::WHITE),
    );
    ancrages.insert(id, (centre.x, centre.y));
}

/// Affichage compact d'une valeur (6 décimales max, zéros de queue ôtés).
fn format_valeur(v: f64) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    let s = format!("{v:.6}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
    ui.add_space(4.0);
    ui.label(format!("{titre} :"));
    egui::Frame::group(ui.style())
        .fill(ui.visuals().extreme_bg_color)
        .show(ui, |ui| {
            ui.push_id(id, |ui| {
                ui.set_min_width(320.0);
                ui.monospace(contenu);
            });
        });
}
