// src/app.rs
//
// Chaîne de fonctions — module App (racine)
// -----------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppChaine (pour main.rs: use crate::app::AppChaine;)
// - Fournir l'impl eframe::App (compatible NATIF + WEB)
//
// Important:
// - La propagation se fait ICI, une fois par frame "sale" : la vue se
//   contente de lever `recalculer` quand une entrée change.

pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppChaine;`
pub use etat::AppChaine;

use eframe::egui;

impl eframe::App for AppChaine {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Raccourci clavier global minimal (safe natif + web) :
        // ESC = remise à zéro de la chaîne (équations + x par défaut).
        let esc = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if esc {
            self.reinitialiser();
        }

        // Une entrée a changé à la frame précédente : on propage AVANT
        // de peindre, la frame courante affiche donc des valeurs fraîches.
        if self.recalculer {
            self.propager();
            self.recalculer = false;
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui); // méthode publique (dans vue.rs)
        });
    }
}
