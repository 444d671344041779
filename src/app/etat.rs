//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir la chaîne de fonctions (cartes, valeur initiale,
//! sortie finale) et la propagation d'une valeur le long de la chaîne.
//! Le seul contact avec le noyau est `evaluer_equation`.
//!
//! Contrats :
//! - Actions déterministes, sans effet de bord caché.
//! - Une évaluation qui échoue (ou qui rend un non-fini) GÈLE la
//!   dernière sortie valide de la carte : jamais de NaN/Infini propagé
//!   en aval.
//! - Garde-fou anti-cycle : au plus une visite par carte.

use std::collections::HashMap;

use crate::noyau::evaluer_equation;

/// Valeur initiale de x au lancement.
pub const X_INITIAL_DEFAUT: f64 = 2.0;

/// Une carte de fonction : une équation en x, câblée vers la suivante.
#[derive(Clone, Debug)]
pub struct Carte {
    pub id: u32,
    pub etiquette: String,
    pub equation: String,

    /// Carte alimentée par notre sortie. None = carte terminale,
    /// sa sortie devient y_final.
    pub suivante: Option<u32>,

    pub entree: f64,
    pub sortie: f64,

    /// Message affiché sous la carte ("" = pas d'erreur).
    pub erreur: String,
}

impl Carte {
    fn nouvelle(id: u32, equation: &str, suivante: Option<u32>) -> Self {
        Self {
            id,
            etiquette: format!("Fonction : {id}"),
            equation: equation.to_string(),
            suivante,
            entree: 0.0,
            sortie: 0.0,
            erreur: String::new(),
        }
    }
}

/// Câblage par défaut : 1 -> 2 -> 4 -> 5 -> 3 -> sortie.
fn cartes_par_defaut() -> Vec<Carte> {
    vec![
        Carte::nouvelle(1, "x^2", Some(2)),
        Carte::nouvelle(2, "2x+4", Some(4)),
        Carte::nouvelle(3, "x^2+20", None),
        Carte::nouvelle(4, "x-2", Some(5)),
        Carte::nouvelle(5, "x/2", Some(3)),
    ]
}

#[derive(Clone, Debug)]
pub struct AppChaine {
    // --- chaîne ---
    pub x_initial: f64,
    pub cartes: Vec<Carte>,
    pub y_final: f64,

    // --- vue ---
    /// Centres des points de connexion mesurés à la frame précédente
    /// (clé: "<id>-entree" / "<id>-sortie" / "entree-x" / "sortie-y").
    pub ancrages: HashMap<String, (f32, f32)>,

    /// Carte affichée dans le panneau "Démarche".
    pub carte_demarche: u32,

    /// Une entrée a changé : propager au prochain passage.
    pub recalculer: bool,
}

impl Default for AppChaine {
    fn default() -> Self {
        Self {
            x_initial: X_INITIAL_DEFAUT,
            cartes: cartes_par_defaut(),
            y_final: 0.0,
            ancrages: HashMap::new(),
            carte_demarche: 1,
            recalculer: true, // première frame : tout calculer
        }
    }
}

impl AppChaine {
    /// Remise à zéro totale (équations + valeur initiale par défaut).
    pub fn reinitialiser(&mut self) {
        self.x_initial = X_INITIAL_DEFAUT;
        self.cartes = cartes_par_defaut();
        self.y_final = 0.0;
        self.recalculer = true;
    }

    /// Tête de chaîne : la carte qu'aucune autre ne désigne comme
    /// suivante. Repli : la première carte.
    pub fn premiere_carte(&self) -> Option<u32> {
        let cibles: Vec<u32> = self.cartes.iter().filter_map(|c| c.suivante).collect();
        self.cartes
            .iter()
            .map(|c| c.id)
            .find(|id| !cibles.contains(id))
            .or_else(|| self.cartes.first().map(|c| c.id))
    }

    /// Propage x_initial le long de la chaîne.
    ///
    /// Carte par carte : entree <- valeur courante, évaluation, puis
    /// la sortie (fraîche, ou gelée si l'évaluation a échoué) alimente
    /// la suivante. La sortie de la carte terminale devient y_final.
    pub fn propager(&mut self) {
        let Some(debut) = self.premiere_carte() else {
            self.y_final = 0.0;
            return;
        };

        let mut valeur = self.x_initial;
        let mut courant = Some(debut);
        let mut pas = 0usize;

        while let Some(id) = courant {
            pas += 1;
            if pas > self.cartes.len() {
                break; // câblage cyclique : on s'arrête net
            }

            let Some(carte) = self.cartes.iter_mut().find(|c| c.id == id) else {
                break; // suivante inexistante : la chaîne s'arrête là
            };

            carte.entree = valeur;

            match evaluer_equation(&carte.equation, valeur) {
                Ok(v) if v.is_finite() => {
                    carte.sortie = v;
                    carte.erreur.clear();
                }
                Ok(_) => {
                    // NaN/Infini : on gèle la sortie précédente
                    carte.erreur = "résultat non fini".to_string();
                }
                Err(e) => {
                    carte.erreur = e.to_string();
                }
            }

            valeur = carte.sortie;
            courant = carte.suivante;
        }

        self.y_final = valeur;
    }

    /// Liste de câblage pour la vue : (point de départ, point d'arrivée).
    pub fn connexions(&self) -> Vec<(String, String)> {
        let mut liens = Vec::with_capacity(self.cartes.len() + 1);

        if let Some(debut) = self.premiere_carte() {
            liens.push(("entree-x".to_string(), format!("{debut}-entree")));
        }

        for carte in &self.cartes {
            let depart = format!("{}-sortie", carte.id);
            match carte.suivante {
                Some(s) => liens.push((depart, format!("{s}-entree"))),
                None => liens.push((depart, "sortie-y".to_string())),
            }
        }

        liens
    }

    pub fn carte(&self, id: u32) -> Option<&Carte> {
        self.cartes.iter().find(|c| c.id == id)
    }
}
