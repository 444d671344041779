//! Noyau — évaluation (pipeline complet)
//!
//! normalise -> jetons -> RPN -> valeur
//!
//! Chaque appel est indépendant, sans état ni effet de bord : même
//! (équation, x) => même résultat, au bit près. Le noyau est donc
//! appelable depuis n'importe quel thread sans verrou.

use super::erreurs::Resultat;
use super::jetons::{format_jetons, tokeniser};
use super::normalise::normaliser;
use super::rpn::{en_rpn, evaluer_rpn};

/// Trace du pipeline (panneau "Démarche" de la vue).
#[derive(Default, Clone, Debug)]
pub struct DemarcheNoyau {
    pub normalisee: String,
    pub jetons: String,
    pub rpn: String,
}

/// API publique : évalue `equation` avec `x` substitué à la variable.
///
/// Retourne la valeur (finie ou infinie), ou une ErreurEval typée.
pub fn evaluer_equation(equation: &str, x: f64) -> Resultat<f64> {
    let normalisee = normaliser(equation, x);
    let jetons = tokeniser(&normalisee)?;
    let rpn = en_rpn(&jetons)?;
    evaluer_rpn(&rpn)
}

/// Variante instrumentée : même sémantique, plus la trace du pipeline.
pub fn evaluer_equation_demarche(equation: &str, x: f64) -> Resultat<(f64, DemarcheNoyau)> {
    let normalisee = normaliser(equation, x);
    let jetons = tokeniser(&normalisee)?;
    let rpn = en_rpn(&jetons)?;
    let valeur = evaluer_rpn(&rpn)?;

    let demarche = DemarcheNoyau {
        normalisee,
        jetons: format_jetons(&jetons),
        rpn: format_jetons(&rpn),
    };

    Ok((valeur, demarche))
}
