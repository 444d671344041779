//! Noyau d'évaluation d'équations à une variable
//!
//! Organisation interne :
//! - erreurs.rs   : taxonomie ErreurEval
//! - normalise.rs : réécritures (mult. implicite, unaires, substitution)
//! - jetons.rs    : tokenisation typée
//! - rpn.rs       : shunting-yard + évaluation postfixe
//! - eval.rs      : pipeline complet

pub mod erreurs;
pub mod eval;
pub mod jetons;
pub mod normalise;
pub mod rpn;

#[cfg(test)]
mod tests_proprietes;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreurs::ErreurEval;
pub use eval::{evaluer_equation, evaluer_equation_demarche, DemarcheNoyau};
