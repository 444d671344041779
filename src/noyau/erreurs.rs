// src/noyau/erreurs.rs
//
// Taxonomie d'erreurs du noyau.
// Une évaluation échoue d'une seule de ces trois façons ; l'échec remonte
// par `?` depuis le point de détection, jamais de rattrapage local.

use thiserror::Error;

#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErreurEval {
    /// Tokenisation vide, symbole inconnu, ou pile d'évaluation
    /// incohérente (trop ou pas assez d'opérandes).
    #[error("équation invalide")]
    EquationInvalide,

    /// ')' sans '(' correspondante, ou '(' restée sur la pile en fin
    /// de conversion. Couvre les deux sens du déséquilibre.
    #[error("parenthèses non appariées")]
    ParenthesesNonAppariees,

    /// '/' binaire avec opérande droite nulle.
    #[error("division par zéro")]
    DivisionParZero,
}

pub type Resultat<T> = Result<T, ErreurEval>;
