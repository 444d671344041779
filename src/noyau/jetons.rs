// src/noyau/jetons.rs

use super::erreurs::{ErreurEval, Resultat};

/// Jeton typé du flux normalisé.
///
/// Les signes unaires ont leurs propres variantes (UPlus/UMinus) :
/// la comparaison de précédences ne confond jamais `-` binaire et
/// `-` de signe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Jeton {
    Num(f64),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^

    UPlus,  // + unaire
    UMinus, // - unaire

    LPar,
    RPar,
}

impl Jeton {
    pub fn est_operateur(&self) -> bool {
        matches!(
            self,
            Jeton::Plus
                | Jeton::Minus
                | Jeton::Star
                | Jeton::Slash
                | Jeton::Caret
                | Jeton::UPlus
                | Jeton::UMinus
        )
    }
}

/// Tokenize une chaîne normalisée (mots séparés par des espaces).
///
/// - opérateurs + - * / ^ et parenthèses ( )
/// - nombres décimaux, signe de tête admis ("-2.5" : produit de la
///   substitution d'un x négatif)
/// - un `+`/`-` est unaire ssi il est le premier jeton, ou si le jeton
///   précédent est un opérateur ou '('
///
/// Flux vide ou mot inconnu => EquationInvalide.
pub fn tokeniser(s: &str) -> Resultat<Vec<Jeton>> {
    let mut out: Vec<Jeton> = Vec::new();

    for mot in s.split_whitespace() {
        let jeton = match mot {
            "+" => Jeton::Plus,
            "-" => Jeton::Minus,
            "*" => Jeton::Star,
            "/" => Jeton::Slash,
            "^" => Jeton::Caret,
            "(" => Jeton::LPar,
            ")" => Jeton::RPar,
            _ => Jeton::Num(lire_nombre(mot)?),
        };

        let jeton = match jeton {
            Jeton::Plus | Jeton::Minus if contexte_unaire(out.last()) => {
                if matches!(jeton, Jeton::Plus) {
                    Jeton::UPlus
                } else {
                    Jeton::UMinus
                }
            }
            j => j,
        };

        out.push(jeton);
    }

    if out.is_empty() {
        return Err(ErreurEval::EquationInvalide);
    }
    Ok(out)
}

fn contexte_unaire(precedent: Option<&Jeton>) -> bool {
    match precedent {
        None => true,
        Some(Jeton::LPar) => true,
        Some(j) => j.est_operateur(),
    }
}

/// Lecture stricte d'un nombre : chiffres, point, signe de tête.
/// On refuse tout mot alphabétique ("inf", "nan", identifiant resté
/// après substitution).
fn lire_nombre(mot: &str) -> Resultat<f64> {
    let admis = mot
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-'));
    if !admis {
        return Err(ErreurEval::EquationInvalide);
    }
    mot.parse::<f64>().map_err(|_| ErreurEval::EquationInvalide)
}

/// Format utilitaire (démarche/debug) : liste de jetons en texte.
pub fn format_jetons(jetons: &[Jeton]) -> String {
    let mut out = Vec::with_capacity(jetons.len());
    for j in jetons {
        let s = match j {
            Jeton::Num(v) => format!("{v}"),

            Jeton::Plus => "+".to_string(),
            Jeton::Minus => "-".to_string(),
            Jeton::Star => "*".to_string(),
            Jeton::Slash => "/".to_string(),
            Jeton::Caret => "^".to_string(),

            Jeton::UPlus => "u+".to_string(),
            Jeton::UMinus => "u-".to_string(),

            Jeton::LPar => "(".to_string(),
            Jeton::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
