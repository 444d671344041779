// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> valeur
//
// Règles:
// - Précédences : + - = 1 ; * / = 2 ; ^ = 3 ; u+ u- = 4
//   (le signe bat l'exposant en précédence mais l'associativité droite
//    de ^ donne bien -x^2 == -(x^2) via la réécriture "0 - x")
// - Associativité : + - * / à gauche ; ^ et les unaires à droite
// - ')' dépile jusqu'à '(' ; pile vidée sans '(' => parenthèses non appariées
// - en fin d'entrée, une parenthèse restante sur la pile => même erreur

use super::erreurs::{ErreurEval, Resultat};
use super::jetons::Jeton;

fn precedence(j: &Jeton) -> i32 {
    match j {
        Jeton::Plus | Jeton::Minus => 1,
        Jeton::Star | Jeton::Slash => 2,
        Jeton::Caret => 3,
        Jeton::UPlus | Jeton::UMinus => 4,
        _ => 0,
    }
}

fn est_assoc_droite(j: &Jeton) -> bool {
    matches!(j, Jeton::Caret | Jeton::UPlus | Jeton::UMinus)
}

/// Convertit une suite de jetons (infixe) en RPN (notation polonaise inversée).
///
/// Exemple:
///   jetons: [Num(2), Caret, UMinus, Num(2)]
///   rpn:    [Num(2), Num(2), UMinus, Caret]
pub fn en_rpn(jetons: &[Jeton]) -> Resultat<Vec<Jeton>> {
    let mut out: Vec<Jeton> = Vec::with_capacity(jetons.len());
    let mut ops: Vec<Jeton> = Vec::new();

    for jeton in jetons.iter().copied() {
        match jeton {
            Jeton::Num(_) => out.push(jeton),

            Jeton::LPar => ops.push(jeton),

            Jeton::RPar => {
                // dépile jusqu'à '('
                loop {
                    match ops.pop() {
                        Some(Jeton::LPar) => break,
                        Some(op) => out.push(op),
                        None => return Err(ErreurEval::ParenthesesNonAppariees),
                    }
                }
            }

            _ => {
                // opérateur (binaire ou unaire) : dépile tant que
                // - on n'est pas bloqué par '('
                // - et la précédence/associativité exige de sortir le sommet
                while let Some(top) = ops.last() {
                    if matches!(top, Jeton::LPar) {
                        break;
                    }

                    let p_top = precedence(top);
                    let p_jeton = precedence(&jeton);

                    let doit_sortir = if est_assoc_droite(&jeton) {
                        p_top > p_jeton
                    } else {
                        p_top >= p_jeton
                    };

                    if doit_sortir {
                        out.push(ops.pop().unwrap());
                    } else {
                        break;
                    }
                }

                ops.push(jeton);
            }
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Jeton::LPar | Jeton::RPar) {
            return Err(ErreurEval::ParenthesesNonAppariees);
        }
        out.push(op);
    }

    Ok(out)
}

/// Réduit une RPN à une valeur unique.
///
/// - un unaire consomme 1 opérande, un binaire en consomme 2 (b puis a)
/// - pile en sous-nombre => EquationInvalide
/// - '/' avec b == 0 => DivisionParZero
/// - en fin de flux la pile doit contenir EXACTEMENT une valeur
pub fn evaluer_rpn(rpn: &[Jeton]) -> Resultat<f64> {
    let mut pile: Vec<f64> = Vec::new();

    for jeton in rpn.iter().copied() {
        match jeton {
            Jeton::Num(v) => pile.push(v),

            Jeton::UPlus | Jeton::UMinus => {
                let a = pile.pop().ok_or(ErreurEval::EquationInvalide)?;
                pile.push(if matches!(jeton, Jeton::UMinus) { -a } else { a });
            }

            Jeton::Plus | Jeton::Minus | Jeton::Star | Jeton::Slash | Jeton::Caret => {
                let b = pile.pop().ok_or(ErreurEval::EquationInvalide)?;
                let a = pile.pop().ok_or(ErreurEval::EquationInvalide)?;

                let v = match jeton {
                    Jeton::Plus => a + b,
                    Jeton::Minus => a - b,
                    Jeton::Star => a * b,
                    Jeton::Slash => {
                        if b == 0.0 {
                            return Err(ErreurEval::DivisionParZero);
                        }
                        a / b
                    }
                    Jeton::Caret => a.powf(b),
                    _ => unreachable!(),
                };

                pile.push(v);
            }

            // une parenthèse n'a rien à faire dans une RPN
            Jeton::LPar | Jeton::RPar => return Err(ErreurEval::EquationInvalide),
        }
    }

    if pile.len() != 1 {
        return Err(ErreurEval::EquationInvalide);
    }
    Ok(pile.pop().unwrap())
}
