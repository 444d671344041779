//! Tests de propriétés (campagne) : invariants du pipeline + limites contrôlées.
//!
//! But : vérifier les contrats sur des familles d'entrées, sans faire
//! chauffer la machine.
//! - budget temps global
//! - tailles bornées (profondeur de parenthésage, longueur)
//! - identité / idempotence au bit près (Display de f64 re-parse exact)

use std::time::{Duration, Instant};

use super::erreurs::ErreurEval;
use super::eval::evaluer_equation;

fn ok(expr: &str, x: f64) -> f64 {
    evaluer_equation(expr, x).unwrap_or_else(|e| panic!("expr={expr:?} x={x} : {e}"))
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Identité / pureté ------------------------ */

#[test]
fn identite_sur_grille_de_valeurs() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let valeurs = [
        -1e9, -12345.678, -3.0, -1.0, -0.5, -0.1, 0.0, 0.1, 0.5, 1.0, 2.0, 3.5, 1234.5678, 1e9,
    ];

    for &v in &valeurs {
        budget(t0, max);
        // la substitution passe par Display : re-parse exact garanti
        assert_eq!(ok("x", v).to_bits(), v.to_bits(), "v={v}");
    }
}

#[test]
fn carre_sur_grille_de_valeurs() {
    for &v in &[-4.0, -1.5, -1.0, 0.0, 0.5, 1.0, 2.0, 3.0, 16.0] {
        assert_eq!(ok("x^2", v), v * v, "v={v}");
    }
}

#[test]
fn idempotence_au_bit_pres() {
    let exprs = ["x", "x^2", "2*x + 3*x^2 - 4", "(x+1)(x+2)", "x^-2", "-x^2"];
    for expr in exprs {
        for &v in &[-2.5, 0.5, 2.0, 7.0] {
            let a = evaluer_equation(expr, v);
            let b = evaluer_equation(expr, v);
            match (a, b) {
                (Ok(a), Ok(b)) => assert_eq!(a.to_bits(), b.to_bits(), "expr={expr:?} v={v}"),
                (Err(a), Err(b)) => assert_eq!(a, b, "expr={expr:?} v={v}"),
                _ => panic!("résultat instable: expr={expr:?} v={v}"),
            }
        }
    }
}

/* ------------------------ Précédence / associativité ------------------------ */

#[test]
fn exposant_associatif_a_droite() {
    assert_eq!(ok("2^3^2", 0.0), 512.0);
    assert_eq!(ok("x^3^2", 2.0), 512.0);
}

#[test]
fn soustraction_division_associatives_a_gauche() {
    assert_eq!(ok("x - 1 - 2", 10.0), 7.0);
    assert_eq!(ok("x / 4 / 2", 8.0), 1.0);
}

#[test]
fn le_signe_colle_plus_fort_que_l_exposant_via_reecriture() {
    // -x^2 == -(x^2) : garanti par la réécriture "0 - x" + précédence de ^
    for &v in &[1.0, 2.0, 3.0, 5.0] {
        assert_eq!(ok("-x^2", v), -(v * v), "v={v}");
        assert_eq!(ok("(-x)^2", v), v * v, "v={v}");
    }
}

#[test]
fn exposants_negatifs() {
    assert_eq!(ok("x^-2", 2.0), 0.25);
    assert_eq!(ok("x^-1", 4.0), 0.25);
    assert_eq!(ok("2^-3", 0.0), 0.125);
}

/* ------------------------ Multiplication implicite ------------------------ */

#[test]
fn multiplication_implicite_toutes_formes() {
    assert_eq!(ok("2x", 3.0), 6.0);
    assert_eq!(ok("2(x+1)", 3.0), 8.0);
    assert_eq!(ok("(x+1)(x+2)", 2.0), 12.0);
    assert_eq!(ok("(x+1)2", 3.0), 8.0);
    assert_eq!(ok("3x^2", 2.0), 12.0);
}

/* ------------------------ Taxonomie d'erreurs ------------------------ */

#[test]
fn chaque_erreur_garde_sa_categorie() {
    let invalides = ["", "   ", "x +", "* x", "x * * 2", "()", "abc", "x .. 2"];
    for expr in invalides {
        assert_eq!(
            evaluer_equation(expr, 3.0).unwrap_err(),
            ErreurEval::EquationInvalide,
            "expr={expr:?}"
        );
    }

    let desequilibrees = ["(x", "x)", "((x+1)", "(x+1))", "(x+1)) + ("];
    for expr in desequilibrees {
        assert_eq!(
            evaluer_equation(expr, 3.0).unwrap_err(),
            ErreurEval::ParenthesesNonAppariees,
            "expr={expr:?}"
        );
    }

    let divisions = [("x/0", 5.0), ("1/(x-3)", 3.0), ("x/(x-x)", 2.0)];
    for (expr, v) in divisions {
        assert_eq!(
            evaluer_equation(expr, v).unwrap_err(),
            ErreurEval::DivisionParZero,
            "expr={expr:?}"
        );
    }
}

/* ------------------------ Limites contrôlées ------------------------ */

#[test]
fn parenthesage_profond_sans_debordement_de_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    // tout est itératif (Vec), la profondeur coûte du tas, pas de la pile
    let n = 2000;
    let expr = format!("{}x{}", "(".repeat(n), ")".repeat(n));

    budget(t0, max);
    assert_eq!(ok(&expr, 7.0), 7.0);
}

#[test]
fn somme_longue_a_plat() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    let n = 800;
    let expr = vec!["x"; n].join(" + ");

    budget(t0, max);
    assert_eq!(ok(&expr, 0.5), n as f64 * 0.5);
}

#[test]
fn resultat_infini_admis_mais_jamais_par_division() {
    // le débordement de ^ peut rendre l'infini : admis par le contrat
    let v = ok("x^x", 1e6);
    assert!(v.is_infinite());

    // l'infini "par division par zéro" est, lui, refusé explicitement
    assert_eq!(
        evaluer_equation("1/(x-x)", 1e6).unwrap_err(),
        ErreurEval::DivisionParZero
    );
}
