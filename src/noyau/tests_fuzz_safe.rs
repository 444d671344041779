//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - sur une expression bien formée, la seule erreur admise est la
//!   division par zéro
//! - sur une soupe de caractères, on exige juste : pas de panique,
//!   et deux appels identiques rendent le même résultat

use std::time::{Duration, Instant};

use super::erreurs::ErreurEval;
use super::eval::evaluer_equation;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d'expressions bien formées ------------------------ */

fn gen_atome(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => "x".to_string(),
        1 => "0.5".to_string(),
        2 => "2.5".to_string(),
        _ => format!("{}", rng.pick(10)),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atome(rng);
    }

    match rng.pick(8) {
        0 => gen_atome(rng),
        1 => format!("({}+{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        2 => format!("({}-{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => format!("({}*{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        4 => format!("({}/{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        5 => format!("-({})", gen_expr(rng, depth - 1)),
        // exposant entier borné : pas de NaN par base négative + exposant fractionnaire
        6 => format!("({})^{}", gen_expr(rng, depth - 1), rng.pick(4)),
        _ => {
            if rng.coin() {
                "-x".to_string()
            } else {
                "+x".to_string()
            }
        }
    }
}

/// Soupe de caractères dans l'alphabet du noyau (souvent malformée, exprès).
fn gen_soupe(rng: &mut Rng) -> String {
    const ALPHABET: &[u8] = b"0123456789.x+-*/^()  ";
    let longueur = 1 + rng.pick(24) as usize;
    (0..longueur)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize] as char)
        .collect()
}

fn memes_resultats(a: &Result<f64, ErreurEval>, b: &Result<f64, ErreurEval>) -> bool {
    match (a, b) {
        (Ok(x), Ok(y)) => x.to_bits() == y.to_bits(),
        (Err(x), Err(y)) => x == y,
        _ => false,
    }
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_expressions_bien_formees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    // Même seed => mêmes expressions => mêmes sorties (déterminisme)
    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_div = 0usize;

    for _ in 0..150 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);

        for &x in &[-3.0, -0.5, 0.0, 1.0, 2.5] {
            let r1 = evaluer_equation(&expr, x);
            let r2 = evaluer_equation(&expr, x);
            assert!(
                memes_resultats(&r1, &r2),
                "résultat instable: expr={expr:?} x={x}"
            );

            match r1 {
                Ok(_) => seen_ok += 1,
                Err(ErreurEval::DivisionParZero) => seen_div += 1,
                Err(e) => panic!("erreur non attendue: expr={expr:?} x={x} err={e}"),
            }
        }
    }

    // On veut voir un mix, sinon le fuzz ne balaye rien.
    assert!(seen_ok > 100, "trop peu de succès: {seen_ok}");
    assert!(seen_div > 0, "aucune division par zéro vue: fuzz trop sage");
}

#[test]
fn fuzz_safe_soupe_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0xBADC0DE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..400 {
        budget(t0, max);

        let soupe = gen_soupe(&mut rng);

        // contrat minimal : jamais de panique, toujours déterministe
        let r1 = evaluer_equation(&soupe, 2.0);
        let r2 = evaluer_equation(&soupe, 2.0);
        assert!(
            memes_resultats(&r1, &r2),
            "résultat instable: soupe={soupe:?}"
        );

        match r1 {
            Ok(_) => seen_ok += 1,
            Err(_) => seen_err += 1,
        }
    }

    assert!(seen_err > 0, "aucune soupe refusée: alphabet trop sage");
    assert!(seen_ok > 0, "aucune soupe acceptée: générateur trop brutal");
}

#[test]
fn fuzz_safe_imbrication_bornee() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0xFEED_u64);

    for profondeur in [6, 8, 10] {
        budget(t0, max);

        let expr = gen_expr(&mut rng, profondeur);
        // pas d'assert sur la valeur : on vérifie que la profondeur
        // ne coûte que du tas (pas de récursion dans le pipeline)
        let _ = evaluer_equation(&expr, 1.5);
    }
}
