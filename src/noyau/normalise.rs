// src/noyau/normalise.rs
//
// Normalisation : chaîne brute + valeur de x -> chaîne "prête à tokeniser".
//
// L'ordre des passes est contractuel :
//   0) X -> x
//   1) multiplication implicite : 2x -> 2*x, 2( -> 2*(, )( -> )*(, )2 -> )*2
//   2) espacement des symboles -> flux de mots séparés par des espaces
//   3) réécriture des signes unaires collés à x : -x -> 0 - x  (+x pareil)
//   4) substitution de x par la valeur
//
// Balayages caractère/mot explicites, pas de regex.
// Cette étape n'échoue JAMAIS : une entrée absurde sort absurde et
// c'est la tokenisation/conversion/évaluation qui la refusera.

/// Normalise `equation` et substitue `x`.
/// Sortie : mots séparés par un espace simple, sans espace de tête/queue.
pub fn normaliser(equation: &str, x: f64) -> String {
    let s = variable_minuscule(equation);
    let s = mult_implicite(&s);
    let mots = espacer(&s);
    let mots = reecrire_unaires(mots);
    substituer(mots, x)
}

/// Le symbole de variable est accepté en majuscule ou minuscule.
fn variable_minuscule(s: &str) -> String {
    s.chars().map(|c| if c == 'X' { 'x' } else { c }).collect()
}

/// Insère le '*' des multiplications implicites.
/// Les insertions ne créent pas de nouvelle adjacence : un seul balayage suffit.
fn mult_implicite(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 8);

    for (i, &c) in chars.iter().enumerate() {
        out.push(c);

        let Some(&suiv) = chars.get(i + 1) else {
            continue;
        };

        // chiffre puis x ou '('  :  2x, 2(
        let apres_chiffre = c.is_ascii_digit() && (suiv == 'x' || suiv == '(');
        // ')' puis '(' ou chiffre  :  )( , )2
        let apres_fermante = c == ')' && (suiv == '(' || suiv.is_ascii_digit());

        if apres_chiffre || apres_fermante {
            out.push('*');
        }
    }

    out
}

/// Entoure chaque opérateur/parenthèse d'espaces puis découpe en mots.
fn espacer(s: &str) -> Vec<String> {
    let mut tampon = String::with_capacity(s.len() * 2);
    for c in s.chars() {
        if matches!(c, '+' | '-' | '*' | '/' | '^' | '(' | ')') {
            tampon.push(' ');
            tampon.push(c);
            tampon.push(' ');
        } else {
            tampon.push(c);
        }
    }
    tampon.split_whitespace().map(str::to_string).collect()
}

fn est_operateur_mot(m: &str) -> bool {
    matches!(m, "+" | "-" | "*" | "/" | "^")
}

/// "-x" / "+x" en tête de flux, ou juste après un opérateur ou '(',
/// deviennent "0 - x" / "0 + x".
/// Le contexte se lit sur la séquence ORIGINALE (les "0" insérés ne
/// doivent pas décaler la détection des signes suivants).
fn reecrire_unaires(mots: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(mots.len() + 2);

    for i in 0..mots.len() {
        let mot = &mots[i];

        let est_signe = mot == "+" || mot == "-";
        let vise_x = mots.get(i + 1).is_some_and(|m| m == "x");
        let contexte = i == 0 || est_operateur_mot(&mots[i - 1]) || mots[i - 1] == "(";

        if est_signe && vise_x && contexte {
            out.push("0".to_string());
        }
        out.push(mot.clone());
    }

    out
}

/// Remplace chaque occurrence de 'x' par la valeur (Display de f64 :
/// représentation la plus courte qui re-parse à l'identique).
fn substituer(mots: Vec<String>, x: f64) -> String {
    let valeur = x.to_string();

    let mots: Vec<String> = mots
        .into_iter()
        .map(|m| {
            if m.contains('x') {
                m.replace('x', &valeur)
            } else {
                m
            }
        })
        .collect();

    mots.join(" ")
}
