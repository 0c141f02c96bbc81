//! Spelling-based rhyme keys for words missing from the dictionary.
//!
//! Approximates only the final syllable: the last vowel group (with vowel
//! teams, silent `e` and r-colouring normalised) plus the consonants after
//! it. Pure and deterministic, so the same word always yields the same key.

use super::PhoneticKey;

/// Consonants after which a plural `s` or past-tense `d` is devoiced.
const VOICELESS: &[&str] = &["P", "T", "K", "F", "TH", "S", "SH", "CH"];

/// How the written word ends after the last vowel group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ending {
    /// No silent `e`.
    Plain,
    /// Consonant cluster followed by a silent `e` (dance, edge).
    Soft,
    /// Single vowel, single consonant, silent `e` (rose, time).
    Magic,
}

/// Approximate the rhyme key of a word from its spelling.
///
/// Returns `None` for words without ASCII letters, and for words whose
/// letters map to no phones at all (a bare `h` or `y`).
pub fn approximate_key(word: &str) -> Option<PhoneticKey> {
    let letters: Vec<char> = word
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if letters.is_empty() {
        return None;
    }

    let phones = past_tense(&letters).unwrap_or_else(|| final_syllable(&letters));
    let key = PhoneticKey::new(phones);
    (!key.phones().is_empty()).then_some(key)
}

fn is_vowel_at(letters: &[char], i: usize) -> bool {
    match letters[i] {
        'a' | 'e' | 'i' | 'o' => true,
        'u' => i == 0 || letters[i - 1] != 'q',
        // consonantal before a vowel (player, beyond) and word-initially (yes)
        'y' => i > 0 && !matches!(letters.get(i + 1), Some('a' | 'e' | 'i' | 'o' | 'u')),
        // second half of a vowel team (new, snow, law)
        'w' => {
            i > 0
                && matches!(letters[i - 1], 'a' | 'e' | 'o')
                && !matches!(letters.get(i + 1), Some('a' | 'e' | 'i' | 'o' | 'u'))
        }
        _ => false,
    }
}

/// Half-open ranges of consecutive vowel letters.
fn vowel_groups(letters: &[char]) -> Vec<(usize, usize)> {
    let mut groups = Vec::new();
    let mut i = 0;
    while i < letters.len() {
        if is_vowel_at(letters, i) {
            let start = i;
            while i < letters.len() && is_vowel_at(letters, i) {
                i += 1;
            }
            groups.push((start, i));
        } else {
            i += 1;
        }
    }
    groups
}

/// Regular `-ed` past tense: key of the stem plus `D`/`T`.
fn past_tense(letters: &[char]) -> Option<Vec<&'static str>> {
    let n = letters.len();
    if n <= 4 || letters[n - 2..] != ['e', 'd'] || matches!(letters[n - 3], 't' | 'd') {
        return None;
    }

    let mut stem = letters[..n - 2].to_vec();
    let stem_groups = vowel_groups(&stem);
    if stem_groups.is_empty() {
        return None;
    }

    // hoped -> hope, but stopped and rained keep their stems
    let m = stem.len();
    if stem_groups.len() == 1
        && m >= 2
        && !is_vowel_at(&stem, m - 1)
        && is_vowel_at(&stem, m - 2)
        && (m == 2 || !is_vowel_at(&stem, m - 3))
        && !matches!(stem[m - 1], 'w' | 'x')
    {
        stem.push('e');
    }

    let mut phones = final_syllable(&stem);
    let suffix = if phones.last().is_some_and(|p| VOICELESS.contains(p)) { "T" } else { "D" };
    phones.push(suffix);
    Some(phones)
}

fn final_syllable(letters: &[char]) -> Vec<&'static str> {
    let groups = vowel_groups(letters);
    let n = letters.len();

    if let [.., (prev_start, prev_end), (start, _)] = groups[..] {
        if start == n - 1 && letters[start] == 'e' {
            let between = &letters[prev_end..n - 1];
            if between.len() >= 2 && between.last() == Some(&'l') {
                return vec!["AH", "L"];
            }
            if between.len() == 1 && prev_end - prev_start == 1 {
                return magic(letters[prev_start], between[0]);
            }
            return syllable(&letters[..n - 1], Ending::Soft);
        }
    }

    syllable(letters, Ending::Plain)
}

/// Long vowel before a single consonant and silent `e`.
fn magic(vowel: char, consonant: char) -> Vec<&'static str> {
    if consonant == 'r' {
        return match vowel {
            'a' => vec!["EH", "R"],
            'e' => vec!["IH", "R"],
            'i' | 'y' => vec!["AY", "ER"],
            'o' => vec!["AO", "R"],
            _ => vec!["UH", "R"],
        };
    }

    let long = match vowel {
        'a' => "EY",
        'e' => "IY",
        'i' | 'y' => "AY",
        'o' => "OW",
        'u' => "UW",
        _ => "AH",
    };
    let mut phones = vec![long];
    phones.extend(coda_phones(&[consonant], Ending::Magic));
    phones
}

fn syllable(letters: &[char], ending: Ending) -> Vec<&'static str> {
    let groups = vowel_groups(letters);
    let Some(&(start, end)) = groups.last() else {
        return coda_phones(letters, ending);
    };

    let group: String = letters[start..end].iter().collect();
    let (vowel, skip) = vowel_phone(&group, &letters[end..], groups.len() == 1);
    let mut coda = &letters[end + skip..];
    let mut phones = Vec::with_capacity(coda.len() + 2);

    if skip == 0 && coda.first() == Some(&'r') {
        match group.as_str() {
            "a" => phones.extend(["AA", "R"]),
            "o" | "oo" | "oa" | "ou" => phones.extend(["AO", "R"]),
            "e" | "i" | "u" | "y" => phones.push("ER"),
            "ea" | "ee" | "ei" | "ie" => phones.extend(["IH", "R"]),
            "ai" => phones.extend(["EH", "R"]),
            _ => phones.extend([vowel, "R"]),
        }
        coda = &coda[1..];
        if coda.first() == Some(&'r') {
            coda = &coda[1..];
        }
    } else {
        phones.push(vowel);
    }

    phones.extend(coda_phones(coda, ending));
    phones
}

/// Vowel phone for a vowel group, and how many coda letters it absorbs.
fn vowel_phone(group: &str, coda: &[char], monosyllable: bool) -> (&'static str, usize) {
    let at_end = coda.is_empty();
    let starts = |s: &str| coda.len() >= s.len() && coda.iter().copied().zip(s.chars()).all(|(a, b)| a == b);

    if starts("gh") {
        match group {
            "ei" | "ey" => return ("EY", 2),
            "au" => return ("AO", 2),
            // enough, rough: the gh is sounded
            "ou" if coda.len() == 2 => return ("AH", 0),
            "ou" => return ("AO", 2),
            g if g.ends_with('i') => return ("AY", 2),
            _ => {}
        }
    }

    let vowel = match group {
        "ee" | "ea" | "ei" => "IY",
        "ie" if at_end && monosyllable => "AY",
        "ie" => "IY",
        "ey" if monosyllable => "EY",
        "ey" => "IY",
        "ai" | "ay" => "EY",
        "oa" | "oe" | "eau" => "OW",
        "oo" if starts("k") => "UH",
        "oo" | "ew" | "ue" | "ui" | "eu" => "UW",
        "ou" if at_end => "UW",
        "ou" => "AW",
        "ow" if at_end => "OW",
        "ow" => "AW",
        "au" | "aw" => "AO",
        "oi" | "oy" => "OY",
        "uy" | "ye" => "AY",
        "a" if at_end => "AH",
        "a" if starts("ll") || starts("lk") || starts("lt") => "AO",
        "a" => "AE",
        "e" if at_end => "IY",
        "e" => "EH",
        "i" if at_end => "IY",
        "i" if starts("nd") || starts("ld") => "AY",
        "i" => "IH",
        "o" if at_end || starts("ld") || starts("ll") => "OW",
        "o" => "AA",
        "u" if at_end => "UW",
        "u" => "AH",
        "y" if !at_end => "IH",
        "y" if monosyllable => "AY",
        "y" => "IY",
        _ => "AH",
    };
    (vowel, 0)
}

fn coda_phones(letters: &[char], ending: Ending) -> Vec<&'static str> {
    let n = letters.len();
    let mut phones: Vec<&'static str> = Vec::with_capacity(n);
    let mut i = 0;

    while i < n {
        let c = letters[i];
        let next = letters.get(i + 1).copied();
        let pair_ends_word = i + 2 == n;

        let step = match (c, next) {
            ('t', Some('c')) if letters.get(i + 2) == Some(&'h') => {
                phones.push("CH");
                3
            }
            ('c', Some('h')) => {
                phones.push("CH");
                2
            }
            ('s', Some('h')) => {
                phones.push("SH");
                2
            }
            ('t', Some('h')) => {
                phones.push("TH");
                2
            }
            ('p', Some('h')) => {
                phones.push("F");
                2
            }
            ('g', Some('h')) => {
                if i == 0 && pair_ends_word {
                    phones.push("F");
                }
                2
            }
            ('c', Some('k')) => {
                phones.push("K");
                2
            }
            ('n', Some('g')) if pair_ends_word && ending == Ending::Soft => {
                phones.extend(["N", "JH"]);
                2
            }
            ('n', Some('g')) => {
                phones.push("NG");
                2
            }
            ('n', Some('k')) => {
                phones.extend(["NG", "K"]);
                2
            }
            ('d', Some('g')) => {
                phones.push("JH");
                2
            }
            ('m', Some('b' | 'n')) | ('g', Some('n')) if pair_ends_word => {
                phones.push(if c == 'm' { "M" } else { "N" });
                2
            }
            ('w', Some('h')) => {
                phones.push("W");
                2
            }
            ('q', Some('u')) => {
                phones.extend(["K", "W"]);
                2
            }
            ('s', Some('s')) => {
                phones.push("S");
                2
            }
            ('s', _) => {
                let sound = match phones.last() {
                    _ if ending == Ending::Soft && i + 1 == n => "S",
                    Some(p) if VOICELESS.contains(p) => "S",
                    Some(_) => "Z",
                    None if ending == Ending::Magic => "Z",
                    None => "S",
                };
                phones.push(sound);
                1
            }
            (a, Some(b)) if a == b => {
                phones.extend_from_slice(single(a, pair_ends_word, ending));
                2
            }
            (a, _) => {
                phones.extend_from_slice(single(a, i + 1 == n, ending));
                1
            }
        };
        i += step;
    }

    phones
}

fn single(c: char, last: bool, ending: Ending) -> &'static [&'static str] {
    match c {
        'b' => &["B"],
        'd' => &["D"],
        'f' => &["F"],
        'j' => &["JH"],
        'k' | 'q' => &["K"],
        'l' => &["L"],
        'm' => &["M"],
        'n' => &["N"],
        'p' => &["P"],
        'r' => &["R"],
        't' => &["T"],
        'v' => &["V"],
        'z' => &["Z"],
        'x' => &["K", "S"],
        'g' if last && ending != Ending::Plain => &["JH"],
        'g' => &["G"],
        'c' if last && ending != Ending::Plain => &["S"],
        'c' => &["K"],
        _ => &[],
    }
}
