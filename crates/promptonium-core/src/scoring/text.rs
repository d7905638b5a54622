//! Text metrics shared by the evaluators.

/// Non-empty whitespace-delimited tokens.
pub fn word_count(text: &str) -> u32 {
    text.split_whitespace().count() as u32
}

/// Sentence terminators, with a floor of one for non-empty text.
pub fn sentence_count(text: &str) -> u32 {
    let mut count = 0u32;
    let mut in_terminator = false;
    for c in text.chars() {
        if matches!(c, '.' | '!' | '?') {
            if !in_terminator {
                count += 1;
            }
            in_terminator = true;
        } else {
            in_terminator = false;
        }
    }
    if count == 0 && !text.trim().is_empty() {
        1
    } else {
        count
    }
}

/// Vowel-group syllable estimate for one word. Never less than one.
pub fn syllables(word: &str) -> u32 {
    let letters: Vec<char> = word
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if letters.is_empty() {
        return 1;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut count = 0u32;
    let mut prev_vowel = false;
    for &c in &letters {
        let v = is_vowel(c);
        if v && !prev_vowel {
            count += 1;
        }
        prev_vowel = v;
    }

    // silent trailing "e" ("make"), but not "le" ("table")
    let n = letters.len();
    if count > 1 && letters[n - 1] == 'e' && !(n >= 2 && letters[n - 2] == 'l') {
        count -= 1;
    }
    count.max(1)
}

/// Flesch-Kincaid grade level. Zero for empty text.
pub fn flesch_kincaid_grade(text: &str) -> f64 {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return 0.0;
    }
    let word_n = words.len() as f64;
    let sentence_n = sentence_count(text) as f64;
    let syllable_n: u32 = words.iter().map(|w| syllables(w)).sum();
    0.39 * (word_n / sentence_n) + 11.8 * (syllable_n as f64 / word_n) - 15.59
}

/// Prompt complexity: words, sentence marks, brackets and quotes, halved and
/// capped at 100.
pub fn complexity_score(prompt: &str) -> f64 {
    let words = word_count(prompt) as f64;
    let sentence_marks = prompt.chars().filter(|c| matches!(c, '.' | '!' | '?')).count() as f64;
    let brackets = prompt
        .chars()
        .filter(|c| matches!(c, '(' | ')' | '{' | '}' | '[' | ']'))
        .count() as f64;
    let quotes = prompt.chars().filter(|c| matches!(c, '"' | '\'')).count() as f64;
    ((words + sentence_marks + brackets + quotes) / 2.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_count_ignores_repeated_whitespace() {
        assert_eq!(word_count("write me   a story"), 4);
        assert_eq!(word_count("  \t\n "), 0);
        assert_eq!(word_count("one\ntwo\tthree"), 3);
    }

    #[test]
    fn syllable_estimates() {
        assert_eq!(syllables("cat"), 1);
        assert_eq!(syllables("make"), 1);
        assert_eq!(syllables("table"), 2);
        assert_eq!(syllables("detective"), 3);
        assert_eq!(syllables("42"), 1);
    }

    #[test]
    fn sentence_count_collapses_runs() {
        assert_eq!(sentence_count("Hi!! How are you?"), 2);
        assert_eq!(sentence_count("no terminator"), 1);
        assert_eq!(sentence_count(""), 0);
    }

    #[test]
    fn grade_is_zero_for_empty_text() {
        assert_eq!(flesch_kincaid_grade(""), 0.0);
        assert!(flesch_kincaid_grade("The cat sat on the mat.") < 3.0);
    }

    #[test]
    fn complexity_is_capped() {
        assert_eq!(complexity_score("a (b) \"c\"."), (3.0 + 1.0 + 2.0 + 2.0) / 2.0);
        let long = "word ".repeat(500);
        assert_eq!(complexity_score(&long), 100.0);
    }
}
