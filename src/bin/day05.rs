use std::io;
use std::io::prelude::*;

use tracing::{event, Level};
use tracing_subscriber::prelude::*;

type Predicate = fn(&[char]) -> bool;

const RULE_SET_A: [Predicate; 3] = [
    at_least_three_vowels,
    has_adjacent_repeat,
    has_no_forbidden_substring,
];

const RULE_SET_B: [Predicate; 2] = [has_repeated_pair, has_repeat_with_one_between];

fn at_least_three_vowels(line: &[char]) -> bool {
    line.iter()
        .filter(|ch| matches!(ch, 'a' | 'e' | 'i' | 'o' | 'u'))
        .count()
        >= 3
}

fn has_adjacent_repeat(line: &[char]) -> bool {
    for i in 0..line.len().saturating_sub(1) {
        if line[i] == line[i + 1] {
            return true;
        }
    }
    false
}

fn has_no_forbidden_substring(line: &[char]) -> bool {
    const FORBIDDEN: [[char; 2]; 4] = [['a', 'b'], ['c', 'd'], ['p', 'q'], ['x', 'y']];
    for i in 0..line.len().saturating_sub(1) {
        if FORBIDDEN.contains(&[line[i], line[i + 1]]) {
            return false;
        }
    }
    true
}

/// True if some two-character window occurs again starting at least two
/// positions later (i.e. the occurrences don't share a character).
fn has_repeated_pair(line: &[char]) -> bool {
    if line.len() < 4 {
        return false;
    }
    for i in 0..(line.len() - 3) {
        for j in (i + 2)..(line.len() - 1) {
            if line[i] == line[j] && line[i + 1] == line[j + 1] {
                return true;
            }
        }
    }
    false
}

fn has_repeat_with_one_between(line: &[char]) -> bool {
    for i in 0..line.len().saturating_sub(2) {
        if line[i] == line[i + 2] {
            return true;
        }
    }
    false
}

fn satisfies(rules: &[Predicate], line: &[char]) -> bool {
    rules.iter().all(|pred| pred(line))
}

#[cfg(test)]
fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Tally {
    part1: usize,
    part2: usize,
    scored: usize,
}

impl Tally {
    fn score(&mut self, line: &str) {
        let chars: Vec<char> = line.chars().collect();
        let a = satisfies(&RULE_SET_A, &chars);
        let b = satisfies(&RULE_SET_B, &chars);
        event!(Level::TRACE, "{}: rule set A {}, rule set B {}", line, a, b);
        if a {
            self.part1 += 1;
        }
        if b {
            self.part2 += 1;
        }
        self.scored += 1;
    }
}

/// Score lines until the input runs out or a blank line is seen.
fn tally<I, S>(lines: I) -> Tally
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut result = Tally::default();
    for line in lines {
        let line = line.as_ref().trim();
        if line.is_empty() {
            // stop on first empty line
            break;
        }
        result.score(line);
    }
    result
}

#[test]
fn test_at_least_three_vowels() {
    assert!(at_least_three_vowels(&chars("aei")));
    assert!(at_least_three_vowels(&chars("xazegov")));
    assert!(at_least_three_vowels(&chars("aeiouaeiouaeiou")));
    assert!(at_least_three_vowels(&chars("aaa")));
    assert!(!at_least_three_vowels(&chars("aa")));
    assert!(!at_least_three_vowels(&chars("xyz")));
    assert!(!at_least_three_vowels(&chars("")));
}

#[test]
fn test_has_adjacent_repeat() {
    assert!(has_adjacent_repeat(&chars("xx")));
    assert!(has_adjacent_repeat(&chars("abcdde")));
    assert!(has_adjacent_repeat(&chars("aabbccdd")));
    assert!(!has_adjacent_repeat(&chars("abcde")));
    assert!(!has_adjacent_repeat(&chars("a")));
    assert!(!has_adjacent_repeat(&chars("")));
}

#[test]
fn test_has_no_forbidden_substring() {
    assert!(has_no_forbidden_substring(&chars("ugknbfddgicrmopn")));
    assert!(has_no_forbidden_substring(&chars("ba")));
    assert!(has_no_forbidden_substring(&chars("a")));
    assert!(has_no_forbidden_substring(&chars("")));
    assert!(!has_no_forbidden_substring(&chars("haegwjzuvuyypxyu")));
    assert!(!has_no_forbidden_substring(&chars("ab")));
    assert!(!has_no_forbidden_substring(&chars("zzcd")));
    assert!(!has_no_forbidden_substring(&chars("pqzz")));
}

#[test]
fn test_has_repeated_pair() {
    assert!(has_repeated_pair(&chars("xyxy")));
    assert!(has_repeated_pair(&chars("aabcdefgaa")));
    assert!(has_repeated_pair(&chars("aaaa")));
    assert!(has_repeated_pair(&chars("qjhvhtzxzqqjkmpb")));
    // "aaa" only has overlapping occurrences of "aa".
    assert!(!has_repeated_pair(&chars("aaa")));
    assert!(!has_repeated_pair(&chars("ieodomkazucvgmuy")));
    assert!(!has_repeated_pair(&chars("xy")));
    assert!(!has_repeated_pair(&chars("")));
}

#[test]
fn test_has_repeat_with_one_between() {
    assert!(has_repeat_with_one_between(&chars("xyx")));
    assert!(has_repeat_with_one_between(&chars("abcdefeghi")));
    assert!(has_repeat_with_one_between(&chars("aaa")));
    assert!(!has_repeat_with_one_between(&chars("uurcxstgmygtbstg")));
    assert!(!has_repeat_with_one_between(&chars("ab")));
    assert!(!has_repeat_with_one_between(&chars("")));
}

#[test]
fn test_rule_set_a() {
    assert!(satisfies(&RULE_SET_A, &chars("ugknbfddgicrmopn")));
    assert!(satisfies(&RULE_SET_A, &chars("aaa")));
    assert!(!satisfies(&RULE_SET_A, &chars("jchzalrnumimnmhp"))); // no double letter
    assert!(!satisfies(&RULE_SET_A, &chars("haegwjzuvuyypxyu"))); // contains xy
    assert!(!satisfies(&RULE_SET_A, &chars("dvszwmarrgswjxmb"))); // one vowel
}

#[test]
fn test_rule_set_b() {
    assert!(satisfies(&RULE_SET_B, &chars("qjhvhtzxzqqjkmpb")));
    assert!(satisfies(&RULE_SET_B, &chars("xxyxx")));
    assert!(!satisfies(&RULE_SET_B, &chars("uurcxstgmygtbstg"))); // no one-between repeat
    assert!(!satisfies(&RULE_SET_B, &chars("ieodomkazucvgmuy"))); // no repeated pair
}

#[test]
fn test_vowels_bound_part1() {
    // Each of these has a double letter and no forbidden pair, so only
    // the vowel count can keep it out of part 1.
    let few_vowels = ["bbcc", "zzyy", "eebbc", "ozzu", "kkk", "qqrrssa"];
    for line in few_vowels {
        assert!(has_adjacent_repeat(&chars(line)), "{}", line);
        assert!(has_no_forbidden_substring(&chars(line)), "{}", line);
        assert!(!at_least_three_vowels(&chars(line)), "{}", line);
    }
    assert_eq!(tally(few_vowels).part1, 0);

    let lines = [
        "ugknbfddgicrmopn",
        "aaa",
        "jchzalrnumimnmhp",
        "haegwjzuvuyypxyu",
        "dvszwmarrgswjxmb",
        "bbcc",
        "zzyy",
        "eebbc",
        "ozzu",
        "eeiou",
    ];
    let with_vowels = lines
        .iter()
        .filter(|line| at_least_three_vowels(&chars(line)))
        .count();
    let t = tally(lines);
    assert_eq!(t.part1, 3);
    assert!(t.part1 <= with_vowels);
}

#[test]
fn test_rules_count_characters_not_bytes() {
    // 'é' is two bytes in UTF-8.
    assert!(has_adjacent_repeat(&chars("éé")));
    assert!(!has_repeat_with_one_between(&chars("éé")));
    assert!(!has_repeated_pair(&chars("éé")));
    assert!(!satisfies(&RULE_SET_B, &chars("éé")));
    assert!(has_repeat_with_one_between(&chars("ééé")));
    assert!(!has_repeated_pair(&chars("ééé")));
    assert!(satisfies(&RULE_SET_B, &chars("ééxéé")));
    assert!(!at_least_three_vowels(&chars("éaée")));
    assert!(at_least_three_vowels(&chars("aéeéi")));

    let t = tally(["éé", "ééé", "ééxéé"]);
    assert_eq!(t.part2, 1);
    assert_eq!(t.scored, 3);
}

#[test]
fn test_tally() {
    let t = tally([
        "ugknbfddgicrmopn",
        "aaa",
        "jchzalrnumimnmhp",
        "haegwjzuvuyypxyu",
        "dvszwmarrgswjxmb",
        "qjhvhtzxzqqjkmpb",
        "xxyxx",
        "uurcxstgmygtbstg",
        "ieodomkazucvgmuy",
    ]);
    assert_eq!(
        t,
        Tally {
            part1: 2,
            part2: 2,
            scored: 9
        }
    );
}

#[test]
fn test_tally_stops_at_blank_line() {
    let t = tally(["aaa\n", "  \n", "ugknbfddgicrmopn\n"]);
    assert_eq!(
        t,
        Tally {
            part1: 1,
            part2: 0,
            scored: 1
        }
    );
}

#[test]
fn test_tally_empty_input() {
    let nothing: [&str; 0] = [];
    assert_eq!(tally(nothing), Tally::default());
}

fn run() -> Result<(), String> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(io::stderr);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
        .map_err(|e| e.to_string())?;
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    let lines: Vec<String> = io::BufReader::new(io::stdin())
        .lines()
        .collect::<Result<_, _>>()
        .map_err(|e| format!("failed to read input: {}", e))?;
    let result = tally(&lines);
    event!(Level::INFO, "scored {} lines", result.scored);
    println!("{}", result.part1);
    println!("{}", result.part2);
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
