//! Regex patterns for sheet cell tokens.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Discipline code, e.g. IG.TC.101
    pub static ref CODE: Regex = Regex::new(
        r"[A-Z]{2}\.[A-Z]{2}\.[0-9]{3}"
    ).unwrap();

    // Discipline category as a whole word
    pub static ref CATEGORY: Regex = Regex::new(
        r"\b(DA|DOP|DOB|DFA)\b"
    ).unwrap();

    // Evaluation method letter as a whole word
    pub static ref EVALUATION: Regex = Regex::new(
        r"\b([EVC])\b"
    ).unwrap();

    // First run of ASCII digits
    pub static ref INTEGER: Regex = Regex::new(
        r"[0-9]+"
    ).unwrap();

    pub static ref WHITESPACE: Regex = Regex::new(
        r"\s+"
    ).unwrap();
}
