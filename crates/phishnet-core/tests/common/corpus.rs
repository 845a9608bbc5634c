//! Synthetic source files for pipeline tests.
//!
//! Phishing URLs are long plain-http URLs with many separators and query
//! parameters; benign entries are short popular-site domains. The two sets are
//! lexically separable, so a forest fitted on them should be near perfect.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

pub fn phishing_url(i: usize) -> String {
    if i % 3 == 0 {
        format!("http://user{i}@secure-login.account-verify{i}.example-bank.com/signin/update/confirm?session={i}&token=ab{i}")
    } else {
        format!("http://login-{i}.verify-account.paypal-secure.info/webscr/cmd/login?id={i}&next=home")
    }
}

/// PhishTank-style export: the URL sits in a `url` column among others.
pub fn write_phishing_feed(path: &Path, count: usize) {
    let mut out = String::from("phish_id,url,verified,target\n");
    for i in 0..count {
        writeln!(out, "{},{},yes,Other", 9000 + i, phishing_url(i)).unwrap();
    }
    fs::write(path, out).unwrap();
}

/// Headerless `rank,domain` ranking.
pub fn write_ranking(path: &Path, count: usize) {
    let mut out = String::new();
    for i in 0..count {
        writeln!(out, "{},site{i}.com", i + 1).unwrap();
    }
    fs::write(path, out).unwrap();
}
