//! Lexical URL features.
//!
//! This is the only place feature semantics are defined. The batch
//! preprocessor and the single-URL predictor both go through [`extract`], and
//! [`FEATURE_NAMES`] is the only definition of the column order, so the two
//! paths cannot drift apart.
//!
//! The URL is treated as opaque text; it is never parsed as a URI.

/// Number of features in a [`FeatureVector`].
pub const NUM_FEATURES: usize = 8;

/// Column names, in positional order.
pub const FEATURE_NAMES: [&str; NUM_FEATURES] = [
    "url_length",
    "num_dots",
    "num_hyphens",
    "num_slashes",
    "num_question_marks",
    "num_equals",
    "has_at_symbol",
    "uses_https",
];

/// Fixed-order numeric summary of a URL's lexical structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeatureVector {
    pub url_length: u64,
    pub num_dots: u64,
    pub num_hyphens: u64,
    pub num_slashes: u64,
    pub num_question_marks: u64,
    pub num_equals: u64,
    pub has_at_symbol: u64,
    pub uses_https: u64,
}

impl FeatureVector {
    /// Values in [`FEATURE_NAMES`] order.
    pub fn to_array(&self) -> [u64; NUM_FEATURES] {
        [
            self.url_length,
            self.num_dots,
            self.num_hyphens,
            self.num_slashes,
            self.num_question_marks,
            self.num_equals,
            self.has_at_symbol,
            self.uses_https,
        ]
    }

    /// Values as a classifier input row, in [`FEATURE_NAMES`] order.
    pub fn to_row(&self) -> Vec<f64> {
        self.to_array().iter().map(|&v| v as f64).collect()
    }
}

/// Extracts the feature vector for `url`. Total over all strings.
pub fn extract(url: &str) -> FeatureVector {
    let count = |c: char| url.chars().filter(|&x| x == c).count() as u64;

    FeatureVector {
        url_length: url.chars().count() as u64,
        num_dots: count('.'),
        num_hyphens: count('-'),
        num_slashes: count('/'),
        num_question_marks: count('?'),
        num_equals: count('='),
        has_at_symbol: u64::from(url.contains('@')),
        uses_https: u64::from(url.to_lowercase().starts_with("https")),
    }
}

/// Like [`extract`], with a missing value treated as the empty string.
pub fn extract_opt(url: Option<&str>) -> FeatureVector {
    extract(url.unwrap_or(""))
}

/// Owned column names, for tables and the model artifact.
pub fn feature_names() -> Vec<String> {
    FEATURE_NAMES.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_case_https() {
        let v = extract("https://a.b-c.com/x?y=1");
        assert_eq!(
            v,
            FeatureVector {
                url_length: 23,
                num_dots: 2,
                num_hyphens: 1,
                num_slashes: 3,
                num_question_marks: 1,
                num_equals: 1,
                has_at_symbol: 0,
                uses_https: 1,
            }
        );
    }

    #[test]
    fn literal_case_at_symbol() {
        let v = extract("http://evil@phish.com");
        assert_eq!(v.has_at_symbol, 1);
        assert_eq!(v.uses_https, 0);
        assert_eq!(v.num_dots, 1);
    }

    #[test]
    fn empty_and_missing_are_all_zero() {
        assert_eq!(extract(""), FeatureVector::default());
        assert_eq!(extract_opt(None), FeatureVector::default());
        assert_eq!(extract_opt(Some("")).to_array(), [0; NUM_FEATURES]);
    }

    #[test]
    fn extraction_is_deterministic() {
        for url in ["", "https://x.y/z", "http://a@b.c/?q=1&r=2", "ünïcödé-домен.рф"] {
            assert_eq!(extract(url), extract(url));
        }
    }

    #[test]
    fn https_check_is_case_insensitive_prefix() {
        assert_eq!(extract("HTTPS://EXAMPLE.COM").uses_https, 1);
        assert_eq!(extract("HtTpS").uses_https, 1);
        assert_eq!(extract("http://https.example").uses_https, 0);
        assert_eq!(extract(" https://leading-space").uses_https, 0);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert_eq!(extract("é").url_length, 1);
    }

    #[test]
    fn row_follows_feature_name_order() {
        let v = extract("https://a-b.c/d?e=f@g");
        let row = v.to_row();
        assert_eq!(row.len(), FEATURE_NAMES.len());
        assert_eq!(row[0], v.url_length as f64);
        assert_eq!(row[3], v.num_slashes as f64);
        assert_eq!(row[6], 1.0);
        assert_eq!(row[7], 1.0);
    }
}
