//! "Fun equivalent" size comparisons for a total word count.
//!
//! A fixed step function: the band is chosen by the highest threshold that
//! the count reaches. Band boundaries are inclusive at their lower end.

use serde::Serialize;

/// A comparison band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FunEquivalent {
    /// Inclusive lower bound on the word count.
    pub threshold: u64,
    /// Comparison sentence.
    pub text: &'static str,
}

/// Bands in descending threshold order. The last band starts at zero.
pub const BANDS: &[FunEquivalent] = &[
    FunEquivalent { threshold: 22_000_000, text: "That’s more text than the entire United States Code of federal law." },
    FunEquivalent { threshold: 17_500_000, text: "That’s like rewriting the entire Game of Thrones series ten times." },
    FunEquivalent { threshold: 14_750_000, text: "That’s the entire Dungeons & Dragons 5th Edition core rulebooks... multiplied thirty times." },
    FunEquivalent { threshold: 11_000_000, text: "That’s about one‑quarter of the entire 32‑volume Encyclopedia Britannica" },
    FunEquivalent { threshold: 8_600_000, text: "That’s twice the entire Wheel of Time series." },
    FunEquivalent { threshold: 5_400_000, text: "That’s longer than the King James Bible seven times over." },
    FunEquivalent { threshold: 3_300_000, text: "That’s the full Discworld series by Terry Pratchett, 41 novels worth." },
    FunEquivalent { threshold: 2_000_000, text: "That’s double the total word count of the entire Harry Potter series." },
    FunEquivalent { threshold: 1_300_000, text: "That’s the entire Lord of the Rings trilogy, plus The Hobbit, twice over." },
    FunEquivalent { threshold: 700_000, text: "That’s longer than the complete Sherlock Holmes collection." },
    FunEquivalent { threshold: 400_000, text: "That’s about the length of Les Misérables in English translation." },
    FunEquivalent { threshold: 180_000, text: "That’s the combined word count of The Fellowship of the Ring." },
    FunEquivalent { threshold: 100_000, text: "That’s the full word count of To Kill a Mockingbird, all 100,388 words of it." },
    FunEquivalent { threshold: 60_000, text: "That’s more than a typical debut novel or thesis paper, easily." },
    FunEquivalent { threshold: 30_000, text: "That’s longer than a technical manual or a short novella for sure." },
    FunEquivalent { threshold: 11_000, text: "That’s the full transcript of Steve Jobs’ Stanford commencement speech... 50 times over." },
    FunEquivalent { threshold: 2_000, text: "That’s more than a short blog post or product review online." },
    FunEquivalent { threshold: 500, text: "That’s about the length of a very active Twitter thread these days." },
    FunEquivalent { threshold: 0, text: "That’s barely a paragraph, you’re just getting started, friend." },
];

/// The band for `total_words`.
pub fn band_for(total_words: u64) -> &'static FunEquivalent {
    BANDS
        .iter()
        .find(|band| total_words >= band.threshold)
        .unwrap_or(&BANDS[BANDS.len() - 1])
}

/// Comparison sentence for `total_words`.
pub fn fun_equivalent(total_words: u64) -> &'static str {
    band_for(total_words).text
}

/// Severity rank of the band for `total_words`; 0 is the smallest band.
pub fn severity(total_words: u64) -> usize {
    BANDS.len() - 1 - BANDS.iter().position(|b| total_words >= b.threshold).unwrap_or(BANDS.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_bands_descending() {
        assert!(BANDS.windows(2).all(|w| w[0].threshold > w[1].threshold));
        assert_eq!(BANDS.last().unwrap().threshold, 0);
        assert_eq!(BANDS.len(), 19);
    }

    #[rstest]
    #[case(0, "That’s barely a paragraph")]
    #[case(499, "That’s barely a paragraph")]
    #[case(500, "Twitter thread")]
    #[case(1_999, "Twitter thread")]
    #[case(2_000, "short blog post")]
    #[case(11_000, "Stanford commencement")]
    #[case(59_999, "technical manual")]
    #[case(99_999, "debut novel")]
    #[case(100_000, "To Kill a Mockingbird")]
    #[case(180_000, "Fellowship of the Ring")]
    #[case(2_000_000, "Harry Potter")]
    #[case(21_999_999, "Game of Thrones")]
    #[case(22_000_000, "United States Code")]
    #[case(u64::MAX, "United States Code")]
    fn test_fun_equivalent_bands(#[case] words: u64, #[case] expected: &str) {
        let text = fun_equivalent(words);
        assert!(text.contains(expected), "{words} -> {text}");
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert_ne!(fun_equivalent(99_999), fun_equivalent(100_000));
        for band in BANDS {
            assert_eq!(fun_equivalent(band.threshold), band.text);
        }
    }

    #[test]
    fn test_severity() {
        assert_eq!(severity(0), 0);
        assert_eq!(severity(500), 1);
        assert_eq!(severity(22_000_000), BANDS.len() - 1);
    }
}
