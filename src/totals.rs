// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Language byte totals accumulated across repositories.
//!
//! [`LanguageTotals`] keeps languages in the order they were first
//! encountered, which is also the order the threshold filter reports them in.

use indexmap::IndexMap;

/// Per-repository language breakdown as reported by the GitHub API.
///
/// Keys follow the order of the JSON document.
pub type LanguageBreakdown = IndexMap<String, u64,>;

/// Ordered mapping from language name to accumulated byte count.
#[derive(Debug, Clone, Default, PartialEq, Eq,)]
pub struct LanguageTotals
{
    totals: IndexMap<String, u64,>,
}

impl LanguageTotals
{
    /// Creates an empty accumulator.
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Adds `bytes` to the running total of `language`.
    ///
    /// New languages are appended after every language seen so far. Totals
    /// saturate instead of wrapping.
    pub fn add(&mut self, language: &str, bytes: u64,)
    {
        match self.totals.get_mut(language,) {
            Some(total,) => *total = total.saturating_add(bytes,),
            None => {
                self.totals.insert(language.to_owned(), bytes,);
            }
        }
    }

    /// Folds one repository breakdown into the totals.
    pub fn merge(&mut self, breakdown: &LanguageBreakdown,)
    {
        for (language, bytes,) in breakdown {
            self.add(language, *bytes,);
        }
    }

    /// Returns the accumulated bytes for `language`.
    pub fn get(&self, language: &str,) -> Option<u64,>
    {
        self.totals.get(language,).copied()
    }

    /// Number of distinct languages.
    pub fn len(&self,) -> usize
    {
        self.totals.len()
    }

    /// Returns `true` when no language was recorded.
    pub fn is_empty(&self,) -> bool
    {
        self.totals.is_empty()
    }

    /// Iterates languages and totals in first-encounter order.
    pub fn iter(&self,) -> impl Iterator<Item = (&str, u64,),> + '_
    {
        self.totals.iter().map(|(language, bytes,)| (language.as_str(), *bytes,),)
    }

    /// Languages whose total reaches `min_bytes`, in first-encounter order.
    ///
    /// An empty result means there is nothing worth rendering.
    ///
    /// # Examples
    ///
    /// ```
    /// use lang_carousel::LanguageTotals;
    ///
    /// let mut totals = LanguageTotals::new();
    /// totals.add("Go", 12_000,);
    /// totals.add("Makefile", 120,);
    /// totals.add("Rust", 6_000,);
    /// assert_eq!(totals.significant_languages(5_000), vec!["Go", "Rust"]);
    /// ```
    pub fn significant_languages(&self, min_bytes: u64,) -> Vec<String,>
    {
        self.totals
            .iter()
            .filter(|(_, total,)| **total >= min_bytes,)
            .map(|(language, _,)| language.clone(),)
            .collect()
    }
}

impl FromIterator<LanguageBreakdown,> for LanguageTotals
{
    fn from_iter<I: IntoIterator<Item = LanguageBreakdown,>,>(iter: I,) -> Self
    {
        let mut totals = Self::new();
        for breakdown in iter {
            totals.merge(&breakdown,);
        }
        totals
    }
}

#[cfg(test)]
mod tests
{
    use proptest::prelude::*;

    use super::*;

    fn breakdown(entries: &[(&str, u64,)],) -> LanguageBreakdown
    {
        entries.iter().map(|(name, bytes,)| ((*name).to_owned(), *bytes,),).collect()
    }

    #[test]
    fn merge_sums_bytes_per_language()
    {
        let totals: LanguageTotals = [
            breakdown(&[("Go", 10_000,)],),
            breakdown(&[("Go", 2_000,), ("Rust", 6_000,)],),
        ]
        .into_iter()
        .collect();

        assert_eq!(totals.get("Go"), Some(12_000));
        assert_eq!(totals.get("Rust"), Some(6_000));
        assert_eq!(totals.len(), 2);
    }

    #[test]
    fn languages_keep_first_encounter_order()
    {
        let totals: LanguageTotals = [
            breakdown(&[("Shell", 9_000,), ("Go", 10_000,)],),
            breakdown(&[("Rust", 6_000,), ("Shell", 1,)],),
        ]
        .into_iter()
        .collect();

        let order: Vec<&str,> = totals.iter().map(|(language, _,)| language,).collect();
        assert_eq!(order, vec!["Shell", "Go", "Rust"]);
    }

    #[test]
    fn names_are_case_preserving()
    {
        let mut totals = LanguageTotals::new();
        totals.add("rust", 1,);
        totals.add("Rust", 1,);
        assert_eq!(totals.len(), 2);
    }

    #[test]
    fn add_saturates_instead_of_overflowing()
    {
        let mut totals = LanguageTotals::new();
        totals.add("C", u64::MAX,);
        totals.add("C", 10,);
        assert_eq!(totals.get("C"), Some(u64::MAX));
    }

    #[test]
    fn threshold_is_inclusive()
    {
        let mut totals = LanguageTotals::new();
        totals.add("Exact", 5_000,);
        totals.add("Below", 4_999,);
        assert_eq!(totals.significant_languages(5_000,), vec!["Exact".to_owned()]);
    }

    #[test]
    fn empty_totals_yield_nothing()
    {
        assert!(LanguageTotals::new().significant_languages(0,).is_empty());
    }

    proptest! {
        #[test]
        fn filter_is_exactly_the_threshold_subset(
            entries in prop::collection::vec(("[A-Za-z]{1,6}", 0u64..20_000), 0..24),
            min_bytes in 0u64..15_000,
        ) {
            let mut totals = LanguageTotals::new();
            for (language, bytes) in &entries {
                totals.add(language, *bytes);
            }

            let kept = totals.significant_languages(min_bytes);
            for language in &kept {
                let total = totals.get(language);
                prop_assert!(total.is_some());
                prop_assert!(total.unwrap_or_default() >= min_bytes);
            }

            let expected: Vec<String> = totals
                .iter()
                .filter(|(_, total)| *total >= min_bytes)
                .map(|(language, _)| language.to_owned())
                .collect();
            prop_assert_eq!(kept, expected);
        }
    }
}
