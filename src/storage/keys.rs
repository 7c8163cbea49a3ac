// src/storage/keys.rs

//! Time-partitioned object key construction.

use chrono::{DateTime, Datelike, Utc};

/// Build an object key with year/month partitioning and a timestamped,
/// suffixed filename.
///
/// Example: `population_scrape/california/year=2025/month=08/2025-08-20_14-35-22_population_ranks.json`
///
/// A trailing `/` on the prefix is stripped; an empty prefix yields a key
/// rooted at the partition directories.
pub fn object_key(prefix: &str, at: DateTime<Utc>, suffix: &str, file_type: &str) -> String {
    let partition = format!("year={:04}/month={:02}", at.year(), at.month());
    let file = format!("{}_{}.{}", at.format("%Y-%m-%d_%H-%M-%S"), suffix, file_type);

    match prefix.trim_end_matches('/') {
        "" => format!("{partition}/{file}"),
        prefix => format!("{prefix}/{partition}/{file}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(rfc3339: &str) -> DateTime<Utc> {
        rfc3339.parse().unwrap()
    }

    #[test]
    fn test_key_format() {
        let key = object_key(
            "population_scrape/california/",
            at("2025-08-20T14:35:22Z"),
            "population_ranks",
            "json",
        );
        assert_eq!(
            key,
            "population_scrape/california/year=2025/month=08/2025-08-20_14-35-22_population_ranks.json"
        );
    }

    #[test]
    fn test_prefix_normalization() {
        let t = at("2025-01-02T03:04:05Z");
        let with_slash = object_key("data/", t, "ranks", "json");
        let without_slash = object_key("data", t, "ranks", "json");
        assert_eq!(with_slash, without_slash);

        let bare = object_key("", t, "ranks", "json");
        assert_eq!(bare, "year=2025/month=01/2025-01-02_03-04-05_ranks.json");
    }

    #[test]
    fn test_single_digit_month_is_zero_padded() {
        let key = object_key("p", at("2025-03-09T01:02:03Z"), "s", "json");
        assert!(key.contains("month=03"));
    }

    #[test]
    fn test_keys_sort_by_creation_time() {
        let times = [
            "2025-08-20T14:35:22Z",
            "2025-08-20T14:35:23Z",
            "2025-08-21T00:00:00Z",
            "2025-08-21T09:10:11Z",
        ];
        let keys: Vec<_> = times
            .iter()
            .map(|t| object_key("p", at(t), "s", "json"))
            .collect();

        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }
}
