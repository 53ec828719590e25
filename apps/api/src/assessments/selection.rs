//! Ordering and "latest" selection over scanned keys.

use std::num::ParseIntError;

use super::keys::StoredKey;

/// Sorts keys descending by their final colon segment, compared as text.
///
/// Text comparison means "9" ranks above "10". Keys of two segments or fewer
/// sort on the empty string and land last. Equal segments keep scan order.
pub fn sort_by_last_segment_desc(keys: &mut [String]) {
    keys.sort_by(|a, b| {
        let a = StoredKey::parse(a);
        let b = StoredKey::parse(b);
        b.sort_segment().cmp(a.sort_segment())
    });
}

/// Picks the key whose segment 2 is the largest integer.
///
/// Keys without a segment 2 rank as timestamp 0. On ties the earliest key in
/// `keys` wins. Any segment 2 that is not an integer fails the whole selection.
pub fn select_latest(keys: &[String]) -> Result<Option<&str>, ParseIntError> {
    let mut latest: Option<(i64, &str)> = None;
    for raw in keys {
        let key = StoredKey::parse(raw);
        let timestamp = key.selection_timestamp()?;
        match latest {
            Some((best, _)) if timestamp <= best => {}
            _ => latest = Some((timestamp, key.as_str())),
        }
    }
    Ok(latest.map(|(_, key)| key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_latest_picks_largest_timestamp() {
        let scanned = keys(&[
            "P1:Barthel Index:100:a",
            "P1:Barthel Index:200:b",
            "P1:Barthel Index:150:c",
        ]);
        assert_eq!(
            select_latest(&scanned).unwrap(),
            Some("P1:Barthel Index:200:b")
        );
    }

    #[test]
    fn test_latest_compares_numerically() {
        let scanned = keys(&["P1:x:9:a", "P1:x:10:b"]);
        assert_eq!(select_latest(&scanned).unwrap(), Some("P1:x:10:b"));
    }

    #[test]
    fn test_latest_tie_keeps_first() {
        let scanned = keys(&["P1:x:5:first", "P1:x:5:second"]);
        assert_eq!(select_latest(&scanned).unwrap(), Some("P1:x:5:first"));
    }

    #[test]
    fn test_latest_short_key_ranks_zero() {
        let scanned = keys(&["P1:x", "P1:x:1:a"]);
        assert_eq!(select_latest(&scanned).unwrap(), Some("P1:x:1:a"));
    }

    #[test]
    fn test_latest_empty_input() {
        assert_eq!(select_latest(&[]).unwrap(), None);
    }

    #[test]
    fn test_latest_rejects_non_numeric_segment() {
        let scanned = keys(&["P1:x:100:a", "P1:x:later:b"]);
        assert!(select_latest(&scanned).is_err());
    }

    #[test]
    fn test_sort_is_textual_descending() {
        let mut scanned = keys(&["P1:a:10", "P1:a:9", "P1:a:100"]);
        sort_by_last_segment_desc(&mut scanned);
        assert_eq!(scanned, keys(&["P1:a:9", "P1:a:100", "P1:a:10"]));
    }

    #[test]
    fn test_sort_short_keys_last() {
        let mut scanned = keys(&["P1:notes", "P1:a:1", "P1:b:2"]);
        sort_by_last_segment_desc(&mut scanned);
        assert_eq!(scanned, keys(&["P1:b:2", "P1:a:1", "P1:notes"]));
    }

    #[test]
    fn test_sort_uses_seconds_of_saved_keys() {
        let mut scanned = keys(&[
            "P1:Barthel Index:1700000000:2023-11-14 22:13:20",
            "P1:Barthel Index:1700000100:2023-11-14 22:15:00",
        ]);
        sort_by_last_segment_desc(&mut scanned);
        assert!(scanned[0].ends_with(":20"));
    }
}
