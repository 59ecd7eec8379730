use crate::document::ApiRecord;
use std::borrow::Borrow;

pub const DEFAULT_MAX_DISTANCE: usize = 3;
pub const DEFAULT_LIMIT: usize = 3;

/// Classic edit distance over chars, insertion/deletion/substitution cost 1.
///
/// Fills the whole `(|b|+1) x (|a|+1)` table; API names are short enough that
/// banding is not worth it.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut matrix = vec![vec![0usize; a.len() + 1]; b.len() + 1];
    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=a.len() {
        matrix[0][j] = j;
    }

    for i in 1..=b.len() {
        for j in 1..=a.len() {
            let cost = if b[i - 1] == a[j - 1] { 0 } else { 1 };
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[b.len()][a.len()]
}

fn lowercase_name<T: Borrow<ApiRecord>>(api: &T) -> String {
    let record: &ApiRecord = api.borrow();
    record.name.to_lowercase()
}

/// Find the API records whose names are closest to `query`.
///
/// A case-insensitive exact hit short-circuits everything and is returned on
/// its own. Otherwise prefix matches (either direction) rank as distance 0,
/// substring matches as 1, and anything else needs a real edit distance of at
/// most `max_distance`. Ties keep collection order.
///
/// Works on the raw record list, not the inverted index. A blank query
/// returns nothing rather than every name as a prefix match.
pub fn find_similar<'a, T>(
    query: &str,
    apis: &'a [T],
    max_distance: usize,
    limit: usize,
) -> Vec<&'a T>
where
    T: Borrow<ApiRecord>,
{
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    if let Some(exact) = apis
        .iter()
        .find(|api| lowercase_name(*api) == query)
    {
        return vec![exact];
    }

    let mut candidates: Vec<(&'a T, usize)> = Vec::new();
    for api in apis {
        let name = lowercase_name(api);
        let distance = if name.starts_with(&query) || query.starts_with(&name) {
            0
        } else if name.contains(&query) || query.contains(&name) {
            1
        } else {
            let distance = levenshtein(&name, &query);
            if distance > max_distance {
                continue;
            }
            distance
        };
        candidates.push((api, distance));
    }

    candidates.sort_by_key(|&(_, distance)| distance);
    candidates
        .into_iter()
        .take(limit)
        .map(|(api, _)| api)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apis() -> Vec<ApiRecord> {
        [
            "getBatteryLevel",
            "getBrand",
            "getBuildNumber",
            "getCarrier",
            "getDeviceId",
            "isBatteryCharging",
        ]
        .iter()
        .map(|name| ApiRecord::new(*name, ""))
        .collect()
    }

    fn names(found: &[&ApiRecord]) -> Vec<String> {
        found.iter().map(|api| api.name.clone()).collect()
    }

    #[test]
    fn test_levenshtein_basics() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("flaw", "lawn"), 2);
        assert_eq!(levenshtein("getbattrylevel", "getbatterylevel"), 1);
    }

    #[test]
    fn test_levenshtein_symmetric_and_reflexive() {
        let words = ["", "a", "getBrand", "getCarrier", "isTablet", "héllo", "hello"];
        for a in words {
            assert_eq!(levenshtein(a, a), 0);
            for b in words {
                assert_eq!(levenshtein(a, b), levenshtein(b, a), "{} vs {}", a, b);
            }
        }
    }

    #[test]
    fn test_exact_match_any_case_short_circuits() {
        let apis = apis();
        let found = find_similar("GETBRAND", &apis, 0, 10);
        assert_eq!(names(&found), vec!["getBrand"]);

        // the exact hit wins even though "getBrand" is also a prefix of others
        let found = find_similar("getbrand", &apis, 3, 0);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_typo_within_default_distance() {
        let apis = apis();
        let found = find_similar("getBattryLevel", &apis, DEFAULT_MAX_DISTANCE, DEFAULT_LIMIT);
        assert_eq!(names(&found)[0], "getBatteryLevel");
    }

    #[test]
    fn test_prefix_ranks_before_substring_and_distance() {
        let apis = apis();
        // "getb" is a prefix of getBatteryLevel, getBrand and getBuildNumber
        let found = find_similar("getB", &apis, 3, 10);
        assert_eq!(
            names(&found),
            vec!["getBatteryLevel", "getBrand", "getBuildNumber"]
        );

        let found = find_similar("batterycharging", &apis, 3, 10);
        assert_eq!(names(&found), vec!["isBatteryCharging"]);
    }

    #[test]
    fn test_limit_and_misses() {
        let apis = apis();
        assert_eq!(find_similar("get", &apis, 3, 2).len(), 2);
        assert!(find_similar("zzzzzzzzzzzz", &apis, 3, 3).is_empty());
        assert!(find_similar("   ", &apis, 3, 3).is_empty());
    }

    #[test]
    fn test_blank_query_matches_nothing() {
        let apis = apis();
        for query in ["", " ", "\t\n"] {
            assert!(find_similar(query, &apis, DEFAULT_MAX_DISTANCE, 10).is_empty());
        }
    }

    #[test]
    fn test_exact_and_typo_lookup_over_owned_records() {
        let apis = apis();
        assert_eq!(names(&find_similar("getcarrier", &apis, 3, 3)), vec!["getCarrier"]);
        assert_eq!(names(&find_similar("getDevceId", &apis, 3, 3))[0], "getDeviceId");
    }

    #[test]
    fn test_works_over_shared_records() {
        let shared: Vec<std::sync::Arc<ApiRecord>> =
            apis().into_iter().map(std::sync::Arc::new).collect();
        let found = find_similar("getCarier", &shared, 3, 3);
        assert_eq!(found[0].name, "getCarrier");
    }
}
