use std::collections::HashMap;
use std::hash::Hash;

/// Most frequent value. Ties go to the smallest value; `None` for empty input.
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Ord + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut counts: HashMap<T, usize> = HashMap::new();
    for v in values {
        *counts.entry(v).or_default() += 1;
    }

    counts
        .into_iter()
        .max_by(|(a, ca), (b, cb)| ca.cmp(cb).then_with(|| b.cmp(a)))
        .map(|(v, _)| v)
}

/// Most frequent value, with ties going to the value whose `key` is smallest.
pub fn mode_by_key<T, K, I>(values: I, key: impl Fn(&T) -> K) -> Option<T>
where
    T: Eq + Hash,
    K: Ord,
    I: IntoIterator<Item = T>,
{
    let mut counts: HashMap<T, usize> = HashMap::new();
    for v in values {
        *counts.entry(v).or_default() += 1;
    }

    counts
        .into_iter()
        .max_by(|(a, ca), (b, cb)| ca.cmp(cb).then_with(|| key(b).cmp(&key(a))))
        .map(|(v, _)| v)
}

/// Frequency of each distinct value, by descending count then ascending value.
pub fn value_counts<T, I>(values: I) -> Vec<(T, usize)>
where
    T: Ord + Hash,
    I: IntoIterator<Item = T>,
{
    let mut counts: HashMap<T, usize> = HashMap::new();
    for v in values {
        *counts.entry(v).or_default() += 1;
    }

    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|(a, ca), (b, cb)| cb.cmp(ca).then_with(|| a.cmp(b)));
    counts
}

/// Computes the arithmetic mean of a slice of values. Returns `None` for empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_picks_dominant_value() {
        assert_eq!(mode(vec![3, 1, 3, 2, 3]), Some(3));
    }

    #[test]
    fn test_mode_tie_goes_to_smallest() {
        assert_eq!(mode(vec!["b", "a", "b", "a", "c"]), Some("a"));
        assert_eq!(mode(vec![17u32, 8, 8, 17]), Some(8));
    }

    #[test]
    fn test_mode_by_key_tie_goes_to_smallest_key() {
        assert_eq!(mode_by_key(vec![10, 2, 10, 2], |v| v.to_string()), Some(10));
        assert_eq!(mode_by_key(vec![10, 2, 2], |v| v.to_string()), Some(2));
        assert_eq!(mode_by_key(Vec::<u32>::new(), |v| *v), None);
    }

    #[test]
    fn test_mode_empty() {
        assert_eq!(mode(Vec::<u32>::new()), None);
    }

    #[test]
    fn test_value_counts_ordering() {
        let counts = value_counts(vec!["x", "y", "y", "z", "x", "y"]);
        assert_eq!(counts, vec![("y", 3), ("x", 2), ("z", 1)]);

        let tied = value_counts(vec!["b", "a"]);
        assert_eq!(tied, vec![("a", 1), ("b", 1)]);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[100.0, 200.0, 300.0]), Some(200.0));
        assert_eq!(mean(&[]), None);
    }
}
