use super::{Group, RecapTable};

/// Group with the highest score, first one wins on ties. NaN scores never win.
pub fn peak<'a, K, V>(
    table: &'a RecapTable<K, V>,
    score: impl Fn(&V) -> f64,
) -> Option<&'a Group<K, V>> {
    let mut best: Option<(&'a Group<K, V>, f64)> = None;
    for group in table {
        let s = score(&group.value);
        if s.is_nan() {
            continue;
        }
        match best {
            Some((_, top)) if s <= top => {}
            _ => best = Some((group, s)),
        }
    }
    best.map(|(group, _)| group)
}

/// One flag per group: set on every group whose score equals the maximum.
pub fn highlight_max<K, V>(table: &RecapTable<K, V>, score: impl Fn(&V) -> f64) -> Vec<bool> {
    let max = table
        .iter()
        .map(|g| score(&g.value))
        .filter(|s| !s.is_nan())
        .fold(f64::NEG_INFINITY, f64::max);
    table.iter().map(|g| score(&g.value) >= max).collect()
}
