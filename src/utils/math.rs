/// Divides every value by `total`. A non-positive `total` yields zeros.
pub fn normalise(values: &[f64], total: f64) -> Vec<f64> {
    if total > 0.0 {
        values.iter().map(|v| v / total).collect()
    } else {
        vec![0.0; values.len()]
    }
}

/// Index of the largest value. Ties go to the lowest index; NaN never wins.
/// Returns `None` for an empty slice.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b || v.is_nan() => {}
            None if v.is_nan() => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i).or_else(|| (!values.is_empty()).then_some(0))
}

/// Shannon entropy in bits of `counts` normalised by `total`. Zero counts
/// contribute nothing.
pub fn entropy(counts: &[f64], total: f64) -> f64 {
    if total <= 0.0 {
        return 0.0;
    }
    counts
        .iter()
        .filter(|&&c| c > 0.0)
        .map(|&c| {
            let p = c / total;
            -p * p.log2()
        })
        .sum()
}
