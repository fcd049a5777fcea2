//! Column width fitting for table layout.
//!
//! [`collapse_widths`] implements a water-fill reduction: the widest
//! shrinkable columns give up space first and converge toward parity,
//! instead of every column shrinking in proportion to its natural size.
//! That keeps already-narrow columns from starving.

use log::trace;

/// Reduce widths so the total fits `max_width`.
///
/// `widths` and `may_shrink` are per-column, same order. When no column may
/// shrink the input is returned unchanged even if it exceeds the budget;
/// overflow is then the caller's concern.
///
/// # Examples
///
/// ```
/// use pigment::collapse_widths;
///
/// assert_eq!(collapse_widths(&[10, 10, 10], &[true, true, true], 24), vec![8, 8, 8]);
/// assert_eq!(collapse_widths(&[5, 5], &[true, true], 20), vec![5, 5]);
/// assert_eq!(collapse_widths(&[9, 9], &[false, false], 4), vec![9, 9]);
/// ```
pub fn collapse_widths(widths: &[usize], may_shrink: &[bool], max_width: usize) -> Vec<usize> {
    let mut widths: Vec<usize> = widths.to_vec();
    if !may_shrink.iter().any(|&shrink| shrink) {
        return widths;
    }

    let mut total: usize = widths.iter().sum();
    while total > 0 && total > max_width {
        let excess = total - max_width;
        let max_column = widths
            .iter()
            .zip(may_shrink)
            .filter(|&(_, &shrink)| shrink)
            .map(|(&width, _)| width)
            .max()
            .unwrap_or(0);
        let second_max = widths
            .iter()
            .zip(may_shrink)
            .map(|(&width, &shrink)| if shrink && width != max_column { width } else { 0 })
            .max()
            .unwrap_or(0);
        let difference = max_column - second_max;

        let ratios: Vec<usize> = widths
            .iter()
            .zip(may_shrink)
            .map(|(&width, &shrink)| usize::from(shrink && width == max_column))
            .collect();
        if difference == 0 || ratios.iter().all(|&r| r == 0) {
            // plateau: every shrinkable column is at zero
            break;
        }

        let step = excess.min(difference);
        trace!("collapsing widths: excess {excess}, columns at {max_column} give up {step}");
        let max_reduce = vec![step; widths.len()];
        widths = ratio_reduce(excess, &ratios, &max_reduce, &widths);
        total = widths.iter().sum();
    }

    widths
}

/// Subtract `total` from `values`, distributed proportionally to `ratios`
/// and clamped per-entry by `maximums`.
///
/// The running remainder/denominator accounting keeps the distribution
/// exact: whatever an entry cannot absorb is carried to the entries after
/// it.
pub fn ratio_reduce(
    total: usize,
    ratios: &[usize],
    maximums: &[usize],
    values: &[usize],
) -> Vec<usize> {
    let ratios: Vec<usize> = ratios
        .iter()
        .zip(maximums)
        .map(|(&ratio, &maximum)| if maximum > 0 { ratio } else { 0 })
        .collect();
    let mut total_ratio: usize = ratios.iter().sum();
    if total_ratio == 0 {
        return values.to_vec();
    }

    let mut remaining = total;
    let mut result = Vec::with_capacity(values.len());
    for ((&ratio, &maximum), &value) in ratios.iter().zip(maximums).zip(values) {
        if ratio > 0 && total_ratio > 0 {
            let share = (ratio as f64 * remaining as f64 / total_ratio as f64).round() as usize;
            let distributed = maximum.min(share);
            result.push(value.saturating_sub(distributed));
            remaining -= distributed;
            total_ratio -= ratio;
        } else {
            result.push(value);
        }
    }
    result
}
