/// Running additive sum of a sequence of period returns.
///
/// The output has the same length as the input and its first element is the
/// first period return. Returns are summed, not compounded.
pub fn cumulative_curve(returns: &[f64]) -> Vec<f64> {
    returns
        .iter()
        .scan(0.0, |total, r| {
            *total += r;
            Some(*total)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn each_point_is_the_sum_of_the_prefix() {
        let returns = [0.035, -0.01, 0.02, 0.0, -0.04];
        let curve = cumulative_curve(&returns);

        assert_eq!(curve.len(), returns.len());
        assert_eq!(curve[0], returns[0]);
        for t in 0..returns.len() {
            let prefix: f64 = returns[..=t].iter().sum();
            assert_abs_diff_eq!(curve[t], prefix, epsilon = 1e-12);
        }
    }

    #[test]
    fn empty_input_gives_empty_curve() {
        assert!(cumulative_curve(&[]).is_empty());
    }
}
