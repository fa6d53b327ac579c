// ==========================================
// 餐厅库存智能分析 - 描述统计工具
// ==========================================
// 职责: 均值 / 标准差 / 线性斜率 / 平均差分
// 红线: 分母为 0 或样本不足时返回 None,不产生 NaN
// ==========================================

/// 算术均值
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// 样本标准差 (n - 1)
///
/// 少于 2 个点时无定义,返回 None
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// 总体标准差 (n)
pub fn population_std(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / values.len() as f64).sqrt())
}

/// 一阶最小二乘拟合的斜率 (x = 0..n-1)
pub fn linear_slope(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = mean(values)?;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        sxy += dx * (y - y_mean);
        sxx += dx * dx;
    }
    Some(sxy / sxx)
}

/// 相邻两项差分的均值
pub fn mean_diff(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let diffs: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();
    mean(&diffs)
}

/// 安全除法: 分母为 0 (或结果非有限) 时返回 None
pub fn safe_div(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    let value = numerator / denominator;
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[2.0, 4.0, 6.0]), Some(4.0));
    }

    #[test]
    fn test_sample_vs_population_std() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!(approx(population_std(&values).unwrap(), 2.0));
        assert!(approx(sample_std(&values).unwrap(), (32.0f64 / 7.0).sqrt()));
        assert_eq!(sample_std(&[5.0]), None);
        assert_eq!(population_std(&[5.0]), Some(0.0));
    }

    #[test]
    fn test_linear_slope() {
        assert!(approx(linear_slope(&[1.0, 3.0, 5.0, 7.0]).unwrap(), 2.0));
        assert!(approx(linear_slope(&[10.0, 10.0, 10.0]).unwrap(), 0.0));
        assert_eq!(linear_slope(&[1.0]), None);
    }

    #[test]
    fn test_mean_diff_differs_from_slope() {
        // 平均差分只看首尾,斜率受中间点影响
        let values = [100.0, 300.0, 100.0, 130.0];
        assert!(approx(mean_diff(&values).unwrap(), 10.0));
        assert!(approx(linear_slope(&values).unwrap(), -11.0));
    }

    #[test]
    fn test_safe_div() {
        assert_eq!(safe_div(10.0, 0.0), None);
        assert_eq!(safe_div(10.0, 4.0), Some(2.5));
    }
}
