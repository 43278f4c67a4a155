//! Threshold-bucket category labeling.
//!
//! A continuous value is mapped to a category by comparing it against an
//! ascending list of bounds: the first label whose bound strictly exceeds
//! the value wins, otherwise the last label. A value exactly equal to a
//! bound falls into the next bucket.

/// Weight-status labels shared by the BMI and BAI metrics
pub const WEIGHT_LABELS: [&str; 4] = ["Underweight", "Normal", "Overweight", "Obese"];

/// Body-fat-percent labels shared by the tape and caliper estimators
pub const FAT_LABELS: [&str; 5] = ["Essential Fat", "Athlete", "Fitness", "Average", "Obese"];

/// Select the label for `value` given ascending `bounds`.
///
/// Panics unless `labels.len() == bounds.len() + 1`; the mismatch is a
/// programming error and is checked before the value is examined.
pub fn classify(value: f64, bounds: &[f64], labels: &[&'static str]) -> &'static str {
    assert_eq!(
        bounds.len() + 1,
        labels.len(),
        "length mismatch between bounds and labels"
    );
    for (bound, label) in bounds.iter().zip(labels) {
        if value < *bound {
            return label;
        }
    }
    labels[labels.len() - 1]
}

/// Categorize a body-fat percentage using the gender-specific bounds
pub fn fat_category(fat_percent: f64, male: bool) -> &'static str {
    let bounds: [f64; 4] = if male {
        [6.0, 14.0, 18.0, 26.0]
    } else {
        [14.0, 21.0, 25.0, 32.0]
    };
    classify(fat_percent, &bounds, &FAT_LABELS)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BMI_BOUNDS: [f64; 3] = [18.5, 25.0, 30.0];

    #[test]
    fn test_classify_each_bucket() {
        assert_eq!(classify(15.0, &BMI_BOUNDS, &WEIGHT_LABELS), "Underweight");
        assert_eq!(classify(22.0, &BMI_BOUNDS, &WEIGHT_LABELS), "Normal");
        assert_eq!(classify(27.0, &BMI_BOUNDS, &WEIGHT_LABELS), "Overweight");
        assert_eq!(classify(35.0, &BMI_BOUNDS, &WEIGHT_LABELS), "Obese");
    }

    #[test]
    fn test_value_equal_to_bound_falls_into_next_bucket() {
        assert_eq!(classify(18.5, &BMI_BOUNDS, &WEIGHT_LABELS), "Normal");
        assert_eq!(classify(25.0, &BMI_BOUNDS, &WEIGHT_LABELS), "Overweight");
        assert_eq!(classify(30.0, &BMI_BOUNDS, &WEIGHT_LABELS), "Obese");
    }

    #[test]
    fn test_classify_extremes() {
        assert_eq!(classify(f64::MIN, &BMI_BOUNDS, &WEIGHT_LABELS), "Underweight");
        assert_eq!(classify(f64::MAX, &BMI_BOUNDS, &WEIGHT_LABELS), "Obese");
    }

    #[test]
    #[should_panic(expected = "length mismatch")]
    fn test_classify_rejects_mismatched_lengths() {
        classify(10.0, &[1.0, 2.0], &["a", "b"]);
    }

    #[test]
    fn test_fat_category_male() {
        assert_eq!(fat_category(4.0, true), "Essential Fat");
        assert_eq!(fat_category(10.0, true), "Athlete");
        assert_eq!(fat_category(16.0, true), "Fitness");
        assert_eq!(fat_category(20.0, true), "Average");
        assert_eq!(fat_category(30.0, true), "Obese");
    }

    #[test]
    fn test_fat_category_female() {
        assert_eq!(fat_category(10.0, false), "Essential Fat");
        assert_eq!(fat_category(18.0, false), "Athlete");
        assert_eq!(fat_category(23.0, false), "Fitness");
        assert_eq!(fat_category(28.0, false), "Average");
        assert_eq!(fat_category(40.0, false), "Obese");
    }
}
