//! Ordinal bucketing of continuous survey fields.

use polars::prelude::*;

/// One labeled inclusive range of an ordinal bucketing.
#[derive(Debug, Clone, Copy)]
pub struct Bucket {
    pub lo: f64,
    pub hi: f64,
    pub label: &'static str,
}

/// Age buckets. Values outside every range get a null bucket.
pub const AGE_BUCKETS: [Bucket; 4] = [
    Bucket { lo: 18.0, hi: 20.0, label: "18-20" },
    Bucket { lo: 21.0, hi: 23.0, label: "21-23" },
    Bucket { lo: 24.0, hi: 26.0, label: "24-26" },
    Bucket { lo: 27.0, hi: 30.0, label: "27-30" },
];

/// Stress-level buckets on the 1-10 survey scale.
pub const STRESS_BUCKETS: [Bucket; 3] = [
    Bucket { lo: 1.0, hi: 3.0, label: "Low(1-3)" },
    Bucket { lo: 4.0, hi: 7.0, label: "Moderate(4-7)" },
    Bucket { lo: 8.0, hi: 10.0, label: "High(8-10)" },
];

/// Label for a value, or `None` when it falls outside every bucket.
pub fn bucket_label(value: f64, buckets: &[Bucket]) -> Option<&'static str> {
    buckets
        .iter()
        .find(|b| value >= b.lo && value <= b.hi)
        .map(|b| b.label)
}

/// Build a label column from numeric values. Nulls and out-of-range
/// values become null labels, never errors.
pub(crate) fn bucket_column(
    name: &str,
    values: &[Option<f64>],
    buckets: &[Bucket],
) -> Series {
    let labels: Vec<Option<String>> = values
        .iter()
        .map(|v| {
            v.and_then(|value| bucket_label(value, buckets))
                .map(|label| label.to_string())
        })
        .collect();
    Series::new(name.into(), labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_19_is_18_20() {
        assert_eq!(bucket_label(19.0, &AGE_BUCKETS), Some("18-20"));
    }

    #[test]
    fn test_age_31_is_outside_every_bucket() {
        assert_eq!(bucket_label(31.0, &AGE_BUCKETS), None);
        assert_eq!(bucket_label(17.0, &AGE_BUCKETS), None);
    }

    #[test]
    fn test_age_bucket_edges_are_inclusive() {
        assert_eq!(bucket_label(20.0, &AGE_BUCKETS), Some("18-20"));
        assert_eq!(bucket_label(21.0, &AGE_BUCKETS), Some("21-23"));
        assert_eq!(bucket_label(30.0, &AGE_BUCKETS), Some("27-30"));
    }

    #[test]
    fn test_stress_buckets() {
        assert_eq!(bucket_label(1.0, &STRESS_BUCKETS), Some("Low(1-3)"));
        assert_eq!(bucket_label(5.0, &STRESS_BUCKETS), Some("Moderate(4-7)"));
        assert_eq!(bucket_label(8.0, &STRESS_BUCKETS), Some("High(8-10)"));
        assert_eq!(bucket_label(10.0, &STRESS_BUCKETS), Some("High(8-10)"));
        assert_eq!(bucket_label(0.0, &STRESS_BUCKETS), None);
    }

    #[test]
    fn test_bucket_column_null_passthrough() {
        let series = bucket_column("Age Group", &[Some(19.0), None, Some(99.0)], &AGE_BUCKETS);
        assert_eq!(series.len(), 3);
        assert_eq!(series.null_count(), 2);
        assert!(series.get(0).unwrap().to_string().contains("18-20"));
    }
}
