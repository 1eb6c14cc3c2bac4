//! Time-series trend analysis.
//!
//! A series trend compares how far measurements sit from the reference
//! range in an earlier window versus a later one:
//! - IMPROVING: distance from normal shrank by more than 10%
//! - DECLINING: distance from normal grew by more than 10%
//! - STABLE: no significant change, or not enough data
//!
//! Velocity estimates the speed of change as an ordinary-least-squares
//! slope over the per-point distance from normal.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};

use crate::models::{DiagnosticTest, Measurement, Patient, SeriesKey, Trend};

/// Relative change in distance from normal needed to leave STABLE.
const CHANGE_THRESHOLD: f64 = 0.1;

/// Minimum dated points needed for any trend call.
const MIN_TREND_POINTS: usize = 2;

/// Minimum dated points needed for a velocity estimate.
const MIN_VELOCITY_POINTS: usize = 3;

/// Default lookback window for long-horizon trends.
const DEFAULT_LOOKBACK_DAYS: i64 = 180;

/// Denominators smaller than this are treated as zero.
const NEAR_ZERO: f64 = 0.001;

/// Analyze the long-horizon trend of a series over the default 180-day
/// lookback.
pub fn analyze_trend(measurements: &[Measurement], today: NaiveDate) -> Trend {
    analyze_trend_with_lookback(measurements, today, DEFAULT_LOOKBACK_DAYS)
}

/// Analyze the trend of a series over a caller-chosen lookback window.
///
/// Dated points newer than `today - lookback_days` are sorted ascending and
/// split at `max(1, n * 2 / 3)`: the first two thirds are "historical", the
/// rest "recent". Fewer than two qualifying points is STABLE by definition.
pub fn analyze_trend_with_lookback(
    measurements: &[Measurement],
    today: NaiveDate,
    lookback_days: i64,
) -> Trend {
    let points = dated_window(measurements, today, lookback_days);
    if points.len() < MIN_TREND_POINTS {
        return Trend::Stable;
    }

    let split = usize::max(1, points.len() * 2 / 3);
    split_trend(&points, split)
}

/// Analyze the short-horizon trend within a recent window.
///
/// Same comparison as [`analyze_trend_with_lookback`], but the filtered
/// points are split at their midpoint rather than the two-thirds mark,
/// answering "is this changing right now?" instead of "how has this moved
/// over the long run?".
pub fn analyze_recent_trend(
    measurements: &[Measurement],
    today: NaiveDate,
    window_days: i64,
) -> Trend {
    let points = dated_window(measurements, today, window_days);
    if points.len() < MIN_TREND_POINTS {
        return Trend::Stable;
    }

    split_trend(&points, points.len() / 2)
}

/// Rate of change of a series as an OLS slope.
///
/// Dated points are sorted ascending and regressed as (ordinal index,
/// distance from normal). Positive slope means moving away from normal,
/// negative means improving. Fewer than three dated points returns 0.0.
/// Points lacking a value or reference bound contribute a distance of 0.0.
pub fn trend_velocity(measurements: &[Measurement]) -> f64 {
    let mut points: Vec<&Measurement> = measurements.iter().filter(|m| m.date.is_some()).collect();
    points.sort_by_key(|m| m.date);

    if points.len() < MIN_VELOCITY_POINTS {
        return 0.0;
    }

    let n = points.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;

    for (i, point) in points.iter().enumerate() {
        let x = i as f64;
        let y = point.distance_from_normal().unwrap_or(0.0);
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }

    // n*Σx² - (Σx)² is nonzero for >= 3 consecutive integer indices
    (n * sum_xy - sum_x * sum_y) / (n * sum_xx - sum_x * sum_x)
}

/// Long-horizon trend for every series a patient owns.
pub fn patient_trends(patient: &Patient, today: NaiveDate) -> HashMap<SeriesKey, Trend> {
    patient
        .tests
        .iter()
        .map(|test| (test.series_key(), analyze_trend(&test.measurements, today)))
        .collect()
}

/// The latest dated measurement of a series, for current-status display.
pub fn most_recent_measurement(test: &DiagnosticTest) -> Option<&Measurement> {
    test.measurements
        .iter()
        .filter(|m| m.date.is_some())
        .max_by_key(|m| m.date)
}

/// Dated points strictly newer than the cutoff, sorted ascending.
fn dated_window(
    measurements: &[Measurement],
    today: NaiveDate,
    lookback_days: i64,
) -> Vec<&Measurement> {
    let cutoff = today - Duration::days(lookback_days);
    let mut points: Vec<&Measurement> = measurements
        .iter()
        .filter(|m| m.date.is_some_and(|d| d > cutoff))
        .collect();
    points.sort_by_key(|m| m.date);
    points
}

/// Compare the two halves of a sorted window and derive a trend.
fn split_trend(points: &[&Measurement], split: usize) -> Trend {
    let (historical, recent) = points.split_at(split);
    if historical.is_empty() || recent.is_empty() {
        return Trend::Stable;
    }

    let ratio = change_ratio(average_distance(historical), average_distance(recent));
    if ratio < -CHANGE_THRESHOLD {
        Trend::Improving
    } else if ratio > CHANGE_THRESHOLD {
        Trend::Declining
    } else {
        Trend::Stable
    }
}

/// Average distance from normal over a window.
///
/// Points with a missing value or reference bound are excluded; a window
/// with no usable points averages 0.0.
fn average_distance(points: &[&Measurement]) -> f64 {
    let distances: Vec<f64> = points
        .iter()
        .filter_map(|m| m.distance_from_normal())
        .collect();

    if distances.is_empty() {
        0.0
    } else {
        distances.iter().sum::<f64>() / distances.len() as f64
    }
}

/// Relative change between two period averages.
///
/// A near-zero historical average means the series was effectively at
/// normal; any real recent distance then counts as a full-change ratio of
/// 1.0 rather than dividing by ~zero.
fn change_ratio(historical: f64, recent: f64) -> f64 {
    if historical.abs() < NEAR_ZERO {
        if recent > NEAR_ZERO {
            1.0
        } else {
            0.0
        }
    } else {
        (recent - historical) / historical.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReferenceRange;

    const RANGE: ReferenceRange = ReferenceRange { min: 10.0, max: 20.0 };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 6, 1)
    }

    fn measurement(value: f64, taken: NaiveDate) -> Measurement {
        Measurement::with_range(Some(value), Some(taken), RANGE)
    }

    /// Evenly spaced dated series ending a week before "today".
    fn series(values: &[f64]) -> Vec<Measurement> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let days_ago = 7 + 14 * (values.len() - 1 - i) as i64;
                measurement(v, today() - Duration::days(days_ago))
            })
            .collect()
    }

    #[test]
    fn test_all_in_range_is_stable() {
        let measurements = series(&[12.0, 14.0, 16.0, 13.0]);
        assert_eq!(analyze_trend(&measurements, today()), Trend::Stable);
    }

    #[test]
    fn test_insufficient_points_is_stable() {
        assert_eq!(analyze_trend(&[], today()), Trend::Stable);

        let one = series(&[5.0]);
        assert_eq!(analyze_trend(&one, today()), Trend::Stable);
    }

    #[test]
    fn test_distance_shrinking_is_improving() {
        // n = 6, split at 4: historical avg distance 0.5, recent avg 0.1
        // ratio = (0.1 - 0.5) / 0.5 = -0.8
        let measurements = series(&[5.0, 5.0, 5.0, 5.0, 9.0, 9.0]);
        assert_eq!(analyze_trend(&measurements, today()), Trend::Improving);
    }

    #[test]
    fn test_distance_growing_is_declining() {
        let measurements = series(&[9.0, 9.0, 9.0, 9.0, 5.0, 5.0]);
        assert_eq!(analyze_trend(&measurements, today()), Trend::Declining);
    }

    #[test]
    fn test_leaving_normal_is_full_change() {
        // historical avg ~0 (all in range), recent slightly out: ratio 1.0
        let measurements = series(&[14.0, 15.0, 14.5, 16.0, 21.0, 21.0]);
        assert_eq!(analyze_trend(&measurements, today()), Trend::Declining);
    }

    #[test]
    fn test_points_outside_lookback_ignored() {
        // Two critical points 300+ days old, one recent point: only the
        // recent point qualifies, so there is no trend to call.
        let measurements = vec![
            measurement(2.0, today() - Duration::days(320)),
            measurement(2.5, today() - Duration::days(300)),
            measurement(14.0, today() - Duration::days(5)),
        ];
        assert_eq!(analyze_trend(&measurements, today()), Trend::Stable);
    }

    #[test]
    fn test_cutoff_boundary_excluded() {
        // A point exactly at the cutoff is outside the window.
        let measurements = vec![
            measurement(5.0, today() - Duration::days(180)),
            measurement(5.0, today() - Duration::days(179)),
            measurement(14.0, today() - Duration::days(5)),
        ];
        // Only two points qualify: split 1/1, 0.5 -> 0.0 distance
        assert_eq!(analyze_trend(&measurements, today()), Trend::Improving);
    }

    #[test]
    fn test_unsorted_input_is_sorted_by_date() {
        let mut measurements = series(&[5.0, 5.0, 5.0, 5.0, 9.0, 9.0]);
        measurements.reverse();
        assert_eq!(analyze_trend(&measurements, today()), Trend::Improving);
    }

    #[test]
    fn test_undated_points_ignored() {
        let mut measurements = series(&[5.0, 5.0, 5.0, 5.0, 9.0, 9.0]);
        measurements.push(Measurement::with_range(Some(25.0), None, RANGE));
        assert_eq!(analyze_trend(&measurements, today()), Trend::Improving);
    }

    #[test]
    fn test_recent_trend_splits_at_midpoint() {
        // n = 4 within window, split 2/2: distances 0.25, 0.25 then 0, 0
        let measurements = series(&[7.5, 7.5, 14.0, 15.0]);
        assert_eq!(
            analyze_recent_trend(&measurements, today(), 90),
            Trend::Improving
        );
    }

    #[test]
    fn test_recent_trend_window_filter() {
        // Abnormal history sits outside the 30-day window
        let measurements = vec![
            measurement(5.0, today() - Duration::days(60)),
            measurement(5.0, today() - Duration::days(45)),
            measurement(14.0, today() - Duration::days(10)),
            measurement(14.0, today() - Duration::days(3)),
        ];
        assert_eq!(
            analyze_recent_trend(&measurements, today(), 30),
            Trend::Stable
        );
    }

    #[test]
    fn test_velocity_positive_when_worsening() {
        // Distances 0.05, 0.10, 0.15, 0.20, 0.25: slope 0.05 per step
        let measurements = series(&[21.0, 22.0, 23.0, 24.0, 25.0]);
        let slope = trend_velocity(&measurements);
        assert!(slope > 0.0);
        assert!((slope - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_velocity_negative_when_improving() {
        let measurements = series(&[25.0, 24.0, 23.0, 22.0, 21.0]);
        assert!(trend_velocity(&measurements) < 0.0);
    }

    #[test]
    fn test_velocity_needs_three_points() {
        let measurements = series(&[21.0, 25.0]);
        assert_eq!(trend_velocity(&measurements), 0.0);
    }

    #[test]
    fn test_velocity_flat_series_is_zero() {
        let measurements = series(&[14.0, 14.0, 14.0, 14.0]);
        assert_eq!(trend_velocity(&measurements), 0.0);
    }

    #[test]
    fn test_velocity_denominator_invariant() {
        // n*Σx² - (Σx)² over consecutive indices is never zero for n >= 3
        for n in 3usize..12 {
            let sum_x: f64 = (0..n).map(|i| i as f64).sum();
            let sum_xx: f64 = (0..n).map(|i| (i * i) as f64).sum();
            let denominator = n as f64 * sum_xx - sum_x * sum_x;
            assert!(denominator > 0.0);
        }
    }

    #[test]
    fn test_patient_trends_keyed_per_series() {
        let mut patient = Patient::new("Luna".into(), "feline".into());

        let mut improving = DiagnosticTest::with_range(
            "Complete Blood Count".into(),
            "Hemoglobin".into(),
            "g/dL".into(),
            ReferenceRange::new(10.0, 20.0),
        );
        for (i, v) in [5.0, 5.0, 5.0, 5.0, 9.0, 9.0].iter().enumerate() {
            improving.record(*v, today() - Duration::days(100 - 14 * i as i64));
        }
        let improving_key = improving.series_key();
        patient.add_test(improving);

        let mut stable =
            DiagnosticTest::new("Chemistry Panel".into(), "Glucose".into());
        stable.record(90.0, today() - Duration::days(30));
        let stable_key = stable.series_key();
        patient.add_test(stable);

        let trends = patient_trends(&patient, today());
        assert_eq!(trends.len(), 2);
        assert_eq!(trends[&improving_key], Trend::Improving);
        assert_eq!(trends[&stable_key], Trend::Stable);
    }

    #[test]
    fn test_most_recent_measurement() {
        let mut test = DiagnosticTest::with_range(
            "Chemistry Panel".into(),
            "Glucose".into(),
            "mg/dL".into(),
            ReferenceRange::new(70.0, 150.0),
        );
        test.record(92.0, date(2024, 1, 10));
        test.record(101.0, date(2024, 3, 2));
        test.record(88.0, date(2024, 2, 1));
        test.measurements.push(Measurement::new(Some(95.0), None));

        let latest = most_recent_measurement(&test).unwrap();
        assert_eq!(latest.value, Some(101.0));

        let empty = DiagnosticTest::new("Urinalysis".into(), "pH".into());
        assert!(most_recent_measurement(&empty).is_none());
    }
}
