//! Segment planning.
//!
//! Turns redaction ranges into an ordered list of ORIGINAL / TONE segments
//! that tiles `[0, total_duration)` exactly. Pure: no I/O, no logging.
//!
//! ```text
//! total = 10, ranges = [2,4] [6,7]
//!
//! 0         2         4         6    7              10
//! |-original-|--tone---|-original-|tone|---original---|
//! ```

use super::types::{Segment, TimeRange};

/// Shortest segment the planner emits.
///
/// Media tools take lengths in whole microseconds; anything shorter would
/// reach them as a zero length, which FFmpeg reads as "unbounded".
pub const MIN_SEGMENT_SECS: f64 = 1e-6;

/// Plan the output timeline.
///
/// 1. No ranges: one ORIGINAL segment `[0, total)`.
/// 2. Ranges with a non-finite bound are dropped.
/// 3. Remaining ranges are stable-sorted by start, then clamped into
///    `[0, total]`; ranges that become empty vanish.
/// 4. Overlapping or touching ranges are coalesced into one span, as are
///    ranges separated by less than [`MIN_SEGMENT_SECS`].
/// 5. Spans shorter than [`MIN_SEGMENT_SECS`] are dropped, and spans that
///    come within it of either end of the timeline are extended to it.
/// 6. A cursor walk from 0 emits ORIGINAL for each gap and TONE for each
///    span, then a trailing ORIGINAL up to `total`.
///
/// Every emitted segment is at least [`MIN_SEGMENT_SECS`] long. A
/// non-finite `total_duration`, or one shorter than that, yields an empty
/// plan.
pub fn plan(total_duration: f64, ranges: &[TimeRange]) -> Vec<Segment> {
    if !total_duration.is_finite() || total_duration < MIN_SEGMENT_SECS {
        return Vec::new();
    }

    if ranges.is_empty() {
        return vec![Segment::original(0.0, total_duration)];
    }

    let spans = normalize_ranges(total_duration, ranges);

    let mut segments = Vec::with_capacity(spans.len() * 2 + 1);
    let mut cursor = 0.0;

    for span in &spans {
        if cursor < span.start {
            segments.push(Segment::original(cursor, span.start));
        }
        segments.push(Segment::tone(span.start, span.end));
        cursor = span.end;
    }

    if cursor < total_duration {
        segments.push(Segment::original(cursor, total_duration));
    }

    segments
}

/// Sorted, clamped, non-empty, pairwise-disjoint redaction spans.
///
/// For every pair of consecutive results `a`, `b`:
/// `b.start - a.end >= MIN_SEGMENT_SECS`. Every span is at least that long,
/// and so are the gaps to `0` and `total_duration` when not zero.
pub fn normalize_ranges(total_duration: f64, ranges: &[TimeRange]) -> Vec<TimeRange> {
    if !total_duration.is_finite() || total_duration < MIN_SEGMENT_SECS {
        return Vec::new();
    }

    let mut sorted: Vec<TimeRange> = ranges.iter().copied().filter(TimeRange::is_finite).collect();
    // `sort_by` is stable; equal starts keep caller order
    sorted.sort_by(|a, b| a.start.total_cmp(&b.start));

    let mut merged: Vec<TimeRange> = Vec::with_capacity(sorted.len());
    for range in sorted {
        let range = range.clamped(total_duration);
        if range.end <= range.start {
            continue;
        }

        match merged.last_mut() {
            Some(last) if range.start - last.end < MIN_SEGMENT_SECS => {
                last.end = last.end.max(range.end);
            }
            _ => merged.push(range),
        }
    }

    // too short to render; the audio underneath stays original
    merged.retain(|span| span.end - span.start >= MIN_SEGMENT_SECS);

    if let Some(first) = merged.first_mut() {
        if first.start < MIN_SEGMENT_SECS {
            first.start = 0.0;
        }
    }
    if let Some(last) = merged.last_mut() {
        if total_duration - last.end < MIN_SEGMENT_SECS {
            last.end = total_duration;
        }
    }

    merged
}

/// Total seconds covered by TONE segments.
pub fn tone_seconds(segments: &[Segment]) -> f64 {
    segments
        .iter()
        .filter(|s| s.is_tone())
        .map(Segment::duration)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges(pairs: &[(f64, f64)]) -> Vec<TimeRange> {
        pairs.iter().copied().map(TimeRange::from).collect()
    }

    /// Segments tile `[0, total)` in order with no gap, overlap or empty span.
    fn assert_tiles(segments: &[Segment], total: f64) {
        assert!(!segments.is_empty(), "plan for {} is empty", total);
        assert_eq!(segments[0].start, 0.0);
        assert_eq!(segments[segments.len() - 1].end, total);
        for seg in segments {
            assert!(
                seg.duration() >= MIN_SEGMENT_SECS,
                "segment {} shorter than {}s",
                seg,
                MIN_SEGMENT_SECS
            );
        }
        for pair in segments.windows(2) {
            assert_eq!(pair[0].end, pair[1].start, "gap/overlap at {}", pair[0]);
        }
    }

    #[test]
    fn no_ranges_keeps_whole_file() {
        assert_eq!(plan(10.0, &[]), vec![Segment::original(0.0, 10.0)]);
    }

    #[test]
    fn two_ranges_alternate_segments() {
        let segments = plan(10.0, &ranges(&[(2.0, 4.0), (6.0, 7.0)]));
        assert_eq!(
            segments,
            vec![
                Segment::original(0.0, 2.0),
                Segment::tone(2.0, 4.0),
                Segment::original(4.0, 6.0),
                Segment::tone(6.0, 7.0),
                Segment::original(7.0, 10.0),
            ]
        );
    }

    #[test]
    fn full_range_is_single_tone() {
        assert_eq!(
            plan(10.0, &ranges(&[(0.0, 10.0)])),
            vec![Segment::tone(0.0, 10.0)]
        );
    }

    #[test]
    fn unsorted_input_matches_sorted() {
        assert_eq!(
            plan(10.0, &ranges(&[(6.0, 7.0), (2.0, 4.0)])),
            plan(10.0, &ranges(&[(2.0, 4.0), (6.0, 7.0)]))
        );
    }

    #[test]
    fn ranges_outside_timeline_vanish() {
        let segments = plan(10.0, &ranges(&[(12.0, 15.0), (-5.0, -1.0)]));
        assert_eq!(segments, vec![Segment::original(0.0, 10.0)]);
    }

    #[test]
    fn partially_outside_ranges_are_clamped() {
        let segments = plan(10.0, &ranges(&[(-1.0, 1.0), (9.0, 20.0)]));
        assert_eq!(
            segments,
            vec![
                Segment::tone(0.0, 1.0),
                Segment::original(1.0, 9.0),
                Segment::tone(9.0, 10.0),
            ]
        );
    }

    #[test]
    fn zero_length_and_inverted_ranges_emit_nothing() {
        let segments = plan(10.0, &ranges(&[(5.0, 5.0), (8.0, 3.0)]));
        assert_eq!(segments, vec![Segment::original(0.0, 10.0)]);
    }

    #[test]
    fn overlapping_ranges_are_coalesced() {
        let segments = plan(10.0, &ranges(&[(2.0, 5.0), (4.0, 6.0), (3.0, 3.5)]));
        assert_eq!(
            segments,
            vec![
                Segment::original(0.0, 2.0),
                Segment::tone(2.0, 6.0),
                Segment::original(6.0, 10.0),
            ]
        );
    }

    #[test]
    fn touching_ranges_are_coalesced() {
        let segments = plan(10.0, &ranges(&[(2.0, 4.0), (4.0, 6.0)]));
        assert_eq!(
            segments,
            vec![
                Segment::original(0.0, 2.0),
                Segment::tone(2.0, 6.0),
                Segment::original(6.0, 10.0),
            ]
        );
    }

    #[test]
    fn non_finite_ranges_are_dropped() {
        let segments = plan(
            10.0,
            &ranges(&[(f64::NAN, 3.0), (1.0, f64::INFINITY), (4.0, 5.0)]),
        );
        assert_eq!(
            segments,
            vec![
                Segment::original(0.0, 4.0),
                Segment::tone(4.0, 5.0),
                Segment::original(5.0, 10.0),
            ]
        );
    }

    #[test]
    fn degenerate_duration_yields_empty_plan() {
        assert!(plan(0.0, &[]).is_empty());
        assert!(plan(-3.0, &ranges(&[(0.0, 1.0)])).is_empty());
        assert!(plan(f64::NAN, &ranges(&[(0.0, 1.0)])).is_empty());
        assert!(plan(4e-7, &[]).is_empty());
    }

    #[test]
    fn sub_microsecond_range_is_dropped() {
        assert_eq!(
            plan(10.0, &ranges(&[(1.0, 1.0000004)])),
            vec![Segment::original(0.0, 10.0)]
        );
        assert!(normalize_ranges(10.0, &ranges(&[(3.0, 3.0000001)])).is_empty());
    }

    #[test]
    fn sub_microsecond_gap_is_absorbed_into_tone() {
        assert_eq!(
            plan(10.0, &ranges(&[(1.0, 2.0), (2.0000004, 3.0)])),
            vec![
                Segment::original(0.0, 1.0),
                Segment::tone(1.0, 3.0),
                Segment::original(3.0, 10.0),
            ]
        );
    }

    #[test]
    fn spans_near_timeline_ends_are_snapped() {
        assert_eq!(
            plan(10.0, &ranges(&[(0.0000003, 2.0), (8.0, 9.9999996)])),
            vec![
                Segment::tone(0.0, 2.0),
                Segment::original(2.0, 8.0),
                Segment::tone(8.0, 10.0),
            ]
        );
    }

    #[test]
    fn normalized_ranges_are_disjoint_and_sorted() {
        let spans = normalize_ranges(
            30.0,
            &ranges(&[(20.0, 25.0), (1.0, 2.0), (1.5, 3.0), (24.0, 40.0), (10.0, 10.0)]),
        );
        assert_eq!(spans, ranges(&[(1.0, 3.0), (20.0, 30.0)]));
    }

    #[test]
    fn tone_seconds_sums_tone_segments() {
        let segments = plan(10.0, &ranges(&[(2.0, 4.0), (6.0, 7.0)]));
        assert!((tone_seconds(&segments) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn random_inputs_always_tile_the_timeline() {
        // xorshift, fixed seed: deterministic sweep
        let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state % 10_000) as f64 / 1000.0
        };

        for _ in 0..500 {
            let total = next() + 0.001;
            let count = (next() * 1000.0) as usize % 8;
            let input: Vec<TimeRange> = (0..count)
                .map(|_| TimeRange::new(next() - 1.0, next() - 1.0))
                .collect();

            let segments = plan(total, &input);
            assert_tiles(&segments, total);

            // kinds alternate once ranges are coalesced
            for pair in segments.windows(2) {
                assert_ne!(pair[0].kind, pair[1].kind);
            }

            let expected_tone: f64 = normalize_ranges(total, &input)
                .iter()
                .map(|r| r.end - r.start)
                .sum();
            assert!((tone_seconds(&segments) - expected_tone).abs() < 1e-9);
        }
    }
}
