#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use crate::db::SubstanceCatalog;
    use crate::error::TimelineError;
    use crate::models::{
        AdministrationRoute, DurationPhase, DurationRange, Ingestion, Rating, RatingOption,
        RoaDose, RoaDuration, SkipReason, SubstanceColor, TimedNote,
    };
    use crate::services::timeline::{compute_timeline, TimelineInput, TimelineOptions};

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 4, hour, minute, 0).unwrap()
    }

    // onset 30-60 min, comeup 60-120 min, peak 60-120 min, offset 60-120 min
    fn complete_duration() -> RoaDuration {
        RoaDuration {
            onset: Some(DurationRange::from_minutes(30.0, 60.0).unwrap()),
            comeup: Some(DurationRange::from_minutes(60.0, 120.0).unwrap()),
            peak: Some(DurationRange::from_minutes(60.0, 120.0).unwrap()),
            offset: Some(DurationRange::from_minutes(60.0, 120.0).unwrap()),
            ..Default::default()
        }
    }

    fn create_test_catalog() -> SubstanceCatalog {
        let catalog = SubstanceCatalog::new();
        catalog.insert_duration("MDMA", AdministrationRoute::Oral, complete_duration());
        catalog.insert_duration(
            "Cannabis",
            AdministrationRoute::Smoked,
            RoaDuration {
                offset: None,
                ..complete_duration()
            },
        );
        catalog
    }

    fn ingestion(name: &str, route: AdministrationRoute, dose: f64, time: DateTime<Utc>) -> Ingestion {
        Ingestion::new(name, route, Some(dose), time)
    }

    fn mdma(dose: f64, time: DateTime<Utc>) -> Ingestion {
        ingestion("MDMA", AdministrationRoute::Oral, dose, time)
    }

    fn input(ingestions: Vec<Ingestion>) -> TimelineInput {
        TimelineInput {
            ingestions,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_input_uses_fallback_width() {
        let now = at(12, 0);
        let model = compute_timeline(
            &TimelineInput::default(),
            &create_test_catalog(),
            now,
            &TimelineOptions::default(),
        );

        assert_eq!(model.total_width.value(), 7800.0);
        assert_eq!(model.start_time, now - Duration::minutes(10));
        assert!(model.has_no_curves());
        assert!(model.skipped_ingestions.is_empty());
        assert_eq!(model.x_for(now), Some(600.0 / 7800.0));
    }

    #[test]
    fn test_missing_offset_draws_no_curve() {
        let catalog = create_test_catalog();
        let model = compute_timeline(
            &input(vec![ingestion("Cannabis", AdministrationRoute::Smoked, 10.0, at(20, 0))]),
            &catalog,
            at(21, 0),
            &TimelineOptions::default(),
        );

        assert!(model.has_no_curves());
        assert_eq!(model.skipped_ingestions.len(), 1);
        assert_eq!(
            model.skipped_ingestions[0].reason,
            SkipReason::Incomplete {
                missing: vec![DurationPhase::Offset]
            }
        );
        // the skipped ingestion still occupies the frame
        assert_eq!(model.start_time, at(19, 50));
        assert_eq!(model.total_width.value(), 1200.0);
    }

    #[test]
    fn test_unknown_substance_has_no_duration_data() {
        let model = compute_timeline(
            &input(vec![
                ingestion("Unobtainium", AdministrationRoute::Oral, 1.0, at(9, 0)),
                mdma(100.0, at(9, 0)),
            ]),
            &create_test_catalog(),
            at(9, 30),
            &TimelineOptions::default(),
        );

        assert_eq!(model.ingestion_drawables.len(), 1);
        assert_eq!(model.skipped_ingestions.len(), 1);
        assert_eq!(model.skipped_ingestions[0].substance_name, "Unobtainium");
        assert_eq!(model.skipped_ingestions[0].reason, SkipReason::NoDurationData);
    }

    #[test]
    fn test_vertical_weights_relative_to_max_dose() {
        let model = compute_timeline(
            &input(vec![mdma(50.0, at(10, 0)), mdma(100.0, at(11, 0))]),
            &create_test_catalog(),
            at(12, 0),
            &TimelineOptions::default(),
        );

        let weights: Vec<f64> = model
            .ingestion_drawables
            .iter()
            .map(|d| d.vertical_weight)
            .collect();
        assert_eq!(weights, vec![0.5, 1.0]);
        assert_eq!(model.ingestion_drawables[0].line.rise.end.y, 0.5);
        assert_eq!(model.ingestion_drawables[1].line.rise.end.y, 1.0);
    }

    #[test]
    fn test_frame_covers_latest_curve() {
        let model = compute_timeline(
            &input(vec![mdma(50.0, at(10, 0)), mdma(100.0, at(11, 0))]),
            &create_test_catalog(),
            at(12, 0),
            &TimelineOptions::default(),
        );

        assert_eq!(model.start_time, at(9, 50));
        // second ingestion at 4200s plus a 25200s extent plus padding
        assert_eq!(model.total_width.value(), 4200.0 + 25200.0 + 600.0);
        assert_eq!(model.ingestion_drawables[1].end_offset.value(), 4200.0 + 25200.0);
        assert!(model.ingestion_drawables[1].around.fall_outer.end.x < 1.0);
    }

    #[test]
    fn test_ingestions_sorted_by_time() {
        let late = mdma(100.0, at(14, 0)).with_color(SubstanceColor::Red);
        let early = mdma(50.0, at(10, 0)).with_color(SubstanceColor::Green);
        let model = compute_timeline(
            &input(vec![late, early]),
            &create_test_catalog(),
            at(15, 0),
            &TimelineOptions::default(),
        );

        let times: Vec<_> = model.ingestion_drawables.iter().map(|d| d.time).collect();
        assert_eq!(times, vec![at(10, 0), at(14, 0)]);
        assert_eq!(model.ingestion_drawables[0].color, SubstanceColor::Green);
        assert_eq!(model.ingestion_drawables[0].vertical_weight, 0.5);
    }

    #[test]
    fn test_equal_times_keep_input_order() {
        let first = mdma(80.0, at(10, 0)).with_color(SubstanceColor::Pink);
        let second = mdma(40.0, at(10, 0)).with_color(SubstanceColor::Teal);
        let model = compute_timeline(
            &input(vec![first, second]),
            &create_test_catalog(),
            at(11, 0),
            &TimelineOptions::default(),
        );

        assert_eq!(model.ingestion_drawables[0].color, SubstanceColor::Pink);
        assert_eq!(model.ingestion_drawables[1].color, SubstanceColor::Teal);
        assert_eq!(model.ingestion_drawables[1].inset_level, 1);
    }

    #[test]
    fn test_overlapping_peaks_get_inset() {
        let model = compute_timeline(
            &input(vec![
                mdma(100.0, at(10, 0)),
                mdma(100.0, at(11, 0)),
                mdma(100.0, at(23, 0)),
            ]),
            &create_test_catalog(),
            at(23, 30),
            &TimelineOptions::default(),
        );

        let levels: Vec<usize> = model.ingestion_drawables.iter().map(|d| d.inset_level).collect();
        assert_eq!(levels, vec![0, 1, 0]);

        let first = &model.ingestion_drawables[0].peak_window;
        // 10 min padding, 45 min onset, 90 min comeup, then 90 min peak
        assert_eq!(first.start.value(), 600.0 + 2700.0 + 5400.0);
        assert_eq!(first.end.value(), first.start.value() + 5400.0);
    }

    #[test]
    fn test_dose_thresholds_stretch_peak() {
        let catalog = create_test_catalog();
        catalog.insert_dose(
            "MDMA",
            AdministrationRoute::Oral,
            RoaDose {
                units: "mg".into(),
                common_min: Some(75.0),
                strong_min: Some(140.0),
                ..Default::default()
            },
        );
        let model = compute_timeline(
            &input(vec![mdma(60.0, at(10, 0)), mdma(200.0, at(20, 0))]),
            &catalog,
            at(21, 0),
            &TimelineOptions::default(),
        );

        assert_eq!(model.ingestion_drawables[0].horizontal_weight, 0.0);
        assert_eq!(model.ingestion_drawables[1].horizontal_weight, 1.0);
        let light = model.ingestion_drawables[0].peak_window;
        let heavy = model.ingestion_drawables[1].peak_window;
        assert_eq!(light.end.value() - light.start.value(), 3600.0);
        assert_eq!(heavy.end.value() - heavy.start.value(), 7200.0);
    }

    #[test]
    fn test_all_points_normalized() {
        let model = compute_timeline(
            &input(vec![
                mdma(10.0, at(1, 0)),
                mdma(120.0, at(2, 30)),
                mdma(0.0, at(6, 45)).with_horizontal_weight(1.0),
            ]),
            &create_test_catalog(),
            at(7, 0),
            &TimelineOptions {
                bezier_ratio: 0.5,
                ..TimelineOptions::default()
            },
        );

        assert_eq!(model.ingestion_drawables.len(), 3);
        for drawable in &model.ingestion_drawables {
            for point in drawable.line.points().into_iter().chain(drawable.around.points()) {
                assert!(point.is_normalized(), "{point:?} outside unit square");
            }
        }
    }

    #[test]
    fn test_ratings_and_notes_positioned_and_sorted() {
        let timeline = TimelineInput {
            ingestions: vec![mdma(100.0, at(10, 0))],
            ratings: vec![
                Rating {
                    time: at(12, 0),
                    option: RatingOption::ThreePlus,
                },
                Rating {
                    time: at(10, 30),
                    option: RatingOption::Plus,
                },
            ],
            timed_notes: vec![TimedNote {
                time: at(11, 0),
                note: "music started".into(),
                color: SubstanceColor::Purple,
            }],
        };
        let model = compute_timeline(
            &timeline,
            &create_test_catalog(),
            at(12, 0),
            &TimelineOptions::default(),
        );

        let total = model.total_width.value();
        assert_eq!(total, 600.0 + 25200.0 + 600.0);

        let options: Vec<_> = model.rating_drawables.iter().map(|r| r.option).collect();
        assert_eq!(options, vec![RatingOption::Plus, RatingOption::ThreePlus]);
        assert_eq!(model.rating_drawables[0].offset.value(), 2400.0);
        assert_eq!(model.rating_drawables[0].x, 2400.0 / total);

        assert_eq!(model.timed_note_drawables.len(), 1);
        assert_eq!(model.timed_note_drawables[0].color, SubstanceColor::Purple);
        assert_eq!(model.timed_note_drawables[0].x, 4200.0 / total);
    }

    #[test]
    fn test_rating_before_first_ingestion_moves_start() {
        let timeline = TimelineInput {
            ingestions: vec![mdma(100.0, at(10, 0))],
            ratings: vec![Rating {
                time: at(9, 0),
                option: RatingOption::Minus,
            }],
            ..Default::default()
        };
        let model = compute_timeline(
            &timeline,
            &create_test_catalog(),
            at(12, 0),
            &TimelineOptions::default(),
        );

        assert_eq!(model.start_time, at(8, 50));
        assert_eq!(model.ingestion_drawables[0].start_offset.value(), 4200.0);
        assert_eq!(model.rating_drawables[0].x, 600.0 / model.total_width.value());
    }

    #[test]
    fn test_axis_ticks_within_frame() {
        let model = compute_timeline(
            &input(vec![mdma(100.0, at(10, 0))]),
            &create_test_catalog(),
            at(12, 0),
            &TimelineOptions::default(),
        );

        let total = model.total_width.value();
        assert!(!model.axis.ticks.is_empty());
        for pair in model.axis.ticks.windows(2) {
            assert!(pair[0].offset.value() < pair[1].offset.value());
        }
        for tick in &model.axis.ticks {
            assert!(tick.offset.value() >= 0.0 && tick.offset.value() <= total);
            assert_eq!(tick.label.len(), 5);
        }
    }

    #[test]
    fn test_recomputation_is_deterministic() {
        let timeline = input(vec![mdma(50.0, at(10, 0)), mdma(100.0, at(11, 0))]);
        let catalog = create_test_catalog();
        let options = TimelineOptions::default();
        let first = compute_timeline(&timeline, &catalog, at(12, 0), &options);
        let second = compute_timeline(&timeline, &catalog, at(12, 0), &options);
        assert_eq!(first, second);
    }

    #[test]
    fn test_closure_lookup() {
        let lookup = |_: &str, _: AdministrationRoute| Some(complete_duration());
        let model = compute_timeline(
            &input(vec![ingestion("Anything", AdministrationRoute::Rectal, 1.0, at(3, 0))]),
            &lookup,
            at(4, 0),
            &TimelineOptions::default(),
        );
        assert_eq!(model.ingestion_drawables.len(), 1);
    }

    #[test]
    fn test_options_validation() {
        assert!(TimelineOptions::default().validate().is_ok());

        let steep = TimelineOptions {
            bezier_ratio: 0.7,
            ..TimelineOptions::default()
        };
        assert!(matches!(steep.validate(), Err(TimelineError::InvalidParameter(_))));

        let negative_padding = TimelineOptions {
            padding: qtty::Seconds::new(-1.0),
            ..TimelineOptions::default()
        };
        assert!(negative_padding.validate().is_err());

        let mut zero_width = TimelineOptions::default();
        zero_width.axis.expected_width_px = 0.0;
        assert!(zero_width.validate().is_err());

        let mut far_offset = TimelineOptions::default();
        far_offset.axis.utc_offset_minutes = 24 * 60;
        assert!(far_offset.validate().is_err());
    }

    #[test]
    fn test_zero_padding_keeps_curves_inside_frame() {
        let options = TimelineOptions {
            padding: qtty::Seconds::new(0.0),
            ..TimelineOptions::default()
        };
        assert!(options.validate().is_ok());

        for a in 1..=12u32 {
            for b in 1..=12u32 {
                let (a, b) = (f64::from(a), f64::from(b));
                let catalog = SubstanceCatalog::new();
                catalog.insert_duration(
                    "Fractional",
                    AdministrationRoute::Oral,
                    RoaDuration {
                        onset: Some(DurationRange::new(0.1 * a, 0.7 * a).unwrap()),
                        comeup: Some(DurationRange::new(0.3 * b, 1.1 * b).unwrap()),
                        peak: Some(DurationRange::new(0.2 * a, 0.2 * a + 2.9 * b).unwrap()),
                        offset: Some(DurationRange::new(0.6 * b, 0.6 * b + 3.3 * a).unwrap()),
                        ..Default::default()
                    },
                );
                let start = at(8, 0);
                let later = start + Duration::milliseconds((a * 1000.0 + b * 7.0) as i64);
                let model = compute_timeline(
                    &input(vec![
                        ingestion("Fractional", AdministrationRoute::Oral, 10.0, start)
                            .with_horizontal_weight(1.0),
                        ingestion("Fractional", AdministrationRoute::Oral, 20.0, later)
                            .with_horizontal_weight(1.0),
                    ]),
                    &catalog,
                    start,
                    &options,
                );

                assert_eq!(model.start_time, start);
                assert_eq!(model.ingestion_drawables.len(), 2);
                for drawable in &model.ingestion_drawables {
                    for point in drawable.line.points().into_iter().chain(drawable.around.points()) {
                        assert!(point.is_normalized(), "{point:?} for a={a} b={b}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_extreme_timestamps_are_clamped() {
        let earliest = DateTime::<Utc>::MIN_UTC;
        let timeline = TimelineInput {
            ingestions: vec![mdma(100.0, DateTime::<Utc>::MAX_UTC - Duration::hours(1))],
            ratings: vec![Rating {
                time: earliest,
                option: RatingOption::Plus,
            }],
            ..Default::default()
        };
        let model = compute_timeline(
            &timeline,
            &create_test_catalog(),
            at(12, 0),
            &TimelineOptions::default(),
        );

        assert_eq!(model.start_time, earliest);
        assert_eq!(model.end_time(), DateTime::<Utc>::MAX_UTC);
        assert_eq!(model.rating_drawables[0].x, 0.0);
        assert_eq!(model.ingestion_drawables.len(), 1);
        assert!(model.axis.ticks.len() <= 11);

        let alone = compute_timeline(
            &TimelineInput {
                ratings: vec![Rating {
                    time: earliest,
                    option: RatingOption::Minus,
                }],
                ..Default::default()
            },
            &create_test_catalog(),
            at(12, 0),
            &TimelineOptions::default(),
        );
        assert_eq!(alone.start_time, earliest);
        assert!(alone.total_width.value() > 0.0);
    }
}
