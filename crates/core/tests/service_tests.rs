// ═══════════════════════════════════════════════════════════════════
// Service Tests — SeriesService (schema validation + reshape),
// FeedbackService (notifications + elapsed time)
// ═══════════════════════════════════════════════════════════════════

use chrono::{Duration, TimeZone, Utc};

use pnl_viewer_core::errors::CoreError;
use pnl_viewer_core::models::chart::PnlFrame;
use pnl_viewer_core::models::notification::Severity;
use pnl_viewer_core::models::pnl::{PnlData, PnlPeriod, PnlStep};
use pnl_viewer_core::services::feedback_service::{
    FeedbackService, ERROR_DURATION_MS, SUCCESS_DURATION_MS,
};
use pnl_viewer_core::services::series_service::SeriesService;

// ═══════════════════════════════════════════════════════════════════
// SeriesService — reshape
// ═══════════════════════════════════════════════════════════════════

mod reshape {
    use super::*;

    #[test]
    fn empty_mapping_yields_no_points() {
        let service = SeriesService::new();
        assert!(service.to_frames(&PnlData::new()).is_empty());
    }

    #[test]
    fn seconds_become_milliseconds_in_order() {
        let service = SeriesService::new();
        let data = PnlData::from([(0, 10.0), (86_400, 20.0)]);
        let frames = service.to_frames(&data);
        assert_eq!(
            frames,
            vec![
                PnlFrame {
                    timestamp_ms: 0,
                    usd: 10.0
                },
                PnlFrame {
                    timestamp_ms: 86_400_000,
                    usd: 20.0
                },
            ]
        );
    }

    #[test]
    fn preserves_every_entry() {
        let service = SeriesService::new();
        let data: PnlData = (0..500).map(|i| (1_600_000_000 + i * 3_600, i as f64)).collect();
        let frames = service.to_frames(&data);
        assert_eq!(frames.len(), 500);
        for ((epoch, usd), frame) in data.iter().zip(&frames) {
            assert_eq!(frame.timestamp_ms, epoch * 1000);
            assert_eq!(frame.usd, usd);
        }
    }

    #[test]
    fn negative_values_and_epochs_pass_through() {
        let service = SeriesService::new();
        let data = PnlData::from([(-60, -5.25)]);
        let frames = service.to_frames(&data);
        assert_eq!(frames[0].timestamp_ms, -60_000);
        assert_eq!(frames[0].usd, -5.25);
    }

    #[test]
    fn series_label_uses_address() {
        let service = SeriesService::new();
        let series = service.to_series("0xdead", &PnlData::from([(1, 1.0)]));
        assert_eq!(series.label, "0xdead PNL");
        assert_eq!(series.data.len(), 1);
    }

    #[test]
    fn placeholder_is_single_zero_point_at_now() {
        let service = SeriesService::new();
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let series = service.placeholder("0xabc", now);
        assert_eq!(series.label, "0xabc PNL");
        assert_eq!(
            series.data,
            vec![PnlFrame {
                timestamp_ms: now.timestamp_millis(),
                usd: 0.0
            }]
        );
    }
}

// ═══════════════════════════════════════════════════════════════════
// SeriesService — response validation
// ═══════════════════════════════════════════════════════════════════

mod validation {
    use super::*;

    fn malformed(body: &str) -> String {
        match SeriesService::parse_pnl_body(body) {
            Err(CoreError::MalformedResponse(msg)) => msg,
            other => panic!("expected MalformedResponse for {body:?}, got {other:?}"),
        }
    }

    #[test]
    fn accepts_api_shape() {
        let data =
            SeriesService::parse_pnl_body(r#"{"1700000000": 12.5, "1700086400": -3}"#).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.get(1_700_000_000), Some(12.5));
        assert_eq!(data.get(1_700_086_400), Some(-3.0));
    }

    #[test]
    fn accepts_empty_object() {
        assert!(SeriesService::parse_pnl_body("{}").unwrap().is_empty());
    }

    #[test]
    fn numeric_key_order_not_lexicographic() {
        let data = SeriesService::parse_pnl_body(r#"{"100": 1, "20": 2, "3": 3}"#).unwrap();
        let keys: Vec<i64> = data.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![3, 20, 100]);
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(malformed("not json").contains("not valid JSON"));
    }

    #[test]
    fn rejects_non_object() {
        assert!(malformed("[1, 2]").contains("an array"));
        assert!(malformed("null").contains("null"));
        assert!(malformed("\"text\"").contains("a string"));
    }

    #[test]
    fn rejects_non_integer_key() {
        assert!(malformed(r#"{"yesterday": 1}"#).contains("yesterday"));
        assert!(malformed(r#"{"1.5": 1}"#).contains("1.5"));
    }

    #[test]
    fn rejects_non_canonical_keys() {
        assert!(malformed(r#"{"086400": 1}"#).contains("086400"));
        assert!(malformed(r#"{" 86400": 1}"#).contains(" 86400"));
        assert!(malformed(r#"{"+86400": 1}"#).contains("canonical"));
        assert!(malformed(r#"{"-0": 1}"#).contains("canonical"));
    }

    #[test]
    fn alternate_spellings_of_one_epoch_are_not_merged() {
        let body = r#"{"86400": 1, "086400": 2, " 86400": 3, "+86400": 4}"#;
        assert!(matches!(
            SeriesService::parse_pnl_body(body),
            Err(CoreError::MalformedResponse(_))
        ));
    }

    #[test]
    fn negative_canonical_key_is_accepted() {
        let data = SeriesService::parse_pnl_body(r#"{"-60": 1.5}"#).unwrap();
        assert_eq!(data.get(-60), Some(1.5));
    }

    #[test]
    fn rejects_non_numeric_value() {
        assert!(malformed(r#"{"0": "10"}"#).contains("a string"));
        assert!(malformed(r#"{"0": null}"#).contains("null"));
        assert!(malformed(r#"{"0": {"usd": 1}}"#).contains("an object"));
    }

    #[test]
    fn rejects_epoch_that_overflows_millis() {
        let body = format!(r#"{{"{}": 1}}"#, i64::MAX);
        assert!(malformed(&body).contains("out of range"));
    }

    #[test]
    fn validate_takes_parsed_value() {
        let value = serde_json::json!({"0": 10, "86400": 20});
        let data = SeriesService::validate(&value).unwrap();
        assert_eq!(data, PnlData::from([(0, 10.0), (86_400, 20.0)]));
    }
}

// ═══════════════════════════════════════════════════════════════════
// FeedbackService
// ═══════════════════════════════════════════════════════════════════

mod feedback {
    use super::*;

    #[test]
    fn elapsed_rounds_to_nearest_second() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(FeedbackService::elapsed_secs(start, start), 0);
        assert_eq!(
            FeedbackService::elapsed_secs(start, start + Duration::milliseconds(499)),
            0
        );
        assert_eq!(
            FeedbackService::elapsed_secs(start, start + Duration::milliseconds(500)),
            1
        );
        assert_eq!(
            FeedbackService::elapsed_secs(start, start + Duration::milliseconds(2_600)),
            3
        );
    }

    #[test]
    fn elapsed_halves_round_up_when_clock_steps_back() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 1).unwrap();
        assert_eq!(
            FeedbackService::elapsed_secs(start, start - Duration::milliseconds(500)),
            0
        );
        assert_eq!(
            FeedbackService::elapsed_secs(start, start - Duration::milliseconds(1_500)),
            -1
        );
        assert_eq!(
            FeedbackService::elapsed_secs(start, start - Duration::milliseconds(1_600)),
            -2
        );
    }

    #[test]
    fn success_message() {
        let n = FeedbackService::new().success("0xabc", PnlStep::Week, PnlPeriod::All, 2);
        assert_eq!(n.title, "0xabc Step: 1W Period: ALL 2 sec");
        assert_eq!(n.severity, Severity::Success);
        assert_eq!(n.duration_ms, SUCCESS_DURATION_MS);
        assert_eq!(n.duration_ms, 3000);
        assert!(n.is_closable);
    }

    #[test]
    fn failure_message() {
        let n = FeedbackService::new().failure(4);
        assert_eq!(n.title, "Fetch PNL error. 4sec");
        assert_eq!(n.severity, Severity::Error);
        assert_eq!(n.duration_ms, ERROR_DURATION_MS);
        assert_eq!(n.duration_ms, 2000);
        assert!(n.is_closable);
    }
}
