#![cfg(feature = "serde")]

use rosu_clear::{
    condition::{CheckInterval, ClearConditionSettings, JudgementChallengeSettings},
    model::hit_result::HitResult,
};

#[test]
fn missing_fields_use_defaults() {
    let settings: ClearConditionSettings =
        serde_json::from_str(r#"{ "check_interval": "AtBreak", "min_accuracy": 95.0 }"#).unwrap();

    let expected = ClearConditionSettings::new()
        .check_interval(CheckInterval::AtBreak)
        .min_accuracy(95.0);

    assert_eq!(settings, expected);
    assert_eq!(settings.get_max_imperfect_judgements(), None);
}

#[test]
fn settings_survive_json() {
    let settings = ClearConditionSettings::new()
        .min_health(20.0)
        .max_imperfect_judgements(Some(3));

    let json = serde_json::to_string(&settings).unwrap();
    let back: ClearConditionSettings = serde_json::from_str(&json).unwrap();

    assert_eq!(back, settings);

    let challenge = JudgementChallengeSettings::new().max(HitResult::Meh, Some(10));

    let json = serde_json::to_string(&challenge).unwrap();
    let back: JudgementChallengeSettings = serde_json::from_str(&json).unwrap();

    assert_eq!(back.get_max(HitResult::Meh), Some(10));
    assert_eq!(back.get_max(HitResult::Miss), None);
}

#[test]
fn deserialized_percentages_are_clamped() {
    let settings: ClearConditionSettings =
        serde_json::from_str(r#"{ "min_accuracy": 150.0, "min_health": -20.0 }"#).unwrap();

    assert_eq!(settings.get_min_accuracy(), 100.0);
    assert_eq!(settings.get_min_health(), 0.0);
    assert_eq!(
        settings,
        ClearConditionSettings::new().min_accuracy(150.0).min_health(-20.0)
    );
}
