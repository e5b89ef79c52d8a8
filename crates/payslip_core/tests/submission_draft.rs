use chrono::NaiveDate;
use payslip_core::{
    AttachmentSlot, ConfigurationError, DeliveryChannels, DraftError, FinancialYear, MonthName, PayloadRef,
    PeriodSelection, PlantConfig, PlantRegistry, SubmissionDraft, SubmissionMode,
    ValidationError,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 14).unwrap()
}

fn registry() -> PlantRegistry {
    PlantRegistry::new(vec![
        PlantConfig::new("Omkar", "drive-omkar")
            .with_document_source(FinancialYear::new(2024), "sheet-2024")
            .with_document_source(FinancialYear::new(2025), "sheet-2025"),
        PlantConfig::new("Kerur", "drive-kerur"),
    ])
    .unwrap()
}

fn single(code: &str) -> SubmissionMode {
    SubmissionMode::Single {
        employee_code: code.to_string(),
    }
}

#[test]
fn new_draft_is_seeded_with_previous_month() {
    let draft = SubmissionDraft::new(SubmissionMode::Batch, today());
    assert_eq!(
        draft.selections(),
        &[PeriodSelection::new(MonthName::June, FinancialYear::new(2025))]
    );
    assert_eq!(draft.plant(), None);
}

#[test]
fn first_period_cannot_be_removed() {
    let mut draft = SubmissionDraft::new(SubmissionMode::Batch, today());
    draft.add_period(PeriodSelection::new(MonthName::March, FinancialYear::new(2024)));

    assert!(!draft.remove_period(0));
    assert!(!draft.remove_period(5));
    assert!(draft.remove_period(1));
    assert_eq!(draft.selections().len(), 1);

    assert!(draft.update_period(
        0,
        PeriodSelection::new(MonthName::April, FinancialYear::new(2025))
    ));
    assert!(!draft.update_period(
        3,
        PeriodSelection::new(MonthName::April, FinancialYear::new(2025))
    ));
    assert_eq!(draft.selections()[0].month, MonthName::April);
}

#[test]
fn builds_single_request_with_ordered_content() {
    let mut draft = SubmissionDraft::new(single(" EMP-042 "), today());
    draft.select_plant("Omkar");
    draft.add_period(PeriodSelection::new(MonthName::February, FinancialYear::new(2024)));
    draft.set_channels(DeliveryChannels {
        email: true,
        whatsapp: false,
    });
    draft
        .sequence_mut()
        .set_message(PayloadRef::text("Please find your salary slip."));

    let request = draft.build(&registry(), today()).unwrap();
    assert_eq!(request.endpoint, "generate-salary-slip-single");
    assert_eq!(request.employee_code.as_deref(), Some("EMP-042"));
    assert_eq!(request.payload.periods().len(), 2);
    assert_eq!(request.payload.primary_period().month(), MonthName::June);
    assert_eq!(request.payload.periods()[1].calendar_year(), 2025);

    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["employee_code"], "EMP-042");
    assert_eq!(json["plant"], "Omkar");
    assert_eq!(json["send_email"], true);
    assert_eq!(json["send_whatsapp"], false);
    assert_eq!(json["sheet_id_drive"], "drive-omkar");
    assert_eq!(json["sheet_id_salary"], "sheet-2025");
    assert_eq!(json["full_month"], "June");
    assert_eq!(json["full_year"], "2025");
    assert_eq!(json["months_data"][1]["year"], "2025");
    assert!(json.get("endpoint").is_none());
}

#[test]
fn batch_request_omits_employee_code() {
    let mut draft = SubmissionDraft::new(SubmissionMode::Batch, today());
    draft.select_plant("Omkar");
    draft.sequence_mut().set_message(PayloadRef::text("m"));

    let request = draft.build(&registry(), today()).unwrap();
    assert_eq!(request.endpoint, "generate-salary-slips-batch");
    let json = serde_json::to_value(&request).unwrap();
    assert!(json.get("employee_code").is_none());
}

#[test]
fn build_reports_validation_failures() {
    let mut draft = SubmissionDraft::new(single("   "), today());
    draft.sequence_mut().set_message(PayloadRef::text("m"));

    let no_plant = draft.build(&registry(), today()).unwrap_err();
    assert!(matches!(
        no_plant,
        DraftError::Validation(ValidationError::NoPlantSelected)
    ));

    draft.select_plant("Omkar");
    let blank_code = draft.build(&registry(), today()).unwrap_err();
    assert!(matches!(
        blank_code,
        DraftError::Validation(ValidationError::EmptyEmployeeCode)
    ));

    draft.set_mode(single("EMP-1"));
    draft.add_period(PeriodSelection::new(MonthName::July, FinancialYear::new(2025)));
    let current_month = draft.build(&registry(), today()).unwrap_err();
    assert!(matches!(
        current_month,
        DraftError::Validation(ValidationError::MonthNotSelectable {
            month: MonthName::July,
            ..
        })
    ));
}

#[test]
fn build_requires_message_item() {
    let mut draft = SubmissionDraft::new(SubmissionMode::Batch, today());
    draft.select_plant("Omkar");
    let attachment = draft
        .sequence_mut()
        .add_attachment(PayloadRef::file("a.pdf", "application/pdf"));

    let err = draft.build(&registry(), today()).unwrap_err();
    assert!(matches!(
        err,
        DraftError::Validation(ValidationError::MissingMessage)
    ));
    assert_eq!(draft.sequence().position_of(attachment), Some(0));
}

#[test]
fn unconfigured_year_surfaces_as_configuration_error() {
    let mut draft = SubmissionDraft::new(SubmissionMode::Batch, today());
    draft.select_plant("Kerur");
    draft.sequence_mut().set_message(PayloadRef::text("m"));

    let err = draft.resolve_periods(&registry()).unwrap_err();
    assert!(matches!(
        err,
        DraftError::Configuration(ConfigurationError::MissingSource { .. })
    ));
    assert_eq!(err.to_string(), "no source configured for Kerur / 2025-26");

    draft.select_plant("Nowhere");
    assert!(matches!(
        draft.build(&registry(), today()),
        Err(DraftError::Configuration(ConfigurationError::UnknownPlant(_)))
    ));
}

#[test]
fn reordered_periods_travel_as_attachment_sequence() {
    let mut draft = SubmissionDraft::new(SubmissionMode::Batch, today());
    draft.select_plant("Omkar");
    draft.add_period(PeriodSelection::new(MonthName::February, FinancialYear::new(2024)));
    draft.add_period(PeriodSelection::new(MonthName::May, FinancialYear::new(2025)));
    draft.sequence_mut().set_message(PayloadRef::text("m"));

    // June 2025-26, February 2024-25, May 2025-26 -> May, June, February
    assert!(draft.reorder_period(2, 0));
    assert!(!draft.reorder_period(3, 0));
    assert_eq!(
        draft
            .attachment_order()
            .iter()
            .map(|selection| selection.month)
            .collect::<Vec<_>>(),
        vec![MonthName::May, MonthName::June, MonthName::February]
    );

    let request = draft.build(&registry(), today()).unwrap();
    assert_eq!(
        request.attachment_sequence,
        vec![
            AttachmentSlot {
                month: MonthName::May,
                year: 2025
            },
            AttachmentSlot {
                month: MonthName::June,
                year: 2025
            },
            AttachmentSlot {
                month: MonthName::February,
                year: 2024
            },
        ]
    );
    assert_eq!(request.payload.primary_period().month(), MonthName::June);

    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["full_month"], "June");
    assert_eq!(json["attachment_sequence"][0]["month"], "May");
    assert_eq!(json["attachment_sequence"][0]["year"], "2025");
    assert_eq!(json["attachment_sequence"][2]["month"], "February");
    assert_eq!(json["attachment_sequence"][2]["year"], "2024");
    assert_eq!(json["months_data"][2]["month"], "May");
}

#[test]
fn reorder_clamps_target_and_period_edits_reset_order() {
    let mut draft = SubmissionDraft::new(SubmissionMode::Batch, today());
    draft.add_period(PeriodSelection::new(MonthName::March, FinancialYear::new(2024)));
    draft.add_period(PeriodSelection::new(MonthName::April, FinancialYear::new(2025)));

    assert!(draft.reorder_period(0, 99));
    let months: Vec<_> = draft.attachment_order().iter().map(|s| s.month).collect();
    assert_eq!(months, vec![MonthName::March, MonthName::April, MonthName::June]);

    assert!(draft.remove_period(1));
    let months: Vec<_> = draft.attachment_order().iter().map(|s| s.month).collect();
    assert_eq!(months, vec![MonthName::June, MonthName::April]);
}
