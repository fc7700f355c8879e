use chrono::{TimeZone, Utc};
use serde_json::json;
use staffing_core::{
    CreateProjectInput, Employee, Project, UpdateEmployeeInput, UpdateProjectInput,
};
use uuid::Uuid;

#[test]
fn project_serializes_with_camel_case_fields() {
    let project = Project {
        id: Uuid::nil(),
        name: "test".to_string(),
        description: "d".to_string(),
        start_date: Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap(),
        end_date: None,
        active: true,
    };

    let value = serde_json::to_value(&project).unwrap();
    assert_eq!(value["startDate"], json!("2022-01-01T00:00:00Z"));
    assert_eq!(value["endDate"], json!(null));
    assert_eq!(value["active"], json!(true));
}

#[test]
fn employee_serializes_project_references_in_order() {
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();
    let employee = Employee {
        id: Uuid::nil(),
        name: "test".to_string(),
        post: "tester".to_string(),
        admission: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
        active: true,
        projects: vec![first, second],
    };

    let value = serde_json::to_value(&employee).unwrap();
    assert_eq!(
        value["projects"],
        json!([first.to_string(), second.to_string()])
    );
}

#[test]
fn request_payloads_leave_absent_fields_unset() {
    let create: CreateProjectInput = serde_json::from_value(json!({
        "name": "test",
        "description": "d",
        "startDate": "2022-01-01"
    }))
    .unwrap();
    assert_eq!(create.start_date, "2022-01-01");
    assert_eq!(create.end_date, None);
    assert_eq!(create.active, None);

    let update: UpdateProjectInput =
        serde_json::from_value(json!({ "endDate": "2022-01-01" })).unwrap();
    assert_eq!(update.end_date.as_deref(), Some("2022-01-01"));
    assert_eq!(update.name, None);

    let employee_update: UpdateEmployeeInput =
        serde_json::from_value(json!({ "projects": [] })).unwrap();
    assert_eq!(employee_update.projects, Some(Vec::new()));
}
