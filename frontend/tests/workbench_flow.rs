use frontend::api::{DatasetFile, Endpoint, ScriptedService};
use frontend::workbench::dispatcher::{FollowUp, OperationKind};
use frontend::workbench::feedback::{FeedbackScope, Severity};
use frontend::workbench::selector::Axis;
use frontend::workbench::{SelectorTarget, Session};
use futures::executor::block_on;
use pretty_assertions::assert_eq;

const UPLOAD: &str = r#"{
    "filename": "sales.csv",
    "rows": 1200,
    "columns": ["region", "units", "price"],
    "column_types": {"region": "categorical", "units": "numeric", "price": "numeric"},
    "missing_values": {"units": 3},
    "sample_data": [
        {"region": "North", "units": 4, "price": 9.5},
        {"region": "South", "units": null, "price": 12.0}
    ]
}"#;

const PREVIEW_AFTER_UPLOAD: &str = r#"{
    "columns": ["region", "units", "price"],
    "rows": 1200,
    "sample_data": [
        {"region": "North", "units": 4, "price": 9.5},
        {"region": "South", "units": null, "price": 12.0}
    ],
    "missing_values": {"units": 3}
}"#;

const PREVIEW_AFTER_ENCODE: &str = r#"{
    "columns": ["units", "price", "region_North", "region_South"],
    "rows": 1200,
    "sample_data": [
        {"units": 4, "price": 9.5, "region_North": 1, "region_South": 0},
        {"units": null, "price": 12.0, "region_North": 0, "region_South": 1}
    ],
    "missing_values": {"units": 3}
}"#;

const PREVIEW_AFTER_DROP: &str = r#"{
    "columns": ["units", "region_North", "region_South"],
    "rows": 1200,
    "sample_data": [
        {"units": 4, "region_North": 1, "region_South": 0}
    ],
    "missing_values": {}
}"#;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn sales_csv() -> Option<DatasetFile> {
    Some(DatasetFile {
        name: "sales.csv".into(),
        bytes: b"region,units,price\nNorth,4,9.5\n".to_vec(),
    })
}

#[test]
fn a_full_session_from_upload_to_reset() {
    let service = ScriptedService::new();
    service
        .reply(Endpoint::Upload, UPLOAD)
        .reply(Endpoint::Preview, PREVIEW_AFTER_UPLOAD)
        .reply(Endpoint::Encode, r#"{"message": "Encoded 1 column(s) with onehot"}"#)
        .reply(Endpoint::Preview, PREVIEW_AFTER_ENCODE)
        .reply(Endpoint::DropColumns, r#"{"message": "Dropped 1 column(s)"}"#)
        .reply(Endpoint::Preview, PREVIEW_AFTER_DROP)
        .reply(Endpoint::Visualize, r#"{"image": "data:image/png;base64,iVBORw0KGgo="}"#)
        .reply(Endpoint::Download, r#"{"content": "dW5pdHMKNAo=", "filename": "processed_sales.csv"}"#)
        .reply(Endpoint::Reset, r#"{"message": "Data reset to original state"}"#)
        .reply(Endpoint::Preview, PREVIEW_AFTER_UPLOAD);
    let mut session = Session::new(service);

    assert_eq!(block_on(session.upload(sales_csv())), Ok(FollowUp::Refresh));
    assert_eq!(
        session.workbench().selector(SelectorTarget::Encoding).columns(),
        names(&["region"]).as_slice()
    );

    // One-hot encoding introduces columns the service does not type.
    let workbench = session.workbench_mut();
    workbench.inputs.encoding_method = "onehot".into();
    assert!(workbench.toggle(SelectorTarget::Encoding, "region"));
    assert_eq!(block_on(session.submit(OperationKind::Encode)), Ok(FollowUp::Refresh));

    let workbench = session.workbench();
    assert_eq!(
        workbench.selector(SelectorTarget::Normalize).columns(),
        names(&["units", "price", "region_North", "region_South"]).as_slice()
    );
    assert!(workbench.selector(SelectorTarget::Encoding).columns().is_empty());
    assert_eq!(
        workbench.feedback(FeedbackScope::Encoding).map(|f| f.message.as_str()),
        Some("Encoded 1 column(s) with onehot")
    );

    session.workbench_mut().toggle(SelectorTarget::DropColumns, "price");
    assert_eq!(block_on(session.submit(OperationKind::DropColumns)), Ok(FollowUp::Refresh));
    assert_eq!(
        session.workbench().schema().map(|s| s.columns().to_vec()),
        Some(names(&["units", "region_North", "region_South"]))
    );
    assert!(!session.workbench().selector(SelectorTarget::DropColumns).has_selection());

    let workbench = session.workbench_mut();
    workbench.inputs.chart_type = "histogram".into();
    workbench.choose_axis(Axis::X, Some("units".into()));
    assert_eq!(block_on(session.submit(OperationKind::Visualize)), Ok(FollowUp::Nothing));
    assert_eq!(session.workbench().gallery().len(), 1);

    match block_on(session.submit(OperationKind::Download)) {
        Ok(FollowUp::Deliver(file)) => {
            assert_eq!(file.filename, "processed_sales.csv");
            assert_eq!(file.mime, "text/csv");
            assert_eq!(file.bytes, b"units\n4\n".to_vec());
        }
        other => panic!("expected a file to deliver, got {:?}", other),
    }

    // Reset restores the uploaded dataset on the service side.
    assert_eq!(block_on(session.submit(OperationKind::Reset)), Ok(FollowUp::Refresh));
    let workbench = session.workbench();
    assert_eq!(
        workbench.schema().map(|s| s.columns().to_vec()),
        Some(names(&["region", "units", "price"]))
    );
    assert_eq!(workbench.axes().columns(), names(&["region", "units", "price"]).as_slice());
    assert_eq!(
        workbench.selector(SelectorTarget::Encoding).columns(),
        names(&["region"]).as_slice()
    );
    assert!(workbench.workspace_open());
    assert_eq!(
        workbench
            .feedback(FeedbackScope::Upload)
            .map(|f| (f.message.as_str(), f.severity)),
        Some(("Data reset to original state", Severity::Success))
    );

    let service = session.service();
    assert_eq!(service.count(Endpoint::Preview), 4);
    let encode = service
        .calls()
        .into_iter()
        .find(|call| call.endpoint == Endpoint::Encode)
        .map(|call| call.fields);
    assert_eq!(
        encode,
        Some(vec![
            ("columns", r#"["region"]"#.to_string()),
            ("method", "onehot".to_string()),
        ])
    );
}

#[test]
fn a_service_error_leaves_the_dataset_untouched() {
    let service = ScriptedService::new();
    service
        .reply(Endpoint::Upload, UPLOAD)
        .reply(Endpoint::Preview, PREVIEW_AFTER_UPLOAD)
        .reply(Endpoint::Normalize, r#"{"error": "Column 'region' is not numeric"}"#);
    let mut session = Session::new(service);
    block_on(session.upload(sales_csv())).unwrap();

    let workbench = session.workbench_mut();
    workbench.inputs.normalize_method = "minmax".into();
    workbench.toggle(SelectorTarget::Normalize, "units");
    let before = session.workbench().schema().cloned();

    assert!(block_on(session.submit(OperationKind::Normalize)).is_err());

    let workbench = session.workbench();
    assert_eq!(workbench.schema().cloned(), before);
    assert_eq!(
        workbench.selector(SelectorTarget::Normalize).selection(),
        names(&["units"])
    );
    assert_eq!(
        workbench
            .feedback(FeedbackScope::Normalize)
            .map(|f| (f.message.as_str(), f.severity)),
        Some(("Column 'region' is not numeric", Severity::Danger))
    );
    assert_eq!(session.service().count(Endpoint::Preview), 1);
}
